use crate::{Card, Category};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboRejection {
    #[error("You must select at least one trick card.")]
    NoTrick,
    #[error("An obstacle needs a trick to go with it.")]
    ObstacleWithoutTrick,
    #[error("Cannot use more than one Stance.")]
    MultipleStances,
    #[error("A Stance must be the first card of the combo.")]
    StanceNotFirst,
    #[error("A Stance cannot be played on its own.")]
    StanceAlone,
    #[error("A Stance must modify a trick.")]
    StanceWithoutTrick,
    #[error("Cannot combine different stair sets.")]
    MixedStairs,
    #[error("Cannot use more than one grind surface.")]
    MultipleGrindSurfaces,
    #[error("Cannot combine a kicker with stairs.")]
    KickerWithStairs,
    #[error("Can't do more than one type of grind.")]
    MultipleGrinds,
    #[error("'Wax' only works with grinds or slides.")]
    WaxWithoutGrind,
    #[error("Cannot combine more than one type of Shuvit.")]
    MultipleShuvits,
    #[error("Cannot combine a Flip and a Shuvit without an Ollie to set up the late trick.")]
    FlipWithShuvit,
}

/// Checks a combo against the legality rules in order; the first broken rule is
/// reported.
pub fn validate_combo(combo: &[Card]) -> Result<(), ComboRejection> {
    let has = |category: Category| combo.iter().any(|card| card.is(category));
    let distinct = |category: Category| {
        combo
            .iter()
            .filter(|card| card.is(category))
            .collect::<BTreeSet<_>>()
            .len()
    };

    if !combo.iter().any(|card| card.is_trick() || card.is_stance()) {
        return Err(ComboRejection::NoTrick);
    }
    if has(Category::Obstacle) && !has(Category::CoreTrick) {
        return Err(ComboRejection::ObstacleWithoutTrick);
    }

    let stances = combo.iter().filter(|card| card.is_stance()).count();
    if stances > 1 {
        return Err(ComboRejection::MultipleStances);
    }
    if stances == 1 {
        if !combo[0].is_stance() {
            return Err(ComboRejection::StanceNotFirst);
        }
        match combo.get(1) {
            None => return Err(ComboRejection::StanceAlone),
            Some(next) if !next.is(Category::CoreTrick) => {
                return Err(ComboRejection::StanceWithoutTrick)
            }
            Some(_) => {}
        }
    }

    if distinct(Category::Stairs) > 1 {
        return Err(ComboRejection::MixedStairs);
    }
    if combo
        .iter()
        .filter(|card| card.is(Category::GrindSurface))
        .count()
        > 1
    {
        return Err(ComboRejection::MultipleGrindSurfaces);
    }
    if combo.contains(&Card::KickerRamp) && has(Category::Stairs) {
        return Err(ComboRejection::KickerWithStairs);
    }
    if distinct(Category::GrindSlide) > 1 {
        return Err(ComboRejection::MultipleGrinds);
    }
    if combo.contains(&Card::Wax) && !has(Category::GrindSlide) {
        return Err(ComboRejection::WaxWithoutGrind);
    }
    if distinct(Category::Shuvit) > 1 {
        return Err(ComboRejection::MultipleShuvits);
    }
    if has(Category::Flip) && has(Category::Shuvit) && !combo.contains(&Card::Ollie) {
        return Err(ComboRejection::FlipWithShuvit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use Card::*;

    macro_rules! rejects {
        ($name:ident, [$($card:expr),*], $expected:expr) => {
            #[test]
            fn $name() {
                assert_eq!(validate_combo(&[$($card),*]), Err($expected));
            }
        };
    }

    macro_rules! accepts {
        ($name:ident, [$($card:expr),*]) => {
            #[test]
            fn $name() {
                assert_eq!(validate_combo(&[$($card),*]), Ok(()));
            }
        };
    }

    rejects!(empty_combo, [], ComboRejection::NoTrick);
    rejects!(specials_only, [Wax, Bail], ComboRejection::NoTrick);
    rejects!(lone_obstacle, [Hubba], ComboRejection::ObstacleWithoutTrick);
    rejects!(
        stairs_without_trick,
        [ThreeStair, Wax],
        ComboRejection::ObstacleWithoutTrick
    );
    rejects!(two_stances, [Fakie, Nollie, Kickflip], ComboRejection::MultipleStances);
    rejects!(stance_second, [Kickflip, Fakie], ComboRejection::StanceNotFirst);
    rejects!(stance_alone, [Switch], ComboRejection::StanceAlone);
    rejects!(
        stance_on_obstacle,
        [Fakie, Hubba, FiftyFifty],
        ComboRejection::StanceWithoutTrick
    );
    rejects!(
        stance_on_special,
        [Nollie, Wax, Boardslide],
        ComboRejection::StanceWithoutTrick
    );
    rejects!(
        mixed_stairs,
        [Kickflip, ThreeStair, FiveStair],
        ComboRejection::MixedStairs
    );
    rejects!(
        two_surfaces,
        [FiftyFifty, Hubba, Hubba],
        ComboRejection::MultipleGrindSurfaces
    );
    rejects!(
        kicker_stairs,
        [Kickflip, KickerRamp, ThreeStair],
        ComboRejection::KickerWithStairs
    );
    rejects!(
        two_grinds,
        [FiftyFifty, Boardslide],
        ComboRejection::MultipleGrinds
    );
    rejects!(wax_on_flip, [Kickflip, Wax], ComboRejection::WaxWithoutGrind);
    rejects!(
        two_shuvits,
        [PopShuvit, FsPopShuvit],
        ComboRejection::MultipleShuvits
    );
    rejects!(
        flip_and_shuvit,
        [Kickflip, PopShuvit],
        ComboRejection::FlipWithShuvit
    );

    accepts!(single_trick, [Kickflip]);
    accepts!(stance_ollie, [Fakie, Ollie]);
    accepts!(stance_late_flip, [Nollie, Ollie, Heelflip]);
    accepts!(double_stairs, [Kickflip, ThreeStair, ThreeStair]);
    accepts!(waxed_ledge, [FiftyFifty, TallLedge, Wax]);
    accepts!(repeated_grind, [FiftyFifty, FiftyFifty]);
    accepts!(late_flip_with_shuvit, [Ollie, Kickflip, PopShuvit]);
    accepts!(obstacle_with_ollie, [Ollie, FiveStair]);
    accepts!(special_riders, [Bail, Kickflip]);

    #[test]
    fn first_failing_rule_wins() {
        // Breaks the stance rule and the grind rule; the stance rule is checked first.
        let combo = [FiftyFifty, Boardslide, Fakie];
        assert_eq!(validate_combo(&combo), Err(ComboRejection::StanceNotFirst));
    }

    #[test]
    fn rejection_text_names_the_rule() {
        assert_eq!(
            ComboRejection::KickerWithStairs.to_string(),
            "Cannot combine a kicker with stairs."
        );
    }
}
