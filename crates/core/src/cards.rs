use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Card {
    Ollie,
    Kickflip,
    Heelflip,
    Treflip,
    VarialKickflip,
    VarialHeelflip,
    Hardflip,
    InwardHeelflip,
    #[serde(rename = "bs_180")]
    Bs180,
    #[serde(rename = "fs_180")]
    Fs180,
    #[serde(rename = "bs_360")]
    Bs360,
    #[serde(rename = "fs_360")]
    Fs360,
    PopShuvit,
    FsPopShuvit,
    BsPopShuvit,
    #[serde(rename = "360_pop_shuvit")]
    ThreeSixtyPopShuvit,
    FiftyFifty,
    FiveO,
    Boardslide,
    Lipslide,
    Noseslide,
    Tailslide,
    NoseGrind,
    CrookedGrind,
    FeebleGrind,
    SaladGrind,
    WillyGrind,
    BluntSlide,
    TallLedge,
    Hubba,
    FlatBar,
    RoundRail,
    DownRail,
    KickerRamp,
    #[serde(rename = "3_stair")]
    ThreeStair,
    #[serde(rename = "5_stair")]
    FiveStair,
    Nollie,
    Fakie,
    Switch,
    Wax,
    ThrasherMagazine,
    Focus,
    ProModelDeck,
    Sponsors,
    Bail,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardKind {
    Trick,
    Stance,
    Special,
}

/// Category labels. The first five are the primary trick families; the rest are
/// derived groupings used by combo legality and scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Flip,
    Shuvit,
    GrindSlide,
    Spin,
    Obstacle,
    Stairs,
    GrindSurface,
    CoreTrick,
    Stance,
    Special,
}

impl Category {
    pub const PRIMARY: [Category; 5] = [
        Category::Flip,
        Category::Shuvit,
        Category::GrindSlide,
        Category::Spin,
        Category::Obstacle,
    ];

    pub const ALL: [Category; 10] = [
        Category::Flip,
        Category::Shuvit,
        Category::GrindSlide,
        Category::Spin,
        Category::Obstacle,
        Category::Stairs,
        Category::GrindSurface,
        Category::CoreTrick,
        Category::Stance,
        Category::Special,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Flip => "Flips",
            Category::Shuvit => "Shuvits",
            Category::GrindSlide => "Grinds",
            Category::Spin => "Spins",
            Category::Obstacle => "Obstacles",
            Category::Stairs => "Stairs",
            Category::GrindSurface => "Grind Surfaces",
            Category::CoreTrick => "Core Tricks",
            Category::Stance => "Stances",
            Category::Special => "Specials",
        }
    }

    pub fn is_primary(self) -> bool {
        Self::PRIMARY.contains(&self)
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u16);

impl CategorySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn with(mut self, category: Category) -> Self {
        self.insert(category);
        self
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= category.bit();
    }

    pub fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

impl Card {
    pub const ALL: [Card; 45] = [
        Card::Ollie,
        Card::Kickflip,
        Card::Heelflip,
        Card::Treflip,
        Card::VarialKickflip,
        Card::VarialHeelflip,
        Card::Hardflip,
        Card::InwardHeelflip,
        Card::Bs180,
        Card::Fs180,
        Card::Bs360,
        Card::Fs360,
        Card::PopShuvit,
        Card::FsPopShuvit,
        Card::BsPopShuvit,
        Card::ThreeSixtyPopShuvit,
        Card::FiftyFifty,
        Card::FiveO,
        Card::Boardslide,
        Card::Lipslide,
        Card::Noseslide,
        Card::Tailslide,
        Card::NoseGrind,
        Card::CrookedGrind,
        Card::FeebleGrind,
        Card::SaladGrind,
        Card::WillyGrind,
        Card::BluntSlide,
        Card::TallLedge,
        Card::Hubba,
        Card::FlatBar,
        Card::RoundRail,
        Card::DownRail,
        Card::KickerRamp,
        Card::ThreeStair,
        Card::FiveStair,
        Card::Nollie,
        Card::Fakie,
        Card::Switch,
        Card::Wax,
        Card::ThrasherMagazine,
        Card::Focus,
        Card::ProModelDeck,
        Card::Sponsors,
        Card::Bail,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Card::Ollie => "ollie",
            Card::Kickflip => "kickflip",
            Card::Heelflip => "heelflip",
            Card::Treflip => "treflip",
            Card::VarialKickflip => "varial_kickflip",
            Card::VarialHeelflip => "varial_heelflip",
            Card::Hardflip => "hardflip",
            Card::InwardHeelflip => "inward_heelflip",
            Card::Bs180 => "bs_180",
            Card::Fs180 => "fs_180",
            Card::Bs360 => "bs_360",
            Card::Fs360 => "fs_360",
            Card::PopShuvit => "pop_shuvit",
            Card::FsPopShuvit => "fs_pop_shuvit",
            Card::BsPopShuvit => "bs_pop_shuvit",
            Card::ThreeSixtyPopShuvit => "360_pop_shuvit",
            Card::FiftyFifty => "fifty_fifty",
            Card::FiveO => "five_o",
            Card::Boardslide => "boardslide",
            Card::Lipslide => "lipslide",
            Card::Noseslide => "noseslide",
            Card::Tailslide => "tailslide",
            Card::NoseGrind => "nose_grind",
            Card::CrookedGrind => "crooked_grind",
            Card::FeebleGrind => "feeble_grind",
            Card::SaladGrind => "salad_grind",
            Card::WillyGrind => "willy_grind",
            Card::BluntSlide => "blunt_slide",
            Card::TallLedge => "tall_ledge",
            Card::Hubba => "hubba",
            Card::FlatBar => "flat_bar",
            Card::RoundRail => "round_rail",
            Card::DownRail => "down_rail",
            Card::KickerRamp => "kicker_ramp",
            Card::ThreeStair => "3_stair",
            Card::FiveStair => "5_stair",
            Card::Nollie => "nollie",
            Card::Fakie => "fakie",
            Card::Switch => "switch",
            Card::Wax => "wax",
            Card::ThrasherMagazine => "thrasher_magazine",
            Card::Focus => "focus",
            Card::ProModelDeck => "pro_model_deck",
            Card::Sponsors => "sponsors",
            Card::Bail => "bail",
        }
    }

    pub fn from_id(id: &str) -> Option<Card> {
        Card::ALL.into_iter().find(|card| card.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Card::Ollie => "Ollie",
            Card::Kickflip => "Kickflip",
            Card::Heelflip => "Heelflip",
            Card::Treflip => "Treflip",
            Card::VarialKickflip => "Varial Kickflip",
            Card::VarialHeelflip => "Varial Heelflip",
            Card::Hardflip => "Hardflip",
            Card::InwardHeelflip => "Inward Heelflip",
            Card::Bs180 => "BS 180",
            Card::Fs180 => "FS 180",
            Card::Bs360 => "BS 360",
            Card::Fs360 => "FS 360",
            Card::PopShuvit => "Pop Shuvit",
            Card::FsPopShuvit => "FS Pop Shuvit",
            Card::BsPopShuvit => "BS Pop Shuvit",
            Card::ThreeSixtyPopShuvit => "360 Pop Shuvit",
            Card::FiftyFifty => "Fifty-Fifty",
            Card::FiveO => "Five-O",
            Card::Boardslide => "Boardslide",
            Card::Lipslide => "Lipslide",
            Card::Noseslide => "Noseslide",
            Card::Tailslide => "Tailslide",
            Card::NoseGrind => "Nose Grind",
            Card::CrookedGrind => "Crooked Grind",
            Card::FeebleGrind => "Feeble Grind",
            Card::SaladGrind => "Salad Grind",
            Card::WillyGrind => "Willy Grind",
            Card::BluntSlide => "Blunt Slide",
            Card::TallLedge => "Tall Ledge",
            Card::Hubba => "Hubba",
            Card::FlatBar => "Flat Bar",
            Card::RoundRail => "Round Rail",
            Card::DownRail => "Down Rail",
            Card::KickerRamp => "Kicker Ramp",
            Card::ThreeStair => "3 Stair",
            Card::FiveStair => "5 Stair",
            Card::Nollie => "Nollie",
            Card::Fakie => "Fakie",
            Card::Switch => "Switch",
            Card::Wax => "Wax",
            Card::ThrasherMagazine => "Thrasher Magazine",
            Card::Focus => "Focus",
            Card::ProModelDeck => "Pro Model Deck",
            Card::Sponsors => "Sponsors",
            Card::Bail => "Bail",
        }
    }

    pub fn kind(self) -> CardKind {
        match self {
            Card::Nollie | Card::Fakie | Card::Switch => CardKind::Stance,
            Card::Wax
            | Card::ThrasherMagazine
            | Card::Focus
            | Card::ProModelDeck
            | Card::Sponsors
            | Card::Bail => CardKind::Special,
            _ => CardKind::Trick,
        }
    }

    /// Primary trick family. The ollie is a trick with no family.
    pub fn primary_category(self) -> Option<Category> {
        match self {
            Card::Kickflip
            | Card::Heelflip
            | Card::Treflip
            | Card::VarialKickflip
            | Card::VarialHeelflip
            | Card::Hardflip
            | Card::InwardHeelflip => Some(Category::Flip),
            Card::Bs180 | Card::Fs180 | Card::Bs360 | Card::Fs360 => Some(Category::Spin),
            Card::PopShuvit | Card::FsPopShuvit | Card::BsPopShuvit | Card::ThreeSixtyPopShuvit => {
                Some(Category::Shuvit)
            }
            Card::FiftyFifty
            | Card::FiveO
            | Card::Boardslide
            | Card::Lipslide
            | Card::Noseslide
            | Card::Tailslide
            | Card::NoseGrind
            | Card::CrookedGrind
            | Card::FeebleGrind
            | Card::SaladGrind
            | Card::WillyGrind
            | Card::BluntSlide => Some(Category::GrindSlide),
            Card::TallLedge
            | Card::Hubba
            | Card::FlatBar
            | Card::RoundRail
            | Card::DownRail
            | Card::KickerRamp
            | Card::ThreeStair
            | Card::FiveStair => Some(Category::Obstacle),
            _ => None,
        }
    }

    pub fn categories(self) -> CategorySet {
        let mut set = CategorySet::empty();
        match self.kind() {
            CardKind::Stance => set.insert(Category::Stance),
            CardKind::Special => set.insert(Category::Special),
            CardKind::Trick => {}
        }
        if let Some(primary) = self.primary_category() {
            set.insert(primary);
            if primary != Category::Obstacle {
                set.insert(Category::CoreTrick);
            }
        }
        match self {
            Card::Ollie => set.insert(Category::CoreTrick),
            Card::ThreeStair | Card::FiveStair => set.insert(Category::Stairs),
            Card::TallLedge | Card::Hubba | Card::FlatBar | Card::RoundRail | Card::DownRail => {
                set.insert(Category::GrindSurface)
            }
            _ => {}
        }
        set
    }

    pub fn is(self, category: Category) -> bool {
        self.categories().contains(category)
    }

    pub fn is_trick(self) -> bool {
        self.kind() == CardKind::Trick
    }

    pub fn is_stance(self) -> bool {
        self.kind() == CardKind::Stance
    }

    pub fn is_special(self) -> bool {
        self.kind() == CardKind::Special
    }

    pub fn is_ollie(self) -> bool {
        self == Card::Ollie
    }

    /// Special cards that are played on their own as a turn action rather than
    /// inside a trick combo.
    pub fn is_turn_action(self) -> bool {
        matches!(self, Card::ThrasherMagazine | Card::Sponsors)
    }

    pub fn description(self) -> Option<&'static str> {
        match self {
            Card::Wax => Some("Play with a Grind/Slide combo to reduce its difficulty by 2."),
            Card::ThrasherMagazine => Some("Shuffle your hand (except Ollie) and draw 7 new cards."),
            Card::Focus => Some("If you fail to match a trick, play this to re-roll your dice once."),
            Card::ProModelDeck => {
                Some("Play this card to ignore your skater's negative ability for this turn.")
            }
            Card::Sponsors => {
                Some("Draw 2 cards. You must use them this turn or they are discarded.")
            }
            Card::Bail => Some("Force an opponent to re-roll a successful trick-setting roll."),
            _ => None,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_lookup() {
        for card in Card::ALL {
            assert_eq!(Card::from_id(card.id()), Some(card));
        }
        assert_eq!(Card::from_id("no_comply"), None);
    }

    #[test]
    fn tricks_have_at_most_one_primary_family() {
        for card in Card::ALL {
            let primaries = card
                .categories()
                .iter()
                .filter(|category| category.is_primary())
                .count();
            if card.is_trick() && card != Card::Ollie {
                assert_eq!(primaries, 1, "{card:?}");
            } else {
                assert_eq!(primaries, 0, "{card:?}");
            }
        }
    }

    #[test]
    fn core_trick_is_union_of_families_and_ollie() {
        for card in Card::ALL {
            let expected = card == Card::Ollie
                || card.is(Category::Flip)
                || card.is(Category::Shuvit)
                || card.is(Category::Spin)
                || card.is(Category::GrindSlide);
            assert_eq!(card.is(Category::CoreTrick), expected, "{card:?}");
        }
    }

    #[test]
    fn stairs_and_surfaces_are_obstacles() {
        for card in Card::ALL {
            if card.is(Category::Stairs) || card.is(Category::GrindSurface) {
                assert!(card.is(Category::Obstacle));
            }
        }
        assert!(!Card::KickerRamp.is(Category::Stairs));
        assert!(!Card::KickerRamp.is(Category::GrindSurface));
    }
}
