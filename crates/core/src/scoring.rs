use crate::{Card, CardCatalog, Category, RulesConfig, Skater};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreTraceStep {
    pub source: String,
    pub delta: i32,
    pub after: i32,
}

impl fmt::Display for ScoreTraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  - {}: {:+}", self.source, self.delta)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub difficulty: u32,
    pub late_trick: Option<Card>,
    pub trace: Vec<ScoreTraceStep>,
}

impl ScoreBreakdown {
    pub fn lines(&self) -> Vec<String> {
        self.trace.iter().map(ToString::to_string).collect()
    }

    /// Adds a flat surcharge after the floor, recording it in the trace.
    pub fn add_surcharge(&mut self, source: &str, amount: u32) {
        if amount == 0 {
            return;
        }
        self.difficulty += amount;
        self.trace.push(ScoreTraceStep {
            source: source.to_string(),
            delta: amount as i32,
            after: self.difficulty as i32,
        });
    }
}

#[derive(Debug, Default)]
struct Tally {
    total: i32,
    trace: Vec<ScoreTraceStep>,
}

impl Tally {
    fn add(&mut self, source: impl Into<String>, delta: i32) {
        if delta == 0 {
            return;
        }
        self.total += delta;
        self.trace.push(ScoreTraceStep {
            source: source.into(),
            delta,
            after: self.total,
        });
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    catalog: &'a CardCatalog,
    rules: &'a RulesConfig,
}

impl<'a> Scorer<'a> {
    pub fn new(catalog: &'a CardCatalog, rules: &'a RulesConfig) -> Self {
        Self { catalog, rules }
    }

    pub fn score(&self, combo: &[Card], skater: &Skater, ignore_negative: bool) -> ScoreBreakdown {
        let mut tally = Tally::default();

        let late_trick = late_trick(combo);
        if let Some(trick) = late_trick {
            let bonus = self.base(trick);
            tally.add(format!("Late {} Bonus", trick.name()), bonus);
        }

        if let Some(stance) = combo.iter().copied().find(|card| card.is_stance()) {
            let bonus = self.catalog.stance_bonus(stance).unwrap_or(0) as i32;
            tally.add(format!("{} Stance", stance.name()), bonus);
        }

        let grinding = combo.iter().any(|card| card.is(Category::GrindSlide));
        let on_surface = combo.iter().any(|card| card.is(Category::GrindSurface));
        if grinding && !on_surface {
            tally.add("Flatground Grind", self.rules.flatground_penalty as i32);
        }

        let counts = card_counts(combo);
        for &(card, count) in &counts {
            let Some(base) = self.catalog.base_difficulty(card) else {
                continue;
            };
            tally.add(counted_name(card, count), base as i32 * count as i32);
            if count > 1 && (card.is(Category::Stairs) || card.is(Category::Flip)) {
                let surcharge: usize = (2..=count).sum();
                tally.add(format!("Duplicate {}", card.name()), surcharge as i32);
            }
        }

        for &(card, _) in &counts {
            if !self.catalog.is_trick(card) {
                continue;
            }
            if let Some(amount) = skater.passive.modifier_for(card) {
                tally.add(format!("Passive ({}): {}", skater.name, card.name()), amount);
            }
        }

        if !ignore_negative {
            for &(card, _) in &counts {
                if !self.catalog.is_trick(card) {
                    continue;
                }
                if let Some(amount) = skater.negative.modifier_for(card) {
                    tally.add(format!("Negative ({}): {}", skater.name, card.name()), amount);
                }
            }
        }

        if combo.contains(&Card::Wax) {
            tally.add("Wax Card", -(self.rules.wax_discount as i32));
        }

        if tally.total < 1 {
            let lift = 1 - tally.total;
            tally.add("Minimum Difficulty", lift);
        }

        ScoreBreakdown {
            difficulty: tally.total as u32,
            late_trick,
            trace: tally.trace,
        }
    }

    fn base(&self, card: Card) -> i32 {
        self.catalog.base_difficulty(card).unwrap_or(0) as i32
    }
}

/// Finds a late flip or shuvit: `[ollie, trick]` or `[stance, ollie, trick]` at the very
/// start of the combo.
pub fn late_trick(combo: &[Card]) -> Option<Card> {
    let rest = match combo.first() {
        Some(card) if card.is_stance() => &combo[1..],
        _ => combo,
    };
    match rest {
        [Card::Ollie, trick, ..] if trick.is(Category::Flip) || trick.is(Category::Shuvit) => {
            Some(*trick)
        }
        _ => None,
    }
}

/// Distinct cards with their multiplicity, in order of first appearance.
pub fn card_counts(combo: &[Card]) -> Vec<(Card, usize)> {
    let mut counts: Vec<(Card, usize)> = Vec::new();
    for card in combo {
        match counts.iter_mut().find(|(seen, _)| seen == card) {
            Some((_, count)) => *count += 1,
            None => counts.push((*card, 1)),
        }
    }
    counts
}

pub fn counted_name(card: Card, count: usize) -> String {
    match count {
        0 | 1 => card.name().to_string(),
        2 => format!("Double {}", card.name()),
        3 => format!("Triple {}", card.name()),
        4 => format!("Quad {}", card.name()),
        n => format!("{n}x {}", card.name()),
    }
}

/// Human-readable name for a combo, e.g. "Fakie Late Kickflip + Hubba".
pub fn combo_display_name(combo: &[Card]) -> String {
    let mut parts = Vec::new();
    let mut named: Vec<Card> = Vec::new();
    let stance = combo.iter().copied().find(|card| card.is_stance());

    if let Some(trick) = late_trick(combo) {
        let lead = match stance {
            Some(stance) => format!("{} Late {}", stance.name(), trick.name()),
            None => format!("Late {}", trick.name()),
        };
        parts.push(lead);
        named.extend([Card::Ollie, trick]);
        named.extend(stance);
    } else if let Some(stance) = stance {
        if let Some(trick) = combo.iter().copied().find(|card| card.is(Category::CoreTrick)) {
            parts.push(format!("{} {}", stance.name(), trick.name()));
            named.extend([stance, trick]);
        }
    }

    let mut rest: Vec<(Card, usize)> = card_counts(combo)
        .into_iter()
        .filter(|(card, _)| !named.contains(card) && !card.is_special())
        .collect();
    rest.sort_by_key(|(card, _)| card.id());
    parts.extend(rest.into_iter().map(|(card, count)| counted_name(card, count)));

    if parts.is_empty() {
        "a basic move".to_string()
    } else {
        parts.join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ability;
    use Card::*;

    fn neutral() -> Skater {
        Skater {
            name: "Neutral".to_string(),
            passive: Ability::DifficultyModifier {
                category: Category::Stance,
                amount: 0,
            },
            negative: Ability::DifficultyModifier {
                category: Category::Special,
                amount: 0,
            },
            activated: Ability::Activated {
                cost: 2,
                category: Category::Spin,
            },
        }
    }

    fn score(combo: &[Card], skater: &Skater, ignore_negative: bool) -> ScoreBreakdown {
        let catalog = CardCatalog::standard();
        let rules = RulesConfig::default();
        Scorer::new(&catalog, &rules).score(combo, skater, ignore_negative)
    }

    #[test]
    fn stance_ollie_has_no_late_bonus() {
        let breakdown = score(&[Fakie, Ollie], &neutral(), false);
        assert_eq!(breakdown.difficulty, 2 + 2);
        assert_eq!(breakdown.late_trick, None);
    }

    #[test]
    fn late_kickflip_counts_the_flip_twice() {
        let breakdown = score(&[Ollie, Kickflip], &neutral(), false);
        assert_eq!(breakdown.late_trick, Some(Kickflip));
        assert_eq!(breakdown.difficulty, 2 * 2 + 2);
        assert_eq!(breakdown.trace[0].source, "Late Kickflip Bonus");
    }

    #[test]
    fn stance_late_shuvit() {
        let breakdown = score(&[Nollie, Ollie, PopShuvit], &neutral(), false);
        assert_eq!(breakdown.late_trick, Some(PopShuvit));
        assert_eq!(breakdown.difficulty, 2 + 3 + 2 + 2);
    }

    #[test]
    fn separated_ollie_suppresses_late_bonus() {
        let breakdown = score(&[Ollie, Hubba, Kickflip], &neutral(), false);
        assert_eq!(breakdown.late_trick, None);
        assert_eq!(breakdown.difficulty, 2 + 4 + 2);
    }

    #[test]
    fn flatground_grind_penalty() {
        let flat = score(&[FiftyFifty], &neutral(), false);
        let ledge = score(&[FiftyFifty, TallLedge], &neutral(), false);
        assert_eq!(flat.difficulty, 3 + 2);
        assert_eq!(ledge.difficulty, 3 + 3);
    }

    #[test]
    fn duplicate_flips_are_triangular() {
        let breakdown = score(&[Kickflip, Kickflip, Kickflip], &neutral(), false);
        assert_eq!(breakdown.difficulty, 2 * 3 + (2 + 3));
        let spins = score(&[Bs180, Bs180], &neutral(), false);
        assert_eq!(spins.difficulty, 2 * 2);
    }

    #[test]
    fn passive_and_negative_apply_per_card_type() {
        let flip_pro = &Skater::roster()[0];
        let breakdown = score(&[Kickflip, Kickflip], flip_pro, false);
        assert_eq!(breakdown.difficulty, 2 * 2 + 2 - 1);
        let grind = score(&[Boardslide, Hubba], flip_pro, false);
        assert_eq!(grind.difficulty, 3 + 4 + 1);
        let ignored = score(&[Boardslide, Hubba], flip_pro, true);
        assert_eq!(ignored.difficulty, 3 + 4);
    }

    #[test]
    fn wax_discount_and_floor() {
        let grinder = &Skater::roster()[1];
        let breakdown = score(&[Boardslide, FlatBar, Wax], grinder, false);
        assert_eq!(breakdown.difficulty, 3 + 3 - 1 - 2);
        let spotter = &Skater::roster()[2];
        let floored = score(&[Bs180, KickerRamp, Wax], spotter, true);
        assert!(floored.difficulty >= 1);
    }

    #[test]
    fn floor_is_recorded_in_trace() {
        let skater = Skater {
            passive: Ability::DifficultyModifier {
                category: Category::Spin,
                amount: -5,
            },
            ..neutral()
        };
        let breakdown = score(&[Bs180], &skater, false);
        assert_eq!(breakdown.difficulty, 1);
        assert_eq!(breakdown.trace.last().map(|step| step.source.as_str()), Some("Minimum Difficulty"));
    }

    #[test]
    fn trace_skips_zero_terms() {
        let breakdown = score(&[Kickflip], &neutral(), false);
        assert_eq!(breakdown.lines(), vec!["  - Kickflip: +2".to_string()]);
    }

    #[test]
    fn surcharge_is_added_after_floor() {
        let mut breakdown = score(&[Ollie], &neutral(), false);
        breakdown.add_surcharge("Defender Penalty", 2);
        assert_eq!(breakdown.difficulty, 4);
        assert_eq!(breakdown.trace.last().map(|step| step.after), Some(4));
    }

    #[test]
    fn display_names() {
        assert_eq!(combo_display_name(&[Ollie, Kickflip]), "Late Kickflip");
        assert_eq!(combo_display_name(&[Fakie, Ollie]), "Fakie Ollie");
        assert_eq!(
            combo_display_name(&[Nollie, Ollie, Heelflip, Hubba]),
            "Nollie Late Heelflip + Hubba"
        );
        assert_eq!(
            combo_display_name(&[Kickflip, Kickflip, ThreeStair]),
            "3 Stair + Double Kickflip"
        );
        assert_eq!(combo_display_name(&[Wax]), "a basic move");
    }
}
