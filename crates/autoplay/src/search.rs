use crate::{AiAction, AiConfig};
use sk8_core::{validate_combo, Card, Game, ScoreBreakdown, Scorer, Skater};

/// A legal combo the automated setter could attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboCandidate {
    /// Hand positions, ascending.
    pub indices: Vec<usize>,
    pub combo: Vec<Card>,
    pub score: ScoreBreakdown,
    /// Difficulty plus the specialty bonus; what candidates are ranked by.
    pub rank: u32,
}

/// Picks the highest-ranked legal combo of up to `max_combo_size` hand cards whose
/// difficulty stays under the ceiling. Cards keep their hand order inside a combo.
/// The ollie and turn-action specials are never part of a candidate. Ties go to the
/// first candidate found.
pub fn best_combo(
    hand: &[Card],
    skater: &Skater,
    scorer: &Scorer<'_>,
    config: &AiConfig,
) -> Option<ComboCandidate> {
    let eligible: Vec<usize> = hand
        .iter()
        .enumerate()
        .filter(|(_, card)| !card.is_ollie() && !card.is_turn_action())
        .map(|(idx, _)| idx)
        .collect();

    let mut best: Option<ComboCandidate> = None;
    for size in 1..=config.max_combo_size.min(eligible.len()) {
        let mut picks = Vec::new();
        enumerate_combinations(eligible.len(), size, &mut picks);
        for pick in picks {
            let indices: Vec<usize> = pick.iter().map(|slot| eligible[*slot]).collect();
            let combo: Vec<Card> = indices.iter().map(|idx| hand[*idx]).collect();
            if validate_combo(&combo).is_err() {
                continue;
            }
            let ignore_negative = combo.contains(&Card::ProModelDeck);
            let score = scorer.score(&combo, skater, ignore_negative);
            if score.difficulty >= config.difficulty_ceiling {
                continue;
            }
            let rank = score.difficulty + config.specialty_weight * specialty_count(&combo, skater);
            if best.as_ref().map_or(true, |current| rank > current.rank) {
                best = Some(ComboCandidate {
                    indices,
                    combo,
                    score,
                    rank,
                });
            }
        }
    }
    best
}

/// The setter's move for the current game state. Sponsors are played first for the
/// extra cards; a thrasher is played when the hand has no combo worth setting.
/// Otherwise the best combo, or a pass.
pub fn choose_setter_action(game: &Game, config: &AiConfig) -> AiAction {
    let setter = game.state.setter_player();
    if let Some(index) = hand_position(&setter.hand, Card::Sponsors) {
        return AiAction::Play {
            index,
            card: Card::Sponsors,
        };
    }
    match choose_combo_or_pass(game, config) {
        AiAction::Pass => match hand_position(&setter.hand, Card::ThrasherMagazine) {
            Some(index) => AiAction::Play {
                index,
                card: Card::ThrasherMagazine,
            },
            None => AiAction::Pass,
        },
        action => action,
    }
}

/// The best combo in hand, or a pass. Never a turn action.
pub fn choose_combo_or_pass(game: &Game, config: &AiConfig) -> AiAction {
    let setter = game.state.setter_player();
    match best_combo(&setter.hand, &setter.skater, &game.scorer(), config) {
        Some(candidate) => AiAction::Set {
            indices: candidate.indices,
        },
        None => AiAction::Pass,
    }
}

fn hand_position(hand: &[Card], card: Card) -> Option<usize> {
    hand.iter().position(|held| *held == card)
}

fn specialty_count(combo: &[Card], skater: &Skater) -> u32 {
    let Some(category) = skater.passive_category() else {
        return 0;
    };
    combo.iter().filter(|card| card.is(category)).count() as u32
}

fn enumerate_combinations(n: usize, k: usize, out: &mut Vec<Vec<usize>>) {
    if n == 0 || k == 0 || k > n {
        return;
    }
    let mut current = Vec::with_capacity(k);
    recurse_combinations(0, n, k, &mut current, out);
}

fn recurse_combinations(
    start: usize,
    n: usize,
    k: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if current.len() == k {
        out.push(current.clone());
        return;
    }
    let remaining = k - current.len();
    for idx in start..=n - remaining {
        current.push(idx);
        recurse_combinations(idx + 1, n, k, current, out);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk8_core::{CardCatalog, RulesConfig};

    #[test]
    fn combinations_are_lexicographic() {
        let mut out = Vec::new();
        enumerate_combinations(4, 2, &mut out);
        assert_eq!(
            out,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }

    #[test]
    fn empty_or_oversized_picks_yield_nothing() {
        let mut out = Vec::new();
        enumerate_combinations(2, 3, &mut out);
        enumerate_combinations(0, 1, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn specialty_cards_raise_the_rank() {
        let catalog = CardCatalog::standard();
        let rules = RulesConfig::default();
        let scorer = Scorer::new(&catalog, &rules);
        let flip_pro = &Skater::roster()[0];
        let hand = [Card::Ollie, Card::Kickflip];
        let candidate = best_combo(&hand, flip_pro, &scorer, &AiConfig::default()).unwrap();
        // Kickflip 2, passive -1, plus one specialty card.
        assert_eq!(candidate.score.difficulty, 1);
        assert_eq!(candidate.rank, 3);
    }
}
