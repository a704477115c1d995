use crate::{GameState, ScoreBreakdown};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChoiceKind {
    /// Opponent may force the setter to re-roll a landed set.
    Bail,
    /// Matcher may discard a pro model deck to ignore their negative modifier.
    ProModelDeck,
    /// Matcher may spend a required card to roll with advantage.
    Advantage,
    /// Matcher may discard focus to re-roll a miss.
    Refocus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceRequest {
    pub player: usize,
    pub kind: ChoiceKind,
    pub difficulty: u32,
    pub roll: Option<u32>,
}

/// Yes/no decisions the engine needs from outside while resolving a turn.
pub trait Decider {
    fn decide(&mut self, state: &GameState, request: &ChoiceRequest) -> bool;

    /// Called with the final difficulty right before `player` rolls.
    fn before_roll(&mut self, _state: &GameState, _player: usize, _score: &ScoreBreakdown) {}
}

impl<F> Decider for F
where
    F: FnMut(&GameState, &ChoiceRequest) -> bool,
{
    fn decide(&mut self, state: &GameState, request: &ChoiceRequest) -> bool {
        self(state, request)
    }
}
