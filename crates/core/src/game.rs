use crate::{
    Card, CardCatalog, ComboRejection, DiceRoll, GameState, Phase, RngState, RulesConfig,
    ScoreBreakdown,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

mod abilities;
mod helpers;
mod matcher;
mod setter;
mod specials;
mod state;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("invalid input: {0}")]
    InputMalformed(String),
    #[error("invalid combo: {0}")]
    ComboRejected(#[from] ComboRejection),
    #[error("{0}")]
    InsufficientResource(String),
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("the game is over")]
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub rules: RulesConfig,
    pub catalog: Arc<CardCatalog>,
    pub rng: RngState,
    pub state: GameState,
}

/// One setter roll sequence, including a bail re-roll when it happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetterRoll {
    pub combo: Vec<Card>,
    pub score: ScoreBreakdown,
    pub rolls: Vec<DiceRoll>,
    pub bail_played: bool,
    /// The card paid for landing the set.
    pub cost: Option<Card>,
}

impl SetterRoll {
    pub fn final_total(&self) -> u32 {
        self.rolls.last().map(|roll| roll.total).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SetterOutcome {
    Landed(SetterRoll),
    Bailed(SetterRoll),
    Redrew { returned: usize, drawn: Vec<Card> },
    DrewTemporary(Vec<Card>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchReport {
    pub combo: Vec<Card>,
    pub score: ScoreBreakdown,
    pub defender_penalty: bool,
    pub pro_model: bool,
    pub advantage: Option<Card>,
    pub rolls: Vec<DiceRoll>,
    pub refocused: bool,
    pub last_chance: bool,
    pub landed: bool,
    pub letter: Option<char>,
}

impl MatchReport {
    pub fn final_total(&self) -> u32 {
        self.rolls.last().map(|roll| roll.total).unwrap_or(0)
    }
}
