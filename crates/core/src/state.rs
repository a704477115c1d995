use crate::{Card, Player, ScoreBreakdown};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    AwaitingSetter,
    AwaitingMatcher,
    Terminal,
}

/// A combo the setter landed, waiting to be matched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComboAttempt {
    pub setter: usize,
    pub combo: Vec<Card>,
    pub score: ScoreBreakdown,
}

impl ComboAttempt {
    /// The trick and stance cards a matcher needs in hand to avoid the defender penalty.
    pub fn required_cards(&self) -> Vec<Card> {
        self.combo
            .iter()
            .copied()
            .filter(|card| card.is_trick() || card.is_stance())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: [Player; 2],
    pub setter: usize,
    pub phase: Phase,
    pub pending: Option<ComboAttempt>,
    pub last_turn_summary: String,
    #[serde(default)]
    pub turn_prepared: bool,
    #[serde(default)]
    pub turns: u32,
}

impl GameState {
    pub fn new(players: [Player; 2]) -> Self {
        Self {
            players,
            setter: 0,
            phase: Phase::AwaitingSetter,
            pending: None,
            last_turn_summary: String::new(),
            turn_prepared: false,
            turns: 0,
        }
    }

    pub fn matcher(&self) -> usize {
        1 - self.setter
    }

    pub fn switch_setter(&mut self) {
        self.setter = self.matcher();
    }

    pub fn setter_player(&self) -> &Player {
        &self.players[self.setter]
    }

    pub fn matcher_player(&self) -> &Player {
        &self.players[self.matcher()]
    }

    /// Index of the player who completed the elimination word, if any.
    pub fn eliminated(&self) -> Option<usize> {
        self.players
            .iter()
            .position(|player| player.letters.is_complete())
    }

    pub fn winner(&self) -> Option<usize> {
        self.eliminated().map(|loser| 1 - loser)
    }
}
