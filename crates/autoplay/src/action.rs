use serde::{Deserialize, Serialize};
use sk8_core::Card;

/// What an automated player did on one turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AiAction {
    /// Set a combo from these hand positions.
    Set { indices: Vec<usize> },
    /// Play the turn-action special at this hand position; the turn goes on.
    Play { index: usize, card: Card },
    Pass,
    Match,
}

impl AiAction {
    pub fn stable_key(&self) -> String {
        match self {
            Self::Set { indices } => format!("set:{indices:?}"),
            Self::Play { card, .. } => format!("play:{}", card.id()),
            Self::Pass => "pass".to_string(),
            Self::Match => "match".to_string(),
        }
    }

    pub fn short_label(&self) -> String {
        match self {
            Self::Set { indices } => {
                let positions: Vec<String> =
                    indices.iter().map(|idx| (idx + 1).to_string()).collect();
                format!("set {}", positions.join(" "))
            }
            Self::Play { card, .. } => format!("play {}", card.name()),
            Self::Pass => "pass".to_string(),
            Self::Match => "match".to_string(),
        }
    }
}
