use serde::{Deserialize, Serialize};

/// Tuning for the automated player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiConfig {
    /// Combos at or above this difficulty are never set.
    pub difficulty_ceiling: u32,
    /// Ranking bonus per card in the skater's passive category.
    pub specialty_weight: u32,
    pub max_combo_size: usize,
    /// Spend a card for advantage when the target is above this.
    pub advantage_threshold: u32,
    /// Use focus on a miss when the target is above this.
    pub refocus_threshold: u32,
    /// Thrasher and sponsors plays allowed before the setter must set or pass.
    #[serde(default = "default_max_turn_actions")]
    pub max_turn_actions: usize,
}

fn default_max_turn_actions() -> usize {
    2
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty_ceiling: 14,
            specialty_weight: 2,
            max_combo_size: 3,
            advantage_threshold: 7,
            refocus_threshold: 8,
            max_turn_actions: default_max_turn_actions(),
        }
    }
}
