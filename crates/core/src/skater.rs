use crate::{Card, Category};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Ability {
    DifficultyModifier { category: Category, amount: i32 },
    Activated { cost: usize, category: Category },
}

impl Ability {
    pub fn category(&self) -> Category {
        match self {
            Ability::DifficultyModifier { category, .. } | Ability::Activated { category, .. } => {
                *category
            }
        }
    }

    /// Difficulty delta this ability applies to `card`, if any.
    pub fn modifier_for(&self, card: Card) -> Option<i32> {
        match self {
            Ability::DifficultyModifier { category, amount } if card.is(*category) => Some(*amount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skater {
    pub name: String,
    pub passive: Ability,
    pub negative: Ability,
    pub activated: Ability,
}

impl Skater {
    /// Category the skater specialises in: the one their activated search targets and
    /// the one their trade ability gives up.
    pub fn specialty(&self) -> Category {
        self.activated.category()
    }

    pub fn passive_category(&self) -> Option<Category> {
        match self.passive {
            Ability::DifficultyModifier { category, .. } => Some(category),
            Ability::Activated { .. } => None,
        }
    }

    pub fn activation_cost(&self) -> Option<usize> {
        match self.activated {
            Ability::Activated { cost, .. } => Some(cost),
            Ability::DifficultyModifier { .. } => None,
        }
    }

    pub fn passive_text(&self) -> String {
        match self.passive {
            Ability::DifficultyModifier { category, amount } => {
                format!("[PASSIVE] {category} are {amount:+} difficulty.")
            }
            Ability::Activated { .. } => "[PASSIVE] none".to_string(),
        }
    }

    pub fn negative_text(&self) -> String {
        match self.negative {
            Ability::DifficultyModifier { category, amount } => {
                format!("[-] {category} are {amount:+} difficulty.")
            }
            Ability::Activated { .. } => "[-] none".to_string(),
        }
    }

    pub fn activated_text(&self) -> String {
        match self.activated {
            Ability::Activated { cost, category } => {
                format!("Use Main Ability (Discard {cost} to find a card from {category})")
            }
            Ability::DifficultyModifier { .. } => "No main ability".to_string(),
        }
    }

    pub fn trade_text(&self) -> String {
        format!(
            "Use Trade Ability (Discard 1 card from {} for another card type)",
            self.specialty()
        )
    }

    pub fn roster() -> Vec<Skater> {
        vec![
            Skater::specialist("Flip Pro", Category::Flip, Category::GrindSlide),
            Skater::specialist("Grind Specialist", Category::GrindSlide, Category::Flip),
            Skater::specialist("Spot Finder", Category::Obstacle, Category::Spin),
        ]
    }

    fn specialist(name: &str, specialty: Category, weakness: Category) -> Skater {
        Skater {
            name: name.to_string(),
            passive: Ability::DifficultyModifier {
                category: specialty,
                amount: -1,
            },
            negative: Ability::DifficultyModifier {
                category: weakness,
                amount: 1,
            },
            activated: Ability::Activated {
                cost: 2,
                category: specialty,
            },
        }
    }
}
