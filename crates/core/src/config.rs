use crate::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    pub elimination_word: String,
    pub hand_size: usize,
    pub dice_sides: u32,
    pub dice_count: usize,
    pub defender_penalty: u32,
    pub flatground_penalty: u32,
    pub wax_discount: u32,
    #[serde(default = "default_redraw_count")]
    pub redraw_count: usize,
    #[serde(default = "default_temporary_draw_count")]
    pub temporary_draw_count: usize,
}

fn default_redraw_count() -> usize {
    7
}

fn default_temporary_draw_count() -> usize {
    2
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            elimination_word: "SK8".to_string(),
            hand_size: 8,
            dice_sides: 8,
            dice_count: 2,
            defender_penalty: 2,
            flatground_penalty: 2,
            wax_discount: 2,
            redraw_count: default_redraw_count(),
            temporary_draw_count: default_temporary_draw_count(),
        }
    }
}

impl RulesConfig {
    pub fn word_len(&self) -> usize {
        self.elimination_word.chars().count()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrickRule {
    pub card: Card,
    pub base: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StanceRule {
    pub card: Card,
    pub bonus: u32,
}

/// Nominal difficulty table. Values are the printed ones; the catalog derives the
/// playable values from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrickTable {
    pub tricks: Vec<TrickRule>,
    pub stances: Vec<StanceRule>,
}

impl TrickTable {
    pub fn nominal(&self, card: Card) -> Option<u32> {
        self.tricks
            .iter()
            .find(|rule| rule.card == card)
            .map(|rule| rule.base)
    }
}

impl Default for TrickTable {
    fn default() -> Self {
        let tricks = [
            (Card::Ollie, 2),
            (Card::Kickflip, 3),
            (Card::Heelflip, 4),
            (Card::Treflip, 5),
            (Card::VarialKickflip, 4),
            (Card::VarialHeelflip, 4),
            (Card::Hardflip, 5),
            (Card::InwardHeelflip, 5),
            (Card::Bs180, 2),
            (Card::Fs180, 3),
            (Card::Bs360, 3),
            (Card::Fs360, 4),
            (Card::FiftyFifty, 3),
            (Card::FiveO, 4),
            (Card::Boardslide, 3),
            (Card::Lipslide, 6),
            (Card::Noseslide, 4),
            (Card::Tailslide, 5),
            (Card::NoseGrind, 5),
            (Card::CrookedGrind, 6),
            (Card::FeebleGrind, 6),
            (Card::SaladGrind, 6),
            (Card::WillyGrind, 5),
            (Card::BluntSlide, 6),
            (Card::TallLedge, 3),
            (Card::Hubba, 4),
            (Card::FlatBar, 3),
            (Card::RoundRail, 4),
            (Card::DownRail, 4),
            (Card::KickerRamp, 2),
            (Card::ThreeStair, 3),
            (Card::FiveStair, 3),
            (Card::PopShuvit, 2),
            (Card::FsPopShuvit, 3),
            (Card::BsPopShuvit, 3),
            (Card::ThreeSixtyPopShuvit, 4),
        ];
        let stances = [(Card::Nollie, 3), (Card::Fakie, 2), (Card::Switch, 2)];
        Self {
            tricks: tricks
                .into_iter()
                .map(|(card, base)| TrickRule { card, base })
                .collect(),
            stances: stances
                .into_iter()
                .map(|(card, bonus)| StanceRule { card, bonus })
                .collect(),
        }
    }
}
