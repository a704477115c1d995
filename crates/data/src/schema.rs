use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use sk8_core::{DeckRecipe, RulesConfig, Skater, StanceRule, TrickRule, TrickTable};
use sk8_core::{CardCatalog, Deck, RngState};

/// Everything a game needs besides the players' choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub rules: RulesConfig,
    pub tricks: TrickTable,
    pub skaters: Vec<Skater>,
    pub decks: DeckRecipe,
}

impl GameData {
    pub fn catalog(&self) -> Arc<CardCatalog> {
        Arc::new(CardCatalog::from_table(&self.tricks))
    }

    pub fn skater(&self, name: &str) -> Option<&Skater> {
        self.skaters
            .iter()
            .find(|skater| skater.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Themed deck for `skater`: the shared base, their pack, then a random top-up.
    pub fn build_deck(&self, skater: &Skater, catalog: &CardCatalog, rng: &mut RngState) -> Deck {
        self.decks.build(&skater.name, catalog, rng)
    }
}
