use crate::{Card, CardCatalog, RngState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn new(draw: Vec<Card>) -> Self {
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    /// Draws up to `count` cards, folding the discard pile back in when the draw pile
    /// runs out. Returns fewer cards when both piles are empty.
    pub fn draw_cards(&mut self, count: usize, rng: &mut RngState) -> (Vec<Card>, bool) {
        let mut cards = Vec::with_capacity(count);
        let mut reshuffled = false;
        while cards.len() < count {
            if self.draw.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.reshuffle_discard(rng);
                reshuffled = true;
            }
            if let Some(card) = self.draw.pop() {
                cards.push(card);
            }
        }
        (cards, reshuffled)
    }

    pub fn discard(&mut self, mut cards: Vec<Card>) {
        self.discard.append(&mut cards);
    }

    pub fn reshuffle_discard(&mut self, rng: &mut RngState) {
        if self.discard.is_empty() {
            return;
        }
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
    }

    /// Removes one copy of `card` from the draw pile.
    pub fn take(&mut self, card: Card) -> Option<Card> {
        let index = self.draw.iter().position(|held| *held == card)?;
        Some(self.draw.remove(index))
    }

    pub fn count_matching(&self, mut predicate: impl FnMut(Card) -> bool) -> usize {
        self.draw.iter().filter(|card| predicate(**card)).count()
    }
}

/// Themed deck construction: a shared base list, a per-skater specialty pack, then a
/// random top-up of distinct tricks and stances to reach `target_size`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckRecipe {
    pub base: Vec<Card>,
    pub packs: HashMap<String, Vec<Card>>,
    pub target_size: usize,
}

impl DeckRecipe {
    pub fn build(&self, skater: &str, catalog: &CardCatalog, rng: &mut RngState) -> Deck {
        let mut cards = self.base.clone();
        if let Some(pack) = self.packs.get(skater) {
            cards.extend(pack.iter().copied());
        }
        let missing = self.target_size.saturating_sub(cards.len());
        if missing > 0 {
            let mut pool = catalog.fill_pool();
            rng.shuffle(&mut pool);
            cards.extend(pool.into_iter().take(missing));
        }
        let mut deck = Deck::new(cards);
        deck.shuffle(rng);
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_reshuffles_when_empty() {
        let mut rng = RngState::from_seed(3);
        let mut deck = Deck::new(vec![Card::Kickflip]);
        deck.discard(vec![Card::Hubba, Card::Fakie]);
        let (drawn, reshuffled) = deck.draw_cards(3, &mut rng);
        assert_eq!(drawn.len(), 3);
        assert!(reshuffled);
        assert!(deck.draw.is_empty() && deck.discard.is_empty());
    }

    #[test]
    fn exhausted_deck_yields_fewer_cards() {
        let mut rng = RngState::from_seed(3);
        let mut deck = Deck::new(vec![Card::Bail]);
        let (drawn, reshuffled) = deck.draw_cards(4, &mut rng);
        assert_eq!(drawn, vec![Card::Bail]);
        assert!(!reshuffled);
    }

    #[test]
    fn recipe_fills_to_target() {
        let mut rng = RngState::from_seed(11);
        let mut packs = HashMap::new();
        packs.insert("Flip Pro".to_string(), vec![Card::Kickflip; 3]);
        let recipe = DeckRecipe {
            base: vec![Card::Wax, Card::Bail],
            packs,
            target_size: 20,
        };
        let deck = recipe.build("Flip Pro", &CardCatalog::standard(), &mut rng);
        assert_eq!(deck.len(), 20);
        assert_eq!(deck.count_matching(|card| card == Card::Wax), 1);
        assert!(deck.count_matching(|card| card == Card::Kickflip) >= 3);
        let other = recipe.build("Nobody", &CardCatalog::standard(), &mut rng);
        assert_eq!(other.len(), 20);
    }
}
