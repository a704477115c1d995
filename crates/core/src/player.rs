use crate::{Card, Deck, RngState, Skater};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Controller {
    Human,
    Ai,
}

/// A player's prefix of the elimination word. Only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LetterProgress {
    word: String,
    earned: usize,
}

impl LetterProgress {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_string(),
            earned: 0,
        }
    }

    pub fn earned(&self) -> usize {
        self.earned
    }

    pub fn word_len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn as_str(&self) -> &str {
        let end = self
            .word
            .char_indices()
            .nth(self.earned)
            .map(|(idx, _)| idx)
            .unwrap_or(self.word.len());
        &self.word[..end]
    }

    pub fn is_complete(&self) -> bool {
        self.earned >= self.word_len()
    }

    /// One letter away from elimination.
    pub fn on_last_letter(&self) -> bool {
        self.earned + 1 == self.word_len()
    }

    /// Adds the next letter and returns it; `None` once the word is complete.
    pub fn add_letter(&mut self) -> Option<char> {
        let next = self.word.chars().nth(self.earned)?;
        self.earned += 1;
        Some(next)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub controller: Controller,
    pub skater: Skater,
    /// Ordered: play order and menu numbering both come from it.
    pub hand: Vec<Card>,
    pub deck: Deck,
    pub letters: LetterProgress,
    /// Cards that must be played this turn or are lost.
    pub temporary: Vec<Card>,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        controller: Controller,
        skater: Skater,
        deck: Deck,
        word: &str,
    ) -> Self {
        Self {
            name: name.into(),
            controller,
            skater,
            hand: vec![Card::Ollie],
            deck,
            letters: LetterProgress::new(word),
            temporary: Vec::new(),
        }
    }

    pub fn is_ai(&self) -> bool {
        self.controller == Controller::Ai
    }

    pub fn draw(&mut self, count: usize, rng: &mut RngState) -> (Vec<Card>, bool) {
        let (drawn, reshuffled) = self.deck.draw_cards(count, rng);
        self.hand.extend(drawn.iter().copied());
        (drawn, reshuffled)
    }

    /// Moves the listed cards from hand to the discard pile. The ollie is never
    /// discarded and cards not in hand are skipped. Returns what actually moved.
    pub fn discard(&mut self, cards: &[Card]) -> Vec<Card> {
        let mut moved = Vec::new();
        for card in cards.iter().copied().filter(|card| !card.is_ollie()) {
            let Some(index) = self.hand.iter().position(|held| *held == card) else {
                continue;
            };
            self.hand.remove(index);
            if let Some(temp) = self.temporary.iter().position(|held| *held == card) {
                self.temporary.remove(temp);
            }
            moved.push(card);
        }
        self.deck.discard(moved.clone());
        moved
    }

    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    pub fn count_in_hand(&self, card: Card) -> usize {
        self.hand.iter().filter(|held| **held == card).count()
    }

    /// True when the hand covers the full multiset of `required`.
    pub fn holds_all(&self, required: &[Card]) -> bool {
        required.iter().all(|card| {
            self.count_in_hand(*card) >= required.iter().filter(|other| *other == card).count()
        })
    }

    pub fn discardable(&self) -> Vec<Card> {
        self.hand
            .iter()
            .copied()
            .filter(|card| !card.is_ollie())
            .collect()
    }

    pub fn card_total(&self) -> usize {
        self.hand.len() + self.deck.draw.len() + self.deck.discard.len()
    }
}
