use crate::{Card, Category, DiceRoll};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    TurnStarted { setter: usize, drawn: usize },
    CardsDrawn { player: usize, count: usize },
    DiscardReshuffled { player: usize },
    ComboAttempted {
        player: usize,
        combo: Vec<Card>,
        difficulty: u32,
    },
    DiceRolled {
        player: usize,
        roll: DiceRoll,
        target: u32,
    },
    BailPlayed { by: usize },
    ComboLanded {
        player: usize,
        combo: Vec<Card>,
        cost: Option<Card>,
    },
    ComboBailed { player: usize, lost: Vec<Card> },
    SetterPassed { player: usize },
    ProModelPlayed { player: usize },
    AdvantageSpent { player: usize, card: Card },
    RefocusUsed { player: usize },
    LastChance { player: usize },
    TrickMatched { player: usize },
    LetterAssigned {
        player: usize,
        letter: char,
        letters: String,
    },
    TemporaryDiscarded { player: usize, cards: Vec<Card> },
    HandRedrawn { player: usize, returned: usize, drawn: usize },
    TemporaryDrawn { player: usize, cards: Vec<Card> },
    AbilityUsed {
        player: usize,
        discarded: Vec<Card>,
        found: Card,
    },
    CardTraded {
        player: usize,
        given: Card,
        category: Category,
        found: Card,
    },
    GameOver { winner: usize, loser: usize },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        tracing::debug!(?event, "game event");
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
