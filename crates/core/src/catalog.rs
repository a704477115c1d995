use crate::{Card, Category, CategorySet, TrickTable};
use std::collections::HashMap;

/// Immutable card registry shared by the validator, the scorer and the AI.
///
/// Flip tricks are stored one point easier than printed (never below one) because the
/// late-trick bonus already charges them a second time. The adjustment happens here,
/// once, while the table is built.
#[derive(Debug, Clone)]
pub struct CardCatalog {
    base: HashMap<Card, u32>,
    stance_bonus: HashMap<Card, u32>,
    members: HashMap<Category, Vec<Card>>,
}

impl CardCatalog {
    pub fn standard() -> Self {
        Self::from_table(&TrickTable::default())
    }

    pub fn from_table(table: &TrickTable) -> Self {
        let mut base = HashMap::new();
        for rule in &table.tricks {
            if !rule.card.is_trick() {
                continue;
            }
            let value = if rule.card.is(Category::Flip) {
                rule.base.saturating_sub(1).max(1)
            } else {
                rule.base
            };
            base.insert(rule.card, value);
        }
        let mut stance_bonus = HashMap::new();
        for rule in &table.stances {
            if rule.card.is_stance() {
                stance_bonus.insert(rule.card, rule.bonus);
            }
        }
        let mut members: HashMap<Category, Vec<Card>> = HashMap::new();
        for card in Card::ALL {
            for category in card.categories().iter() {
                members.entry(category).or_default().push(card);
            }
        }
        Self {
            base,
            stance_bonus,
            members,
        }
    }

    /// Playable difficulty of a trick card; `None` for stances, specials and tricks
    /// missing from the table.
    pub fn base_difficulty(&self, card: Card) -> Option<u32> {
        self.base.get(&card).copied()
    }

    pub fn stance_bonus(&self, card: Card) -> Option<u32> {
        self.stance_bonus.get(&card).copied()
    }

    pub fn categories_of(&self, card: Card) -> CategorySet {
        card.categories()
    }

    pub fn is_stance(&self, card: Card) -> bool {
        card.is_stance()
    }

    pub fn is_special(&self, card: Card) -> bool {
        card.is_special()
    }

    pub fn is_trick(&self, card: Card) -> bool {
        self.base.contains_key(&card)
    }

    pub fn members(&self, category: Category) -> &[Card] {
        self.members
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every card a themed deck may be topped up with: tricks and stances. The ollie
    /// only ever exists as the permanent hand card.
    pub fn fill_pool(&self) -> Vec<Card> {
        Card::ALL
            .into_iter()
            .filter(|card| !card.is_ollie())
            .filter(|card| self.is_trick(*card) || self.stance_bonus.contains_key(card))
            .collect()
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrickRule;

    #[test]
    fn flips_are_stored_one_easier() {
        let catalog = CardCatalog::standard();
        assert_eq!(catalog.base_difficulty(Card::Kickflip), Some(2));
        assert_eq!(catalog.base_difficulty(Card::Treflip), Some(4));
        assert_eq!(catalog.base_difficulty(Card::Ollie), Some(2));
        assert_eq!(catalog.base_difficulty(Card::PopShuvit), Some(2));
    }

    #[test]
    fn flip_adjustment_floors_at_one() {
        let table = TrickTable {
            tricks: vec![TrickRule {
                card: Card::Kickflip,
                base: 1,
            }],
            stances: Vec::new(),
        };
        let catalog = CardCatalog::from_table(&table);
        assert_eq!(catalog.base_difficulty(Card::Kickflip), Some(1));
    }

    #[test]
    fn lookups_are_stable_across_calls() {
        let catalog = CardCatalog::standard();
        let first = catalog.base_difficulty(Card::Hardflip);
        let second = catalog.base_difficulty(Card::Hardflip);
        assert_eq!(first, Some(4));
        assert_eq!(first, second);
    }

    #[test]
    fn non_tricks_have_no_base() {
        let catalog = CardCatalog::standard();
        assert_eq!(catalog.base_difficulty(Card::Wax), None);
        assert_eq!(catalog.base_difficulty(Card::Fakie), None);
        assert_eq!(catalog.stance_bonus(Card::Nollie), Some(3));
        assert!(catalog.is_special(Card::Bail));
        assert!(catalog.is_stance(Card::Switch));
    }

    #[test]
    fn members_follow_categories() {
        let catalog = CardCatalog::standard();
        assert_eq!(catalog.members(Category::Stairs), &[Card::ThreeStair, Card::FiveStair]);
        assert_eq!(catalog.members(Category::Shuvit).len(), 4);
        assert!(catalog.members(Category::CoreTrick).contains(&Card::Ollie));
        assert_eq!(catalog.fill_pool().len(), 38);
        assert!(!catalog.fill_pool().contains(&Card::Ollie));
    }
}
