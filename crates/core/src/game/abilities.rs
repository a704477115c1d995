use super::helpers::{describe, select_cards};
use super::*;
use crate::{Category, Event, EventBus};

impl Game {
    /// Distinct deck cards the setter's activated search can fetch, in catalog order.
    pub fn activated_search_options(&self) -> Vec<Card> {
        let player = self.state.setter_player();
        let category = player.skater.specialty();
        Card::ALL
            .iter()
            .copied()
            .filter(|card| card.is(category) && player.deck.draw.contains(card))
            .collect()
    }

    /// Discards exactly the activation cost from hand to fetch `pick` from the deck.
    /// Ends the setter's turn.
    pub fn use_activated_ability(
        &mut self,
        discard_indices: &[usize],
        pick: Card,
        events: &mut EventBus,
    ) -> Result<Card, GameError> {
        self.expect_phase(Phase::AwaitingSetter)?;
        self.prepare_setter_turn(events)?;
        let setter = self.state.setter;
        let Some(cost) = self.state.players[setter].skater.activation_cost() else {
            return Err(GameError::InsufficientResource(
                "this skater has no activated ability".to_string(),
            ));
        };
        let held = self.state.players[setter].discardable().len();
        if held < cost {
            return Err(GameError::InsufficientResource(format!(
                "the ability costs {cost} cards but you can only discard {held}"
            )));
        }
        let options = self.activated_search_options();
        if options.is_empty() {
            return Err(GameError::InsufficientResource(format!(
                "no {} left in your deck",
                self.state.players[setter].skater.specialty()
            )));
        }
        let discards = select_cards(&self.state.players[setter].hand, discard_indices)?;
        if discards.iter().any(|card| card.is_ollie()) {
            return Err(GameError::InputMalformed(
                "the ollie cannot be discarded".to_string(),
            ));
        }
        if discards.len() != cost {
            return Err(GameError::InputMalformed(format!(
                "select exactly {cost} cards to discard"
            )));
        }
        if !options.contains(&pick) {
            return Err(GameError::InputMalformed(format!(
                "{} is not a search option",
                pick.name()
            )));
        }

        let player = &mut self.state.players[setter];
        let discarded = player.discard(&discards);
        if let Some(found) = player.deck.take(pick) {
            player.hand.push(found);
        }
        player.deck.shuffle(&mut self.rng);
        tracing::info!(
            player = %player.name,
            discarded = %describe(&discarded),
            found = pick.name(),
            "activated ability"
        );
        events.push(Event::AbilityUsed {
            player: setter,
            discarded,
            found: pick,
        });
        self.finish_ability_turn(setter, events);
        Ok(pick)
    }

    /// Each other primary category with the number of matching cards left in the deck.
    pub fn trade_options(&self) -> Vec<(Category, usize)> {
        let player = self.state.setter_player();
        let specialty = player.skater.specialty();
        Category::PRIMARY
            .iter()
            .copied()
            .filter(|category| *category != specialty)
            .map(|category| {
                (
                    category,
                    player.deck.count_matching(|card| card.is(category)),
                )
            })
            .collect()
    }

    /// Gives up one specialty card from hand for a random deck card of `category`.
    /// Ends the setter's turn.
    pub fn use_trade_ability(
        &mut self,
        hand_index: usize,
        category: Category,
        events: &mut EventBus,
    ) -> Result<Card, GameError> {
        self.expect_phase(Phase::AwaitingSetter)?;
        self.prepare_setter_turn(events)?;
        let setter = self.state.setter;
        let specialty = self.state.players[setter].skater.specialty();
        let Some(given) = self.state.players[setter].hand.get(hand_index).copied() else {
            return Err(GameError::InputMalformed(format!(
                "card {} is not in your hand",
                hand_index + 1
            )));
        };
        if !category.is_primary() || category == specialty {
            return Err(GameError::InputMalformed(format!(
                "cannot trade into {category}"
            )));
        }
        if !given.is(specialty) {
            return Err(GameError::InsufficientResource(format!(
                "{} is not one of your {specialty}",
                given.name()
            )));
        }
        let candidates: Vec<Card> = self.state.players[setter]
            .deck
            .draw
            .iter()
            .copied()
            .filter(|card| card.is(category))
            .collect();
        let Some(found) = self.rng.choose(&candidates).copied() else {
            return Err(GameError::InsufficientResource(format!(
                "no {category} left in your deck"
            )));
        };

        let player = &mut self.state.players[setter];
        player.discard(&[given]);
        if let Some(card) = player.deck.take(found) {
            player.hand.push(card);
        }
        player.deck.shuffle(&mut self.rng);
        tracing::info!(
            player = %player.name,
            given = given.name(),
            found = found.name(),
            "card traded"
        );
        events.push(Event::CardTraded {
            player: setter,
            given,
            category,
            found,
        });
        self.finish_ability_turn(setter, events);
        Ok(found)
    }

    fn finish_ability_turn(&mut self, setter: usize, events: &mut EventBus) {
        self.state.last_turn_summary =
            format!("{} used their ability.", self.state.players[setter].name);
        self.state.pending = None;
        self.state.switch_setter();
        self.end_turn(setter, events);
    }
}
