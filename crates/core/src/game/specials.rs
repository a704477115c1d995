use super::*;
use crate::{Event, EventBus};

impl Game {
    /// Plays a lone turn-action special. The setter keeps the role and still sets a
    /// combo (or passes) afterwards.
    pub(super) fn play_turn_action(&mut self, card: Card, events: &mut EventBus) -> SetterOutcome {
        match card {
            Card::ThrasherMagazine => self.redraw_hand(events),
            _ => self.draw_temporary(events),
        }
    }

    /// Thrasher magazine: the card itself is discarded, the rest of the hand (bar the
    /// ollie) goes back into the deck, and the setter draws a fresh set.
    fn redraw_hand(&mut self, events: &mut EventBus) -> SetterOutcome {
        let setter = self.state.setter;
        let count = self.rules.redraw_count;
        let player = &mut self.state.players[setter];
        player.discard(&[Card::ThrasherMagazine]);
        let returned: Vec<Card> = player
            .hand
            .iter()
            .copied()
            .filter(|card| !card.is_ollie())
            .collect();
        player.hand.retain(|card| card.is_ollie());
        player.temporary.clear();
        player.deck.draw.extend(returned.iter().copied());
        player.deck.shuffle(&mut self.rng);

        let drawn = self.draw_for(setter, count, events);
        events.push(Event::HandRedrawn {
            player: setter,
            returned: returned.len(),
            drawn: drawn.len(),
        });
        tracing::info!(
            player = %self.state.players[setter].name,
            returned = returned.len(),
            drawn = drawn.len(),
            "hand redrawn"
        );
        SetterOutcome::Redrew {
            returned: returned.len(),
            drawn,
        }
    }

    /// Sponsors: the card is discarded and the setter draws cards that are lost at the
    /// end of the turn unless played.
    fn draw_temporary(&mut self, events: &mut EventBus) -> SetterOutcome {
        let setter = self.state.setter;
        self.state.players[setter].discard(&[Card::Sponsors]);
        let drawn = self.draw_for(setter, self.rules.temporary_draw_count, events);
        self.state.players[setter]
            .temporary
            .extend(drawn.iter().copied());
        events.push(Event::TemporaryDrawn {
            player: setter,
            cards: drawn.clone(),
        });
        SetterOutcome::DrewTemporary(drawn)
    }
}
