use super::*;
use crate::{Event, EventBus, Player, Scorer};

impl Game {
    /// Sets up a game: both players start from `[ollie]` and draw alternately up to the
    /// hand size. The first player sets first.
    pub fn new(
        rules: RulesConfig,
        catalog: Arc<CardCatalog>,
        players: [Player; 2],
        seed: u64,
    ) -> Self {
        let mut rng = RngState::from_seed(seed);
        let mut state = GameState::new(players);
        for _ in 1..rules.hand_size {
            for player in state.players.iter_mut() {
                player.draw(1, &mut rng);
            }
        }
        Self {
            rules,
            catalog,
            rng,
            state,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == Phase::Terminal
    }

    pub fn winner(&self) -> Option<usize> {
        self.state.winner()
    }

    pub fn loser(&self) -> Option<usize> {
        self.state.eliminated()
    }

    pub fn scorer(&self) -> Scorer<'_> {
        Scorer::new(&self.catalog, &self.rules)
    }

    /// Tops the setter's hand up to the hand size. Runs once per setter turn; later
    /// calls in the same turn do nothing.
    pub fn prepare_setter_turn(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_phase(Phase::AwaitingSetter)?;
        if self.state.turn_prepared {
            return Ok(());
        }
        self.state.turn_prepared = true;
        let setter = self.state.setter;
        let needed = self
            .rules
            .hand_size
            .saturating_sub(self.state.players[setter].hand.len());
        let drawn = self.draw_for(setter, needed, events);
        events.push(Event::TurnStarted {
            setter,
            drawn: drawn.len(),
        });
        Ok(())
    }

    pub(super) fn expect_phase(&self, phase: Phase) -> Result<(), GameError> {
        if self.state.phase == Phase::Terminal {
            return Err(GameError::GameOver);
        }
        if self.state.phase != phase {
            return Err(GameError::InvalidPhase(self.state.phase));
        }
        Ok(())
    }

    pub(super) fn draw_for(
        &mut self,
        player: usize,
        count: usize,
        events: &mut EventBus,
    ) -> Vec<Card> {
        if count == 0 {
            return Vec::new();
        }
        let (drawn, reshuffled) = self.state.players[player].draw(count, &mut self.rng);
        if reshuffled {
            events.push(Event::DiscardReshuffled { player });
        }
        if !drawn.is_empty() {
            events.push(Event::CardsDrawn {
                player,
                count: drawn.len(),
            });
        }
        drawn
    }

    pub(super) fn roll(&mut self, advantage: bool) -> DiceRoll {
        self.rng
            .roll(self.rules.dice_count, self.rules.dice_sides, advantage)
    }

    /// Closes `player`'s turn: unplayed temporary cards are lost.
    pub(super) fn end_turn(&mut self, player: usize, events: &mut EventBus) {
        let holder = &mut self.state.players[player];
        let unused: Vec<Card> = holder
            .temporary
            .iter()
            .copied()
            .filter(|card| holder.hand.contains(card))
            .collect();
        if !unused.is_empty() {
            let lost = holder.discard(&unused);
            events.push(Event::TemporaryDiscarded {
                player,
                cards: lost,
            });
        }
        holder.temporary.clear();
        self.state.turn_prepared = false;
        self.state.turns += 1;
    }
}
