use super::helpers::select_cards;
use super::*;
use crate::{
    combo_display_name, validate_combo, ChoiceKind, ChoiceRequest, ComboAttempt, Decider, Event,
    EventBus,
};

impl Game {
    /// Resolves the setter's selection: a trick combo to roll for, or a lone turn-action
    /// special card. Rejected selections leave the game untouched, including the opening
    /// draw of an unprepared turn; indices refer to the hand as it is now and stay valid
    /// because the draw only appends.
    pub fn setter_attempt(
        &mut self,
        indices: &[usize],
        decider: &mut dyn Decider,
        events: &mut EventBus,
    ) -> Result<SetterOutcome, GameError> {
        self.expect_phase(Phase::AwaitingSetter)?;
        let setter = self.state.setter;
        let combo = select_cards(&self.state.players[setter].hand, indices)?;

        if let Some(action) = combo.iter().copied().find(|card| card.is_turn_action()) {
            if combo.len() > 1 {
                return Err(GameError::InputMalformed(format!(
                    "{} must be played by itself",
                    action.name()
                )));
            }
            self.prepare_setter_turn(events)?;
            return Ok(self.play_turn_action(action, events));
        }

        validate_combo(&combo)?;
        self.prepare_setter_turn(events)?;
        let ignore_negative = combo.contains(&Card::ProModelDeck);
        let score =
            self.scorer()
                .score(&combo, &self.state.players[setter].skater, ignore_negative);
        Ok(self.roll_set(combo, score, decider, events))
    }

    /// Ends the setter's turn without rolling. Nothing is discarded.
    pub fn pass_turn(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.expect_phase(Phase::AwaitingSetter)?;
        let setter = self.state.setter;
        events.push(Event::SetterPassed { player: setter });
        self.state.last_turn_summary = format!("{} passed.", self.state.players[setter].name);
        self.state.pending = None;
        self.state.switch_setter();
        self.end_turn(setter, events);
        Ok(())
    }

    fn roll_set(
        &mut self,
        combo: Vec<Card>,
        score: ScoreBreakdown,
        decider: &mut dyn Decider,
        events: &mut EventBus,
    ) -> SetterOutcome {
        let setter = self.state.setter;
        let opponent = self.state.matcher();
        let target = score.difficulty;
        events.push(Event::ComboAttempted {
            player: setter,
            combo: combo.clone(),
            difficulty: target,
        });
        decider.before_roll(&self.state, setter, &score);

        let mut rolls = vec![self.roll(false)];
        events.push(Event::DiceRolled {
            player: setter,
            roll: rolls[0].clone(),
            target,
        });

        let mut bail_played = false;
        if rolls[0].total >= target && self.state.players[opponent].holds(Card::Bail) {
            let request = ChoiceRequest {
                player: opponent,
                kind: ChoiceKind::Bail,
                difficulty: target,
                roll: Some(rolls[0].total),
            };
            if decider.decide(&self.state, &request) {
                self.state.players[opponent].discard(&[Card::Bail]);
                events.push(Event::BailPlayed { by: opponent });
                bail_played = true;
                let reroll = self.roll(false);
                events.push(Event::DiceRolled {
                    player: setter,
                    roll: reroll.clone(),
                    target,
                });
                rolls.push(reroll);
            }
        }

        let mut report = SetterRoll {
            combo,
            score,
            rolls,
            bail_played,
            cost: None,
        };
        let name = self.state.players[setter].name.clone();
        let trick = combo_display_name(&report.combo);

        if report.final_total() >= target {
            let mut discards: Vec<Card> = report
                .combo
                .iter()
                .copied()
                .filter(|card| card.is_special())
                .collect();
            let payable: Vec<Card> = report
                .combo
                .iter()
                .copied()
                .filter(|card| (card.is_trick() || card.is_stance()) && !card.is_ollie())
                .collect();
            report.cost = self.rng.choose(&payable).copied();
            discards.extend(report.cost);
            self.state.players[setter].discard(&discards);
            events.push(Event::ComboLanded {
                player: setter,
                combo: report.combo.clone(),
                cost: report.cost,
            });
            tracing::info!(setter = %name, trick = %trick, difficulty = target, "set landed");
            self.state.last_turn_summary = format!("{name} landed a {trick}.");
            self.state.pending = Some(ComboAttempt {
                setter,
                combo: report.combo.clone(),
                score: report.score.clone(),
            });
            self.state.phase = Phase::AwaitingMatcher;
            self.end_turn(setter, events);
            SetterOutcome::Landed(report)
        } else {
            let lost = self.state.players[setter].discard(&report.combo);
            events.push(Event::ComboBailed {
                player: setter,
                lost,
            });
            tracing::info!(setter = %name, trick = %trick, difficulty = target, "set bailed");
            self.state.last_turn_summary = format!("{name} bailed their set.");
            self.state.pending = None;
            self.state.switch_setter();
            self.end_turn(setter, events);
            SetterOutcome::Bailed(report)
        }
    }
}
