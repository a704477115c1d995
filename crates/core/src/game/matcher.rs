use super::*;
use crate::{ChoiceKind, ChoiceRequest, Decider, Event, EventBus};

impl Game {
    /// Resolves the matcher's attempt at the pending combo, offering the optional
    /// special cards through `decider` along the way.
    pub fn matcher_attempt(
        &mut self,
        decider: &mut dyn Decider,
        events: &mut EventBus,
    ) -> Result<MatchReport, GameError> {
        self.expect_phase(Phase::AwaitingMatcher)?;
        let Some(pending) = self.state.pending.clone() else {
            return Err(GameError::InvalidPhase(self.state.phase));
        };
        let matcher = self.state.matcher();

        let pro_model = self.state.players[matcher].holds(Card::ProModelDeck)
            && self.offer(
                decider,
                matcher,
                ChoiceKind::ProModelDeck,
                pending.score.difficulty,
                None,
            );
        if pro_model {
            self.state.players[matcher].discard(&[Card::ProModelDeck]);
            events.push(Event::ProModelPlayed { player: matcher });
        }

        let mut score = self.scorer().score(
            &pending.combo,
            &self.state.players[matcher].skater,
            pro_model,
        );
        let required = pending.required_cards();
        let defender_penalty = !self.state.players[matcher].holds_all(&required);
        if defender_penalty {
            score.add_surcharge("Defender Penalty", self.rules.defender_penalty);
        }
        let target = score.difficulty;

        let mut advantage = None;
        if defender_penalty {
            let spendable = self.state.players[matcher]
                .hand
                .iter()
                .copied()
                .find(|card| !card.is_ollie() && required.contains(card));
            if let Some(card) = spendable {
                if self.offer(decider, matcher, ChoiceKind::Advantage, target, None) {
                    self.state.players[matcher].discard(&[card]);
                    events.push(Event::AdvantageSpent {
                        player: matcher,
                        card,
                    });
                    advantage = Some(card);
                }
            }
        }

        decider.before_roll(&self.state, matcher, &score);
        let mut rolls = vec![self.matcher_roll(matcher, advantage.is_some(), target, events)];

        let mut refocused = false;
        if rolls[0].total < target && self.state.players[matcher].holds(Card::Focus) {
            let missed = Some(rolls[0].total);
            if self.offer(decider, matcher, ChoiceKind::Refocus, target, missed) {
                self.state.players[matcher].discard(&[Card::Focus]);
                events.push(Event::RefocusUsed { player: matcher });
                refocused = true;
                rolls.push(self.matcher_roll(matcher, advantage.is_some(), target, events));
            }
        }

        let mut last_chance = false;
        let missed = rolls.last().map(|roll| roll.total < target).unwrap_or(true);
        if missed && self.state.players[matcher].letters.on_last_letter() {
            events.push(Event::LastChance { player: matcher });
            last_chance = true;
            rolls.push(self.matcher_roll(matcher, advantage.is_some(), target, events));
        }

        let mut report = MatchReport {
            combo: pending.combo,
            score,
            defender_penalty,
            pro_model,
            advantage,
            rolls,
            refocused,
            last_chance,
            landed: false,
            letter: None,
        };
        report.landed = report.final_total() >= target;
        let name = self.state.players[matcher].name.clone();

        if report.landed {
            events.push(Event::TrickMatched { player: matcher });
            tracing::info!(matcher = %name, difficulty = target, "trick matched");
            self.state.last_turn_summary = format!("{name} matched the trick.");
            self.state.switch_setter();
            self.state.phase = Phase::AwaitingSetter;
        } else {
            let player = &mut self.state.players[matcher];
            report.letter = player.letters.add_letter();
            if let Some(letter) = report.letter {
                events.push(Event::LetterAssigned {
                    player: matcher,
                    letter,
                    letters: player.letters.as_str().to_string(),
                });
            }
            tracing::info!(
                matcher = %name,
                letters = %player.letters.as_str(),
                difficulty = target,
                "match missed"
            );
            self.state.last_turn_summary = format!("{name} bailed and got a letter.");
            if player.letters.is_complete() {
                let winner = pending.setter;
                self.state.phase = Phase::Terminal;
                events.push(Event::GameOver {
                    winner,
                    loser: matcher,
                });
                tracing::info!(
                    winner = %self.state.players[winner].name,
                    loser = %name,
                    "game over"
                );
            } else {
                self.state.phase = Phase::AwaitingSetter;
            }
        }

        self.state.pending = None;
        self.end_turn(matcher, events);
        Ok(report)
    }

    fn offer(
        &self,
        decider: &mut dyn Decider,
        player: usize,
        kind: ChoiceKind,
        difficulty: u32,
        roll: Option<u32>,
    ) -> bool {
        let request = ChoiceRequest {
            player,
            kind,
            difficulty,
            roll,
        };
        decider.decide(&self.state, &request)
    }

    fn matcher_roll(
        &mut self,
        matcher: usize,
        advantage: bool,
        target: u32,
        events: &mut EventBus,
    ) -> DiceRoll {
        let roll = self.roll(advantage);
        events.push(Event::DiceRolled {
            player: matcher,
            roll: roll.clone(),
            target,
        });
        roll
    }
}
