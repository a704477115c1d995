use crate::{
    choose_combo_or_pass, choose_setter_action, AiAction, AiConfig, AiDecider, AutoplayError,
    GameRecord, GameStatus, SeatRecord, SimulationSummary, TurnRecord,
};
use sk8_core::{
    CardCatalog, Controller, Decider, DeckRecipe, EventBus, Game, Phase, Player, RngState,
    RulesConfig, SetterOutcome, Skater,
};
use std::sync::Arc;

/// Everything needed to deal a fresh game between two skaters.
#[derive(Debug, Clone)]
pub struct GameSetup {
    pub rules: RulesConfig,
    pub catalog: Arc<CardCatalog>,
    pub decks: DeckRecipe,
    pub names: [String; 2],
    pub skaters: [Skater; 2],
}

impl GameSetup {
    /// Builds both themed decks and deals the opening hands. The same seed always
    /// produces the same game.
    pub fn new_game(&self, controllers: [Controller; 2], seed: u64) -> Game {
        let mut rng = RngState::from_seed(seed);
        let players = [0, 1].map(|seat| {
            let deck = self
                .decks
                .build(&self.skaters[seat].name, &self.catalog, &mut rng);
            Player::new(
                self.names[seat].clone(),
                controllers[seat],
                self.skaters[seat].clone(),
                deck,
                &self.rules.elimination_word,
            )
        });
        Game::new(
            self.rules.clone(),
            Arc::clone(&self.catalog),
            players,
            rng.next_u64(),
        )
    }
}

/// One step of an automated setter turn and what came of it. A pass has no outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetterStep {
    pub action: AiAction,
    pub outcome: Option<SetterOutcome>,
}

/// Plays the automated setter's whole turn: up to `max_turn_actions` lone specials,
/// then a combo or a pass. Choices the engine asks for go to `decider`.
pub fn play_ai_setter(
    game: &mut Game,
    config: &AiConfig,
    decider: &mut dyn Decider,
    events: &mut EventBus,
) -> Result<Vec<SetterStep>, AutoplayError> {
    game.prepare_setter_turn(events)?;
    let mut steps = Vec::new();
    let mut turn_actions = 0;
    loop {
        let action = if turn_actions < config.max_turn_actions {
            choose_setter_action(game, config)
        } else {
            choose_combo_or_pass(game, config)
        };
        let outcome = match &action {
            AiAction::Play { index, .. } => {
                turn_actions += 1;
                Some(game.setter_attempt(&[*index], decider, events)?)
            }
            AiAction::Set { indices } => Some(game.setter_attempt(indices, decider, events)?),
            AiAction::Pass | AiAction::Match => {
                game.pass_turn(events)?;
                None
            }
        };
        let turn_goes_on = matches!(action, AiAction::Play { .. });
        steps.push(SetterStep { action, outcome });
        if !turn_goes_on {
            return Ok(steps);
        }
    }
}

/// Plays one automated turn: a setter combo or pass, or a matcher attempt.
pub fn play_ai_turn(
    game: &mut Game,
    decider: &mut AiDecider,
    events: &mut EventBus,
) -> Result<TurnRecord, AutoplayError> {
    let turn = game.state.turns;
    let mut record = match game.phase() {
        Phase::AwaitingSetter => {
            let actor = game.state.setter;
            let config = decider.config.clone();
            let steps = play_ai_setter(game, &config, decider, events)?;
            let mut record = TurnRecord {
                turn,
                actor,
                action: AiAction::Pass,
                turn_actions: Vec::new(),
                combo: Vec::new(),
                difficulty: None,
                rolls: Vec::new(),
                landed: None,
                summary: String::new(),
                letters_after: Default::default(),
                event_count: 0,
            };
            for step in steps {
                match step.outcome {
                    Some(SetterOutcome::Landed(roll)) | Some(SetterOutcome::Bailed(roll)) => {
                        record.landed = Some(roll.final_total() >= roll.score.difficulty);
                        record.difficulty = Some(roll.score.difficulty);
                        record.rolls = roll.rolls.iter().map(|dice| dice.total).collect();
                        record.combo = roll.combo;
                    }
                    Some(SetterOutcome::Redrew { .. }) | Some(SetterOutcome::DrewTemporary(_)) => {
                        if let AiAction::Play { card, .. } = step.action {
                            record.turn_actions.push(card);
                        }
                        continue;
                    }
                    None => {}
                }
                record.action = step.action;
            }
            record
        }
        Phase::AwaitingMatcher => {
            let actor = game.state.matcher();
            let report = game.matcher_attempt(decider, events)?;
            TurnRecord {
                turn,
                actor,
                action: AiAction::Match,
                turn_actions: Vec::new(),
                difficulty: Some(report.score.difficulty),
                rolls: report.rolls.iter().map(|dice| dice.total).collect(),
                landed: Some(report.landed),
                combo: report.combo,
                summary: String::new(),
                letters_after: Default::default(),
                event_count: 0,
            }
        }
        Phase::Terminal => return Err(AutoplayError::Game(sk8_core::GameError::GameOver)),
    };
    record.summary = game.state.last_turn_summary.clone();
    record.letters_after = [0, 1].map(|seat| game.state.players[seat].letters.as_str().to_string());
    record.event_count = events.drain().count();
    Ok(record)
}

/// Plays two automated players against each other until someone spells the word or
/// `max_turns` turns have been played.
pub fn simulate_game(
    setup: &GameSetup,
    config: &AiConfig,
    seed: u64,
    max_turns: u32,
) -> Result<GameRecord, AutoplayError> {
    let mut game = setup.new_game([Controller::Ai, Controller::Ai], seed);
    let mut decider = AiDecider::new(config.clone());
    let mut events = EventBus::default();
    let mut steps = Vec::new();
    while !game.is_over() && game.state.turns < max_turns {
        steps.push(play_ai_turn(&mut game, &mut decider, &mut events)?);
    }
    let status = if game.is_over() {
        GameStatus::Finished
    } else {
        GameStatus::TurnLimit
    };
    let seats = [0, 1].map(|seat| {
        let player = &game.state.players[seat];
        SeatRecord {
            name: player.name.clone(),
            skater: player.skater.name.clone(),
            letters: player.letters.as_str().to_string(),
        }
    });
    tracing::debug!(seed, turns = game.state.turns, winner = ?game.winner(), "simulated game");
    Ok(GameRecord {
        seed,
        status,
        winner: game.winner(),
        turns: game.state.turns,
        seats,
        steps,
    })
}

/// Runs `games` simulations on consecutive seeds starting at `seed`.
pub fn simulate_many(
    setup: &GameSetup,
    config: &AiConfig,
    seed: u64,
    games: u32,
    max_turns: u32,
) -> Result<SimulationSummary, AutoplayError> {
    if games == 0 {
        return Err(AutoplayError::Setup("games must be at least 1".to_string()));
    }
    let mut summary = SimulationSummary::default();
    for offset in 0..games {
        let record = simulate_game(setup, config, seed.wrapping_add(offset as u64), max_turns)?;
        summary.record(&record);
    }
    tracing::info!(
        games = summary.games,
        finished = summary.finished,
        "simulation batch complete"
    );
    Ok(summary)
}
