use sk8_autoplay::{
    best_combo, choose_setter_action, play_ai_turn, read_trace, simulate_game, simulate_many,
    write_trace, AiAction, AiConfig, AiDecider, GameSetup, GameStatus,
};
use sk8_core::{Card, CardCatalog, Controller, EventBus, Game, RulesConfig, Scorer, Skater};
use sk8_data::builtin_game_data;

fn setup(first: usize, second: usize) -> GameSetup {
    let data = builtin_game_data().expect("builtin data");
    GameSetup {
        catalog: data.catalog(),
        rules: data.rules.clone(),
        decks: data.decks.clone(),
        names: ["CPU 1".to_string(), "CPU 2".to_string()],
        skaters: [data.skaters[first].clone(), data.skaters[second].clone()],
    }
}

fn ai_game(hand: &[Card]) -> Game {
    let mut game = setup(0, 1).new_game([Controller::Ai, Controller::Ai], 11);
    game.state.players[0].hand = hand.to_vec();
    game.state.turn_prepared = true;
    game
}

macro_rules! search_case {
    ($name:ident, $skater:expr, [$($card:expr),*], $ceiling:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let catalog = CardCatalog::standard();
            let rules = RulesConfig::default();
            let scorer = Scorer::new(&catalog, &rules);
            let skater = &Skater::roster()[$skater];
            let config = AiConfig {
                difficulty_ceiling: $ceiling,
                ..AiConfig::default()
            };
            let picked = best_combo(&[$($card),*], skater, &scorer, &config)
                .map(|candidate| candidate.indices);
            assert_eq!(picked, $expected);
        }
    };
}

search_case!(search_passes_on_ollie_only, 0, [Card::Ollie], 14, None);
search_case!(
    search_skips_turn_actions,
    0,
    [Card::Ollie, Card::ThrasherMagazine, Card::Sponsors, Card::Wax],
    14,
    None
);
search_case!(
    search_prefers_the_richer_combo,
    0,
    [Card::Ollie, Card::Kickflip, Card::Bs180],
    14,
    Some(vec![1, 2])
);
search_case!(
    search_respects_the_ceiling,
    0,
    [Card::Ollie, Card::Kickflip, Card::Bs180],
    3,
    Some(vec![1])
);
search_case!(
    search_keeps_hand_order_for_stances,
    1,
    [Card::Ollie, Card::Fakie, Card::FiftyFifty],
    14,
    Some(vec![1, 2])
);

#[test]
fn same_seed_replays_the_same_game() {
    let setup = setup(0, 1);
    let config = AiConfig::default();
    let first = simulate_game(&setup, &config, 42, 300).expect("simulate");
    let second = simulate_game(&setup, &config, 42, 300).expect("simulate");
    assert_eq!(
        serde_json::to_string(&first).expect("encode"),
        serde_json::to_string(&second).expect("encode")
    );
}

#[test]
fn every_step_is_one_turn() {
    let setup = setup(2, 0);
    for seed in 0..5 {
        let record = simulate_game(&setup, &AiConfig::default(), seed, 300).expect("simulate");
        assert_eq!(record.steps.len() as u32, record.turns);
        assert!(record.turns <= 300);
        match record.status {
            GameStatus::Finished => {
                let winner = record.winner.expect("finished games have a winner");
                assert_eq!(record.seats[1 - winner].letters, "SK8");
                assert_ne!(record.seats[winner].letters, "SK8");
            }
            GameStatus::TurnLimit => assert_eq!(record.winner, None),
        }
    }
}

#[test]
fn zero_turn_budget_stops_immediately() {
    let record = simulate_game(&setup(0, 0), &AiConfig::default(), 1, 0).expect("simulate");
    assert_eq!(record.status, GameStatus::TurnLimit);
    assert!(record.steps.is_empty());
}

#[test]
fn batch_summary_counts_every_game() {
    let summary = simulate_many(&setup(0, 2), &AiConfig::default(), 7, 6, 300).expect("batch");
    assert_eq!(summary.games, 6);
    assert_eq!(summary.finished + summary.turn_limited, 6);
    assert_eq!(summary.wins.values().sum::<u32>(), summary.finished);
    assert!(summary.to_text_report().starts_with("games 6"));
}

#[test]
fn empty_batch_is_rejected() {
    assert!(simulate_many(&setup(0, 1), &AiConfig::default(), 7, 0, 300).is_err());
}

#[test]
fn trace_survives_a_file_round_trip() {
    let record = simulate_game(&setup(1, 2), &AiConfig::default(), 3, 200).expect("simulate");
    let path = std::env::temp_dir()
        .join(format!("sk8-trace-{}", std::process::id()))
        .join("game.json");
    write_trace(&path, &record).expect("write");
    let loaded = read_trace(&path).expect("read");
    assert_eq!(loaded.turns, record.turns);
    assert_eq!(loaded.steps.len(), record.steps.len());
    assert_eq!(loaded.seats, record.seats);
}

macro_rules! setter_case {
    ($name:ident, [$($card:expr),*], $expected:expr) => {
        #[test]
        fn $name() {
            let game = ai_game(&[$($card),*]);
            assert_eq!(choose_setter_action(&game, &AiConfig::default()), $expected);
        }
    };
}

setter_case!(
    setter_plays_sponsors_first,
    [Card::Ollie, Card::Kickflip, Card::Sponsors],
    AiAction::Play {
        index: 2,
        card: Card::Sponsors
    }
);
setter_case!(
    setter_redraws_when_nothing_sets,
    [Card::Ollie, Card::ThrasherMagazine, Card::Wax],
    AiAction::Play {
        index: 1,
        card: Card::ThrasherMagazine
    }
);
setter_case!(
    setter_keeps_thrasher_while_a_combo_exists,
    [Card::Ollie, Card::ThrasherMagazine, Card::Kickflip],
    AiAction::Set { indices: vec![2] }
);
setter_case!(setter_passes_with_nothing, [Card::Ollie, Card::Wax], AiAction::Pass);

#[test]
fn ai_turn_plays_turn_actions_then_finishes() {
    let mut game = ai_game(&[Card::Ollie, Card::Sponsors, Card::Wax]);
    let mut decider = AiDecider::default();
    let mut events = EventBus::default();
    let record = play_ai_turn(&mut game, &mut decider, &mut events).expect("turn");
    assert_eq!(record.actor, 0);
    assert_eq!(record.turn_actions.first(), Some(&Card::Sponsors));
    assert!(record.turn_actions.len() <= decider.config.max_turn_actions);
    assert!(!matches!(record.action, AiAction::Play { .. }));
    assert!(game.state.players[0].temporary.is_empty());
    assert_eq!(game.state.turns, 1);
}

#[test]
fn turn_action_cap_of_zero_holds_the_specials() {
    let mut game = ai_game(&[Card::Ollie, Card::Sponsors, Card::Wax]);
    let mut decider = AiDecider::new(AiConfig {
        max_turn_actions: 0,
        ..AiConfig::default()
    });
    let mut events = EventBus::default();
    let record = play_ai_turn(&mut game, &mut decider, &mut events).expect("turn");
    assert!(record.turn_actions.is_empty());
    assert_eq!(record.action, AiAction::Pass);
    assert!(game.state.players[0].holds(Card::Sponsors));
}

#[test]
fn simulated_setters_use_their_specials() {
    let setup = setup(0, 1);
    let played: usize = (0..10)
        .map(|seed| {
            simulate_game(&setup, &AiConfig::default(), seed, 200)
                .expect("simulate")
                .steps
                .iter()
                .map(|step| step.turn_actions.len())
                .sum::<usize>()
        })
        .sum();
    assert!(played > 0);
}
