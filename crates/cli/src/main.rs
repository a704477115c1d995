use anyhow::{anyhow, Context};
use sk8_autoplay::{
    play_ai_setter, simulate_game, simulate_many, write_trace, AiAction, AiConfig, AiDecider,
    GameSetup,
};
use sk8_core::{
    combo_display_name, parse_indices, Card, ChoiceKind, ChoiceRequest, Controller, Decider,
    Event, EventBus, Game, GameState, MatchReport, Phase, RngState, ScoreBreakdown,
    SetterOutcome, SetterRoll, Skater,
};
use sk8_data::{builtin_game_data, load_game_data, GameData};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "sk8-log.txt";
const DEFAULT_ASSETS_DIR: &str = "assets";
const DEFAULT_AUTO_GAMES: u32 = 1;
const MAX_AUTO_TURNS: u32 = 400;

#[derive(Debug, Clone, Default)]
struct CliOptions {
    auto: bool,
    pvp: bool,
    help: bool,
    seed: Option<u64>,
    games: Option<u32>,
    assets: Option<PathBuf>,
    trace: Option<PathBuf>,
}

fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" => options.auto = true,
            "--pvp" => options.pvp = true,
            "-h" | "--help" => options.help = true,
            "--seed" => {
                let value = args.get(idx + 1).ok_or("--seed needs a value")?;
                options.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid seed '{value}'"))?,
                );
                idx += 1;
            }
            "--games" => {
                let value = args.get(idx + 1).ok_or("--games needs a value")?;
                options.games = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid game count '{value}'"))?,
                );
                idx += 1;
            }
            "--assets" => {
                let value = args.get(idx + 1).ok_or("--assets needs a directory")?;
                options.assets = Some(PathBuf::from(value));
                idx += 1;
            }
            "--trace" => {
                let value = args.get(idx + 1).ok_or("--trace needs a file path")?;
                options.trace = Some(PathBuf::from(value));
                idx += 1;
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
        idx += 1;
    }
    if options.auto && options.pvp {
        return Err("--auto and --pvp cannot be combined".to_string());
    }
    Ok(options)
}

fn print_usage() {
    println!("usage: sk8 [--pvp | --auto] [--seed N] [--games N] [--assets DIR] [--trace FILE]");
    println!("  (default)   play against the computer");
    println!("  --pvp       two players on one terminal");
    println!("  --auto      computer vs computer; prints a summary");
    println!("  --games N   number of games to simulate with --auto");
    println!("  --trace F   write the first simulated game as JSON");
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            std::process::exit(2);
        }
    };
    if options.help {
        print_usage();
        return;
    }
    init_logging();
    if let Err(err) = run(&options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    match File::create(LOG_FILE) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .ok();
        }
        Err(err) => eprintln!("could not create {LOG_FILE} ({err}); continuing without a log"),
    }
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    let data = load_data(options)?;
    let seed = options.seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, auto = options.auto, pvp = options.pvp, "starting sk8");
    if options.auto {
        run_auto(&data, options, seed)
    } else {
        run_interactive(&data, options.pvp, seed)
    }
}

fn load_data(options: &CliOptions) -> anyhow::Result<GameData> {
    if let Some(dir) = &options.assets {
        return load_game_data(dir).with_context(|| format!("load assets from {}", dir.display()));
    }
    let dir = PathBuf::from(DEFAULT_ASSETS_DIR);
    if dir.is_dir() {
        return load_game_data(&dir).with_context(|| format!("load assets from {}", dir.display()));
    }
    builtin_game_data().context("load built-in game data")
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn build_setup(data: &GameData, names: [String; 2], skaters: [Skater; 2]) -> GameSetup {
    GameSetup {
        rules: data.rules.clone(),
        catalog: data.catalog(),
        decks: data.decks.clone(),
        names,
        skaters,
    }
}

fn random_skater(roster: &[Skater], taken: Option<&Skater>, rng: &mut RngState) -> Skater {
    let remaining: Vec<&Skater> = roster
        .iter()
        .filter(|skater| taken.map_or(true, |taken| taken.name != skater.name))
        .collect();
    let pool = if remaining.is_empty() {
        roster.iter().collect()
    } else {
        remaining
    };
    rng.choose(&pool)
        .map(|skater| (*skater).clone())
        .unwrap_or_else(|| roster[0].clone())
}

fn run_auto(data: &GameData, options: &CliOptions, seed: u64) -> anyhow::Result<()> {
    let mut rng = RngState::from_seed(seed);
    let first = random_skater(&data.skaters, None, &mut rng);
    let second = random_skater(&data.skaters, Some(&first), &mut rng);
    let setup = build_setup(
        data,
        ["CPU 1".to_string(), "CPU 2".to_string()],
        [first, second],
    );
    let config = AiConfig::default();
    let games = options.games.unwrap_or(DEFAULT_AUTO_GAMES);

    if games <= 1 {
        let record = simulate_game(&setup, &config, seed, MAX_AUTO_TURNS)?;
        println!("{}", record.to_text_report());
        if let Some(path) = &options.trace {
            write_trace(path, &record)?;
            println!("trace written to {}", path.display());
        }
        return Ok(());
    }

    let summary = simulate_many(&setup, &config, seed, games, MAX_AUTO_TURNS)?;
    println!(
        "{} vs {}",
        setup.skaters[0].name, setup.skaters[1].name
    );
    println!("{}", summary.to_text_report());
    if let Some(path) = &options.trace {
        let record = simulate_game(&setup, &config, seed, MAX_AUTO_TURNS)?;
        write_trace(path, &record)?;
        println!("trace of game 1 written to {}", path.display());
    }
    Ok(())
}

struct Console {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl Console {
    fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    /// `None` once stdin is closed.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok();
        match self.lines.next() {
            Some(Ok(line)) => Some(line.trim().to_string()),
            _ => None,
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.ask(&format!("{prompt} (y/n) > "))
            .map(|answer| answer.to_lowercase().starts_with('y'))
            .unwrap_or(false)
    }

    fn pause(&mut self, prompt: &str) {
        self.ask(prompt);
    }
}

/// Asks humans at the terminal and lets the automated policy answer for AI seats.
struct CliDecider<'a> {
    console: &'a mut Console,
    ai: AiDecider,
}

impl<'a> CliDecider<'a> {
    fn new(console: &'a mut Console, config: &AiConfig) -> Self {
        Self {
            console,
            ai: AiDecider::new(config.clone()),
        }
    }
}

impl Decider for CliDecider<'_> {
    fn decide(&mut self, state: &GameState, request: &ChoiceRequest) -> bool {
        let player = &state.players[request.player];
        if player.is_ai() {
            let accepted = self.ai.choose(request);
            if accepted {
                println!("{} {}.", player.name, choice_label(request.kind));
            }
            return accepted;
        }
        let question = match request.kind {
            ChoiceKind::Bail => format!(
                "{}, the set landed with {}. Play Bail to force a re-roll?",
                player.name,
                request.roll.unwrap_or_default()
            ),
            ChoiceKind::ProModelDeck => format!(
                "{}, play Pro Model Deck to ignore your negative ability (target {})?",
                player.name, request.difficulty
            ),
            ChoiceKind::Advantage => format!(
                "{}, spend a required card to roll with advantage (target {})?",
                player.name, request.difficulty
            ),
            ChoiceKind::Refocus => format!(
                "{}, you rolled {} against {}. Discard Focus to re-roll?",
                player.name,
                request.roll.unwrap_or_default(),
                request.difficulty
            ),
        };
        self.console.confirm(&question)
    }

    fn before_roll(&mut self, state: &GameState, player: usize, score: &ScoreBreakdown) {
        println!("Difficulty Calculation:");
        for line in score.lines() {
            println!("{line}");
        }
        println!("Target: {}", score.difficulty);
        let player = &state.players[player];
        if !player.is_ai() {
            self.console
                .pause(&format!("{}, press Enter to roll...", player.name));
        }
    }
}

fn choice_label(kind: ChoiceKind) -> &'static str {
    match kind {
        ChoiceKind::Bail => "plays Bail",
        ChoiceKind::ProModelDeck => "plays Pro Model Deck",
        ChoiceKind::Advantage => "spends a card for advantage",
        ChoiceKind::Refocus => "discards Focus to re-roll",
    }
}

fn choose_skater(console: &mut Console, name: &str, roster: &[Skater]) -> anyhow::Result<Skater> {
    println!("\n{name}, choose your skater:");
    for (idx, skater) in roster.iter().enumerate() {
        println!("{:>2}. {}", idx + 1, skater.name);
        println!("      {}", skater.passive_text());
        println!("      {}", skater.negative_text());
        println!("      {}", skater.activated_text());
    }
    loop {
        let answer = console
            .ask("> ")
            .ok_or_else(|| anyhow!("input closed during skater selection"))?;
        match answer.parse::<usize>() {
            Ok(choice) if (1..=roster.len()).contains(&choice) => {
                return Ok(roster[choice - 1].clone());
            }
            _ => println!("Pick a number between 1 and {}.", roster.len()),
        }
    }
}

fn run_interactive(data: &GameData, pvp: bool, seed: u64) -> anyhow::Result<()> {
    let mut console = Console::new();
    let mut rng = RngState::from_seed(seed);
    let config = AiConfig::default();

    println!("=== {} ===", data.rules.elimination_word);
    let (names, controllers) = if pvp {
        (
            ["Player 1".to_string(), "Player 2".to_string()],
            [Controller::Human, Controller::Human],
        )
    } else {
        (
            ["You".to_string(), "CPU".to_string()],
            [Controller::Human, Controller::Ai],
        )
    };
    let first = choose_skater(&mut console, &names[0], &data.skaters)?;
    let second = if pvp {
        choose_skater(&mut console, &names[1], &data.skaters)?
    } else {
        let skater = random_skater(&data.skaters, Some(&first), &mut rng);
        println!("{} picks {}.", names[1], skater.name);
        skater
    };

    let setup = build_setup(data, names, [first, second]);
    let mut game = setup.new_game(controllers, rng.next_u64());
    let mut events = EventBus::default();

    while !game.is_over() {
        print_status(&game);
        match game.phase() {
            Phase::AwaitingSetter => {
                let setter = game.state.setter_player();
                if setter.is_ai() {
                    ai_setter_turn(&mut game, &mut console, &config, &mut events)?;
                } else {
                    human_setter_turn(&mut game, &mut console, &config, &mut events)?;
                }
            }
            Phase::AwaitingMatcher => {
                let report = {
                    let mut decider = CliDecider::new(&mut console, &config);
                    game.matcher_attempt(&mut decider, &mut events)?
                };
                print_match_report(&game, &report);
            }
            Phase::Terminal => break,
        }
        drain_events(&game, &mut events);
    }

    if let (Some(winner), Some(loser)) = (game.winner(), game.loser()) {
        let word = &game.rules.elimination_word;
        println!(
            "\n{} spelled {word}. {} wins!",
            game.state.players[loser].name, game.state.players[winner].name
        );
    }
    Ok(())
}

fn print_status(game: &Game) {
    println!();
    if !game.state.last_turn_summary.is_empty() {
        println!("{}", game.state.last_turn_summary);
    }
    for player in &game.state.players {
        println!(
            "  {:<10} [{}] letters: '{}' deck: {}",
            player.name,
            player.skater.name,
            player.letters.as_str(),
            player.deck.len()
        );
    }
    if let Some(pending) = &game.state.pending {
        println!(
            "{} must match: {} (difficulty {})",
            game.state.matcher_player().name,
            combo_display_name(&pending.combo),
            pending.score.difficulty
        );
    } else {
        println!("{} is setting.", game.state.setter_player().name);
    }
}

fn card_detail(game: &Game, card: Card) -> String {
    if let Some(base) = game.catalog.base_difficulty(card) {
        format!("difficulty {base}")
    } else if let Some(bonus) = game.catalog.stance_bonus(card) {
        format!("stance +{bonus}")
    } else {
        card.description().unwrap_or_default().to_string()
    }
}

fn print_hand(game: &Game) {
    let player = game.state.setter_player();
    println!("{}'s hand ({}):", player.name, player.skater.name);
    for (idx, card) in player.hand.iter().enumerate() {
        let temp = if player.temporary.contains(card) {
            " [TEMP]"
        } else {
            ""
        };
        println!(
            "{:>4}  {:<18} {}{temp}",
            idx + 1,
            card.name(),
            card_detail(game, *card)
        );
    }
}

fn human_setter_turn(
    game: &mut Game,
    console: &mut Console,
    config: &AiConfig,
    events: &mut EventBus,
) -> anyhow::Result<()> {
    loop {
        game.prepare_setter_turn(events)?;
        drain_events(game, events);
        print_hand(game);
        let line = console
            .ask("Cards to set (e.g. 1 3), 'a' for abilities, 'p' to pass > ")
            .ok_or_else(|| anyhow!("input closed"))?;
        match line.to_lowercase().as_str() {
            "" => continue,
            "p" | "pass" => {
                game.pass_turn(events)?;
                return Ok(());
            }
            "a" => {
                if ability_menu(game, console, events)? {
                    return Ok(());
                }
                continue;
            }
            _ => {}
        }
        let hand_len = game.state.setter_player().hand.len();
        let indices = match parse_indices(&line, hand_len) {
            Ok(indices) => indices,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let outcome = {
            let mut decider = CliDecider::new(console, config);
            game.setter_attempt(&indices, &mut decider, events)
        };
        match outcome {
            Ok(outcome) => {
                let turn_over = print_setter_outcome(game, &outcome);
                if turn_over {
                    return Ok(());
                }
            }
            Err(err) => println!("{err}"),
        }
    }
}

fn ai_setter_turn(
    game: &mut Game,
    console: &mut Console,
    config: &AiConfig,
    events: &mut EventBus,
) -> anyhow::Result<()> {
    let name = game.state.setter_player().name.clone();
    let steps = {
        let mut decider = CliDecider::new(console, config);
        play_ai_setter(game, config, &mut decider, events)?
    };
    for step in steps {
        match (&step.action, &step.outcome) {
            (AiAction::Play { card, .. }, Some(outcome)) => {
                println!("{name} plays {card}.");
                print_setter_outcome(game, outcome);
            }
            (_, Some(outcome)) => {
                print_setter_outcome(game, outcome);
            }
            (_, None) => println!("{name} has no good combos and passes."),
        }
    }
    Ok(())
}

/// Returns whether the setter's turn is over.
fn print_setter_outcome(game: &Game, outcome: &SetterOutcome) -> bool {
    match outcome {
        SetterOutcome::Landed(roll) => {
            print_rolls(roll);
            println!("Landed! {}", game.state.last_turn_summary);
            if let Some(cost) = roll.cost {
                println!("Setting the trick cost a {cost}.");
            }
            true
        }
        SetterOutcome::Bailed(roll) => {
            print_rolls(roll);
            println!("{}", game.state.last_turn_summary);
            true
        }
        SetterOutcome::Redrew { returned, drawn } => {
            println!(
                "Thrasher Magazine: {returned} cards shuffled back, drew {}.",
                drawn.len()
            );
            false
        }
        SetterOutcome::DrewTemporary(cards) => {
            let names: Vec<&str> = cards.iter().map(|card| card.name()).collect();
            println!("Sponsors: drew {} for this turn only.", names.join(", "));
            false
        }
    }
}

fn print_rolls(roll: &SetterRoll) {
    for (idx, dice) in roll.rolls.iter().enumerate() {
        let label = if idx == 0 { "Rolled" } else { "Re-rolled" };
        println!(
            "{label} {:?} = {} against {}",
            dice.dice, dice.total, roll.score.difficulty
        );
    }
    if roll.bail_played {
        println!("Bail was played on the first landing.");
    }
}

fn print_match_report(game: &Game, report: &MatchReport) {
    if report.pro_model {
        println!("Pro Model Deck ignores the negative ability.");
    }
    if report.defender_penalty {
        println!("Missing the setter's cards: defender penalty applies.");
    }
    if let Some(card) = report.advantage {
        println!("Spent {card} to roll with advantage.");
    }
    for (idx, dice) in report.rolls.iter().enumerate() {
        let label = if idx == 0 { "Rolled" } else { "Re-rolled" };
        match dice.dropped {
            Some(dropped) => println!(
                "{label} {:?} (dropped {dropped}) = {}",
                dice.dice, dice.total
            ),
            None => println!("{label} {:?} = {}", dice.dice, dice.total),
        }
    }
    if report.refocused {
        println!("Focus bought a second look.");
    }
    if report.last_chance {
        println!("Last chance re-roll!");
    }
    println!("{}", game.state.last_turn_summary);
}

/// Offers the activated search and the trade. Returns whether an ability was used.
fn ability_menu(
    game: &mut Game,
    console: &mut Console,
    events: &mut EventBus,
) -> anyhow::Result<bool> {
    let skater = game.state.setter_player().skater.clone();
    println!("1. {}", skater.activated_text());
    println!("2. {}", skater.trade_text());
    println!("0. Back");
    let choice = console
        .ask("> ")
        .ok_or_else(|| anyhow!("input closed"))?;
    match choice.as_str() {
        "1" => activated_menu(game, console, events),
        "2" => trade_menu(game, console, events),
        _ => Ok(false),
    }
}

fn activated_menu(
    game: &mut Game,
    console: &mut Console,
    events: &mut EventBus,
) -> anyhow::Result<bool> {
    let skater = game.state.setter_player().skater.clone();
    let options = game.activated_search_options();
    if options.is_empty() {
        println!("No {} left in your deck.", skater.specialty());
        return Ok(false);
    }
    let cost = skater.activation_cost().unwrap_or_default();
    let hand_len = game.state.setter_player().hand.len();
    let line = console
        .ask(&format!("Discard which {cost} cards? > "))
        .ok_or_else(|| anyhow!("input closed"))?;
    let indices = match parse_indices(&line, hand_len) {
        Ok(indices) => indices,
        Err(err) => {
            println!("{err}");
            return Ok(false);
        }
    };
    for (idx, card) in options.iter().enumerate() {
        println!("{:>4}  {}", idx + 1, card.name());
    }
    let pick = console
        .ask("Search for which card? > ")
        .ok_or_else(|| anyhow!("input closed"))?;
    let Some(pick) = pick
        .parse::<usize>()
        .ok()
        .and_then(|choice| options.get(choice.wrapping_sub(1)).copied())
    else {
        println!("Not an option.");
        return Ok(false);
    };
    match game.use_activated_ability(&indices, pick, events) {
        Ok(found) => {
            println!("Found a {found}!");
            Ok(true)
        }
        Err(err) => {
            println!("{err}");
            Ok(false)
        }
    }
}

fn trade_menu(
    game: &mut Game,
    console: &mut Console,
    events: &mut EventBus,
) -> anyhow::Result<bool> {
    let player = game.state.setter_player();
    let specialty = player.skater.specialty();
    let tradeable: Vec<(usize, Card)> = player
        .hand
        .iter()
        .enumerate()
        .filter(|(_, card)| card.is(specialty))
        .map(|(idx, card)| (idx, *card))
        .collect();
    if tradeable.is_empty() {
        println!("You hold no {specialty} to trade.");
        return Ok(false);
    }
    for (slot, (_, card)) in tradeable.iter().enumerate() {
        println!("{:>4}  {}", slot + 1, card.name());
    }
    let answer = console
        .ask("Trade which card? > ")
        .ok_or_else(|| anyhow!("input closed"))?;
    let Some(hand_index) = answer
        .parse::<usize>()
        .ok()
        .and_then(|slot| tradeable.get(slot.wrapping_sub(1)))
        .map(|(idx, _)| *idx)
    else {
        println!("Not an option.");
        return Ok(false);
    };

    let options = game.trade_options();
    for (slot, (category, count)) in options.iter().enumerate() {
        println!("{:>4}  {category} ({count} in deck)", slot + 1);
    }
    let answer = console
        .ask("Trade for which type? > ")
        .ok_or_else(|| anyhow!("input closed"))?;
    let Some(category) = answer
        .parse::<usize>()
        .ok()
        .and_then(|slot| options.get(slot.wrapping_sub(1)))
        .map(|(category, _)| *category)
    else {
        println!("Not an option.");
        return Ok(false);
    };
    match game.use_trade_ability(hand_index, category, events) {
        Ok(found) => {
            println!("Traded for a {found}!");
            Ok(true)
        }
        Err(err) => {
            println!("{err}");
            Ok(false)
        }
    }
}

fn drain_events(game: &Game, events: &mut EventBus) {
    for event in events.drain() {
        if let Some(line) = describe_event(game, &event) {
            println!("  * {line}");
        }
    }
}

/// Events worth a line of their own; the rest are covered by the turn printouts.
fn describe_event(game: &Game, event: &Event) -> Option<String> {
    let name = |seat: usize| game.state.players[seat].name.as_str();
    match event {
        Event::CardsDrawn { player, count } if *count > 0 => {
            Some(format!("{} draws {count}", name(*player)))
        }
        Event::DiscardReshuffled { player } => {
            Some(format!("{} shuffles their discard pile into the deck", name(*player)))
        }
        Event::BailPlayed { by } => Some(format!("{} played Bail", name(*by))),
        Event::TemporaryDiscarded { player, cards } if !cards.is_empty() => Some(format!(
            "{} loses {} sponsor card(s)",
            name(*player),
            cards.len()
        )),
        Event::LetterAssigned {
            player, letters, ..
        } => Some(format!("{} now has '{letters}'", name(*player))),
        Event::GameOver { winner, .. } => Some(format!("game over, {} wins", name(*winner))),
        _ => None,
    }
}
