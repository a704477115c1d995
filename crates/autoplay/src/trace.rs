use crate::{AiAction, AutoplayError};
use serde::{Deserialize, Serialize};
use sk8_core::Card;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Finished,
    TurnLimit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatRecord {
    pub name: String,
    pub skater: String,
    pub letters: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub actor: usize,
    pub action: AiAction,
    /// Thrasher and sponsors plays made before the final action.
    #[serde(default)]
    pub turn_actions: Vec<Card>,
    #[serde(default)]
    pub combo: Vec<Card>,
    pub difficulty: Option<u32>,
    /// Totals of every roll made this turn, in order.
    #[serde(default)]
    pub rolls: Vec<u32>,
    pub landed: Option<bool>,
    pub summary: String,
    pub letters_after: [String; 2],
    pub event_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub status: GameStatus,
    pub winner: Option<usize>,
    pub turns: u32,
    pub seats: [SeatRecord; 2],
    pub steps: Vec<TurnRecord>,
}

impl GameRecord {
    pub fn winner_skater(&self) -> Option<&str> {
        self.winner.map(|seat| self.seats[seat].skater.as_str())
    }

    pub fn to_text_report(&self) -> String {
        let mut lines = vec![format!(
            "seed {} | {} | {} turns",
            self.seed,
            status_label(self.status),
            self.turns
        )];
        for (idx, seat) in self.seats.iter().enumerate() {
            let marker = if self.winner == Some(idx) { " (winner)" } else { "" };
            lines.push(format!(
                "  {} [{}] letters '{}'{marker}",
                seat.name, seat.skater, seat.letters
            ));
        }
        for step in &self.steps {
            let detail = match (step.difficulty, step.landed) {
                (Some(difficulty), Some(landed)) => format!(
                    " target {difficulty} rolls {:?} {}",
                    step.rolls,
                    if landed { "landed" } else { "missed" }
                ),
                _ => String::new(),
            };
            let played: String = step
                .turn_actions
                .iter()
                .map(|card| format!("play {}, ", card.name()))
                .collect();
            lines.push(format!(
                "  turn {:>3} | p{} {played}{}{detail} | {}",
                step.turn,
                step.actor + 1,
                step.action.short_label(),
                step.summary
            ));
        }
        lines.join("\n")
    }
}

/// Aggregate over a batch of simulated games.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub games: u32,
    pub finished: u32,
    pub turn_limited: u32,
    pub total_turns: u64,
    /// Wins keyed by skater name.
    pub wins: BTreeMap<String, u32>,
}

impl SimulationSummary {
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_turns += game.turns as u64;
        match game.status {
            GameStatus::Finished => self.finished += 1,
            GameStatus::TurnLimit => self.turn_limited += 1,
        }
        if let Some(skater) = game.winner_skater() {
            *self.wins.entry(skater.to_string()).or_default() += 1;
        }
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }

    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!(
                "games {} | finished {} | turn limit {} | avg turns {:.1}",
                self.games,
                self.finished,
                self.turn_limited,
                self.average_turns()
            ),
            "wins by skater:".to_string(),
        ];
        if self.wins.is_empty() {
            lines.push("  (none)".to_string());
        }
        for (skater, wins) in &self.wins {
            lines.push(format!("  {skater:<18} {wins}"));
        }
        lines.join("\n")
    }
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Finished => "finished",
        GameStatus::TurnLimit => "turn limit reached",
    }
}

pub fn write_trace(path: &Path, record: &GameRecord) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(record)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn read_trace(path: &Path) -> Result<GameRecord, AutoplayError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
