use crate::builtin::{parse_builtin, DECKS_JSON, RULES_JSON, SKATERS_JSON, TRICKS_JSON};
use crate::schema::GameData;
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use sk8_core::{Ability, Card, CardKind};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const RULES_FILE: &str = "rules.json";
pub const TRICKS_FILE: &str = "tricks.json";
pub const SKATERS_FILE: &str = "skaters.json";
pub const DECKS_FILE: &str = "decks.json";

/// Loads game data from `dir`. Files missing from the directory fall back to the
/// built-in copies; files that exist must parse.
pub fn load_game_data(dir: &Path) -> anyhow::Result<GameData> {
    let data = GameData {
        rules: load_or_builtin(&dir.join(RULES_FILE), RULES_JSON)?,
        tricks: load_or_builtin(&dir.join(TRICKS_FILE), TRICKS_JSON)?,
        skaters: load_or_builtin(&dir.join(SKATERS_FILE), SKATERS_JSON)?,
        decks: load_or_builtin(&dir.join(DECKS_FILE), DECKS_JSON)?,
    };
    validate_game_data(&data).with_context(|| format!("validate {}", dir.display()))?;
    Ok(data)
}

pub fn validate_game_data(data: &GameData) -> anyhow::Result<()> {
    let rules = &data.rules;
    if rules.elimination_word.trim().is_empty() {
        bail!("elimination word is empty");
    }
    if rules.hand_size == 0 {
        bail!("hand size must be at least 1");
    }
    if rules.dice_count == 0 || rules.dice_sides < 2 {
        bail!(
            "dice must be at least 1d2, got {}d{}",
            rules.dice_count,
            rules.dice_sides
        );
    }

    let mut seen = HashSet::new();
    for rule in &data.tricks.tricks {
        if rule.card.kind() != CardKind::Trick {
            bail!("{} is not a trick card", rule.card.id());
        }
        if rule.base == 0 {
            bail!("{} has a base difficulty of 0", rule.card.id());
        }
        if !seen.insert(rule.card) {
            bail!("{} is listed twice", rule.card.id());
        }
    }
    for rule in &data.tricks.stances {
        if !rule.card.is_stance() {
            bail!("{} is not a stance card", rule.card.id());
        }
        if !seen.insert(rule.card) {
            bail!("{} is listed twice", rule.card.id());
        }
    }
    if let Some(missing) = Card::ALL
        .iter()
        .find(|card| (card.is_trick() || card.is_stance()) && !seen.contains(*card))
    {
        bail!("{} has no difficulty entry", missing.id());
    }

    if data.skaters.is_empty() {
        bail!("no skaters defined");
    }
    let mut names = HashSet::new();
    for skater in &data.skaters {
        if !names.insert(skater.name.to_lowercase()) {
            bail!("skater {} is listed twice", skater.name);
        }
        for ability in [skater.passive, skater.negative] {
            if !matches!(ability, Ability::DifficultyModifier { .. }) {
                bail!("{}: passive and negative must be difficulty modifiers", skater.name);
            }
        }
        match skater.activated {
            Ability::Activated { cost, category } if cost > 0 && category.is_primary() => {}
            _ => bail!(
                "{}: activated ability needs a cost and a trick family",
                skater.name
            ),
        }
    }

    for (skater, pack) in &data.decks.packs {
        if data.skater(skater).is_none() {
            bail!("deck pack for unknown skater {skater}");
        }
        if pack.contains(&Card::Ollie) {
            bail!("deck pack for {skater} lists the ollie");
        }
    }
    if data.decks.base.contains(&Card::Ollie) {
        bail!("base deck lists the ollie");
    }
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

fn load_or_builtin<T: DeserializeOwned>(path: &Path, builtin: &[u8]) -> anyhow::Result<T> {
    if path.exists() {
        return load_json(path);
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_builtin(&name, builtin)
}
