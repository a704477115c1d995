use crate::schema::GameData;
use anyhow::Context;
use serde::de::DeserializeOwned;

pub(crate) const RULES_JSON: &[u8] = include_bytes!("../../../assets/rules.json");
pub(crate) const TRICKS_JSON: &[u8] = include_bytes!("../../../assets/tricks.json");
pub(crate) const SKATERS_JSON: &[u8] = include_bytes!("../../../assets/skaters.json");
pub(crate) const DECKS_JSON: &[u8] = include_bytes!("../../../assets/decks.json");

/// The game data compiled into the binary, used when no assets directory is given.
pub fn builtin_game_data() -> anyhow::Result<GameData> {
    Ok(GameData {
        rules: parse_builtin("rules.json", RULES_JSON)?,
        tricks: parse_builtin("tricks.json", TRICKS_JSON)?,
        skaters: parse_builtin("skaters.json", SKATERS_JSON)?,
        decks: parse_builtin("decks.json", DECKS_JSON)?,
    })
}

pub(crate) fn parse_builtin<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> anyhow::Result<T> {
    serde_json::from_slice(bytes).with_context(|| format!("parse built-in {name}"))
}
