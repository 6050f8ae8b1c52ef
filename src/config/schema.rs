use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::RuleConfig;
use crate::session::default_names;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Seat names for a fresh session, East first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<String>,

    pub rules: RuleConfig,

    pub theme: ThemeChoice,

    /// Where recorded games are kept (defaults to ~/.config/tenbo/history.json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
}

impl Config {
    /// Four seat names: configured names first, then "Player N" fillers
    pub fn seat_names(&self) -> [String; 4] {
        let mut names = default_names();
        for (slot, name) in names.iter_mut().zip(&self.players) {
            *slot = name.clone();
        }
        names
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Auto,
    Dark,
    Light,
}
