use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::scoring::FinalScore;

/// Calendar date that groups recorded games. Persisted as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Today's local calendar date
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

/// One player's final score in a recorded game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub name: String,
    pub score: f64,
}

impl From<&FinalScore> for PlayerResult {
    fn from(final_score: &FinalScore) -> Self {
        Self {
            name: final_score.name.clone(),
            score: final_score.score,
        }
    }
}

/// A completed game: four results in seat order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameRecord(pub [PlayerResult; 4]);

impl GameRecord {
    pub fn from_finals(finals: &[FinalScore; 4]) -> Self {
        Self(std::array::from_fn(|i| PlayerResult::from(&finals[i])))
    }

    /// Score of the first seat named `name`, if anyone at this table had it
    pub fn score_of(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|p| p.name == name).map(|p| p.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Recorded games grouped by date.
///
/// Players are matched across games by exact name. A renamed player is a new
/// player as far as totals are concerned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLedger {
    days: BTreeMap<DateKey, Vec<GameRecord>>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a game under `date`, creating the date on first use
    pub fn register(&mut self, date: DateKey, record: GameRecord) {
        self.days.entry(date).or_default().push(record);
    }

    /// Games recorded on `date`, in registration order
    pub fn games_on(&self, date: DateKey) -> &[GameRecord] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all_dates_sorted(&self) -> Vec<DateKey> {
        self.days.keys().copied().collect()
    }

    /// Sum of `name`'s scores over every recorded game. Games without
    /// `name` contribute nothing.
    pub fn all_time_total(&self, name: &str) -> f64 {
        self.days
            .values()
            .flatten()
            .filter_map(|game| game.score_of(name))
            .sum()
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    /// Every distinct name in the ledger plus the live session's names, in
    /// first-seen order.
    pub fn master_player_names<'a, I>(&self, live_names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        let recorded = self
            .days
            .values()
            .flatten()
            .flat_map(|game| game.0.iter().map(|p| p.name.clone()));
        let live = live_names.into_iter().map(str::to_string);

        for name in recorded.chain(live) {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
        names
    }

    /// Nearest recorded date strictly before or after `current`.
    /// `current` itself does not need to have games.
    pub fn adjacent_date(&self, current: DateKey, direction: Direction) -> Option<DateKey> {
        match direction {
            Direction::Previous => self.days.range(..current).next_back().map(|(d, _)| *d),
            Direction::Next => self
                .days
                .range(current..)
                .find(|(d, _)| **d != current)
                .map(|(d, _)| *d),
        }
    }

    pub fn game_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Build a ledger from the pre-date-grouping format: every game lands on
    /// `date`, order preserved.
    pub fn from_legacy(games: Vec<GameRecord>, date: DateKey) -> Self {
        let mut ledger = Self::new();
        for game in games {
            ledger.register(date, game);
        }
        ledger
    }
}
