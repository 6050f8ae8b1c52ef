use super::types::{Checkpoint, Increment};
use crate::ledger::GameRecord;
use crate::scoring::{transform, FinalScore, Player, RuleConfig, ValidationError};

/// The game being played: four seats, their danger flags, and, once
/// calculated, the final scores awaiting registration.
///
/// Edits are ignored while final scores are showing. `correct` goes back to
/// the raw scores of the last calculation; there is only one level of it.
#[derive(Debug, Clone)]
pub struct Session {
    players: [Player; 4],
    danger: [bool; 4],
    checkpoint: Option<Checkpoint>,
    finals: Option<[FinalScore; 4]>,
    rules: RuleConfig,
}

impl Session {
    pub fn new(names: [String; 4], rules: RuleConfig) -> Self {
        let start = rules.starting_points;
        let mut names = names.into_iter();
        let players = std::array::from_fn(|i| {
            let name = names.next().unwrap_or_default();
            Player::new(i as u8 + 1, name, start)
        });

        Self {
            players,
            danger: [false; 4],
            checkpoint: None,
            finals: None,
            rules,
        }
    }

    pub fn players(&self) -> &[Player; 4] {
        &self.players
    }

    pub fn danger(&self) -> &[bool; 4] {
        &self.danger
    }

    pub fn finals(&self) -> Option<&[FinalScore; 4]> {
        self.finals.as_ref()
    }

    pub fn checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoint.as_ref()
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn is_calculated(&self) -> bool {
        self.finals.is_some()
    }

    pub fn total_points(&self) -> i128 {
        self.players.iter().map(|p| i128::from(p.points)).sum()
    }

    pub fn live_names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.name.as_str())
    }

    /// Rename a seat. Returns false if the seat doesn't exist or scores are final.
    pub fn set_name(&mut self, seat: usize, name: String) -> bool {
        match self.editable_seat(seat) {
            Some(player) => {
                player.name = name;
                true
            }
            None => false,
        }
    }

    pub fn set_points(&mut self, seat: usize, points: i64) -> bool {
        match self.editable_seat(seat) {
            Some(player) => {
                player.points = points;
                true
            }
            None => false,
        }
    }

    /// Add `step` (negated when `up` is false) to a seat's raw points
    pub fn adjust_points(&mut self, seat: usize, step: Increment, up: bool) -> bool {
        let delta = if up { step.amount() } else { -step.amount() };
        match self.editable_seat(seat) {
            Some(player) => {
                player.points = player.points.saturating_add(delta);
                true
            }
            None => false,
        }
    }

    pub fn toggle_danger(&mut self, seat: usize) -> bool {
        if self.is_calculated() {
            return false;
        }
        match self.danger.get_mut(seat) {
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    /// Run the final-score transform over the current raw points.
    ///
    /// On success the pre-calculation state replaces any earlier checkpoint.
    /// On failure nothing changes.
    pub fn calculate(&mut self) -> Result<&[FinalScore; 4], ValidationError> {
        let finals = transform(&self.players, &self.danger, &self.rules)?;

        self.checkpoint = Some(Checkpoint {
            players: self.players.clone(),
            danger: self.danger,
        });
        log::debug!(
            "Calculated final scores: {:?}",
            finals.iter().map(|f| f.score).collect::<Vec<_>>()
        );
        Ok(&*self.finals.insert(finals))
    }

    /// Return to the raw points and flags from before the last calculation.
    /// Returns false if there was nothing calculated to correct.
    pub fn correct(&mut self) -> bool {
        if self.finals.take().is_none() {
            return false;
        }
        if let Some(checkpoint) = &self.checkpoint {
            self.players = checkpoint.players.clone();
            self.danger = checkpoint.danger;
        }
        true
    }

    /// Hand over the calculated game for the ledger and start a fresh one.
    ///
    /// Seats keep their names; points go back to the starting value and
    /// danger flags are cleared. Returns None if nothing has been calculated.
    pub fn take_record(&mut self) -> Option<GameRecord> {
        let finals = self.finals.take()?;
        let record = GameRecord::from_finals(&finals);
        self.reset();
        Some(record)
    }

    fn reset(&mut self) {
        for player in &mut self.players {
            player.points = self.rules.starting_points;
        }
        self.danger = [false; 4];
        self.checkpoint = None;
        self.finals = None;
    }

    fn editable_seat(&mut self, seat: usize) -> Option<&mut Player> {
        if self.is_calculated() {
            return None;
        }
        self.players.get_mut(seat)
    }
}
