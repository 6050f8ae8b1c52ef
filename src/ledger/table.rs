use super::types::{DateKey, HistoryLedger};

/// One day's games laid out against every known player.
///
/// `rows[g][c]` is the score of `names[c]` in game `g`, or None when that
/// player wasn't at the table. `totals` run over the whole ledger, not just
/// `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryTable {
    pub date: DateKey,
    pub names: Vec<String>,
    pub rows: Vec<Vec<Option<f64>>>,
    pub totals: Vec<f64>,
}

impl HistoryTable {
    pub fn build<'a, I>(ledger: &HistoryLedger, date: DateKey, live_names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names = ledger.master_player_names(live_names);

        let rows = ledger
            .games_on(date)
            .iter()
            .map(|game| names.iter().map(|name| game.score_of(name)).collect())
            .collect();

        let totals = names
            .iter()
            .map(|name| ledger.all_time_total(name))
            .collect();

        Self {
            date,
            names,
            rows,
            totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{GameRecord, PlayerResult};

    fn game(entries: [(&str, f64); 4]) -> GameRecord {
        GameRecord(entries.map(|(name, score)| PlayerResult {
            name: name.to_string(),
            score,
        }))
    }

    #[test]
    fn test_missing_players_are_none() {
        let day1: DateKey = "2024-05-01".parse().unwrap();
        let day2: DateKey = "2024-05-02".parse().unwrap();
        let mut ledger = HistoryLedger::new();
        ledger.register(day1, game([("A", 60.0), ("B", 0.0), ("C", 0.0), ("D", -60.0)]));
        ledger.register(day2, game([("A", -10.0), ("B", 30.0), ("E", 5.0), ("D", -25.0)]));

        let table = HistoryTable::build(&ledger, day2, ["A", "B", "E", "D"]);
        assert_eq!(table.names, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(
            table.rows,
            vec![vec![Some(-10.0), Some(30.0), None, Some(-25.0), Some(5.0)]]
        );
        // Totals span both days
        assert_eq!(table.totals, vec![50.0, 30.0, 0.0, -85.0, 5.0]);
    }

    #[test]
    fn test_empty_day_still_has_totals() {
        let mut ledger = HistoryLedger::new();
        ledger.register(
            "2024-05-01".parse().unwrap(),
            game([("A", 60.0), ("B", 0.0), ("C", 0.0), ("D", -60.0)]),
        );

        let table = HistoryTable::build(&ledger, "2024-06-01".parse().unwrap(), ["A", "B", "C", "D"]);
        assert!(table.is_empty());
        assert_eq!(table.totals, vec![60.0, 0.0, 0.0, -60.0]);
    }
}
