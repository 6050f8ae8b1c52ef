use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::ledger::{HistoryLedger, HistoryTable};
use crate::scoring::{FinalScore, Player};

/// Shown in a history cell when that player wasn't at the table
pub const NO_VALUE: &str = "ー";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a final score compactly: whole numbers without decimals,
/// anything else with up to two (6.666.. -> "6.67", 5.5 -> "5.5")
pub fn format_score(score: f64) -> String {
    let rounded = (score * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        return format!("{:.0}", rounded);
    }
    let formatted = format!("{:.2}", rounded);
    formatted.trim_end_matches('0').to_string()
}

/// Same as `format_score` with an explicit sign on positive values
pub fn format_signed(score: f64) -> String {
    let formatted = format_score(score);
    if score > 0.0 && formatted != "0" {
        format!("+{}", formatted)
    } else {
        formatted
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), s)
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", s, " ".repeat(width.saturating_sub(len)))
}

/// Format the result of one calculation, one seat per line:
/// "{seat}. {name}  {raw}  {final}  (base, uma, oka, tobi, bust)"
pub fn format_finals(players: &[Player; 4], finals: &[FinalScore; 4], use_colors: bool) -> String {
    let name_width = players
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(20);

    players
        .iter()
        .zip(finals.iter())
        .map(|(player, result)| {
            let name = pad_right(&truncate_name(&player.name, 20), name_width);
            let raw = pad_left(&player.points.to_string(), 7);
            let score = pad_left(&format_signed(result.score), 7);

            let b = &result.breakdown;
            let mut parts = vec![
                format!("base {}", format_signed(b.base)),
                format!("uma {}", format_signed(b.uma)),
            ];
            if b.oka != 0.0 {
                parts.push(format!("oka {}", format_signed(b.oka)));
            }
            if b.tobi != 0.0 {
                parts.push(format!("tobi {}", format_signed(b.tobi)));
            }
            if b.bust != 0.0 {
                parts.push(format!("bust {}", format_signed(b.bust)));
            }
            let detail = format!("({})", parts.join(", "));

            if use_colors {
                let score = if result.score >= 0.0 {
                    score.green().bold().to_string()
                } else {
                    score.red().bold().to_string()
                };
                format!(
                    "{} {}  {}  {}  {}",
                    format!("{}.", result.rank).dimmed(),
                    name.bold(),
                    raw,
                    score,
                    detail.dimmed()
                )
            } else {
                format!("{}. {}  {}  {}  {}", result.rank, name, raw, score, detail)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Final scores as tab-separated values for scripting
/// Columns: name, raw points, final score (no headers, no colors)
pub fn format_finals_tsv(players: &[Player; 4], finals: &[FinalScore; 4]) -> String {
    players
        .iter()
        .zip(finals.iter())
        .map(|(player, result)| format!("{}\t{}\t{}", player.name, player.points, result.score))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one day of history as a table: a row per game, a column per known
/// player, and an all-time total row underneath.
pub fn format_history_table(table: &HistoryTable, use_colors: bool) -> String {
    let mut out = Vec::new();

    let heading = format!("History for {}", table.date);
    out.push(if use_colors {
        heading.bold().to_string()
    } else {
        heading
    });

    if table.names.is_empty() {
        out.push("No games recorded yet.".to_string());
        return out.join("\n");
    }

    // Shrink name columns to fit the terminal when there is one
    let label_width = 5; // "Total"
    let max_name = match get_terminal_width() {
        Some(width) => {
            let per_column = width.saturating_sub(label_width) / table.names.len();
            per_column.saturating_sub(2).max(4)
        }
        None => usize::MAX,
    };
    let names: Vec<String> = table
        .names
        .iter()
        .map(|n| truncate_name(n, max_name))
        .collect();

    let cell_texts: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map(format_score).unwrap_or_else(|| NO_VALUE.to_string()))
                .collect()
        })
        .collect();
    let total_texts: Vec<String> = table.totals.iter().map(|t| format_score(*t)).collect();

    let widths: Vec<usize> = names
        .iter()
        .enumerate()
        .map(|(c, name)| {
            let cells = cell_texts.iter().map(|row| row[c].chars().count());
            cells
                .chain(std::iter::once(name.chars().count()))
                .chain(std::iter::once(total_texts[c].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |label: &str, cells: &[String]| -> String {
        let mut line = pad_right(label, label_width);
        for (cell, width) in cells.iter().zip(&widths) {
            line.push_str("  ");
            line.push_str(&pad_left(cell, *width));
        }
        line
    };

    let header = render("Game", names.as_slice());
    out.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    if cell_texts.is_empty() {
        out.push("No games recorded for this date.".to_string());
    }
    for (g, cells) in cell_texts.iter().enumerate() {
        out.push(render(&(g + 1).to_string(), cells.as_slice()));
    }

    let total = render("Total", total_texts.as_slice());
    out.push(if use_colors {
        total.cyan().to_string()
    } else {
        total
    });

    out.join("\n")
}

/// One day of history as tab-separated values
/// First line: "game" and the player names; then one line per game and a
/// final "total" line. Missing players are empty fields.
pub fn format_history_tsv(table: &HistoryTable) -> String {
    let mut lines = Vec::new();
    lines.push(
        std::iter::once("game".to_string())
            .chain(table.names.iter().cloned())
            .collect::<Vec<_>>()
            .join("\t"),
    );
    for (g, row) in table.rows.iter().enumerate() {
        let cells = row
            .iter()
            .map(|cell| cell.map(|s| s.to_string()).unwrap_or_default());
        lines.push(
            std::iter::once((g + 1).to_string())
                .chain(cells)
                .collect::<Vec<_>>()
                .join("\t"),
        );
    }
    lines.push(
        std::iter::once("total".to_string())
            .chain(table.totals.iter().map(|t| t.to_string()))
            .collect::<Vec<_>>()
            .join("\t"),
    );
    lines.join("\n")
}

/// List recorded dates with their game counts, oldest first
pub fn format_dates(ledger: &HistoryLedger) -> String {
    let dates = ledger.all_dates_sorted();
    if dates.is_empty() {
        return "No games recorded yet.".to_string();
    }
    dates
        .iter()
        .map(|date| {
            let count = ledger.games_on(*date).len();
            let noun = if count == 1 { "game" } else { "games" };
            format!("{}  {} {}", date, count, noun)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{DateKey, GameRecord, PlayerResult};
    use crate::scoring::{transform, RuleConfig};

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn game(entries: [(&str, f64); 4]) -> GameRecord {
        GameRecord(entries.map(|(name, score)| PlayerResult {
            name: name.to_string(),
            score,
        }))
    }

    fn sample_table() -> HistoryTable {
        let mut ledger = HistoryLedger::new();
        ledger.register(day("2024-05-01"), game([("Aki", 60.0), ("Ben", 0.0), ("Chie", 0.0), ("Dan", -60.0)]));
        ledger.register(day("2024-05-02"), game([("Aki", 6.5), ("Ben", 30.0), ("Eri", -11.5), ("Dan", -25.0)]));
        HistoryTable::build(&ledger, day("2024-05-02"), ["Aki", "Ben", "Eri", "Dan"])
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(60.0), "60");
        assert_eq!(format_score(-60.0), "-60");
        assert_eq!(format_score(5.5), "5.5");
        assert_eq!(format_score(20.0 / 3.0), "6.67");
        assert_eq!(format_score(-0.0), "0");
        assert_eq!(format_score(0.004), "0");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(30.0), "+30");
        assert_eq!(format_signed(-10.0), "-10");
        assert_eq!(format_signed(0.0), "0");
    }

    #[test]
    fn test_format_finals_plain() {
        let players = [
            Player::new(1, "Aki", 40_000),
            Player::new(2, "Ben", 30_000),
            Player::new(3, "Chie", 30_000),
            Player::new(4, "Dan", 0),
        ];
        let finals = transform(&players, &[false; 4], &RuleConfig::default()).unwrap();
        let output = format_finals(&players, &finals, false);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("1. Aki"));
        assert!(lines[0].contains("+60"));
        assert!(lines[0].contains("oka +20"));
        assert!(lines[1].starts_with("2. Ben"));
        assert!(lines[2].starts_with("2. Chie"));
        assert!(lines[3].contains("-60"));
        assert!(!lines[3].contains("oka"));
    }

    #[test]
    fn test_format_finals_tsv() {
        let players = [
            Player::new(1, "Aki", 40_000),
            Player::new(2, "Ben", 30_000),
            Player::new(3, "Chie", 30_000),
            Player::new(4, "Dan", 0),
        ];
        let finals = transform(&players, &[false; 4], &RuleConfig::default()).unwrap();
        assert_eq!(
            format_finals_tsv(&players, &finals),
            "Aki\t40000\t60\nBen\t30000\t0\nChie\t30000\t0\nDan\t0\t-60"
        );
    }

    #[test]
    fn test_history_table_marks_missing_players() {
        let output = format_history_table(&sample_table(), false);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "History for 2024-05-02");
        assert!(lines[1].starts_with("Game"));
        assert!(lines[1].contains("Chie"));
        // Chie sat out the only game that day
        assert!(lines[2].contains(NO_VALUE));
        assert!(lines[3].starts_with("Total"));
        assert!(lines[3].contains("66.5"));
    }

    #[test]
    fn test_history_table_empty_day() {
        let mut ledger = HistoryLedger::new();
        ledger.register(day("2024-05-01"), game([("A", 60.0), ("B", 0.0), ("C", 0.0), ("D", -60.0)]));
        let table = HistoryTable::build(&ledger, day("2024-05-09"), ["A", "B", "C", "D"]);
        let output = format_history_table(&table, false);
        assert!(output.contains("No games recorded for this date."));
        assert!(output.contains("Total"));
    }

    #[test]
    fn test_history_tsv() {
        let tsv = format_history_tsv(&sample_table());
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], "game\tAki\tBen\tChie\tDan\tEri");
        assert_eq!(lines[1], "1\t6.5\t30\t\t-25\t-11.5");
        assert_eq!(lines[2], "total\t66.5\t30\t0\t-85\t-11.5");
    }

    #[test]
    fn test_format_dates() {
        let mut ledger = HistoryLedger::new();
        assert_eq!(format_dates(&ledger), "No games recorded yet.");

        let g = game([("A", 60.0), ("B", 0.0), ("C", 0.0), ("D", -60.0)]);
        ledger.register(day("2024-05-02"), g.clone());
        ledger.register(day("2024-05-01"), g.clone());
        ledger.register(day("2024-05-02"), g);
        assert_eq!(
            format_dates(&ledger),
            "2024-05-01  1 game\n2024-05-02  2 games"
        );
    }
}
