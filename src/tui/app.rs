use crate::ledger::{DateKey, Direction, HistoryTable, LedgerStore};
use crate::session::{Increment, Session};
use crate::tui::theme::ThemeColors;
use std::time::Instant;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Session,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    NameInput,
    PointsInput,
    ConfirmClear,
    Breakdown,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

pub struct App {
    pub session: Session,
    pub store: LedgerStore,
    pub today: DateKey,
    pub selected_date: DateKey,
    pub table_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub input_mode: InputMode,
    pub input: String,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(session: Session, store: LedgerStore, today: DateKey, theme: ThemeColors) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        table_state.select(Some(0));

        Self {
            session,
            store,
            today,
            selected_date: today,
            table_state,
            current_view: View::Session,
            input_mode: InputMode::Normal,
            input: String::new(),
            flash_message: None,
            should_quit: false,
            theme,
        }
    }

    /// Seat index under the cursor (always 0..4)
    pub fn selected_seat(&self) -> usize {
        self.table_state.selected().unwrap_or(0).min(3)
    }

    pub fn next_row(&mut self) {
        let i = (self.selected_seat() + 1) % 4;
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let i = (self.selected_seat() + 3) % 4;
        self.table_state.select(Some(i));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }

    pub fn adjust_selected(&mut self, step: Increment, up: bool) {
        let seat = self.selected_seat();
        self.session.adjust_points(seat, step, up);
    }

    pub fn toggle_danger_selected(&mut self) {
        let seat = self.selected_seat();
        self.session.toggle_danger(seat);
    }

    /// Start renaming the selected seat
    pub fn start_name_input(&mut self) {
        if self.session.is_calculated() {
            return;
        }
        self.input = self.session.players()[self.selected_seat()].name.clone();
        self.input_mode = InputMode::NameInput;
    }

    /// Start typing the selected seat's points directly
    pub fn start_points_input(&mut self) {
        if self.session.is_calculated() {
            return;
        }
        self.input = self.session.players()[self.selected_seat()].points.to_string();
        self.input_mode = InputMode::PointsInput;
    }

    /// Apply whatever is in the input popup to the selected seat
    pub fn confirm_input(&mut self) {
        let seat = self.selected_seat();
        match self.input_mode {
            InputMode::NameInput => {
                let name = self.input.trim().to_string();
                if name.is_empty() {
                    self.show_flash("Name cannot be empty".to_string(), FlashKind::Error);
                } else {
                    self.session.set_name(seat, name);
                }
            }
            InputMode::PointsInput => {
                // An empty field means zero
                let text = self.input.trim();
                let parsed = if text.is_empty() {
                    Ok(0)
                } else {
                    text.parse::<i64>()
                };
                match parsed {
                    Ok(points) => {
                        self.session.set_points(seat, points);
                    }
                    Err(_) => {
                        self.show_flash(format!("Invalid points: '{}'", text), FlashKind::Error);
                    }
                }
            }
            _ => {}
        }
        self.cancel_input();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    /// Compute final scores; a wrong total is reported and nothing changes
    pub fn calculate(&mut self) {
        if self.session.is_calculated() {
            return;
        }
        match self.session.calculate() {
            Ok(_) => self.show_flash(
                "Final scores ready (r to register, x to correct)".to_string(),
                FlashKind::Success,
            ),
            Err(e) => self.show_flash(e.to_string(), FlashKind::Error),
        }
    }

    pub fn correct(&mut self) {
        if self.session.correct() {
            self.show_flash("Back to raw scores".to_string(), FlashKind::Info);
        }
    }

    /// Commit the calculated game under today's date and show it in history
    pub fn register(&mut self) {
        let record = match self.session.take_record() {
            Some(record) => record,
            None => return,
        };

        match self.store.register(self.today, record) {
            Ok(()) => {
                let count = self.store.ledger().games_on(self.today).len();
                self.show_flash(
                    format!("Registered game {} for {}", count, self.today),
                    FlashKind::Success,
                );
            }
            Err(e) => {
                log::error!("Failed to save history: {:#}", e);
                self.show_flash(format!("Failed to save history: {}", e), FlashKind::Error);
            }
        }

        self.selected_date = self.today;
        self.current_view = View::History;
    }

    pub fn toggle_view(&mut self) {
        self.current_view = match self.current_view {
            View::Session => View::History,
            View::History => View::Session,
        };
    }

    /// Step to the neighbouring recorded date; stays put at either end
    pub fn step_date(&mut self, direction: Direction) {
        if let Some(date) = self.store.ledger().adjacent_date(self.selected_date, direction) {
            self.selected_date = date;
        }
    }

    pub fn has_date(&self, direction: Direction) -> bool {
        self.store
            .ledger()
            .adjacent_date(self.selected_date, direction)
            .is_some()
    }

    pub fn start_clear(&mut self) {
        if matches!(self.current_view, View::History) {
            self.input_mode = InputMode::ConfirmClear;
        }
    }

    pub fn confirm_clear(&mut self) {
        self.input_mode = InputMode::Normal;
        match self.store.clear() {
            Ok(()) => {
                self.selected_date = self.today;
                self.show_flash("History cleared".to_string(), FlashKind::Success);
            }
            Err(e) => {
                log::error!("Failed to clear history: {:#}", e);
                self.show_flash(format!("Failed to clear history: {}", e), FlashKind::Error);
            }
        }
    }

    pub fn cancel_clear(&mut self) {
        self.input_mode = InputMode::Normal;
        self.show_flash("Clear cancelled".to_string(), FlashKind::Info);
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Show how the selected seat's final score was made up
    pub fn show_breakdown(&mut self) {
        if self.session.is_calculated() && matches!(self.current_view, View::Session) {
            self.input_mode = InputMode::Breakdown;
        }
    }

    pub fn dismiss_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn history_table(&self) -> HistoryTable {
        HistoryTable::build(self.store.ledger(), self.selected_date, self.session.live_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RuleConfig;
    use crate::session::default_names;
    use std::path::PathBuf;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tenbo_app_{}_{}.json", label, std::process::id()))
    }

    fn app(label: &str) -> (App, PathBuf) {
        let path = temp_path(label);
        let _ = std::fs::remove_file(&path);
        let today: DateKey = "2024-05-02".parse().unwrap();
        let store = LedgerStore::open(&path, today).unwrap();
        let session = Session::new(default_names(), RuleConfig::default());
        (App::new(session, store, today, ThemeColors::dark()), path)
    }

    fn enter_points(app: &mut App, points: [i64; 4]) {
        for p in points {
            app.start_points_input();
            app.input = p.to_string();
            app.confirm_input();
            app.next_row();
        }
    }

    #[test]
    fn test_row_selection_wraps() {
        let (mut app, _) = app("wrap");
        app.previous_row();
        assert_eq!(app.selected_seat(), 3);
        app.next_row();
        assert_eq!(app.selected_seat(), 0);
    }

    #[test]
    fn test_calculate_mismatch_flashes_actual_total() {
        let (mut app, _) = app("mismatch");
        app.adjust_selected(Increment::Hundred, false);
        app.calculate();

        assert!(!app.session.is_calculated());
        let (msg, kind, _) = app.flash_message.clone().unwrap();
        assert_eq!(kind, FlashKind::Error);
        assert!(msg.contains("99900"));
    }

    #[test]
    fn test_register_moves_to_history() {
        let (mut app, path) = app("register");
        enter_points(&mut app, [40_000, 30_000, 30_000, 0]);
        app.toggle_danger_selected();
        app.calculate();
        assert!(app.session.is_calculated());

        app.register();

        assert_eq!(app.current_view, View::History);
        assert_eq!(app.selected_date, app.today);
        assert_eq!(app.store.ledger().games_on(app.today).len(), 1);
        assert!(app
            .session
            .players()
            .iter()
            .all(|p| p.points == 25_000));
        assert_eq!(app.session.danger(), &[false; 4]);

        let table = app.history_table();
        assert_eq!(table.rows[0][0], Some(60.0));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_register_without_calculation_does_nothing() {
        let (mut app, _) = app("noop");
        app.register();
        assert_eq!(app.current_view, View::Session);
        assert!(app.store.ledger().is_empty());
    }

    #[test]
    fn test_invalid_points_input_rejected() {
        let (mut app, _) = app("invalid");
        app.start_points_input();
        app.input = "12k".to_string();
        app.confirm_input();

        assert_eq!(app.session.players()[0].points, 25_000);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.flash_message.is_some());
    }

    #[test]
    fn test_empty_name_rejected() {
        let (mut app, _) = app("empty_name");
        app.start_name_input();
        app.input = "   ".to_string();
        app.confirm_input();
        assert_eq!(app.session.players()[0].name, "Player 1");
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let (mut app, path) = app("clear");
        app.calculate();
        app.register();
        assert_eq!(app.store.ledger().game_count(), 1);

        app.start_clear();
        assert_eq!(app.input_mode, InputMode::ConfirmClear);
        app.cancel_clear();
        assert_eq!(app.store.ledger().game_count(), 1);

        app.start_clear();
        app.confirm_clear();
        assert!(app.store.ledger().is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_date_navigation_clamped() {
        let (mut app, path) = app("dates");
        let earlier: DateKey = "2024-04-30".parse().unwrap();
        app.calculate();
        let record = app.session.take_record().unwrap();
        app.store.register(earlier, record).unwrap();

        assert!(app.has_date(Direction::Previous));
        assert!(!app.has_date(Direction::Next));

        app.step_date(Direction::Previous);
        assert_eq!(app.selected_date, earlier);
        app.step_date(Direction::Previous);
        assert_eq!(app.selected_date, earlier);
        app.step_date(Direction::Next);
        // Today has no games, so there is nothing after the earlier date
        assert_eq!(app.selected_date, earlier);

        let _ = std::fs::remove_file(&path);
    }
}
