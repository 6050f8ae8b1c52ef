pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::ledger::Direction;
use crate::session::Increment;

pub fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let events = EventHandler::new(250);

    let result = (|| -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;

            match events.next()? {
                Event::Key(key) => handle_key_event(&mut app, key),
                Event::Tick => app.update_flash(),
            }

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            // Keys that work in both views
            match key.code {
                KeyCode::Char('q') => {
                    app.should_quit = true;
                    return;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true;
                    return;
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    app.toggle_view();
                    return;
                }
                KeyCode::Char('?') => {
                    app.show_help();
                    return;
                }
                _ => {}
            }

            match app.current_view {
                app::View::Session => handle_session_key(app, key),
                app::View::History => handle_history_key(app, key),
            }
        }
        app::InputMode::NameInput | app::InputMode::PointsInput => {
            let points = app.input_mode == app::InputMode::PointsInput;
            match key.code {
                KeyCode::Enter => app.confirm_input(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Backspace => {
                    app.input.pop();
                }
                // Points take digits and a leading minus only
                KeyCode::Char(c) if points => {
                    if c.is_ascii_digit() || (c == '-' && app.input.is_empty()) {
                        app.input.push(c);
                    }
                }
                KeyCode::Char(c) => app.input.push(c),
                // Ignore all other keys (don't propagate to Normal mode)
                _ => {}
            }
        }
        app::InputMode::ConfirmClear => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear(),
            _ => app.cancel_clear(),
        },
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => app.dismiss_breakdown(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

fn handle_session_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.next_row(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

        // Point steps
        KeyCode::Char(']') => app.adjust_selected(Increment::Hundred, true),
        KeyCode::Char('[') => app.adjust_selected(Increment::Hundred, false),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_selected(Increment::Thousand, true),
        KeyCode::Char('-') => app.adjust_selected(Increment::Thousand, false),
        KeyCode::Char('}') => app.adjust_selected(Increment::TenThousand, true),
        KeyCode::Char('{') => app.adjust_selected(Increment::TenThousand, false),

        // Direct entry
        KeyCode::Char('e') => app.start_points_input(),
        KeyCode::Char('n') => app.start_name_input(),

        KeyCode::Char('t') => app.toggle_danger_selected(),

        KeyCode::Char('c') | KeyCode::Enter => app.calculate(),
        KeyCode::Char('r') => app.register(),
        KeyCode::Char('x') => app.correct(),
        KeyCode::Char('b') => app.show_breakdown(),

        _ => {}
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.step_date(Direction::Previous),
        KeyCode::Char('l') | KeyCode::Right => app.step_date(Direction::Next),
        KeyCode::Char('D') => app.start_clear(),
        _ => {}
    }
}
