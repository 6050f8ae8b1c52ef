use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::ledger::Direction;
use crate::output::{format_score, format_signed, NO_VALUE};
use crate::tui::app::{App, FlashKind, InputMode, View};

const TITLE: &str = "tenbo";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Session or history table
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_view {
        View::Session => render_session(frame, chunks[2], app),
        View::History => render_history(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::NameInput => render_input_popup(frame, app, " Player Name "),
        InputMode::PointsInput => render_input_popup(frame, app, " Points "),
        InputMode::ConfirmClear => render_confirm_clear_popup(frame, app),
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(TITLE, Style::default().fg(theme.title_color).bold())];

    // Running total on the right so a wrong sum is visible before calculating
    let total = app.session.total_points();
    let expected = app.session.rules().total_points;
    let total_text = format!("Total {} / {}", total, expected);
    let padding_len = (area.width as usize).saturating_sub(TITLE.len() + total_text.len());
    let total_color = if total == i128::from(expected) {
        theme.muted
    } else {
        theme.flash_error
    };

    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(total_text, Style::default().fg(total_color)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = vec!["Session", "History"];
    let selected = match app.current_view {
        View::Session => 0,
        View::History => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_session(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let finals = app.session.finals();

    let rows: Vec<Row> = app
        .session
        .players()
        .iter()
        .zip(app.session.danger())
        .enumerate()
        .map(|(seat, (player, &danger))| {
            let danger_cell = if danger {
                Cell::from("✔").style(Style::default().fg(theme.danger_color).bold())
            } else {
                Cell::from("")
            };

            let (final_cell, rank_cell) = match finals {
                Some(finals) => {
                    let f = &finals[seat];
                    (
                        Cell::from(format!("{:>8}", format_signed(f.score)))
                            .style(Style::default().fg(theme.score_color(f.score))),
                        Cell::from(format!("{}", f.rank)),
                    )
                }
                None => (
                    Cell::from(format!("{:>8}", NO_VALUE)).style(Style::default().fg(theme.missing_color)),
                    Cell::from(NO_VALUE).style(Style::default().fg(theme.missing_color)),
                ),
            };

            // Alternating row background (odd rows get subtle background)
            let row_style = if seat % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", player.id)).style(Style::default().fg(theme.index_color)),
                Cell::from(player.name.clone()),
                Cell::from(format!("{:>8}", player.points)),
                danger_cell,
                final_cell,
                rank_cell,
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),  // Seat: "1."
        Constraint::Fill(1),    // Name
        Constraint::Length(9),  // Points
        Constraint::Length(5),  // Tobi flag
        Constraint::Length(9),  // Final score
        Constraint::Length(5),  // Rank
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Name", "  Points", "Tobi", "   Final", "Rank"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let table = app.history_table();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Date line
        Constraint::Fill(1),   // Games
    ])
    .split(area);

    let prev = if app.has_date(Direction::Previous) { "◀ " } else { "  " };
    let next = if app.has_date(Direction::Next) { " ▶" } else { "  " };
    let count = match table.rows.len() {
        1 => "1 game".to_string(),
        n => format!("{} games", n),
    };
    let date_line = Line::from(vec![
        Span::styled(prev, Style::default().fg(theme.status_key_color)),
        Span::styled(table.date.to_string(), Style::default().fg(theme.title_color).bold()),
        Span::styled(next, Style::default().fg(theme.status_key_color)),
        Span::raw("  "),
        Span::styled(count, Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(date_line), chunks[0]);

    let cell_style = |score: Option<f64>| match score {
        Some(s) => Style::default().fg(theme.score_color(s)),
        None => Style::default().fg(theme.missing_color),
    };

    let mut rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut cells = vec![Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color))];
            cells.extend(row.iter().map(|score| {
                let text = score.map(format_score).unwrap_or_else(|| NO_VALUE.to_string());
                Cell::from(Text::from(text).alignment(Alignment::Right)).style(cell_style(*score))
            }));

            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };
            Row::new(cells).style(row_style)
        })
        .collect();

    let mut total_cells = vec![Cell::from("Σ")];
    total_cells.extend(
        table
            .totals
            .iter()
            .map(|total| Cell::from(Text::from(format_score(*total)).alignment(Alignment::Right))),
    );
    rows.push(Row::new(total_cells).style(theme.total_style).top_margin(1));

    let mut widths = vec![Constraint::Length(4)];
    widths.extend(table.names.iter().map(|_| Constraint::Fill(1)));

    let mut header = vec![Cell::from("#")];
    header.extend(
        table
            .names
            .iter()
            .map(|name| Cell::from(Text::from(name.clone()).alignment(Alignment::Right))),
    );

    let widget = Table::new(rows, widths)
        .header(Row::new(header).style(theme.header_style).bottom_margin(1));

    frame.render_widget(widget, chunks[1]);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        let msg_color = match kind {
            FlashKind::Success => theme.flash_success,
            FlashKind::Error => theme.flash_error,
            FlashKind::Info => theme.flash_info,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let state = match app.current_view {
            View::Session if app.session.is_calculated() => "Calculated",
            View::Session => "Entering",
            View::History => "History",
        };

        let hints: Vec<(&str, &str)> = match app.current_view {
            View::Session if app.session.is_calculated() => vec![
                ("r", ":register "),
                ("x", ":correct "),
                ("b", ":breakdown "),
                ("Tab", ":history "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            View::Session => vec![
                ("j/k", ":seat "),
                ("[ ] - + { }", ":points "),
                ("e", ":edit "),
                ("n", ":name "),
                ("t", ":tobi "),
                ("c", ":calculate "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            View::History => vec![
                ("h/l", ":date "),
                ("D", ":clear "),
                ("Tab", ":session "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = vec![
            Span::styled(state, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Render the text entry popup for names and points
fn render_input_popup(frame: &mut Frame, app: &App, title: &str) {
    let popup_area = centered_rect_fixed(40, 4, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(title)
        .title_style(app.theme.popup_title)
        .border_style(Style::default().fg(app.theme.popup_border))
        .style(Style::default().bg(app.theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Input line
        Constraint::Length(1), // Help text
    ])
    .split(inner);

    let input = Paragraph::new(format!("{}|", app.input));
    frame.render_widget(input, chunks[0]);

    let help = Paragraph::new("Enter: confirm | Esc: cancel")
        .style(Style::default().fg(app.theme.muted));
    frame.render_widget(help, chunks[1]);
}

fn render_confirm_clear_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(46, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Clear History ")
        .title_style(Style::default().fg(app.theme.flash_error).bold())
        .border_style(Style::default().fg(app.theme.flash_error))
        .style(Style::default().bg(app.theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let games = app.store.ledger().game_count();
    let lines = vec![
        Line::from(format!("Delete all {} recorded games?", games)),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(app.theme.status_key_color).bold()),
            Span::raw(": delete  "),
            Span::styled("any other key", Style::default().fg(app.theme.status_key_color).bold()),
            Span::raw(": keep"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Show the terms behind the selected seat's final score
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(finals) = app.session.finals() else {
        return;
    };
    let seat = app.selected_seat();
    let final_score = &finals[seat];
    let player = &app.session.players()[seat];
    let b = &final_score.breakdown;
    let theme = &app.theme;

    let popup_area = centered_rect_fixed(42, 12, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(format!(" {} ", final_score.name))
        .title_style(theme.popup_title)
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let term = |label: &str, value: f64| {
        Line::from(vec![
            Span::styled(format!("{:<12}", label), Style::default().fg(theme.muted)),
            Span::styled(
                format!("{:>8}", format_signed(value)),
                Style::default().fg(theme.score_color(value)),
            ),
        ])
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<12}", "Raw points"), Style::default().fg(theme.muted)),
            Span::raw(format!("{:>8}", player.points)),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Rank"), Style::default().fg(theme.muted)),
            Span::raw(format!("{:>8}", final_score.rank)),
        ]),
        Line::from(""),
        term("Base", b.base),
        term("Uma", b.uma),
        term("Oka", b.oka),
        term("Tobi", b.tobi),
        term("Bust", b.bust),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Final"), theme.header_style),
            Span::styled(
                format!("{:>8}", format_signed(final_score.score)),
                Style::default().fg(theme.score_color(final_score.score)).bold(),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(54, 22, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_style(app.theme.popup_title)
        .border_style(Style::default().fg(app.theme.popup_border))
        .style(Style::default().bg(app.theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(app.theme.status_key_color).bold();
    let entries = [
        ("j / Down", "Next seat"),
        ("k / Up", "Previous seat"),
        ("[ / ]", "Points -100 / +100"),
        ("- / +", "Points -1000 / +1000"),
        ("{ / }", "Points -10000 / +10000"),
        ("e", "Type points"),
        ("n", "Rename seat"),
        ("t", "Toggle tobi bonus for seat"),
        ("c / Enter", "Calculate final scores"),
        ("b", "Score breakdown"),
        ("r", "Register game"),
        ("x", "Back to raw scores"),
        ("Tab", "Toggle Session/History"),
        ("h / l", "Previous / next date"),
        ("D", "Clear all history"),
        ("?", "Show/hide this help"),
        ("q / Ctrl-c", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", keys), key_style),
                Span::raw(*action),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
