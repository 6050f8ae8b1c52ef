//! Centralized theme module for TUI color constants and styles

use crate::config::ThemeChoice;
use ratatui::prelude::*;

/// Luma above which the terminal background counts as light
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Final score colors
    pub score_positive: Color,
    pub score_negative: Color,
    pub score_zero: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub missing_color: Color,
    pub total_style: Style,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub danger_color: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,
    pub flash_info: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            score_positive: Color::Green,
            score_negative: Color::Red,
            score_zero: Color::Gray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            missing_color: Color::DarkGray,
            total_style: Style::new().fg(Color::Yellow).bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            danger_color: Color::LightRed,
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            flash_info: Color::White,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            score_positive: Color::Rgb(0, 120, 0),
            score_negative: Color::Rgb(180, 0, 0),
            score_zero: Color::DarkGray,
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Gray,
            missing_color: Color::Gray,
            total_style: Style::new().fg(Color::Rgb(140, 90, 0)).bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            danger_color: Color::Red,
            tab_active_style: Style::new().fg(Color::Blue).bold(),
            tab_inactive_style: Style::new().fg(Color::Gray),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 120, 0),
            flash_error: Color::Rgb(180, 0, 0),
            flash_info: Color::Black,
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    /// Color for a final score by sign
    pub fn score_color(&self, score: f64) -> Color {
        if score > 0.005 {
            self.score_positive
        } else if score < -0.005 {
            self.score_negative
        } else {
            self.score_zero
        }
    }
}

/// Pick a palette for the configured theme.
///
/// `Auto` queries the terminal background, so it must run before the
/// terminal switches to raw mode. Falls back to dark when the terminal
/// doesn't answer.
pub fn resolve_theme(choice: ThemeChoice) -> ThemeColors {
    match choice {
        ThemeChoice::Dark => ThemeColors::dark(),
        ThemeChoice::Light => ThemeColors::light(),
        ThemeChoice::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA_THRESHOLD => {
                log::debug!("Terminal luma {:.2}, using light theme", luma);
                ThemeColors::light()
            }
            Ok(luma) => {
                log::debug!("Terminal luma {:.2}, using dark theme", luma);
                ThemeColors::dark()
            }
            Err(e) => {
                log::debug!("Could not detect terminal background: {}", e);
                ThemeColors::dark()
            }
        },
    }
}
