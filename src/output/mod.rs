pub mod formatter;

pub use formatter::{
    format_dates, format_finals, format_finals_tsv, format_history_table, format_history_tsv,
    format_score, format_signed, should_use_colors, NO_VALUE,
};
