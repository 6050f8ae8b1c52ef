pub mod state;
pub mod types;

pub use state::Session;
pub use types::{default_names, Checkpoint, Increment};
