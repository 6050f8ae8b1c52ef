pub mod config;
pub mod engine;
pub mod error;
pub mod validation;

pub use config::RuleConfig;
pub use engine::{transform, FinalScore, Player, ScoreBreakdown};
pub use error::ValidationError;
pub use validation::validate_rules;
