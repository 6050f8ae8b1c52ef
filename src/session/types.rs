use crate::scoring::Player;

/// Fixed step sizes for nudging a seat's raw points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    Hundred,
    Thousand,
    TenThousand,
}

impl Increment {
    pub fn amount(self) -> i64 {
        match self {
            Increment::Hundred => 100,
            Increment::Thousand => 1_000,
            Increment::TenThousand => 10_000,
        }
    }
}

/// Raw points and danger flags captured right before the last calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub players: [Player; 4],
    pub danger: [bool; 4],
}

/// Seat names used when the config doesn't provide any
pub fn default_names() -> [String; 4] {
    std::array::from_fn(|i| format!("Player {}", i + 1))
}
