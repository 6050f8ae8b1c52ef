use crossterm::event::{KeyEvent, KeyEventKind};
use std::io;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        EventHandler {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Block for at most one tick waiting for input.
    ///
    /// Anything other than a key press (resize, focus, key release) is
    /// reported as a tick so the caller still redraws.
    pub fn next(&self) -> io::Result<Event> {
        if crossterm::event::poll(self.tick_rate)? {
            if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                // Filter for Press only (Windows compatibility)
                if key.kind == KeyEventKind::Press {
                    return Ok(Event::Key(key));
                }
            }
        }
        Ok(Event::Tick)
    }
}
