//! UP/DOWN classification of request outcomes

use crate::executor::Outcome;
use std::ops::Range;
use std::time::Duration;

/// Responses at or above this latency count as DOWN
pub const LATENCY_THRESHOLD: Duration = Duration::from_millis(500);

/// Status codes that count as a successful response
pub const SUCCESS_STATUS: Range<u16> = 200..300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Health {
    Up,
    Down,
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Health::Up => write!(f, "UP"),
            Health::Down => write!(f, "DOWN"),
        }
    }
}

impl Health {
    pub fn is_up(self) -> bool {
        self == Health::Up
    }
}

pub fn classify(outcome: &Outcome) -> Health {
    match outcome {
        Outcome::Responded { status, elapsed }
            if SUCCESS_STATUS.contains(status) && *elapsed < LATENCY_THRESHOLD =>
        {
            Health::Up
        }
        _ => Health::Down,
    }
}
