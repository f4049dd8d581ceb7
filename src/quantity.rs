//! Quantity Bounds
//!
//! Cart quantities live in `[1, max]`, where `max` comes from the server-rendered
//! input. Every change is resolved here before a request goes out.

/// Current state of a quantity input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityInput {
    pub value: u32,
    pub max: u32,
}

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increase,
    Decrease,
    /// Typed value, possibly out of range
    Set(i64),
}

impl QuantityInput {
    pub fn new(value: u32, max: u32) -> Self {
        Self { value, max }
    }

    /// Upper bound, never below one
    pub fn ceiling(&self) -> u32 {
        self.max.max(1)
    }

    /// Quantity to send, or `None` when the change is a no-op at a bound
    pub fn resolve(&self, change: QuantityChange) -> Option<u32> {
        match change {
            QuantityChange::Increase if self.value < self.ceiling() => Some(self.value + 1),
            QuantityChange::Increase => None,
            QuantityChange::Decrease if self.value > 1 => Some((self.value - 1).min(self.ceiling())),
            QuantityChange::Decrease => None,
            QuantityChange::Set(requested) => Some(clamp(requested, self.ceiling())),
        }
    }
}

/// Clamp into `[1, max]`
pub fn clamp(requested: i64, max: u32) -> u32 {
    let max = i64::from(max.max(1));
    requested.clamp(1, max) as u32
}

/// Parse a typed quantity; anything non-numeric counts as the minimum
pub fn parse_requested(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(1)
}
