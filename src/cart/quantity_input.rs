//! Text field for editing a line's quantity.

use super::state::MAX_QUANTITY;

/// Result of a keystroke in the quantity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChange {
    /// The text was refused and stays as it was.
    Rejected,
    /// The field is empty for now; the quantity is unchanged.
    Cleared,
    /// The text holds a new valid quantity to apply to the line.
    Quantity(u32),
}

/// Keeps the visible text and the last valid quantity apart, so a half-typed value never
/// reaches the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityInput {
    text: String,
    quantity: u32,
}

impl QuantityInput {
    pub fn new(quantity: u32) -> Self {
        Self {
            text: quantity.to_string(),
            quantity,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Follows a quantity changed elsewhere (buttons, another view of the cart).
    pub fn sync(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.text = quantity.to_string();
    }

    pub fn input(&mut self, value: &str) -> InputChange {
        if value.is_empty() {
            self.text.clear();
            return InputChange::Cleared;
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return InputChange::Rejected;
        }
        match value.parse::<u32>() {
            Ok(n) if (1..=MAX_QUANTITY).contains(&n) => {
                self.text = value.to_string();
                self.quantity = n;
                InputChange::Quantity(n)
            }
            _ => InputChange::Rejected,
        }
    }

    /// Restores the last valid quantity if the field was left empty or below 1.
    pub fn blur(&mut self) {
        let below_one = self.text.parse::<u32>().map(|n| n < 1).unwrap_or(false);
        if self.text.is_empty() || below_one {
            self.text = self.quantity.to_string();
        }
    }

    /// One more, unless already at `MAX_QUANTITY`.
    pub fn increment(&mut self) -> Option<u32> {
        self.step(self.quantity.checked_add(1).filter(|q| *q <= MAX_QUANTITY))
    }

    /// One fewer, unless already at 1. Removing a line is a separate action.
    pub fn decrement(&mut self) -> Option<u32> {
        self.step(self.quantity.checked_sub(1).filter(|q| *q >= 1))
    }

    fn step(&mut self, next: Option<u32>) -> Option<u32> {
        let next = next?;
        self.sync(next);
        Some(next)
    }
}
