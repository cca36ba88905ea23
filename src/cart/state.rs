//! Cart state and its pure transition function.

use crate::model::MenuItemRef;
use serde::{Deserialize, Serialize};

/// Upper bound for the quantity of any single line.
pub const MAX_QUANTITY: u32 = 999;

/// Clamps a requested amount into `0..=MAX_QUANTITY`.
fn clamp(quantity: i64) -> u32 {
    quantity.clamp(0, MAX_QUANTITY as i64) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "menuItem")]
    pub item: MenuItemRef,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.item.price * self.quantity as f64
    }
}

/// Lines in insertion order plus the drawer visibility.
///
/// Holds at most one line per item id, each with a quantity in `1..=MAX_QUANTITY`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub lines: Vec<CartLine>,
    pub open: bool,
}

impl CartState {
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.line(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.item.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// One more of `item`, or a new line with quantity 1.
    AddItem(MenuItemRef),
    AddItemWithQuantity { item: MenuItemRef, quantity: i64 },
    RemoveItem(String),
    /// A quantity of zero or less removes the line.
    SetQuantity { id: String, quantity: i64 },
    Clear,
    Toggle,
    SetOpen(bool),
    /// Replaces the lines, e.g. from storage. The lines are normalized first.
    Load(Vec<CartLine>),
}

impl CartAction {
    /// Whether applying this action can change the line list and must be persisted.
    pub fn touches_lines(&self) -> bool {
        !matches!(
            self,
            CartAction::Toggle | CartAction::SetOpen(_) | CartAction::Load(_)
        )
    }
}

/// Applies `action` to `state`.
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem(item) => add(&mut state, item, 1),
        CartAction::AddItemWithQuantity { item, quantity } => {
            add(&mut state, item, clamp(quantity))
        }
        CartAction::RemoveItem(id) => state.lines.retain(|line| line.item.id != id),
        CartAction::SetQuantity { id, quantity } => {
            if quantity <= 0 {
                state.lines.retain(|line| line.item.id != id);
            } else if let Some(index) = state.position(&id) {
                state.lines[index].quantity = clamp(quantity);
            }
        }
        CartAction::Clear => state.lines.clear(),
        CartAction::Toggle => state.open = !state.open,
        CartAction::SetOpen(open) => state.open = open,
        CartAction::Load(lines) => state.lines = normalize(lines),
    }
    state
}

fn add(state: &mut CartState, item: MenuItemRef, amount: u32) {
    match state.position(&item.id) {
        Some(index) => {
            let line = &mut state.lines[index];
            line.quantity = (line.quantity + amount).min(MAX_QUANTITY);
        }
        // a zero amount must not leave a zero-quantity line behind
        None if amount > 0 => state.lines.push(CartLine {
            item,
            quantity: amount,
        }),
        None => {}
    }
}

/// Restores the line invariants on untrusted input: drops empty lines, clamps quantities
/// and merges repeated ids into their first line.
pub fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut state = CartState::default();
    for line in lines {
        add(&mut state, line.item, line.quantity.min(MAX_QUANTITY));
    }
    state.lines
}
