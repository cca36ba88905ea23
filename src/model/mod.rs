//! Pure data structures (DTOs) for the menu. Categories and menu items implement
//! [`OrderedEntity`](ordered_actor::OrderedEntity) in their actor modules.

pub mod category;
pub mod menu_item;

pub use category::*;
pub use menu_item::*;
