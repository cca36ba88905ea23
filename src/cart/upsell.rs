//! "You might also like" suggestions for the cart drawer.

use super::state::CartState;
use crate::model::MenuItem;

/// Catalog items on the allow-list that are available and not yet in the cart, in
/// catalog order.
pub fn suggestions<'a>(
    catalog: &'a [MenuItem],
    allow_list: &[String],
    cart: &CartState,
) -> Vec<&'a MenuItem> {
    catalog
        .iter()
        .filter(|item| item.is_available)
        .filter(|item| {
            let id = item.id.to_string();
            allow_list.contains(&id) && !cart.contains(&id)
        })
        .collect()
}
