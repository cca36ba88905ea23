//! # Aroma Menu
//!
//! Core of a restaurant ordering site: the catalog administrators curate, the menu and
//! cart customers use, and the glue that keeps user-defined ordering consistent.
//!
//! ## Module Tour
//!
//! ### Catalog ([`category_actor`], [`menu_item_actor`], [`clients`], [`lifecycle`])
//! Categories and menu items each live in an ordered-collection actor from the
//! [`ordered_actor`] crate. The actor is the only source of truth for `display_order`:
//! creates append to the end of their scope and reorders renumber from zero.
//! [`MenuSystem`](lifecycle::MenuSystem) starts both actors and wires the category client
//! into the menu item actor.
//!
//! ### Reordering ([`reorder`])
//! Admin screens move items locally, submit the new id order, and then always refetch.
//! A reorder that failed halfway is shown as the store holds it, never as the optimistic
//! guess.
//!
//! ### Cart ([`cart`])
//! A reducer over [`CartAction`](cart::CartAction)s with persistence into key/value
//! storage. Quantities are clamped to `1..=999` and edits never fail.
//!
//! ### Storefront and Checkout ([`storefront`], [`checkout`])
//! Public menu, featured dishes, upsell suggestions, delivery pricing and the checkout form.
//!
//! ### Configuration ([`config`])
//! [`ShopConfig`](config::ShopConfig), read from the TOML file named by `AROMA_CONFIG`.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod cart;
pub mod category_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod menu_item_actor;
pub mod model;
pub mod reorder;
pub mod storefront;
