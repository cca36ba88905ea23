//! # Checkout
//!
//! Pricing and validation for the checkout page. Nothing is charged or stored: a
//! successful [`submit`] returns the confirmation and empties the cart.

use crate::cart::{CartLine, CartState, CartStore, KeyValueStorage};
use crate::config::ShopConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Delivery,
    Pickup,
}

/// Flat delivery fee, waived from a subtotal threshold on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryPolicy {
    pub fee: f64,
    pub free_threshold: f64,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            fee: 3.50,
            free_threshold: 35.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    /// How much more to order for free delivery; 0 when it already applies or for pickup.
    pub amount_until_free_delivery: f64,
}

impl DeliveryPolicy {
    pub fn from_config(config: &ShopConfig) -> Self {
        Self {
            fee: config.delivery_fee,
            free_threshold: config.free_delivery_threshold,
        }
    }

    pub fn quote(&self, cart: &CartState, order_type: OrderType) -> Quote {
        let subtotal = cart.subtotal();
        let short = match order_type {
            OrderType::Delivery => (self.free_threshold - subtotal).max(0.0),
            OrderType::Pickup => 0.0,
        };
        let delivery_fee = if short > 0.0 { self.fee } else { 0.0 };
        Quote {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            amount_until_free_delivery: short,
        }
    }
}

/// Formats an amount as euros, e.g. `€12.50`.
pub fn format_eur(amount: f64) -> String {
    if amount < 0.0 {
        format!("-€{:.2}", -amount)
    } else {
        format!("€{:.2}", amount)
    }
}

/// Dutch postal code: four digits not starting with 0, an optional space, two letters.
pub fn is_valid_postal_code(code: &str) -> bool {
    let chars: Vec<char> = code.trim().chars().collect();
    let (digits, rest) = chars.split_at(chars.len().min(4));
    let letters = match rest {
        [space, letters @ ..] if space.is_whitespace() => letters,
        letters => letters,
    };
    digits.len() == 4
        && digits[0] != '0'
        && digits.iter().all(char::is_ascii_digit)
        && letters.len() == 2
        && letters.iter().all(char::is_ascii_alphabetic)
}

/// Canonical `1234 AB` form. Input that is not six characters once spaces are removed
/// is returned unchanged.
pub fn format_postal_code(code: &str) -> String {
    let cleaned: Vec<char> = code
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    if cleaned.len() == 6 {
        let digits: String = cleaned[..4].iter().collect();
        let letters: String = cleaned[4..].iter().collect();
        format!("{digits} {letters}")
    } else {
        code.to_string()
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.trim().contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("{field}: {message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },
}

/// What the customer fills in on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub order_type: OrderType,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub notes: String,
}

impl CheckoutDetails {
    /// Every problem with the form, in field order.
    pub fn validate(&self) -> Result<(), Vec<CheckoutError>> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field, message| {
            if !ok {
                errors.push(CheckoutError::Invalid { field, message });
            }
        };

        check(
            self.name.trim().chars().count() >= 2,
            "name",
            "Name must be at least 2 characters",
        );
        check(is_valid_email(&self.email), "email", "Please enter a valid email");
        check(
            self.phone.trim().chars().count() >= 10,
            "phone",
            "Please enter a valid phone number",
        );
        if self.order_type == OrderType::Delivery {
            check(
                !self.address.trim().is_empty(),
                "address",
                "Address is required for delivery",
            );
            check(
                is_valid_postal_code(&self.postal_code),
                "postalCode",
                "Please enter a valid Dutch postal code (e.g., 1234 AB)",
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub details: CheckoutDetails,
    pub lines: Vec<CartLine>,
    pub quote: Quote,
}

/// Validates the form against the current cart, then clears the cart.
pub fn submit<S: KeyValueStorage>(
    cart: &mut CartStore<S>,
    mut details: CheckoutDetails,
    policy: &DeliveryPolicy,
) -> Result<OrderConfirmation, Vec<CheckoutError>> {
    if cart.state().is_empty() {
        return Err(vec![CheckoutError::EmptyCart]);
    }
    if let Err(errors) = details.validate() {
        warn!(count = errors.len(), "Checkout form rejected");
        return Err(errors);
    }
    if details.order_type == OrderType::Delivery {
        details.postal_code = format_postal_code(&details.postal_code);
    }

    let quote = policy.quote(cart.state(), details.order_type);
    let lines = cart.lines().to_vec();
    cart.clear();

    info!(
        order_type = ?details.order_type,
        lines = lines.len(),
        total = %format_eur(quote.total),
        "Order submitted"
    );
    Ok(OrderConfirmation {
        details,
        lines,
        quote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, MemoryStorage};
    use crate::model::MenuItemRef;

    fn cart_worth(amount: f64) -> CartState {
        crate::cart::reduce(
            CartState::default(),
            CartAction::AddItem(MenuItemRef::new("x", "Thali", amount)),
        )
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            name: "Priya".into(),
            email: "priya@example.nl".into(),
            phone: "0612345678".into(),
            address: "Kerkstraat 1".into(),
            postal_code: "1017gc".into(),
            city: "Amsterdam".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fee_below_threshold() {
        let quote = DeliveryPolicy::default().quote(&cart_worth(20.0), OrderType::Delivery);
        assert_eq!(quote.delivery_fee, 3.50);
        assert_eq!(quote.total, 23.50);
        assert_eq!(quote.amount_until_free_delivery, 15.0);
    }

    #[test]
    fn test_free_from_threshold_and_for_pickup() {
        let policy = DeliveryPolicy::default();
        let at_threshold = policy.quote(&cart_worth(35.0), OrderType::Delivery);
        assert_eq!(at_threshold.delivery_fee, 0.0);
        assert_eq!(at_threshold.total, 35.0);

        let pickup = policy.quote(&cart_worth(10.0), OrderType::Pickup);
        assert_eq!(pickup.delivery_fee, 0.0);
        assert_eq!(pickup.amount_until_free_delivery, 0.0);
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(12.5), "€12.50");
        assert_eq!(format_eur(0.0), "€0.00");
        assert_eq!(format_eur(-3.5), "-€3.50");
    }

    #[test]
    fn test_postal_codes() {
        for valid in ["1234 AB", "1234ab", " 9999 zz "] {
            assert!(is_valid_postal_code(valid), "{valid}");
        }
        for invalid in ["0123 AB", "123 AB", "1234 A", "1234  AB", "12345AB", "ABCD 12", ""] {
            assert!(!is_valid_postal_code(invalid), "{invalid}");
        }
        assert_eq!(format_postal_code("1234ab"), "1234 AB");
        assert_eq!(format_postal_code("12 34 a b"), "1234 AB");
        assert_eq!(format_postal_code("123"), "123");
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let form = CheckoutDetails {
            name: "P".into(),
            email: "not-an-email".into(),
            postal_code: "0000".into(),
            ..details()
        };
        let fields: Vec<&str> = form
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|e| match e {
                CheckoutError::Invalid { field, .. } => field,
                CheckoutError::EmptyCart => "cart",
            })
            .collect();
        assert_eq!(fields, vec!["name", "email", "postalCode"]);

        let pickup = CheckoutDetails {
            order_type: OrderType::Pickup,
            address: String::new(),
            postal_code: String::new(),
            ..details()
        };
        assert!(pickup.validate().is_ok());
    }

    #[test]
    fn test_submit_clears_cart() {
        let mut cart = CartStore::new(MemoryStorage::new(), "cart");
        assert_eq!(
            submit(&mut cart, details(), &DeliveryPolicy::default()),
            Err(vec![CheckoutError::EmptyCart])
        );

        cart.add_item_with_quantity(MenuItemRef::new("x", "Thali", 12.0), 2);
        let confirmation = submit(&mut cart, details(), &DeliveryPolicy::default()).unwrap();

        assert_eq!(confirmation.details.postal_code, "1017 GC");
        assert_eq!(confirmation.lines.len(), 1);
        assert_eq!(confirmation.quote.total, 27.50);
        assert!(cart.state().is_empty());
    }
}
