//! # Cart Snapshot
//!
//! The cart the engine evaluates coupons against.
//!
//! The engine never owns a cart: callers hand in a snapshot, and the applier
//! hands back a new one whose lines carry freshly computed discounts.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  incoming Cart                         outgoing Cart                    │
//! │  ─────────────                         ─────────────                    │
//! │  product 1 × 3 @ $50  discount ?  ──►  product 1 × 3 @ $50  $15.00      │
//! │  product 2 × 2 @ $30  discount ?  ──►  product 2 × 2 @ $30   $6.00      │
//! │  product 3 × 1 @ $25  discount ?  ──►  product 3 × 1 @ $25   $2.50      │
//! │                                                                         │
//! │  incoming discounts are ignored     totals: $235.00 - $23.50 = $211.50 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::ProductId;
use crate::money::Money;

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub product_id: ProductId,

    pub quantity: i64,

    /// Unit price in cents.
    pub unit_price_cents: i64,

    /// Discount attributed to this line, in cents. Output only.
    #[serde(default)]
    pub total_discount_cents: i64,
}

impl CartItem {
    /// Creates a line with no discount attributed.
    pub fn new(product_id: ProductId, quantity: i64, unit_price_cents: i64) -> Self {
        CartItem {
            product_id,
            quantity,
            unit_price_cents,
            total_discount_cents: 0,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    #[inline]
    pub fn total_discount(&self) -> Money {
        Money::from_cents(self.total_discount_cents)
    }

    /// Copies the line with the given discount attributed to it.
    pub fn with_discount(&self, discount: Money) -> Self {
        CartItem {
            total_discount_cents: discount.cents(),
            ..self.clone()
        }
    }
}

/// A cart snapshot. Line order is preserved but carries no meaning beyond
/// first-match tie-breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every line total, before discounts.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of the discounts attributed to lines.
    pub fn total_discount(&self) -> Money {
        self.items.iter().map(CartItem::total_discount).sum()
    }

    /// First line carrying `product_id`, in cart order.
    pub fn first_line(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Whether any line carries `product_id`.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.first_line(product_id).is_some()
    }

    /// Quantity of the first line carrying `product_id`, 0 if absent.
    pub fn quantity_of(&self, product_id: ProductId) -> i64 {
        self.first_line(product_id).map_or(0, |item| item.quantity)
    }

    /// Copies the cart with every line's discount reset to zero.
    pub fn without_discounts(&self) -> Cart {
        Cart::new(
            self.items
                .iter()
                .map(|item| item.with_discount(Money::zero()))
                .collect(),
        )
    }

    /// Price summary of the cart as it currently stands.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub total_price_cents: i64,
    pub total_discount_cents: i64,
    pub final_price_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let total_price = cart.total();
        let total_discount = cart.total_discount();
        CartTotals {
            total_price_cents: total_price.cents(),
            total_discount_cents: total_discount.cents(),
            final_price_cents: (total_price - total_discount).cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cart() -> Cart {
        Cart::new(vec![
            CartItem::new(1, 3, 5000),
            CartItem::new(2, 2, 3000),
            CartItem::new(3, 1, 2500),
        ])
    }

    #[test]
    fn test_cart_total() {
        assert_eq!(sample_cart().total().cents(), 23500);
        assert!(Cart::default().total().is_zero());
    }

    #[test]
    fn test_oversized_lines_saturate() {
        let cart = Cart::new(vec![
            CartItem::new(1, 2, 9_000_000_000_000_000_000),
            CartItem::new(2, 1, 1),
        ]);
        assert_eq!(cart.items[0].line_total().cents(), i64::MAX);
        assert_eq!(cart.total().cents(), i64::MAX);
        assert!(cart.totals().final_price_cents > 0);
    }

    #[test]
    fn test_quantity_of_uses_first_line() {
        let mut cart = sample_cart();
        cart.items.push(CartItem::new(1, 10, 5000));

        assert_eq!(cart.quantity_of(1), 3);
        assert_eq!(cart.quantity_of(99), 0);
        assert!(cart.contains(2));
        assert!(!cart.contains(99));
    }

    #[test]
    fn test_totals() {
        let mut cart = sample_cart();
        cart.items[0].total_discount_cents = 1500;
        cart.items[1].total_discount_cents = 600;
        cart.items[2].total_discount_cents = 250;

        let totals = cart.totals();
        assert_eq!(totals.total_price_cents, 23500);
        assert_eq!(totals.total_discount_cents, 2350);
        assert_eq!(totals.final_price_cents, 21150);
    }

    #[test]
    fn test_missing_discount_defaults_to_zero() {
        let item: CartItem =
            serde_json::from_str(r#"{"product_id": 1, "quantity": 2, "unit_price_cents": 5000}"#)
                .unwrap();
        assert_eq!(item.total_discount_cents, 0);
        assert_eq!(item.line_total().cents(), 10000);
    }
}
