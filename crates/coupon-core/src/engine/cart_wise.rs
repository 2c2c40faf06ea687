//! Cart-wise coupons: a percentage of the whole cart once it reaches a threshold.

use crate::cart::Cart;
use crate::coupon::CartWiseParams;
use crate::money::Money;

/// The cart total reaches the threshold. An empty cart totals zero and so
/// never qualifies for a positive threshold.
pub fn is_applicable(params: &CartWiseParams, cart: &Cart) -> bool {
    cart.total() >= params.threshold()
}

/// `cart_total × rate`, rounded to the cent, then capped.
pub fn calculate_discount(params: &CartWiseParams, cart: &Cart) -> Money {
    if !is_applicable(params, cart) {
        return Money::zero();
    }

    let discount = cart.total().percentage(params.discount_percent);
    match params.max_discount() {
        Some(cap) => discount.min(cap),
        None => discount,
    }
}

/// Spreads the discount over every line in proportion to its share of the
/// cart total. Each share is rounded on its own, so the lines can differ from
/// the cart-wide figure by up to a cent per line.
pub fn apply(params: &CartWiseParams, cart: &Cart) -> (Cart, Money) {
    let discount = calculate_discount(params, cart);
    let total = cart.total();

    let items = cart
        .items
        .iter()
        .map(|item| item.with_discount(item.line_total().proportional_share(discount, total)))
        .collect();

    (Cart::new(items), discount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::coupon::DiscountRate;

    fn params(threshold_cents: i64, bps: u32, max_discount_cents: Option<i64>) -> CartWiseParams {
        CartWiseParams {
            threshold_cents,
            discount_percent: DiscountRate::from_bps(bps),
            max_discount_cents,
        }
    }

    fn cart_235() -> Cart {
        Cart::new(vec![
            CartItem::new(1, 3, 5000),
            CartItem::new(2, 2, 3000),
            CartItem::new(3, 1, 2500),
        ])
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let cart = Cart::new(vec![CartItem::new(1, 2, 5000)]);
        assert!(is_applicable(&params(10000, 1000, None), &cart));
        assert!(!is_applicable(&params(10001, 1000, None), &cart));
    }

    #[test]
    fn test_empty_cart_never_qualifies() {
        assert!(!is_applicable(&params(1, 1000, None), &Cart::default()));
        assert!(calculate_discount(&params(1, 1000, None), &Cart::default()).is_zero());
    }

    #[test]
    fn test_discount_below_threshold_is_zero() {
        let cart = Cart::new(vec![CartItem::new(1, 1, 5000)]);
        assert!(calculate_discount(&params(100000, 1000, None), &cart).is_zero());
    }

    #[test]
    fn test_discount_capped() {
        // 20% of $205.00 is $41.00, capped at $15.00
        let cart = Cart::new(vec![
            CartItem::new(1, 2, 5000),
            CartItem::new(2, 1, 3000),
            CartItem::new(3, 3, 2500),
        ]);
        let discount = calculate_discount(&params(10000, 2000, Some(1500)), &cart);
        assert_eq!(discount.cents(), 1500);

        let uncapped = calculate_discount(&params(10000, 2000, None), &cart);
        assert_eq!(uncapped.cents(), 4100);
    }

    #[test]
    fn test_apply_distributes_proportionally() {
        let (updated, discount) = apply(&params(10000, 1000, None), &cart_235());

        assert_eq!(discount.cents(), 2350);
        let per_line: Vec<i64> = updated.items.iter().map(|i| i.total_discount_cents).collect();
        assert_eq!(per_line, vec![1500, 600, 250]);
        assert_eq!(updated.totals().final_price_cents, 21150);
    }

    #[test]
    fn test_apply_with_zero_total_assigns_nothing() {
        let cart = Cart::new(vec![CartItem::new(1, 1, 0), CartItem::new(2, 4, 0)]);
        let (updated, discount) = apply(&params(0, 5000, None), &cart);

        assert!(discount.is_zero());
        assert!(updated.items.iter().all(|i| i.total_discount_cents == 0));
    }
}
