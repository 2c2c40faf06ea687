//! Product-wise coupons: a percentage off one product's line.

use crate::cart::Cart;
use crate::coupon::ProductWiseParams;
use crate::money::Money;

/// Some single line of the product reaches `min_quantity`. Lines of the same
/// product are not summed.
pub fn is_applicable(params: &ProductWiseParams, cart: &Cart) -> bool {
    cart.items
        .iter()
        .any(|item| item.product_id == params.product_id && item.quantity >= params.min_quantity)
}

/// Index of the line the discount lands on: the first one carrying the
/// product, in cart order.
fn target_line(params: &ProductWiseParams, cart: &Cart) -> Option<usize> {
    cart.items
        .iter()
        .position(|item| item.product_id == params.product_id)
}

/// `line_total × rate` on the target line, rounded to the cent, then capped.
pub fn calculate_discount(params: &ProductWiseParams, cart: &Cart) -> Money {
    if !is_applicable(params, cart) {
        return Money::zero();
    }

    let Some(index) = target_line(params, cart) else {
        return Money::zero();
    };

    let discount = cart.items[index]
        .line_total()
        .percentage(params.discount_percent);
    match params.max_discount() {
        Some(cap) => discount.min(cap),
        None => discount,
    }
}

/// The whole discount goes to the target line; every other line gets zero.
pub fn apply(params: &ProductWiseParams, cart: &Cart) -> (Cart, Money) {
    let discount = calculate_discount(params, cart);
    let target = target_line(params, cart);

    let items = cart
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if Some(index) == target {
                item.with_discount(discount)
            } else {
                item.with_discount(Money::zero())
            }
        })
        .collect();

    (Cart::new(items), discount)
}
