//! Buy-X-get-Y coupons: free "get" units for every full set of "buy" units.
//!
//! ```text
//! buy  [ {p1, 2}, {p2, 1} ]   required per application = 3
//! get  [ {p3, 1} ]
//! cart p1 × 4, p2 × 2, p3 × 5
//!
//! possible applications = (4 + 2) / 3 = 2
//! free p3 units         = min(5, 1 × 2) = 2
//! ```
//!
//! Eligibility and pricing treat the repetition limit differently: a cart
//! that could use the rule more often than the limit allows is rejected
//! outright, while pricing clamps to the limit.

use crate::cart::Cart;
use crate::coupon::BuyXGetYParams;
use crate::money::Money;

/// Units of buy products in the cart. Each buy entry counts the quantity of
/// the first line carrying its product.
fn total_buy_quantity(params: &BuyXGetYParams, cart: &Cart) -> i64 {
    params
        .buy_products
        .iter()
        .map(|entry| cart.quantity_of(entry.product_id))
        .fold(0i64, i64::saturating_add)
}

/// How many whole times the cart satisfies the buy side, ignoring the limit.
pub fn possible_applications(params: &BuyXGetYParams, cart: &Cart) -> i64 {
    let required = params.required_buy_quantity();
    if required <= 0 {
        return 0;
    }
    total_buy_quantity(params, cart) / required
}

pub fn is_applicable(params: &BuyXGetYParams, cart: &Cart) -> bool {
    let applications = possible_applications(params, cart);
    if applications == 0 || applications > params.repetition_limit {
        return false;
    }

    params
        .get_products
        .iter()
        .any(|entry| cart.contains(entry.product_id))
}

/// Free value granted to each line, indexed like `cart.items`.
///
/// Each get entry draws from the first line carrying its product. A line's
/// units are only handed out once, so two entries naming the same product
/// cannot grant more than the line holds.
fn line_grants(params: &BuyXGetYParams, cart: &Cart) -> Vec<Money> {
    let mut grants = vec![Money::zero(); cart.items.len()];
    if !is_applicable(params, cart) {
        return grants;
    }

    let applications = possible_applications(params, cart).min(params.repetition_limit);
    let mut remaining: Vec<i64> = cart.items.iter().map(|item| item.quantity).collect();

    for entry in &params.get_products {
        let Some(index) = cart
            .items
            .iter()
            .position(|item| item.product_id == entry.product_id)
        else {
            continue;
        };

        let free_units = remaining[index].min(entry.quantity.saturating_mul(applications));
        if free_units <= 0 {
            continue;
        }
        remaining[index] -= free_units;
        grants[index] += cart.items[index].unit_price() * free_units;
    }

    grants
}

/// Sum over get entries of `unit_price × free units`.
pub fn calculate_discount(params: &BuyXGetYParams, cart: &Cart) -> Money {
    line_grants(params, cart).into_iter().sum()
}

/// Each line carries exactly the free value the calculation drew from it.
pub fn apply(params: &BuyXGetYParams, cart: &Cart) -> (Cart, Money) {
    let grants = line_grants(params, cart);
    let discount = grants.iter().sum();

    let items = cart
        .items
        .iter()
        .zip(grants)
        .map(|(item, grant)| item.with_discount(grant))
        .collect();

    (Cart::new(items), discount)
}
