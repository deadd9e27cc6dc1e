use api_client::models::QuoteDetail;

/// Derived line value. Non-finite inputs count as zero, mirroring how the
/// form treated unparsable numbers.
pub fn item_value(rate: f64, quantity: f64) -> f64 {
    let rate = if rate.is_finite() { rate } else { 0.0 };
    let quantity = if quantity.is_finite() { quantity } else { 0.0 };
    rate * quantity
}

pub fn total_quantity(items: &[QuoteDetail]) -> f64 {
    items
        .iter()
        .map(|item| {
            if item.item_quantity.is_finite() {
                item.item_quantity
            } else {
                0.0
            }
        })
        .sum()
}

pub fn total_value(items: &[QuoteDetail]) -> f64 {
    items
        .iter()
        .map(|item| {
            if item.item_value.is_finite() {
                item.item_value
            } else {
                0.0
            }
        })
        .sum()
}
