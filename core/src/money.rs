// core/src/money.rs

//! Money helpers. Amounts travel as `f64` but every sum is taken in whole cents
//! so that `2 × 29.99` is `59.98` and not `59.980000000000004`.

/// Converts an amount to whole cents, rounding half away from zero.
pub fn to_cents(amount: f64) -> i64 {
  (amount * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
  cents as f64 / 100.0
}

/// `unit_price × quantity` in cents.
pub fn line_total_cents(unit_price: f64, quantity: i32) -> i64 {
  to_cents(unit_price) * i64::from(quantity)
}

/// Tax on `subtotal_cents` at `rate`, rounded to the nearest cent.
pub fn tax_cents(subtotal_cents: i64, rate: f64) -> i64 {
  (subtotal_cents as f64 * rate).round() as i64
}
