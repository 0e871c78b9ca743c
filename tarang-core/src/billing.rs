use serde::{Deserialize, Serialize};

/// Flat tax applied to every booking subtotal.
pub const TAX_RATE: f64 = 0.18;

/// Billing breakdown shown on the wizard's review step and used for the
/// default total of a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BillingQuote {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Compute the quote for a per-person price and traveler count. Each figure
/// is rounded to two decimals independently.
pub fn quote(price_per_person: f64, travelers: u32) -> BillingQuote {
    let subtotal = round2(price_per_person * travelers as f64);
    let tax = round2(subtotal * TAX_RATE);
    let total = round2(subtotal + tax);

    BillingQuote { subtotal, tax, total }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_reference_figures() {
        // price=1000, travelers=3 -> subtotal=3000, tax=540, total=3540
        let q = quote(1000.0, 3);
        assert_eq!(q.subtotal, 3000.0);
        assert_eq!(q.tax, 540.0);
        assert_eq!(q.total, 3540.0);
    }

    #[test]
    fn test_quote_rounds_to_cents() {
        let q = quote(33.33, 3);
        assert_eq!(q.subtotal, 99.99);
        assert_eq!(q.tax, 18.0);
        assert_eq!(q.total, 117.99);
    }

    #[test]
    fn test_single_traveler() {
        let q = quote(2500.0, 1);
        assert_eq!(q.subtotal, 2500.0);
        assert_eq!(q.total, 2950.0);
    }
}
