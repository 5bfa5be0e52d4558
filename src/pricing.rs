use crate::models::{DiscountTier, OrderConfig, PriceBreakdown, SurchargeItem};
use thiserror::Error;

/// Flat surcharge for CBD deliveries passing through ERP gantries.
pub const CBD_SURCHARGE: f64 = 35.0;
/// Flat surcharge for deliveries between 12am and 6am.
pub const ODD_HOURS_SURCHARGE: f64 = 30.0;
/// Per-floor surcharge when the delivery address has no lift access.
pub const LIFT_SURCHARGE_PER_FLOOR: f64 = 25.0;
/// Base delivery fee charged below the free-delivery pax threshold.
pub const DEFAULT_BASE_DELIVERY_FEE: f64 = 20.0;
/// Platform fee applied after discounts, on subtotal + delivery.
pub const ADMIN_FEE_RATE: f64 = 0.015;

/// A quote input the engine refuses to compute with.
///
/// Negative and non-finite amounts are rejected here rather than allowed to
/// flow through into the breakdown; clamping pax to order minimums is still
/// the caller's job.
#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
}

fn check_amount(field: &'static str, value: f64) -> Result<(), QuoteError> {
    if !value.is_finite() {
        return Err(QuoteError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(QuoteError::Negative { field });
    }
    Ok(())
}

/// Compute the full price breakdown for an order.
///
/// Pure and deterministic: no I/O, no hidden state, identical input yields
/// identical output. Intermediate values are never rounded; round to 2
/// decimal places at display time only.
///
/// Order of operations:
///   1. subtotal = price_per_person * pax_count
///   2. base delivery: free at or above the free-delivery threshold
///   3. surcharges, fixed order: CBD, odd hours, no lift access
///   4. total delivery = base + surcharges
///   5. order value = subtotal + total delivery
///   6. discount tier from order value (half-open intervals)
///   7. discount applied to subtotal and delivery separately
///   8. admin fee = 1.5% of the discounted subtotal + delivery
///   9. total = discounted subtotal + discounted delivery + admin fee
pub fn compute_breakdown(config: &OrderConfig) -> Result<PriceBreakdown, QuoteError> {
    check_amount("price_per_person", config.price_per_person)?;
    check_amount("base_delivery_fee", config.base_delivery_fee)?;

    let subtotal = config.price_per_person * config.pax_count as f64;

    let base_delivery = if config.pax_count >= config.free_delivery_minimum {
        0.0
    } else {
        config.base_delivery_fee
    };

    let mut surcharge_items: Vec<SurchargeItem> = Vec::new();
    if config.surcharges.cbd {
        surcharge_items.push(SurchargeItem {
            label: "CBD Surcharge".to_string(),
            amount: CBD_SURCHARGE,
        });
    }
    if config.surcharges.odd_hours {
        surcharge_items.push(SurchargeItem {
            label: "Odd Hours Surcharge".to_string(),
            amount: ODD_HOURS_SURCHARGE,
        });
    }
    if config.surcharges.no_lift_access {
        let floors = config.surcharges.floor_count;
        surcharge_items.push(SurchargeItem {
            label: format!(
                "Lift Surcharge ({} floor{})",
                floors,
                if floors > 1 { "s" } else { "" }
            ),
            amount: LIFT_SURCHARGE_PER_FLOOR * floors as f64,
        });
    }

    let total_delivery: f64 =
        base_delivery + surcharge_items.iter().map(|s| s.amount).sum::<f64>();

    let order_value = subtotal + total_delivery;
    let discount_tier = DiscountTier::from_order_value(order_value);
    let discount_rate = discount_tier.rate();
    let discount_amount = order_value * discount_rate;

    let discounted_subtotal = subtotal * (1.0 - discount_rate);
    let discounted_delivery = total_delivery * (1.0 - discount_rate);
    let admin_fee = (discounted_subtotal + discounted_delivery) * ADMIN_FEE_RATE;
    let total = discounted_subtotal + discounted_delivery + admin_fee;

    Ok(PriceBreakdown {
        subtotal,
        base_delivery,
        surcharge_items,
        total_delivery,
        order_value,
        discount_tier,
        discount_rate,
        discount_amount,
        discounted_subtotal,
        discounted_delivery,
        admin_fee,
        total,
    })
}
