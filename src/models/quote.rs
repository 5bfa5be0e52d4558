use crate::models::CatererMenu;
use serde::{Deserialize, Serialize};

/// Delivery surcharges selected for an order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SurchargeSelection {
    /// CBD areas which pass through ERP gantries (+$35)
    pub cbd: bool,
    /// Odd hours between 12am and 6am (+$30)
    pub odd_hours: bool,
    /// No lift access (+$25 per floor)
    pub no_lift_access: bool,
    /// Only meaningful when `no_lift_access` is set; ignored otherwise
    pub floor_count: u32,
}

impl SurchargeSelection {
    pub fn none() -> Self {
        Self::default()
    }
}

/// One surcharge line on the quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurchargeItem {
    pub label: String,
    pub amount: f64,
}

/// Discount brackets over total order value (subtotal + delivery).
///
/// Intervals are half-open, first match wins:
///   < 500 → 0%, [500, 2000) → 5%, [2000, 4000) → 10%, >= 4000 → 15%
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountTier {
    Below500,
    From500To2000,
    From2000To4000,
    Above4000,
}

impl DiscountTier {
    pub fn from_order_value(order_value: f64) -> Self {
        if order_value < 500.0 {
            DiscountTier::Below500
        } else if order_value < 2000.0 {
            DiscountTier::From500To2000
        } else if order_value < 4000.0 {
            DiscountTier::From2000To4000
        } else {
            DiscountTier::Above4000
        }
    }

    pub fn rate(&self) -> f64 {
        match self {
            DiscountTier::Below500 => 0.0,
            DiscountTier::From500To2000 => 0.05,
            DiscountTier::From2000To4000 => 0.10,
            DiscountTier::Above4000 => 0.15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiscountTier::Below500 => "Below $500",
            DiscountTier::From500To2000 => "$500 - $2,000",
            DiscountTier::From2000To4000 => "$2,000 - $4,000",
            DiscountTier::Above4000 => "Above $4,000",
        }
    }
}

/// Inputs for one quote calculation.
///
/// Built fresh from the current order state on every recalculation; never
/// cached or persisted. Callers are expected to clamp pax to at least 1
/// (and to the menu minimum where the booking flow requires it) before
/// computing — the engine only computes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfig {
    pub price_per_person: f64,
    pub pax_count: u32,
    /// Pax floor for placing the order at all; callers clamp to it.
    pub minimum_order: u32,
    /// At or above this pax count the base delivery fee is waived.
    pub free_delivery_minimum: u32,
    pub base_delivery_fee: f64,
    pub surcharges: SurchargeSelection,
}

impl OrderConfig {
    /// Build a config for `pax` people on the given menu.
    ///
    /// Matches the booking flow: delivery is free once the menu's minimum
    /// order is met, and the base fee is the standard $20 otherwise.
    pub fn for_menu(menu: &CatererMenu, pax: u32, surcharges: SurchargeSelection) -> Self {
        Self {
            price_per_person: menu.price_per_person,
            pax_count: pax,
            minimum_order: menu.minimum_order,
            free_delivery_minimum: menu.minimum_order,
            base_delivery_fee: crate::pricing::DEFAULT_BASE_DELIVERY_FEE,
            surcharges,
        }
    }
}

/// The computed quote. A derived, immutable value — recomputed on every
/// input change and discarded after display; rounding happens only at
/// display time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    pub subtotal: f64,
    pub base_delivery: f64,
    pub surcharge_items: Vec<SurchargeItem>,
    pub total_delivery: f64,
    /// subtotal + total_delivery — the value the discount tier is based on
    pub order_value: f64,
    pub discount_tier: DiscountTier,
    pub discount_rate: f64,
    pub discount_amount: f64,
    pub discounted_subtotal: f64,
    pub discounted_delivery: f64,
    pub admin_fee: f64,
    pub total: f64,
}
