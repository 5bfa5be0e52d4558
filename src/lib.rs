//! # cater-compare-rs
//!
//! A Rust library for browsing caterer menus, computing order quotes and
//! comparing vendor packages side by side, with AI-assisted menu
//! recommendations via the Gemini API.
//!
//! ## Pricing rules
//!
//! | Charge | Rule |
//! |--------|------|
//! | Base delivery | $20, waived at or above the menu minimum order |
//! | CBD surcharge | flat $35 |
//! | Odd hours surcharge | flat $30 |
//! | No lift access | $25 per floor |
//! | Admin fee | 1.5% of the post-discount subtotal + delivery |
//!
//! Discounts are tiered over total order value (subtotal + delivery),
//! half-open intervals: below $500 → 0%, $500–$2,000 → 5%,
//! $2,000–$4,000 → 10%, $4,000 and up → 15%.
//!
//! ## Quick Start
//!
//! ```rust
//! use cater_compare_rs::{compute_breakdown, OrderConfig, SurchargeSelection};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OrderConfig {
//!         price_per_person: 10.0,
//!         pax_count: 250,
//!         minimum_order: 20,
//!         free_delivery_minimum: 30,
//!         base_delivery_fee: 20.0,
//!         surcharges: SurchargeSelection {
//!             cbd: true,
//!             ..SurchargeSelection::none()
//!         },
//!     };
//!
//!     let breakdown = compute_breakdown(&config)?;
//!     println!(
//!         "order value {} -> total {}",
//!         breakdown.order_value,
//!         breakdown.total
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! The library includes a binary for convenient CLI usage:
//!
//! ```bash
//! # Export a standard quote for every menu in the catalog
//! cargo run --release
//!
//! # Quote one menu for 25 pax with CBD and 3-floor lift surcharges
//! cargo run --release -- quote CHILLI_API_101 25 cbd no-lift 3
//!
//! # Compare menus side by side at 30 pax
//! cargo run --release -- compare 30 CHILLI_API_101 CONTINENTAL_301
//!
//! # Ask for recommendations (requires GEMINI_API_KEY)
//! cargo run --release -- advise --budget 12 --pax 30 something light for a meeting
//! ```

pub mod advisor;
pub mod catalog;
pub mod comparison;
pub mod models;
pub mod pricing;
pub mod utils;

pub use advisor::gemini::GeminiApi;
pub use advisor::{
    advise, AdvisorCriteria, AdvisorReply, ChatRole, ChatTurn, MenuSuggestion, TextGenerator,
};
pub use catalog::{Catalog, MenuFilter};
pub use comparison::{ComparisonBoard, MAX_COMPARISON_ITEMS};
pub use models::{
    Caterer, CatererMenu, DiscountTier, MenuCategory, OrderConfig, PriceBreakdown,
    SurchargeItem, SurchargeSelection,
};
pub use pricing::{compute_breakdown, QuoteError};
