pub mod menu;
pub mod quote;

pub use menu::{Caterer, CatererMenu, MenuCategory, MenuItem, MenuSection};
pub use quote::{
    DiscountTier, OrderConfig, PriceBreakdown, SurchargeItem, SurchargeSelection,
};
