use serde::{Deserialize, Serialize};

/// The ten catalog categories a menu can belong to.
///
/// Serialized in SCREAMING_SNAKE_CASE to stay wire-compatible with existing
/// catalog exports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuCategory {
    SmallQtyRefreshment,
    SmallQtyBuffet,
    PackedMeals,
    TeaReception,
    Buffet1,
    Buffet2,
    BbqBuffet,
    ThemeBuffet,
    EthnicFoodMalay,
    EthnicFoodIndian,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 10] = [
        MenuCategory::SmallQtyRefreshment,
        MenuCategory::SmallQtyBuffet,
        MenuCategory::PackedMeals,
        MenuCategory::TeaReception,
        MenuCategory::Buffet1,
        MenuCategory::Buffet2,
        MenuCategory::BbqBuffet,
        MenuCategory::ThemeBuffet,
        MenuCategory::EthnicFoodMalay,
        MenuCategory::EthnicFoodIndian,
    ];

    /// Human-readable label, used in prompts and display output.
    pub fn label(&self) -> &'static str {
        match self {
            MenuCategory::SmallQtyRefreshment => "Small Quantity Refreshments",
            MenuCategory::SmallQtyBuffet => "Small Quantity Buffet",
            MenuCategory::PackedMeals => "Packed Meals",
            MenuCategory::TeaReception => "Tea Reception",
            MenuCategory::Buffet1 => "Buffet 1",
            MenuCategory::Buffet2 => "Buffet 2",
            MenuCategory::BbqBuffet => "BBQ Buffet",
            MenuCategory::ThemeBuffet => "Theme Buffet",
            MenuCategory::EthnicFoodMalay => "Ethnic Food Malay",
            MenuCategory::EthnicFoodIndian => "Ethnic Food Indian",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub name: String,
    pub order: u32,
    pub vegetarian: bool,
    pub fried: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuSection {
    pub title: String,
    pub description: String,
    /// How many items the customer may pick from this section.
    pub selection_limit: usize,
    pub order: u32,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatererMenu {
    pub code: String,
    pub category: MenuCategory,
    pub price_per_person: f64,
    /// Pax floor for ordering; delivery is free at or above it.
    pub minimum_order: u32,
    pub max_fried_items: u32,
    pub notes: Option<String>,
    /// Delivery areas this menu cannot serve (by area name).
    pub restricted_areas: Vec<String>,
    pub sections: Vec<MenuSection>,
}

impl CatererMenu {
    pub fn has_vegetarian(&self) -> bool {
        self.sections
            .iter()
            .any(|s| s.items.iter().any(|i| i.vegetarian))
    }

    /// Check a set of per-section item selections against this menu.
    ///
    /// `selections` pairs each section title with the chosen item names.
    /// A selection is complete when no section exceeds its limit, every
    /// chosen item exists, and the fried-item cap is respected. Sections
    /// with fewer picks than the limit are still complete — the limit is a
    /// maximum, not a quota (same as the original booking flow).
    pub fn selection_complete(&self, selections: &[(String, Vec<String>)]) -> bool {
        let mut fried = 0u32;
        for (title, chosen) in selections {
            let section = match self.sections.iter().find(|s| &s.title == title) {
                Some(s) => s,
                None => return false,
            };
            if chosen.len() > section.selection_limit {
                return false;
            }
            for name in chosen {
                match section.items.iter().find(|i| &i.name == name) {
                    Some(item) if item.fried => fried += 1,
                    Some(_) => {}
                    None => return false,
                }
            }
        }
        self.max_fried_items == 0 || fried <= self.max_fried_items
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Caterer {
    pub id: String,
    pub name: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub menus: Vec<CatererMenu>,
}

impl Caterer {
    pub fn menu_by_code(&self, code: &str) -> Option<&CatererMenu> {
        self.menus.iter().find(|m| m.code == code)
    }
}
