use crate::models::{Caterer, CatererMenu, MenuCategory};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};

/// The full caterer directory, loaded from a JSON catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub caterers: Vec<Caterer>,
}

impl Catalog {
    pub fn load(path: &str) -> Result<Catalog> {
        let file =
            File::open(path).map_err(|e| anyhow!("Failed to open catalog file {}: {}", path, e))?;
        let reader = BufReader::new(file);
        let catalog = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Failed to parse catalog file {}: {}", path, e))?;
        Ok(catalog)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| anyhow!("Failed to create catalog file {}: {}", path, e))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| anyhow!("Failed to write catalog to {}: {}", path, e))?;
        Ok(())
    }

    pub fn caterer_by_id(&self, id: &str) -> Option<&Caterer> {
        self.caterers.iter().find(|c| c.id == id)
    }

    /// Find a menu by code anywhere in the catalog, with its caterer.
    pub fn menu_by_code(&self, code: &str) -> Option<(&Caterer, &CatererMenu)> {
        self.caterers.iter().find_map(|c| {
            c.menus
                .iter()
                .find(|m| m.code == code)
                .map(|m| (c, m))
        })
    }

    /// Caterers sorted by name, as the directory lists them.
    pub fn caterers_by_name(&self) -> Vec<&Caterer> {
        let mut sorted: Vec<&Caterer> = self.caterers.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    /// Flatten the catalog into (caterer, menu) pairs for listing.
    pub fn vendor_menu_pairs(&self) -> Vec<(&Caterer, &CatererMenu)> {
        self.caterers
            .iter()
            .flat_map(|c| c.menus.iter().map(move |m| (c, m)))
            .collect()
    }

    /// Every restricted delivery area named by any menu, deduplicated and
    /// sorted.
    pub fn all_restricted_areas(&self) -> Vec<String> {
        let areas: BTreeSet<String> = self
            .caterers
            .iter()
            .flat_map(|c| c.menus.iter())
            .flat_map(|m| m.restricted_areas.iter().cloned())
            .collect();
        areas.into_iter().collect()
    }

    /// Apply a directory filter, returning matching (caterer, menu) pairs.
    pub fn filter<'a>(&'a self, filter: &MenuFilter) -> Vec<(&'a Caterer, &'a CatererMenu)> {
        self.vendor_menu_pairs()
            .into_iter()
            .filter(|(caterer, menu)| filter.matches(caterer, menu))
            .collect()
    }
}

/// Directory filtering, mirroring the menu browse page: category
/// membership, price-per-pax budget range, vendor name search, and
/// delivery-location exclusion. An empty filter matches every menu.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    /// Keep only menus in one of these categories; empty = all categories.
    pub categories: Vec<MenuCategory>,
    pub min_price_per_pax: Option<f64>,
    pub max_price_per_pax: Option<f64>,
    /// Case-insensitive substring match on the vendor name.
    pub vendor_search: Option<String>,
    /// Delivery areas the order needs; a menu is excluded when any of
    /// these appears in its restricted list.
    pub delivery_areas: Vec<String>,
}

impl MenuFilter {
    pub fn matches(&self, caterer: &Caterer, menu: &CatererMenu) -> bool {
        let matches_category =
            self.categories.is_empty() || self.categories.contains(&menu.category);

        let matches_budget = self
            .min_price_per_pax
            .map_or(true, |min| menu.price_per_person >= min)
            && self
                .max_price_per_pax
                .map_or(true, |max| menu.price_per_person <= max);

        let matches_search = match &self.vendor_search {
            Some(q) if !q.trim().is_empty() => caterer
                .name
                .to_lowercase()
                .contains(&q.trim().to_lowercase()),
            _ => true,
        };

        let matches_location = self
            .delivery_areas
            .iter()
            .all(|area| !menu.restricted_areas.contains(area));

        matches_category && matches_budget && matches_search && matches_location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(code: &str, category: MenuCategory, price: f64, restricted: &[&str]) -> CatererMenu {
        CatererMenu {
            code: code.to_string(),
            category,
            price_per_person: price,
            minimum_order: 20,
            max_fried_items: 0,
            notes: None,
            restricted_areas: restricted.iter().map(|s| s.to_string()).collect(),
            sections: vec![],
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            caterers: vec![
                Caterer {
                    id: "c1".to_string(),
                    name: "Chilli Api Catering".to_string(),
                    telephone: None,
                    email: None,
                    menus: vec![
                        menu(
                            "CHILLI_API_101",
                            MenuCategory::SmallQtyRefreshment,
                            5.0,
                            &["All except West"],
                        ),
                        menu("CHILLI_API_201", MenuCategory::Buffet1, 18.0, &[]),
                    ],
                },
                Caterer {
                    id: "c2".to_string(),
                    name: "Continental Delight Catering Services".to_string(),
                    telephone: None,
                    email: None,
                    menus: vec![menu(
                        "CONTINENTAL_301",
                        MenuCategory::TeaReception,
                        12.0,
                        &["Sentosa", "Jurong Island"],
                    )],
                },
            ],
        }
    }

    #[test]
    fn test_menu_by_code() {
        let cat = catalog();
        let (caterer, menu) = cat.menu_by_code("CONTINENTAL_301").unwrap();
        assert_eq!(caterer.id, "c2");
        assert_eq!(menu.price_per_person, 12.0);
        assert!(cat.menu_by_code("NOPE").is_none());
    }

    #[test]
    fn test_caterers_by_name_sorted() {
        let mut cat = catalog();
        cat.caterers.reverse();
        let names: Vec<&str> = cat.caterers_by_name().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Chilli Api Catering",
                "Continental Delight Catering Services"
            ]
        );
    }

    #[test]
    fn test_all_restricted_areas_deduped() {
        let mut cat = catalog();
        cat.caterers[0].menus[1]
            .restricted_areas
            .push("Sentosa".to_string());
        let areas = cat.all_restricted_areas();
        assert_eq!(
            areas,
            vec!["All except West", "Jurong Island", "Sentosa"],
            "areas should be deduplicated and sorted"
        );
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let cat = catalog();
        assert_eq!(cat.filter(&MenuFilter::default()).len(), 3);
    }

    #[test]
    fn test_filter_by_category() {
        let cat = catalog();
        let filter = MenuFilter {
            categories: vec![MenuCategory::Buffet1, MenuCategory::TeaReception],
            ..Default::default()
        };
        let codes: Vec<&str> = cat
            .filter(&filter)
            .iter()
            .map(|(_, m)| m.code.as_str())
            .collect();
        assert_eq!(codes, vec!["CHILLI_API_201", "CONTINENTAL_301"]);
    }

    #[test]
    fn test_filter_by_budget_range() {
        let cat = catalog();
        let filter = MenuFilter {
            min_price_per_pax: Some(10.0),
            max_price_per_pax: Some(15.0),
            ..Default::default()
        };
        let codes: Vec<&str> = cat
            .filter(&filter)
            .iter()
            .map(|(_, m)| m.code.as_str())
            .collect();
        assert_eq!(codes, vec!["CONTINENTAL_301"]);
    }

    #[test]
    fn test_filter_by_vendor_search_case_insensitive() {
        let cat = catalog();
        let filter = MenuFilter {
            vendor_search: Some("chilli".to_string()),
            ..Default::default()
        };
        assert_eq!(cat.filter(&filter).len(), 2);

        let blank = MenuFilter {
            vendor_search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(cat.filter(&blank).len(), 3, "blank search matches all");
    }

    #[test]
    fn test_filter_excludes_restricted_locations() {
        let cat = catalog();
        let filter = MenuFilter {
            delivery_areas: vec!["Sentosa".to_string()],
            ..Default::default()
        };
        let codes: Vec<&str> = cat
            .filter(&filter)
            .iter()
            .map(|(_, m)| m.code.as_str())
            .collect();
        assert_eq!(
            codes,
            vec!["CHILLI_API_101", "CHILLI_API_201"],
            "menus restricted in a required area are dropped"
        );
    }
}
