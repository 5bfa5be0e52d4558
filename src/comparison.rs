use crate::models::{Caterer, CatererMenu, PriceBreakdown, SurchargeSelection};
use crate::pricing::{compute_breakdown, QuoteError};
use anyhow::{anyhow, Result};
use serde::Serialize;

/// Hard cap on how many packages can be compared side by side.
pub const MAX_COMPARISON_ITEMS: usize = 4;

/// One vendor package on the comparison board.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonEntry {
    pub caterer_id: String,
    pub caterer_name: String,
    pub menu: CatererMenu,
}

/// Side-by-side comparison of up to four vendor packages.
///
/// Each (vendor, menu) combination appears at most once; quotes for every
/// entry go through the one canonical pricing engine.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonBoard {
    entries: Vec<ComparisonEntry>,
}

impl ComparisonBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, caterer: &Caterer, menu: &CatererMenu) -> Result<()> {
        if self.entries.len() >= MAX_COMPARISON_ITEMS {
            return Err(anyhow!(
                "comparison is full ({} items max)",
                MAX_COMPARISON_ITEMS
            ));
        }
        let exists = self
            .entries
            .iter()
            .any(|e| e.caterer_id == caterer.id && e.menu.code == menu.code);
        if exists {
            return Err(anyhow!(
                "{} - {} is already in the comparison",
                caterer.name,
                menu.code
            ));
        }
        self.entries.push(ComparisonEntry {
            caterer_id: caterer.id.clone(),
            caterer_name: caterer.name.clone(),
            menu: menu.clone(),
        });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<ComparisonEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Section titles across all compared menus, first-seen order, no
    /// duplicates. These become the comparison table's feature rows.
    pub fn unique_features(&self) -> Vec<String> {
        let mut features: Vec<String> = Vec::new();
        for entry in &self.entries {
            for section in &entry.menu.sections {
                if !features.contains(&section.title) {
                    features.push(section.title.clone());
                }
            }
        }
        features
    }

    /// Quote every entry for the same pax count and surcharge selection.
    pub fn quotes(
        &self,
        pax: u32,
        surcharges: SurchargeSelection,
    ) -> Result<Vec<(String, PriceBreakdown)>, QuoteError> {
        self.entries
            .iter()
            .map(|entry| {
                let config =
                    crate::models::OrderConfig::for_menu(&entry.menu, pax, surcharges);
                compute_breakdown(&config).map(|b| (entry.menu.code.clone(), b))
            })
            .collect()
    }
}
