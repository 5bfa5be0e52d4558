use crate::catalog::Catalog;
use crate::models::MenuCategory;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod gemini;

/// At most this many menus are fed to the model as context.
pub const SHORTLIST_LIMIT: usize = 20;
/// At most this many suggestions are extracted from a reply.
pub const SUGGESTION_LIMIT: usize = 5;
/// Only the last three exchanges (six messages) are replayed to the model.
pub const HISTORY_LIMIT: usize = 6;

const DEFAULT_PAX: u32 = 20;
const DEFAULT_BUDGET_PER_PAX: f64 = 10.0;

/// What the user asked for, gathered from the advisor form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorCriteria {
    pub budget_per_pax: Option<f64>,
    pub pax: Option<u32>,
    pub cuisine: Option<String>,
    pub dietary_restrictions: Vec<String>,
    pub event_type: Option<String>,
    pub categories: Vec<MenuCategory>,
}

impl AdvisorCriteria {
    pub fn pax(&self) -> u32 {
        self.pax.unwrap_or(DEFAULT_PAX)
    }

    pub fn budget_per_pax(&self) -> f64 {
        self.budget_per_pax.unwrap_or(DEFAULT_BUDGET_PER_PAX)
    }

    /// Budget entered per pax; the filter works on the total.
    pub fn total_budget(&self) -> f64 {
        self.budget_per_pax() * self.pax() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// One menu that survived criteria filtering, flattened for the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistEntry {
    pub caterer_id: String,
    pub caterer_name: String,
    pub menu_code: String,
    pub price_per_person: f64,
    pub minimum_order: u32,
    pub category: MenuCategory,
    pub notes: Option<String>,
    pub has_vegetarian: bool,
}

/// A menu the model recommended, matched back against the shortlist.
#[derive(Debug, Clone, Serialize)]
pub struct MenuSuggestion {
    pub caterer_id: String,
    pub caterer_name: String,
    pub menu_code: String,
    pub price_per_person: f64,
    pub estimated_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvisorReply {
    pub text: String,
    pub suggestions: Vec<MenuSuggestion>,
}

/// Seam to the external text-generation service. The service is opaque:
/// prompt in, plain text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Filter the catalog down to menus worth recommending.
///
/// A menu qualifies when its minimum order fits the pax count, the
/// estimated total stays within budget, and the category / vegetarian /
/// cuisine requirements hold. Results are sorted by price per person and
/// capped at [`SHORTLIST_LIMIT`].
pub fn shortlist(catalog: &Catalog, criteria: &AdvisorCriteria) -> Vec<ShortlistEntry> {
    let pax = criteria.pax();
    let budget = criteria.total_budget();
    let wants_vegetarian = criteria
        .dietary_restrictions
        .iter()
        .any(|d| d.eq_ignore_ascii_case("vegetarian"));
    let cuisine = criteria
        .cuisine
        .as_deref()
        .map(str::to_lowercase)
        .filter(|c| !c.is_empty());

    let mut entries: Vec<ShortlistEntry> = catalog
        .vendor_menu_pairs()
        .into_iter()
        .filter(|(_, menu)| menu.minimum_order <= pax)
        .filter(|(_, menu)| menu.price_per_person * pax as f64 <= budget)
        .filter(|(_, menu)| {
            criteria.categories.is_empty() || criteria.categories.contains(&menu.category)
        })
        .filter(|(_, menu)| !wants_vegetarian || menu.has_vegetarian())
        .filter(|(_, menu)| match &cuisine {
            // Basic matching on the category label, same as the original:
            // only cuisines that name a category can narrow the list.
            Some(c) => {
                let label = menu.category.label().to_lowercase();
                match c.as_str() {
                    "malay" => label.contains("malay"),
                    "indian" => label.contains("indian"),
                    "chinese" => label.contains("chinese"),
                    _ => true,
                }
            }
            None => true,
        })
        .map(|(caterer, menu)| ShortlistEntry {
            caterer_id: caterer.id.clone(),
            caterer_name: caterer.name.clone(),
            menu_code: menu.code.clone(),
            price_per_person: menu.price_per_person,
            minimum_order: menu.minimum_order,
            category: menu.category,
            notes: menu.notes.clone(),
            has_vegetarian: menu.has_vegetarian(),
        })
        .collect();

    entries.sort_by(|a, b| {
        a.price_per_person
            .partial_cmp(&b.price_per_person)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(SHORTLIST_LIMIT);
    entries
}

/// Assemble the recommendation prompt: requirements, recent history, the
/// shortlisted menus, and the instruction footer.
pub fn build_prompt(
    criteria: &AdvisorCriteria,
    history: &[ChatTurn],
    entries: &[ShortlistEntry],
    message: &str,
) -> String {
    let pax = criteria.pax();

    let mut requirements = format!(
        "- Budget per pax: ${}\n- Number of people: {}\n- Total budget: ${}",
        criteria.budget_per_pax(),
        pax,
        criteria.total_budget()
    );
    if let Some(cuisine) = criteria.cuisine.as_deref().filter(|c| !c.is_empty()) {
        requirements.push_str(&format!("\n- Cuisine preference: {}", cuisine));
    }
    if !criteria.dietary_restrictions.is_empty() {
        requirements.push_str(&format!(
            "\n- Dietary restrictions: {}",
            criteria.dietary_restrictions.join(", ")
        ));
    }
    if let Some(event) = criteria.event_type.as_deref().filter(|e| !e.is_empty()) {
        requirements.push_str(&format!("\n- Event type: {}", event));
    }

    let history_context = if history.is_empty() {
        String::new()
    } else {
        let replayed: Vec<String> = history
            .iter()
            .skip(history.len().saturating_sub(HISTORY_LIMIT))
            .map(|turn| {
                let speaker = match turn.role {
                    ChatRole::User => "User",
                    ChatRole::Assistant => "Assistant",
                };
                format!("{}: {}", speaker, turn.content)
            })
            .collect();
        format!("\nPrevious conversation:\n{}\n", replayed.join("\n"))
    };

    let menu_context = entries
        .iter()
        .map(|entry| {
            let total = entry.price_per_person * pax as f64;
            let mut block = format!(
                "- {} - {}:\n  \u{2022} Price per person: ${:.2}\n  \u{2022} Estimated total for {} pax: ${:.2}\n  \u{2022} Minimum order: {} pax\n  \u{2022} Menu type: {}",
                entry.caterer_name,
                entry.menu_code,
                entry.price_per_person,
                pax,
                total,
                entry.minimum_order,
                entry.category.label(),
            );
            if let Some(notes) = entry.notes.as_deref().filter(|n| !n.is_empty()) {
                block.push_str(&format!("\n  \u{2022} Notes: {}", notes));
            }
            block.push_str(&format!(
                "\n  \u{2022} Has vegetarian options: {}\n  \u{2022} Caterer ID: {}",
                if entry.has_vegetarian { "Yes" } else { "No" },
                entry.caterer_id,
            ));
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a helpful catering menu recommendation assistant. Your role is to help users find suitable catering menus based on their requirements.\n\n\
User Requirements:\n{requirements}\n\
{history_context}\n\
Available Menus (filtered based on requirements):\n\
{menus}\n\n\
Current User Message: {message}\n\n\
Instructions:\n\
1. Provide a natural, conversational response to the user's message\n\
2. Recommend 2-5 menus from the available menus list that best match their requirements\n\
3. For each recommended menu, mention the caterer name, menu code, price per person and estimated total, and why it fits\n\
4. If no menus match perfectly, suggest the closest alternatives and explain why\n\
5. Do not use markdown formatting - use plain text with bullet points (\u{2022})\n\
6. When referring to menu types, use the human-readable labels\n\n\
When mentioning menus, use this format:\n\
\u{2022} [Caterer Name] - [Menu Code]: [Brief description] (Price: $X.XX per person, Total: $X.XX for {pax} pax)",
        requirements = requirements,
        history_context = history_context,
        menus = if menu_context.is_empty() {
            "No menus match the exact criteria, but here are some options:".to_string()
        } else {
            menu_context
        },
        message = message,
        pax = pax,
    )
}

/// Match menus the reply actually mentions, by code or caterer name.
pub fn extract_suggestions(
    reply: &str,
    entries: &[ShortlistEntry],
    pax: u32,
) -> Vec<MenuSuggestion> {
    let reply_lower = reply.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            reply_lower.contains(&entry.menu_code.to_lowercase())
                || reply_lower.contains(&entry.caterer_name.to_lowercase())
        })
        .take(SUGGESTION_LIMIT)
        .map(|entry| MenuSuggestion {
            caterer_id: entry.caterer_id.clone(),
            caterer_name: entry.caterer_name.clone(),
            menu_code: entry.menu_code.clone(),
            price_per_person: entry.price_per_person,
            estimated_total: entry.price_per_person * pax as f64,
        })
        .collect()
}

/// Run the full recommendation round: shortlist, prompt, generate, extract.
pub async fn advise<G: TextGenerator + ?Sized>(
    backend: &G,
    catalog: &Catalog,
    criteria: &AdvisorCriteria,
    history: &[ChatTurn],
    message: &str,
) -> Result<AdvisorReply> {
    let entries = shortlist(catalog, criteria);
    eprintln!(
        "[advisor] {} menus shortlisted for {} pax",
        entries.len(),
        criteria.pax()
    );

    let prompt = build_prompt(criteria, history, &entries, message);
    let text = backend.generate(&prompt).await?;
    let suggestions = extract_suggestions(&text, &entries, criteria.pax());

    Ok(AdvisorReply { text, suggestions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Caterer, CatererMenu, MenuItem, MenuSection};

    fn menu(code: &str, category: MenuCategory, price: f64, min_order: u32, veg: bool) -> CatererMenu {
        CatererMenu {
            code: code.to_string(),
            category,
            price_per_person: price,
            minimum_order: min_order,
            max_fried_items: 0,
            notes: None,
            restricted_areas: vec![],
            sections: vec![MenuSection {
                title: "Mains".to_string(),
                description: String::new(),
                selection_limit: 1,
                order: 1,
                items: vec![MenuItem {
                    name: "Item".to_string(),
                    order: 1,
                    vegetarian: veg,
                    fried: false,
                }],
            }],
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
                        menu("CHEAP_101", MenuCategory::SmallQtyRefreshment, 5.0, 20, true),
                        menu("PRICY_501", MenuCategory::Buffet1, 40.0, 20, false),
                    ],
                },
                Caterer {
                    id: "c2".to_string(),
                    name: "Continental Delight".to_string(),
                    telephone: None,
                    email: None,
                    menus: vec![
                        menu("MALAY_301", MenuCategory::EthnicFoodMalay, 8.0, 25, false),
                        menu("BIG_ONLY_401", MenuCategory::Buffet2, 6.0, 100, false),
                    ],
                },
            ],
        }
    }

    fn criteria(budget: f64, pax: u32) -> AdvisorCriteria {
        AdvisorCriteria {
            budget_per_pax: Some(budget),
            pax: Some(pax),
            ..Default::default()
        }
    }

    struct CannedGenerator(String);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_shortlist_filters_pax_and_budget() {
        let cat = catalog();
        let entries = shortlist(&cat, &criteria(10.0, 30));
        let codes: Vec<&str> = entries.iter().map(|e| e.menu_code.as_str()).collect();
        // PRICY_501 busts the budget; BIG_ONLY_401 needs 100 pax minimum.
        assert_eq!(codes, vec!["CHEAP_101", "MALAY_301"]);
    }

    #[test]
    fn test_shortlist_sorted_by_price() {
        let cat = catalog();
        let entries = shortlist(&cat, &criteria(50.0, 30));
        let prices: Vec<f64> = entries.iter().map(|e| e.price_per_person).collect();
        assert_eq!(prices, vec![5.0, 8.0, 40.0]);
    }

    #[test]
    fn test_shortlist_vegetarian_requirement() {
        let cat = catalog();
        let mut crit = criteria(50.0, 30);
        crit.dietary_restrictions = vec!["Vegetarian".to_string()];
        let entries = shortlist(&cat, &crit);
        let codes: Vec<&str> = entries.iter().map(|e| e.menu_code.as_str()).collect();
        assert_eq!(codes, vec!["CHEAP_101"]);
    }

    #[test]
    fn test_shortlist_cuisine_matching() {
        let cat = catalog();
        let mut crit = criteria(50.0, 30);
        crit.cuisine = Some("Malay".to_string());
        let entries = shortlist(&cat, &crit);
        let codes: Vec<&str> = entries.iter().map(|e| e.menu_code.as_str()).collect();
        assert_eq!(codes, vec!["MALAY_301"]);

        // A cuisine that names no category cannot narrow the list.
        crit.cuisine = Some("Fusion".to_string());
        assert_eq!(shortlist(&cat, &crit).len(), 3);
    }

    #[test]
    fn test_shortlist_category_filter() {
        let cat = catalog();
        let mut crit = criteria(50.0, 30);
        crit.categories = vec![MenuCategory::Buffet1];
        let entries = shortlist(&cat, &crit);
        let codes: Vec<&str> = entries.iter().map(|e| e.menu_code.as_str()).collect();
        assert_eq!(codes, vec!["PRICY_501"]);
    }

    #[test]
    fn test_shortlist_caps_at_limit() {
        let mut cat = Catalog::default();
        let menus: Vec<CatererMenu> = (0..30)
            .map(|i| menu(&format!("M{}", i), MenuCategory::Buffet1, 5.0, 10, false))
            .collect();
        cat.caterers.push(Caterer {
            id: "c1".to_string(),
            name: "Vendor".to_string(),
            telephone: None,
            email: None,
            menus,
        });
        assert_eq!(shortlist(&cat, &criteria(10.0, 20)).len(), SHORTLIST_LIMIT);
    }

    #[test]
    fn test_build_prompt_contains_requirements_and_menus() {
        let cat = catalog();
        let crit = criteria(10.0, 30);
        let entries = shortlist(&cat, &crit);
        let prompt = build_prompt(&crit, &[], &entries, "Something light for a meeting");

        assert!(prompt.contains("- Budget per pax: $10"));
        assert!(prompt.contains("- Number of people: 30"));
        assert!(prompt.contains("- Total budget: $300"));
        assert!(prompt.contains("Chilli Api Catering - CHEAP_101"));
        assert!(prompt.contains("Menu type: Small Quantity Refreshments"));
        assert!(prompt.contains("Current User Message: Something light for a meeting"));
        assert!(!prompt.contains("Previous conversation"));
    }

    #[test]
    fn test_build_prompt_replays_last_six_history_turns() {
        let crit = criteria(10.0, 20);
        let history: Vec<ChatTurn> = (0..8)
            .map(|i| ChatTurn {
                role: if i % 2 == 0 {
                    ChatRole::User
                } else {
                    ChatRole::Assistant
                },
                content: format!("turn {}", i),
            })
            .collect();
        let prompt = build_prompt(&crit, &history, &[], "hello");
        assert!(!prompt.contains("turn 0"));
        assert!(!prompt.contains("turn 1"));
        assert!(prompt.contains("User: turn 2"));
        assert!(prompt.contains("Assistant: turn 7"));
    }

    #[test]
    fn test_extract_suggestions_by_code_and_name() {
        let cat = catalog();
        let entries = shortlist(&cat, &criteria(50.0, 30));
        let reply = "I'd go with cheap_101, or anything from Continental Delight.";
        let suggestions = extract_suggestions(reply, &entries, 30);
        let codes: Vec<&str> = suggestions.iter().map(|s| s.menu_code.as_str()).collect();
        assert_eq!(codes, vec!["CHEAP_101", "MALAY_301"]);
        assert_eq!(suggestions[0].estimated_total, 150.0);
    }

    #[test]
    fn test_extract_suggestions_caps_at_limit() {
        let entries: Vec<ShortlistEntry> = (0..10)
            .map(|i| ShortlistEntry {
                caterer_id: "c1".to_string(),
                caterer_name: "Vendor".to_string(),
                menu_code: format!("M{}", i),
                price_per_person: 5.0,
                minimum_order: 10,
                category: MenuCategory::Buffet1,
                notes: None,
                has_vegetarian: false,
            })
            .collect();
        // Every entry's caterer name appears in the reply.
        let suggestions = extract_suggestions("Vendor has it all", &entries, 20);
        assert_eq!(suggestions.len(), SUGGESTION_LIMIT);
    }

    #[tokio::test]
    async fn test_advise_end_to_end_with_mock_backend() {
        let cat = catalog();
        let crit = criteria(10.0, 30);
        let backend = CannedGenerator(
            "\u{2022} Chilli Api Catering - CHEAP_101: a light refreshment spread".to_string(),
        );
        let reply = advise(&backend, &cat, &crit, &[], "something light")
            .await
            .unwrap();
        assert!(reply.text.contains("CHEAP_101"));
        assert_eq!(reply.suggestions.len(), 1);
        assert_eq!(reply.suggestions[0].menu_code, "CHEAP_101");
        assert_eq!(reply.suggestions[0].estimated_total, 150.0);
    }
}
