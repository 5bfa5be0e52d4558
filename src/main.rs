mod advisor;
mod catalog;
mod comparison;
mod models;
mod pricing;
mod utils;

use advisor::gemini::GeminiApi;
use advisor::AdvisorCriteria;
use catalog::Catalog;
use comparison::ComparisonBoard;
use models::{OrderConfig, SurchargeSelection};
use pricing::compute_breakdown;
use serde::Serialize;

const DEFAULT_CATALOG_PATH: &str = "catalog.json";

#[derive(Serialize)]
struct QuoteExport {
    caterer: String,
    menu_code: String,
    category: String,
    price_per_person: f64,
    pax: u32,
    subtotal: f64,
    total_delivery: f64,
    discount_rate: f64,
    admin_fee: f64,
    total: f64,
}

fn print_usage(bin: &str) {
    eprintln!("Usage:");
    eprintln!("  {} [--catalog <path>] [command]", bin);
    eprintln!();
    eprintln!("  No command                  → export standard quotes for every menu to quotes_rs.json");
    eprintln!("  quote <code> <pax> [flags]  → print one price breakdown");
    eprintln!("      flags: cbd, odd-hours, no-lift <floors>");
    eprintln!("  compare <pax> <code>...     → quote up to 4 menus side by side");
    eprintln!("  advise [flags] <message>    → ask for menu recommendations (needs GEMINI_API_KEY)");
    eprintln!("      flags: --budget <per-pax>, --pax <n>, --cuisine <name>, --vegetarian");
    eprintln!();
    eprintln!("  --catalog defaults to {}.", DEFAULT_CATALOG_PATH);
    eprintln!("  Example:");
    eprintln!("    {} quote CHILLI_API_101 25 cbd no-lift 3", bin);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw_args: Vec<String> = std::env::args().collect();

    // Parse --catalog flag and collect the command words
    let mut catalog_path = DEFAULT_CATALOG_PATH.to_string();
    let mut words: Vec<String> = Vec::new();
    let mut i = 1;
    while i < raw_args.len() {
        if raw_args[i] == "--catalog" {
            i += 1;
            if i >= raw_args.len() {
                eprintln!("--catalog requires a value");
                std::process::exit(1);
            }
            catalog_path = raw_args[i].clone();
        } else {
            words.push(raw_args[i].clone());
        }
        i += 1;
    }

    let catalog = Catalog::load(&catalog_path)?;

    match words.first().map(String::as_str) {
        None => export_all(&catalog)?,
        Some("quote") => run_quote(&catalog, &words[1..], &raw_args[0])?,
        Some("compare") => run_compare(&catalog, &words[1..], &raw_args[0])?,
        Some("advise") => run_advise(&catalog, &words[1..]).await?,
        Some(other) => {
            eprintln!("Unknown command: '{}'.", other);
            print_usage(&raw_args[0]);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn parse_surcharges(args: &[String]) -> Result<SurchargeSelection, String> {
    let mut surcharges = SurchargeSelection::none();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "cbd" => surcharges.cbd = true,
            "odd-hours" => surcharges.odd_hours = true,
            "no-lift" => {
                surcharges.no_lift_access = true;
                i += 1;
                let floors = args
                    .get(i)
                    .and_then(|f| f.parse::<u32>().ok())
                    .ok_or("no-lift requires a floor count")?;
                surcharges.floor_count = floors;
            }
            other => return Err(format!("unknown surcharge flag: '{}'", other)),
        }
        i += 1;
    }
    Ok(surcharges)
}

fn run_quote(
    catalog: &Catalog,
    args: &[String],
    bin: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.len() < 2 {
        print_usage(bin);
        std::process::exit(1);
    }

    let code = &args[0];
    // Empty or malformed pax would otherwise become 0; clamp to 1 like the
    // order form does.
    let pax = args[1].parse::<u32>().unwrap_or(1).max(1);
    let surcharges = match parse_surcharges(&args[2..]) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            print_usage(bin);
            std::process::exit(1);
        }
    };

    let (caterer, menu) = match catalog.menu_by_code(code) {
        Some(found) => found,
        None => {
            eprintln!("No menu with code '{}' in the catalog.", code);
            std::process::exit(1);
        }
    };

    if pax < menu.minimum_order {
        eprintln!(
            "[quote] note: {} pax is below the menu minimum of {}, base delivery applies",
            pax, menu.minimum_order
        );
    }

    let config = OrderConfig::for_menu(menu, pax, surcharges);
    let breakdown = compute_breakdown(&config)?;

    eprintln!(
        "[quote] {} - {} for {} pax: {}",
        caterer.name,
        menu.code,
        pax,
        utils::format_price(breakdown.total)
    );
    println!("{}", serde_json::to_string_pretty(&breakdown)?);

    Ok(())
}

#[derive(Serialize)]
struct ComparisonExport {
    features: Vec<String>,
    quotes: Vec<QuoteExport>,
}

fn run_compare(
    catalog: &Catalog,
    args: &[String],
    bin: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.len() < 2 {
        print_usage(bin);
        std::process::exit(1);
    }

    let pax = args[0].parse::<u32>().unwrap_or(1).max(1);
    let mut board = ComparisonBoard::new();

    for code in &args[1..] {
        let (caterer, menu) = match catalog.menu_by_code(code) {
            Some(found) => found,
            None => {
                eprintln!("No menu with code '{}' in the catalog.", code);
                std::process::exit(1);
            }
        };
        if let Err(e) = board.add(caterer, menu) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    let quotes = board.quotes(pax, SurchargeSelection::none())?;
    let export = ComparisonExport {
        features: board.unique_features(),
        quotes: board
            .entries()
            .iter()
            .zip(quotes)
            .map(|(entry, (_, b))| QuoteExport {
                caterer: entry.caterer_name.clone(),
                menu_code: entry.menu.code.clone(),
                category: entry.menu.category.label().to_string(),
                price_per_person: entry.menu.price_per_person,
                pax,
                subtotal: b.subtotal,
                total_delivery: b.total_delivery,
                discount_rate: b.discount_rate,
                admin_fee: b.admin_fee,
                total: b.total,
            })
            .collect(),
    };

    eprintln!("[compare] {} menus at {} pax", export.quotes.len(), pax);
    println!("{}", serde_json::to_string_pretty(&export)?);

    Ok(())
}

async fn run_advise(
    catalog: &Catalog,
    args: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut criteria = AdvisorCriteria::default();
    let mut message_words: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--budget" => {
                i += 1;
                criteria.budget_per_pax = args.get(i).and_then(|v| v.parse().ok());
            }
            "--pax" => {
                i += 1;
                criteria.pax = args.get(i).and_then(|v| v.parse().ok());
            }
            "--cuisine" => {
                i += 1;
                criteria.cuisine = args.get(i).cloned();
            }
            "--vegetarian" => {
                criteria.dietary_restrictions.push("Vegetarian".to_string());
            }
            word => message_words.push(word.to_string()),
        }
        i += 1;
    }

    if message_words.is_empty() {
        eprintln!("advise needs a message, e.g.: advise --budget 12 --pax 30 something light");
        std::process::exit(1);
    }

    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY is not set.");
            std::process::exit(1);
        }
    };

    let gemini = GeminiApi::new(&api_key);
    let message = message_words.join(" ");
    eprintln!("[advisor] asking for recommendations...");
    let reply = advisor::advise(&gemini, catalog, &criteria, &[], &message).await?;

    println!("{}", serde_json::to_string_pretty(&reply)?);

    Ok(())
}

/// Standard quote for every menu: pax at the menu minimum, no surcharges.
fn export_all(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let mut exports: Vec<QuoteExport> = Vec::new();
    let mut skipped = 0usize;

    for (caterer, menu) in catalog.vendor_menu_pairs() {
        let pax = menu.minimum_order.max(1);
        let config = OrderConfig::for_menu(menu, pax, SurchargeSelection::none());
        match compute_breakdown(&config) {
            Ok(b) => exports.push(QuoteExport {
                caterer: caterer.name.clone(),
                menu_code: menu.code.clone(),
                category: menu.category.label().to_string(),
                price_per_person: menu.price_per_person,
                pax,
                subtotal: b.subtotal,
                total_delivery: b.total_delivery,
                discount_rate: b.discount_rate,
                admin_fee: b.admin_fee,
                total: b.total,
            }),
            Err(e) => {
                eprintln!("[export] skipping {}: {}", menu.code, e);
                skipped += 1;
            }
        }
    }

    exports.sort_by(|a, b| a.menu_code.cmp(&b.menu_code));
    let json = serde_json::to_string_pretty(&exports)?;
    std::fs::write("quotes_rs.json", &json)?;
    eprintln!(
        "Exported {} quotes to quotes_rs.json (skipped {})",
        exports.len(),
        skipped
    );

    Ok(())
}
