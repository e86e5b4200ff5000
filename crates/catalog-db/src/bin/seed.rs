//! # Seed Data Generator
//!
//! Populates the database with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default)
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p catalog-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p catalog-db --bin seed -- --db ./data/products.db
//! ```
//!
//! Each generated product has a name of the form `{base} {variant}` and a
//! price between 1.00 and 499.99.

use std::env;

use catalog_core::{NewProduct, Price};
use catalog_db::{Database, DbConfig};

/// Base product names.
const PRODUCTS: &[&str] = &[
    "Keyboard",
    "Mouse",
    "Monitor",
    "Headphones",
    "Webcam",
    "Microphone",
    "Speaker",
    "Laptop Stand",
    "USB Hub",
    "Desk Lamp",
    "Office Chair",
    "Standing Desk",
    "Mouse Pad",
    "HDMI Cable",
    "Docking Station",
];

/// Variants appended to base names.
const VARIANTS: &[&str] = &["Basic", "Pro", "Ultra", "Mini", "Wireless"];

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct SeedArgs {
    count: usize,
    db_path: String,
    help: bool,
}

/// Parses `--count`, `--db` and `--help`. Unknown flags are ignored.
fn parse_args(args: &[String]) -> Result<SeedArgs, String> {
    let mut parsed = SeedArgs {
        count: 50,
        db_path: String::from("./data/products.db"),
        help: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if let Some(raw) = args.get(i + 1) {
                    parsed.count = raw
                        .parse()
                        .map_err(|_| format!("Invalid --count value: {raw}"))?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if let Some(path) = args.get(i + 1) {
                    parsed.db_path = path.clone();
                    i += 1;
                }
            }
            "--help" | "-h" => parsed.help = true,
            _ => {}
        }
        i += 1;
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let SeedArgs {
        count,
        db_path,
        help,
    } = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    if help {
        println!("Products Catalog Seed Data Generator");
        println!();
        println!("Usage: seed [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -c, --count <N>    Number of products to generate (default: 50)");
        println!("  -d, --db <PATH>    Database file path (default: ./data/products.db)");
        println!("  -h, --help         Show this help message");
        return Ok(());
    }

    println!("Products Catalog Seed Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count_available().await?;
    if existing > 0 {
        println!("⚠ Database already has {} available products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let product = generate_product(seed)?;

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }

        generated += 1;
    }

    println!();
    println!("✓ Generated {} products in {:?}", generated, start.elapsed());

    db.close().await;
    Ok(())
}

/// Generates a single product from a seed value.
fn generate_product(seed: usize) -> Result<NewProduct, catalog_core::ValidationError> {
    let base = PRODUCTS[seed % PRODUCTS.len()];
    let variant = VARIANTS[(seed / PRODUCTS.len()) % VARIANTS.len()];

    // 1.00 - 499.99
    let cents = 100 + ((seed * 7919) % 49_900) as i64;

    Ok(NewProduct {
        name: format!("{} {}", base, variant),
        price: Price::from_cents(cents)?,
    })
}
