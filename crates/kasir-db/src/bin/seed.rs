//! # Seed Data Generator
//!
//! Populates the database with a small warung catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir.db (default)
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! ## Generated Data
//! - Categories: Makanan, Minuman, Snack
//! - A handful of products per category with prices in rupiah

use std::env;

use kasir_core::{CategoryInput, Money, ProductInput};
use kasir_db::{Database, DbConfig};

/// (category, description, [(product, price, stock)])
const CATALOG: &[(&str, &str, &[(&str, i64, i64)])] = &[
    (
        "Makanan",
        "Makanan berat dan mi instan",
        &[
            ("Indomie Goreng", 3500, 120),
            ("Indomie Kuah Soto", 3500, 80),
            ("Nasi Uduk", 12000, 20),
            ("Roti Tawar", 16000, 15),
        ],
    ),
    (
        "Minuman",
        "Minuman dingin dan panas",
        &[
            ("Kopi Kapal Api", 2500, 200),
            ("Teh Botol Sosro", 4000, 60),
            ("Aqua 600ml", 3500, 150),
            ("Susu Ultra Coklat", 6500, 40),
        ],
    ),
    (
        "Snack",
        "Makanan ringan",
        &[
            ("Chitato Sapi Panggang", 11000, 30),
            ("Tango Wafer", 8500, 25),
            ("Kacang Garuda", 9000, 35),
        ],
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("DB_CONN").unwrap_or_else(|_| String::from("./kasir.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file (default: $DB_CONN or ./kasir.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Kasir POS Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut generated = 0;
    for (category_name, description, products) in CATALOG {
        let category = db
            .categories()
            .insert(&CategoryInput {
                name: category_name.to_string(),
                description: description.to_string(),
            })
            .await?;
        println!("  + {} (id {})", category.name, category.id);

        for (name, price, stock) in products.iter() {
            let product = db
                .products()
                .insert(&ProductInput {
                    name: name.to_string(),
                    price: Money::from_minor(*price),
                    stock: *stock,
                    category_id: Some(category.id),
                })
                .await?;
            println!("      {} {} x{}", product.name, product.price, product.stock);
            generated += 1;
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete: {} categories, {} products", CATALOG.len(), generated);

    Ok(())
}
