//! # Seed Data Generator
//!
//! Populates the database with a demonstration coupon set.
//!
//! ## Usage
//! ```bash
//! cargo run -p coupon-db --bin seed
//!
//! # Specify database path
//! cargo run -p coupon-db --bin seed -- --db ./data/coupons.db
//! ```
//!
//! ## Generated Coupons
//! - Cart-wise: 10% off carts over $100
//! - Cart-wise: 20% off carts over $100, capped at $15
//! - Product-wise: 20% off product 1
//! - Product-wise: 50% off product 3 when buying at least 3
//! - Buy-X-get-Y: buy 2 of product 1, get 1 of product 2 free (once)
//! - Buy-X-get-Y: buy 3 of products 1/2, get 1 of product 3 free (up to 3 times)

use chrono::{Duration, Utc};
use coupon_core::{
    BuyXGetYParams, BxGyProduct, CartWiseParams, CouponRule, DiscountRate, ProductWiseParams,
};
use coupon_db::{Database, DbConfig, NewCoupon};
use std::env;

fn bxgy(buy: &[(i64, i64)], get: &[(i64, i64)], repetition_limit: i64) -> CouponRule {
    let entries = |pairs: &[(i64, i64)]| {
        pairs
            .iter()
            .map(|&(product_id, quantity)| BxGyProduct { product_id, quantity })
            .collect()
    };
    CouponRule::BuyXGetY(BuyXGetYParams {
        buy_products: entries(buy),
        get_products: entries(get),
        repetition_limit,
    })
}

fn demo_coupons() -> Vec<NewCoupon> {
    let in_ninety_days = Some(Utc::now() + Duration::days(90));

    vec![
        NewCoupon {
            name: "10% off orders over $100".to_string(),
            rule: CouponRule::CartWise(CartWiseParams {
                threshold_cents: 10000,
                discount_percent: DiscountRate::from_bps(1000),
                max_discount_cents: None,
            }),
            expires_at: None,
        },
        NewCoupon {
            name: "20% off over $100, max $15".to_string(),
            rule: CouponRule::CartWise(CartWiseParams {
                threshold_cents: 10000,
                discount_percent: DiscountRate::from_bps(2000),
                max_discount_cents: Some(1500),
            }),
            expires_at: in_ninety_days,
        },
        NewCoupon {
            name: "20% off product 1".to_string(),
            rule: CouponRule::ProductWise(ProductWiseParams {
                product_id: 1,
                discount_percent: DiscountRate::from_bps(2000),
                max_discount_cents: None,
                min_quantity: 1,
            }),
            expires_at: None,
        },
        NewCoupon {
            name: "Half price product 3 (min 3)".to_string(),
            rule: CouponRule::ProductWise(ProductWiseParams {
                product_id: 3,
                discount_percent: DiscountRate::from_bps(5000),
                max_discount_cents: Some(5000),
                min_quantity: 3,
            }),
            expires_at: in_ninety_days,
        },
        NewCoupon {
            name: "Buy 2 of product 1, get product 2 free".to_string(),
            rule: bxgy(&[(1, 2)], &[(2, 1)], 1),
            expires_at: None,
        },
        NewCoupon {
            name: "Buy 3 from products 1/2, get product 3 free".to_string(),
            rule: bxgy(&[(1, 2), (2, 1)], &[(3, 1)], 3),
            expires_at: None,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./coupons.db");

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
                println!("Coupon Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./coupons.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Coupon Seed Data Generator");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.coupons().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} coupons", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    for coupon in demo_coupons() {
        match db.coupons().insert(&coupon).await {
            Ok(record) => println!("  #{:<3} {:<13} {}", record.id, record.kind, record.name),
            Err(e) => eprintln!("Failed to insert {}: {}", coupon.name, e),
        }
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
