//! Sample product catalog for tests and development.

use chrono::NaiveDate;

use stockroom_core::Sku;
use stockroom_inventory::{Dimensions, Product};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Static catalog dates, always valid.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn sku(raw: &str) -> Sku {
    // Catalog SKUs are non-blank literals.
    Sku::new(raw).expect("non-blank catalog sku")
}

/// Four products covering the interesting shapes: multi-location with deep
/// history, two-location pairs, and a small single-digit-history product.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new(sku("JEW9999"), "Multi-location Pack", "Pack")
            .with_cost(15.9)
            .with_dimensions(Dimensions {
                height: 12.0,
                width: 8.0,
                depth: 6.0,
                weight: 0.3,
            })
            .with_location("EB-001-A", 500)
            .with_location("BNP-07", 200)
            .with_location("RACK-12", 185)
            .with_history(date(2025, 8, 10), -30)
            .with_history(date(2025, 8, 8), 120)
            .with_history(date(2025, 8, 6), -10)
            .with_history(date(2025, 8, 4), 50)
            .with_history(date(2025, 8, 2), -20),
        Product::new(sku("TOY1234"), "Jigsaw Puzzle", "Box")
            .with_cost(9.9)
            .with_dimensions(Dimensions {
                height: 10.0,
                width: 10.0,
                depth: 5.0,
                weight: 0.4,
            })
            .with_location("TOY-01", 150)
            .with_location("TOY-03", 100)
            .with_history(date(2025, 8, 10), -30)
            .with_history(date(2025, 8, 8), 100)
            .with_history(date(2025, 8, 6), -20)
            .with_history(date(2025, 8, 4), 50),
        Product::new(sku("CLOTH555"), "Summer T-Shirt", "Piece")
            .with_cost(19.5)
            .with_dimensions(Dimensions {
                height: 2.0,
                width: 30.0,
                depth: 25.0,
                weight: 0.2,
            })
            .with_location("CLOT-01", 400)
            .with_location("CLOT-02", 180)
            .with_history(date(2025, 8, 9), -15)
            .with_history(date(2025, 8, 8), 60)
            .with_history(date(2025, 8, 6), -12)
            .with_history(date(2025, 8, 4), 30),
        Product::new(sku("BOOK0001"), "Introduction to Algorithms", "Book")
            .with_cost(45.5)
            .with_dimensions(Dimensions {
                height: 24.0,
                width: 17.0,
                depth: 5.0,
                weight: 2.0,
            })
            .with_location("BOOK-01", 100)
            .with_location("BOOK-02", 50)
            .with_history(date(2025, 8, 10), -3)
            .with_history(date(2025, 8, 8), 20)
            .with_history(date(2025, 8, 6), -5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_products_respect_ledger_invariants() {
        for product in sample_products() {
            assert!(product.locations().iter().all(|l| l.quantity() > 0));
            assert!(
                product
                    .locations()
                    .iter()
                    .filter(|l| l.is_primary())
                    .count()
                    <= 1
            );
            assert!(product.transactions().iter().all(|t| t.quantity != 0));
        }
    }

    #[test]
    fn catalog_history_is_newest_first() {
        for product in sample_products() {
            let dates: Vec<_> = product.transactions().iter().map(|t| t.date).collect();
            let mut sorted = dates.clone();
            sorted.sort_by(|a, b| b.cmp(a));
            assert_eq!(dates, sorted, "{} history out of order", product.sku());
        }
    }
}
