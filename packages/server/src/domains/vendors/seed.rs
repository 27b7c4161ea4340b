//! Demo vendors for a fresh database.

use anyhow::Result;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;

use super::data::VendorInput;
use super::models::Vendor;

fn sample(
    name: &str,
    contact: &str,
    category: &str,
    website: &str,
    additional_info: serde_json::Value,
) -> VendorInput {
    VendorInput {
        name: Some(name.to_string()),
        contact: Some(contact.to_string()),
        category: Some(category.to_string()),
        website: Some(website.to_string()),
        additional_info,
        image_path: None,
        products: None,
    }
}

pub fn sample_vendors() -> Vec<VendorInput> {
    vec![
        sample(
            "Artisanal Hampers Co.",
            "Sarah Johnson | +1-555-0123",
            "Food & Beverage",
            "https://example.com/hampers",
            json!({
                "specialty": "Gourmet Snack Boxes",
                "price_range": "$50 - $200",
                "corporate_orders": "Yes"
            }),
        ),
        sample(
            "TechTrend Promotions",
            "Mike Chen | promo@techtrend.com",
            "Electronics",
            "https://example.com/tech",
            json!({
                "products": "Power banks, Wireless Chargers, Smart Bottles",
                "branding": "Laser Etching Available"
            }),
        ),
        sample(
            "EcoGreen Essentials",
            "info@ecogreen.org",
            "Sustainable Goods",
            "https://example.com/eco",
            json!({
                "materials": "Bamboo, Recycled Plastic",
                "certification": "B-Corp Certified"
            }),
        ),
        sample(
            "Luxe Leatherworks",
            "orders@luxeleather.com",
            "Accessories",
            "https://example.com/leather",
            json!({
                "items": "Notebooks, Wallets, Laptop Sleeves",
                "origin": "Handmade in Italy"
            }),
        ),
        sample(
            "Zen Office Decor",
            "hello@zendecor.com",
            "Office Decor",
            "https://example.com/decor",
            json!({
                "items": "Desk Plants, Minimalist Organizers",
                "vibe": "Modern & Calm"
            }),
        ),
    ]
}

/// Insert the demo vendors unless the table already has rows.
///
/// Returns how many vendors were inserted.
pub async fn seed_samples(pool: &SqlitePool) -> Result<usize> {
    let existing = Vendor::count(pool).await?;
    if existing > 0 {
        info!(existing, "Vendors already present, skipping seed");
        return Ok(0);
    }

    let samples = sample_vendors();
    for vendor in &samples {
        Vendor::create(vendor, pool).await?;
    }

    info!(count = samples.len(), "Seeded sample vendors");
    Ok(samples.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::connect_in_memory;

    #[tokio::test]
    async fn seeds_once() {
        let pool = connect_in_memory().await.unwrap();

        assert_eq!(seed_samples(&pool).await.unwrap(), 5);
        assert_eq!(seed_samples(&pool).await.unwrap(), 0);
        assert_eq!(Vendor::count(&pool).await.unwrap(), 5);
    }
}
