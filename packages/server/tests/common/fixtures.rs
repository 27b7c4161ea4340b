//! Shared fixtures: images, vendor pages and saved vendors.

use gifting_core::domains::vendors::{Vendor, VendorInput};
use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::json;
use sqlx::SqlitePool;
use std::io::Cursor;

/// A solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32, colour: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(colour));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// Vendor storefront with three product cards.
pub fn storefront_html() -> String {
    let cards = [
        ("Bamboo Desk Set", "$45"),
        ("Leather Journal", "$30"),
        ("Coffee Hamper", "$60"),
    ]
    .iter()
    .map(|(name, price)| {
        format!(
            r#"<div class="product-card"><h3 class="product-title">{}</h3><span class="amount">{}</span></div>"#,
            name, price
        )
    })
    .collect::<String>();

    format!("<html><body><main>{}</main></body></html>", cards)
}

pub fn vendor_input(name: &str, category: &str, products: &str) -> VendorInput {
    VendorInput {
        name: Some(name.to_string()),
        contact: Some(format!("hello@{}.example", name.to_lowercase().replace(' ', ""))),
        category: Some(category.to_string()),
        website: Some(format!("{}.example", name.to_lowercase().replace(' ', ""))),
        additional_info: json!({ "products_sold": products }),
        image_path: None,
        products: None,
    }
}

pub async fn insert_vendor(pool: &SqlitePool, input: &VendorInput) -> i64 {
    Vendor::create(input, pool).await.expect("insert vendor")
}
