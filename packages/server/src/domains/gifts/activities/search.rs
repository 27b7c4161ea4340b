use anyhow::Result;
use tracing::info;

use crate::domains::gifts::data::{
    GiftResult, GiftSearchResponse, WebProduct, WebVendor, SOURCE_GLOBAL_VENDOR,
    SOURCE_INTERNAL, SOURCE_WEB_PRODUCT,
};
use crate::domains::vendors::Vendor;
use crate::kernel::ServerDeps;

/// Search saved vendors and the AI gift index for `query`.
///
/// Store faults propagate; the AI side never fails (it degrades to empty or
/// curated results).
pub async fn search_gifts(query: &str, deps: &ServerDeps) -> Result<GiftSearchResponse> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(GiftSearchResponse::default());
    }

    let internal = Vendor::search(query, &deps.db_pool).await?;
    let internal_results = internal
        .iter()
        .map(|vendor| internal_result(vendor, &deps.base_url))
        .collect::<Vec<_>>();

    let ideas = deps.gift_search.search_gifts(query).await;

    info!(
        query,
        internal = internal_results.len(),
        web_products = ideas.products.len(),
        web_vendors = ideas.vendors.len(),
        "Gift search"
    );

    Ok(GiftSearchResponse {
        internal_results,
        web_products: ideas.products.into_iter().map(web_product_result).collect(),
        web_vendors: ideas.vendors.into_iter().map(web_vendor_result).collect(),
    })
}

fn internal_result(vendor: &Vendor, base_url: &str) -> GiftResult {
    let image_url = match vendor.image_path.as_deref() {
        Some(path) if !path.is_empty() => {
            format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
        }
        _ => String::new(),
    };

    GiftResult {
        source: SOURCE_INTERNAL.to_string(),
        title: format!("Gift from {}", vendor.name.as_deref().unwrap_or_default()),
        price: "N/A".to_string(),
        link: vendor
            .website
            .clone()
            .filter(|w| !w.is_empty())
            .unwrap_or_else(|| "#".to_string()),
        description: format!(
            "Category: {}. Contact: {}",
            vendor.category.as_deref().unwrap_or_default(),
            vendor.contact.as_deref().unwrap_or_default()
        ),
        image_url,
    }
}

fn web_product_result(product: WebProduct) -> GiftResult {
    GiftResult {
        source: SOURCE_WEB_PRODUCT.to_string(),
        title: product.title.unwrap_or_else(|| "Gift Idea".to_string()),
        price: product.price.unwrap_or_else(|| "N/A".to_string()),
        link: product.link.unwrap_or_else(|| "#".to_string()),
        description: product.description.unwrap_or_default(),
        image_url: String::new(),
    }
}

fn web_vendor_result(vendor: WebVendor) -> GiftResult {
    GiftResult {
        source: SOURCE_GLOBAL_VENDOR.to_string(),
        title: vendor.name.unwrap_or_else(|| "Vendor".to_string()),
        price: "N/A".to_string(),
        link: vendor.website.unwrap_or_else(|| "#".to_string()),
        description: vendor.specialty.unwrap_or_default(),
        image_url: String::new(),
    }
}
