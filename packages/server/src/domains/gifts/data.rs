use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Product idea as returned by the AI search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebProduct {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
}

/// Brand or vendor known for a gifting category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebVendor {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub specialty: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
}

/// Model answers are loosely typed: numbers and flags are kept as their
/// text, nested values as compact JSON, and null as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// AI answer for a gifting query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebGiftIdeas {
    #[serde(default)]
    pub products: Vec<WebProduct>,
    #[serde(default)]
    pub vendors: Vec<WebVendor>,
}

impl WebGiftIdeas {
    /// Fixed catalogue served when no model could answer.
    pub fn curated_fallback() -> Self {
        let product = |title: &str, price: &str, description: &str| WebProduct {
            title: Some(title.to_string()),
            price: Some(price.to_string()),
            description: Some(description.to_string()),
            link: Some("#".to_string()),
        };
        let vendor = |name: &str, specialty: &str| WebVendor {
            name: Some(name.to_string()),
            specialty: Some(specialty.to_string()),
            website: Some("https://example.com".to_string()),
        };

        Self {
            products: vec![
                product(
                    "Eco-Friendly Bamboo Set",
                    "$45",
                    "Sustainable desk organizer set made from premium bamboo.",
                ),
                product(
                    "Custom Leather Journal",
                    "$30",
                    "Handcrafted leather notebook with personalized embossing.",
                ),
                product(
                    "Artisan Coffee Hamper",
                    "$60",
                    "Gourmet selection of single-origin beans and treats.",
                ),
                product(
                    "Smart Tech Tracker",
                    "$25",
                    "Bluetooth tracker for keys and wallets with custom branding.",
                ),
                product(
                    "Premium Metal Pen",
                    "$15",
                    "Weighted luxury pen suitable for corporate gifting.",
                ),
            ],
            vendors: vec![
                vendor("Global Green Gifting", "Sustainable Corporate Gifts"),
                vendor("LuxeStationery Co.", "Premium Office Supplies"),
                vendor("TechPromos intl.", "Branded Tech Accessories"),
            ],
        }
    }
}

pub const SOURCE_INTERNAL: &str = "Internal Database";
pub const SOURCE_WEB_PRODUCT: &str = "Web Product";
pub const SOURCE_GLOBAL_VENDOR: &str = "Global Vendor";

/// One search hit as shown in the results grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftResult {
    pub source: String,
    pub title: String,
    pub price: String,
    pub link: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GiftSearchResponse {
    pub internal_results: Vec<GiftResult>,
    pub web_products: Vec<GiftResult>,
    pub web_vendors: Vec<GiftResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}
