use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domains::scraping::ScrapeOutcome;

/// Extras read off a card that have no column of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardExtras {
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub social_media: String,
    #[serde(default)]
    pub designation: String,
}

/// Structured fields extracted from a business card image.
///
/// Faults are reported in-band: the `name` reads as the error
/// ("Error: Missing API Key", "AI Error", "File Error") and `contact`
/// carries the detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardExtraction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub website: String,
    /// Free text or a list, whatever the model produced
    #[serde(default)]
    pub products: Value,
    #[serde(default)]
    pub additional_info: CardExtras,
}

pub const MISSING_API_KEY: &str = "Error: Missing API Key";
pub const AI_ERROR: &str = "AI Error";
pub const FILE_ERROR: &str = "File Error";

impl CardExtraction {
    /// Error-shaped extraction carrying only a name.
    pub fn error(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn ai_error(detail: impl Into<String>) -> Self {
        Self {
            contact: detail.into(),
            ..Self::error(AI_ERROR)
        }
    }

    pub fn file_error(detail: impl Into<String>) -> Self {
        Self {
            contact: detail.into(),
            ..Self::error(FILE_ERROR)
        }
    }

    pub fn is_error(&self) -> bool {
        self.name == AI_ERROR || self.name == FILE_ERROR || self.name.starts_with("Error")
    }

    /// Map the model's flat JSON answer onto card fields.
    ///
    /// Phone, email and address collapse into one `contact` line. Returns
    /// `None` when the answer is not a JSON object.
    pub fn from_model_answer(answer: &Value) -> Option<Self> {
        let data = answer.as_object()?;

        let contact = [("Ph: ", "phone"), ("✉ ", "email"), ("📍 ", "address")]
            .iter()
            .filter_map(|(label, key)| {
                let value = text_field(data, key);
                (!value.is_empty()).then(|| format!("{}{}", label, value))
            })
            .collect::<Vec<_>>()
            .join(" | ");

        Some(Self {
            name: text_field(data, "name"),
            contact,
            category: text_field(data, "category"),
            website: text_field(data, "website"),
            products: data
                .get("products")
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
            additional_info: CardExtras {
                tagline: text_field(data, "tagline"),
                social_media: text_field(data, "social_media"),
                designation: text_field(data, "designation"),
            },
        })
    }

    /// True when the card itself listed no products.
    pub fn has_products(&self) -> bool {
        match &self.products {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        }
    }
}

fn text_field(data: &Map<String, Value>, key: &str) -> String {
    match data.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// Best-effort record returned by card analysis, ready for the review form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardAnalysis {
    pub name: String,
    pub contact: String,
    pub category: String,
    pub website: String,
    pub products: Value,
    pub additional_info: Map<String, Value>,
    pub image_path: String,
    pub scrape_status: String,
}

impl CardAnalysis {
    /// Merge the extraction with the scrape outcome.
    ///
    /// Scraped product names stand in for `products` when the card listed
    /// none; the pricing guide always lands in `additional_info`.
    pub fn assemble(card: CardExtraction, image_path: String, scrape: &ScrapeOutcome) -> Self {
        let products = if card.has_products() {
            card.products
        } else {
            let scraped = scrape.products();
            if scraped.is_empty() {
                card.products
            } else {
                Value::String(scraped.join(", "))
            }
        };

        let mut additional_info = match serde_json::to_value(&card.additional_info) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        additional_info.insert("pricing_guide".to_string(), scrape.pricing_guide().into());

        Self {
            name: card.name,
            contact: card.contact,
            category: card.category,
            website: card.website,
            products,
            additional_info,
            image_path,
            scrape_status: scrape.status_tag(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::scraping::PricedItem;
    use serde_json::json;

    #[test]
    fn contact_parts_are_joined() {
        let card = CardExtraction::from_model_answer(&json!({
            "name": "EcoGreen Essentials",
            "phone": "+1 555 0100",
            "email": "info@ecogreen.org",
            "address": "",
            "category": "Sustainable Goods",
            "tagline": "Gifts that grow",
        }))
        .unwrap();

        assert_eq!(card.contact, "Ph: +1 555 0100 | ✉ info@ecogreen.org");
        assert_eq!(card.additional_info.tagline, "Gifts that grow");
        assert_eq!(card.website, "");
    }

    #[test]
    fn non_object_answer_is_rejected() {
        assert!(CardExtraction::from_model_answer(&json!(["a"])).is_none());
    }

    #[test]
    fn list_fields_are_flattened() {
        let card = CardExtraction::from_model_answer(&json!({
            "name": "TechTrend",
            "phone": ["111", "222"],
        }))
        .unwrap();

        assert_eq!(card.contact, "Ph: 111, 222");
    }

    #[test]
    fn error_shapes() {
        assert!(CardExtraction::error(MISSING_API_KEY).is_error());
        assert!(CardExtraction::ai_error("All models failed. Last: 429: m").is_error());
        assert!(!CardExtraction::error("Zen Office Decor").is_error());
    }

    #[test]
    fn scraped_names_fill_missing_products() {
        let card = CardExtraction {
            name: "Zen Office Decor".into(),
            website: "zendecor.example".into(),
            ..Default::default()
        };
        let scrape = ScrapeOutcome::Structured(vec![
            PricedItem::new("Desk Plant", "$20"),
            PricedItem::new("Organizer", "$35"),
        ]);

        let analysis = CardAnalysis::assemble(card, "uploads/a.png".into(), &scrape);

        assert_eq!(analysis.products, json!("Desk Plant, Organizer"));
        assert_eq!(analysis.scrape_status, "success");
        assert_eq!(
            analysis.additional_info["pricing_guide"],
            json!([{"item": "Desk Plant", "price": "$20"}, {"item": "Organizer", "price": "$35"}])
        );
        assert_eq!(analysis.additional_info["tagline"], json!(""));
    }

    #[test]
    fn card_products_win_over_scrape() {
        let card = CardExtraction {
            products: json!("Hampers"),
            ..Default::default()
        };
        let scrape = ScrapeOutcome::Structured(vec![PricedItem::new("Desk Plant", "$20")]);

        let analysis = CardAnalysis::assemble(card, String::new(), &scrape);

        assert_eq!(analysis.products, json!("Hampers"));
    }

    #[test]
    fn skipped_scrape_is_tagged() {
        let analysis =
            CardAnalysis::assemble(CardExtraction::default(), String::new(), &ScrapeOutcome::Skipped);

        assert_eq!(analysis.scrape_status, "no_website");
        assert_eq!(analysis.additional_info["pricing_guide"], json!(""));
    }
}
