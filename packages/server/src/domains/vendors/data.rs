use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Vendor payload accepted by save/update.
///
/// Every field is optional: the review form may submit partially filled cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub additional_info: Value,
    #[serde(default)]
    pub image_path: Option<String>,
    /// Product list sent next to the card fields; stored as `additional_info.products_sold`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Value>,
}

impl VendorInput {
    /// Move a top-level `products` value into `additional_info.products_sold`.
    pub fn fold_products(mut self) -> Self {
        if let Some(products) = self.products.take() {
            let mut info = self.info_map();
            info.insert("products_sold".to_string(), products);
            self.additional_info = Value::Object(info);
        }
        self
    }

    /// `additional_info` as a mapping. Scalars and lists are kept under `value`.
    pub fn info_map(&self) -> Map<String, Value> {
        match &self.additional_info {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other.clone());
                map
            }
        }
    }

    /// Serialized mapping stored in the `additional_info` column.
    pub fn info_json(&self) -> String {
        Value::Object(self.info_map()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn products_move_into_existing_info() {
        let input: VendorInput = serde_json::from_value(json!({
            "name": "Luxe Leatherworks",
            "products": "Wallets, Journals",
            "additional_info": {"tagline": "Handmade"}
        }))
        .unwrap();

        let folded = input.fold_products();

        assert!(folded.products.is_none());
        assert_eq!(
            folded.additional_info,
            json!({"tagline": "Handmade", "products_sold": "Wallets, Journals"})
        );
    }

    #[test]
    fn products_create_info_when_missing() {
        let input = VendorInput {
            products: Some(json!(["Mugs"])),
            ..Default::default()
        };

        assert_eq!(
            input.fold_products().additional_info,
            json!({"products_sold": ["Mugs"]})
        );
    }

    #[test]
    fn non_mapping_info_is_wrapped() {
        let input = VendorInput {
            additional_info: json!(["a", "b"]),
            ..Default::default()
        };

        assert_eq!(input.info_json(), r#"{"value":["a","b"]}"#);
    }

    #[test]
    fn missing_info_serializes_as_empty_mapping() {
        assert_eq!(VendorInput::default().info_json(), "{}");
    }
}
