use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashSet;

use crate::domains::vendors::data::VendorInput;

/// A vendor captured from a business card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub category: Option<String>,
    pub website: Option<String>,
    /// Always a mapping; absent or malformed blobs read back as `{}`
    pub additional_info: Map<String, Value>,
    pub image_path: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Raw `cards` row; `additional_info` is still JSON text.
#[derive(Debug, FromRow)]
struct VendorRow {
    id: i64,
    name: Option<String>,
    contact: Option<String>,
    category: Option<String>,
    website: Option<String>,
    additional_info: Option<String>,
    image_path: Option<String>,
    created_at: NaiveDateTime,
}

impl VendorRow {
    fn into_vendor(self) -> Vendor {
        Vendor {
            id: self.id,
            name: self.name,
            contact: self.contact,
            category: self.category,
            website: self.website,
            additional_info: decode_additional_info(self.additional_info.as_deref()),
            image_path: self.image_path,
            created_at: self.created_at,
        }
    }
}

/// Parse the stored blob, falling back to an empty mapping.
pub fn decode_additional_info(raw: Option<&str>) -> Map<String, Value> {
    match raw.map(serde_json::from_str::<Value>) {
        Some(Ok(Value::Object(map))) => map,
        _ => Map::new(),
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, contact, category, website, additional_info, image_path, created_at FROM cards";

impl Vendor {
    /// Insert a vendor and return its id.
    pub async fn create(input: &VendorInput, pool: &SqlitePool) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO cards (name, contact, category, website, additional_info, image_path)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact)
        .bind(&input.category)
        .bind(&input.website)
        .bind(input.info_json())
        .bind(&input.image_path)
        .execute(pool)
        .await
        .context("Failed to insert vendor")?;

        Ok(result.last_insert_rowid())
    }

    /// Replace every editable field. `None` if the id does not exist.
    pub async fn update(id: i64, input: &VendorInput, pool: &SqlitePool) -> Result<Option<i64>> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET name = ?, contact = ?, category = ?, website = ?, additional_info = ?, image_path = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact)
        .bind(&input.category)
        .bind(&input.website)
        .bind(input.info_json())
        .bind(&input.image_path)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update vendor")?;

        Ok((result.rows_affected() > 0).then_some(id))
    }

    /// Delete a vendor. Returns whether a row was removed.
    pub async fn delete(id: i64, pool: &SqlitePool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to delete vendor")?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(id: i64, pool: &SqlitePool) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, VendorRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("Failed to load vendor")?;

        Ok(row.map(VendorRow::into_vendor))
    }

    /// All vendors, newest first.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, VendorRow>(&format!(
            "{} ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(pool)
        .await
        .context("Failed to list vendors")?;

        Ok(rows.into_iter().map(VendorRow::into_vendor).collect())
    }

    /// Vendors matching ANY whitespace-separated keyword.
    ///
    /// A keyword matches when it is a case-insensitive substring of the
    /// name, the category or the serialized `additional_info`.
    pub async fn search(query: &str, pool: &SqlitePool) -> Result<Vec<Self>> {
        let keywords: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let condition = "(lower(name) LIKE ? ESCAPE '\\' OR lower(category) LIKE ? ESCAPE '\\' OR lower(additional_info) LIKE ? ESCAPE '\\')";
        let sql = format!(
            "{} WHERE {} ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS,
            vec![condition; keywords.len()].join(" OR ")
        );

        let mut statement = sqlx::query_as::<_, VendorRow>(&sql);
        for keyword in &keywords {
            let pattern = format!("%{}%", escape_like(keyword));
            statement = statement
                .bind(pattern.clone())
                .bind(pattern.clone())
                .bind(pattern);
        }

        let rows = statement
            .fetch_all(pool)
            .await
            .context("Failed to search vendors")?;

        let mut seen = HashSet::new();
        Ok(rows
            .into_iter()
            .filter(|row| seen.insert(row.id))
            .map(VendorRow::into_vendor)
            .collect())
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards")
            .fetch_one(pool)
            .await
            .context("Failed to count vendors")?;
        Ok(count)
    }
}

/// Escape LIKE wildcards so keywords match literally.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
