use axum::extract::{Extension, Path};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domains::vendors::{Vendor, VendorInput};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct VendorMutation {
    pub id: i64,
    pub message: String,
}

/// POST /save-vendor
pub async fn save_vendor_handler(
    Extension(state): Extension<AppState>,
    Json(input): Json<VendorInput>,
) -> ApiResult<Json<VendorMutation>> {
    let input = input.fold_products();
    let id = Vendor::create(&input, &state.deps.db_pool).await?;
    info!(vendor_id = id, "Vendor saved");

    Ok(Json(VendorMutation {
        id,
        message: "Vendor saved successfully".to_string(),
    }))
}

/// PUT /update-vendor/:id
pub async fn update_vendor_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<VendorInput>,
) -> ApiResult<Json<VendorMutation>> {
    let input = input.fold_products();
    Vendor::update(id, &input, &state.deps.db_pool)
        .await?
        .ok_or_else(|| vendor_not_found(id))?;
    info!(vendor_id = id, "Vendor updated");

    Ok(Json(VendorMutation {
        id,
        message: "Vendor updated successfully".to_string(),
    }))
}

/// DELETE /delete-vendor/:id
pub async fn delete_vendor_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<VendorMutation>> {
    if !Vendor::delete(id, &state.deps.db_pool).await? {
        return Err(vendor_not_found(id));
    }
    info!(vendor_id = id, "Vendor deleted");

    Ok(Json(VendorMutation {
        id,
        message: "Vendor deleted successfully".to_string(),
    }))
}

fn vendor_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Vendor {} not found", id))
}
