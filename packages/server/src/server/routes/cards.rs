use axum::extract::{multipart::Field, Extension, Multipart};
use axum::Json;
use tracing::debug;

use crate::domains::cards::{analyze_card, CardAnalysis, UploadedImage};
use crate::domains::vendors::Vendor;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

/// POST /analyze-card
///
/// Multipart fields: `file` (front, required), `back_file` (optional) and
/// `request_id` (optional, keys the status stream).
pub async fn analyze_card_handler(
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<CardAnalysis>> {
    let mut front = None;
    let mut back = None;
    let mut request_id = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => front = Some(read_upload(field).await?),
            "back_file" => back = Some(read_upload(field).await?),
            "request_id" => {
                request_id = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?
                    .trim()
                    .to_string();
            }
            other => debug!(field = other, "Ignoring multipart field"),
        }
    }

    let front = front
        .filter(|image: &UploadedImage| !image.bytes.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;
    let back = back.filter(|image: &UploadedImage| !image.bytes.is_empty());

    let analysis = analyze_card(&request_id, front, back, &state.deps).await?;
    Ok(Json(analysis))
}

async fn read_upload(field: Field<'_>) -> ApiResult<UploadedImage> {
    let file_name = field.file_name().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(UploadedImage {
        file_name,
        bytes: bytes.to_vec(),
    })
}

/// GET /cards
pub async fn list_cards_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<Vendor>>> {
    Ok(Json(Vendor::find_all(&state.deps.db_pool).await?))
}
