use axum::extract::Extension;
use axum::Json;

use crate::domains::gifts::{search_gifts, GiftSearchResponse, SearchRequest};
use crate::server::app::AppState;
use crate::server::error::ApiResult;

/// POST /search-gifts
pub async fn search_gifts_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<GiftSearchResponse>> {
    Ok(Json(search_gifts(&request.query, &state.deps).await?))
}
