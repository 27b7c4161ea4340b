//! SSE progress stream.
//!
//! GET /status-stream/:request_id
//!
//! Emits `{"status": "..."}` events whenever the request's status changes and
//! closes after "Complete", an "Error..." message, or about a minute.

use std::convert::Infallible;

use axum::{
    extract::{Extension, Path},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};

use crate::server::app::AppState;

pub async fn status_stream_handler(
    Extension(state): Extension<AppState>,
    Path(request_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = state
        .deps
        .status
        .subscribe(&request_id)
        .filter_map(|event| async move { Event::default().json_data(&event).ok().map(Ok) });

    Sse::new(events).keep_alive(KeepAlive::default())
}
