//! In-process progress board for multi-step requests.
//!
//! The ingestion pipeline publishes human-readable status lines keyed by a
//! client-supplied request id; SSE endpoints subscribe and receive only the
//! lines that changed since their last event.
//!
//! # Usage
//!
//! Producers (pipeline steps):
//!   board.publish("req-42", "Scraping website...").await;
//!
//! Consumers (SSE endpoints):
//!   let events = board.subscribe("req-42");
//!
//! The board is bounded: entries idle longer than the TTL are purged on
//! publish, and the least recently updated entry is evicted once the
//! capacity is reached.

use futures::stream::{self, Stream};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Placeholder reported while nothing has been published for an id.
pub const INITIALIZING: &str = "Initializing...";

/// Message that ends a subscription after it has been delivered.
pub const COMPLETE: &str = "Complete";

/// Messages starting with this prefix end a subscription after delivery.
pub const ERROR_PREFIX: &str = "Error";

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Hard ceiling on polls per subscription (~60s at the default interval).
pub const MAX_POLLS: u32 = 600;

const DEFAULT_CAPACITY: usize = 1024;
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// One server-push event: `{"status": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    pub status: String,
}

#[derive(Debug, Clone)]
struct StatusEntry {
    message: String,
    touched: Instant,
}

/// Shared request-id → latest status mapping.
///
/// Thread-safe, cloneable; clones share the same entries.
#[derive(Clone)]
pub struct StatusBoard {
    entries: Arc<RwLock<HashMap<String, StatusEntry>>>,
    capacity: usize,
    ttl: Duration,
    poll_interval: Duration,
    max_polls: u32,
}

impl StatusBoard {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
            ttl,
            poll_interval: POLL_INTERVAL,
            max_polls: MAX_POLLS,
        }
    }

    /// Override the subscription poll tick and ceiling.
    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls.max(1);
        self
    }

    /// Overwrite the status for `request_id`. Empty ids are ignored.
    pub async fn publish(&self, request_id: &str, message: impl Into<String>) {
        let message = message.into();
        if request_id.is_empty() {
            warn!(status = %message, "Status update without request id ignored");
            return;
        }

        info!(request_id, status = %message, "Status update");

        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let ttl = self.ttl;
        entries.retain(|_, entry| now.duration_since(entry.touched) < ttl);

        if !entries.contains_key(request_id) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                debug!(request_id = %oldest, "Evicting status entry");
                entries.remove(&oldest);
            }
        }

        entries.insert(
            request_id.to_string(),
            StatusEntry {
                message,
                touched: now,
            },
        );
    }

    /// Latest message for `request_id`, if any.
    pub async fn current(&self, request_id: &str) -> Option<String> {
        self.entries
            .read()
            .await
            .get(request_id)
            .map(|entry| entry.message.clone())
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Edge-triggered event stream for `request_id`.
    ///
    /// Polls the board every tick and yields only when the message differs
    /// from the previous event. Ends after delivering [`COMPLETE`] or an
    /// [`ERROR_PREFIX`] message, or once the poll ceiling is reached.
    pub fn subscribe(&self, request_id: &str) -> impl Stream<Item = StatusEvent> + Send + 'static {
        let state = Subscription {
            board: self.clone(),
            request_id: request_id.to_string(),
            cursor: StatusCursor::new(self.max_polls),
            started: false,
        };

        stream::unfold(state, |mut state| async move {
            while !state.cursor.is_closed() {
                if state.started {
                    tokio::time::sleep(state.board.poll_interval).await;
                }
                state.started = true;

                let current = state.board.current(&state.request_id).await;
                if let Some(status) = state.cursor.observe(current.as_deref()) {
                    return Some((StatusEvent { status }, state));
                }
            }

            debug!(
                request_id = %state.request_id,
                polls = state.cursor.polls(),
                "Status stream closed"
            );
            None
        })
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

struct Subscription {
    board: StatusBoard,
    request_id: String,
    cursor: StatusCursor,
    started: bool,
}

/// True for messages that end a subscription.
pub fn is_terminal(message: &str) -> bool {
    message == COMPLETE || message.starts_with(ERROR_PREFIX)
}

/// Poll/emit decisions for one subscription, free of timers.
///
/// WAITING → EMITTING → CLOSED: each observation counts as one poll, a
/// message is emitted only when it differs from the last one emitted, and
/// the cursor closes after a terminal message or at the poll ceiling.
#[derive(Debug, Clone)]
pub struct StatusCursor {
    last: Option<String>,
    polls: u32,
    max_polls: u32,
    closed: bool,
}

impl StatusCursor {
    pub fn new(max_polls: u32) -> Self {
        Self {
            last: None,
            polls: 0,
            max_polls,
            closed: false,
        }
    }

    /// Feed one poll of the board. Returns the message to emit, if any.
    pub fn observe(&mut self, current: Option<&str>) -> Option<String> {
        if self.closed {
            return None;
        }
        self.polls += 1;

        let message = current.unwrap_or(INITIALIZING);
        let emit = if self.last.as_deref() != Some(message) {
            self.last = Some(message.to_string());
            Some(message.to_string())
        } else {
            None
        };

        if is_terminal(message) || self.polls >= self.max_polls {
            self.closed = true;
        }

        emit
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }
}
