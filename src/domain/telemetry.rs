//! Observability sink port
//!
//! The route layer and the client components report API calls, errors and
//! user interactions through an injected [`EventSink`]. Nothing in the
//! request path depends on what the sink does with them.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A completed (or failed) API call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiCall {
    pub method: String,
    pub path: String,
    /// Response status, absent when the call never produced a response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub duration_ms: u64,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

impl ApiCall {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        status: Option<u16>,
        duration_ms: u64,
    ) -> Self {
        let success = status.is_some_and(|s| (200..300).contains(&s));

        Self {
            method: method.into(),
            path: path.into(),
            status,
            duration_ms,
            success,
            timestamp: Utc::now(),
        }
    }
}

/// An error worth keeping for later inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedError {
    pub message: String,
    pub context: String,
    pub timestamp: DateTime<Utc>,
}

impl TrackedError {
    pub fn new(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: context.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A user-driven action in a client component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub component: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

impl Interaction {
    pub fn new(component: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            action: action.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Receiver for observability events
pub trait EventSink: Send + Sync + Debug {
    fn api_call(&self, call: ApiCall);

    fn error(&self, error: TrackedError);

    fn interaction(&self, interaction: Interaction);
}
