//! Error boundary for render-time panics

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::error;

use super::render;
use crate::api::middleware::panic::panic_message;
use crate::config::Environment;
use crate::domain::{EventSink, TrackedError};

/// Renders a view, showing a fallback once the view has panicked
///
/// The fallback stays until [`ErrorBoundary::reset`] is called. Request
/// failures are not panics and never reach the boundary.
#[derive(Debug)]
pub struct ErrorBoundary {
    error: Option<String>,
    environment: Environment,
    events: Arc<dyn EventSink>,
}

impl ErrorBoundary {
    pub fn new(environment: Environment, events: Arc<dyn EventSink>) -> Self {
        Self {
            error: None,
            environment,
            events,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn render<F>(&mut self, view: F) -> String
    where
        F: FnOnce() -> String,
    {
        if self.error.is_none() {
            match panic::catch_unwind(AssertUnwindSafe(view)) {
                Ok(output) => return output,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(panic = %message, "View panicked");
                    self.events
                        .error(TrackedError::new(message.clone(), "error_boundary"));
                    self.error = Some(message);
                }
            }
        }

        self.fallback()
    }

    /// Clear the caught error so the next render tries the view again
    pub fn reset(&mut self) {
        self.error = None;
    }

    fn fallback(&self) -> String {
        let detail = self
            .error
            .as_deref()
            .filter(|_| self.environment.exposes_error_details());

        render::fallback(detail)
    }
}
