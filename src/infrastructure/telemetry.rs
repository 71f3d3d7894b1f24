//! Event sink implementations

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error, info, warn};

use crate::domain::telemetry::{ApiCall, EventSink, Interaction, TrackedError};

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn api_call(&self, _call: ApiCall) {}

    fn error(&self, _error: TrackedError) {}

    fn interaction(&self, _interaction: Interaction) {}
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn api_call(&self, call: ApiCall) {
        if call.success {
            debug!(
                method = %call.method,
                path = %call.path,
                status = ?call.status,
                duration_ms = call.duration_ms,
                "API call"
            );
        } else {
            warn!(
                method = %call.method,
                path = %call.path,
                status = ?call.status,
                duration_ms = call.duration_ms,
                "API call failed"
            );
        }
    }

    fn error(&self, tracked: TrackedError) {
        error!(context = %tracked.context, "{}", tracked.message);
    }

    fn interaction(&self, interaction: Interaction) {
        info!(
            component = %interaction.component,
            action = %interaction.action,
            "User interaction"
        );
    }
}

/// Keeps events in memory for inspection during development and tests
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    api_calls: Mutex<Vec<ApiCall>>,
    errors: Mutex<Vec<TrackedError>>,
    interactions: Mutex<Vec<Interaction>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_calls(&self) -> Vec<ApiCall> {
        lock(&self.api_calls).clone()
    }

    pub fn failed_api_calls(&self) -> Vec<ApiCall> {
        lock(&self.api_calls)
            .iter()
            .filter(|c| !c.success)
            .cloned()
            .collect()
    }

    pub fn errors(&self) -> Vec<TrackedError> {
        lock(&self.errors).clone()
    }

    pub fn interactions(&self) -> Vec<Interaction> {
        lock(&self.interactions).clone()
    }

    pub fn clear(&self) {
        lock(&self.api_calls).clear();
        lock(&self.errors).clear();
        lock(&self.interactions).clear();
    }
}

impl EventSink for RecordingEventSink {
    fn api_call(&self, call: ApiCall) {
        lock(&self.api_calls).push(call);
    }

    fn error(&self, error: TrackedError) {
        lock(&self.errors).push(error);
    }

    fn interaction(&self, interaction: Interaction) {
        lock(&self.interactions).push(interaction);
    }
}

/// A poisoned recorder still holds usable data
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_collects_events() {
        let sink = RecordingEventSink::new();

        sink.api_call(ApiCall::new("GET", "/api/users", Some(200), 2));
        sink.api_call(ApiCall::new("POST", "/api/users", Some(409), 4));
        sink.error(TrackedError::new("Email already exists", "POST /api/users"));
        sink.interaction(Interaction::new("user_form", "submit"));

        assert_eq!(sink.api_calls().len(), 2);
        assert_eq!(sink.failed_api_calls().len(), 1);
        assert_eq!(sink.failed_api_calls()[0].status, Some(409));
        assert_eq!(sink.errors()[0].message, "Email already exists");
        assert_eq!(sink.interactions()[0].action, "submit");
    }

    #[test]
    fn test_recording_sink_clear() {
        let sink = RecordingEventSink::new();
        sink.interaction(Interaction::new("user_list", "refresh"));
        sink.error(TrackedError::new("boom", "render"));

        sink.clear();

        assert!(sink.interactions().is_empty());
        assert!(sink.errors().is_empty());
    }

    #[test]
    fn test_sinks_are_object_safe() {
        let sinks: Vec<Box<dyn EventSink>> = vec![
            Box::new(NoopEventSink),
            Box::new(TracingEventSink),
            Box::new(RecordingEventSink::new()),
        ];

        for sink in &sinks {
            sink.interaction(Interaction::new("test", "noop"));
        }
    }
}
