//! Registration form component

use std::sync::Arc;

use tracing::debug;

use super::http::{ClientError, NewUserPayload, UsersApi};
use crate::domain::{EventSink, Interaction, TrackedError, User};

/// Where the form is in its submit cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// Two-field form posting a new user
#[derive(Debug)]
pub struct UserForm {
    name: String,
    email: String,
    status: SubmitStatus,
    events: Arc<dyn EventSink>,
}

impl UserForm {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            status: SubmitStatus::Idle,
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Both fields are required; nothing else is checked before sending
    pub fn is_submit_disabled(&self) -> bool {
        self.is_submitting() || self.name.is_empty() || self.email.is_empty()
    }

    /// Enter `Submitting` and hand out the request body
    ///
    /// Returns `None` without changing state while a submit is outstanding
    /// or a required field is empty.
    pub fn begin_submit(&mut self) -> Option<NewUserPayload> {
        if self.is_submit_disabled() {
            debug!("Ignoring submit");
            return None;
        }

        self.events
            .interaction(Interaction::new("user_form", "submit"));
        self.status = SubmitStatus::Submitting;

        Some(NewUserPayload {
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }

    /// Apply the outcome of the create request
    ///
    /// On success both fields are cleared and the created user is returned.
    /// On failure the entered values stay for correction.
    pub fn finish_submit(&mut self, result: Result<User, ClientError>) -> Option<User> {
        match result {
            Ok(user) => {
                self.name.clear();
                self.email.clear();
                self.status = SubmitStatus::Success;
                Some(user)
            }
            Err(e) => {
                let message = e.to_string();
                self.events
                    .error(TrackedError::new(message.clone(), "user_form"));
                self.status = SubmitStatus::Error(message);
                None
            }
        }
    }

    /// Submit the form, calling `on_created` with the stored user on success
    pub async fn submit<F>(&mut self, api: &dyn UsersApi, on_created: F) -> &SubmitStatus
    where
        F: FnOnce(&User),
    {
        if let Some(payload) = self.begin_submit() {
            let result = api.create_user(&payload).await;
            if let Some(user) = self.finish_submit(result) {
                on_created(&user);
            }
        }

        &self.status
    }
}
