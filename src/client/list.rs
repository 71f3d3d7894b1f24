//! User list component

use std::sync::Arc;

use super::http::{ClientError, UsersApi};
use crate::domain::{EventSink, Interaction, TrackedError, User};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    Loading,
    Empty,
    Loaded(Vec<User>),
    Error(String),
}

/// Server-fetched list of every registered user
#[derive(Debug)]
pub struct UserList {
    state: ListState,
    events: Arc<dyn EventSink>,
}

impl UserList {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            state: ListState::Loading,
            events,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn users(&self) -> &[User] {
        match &self.state {
            ListState::Loaded(users) => users.as_slice(),
            _ => &[],
        }
    }

    /// Initial fetch
    pub async fn mount(&mut self, api: &dyn UsersApi) -> &ListState {
        self.load(api).await
    }

    /// Manual re-fetch
    pub async fn refresh(&mut self, api: &dyn UsersApi) -> &ListState {
        self.events
            .interaction(Interaction::new("user_list", "refresh"));
        self.load(api).await
    }

    async fn load(&mut self, api: &dyn UsersApi) -> &ListState {
        self.state = ListState::Loading;
        let result = api.list_users().await;
        self.apply(result)
    }

    /// Apply a fetch result; whichever result is applied last wins
    pub fn apply(&mut self, result: Result<Vec<User>, ClientError>) -> &ListState {
        self.state = match result {
            Ok(users) if users.is_empty() => ListState::Empty,
            Ok(users) => ListState::Loaded(users),
            Err(e) => {
                let message = e.to_string();
                self.events
                    .error(TrackedError::new(message.clone(), "user_list"));
                ListState::Error(message)
            }
        };

        &self.state
    }
}
