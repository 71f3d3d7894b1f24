//! Client components for the users API
//!
//! The registration form and the user list talk to the server through
//! [`UsersApi`]; [`App`] wires them so a successful registration refreshes
//! the list, and renders each inside its own [`ErrorBoundary`].

pub mod boundary;
pub mod form;
pub mod http;
pub mod list;
pub mod render;

pub use boundary::ErrorBoundary;
pub use form::{SubmitStatus, UserForm};
pub use http::{ClientError, HttpUsersClient, NewUserPayload, UsersApi};
pub use list::{ListState, UserList};

use std::sync::Arc;

use crate::config::Environment;
use crate::domain::EventSink;

/// Form and list sharing one API client
pub struct App {
    api: Arc<dyn UsersApi>,
    pub form: UserForm,
    pub list: UserList,
    form_boundary: ErrorBoundary,
    list_boundary: ErrorBoundary,
}

impl App {
    pub fn new(api: Arc<dyn UsersApi>, events: Arc<dyn EventSink>, environment: Environment) -> Self {
        Self {
            api,
            form: UserForm::new(events.clone()),
            list: UserList::new(events.clone()),
            form_boundary: ErrorBoundary::new(environment, events.clone()),
            list_boundary: ErrorBoundary::new(environment, events),
        }
    }

    pub async fn mount(&mut self) -> &ListState {
        self.list.mount(self.api.as_ref()).await
    }

    /// Submit the form; a created user triggers a list refresh
    pub async fn submit(&mut self) -> &SubmitStatus {
        let mut created = false;
        self.form.submit(self.api.as_ref(), |_| created = true).await;

        if created {
            self.list.refresh(self.api.as_ref()).await;
        }

        self.form.status()
    }

    pub fn render(&mut self) -> String {
        self.render_with(render::form, render::list)
    }

    /// A panic in one view leaves the other one rendered
    fn render_with<F, L>(&mut self, form_view: F, list_view: L) -> String
    where
        F: FnOnce(&UserForm) -> String,
        L: FnOnce(&UserList) -> String,
    {
        let form = &self.form;
        let list = &self.list;

        let form_output = self.form_boundary.render(|| form_view(form));
        let list_output = self.list_boundary.render(|| list_view(list));

        format!("{}\n\n{}", form_output, list_output)
    }

    pub fn form_boundary(&mut self) -> &mut ErrorBoundary {
        &mut self.form_boundary
    }

    pub fn list_boundary(&mut self) -> &mut ErrorBoundary {
        &mut self.list_boundary
    }
}
