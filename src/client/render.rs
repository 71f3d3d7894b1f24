//! Plain-text views of the client components

use super::form::{SubmitStatus, UserForm};
use super::list::{ListState, UserList};

pub const SUCCESS_MESSAGE: &str = "Welcome aboard! User created successfully.";
pub const FALLBACK_TITLE: &str = "Something went wrong!";

pub fn form(form: &UserForm) -> String {
    let mut out = String::from("Register User\n");
    out.push_str(&format!("Name: {}\n", form.name()));
    out.push_str(&format!("Email: {}\n", form.email()));

    let button = if form.is_submitting() {
        "[Creating...]"
    } else {
        "[Create User]"
    };
    out.push_str(button);

    match form.status() {
        SubmitStatus::Success => {
            out.push('\n');
            out.push_str(SUCCESS_MESSAGE);
        }
        SubmitStatus::Error(message) => {
            out.push('\n');
            out.push_str(&format!("Oops! {}", message));
        }
        SubmitStatus::Idle | SubmitStatus::Submitting => {}
    }

    out
}

pub fn list(list: &UserList) -> String {
    let body = match list.state() {
        ListState::Loading => "Loading users...".to_string(),
        ListState::Empty => "No users found.".to_string(),
        ListState::Error(message) => format!("Error: {}", message),
        ListState::Loaded(users) => users
            .iter()
            .map(|u| format!("{} - {}", u.name(), u.email()))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    format!("Users\n{}", body)
}

/// Fallback shown by the error boundary
pub fn fallback(detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{}\n{}", FALLBACK_TITLE, detail),
        None => FALLBACK_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::http::ClientError;
    use crate::domain::{User, UserId};
    use crate::infrastructure::telemetry::NoopEventSink;

    #[test]
    fn test_form_views() {
        let mut user_form = UserForm::new(Arc::new(NoopEventSink));
        user_form.set_name("Jane");
        user_form.set_email("jane@example.com");

        let view = form(&user_form);
        assert!(view.contains("Name: Jane"));
        assert!(view.ends_with("[Create User]"));

        user_form.begin_submit();
        assert!(form(&user_form).ends_with("[Creating...]"));

        user_form.finish_submit(Err(ClientError::Api {
            status: 409,
            message: "Email already exists".to_string(),
        }));
        assert!(form(&user_form).ends_with("Oops! Email already exists"));

        user_form.begin_submit();
        user_form.finish_submit(Ok(User::new(UserId::new(1), "Jane", "jane@example.com")));
        let view = form(&user_form);
        assert!(view.contains("Name: \n"));
        assert!(view.ends_with(SUCCESS_MESSAGE));
    }

    #[test]
    fn test_list_views() {
        let mut user_list = UserList::new(Arc::new(NoopEventSink));
        assert_eq!(list(&user_list), "Users\nLoading users...");

        user_list.apply(Ok(Vec::new()));
        assert_eq!(list(&user_list), "Users\nNo users found.");

        user_list.apply(Ok(vec![
            User::new(UserId::new(1), "Jane Smith", "jane@example.com"),
            User::new(UserId::new(2), "John", "john@example.com"),
        ]));
        assert_eq!(
            list(&user_list),
            "Users\nJane Smith - jane@example.com\nJohn - john@example.com"
        );

        user_list.apply(Err(ClientError::Network("timed out".to_string())));
        assert_eq!(list(&user_list), "Users\nError: timed out");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(fallback(None), "Something went wrong!");
        assert_eq!(fallback(Some("boom")), "Something went wrong!\nboom");
    }
}
