//! Users command - drives the client components against a running server

use std::sync::Arc;

use clap::{Args, Subcommand};
use tracing::info;

use crate::client::{render, App, HttpUsersClient, SubmitStatus};
use crate::infrastructure::telemetry::TracingEventSink;

use super::bootstrap;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Arguments for the users command
#[derive(Args, Clone)]
pub struct UsersArgs {
    /// Base URL of the server
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub action: UsersAction,
}

#[derive(Subcommand, Clone)]
pub enum UsersAction {
    /// Print every registered user
    List,

    /// Register a user, then print the refreshed list
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,
    },
}

pub async fn run(args: UsersArgs) -> anyhow::Result<()> {
    let config = bootstrap()?;
    info!("Using API at {}", args.api_url);

    let events = Arc::new(TracingEventSink);
    let api = Arc::new(HttpUsersClient::new(args.api_url, events.clone()));
    let mut app = App::new(api, events, config.environment);

    match args.action {
        UsersAction::List => {
            app.mount().await;
            println!("{}", render::list(&app.list));
        }
        UsersAction::Add { name, email } => {
            app.form.set_name(name);
            app.form.set_email(email);

            let status = app.submit().await.clone();
            match status {
                SubmitStatus::Success => println!("{}", app.render()),
                SubmitStatus::Error(message) => anyhow::bail!("{}", message),
                SubmitStatus::Idle | SubmitStatus::Submitting => {
                    anyhow::bail!("Both --name and --email are required")
                }
            }
        }
    }

    Ok(())
}
