//! CLI entry point for the feedback tracker.
//!
//! Talks to the same backend as the web UI; the session is kept in a JSON
//! file so consecutive commands stay signed in.

mod commands;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use api_client::{ApiClient, ApiError, ClientConfig, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};
use core_types::Sentiment;
use tracing_subscriber::EnvFilter;

use crate::session::FileSessionStore;

/// feedback: manager/employee feedback tracker
#[derive(Parser)]
#[command(name = "feedback")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "FEEDBACK_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Where the session is saved (default: $HOME/.feedback-session.json)
    #[arg(long, global = true, env = "FEEDBACK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and save the session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Sign out and forget the session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Dashboard statistics
    Stats,

    /// List your team with feedback counts
    Team {
        /// Include deactivated members
        #[arg(long)]
        all: bool,
    },

    /// Feedback you have received
    Received,

    /// Feedback you have given
    Given,

    /// All feedback for one team member
    MemberFeedback {
        /// Team member ID
        id: i64,
    },

    /// Give feedback to a team member
    Give {
        /// Team member ID
        #[arg(short, long)]
        employee: i64,

        #[arg(short, long)]
        strengths: String,

        /// Areas to improve
        #[arg(short, long)]
        improve: String,

        /// positive, neutral or negative (constructive)
        #[arg(long)]
        sentiment: Sentiment,
    },

    /// Edit feedback you gave
    Edit {
        /// Feedback ID
        id: i64,

        #[arg(short, long)]
        strengths: String,

        /// Areas to improve
        #[arg(short, long)]
        improve: String,

        #[arg(long)]
        sentiment: Sentiment,
    },

    /// Acknowledge feedback you received
    Ack {
        /// Feedback ID
        id: i64,
    },

    /// Create an employee account on your team
    AddMember {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Change a team member's username or email
    UpdateMember {
        /// Team member ID
        id: i64,

        #[arg(long)]
        username: Option<String>,

        /// New email; pass an empty string to leave it unchanged
        #[arg(long)]
        email: Option<String>,
    },

    /// Activate or deactivate a team member
    ToggleMember {
        /// Team member ID
        id: i64,
    },

    /// Statistics for a manager's team (raw JSON)
    TeamStats {
        manager_id: i64,
    },

    /// Per-member overview of your team (raw JSON)
    Overview,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let session_file = match cli.session_file {
        Some(path) => path,
        None => session::default_path()
            .context("HOME is not set; pass --session-file or set FEEDBACK_SESSION_FILE")?,
    };
    let client = ApiClient::new(
        ClientConfig::new(cli.api_url),
        Arc::new(FileSessionStore::new(session_file)),
    );

    match cli.command {
        Commands::Login { username, password } => {
            commands::login(&client, &username, &password).await
        }
        Commands::Logout => commands::logout(&client).await,
        Commands::Whoami => commands::whoami(&client).await,
        Commands::Stats => commands::stats(&client).await,
        Commands::Team { all } => commands::team(&client, all).await,
        Commands::Received => commands::received(&client).await,
        Commands::Given => commands::given(&client).await,
        Commands::MemberFeedback { id } => commands::member_feedback(&client, id).await,
        Commands::Give {
            employee,
            strengths,
            improve,
            sentiment,
        } => commands::give(&client, employee, strengths, improve, sentiment).await,
        Commands::Edit {
            id,
            strengths,
            improve,
            sentiment,
        } => commands::edit(&client, id, strengths, improve, sentiment).await,
        Commands::Ack { id } => commands::acknowledge(&client, id).await,
        Commands::AddMember {
            username,
            email,
            password,
            confirm_password,
        } => {
            commands::add_member(&client, username, email, password, confirm_password).await
        }
        Commands::UpdateMember { id, username, email } => {
            commands::update_member(&client, id, username, email).await
        }
        Commands::ToggleMember { id } => commands::toggle_member(&client, id).await,
        Commands::TeamStats { manager_id } => commands::team_stats(&client, manager_id).await,
        Commands::Overview => commands::overview(&client).await,
    }
}

/// Print the message a user should see for `err`.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ApiError>() {
        Some(api) => {
            // the outermost context, when present, is the action's fallback
            eprintln!("{}", api.message_or(&err.to_string()));
            if api.is_unauthorized() {
                eprintln!("Run `feedback login` to sign in again.");
            }
        }
        None => eprintln!("Error: {err:#}"),
    }
}
