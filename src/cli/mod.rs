//! Command-line front end.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use classwatch_core::Role;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "classwatch")]
#[command(about = "Classwatch - sign in to the dropout-risk dashboard and inspect access", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and persist the session credential
    Login {
        /// Username (prompted if not provided)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long, env = "CLASSWATCH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and discard the persisted credential
    Logout,
    /// Show the signed-in user and their role
    Whoami,
    /// Show the navigation menu visible to the signed-in user
    Menu {
        /// JSON menu definition to filter instead of the built-in one
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Print the filtered menu as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the guard decision for a dashboard route
    Check {
        /// Route path, e.g. /students/42
        path: String,
    },
    /// List the permission catalog
    Permissions {
        /// Only show what this role is granted
        #[arg(short = 'r', long)]
        role: Option<Role>,
    },
}

pub async fn run(cli: Cli, state: &AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Login { username, password } => {
            commands::login(state, username, password).await
        }
        Commands::Logout => commands::logout(state).await,
        Commands::Whoami => commands::whoami(state).await,
        Commands::Menu { file, json } => commands::menu(state, file.as_deref(), json).await,
        Commands::Check { path } => commands::check(state, &path).await,
        Commands::Permissions { role } => commands::permissions(role),
    }
}
