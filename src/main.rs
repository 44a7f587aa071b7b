//! Command-line front end for the finance dashboard.
//!
//! Reads a user's transactions from the local store, aggregates them and
//! prints the dashboard, or records new transactions and sessions.
//!
//! # Usage
//!
//! ```bash
//! gofinances --store gofinances.json sign-in --id 1234 --name "Ana" --email ana@example.com
//! gofinances --store gofinances.json register --name "Salário" --amount 5000 --type positive --category salary
//! gofinances --store gofinances.json dashboard --format text
//! ```
//!
//! Log verbosity is controlled with `RUST_LOG` (default `gofinances_highlights=info`).
//! Logs go to stderr so stdout can be redirected.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use gofinances_highlights::auth::{self, SignInOutcome};
use gofinances_highlights::engine;
use gofinances_highlights::io::{
    JsonStore, write_dashboard_as_json, write_dashboard_as_text, write_transactions_as_csv,
};
use gofinances_highlights::register::RegisterForm;
use gofinances_highlights::types::{TxType, User};

#[derive(Parser, Debug)]
#[command(version, about = "Personal finance dashboard")]
struct Cli {
    /// Path of the JSON key-value store.
    #[arg(long, default_value = "gofinances.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dashboard for a user.
    Dashboard {
        /// User whose transactions to show. Defaults to the signed-in user.
        #[arg(long)]
        user: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Record a new transaction for the signed-in user.
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        amount: String,

        #[arg(long = "type", value_enum)]
        tx_type: Option<TypeArg>,

        #[arg(long)]
        category: Option<String>,
    },
    /// Store the profile returned by the identity provider.
    SignIn {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        photo: Option<String>,
    },
    /// Forget the signed-in user.
    SignOut,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TypeArg {
    Positive,
    Negative,
}

impl From<TypeArg> for TxType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Positive => TxType::Positive,
            TypeArg::Negative => TxType::Negative,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gofinances_highlights=info,gofinances=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = JsonStore::open(&cli.store)?;

    match cli.command {
        Command::Dashboard { user, format } => {
            let user_id = match user {
                Some(id) => id,
                None => signed_in_user(&store)?.id,
            };

            let records = store.load_transactions(&user_id)?;
            let dashboard = engine::summarize(&records)
                .with_context(|| format!("Failed to summarize transactions of user {user_id}"))?;

            let stdout = io::stdout().lock();
            match format {
                OutputFormat::Text => write_dashboard_as_text(stdout, &dashboard)?,
                OutputFormat::Json => write_dashboard_as_json(stdout, &dashboard)?,
                OutputFormat::Csv => write_transactions_as_csv(stdout, &dashboard.transactions)?,
            }
        }
        Command::Register {
            name,
            amount,
            tx_type,
            category,
        } => {
            let user = signed_in_user(&store)?;
            let form = RegisterForm {
                name,
                amount,
                tx_type: tx_type.map(TxType::from),
                category,
            };

            let record = form.into_record(chrono::Local::now().fixed_offset())?;
            store.append_transaction(&user.id, record)?;
            store.save()?;
        }
        Command::SignIn {
            id,
            name,
            email,
            photo,
        } => {
            let user = User {
                id,
                name,
                email,
                photo,
            };
            auth::sign_in(&mut store, SignInOutcome::Success(user))?;
            store.save()?;
        }
        Command::SignOut => {
            if auth::sign_out(&mut store) {
                store.save()?;
            }
        }
    }

    Ok(())
}

fn signed_in_user(store: &JsonStore) -> Result<User> {
    auth::current_user(store)?.context("No user is signed in, run `sign-in` first")
}
