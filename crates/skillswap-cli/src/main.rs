//! `skillswap` - operator tool for the SkillSwap message and request store.
//!
//! Reads `SKILLSWAP_DB_PATH` and `SKILLSWAP_ENCRYPTION_KEY` from the
//! environment or a `.env` file. Output is JSON on stdout; logs go to stderr.

mod audit;
mod config;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use skillswap_core::SkillSwap;
use skillswap_crypto::MessageCipher;
use skillswap_crypto::keys::{generate_message_key, key_to_base64};
use skillswap_db::{Database, migrations};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "skillswap", about = "Operate the SkillSwap message and request store")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a fresh base64 message key.
    Keygen,
    /// Apply pending schema migrations and print the schema version.
    Migrate,
    /// Report how stored messages decrypt under the configured key.
    Audit,
    /// List a user's conversations, most recently active first.
    Conversations {
        #[arg(long)]
        user: i64,
    },
    /// Show a conversation as a participant sees it (marks it read).
    Messages {
        #[arg(long)]
        conversation: i64,
        #[arg(long)]
        user: i64,
    },
    /// Send a message, opening the conversation if needed.
    Send {
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
        text: String,
    },
}

fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skillswap=info,skillswap_core=info,skillswap_db=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    match args.command {
        Command::Keygen => {
            println!("{}", key_to_base64(&generate_message_key()));
        }
        Command::Migrate => {
            let db = Database::open(&config.db_path)?;
            let version = db.with_conn(migrations::current_version)?;
            info!("Store at {} is at schema v{}", config.db_path.display(), version);
            print_json(&serde_json::json!({ "schema_version": version }))?;
        }
        Command::Audit => {
            let cipher = require_cipher(&config);
            let db = Database::open(&config.db_path)?;
            print_json(&audit::run(&db, &cipher)?)?;
        }
        Command::Conversations { user } => {
            let app = open_app(&config)?;
            print_json(&app.summaries.list_for_user(user)?)?;
        }
        Command::Messages { conversation, user } => {
            let app = open_app(&config)?;
            print_json(&app.messages.list(conversation, user)?)?;
        }
        Command::Send { from, to, text } => {
            let app = open_app(&config)?;
            print_json(&app.messages.send(from, to, &text)?)?;
        }
    }

    Ok(())
}

fn open_app(config: &Config) -> Result<SkillSwap> {
    let cipher = require_cipher(config);
    let db = Arc::new(Database::open(&config.db_path)?);
    Ok(SkillSwap::new(db, cipher))
}

/// Message content is never handled without a valid key.
fn require_cipher(config: &Config) -> MessageCipher {
    match config.cipher() {
        Ok(cipher) => cipher,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            eprintln!("       Generate one with `skillswap keygen`, set it in your .env file and restart.");
            std::process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
