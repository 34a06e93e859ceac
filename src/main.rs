use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finbot::audit::AuditLogger;
use finbot::bot::Bot;
use finbot::cli::{
    handle_chat, handle_delete, handle_export_command, handle_history, handle_send,
    handle_summary, handle_users, ExportFormat,
};
use finbot::config::{paths::BotPaths, settings::Settings};
use finbot::models::UserId;
use finbot::storage::LedgerStore;

#[derive(Parser)]
#[command(
    name = "finbot",
    version,
    about = "Chat-driven personal finance assistant",
    long_about = "Finbot keeps a small ledger per chat user: a monthly income, \
                  named budgets and a list of expenses. Users configure it \
                  through a short conversation and log entries with messages \
                  like 'expense 12.50 food'."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the bot on the terminal, one message per line
    Chat {
        /// User identity to chat as
        #[arg(short, long)]
        user: UserId,
    },

    /// Send a single message and print the reply
    Send {
        /// User identity sending the message
        #[arg(short, long)]
        user: UserId,
        /// Message text
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show a user's budget summary
    Summary {
        #[arg(short, long)]
        user: UserId,
        /// Show a column table instead of the chat message
        #[arg(long)]
        table: bool,
    },

    /// Export a user's ledger
    Export {
        #[arg(short, long)]
        user: UserId,
        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show recent ledger changes from the audit log
    History {
        #[arg(short, long)]
        user: UserId,
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// List users with a stored ledger
    Users,

    /// Delete a user's ledger file
    Delete {
        #[arg(short, long)]
        user: UserId,
    },

    /// Write default settings to the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = BotPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Chat { user }) => {
            let bot = Bot::new(paths, settings);
            handle_chat(&bot, user)?;
        }
        Some(Commands::Send { user, text }) => {
            let bot = Bot::new(paths, settings);
            handle_send(&bot, user, &text)?;
        }
        Some(Commands::Summary { user, table }) => {
            let store = LedgerStore::new(paths);
            handle_summary(&store, &settings, user, table)?;
        }
        Some(Commands::Export {
            user,
            format,
            output,
            pretty,
        }) => {
            let store = LedgerStore::new(paths);
            handle_export_command(&store, user, format, output, pretty)?;
        }
        Some(Commands::History { user, limit }) => {
            let audit = if settings.audit_enabled {
                AuditLogger::new(paths.audit_log())
            } else {
                AuditLogger::disabled()
            };
            handle_history(&audit, user, limit)?;
        }
        Some(Commands::Users) => {
            let store = LedgerStore::new(paths);
            handle_users(&store, &settings)?;
        }
        Some(Commands::Delete { user }) => {
            let store = LedgerStore::new(paths);
            handle_delete(&store, user)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Finbot at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Settings written to: {}", paths.settings_file().display());
            println!("Run 'finbot chat --user <id>' to start a conversation.");
        }
        Some(Commands::Config) => {
            println!("Finbot Configuration");
            println!("====================");
            println!("Data directory:  {}", paths.base_dir().display());
            println!("Ledgers:         {}", paths.ledger_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Default category:     {}", settings.default_category);
            match settings.session_timeout() {
                Some(timeout) => {
                    println!("  Session timeout:      {}s", timeout.as_secs())
                }
                None => println!("  Session timeout:      never"),
            }
            println!("  Audit enabled:        {}", settings.audit_enabled);
            println!("  Negative amounts:     {}", settings.allow_negative_amounts);
            match Settings::bot_token() {
                Some(token) => println!("  Bot token:            {}", token),
                None => println!("  Bot token:            (not set)"),
            }
        }
        None => {
            println!("Finbot - chat-driven personal finance assistant");
            println!();
            println!("Run 'finbot --help' for usage information.");
            println!("Run 'finbot chat --user <id>' to talk to the bot.");
        }
    }

    Ok(())
}
