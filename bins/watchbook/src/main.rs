//! Watchbook CLI
//!
//! Browse and manage a Watchbook media library from the terminal.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::process::ExitCode;

mod commands;
mod context;
mod output;
mod store;

use commands::browse::ListingArgs;
use commands::{account, browse, home, providers, releases, search, system, tokens, users, view};
use context::Context;

/// Command-line front end for the Watchbook media library
#[derive(Parser)]
#[command(name = "watchbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Backend address
    #[arg(long, global = true, env = "API_ADDRESS")]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Account name
        username: String,

        /// Password (read from WATCHBOOK_PASSWORD when omitted)
        #[arg(long, env = "WATCHBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        /// Account name
        username: String,

        /// Password
        #[arg(long, env = "WATCHBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Home dashboard: in progress, backlog and recent additions
    Home,

    /// Quick title search
    Search {
        /// Text to look for in titles
        query: String,
    },

    /// Browse media
    Media {
        #[command(flatten)]
        args: browse::MediaArgs,
    },

    /// Browse shows
    Shows {
        #[command(flatten)]
        args: browse::ShowArgs,
    },

    /// Browse collections
    Collections {
        #[command(flatten)]
        args: browse::CollectionArgs,
    },

    /// A user's watchlist
    Watchlist {
        #[command(flatten)]
        args: browse::WatchlistArgs,
    },

    /// One media entry, show or collection in detail
    View {
        #[arg(value_enum)]
        kind: view::Kind,

        /// Library id
        id: String,
    },

    /// Upcoming and airing releases
    Releases {
        #[command(flatten)]
        args: releases::ReleaseArgs,
    },

    /// A user's profile and statistics
    User {
        /// User id
        id: String,
    },

    /// Your folders, or the items of one folder
    Folders {
        /// Folder id
        id: Option<String>,
    },

    /// Metadata providers
    Providers {
        #[command(subcommand)]
        action: providers::Action,
    },

    /// API tokens of the signed-in user
    Tokens {
        #[command(subcommand)]
        action: tokens::Action,
    },

    /// Queue an import of a MyAnimeList anime list
    ImportMal {
        /// MyAnimeList user name
        username: String,
    },

    /// Change the signed-in user's password
    Password {
        /// Current password
        #[arg(long)]
        current: String,

        /// New password
        #[arg(long)]
        new: String,
    },

    /// Backend version
    Info,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("watchbook=debug,watchbook_api_client=debug")
            .init();
    }

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;

    // Dry runs print the built query without touching the backend
    match &cli.command {
        Commands::Media { args } if args.dry_run() => return browse::dry_run(args, format),
        Commands::Shows { args } if args.dry_run() => return browse::dry_run(args, format),
        Commands::Collections { args } if args.dry_run() => return browse::dry_run(args, format),
        Commands::Watchlist { args } if args.dry_run() => return browse::dry_run(args, format),
        _ => {}
    }

    let mut ctx = Context::new(cli.api.as_deref(), format)?;

    match cli.command {
        Commands::Login { username, password } => account::login(&mut ctx, username, password).await,
        Commands::Register { username, password } => {
            account::register(&ctx, username, password).await
        }
        Commands::Logout => account::logout(&mut ctx),
        Commands::Whoami => account::whoami(&mut ctx).await,
        Commands::Password { current, new } => account::change_password(&mut ctx, current, new).await,
        Commands::Home => home::run(&mut ctx).await,
        Commands::Search { query } => search::run(&mut ctx, &query).await,
        Commands::Media { args } => browse::media(&mut ctx, &args).await,
        Commands::Shows { args } => browse::shows(&mut ctx, &args).await,
        Commands::Collections { args } => browse::collections(&mut ctx, &args).await,
        Commands::Watchlist { args } => browse::watchlist(&mut ctx, &args).await,
        Commands::View { kind, id } => view::run(&mut ctx, kind, &id).await,
        Commands::Releases { args } => releases::run(&mut ctx, &args).await,
        Commands::User { id } => users::profile(&mut ctx, &id).await,
        Commands::Folders { id } => users::folders(&mut ctx, id.as_deref()).await,
        Commands::Providers { action } => providers::run(&mut ctx, action).await,
        Commands::Tokens { action } => tokens::run(&mut ctx, action).await,
        Commands::ImportMal { username } => account::import_mal(&mut ctx, &username).await,
        Commands::Info => system::info(&ctx).await,
    }
}
