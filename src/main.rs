//! Tagcounter main entry point
//!
//! This is the command-line interface for the tagcounter pipeline.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagcounter::config::load_config_or_default;
use tagcounter::output::{render_aliases, render_get, render_history, render_view};
use tagcounter::{AppContext, Outcome, TagCounterError};
use tracing_subscriber::EnvFilter;

/// Tagcounter: count the HTML tags on a web page
///
/// A site is given without the http prefix (e.g. google.com). An alias from
/// the alias file can be used instead (e.g. ggl). Each site is fetched once;
/// later requests are answered from the result database.
#[derive(Parser, Debug)]
#[command(name = "tagcounter")]
#[command(version)]
#[command(about = "Count the HTML tags on a web page", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Get tag counts, from the database if loaded before, otherwise from the internet
    Get {
        /// Site or alias
        site: String,
    },

    /// View tag counts from the database only
    View {
        /// Site or alias
        site: String,
    },

    /// Show every stored result for a site
    History {
        /// Site or alias
        site: String,
    },

    /// Manage aliases
    #[command(subcommand)]
    Alias(AliasCommand),

    /// Delete all stored results
    Reset,
}

#[derive(Subcommand, Debug)]
enum AliasCommand {
    /// List all aliases
    List,

    /// Add or overwrite an alias
    Add { alias: String, site: String },

    /// Replace an alias with a new name and site
    Rename {
        old_alias: String,
        new_alias: String,
        site: String,
    },

    /// Delete an alias
    Delete { alias: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config =
        load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Invalid default configuration".to_string(),
        })?;

    let ctx = AppContext::open(config).context("Failed to open tagcounter data files")?;

    match cli.command {
        Command::Get { site } => handle_get(ctx, &site).await,
        Command::View { site } => handle_view(ctx, &site),
        Command::History { site } => handle_history(ctx, &site),
        Command::Alias(command) => handle_alias(ctx, command),
        Command::Reset => handle_reset(ctx),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tagcounter=info,warn"),
            1 => EnvFilter::new("tagcounter=debug,info"),
            2 => EnvFilter::new("tagcounter=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `get`: runs the full pipeline
async fn handle_get(ctx: AppContext, site: &str) -> anyhow::Result<()> {
    let mut coordinator = ctx.into_coordinator();
    let outcome = coordinator
        .get(site)
        .await
        .with_context(|| format!("Failed to process {}", site))?;

    let message = render_get(&outcome);
    match outcome {
        Outcome::Failed { .. } => eprintln!("{}", message),
        _ => println!("{}", message),
    }
    Ok(())
}

/// Handles `view`: cache lookup only, never fetches
fn handle_view(ctx: AppContext, site: &str) -> anyhow::Result<()> {
    let coordinator = ctx.into_coordinator();
    let outcome = coordinator
        .view(site)
        .with_context(|| format!("Failed to look up {}", site))?;
    println!("{}", render_view(&outcome));
    Ok(())
}

/// Handles `history`: all stored records for a site
fn handle_history(ctx: AppContext, site: &str) -> anyhow::Result<()> {
    let coordinator = ctx.into_coordinator();
    let (resolved, records) = coordinator
        .history(site)
        .with_context(|| format!("Failed to load history for {}", site))?;
    println!("{}", render_history(&resolved, &records));
    Ok(())
}

/// Handles `alias` subcommands
fn handle_alias(ctx: AppContext, command: AliasCommand) -> anyhow::Result<()> {
    let resolver = &ctx.resolver;
    let result = match command {
        AliasCommand::List => {
            let aliases = resolver.list().context("Failed to read alias file")?;
            print!("{}", render_aliases(&aliases));
            return Ok(());
        }
        AliasCommand::Add { alias, site } => resolver
            .add(&alias, &site)
            .map(|()| format!("Alias {} - {} saved", alias.trim(), site.trim())),
        AliasCommand::Rename {
            old_alias,
            new_alias,
            site,
        } => resolver
            .rename(&old_alias, &new_alias, &site)
            .map(|()| {
                format!(
                    "Alias {} replaced by {} - {}",
                    old_alias.trim(),
                    new_alias.trim(),
                    site.trim()
                )
            }),
        AliasCommand::Delete { alias } => resolver
            .delete(&alias)
            .map(|()| format!("Alias {} deleted", alias.trim())),
    };

    match result {
        Ok(message) => {
            println!("{}", message);
            Ok(())
        }
        Err(e) if !e.is_fatal() => {
            eprintln!("{}", e);
            Ok(())
        }
        Err(e) => Err(TagCounterError::from(e)).context("Failed to update alias file"),
    }
}

/// Handles `reset`: truncates the result store
fn handle_reset(ctx: AppContext) -> anyhow::Result<()> {
    let mut coordinator = ctx.into_coordinator();
    coordinator.reset().context("Failed to truncate result store")?;
    println!("All stored results deleted");
    Ok(())
}
