mod client;
mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use evently_core::config::EventlyConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::Client;
use crate::commands::edit::EditEventArgs;
use crate::commands::new::NewEventArgs;

#[derive(Parser)]
#[command(name = "evently")]
#[command(about = "Browse, search and edit events on an evently backend")]
struct Cli {
    /// Backend URL (overrides base_url from the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally filtered
    List {
        /// Only events whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only events in this category (by id)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a single event
    Show { id: i64 },
    /// Add a new event
    New {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Start date/time (e.g., "2025-03-20T15:00")
        #[arg(short, long)]
        start: String,

        /// End date/time (e.g., "2025-03-20T17:00")
        #[arg(short, long)]
        end: String,

        /// Category id (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<i64>,

        /// Id of the user creating the event
        #[arg(long)]
        created_by: Option<i64>,
    },
    /// Edit an existing event
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        image: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        /// Category id to add (repeatable)
        #[arg(long = "add-category")]
        add_categories: Vec<i64>,

        /// Category id to remove (repeatable)
        #[arg(long = "remove-category")]
        remove_categories: Vec<i64>,
    },
    /// Delete an event
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evently=warn,evently_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = EventlyConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let client = Client::from_config(&config)?;
    tracing::debug!(base_url = %client.base_url(), "Using backend");
    let engine = config.engine();

    match cli.command {
        Commands::List { search, category } => {
            commands::list::run(&client, &engine, search, category).await
        }
        Commands::Show { id } => commands::show::run(&client, &engine, id).await,
        Commands::New {
            title,
            description,
            image,
            start,
            end,
            categories,
            created_by,
        } => {
            let args = NewEventArgs {
                title,
                description,
                image,
                start,
                end,
                categories,
                created_by,
            };
            commands::new::run(&client, &engine, args).await
        }
        Commands::Edit {
            id,
            title,
            description,
            image,
            start,
            end,
            add_categories,
            remove_categories,
        } => {
            let args = EditEventArgs {
                title,
                description,
                image,
                start,
                end,
                add_categories,
                remove_categories,
            };
            commands::edit::run(&client, &engine, id, args).await
        }
        Commands::Delete { id, yes } => commands::delete::run(&client, id, yes).await,
        Commands::Categories => commands::categories::run(&client).await,
    }
}
