//! Starhive command-line client
//!
//! Talks to the workspace configured by `STARHIVE_API_TOKEN` and
//! `STARHIVE_WORKSPACE_ID` (and optionally `STARHIVE_BASE_URL`).
//!
//! Usage:
//!   starhive types --enriched
//!   starhive search shoes 'Name = Zoom' --limit 10
//!   starhive upload ./photo.jpg --content-type image/jpeg

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use starhive_client::{DecoderRegistry, Pagination, StarhiveClient};
use starhive_model::{DynamicDecoder, DynamicObject};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "starhive")]
#[command(about = "Inspect and modify a Starhive workspace")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the spaces of the workspace
    Spaces {
        #[command(flatten)]
        page: PageArgs,
    },
    /// List the types of the workspace
    Types {
        /// Include attribute descriptors
        #[arg(long)]
        enriched: bool,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Search objects of a type with a starQL query
    Search {
        type_id: String,
        query: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Delete objects by id, in batches the bulk API accepts
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Upload a file and print its content key
    Upload {
        path: PathBuf,
        #[arg(long, default_value = "application/octet-stream")]
        content_type: String,
    },
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct PageArgs {
    #[arg(long, default_value_t = 0)]
    offset: u64,
    #[arg(long, default_value_t = Pagination::DEFAULT_LIMIT)]
    limit: u64,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Pagination::new(args.offset, args.limit)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let registry = registry_for(&args.command);
    let client = StarhiveClient::from_env(registry)
        .context("Failed to configure Starhive client")?;
    debug!("Using workspace {}", client.config().workspace_id);

    match args.command {
        Command::Spaces { page } => {
            print_json(&client.get_spaces(page.into()).await?)?;
        }
        Command::Types { enriched, page } => {
            if enriched {
                print_json(&client.get_types_enriched(page.into()).await?)?;
            } else {
                print_json(&client.get_types(page.into()).await?)?;
            }
        }
        Command::Search {
            type_id,
            query,
            page,
        } => {
            let results = client
                .search::<DynamicObject>(&type_id, &query, page.into())
                .await
                .with_context(|| format!("Search in type {type_id} failed"))?;
            print_json(&results)?;
        }
        Command::Delete { ids } => {
            let response = client.delete_objects_in_batches(&ids).await?;
            info!(
                "Deleted {} of {} objects",
                response.successes().count(),
                ids.len()
            );
            print_json(&response)?;
        }
        Command::Upload { path, content_type } => {
            let handle = client
                .upload_file(&path, &content_type)
                .await
                .with_context(|| format!("Failed to upload {}", path.display()))?;
            print_json(&handle)?;
        }
    }
    Ok(())
}

/// Search results are decoded schema-less, keeping every value as text.
fn registry_for(command: &Command) -> DecoderRegistry {
    let mut registry = DecoderRegistry::new();
    if let Command::Search { type_id, .. } = command {
        let decoded_type = type_id.clone();
        registry.register(type_id.clone(), move || {
            Box::new(DynamicDecoder::new(decoded_type.clone()))
        });
    }
    registry
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{json}");
    Ok(())
}
