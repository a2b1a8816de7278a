mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dealership_lib::{AdminConfig, Client};

use crate::commands::records::Action;
use crate::commands::AppContext;
use crate::output::{ConsoleNotifier, OutputFormat};

#[derive(Parser)]
#[command(name = "dealership-admin")]
#[command(about = "Manage the car dealership catalogue, content and users")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides DEALERSHIP_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides DEALERSHIP_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the managed entities and their routes
    Entities,
    /// List records of an entity
    List(commands::list::ListArgs),
    /// Show a single record
    Get(commands::records::GetArgs),
    /// Create a record
    Add(commands::records::AddArgs),
    /// Edit a record
    Update(commands::records::UpdateArgs),
    /// Delete a record
    Delete(commands::records::DeleteArgs),
    /// Delete several records at once
    BulkDelete(commands::records::BulkDeleteArgs),
    /// Upload a CSV file and follow the import progress
    Import(commands::import::ImportArgs),
    /// Browse the file manager
    Files(commands::files::FilesArgs),
    /// Download a file from the file host
    Download(commands::files::DownloadArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dealership_admin=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AdminConfig::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }

    let mut client = Client::with_timeout(&config.api_url, config.request_timeout)?;
    if let Some(token) = &config.token {
        client = client.with_token(token);
    }

    let ctx = AppContext {
        format: OutputFormat::parse(&cli.output),
        client: Arc::new(client),
        notifier: Arc::new(ConsoleNotifier),
        config,
    };

    match &cli.command {
        Commands::Entities => commands::entities::run(&ctx)?,
        Commands::List(args) => commands::list::run(args, &ctx).await?,
        Commands::Get(args) => commands::records::run(Action::Get(args), &ctx).await?,
        Commands::Add(args) => commands::records::run(Action::Add(args), &ctx).await?,
        Commands::Update(args) => commands::records::run(Action::Update(args), &ctx).await?,
        Commands::Delete(args) => commands::records::run(Action::Delete(args), &ctx).await?,
        Commands::BulkDelete(args) => {
            commands::records::run(Action::BulkDelete(args), &ctx).await?
        }
        Commands::Import(args) => commands::import::run(args, &ctx).await?,
        Commands::Files(args) => commands::files::run(args, &ctx).await?,
        Commands::Download(args) => commands::files::download_file(args, &ctx).await?,
    }

    Ok(())
}
