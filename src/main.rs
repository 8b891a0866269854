use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edgegate::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edgegate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init().await,
        Commands::Serve { host, port } => commands::serve(host, port).await,
        Commands::Decide { path, role } => commands::decide(&path, role.as_deref()).await,
        Commands::Routes { format } => commands::routes(format).await,
        Commands::Check => commands::check().await,
        Commands::Token { role, subject, ttl } => commands::token(&role, subject, ttl).await,
    }
}
