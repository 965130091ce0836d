use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use habit_tracker::{api, config::Config};

#[derive(Parser)]
#[command(name = "habits")]
#[command(about = "Habit tracking REST API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    config: Config,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Print the resolved configuration and exit
    CheckConfig,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "habit_tracker=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let cors = config.cors_policy();
    if cors.is_wildcard() {
        tracing::warn!(
            "ALLOWED_ORIGINS is '*': every origin is echoed back with credentials allowed"
        );
    }

    let store = config.open_store()?;
    tracing::info!("Using {:?} habit store", config.store);

    let app = api::create_router(store, cors);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Habit tracker listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Must run before parsing so clap sees variables from .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cli.config).await?,
        Commands::CheckConfig => println!("{}", cli.config.describe()),
    }

    Ok(())
}
