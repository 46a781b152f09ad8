use dotenvy::dotenv;
use stock_keeper::{
    config::{self, DEFAULT_LOG_LEVEL},
    console::{Prompt, Session},
    core::InventoryManager,
    errors::Result,
};
use tokio::io::{self, BufReader};
use tracing::{Subscriber, error, info};
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(run());
    // Stdin reads run on a blocking thread that cannot be cancelled after Ctrl-C
    runtime.shutdown_background();
    outcome
}

async fn run() -> Result<()> {
    // 1. Load .env file (before anything reads the environment)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally

    // 2. Load the application configuration, logging at the default level until
    //    the configured one is known
    let loaded = tracing::subscriber::with_default(
        log_subscriber(DEFAULT_LOG_LEVEL),
        config::load_app_configuration,
    );

    // 3. Initialize tracing; logs go to stderr so the menu on stdout stays readable
    let log_level = loaded
        .as_ref()
        .map_or(DEFAULT_LOG_LEVEL, |app_config| app_config.log_level.as_str());
    log_subscriber(log_level).init();
    let app_config = loaded.inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!("Configuration loaded.");

    // 4. Build the inventory, seeding any configured products
    let mut inventory = InventoryManager::new();
    config::seed_inventory(&mut inventory, &app_config.products)
        .inspect_err(|e| error!("Failed to seed initial products: {}", e))?;

    // 5. Run the interactive session
    let prompt = Prompt::new(BufReader::new(io::stdin()), io::stdout());
    let mut session = Session::new(inventory, app_config.display, prompt);
    session
        .run()
        .await
        .inspect_err(|e| error!("Session ended with an error: {}", e))?;

    Ok(())
}

/// Stderr logger filtered by `RUST_LOG`, or by `fallback` when it is unset.
fn log_subscriber(fallback: &str) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .finish()
}
