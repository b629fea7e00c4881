//! Library Catalog - prints the members of a saved catalog

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalog::{config::AppConfig, models::Library, repository::JsonFileRepository};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);

    let repository = JsonFileRepository::from_config(&config.storage);
    let library = repository
        .load()
        .with_context(|| format!("Failed to load {}", repository.path().display()))?;

    print_summary(&library);
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_catalog={}", config.logging.level).into());

    // Logs go to stderr so the summary on stdout stays clean
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_summary(library: &Library) {
    println!("{}", library);
    for member in library.members() {
        println!("{}", member);
    }
}
