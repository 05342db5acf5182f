use std::path::Path;

use homework_bot::config::{load_dotenv_from, startup_config};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    load_dotenv_from(Path::new(".env"));
    let Some(config) = startup_config(|name| std::env::var(name).ok()) else {
        return Ok(());
    };

    homework_bot::run(config).await
}
