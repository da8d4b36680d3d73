mod cli;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cvclean::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so they never mix with the chat transcript on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting CvClean v{}", env!("CARGO_PKG_VERSION"));
    info!("Chat service: {}", config.api_base);

    if let Err(e) = cli::run(&config).await {
        error!(code = e.code(), "{e}");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
