use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use weather_dashboard::cli::Cli;
use weather_dashboard::error::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (API key) from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so rendered output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,weather_dashboard=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone();

    match weather_dashboard::app::run(cli).await {
        Ok(()) => Ok(()),
        Err(e @ (AppError::Config(_) | AppError::MissingApiKey(_) | AppError::BlankApiKey)) => {
            Err(anyhow::anyhow!(
                "{}\n\n\
                 Make sure:\n\
                 1. {} is valid YAML, or remove it to use defaults\n\
                 2. The API key variable is set (check .env.example)\n\
                 3. Create a .env file if needed",
                e,
                config_path.display()
            ))
        }
        Err(e) => Err(e.into()),
    }
}
