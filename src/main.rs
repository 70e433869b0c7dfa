use anyhow::Context;
use product_scout::format::SystemClock;
use product_scout::{open_session, run, ScoutConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_scout=info")),
        )
        .init();

    println!("\x1b[33m\x1b[1mIniciando o processo de coleta de dados...\x1b[0m");

    let config = ScoutConfig::load().context("Failed to load configuration")?;
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let output_path = config.resolve_output_path(&cwd);
    info!("Product: {}", config.product_url);
    info!("Output: {}", output_path.display());

    let session = open_session(&config).context("Failed to start page session")?;
    run(&config, session.as_ref(), &SystemClock, &output_path)
        .with_context(|| format!("Failed to collect {}", config.product_url))?;

    println!(
        "\x1b[32m\x1b[1mProcesso finalizado com sucesso. Arquivo -> {}\x1b[0m",
        output_path.display()
    );

    Ok(())
}
