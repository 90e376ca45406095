use std::{net::TcpListener, sync::Arc};

use anyhow::Context;
use env_logger::Env;
use resume_radar::{
    configuration::get_configuration,
    services::{Analyzer, HttpScraper, OpenaiClient},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;
    log::info!(
        "Using model {:?}, analysis {:?}",
        configuration.model,
        configuration.analysis
    );

    let reference = configuration
        .analysis
        .reference_document()
        .context("Failed to load the reference document.")?;
    let scraper =
        HttpScraper::new(&configuration.scraper).context("Failed to build the HTTP client.")?;
    let openai_client = OpenaiClient::new(&configuration.model);
    let analyzer = Analyzer::new(Arc::new(scraper), Arc::new(openai_client), reference);

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)
        .with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Listening on {}", address);

    run(
        listener,
        analyzer,
        configuration.analysis,
        configuration.application.max_body_bytes,
    )?
    .await?;

    Ok(())
}
