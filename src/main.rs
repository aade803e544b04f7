use anyhow::{Context, Result};
use random_media_server::{config::Config, index::MediaIndex, server::MediaServer};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::get();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("random_media_server=info")),
        )
        .init();

    let index = MediaIndex::scan(&config.media_dir, &config.extensions)
        .context("Could not build media index")?;

    MediaServer::bind(config, index)?.run()
}
