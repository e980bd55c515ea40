use livescore::api;
use livescore::clients::HttpRenderer;
use livescore::config::Config;
use livescore::error::Result;
use livescore::services::{MatchService, SystemClock};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.args.log_level)),
        )
        .init();

    let renderer = Arc::new(HttpRenderer::new(config.render_options())?);
    let clock = Arc::new(SystemClock);
    let service = Arc::new(MatchService::new(
        renderer,
        clock,
        config.args.origin.as_str(),
        config.args.live_url.as_str(),
        config.args.cache_ttl_ms,
    ));

    info!(port = config.args.port, "starting live match API");
    api::serve(service, config.args.live_url.clone(), config.args.port).await
}
