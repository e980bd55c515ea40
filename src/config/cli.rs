use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Port for the HTTP API
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Site origin prefixed onto scraped detail links
    #[arg(long, default_value = "https://azscore.ng")]
    pub origin: String,

    /// Live match list page
    #[arg(long, default_value = "https://azscore.ng/live")]
    pub live_url: String,

    /// Cache freshness window in milliseconds
    #[arg(long, default_value_t = 6_000)]
    pub cache_ttl_ms: u64,

    /// Page navigation timeout in milliseconds
    #[arg(long, default_value_t = 30_000)]
    pub timeout_ms: u64,

    /// Delay after navigation before extraction, in milliseconds
    #[arg(long, default_value_t = 3_000)]
    pub settle_delay_ms: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
