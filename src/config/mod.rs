use crate::clients::RenderOptions;
use crate::config::cli::Args;
use clap::Parser;
use std::time::Duration;

pub(crate) mod cli;

pub struct Config {
    pub args: Args,
}

impl Config {
    pub fn new() -> Self {
        Self {
            args: Args::parse(),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            timeout: Duration::from_millis(self.args.timeout_ms),
            settle_delay: Duration::from_millis(self.args.settle_delay_ms),
            ..RenderOptions::default()
        }
    }
}
