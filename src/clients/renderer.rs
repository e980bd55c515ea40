use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Everything a renderer implementation needs to produce a fully loaded
/// page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    /// Resource types a browser-driving renderer must refuse to load. A
    /// plain HTTP fetch never requests subresources, so [`HttpRenderer`]
    /// has nothing to block.
    pub blocked_resources: Vec<String>,
    /// Navigation timeout; exceeding it fails the enclosing scrape.
    pub timeout: Duration,
    /// Pause after navigation so dynamically injected content can land.
    pub settle_delay: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,\
                     image/apng,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            blocked_resources: vec!["image".to_string(), "font".to_string(), "media".to_string()],
            timeout: Duration::from_secs(30),
            settle_delay: Duration::from_millis(3000),
        }
    }
}

/// A navigated, fully loaded page, ready for extraction.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub url: String,
    pub html: String,
}

/// Produces a rendered document for a URL.
///
/// Implementations own whatever session state a navigation needs and must
/// release it on every exit path, failures included.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<RenderedPage>;
}

/// Renderer backed by a plain HTTP fetch with browser-like headers.
pub struct HttpRenderer {
    client: Client,
    settle_delay: Duration,
}

impl HttpRenderer {
    pub fn new(options: RenderOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(&options.accept)
                .map_err(|e| ScrapeError::Render(format!("invalid accept header: {e}")))?,
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&options.accept_language)
                .map_err(|e| ScrapeError::Render(format!("invalid accept-language header: {e}")))?,
        );

        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(&options.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            settle_delay: options.settle_delay,
        })
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage> {
        debug!(url, "rendering page");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::Render(format!(
                "{url} answered {}",
                response.status()
            )));
        }
        let html = response.text().await?;
        sleep(self.settle_delay).await;

        Ok(RenderedPage {
            url: url.to_string(),
            html,
        })
    }
}
