use crate::clients::Renderer;
use crate::domain::{DetailPayload, MatchDetail, MatchSummary};
use crate::error::{Result, ScrapeError};
use crate::scrapers;
use scraper::Html;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Millisecond clock, injected so freshness can be tested without waiting.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    fetched_at_ms: u64,
}

impl<T> CacheEntry<T> {
    fn new(value: T, now_ms: u64) -> Self {
        Self {
            value,
            fetched_at_ms: now_ms,
        }
    }

    fn is_fresh(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.fetched_at_ms) < ttl_ms
    }
}

/// Owns the two cache tiers and the scrape pipeline behind them.
///
/// The list tier holds at most one snapshot of the live page; the detail
/// tier holds one entry per match id with no eviction, so it grows with the
/// number of distinct ids requested over the process lifetime. Overlapping
/// requests for the same stale key may each trigger their own scrape; there
/// is no in-flight deduplication.
pub struct MatchService {
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn Clock>,
    origin: String,
    live_url: String,
    ttl_ms: u64,
    list: RwLock<Option<CacheEntry<Vec<MatchSummary>>>>,
    details: RwLock<HashMap<String, CacheEntry<MatchDetail>>>,
}

impl MatchService {
    pub fn new(
        renderer: Arc<dyn Renderer>,
        clock: Arc<dyn Clock>,
        origin: impl Into<String>,
        live_url: impl Into<String>,
        ttl_ms: u64,
    ) -> Self {
        Self {
            renderer,
            clock,
            origin: origin.into(),
            live_url: live_url.into(),
            ttl_ms,
            list: RwLock::new(None),
            details: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the match list, scraping only when the cached snapshot is
    /// missing, stale, or bypassed. A failed scrape leaves the previous
    /// snapshot untouched.
    pub async fn list_matches(&self, force_refresh: bool) -> Result<Vec<MatchSummary>> {
        if !force_refresh {
            let list = self.list.read().await;
            if let Some(entry) = list.as_ref() {
                if entry.is_fresh(self.clock.now_ms(), self.ttl_ms) {
                    debug!("returning cached match list");
                    return Ok(entry.value.clone());
                }
            }
        }

        info!(url = %self.live_url, "scraping match list");
        let page = self.renderer.render(&self.live_url).await?;
        let matches = {
            let document = Html::parse_document(&page.html);
            scrapers::extract_match_list(&document, &self.origin)
        };
        info!(count = matches.len(), "match list scraped");

        let now = self.clock.now_ms();
        *self.list.write().await = Some(CacheEntry::new(matches.clone(), now));
        Ok(matches)
    }

    /// Resolves match details through the fallback chain: fresh detail
    /// entry, then a link from the list snapshot, then a forced list
    /// refresh. Fails with [`ScrapeError::NotFound`] when the id is absent
    /// from a fresh list.
    pub async fn match_details(&self, id: &str) -> Result<DetailPayload> {
        {
            let details = self.details.read().await;
            if let Some(entry) = details.get(id) {
                if entry.is_fresh(self.clock.now_ms(), self.ttl_ms) {
                    debug!(id, "returning cached match details");
                    return Ok(DetailPayload::Detail(Box::new(entry.value.clone())));
                }
            }
        }

        // The list snapshot is consulted regardless of its own freshness.
        let link = match self.cached_link(id).await {
            Some(link) => link,
            None => {
                info!(id, "match not in list cache, forcing a list refresh");
                let matches = self.list_matches(true).await?;
                matches
                    .iter()
                    .find(|m| m.id == id && !m.link.is_empty())
                    .map(|m| m.link.clone())
                    .ok_or_else(|| ScrapeError::NotFound(id.to_string()))?
            }
        };

        info!(id, url = %link, "scraping match details");
        let page = self.renderer.render(&link).await?;
        let payload = {
            let document = Html::parse_document(&page.html);
            scrapers::extract_match_detail(&document)
        };

        match &payload {
            DetailPayload::Detail(detail) => {
                let now = self.clock.now_ms();
                self.details
                    .write()
                    .await
                    .insert(id.to_string(), CacheEntry::new((**detail).clone(), now));
            }
            DetailPayload::Failed(failure) => {
                warn!(id, message = %failure.message, "detail extraction failed, not caching");
            }
        }

        Ok(payload)
    }

    async fn cached_link(&self, id: &str) -> Option<String> {
        let list = self.list.read().await;
        list.as_ref()?
            .value
            .iter()
            .find(|m| m.id == id && !m.link.is_empty())
            .map(|m| m.link.clone())
    }
}
