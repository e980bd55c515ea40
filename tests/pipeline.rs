//! End-to-end pipeline tests: mock renderer in, JSON wire shapes out.

use async_trait::async_trait;
use livescore::clients::{RenderedPage, Renderer};
use livescore::domain::DetailPayload;
use livescore::error::{Result, ScrapeError};
use livescore::services::{Clock, MatchService};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

const LIVE_PAGE: &str = include_str!("fixtures/live_list.html");
const STATS_PAGE: &str = include_str!("fixtures/match_stats.html");
const ORIGIN: &str = "https://azscore.ng";
const LIVE_URL: &str = "https://azscore.ng/live";
const STATS_URL: &str = "https://azscore.ng/en/football/stats/arsenal-vs-chelsea/101";

struct FixtureRenderer {
    pages: HashMap<String, String>,
}

impl FixtureRenderer {
    fn new() -> Self {
        let mut pages = HashMap::new();
        pages.insert(LIVE_URL.to_string(), LIVE_PAGE.to_string());
        pages.insert(STATS_URL.to_string(), STATS_PAGE.to_string());
        Self { pages }
    }
}

#[async_trait]
impl Renderer for FixtureRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage> {
        self.pages
            .get(url)
            .map(|html| RenderedPage {
                url: url.to_string(),
                html: html.clone(),
            })
            .ok_or_else(|| ScrapeError::Render(format!("no fixture for {url}")))
    }
}

struct FrozenClock;

impl Clock for FrozenClock {
    fn now_ms(&self) -> u64 {
        1_000
    }
}

fn service() -> MatchService {
    MatchService::new(
        Arc::new(FixtureRenderer::new()),
        Arc::new(FrozenClock),
        ORIGIN,
        LIVE_URL,
        6_000,
    )
}

#[tokio::test]
async fn match_list_serializes_to_the_wire_format() {
    let matches = service().list_matches(false).await.unwrap();
    let value = serde_json::to_value(&matches[0]).unwrap();

    assert_eq!(value["id"], "101");
    assert_eq!(value["league"]["country"], "England");
    assert_eq!(value["status"], "Live");
    assert_eq!(value["time"], "63'");
    assert_eq!(value["homeTeam"], "Arsenal");
    assert_eq!(value["awayTeam"], "Chelsea");
    assert_eq!(value["score"]["full"], "2-1");
    assert_eq!(value["hasLivestream"], true);
    assert_eq!(
        value["link"],
        "https://azscore.ng/en/football/stats/arsenal-vs-chelsea/101"
    );
    assert_eq!(value["homeForm"], json!(["W", "L", "D"]));
    assert_eq!(value["awayForm"], json!(["L", "U"]));
}

#[tokio::test]
async fn match_detail_serializes_to_the_wire_format() {
    let service = service();
    service.list_matches(false).await.unwrap();
    let payload = service.match_details("101").await.unwrap();
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(value["match"]["status"], "Live");
    assert_eq!(value["match"]["teams"]["home"]["name"], "Arsenal");
    assert_eq!(value["match"]["teams"]["away"]["score"], "1");
    assert_eq!(value["match"]["score"]["full"], "2-1");
    assert_eq!(value["matchInfo"]["scheduledTime"], "15:00");
    assert_eq!(value["matchInfo"]["round"], "Round 17");
    assert_eq!(value["events"][0]["type"], "goal");
    assert_eq!(value["events"][0]["player"], "Saka");
    assert_eq!(value["statistics"][0]["name"], "Possession");
    assert_eq!(value["lineups"]["home"][0]["number"], "7");
    assert_eq!(value["odds"][0]["bookmaker"], "bet365");
}

#[tokio::test]
async fn failed_detail_payload_serializes_as_the_error_object() {
    let payload = DetailPayload::Failed(livescore::domain::DetailFailure {
        error: "Failed to parse match details".to_string(),
        message: "Parse error: match header not found".to_string(),
    });
    let value = serde_json::to_value(&payload).unwrap();

    // The untagged enum writes the failure fields at the top level.
    assert_eq!(value["error"], "Failed to parse match details");
    assert_eq!(value["message"], "Parse error: match header not found");
    assert!(value.get("match").is_none());
}

#[tokio::test]
async fn unknown_match_is_reported_not_found() {
    let err = service().match_details("does-not-exist").await.unwrap_err();
    assert!(matches!(err, ScrapeError::NotFound(_)));
}
