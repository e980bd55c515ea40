use super::{FormResult, MatchStatus};
use serde::{Deserialize, Serialize};

/// Enriched record scraped from a single match stats page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    pub match_info: MatchInfo,
    #[serde(rename = "match")]
    pub header: MatchHeader,
    pub statistics: Vec<StatLine>,
    /// Home-side goals first, then away-side goals. The page groups scorers
    /// by team and that grouping is preserved; the list is not time-sorted.
    pub events: Vec<MatchEvent>,
    pub lineups: Lineups,
    pub odds: Vec<BookmakerOdds>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub date: String,
    pub scheduled_time: String,
    pub round: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHeader {
    pub status: MatchStatus,
    pub time: String,
    pub teams: Teams,
    pub venue: String,
    pub score: DetailScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teams {
    pub home: TeamSide,
    pub away: TeamSide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSide {
    pub name: String,
    pub score: String,
    pub form: Vec<FormResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailScore {
    pub full: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub name: String,
    pub home: String,
    pub away: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub time: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub player: String,
    pub team: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Goal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineups {
    pub home: Vec<LineupPlayer>,
    pub away: Vec<LineupPlayer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupPlayer {
    pub name: String,
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmakerOdds {
    pub bookmaker: String,
    pub odds: OddsTriple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsTriple {
    pub home: String,
    pub draw: String,
    pub away: String,
}

/// Error-shaped payload emitted when a detail page cannot be parsed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailFailure {
    pub error: String,
    pub message: String,
}

/// Outcome of a detail extraction: the parsed record, or the error object
/// the page yielded. Failures are surfaced to callers but never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailPayload {
    Detail(Box<MatchDetail>),
    Failed(DetailFailure),
}
