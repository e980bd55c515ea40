use serde::{Deserialize, Serialize};

/// Lifecycle state of a match as shown on the live list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Scheduled,
    Live,
    HalfTime,
    Finished,
    Unknown,
}

/// Outcome of a single recent-form marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "U")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub country: String,
    pub name: String,
}

/// Score counters as display strings; `full` is always the literal
/// `"{home}-{away}"` concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: String,
    pub away: String,
    pub full: String,
}

/// One scorer entry shown next to a team on the list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorer {
    pub player: String,
    pub time: String,
}

/// One row of the live match list.
///
/// `id` doubles as the detail-cache key. Extraction emits records with an
/// empty id rather than dropping them, so consumers have to tolerate empty
/// or duplicate ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: String,
    pub league: League,
    pub time: String,
    pub status: MatchStatus,
    pub round: String,
    pub home_team: String,
    pub away_team: String,
    pub score: Score,
    pub has_livestream: bool,
    pub link: String,
    /// Recent form, in the order the markers appear on the page.
    pub home_form: Vec<FormResult>,
    pub away_form: Vec<FormResult>,
    pub home_scorers: Vec<Scorer>,
    pub away_scorers: Vec<Scorer>,
}
