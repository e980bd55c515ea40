use crate::domain::{FormResult, MatchStatus};
use scraper::ElementRef;

/// Discrete color class attached to status and form indicators on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    Blue,
    Red,
    Green,
    Yellow,
    Other,
}

impl StyleTag {
    /// Reads the first recognized `color--*` class off an element.
    pub fn of(element: &ElementRef<'_>) -> Self {
        for class in element.value().classes() {
            match class {
                "color--blue" => return Self::Blue,
                "color--red" => return Self::Red,
                "color--green" => return Self::Green,
                "color--yellow" => return Self::Yellow,
                _ => {}
            }
        }
        Self::Other
    }
}

/// Maps a live-indicator fragment to a status plus the normalized display
/// time. Live minutes always carry a trailing minute mark.
pub fn classify_status(text: &str, tag: StyleTag) -> (MatchStatus, String) {
    let trimmed = text.trim();
    match tag {
        StyleTag::Blue => (MatchStatus::HalfTime, trimmed.to_string()),
        StyleTag::Red => (MatchStatus::Live, ensure_minute_mark(trimmed)),
        StyleTag::Green => (MatchStatus::Finished, trimmed.to_string()),
        StyleTag::Yellow | StyleTag::Other => (MatchStatus::Unknown, trimmed.to_string()),
    }
}

/// A match without a live indicator shows its kick-off time instead, or
/// `"TBD"` when that fragment is missing entirely.
pub fn classify_scheduled(scheduled_time: Option<&str>) -> (MatchStatus, String) {
    let time = scheduled_time.map(str::trim).unwrap_or("TBD");
    (MatchStatus::Scheduled, time.to_string())
}

/// Maps a form bullet's color to a result.
pub fn classify_form(tag: StyleTag) -> FormResult {
    match tag {
        StyleTag::Green => FormResult::Win,
        StyleTag::Red => FormResult::Loss,
        StyleTag::Yellow => FormResult::Draw,
        StyleTag::Blue | StyleTag::Other => FormResult::Unknown,
    }
}

fn ensure_minute_mark(text: &str) -> String {
    if text.ends_with('\'') {
        text.to_string()
    } else {
        format!("{text}'")
    }
}
