mod detail;
mod summary;

pub use detail::{
    BookmakerOdds, DetailFailure, DetailPayload, DetailScore, EventKind, LineupPlayer, Lineups,
    MatchDetail, MatchEvent, MatchHeader, MatchInfo, OddsTriple, StatLine, TeamSide, Teams,
};
pub use summary::{FormResult, League, MatchStatus, MatchSummary, Score, Scorer};
