mod matches;

pub use matches::{Clock, MatchService, SystemClock};
