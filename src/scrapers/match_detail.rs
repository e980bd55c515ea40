use super::classify::{classify_form, classify_status, StyleTag};
use super::{sel, select_text, text_of};
use crate::domain::{
    BookmakerOdds, DetailFailure, DetailPayload, DetailScore, EventKind, LineupPlayer, Lineups,
    MatchDetail, MatchEvent, MatchHeader, MatchInfo, MatchStatus, OddsTriple, StatLine, TeamSide,
    Teams,
};
use crate::error::{Result, ScrapeError};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

struct DetailSelectors {
    home_title: Selector,
    away_title: Selector,
    home_count: Selector,
    away_count: Selector,
    status: Selector,
    info_text: Selector,
    round: Selector,
    venue: Selector,
    home_bullets: Selector,
    away_bullets: Selector,
    home_players: Selector,
    away_players: Selector,
    player_name: Selector,
    player_time: Selector,
    stat_row: Selector,
    stat_title: Selector,
    stat_home: Selector,
    stat_away: Selector,
    home_lineup: Selector,
    away_lineup: Selector,
    lineup_name: Selector,
    lineup_number: Selector,
    odds_row: Selector,
    odds_bookmaker: Selector,
    odd_home: Selector,
    odd_draw: Selector,
    odd_away: Selector,
}

static SELECTORS: Lazy<DetailSelectors> = Lazy::new(|| DetailSelectors {
    home_title: sel(".avatar[data-team-names] .title"),
    away_title: sel(".avatar:not([data-team-names]) .title"),
    home_count: sel(".counter .count:first-child"),
    away_count: sel(".counter .count:last-child"),
    status: sel(".status"),
    info_text: sel(".match-info .row .text"),
    round: sel(".match-info .row .text div"),
    venue: sel(".match-venue"),
    home_bullets: sel(".avatar[data-team-names] .bullets .bullet"),
    away_bullets: sel(".avatar:not([data-team-names]) .bullets .bullet"),
    home_players: sel(".avatar[data-team-names] .player"),
    away_players: sel(".avatar:not([data-team-names]) .player"),
    player_name: sel("a"),
    player_time: sel("span span:last-child"),
    stat_row: sel(".stat__row"),
    stat_title: sel(".stat__title"),
    stat_home: sel(".stat__score:first-child"),
    stat_away: sel(".stat__score:last-child"),
    home_lineup: sel(".lineup-h .lineup-player"),
    away_lineup: sel(".lineup-a .lineup-player"),
    lineup_name: sel(".lineup-player-name"),
    lineup_number: sel(".lineup-player-number"),
    odds_row: sel(".b-odds__row"),
    odds_bookmaker: sel(".b-odds__img img"),
    odd_home: sel(".odd-1"),
    odd_draw: sel(".odd-2"),
    odd_away: sel(".odd-3"),
});

/// Extracts the single match a stats page describes. A page that does not
/// parse at all yields the `{error, message}` payload instead of raising, so
/// the caller can pass it through without caching it.
pub fn extract_match_detail(document: &Html) -> DetailPayload {
    match parse_detail(document) {
        Ok(detail) => DetailPayload::Detail(Box::new(detail)),
        Err(e) => {
            warn!(error = %e, "match detail page did not parse");
            DetailPayload::Failed(DetailFailure {
                error: "Failed to parse match details".to_string(),
                message: e.to_string(),
            })
        }
    }
}

fn parse_detail(document: &Html) -> Result<MatchDetail> {
    let s = &*SELECTORS;
    let root = document.root_element();

    // The home title block anchors the whole extraction; a page without it
    // is not a match page.
    let home_team = root
        .select(&s.home_title)
        .next()
        .map(text_of)
        .ok_or_else(|| ScrapeError::Parse("match header not found".to_string()))?;
    let away_team = root
        .select(&s.away_title)
        .next()
        .map(text_of)
        .unwrap_or_default();

    let home_score = root
        .select(&s.home_count)
        .next()
        .map(text_of)
        .unwrap_or_else(|| "0".to_string());
    let away_score = root
        .select(&s.away_count)
        .next()
        .map(text_of)
        .unwrap_or_else(|| "0".to_string());

    let (status, time) = match root.select(&s.status).next() {
        Some(indicator) => classify_status(&text_of(indicator), StyleTag::of(&indicator)),
        None => (MatchStatus::Unknown, String::new()),
    };

    let info_rows: Vec<String> = root.select(&s.info_text).map(text_of).collect();
    let date = info_rows.first().cloned().unwrap_or_default();
    let scheduled_time = info_rows.get(1).cloned().unwrap_or_default();
    let round = select_text(&root, &s.round);

    let venue = select_text(&root, &s.venue);

    let home_form = root
        .select(&s.home_bullets)
        .map(|bullet| classify_form(StyleTag::of(&bullet)))
        .collect();
    let away_form = root
        .select(&s.away_bullets)
        .map(|bullet| classify_form(StyleTag::of(&bullet)))
        .collect();

    let mut events = Vec::new();
    collect_goals(&root, &s.home_players, &home_team, &mut events);
    collect_goals(&root, &s.away_players, &away_team, &mut events);

    let statistics = root
        .select(&s.stat_row)
        .filter_map(|row| {
            let name = select_text(&row, &s.stat_title);
            if name.is_empty() {
                return None;
            }
            let home = row
                .select(&s.stat_home)
                .next()
                .map(text_of)
                .unwrap_or_else(|| "0".to_string());
            let away = row
                .select(&s.stat_away)
                .next()
                .map(text_of)
                .unwrap_or_else(|| "0".to_string());
            Some(StatLine { name, home, away })
        })
        .collect();

    let lineups = Lineups {
        home: parse_lineup(&root, &s.home_lineup),
        away: parse_lineup(&root, &s.away_lineup),
    };

    let odds = root
        .select(&s.odds_row)
        .filter_map(|row| {
            let bookmaker = row
                .select(&s.odds_bookmaker)
                .next()
                .and_then(|img| img.value().attr("alt"))
                .unwrap_or_default()
                .trim()
                .to_string();
            if bookmaker.is_empty() {
                return None;
            }
            Some(BookmakerOdds {
                bookmaker,
                odds: OddsTriple {
                    home: select_text(&row, &s.odd_home),
                    draw: select_text(&row, &s.odd_draw),
                    away: select_text(&row, &s.odd_away),
                },
            })
        })
        .collect();

    Ok(MatchDetail {
        match_info: MatchInfo {
            date,
            scheduled_time,
            round,
        },
        header: MatchHeader {
            status,
            time,
            teams: Teams {
                home: TeamSide {
                    name: home_team,
                    score: home_score.clone(),
                    form: home_form,
                },
                away: TeamSide {
                    name: away_team,
                    score: away_score.clone(),
                    form: away_form,
                },
            },
            venue,
            score: DetailScore {
                full: format!("{home_score}-{away_score}"),
            },
        },
        statistics,
        events,
        lineups,
        odds,
    })
}

fn collect_goals(
    root: &ElementRef<'_>,
    players: &Selector,
    team: &str,
    out: &mut Vec<MatchEvent>,
) {
    let s = &*SELECTORS;
    for player in root.select(players) {
        let name = select_text(&player, &s.player_name);
        let time = select_text(&player, &s.player_time);
        if !name.is_empty() && !time.is_empty() {
            out.push(MatchEvent {
                time,
                kind: EventKind::Goal,
                player: name,
                team: team.to_string(),
            });
        }
    }
}

fn parse_lineup(root: &ElementRef<'_>, rows: &Selector) -> Vec<LineupPlayer> {
    let s = &*SELECTORS;
    root.select(rows)
        .filter_map(|player| {
            let name = select_text(&player, &s.lineup_name);
            (!name.is_empty()).then(|| LineupPlayer {
                name,
                number: select_text(&player, &s.lineup_number),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormResult;

    const STATS_PAGE: &str = include_str!("../../tests/fixtures/match_stats.html");

    fn extract() -> MatchDetail {
        let document = Html::parse_document(STATS_PAGE);
        match extract_match_detail(&document) {
            DetailPayload::Detail(detail) => *detail,
            DetailPayload::Failed(failure) => panic!("fixture failed to parse: {failure:?}"),
        }
    }

    #[test]
    fn header_and_venue() {
        let detail = extract();

        assert_eq!(detail.header.teams.home.name, "Arsenal");
        assert_eq!(detail.header.teams.away.name, "Chelsea");
        assert_eq!(detail.header.teams.home.score, "2");
        assert_eq!(detail.header.teams.away.score, "1");
        assert_eq!(detail.header.score.full, "2-1");
        assert_eq!(detail.header.status, MatchStatus::Live);
        assert_eq!(detail.header.time, "63'");
        assert_eq!(detail.header.venue, "Emirates Stadium");
        assert_eq!(
            detail.header.teams.home.form,
            vec![FormResult::Win, FormResult::Win, FormResult::Loss]
        );
        assert_eq!(detail.header.teams.away.form, vec![FormResult::Draw]);
    }

    #[test]
    fn match_info_rows() {
        let detail = extract();
        assert!(detail.match_info.date.starts_with("Saturday, 21 Dec"));
        assert_eq!(detail.match_info.scheduled_time, "15:00");
        assert_eq!(detail.match_info.round, "Round 17");
    }

    #[test]
    fn events_stay_grouped_by_team() {
        let detail = extract();
        let shape: Vec<(&str, &str, &str)> = detail
            .events
            .iter()
            .map(|e| (e.time.as_str(), e.player.as_str(), e.team.as_str()))
            .collect();

        // Home goals first, then away; 58' before 41' is deliberate.
        assert_eq!(
            shape,
            vec![
                ("23'", "Saka", "Arsenal"),
                ("58'", "Havertz", "Arsenal"),
                ("41'", "Palmer", "Chelsea"),
            ]
        );
        assert!(detail.events.iter().all(|e| e.kind == EventKind::Goal));
    }

    #[test]
    fn nameless_stat_rows_are_discarded() {
        let detail = extract();
        let names: Vec<&str> = detail.statistics.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Possession", "Shots"]);
        assert_eq!(detail.statistics[0].home, "58");
        assert_eq!(detail.statistics[0].away, "42");
    }

    #[test]
    fn lineups_require_a_player_name() {
        let detail = extract();
        assert_eq!(detail.lineups.home.len(), 2);
        assert_eq!(detail.lineups.home[0].name, "Saka");
        assert_eq!(detail.lineups.home[0].number, "7");
        assert_eq!(detail.lineups.away.len(), 1);
        assert_eq!(detail.lineups.away[0].name, "Palmer");
    }

    #[test]
    fn odds_require_a_bookmaker() {
        let detail = extract();
        assert_eq!(detail.odds.len(), 1);
        assert_eq!(detail.odds[0].bookmaker, "bet365");
        assert_eq!(detail.odds[0].odds.home, "2.10");
        assert_eq!(detail.odds[0].odds.draw, "3.40");
        assert_eq!(detail.odds[0].odds.away, "3.60");
    }

    #[test]
    fn unparseable_page_yields_the_error_payload() {
        let document = Html::parse_document("<html><body><p>504 Gateway Time-out</p></body></html>");
        match extract_match_detail(&document) {
            DetailPayload::Failed(failure) => {
                assert_eq!(failure.error, "Failed to parse match details");
                assert!(failure.message.contains("match header not found"));
            }
            DetailPayload::Detail(_) => panic!("expected a failure payload"),
        }
    }
}
