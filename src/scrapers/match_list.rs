use super::classify::{classify_form, classify_scheduled, classify_status, StyleTag};
use super::{closest, resolve, resolve_all, sel, select_text, text_of};
use crate::domain::{League, MatchSummary, Score, Scorer};
use crate::error::{Result, ScrapeError};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Selector table for the live list page. Fields holding more than one
/// selector are ordered fallback strategies: the attribute-tagged markup is
/// tried first, the structural avatar markup second.
struct ListSelectors {
    container: Selector,
    league_section: Selector,
    country: Selector,
    league_name: Selector,
    game_info: Selector,
    live_status: Vec<Selector>,
    scheduled_time: Selector,
    home_name: Vec<Selector>,
    away_name: Vec<Selector>,
    home_score: Vec<Selector>,
    away_score: Vec<Selector>,
    game_link: Selector,
    livestream: Selector,
    home_bullets: Vec<Selector>,
    away_bullets: Vec<Selector>,
    home_players: Vec<Selector>,
    away_players: Vec<Selector>,
    player_name: Selector,
    player_time: Selector,
    round: Selector,
}

static SELECTORS: Lazy<ListSelectors> = Lazy::new(|| ListSelectors {
    container: sel("div[data-game-id]"),
    league_section: sel("section.games"),
    country: sel("a.games-cat"),
    league_name: sel("a.games-slug"),
    game_info: sel(".game-info"),
    live_status: vec![sel(".match-status__minutes"), sel(".status")],
    scheduled_time: sel(".t"),
    home_name: vec![
        sel("span[data-host-id] .team-name"),
        sel(".avatar[data-team-names] .title"),
    ],
    away_name: vec![
        sel("span[data-guest-id] .team-name"),
        sel(".avatar:not([data-team-names]) .title"),
    ],
    home_score: vec![
        sel(".team-score-item.count[data-host-id]"),
        sel(".counter .count:first-child"),
    ],
    away_score: vec![
        sel(".team-score-item.count[data-guest-id]"),
        sel(".counter .count:last-child"),
    ],
    game_link: sel(r#"a[href*="/football/game/"]"#),
    livestream: sel(".livestream-icon"),
    home_bullets: vec![
        sel("span[data-host-id] .bullets .bullet"),
        sel(".avatar[data-team-names] .bullets .bullet"),
    ],
    away_bullets: vec![
        sel("span[data-guest-id] .bullets .bullet"),
        sel(".avatar:not([data-team-names]) .bullets .bullet"),
    ],
    home_players: vec![
        sel("span[data-host-id] .player"),
        sel(".avatar[data-team-names] .player"),
    ],
    away_players: vec![
        sel("span[data-guest-id] .player"),
        sel(".avatar:not([data-team-names]) .player"),
    ],
    player_name: sel("a"),
    player_time: sel("span span:last-child"),
    round: sel(".match-info .row .text div"),
});

/// Extracts every match container on the live list page, in document order.
/// A malformed container is logged and skipped; it never takes the rest of
/// the page down with it.
pub fn extract_match_list(document: &Html, origin: &str) -> Vec<MatchSummary> {
    let mut matches = Vec::new();
    for container in document.select(&SELECTORS.container) {
        match parse_container(container, origin) {
            Ok(summary) => matches.push(summary),
            Err(e) => warn!(error = %e, "skipping unparseable match container"),
        }
    }
    matches
}

fn parse_container(container: ElementRef<'_>, origin: &str) -> Result<MatchSummary> {
    let s = &*SELECTORS;

    let league = parse_league(container);

    let game_info = container
        .select(&s.game_info)
        .next()
        .ok_or_else(|| ScrapeError::Parse("match container without game-info".to_string()))?;

    let live = resolve(game_info, &s.live_status);
    let live_text = live.map(text_of).unwrap_or_default();
    let (status, time) = match live {
        Some(indicator) if !live_text.is_empty() => {
            classify_status(&live_text, StyleTag::of(&indicator))
        }
        _ => {
            let scheduled = game_info.select(&s.scheduled_time).next().map(text_of);
            classify_scheduled(scheduled.as_deref())
        }
    };

    let home_team = resolve(container, &s.home_name)
        .map(text_of)
        .unwrap_or_default();
    let away_team = resolve(container, &s.away_name)
        .map(text_of)
        .unwrap_or_default();

    let home_score = resolve(container, &s.home_score)
        .map(text_of)
        .unwrap_or_else(|| "0".to_string());
    let away_score = resolve(container, &s.away_score)
        .map(text_of)
        .unwrap_or_else(|| "0".to_string());
    let score = Score {
        full: format!("{home_score}-{away_score}"),
        home: home_score,
        away: away_score,
    };

    let link = closest(container, &s.game_link)
        .and_then(|anchor| anchor.value().attr("href"))
        .map(|href| format!("{origin}{}", href.replacen("/game/", "/stats/", 1)))
        .unwrap_or_default();

    // An id-less container is still emitted; the empty id is the
    // extraction-quality signal.
    let id = container
        .value()
        .attr("data-game-id")
        .unwrap_or_default()
        .to_string();

    let has_livestream = container.select(&s.livestream).next().is_some();

    let home_form = resolve_all(container, &s.home_bullets)
        .iter()
        .map(|bullet| classify_form(StyleTag::of(bullet)))
        .collect();
    let away_form = resolve_all(container, &s.away_bullets)
        .iter()
        .map(|bullet| classify_form(StyleTag::of(bullet)))
        .collect();

    let home_scorers = parse_scorers(resolve_all(container, &s.home_players));
    let away_scorers = parse_scorers(resolve_all(container, &s.away_players));

    let round = select_text(&container, &s.round);

    Ok(MatchSummary {
        id,
        league,
        time,
        status,
        round,
        home_team,
        away_team,
        score,
        has_livestream,
        link,
        home_form,
        away_form,
        home_scorers,
        away_scorers,
    })
}

fn parse_league(container: ElementRef<'_>) -> League {
    let s = &*SELECTORS;
    let section = closest(container, &s.league_section);
    let country = section
        .and_then(|section| section.select(&s.country).next())
        .map(text_of)
        .unwrap_or_else(|| "Unknown".to_string());
    let name = section
        .and_then(|section| section.select(&s.league_name).next())
        .map(text_of)
        .unwrap_or_else(|| "Unknown".to_string());
    League { country, name }
}

fn parse_scorers(players: Vec<ElementRef<'_>>) -> Vec<Scorer> {
    let s = &*SELECTORS;
    players
        .into_iter()
        .filter_map(|player| {
            let name = select_text(&player, &s.player_name);
            let time = select_text(&player, &s.player_time);
            // Both halves are required; a bare name or a bare minute is
            // dropped without taking the match with it.
            (!name.is_empty() && !time.is_empty()).then_some(Scorer { player: name, time })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormResult, MatchStatus};

    const LIVE_PAGE: &str = include_str!("../../tests/fixtures/live_list.html");
    const ORIGIN: &str = "https://azscore.ng";

    fn extract() -> Vec<MatchSummary> {
        let document = Html::parse_document(LIVE_PAGE);
        extract_match_list(&document, ORIGIN)
    }

    #[test]
    fn malformed_container_is_skipped_without_losing_the_rest() {
        // The fixture carries five containers, one without a game-info block.
        let matches = extract();
        assert_eq!(matches.len(), 4);
        assert!(matches.iter().all(|m| m.home_team != "Lyon"));
    }

    #[test]
    fn live_match_is_fully_populated() {
        let matches = extract();
        let live = &matches[0];

        assert_eq!(live.id, "101");
        assert_eq!(live.league.country, "England");
        assert_eq!(live.league.name, "Premier League");
        assert_eq!(live.status, MatchStatus::Live);
        assert_eq!(live.time, "63'");
        assert_eq!(live.home_team, "Arsenal");
        assert_eq!(live.away_team, "Chelsea");
        assert_eq!(live.score.home, "2");
        assert_eq!(live.score.away, "1");
        assert_eq!(live.score.full, "2-1");
        assert!(live.has_livestream);
        assert_eq!(
            live.home_form,
            vec![FormResult::Win, FormResult::Loss, FormResult::Draw]
        );
        assert_eq!(live.away_form, vec![FormResult::Loss, FormResult::Unknown]);
    }

    #[test]
    fn game_link_is_rewritten_to_the_stats_page() {
        let matches = extract();
        assert_eq!(
            matches[0].link,
            "https://azscore.ng/en/football/stats/arsenal-vs-chelsea/101"
        );
        // No anchor around the container leaves the link empty.
        assert_eq!(matches[2].link, "");
    }

    #[test]
    fn missing_id_still_emits_the_record() {
        let matches = extract();
        let half_time = &matches[1];
        assert_eq!(half_time.id, "");
        assert_eq!(half_time.status, MatchStatus::HalfTime);
        assert_eq!(half_time.time, "HT");
        assert_eq!(half_time.home_team, "Everton");
        assert_eq!(half_time.away_team, "Fulham");
    }

    #[test]
    fn avatar_markup_and_scorer_filtering() {
        let matches = extract();
        let finished = &matches[2];

        assert_eq!(finished.status, MatchStatus::Finished);
        assert_eq!(finished.home_team, "Sevilla");
        assert_eq!(finished.away_team, "Valencia");
        assert_eq!(finished.score.full, "1-1");
        assert_eq!(finished.round, "Round 29");

        // The nameless home scorer row is dropped, not the whole match.
        assert_eq!(
            finished.home_scorers,
            vec![Scorer {
                player: "Lukebakio".to_string(),
                time: "12'".to_string()
            }]
        );
        assert_eq!(
            finished.away_scorers,
            vec![Scorer {
                player: "Duro".to_string(),
                time: "78'".to_string()
            }]
        );
    }

    #[test]
    fn scheduled_match_defaults() {
        let matches = extract();
        let scheduled = &matches[3];

        assert_eq!(scheduled.status, MatchStatus::Scheduled);
        assert_eq!(scheduled.time, "18:30");
        // Its section has no league-name anchor.
        assert_eq!(scheduled.league.country, "Germany");
        assert_eq!(scheduled.league.name, "Unknown");
        assert_eq!(scheduled.score.home, "0");
        assert_eq!(scheduled.score.away, "0");
        assert_eq!(scheduled.score.full, "0-0");
        assert!(!scheduled.has_livestream);
        assert!(scheduled.home_form.is_empty());
        assert!(scheduled.home_scorers.is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        assert_eq!(extract(), extract());
    }
}
