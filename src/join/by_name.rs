//! Odds-driven matchups for leagues whose schedule we only know from the odds feed
//! (NHL, MLB). Teams are resolved by full name, players by display name.

use super::{attach_event_odds, JoinReport, TeamDirectory};
use crate::models::{Matchup, MatchupOdds, RosterPlayer};
use crate::utils::fanout::{fan_out_collect, UnitOutcome};
use std::collections::HashSet;

/// Ids of every team an event names, in event order, each once.
/// Names that don't resolve are left out.
pub fn teams_in_events<P>(directory: &TeamDirectory<P>, events: &[MatchupOdds]) -> Vec<i64> {
    let mut seen = HashSet::new();
    events
        .iter()
        .flat_map(|event| [&event.home_team, &event.away_team])
        .filter_map(|name| directory.by_name(name).map(|team| team.id))
        .filter(|id| seen.insert(*id))
        .collect()
}

/// One matchup per event whose home and away teams both resolve, with each
/// outcome attached to the player it names. Unresolved events are skipped.
pub fn matchups_from_odds<P>(
    directory: &TeamDirectory<P>,
    events: &[MatchupOdds],
) -> (Vec<Matchup<P>>, JoinReport)
where
    P: RosterPlayer + Clone + Send + Sync,
{
    let joined = fan_out_collect("odds matchups", events.iter().collect(), |event: &MatchupOdds| {
        let Some(home) = directory.by_name(&event.home_team) else {
            return UnitOutcome::Skipped(format!("could not locate team {}", event.home_team));
        };
        let Some(away) = directory.by_name(&event.away_team) else {
            return UnitOutcome::Skipped(format!("could not locate team {}", event.away_team));
        };

        let mut matchup = Matchup {
            game_id: Some(event.id.clone()),
            commence_time: event.commence_time,
            home: home.clone(),
            away: away.clone(),
        };
        let mut report = attach_event_odds(&mut matchup, event);
        report.matchups = 1;
        UnitOutcome::Done((matchup, report))
    });

    let mut total = JoinReport {
        skipped_events: events.len() - joined.len(),
        ..Default::default()
    };
    let matchups = joined
        .into_iter()
        .map(|(matchup, report)| {
            total += report;
            matchup
        })
        .collect();
    (matchups, total)
}
