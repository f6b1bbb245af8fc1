use super::{attach_event_odds, attach_season_logs, JoinReport, TeamDirectory};
use crate::models::{League, Matchup, MatchupOdds, NbaGameLog, NbaPlayer, ScheduledGame, Team};
use crate::teams::teams_for;
use crate::utils::fanout::{fan_out_collect, UnitOutcome};
use crate::utils::names::same_team;
use std::collections::HashMap;

/// The static teams of an NBA-style league with every player placed on their team
pub fn teams_with_players(league: League, players: Vec<NbaPlayer>) -> TeamDirectory<NbaPlayer> {
    let mut directory = TeamDirectory::new(teams_for(league));
    directory.add_roster(players);
    if directory.unplaced() > 0 {
        tracing::debug!(
            "{}: {} players without a known team",
            league,
            directory.unplaced()
        );
    }
    directory
}

/// Pair scoreboard games with teams by numeric id. Games naming an unknown team are skipped.
pub fn matchups_from_scoreboard(
    directory: &TeamDirectory<NbaPlayer>,
    games: &[ScheduledGame],
) -> Vec<Matchup<NbaPlayer>> {
    games
        .iter()
        .filter_map(|game| {
            let home = directory.by_id(game.home_team_id);
            let away = directory.by_id(game.visitor_team_id);
            match (home, away) {
                (Some(home), Some(away)) => Some(Matchup {
                    game_id: Some(game.game_id.clone()),
                    commence_time: None,
                    home: home.clone(),
                    away: away.clone(),
                }),
                _ => {
                    tracing::warn!(
                        "Could not find teams for match {} vs {}",
                        game.home_team_id,
                        game.visitor_team_id
                    );
                    None
                }
            }
        })
        .collect()
}

fn event_for<'a>(odds: &'a [MatchupOdds], home: &Team<NbaPlayer>, away: &Team<NbaPlayer>) -> Option<&'a MatchupOdds> {
    odds.iter()
        .find(|event| same_team(&event.home_team, &home.full_name) && same_team(&event.away_team, &away.full_name))
}

/// Attach each game's player props (found by home and away full name) and the
/// season logs of every player that got a line. Games without props are kept as they are.
pub fn matchups_with_odds(
    matchups: Vec<Matchup<NbaPlayer>>,
    odds: &[MatchupOdds],
    logs: &HashMap<i64, Vec<NbaGameLog>>,
) -> (Vec<Matchup<NbaPlayer>>, JoinReport) {
    let joined = fan_out_collect("nba matchups", matchups, |mut matchup| {
        let mut report = JoinReport {
            matchups: 1,
            ..Default::default()
        };
        match event_for(odds, &matchup.home, &matchup.away) {
            Some(event) => {
                matchup.commence_time = event.commence_time;
                report += attach_event_odds(&mut matchup, event);
                report.players_with_logs += attach_season_logs(&mut matchup, logs);
            }
            None => tracing::debug!(
                "No props for {} vs {}",
                matchup.home.full_name,
                matchup.away.full_name
            ),
        }
        UnitOutcome::Done((matchup, report))
    });

    let mut total = JoinReport::default();
    let matchups = joined
        .into_iter()
        .map(|(matchup, report)| {
            total += report;
            matchup
        })
        .collect();
    (matchups, total)
}

/// Split a bulk PlayerGameLogs response by player id, each player's games oldest first
pub fn season_logs_by_player(logs: Vec<NbaGameLog>) -> HashMap<i64, Vec<NbaGameLog>> {
    let mut by_player: HashMap<i64, Vec<NbaGameLog>> = HashMap::new();
    for log in logs {
        by_player.entry(log.player_id).or_default().push(log);
    }
    for player_logs in by_player.values_mut() {
        crate::models::sort_by_game_date(player_logs);
    }
    by_player
}
