//! Cross-provider join: put roster players on canonical teams, pair teams into
//! matchups, then hang odds and season logs off the players.

pub mod by_name;
pub mod nba;

pub use by_name::{matchups_from_odds, teams_in_events};
pub use nba::{matchups_from_scoreboard, matchups_with_odds, season_logs_by_player, teams_with_players};

use crate::models::{Matchup, MatchupOdds, RosterPlayer, Team};
use crate::utils::names::{normalize_player_name, normalize_team_name};
use serde::Serialize;
use std::collections::HashMap;
use std::ops::AddAssign;

/// What a join pass managed to resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    pub matchups: usize,
    pub skipped_events: usize,
    pub matched_outcomes: usize,
    pub unmatched_outcomes: usize,
    pub players_with_logs: usize,
}

impl JoinReport {
    pub fn log(&self, label: &str) {
        tracing::info!(
            "{}: {} matchups ({} events skipped), {} outcomes matched, {} unmatched, {} players with logs",
            label,
            self.matchups,
            self.skipped_events,
            self.matched_outcomes,
            self.unmatched_outcomes,
            self.players_with_logs
        );
    }
}

impl AddAssign for JoinReport {
    fn add_assign(&mut self, other: Self) {
        self.matchups += other.matchups;
        self.skipped_events += other.skipped_events;
        self.matched_outcomes += other.matched_outcomes;
        self.unmatched_outcomes += other.unmatched_outcomes;
        self.players_with_logs += other.players_with_logs;
    }
}

/// Canonical teams of one league, addressable by id and by normalized full name
#[derive(Debug, Clone)]
pub struct TeamDirectory<P> {
    teams: Vec<Team<P>>,
    by_id: HashMap<i64, usize>,
    by_name: HashMap<String, usize>,
    unplaced: usize,
}

impl<P> TeamDirectory<P> {
    /// Exactly one team per id: a repeated id keeps the first entry
    pub fn new(teams: Vec<Team<P>>) -> Self {
        let mut directory = Self {
            teams: Vec::with_capacity(teams.len()),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
            unplaced: 0,
        };
        for team in teams {
            if directory.by_id.contains_key(&team.id) {
                tracing::warn!("Duplicate team id {} ({}), keeping the first", team.id, team.full_name);
                continue;
            }
            let index = directory.teams.len();
            directory.by_id.insert(team.id, index);
            directory
                .by_name
                .entry(normalize_team_name(&team.full_name))
                .or_insert(index);
            directory.teams.push(team);
        }
        directory
    }

    pub fn by_id(&self, id: i64) -> Option<&Team<P>> {
        self.by_id.get(&id).map(|&i| &self.teams[i])
    }

    pub fn by_id_mut(&mut self, id: i64) -> Option<&mut Team<P>> {
        match self.by_id.get(&id) {
            Some(&i) => self.teams.get_mut(i),
            None => None,
        }
    }

    /// Exact match on the normalized full name
    pub fn by_name(&self, full_name: &str) -> Option<&Team<P>> {
        self.by_name
            .get(&normalize_team_name(full_name))
            .map(|&i| &self.teams[i])
    }

    pub fn teams(&self) -> &[Team<P>] {
        &self.teams
    }

    pub fn into_teams(self) -> Vec<Team<P>> {
        self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Players that named a team id we don't know
    pub fn unplaced(&self) -> usize {
        self.unplaced
    }
}

impl<P: RosterPlayer> TeamDirectory<P> {
    /// Append a player to their team's roster. Unknown team ids are counted and dropped.
    pub fn add_roster_member(&mut self, player: P) -> bool {
        match self.by_id_mut(player.team_id()) {
            Some(team) => {
                team.players.push(player);
                true
            }
            None => {
                self.unplaced += 1;
                false
            }
        }
    }

    pub fn add_roster(&mut self, players: impl IntoIterator<Item = P>) {
        for player in players {
            self.add_roster_member(player);
        }
    }
}

/// Index of a roster by normalized name. The first player with a given name wins.
fn roster_index<P: RosterPlayer>(players: &[P]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(players.len());
    for (i, player) in players.iter().enumerate() {
        index
            .entry(normalize_player_name(player.full_name()))
            .or_insert(i);
    }
    index
}

/// Append every outcome of `odds` to the player it names, looking on the home
/// roster first and then the away roster. Unmatched outcomes are dropped.
pub fn attach_event_odds<P: RosterPlayer>(matchup: &mut Matchup<P>, odds: &MatchupOdds) -> JoinReport {
    let mut report = JoinReport::default();
    let home_index = roster_index(&matchup.home.players);
    let away_index = roster_index(&matchup.away.players);

    for bookmaker in &odds.bookmakers {
        for market in &bookmaker.markets {
            for outcome in &market.outcomes {
                let name = match outcome.description.as_deref() {
                    Some(name) => normalize_player_name(name),
                    None => {
                        report.unmatched_outcomes += 1;
                        continue;
                    }
                };

                let player = if let Some(&i) = home_index.get(&name) {
                    matchup.home.players.get_mut(i)
                } else if let Some(&i) = away_index.get(&name) {
                    matchup.away.players.get_mut(i)
                } else {
                    None
                };

                match player {
                    Some(player) => {
                        player
                            .odds_mut()
                            .add(&market.key, &bookmaker.key, outcome.to_outcome());
                        report.matched_outcomes += 1;
                    }
                    None => {
                        tracing::debug!("No player found for {:?} in {}", outcome.description, odds.id);
                        report.unmatched_outcomes += 1;
                    }
                }
            }
        }
    }
    report
}

/// Attach season logs (by player id) to every player on either side that got odds.
/// The opponent is the abbreviation of the other side. Players keep the first logs
/// they were given.
pub fn attach_season_logs<P>(
    matchup: &mut Matchup<P>,
    logs: &HashMap<i64, Vec<P::Log>>,
) -> usize
where
    P: RosterPlayer,
    P::Log: Clone,
{
    let home_abbreviation = matchup.home.abbreviation.clone();
    let away_abbreviation = matchup.away.abbreviation.clone();

    let mut attached = 0;
    let sides = [
        (&mut matchup.home.players, away_abbreviation),
        (&mut matchup.away.players, home_abbreviation),
    ];
    for (players, opponent) in sides {
        for player in players.iter_mut() {
            if !player.has_odds() || player.has_logs() {
                continue;
            }
            if let Some(player_logs) = logs.get(&player.id()) {
                player.attach_logs(player_logs.clone(), Some(opponent.clone()));
                if player.has_logs() {
                    attached += 1;
                }
            }
        }
    }
    attached
}

/// `attach_season_logs` over a whole slate
pub fn attach_logs_to_matchups<P>(matchups: &mut [Matchup<P>], logs: &HashMap<i64, Vec<P::Log>>) -> usize
where
    P: RosterPlayer,
    P::Log: Clone,
{
    matchups
        .iter_mut()
        .map(|matchup| attach_season_logs(matchup, logs))
        .sum()
}

/// Players on either side that received odds
pub fn players_with_odds<P: RosterPlayer>(matchups: &[Matchup<P>]) -> Vec<&P> {
    matchups
        .iter()
        .flat_map(|m| m.home.players.iter().chain(m.away.players.iter()))
        .filter(|p| p.has_odds())
        .collect()
}

/// Everyone on today's rosters: away players, then home players, per matchup
pub fn active_players<P: Clone>(matchups: &[Matchup<P>]) -> Vec<P> {
    matchups
        .iter()
        .flat_map(|m| m.away.players.iter().chain(m.home.players.iter()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bookmaker, Market, NbaGameLog, NbaPlayer, PropOutcome};
    use crate::models::League;
    use crate::teams::teams_for;

    pub(crate) fn player(id: i64, team_id: i64, name: &str) -> NbaPlayer {
        NbaPlayer {
            id,
            team_id,
            full_name: name.to_string(),
            roster_status: 1,
            ..Default::default()
        }
    }

    pub(crate) fn prop(description: &str, name: &str, point: f64, price: i32) -> PropOutcome {
        PropOutcome {
            name: name.to_string(),
            description: Some(description.to_string()),
            point,
            price,
        }
    }

    pub(crate) fn event(home: &str, away: &str, outcomes: Vec<PropOutcome>) -> MatchupOdds {
        MatchupOdds {
            id: format!("{}-{}", home, away),
            sport_key: "basketball_nba".to_string(),
            sport_title: "NBA".to_string(),
            commence_time: None,
            home_team: home.to_string(),
            away_team: away.to_string(),
            bookmakers: vec![Bookmaker {
                key: "draftkings".to_string(),
                title: "DraftKings".to_string(),
                markets: vec![Market {
                    key: "player_points".to_string(),
                    last_update: None,
                    outcomes,
                }],
            }],
        }
    }

    fn directory() -> TeamDirectory<NbaPlayer> {
        let mut directory = TeamDirectory::new(teams_for(League::Nba));
        directory.add_roster(vec![
            player(1, 1610612737, "Trae Young"),
            player(2, 1610612738, "Jayson Tatum"),
            player(3, 1610612748, "Tim Hardaway Jr"),
            player(4, 0, "Free Agent"),
        ]);
        directory
    }

    #[test]
    fn test_directory_places_players() {
        let directory = directory();
        assert_eq!(directory.len(), 30);
        assert_eq!(directory.unplaced(), 1);
        assert_eq!(directory.by_id(1610612737).unwrap().players.len(), 1);
        assert_eq!(directory.by_name("Boston  Celtics").unwrap().id, 1610612738);
        assert!(directory.by_name("Boston Bruins").is_none());
    }

    #[test]
    fn test_attach_event_odds_accumulates_and_drops_unknowns() {
        let directory = directory();
        let mut matchup = Matchup {
            game_id: None,
            commence_time: None,
            home: directory.by_id(1610612737).unwrap().clone(),
            away: directory.by_id(1610612738).unwrap().clone(),
        };
        let odds = event(
            "Atlanta Hawks",
            "Boston Celtics",
            vec![
                prop("Trae Young", "Over", 25.5, -115),
                prop("Trae Young", "Under", 25.5, -105),
                prop("Jayson Tatum", "Over", 27.5, -110),
                prop("Somebody Else", "Over", 9.5, 100),
            ],
        );

        let report = attach_event_odds(&mut matchup, &odds);
        assert_eq!(report.matched_outcomes, 3);
        assert_eq!(report.unmatched_outcomes, 1);
        assert_eq!(
            matchup.home.players[0].odds.get("player_points", "draftkings").len(),
            2
        );
        assert_eq!(matchup.away.players[0].odds.len(), 1);

        // A second pass appends rather than replaces
        attach_event_odds(&mut matchup, &odds);
        assert_eq!(matchup.home.players[0].odds.len(), 4);
    }

    #[test]
    fn test_attach_season_logs_only_for_players_with_odds() {
        let directory = directory();
        let mut matchup = Matchup {
            game_id: None,
            commence_time: None,
            home: directory.by_id(1610612737).unwrap().clone(),
            away: directory.by_id(1610612738).unwrap().clone(),
        };
        attach_event_odds(
            &mut matchup,
            &event("Atlanta Hawks", "Boston Celtics", vec![prop("Trae Young", "Over", 25.5, -115)]),
        );

        let log = |player_id: i64| NbaGameLog {
            player_id,
            game_date: "2025-01-01T00:00:00".to_string(),
            ..Default::default()
        };
        let logs = HashMap::from([(1, vec![log(1)]), (2, vec![log(2)])]);

        assert_eq!(attach_season_logs(&mut matchup, &logs), 1);
        let trae = &matchup.home.players[0];
        assert_eq!(trae.opponent_abbreviation.as_deref(), Some("BOS"));
        assert!(!matchup.away.players[0].has_logs());
    }

    #[test]
    fn test_active_players_away_then_home() {
        let directory = directory();
        let matchup = Matchup {
            game_id: None,
            commence_time: None,
            home: directory.by_id(1610612737).unwrap().clone(),
            away: directory.by_id(1610612738).unwrap().clone(),
        };
        let players = active_players(&[matchup]);
        let names: Vec<&str> = players.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["Jayson Tatum", "Trae Young"]);
    }
}
