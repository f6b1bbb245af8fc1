use super::{params, Fetcher, Params};
use crate::decode::{self, Mapped, ResultSets};
use crate::error::Result;
use crate::models::{NbaGameLog, NbaPlayer, ScheduledGame};
use chrono::NaiveDate;
use std::sync::Arc;

const COMMON_ALL_PLAYERS: &str = "commonallplayers";
const COMMON_TEAM_ROSTER: &str = "commonteamroster";
const PLAYER_GAME_LOG: &str = "playergamelog";
const PLAYER_GAME_LOGS: &str = "playergamelogs";
const SCOREBOARD_V2: &str = "scoreboardv2";

/// Part of a game to restrict box scores to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSplit {
    FirstHalf,
    SecondHalf,
    Overtime,
    Quarter(u8),
}

impl GameSplit {
    fn apply(&self, params: &mut Params) {
        match self {
            GameSplit::FirstHalf => params.insert("GameSegment".to_string(), "First Half".to_string()),
            GameSplit::SecondHalf => params.insert("GameSegment".to_string(), "Second Half".to_string()),
            GameSplit::Overtime => params.insert("GameSegment".to_string(), "Overtime".to_string()),
            GameSplit::Quarter(period) => params.insert("Period".to_string(), period.to_string()),
        };
    }
}

/// Client for stats.nba.com (NBA and WNBA, told apart by LeagueID)
#[derive(Clone)]
pub struct NbaStatsClient {
    fetcher: Arc<dyn Fetcher>,
}

impl NbaStatsClient {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Any stats endpoint, decoded into its result sets
    pub async fn result_sets(&self, endpoint: &str, params: &Params) -> Result<ResultSets> {
        let raw = self.fetcher.fetch(endpoint, params).await?;
        ResultSets::from_value(&raw)
    }

    /// Every player of a league and season, or only this season's when `only_current`
    pub async fn all_players(
        &self,
        league_id: &str,
        season: &str,
        only_current: bool,
    ) -> Result<Mapped<NbaPlayer>> {
        let flag = if only_current { "1" } else { "0" };
        let raw = self
            .fetcher
            .fetch(
                COMMON_ALL_PLAYERS,
                &params([
                    ("IsOnlyCurrentSeason", flag),
                    ("LeagueID", league_id),
                    ("Season", season),
                ]),
            )
            .await?;
        decode::nba::players_from_value(&raw)
    }

    pub async fn team_roster(&self, league_id: &str, team_id: i64, season: &str) -> Result<Mapped<NbaPlayer>> {
        let team_id = team_id.to_string();
        let raw = self
            .fetcher
            .fetch(
                COMMON_TEAM_ROSTER,
                &params([
                    ("LeagueID", league_id),
                    ("Season", season),
                    ("TeamID", team_id.as_str()),
                ]),
            )
            .await?;
        decode::nba::roster_from_value(&raw)
    }

    /// The games on the scoreboard for `date`
    pub async fn scoreboard(&self, league_id: &str, date: NaiveDate) -> Result<Mapped<ScheduledGame>> {
        let game_date = date.format("%Y-%m-%d").to_string();
        let raw = self
            .fetcher
            .fetch(
                SCOREBOARD_V2,
                &params([
                    ("DayOffset", "0"),
                    ("GameDate", game_date.as_str()),
                    ("LeagueID", league_id),
                ]),
            )
            .await?;
        decode::nba::games_from_value(&raw)
    }

    /// Box scores of every player for a season, one request
    pub async fn season_game_logs(
        &self,
        league_id: &str,
        season: &str,
        season_type: &str,
        split: Option<GameSplit>,
    ) -> Result<Mapped<NbaGameLog>> {
        let mut query = params([
            ("LeagueID", league_id),
            ("MeasureType", "Base"),
            ("PerMode", "Totals"),
            ("Season", season),
            ("SeasonType", season_type),
        ]);
        if let Some(split) = split {
            split.apply(&mut query);
        }

        let raw = self.fetcher.fetch(PLAYER_GAME_LOGS, &query).await?;
        decode::nba::game_logs_from_value(&raw)
    }

    /// One player's box scores for a season
    pub async fn player_game_log(
        &self,
        league_id: &str,
        player_id: i64,
        season: &str,
        season_type: &str,
    ) -> Result<Mapped<NbaGameLog>> {
        let player_id = player_id.to_string();
        let raw = self
            .fetcher
            .fetch(
                PLAYER_GAME_LOG,
                &params([
                    ("LeagueID", league_id),
                    ("PlayerID", player_id.as_str()),
                    ("Season", season),
                    ("SeasonType", season_type),
                ]),
            )
            .await?;
        decode::nba::game_logs_from_value(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::HttpFetcher;
    use crate::config::Config;
    use crate::api::{build_cache, nba_stats_fetcher};

    #[test]
    fn test_game_split_params() {
        let mut query = Params::new();
        GameSplit::Quarter(3).apply(&mut query);
        GameSplit::FirstHalf.apply(&mut query);
        assert_eq!(query.get("Period").map(String::as_str), Some("3"));
        assert_eq!(query.get("GameSegment").map(String::as_str), Some("First Half"));
    }

    #[tokio::test]
    #[ignore] // hits stats.nba.com
    async fn test_live_all_players() {
        let config = Config::from_env();
        let fetcher: HttpFetcher = nba_stats_fetcher(&config, build_cache(&config)).unwrap();
        let client = NbaStatsClient::new(Arc::new(fetcher));
        let players = client.all_players("00", &config.nba_season, true).await.unwrap();
        assert!(!players.is_empty());
    }
}
