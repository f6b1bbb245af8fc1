use super::{params, Fetcher, Params};
use crate::decode::{self, Mapped};
use crate::error::Result;
use crate::models::{MlbGameLog, MlbPlayer, MlbTeamInfo, StatGroup};
use std::sync::Arc;

const MLB_SPORT_ID: &str = "1";
/// Regular season
pub const REGULAR_SEASON: &str = "R";

/// Client for statsapi.mlb.com
#[derive(Clone)]
pub struct MlbStatsClient {
    fetcher: Arc<dyn Fetcher>,
}

impl MlbStatsClient {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Every major league club
    pub async fn teams(&self) -> Result<Mapped<MlbTeamInfo>> {
        let raw = self
            .fetcher
            .fetch("teams", &params([("sportId", MLB_SPORT_ID)]))
            .await?;
        decode::mlb::teams_from_value(&raw)
    }

    pub async fn roster(&self, team_id: i64) -> Result<Mapped<MlbPlayer>> {
        let endpoint = format!("teams/{}/roster", team_id);
        let raw = self.fetcher.fetch(&endpoint, &Params::new()).await?;
        decode::mlb::roster_from_value(&raw, team_id)
    }

    /// Hitting or pitching game log. Without a group the provider answers with hitting.
    pub async fn game_log(
        &self,
        player_id: i64,
        season: &str,
        game_type: &str,
        group: Option<StatGroup>,
    ) -> Result<Mapped<MlbGameLog>> {
        let endpoint = format!("people/{}/stats", player_id);
        let mut query = params([
            ("gameType", game_type),
            ("language", "en"),
            ("season", season),
            ("stats", "gameLog"),
        ]);
        if let Some(group) = group {
            query.insert("group".to_string(), group.as_str().to_string());
        }
        let raw = self.fetcher.fetch(&endpoint, &query).await?;
        decode::mlb::game_logs_from_value(&raw)
    }
}
