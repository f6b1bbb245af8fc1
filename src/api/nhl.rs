use super::{Fetcher, Params};
use crate::decode::{self, Mapped};
use crate::error::Result;
use crate::models::{NhlGameLog, NhlPlayer};
use std::sync::Arc;

/// gameType of the game-log endpoint
pub const REGULAR_SEASON: u8 = 2;

/// Client for api-web.nhle.com
#[derive(Clone)]
pub struct NhlWebClient {
    fetcher: Arc<dyn Fetcher>,
}

impl NhlWebClient {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Roster of one team for a season (`20242025`). Players are tagged with `team_id`.
    pub async fn roster(&self, abbreviation: &str, team_id: i64, season: &str) -> Result<Mapped<NhlPlayer>> {
        let endpoint = format!("roster/{}/{}", abbreviation, season);
        let raw = self.fetcher.fetch(&endpoint, &Params::new()).await?;
        decode::nhl::roster_from_value(&raw, team_id)
    }

    /// Regular-season game log of a player
    pub async fn game_log(&self, player: &NhlPlayer, season: &str) -> Result<Mapped<NhlGameLog>> {
        let endpoint = format!("player/{}/game-log/{}/{}", player.id, season, REGULAR_SEASON);
        let raw = self.fetcher.fetch(&endpoint, &Params::new()).await?;
        decode::nhl::game_logs_from_value(&raw, player.is_goalie())
    }
}
