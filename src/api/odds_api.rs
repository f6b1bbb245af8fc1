use super::{params, Fetcher};
use crate::decode::{self, Mapped};
use crate::error::Result;
use crate::models::{League, MatchupOdds, OddsEvent};
use crate::utils::fanout::{fan_out_tasks, UnitOutcome};
use std::sync::Arc;

const NBA_PROP_MARKETS: &[&str] = &[
    "player_points",
    "player_rebounds",
    "player_assists",
    "player_steals",
    "player_points_assists",
    "player_points_rebounds_assists",
    "player_points_rebounds",
    "player_turnovers",
    "player_blocks",
    "player_threes",
];

const NHL_PROP_MARKETS: &[&str] = &[
    "player_points",
    "player_power_play_points",
    "player_assists",
    "player_goals",
    "player_shots_on_goal",
    "player_total_saves",
];

const MLB_PROP_MARKETS: &[&str] = &[
    "batter_hits",
    "batter_home_runs",
    "batter_total_bases",
    "batter_rbis",
    "pitcher_strikeouts",
];

/// Player-prop markets requested for a league
pub fn prop_markets(league: League) -> &'static [&'static str] {
    match league {
        League::Nba | League::Wnba => NBA_PROP_MARKETS,
        League::Nhl => NHL_PROP_MARKETS,
        League::Mlb => MLB_PROP_MARKETS,
    }
}

/// Client for The Odds API (v4). Without an API key every call returns nothing.
#[derive(Clone)]
pub struct OddsApiClient {
    fetcher: Arc<dyn Fetcher>,
    enabled: bool,
}

impl OddsApiClient {
    pub fn new(fetcher: Arc<dyn Fetcher>, enabled: bool) -> Self {
        Self { fetcher, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Upcoming events of a league, without prices
    pub async fn events(&self, league: League) -> Result<Mapped<OddsEvent>> {
        if !self.enabled {
            return Ok(Mapped::empty());
        }
        let endpoint = format!("{}/events", league.odds_sport_key());
        let raw = self.fetcher.fetch(&endpoint, &params([])).await?;
        decode::odds::events_from_value(&raw)
    }

    /// One event with the given markets from every US bookmaker
    pub async fn event_odds(&self, league: League, event_id: &str, markets: &[&str]) -> Result<MatchupOdds> {
        fetch_event_odds(self.fetcher.clone(), league, event_id.to_string(), markets.join(",")).await
    }

    /// Player props of every upcoming event of a league, one request per event.
    /// Events whose odds fail to load are left out.
    pub async fn player_props(&self, league: League) -> Result<Vec<MatchupOdds>> {
        let events = self.events(league).await?.into_items();
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let markets = prop_markets(league).join(",");
        let label = format!("{} player props", league);
        let props = fan_out_tasks(&label, events, |event| {
            let fetcher = self.fetcher.clone();
            let markets = markets.clone();
            async move {
                UnitOutcome::from(fetch_event_odds(fetcher, league, event.id, markets).await)
            }
        })
        .await;

        tracing::info!("Fetched props for {} {} events", props.len(), league);
        Ok(props)
    }
}

async fn fetch_event_odds(
    fetcher: Arc<dyn Fetcher>,
    league: League,
    event_id: String,
    markets: String,
) -> Result<MatchupOdds> {
    let endpoint = format!("{}/events/{}/odds", league.odds_sport_key(), event_id);
    let raw = fetcher
        .fetch(
            &endpoint,
            &params([
                ("markets", markets.as_str()),
                ("oddsFormat", "american"),
                ("regions", "us"),
            ]),
        )
        .await?;
    decode::odds::matchup_odds_from_value(&raw)
}
