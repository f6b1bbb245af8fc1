//! Orchestration: one explicit client per provider, composed per request into
//! fetch → decode → join. Odds and season logs are optional extras: when they
//! can't be fetched the matchups are still returned without them.

use crate::api::mlb::MlbStatsClient;
use crate::api::nba::NbaStatsClient;
use crate::api::nhl::NhlWebClient;
use crate::api::odds_api::OddsApiClient;
use crate::api::{self, Fetcher, Params};
use crate::config::Config;
use crate::decode::NamedRecordSet;
use crate::error::{Error, Result};
use crate::join::{self, JoinReport, TeamDirectory};
use crate::models::{
    League, Matchup, MatchupOdds, MlbGameLog, MlbPlayer, MlbTeamInfo, NbaGameLog, NbaPlayer,
    NhlPlayer, RosterPlayer, StatGroup, Team,
};
use crate::teams::teams_for;
use crate::utils::fanout::{fan_out_tasks, UnitOutcome};
use crate::utils::hit_rate::{summarize, HitRateSummary};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

pub const REGULAR_SEASON: &str = "Regular Season";

/// Default season of each league
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seasons {
    /// `YYYY-YY`, NBA and WNBA
    pub nba: String,
    /// `YYYYYYYY`
    pub nhl: String,
    /// `YYYY`
    pub mlb: String,
}

impl Seasons {
    pub fn from_config(config: &Config) -> Self {
        Self {
            nba: config.nba_season.clone(),
            nhl: config.nhl_season.clone(),
            mlb: config.mlb_season.clone(),
        }
    }
}

/// Where each provider's responses come from. No odds fetcher means no odds.
pub struct Providers {
    pub nba: Arc<dyn Fetcher>,
    pub nhl: Arc<dyn Fetcher>,
    pub mlb: Arc<dyn Fetcher>,
    pub odds: Option<Arc<dyn Fetcher>>,
}

#[derive(Clone)]
pub struct Aggregator {
    nba: NbaStatsClient,
    nhl: NhlWebClient,
    mlb: MlbStatsClient,
    odds: Option<OddsApiClient>,
    seasons: Seasons,
}

/// A missing resource is nothing to contribute, anything else is a failure
fn unit<T>(result: Result<T>) -> UnitOutcome<T> {
    match result {
        Err(Error::NotFound(reason)) => UnitOutcome::Skipped(reason),
        other => UnitOutcome::from(other),
    }
}

impl Aggregator {
    pub fn new(providers: Providers, seasons: Seasons) -> Self {
        Self {
            nba: NbaStatsClient::new(providers.nba),
            nhl: NhlWebClient::new(providers.nhl),
            mlb: MlbStatsClient::new(providers.mlb),
            odds: providers
                .odds
                .map(|fetcher| OddsApiClient::new(fetcher, true)),
            seasons,
        }
    }

    /// Live HTTP clients sharing one response cache
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = api::build_cache(config);
        let odds: Option<Arc<dyn Fetcher>> = match config.odds_api_key {
            Some(_) => Some(Arc::new(api::odds_api_fetcher(config, cache.clone())?)),
            None => None,
        };
        let providers = Providers {
            nba: Arc::new(api::nba_stats_fetcher(config, cache.clone())?),
            nhl: Arc::new(api::nhl_web_fetcher(config, cache.clone())?),
            mlb: Arc::new(api::mlb_stats_fetcher(config, cache)?),
            odds,
        };
        Ok(Self::new(providers, Seasons::from_config(config)))
    }

    pub fn seasons(&self) -> &Seasons {
        &self.seasons
    }

    /// Player props of a league. Failures are logged and count as no props.
    pub async fn player_props(&self, league: League) -> Vec<MatchupOdds> {
        let Some(odds) = &self.odds else {
            tracing::debug!("No odds client, skipping {} props", league);
            return Vec::new();
        };
        match odds.player_props(league).await {
            Ok(props) => props,
            Err(e) => {
                tracing::warn!("Failed to fetch {} player props: {}", league, e);
                Vec::new()
            }
        }
    }

    fn stats_league_id(league: League) -> Result<&'static str> {
        league
            .stats_league_id()
            .ok_or_else(|| Error::InvalidParameter(format!("{} is not served by the NBA stats API", league)))
    }

    // ---- NBA / WNBA ----

    /// Any stats endpoint, flattened to named record sets
    pub async fn basketball_result_sets(&self, endpoint: &str, params: &Params) -> Result<NamedRecordSet> {
        Ok(self.nba.result_sets(endpoint, params).await?.normalized_dict())
    }

    /// The static teams of an NBA-style league, without rosters
    pub fn basketball_teams(&self, league: League) -> Vec<Team<NbaPlayer>> {
        teams_for(league)
    }

    /// Players of a league for the default season
    pub async fn basketball_players(&self, league: League, only_current: bool) -> Result<Vec<NbaPlayer>> {
        let league_id = Self::stats_league_id(league)?;
        let players = self
            .nba
            .all_players(league_id, &self.seasons.nba, only_current)
            .await?;
        Ok(players.into_items())
    }

    /// Every team with this season's players on it
    pub async fn basketball_teams_with_players(&self, league: League) -> Result<Vec<Team<NbaPlayer>>> {
        let players = self.basketball_players(league, true).await?;
        Ok(join::teams_with_players(league, players).into_teams())
    }

    /// One player's box scores, oldest first
    pub async fn basketball_game_log(
        &self,
        league: League,
        player_id: i64,
        season: Option<&str>,
        season_type: Option<&str>,
    ) -> Result<Vec<NbaGameLog>> {
        let league_id = Self::stats_league_id(league)?;
        let season = season.unwrap_or(&self.seasons.nba);
        let season_type = season_type.unwrap_or(REGULAR_SEASON);

        let mut logs = self
            .nba
            .player_game_log(league_id, player_id, season, season_type)
            .await?
            .into_items();
        crate::models::sort_by_game_date(&mut logs);
        Ok(logs)
    }

    /// How often a player reached `threshold` of `stat` over their last `last_n` games
    pub async fn hit_rate(
        &self,
        player_id: i64,
        stat: &str,
        last_n: usize,
        threshold: f64,
        season: Option<&str>,
    ) -> Result<HitRateSummary> {
        let logs = self
            .basketball_game_log(League::Nba, player_id, season, None)
            .await?;
        summarize(player_id, &logs, stat, last_n, threshold)
    }

    /// The day's games, with each side's current roster
    pub async fn basketball_matchups(&self, league: League, date: NaiveDate) -> Result<Vec<Matchup<NbaPlayer>>> {
        let league_id = Self::stats_league_id(league)?;
        let players = self.basketball_players(league, true).await?;
        let directory = join::teams_with_players(league, players);

        let games = self.nba.scoreboard(league_id, date).await?.into_items();
        if games.is_empty() {
            tracing::info!("No {} games on {}", league, date);
        }
        Ok(join::matchups_from_scoreboard(&directory, &games))
    }

    /// The day's games with player props attached, and season logs for every player with a line
    pub async fn basketball_matchups_with_odds(
        &self,
        league: League,
        date: NaiveDate,
    ) -> Result<Vec<Matchup<NbaPlayer>>> {
        let matchups = self.basketball_matchups(league, date).await?;
        if matchups.is_empty() {
            return Ok(matchups);
        }

        let props = self.player_props(league).await;
        let logs = self.basketball_season_logs(league).await;

        let (matchups, report) = join::matchups_with_odds(matchups, &props, &logs);
        report.log(&format!("{} matchups", league));
        Ok(matchups)
    }

    /// Bulk season logs split per player. Failures are logged and count as no logs.
    async fn basketball_season_logs(&self, league: League) -> HashMap<i64, Vec<NbaGameLog>> {
        let Ok(league_id) = Self::stats_league_id(league) else {
            return HashMap::new();
        };
        match self
            .nba
            .season_game_logs(league_id, &self.seasons.nba, REGULAR_SEASON, None)
            .await
        {
            Ok(logs) => join::season_logs_by_player(logs.into_items()),
            Err(e) => {
                tracing::warn!("Failed to fetch {} season logs: {}", league, e);
                HashMap::new()
            }
        }
    }

    /// Everyone on a roster of the day's games, with their props and season logs attached
    pub async fn active_players(&self, league: League, date: NaiveDate) -> Result<Vec<NbaPlayer>> {
        let matchups = self.basketball_matchups_with_odds(league, date).await?;
        Ok(join::active_players(&matchups))
    }

    // ---- NHL ----

    pub fn nhl_teams(&self) -> Vec<Team<NhlPlayer>> {
        teams_for(League::Nhl)
    }

    /// Upcoming games from the odds feed with rosters, props and season logs
    pub async fn nhl_matchups(&self) -> Result<Vec<Matchup<NhlPlayer>>> {
        let directory = TeamDirectory::new(teams_for(League::Nhl));
        let season = self.seasons.nhl.clone();

        let nhl = self.nhl.clone();
        let roster = move |(team_id, abbreviation): (i64, String)| {
            let nhl = nhl.clone();
            let season = season.clone();
            async move {
                unit(
                    nhl.roster(&abbreviation, team_id, &season)
                        .await
                        .map(|players| players.into_items()),
                )
            }
        };

        let nhl = self.nhl.clone();
        let season = self.seasons.nhl.clone();
        let logs = move |player: NhlPlayer| {
            let nhl = nhl.clone();
            let season = season.clone();
            async move {
                unit(
                    nhl.game_log(&player, &season)
                        .await
                        .map(|logs| (player.id, logs.into_items())),
                )
            }
        };

        self.odds_driven_matchups(League::Nhl, directory, roster, logs)
            .await
    }

    // ---- MLB ----

    pub async fn mlb_teams(&self) -> Result<Vec<MlbTeamInfo>> {
        Ok(self.mlb.teams().await?.into_items())
    }

    /// Upcoming games from the odds feed with rosters, props and season logs
    pub async fn mlb_matchups(&self) -> Result<Vec<Matchup<MlbPlayer>>> {
        let teams = self.mlb_teams().await?;
        let directory = TeamDirectory::new(teams.iter().map(MlbTeamInfo::to_team).collect());

        let mlb = self.mlb.clone();
        let roster = move |(team_id, _abbreviation): (i64, String)| {
            let mlb = mlb.clone();
            async move { unit(mlb.roster(team_id).await.map(|players| players.into_items())) }
        };

        let mlb = self.mlb.clone();
        let season = self.seasons.mlb.clone();
        let logs = move |player: MlbPlayer| {
            let mlb = mlb.clone();
            let season = season.clone();
            async move {
                let group = StatGroup::for_player(&player);
                unit(
                    mlb.game_log(player.id, &season, api::mlb::REGULAR_SEASON, Some(group))
                        .await
                        .map(|logs| (player.id, logs.into_items())),
                )
            }
        };

        self.odds_driven_matchups(League::Mlb, directory, roster, logs)
            .await
    }

    /// One player's season game log, oldest first
    pub async fn mlb_game_log(
        &self,
        player_id: i64,
        season: Option<&str>,
        group: Option<StatGroup>,
    ) -> Result<Vec<MlbGameLog>> {
        let season = season.unwrap_or(&self.seasons.mlb);
        let mut logs = self
            .mlb
            .game_log(player_id, season, api::mlb::REGULAR_SEASON, group)
            .await?
            .into_items();
        crate::models::sort_by_game_date(&mut logs);
        Ok(logs)
    }

    /// Matchups for leagues whose schedule only the odds feed gives us: resolve the
    /// teams named by the events, fetch those rosters, join the props, then fetch
    /// logs for the players that got a line.
    async fn odds_driven_matchups<P, R, RF, L, LF>(
        &self,
        league: League,
        mut directory: TeamDirectory<P>,
        roster: R,
        logs: L,
    ) -> Result<Vec<Matchup<P>>>
    where
        P: RosterPlayer + Clone + Send + Sync + 'static,
        P::Log: Clone + Send + 'static,
        R: Fn((i64, String)) -> RF,
        RF: Future<Output = UnitOutcome<Vec<P>>> + Send + 'static,
        L: Fn(P) -> LF,
        LF: Future<Output = UnitOutcome<(i64, Vec<P::Log>)>> + Send + 'static,
    {
        let props = self.player_props(league).await;
        if props.is_empty() {
            tracing::info!("No {} events with props", league);
            return Ok(Vec::new());
        }

        let teams: Vec<(i64, String)> = join::teams_in_events(&directory, &props)
            .into_iter()
            .filter_map(|id| directory.by_id(id).map(|team| (id, team.abbreviation.clone())))
            .collect();
        let rosters = fan_out_tasks(&format!("{} rosters", league), teams, roster).await;
        for players in rosters {
            directory.add_roster(players);
        }

        let (mut matchups, mut report): (Vec<Matchup<P>>, JoinReport) =
            join::matchups_from_odds(&directory, &props);

        let players: Vec<P> = join::players_with_odds(&matchups)
            .into_iter()
            .cloned()
            .collect();
        let season_logs: HashMap<i64, Vec<P::Log>> =
            fan_out_tasks(&format!("{} game logs", league), players, logs)
                .await
                .into_iter()
                .collect();

        report.players_with_logs += join::attach_logs_to_matchups(&mut matchups, &season_logs);
        report.log(&format!("{} matchups", league));
        Ok(matchups)
    }
}
