use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sports_props::models::StatGroup;
use sports_props::utils::validate;
use sports_props::{Aggregator, Config, Error, League};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Library errors mapped onto HTTP statuses
struct AppError(Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_upstream() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{}", self.0);
        }
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, AppError>;

#[derive(Debug, Default, Deserialize)]
struct DateQuery {
    date: Option<String>,
}

impl DateQuery {
    /// `YYYY-MM-DD`, today when absent
    fn date(&self) -> Result<NaiveDate, AppError> {
        match self.date.as_deref() {
            None | Some("") => Ok(Local::now().date_naive()),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                AppError(Error::InvalidParameter(
                    "invalid date: must be 'YYYY-MM-DD'".to_string(),
                ))
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayersQuery {
    is_only_current_season: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameLogQuery {
    #[serde(rename = "playerID")]
    player_id: Option<String>,
    season: Option<String>,
    season_type: Option<String>,
    #[serde(rename = "leagueID")]
    league_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HitRateQuery {
    #[serde(rename = "playerID")]
    player_id: Option<String>,
    stat: Option<String>,
    threshold: Option<f64>,
    last_n: Option<i64>,
    season: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MlbGameLogQuery {
    #[serde(rename = "playerID")]
    player_id: Option<String>,
    season: Option<String>,
    group: Option<String>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Explicit leagueID must agree with the route's league
fn check_league_id(league: League, league_id: Option<&str>) -> Result<(), AppError> {
    if let Some(league_id) = league_id {
        validate::league_id(league_id)?;
        if league.stats_league_id() != Some(league_id) {
            return Err(AppError(Error::InvalidParameter(format!(
                "leagueID {} does not match {}",
                league_id, league
            ))));
        }
    }
    Ok(())
}

fn checked_season(season: Option<&str>) -> Result<Option<&str>, AppError> {
    Ok(season.map(validate::season).transpose()?)
}

// ---- NBA ----

async fn nba_teams(State(aggregator): State<Aggregator>) -> impl IntoResponse {
    Json(aggregator.basketball_teams(League::Nba))
}

async fn nba_teams_players(State(aggregator): State<Aggregator>) -> ApiResult<Vec<sports_props::Team<sports_props::NbaPlayer>>> {
    Ok(Json(aggregator.basketball_teams_with_players(League::Nba).await?))
}

async fn nba_players(
    State(aggregator): State<Aggregator>,
    Query(query): Query<PlayersQuery>,
) -> ApiResult<Vec<sports_props::NbaPlayer>> {
    let flag = query.is_only_current_season.as_deref().unwrap_or("1");
    let only_current = validate::current_season_flag(flag)?;
    Ok(Json(aggregator.basketball_players(League::Nba, only_current).await?))
}

async fn nba_players_all(State(aggregator): State<Aggregator>) -> ApiResult<Vec<sports_props::NbaPlayer>> {
    Ok(Json(aggregator.basketball_players(League::Nba, false).await?))
}

async fn basketball_game_log(
    aggregator: &Aggregator,
    league: League,
    query: &GameLogQuery,
) -> ApiResult<Vec<sports_props::NbaGameLog>> {
    let player_id = validate::id("playerID", query.player_id.as_deref())?;
    let season = checked_season(query.season.as_deref())?;
    let season_type = query
        .season_type
        .as_deref()
        .map(validate::season_type)
        .transpose()?;
    check_league_id(league, query.league_id.as_deref())?;

    Ok(Json(
        aggregator
            .basketball_game_log(league, player_id, season, season_type)
            .await?,
    ))
}

async fn nba_player_gamelog(
    State(aggregator): State<Aggregator>,
    Query(query): Query<GameLogQuery>,
) -> ApiResult<Vec<sports_props::NbaGameLog>> {
    basketball_game_log(&aggregator, League::Nba, &query).await
}

async fn nba_player_hit_rate(
    State(aggregator): State<Aggregator>,
    Query(query): Query<HitRateQuery>,
) -> ApiResult<sports_props::utils::hit_rate::HitRateSummary> {
    let player_id = validate::id("playerID", query.player_id.as_deref())?;
    let stat = query.stat.as_deref().unwrap_or("PTS");
    let last_n = validate::positive("lastN", query.last_n.unwrap_or(10))?;
    let threshold = query.threshold.ok_or_else(|| {
        AppError(Error::InvalidParameter("threshold is required".to_string()))
    })?;
    let season = checked_season(query.season.as_deref())?;

    Ok(Json(
        aggregator
            .hit_rate(player_id, stat, last_n as usize, threshold, season)
            .await?,
    ))
}

async fn nba_matchups(
    State(aggregator): State<Aggregator>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Vec<sports_props::Matchup<sports_props::NbaPlayer>>> {
    let date = query.date()?;
    Ok(Json(aggregator.basketball_matchups(League::Nba, date).await?))
}

async fn nba_matchups_odds(
    State(aggregator): State<Aggregator>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Vec<sports_props::Matchup<sports_props::NbaPlayer>>> {
    let date = query.date()?;
    Ok(Json(
        aggregator
            .basketball_matchups_with_odds(League::Nba, date)
            .await?,
    ))
}

async fn nba_players_active(
    State(aggregator): State<Aggregator>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Vec<sports_props::NbaPlayer>> {
    let date = query.date()?;
    Ok(Json(aggregator.active_players(League::Nba, date).await?))
}

// ---- WNBA ----

async fn wnba_teams(State(aggregator): State<Aggregator>) -> impl IntoResponse {
    Json(aggregator.basketball_teams(League::Wnba))
}

async fn wnba_teams_players(State(aggregator): State<Aggregator>) -> ApiResult<Vec<sports_props::Team<sports_props::NbaPlayer>>> {
    Ok(Json(aggregator.basketball_teams_with_players(League::Wnba).await?))
}

async fn wnba_players_current(State(aggregator): State<Aggregator>) -> ApiResult<Vec<sports_props::NbaPlayer>> {
    Ok(Json(aggregator.basketball_players(League::Wnba, true).await?))
}

async fn wnba_player_gamelog(
    State(aggregator): State<Aggregator>,
    Query(query): Query<GameLogQuery>,
) -> ApiResult<Vec<sports_props::NbaGameLog>> {
    basketball_game_log(&aggregator, League::Wnba, &query).await
}

// ---- NHL ----

async fn nhl_teams(State(aggregator): State<Aggregator>) -> impl IntoResponse {
    Json(aggregator.nhl_teams())
}

async fn nhl_matchups(State(aggregator): State<Aggregator>) -> ApiResult<Vec<sports_props::Matchup<sports_props::NhlPlayer>>> {
    Ok(Json(aggregator.nhl_matchups().await?))
}

// ---- MLB ----

async fn mlb_teams(State(aggregator): State<Aggregator>) -> ApiResult<Vec<sports_props::MlbTeamInfo>> {
    Ok(Json(aggregator.mlb_teams().await?))
}

async fn mlb_matchups(State(aggregator): State<Aggregator>) -> ApiResult<Vec<sports_props::Matchup<sports_props::MlbPlayer>>> {
    Ok(Json(aggregator.mlb_matchups().await?))
}

async fn mlb_player_gamelog(
    State(aggregator): State<Aggregator>,
    Query(query): Query<MlbGameLogQuery>,
) -> ApiResult<Vec<sports_props::MlbGameLog>> {
    let player_id = validate::id("playerID", query.player_id.as_deref())?;
    let season = query
        .season
        .as_deref()
        .map(validate::season_year)
        .transpose()?;
    let group = match query.group.as_deref() {
        None | Some("") => None,
        Some("hitting") => Some(StatGroup::Hitting),
        Some("pitching") => Some(StatGroup::Pitching),
        Some(other) => {
            return Err(AppError(Error::InvalidParameter(format!(
                "invalid group {}: must be 'hitting' or 'pitching'",
                other
            ))))
        }
    };

    Ok(Json(aggregator.mlb_game_log(player_id, season, group).await?))
}

fn router(aggregator: Aggregator) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/nba/teams", get(nba_teams))
        .route("/nba/teams/players", get(nba_teams_players))
        .route("/nba/players", get(nba_players))
        .route("/nba/players/all", get(nba_players_all))
        .route("/nba/player/gamelog", get(nba_player_gamelog))
        .route("/nba/player/hit-rate", get(nba_player_hit_rate))
        .route("/nba/matchups", get(nba_matchups))
        .route("/nba/matchups/odds", get(nba_matchups_odds))
        .route("/nba/players/active", get(nba_players_active))
        .route("/wnba/teams", get(wnba_teams))
        .route("/wnba/teams/players", get(wnba_teams_players))
        .route("/wnba/players/current", get(wnba_players_current))
        .route("/wnba/player/gamelog", get(wnba_player_gamelog))
        .route("/nhl/teams", get(nhl_teams))
        .route("/nhl/matchups", get(nhl_matchups))
        .route("/mlb/teams", get(mlb_teams))
        .route("/mlb/matchups", get(mlb_matchups))
        .route("/mlb/player/gamelog", get(mlb_player_gamelog))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(aggregator)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let aggregator = Aggregator::from_config(&config).context("Failed to build HTTP clients")?;
    let app = router(aggregator);

    println!("Starting web server at http://{}", config.bind_addr);
    println!("Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
