use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use sports_props::api::{Fetcher, Params};
use sports_props::{Aggregator, Error, League, MlbGameLog, NhlGameLog, Providers, Result, RosterPlayer, Seasons};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const ATL: i64 = 1610612737;
const BOS: i64 = 1610612738;
const MIA: i64 = 1610612748;

/// Serves canned JSON by endpoint. Anything else is a 404.
#[derive(Default)]
struct MockFetcher {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    fn with(mut self, endpoint: &str, body: Value) -> Self {
        self.responses.insert(endpoint.to_string(), body);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, endpoint: &str, _params: &Params) -> Result<Value> {
        self.calls.lock().unwrap().push(endpoint.to_string());
        self.responses.get(endpoint).cloned().ok_or_else(|| Error::Status {
            url: endpoint.to_string(),
            status: 404,
        })
    }
}

fn seasons() -> Seasons {
    Seasons {
        nba: "2024-25".to_string(),
        nhl: "20242025".to_string(),
        mlb: "2025".to_string(),
    }
}

fn aggregator(nba: MockFetcher, nhl: MockFetcher, mlb: MockFetcher, odds: Option<MockFetcher>) -> Aggregator {
    Aggregator::new(
        Providers {
            nba: Arc::new(nba),
            nhl: Arc::new(nhl),
            mlb: Arc::new(mlb),
            odds: odds.map(|odds| Arc::new(odds) as Arc<dyn Fetcher>),
        },
        seasons(),
    )
}

fn result_set(name: &str, headers: &[&str], rows: Vec<Value>) -> Value {
    json!({
        "resource": "test",
        "parameters": {},
        "resultSets": [{"name": name, "headers": headers, "rowSet": rows}]
    })
}

fn outcome(player: &str, name: &str, point: f64, price: i64) -> Value {
    json!({"name": name, "description": player, "point": point, "price": price})
}

fn event(id: &str, sport: &str, home: &str, away: &str) -> Value {
    json!({
        "id": id,
        "sport_key": sport,
        "sport_title": sport,
        "commence_time": "2025-01-16T00:10:00Z",
        "home_team": home,
        "away_team": away
    })
}

fn event_odds(id: &str, sport: &str, home: &str, away: &str, market: &str, outcomes: Vec<Value>) -> Value {
    let mut odds = event(id, sport, home, away);
    odds["bookmakers"] = json!([{
        "key": "draftkings",
        "title": "DraftKings",
        "markets": [{"key": market, "last_update": "2025-01-15T20:00:00Z", "outcomes": outcomes}]
    }]);
    odds
}

fn nba_stats() -> MockFetcher {
    let player_headers = [
        "PERSON_ID",
        "DISPLAY_LAST_COMMA_FIRST",
        "DISPLAY_FIRST_LAST",
        "ROSTERSTATUS",
        "FROM_YEAR",
        "TO_YEAR",
        "PLAYERCODE",
        "TEAM_ID",
        "TEAM_CITY",
        "TEAM_NAME",
        "TEAM_ABBREVIATION",
        "GAMES_PLAYED_FLAG",
    ];
    let players = result_set(
        "CommonAllPlayers",
        &player_headers,
        vec![
            json!([1629027, "Young, Trae", "Trae Young", 1, "2018", "2024", "trae_young", ATL, "Atlanta", "Hawks", "ATL", "Y"]),
            json!([203501, "Hardaway Jr., Tim", "Tim Hardaway Jr", 1, "2013", "2024", "tim_hardaway_jr", MIA, "Miami", "Heat", "MIA", "Y"]),
            json!([1628369, "Tatum, Jayson", "Jayson Tatum", 1, "2017", "2024", "jayson_tatum", BOS, "Boston", "Celtics", "BOS", "Y"]),
        ],
    );
    let scoreboard = result_set(
        "GameHeader",
        &["GAME_DATE_EST", "GAME_SEQUENCE", "GAME_ID", "GAME_STATUS_TEXT", "HOME_TEAM_ID", "VISITOR_TEAM_ID"],
        vec![json!(["2025-01-15T00:00:00", 1, "0022400555", "7:30 pm ET", MIA, ATL])],
    );
    let log_headers = ["SEASON_YEAR", "PLAYER_ID", "PLAYER_NAME", "TEAM_ABBREVIATION", "GAME_ID", "GAME_DATE", "PTS", "REB", "AST"];
    let logs = result_set(
        "PlayerGameLogs",
        &log_headers,
        vec![
            json!(["2024-25", 203501, "Tim Hardaway Jr.", "MIA", "0022400500", "2025-01-10T00:00:00", 14, 3, 2]),
            json!(["2024-25", 203501, "Tim Hardaway Jr.", "MIA", "0022400400", "2024-12-01T00:00:00", 8, 2, 1]),
            json!(["2024-25", 1628369, "Jayson Tatum", "BOS", "0022400401", "2024-12-01T00:00:00", 31, 9, 5]),
        ],
    );
    let single = json!({
        "resultSets": [{
            "name": "PlayerGameLog",
            "headers": ["SEASON_ID", "Player_ID", "Game_ID", "GAME_DATE", "MATCHUP", "PTS"],
            "rowSet": [
                ["22024", 1629027, "0022400003", "Jan 05, 2025", "ATL vs. BOS", 30],
                ["22024", 1629027, "0022400002", "Jan 03, 2025", "ATL @ NYK", 22],
                ["22024", 1629027, "0022400001", "Jan 01, 2025", "ATL vs. MIA", 27]
            ]
        }]
    });

    MockFetcher::default()
        .with("commonallplayers", players)
        .with("scoreboardv2", scoreboard)
        .with("playergamelogs", logs)
        .with("playergamelog", single)
}

fn nba_odds() -> MockFetcher {
    MockFetcher::default()
        .with(
            "basketball_nba/events",
            json!([event("evt1", "basketball_nba", "Miami Heat", "Atlanta Hawks")]),
        )
        .with(
            "basketball_nba/events/evt1/odds",
            event_odds(
                "evt1",
                "basketball_nba",
                "Miami Heat",
                "Atlanta Hawks",
                "player_points",
                vec![
                    outcome("Tim Hardaway Jr.", "Over", 12.5, -110),
                    outcome("Tim Hardaway Jr.", "Under", 12.5, -110),
                    outcome("Trae Young", "Over", 25.5, -115),
                    outcome("Bam Adebayo", "Over", 16.5, 100),
                ],
            ),
        )
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

#[tokio::test]
async fn test_nba_matchups_with_odds_and_logs() {
    let aggregator = aggregator(nba_stats(), MockFetcher::default(), MockFetcher::default(), Some(nba_odds()));

    let matchups = aggregator
        .basketball_matchups_with_odds(League::Nba, date())
        .await
        .unwrap();
    assert_eq!(matchups.len(), 1);
    let matchup = &matchups[0];
    assert_eq!(matchup.home.abbreviation, "MIA");
    assert_eq!(matchup.away.abbreviation, "ATL");
    assert!(matchup.commence_time.is_some());

    // "Tim Hardaway Jr." on the odds feed is "Tim Hardaway Jr" on the roster
    let thj = &matchup.home.players[0];
    assert_eq!(thj.odds.get("player_points", "draftkings").len(), 2);
    let logs = thj.current_season_logs.as_ref().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].pts, 8);
    assert_eq!(thj.opponent_abbreviation.as_deref(), Some("ATL"));

    // Trae has a line but no bulk logs
    let trae = &matchup.away.players[0];
    assert!(trae.has_odds());
    assert!(trae.current_season_logs.is_none());
}

#[tokio::test]
async fn test_nba_matchups_without_odds_provider() {
    let nba = nba_stats();
    let aggregator = aggregator(nba, MockFetcher::default(), MockFetcher::default(), None);

    let matchups = aggregator
        .basketball_matchups_with_odds(League::Nba, date())
        .await
        .unwrap();
    assert_eq!(matchups.len(), 1);
    assert!(matchups[0].home.players.iter().all(|p| !p.has_odds()));

    let active = aggregator.active_players(League::Nba, date()).await.unwrap();
    let names: Vec<&str> = active.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names, vec!["Trae Young", "Tim Hardaway Jr"]);
}

#[tokio::test]
async fn test_nba_active_players_carry_odds_and_logs() {
    let aggregator = aggregator(nba_stats(), MockFetcher::default(), MockFetcher::default(), Some(nba_odds()));

    let active = aggregator.active_players(League::Nba, date()).await.unwrap();
    let names: Vec<&str> = active.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names, vec!["Trae Young", "Tim Hardaway Jr"]);

    assert!(active.iter().all(|p| p.has_odds()));
    let thj = &active[1];
    assert_eq!(thj.odds.get("player_points", "draftkings").len(), 2);
    assert_eq!(thj.current_season_logs.as_ref().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_nba_odds_failure_degrades_to_no_odds() {
    // events listed, but the per-event odds request fails
    let odds = MockFetcher::default().with(
        "basketball_nba/events",
        json!([event("evt1", "basketball_nba", "Miami Heat", "Atlanta Hawks")]),
    );
    let aggregator = aggregator(nba_stats(), MockFetcher::default(), MockFetcher::default(), Some(odds));

    let matchups = aggregator
        .basketball_matchups_with_odds(League::Nba, date())
        .await
        .unwrap();
    assert_eq!(matchups.len(), 1);
    assert!(!matchups[0].away.players[0].has_odds());
}

#[tokio::test]
async fn test_nba_teams_with_players_and_empty_scoreboard() {
    let nba = nba_stats().with(
        "scoreboardv2",
        result_set("GameHeader", &["GAME_ID", "HOME_TEAM_ID", "VISITOR_TEAM_ID"], vec![]),
    );
    let aggregator = aggregator(nba, MockFetcher::default(), MockFetcher::default(), None);

    let teams = aggregator.basketball_teams_with_players(League::Nba).await.unwrap();
    assert_eq!(teams.len(), 30);
    let hawks = teams.iter().find(|t| t.id == ATL).unwrap();
    assert_eq!(hawks.players.len(), 1);

    let matchups = aggregator.basketball_matchups(League::Nba, date()).await.unwrap();
    assert!(matchups.is_empty());
}

#[tokio::test]
async fn test_hit_rate_and_game_log() {
    let aggregator = aggregator(nba_stats(), MockFetcher::default(), MockFetcher::default(), None);

    let logs = aggregator
        .basketball_game_log(League::Nba, 1629027, None, None)
        .await
        .unwrap();
    let points: Vec<i64> = logs.iter().map(|l| l.pts).collect();
    assert_eq!(points, vec![27, 22, 30]);

    let summary = aggregator.hit_rate(1629027, "PTS", 2, 25.0, None).await.unwrap();
    assert_eq!(summary.games, 2);
    assert_eq!(summary.hits, 1);
    assert_eq!(summary.hit_rate, 50.0);
    assert_eq!(summary.streak, 1);

    assert!(matches!(
        aggregator.hit_rate(1629027, "GOALS", 2, 1.0, None).await,
        Err(Error::InvalidParameter(_))
    ));
}

#[tokio::test]
async fn test_result_sets_and_missing_endpoint() {
    let aggregator = aggregator(nba_stats(), MockFetcher::default(), MockFetcher::default(), None);

    let dict = aggregator
        .basketball_result_sets("commonallplayers", &Params::new())
        .await
        .unwrap();
    assert_eq!(dict.get("CommonAllPlayers").unwrap().len(), 3);

    let err = aggregator
        .basketball_result_sets("leaguedashteamstats", &Params::new())
        .await
        .unwrap_err();
    assert!(err.is_upstream());
}

fn nhl_roster(players: &[(i64, &str, &str, &str)]) -> Value {
    let entries: Vec<Value> = players
        .iter()
        .map(|(id, first, last, position)| {
            json!({
                "id": id,
                "firstName": {"default": first},
                "lastName": {"default": last},
                "positionCode": position,
                "sweaterNumber": 18
            })
        })
        .collect();
    json!({"forwards": entries, "defensemen": [], "goalies": []})
}

#[tokio::test]
async fn test_nhl_matchups_resolve_aliases_and_survive_failures() {
    let odds = MockFetcher::default()
        .with(
            "icehockey_nhl/events",
            json!([
                event("g1", "icehockey_nhl", "St Louis Blues", "Montreal Canadiens"),
                event("g2", "icehockey_nhl", "Hartford Whalers", "Boston Bruins"),
            ]),
        )
        .with(
            "icehockey_nhl/events/g1/odds",
            event_odds(
                "g1",
                "icehockey_nhl",
                "St Louis Blues",
                "Montreal Canadiens",
                "player_points",
                vec![
                    outcome("Robert Thomas", "Over", 0.5, -150),
                    outcome("Nick Suzuki", "Over", 0.5, -140),
                ],
            ),
        )
        .with(
            "icehockey_nhl/events/g2/odds",
            event_odds("g2", "icehockey_nhl", "Hartford Whalers", "Boston Bruins", "player_points", vec![]),
        );

    // No Bruins roster and no Suzuki log: both are skipped, nothing else is lost
    let nhl = MockFetcher::default()
        .with("roster/STL/20242025", nhl_roster(&[(8480023, "Robert", "Thomas", "C")]))
        .with("roster/MTL/20242025", nhl_roster(&[(8480018, "Nick", "Suzuki", "C")]))
        .with(
            "player/8480023/game-log/20242025/2",
            json!({"gameLog": [
                {"gameId": 2024020700, "gameDate": "2025-01-12", "teamAbbrev": "STL", "opponentAbbrev": "CHI", "goals": 1, "assists": 1, "points": 2},
                {"gameId": 2024020600, "gameDate": "2024-12-30", "teamAbbrev": "STL", "opponentAbbrev": "DAL", "goals": 0, "assists": 0, "points": 0}
            ]}),
        );

    let aggregator = aggregator(MockFetcher::default(), nhl, MockFetcher::default(), Some(odds));
    let matchups = aggregator.nhl_matchups().await.unwrap();

    assert_eq!(matchups.len(), 1);
    let matchup = &matchups[0];
    assert_eq!(matchup.home.abbreviation, "STL");
    assert_eq!(matchup.away.abbreviation, "MTL");

    let thomas = &matchup.home.players[0];
    assert_eq!(thomas.odds.len(), 1);
    let logs = thomas.current_season_logs.as_ref().unwrap();
    match &logs[0] {
        NhlGameLog::Skater(log) => assert_eq!(log.game_date, "2024-12-30"),
        other => panic!("expected a skater log, got {:?}", other),
    }
    assert_eq!(thomas.opponent_abbreviation.as_deref(), Some("MTL"));

    let suzuki = &matchup.away.players[0];
    assert!(suzuki.has_odds());
    assert!(suzuki.current_season_logs.is_none());
}

#[tokio::test]
async fn test_nhl_without_events_is_empty() {
    let odds = MockFetcher::default().with("icehockey_nhl/events", json!([]));
    let nhl = MockFetcher::default();
    let aggregator = aggregator(MockFetcher::default(), nhl, MockFetcher::default(), Some(odds));

    assert!(aggregator.nhl_matchups().await.unwrap().is_empty());
    assert_eq!(aggregator.nhl_teams().len(), 33);
}

fn mlb_stats() -> MockFetcher {
    MockFetcher::default()
        .with(
            "teams",
            json!({"teams": [
                {"id": 147, "name": "New York Yankees", "abbreviation": "NYY", "teamName": "Yankees",
                 "locationName": "Bronx", "firstYearOfPlay": "1903", "division": {"name": "American League East"}},
                {"id": 111, "name": "Boston Red Sox", "abbreviation": "BOS", "teamName": "Red Sox",
                 "locationName": "Boston", "firstYearOfPlay": "1901", "division": {"name": "American League East"}}
            ]}),
        )
        .with(
            "teams/147/roster",
            json!({"roster": [{
                "person": {"id": 592450, "fullName": "Aaron Judge", "link": "/api/v1/people/592450"},
                "jerseyNumber": "99",
                "position": {"abbreviation": "RF", "name": "Outfielder", "type": "Outfielder"},
                "status": {"code": "A", "description": "Active"}
            }]}),
        )
        .with("teams/111/roster", json!({"roster": []}))
        .with(
            "people/592450/stats",
            json!({"stats": [{
                "group": {"displayName": "hitting"},
                "splits": [
                    {"date": "2025-04-02", "isHome": true, "opponent": {"name": "Boston Red Sox"},
                     "stat": {"atBats": 4, "hits": 2, "homeRuns": 1, "totalBases": 5}},
                    {"date": "2025-04-01", "isHome": true, "opponent": {"name": "Boston Red Sox"},
                     "stat": {"atBats": 3, "hits": 0}}
                ]
            }]}),
        )
}

#[tokio::test]
async fn test_mlb_matchups_with_live_teams() {
    let odds = MockFetcher::default()
        .with(
            "baseball_mlb/events",
            json!([event("m1", "baseball_mlb", "New York Yankees", "Boston Red Sox")]),
        )
        .with(
            "baseball_mlb/events/m1/odds",
            event_odds(
                "m1",
                "baseball_mlb",
                "New York Yankees",
                "Boston Red Sox",
                "batter_home_runs",
                vec![outcome("Aaron Judge", "Over", 0.5, 210)],
            ),
        );
    let mlb = mlb_stats();
    let aggregator = aggregator(MockFetcher::default(), MockFetcher::default(), mlb, Some(odds));

    let matchups = aggregator.mlb_matchups().await.unwrap();
    assert_eq!(matchups.len(), 1);
    let judge = &matchups[0].home.players[0];
    assert_eq!(judge.odds.get("batter_home_runs", "draftkings")[0].price, 210);
    let logs = judge.current_season_logs.as_ref().unwrap();
    match &logs[0] {
        MlbGameLog::Hitting(log) => assert_eq!(log.hits, 0),
        other => panic!("expected a hitting log, got {:?}", other),
    }
    assert_eq!(judge.opponent_abbreviation.as_deref(), Some("BOS"));
    assert!(matchups[0].away.players.is_empty());
}

#[tokio::test]
async fn test_mlb_upstream_failures() {
    let aggregator = aggregator(MockFetcher::default(), MockFetcher::default(), MockFetcher::default(), None);

    let err = aggregator.mlb_matchups().await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }));

    let mlb = mlb_stats().with("people/1/stats", json!({"stats": []}));
    let aggregator = self::aggregator(MockFetcher::default(), MockFetcher::default(), mlb, None);
    assert!(matches!(
        aggregator.mlb_game_log(1, None, None).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_player_props_cover_every_event() {
    let nba = nba_stats();
    let odds = nba_odds();
    let aggregator = aggregator(nba, MockFetcher::default(), MockFetcher::default(), Some(odds));
    aggregator.basketball_matchups(League::Nba, date()).await.unwrap();

    let props = aggregator.player_props(League::Nba).await;
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].outcome_count(), 4);
}

#[test]
fn test_mock_records_calls() {
    let fetcher = MockFetcher::default().with("a", json!({}));
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        fetcher.fetch("a", &Params::new()).await.unwrap();
        assert!(fetcher.fetch("b", &Params::new()).await.is_err());
    });
    assert_eq!(fetcher.calls(), vec!["a".to_string(), "b".to_string()]);
}
