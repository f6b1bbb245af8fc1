use super::{sort_by_game_date, DatedLog, OddsMap, RosterPlayer};
use serde::{Deserialize, Serialize};

/// A player from CommonAllPlayers (NBA and WNBA share the shape)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NbaPlayer {
    pub id: i64,
    pub full_name: String,
    pub last_first: String,
    pub roster_status: i64,
    pub from_year: String,
    pub to_year: String,
    pub player_code: String,
    pub team_id: i64,
    pub team_city: String,
    pub team_name: String,
    pub team_abbreviation: String,
    pub games_played_flag: String,
    #[serde(default, skip_serializing_if = "OddsMap::is_empty")]
    pub odds: OddsMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_season_logs: Option<Vec<NbaGameLog>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_abbreviation: Option<String>,
}

impl NbaPlayer {
    pub fn is_active(&self) -> bool {
        self.roster_status == 1
    }
}

impl RosterPlayer for NbaPlayer {
    type Log = NbaGameLog;

    fn id(&self) -> i64 {
        self.id
    }

    fn team_id(&self) -> i64 {
        self.team_id
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn odds(&self) -> &OddsMap {
        &self.odds
    }

    fn odds_mut(&mut self) -> &mut OddsMap {
        &mut self.odds
    }

    fn has_odds(&self) -> bool {
        !self.odds.is_empty()
    }

    fn attach_logs(&mut self, mut logs: Vec<NbaGameLog>, opponent: Option<String>) {
        if logs.is_empty() {
            return;
        }
        sort_by_game_date(&mut logs);
        self.current_season_logs = Some(logs);
        self.opponent_abbreviation = opponent;
    }

    fn has_logs(&self) -> bool {
        self.current_season_logs.is_some()
    }
}

/// A game on the ScoreboardV2 GameHeader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub game_id: String,
    pub game_date_est: String,
    pub game_sequence: i64,
    pub game_status_text: String,
    pub gamecode: String,
    pub home_team_id: i64,
    pub visitor_team_id: i64,
    pub season: String,
    pub arena_name: String,
}

/// One box score line from PlayerGameLogs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NbaGameLog {
    pub season_year: String,
    pub player_id: i64,
    pub player_name: String,
    pub team_id: i64,
    pub team_abbreviation: String,
    pub game_id: String,
    pub game_date: String,
    pub matchup: String,
    pub wl: String,
    pub min: f64,
    pub fgm: i64,
    pub fga: i64,
    pub fg_pct: f64,
    pub fg3m: i64,
    pub fg3a: i64,
    pub fg3_pct: f64,
    pub ftm: i64,
    pub fta: i64,
    pub ft_pct: f64,
    pub oreb: i64,
    pub dreb: i64,
    pub reb: i64,
    pub ast: i64,
    pub tov: i64,
    pub stl: i64,
    pub blk: i64,
    pub pf: i64,
    pub pts: i64,
    pub plus_minus: f64,
}

impl NbaGameLog {
    /// Counting stat by its provider header name (PTS, REB, AST, FG3M, STL, BLK, TOV)
    /// and the usual combos (PRA, PR, PA, RA)
    pub fn stat(&self, key: &str) -> Option<f64> {
        let value = match key.to_ascii_uppercase().as_str() {
            "PTS" => self.pts,
            "REB" => self.reb,
            "AST" => self.ast,
            "FG3M" => self.fg3m,
            "STL" => self.stl,
            "BLK" => self.blk,
            "TOV" => self.tov,
            "FGM" => self.fgm,
            "FTM" => self.ftm,
            "OREB" => self.oreb,
            "DREB" => self.dreb,
            "PRA" => self.pts + self.reb + self.ast,
            "PR" => self.pts + self.reb,
            "PA" => self.pts + self.ast,
            "RA" => self.reb + self.ast,
            "MIN" => return Some(self.min),
            _ => return None,
        };
        Some(value as f64)
    }
}

impl DatedLog for NbaGameLog {
    fn game_date(&self) -> &str {
        &self.game_date
    }
}
