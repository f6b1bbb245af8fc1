use super::{sort_by_game_date, DatedLog, OddsMap, RosterPlayer};
use serde::{Deserialize, Serialize};

/// A roster entry from the NHL web API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NhlPlayer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub position_code: String,
    pub shoots_catches: String,
    pub sweater_number: Option<i64>,
    pub team_id: i64,
    #[serde(default, skip_serializing_if = "OddsMap::is_empty")]
    pub odds: OddsMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_season_logs: Option<Vec<NhlGameLog>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_abbreviation: Option<String>,
}

impl NhlPlayer {
    pub fn is_goalie(&self) -> bool {
        self.position_code == "G"
    }
}

impl RosterPlayer for NhlPlayer {
    type Log = NhlGameLog;

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

    fn attach_logs(&mut self, mut logs: Vec<NhlGameLog>, opponent: Option<String>) {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NhlGameLog {
    Skater(SkaterLog),
    Goalie(GoalieLog),
}

impl DatedLog for NhlGameLog {
    fn game_date(&self) -> &str {
        match self {
            NhlGameLog::Skater(log) => &log.game_date,
            NhlGameLog::Goalie(log) => &log.game_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkaterLog {
    pub game_id: i64,
    pub game_date: String,
    pub team_abbrev: String,
    pub opponent_abbrev: String,
    pub home_road_flag: String,
    pub goals: i64,
    pub assists: i64,
    pub points: i64,
    pub plus_minus: i64,
    pub power_play_goals: i64,
    pub power_play_points: i64,
    pub shorthanded_goals: i64,
    pub game_winning_goals: i64,
    pub ot_goals: i64,
    pub shots: i64,
    pub shifts: i64,
    pub pim: i64,
    pub toi: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalieLog {
    pub game_id: i64,
    pub game_date: String,
    pub team_abbrev: String,
    pub opponent_abbrev: String,
    pub home_road_flag: String,
    pub games_started: i64,
    pub decision: String,
    pub shots_against: i64,
    pub goals_against: i64,
    pub save_pctg: f64,
    pub shutouts: i64,
    pub goals: i64,
    pub assists: i64,
    pub pim: i64,
    pub toi: String,
}
