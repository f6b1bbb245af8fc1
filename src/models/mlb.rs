use super::{sort_by_game_date, DatedLog, OddsMap, RosterPlayer, Team};
use serde::{Deserialize, Serialize};

/// A club from the MLB stats API team list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MlbTeamInfo {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
    pub team_name: String,
    pub location_name: String,
    pub club_name: String,
    pub franchise_name: String,
    pub short_name: String,
    pub first_year_of_play: i32,
    pub division: Option<String>,
    pub link: String,
}

impl MlbTeamInfo {
    /// Empty-roster team for the join engine's directory
    pub fn to_team(&self) -> Team<MlbPlayer> {
        Team {
            id: self.id,
            abbreviation: self.abbreviation.clone(),
            nickname: self.team_name.clone(),
            city: self.location_name.clone(),
            full_name: self.name.clone(),
            state: String::new(),
            year_founded: self.first_year_of_play,
            championship_years: Vec::new(),
            division: self.division.clone(),
            players: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MlbPlayer {
    pub id: i64,
    pub full_name: String,
    pub jersey_number: String,
    pub position_abbreviation: String,
    pub position_name: String,
    pub position_type: String,
    pub status_code: String,
    pub status_description: String,
    pub link: String,
    pub team_id: i64,
    #[serde(default, skip_serializing_if = "OddsMap::is_empty")]
    pub odds: OddsMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_season_logs: Option<Vec<MlbGameLog>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_abbreviation: Option<String>,
}

impl MlbPlayer {
    pub fn is_pitcher(&self) -> bool {
        self.position_type == "Pitcher" || self.position_abbreviation == "P"
    }
}

impl RosterPlayer for MlbPlayer {
    type Log = MlbGameLog;

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

    fn attach_logs(&mut self, mut logs: Vec<MlbGameLog>, opponent: Option<String>) {
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

/// Stat group of a game-log response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatGroup {
    Hitting,
    Pitching,
}

impl StatGroup {
    pub fn for_player(player: &MlbPlayer) -> Self {
        if player.is_pitcher() {
            StatGroup::Pitching
        } else {
            StatGroup::Hitting
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatGroup::Hitting => "hitting",
            StatGroup::Pitching => "pitching",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MlbGameLog {
    Hitting(HittingLog),
    Pitching(PitchingLog),
}

impl DatedLog for MlbGameLog {
    fn game_date(&self) -> &str {
        match self {
            MlbGameLog::Hitting(log) => &log.date,
            MlbGameLog::Pitching(log) => &log.date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HittingLog {
    pub date: String,
    pub game_pk: i64,
    pub opponent: String,
    pub is_home: bool,
    pub at_bats: i64,
    pub hits: i64,
    pub runs: i64,
    pub doubles: i64,
    pub triples: i64,
    pub home_runs: i64,
    pub rbi: i64,
    pub total_bases: i64,
    pub base_on_balls: i64,
    pub strike_outs: i64,
    pub stolen_bases: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchingLog {
    pub date: String,
    pub game_pk: i64,
    pub opponent: String,
    pub is_home: bool,
    pub innings_pitched: String,
    pub outs: i64,
    pub hits: i64,
    pub runs: i64,
    pub earned_runs: i64,
    pub base_on_balls: i64,
    pub strike_outs: i64,
    pub home_runs: i64,
    pub number_of_pitches: i64,
}
