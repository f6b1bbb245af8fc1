use super::fields::FieldExt;
use super::{map_rows, normalized_dict, require_result_set, Mapped, Record};
use crate::error::Result;
use crate::models::{NbaGameLog, NbaPlayer, ScheduledGame};
use serde_json::Value;

/// Players from the CommonAllPlayers result set. Rows without a PERSON_ID are skipped.
pub fn players_from_records(records: &[Record]) -> Mapped<NbaPlayer> {
    map_rows("CommonAllPlayers", records, |row| {
        Some(NbaPlayer {
            id: row.int("PERSON_ID")?,
            full_name: row.text_or_empty("DISPLAY_FIRST_LAST"),
            last_first: row.text_or_empty("DISPLAY_LAST_COMMA_FIRST"),
            roster_status: row.int_or_zero("ROSTERSTATUS"),
            from_year: row.text_or_empty("FROM_YEAR"),
            to_year: row.text_or_empty("TO_YEAR"),
            player_code: row.text_or_empty("PLAYERCODE"),
            team_id: row.int_or_zero("TEAM_ID"),
            team_city: row.text_or_empty("TEAM_CITY"),
            team_name: row.text_or_empty("TEAM_NAME"),
            team_abbreviation: row.text_or_empty("TEAM_ABBREVIATION"),
            games_played_flag: row.text_or_empty("GAMES_PLAYED_FLAG"),
            ..Default::default()
        })
    })
}

pub fn players_from_value(raw: &Value) -> Result<Mapped<NbaPlayer>> {
    let dict = normalized_dict(raw)?;
    let records = require_result_set(&dict, &["CommonAllPlayers"], "players")?;
    Ok(players_from_records(records))
}

/// Players from CommonTeamRoster. Only what the roster carries is filled in.
pub fn roster_from_records(records: &[Record]) -> Mapped<NbaPlayer> {
    map_rows("CommonTeamRoster", records, |row| {
        Some(NbaPlayer {
            id: row.int("PLAYER_ID")?,
            full_name: row.text_or_empty("PLAYER"),
            roster_status: 1,
            player_code: row.text_or_empty("PLAYER_SLUG"),
            team_id: row.int_or_zero("TeamID"),
            ..Default::default()
        })
    })
}

pub fn roster_from_value(raw: &Value) -> Result<Mapped<NbaPlayer>> {
    let dict = normalized_dict(raw)?;
    let records = require_result_set(&dict, &["CommonTeamRoster"], "roster")?;
    Ok(roster_from_records(records))
}

/// Games from the ScoreboardV2 GameHeader. Both team ids and the game id are required.
pub fn games_from_records(records: &[Record]) -> Mapped<ScheduledGame> {
    map_rows("GameHeader", records, |row| {
        Some(ScheduledGame {
            game_id: row.text("GAME_ID")?,
            home_team_id: row.int("HOME_TEAM_ID")?,
            visitor_team_id: row.int("VISITOR_TEAM_ID")?,
            game_date_est: row.text_or_empty("GAME_DATE_EST"),
            game_sequence: row.int_or_zero("GAME_SEQUENCE"),
            game_status_text: row.text_or_empty("GAME_STATUS_TEXT"),
            gamecode: row.text_or_empty("GAMECODE"),
            season: row.text_or_empty("SEASON"),
            arena_name: row.text_or_empty("ARENA_NAME"),
        })
    })
}

pub fn games_from_value(raw: &Value) -> Result<Mapped<ScheduledGame>> {
    let dict = normalized_dict(raw)?;
    let records = require_result_set(&dict, &["GameHeader"], "scoreboard")?;
    Ok(games_from_records(records))
}

/// Box score lines from PlayerGameLogs (bulk) or PlayerGameLog (one player).
/// The single-player endpoint spells a few headers differently.
pub fn game_logs_from_records(records: &[Record]) -> Mapped<NbaGameLog> {
    map_rows("PlayerGameLogs", records, |row| {
        let player_id = row.int("PLAYER_ID").or_else(|| row.int("Player_ID"))?;
        Some(NbaGameLog {
            season_year: row
                .text("SEASON_YEAR")
                .or_else(|| row.text("SEASON_ID"))
                .unwrap_or_default(),
            player_id,
            player_name: row.text_or_empty("PLAYER_NAME"),
            team_id: row.int_or_zero("TEAM_ID"),
            team_abbreviation: row.text_or_empty("TEAM_ABBREVIATION"),
            game_id: row
                .text("GAME_ID")
                .or_else(|| row.text("Game_ID"))
                .unwrap_or_default(),
            game_date: row.text_or_empty("GAME_DATE"),
            matchup: row.text_or_empty("MATCHUP"),
            wl: row.text_or_empty("WL"),
            min: row.float_or_zero("MIN"),
            fgm: row.int_or_zero("FGM"),
            fga: row.int_or_zero("FGA"),
            fg_pct: row.float_or_zero("FG_PCT"),
            fg3m: row.int_or_zero("FG3M"),
            fg3a: row.int_or_zero("FG3A"),
            fg3_pct: row.float_or_zero("FG3_PCT"),
            ftm: row.int_or_zero("FTM"),
            fta: row.int_or_zero("FTA"),
            ft_pct: row.float_or_zero("FT_PCT"),
            oreb: row.int_or_zero("OREB"),
            dreb: row.int_or_zero("DREB"),
            reb: row.int_or_zero("REB"),
            ast: row.int_or_zero("AST"),
            tov: row.int_or_zero("TOV"),
            stl: row.int_or_zero("STL"),
            blk: row.int_or_zero("BLK"),
            pf: row.int_or_zero("PF"),
            pts: row.int_or_zero("PTS"),
            plus_minus: row.float_or_zero("PLUS_MINUS"),
        })
    })
}

pub fn game_logs_from_value(raw: &Value) -> Result<Mapped<NbaGameLog>> {
    let dict = normalized_dict(raw)?;
    let records = require_result_set(&dict, &["PlayerGameLogs", "PlayerGameLog"], "game logs")?;
    Ok(game_logs_from_records(records))
}
