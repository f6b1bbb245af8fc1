use super::fields::FieldExt;
use super::{map_rows, require_array, require_object, Mapped};
use crate::error::{Error, Result};
use crate::models::{GoalieLog, NhlGameLog, NhlPlayer, SkaterLog};
use serde_json::Value;

const ROSTER_GROUPS: [&str; 3] = ["forwards", "defensemen", "goalies"];

/// Roster from `roster/{team}/{season}`: forwards, then defensemen, then goalies.
/// Names come localized as `{"default": "..."}`.
pub fn roster_from_value(raw: &Value, team_id: i64) -> Result<Mapped<NhlPlayer>> {
    let obj = require_object(raw, "nhl roster")?;

    let groups: Vec<&Vec<Value>> = ROSTER_GROUPS
        .iter()
        .filter_map(|group| obj.array(group))
        .collect();
    if groups.is_empty() {
        return Err(Error::decode("nhl roster", "no forwards, defensemen or goalies"));
    }

    Ok(map_rows(
        "nhl roster",
        groups.into_iter().flatten(),
        |entry| {
            let entry = entry.as_object()?;
            let first_name = entry.text_at("firstName.default").unwrap_or_default();
            let last_name = entry.text_at("lastName.default").unwrap_or_default();
            Some(NhlPlayer {
                id: entry.int("id")?,
                full_name: format!("{} {}", first_name, last_name).trim().to_string(),
                first_name,
                last_name,
                position_code: entry.text_or_empty("positionCode"),
                shoots_catches: entry.text_or_empty("shootsCatches"),
                sweater_number: entry.int("sweaterNumber"),
                team_id,
                ..Default::default()
            })
        },
    ))
}

/// Game log from `player/{id}/game-log/{season}/{type}`. Goalies and skaters
/// share the `gameLog` array but not its fields.
pub fn game_logs_from_value(raw: &Value, goalie: bool) -> Result<Mapped<NhlGameLog>> {
    let obj = require_object(raw, "nhl game log")?;
    let rows = require_array(obj, "gameLog", "nhl game log")?;

    Ok(map_rows("nhl game log", rows, |row| {
        let row = row.as_object()?;
        let game_id = row.int("gameId")?;
        let game_date = row.text("gameDate")?;

        let log = if goalie {
            NhlGameLog::Goalie(GoalieLog {
                game_id,
                game_date,
                team_abbrev: row.text_or_empty("teamAbbrev"),
                opponent_abbrev: row.text_or_empty("opponentAbbrev"),
                home_road_flag: row.text_or_empty("homeRoadFlag"),
                games_started: row.int_or_zero("gamesStarted"),
                decision: row.text_or_empty("decision"),
                shots_against: row.int_or_zero("shotsAgainst"),
                goals_against: row.int_or_zero("goalsAgainst"),
                save_pctg: row.float_or_zero("savePctg"),
                shutouts: row.int_or_zero("shutouts"),
                goals: row.int_or_zero("goals"),
                assists: row.int_or_zero("assists"),
                pim: row.int_or_zero("pim"),
                toi: row.text_or_empty("toi"),
            })
        } else {
            NhlGameLog::Skater(SkaterLog {
                game_id,
                game_date,
                team_abbrev: row.text_or_empty("teamAbbrev"),
                opponent_abbrev: row.text_or_empty("opponentAbbrev"),
                home_road_flag: row.text_or_empty("homeRoadFlag"),
                goals: row.int_or_zero("goals"),
                assists: row.int_or_zero("assists"),
                points: row.int_or_zero("points"),
                plus_minus: row.int_or_zero("plusMinus"),
                power_play_goals: row.int_or_zero("powerPlayGoals"),
                power_play_points: row.int_or_zero("powerPlayPoints"),
                shorthanded_goals: row.int_or_zero("shorthandedGoals"),
                game_winning_goals: row.int_or_zero("gameWinningGoals"),
                ot_goals: row.int_or_zero("otGoals"),
                shots: row.int_or_zero("shots"),
                shifts: row.int_or_zero("shifts"),
                pim: row.int_or_zero("pim"),
                toi: row.text_or_empty("toi"),
            })
        };
        Some(log)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roster_groups_in_order() {
        let raw = json!({
            "goalies": [{
                "id": 8479361,
                "firstName": {"default": "Joseph"},
                "lastName": {"default": "Woll"},
                "positionCode": "G",
                "shootsCatches": "L",
                "sweaterNumber": 60
            }],
            "forwards": [
                {
                    "id": 8479318,
                    "firstName": {"default": "Auston"},
                    "lastName": {"default": "Matthews"},
                    "positionCode": "C",
                    "shootsCatches": "L",
                    "sweaterNumber": 34
                },
                {"firstName": {"default": "No"}, "lastName": {"default": "Id"}}
            ]
        });

        let roster = roster_from_value(&raw, 10).unwrap();
        assert_eq!(roster.skipped, 1);
        let names: Vec<&str> = roster.items.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["Auston Matthews", "Joseph Woll"]);
        assert!(roster.items[1].is_goalie());
        assert_eq!(roster.items[0].team_id, 10);
        assert_eq!(roster.items[0].sweater_number, Some(34));
    }

    #[test]
    fn test_roster_without_groups_fails() {
        assert!(roster_from_value(&json!({"players": []}), 1).is_err());
        assert!(roster_from_value(&json!([]), 1).is_err());
    }

    #[test]
    fn test_game_logs_by_position() {
        let raw = json!({"gameLog": [
            {"gameId": 2024020700, "gameDate": "2025-01-15", "goals": 1, "assists": 2,
             "points": 3, "shots": 5, "toi": "19:12", "opponentAbbrev": "BOS"},
            {"gameDate": "2025-01-13"}
        ]});

        let skater = game_logs_from_value(&raw, false).unwrap();
        assert_eq!(skater.skipped, 1);
        match &skater.items[0] {
            NhlGameLog::Skater(log) => {
                assert_eq!(log.points, 3);
                assert_eq!(log.opponent_abbrev, "BOS");
            }
            other => panic!("expected skater log, got {:?}", other),
        }

        let goalie = game_logs_from_value(&raw, true).unwrap();
        assert!(matches!(goalie.items[0], NhlGameLog::Goalie(_)));

        assert!(game_logs_from_value(&json!({"seasons": []}), false).is_err());
    }
}
