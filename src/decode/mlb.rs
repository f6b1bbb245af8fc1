use super::fields::FieldExt;
use super::{map_rows, require_array, require_object, Mapped};
use crate::error::{Error, Result};
use crate::models::{HittingLog, MlbGameLog, MlbPlayer, MlbTeamInfo, PitchingLog, StatGroup};
use serde_json::{Map, Value};

/// Clubs from `teams?sportId=1`. `firstYearOfPlay` arrives as a string.
pub fn teams_from_value(raw: &Value) -> Result<Mapped<MlbTeamInfo>> {
    let obj = require_object(raw, "mlb teams")?;
    let teams = require_array(obj, "teams", "mlb teams")?;

    Ok(map_rows("mlb teams", teams, |team| {
        let team = team.as_object()?;
        Some(MlbTeamInfo {
            id: team.int("id")?,
            name: team.text_or_empty("name"),
            abbreviation: team.text_or_empty("abbreviation"),
            team_name: team.text_or_empty("teamName"),
            location_name: team.text_or_empty("locationName"),
            club_name: team.text_or_empty("clubName"),
            franchise_name: team.text_or_empty("franchiseName"),
            short_name: team.text_or_empty("shortName"),
            first_year_of_play: team
                .int("firstYearOfPlay")
                .and_then(|year| i32::try_from(year).ok())
                .unwrap_or_default(),
            division: team.text_at("division.name"),
            link: team.text_or_empty("link"),
        })
    }))
}

/// Roster from `teams/{id}/roster`. Person, position and status are nested objects.
pub fn roster_from_value(raw: &Value, team_id: i64) -> Result<Mapped<MlbPlayer>> {
    let obj = require_object(raw, "mlb roster")?;
    let roster = require_array(obj, "roster", "mlb roster")?;

    Ok(map_rows("mlb roster", roster, |entry| {
        let entry = entry.as_object()?;
        Some(MlbPlayer {
            id: entry.int_at("person.id")?,
            full_name: entry.text_at("person.fullName").unwrap_or_default(),
            link: entry.text_at("person.link").unwrap_or_default(),
            jersey_number: entry.text_or_empty("jerseyNumber"),
            position_abbreviation: entry.text_at("position.abbreviation").unwrap_or_default(),
            position_name: entry.text_at("position.name").unwrap_or_default(),
            position_type: entry.text_at("position.type").unwrap_or_default(),
            status_code: entry.text_at("status.code").unwrap_or_default(),
            status_description: entry.text_at("status.description").unwrap_or_default(),
            team_id: entry.int("parentTeamId").unwrap_or(team_id),
            ..Default::default()
        })
    }))
}

/// Game log from `people/{id}/stats?stats=gameLog`. The first stats block's group
/// decides whether the splits are hitting or pitching lines.
pub fn game_logs_from_value(raw: &Value) -> Result<Mapped<MlbGameLog>> {
    let obj = require_object(raw, "mlb game log")?;
    let stats = require_array(obj, "stats", "mlb game log")?;
    let block = stats
        .first()
        .ok_or_else(|| Error::NotFound("mlb game log has no stats".to_string()))?
        .as_object()
        .ok_or_else(|| Error::decode("mlb game log", "stats entry is not an object"))?;

    let group = match block.text_at("group.displayName").as_deref() {
        Some("hitting") => StatGroup::Hitting,
        Some("pitching") => StatGroup::Pitching,
        other => {
            return Err(Error::decode(
                "mlb game log",
                format!("unknown stat group {:?}", other),
            ))
        }
    };
    let splits = require_array(block, "splits", "mlb game log")?;

    Ok(map_rows("mlb game log", splits, |split| {
        let split = split.as_object()?;
        let stat = split.object("stat")?;
        Some(match group {
            StatGroup::Hitting => MlbGameLog::Hitting(hitting_log(split, stat)?),
            StatGroup::Pitching => MlbGameLog::Pitching(pitching_log(split, stat)?),
        })
    }))
}

fn hitting_log(split: &Map<String, Value>, stat: &Map<String, Value>) -> Option<HittingLog> {
    Some(HittingLog {
        date: split.text("date")?,
        game_pk: split.int_at("game.gamePk").unwrap_or_default(),
        opponent: split.text_at("opponent.name").unwrap_or_default(),
        is_home: split.boolean("isHome").unwrap_or_default(),
        at_bats: stat.int_or_zero("atBats"),
        hits: stat.int_or_zero("hits"),
        runs: stat.int_or_zero("runs"),
        doubles: stat.int_or_zero("doubles"),
        triples: stat.int_or_zero("triples"),
        home_runs: stat.int_or_zero("homeRuns"),
        rbi: stat.int_or_zero("rbi"),
        total_bases: stat.int_or_zero("totalBases"),
        base_on_balls: stat.int_or_zero("baseOnBalls"),
        strike_outs: stat.int_or_zero("strikeOuts"),
        stolen_bases: stat.int_or_zero("stolenBases"),
    })
}

fn pitching_log(split: &Map<String, Value>, stat: &Map<String, Value>) -> Option<PitchingLog> {
    Some(PitchingLog {
        date: split.text("date")?,
        game_pk: split.int_at("game.gamePk").unwrap_or_default(),
        opponent: split.text_at("opponent.name").unwrap_or_default(),
        is_home: split.boolean("isHome").unwrap_or_default(),
        innings_pitched: stat.text_or_empty("inningsPitched"),
        outs: stat.int_or_zero("outs"),
        hits: stat.int_or_zero("hits"),
        runs: stat.int_or_zero("runs"),
        earned_runs: stat.int_or_zero("earnedRuns"),
        base_on_balls: stat.int_or_zero("baseOnBalls"),
        strike_outs: stat.int_or_zero("strikeOuts"),
        home_runs: stat.int_or_zero("homeRuns"),
        number_of_pitches: stat.int_or_zero("numberOfPitches"),
    })
}
