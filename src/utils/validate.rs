//! Query-parameter checks for the route layer. Each returns the value to use
//! or an `InvalidParameter` error with a message fit for the client.

use crate::error::{Error, Result};

const LEAGUE_IDS: &[&str] = &["00", "10", "20"]; // NBA, WNBA, G League
const SEASON_TYPES: &[&str] = &["Regular Season", "Pre Season", "Playoffs", "All Star"];
const PER_MODES: &[&str] = &[
    "Totals",
    "PerGame",
    "MinutesPer",
    "Per48",
    "Per40",
    "Per36",
    "PerMinute",
    "PerPossession",
    "PerPlay",
    "Per100Possessions",
    "Per100Plays",
];

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidParameter(message.into())
}

pub fn league_id(value: &str) -> Result<&str> {
    if LEAGUE_IDS.contains(&value) {
        Ok(value)
    } else {
        Err(invalid("invalid LeagueID: must be '00' (NBA), '10' (WNBA), or '20' (G League)"))
    }
}

/// `YYYY-YY`, e.g. `2024-25`
pub fn season(value: &str) -> Result<&str> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit);
    if well_formed {
        Ok(value)
    } else {
        Err(invalid("invalid Season format: must be 'YYYY-YY' (e.g., '2024-25')"))
    }
}

/// Four-digit year, e.g. `2025`
pub fn season_year(value: &str) -> Result<&str> {
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value)
    } else {
        Err(invalid("invalid SeasonYear: must be a four-digit year (e.g., '2025')"))
    }
}

/// NHL season id, two consecutive years run together: `20242025`
pub fn nhl_season(value: &str) -> Result<&str> {
    let consecutive = value.len() == 8
        && value.bytes().all(|b| b.is_ascii_digit())
        && match (value[..4].parse::<u32>(), value[4..].parse::<u32>()) {
            (Ok(start), Ok(end)) => end == start + 1,
            _ => false,
        };
    if consecutive {
        Ok(value)
    } else {
        Err(invalid("invalid season: must be 'YYYYYYYY' (e.g., '20242025')"))
    }
}

pub fn season_type(value: &str) -> Result<&str> {
    if SEASON_TYPES.contains(&value) {
        Ok(value)
    } else {
        Err(invalid(
            "invalid SeasonType: must be 'Regular Season', 'Pre Season', 'Playoffs', or 'All Star'",
        ))
    }
}

pub fn per_mode(value: &str) -> Result<&str> {
    if PER_MODES.contains(&value) {
        Ok(value)
    } else {
        Err(invalid(format!("invalid PerMode: must be one of {}", PER_MODES.join(", "))))
    }
}

/// Required numeric id (player or team)
pub fn id(name: &str, value: Option<&str>) -> Result<i64> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| invalid(format!("{} is required and cannot be empty", name)))?;
    value
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid(format!("invalid {}: must be a positive integer", name)))
}

pub fn positive(name: &str, value: i64) -> Result<i64> {
    if value > 0 {
        Ok(value)
    } else {
        Err(invalid(format!("invalid {}: must be a positive integer", name)))
    }
}

/// `isOnlyCurrentSeason` flag, `0` or `1`
pub fn current_season_flag(value: &str) -> Result<bool> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(invalid("invalid isOnlyCurrentSeason: must be 0 or 1")),
    }
}

/// Ten-digit game id, e.g. `0022400555`
pub fn game_id(value: &str) -> Result<&str> {
    if value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value)
    } else {
        Err(invalid("invalid GameID: must be a 10-digit number (e.g., '0021700807')"))
    }
}
