use crate::error::{Error, Result};
use crate::models::NbaGameLog;
use serde::{Deserialize, Serialize};

/// Stats a prop line can be set on
pub const SUPPORTED_STATS: &[&str] = &["PTS", "REB", "AST", "FG3M", "STL", "BLK", "TOV", "PRA", "PR", "PA", "RA"];

/// How often a player cleared a line recently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRateSummary {
    pub player_id: i64,
    pub stat: String,
    pub threshold: f64,
    pub games: usize,
    pub hits: usize,
    pub hit_rate: f64, // percentage, 0-100
    pub streak: usize,
}

fn check_stat(stat: &str) -> Result<String> {
    let stat = stat.trim().to_ascii_uppercase();
    if SUPPORTED_STATS.contains(&stat.as_str()) {
        Ok(stat)
    } else {
        Err(Error::InvalidParameter(format!(
            "unsupported stat {}: must be one of {}",
            stat,
            SUPPORTED_STATS.join(", ")
        )))
    }
}

/// Percentage of the last `last_n` games (logs oldest first) where `stat` was at least `threshold`
pub fn hit_rate(logs: &[NbaGameLog], stat: &str, last_n: usize, threshold: f64) -> Result<f64> {
    let stat = check_stat(stat)?;
    let recent = &logs[logs.len().saturating_sub(last_n)..];
    if recent.is_empty() {
        return Ok(0.0);
    }

    let hits = count_hits(recent, &stat, threshold);
    Ok(hits as f64 / recent.len() as f64 * 100.0)
}

/// Consecutive games, counting back from the most recent, where `stat` was at least `threshold`
pub fn streak(logs: &[NbaGameLog], stat: &str, threshold: f64) -> Result<usize> {
    let stat = check_stat(stat)?;
    Ok(logs
        .iter()
        .rev()
        .take_while(|log| log.stat(&stat).is_some_and(|value| value >= threshold))
        .count())
}

fn count_hits(logs: &[NbaGameLog], stat: &str, threshold: f64) -> usize {
    logs.iter()
        .filter(|log| log.stat(stat).is_some_and(|value| value >= threshold))
        .count()
}

/// Hit rate and streak together for one player
pub fn summarize(
    player_id: i64,
    logs: &[NbaGameLog],
    stat: &str,
    last_n: usize,
    threshold: f64,
) -> Result<HitRateSummary> {
    let stat = check_stat(stat)?;
    let recent = &logs[logs.len().saturating_sub(last_n)..];
    Ok(HitRateSummary {
        player_id,
        threshold,
        games: recent.len(),
        hits: count_hits(recent, &stat, threshold),
        hit_rate: hit_rate(logs, &stat, last_n, threshold)?,
        streak: streak(logs, &stat, threshold)?,
        stat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logs(points: &[i64]) -> Vec<NbaGameLog> {
        points
            .iter()
            .map(|&pts| NbaGameLog {
                pts,
                reb: pts / 3,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_hit_rate_last_n() {
        // oldest first
        let logs = logs(&[10, 30, 25, 18, 27, 31]);
        assert_eq!(hit_rate(&logs, "PTS", 4, 25.0).unwrap(), 75.0);
        assert_eq!(hit_rate(&logs, "pts", 100, 25.0).unwrap(), 4.0 / 6.0 * 100.0);
        assert_eq!(hit_rate(&[], "PTS", 5, 25.0).unwrap(), 0.0);
        assert_eq!(hit_rate(&logs, "PTS", 0, 25.0).unwrap(), 0.0);
    }

    #[test]
    fn test_streak_counts_back_from_latest() {
        let logs = logs(&[30, 10, 26, 27, 31]);
        assert_eq!(streak(&logs, "PTS", 25.0).unwrap(), 3);
        assert_eq!(streak(&logs, "PTS", 40.0).unwrap(), 0);
    }

    #[test]
    fn test_unknown_stat_rejected() {
        assert!(matches!(
            hit_rate(&logs(&[1]), "XYZ", 5, 1.0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_summary() {
        let logs = logs(&[30, 10, 26, 27, 31]);
        let summary = summarize(7, &logs, "pts", 3, 25.0).unwrap();
        assert_eq!(summary.stat, "PTS");
        assert_eq!(summary.games, 3);
        assert_eq!(summary.hits, 3);
        assert_eq!(summary.hit_rate, 100.0);
        assert_eq!(summary.streak, 3);
    }
}
