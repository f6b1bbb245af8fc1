use crate::models::{Matchup, RosterPlayer};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Save any aggregation result as pretty JSON
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(value).context("Failed to serialize data")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Load a JSON file written by `save_json`
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).context("Failed to deserialize data")
}

/// One attached outcome, flattened for spreadsheets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRow {
    #[serde(rename = "Home Team")]
    pub home_team: String,
    #[serde(rename = "Away Team")]
    pub away_team: String,
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Market")]
    pub market: String,
    #[serde(rename = "Bookmaker")]
    pub bookmaker: String,
    #[serde(rename = "Outcome")]
    pub outcome: String,
    #[serde(rename = "Point")]
    pub point: f64,
    #[serde(rename = "Price")]
    pub price: i32,
}

/// Every outcome attached to every player of a slate, home side first
pub fn outcome_rows<P: RosterPlayer>(matchups: &[Matchup<P>]) -> Vec<OutcomeRow> {
    let mut rows = Vec::new();
    for matchup in matchups {
        for team in [&matchup.home, &matchup.away] {
            for player in &team.players {
                for (market, bookmaker, outcome) in player.odds().iter() {
                    rows.push(OutcomeRow {
                        home_team: matchup.home.full_name.clone(),
                        away_team: matchup.away.full_name.clone(),
                        player: player.full_name().to_string(),
                        team: team.abbreviation.clone(),
                        market: market.to_string(),
                        bookmaker: bookmaker.to_string(),
                        outcome: outcome.name.clone(),
                        point: outcome.point,
                        price: outcome.price,
                    });
                }
            }
        }
    }
    rows
}

/// Write outcome rows as CSV
pub fn save_outcomes_to_csv(rows: &[OutcomeRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NbaPlayer, Outcome, Team};

    fn team(abbreviation: &str, full_name: &str, players: Vec<NbaPlayer>) -> Team<NbaPlayer> {
        Team {
            id: 1,
            abbreviation: abbreviation.to_string(),
            nickname: String::new(),
            city: String::new(),
            full_name: full_name.to_string(),
            state: String::new(),
            year_founded: 0,
            championship_years: vec![],
            division: None,
            players,
        }
    }

    fn slate() -> Vec<Matchup<NbaPlayer>> {
        let mut trae = NbaPlayer {
            id: 1,
            full_name: "Trae Young".to_string(),
            ..Default::default()
        };
        trae.odds.add("player_points", "draftkings", Outcome {
            name: "Over".to_string(),
            point: 25.5,
            price: -115,
        });
        trae.odds.add("player_assists", "fanduel", Outcome {
            name: "Under".to_string(),
            point: 10.5,
            price: 105,
        });
        let quiet = NbaPlayer {
            id: 2,
            full_name: "Bench Guy".to_string(),
            ..Default::default()
        };
        vec![Matchup {
            game_id: None,
            commence_time: None,
            home: team("ATL", "Atlanta Hawks", vec![trae]),
            away: team("BOS", "Boston Celtics", vec![quiet]),
        }]
    }

    #[test]
    fn test_outcome_rows() {
        let rows = outcome_rows(&slate());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].market, "player_assists");
        assert_eq!(rows[1].price, -115);
        assert_eq!(rows[1].team, "ATL");
    }

    #[test]
    fn test_csv_and_json_files() {
        let dir = std::env::temp_dir().join(format!("sports_props_export_{}", std::process::id()));
        let csv_path = dir.join("props.csv");
        let json_path = dir.join("slate.json");

        let slate = slate();
        save_json(&slate, &json_path).unwrap();
        let loaded: Vec<Matchup<NbaPlayer>> = load_json(&json_path).unwrap();
        assert_eq!(loaded, slate);

        save_outcomes_to_csv(&outcome_rows(&slate), &csv_path).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Home Team,Away Team,Player,Team,Market,Bookmaker,Outcome,Point,Price")
        );
        assert_eq!(lines.count(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
