pub mod mlb;
pub mod nba;
pub mod nhl;

pub use mlb::*;
pub use nba::*;
pub use nhl::*;

use crate::error::Error;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Leagues we aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Nba,
    Wnba,
    Nhl,
    Mlb,
}

impl League {
    pub fn as_str(&self) -> &'static str {
        match self {
            League::Nba => "nba",
            League::Wnba => "wnba",
            League::Nhl => "nhl",
            League::Mlb => "mlb",
        }
    }

    /// LeagueID parameter of the NBA stats provider
    pub fn stats_league_id(&self) -> Option<&'static str> {
        match self {
            League::Nba => Some("00"),
            League::Wnba => Some("10"),
            _ => None,
        }
    }

    /// Sport key used by The Odds API
    pub fn odds_sport_key(&self) -> &'static str {
        match self {
            League::Nba => "basketball_nba",
            League::Wnba => "basketball_wnba",
            League::Nhl => "icehockey_nhl",
            League::Mlb => "baseball_mlb",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nba" => Ok(League::Nba),
            "wnba" => Ok(League::Wnba),
            "nhl" => Ok(League::Nhl),
            "mlb" => Ok(League::Mlb),
            other => Err(Error::InvalidParameter(format!("unknown league {}", other))),
        }
    }
}

/// One betting line for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    pub point: f64,
    pub price: i32, // American odds format (e.g., -110, +150)
}

/// market → bookmaker → outcomes. Outcomes accumulate, nothing is replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OddsMap(BTreeMap<String, BTreeMap<String, Vec<Outcome>>>);

impl OddsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, market: &str, bookmaker: &str, outcome: Outcome) {
        self.0
            .entry(market.to_string())
            .or_default()
            .entry(bookmaker.to_string())
            .or_default()
            .push(outcome);
    }

    pub fn get(&self, market: &str, bookmaker: &str) -> &[Outcome] {
        self.0
            .get(market)
            .and_then(|books| books.get(bookmaker))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn markets(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of outcomes across all markets and bookmakers
    pub fn len(&self) -> usize {
        self.0
            .values()
            .flat_map(|books| books.values())
            .map(Vec::len)
            .sum()
    }

    /// Flattened (market, bookmaker, outcome) view
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Outcome)> {
        self.0.iter().flat_map(|(market, books)| {
            books.iter().flat_map(move |(book, outcomes)| {
                outcomes
                    .iter()
                    .map(move |outcome| (market.as_str(), book.as_str(), outcome))
            })
        })
    }
}

/// A team with its roster. The roster is filled by the join engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team<P> {
    pub id: i64,
    pub abbreviation: String,
    pub nickname: String,
    pub city: String,
    pub full_name: String,
    pub state: String,
    pub year_founded: i32,
    pub championship_years: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    pub players: Vec<P>,
}

impl<P> Team<P> {
    /// Same team metadata, different player type
    pub fn with_players<Q>(&self, players: Vec<Q>) -> Team<Q> {
        Team {
            id: self.id,
            abbreviation: self.abbreviation.clone(),
            nickname: self.nickname.clone(),
            city: self.city.clone(),
            full_name: self.full_name.clone(),
            state: self.state.clone(),
            year_founded: self.year_founded,
            championship_years: self.championship_years.clone(),
            division: self.division.clone(),
            players,
        }
    }
}

/// One day's pairing of two teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup<P> {
    /// Scoreboard game id or odds event id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commence_time: Option<DateTime<Utc>>,
    pub home: Team<P>,
    pub away: Team<P>,
}

/// A scheduled event from the odds provider, without prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsEvent {
    pub id: String,
    pub sport_key: String,
    pub sport_title: String,
    pub commence_time: Option<DateTime<Utc>>,
    pub home_team: String,
    pub away_team: String,
}

/// One event with every bookmaker's markets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupOdds {
    pub id: String,
    pub sport_key: String,
    pub sport_title: String,
    pub commence_time: Option<DateTime<Utc>>,
    pub home_team: String,
    pub away_team: String,
    pub bookmakers: Vec<Bookmaker>,
}

impl MatchupOdds {
    pub fn outcome_count(&self) -> usize {
        self.bookmakers
            .iter()
            .flat_map(|b| b.markets.iter())
            .map(|m| m.outcomes.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmaker {
    pub key: String,
    pub title: String,
    pub markets: Vec<Market>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub key: String,
    pub last_update: Option<DateTime<Utc>>,
    pub outcomes: Vec<PropOutcome>,
}

/// An outcome as the odds provider sends it. `description` names the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropOutcome {
    pub name: String,
    pub description: Option<String>,
    pub point: f64,
    pub price: i32,
}

impl PropOutcome {
    pub fn to_outcome(&self) -> Outcome {
        Outcome {
            name: self.name.clone(),
            point: self.point,
            price: self.price,
        }
    }
}

/// A game log row that knows when it was played
pub trait DatedLog {
    fn game_date(&self) -> &str;
}

/// Parse the date formats our providers use. Anything else counts as the earliest date.
pub fn parse_game_date(raw: &str) -> NaiveDate {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%b %d, %Y"))
        .unwrap_or(NaiveDate::MIN)
}

/// Oldest game first. Stable, so rows on the same date keep their order.
pub fn sort_by_game_date<L: DatedLog>(logs: &mut [L]) {
    logs.sort_by_key(|log| parse_game_date(log.game_date()));
}

/// A roster member the join engine can attach odds and logs to
pub trait RosterPlayer {
    type Log: DatedLog;

    fn id(&self) -> i64;
    fn team_id(&self) -> i64;
    fn full_name(&self) -> &str;
    fn odds(&self) -> &OddsMap;
    fn odds_mut(&mut self) -> &mut OddsMap;
    fn has_odds(&self) -> bool;

    /// Set this season's logs (sorted oldest first) and the opponent abbreviation.
    /// Does nothing when `logs` is empty.
    fn attach_logs(&mut self, logs: Vec<Self::Log>, opponent: Option<String>);
    fn has_logs(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dated(&'static str, u8);

    impl DatedLog for Dated {
        fn game_date(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_odds_map_accumulates() {
        let mut odds = OddsMap::new();
        let over = Outcome {
            name: "Over".to_string(),
            point: 24.5,
            price: -115,
        };
        let under = Outcome {
            name: "Under".to_string(),
            ..over.clone()
        };
        odds.add("player_points", "draftkings", over.clone());
        odds.add("player_points", "draftkings", under);
        odds.add("player_points", "draftkings", over);
        odds.add("player_assists", "fanduel", Outcome {
            name: "Over".to_string(),
            point: 6.5,
            price: 100,
        });

        assert_eq!(odds.get("player_points", "draftkings").len(), 3);
        assert_eq!(odds.len(), 4);
        assert!(odds.get("player_points", "fanduel").is_empty());
        assert_eq!(odds.iter().count(), 4);
    }

    #[test]
    fn test_sort_by_game_date_puts_unparsed_first() {
        let mut logs = vec![
            Dated("2025-01-20", 1),
            Dated("2024-11-02T00:00:00", 2),
            Dated("not a date", 3),
            Dated("Dec 25, 2024", 4),
            Dated("2025-01-20", 5),
        ];
        sort_by_game_date(&mut logs);
        let order: Vec<u8> = logs.iter().map(|l| l.1).collect();
        assert_eq!(order, vec![3, 2, 4, 1, 5]);
    }

    #[test]
    fn test_league_parsing() {
        assert_eq!("WNBA".parse::<League>().unwrap(), League::Wnba);
        assert_eq!(League::Nhl.odds_sport_key(), "icehockey_nhl");
        assert!("nfl".parse::<League>().is_err());
    }
}
