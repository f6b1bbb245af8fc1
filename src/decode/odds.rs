use super::fields::FieldExt;
use super::{map_rows, require_object, Mapped};
use crate::error::{Error, Result};
use crate::models::{Bookmaker, Market, MatchupOdds, OddsEvent, PropOutcome};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

fn timestamp(obj: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let raw = obj.text(key)?;
    DateTime::parse_from_rfc3339(&raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn event_from_object(obj: &Map<String, Value>) -> Option<OddsEvent> {
    Some(OddsEvent {
        id: obj.text("id")?,
        sport_key: obj.text_or_empty("sport_key"),
        sport_title: obj.text_or_empty("sport_title"),
        commence_time: timestamp(obj, "commence_time"),
        home_team: obj.text_or_empty("home_team"),
        away_team: obj.text_or_empty("away_team"),
    })
}

/// Events from `{sport}/events`, a bare array
pub fn events_from_value(raw: &Value) -> Result<Mapped<OddsEvent>> {
    let events = raw
        .as_array()
        .ok_or_else(|| Error::decode("odds events", "response is not an array"))?;

    Ok(map_rows("odds events", events, |event| {
        event_from_object(event.as_object()?)
    }))
}

/// One event's odds from `{sport}/events/{id}/odds`.
/// Outcomes without a price are dropped; a missing point counts as 0.
pub fn matchup_odds_from_value(raw: &Value) -> Result<MatchupOdds> {
    let obj = require_object(raw, "matchup odds")?;
    let event =
        event_from_object(obj).ok_or_else(|| Error::decode("matchup odds", "missing event id"))?;

    let bookmakers = obj
        .array("bookmakers")
        .map(|books| books.iter().filter_map(bookmaker).collect())
        .unwrap_or_default();

    Ok(MatchupOdds {
        id: event.id,
        sport_key: event.sport_key,
        sport_title: event.sport_title,
        commence_time: event.commence_time,
        home_team: event.home_team,
        away_team: event.away_team,
        bookmakers,
    })
}

fn bookmaker(value: &Value) -> Option<Bookmaker> {
    let obj = value.as_object()?;
    let markets = obj
        .array("markets")
        .map(|markets| markets.iter().filter_map(market).collect())
        .unwrap_or_default();
    Some(Bookmaker {
        key: obj.text("key")?,
        title: obj.text_or_empty("title"),
        markets,
    })
}

fn market(value: &Value) -> Option<Market> {
    let obj = value.as_object()?;
    let key = obj.text("key")?;
    let outcomes = obj
        .array("outcomes")
        .map(|outcomes| map_rows(&key, outcomes, outcome).into_items())
        .unwrap_or_default();
    Some(Market {
        last_update: timestamp(obj, "last_update"),
        key,
        outcomes,
    })
}

fn outcome(value: &Value) -> Option<PropOutcome> {
    let obj = value.as_object()?;
    let price = obj.int("price").or_else(|| obj.float("price").map(|p| p.round() as i64))?;
    Some(PropOutcome {
        name: obj.text_or_empty("name"),
        description: obj.text("description"),
        point: obj.float_or_zero("point"),
        price: i32::try_from(price).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_events_from_value() {
        let raw = json!([
            {"id": "abc", "sport_key": "basketball_nba", "sport_title": "NBA",
             "commence_time": "2025-01-16T00:10:00Z",
             "home_team": "Atlanta Hawks", "away_team": "Boston Celtics"},
            {"home_team": "No Id"}
        ]);
        let events = events_from_value(&raw).unwrap();
        assert_eq!(events.items.len(), 1);
        assert_eq!(events.skipped, 1);
        assert!(events.items[0].commence_time.is_some());

        assert!(events_from_value(&json!({"message": "quota"})).is_err());
    }

    #[test]
    fn test_matchup_odds_outcomes() {
        let raw = json!({
            "id": "abc",
            "sport_key": "basketball_nba",
            "home_team": "Atlanta Hawks",
            "away_team": "Boston Celtics",
            "bookmakers": [{
                "key": "draftkings",
                "title": "DraftKings",
                "markets": [{
                    "key": "player_points",
                    "last_update": "2025-01-15T18:00:00Z",
                    "outcomes": [
                        {"name": "Over", "description": "Trae Young", "point": 25.5, "price": -115},
                        {"name": "Under", "description": "Trae Young", "price": "-105"},
                        {"name": "Over", "description": "No Price", "point": 3.5},
                        {"name": "Over", "description": "Jayson Tatum", "point": 27.5, "price": 110.0}
                    ]
                }]
            }]
        });

        let odds = matchup_odds_from_value(&raw).unwrap();
        assert_eq!(odds.outcome_count(), 3);
        let outcomes = &odds.bookmakers[0].markets[0].outcomes;
        assert_eq!(outcomes[1].point, 0.0);
        assert_eq!(outcomes[1].price, -105);
        assert_eq!(outcomes[2].price, 110);
        assert_eq!(outcomes[2].description.as_deref(), Some("Jayson Tatum"));
    }
}
