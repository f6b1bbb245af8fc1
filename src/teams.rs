//! Hardcoded team tables. NBA and WNBA ids are the stats provider's team ids,
//! NHL ids are the web API's team ids.

use crate::models::{League, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticTeam {
    pub id: i64,
    pub abbreviation: &'static str,
    pub nickname: &'static str,
    pub year_founded: i32,
    pub city: &'static str,
    pub full_name: &'static str,
    pub state: &'static str,
    pub championship_years: &'static [i32],
}

impl StaticTeam {
    pub fn to_team<P>(&self) -> Team<P> {
        Team {
            id: self.id,
            abbreviation: self.abbreviation.to_string(),
            nickname: self.nickname.to_string(),
            city: self.city.to_string(),
            full_name: self.full_name.to_string(),
            state: self.state.to_string(),
            year_founded: self.year_founded,
            championship_years: self.championship_years.to_vec(),
            division: None,
            players: Vec::new(),
        }
    }
}

const fn team(
    id: i64,
    abbreviation: &'static str,
    nickname: &'static str,
    year_founded: i32,
    city: &'static str,
    full_name: &'static str,
    state: &'static str,
    championship_years: &'static [i32],
) -> StaticTeam {
    StaticTeam {
        id,
        abbreviation,
        nickname,
        year_founded,
        city,
        full_name,
        state,
        championship_years,
    }
}

pub const NBA_TEAMS: &[StaticTeam] = &[
    team(1610612737, "ATL", "Hawks", 1949, "Atlanta", "Atlanta Hawks", "Georgia", &[1958]),
    team(1610612738, "BOS", "Celtics", 1946, "Boston", "Boston Celtics", "Massachusetts",
        &[1957, 1959, 1960, 1961, 1962, 1963, 1964, 1965, 1966, 1968, 1969, 1974, 1976, 1981, 1984, 1986, 2008, 2024]),
    team(1610612739, "CLE", "Cavaliers", 1970, "Cleveland", "Cleveland Cavaliers", "Ohio", &[2016]),
    team(1610612740, "NOP", "Pelicans", 2002, "New Orleans", "New Orleans Pelicans", "Louisiana", &[]),
    team(1610612741, "CHI", "Bulls", 1966, "Chicago", "Chicago Bulls", "Illinois",
        &[1991, 1992, 1993, 1996, 1997, 1998]),
    team(1610612742, "DAL", "Mavericks", 1980, "Dallas", "Dallas Mavericks", "Texas", &[2011]),
    team(1610612743, "DEN", "Nuggets", 1976, "Denver", "Denver Nuggets", "Colorado", &[2023]),
    team(1610612744, "GSW", "Warriors", 1946, "Golden State", "Golden State Warriors", "California",
        &[1947, 1956, 1975, 2015, 2017, 2018, 2022]),
    team(1610612745, "HOU", "Rockets", 1967, "Houston", "Houston Rockets", "Texas", &[1994, 1995]),
    team(1610612746, "LAC", "Clippers", 1970, "Los Angeles", "Los Angeles Clippers", "California", &[]),
    team(1610612747, "LAL", "Lakers", 1948, "Los Angeles", "Los Angeles Lakers", "California",
        &[1949, 1950, 1952, 1953, 1954, 1972, 1980, 1982, 1985, 1987, 1988, 2000, 2001, 2002, 2009, 2010, 2020]),
    team(1610612748, "MIA", "Heat", 1988, "Miami", "Miami Heat", "Florida", &[2006, 2012, 2013]),
    team(1610612749, "MIL", "Bucks", 1968, "Milwaukee", "Milwaukee Bucks", "Wisconsin", &[1971, 2021]),
    team(1610612750, "MIN", "Timberwolves", 1989, "Minnesota", "Minnesota Timberwolves", "Minnesota", &[]),
    team(1610612751, "BKN", "Nets", 1976, "Brooklyn", "Brooklyn Nets", "New York", &[]),
    team(1610612752, "NYK", "Knicks", 1946, "New York", "New York Knicks", "New York", &[1970, 1973]),
    team(1610612753, "ORL", "Magic", 1989, "Orlando", "Orlando Magic", "Florida", &[]),
    team(1610612754, "IND", "Pacers", 1976, "Indiana", "Indiana Pacers", "Indiana", &[]),
    team(1610612755, "PHI", "76ers", 1949, "Philadelphia", "Philadelphia 76ers", "Pennsylvania",
        &[1955, 1967, 1983]),
    team(1610612756, "PHX", "Suns", 1968, "Phoenix", "Phoenix Suns", "Arizona", &[]),
    team(1610612757, "POR", "Trail Blazers", 1970, "Portland", "Portland Trail Blazers", "Oregon", &[1977]),
    team(1610612758, "SAC", "Kings", 1948, "Sacramento", "Sacramento Kings", "California", &[1951]),
    team(1610612759, "SAS", "Spurs", 1976, "San Antonio", "San Antonio Spurs", "Texas",
        &[1999, 2003, 2005, 2007, 2014]),
    team(1610612760, "OKC", "Thunder", 1967, "Oklahoma City", "Oklahoma City Thunder", "Oklahoma", &[1979]),
    team(1610612761, "TOR", "Raptors", 1995, "Toronto", "Toronto Raptors", "Ontario", &[2019]),
    team(1610612762, "UTA", "Jazz", 1974, "Utah", "Utah Jazz", "Utah", &[]),
    team(1610612763, "MEM", "Grizzlies", 1995, "Memphis", "Memphis Grizzlies", "Tennessee", &[]),
    team(1610612764, "WAS", "Wizards", 1961, "Washington", "Washington Wizards", "District of Columbia", &[1978]),
    team(1610612765, "DET", "Pistons", 1948, "Detroit", "Detroit Pistons", "Michigan", &[1989, 1990, 2004]),
    team(1610612766, "CHA", "Hornets", 1988, "Charlotte", "Charlotte Hornets", "North Carolina", &[]),
];

pub const WNBA_TEAMS: &[StaticTeam] = &[
    team(1611661313, "NYL", "Liberty", 1997, "New York", "New York Liberty", "New York", &[2024]),
    team(1611661317, "PHO", "Mercury", 1997, "Phoenix", "Phoenix Mercury", "Arizona", &[2007, 2009, 2014]),
    team(1611661319, "LVA", "Aces", 1997, "Las Vegas", "Las Vegas Aces", "Nevada", &[2022, 2023]),
    team(1611661320, "LAS", "Sparks", 1997, "Los Angeles", "Los Angeles Sparks", "California",
        &[2001, 2002, 2016]),
    team(1611661321, "DAL", "Wings", 1998, "Dallas", "Dallas Wings", "Texas", &[2003, 2006, 2008]),
    team(1611661322, "WAS", "Mystics", 1998, "Washington", "Washington Mystics", "District of Columbia", &[2019]),
    team(1611661323, "CON", "Sun", 1999, "Connecticut", "Connecticut Sun", "Connecticut", &[]),
    team(1611661324, "MIN", "Lynx", 1999, "Minnesota", "Minnesota Lynx", "Minnesota",
        &[2011, 2013, 2015, 2017]),
    team(1611661325, "IND", "Fever", 2000, "Indiana", "Indiana Fever", "Indiana", &[2012]),
    team(1611661328, "SEA", "Storm", 2000, "Seattle", "Seattle Storm", "Washington", &[2004, 2010, 2018, 2020]),
    team(1611661329, "CHI", "Sky", 2005, "Chicago", "Chicago Sky", "Illinois", &[2021]),
    team(1611661330, "ATL", "Dream", 2008, "Atlanta", "Atlanta Dream", "Georgia", &[]),
];

// Championship years are not tracked for hockey
pub const NHL_TEAMS: &[StaticTeam] = &[
    team(1, "NJD", "Devils", 1974, "New Jersey", "New Jersey Devils", "New Jersey", &[]),
    team(2, "NYI", "Islanders", 1972, "New York", "New York Islanders", "New York", &[]),
    team(3, "NYR", "Rangers", 1926, "New York", "New York Rangers", "New York", &[]),
    team(4, "PHI", "Flyers", 1967, "Philadelphia", "Philadelphia Flyers", "Pennsylvania", &[]),
    team(5, "PIT", "Penguins", 1967, "Pittsburgh", "Pittsburgh Penguins", "Pennsylvania", &[]),
    team(6, "BOS", "Bruins", 1924, "Boston", "Boston Bruins", "Massachusetts", &[]),
    team(7, "BUF", "Sabres", 1970, "Buffalo", "Buffalo Sabres", "New York", &[]),
    team(8, "MTL", "Canadiens", 1909, "Montréal", "Montréal Canadiens", "Quebec", &[]),
    team(9, "OTT", "Senators", 1992, "Ottawa", "Ottawa Senators", "Ontario", &[]),
    team(10, "TOR", "Maple Leafs", 1917, "Toronto", "Toronto Maple Leafs", "Ontario", &[]),
    team(12, "CAR", "Hurricanes", 1979, "Carolina", "Carolina Hurricanes", "North Carolina", &[]),
    team(13, "FLA", "Panthers", 1993, "Florida", "Florida Panthers", "Florida", &[]),
    team(14, "TBL", "Lightning", 1992, "Tampa Bay", "Tampa Bay Lightning", "Florida", &[]),
    team(15, "WSH", "Capitals", 1974, "Washington", "Washington Capitals", "District of Columbia", &[]),
    team(16, "CHI", "Blackhawks", 1926, "Chicago", "Chicago Blackhawks", "Illinois", &[]),
    team(17, "DET", "Red Wings", 1926, "Detroit", "Detroit Red Wings", "Michigan", &[]),
    team(18, "NSH", "Predators", 1998, "Nashville", "Nashville Predators", "Tennessee", &[]),
    team(19, "STL", "Blues", 1967, "St. Louis", "St. Louis Blues", "Missouri", &[]),
    team(20, "CGY", "Flames", 1972, "Calgary", "Calgary Flames", "Alberta", &[]),
    team(21, "COL", "Avalanche", 1979, "Colorado", "Colorado Avalanche", "Colorado", &[]),
    team(22, "EDM", "Oilers", 1979, "Edmonton", "Edmonton Oilers", "Alberta", &[]),
    team(23, "VAN", "Canucks", 1970, "Vancouver", "Vancouver Canucks", "British Columbia", &[]),
    team(24, "ANA", "Ducks", 1993, "Anaheim", "Anaheim Ducks", "California", &[]),
    team(25, "DAL", "Stars", 1967, "Dallas", "Dallas Stars", "Texas", &[]),
    team(26, "LAK", "Kings", 1967, "Los Angeles", "Los Angeles Kings", "California", &[]),
    team(28, "SJS", "Sharks", 1991, "San Jose", "San Jose Sharks", "California", &[]),
    team(29, "CBJ", "Blue Jackets", 2000, "Columbus", "Columbus Blue Jackets", "Ohio", &[]),
    team(30, "MIN", "Wild", 2000, "Minnesota", "Minnesota Wild", "Minnesota", &[]),
    team(52, "WPG", "Jets", 1999, "Winnipeg", "Winnipeg Jets", "Manitoba", &[]),
    team(53, "ARI", "Coyotes", 1979, "Arizona", "Arizona Coyotes", "Arizona", &[]),
    team(54, "VGK", "Golden Knights", 2017, "Vegas", "Vegas Golden Knights", "Nevada", &[]),
    team(55, "SEA", "Kraken", 2021, "Seattle", "Seattle Kraken", "Washington", &[]),
    team(59, "UTA", "Hockey Club", 2024, "Utah", "Utah Hockey Club", "Utah", &[]),
];

/// The static table for a league. MLB teams are fetched live, so it has none.
pub fn static_table(league: League) -> &'static [StaticTeam] {
    match league {
        League::Nba => NBA_TEAMS,
        League::Wnba => WNBA_TEAMS,
        League::Nhl => NHL_TEAMS,
        League::Mlb => &[],
    }
}

/// Fresh teams with empty rosters
pub fn teams_for<P>(league: League) -> Vec<Team<P>> {
    static_table(league).iter().map(StaticTeam::to_team).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_sizes_and_unique_ids() {
        assert_eq!(NBA_TEAMS.len(), 30);
        assert_eq!(WNBA_TEAMS.len(), 12);
        assert_eq!(NHL_TEAMS.len(), 33);

        for table in [NBA_TEAMS, WNBA_TEAMS, NHL_TEAMS] {
            let ids: HashSet<i64> = table.iter().map(|t| t.id).collect();
            assert_eq!(ids.len(), table.len());
            let names: HashSet<&str> = table.iter().map(|t| t.full_name).collect();
            assert_eq!(names.len(), table.len());
        }
    }

    #[test]
    fn test_teams_for_starts_empty() {
        let teams: Vec<Team<()>> = teams_for(League::Nba);
        assert_eq!(teams[0].full_name, "Atlanta Hawks");
        assert!(teams.iter().all(|t| t.players.is_empty()));
        assert!(teams_for::<()>(League::Mlb).is_empty());
    }
}
