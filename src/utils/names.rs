//! Closed alias tables for the spelling differences between the stats providers
//! and the odds feed. Exact lookups only; no fuzzy matching.

/// Stats-provider spelling → odds-feed spelling
const PLAYER_ALIASES: &[(&str, &str)] = &[
    ("Nikola Jokić", "Nikola Jokic"),
    ("Jimmy Butler III", "Jimmy Butler"),
    ("Isaiah Stewart", "Isaiah Stewart II"),
    ("Dennis Schröder", "Dennis Schroder"),
    ("Kristaps Porziņģis", "Kristaps Porzingis"),
    ("Luka Dončić", "Luka Doncic"),
    ("CJ McCollum", "C.J. McCollum"),
    ("Danté Exum", "Dante Exum"),
    ("RJ Barrett", "R.J. Barrett"),
    ("Nic Claxton", "Nicolas Claxton"),
    ("Nikola Vučević", "Nikola Vucevic"),
    ("Bogdan Bogdanović", "Bogdan Bogdanovic"),
    ("Jusuf Nurkić", "Jusuf Nurkic"),
    ("Alperen Şengün", "Alperen Sengun"),
    ("Jonas Valančiūnas", "Jonas Valanciunas"),
    ("Tim Stützle", "Tim Stutzle"),
    ("Alexis Lafrenière", "Alexis Lafreniere"),
];

const TEAM_ALIASES: &[(&str, &str)] = &[
    ("Montréal Canadiens", "Montreal Canadiens"),
    ("LA Clippers", "Los Angeles Clippers"),
    ("Oakland Athletics", "Athletics"),
];

/// Canonical form of a player's display name.
///
/// Applied to both sides of a comparison, and idempotent: normalizing an
/// already-normalized name returns it unchanged.
pub fn normalize_player_name(name: &str) -> String {
    let name = collapse_whitespace(name);
    let name = lookup(PLAYER_ALIASES, &name).unwrap_or(name);

    // "Tim Hardaway Jr." vs "Tim Hardaway Jr"
    match name.strip_suffix(" Jr.") {
        Some(stem) => format!("{} Jr", stem),
        None => name,
    }
}

/// Canonical form of a team's full name
pub fn normalize_team_name(name: &str) -> String {
    let name = collapse_whitespace(name).replace("St. ", "St ");
    lookup(TEAM_ALIASES, &name).unwrap_or(name)
}

pub fn same_player(a: &str, b: &str) -> bool {
    normalize_player_name(a) == normalize_player_name(b)
}

pub fn same_team(a: &str, b: &str) -> bool {
    normalize_team_name(a) == normalize_team_name(b)
}

fn lookup(table: &[(&str, &str)], name: &str) -> Option<String> {
    table
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| to.to_string())
}

fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_punctuation() {
        assert!(same_player("Tim Hardaway Jr.", "Tim Hardaway Jr"));
        assert!(same_player("Nick Smith Jr.", "Nick Smith Jr"));
        assert_eq!(normalize_player_name("Jaren Jackson Jr."), "Jaren Jackson Jr");
    }

    #[test]
    fn test_aliases_resolve_both_ways() {
        assert!(same_player("Nikola Jokić", "Nikola Jokic"));
        assert!(same_player("CJ McCollum", "C.J. McCollum"));
        assert!(same_player("Isaiah Stewart", "Isaiah Stewart II"));
        assert!(!same_player("Nikola Jokic", "Nikola Jovic"));
        assert!(same_player("  Luka   Dončić ", "Luka Doncic"));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let names = PLAYER_ALIASES
            .iter()
            .flat_map(|(a, b)| [*a, *b])
            .chain(["Tim Hardaway Jr.", "LeBron James", "Gary Trent Jr."]);
        for name in names {
            let once = normalize_player_name(name);
            assert_eq!(normalize_player_name(&once), once, "{}", name);
        }

        for (from, to) in TEAM_ALIASES {
            for name in [*from, *to] {
                let once = normalize_team_name(name);
                assert_eq!(normalize_team_name(&once), once);
            }
        }
    }

    #[test]
    fn test_team_names() {
        assert!(same_team("St. Louis Blues", "St Louis Blues"));
        assert!(same_team("Montréal Canadiens", "Montreal Canadiens"));
        assert!(same_team("Oakland Athletics", "Athletics"));
        assert!(!same_team("Los Angeles Kings", "Los Angeles Lakers"));
    }
}
