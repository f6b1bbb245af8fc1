use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use sports_props::api::Params;
use sports_props::models::{Matchup, RosterPlayer};
use sports_props::utils::data::{outcome_rows, save_json, save_outcomes_to_csv};
use sports_props::{Aggregator, Config, League};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cli", about = "Sports stats and player props from the command line")]
struct Cli {
    /// League to query
    #[arg(long, short, value_enum, ignore_case = true, default_value_t = League::Nba, global = true)]
    league: League,

    /// Always go to the providers, ignoring cached responses
    #[arg(long, global = true)]
    no_cache: bool,

    /// Override the configured season for the chosen league
    #[arg(long, global = true)]
    season: Option<String>,

    /// Also write the result as JSON to this file
    #[arg(long, global = true)]
    json: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the league's teams
    Teams,
    /// The day's matchups with player props attached
    Matchups {
        /// Game date (YYYY-MM-DD), NBA/WNBA only; defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Write every attached outcome to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// This season's players (NBA/WNBA)
    Players {
        /// Include every player in history
        #[arg(long)]
        all: bool,
    },
    /// Dump the result sets of any stats.nba.com endpoint
    ResultSets {
        endpoint: String,
        /// Query parameters as key=value
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,
    },
}

fn config_for(cli: &Cli) -> Config {
    let mut config = Config::from_env();
    if cli.no_cache {
        config.cache_dir = None;
        config.cache_ttl = Duration::ZERO;
    }
    if let Some(season) = &cli.season {
        match cli.league {
            League::Nba | League::Wnba => config.nba_season = season.clone(),
            League::Nhl => config.nhl_season = season.clone(),
            League::Mlb => config.mlb_season = season.clone(),
        }
    }
    config
}

fn parse_params(pairs: &[String]) -> Result<Params> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .with_context(|| format!("Expected key=value, got {}", pair))
        })
        .collect()
}

fn print_matchups<P: RosterPlayer>(matchups: &[Matchup<P>]) {
    if matchups.is_empty() {
        println!("No matchups found.");
        return;
    }
    for matchup in matchups {
        let with_odds = matchup
            .home
            .players
            .iter()
            .chain(matchup.away.players.iter())
            .filter(|p| p.has_odds())
            .count();
        println!(
            "{} @ {}  ({} players with props)",
            matchup.away.full_name, matchup.home.full_name, with_odds
        );
    }
}

fn export<T: serde::Serialize + ?Sized>(value: &T, path: &Option<PathBuf>) -> Result<()> {
    if let Some(path) = path {
        save_json(value, path)?;
        println!("\nSaved JSON to {}", path.display());
    }
    Ok(())
}

fn export_csv<P: RosterPlayer>(matchups: &[Matchup<P>], path: &Option<PathBuf>) -> Result<()> {
    if let Some(path) = path {
        let rows = outcome_rows(matchups);
        save_outcomes_to_csv(&rows, path)?;
        println!("Saved {} outcomes to {}", rows.len(), path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = config_for(&cli);
    let aggregator = Aggregator::from_config(&config).context("Failed to build HTTP clients")?;
    let league = cli.league;

    match &cli.command {
        Command::Teams => match league {
            League::Nba | League::Wnba => {
                let teams = aggregator
                    .basketball_teams_with_players(league)
                    .await
                    .context("Failed to fetch teams")?;
                for team in &teams {
                    println!("{:<4} {:<28} {} players", team.abbreviation, team.full_name, team.players.len());
                }
                export(&teams, &cli.json)?;
            }
            League::Nhl => {
                let teams = aggregator.nhl_teams();
                for team in &teams {
                    println!("{:<4} {}", team.abbreviation, team.full_name);
                }
                export(&teams, &cli.json)?;
            }
            League::Mlb => {
                let teams = aggregator.mlb_teams().await.context("Failed to fetch MLB teams")?;
                for team in &teams {
                    println!(
                        "{:<4} {:<28} {}",
                        team.abbreviation,
                        team.name,
                        team.division.as_deref().unwrap_or("")
                    );
                }
                export(&teams, &cli.json)?;
            }
        },

        Command::Matchups { date, csv } => {
            println!("{} MATCHUPS\n", league.as_str().to_uppercase());
            match league {
                League::Nba | League::Wnba => {
                    let date = date.unwrap_or_else(|| Local::now().date_naive());
                    let matchups = aggregator
                        .basketball_matchups_with_odds(league, date)
                        .await
                        .context("Failed to build matchups")?;
                    print_matchups(&matchups);
                    export_csv(&matchups, csv)?;
                    export(&matchups, &cli.json)?;
                }
                League::Nhl => {
                    let matchups = aggregator.nhl_matchups().await.context("Failed to build NHL matchups")?;
                    print_matchups(&matchups);
                    export_csv(&matchups, csv)?;
                    export(&matchups, &cli.json)?;
                }
                League::Mlb => {
                    let matchups = aggregator.mlb_matchups().await.context("Failed to build MLB matchups")?;
                    print_matchups(&matchups);
                    export_csv(&matchups, csv)?;
                    export(&matchups, &cli.json)?;
                }
            }
        }

        Command::Players { all } => {
            let players = aggregator
                .basketball_players(league, !all)
                .await
                .context("Failed to fetch players")?;
            for player in &players {
                println!("{:<10} {:<28} {}", player.id, player.full_name, player.team_abbreviation);
            }
            println!("\n{} players", players.len());
            export(&players, &cli.json)?;
        }

        Command::ResultSets { endpoint, params } => {
            let params = parse_params(params)?;
            let dict = aggregator
                .basketball_result_sets(endpoint, &params)
                .await
                .with_context(|| format!("Failed to fetch {}", endpoint))?;
            for name in dict.names() {
                println!("{}: {} rows", name, dict.get(name).map(|rows| rows.len()).unwrap_or(0));
            }
            export(&dict, &cli.json)?;
        }
    }

    Ok(())
}
