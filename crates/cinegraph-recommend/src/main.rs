//! CLI entry point for the cinegraph movie recommender.
//!
//! Tables and JSON go to stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use cinegraph_core::{Recommendation, RecommendationOutcome, Settings, TitleResolution};
use cinegraph_graph::{GraphClient, GraphConfig};
use cinegraph_recommend::{InMemoryStore, MovieStore, Recommender, TitleCatalog};

#[derive(Parser)]
#[command(name = "cinegraph")]
#[command(about = "Recommend movies that share actors and genres with one you like")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: cinegraph).
    #[arg(short, long, default_value = "cinegraph", global = true)]
    config: String,

    /// Read movies from a JSON catalog instead of Neo4j.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend movies for a title you like.
    Recommend {
        /// Movie title (case-insensitive).
        title: String,
    },
    /// Show the stored title matching the input.
    Resolve {
        /// Movie title (case-insensitive).
        title: String,
    },
    /// List every movie title.
    Titles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;
    let store = open_store(&cli, &settings).await?;

    match cli.command {
        Command::Recommend { ref title } => {
            let report = Recommender::new(store).recommend(title).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_outcome(&report.outcome);
            }
        }
        Command::Resolve { ref title } => {
            let resolution = Recommender::new(store).resolver().resolve(title).await?;
            if cli.json {
                println!("{}", serde_json::to_string(&resolution)?);
            } else {
                match resolution {
                    TitleResolution::Resolved { title: canonical } => println!("{canonical}"),
                    TitleResolution::NotFound => println!("No movie titled \"{title}\" was found."),
                }
            }
        }
        Command::Titles => {
            let catalog = TitleCatalog::new(store, Duration::from_secs(settings.catalog.ttl_secs));
            let titles = catalog.titles().await?;
            if cli.json {
                println!("{}", serde_json::to_string(&*titles)?);
            } else {
                for title in titles.iter() {
                    println!("{title}");
                }
            }
        }
    }

    Ok(())
}

async fn open_store(cli: &Cli, settings: &Settings) -> anyhow::Result<Arc<dyn MovieStore>> {
    if let Some(path) = &cli.catalog {
        return Ok(Arc::new(InMemoryStore::from_json_file(path)?));
    }
    let graph = GraphClient::connect(&GraphConfig::from(&settings.neo4j)).await?;
    Ok(Arc::new(graph))
}

fn print_outcome(outcome: &RecommendationOutcome) {
    match outcome {
        RecommendationOutcome::NotFound { query } => {
            println!("No movie titled \"{query}\" was found. Run `cinegraph titles` to browse.");
        }
        RecommendationOutcome::Empty { seed } => {
            println!("No recommendations found for \"{seed}\".");
        }
        RecommendationOutcome::Ranked {
            seed,
            recommendations,
        } => {
            println!("Recommendations for \"{seed}\" (shared actors & genres):\n");
            print_table(recommendations);
        }
    }
}

fn print_table(rows: &[Recommendation]) {
    let width = rows
        .iter()
        .map(|r| r.title.chars().count())
        .chain(std::iter::once("Recommendation".len()))
        .max()
        .unwrap_or(0);

    println!(
        "{:>3}  {:<width$}  {:>12}  {:>12}",
        "#", "Recommendation", "sharedGenres", "sharedActors"
    );
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:>3}  {:<width$}  {:>12}  {:>12}",
            i + 1,
            row.title,
            row.shared_genres,
            row.shared_actors
        );
    }
}
