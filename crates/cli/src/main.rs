use anyhow::{Context, Result, anyhow};
use catalog::{CatalogStore, CatalogueItem, ItemId, RawItemRecord};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::RecommendationService;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;
use tracing::warn;

/// CineRecs - Content-Based Movie & Series Recommendations
#[derive(Parser)]
#[command(name = "cine-recs")]
#[command(about = "Content-based recommendations over a JSON catalogue", long_about = None)]
struct Cli {
    /// Path to the catalogue JSON file (an array of item records)
    #[arg(short, long, default_value = "data/catalogue.json")]
    catalogue: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend items similar to a seed title
    Recommend {
        /// Seed title (exact match)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Item ids to exclude from the results
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<ItemId>,
    },

    /// Search catalogue titles (case-insensitive)
    Search {
        /// Title fragment to search for
        #[arg(long)]
        query: String,

        /// Maximum number of suggestions
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show a single catalogue item
    Show {
        /// Item id to display
        #[arg(long)]
        id: ItemId,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalogue from {}...", cli.catalogue.display());
    let start = Instant::now();
    let store = load_catalogue(&cli.catalogue)?;
    println!(
        "{} Loaded {} items in {:?}",
        "✓".green(),
        store.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            title,
            limit,
            exclude,
        } => handle_recommend(&store, &title, limit, exclude)?,
        Commands::Search { query, limit } => handle_search(&store, &query, limit),
        Commands::Show { id } => handle_show(&store, id)?,
    }

    Ok(())
}

/// Load a catalogue file into a store, skipping records the store
/// rejects (duplicate or empty titles) the way a bulk import would.
fn load_catalogue(path: &PathBuf) -> Result<CatalogStore> {
    let file = File::open(path)
        .with_context(|| format!("failed to open catalogue file {}", path.display()))?;
    let records: Vec<RawItemRecord> =
        serde_json::from_reader(BufReader::new(file)).context("failed to parse catalogue JSON")?;

    let mut store = CatalogStore::new();
    for record in records {
        let id = record.id;
        if let Err(error) = store.add_item(record) {
            warn!(item_id = id, %error, "skipping catalogue record");
        }
    }
    Ok(store)
}

/// Handle the 'recommend' command
fn handle_recommend(
    store: &CatalogStore,
    title: &str,
    limit: usize,
    exclude: Vec<ItemId>,
) -> Result<()> {
    store
        .find_by_title(title)
        .ok_or_else(|| anyhow!("title '{}' not found in the catalogue", title))?;

    let service = RecommendationService::new();
    let exclude: HashSet<ItemId> = exclude.into_iter().collect();

    let start = Instant::now();
    let recommendations = service.recommend(&store.snapshot(), title, &exclude, limit);
    let elapsed = start.elapsed();

    println!(
        "{}",
        format!("Because you watched '{}':", title).bold().blue()
    );
    if recommendations.is_empty() {
        println!("  (no eligible recommendations)");
    }
    for (rank, item) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}]",
            (rank + 1).to_string().green(),
            item.title,
            item.genre
        );
    }
    println!("Served in {elapsed:?}");
    Ok(())
}

/// Handle the 'search' command
fn handle_search(store: &CatalogStore, query: &str, limit: usize) {
    let suggestions = store.suggestions(query, limit);

    println!(
        "{}",
        format!("Search results for '{}':", query).bold().blue()
    );
    if suggestions.is_empty() {
        println!("  (no matches)");
    }
    for item in suggestions {
        println!("{}: {} [{}]", item.id, item.title, item.genre);
    }
}

/// Handle the 'show' command
fn handle_show(store: &CatalogStore, id: ItemId) -> Result<()> {
    let item: &CatalogueItem = store
        .get(id)
        .ok_or_else(|| anyhow!("item {} not found", id))?;

    println!("{}", format!("{} (id {})", item.title, item.id).bold().blue());
    println!("{}Kind: {:?}", "• ".green(), item.kind);
    println!("{}Genre: {}", "• ".green(), item.genre);
    if !item.synopsis.is_empty() {
        println!("{}Synopsis: {}", "• ".green(), item.synopsis);
    }
    if !item.cast.is_empty() {
        println!("{}Cast: {}", "• ".green(), item.cast);
    }
    if !item.audio_languages.is_empty() {
        println!("{}Audio: {}", "• ".green(), item.audio_languages);
    }
    match &item.artwork_url {
        Some(url) => println!("{}Artwork: {}", "• ".cyan(), url),
        None => println!("{}Artwork: (none)", "• ".cyan()),
    }
    if let Some(trailer) = &item.trailer_url {
        println!("{}Trailer: {}", "• ".cyan(), trailer);
    }
    Ok(())
}
