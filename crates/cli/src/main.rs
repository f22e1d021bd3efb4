use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{CatalogStore, Goal, LoadPolicy, MenuItem};
use pipeline::EngineConfig;
use server::{Explanation, Projection, SuggestionEngine, SuggestionResult};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Macro Picks - fast-food menu suggestions for a dietary goal
#[derive(Parser)]
#[command(name = "macro-picks")]
#[command(about = "Rank fast-food menu items for cutting, bulking or keto", long_about = None)]
struct Cli {
    /// Path to the menu catalog JSON
    #[arg(short, long, default_value = "fastfood_items.json")]
    data: PathBuf,

    /// Optional engine config (thresholds, weights, keyword rules)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat a malformed catalog as empty instead of failing
    #[arg(long)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest items at a restaurant
    Suggest {
        #[arg(long)]
        restaurant: String,

        /// cutting, bulking or keto
        #[arg(long, default_value = "cutting")]
        goal: Goal,

        /// Show the filter tier and every scored candidate
        #[arg(long)]
        explain: bool,
    },

    /// List restaurants in the catalog
    Restaurants,

    /// Show a restaurant's full menu
    Menu {
        #[arg(long)]
        restaurant: String,
    },

    /// Show nutrition facts for one item
    Item {
        #[arg(long)]
        restaurant: String,

        /// Item name (case-insensitive)
        #[arg(long)]
        name: String,
    },

    /// Best mains across restaurants
    Picks {
        #[arg(long, default_value = "cutting")]
        goal: Goal,
    },

    /// Run suggestions for random restaurants and report latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "8")]
        concurrent: usize,

        #[arg(long, default_value = "cutting")]
        goal: Goal,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let engine = Arc::new(build_engine(&cli)?);

    match cli.command {
        Commands::Suggest {
            restaurant,
            goal,
            explain,
        } => handle_suggest(&engine, &restaurant, goal, explain)?,
        Commands::Restaurants => handle_restaurants(&engine)?,
        Commands::Menu { restaurant } => handle_menu(&engine, &restaurant)?,
        Commands::Item { restaurant, name } => handle_item(&engine, &restaurant, &name)?,
        Commands::Picks { goal } => handle_picks(&engine, goal)?,
        Commands::Benchmark {
            requests,
            concurrent,
            goal,
        } => handle_benchmark(engine, requests, concurrent, goal).await?,
    }

    Ok(())
}

/// Load the catalog up front so a bad path fails before any command runs
fn build_engine(cli: &Cli) -> Result<SuggestionEngine> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    debug!("Engine config: {:?}", config.ranking);

    let policy = if cli.lenient {
        LoadPolicy::Lenient
    } else {
        LoadPolicy::Strict
    };

    println!("Loading menu catalog from {}...", cli.data.display());
    let start = Instant::now();
    let store = Arc::new(CatalogStore::new(&cli.data, policy));
    let catalog = store.get().context("Failed to load menu catalog")?;
    println!(
        "{} Loaded {} items in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    Ok(SuggestionEngine::new(store, config))
}

/// Handle the 'suggest' command
fn handle_suggest(engine: &SuggestionEngine, restaurant: &str, goal: Goal, explain: bool) -> Result<()> {
    let result = engine.suggest(restaurant, goal)?;
    print_suggestions(restaurant, goal, &result);

    if explain {
        let explanation = engine.explain(restaurant, goal)?;
        print_explanation(&explanation);
    }
    Ok(())
}

/// Handle the 'restaurants' command
fn handle_restaurants(engine: &SuggestionEngine) -> Result<()> {
    let restaurants = engine.restaurants()?;
    println!("{}", format!("{} restaurants:", restaurants.len()).bold().blue());
    for name in restaurants {
        println!("{}{}", "• ".green(), name);
    }
    Ok(())
}

/// Handle the 'menu' command
fn handle_menu(engine: &SuggestionEngine, restaurant: &str) -> Result<()> {
    let items = engine.menu(restaurant)?;
    if items.is_empty() {
        println!("{}", format!("No items found for restaurant: {}", restaurant).yellow());
        return Ok(());
    }

    println!("{}", format!("{} ({} items):", restaurant.trim(), items.len()).bold().blue());
    for item in &items {
        print_menu_row(item);
    }
    Ok(())
}

/// Handle the 'item' command
fn handle_item(engine: &SuggestionEngine, restaurant: &str, name: &str) -> Result<()> {
    let item = engine.item(restaurant, name)?;

    println!("{}", format!("{} @ {}", item.name, item.restaurant).bold().blue());
    println!("{}{}", "• ".green(), item.description);
    println!("{}Calories: {}", "• ".cyan(), item.calories);
    println!("{}Protein: {:.1} g", "• ".cyan(), item.protein_g);
    println!("{}Carbs: {:.1} g", "• ".cyan(), item.carbs_g);
    println!("{}Fat: {:.1} g", "• ".cyan(), item.fat_g);
    println!("{}Sodium: {:.0} mg", "• ".cyan(), item.sodium_mg);
    Ok(())
}

/// Handle the 'picks' command
fn handle_picks(engine: &SuggestionEngine, goal: Goal) -> Result<()> {
    let picks = engine.top_picks(goal)?;
    println!("{}", format!("Top picks for {}:", goal).bold().blue());
    for (i, pick) in picks.iter().enumerate() {
        print_projection(i + 1, pick);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    engine: Arc<SuggestionEngine>,
    requests: usize,
    concurrent: usize,
    goal: Goal,
) -> Result<()> {
    let restaurants = engine.restaurants()?;
    if restaurants.is_empty() || requests == 0 {
        println!("{}", "Nothing to benchmark".yellow());
        return Ok(());
    }

    // Random restaurants, chosen up front so only the engine is timed
    let targets: Vec<String> = (0..requests)
        .map(|_| restaurants[rand::random::<u32>() as usize % restaurants.len()].clone())
        .collect();

    let wall = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);

    for batch in targets.chunks(concurrent.max(1)) {
        let mut handles = Vec::with_capacity(batch.len());
        for restaurant in batch {
            let engine = engine.clone();
            let restaurant = restaurant.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                engine.suggest(&restaurant, goal)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            }));
        }
        for handle in handles {
            timings.push(handle.await.context("Benchmark task panicked")??);
        }
    }
    let wall_time = wall.elapsed();

    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent, goal {})", requests, concurrent, goal);
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_suggestions(restaurant: &str, goal: Goal, result: &SuggestionResult) {
    println!(
        "{}",
        format!("Suggestions at {} for {}:", restaurant.trim(), goal).bold().blue()
    );
    for (i, projection) in result.suggestions.iter().enumerate() {
        print_projection(i + 1, projection);
    }

    if !result.runner_ups.is_empty() {
        println!("{}", "Runner-ups:".bold());
        for (i, projection) in result.runner_ups.iter().enumerate() {
            print_projection(result.suggestions.len() + i + 1, projection);
        }
    }
}

fn print_projection(rank: usize, projection: &Projection) {
    println!(
        "{}. {} ({}) - {} kcal, {:.0} g protein, {:.0} g carbs, {:.0} g fat",
        rank.to_string().green(),
        projection.name.bold(),
        projection.description,
        projection.calories,
        projection.protein_g,
        projection.carbs_g,
        projection.fat_g
    );
}

fn print_menu_row(item: &MenuItem) {
    let category = if item.category.is_empty() { "-" } else { item.category.as_str() };
    println!(
        "  {} [{}] {:.0} kcal, P {:.0} / C {:.0} / F {:.0}",
        item.name, category, item.calories, item.protein_g, item.carbs_g, item.fat_g
    );
}

fn print_explanation(explanation: &Explanation) {
    println!(
        "{}",
        format!(
            "{} of {} rows scored ({} tier, {} backfilled sides)",
            explanation.ranked.len(),
            explanation.menu_size,
            explanation.tier,
            explanation.backfilled
        )
        .cyan()
    );
    for scored in &explanation.ranked {
        let score = format!("{:>10.2}", scored.score);
        let score = if scored.score < 0.0 { score.red() } else { score.green() };
        println!("  {} {}", score, scored.projection.name);
    }
}
