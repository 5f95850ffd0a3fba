//! Party Board CLI
//!
//! One-shot commands against the board's REST API:
//! - Check backend status
//! - List categories and dishes
//! - Add, move, and edit dishes
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use party_board::board::NO_RESTRICTION;
use party_board::render::{category_header, card_lines};
use party_board::{Backend, CardUpdate, Category, Config, HttpBackend, NewCard};

#[derive(Parser)]
#[command(name = "party-board-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage the party board from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend REST API URL (default: from config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show backend status
    Status,

    /// List categories and their dishes
    List,

    /// Add a dish
    Add {
        /// Couple bringing the dish
        couple: String,
        /// Dish name
        dish: String,
        /// Category id (appetizers, sides, main, desserts)
        category: String,
        /// Dietary note
        #[arg(short, long, default_value = NO_RESTRICTION)]
        diet: String,
    },

    /// Move a dish to another category
    Move {
        /// Card id or unique id prefix
        card: String,
        /// Target category id
        category: String,
    },

    /// Change a dish's name or dietary note
    Edit {
        /// Card id or unique id prefix
        card: String,
        #[arg(long)]
        dish: Option<String>,
        #[arg(long)]
        diet: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(url) = cli.api_url.clone() {
        config.client.api_url = url;
    }
    let backend = HttpBackend::new(config.client.http()).context("Failed to build HTTP client")?;
    let json = cli.format.eq_ignore_ascii_case("json");

    match cli.command {
        Commands::Status => match backend.health_check().await {
            Ok(true) => {
                let categories = backend.list_categories().await?;
                let dishes: usize = categories.iter().map(|c| c.cards.len()).sum();
                let slots: usize = categories.iter().map(|c| c.max_items).sum();

                println!("Party Board v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("API Status: live ({})", config.client.api_url);
                println!("Dishes: {}/{}", dishes, slots);
            }
            Ok(false) => {
                eprintln!("Backend at {} is not live yet", config.client.api_url);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Cannot connect to the party board API at {}", config.client.api_url);
                eprintln!("Error: {}", e);
                eprintln!();
                eprintln!("Make sure the API server is running:");
                eprintln!("  cargo run --bin party-board-api");
                std::process::exit(1);
            }
        },

        Commands::List => {
            let categories = backend.list_categories().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                print_categories(&categories);
            }
        }

        Commands::Add {
            couple,
            dish,
            category,
            diet,
        } => {
            if couple.trim().is_empty() || dish.trim().is_empty() {
                bail!("Couple name and dish name are required");
            }
            let card = backend
                .create_card(NewCard {
                    couple_name: couple,
                    dish_name: dish,
                    dietary_restrictions: diet,
                    category_id: category,
                })
                .await?;
            println!(
                "Added {} bringing {} to {} ({})",
                card.couple_name, card.dish_name, card.category_id, card.id
            );
        }

        Commands::Move { card, category } => {
            let categories = backend.list_categories().await?;
            let card_id = resolve_card(&categories, &card)?;
            let moved = backend.update_card_category(&card_id, &category).await?;
            println!("Moved {} to {}", moved.couple_name, moved.category_id);
        }

        Commands::Edit { card, dish, diet } => {
            let update = CardUpdate {
                dish_name: dish,
                dietary_restrictions: diet,
            };
            if update.is_empty() {
                bail!("Nothing to change; pass --dish and/or --diet");
            }
            if matches!(&update.dish_name, Some(d) if d.trim().is_empty()) {
                bail!("Dish name is required");
            }

            let categories = backend.list_categories().await?;
            let card_id = resolve_card(&categories, &card)?;
            let edited = backend.update_card(&card_id, update).await?;
            println!("Updated {}'s dish: {}", edited.couple_name, edited.dish_name);
        }

        Commands::Config { output } => {
            let config = party_board::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories yet.");
        return;
    }
    for category in categories {
        println!("{}", category_header(category));
        for card in &category.cards {
            for line in card_lines(card) {
                println!("  {}", line);
            }
        }
    }
}

/// Full id for an exact id or unique prefix
fn resolve_card(categories: &[Category], handle: &str) -> anyhow::Result<String> {
    let ids: Vec<&str> = categories
        .iter()
        .flat_map(|c| c.cards.iter())
        .map(|card| card.id.as_str())
        .filter(|id| id.starts_with(handle))
        .collect();

    match ids.as_slice() {
        [id] => Ok(id.to_string()),
        [] => bail!("No card matches `{}`", handle),
        many if many.contains(&handle) => Ok(handle.to_string()),
        _ => bail!("`{}` matches more than one card", handle),
    }
}
