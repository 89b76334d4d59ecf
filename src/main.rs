use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_keeper::assembler::RecipeAssembler;
use recipe_keeper::config::Config;
use recipe_keeper::grocery::GroceryAggregator;
use recipe_keeper::ingest::{Ingestor, MockDriveSink};
use recipe_keeper::ocr::StubOcr;
use recipe_keeper::planner::MealPlanner;
use recipe_keeper::render;
use recipe_keeper::store::RecipeStore;

#[derive(Parser)]
#[command(name = "recipes")]
#[command(about = "Family recipe database with meal plans and grocery lists")]
struct Cli {
    /// Root directory of the recipe database
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all recipes
    List {
        /// Only show recipes in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show database statistics
    Stats,
    /// List all categories with recipe counts
    Categories,
    /// Generate a meal plan
    Plan {
        /// Number of days to plan
        #[arg(default_value = "7")]
        days: u32,
    },
    /// Generate a grocery list for a meal plan
    Grocery { plan_id: String },
    /// Add a recipe from a JSON file
    Add { json_file: PathBuf },
    /// View recipe details
    View { recipe_id: String },
    /// Search recipes by name, tag or category
    Search { term: String },
    /// Export all recipes to a single JSON file
    Export,
    /// Turn a recipe photo into a draft recipe
    Ingest {
        image: PathBuf,
        /// Photo caption; `recipe: <name>` sets the recipe name
        caption: Option<String>,
    },
}

/// Log to stderr so stdout carries only command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "recipe_keeper=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::resolve(cli.home)?;
    let mut store = RecipeStore::open(config.layout())
        .with_context(|| format!("Failed to open recipe database at {}", config.home.display()))?;

    match command {
        Commands::List { category } => {
            let recipes = store.list(category.as_deref());
            println!("Found {} recipes:", recipes.len());
            print!("{}", render::recipe_list(&recipes));
        }
        Commands::Stats => {
            let stats = store.stats()?;
            print!("{}", render::stats(&stats));
        }
        Commands::Categories => {
            println!("Recipe Categories:");
            for (category, count) in store.category_counts() {
                println!("  {}: {} recipes", category, count);
            }
        }
        Commands::Plan { days } => {
            println!("Generating {}-day meal plan...", days);
            let plan = MealPlanner::new(&store).generate(days, None)?;
            print!("{}", render::meal_plan(&plan));
        }
        Commands::Grocery { plan_id } => {
            println!("Generating grocery list for meal plan {}...", plan_id);
            let list = GroceryAggregator::new(&store).generate(&plan_id)?;
            print!("{}", render::grocery_list(&list));
        }
        Commands::Add { json_file } => {
            let recipe = store
                .add_from_file(&json_file)
                .with_context(|| format!("Error adding recipe from {}", json_file.display()))?;
            println!("Recipe added successfully! ID: {}", recipe.id);
            println!("Name: {}", recipe.name);
        }
        Commands::View { recipe_id } => {
            let recipe = store.require(&recipe_id)?;
            print!("{}", render::recipe_detail(recipe));
        }
        Commands::Search { term } => {
            let results = store.search(&term);
            println!("Found {} recipes matching '{}':", results.len(), term);
            for recipe in results {
                println!("  {} (ID: {})", recipe.name, recipe.id);
            }
        }
        Commands::Export => {
            let export = store.export(&config.export_path)?;
            println!(
                "Exported {} recipes to {}",
                export.total_recipes,
                config.export_path.display()
            );
        }
        Commands::Ingest { image, caption } => {
            let ingestor = Ingestor::new(StubOcr, MockDriveSink);
            let result = ingestor.process_photo(
                &mut store,
                &RecipeAssembler::new(),
                &image,
                caption.as_deref(),
            )?;
            println!("{}", result.summary);
            println!("ID: {}", result.recipe.id);
            println!("{}", result.upload.message);
            if result.needs_review {
                println!("Needs review before use.");
            }
        }
    }

    Ok(())
}
