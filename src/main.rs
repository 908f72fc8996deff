use clap::{Parser, Subcommand};
use log::debug;
use mealdb_browse::{
    BrowserConfig, DetailController, DetailView, HomeController, HomeView, MealDbClient,
    RecipeDetail, RecipeSource, RecipeSummary, SearchController, SearchView,
};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "mealdb-browse", version, about = "Browse TheMealDB from the terminal")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Today's inspiration: one random recipe
    Random,
    /// Recipes that use an ingredient
    Search { ingredient: String },
    /// Full recipe with ingredients and steps
    Show { id: String },
    /// Quick category shortcuts for the search screen
    Categories,
    /// Interactive search: each stdin line replaces the query (debounced).
    /// `!text` submits right away, `:r` refreshes, `:q` quits
    Browse,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = BrowserConfig::load()?;
    debug!("{:?}", config);
    let source: Arc<dyn RecipeSource> = Arc::new(MealDbClient::from_config(&config)?);

    match cli.command {
        Command::Random => {
            let home = HomeController::with_config(source, &config);
            home.mount().await;
            println!("{}", home.greeting());
            match home.view() {
                HomeView::Recipe(recipe) => print_detail(&recipe, cli.json)?,
                HomeView::Empty => println!("No recipe available"),
                HomeView::Error { message } => return Err(message.into()),
                HomeView::Loading => {}
            }
        }
        Command::Search { ingredient } => {
            let search = SearchController::with_config(source, &config);
            search.mount(Some(&ingredient)).await;
            print_search(&search.view(), cli.json)?;
        }
        Command::Show { id } => {
            let detail = DetailController::new(source);
            detail.load(&id).await;
            match detail.view() {
                DetailView::Recipe(recipe) => print_detail(&recipe, cli.json)?,
                DetailView::NotFound => println!("Recipe not found"),
                DetailView::Error { message } => return Err(message.into()),
                DetailView::Idle | DetailView::Loading => {}
            }
        }
        Command::Categories => {
            let home = HomeController::with_config(source, &config);
            for category in home.quick_categories() {
                println!("{}", category);
            }
        }
        Command::Browse => browse(source, &config, cli.json).await?,
    }

    Ok(())
}

async fn browse(
    source: Arc<dyn RecipeSource>,
    config: &BrowserConfig,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let search = SearchController::with_config(source, config);
    println!("Popular: {}", search.popular_ingredients().join(", "));

    let mut rx = search.subscribe();
    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let view = SearchView::from(rx.borrow_and_update().clone());
            if let Err(e) = print_search(&view, json) {
                eprintln!("{}", e);
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":q" => break,
            ":r" => search.refresh().await,
            text if text.starts_with('!') => search.submit(&text[1..]).await,
            _ => search.set_query(line.clone()),
        }
    }

    // Let a query typed just before EOF run to completion
    tokio::time::sleep(config.debounce() + Duration::from_millis(50)).await;
    let mut done = search.subscribe();
    done.wait_for(|state| !state.is_loading()).await?;

    search.teardown();
    drop(search);
    printer.await?;
    Ok(())
}

fn print_search(view: &SearchView, json: bool) -> Result<(), Box<dyn Error>> {
    match view {
        SearchView::Prompt => println!("Type an ingredient to search"),
        SearchView::Loading => println!("Searching..."),
        SearchView::Error { message } => println!("{}", message),
        SearchView::NoResults => println!("No recipes found"),
        SearchView::Results(results) if json => {
            println!("{}", serde_json::to_string_pretty(results)?)
        }
        SearchView::Results(results) => {
            println!("Found {} recipes", results.len());
            for recipe in results {
                print_summary(recipe);
            }
        }
    }
    Ok(())
}

fn print_summary(recipe: &RecipeSummary) {
    match &recipe.category {
        Some(category) => println!("  {:>6}  {} [{}]", recipe.id, recipe.name, category),
        None => println!("  {:>6}  {}", recipe.id, recipe.name),
    }
}

fn print_detail(recipe: &RecipeDetail, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
        return Ok(());
    }

    println!("{} (#{})", recipe.name, recipe.id);
    let badges: Vec<&str> = [recipe.category.as_deref(), recipe.area.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !badges.is_empty() {
        println!("{}", badges.join(" · "));
    }

    println!("\nIngredients");
    for ingredient in &recipe.ingredients {
        if ingredient.measure.is_empty() {
            println!("  - {}", ingredient.name);
        } else {
            println!("  - {} {}", ingredient.measure, ingredient.name);
        }
    }

    println!("\nInstructions");
    if recipe.steps.is_empty() {
        println!("  No instructions available for this recipe.");
    }
    for (i, step) in recipe.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    if !recipe.tags.is_empty() {
        println!("\nTags: {}", recipe.tags.join(", "));
    }
    if let Some(link) = &recipe.youtube {
        println!("Video: {}", link);
    }
    Ok(())
}
