pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod screens;
pub mod uniffi_bindings;

pub use client::{MealDbClient, MealDbClientBuilder, RecipeSource};
pub use config::{BrowserConfig, POPULAR_INGREDIENTS};
pub use error::BrowseError;
pub use lifecycle::{FetchState, Lifecycle, Ticket};
pub use model::{split_instructions, Ingredient, RecipeDetail, RecipeSummary};
pub use screens::{
    DetailController, DetailView, HomeController, HomeView, SearchController, SearchSnapshot,
    SearchView,
};

/// Fetch one random recipe from the public API
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// if let Some(recipe) = mealdb_browse::random_recipe().await? {
///     println!("{}: {} steps", recipe.name, recipe.steps.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn random_recipe() -> Result<Option<RecipeDetail>, BrowseError> {
    MealDbClient::new()?.random_recipe().await
}

/// Find recipes that use `ingredient`; empty when nothing matches
pub async fn search_recipes(ingredient: &str) -> Result<Vec<RecipeSummary>, BrowseError> {
    MealDbClient::new()?.search_by_ingredient(ingredient).await
}

/// Look up a recipe by its identifier
pub async fn recipe_by_id(id: &str) -> Result<Option<RecipeDetail>, BrowseError> {
    MealDbClient::new()?.recipe_by_id(id).await
}
