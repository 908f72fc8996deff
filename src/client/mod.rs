mod mealdb;

pub use mealdb::{MealDbClient, MealDbClientBuilder};

use crate::model::{RecipeDetail, RecipeSummary};
use crate::BrowseError;
use async_trait::async_trait;

/// Read-only access to a recipe catalogue.
///
/// Every operation performs at most one request. "No match" is a valid
/// answer (`None` or an empty vector); only transport and parse failures
/// are errors.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// A single random recipe, or `None` if the API has nothing to offer
    async fn random_recipe(&self) -> Result<Option<RecipeDetail>, BrowseError>;

    /// All recipes that use `ingredient`
    async fn search_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, BrowseError>;

    /// The recipe with identifier `id`, or `None` if it does not exist
    async fn recipe_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, BrowseError>;
}
