//! UniFFI bindings for mealdb-browse
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;
use std::time::Duration;

use crate::{BrowseError, Ingredient, MealDbClient, RecipeDetail, RecipeSource, RecipeSummary};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe list entry
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    /// Empty string if unknown
    pub category: String,
    /// Empty string if unknown
    pub area: String,
}

impl From<RecipeSummary> for FfiRecipeSummary {
    fn from(summary: RecipeSummary) -> Self {
        FfiRecipeSummary {
            id: summary.id,
            name: summary.name,
            thumbnail: summary.thumbnail,
            category: summary.category.unwrap_or_default(),
            area: summary.area.unwrap_or_default(),
        }
    }
}

/// FFI-compatible ingredient line
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub name: String,
    pub measure: String,
}

impl From<Ingredient> for FfiIngredient {
    fn from(ingredient: Ingredient) -> Self {
        FfiIngredient {
            name: ingredient.name,
            measure: ingredient.measure,
        }
    }
}

/// FFI-compatible full recipe
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeDetail {
    pub summary: FfiRecipeSummary,
    pub ingredients: Vec<FfiIngredient>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
}

impl From<RecipeDetail> for FfiRecipeDetail {
    fn from(detail: RecipeDetail) -> Self {
        FfiRecipeDetail {
            summary: detail.summary().into(),
            ingredients: detail.ingredients.into_iter().map(Into::into).collect(),
            steps: detail.steps,
            tags: detail.tags,
            youtube: detail.youtube,
            source: detail.source,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiBrowseError {
    /// Network or HTTP status failure
    FetchError { message: String },
    /// Malformed API response
    ParseError { message: String },
    /// Client configuration error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiBrowseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiBrowseError::FetchError { message } => write!(f, "Fetch error: {}", message),
            FfiBrowseError::ParseError { message } => write!(f, "Parse error: {}", message),
            FfiBrowseError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiBrowseError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiBrowseError {}

impl From<BrowseError> for FfiBrowseError {
    fn from(err: BrowseError) -> Self {
        match err {
            BrowseError::FetchError(e) => FfiBrowseError::FetchError {
                message: e.to_string(),
            },
            BrowseError::ParseError(e) => FfiBrowseError::ParseError {
                message: e.to_string(),
            },
            BrowseError::BuilderError(msg) => FfiBrowseError::ConfigError { message: msg },
            BrowseError::ConfigError(e) => FfiBrowseError::ConfigError {
                message: e.to_string(),
            },
        }
    }
}

/// Client settings for FFI callers
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiClientConfig {
    /// Optional API base URL (uses TheMealDB if not specified)
    pub base_url: Option<String>,
    /// Optional timeout in seconds (no timeout if not specified)
    pub timeout_seconds: Option<u64>,
}

fn build_client(config: Option<FfiClientConfig>) -> Result<MealDbClient, FfiBrowseError> {
    let config = config.unwrap_or_default();
    let mut builder = MealDbClient::builder();

    if let Some(base_url) = config.base_url {
        builder = builder.base_url(base_url);
    }

    if let Some(timeout_secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }

    Ok(builder.build()?)
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiBrowseError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiBrowseError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Fetch a random recipe
///
/// # Returns
/// `None` when the API has no recipe to offer
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn random_recipe(
    config: Option<FfiClientConfig>,
) -> Result<Option<FfiRecipeDetail>, FfiBrowseError> {
    let client = build_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let recipe = client.random_recipe().await?;
        Ok(recipe.map(Into::into))
    })
}

/// Search recipes by ingredient
///
/// # Arguments
/// * `ingredient` - Free-text ingredient name; blank input returns no results
///   without a request
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_recipes(
    ingredient: String,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiRecipeSummary>, FfiBrowseError> {
    let ingredient = ingredient.trim();
    if ingredient.is_empty() {
        return Ok(Vec::new());
    }

    let client = build_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let results = client.search_by_ingredient(ingredient).await?;
        Ok(results.into_iter().map(Into::into).collect())
    })
}

/// Look up one recipe by id
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn recipe_by_id(
    id: String,
    config: Option<FfiClientConfig>,
) -> Result<Option<FfiRecipeDetail>, FfiBrowseError> {
    let client = build_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let recipe = client.recipe_by_id(&id).await?;
        Ok(recipe.map(Into::into))
    })
}

/// Split an instructions blob into display steps
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_instructions(instructions: String) -> Vec<String> {
    crate::split_instructions(&instructions)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_detail_conversion() {
        let detail = RecipeDetail {
            id: "52772".to_string(),
            name: "Teriyaki Chicken Casserole".to_string(),
            thumbnail: "http://example.com/image.jpg".to_string(),
            category: Some("Chicken".to_string()),
            area: None,
            instructions: "Preheat.\nBake.".to_string(),
            ingredients: vec![Ingredient {
                name: "soy sauce".to_string(),
                measure: "3/4 cup".to_string(),
            }],
            steps: vec!["Preheat.".to_string(), "Bake.".to_string()],
            tags: vec!["Meat".to_string()],
            youtube: None,
            source: None,
        };

        let ffi: FfiRecipeDetail = detail.into();
        assert_eq!(ffi.summary.id, "52772");
        assert_eq!(ffi.summary.category, "Chicken");
        assert_eq!(ffi.summary.area, "");
        assert_eq!(ffi.ingredients[0].measure, "3/4 cup");
        assert_eq!(ffi.steps.len(), 2);
    }

    #[test]
    fn test_error_mapping() {
        let err: FfiBrowseError = BrowseError::BuilderError("bad url".to_string()).into();
        assert!(matches!(err, FfiBrowseError::ConfigError { .. }));
        assert_eq!(err.to_string(), "Config error: bad url");
    }

    #[test]
    fn test_blank_search_skips_request() {
        let config = FfiClientConfig {
            base_url: Some("http://127.0.0.1:9".to_string()),
            timeout_seconds: Some(1),
        };
        let results = search_recipes("  ".to_string(), Some(config)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = FfiClientConfig {
            base_url: Some("::nope::".to_string()),
            timeout_seconds: None,
        };
        let result = recipe_by_id("52772".to_string(), Some(config));
        assert!(matches!(result, Err(FfiBrowseError::ConfigError { .. })));
    }

    #[test]
    fn test_parse_instructions() {
        let steps = parse_instructions("Step one.\r\nStep two.\n\nStep three.".to_string());
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
    }
}
