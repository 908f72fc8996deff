use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// TheMealDB v1 endpoint with the public test key
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Ingredient chips the search screen offers before anything is searched
pub const POPULAR_INGREDIENTS: &[&str] = &["chicken", "beef", "pasta", "salmon", "rice", "tomato"];

/// Runtime configuration for the client and screen controllers
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Base URL the three endpoints are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Quiet period before a typed search query is fetched, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Optional request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Shortcut queries the home screen offers for the search screen
    #[serde(default = "default_quick_categories")]
    pub quick_categories: Vec<String>,
    /// One-tap searches shown on the search screen until a search runs
    #[serde(default = "default_popular_ingredients")]
    pub popular_ingredients: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            debounce_ms: default_debounce_ms(),
            timeout_secs: None,
            quick_categories: default_quick_categories(),
            popular_ingredients: default_popular_ingredients(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_quick_categories() -> Vec<String> {
    ["chicken", "beef", "pasta", "salmon", "rice", "vegetarian", "dessert"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_popular_ingredients() -> Vec<String> {
    POPULAR_INGREDIENTS.iter().map(|i| i.to_string()).collect()
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEALDB__ prefix
    /// 2. mealdb.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEALDB__DEBOUNCE_MS=250
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Load configuration from `mealdb.toml` and `MEALDB__*` environment variables
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("mealdb").required(false))
        .add_source(
            Environment::with_prefix("MEALDB")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("quick_categories")
                .with_list_parse_key("popular_ingredients")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
