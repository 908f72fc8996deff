use crate::client::RecipeSource;
use crate::config::{BrowserConfig, DEFAULT_BASE_URL};
use crate::model::{dedup_by_id, MealsEnvelope, RawMeal, RecipeDetail, RecipeSummary};
use crate::BrowseError;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use std::time::Duration;

/// HTTP client for TheMealDB
#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Client against the public API with no request timeout
    pub fn new() -> Result<Self, BrowseError> {
        Self::builder().build()
    }

    /// Creates a new builder for configuring the client
    ///
    /// # Example
    /// ```
    /// use mealdb_browse::MealDbClient;
    /// use std::time::Duration;
    ///
    /// let client = MealDbClient::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> MealDbClientBuilder {
        MealDbClientBuilder::default()
    }

    pub fn from_config(config: &BrowserConfig) -> Result<Self, BrowseError> {
        let mut builder = Self::builder().base_url(config.base_url.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_meals(
        &self,
        endpoint: &str,
        param: Option<&str>,
    ) -> Result<Vec<RawMeal>, BrowseError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} i={:?}", url, param);

        let mut request = self.client.get(&url);
        if let Some(value) = param {
            request = request.query(&[("i", value)]);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let envelope: MealsEnvelope = serde_json::from_str(&body)?;
        let meals = envelope.into_meals();

        debug!("{} returned {} meal(s)", endpoint, meals.len());
        Ok(meals)
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn random_recipe(&self) -> Result<Option<RecipeDetail>, BrowseError> {
        let meals = self.get_meals("random.php", None).await?;
        Ok(meals.into_iter().next().map(RecipeDetail::from))
    }

    async fn search_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, BrowseError> {
        let meals = self.get_meals("filter.php", Some(ingredient)).await?;
        Ok(dedup_by_id(
            meals.into_iter().map(RecipeSummary::from).collect(),
        ))
    }

    async fn recipe_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, BrowseError> {
        let meals = self.get_meals("lookup.php", Some(id)).await?;
        Ok(meals.into_iter().next().map(RecipeDetail::from))
    }
}

/// Builder for [`MealDbClient`]
#[derive(Debug, Default)]
pub struct MealDbClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl MealDbClientBuilder {
    /// Point the client at a different host, e.g. a mock server in tests
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for each request. Without one, requests wait indefinitely.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn build(self) -> Result<MealDbClient, BrowseError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        Url::parse(&base_url).map_err(|e| {
            BrowseError::BuilderError(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        let mut client = Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        Ok(MealDbClient {
            client: client.build()?,
            base_url,
        })
    }
}
