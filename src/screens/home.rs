use crate::client::RecipeSource;
use crate::config::BrowserConfig;
use crate::lifecycle::{FetchState, Lifecycle};
use crate::model::RecipeDetail;
use chrono::{Local, Timelike};
use log::info;
use std::sync::Arc;
use tokio::sync::watch;

pub const HOME_ERROR_MESSAGE: &str = "Failed to load recipe";

/// What the home feed shows
#[derive(Debug, Clone, PartialEq)]
pub enum HomeView {
    Loading,
    Error { message: String },
    Recipe(RecipeDetail),
    /// The API answered but had no recipe to suggest
    Empty,
}

/// Home feed: one random recipe suggestion plus category shortcuts
pub struct HomeController {
    source: Arc<dyn RecipeSource>,
    lifecycle: Lifecycle<Option<RecipeDetail>>,
    quick_categories: Vec<String>,
}

impl HomeController {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self::with_config(source, &BrowserConfig::default())
    }

    pub fn with_config(source: Arc<dyn RecipeSource>, config: &BrowserConfig) -> Self {
        Self {
            source,
            lifecycle: Lifecycle::new(),
            quick_categories: config.quick_categories.clone(),
        }
    }

    pub async fn mount(&self) {
        self.load().await;
    }

    /// "Try Again" after an error
    pub async fn retry(&self) {
        self.load().await;
    }

    /// "Surprise Me": pull another random recipe
    pub async fn surprise_me(&self) {
        self.load().await;
    }

    pub async fn refresh(&self) {
        self.load().await;
    }

    async fn load(&self) {
        let ticket = self.lifecycle.begin();
        let result = self.source.random_recipe().await;
        if let Ok(Some(recipe)) = &result {
            info!("Suggesting '{}' ({})", recipe.name, recipe.id);
        }
        self.lifecycle.commit(ticket, result, HOME_ERROR_MESSAGE);
    }

    pub fn view(&self) -> HomeView {
        match self.lifecycle.snapshot() {
            // The feed fetches on mount, so it never rests in idle
            FetchState::Idle | FetchState::Loading => HomeView::Loading,
            FetchState::Error { message } => HomeView::Error { message },
            FetchState::Success(Some(recipe)) => HomeView::Recipe(recipe),
            FetchState::Success(None) => HomeView::Empty,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<Option<RecipeDetail>>> {
        self.lifecycle.subscribe()
    }

    /// Queries the search screen is opened with from the shortcut chips
    pub fn quick_categories(&self) -> &[String] {
        &self.quick_categories
    }

    /// Greeting for the current local time
    pub fn greeting(&self) -> &'static str {
        greeting_for_hour(Local::now().hour())
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good Morning!",
        12..=17 => "Good Afternoon!",
        _ => "Good Evening!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::stub::{detail, StubSource};

    #[tokio::test]
    async fn test_mount_shows_random_recipe() {
        let source = Arc::new(StubSource::default().with_random(detail("52772", "Teriyaki")));
        let home = HomeController::new(source.clone());
        assert_eq!(home.view(), HomeView::Loading);

        home.mount().await;

        match home.view() {
            HomeView::Recipe(recipe) => assert_eq!(recipe.name, "Teriyaki"),
            other => panic!("Expected recipe, got {:?}", other),
        }
        assert_eq!(*source.randoms.lock(), 1);
    }

    #[tokio::test]
    async fn test_no_recipe_is_empty_not_error() {
        let home = HomeController::new(Arc::new(StubSource::default()));
        home.mount().await;
        assert_eq!(home.view(), HomeView::Empty);
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let source = Arc::new(
            StubSource::default()
                .with_random(detail("1", "Soup"))
                .failing("random"),
        );
        let home = HomeController::new(source.clone());

        home.mount().await;
        assert_eq!(
            home.view(),
            HomeView::Error {
                message: HOME_ERROR_MESSAGE.to_string()
            }
        );

        source.recover("random");
        home.retry().await;
        assert!(matches!(home.view(), HomeView::Recipe(_)));
        assert_eq!(*source.randoms.lock(), 2);
    }

    #[tokio::test]
    async fn test_surprise_me_fetches_again() {
        let source = Arc::new(StubSource::default().with_random(detail("1", "Soup")));
        let home = HomeController::new(source.clone());
        home.mount().await;
        home.surprise_me().await;
        home.refresh().await;
        assert_eq!(*source.randoms.lock(), 3);
    }

    #[test]
    fn test_quick_categories_from_config() {
        let config = BrowserConfig {
            quick_categories: vec!["tofu".to_string()],
            ..Default::default()
        };
        let home = HomeController::with_config(Arc::new(StubSource::default()), &config);
        assert_eq!(home.quick_categories(), ["tofu".to_string()]);
        let defaults = HomeController::new(Arc::new(StubSource::default()));
        assert_eq!(defaults.quick_categories().len(), 7);
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(4), "Good Evening!");
        assert_eq!(greeting_for_hour(5), "Good Morning!");
        assert_eq!(greeting_for_hour(11), "Good Morning!");
        assert_eq!(greeting_for_hour(12), "Good Afternoon!");
        assert_eq!(greeting_for_hour(17), "Good Afternoon!");
        assert_eq!(greeting_for_hour(18), "Good Evening!");
        assert_eq!(greeting_for_hour(0), "Good Evening!");
    }
}
