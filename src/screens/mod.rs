//! Screen controllers driving the fetch lifecycle for each screen.
//!
//! Controllers own their state and publish it; rendering is left to
//! whoever subscribes.

mod detail;
mod home;
mod search;

pub use detail::{DetailController, DetailView, DETAIL_ERROR_MESSAGE};
pub use home::{greeting_for_hour, HomeController, HomeView, HOME_ERROR_MESSAGE};
pub use search::{SearchController, SearchSnapshot, SearchView, SEARCH_ERROR_MESSAGE};

#[cfg(test)]
pub(crate) mod stub {
    use crate::client::RecipeSource;
    use crate::model::{RecipeDetail, RecipeSummary};
    use crate::BrowseError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;

    /// In-memory source that records every call
    #[derive(Default)]
    pub struct StubSource {
        pub searches: Mutex<Vec<String>>,
        pub lookups: Mutex<Vec<String>>,
        pub randoms: Mutex<usize>,
        results: Mutex<HashMap<String, Vec<RecipeSummary>>>,
        details: Mutex<HashMap<String, RecipeDetail>>,
        random: Mutex<Option<RecipeDetail>>,
        failing: Mutex<HashSet<String>>,
        delays: Mutex<HashMap<String, Duration>>,
    }

    impl StubSource {
        pub fn with_results(self, query: &str, names: &[&str]) -> Self {
            let summaries = names
                .iter()
                .enumerate()
                .map(|(i, name)| summary(&format!("{}{}", query, i), name))
                .collect();
            self.results.lock().insert(query.to_string(), summaries);
            self
        }

        pub fn with_detail(self, detail: RecipeDetail) -> Self {
            self.details.lock().insert(detail.id.clone(), detail);
            self
        }

        pub fn with_random(self, detail: RecipeDetail) -> Self {
            *self.random.lock() = Some(detail);
            self
        }

        /// Calls keyed by `key` (query, id, or "random") fail
        pub fn failing(self, key: &str) -> Self {
            self.failing.lock().insert(key.to_string());
            self
        }

        pub fn delayed(self, key: &str, delay: Duration) -> Self {
            self.delays.lock().insert(key.to_string(), delay);
            self
        }

        pub fn recover(&self, key: &str) {
            self.failing.lock().remove(key);
        }

        pub fn searches(&self) -> Vec<String> {
            self.searches.lock().clone()
        }

        async fn settle(&self, key: &str) -> Result<(), BrowseError> {
            let delay = self.delays.lock().get(key).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.failing.lock().contains(key) {
                return Err(serde_json::from_str::<serde_json::Value>("<html>")
                    .unwrap_err()
                    .into());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RecipeSource for StubSource {
        async fn random_recipe(&self) -> Result<Option<RecipeDetail>, BrowseError> {
            *self.randoms.lock() += 1;
            self.settle("random").await?;
            Ok(self.random.lock().clone())
        }

        async fn search_by_ingredient(
            &self,
            ingredient: &str,
        ) -> Result<Vec<RecipeSummary>, BrowseError> {
            self.searches.lock().push(ingredient.to_string());
            self.settle(ingredient).await?;
            Ok(self
                .results
                .lock()
                .get(ingredient)
                .cloned()
                .unwrap_or_default())
        }

        async fn recipe_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, BrowseError> {
            self.lookups.lock().push(id.to_string());
            self.settle(id).await?;
            Ok(self.details.lock().get(id).cloned())
        }
    }

    pub fn summary(id: &str, name: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail: format!("https://img.example/{}.jpg", id),
            category: None,
            area: None,
        }
    }

    pub fn detail(id: &str, name: &str) -> RecipeDetail {
        RecipeDetail {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail: String::new(),
            category: Some("Chicken".to_string()),
            area: Some("Japanese".to_string()),
            instructions: "Preheat oven.\r\nBake.".to_string(),
            ingredients: Vec::new(),
            steps: vec!["Preheat oven.".to_string(), "Bake.".to_string()],
            tags: Vec::new(),
            youtube: None,
            source: None,
        }
    }
}
