//! Ingredient search with debounced input.
//!
//! Typing schedules a fetch after a quiet period; each keystroke aborts the
//! previously scheduled one. Navigation parameters, keyboard submit, ingredient
//! chips, pull-to-refresh and retry fetch immediately. Results are committed through the shared lifecycle, so a
//! response for an outdated query never replaces a newer one.

use crate::client::RecipeSource;
use crate::config::{BrowserConfig, POPULAR_INGREDIENTS};
use crate::lifecycle::{FetchState, Lifecycle};
use crate::model::RecipeSummary;
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const SEARCH_ERROR_MESSAGE: &str = "Failed to fetch recipes.";

/// Point-in-time copy of the search screen's query state
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub query: String,
    /// Whether a search has been attempted since the last reset
    pub searched: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub results: Vec<RecipeSummary>,
}

/// What the search screen shows
#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    /// Nothing searched yet; invite the user to type
    Prompt,
    Loading,
    Error { message: String },
    /// A search ran and matched nothing
    NoResults,
    Results(Vec<RecipeSummary>),
}

impl From<FetchState<Vec<RecipeSummary>>> for SearchView {
    fn from(state: FetchState<Vec<RecipeSummary>>) -> Self {
        match state {
            FetchState::Idle => SearchView::Prompt,
            FetchState::Loading => SearchView::Loading,
            FetchState::Error { message } => SearchView::Error { message },
            FetchState::Success(results) if results.is_empty() => SearchView::NoResults,
            FetchState::Success(results) => SearchView::Results(results),
        }
    }
}

struct SearchInner {
    source: Arc<dyn RecipeSource>,
    lifecycle: Lifecycle<Vec<RecipeSummary>>,
    query: Mutex<String>,
    pending: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

impl SearchInner {
    async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let ticket = self.lifecycle.begin();
        debug!("Searching for '{}' (generation {})", query, ticket.generation());
        let result = self.source.search_by_ingredient(query).await;
        self.lifecycle.commit(ticket, result, SEARCH_ERROR_MESSAGE);
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}

/// Search screen controller.
///
/// Methods that schedule work spawn onto the current tokio runtime.
/// Dropping the controller cancels any pending debounce timer.
pub struct SearchController {
    inner: Arc<SearchInner>,
    popular_ingredients: Vec<String>,
}

impl SearchController {
    pub fn new(source: Arc<dyn RecipeSource>, debounce: Duration) -> Self {
        Self {
            inner: Arc::new(SearchInner {
                source,
                lifecycle: Lifecycle::new(),
                query: Mutex::new(String::new()),
                pending: Mutex::new(None),
                debounce,
            }),
            popular_ingredients: POPULAR_INGREDIENTS.iter().map(|i| i.to_string()).collect(),
        }
    }

    pub fn with_config(source: Arc<dyn RecipeSource>, config: &BrowserConfig) -> Self {
        let mut controller = Self::new(source, config.debounce());
        controller.popular_ingredients = config.popular_ingredients.clone();
        controller
    }

    /// First mount. A non-blank navigation parameter seeds the query and is
    /// fetched right away, skipping the debounce.
    pub async fn mount(&self, param: Option<&str>) {
        let initial = param.unwrap_or_default();
        if initial.trim().is_empty() {
            return;
        }

        {
            let mut query = self.inner.query.lock();
            if !query.is_empty() || !self.inner.lifecycle.snapshot().is_idle() {
                return;
            }
            *query = initial.to_string();
        }
        self.inner.cancel_pending();
        self.inner.search(initial).await;
    }

    /// The search field changed
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        if *self.inner.query.lock() == text {
            return;
        }
        self.apply_query(text);
    }

    /// Keyboard submit or an ingredient chip tap: store the text and fetch now.
    /// Any pending debounced fetch is dropped and none is scheduled.
    pub async fn submit(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.cancel_pending();
        *self.inner.query.lock() = text.clone();

        if text.trim().is_empty() {
            self.inner.lifecycle.reset();
            return;
        }
        self.inner.search(&text).await;
    }

    /// Chips to offer while nothing has been searched
    pub fn popular_ingredients(&self) -> &[String] {
        &self.popular_ingredients
    }

    /// The navigation parameter changed after mount
    pub fn navigate(&self, param: Option<&str>) {
        let incoming = param.unwrap_or_default();
        let current = self.inner.query.lock().clone();

        if !incoming.is_empty() && incoming != current {
            self.inner.lifecycle.reset();
            self.apply_query(incoming.to_string());
        } else if incoming.is_empty() && !current.is_empty() {
            self.apply_query(String::new());
        }
    }

    /// Pull-to-refresh: fetch the current query now
    pub async fn refresh(&self) {
        let query = self.inner.query.lock().clone();
        if query.trim().is_empty() {
            return;
        }
        self.inner.cancel_pending();
        self.inner.search(&query).await;
    }

    /// "Try Again" after an error; repeats the current query
    pub async fn retry(&self) {
        self.refresh().await;
    }

    /// Screen is going away: drop the pending timer and ignore late results
    pub fn teardown(&self) {
        self.inner.cancel_pending();
        self.inner.lifecycle.invalidate();
    }

    fn apply_query(&self, text: String) {
        let mut pending = self.inner.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        *self.inner.query.lock() = text.clone();

        if text.trim().is_empty() {
            self.inner.lifecycle.reset();
            return;
        }

        let inner = Arc::clone(&self.inner);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            inner.search(&text).await;
        }));
    }

    pub fn query(&self) -> String {
        self.inner.query.lock().clone()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        let query = self.query();
        let state = self.inner.lifecycle.snapshot();
        SearchSnapshot {
            query,
            searched: !state.is_idle(),
            loading: state.is_loading(),
            error: state.error().map(String::from),
            results: state.value().cloned().unwrap_or_default(),
        }
    }

    pub fn view(&self) -> SearchView {
        self.inner.lifecycle.snapshot().into()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<Vec<RecipeSummary>>> {
        self.inner.lifecycle.subscribe()
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.teardown();
    }
}
