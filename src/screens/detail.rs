use crate::client::RecipeSource;
use crate::lifecycle::{FetchState, Lifecycle};
use crate::model::RecipeDetail;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

pub const DETAIL_ERROR_MESSAGE: &str = "Failed to fetch recipe details.";

/// What the detail screen shows
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    /// No recipe id was supplied
    Idle,
    Loading,
    Error { message: String },
    NotFound,
    Recipe(RecipeDetail),
}

/// Detail screen for a single recipe, keyed by the id it was opened with
pub struct DetailController {
    source: Arc<dyn RecipeSource>,
    lifecycle: Lifecycle<Option<RecipeDetail>>,
    id: Mutex<Option<String>>,
}

impl DetailController {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self {
            source,
            lifecycle: Lifecycle::new(),
            id: Mutex::new(None),
        }
    }

    /// Open (or re-open) the screen for `id`. A blank id leaves it idle.
    pub async fn load(&self, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            *self.id.lock() = None;
            self.lifecycle.reset();
            return;
        }

        *self.id.lock() = Some(id.to_string());
        self.fetch(id).await;
    }

    /// Fetch the current id again
    pub async fn retry(&self) {
        let id = self.id.lock().clone();
        if let Some(id) = id {
            self.fetch(&id).await;
        }
    }

    async fn fetch(&self, id: &str) {
        let ticket = self.lifecycle.begin();
        let result = self.source.recipe_by_id(id).await;
        self.lifecycle.commit(ticket, result, DETAIL_ERROR_MESSAGE);
    }

    pub fn id(&self) -> Option<String> {
        self.id.lock().clone()
    }

    pub fn view(&self) -> DetailView {
        match self.lifecycle.snapshot() {
            FetchState::Idle => DetailView::Idle,
            FetchState::Loading => DetailView::Loading,
            FetchState::Error { message } => DetailView::Error { message },
            FetchState::Success(None) => DetailView::NotFound,
            FetchState::Success(Some(recipe)) => DetailView::Recipe(recipe),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<Option<RecipeDetail>>> {
        self.lifecycle.subscribe()
    }
}
