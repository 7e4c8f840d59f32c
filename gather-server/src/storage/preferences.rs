//! Typed access to stored preferences.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::{Category, DEFAULT_MAX_STATIONS, next_sort_index, sort_categories};

use super::StorageKey;
use super::error::StorageError;
use super::store::KeyValueStore;

/// Color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Per-device user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub name: Option<String>,
    pub nearest_station: Option<String>,
    /// Whether the user's origin station is shared with other participants.
    pub visible_station: bool,
    /// Follow the system color scheme instead of the stored theme.
    pub is_default_theme: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: None,
            nearest_station: None,
            visible_station: true,
            is_default_theme: true,
        }
    }
}

/// Typed preferences on top of a [`KeyValueStore`].
///
/// Category mutations read, change and rewrite the whole list while
/// holding `category_lock`, so concurrent mutations never drop each
/// other's writes.
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
    max_category_stations: usize,
    category_lock: Arc<Mutex<()>>,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_category_stations: DEFAULT_MAX_STATIONS,
            category_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Set a custom cap on stations per category.
    pub fn with_max_category_stations(mut self, max: usize) -> Self {
        self.max_category_stations = max;
        self
    }

    pub fn max_category_stations(&self) -> usize {
        self.max_category_stations
    }

    async fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_value(value).map(Some).map_err(|e| {
            warn!(%key, error = %e, "stored preference has unexpected shape");
            StorageError::Decode {
                key,
                message: e.to_string(),
            }
        })
    }

    async fn save_value<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)?;
        self.store.save(key, &value).await
    }

    /// The stored theme, if any.
    pub async fn theme(&self) -> Result<Option<Theme>, StorageError> {
        self.load(StorageKey::Theme).await
    }

    /// Store a theme, or clear it with `None`.
    pub async fn save_theme(&self, theme: Option<Theme>) -> Result<(), StorageError> {
        match theme {
            Some(theme) => self.save_value(StorageKey::Theme, &theme).await,
            None => self.store.delete(StorageKey::Theme).await,
        }
    }

    /// The theme to render with, given the system's current scheme.
    pub async fn effective_theme(&self, system: Theme) -> Result<Theme, StorageError> {
        if self.user_settings().await?.is_default_theme {
            return Ok(system);
        }
        Ok(self.theme().await?.unwrap_or(system))
    }

    pub async fn user_settings(&self) -> Result<UserSettings, StorageError> {
        Ok(self.load(StorageKey::User).await?.unwrap_or_default())
    }

    pub async fn save_user_settings(&self, settings: &UserSettings) -> Result<(), StorageError> {
        self.save_value(StorageKey::User, settings).await
    }

    /// Whether the introduction has been completed.
    pub async fn introduction_done(&self) -> Result<bool, StorageError> {
        Ok(self.load(StorageKey::Introduction).await?.unwrap_or(false))
    }

    pub async fn save_introduction_done(&self, done: bool) -> Result<(), StorageError> {
        self.save_value(StorageKey::Introduction, &done).await
    }

    /// All categories, ordered by sort index.
    pub async fn categories(&self) -> Result<Vec<Category>, StorageError> {
        let mut categories: Vec<Category> =
            self.load(StorageKey::Category).await?.unwrap_or_default();
        sort_categories(&mut categories);
        Ok(categories)
    }

    /// Replace the whole category list.
    pub async fn save_categories(&self, categories: &[Category]) -> Result<(), StorageError> {
        let _guard = self.category_lock.lock().await;
        self.save_value(StorageKey::Category, &categories).await
    }

    /// Insert a new category or replace the one with the same id.
    ///
    /// A category without an id gets a fresh one. New categories get the
    /// next sort index; replacements keep their position.
    pub async fn upsert_category(&self, mut category: Category) -> Result<Category, StorageError> {
        category.validate(self.max_category_stations)?;

        let _guard = self.category_lock.lock().await;
        let mut categories = self.categories().await?;
        if category.id.is_empty() {
            category.id = uuid::Uuid::new_v4().to_string();
        }

        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => {
                category.sort_index = existing.sort_index;
                *existing = category.clone();
            }
            None => {
                category.sort_index = next_sort_index(&categories);
                categories.push(category.clone());
            }
        }

        self.save_value(StorageKey::Category, &categories).await?;
        Ok(category)
    }

    /// Remove a category. Returns whether it existed.
    pub async fn delete_category(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.category_lock.lock().await;
        let mut categories = self.categories().await?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Ok(false);
        }
        self.save_value(StorageKey::Category, &categories).await?;
        Ok(true)
    }

    /// Re-number categories by position in `ids`.
    ///
    /// Categories missing from `ids` keep their relative order after the
    /// listed ones; unknown ids are ignored.
    pub async fn reorder_categories(&self, ids: &[String]) -> Result<Vec<Category>, StorageError> {
        let _guard = self.category_lock.lock().await;
        let mut categories = self.categories().await?;
        categories.sort_by_key(|c| ids.iter().position(|id| *id == c.id).unwrap_or(ids.len()));
        for (i, category) in categories.iter_mut().enumerate() {
            category.sort_index = i as i64;
        }
        self.save_value(StorageKey::Category, &categories).await?;
        Ok(categories)
    }
}
