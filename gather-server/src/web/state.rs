//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::{RouteCatalog, StationSearchIndex};
use crate::remote::CallableClient;
use crate::storage::Preferences;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<S> {
    /// Route colors and badge texts
    pub routes: Arc<RouteCatalog>,

    /// Station sections for search
    pub stations: Arc<StationSearchIndex>,

    /// Stored preferences and categories
    pub preferences: Arc<Preferences<S>>,

    /// Remote meetup functions, when configured
    pub remote: Option<Arc<CallableClient>>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(
        routes: RouteCatalog,
        stations: StationSearchIndex,
        preferences: Preferences<S>,
    ) -> Self {
        Self {
            routes: Arc::new(routes),
            stations: Arc::new(stations),
            preferences: Arc::new(preferences),
            remote: None,
        }
    }

    /// Enable the meetup endpoints through `client`.
    pub fn with_remote(mut self, client: CallableClient) -> Self {
        self.remote = Some(Arc::new(client));
        self
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            routes: Arc::clone(&self.routes),
            stations: Arc::clone(&self.stations),
            preferences: Arc::clone(&self.preferences),
            remote: self.remote.clone(),
        }
    }
}
