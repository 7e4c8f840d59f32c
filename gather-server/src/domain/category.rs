//! User-curated station categories and station selection.

use serde::{Deserialize, Serialize};

use super::{DomainError, Station};

/// Maximum number of characters in a category title.
pub const MAX_TITLE_CHARS: usize = 12;

/// Maximum number of `char`s in an icon: one symbol plus an optional
/// variation selector.
const MAX_ICON_CHARS: usize = 2;

/// Default cap on the number of stations in a category.
pub const DEFAULT_MAX_STATIONS: usize = 12;

/// A named set of candidate stations for a meetup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub stations: Vec<Station>,
    pub sort_index: i64,
}

impl Category {
    /// Validate the category against the title/icon/station rules.
    pub fn validate(&self, max_stations: usize) -> Result<(), DomainError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::MissingTitle);
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(DomainError::TitleTooLong {
                max: MAX_TITLE_CHARS,
            });
        }
        if let Some(icon) = &self.icon
            && icon.chars().count() > MAX_ICON_CHARS
        {
            return Err(DomainError::IconTooLong);
        }
        if self.stations.is_empty() {
            return Err(DomainError::NoStations);
        }
        if self.stations.len() > max_stations {
            return Err(DomainError::SelectionFull { max: max_stations });
        }
        Ok(())
    }

    /// The shareable projection: stations reduced to their names.
    pub fn to_visible(&self) -> VisibleCategory {
        VisibleCategory {
            id: self.id.clone(),
            title: self.title.clone(),
            icon: self.icon.clone(),
            station_names: self
                .stations
                .iter()
                .map(|s| s.station_name.clone())
                .collect(),
            sort_index: self.sort_index,
        }
    }
}

/// A category as shared with other participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleCategory {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub station_names: Vec<String>,
    pub sort_index: i64,
}

/// Sort categories by `sort_index` ascending.
pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by_key(|c| c.sort_index);
}

/// Sort index for a newly created category.
///
/// One more than the smallest existing index, or 0 for an empty list.
pub fn next_sort_index(categories: &[Category]) -> i64 {
    categories
        .iter()
        .map(|c| c.sort_index)
        .min()
        .map_or(0, |min| min + 1)
}

/// An ordered selection of stations bounded by a maximum size.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSelection {
    stations: Vec<Station>,
    max_select_size: usize,
}

impl StationSelection {
    /// Create an empty selection.
    pub fn new(max_select_size: usize) -> Self {
        Self {
            stations: Vec::new(),
            max_select_size,
        }
    }

    /// Start from an existing list, e.g. the stations of a category being
    /// edited. Fails if the list already exceeds the limit.
    pub fn with_stations(stations: Vec<Station>, max_select_size: usize) -> Result<Self, DomainError> {
        if stations.len() > max_select_size {
            return Err(DomainError::SelectionFull {
                max: max_select_size,
            });
        }
        Ok(Self {
            stations,
            max_select_size,
        })
    }

    /// Remove the station if selected, otherwise append it.
    ///
    /// Returns `true` if the station is selected afterwards.
    pub fn toggle(&mut self, station: &Station) -> Result<bool, DomainError> {
        if let Some(pos) = self.stations.iter().position(|s| s.same_station(station)) {
            self.stations.remove(pos);
            return Ok(false);
        }
        if self.stations.len() >= self.max_select_size {
            return Err(DomainError::SelectionFull {
                max: self.max_select_size,
            });
        }
        self.stations.push(station.clone());
        Ok(true)
    }

    pub fn contains(&self, station: &Station) -> bool {
        self.stations.iter().any(|s| s.same_station(station))
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn into_stations(self) -> Vec<Station> {
        self.stations
    }
}
