//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::{ExpandedIds, SectionStation};
use crate::domain::{Category, RouteDescriptor, RouteRef, Station};
use crate::transfers::{TransferBadges, TransferModel};

/// Descriptor lookup result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLookupResponse {
    /// Operator whose table matched first
    pub operator: String,

    pub route_name: String,

    #[serde(flatten)]
    pub descriptor: RouteDescriptor,
}

/// Query for station search.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Pattern matched against station names and readings
    #[serde(default)]
    pub q: String,

    /// Match `q` as plain text instead of a pattern
    #[serde(default)]
    pub literal: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSearchResponse {
    pub sections: Vec<SectionStation>,

    /// Sections to show expanded
    pub expanded: ExpandedIds,
}

/// Request to resolve a list of transfers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub routes: Vec<RouteRef>,

    pub home_company: Option<String>,

    pub home_route: Option<String>,

    /// Number of badges before overflow (defaults to 3)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    /// Resolved routes in display order
    pub routes: Vec<RouteRef>,

    /// Resolved routes grouped by operator
    pub companies: Vec<TransferModel>,

    pub badges: TransferBadges,
}

/// A category as submitted by a client.
///
/// Without an id a new category is created; the sort index is always
/// assigned by the server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    #[serde(default)]
    pub id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub icon: Option<String>,

    pub stations: Vec<Station>,
}

impl From<CategoryInput> for Category {
    fn from(input: CategoryInput) -> Self {
        Category {
            id: input.id.unwrap_or_default(),
            title: input.title,
            icon: input.icon,
            stations: input.stations,
            sort_index: 0,
        }
    }
}

/// New category order.
#[derive(Debug, Deserialize)]
pub struct CategoryOrderRequest {
    pub ids: Vec<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
