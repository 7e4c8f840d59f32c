//! Station type.

use serde::{Deserialize, Serialize};

use super::RouteRef;

/// A physical stop on one primary route, with its transfer options.
///
/// Stations are built from the static topology data and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub company_name: String,
    pub route_name: String,
    pub station_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_hiragana: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub transfers: Vec<RouteRef>,
}

impl Station {
    /// The station's own route as a [`RouteRef`].
    pub fn home_route(&self) -> RouteRef {
        RouteRef::new(&self.company_name, &self.route_name)
    }

    /// The station's own route followed by its transfers.
    pub fn routes(&self) -> Vec<RouteRef> {
        std::iter::once(self.home_route())
            .chain(self.transfers.iter().cloned())
            .collect()
    }

    /// Identity of the station within the catalog: (operator, route, name).
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.company_name, &self.route_name, &self.station_name)
    }

    /// Whether two values refer to the same catalog station.
    pub fn same_station(&self, other: &Station) -> bool {
        self.key() == other.key()
    }
}
