//! Operator → route → station catalog and station search.
//!
//! The catalog is built once from per-operator topology data and then only
//! read. Searching returns a pruned copy with the same nesting: routes with
//! no matching station are dropped, then operators with no remaining route.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Station;

use super::error::{CatalogError, SearchError};

/// Station topology data compiled into the binary.
const BUNDLED_STATIONS: &str = include_str!("../../data/stations.json");

/// Upper bound on the compiled size of a search pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// One route file of an operator's topology data.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStations {
    #[serde(rename = "routeNames", alias = "routeName")]
    pub route_name: String,
    #[serde(default)]
    pub stations: Vec<Station>,
}

/// An operator's topology data: its route files in display order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorStations {
    pub company_name: String,
    #[serde(default)]
    pub routes: Vec<RouteStations>,
}

/// Stations of one route within a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRoute {
    pub route_id: String,
    pub route_name: String,
    pub stations: Vec<Station>,
}

/// One operator's routes and stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStation {
    pub company_id: String,
    pub company_name: String,
    pub data: Vec<SectionRoute>,
}

/// Section and route ids to show expanded after a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedIds {
    pub company_ids: Vec<String>,
    pub route_ids: Vec<String>,
}

/// Immutable station catalog supporting search by name or reading.
#[derive(Debug, Clone, Default)]
pub struct StationSearchIndex {
    sections: Vec<SectionStation>,
}

impl StationSearchIndex {
    /// Build the sectioned catalog from operator topology data.
    ///
    /// Operator `i` gets id `company-{i}` and its `j`th route file gets
    /// `route-{i}-{j}`; operators without data are skipped but still use up
    /// their index. A route file keeps only the stations whose own route is
    /// that file's route. Routes left without stations are dropped, so an
    /// empty query always returns the whole catalog.
    pub fn new(operators: Vec<OperatorStations>) -> Self {
        let sections: Vec<SectionStation> = operators
            .into_iter()
            .enumerate()
            .filter_map(|(i, op)| {
                let data: Vec<SectionRoute> = op
                    .routes
                    .into_iter()
                    .enumerate()
                    .filter_map(|(j, file)| {
                        let stations: Vec<Station> = file
                            .stations
                            .into_iter()
                            .filter(|s| s.route_name == file.route_name)
                            .collect();
                        (!stations.is_empty()).then(|| SectionRoute {
                            route_id: format!("route-{i}-{j}"),
                            route_name: file.route_name,
                            stations,
                        })
                    })
                    .collect();

                (!data.is_empty()).then(|| SectionStation {
                    company_id: format!("company-{i}"),
                    company_name: op.company_name,
                    data,
                })
            })
            .collect();

        let index = Self { sections };
        debug!(
            operators = index.sections.len(),
            stations = index.station_count(),
            "built station catalog"
        );
        index
    }

    /// Parse operator topology data from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let operators: Vec<OperatorStations> = serde_json::from_str(json)?;
        Ok(Self::new(operators))
    }

    /// Load operator topology data from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The station catalog shipped with the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_STATIONS)
    }

    /// The full, unfiltered catalog.
    pub fn sections(&self) -> &[SectionStation] {
        &self.sections
    }

    /// Number of stations across all sections.
    pub fn station_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.data)
            .map(|r| r.stations.len())
            .sum()
    }

    /// Find stations whose name or reading matches `query` as a regular
    /// expression.
    ///
    /// An empty query matches every station. A query that is not a valid
    /// pattern yields [`SearchError::InvalidQueryPattern`].
    pub fn search(&self, query: &str) -> Result<Vec<SectionStation>, SearchError> {
        let matcher = RegexBuilder::new(query)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| SearchError::InvalidQueryPattern {
                pattern: query.to_string(),
                message: e.to_string(),
            })?;
        Ok(self.filter(&matcher))
    }

    /// Find stations whose name or reading contains `text` literally.
    pub fn search_literal(&self, text: &str) -> Vec<SectionStation> {
        match Regex::new(&regex::escape(text)) {
            Ok(matcher) => self.filter(&matcher),
            // An escaped literal always compiles
            Err(_) => Vec::new(),
        }
    }

    fn filter(&self, matcher: &Regex) -> Vec<SectionStation> {
        let matches = |s: &Station| {
            matcher.is_match(&s.station_name)
                || matcher.is_match(s.station_hiragana.as_deref().unwrap_or(""))
        };

        self.sections
            .iter()
            .filter_map(|section| {
                let data: Vec<SectionRoute> = section
                    .data
                    .iter()
                    .filter_map(|route| {
                        let stations: Vec<Station> =
                            route.stations.iter().filter(|s| matches(s)).cloned().collect();
                        (!stations.is_empty()).then(|| SectionRoute {
                            route_id: route.route_id.clone(),
                            route_name: route.route_name.clone(),
                            stations,
                        })
                    })
                    .collect();

                (!data.is_empty()).then(|| SectionStation {
                    company_id: section.company_id.clone(),
                    company_name: section.company_name.clone(),
                    data,
                })
            })
            .collect()
    }
}

/// Ids of every section and route in a search result, for display
/// expanded. An empty query expands nothing.
pub fn expanded_ids(query: &str, result: &[SectionStation]) -> ExpandedIds {
    if query.is_empty() {
        return ExpandedIds::default();
    }
    ExpandedIds {
        company_ids: result.iter().map(|s| s.company_id.clone()).collect(),
        route_ids: result
            .iter()
            .flat_map(|s| &s.data)
            .map(|r| r.route_id.clone())
            .collect(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::fixtures::station;
    use proptest::prelude::*;

    /// A catalog of two operators with up to three routes of short names.
    fn catalog() -> impl Strategy<Value = StationSearchIndex> {
        let route = proptest::collection::vec("[abc]{1,4}", 0..5);
        let operator = proptest::collection::vec(route, 0..3);
        proptest::collection::vec(operator, 0..3).prop_map(|ops| {
            let operators = ops
                .into_iter()
                .enumerate()
                .map(|(i, routes)| OperatorStations {
                    company_name: format!("op{i}"),
                    routes: routes
                        .into_iter()
                        .enumerate()
                        .map(|(j, names)| RouteStations {
                            route_name: format!("r{i}{j}"),
                            stations: names
                                .iter()
                                .map(|n| station(&format!("op{i}"), &format!("r{i}{j}"), n, &[]))
                                .collect(),
                        })
                        .collect(),
                })
                .collect();
            StationSearchIndex::new(operators)
        })
    }

    proptest! {
        /// Every returned station matches; every matching station is returned
        #[test]
        fn filter_is_exact(index in catalog(), query in "[abc]{1,2}") {
            let result = index.search(&query).unwrap();

            let returned: Vec<_> = result
                .iter()
                .flat_map(|s| &s.data)
                .flat_map(|r| &r.stations)
                .map(|s| s.key())
                .collect();
            let expected: Vec<_> = index
                .sections()
                .iter()
                .flat_map(|s| &s.data)
                .flat_map(|r| &r.stations)
                .filter(|s| s.station_name.contains(query.as_str()))
                .map(|s| s.key())
                .collect();

            prop_assert_eq!(returned, expected);
            for section in &result {
                prop_assert!(!section.data.is_empty());
                for route in &section.data {
                    prop_assert!(!route.stations.is_empty());
                }
            }
        }

        /// An empty query is the identity
        #[test]
        fn empty_query_identity(index in catalog()) {
            prop_assert_eq!(index.search("").unwrap(), index.sections().to_vec());
        }

        /// Literal and pattern search agree on plain text
        #[test]
        fn literal_matches_plain_pattern(index in catalog(), query in "[abc]{1,3}") {
            prop_assert_eq!(index.search_literal(&query), index.search(&query).unwrap());
        }
    }
}
