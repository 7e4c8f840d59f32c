//! Route name → descriptor lookup.
//!
//! Descriptors come from one table per operator. Tables are probed in a
//! fixed priority order and the first table holding the exact route name
//! wins, so a route name shared by two operators resolves to the
//! higher-priority one.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use tracing::{debug, info};

use crate::domain::{RouteColor, RouteDescriptor};

use super::error::CatalogError;

/// Route color data compiled into the binary.
const BUNDLED_ROUTE_COLORS: &str = include_str!("../../data/route_colors.json");

/// Descriptor as written in the data asset, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDescriptor {
    color: String,
    short_text: String,
}

/// Route entries of one table in file order, duplicates included.
///
/// Deserializing into a `HashMap` would silently keep the last of two
/// equal keys, so entries are collected as a list and checked on build.
#[derive(Debug, Clone, Default)]
struct RawRoutes(Vec<(String, RawDescriptor)>);

impl<'de> Deserialize<'de> for RawRoutes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawRoutes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of route name to descriptor")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawDescriptor>()? {
                    entries.push(entry);
                }
                Ok(RawRoutes(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawOperatorTable {
    operator: String,
    routes: RawRoutes,
}

/// One operator's route table, used to build a [`RouteCatalog`].
#[derive(Debug, Clone)]
pub struct OperatorRoutes {
    pub operator: String,
    pub routes: Vec<(String, RouteDescriptor)>,
}

impl OperatorRoutes {
    pub fn new(operator: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            routes: Vec::new(),
        }
    }

    /// Add a route descriptor.
    pub fn route(mut self, name: impl Into<String>, descriptor: RouteDescriptor) -> Self {
        self.routes.push((name.into(), descriptor));
        self
    }
}

#[derive(Debug, Clone)]
struct OperatorTable {
    operator: String,
    routes: HashMap<String, RouteDescriptor>,
}

/// Immutable route descriptor catalog.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    /// Tables in priority order.
    tables: Vec<OperatorTable>,
}

impl RouteCatalog {
    /// Build a catalog from operator tables given in priority order.
    ///
    /// Fails if a route name appears twice within one table.
    pub fn new(operators: Vec<OperatorRoutes>) -> Result<Self, CatalogError> {
        let mut tables = Vec::with_capacity(operators.len());

        for op in operators {
            let mut routes = HashMap::with_capacity(op.routes.len());
            for (name, descriptor) in op.routes {
                if routes.contains_key(&name) {
                    return Err(CatalogError::DuplicateRoute {
                        operator: op.operator,
                        route: name,
                    });
                }
                routes.insert(name, descriptor);
            }
            tables.push(OperatorTable {
                operator: op.operator,
                routes,
            });
        }

        let catalog = Self { tables };
        debug!(
            operators = catalog.tables.len(),
            routes = catalog.len(),
            "built route catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from the JSON data asset format.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawOperatorTable> = serde_json::from_str(json)?;
        let operators = raw
            .into_iter()
            .map(validate_table)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(operators)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The catalog shipped with the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_ROUTE_COLORS)
    }

    /// Look up the descriptor for a route name.
    ///
    /// A miss is not an error: it means the route has no badge and should
    /// be left out of displays. Misses are logged so gaps in the data can
    /// be found.
    pub fn lookup(&self, route_name: &str) -> Option<&RouteDescriptor> {
        self.lookup_with_operator(route_name).map(|(_, d)| d)
    }

    /// Like [`lookup`](Self::lookup), also returning the operator whose
    /// table matched.
    pub fn lookup_with_operator(&self, route_name: &str) -> Option<(&str, &RouteDescriptor)> {
        let found = self.tables.iter().find_map(|table| {
            table
                .routes
                .get(route_name)
                .map(|d| (table.operator.as_str(), d))
        });
        if found.is_none() {
            info!(route = route_name, "no descriptor for route");
        }
        found
    }

    /// Operator names in priority order.
    pub fn operators(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.operator.as_str())
    }

    /// Total number of descriptors across all tables.
    pub fn len(&self) -> usize {
        self.tables.iter().map(|t| t.routes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|t| t.routes.is_empty())
    }
}

fn validate_table(raw: RawOperatorTable) -> Result<OperatorRoutes, CatalogError> {
    let mut routes = Vec::with_capacity(raw.routes.0.len());

    for (name, desc) in raw.routes.0 {
        let invalid = |message: String| CatalogError::InvalidDescriptor {
            operator: raw.operator.clone(),
            route: name.clone(),
            message,
        };

        let color = RouteColor::parse(&desc.color).map_err(|e| invalid(e.to_string()))?;
        if desc.short_text.trim().is_empty() {
            return Err(invalid("short text must not be empty".to_string()));
        }
        routes.push((name.clone(), RouteDescriptor::new(color, desc.short_text)));
    }

    Ok(OperatorRoutes {
        operator: raw.operator,
        routes,
    })
}
