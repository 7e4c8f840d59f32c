//! Static route and station catalogs.
//!
//! Both catalogs are loaded once from JSON data assets (bundled into the
//! binary, or read from disk) and are immutable afterwards.

mod error;
mod routes;
mod sections;

pub use error::{CatalogError, SearchError};
pub use routes::{OperatorRoutes, RouteCatalog};
pub use sections::{
    ExpandedIds, OperatorStations, RouteStations, SectionRoute, SectionStation,
    StationSearchIndex, expanded_ids,
};
