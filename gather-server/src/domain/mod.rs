//! Domain types for the meetup planner.
//!
//! This module contains the validated value types shared by the catalog,
//! transfer resolution, storage and remote layers. Types that carry an
//! invariant enforce it at construction time.

mod category;
mod color;
mod error;
mod meetup;
mod route;
mod station;

pub use category::{
    Category, DEFAULT_MAX_STATIONS, MAX_TITLE_CHARS, StationSelection, VisibleCategory,
    next_sort_index, sort_categories,
};
pub use color::{InvalidColor, RouteColor};
pub use error::DomainError;
pub use meetup::{Arrival, ArrivalSummary, Meetup, RouteLeg, UserRoute, sort_by_recent};
pub use route::{RouteDescriptor, RouteRef};
pub use station::Station;

#[cfg(test)]
pub(crate) use station::fixtures;
