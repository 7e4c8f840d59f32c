//! Web layer for the meetup planner.
//!
//! Exposes route lookup, station search, transfer resolution, category
//! management and the remote meetup operations as a JSON API.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
