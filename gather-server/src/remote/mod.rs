//! Remote meetup operations.
//!
//! Meetups are created and updated by named functions on a remote
//! backend. Each call POSTs `{"data": request}` to `{base_url}/{name}` and
//! reads the payload back from `{"result": ...}`. No retries are made.

mod client;
mod error;
mod types;

pub use client::{CallableClient, CallableClientConfig};
pub use error::RemoteError;
pub use types::*;
