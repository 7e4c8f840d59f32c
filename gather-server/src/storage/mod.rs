//! Local preference storage.
//!
//! Preferences (theme, categories, user settings, introduction flag) live in
//! an opaque key-value store under a small fixed set of keys. Every write
//! replaces the whole value under its key.

mod error;
mod keys;
mod preferences;
mod store;

pub use error::StorageError;
pub use keys::StorageKey;
pub use preferences::{Preferences, Theme, UserSettings};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
