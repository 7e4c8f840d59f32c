//! Storage keys.

use std::fmt;

/// The fixed set of keys preferences are stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Theme,
    DefaultTheme,
    Category,
    User,
    Introduction,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Theme,
        StorageKey::DefaultTheme,
        StorageKey::Category,
        StorageKey::User,
        StorageKey::Introduction,
    ];

    /// The key as written to the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Theme => "@theme",
            StorageKey::DefaultTheme => "@default_theme",
            StorageKey::Category => "@category",
            StorageKey::User => "@user",
            StorageKey::Introduction => "@introduction",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
