//! Preference Store
//!
//! Theme and animation flags persisted in a key-value storage. The browser
//! build plugs in `localStorage`; native code and tests use [`MemoryStore`].

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Storage key for the theme
pub const THEME_KEY: &str = "theme";

/// Storage key for the animations flag (`"true"` / `"false"`)
pub const ANIMATIONS_KEY: &str = "animations-enabled";

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Theme selected by a dark-mode checkbox
    pub fn from_dark_checked(checked: bool) -> Self {
        if checked {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Snapshot of all user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub animations_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            animations_enabled: true,
        }
    }
}

/// Minimal string key-value storage
///
/// Writes are best-effort: a storage that rejects a write (quota, private
/// mode) leaves the in-memory state authoritative for the session.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Typed access to the persisted preferences
#[derive(Debug)]
pub struct PreferenceStore<S> {
    storage: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persisted theme, `Light` when missing or unreadable
    pub fn theme(&self) -> Theme {
        self.storage
            .get(THEME_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.storage.set(THEME_KEY, theme.as_str());
    }

    /// Animations flag, enabled unless explicitly stored as `"false"`
    pub fn animations_enabled(&self) -> bool {
        self.storage
            .get(ANIMATIONS_KEY)
            .map(|raw| raw != "false")
            .unwrap_or(true)
    }

    pub fn set_animations_enabled(&self, enabled: bool) {
        self.storage
            .set(ANIMATIONS_KEY, if enabled { "true" } else { "false" });
    }

    pub fn load(&self) -> Preferences {
        Preferences {
            theme: self.theme(),
            animations_enabled: self.animations_enabled(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        assert_eq!(prefs.load(), Preferences::default());
    }

    #[test]
    fn test_theme_persists_as_string() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        prefs.set_theme(Theme::Dark);
        assert_eq!(prefs.storage().get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_animations_flag_round_trip() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        prefs.set_animations_enabled(false);
        assert_eq!(prefs.storage().get(ANIMATIONS_KEY).as_deref(), Some("false"));
        assert!(!prefs.animations_enabled());

        prefs.set_animations_enabled(true);
        assert!(prefs.animations_enabled());
    }

    #[test]
    fn test_garbage_theme_falls_back_to_light() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "solarized");
        let prefs = PreferenceStore::new(store);
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(" Dark ".parse::<Theme>(), Ok(Theme::Dark));
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
