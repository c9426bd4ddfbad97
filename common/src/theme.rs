//! Light/dark theme preference with write-through persistence.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::StorageError;

/// Storage key holding the persisted preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}

/// Key-value persistence (browser `localStorage` in production).
pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage, used when no persistent backend exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Current theme plus the storage it is persisted to.
#[derive(Debug)]
pub struct ThemeStore<S> {
    theme: Theme,
    storage: S,
}

impl<S: PreferenceStorage> ThemeStore<S> {
    /// Resolve the initial theme: stored value, then OS preference, then light.
    ///
    /// The resolved value is written back so the next start sees it.
    pub fn init(storage: S, os_prefers_dark: Option<bool>) -> Self {
        let stored = match storage.get(THEME_KEY) {
            Ok(v) => v.and_then(|v| v.parse::<Theme>().ok()),
            Err(e) => {
                warn!("Cannot read theme preference: {e}");
                None
            }
        };
        let theme = stored.unwrap_or(match os_prefers_dark {
            Some(true) => Theme::Dark,
            _ => Theme::Light,
        });

        let mut store = ThemeStore { theme, storage };
        store.persist();
        store
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist();
    }

    /// Flip light/dark and return the new value.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // Best-effort: a failed write never changes the in-memory theme.
    fn persist(&mut self) {
        if let Err(e) = self.storage.set(THEME_KEY, self.theme.as_str()) {
            warn!("Could not save theme preference: {e}");
        }
    }
}

/// Inline script that applies the stored (or OS) theme to `<html>` before
/// the first paint, using the same resolution order as [`ThemeStore::init`].
pub fn boot_script() -> String {
    let (light, dark) = (Theme::Light.as_str(), Theme::Dark.as_str());
    format!(
        "(function(){{try{{var t=localStorage.getItem('{THEME_KEY}');\
         if(t!=='{light}'&&t!=='{dark}'){{t=window.matchMedia('(prefers-color-scheme: dark)').matches?'{dark}':'{light}';}}\
         var c=document.documentElement.classList;c.remove('{light}','{dark}');c.add(t);}}catch(e){{}}}})();"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStorage;

    impl PreferenceStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError("quota exceeded".into()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError("quota exceeded".into()))
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ThemeStore::init(MemoryStorage::default(), None).theme(), Theme::Light);
        assert_eq!(ThemeStore::init(MemoryStorage::default(), Some(false)).theme(), Theme::Light);
        assert_eq!(ThemeStore::init(MemoryStorage::default(), Some(true)).theme(), Theme::Dark);
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut store = ThemeStore::init(MemoryStorage::default(), None);
        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(store.storage().get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_stored_value_beats_os_preference_after_reload() {
        let mut store = ThemeStore::init(MemoryStorage::default(), Some(false));
        store.toggle();
        let storage = store.into_storage();

        let reloaded = ThemeStore::init(storage, Some(false));
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_garbage_stored_value_falls_through() {
        let mut storage = MemoryStorage::default();
        storage.set(THEME_KEY, "sepia").unwrap();
        let store = ThemeStore::init(storage, Some(true));
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut store = ThemeStore::init(BrokenStorage, Some(true));
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(store.toggle(), Theme::Light);
    }

    #[test]
    fn test_boot_script_mirrors_store_resolution() {
        let js = boot_script();
        assert!(js.contains("localStorage.getItem('theme')"));
        assert!(js.contains("prefers-color-scheme: dark"));
        assert!(js.contains("c.remove('light','dark')"));
        // Stored value checked before the OS preference.
        assert!(js.find("getItem").unwrap() < js.find("matchMedia").unwrap());
        assert!(!js.contains('\n'));
    }
}
