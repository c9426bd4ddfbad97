//! Configuration – endpoint addresses baked into the bundle at build time.
//!
//! Keys are read through a lookup function so the same parser serves
//! `option_env!` (browser bundle), the process environment (SSR server) and
//! `KEY=VALUE` text.

use std::collections::HashMap;

use tracing::info;

use crate::model::Coordinates;

/// Default prediction service address (local Flask development server).
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
/// Default weather provider.
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org";
/// Placeholder key; the provider rejects it and the widget falls back.
pub const DEFAULT_WEATHER_API_KEY: &str = "demo_key";

/// Coordinate used when geolocation is denied or unavailable (New York City).
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    latitude: 40.7128,
    longitude: -74.0060,
};

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the prediction service, without trailing slash.
    pub api_url: String,
    /// Base URL of the weather provider, without trailing slash.
    pub weather_url: String,
    pub weather_api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.into(),
            weather_url: DEFAULT_WEATHER_URL.into(),
            weather_api_key: DEFAULT_WEATHER_API_KEY.into(),
        }
    }
}

impl Config {
    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let url = |key: &str, default: &str| {
            get(key)
                .unwrap_or_else(|| default.to_string())
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Config {
            api_url: url("AGRIVISION_API_URL", DEFAULT_API_URL),
            weather_url: url("AGRIVISION_WEATHER_URL", DEFAULT_WEATHER_URL),
            weather_api_key: get("AGRIVISION_WEATHER_API_KEY")
                .unwrap_or_else(|| DEFAULT_WEATHER_API_KEY.into()),
        }
    }

    /// Configuration captured from the compiler's environment.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            match key {
                "AGRIVISION_API_URL" => option_env!("AGRIVISION_API_URL"),
                "AGRIVISION_WEATHER_URL" => option_env!("AGRIVISION_WEATHER_URL"),
                "AGRIVISION_WEATHER_API_KEY" => option_env!("AGRIVISION_WEATHER_API_KEY"),
                _ => None,
            }
            .map(String::from)
        })
    }

    /// Configuration from `KEY=VALUE` text (same format as a `.env` file).
    pub fn from_conf_text(text: &str) -> Self {
        let map = parse_conf(text);
        let config = Self::from_lookup(|key| map.get(key).cloned());
        info!("Loaded config (api_url={})", config.api_url);
        config
    }
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
///
/// Lines starting with `#` are comments. Unknown keys are kept and ignored
/// by the caller.
fn parse_conf(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            map.insert(key.to_string(), val.to_string());
        }
    }
    map
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conf() {
        let text = r#"
# comment
AGRIVISION_API_URL="https://api.example.org/"
AGRIVISION_WEATHER_API_KEY=abc123
UNRELATED=1
"#;
        let map = parse_conf(text);
        assert_eq!(map["AGRIVISION_API_URL"], "https://api.example.org/");
        assert_eq!(map["AGRIVISION_WEATHER_API_KEY"], "abc123");
    }

    #[test]
    fn test_conf_text_trims_trailing_slash() {
        let config = Config::from_conf_text("AGRIVISION_API_URL=https://api.example.org/\n");
        assert_eq!(config.api_url, "https://api.example.org");
        assert_eq!(config.weather_url, DEFAULT_WEATHER_URL);
        assert_eq!(config.weather_api_key, DEFAULT_WEATHER_API_KEY);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = Config::from_lookup(|_| Some("  ".into()));
        assert_eq!(config, Config::default());
    }
}
