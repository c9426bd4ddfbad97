//! Best-effort weather lookup (OpenWeatherMap current conditions).
//!
//! Never fails: any error yields [`fallback_reading`].

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{Config, FALLBACK_COORDINATES};
use crate::model::{Coordinates, WeatherReading};

/// Reading shown when the provider cannot be reached.
pub fn fallback_reading() -> WeatherReading {
    WeatherReading {
        place: "Your Location".into(),
        temperature: 25.0,
        feels_like: 27.0,
        humidity: 65,
        wind_speed: 3.5,
        condition: "Clear".into(),
        description: "clear sky".into(),
    }
}

/// Use the located position, or the fixed fallback when geolocation was
/// denied or is unavailable.
pub fn coordinates_or_fallback<E>(located: Result<Coordinates, E>) -> Coordinates {
    located.unwrap_or(FALLBACK_COORDINATES)
}

/// Emoji for an OpenWeatherMap condition group.
pub fn condition_icon(condition: &str) -> &'static str {
    match condition {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Drizzle" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" => "❄️",
        "Mist" | "Fog" => "🌫️",
        _ => "🌤️",
    }
}

// ─── OpenWeatherMap response subset ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OwmResponse {
    #[serde(default)]
    name: String,
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    wind: Option<OwmWind>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    #[serde(default)]
    speed: f64,
}

impl From<OwmResponse> for WeatherReading {
    fn from(r: OwmResponse) -> Self {
        let fallback = fallback_reading();
        let (condition, description) = r
            .weather
            .into_iter()
            .next()
            .map(|c| (c.main, c.description))
            .unwrap_or((fallback.condition, fallback.description));
        WeatherReading {
            place: if r.name.is_empty() { fallback.place } else { r.name },
            temperature: r.main.temp,
            feels_like: r.main.feels_like,
            humidity: r.main.humidity,
            wind_speed: r.wind.map(|w| w.speed).unwrap_or(0.0),
            condition,
            description,
        }
    }
}

/// Parse a provider response body, or `None` when it is not usable.
pub fn parse_reading(body: &str) -> Option<WeatherReading> {
    serde_json::from_str::<OwmResponse>(body)
        .map(WeatherReading::from)
        .map_err(|e| warn!("Unusable weather response: {e}"))
        .ok()
}

// ─── client ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &Config) -> Self {
        WeatherClient {
            client: reqwest::Client::new(),
            base_url: config.weather_url.clone(),
            api_key: config.weather_api_key.clone(),
        }
    }

    fn url(&self, at: Coordinates) -> String {
        format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, at.latitude, at.longitude, self.api_key
        )
    }

    /// Current conditions at `at`, or the fallback reading.
    pub async fn current(&self, at: Coordinates) -> WeatherReading {
        match self.fetch(at).await {
            Some(reading) => {
                debug!("Weather for {}: {:.0}°C", reading.place, reading.temperature);
                reading
            }
            None => fallback_reading(),
        }
    }

    async fn fetch(&self, at: Coordinates) -> Option<WeatherReading> {
        let resp = self
            .client
            .get(self.url(at))
            .send()
            .await
            .map_err(|e| warn!("Weather request failed: {e}"))
            .ok()?;
        if !resp.status().is_success() {
            warn!("Weather provider returned {}", resp.status());
            return None;
        }
        let body = resp
            .text()
            .await
            .map_err(|e| warn!("Cannot read weather response: {e}"))
            .ok()?;
        parse_reading(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::respond_once;

    #[test]
    fn test_parse_provider_body() {
        let body = r#"{
            "name": "Pune",
            "main": {"temp": 31.4, "feels_like": 33.0, "humidity": 48},
            "weather": [{"main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
            "wind": {"speed": 4.1}
        }"#;
        let r = parse_reading(body).unwrap();
        assert_eq!(r.place, "Pune");
        assert_eq!(r.humidity, 48);
        assert_eq!(r.condition, "Clouds");
        assert_eq!(condition_icon(&r.condition), "☁️");
    }

    #[test]
    fn test_missing_wind_and_conditions() {
        let body = r#"{"name":"","main":{"temp":10.0,"feels_like":8.0,"humidity":90}}"#;
        let r = parse_reading(body).unwrap();
        assert_eq!(r.wind_speed, 0.0);
        assert_eq!(r.place, "Your Location");
        assert_eq!(r.description, "clear sky");
    }

    #[test]
    fn test_error_body_is_unusable() {
        assert!(parse_reading(r#"{"cod":401,"message":"Invalid API key"}"#).is_none());
    }

    #[test]
    fn test_denied_geolocation_uses_fallback_coordinates() {
        let at = coordinates_or_fallback::<&str>(Err("denied"));
        assert_eq!(at, FALLBACK_COORDINATES);
    }

    #[tokio::test]
    async fn test_network_failure_yields_fallback_reading() {
        let config = Config {
            weather_url: "http://127.0.0.1:9".into(),
            ..Config::default()
        };
        let reading = WeatherClient::new(&config).current(FALLBACK_COORDINATES).await;
        assert_eq!(reading, fallback_reading());
    }

    #[tokio::test]
    async fn test_rejected_key_yields_fallback_reading() {
        let base = respond_once("401 Unauthorized", r#"{"cod":401,"message":"Invalid API key"}"#).await;
        let config = Config {
            weather_url: base,
            ..Config::default()
        };
        let reading = WeatherClient::new(&config).current(FALLBACK_COORDINATES).await;
        assert_eq!(reading, fallback_reading());
    }

    #[tokio::test]
    async fn test_provider_reading_is_used() {
        let base = respond_once(
            "200 OK",
            r#"{"name":"Nairobi","main":{"temp":22.0,"feels_like":21.0,"humidity":55},"weather":[{"main":"Rain","description":"light rain"}],"wind":{"speed":2.0}}"#,
        )
        .await;
        let config = Config {
            weather_url: base,
            ..Config::default()
        };
        let reading = WeatherClient::new(&config).current(FALLBACK_COORDINATES).await;
        assert_eq!(reading.place, "Nairobi");
        assert_eq!(reading.condition, "Rain");
    }

    #[test]
    fn test_url() {
        let client = WeatherClient::new(&Config::default());
        let url = client.url(Coordinates { latitude: 1.5, longitude: -2.0 });
        assert_eq!(
            url,
            "https://api.openweathermap.org/data/2.5/weather?lat=1.5&lon=-2&appid=demo_key&units=metric"
        );
    }
}
