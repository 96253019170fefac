use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::{
    error::ProviderError,
    models::city::UNKNOWN_LOCATION,
    services::weather_provider::{CityReport, WeatherProvider, WeatherReport},
};

#[derive(Debug, Clone)]
pub struct OpenWeatherSettings {
    pub base_url: String,
    pub api_key: String,
    pub units: String,
    pub lang: String,
}

/// Thin client over the OpenWeather current-weather endpoint. Performs a
/// single GET per call and never retries; the resilience decorator around it
/// owns retry and circuit-breaking policy.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: Client,
    settings: OpenWeatherSettings,
}

impl OpenWeatherClient {
    pub fn new(settings: OpenWeatherSettings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    /// Reachability probe for the health endpoint. Any HTTP response counts
    /// as reachable; only a transport-level failure marks the provider down.
    pub async fn probe(&self) -> bool {
        self.http
            .get(&self.settings.base_url)
            .send()
            .await
            .is_ok()
    }

    /// Issues the GET and returns the raw body on 2xx. `city` carries the
    /// requested name on the by-name path, where a 404 is a business outcome
    /// rather than an infrastructure failure.
    async fn get(
        &self,
        query: &[(&str, String)],
        city: Option<&str>,
    ) -> Result<String, ProviderError> {
        let response = self
            .http
            .get(&self.settings.base_url)
            .query(query)
            .query(&[
                ("appid", self.settings.api_key.as_str()),
                ("units", self.settings.units.as_str()),
                ("lang", self.settings.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            if let Some(name) = city {
                warn!(city = name, "city not found at weather provider");
                return Err(ProviderError::CityNotFound(name.to_string()));
            }
        }

        if !status.is_success() {
            error!(%status, "weather provider request failed");
            return Err(ProviderError::Unavailable(format!(
                "status {status}: {}",
                truncate_body(&body)
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, ProviderError> {
        info!(latitude, longitude, "requesting weather by coordinates");

        let body = self
            .get(
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                ],
                None,
            )
            .await?;

        let payload = parse_payload(&body)?;

        Ok(map_payload(payload, true))
    }

    async fn fetch_by_city(&self, name: &str) -> Result<WeatherReport, ProviderError> {
        info!(city = name, "requesting weather by city name");

        let body = self.get(&[("q", name.to_string())], Some(name)).await?;

        let payload = parse_payload(&body)?;

        Ok(map_payload(payload, false))
    }
}

#[derive(Debug, Deserialize)]
struct OpenWeatherPayload {
    coord: OwCoord,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    sys: OwSys,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

fn parse_payload(body: &str) -> Result<OpenWeatherPayload, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::InvalidPayload(e.to_string()))
}

/// Maps the provider payload to a report stamped with the wall-clock now.
/// On the coordinates path an empty name or country becomes the
/// unknown-location sentinel; the by-name path trusts the provider.
fn map_payload(payload: OpenWeatherPayload, normalize_unknown: bool) -> WeatherReport {
    let name = if normalize_unknown && payload.name.is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        payload.name
    };
    let country = if normalize_unknown && payload.sys.country.is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        payload.sys.country
    };

    let condition = payload
        .weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    WeatherReport {
        city: CityReport { name, country },
        latitude: payload.coord.lat,
        longitude: payload.coord.lon,
        temperature: payload.main.temp,
        temperature_min: payload.main.temp_min,
        temperature_max: payload.main.temp_max,
        condition,
        recorded_at: Utc::now(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let cut: String = body.chars().take(MAX).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}
