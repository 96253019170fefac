use std::{net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;

use crate::infrastructure::{
    jwt_token_service::JwtSettings, open_weather_client::OpenWeatherSettings,
    resilient_provider::ResilienceSettings,
};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_UNITS: &str = "metric";
const DEFAULT_LANG: &str = "en";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Fully resolved runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub open_weather: OpenWeatherSettings,
    pub jwt: JwtSettings,
    pub resilience: ResilienceSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ResilienceSettings::default();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            listen_addr: parsed("LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?,
            open_weather: OpenWeatherSettings {
                base_url: optional("OPENWEATHER_BASE_URL", DEFAULT_OPENWEATHER_BASE_URL),
                api_key: required("OPENWEATHER_API_KEY")?,
                units: optional("OPENWEATHER_UNITS", DEFAULT_UNITS),
                lang: optional("OPENWEATHER_LANG", DEFAULT_LANG),
            },
            jwt: JwtSettings {
                key: required("JWT_KEY")?,
                issuer: required("JWT_ISSUER")?,
                audience: required("JWT_AUDIENCE")?,
            },
            resilience: ResilienceSettings {
                max_attempts: parsed("PROVIDER_MAX_ATTEMPTS", &defaults.max_attempts.to_string())?,
                retry_base_delay: Duration::from_millis(parsed(
                    "PROVIDER_RETRY_BASE_MS",
                    &defaults.retry_base_delay.as_millis().to_string(),
                )?),
                circuit_threshold: parsed(
                    "PROVIDER_CIRCUIT_THRESHOLD",
                    &defaults.circuit_threshold.to_string(),
                )?,
                circuit_open_for: Duration::from_secs(parsed(
                    "PROVIDER_CIRCUIT_OPEN_SECS",
                    &defaults.circuit_open_for.as_secs().to_string(),
                )?),
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    dotenvy::var(name).map_err(|_| ConfigError::Missing(name))
}

fn optional(name: &'static str, default: &str) -> String {
    dotenvy::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let raw = optional(name, default);
    raw.parse()
        .map_err(|_| ConfigError::Invalid { name, value: raw })
}
