use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::ProviderError;

/// City as reported by the provider, already normalized: an unresolvable
/// location carries the `UNKNOWN_LOCATION` sentinel as its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityReport {
    pub name: String,
    pub country: String,
}

/// One weather observation as returned by the provider. `recorded_at` is the
/// wall-clock moment of the call, not a provider timestamp.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub city: CityReport,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub condition: String,
    pub recorded_at: DateTime<Utc>,
}

/// Outbound weather lookup. Implementations must be side-effect free so the
/// caller's retry layer may invoke them repeatedly.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, ProviderError>;

    async fn fetch_by_city(&self, name: &str) -> Result<WeatherReport, ProviderError>;
}
