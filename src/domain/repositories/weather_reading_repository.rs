use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::weather_reading::{NewWeatherReading, WeatherReading},
};

/// History queries return at most this many readings, newest first.
pub const HISTORY_LIMIT: u64 = 30;

#[async_trait]
pub trait WeatherReadingRepository: Send + Sync {
    /// Stages a reading for insertion. Visible to others only after commit
    /// when running inside a transaction.
    async fn add_reading(&self, reading: &NewWeatherReading) -> Result<(), RepositoryError>;

    async fn history(&self) -> Result<Vec<WeatherReading>, RepositoryError>;

    /// Case-insensitive match on the associated city name.
    async fn history_by_city(&self, city_name: &str) -> Result<Vec<WeatherReading>, RepositoryError>;

    async fn history_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherReading>, RepositoryError>;
}
