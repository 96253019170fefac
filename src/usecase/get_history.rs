use tracing::{debug, info};

use crate::domain::{
    error::DomainError,
    models::weather_reading::WeatherReading,
    repositories::weather_reading_repository::WeatherReadingRepository,
};

/// Mutually exclusive history filters; exclusivity is validated at the
/// HTTP boundary before this use case runs.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryFilter {
    ByCoordinates { latitude: f64, longitude: f64 },
    ByCity(String),
    Unfiltered,
}

/// Read-only query over the persisted readings, capped at the 30 most
/// recent, newest first. Runs outside any transaction.
pub struct GetHistory<R: WeatherReadingRepository> {
    readings: R,
}

impl<R: WeatherReadingRepository> GetHistory<R> {
    pub fn new(readings: R) -> Self {
        Self { readings }
    }

    pub async fn execute(&self, filter: HistoryFilter) -> Result<Vec<WeatherReading>, DomainError> {
        info!(?filter, "querying weather history");

        let readings = match &filter {
            HistoryFilter::ByCoordinates {
                latitude,
                longitude,
            } => {
                self.readings
                    .history_by_coordinates(*latitude, *longitude)
                    .await?
            }
            HistoryFilter::ByCity(name) => self.readings.history_by_city(name).await?,
            HistoryFilter::Unfiltered => self.readings.history().await?,
        };

        debug!(total = readings.len(), "history query finished");

        Ok(readings)
    }
}
