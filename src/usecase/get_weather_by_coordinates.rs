use tracing::{error, info};

use crate::{
    domain::{
        error::DomainError,
        repositories::unit_of_work::{TransactionScope, UnitOfWork},
        services::weather_provider::{WeatherProvider, WeatherReport},
    },
    usecase::recording,
};

/// Fetches the current weather for a coordinate pair, persists the reading
/// and returns the report. The whole operation runs inside one transaction;
/// any failure rolls it back and propagates.
pub struct GetWeatherByCoordinates<U: UnitOfWork, W: WeatherProvider> {
    unit_of_work: U,
    provider: W,
}

impl<U: UnitOfWork, W: WeatherProvider> GetWeatherByCoordinates<U, W> {
    pub fn new(unit_of_work: U, provider: W) -> Self {
        Self {
            unit_of_work,
            provider,
        }
    }

    pub async fn execute(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, DomainError> {
        info!(latitude, longitude, "fetching weather by coordinates");

        let tx = self.unit_of_work.begin().await?;

        match self.run(&tx, latitude, longitude).await {
            Ok(report) => {
                tx.commit().await?;
                info!(
                    city = %report.city.name,
                    temperature = report.temperature,
                    "weather by coordinates recorded"
                );
                Ok(report)
            }
            Err(err) => {
                error!(latitude, longitude, %err, "weather by coordinates failed");
                tx.rollback().await?;
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        tx: &U::Tx,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, DomainError> {
        let report = self.provider.fetch_by_coordinates(latitude, longitude).await?;

        let city = recording::resolve_or_create_city(tx, &report.city).await?;
        recording::record_reading(tx, &report, city.as_ref()).await?;

        Ok(report)
    }
}
