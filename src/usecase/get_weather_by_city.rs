use tracing::{error, info};

use crate::{
    domain::{
        error::DomainError,
        repositories::unit_of_work::{TransactionScope, UnitOfWork},
        services::weather_provider::{WeatherProvider, WeatherReport},
    },
    usecase::recording,
};

/// Same transactional shape as the coordinates lookup, keyed by city name.
/// A `CityNotFound` from the provider rolls back and propagates untouched.
pub struct GetWeatherByCity<U: UnitOfWork, W: WeatherProvider> {
    unit_of_work: U,
    provider: W,
}

impl<U: UnitOfWork, W: WeatherProvider> GetWeatherByCity<U, W> {
    pub fn new(unit_of_work: U, provider: W) -> Self {
        Self {
            unit_of_work,
            provider,
        }
    }

    pub async fn execute(&self, name: &str) -> Result<WeatherReport, DomainError> {
        info!(city = name, "fetching weather by city name");

        let tx = self.unit_of_work.begin().await?;

        match self.run(&tx, name).await {
            Ok(report) => {
                tx.commit().await?;
                info!(
                    city = %report.city.name,
                    country = %report.city.country,
                    temperature = report.temperature,
                    "weather by city recorded"
                );
                Ok(report)
            }
            Err(err) => {
                error!(city = name, %err, "weather by city failed");
                tx.rollback().await?;
                Err(err)
            }
        }
    }

    async fn run(&self, tx: &U::Tx, name: &str) -> Result<WeatherReport, DomainError> {
        let report = self.provider.fetch_by_city(name).await?;

        let city = recording::resolve_or_create_city(tx, &report.city).await?;
        recording::record_reading(tx, &report, city.as_ref()).await?;

        Ok(report)
    }
}
