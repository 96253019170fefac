use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    domain::{
        error::RepositoryError,
        models::weather_reading::{NewWeatherReading, WeatherReading},
        repositories::weather_reading_repository::WeatherReadingRepository,
    },
    infrastructure::queries,
};

/// Connection-bound reading repository backing the history query, which is a
/// pure read and needs no transaction.
#[derive(Clone)]
pub struct PostgresWeatherReadingRepository {
    db: DatabaseConnection,
}

impl PostgresWeatherReadingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WeatherReadingRepository for PostgresWeatherReadingRepository {
    async fn add_reading(&self, reading: &NewWeatherReading) -> Result<(), RepositoryError> {
        queries::add_reading(&self.db, reading).await
    }

    async fn history(&self) -> Result<Vec<WeatherReading>, RepositoryError> {
        queries::history(&self.db).await
    }

    async fn history_by_city(
        &self,
        city_name: &str,
    ) -> Result<Vec<WeatherReading>, RepositoryError> {
        queries::history_by_city(&self.db, city_name).await
    }

    async fn history_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherReading>, RepositoryError> {
        queries::history_by_coordinates(&self.db, latitude, longitude).await
    }
}
