use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::debug;

use crate::{
    domain::{
        error::RepositoryError,
        models::{
            city::City,
            user::{HashedPassword, User},
            weather_reading::{NewWeatherReading, WeatherReading},
        },
        repositories::{
            city_repository::CityRepository,
            unit_of_work::{TransactionScope, UnitOfWork},
            user_repository::UserRepository,
            weather_reading_repository::WeatherReadingRepository,
        },
    },
    infrastructure::queries,
};

#[derive(Clone)]
pub struct PostgresUnitOfWork {
    db: DatabaseConnection,
}

impl PostgresUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    type Tx = PostgresTransaction;

    async fn begin(&self) -> Result<PostgresTransaction, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        debug!("transaction started");

        Ok(PostgresTransaction { txn })
    }
}

/// Repositories bound to one live transaction. The sea-orm transaction rolls
/// back on drop, so an early return via `?` cannot leave writes behind.
pub struct PostgresTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl CityRepository for PostgresTransaction {
    async fn find_city(&self, name: &str) -> Result<Option<City>, RepositoryError> {
        queries::find_city(&self.txn, name).await
    }

    async fn add_city(&self, name: &str, country: &str) -> Result<City, RepositoryError> {
        queries::add_city(&self.txn, name, country).await
    }
}

#[async_trait]
impl WeatherReadingRepository for PostgresTransaction {
    async fn add_reading(&self, reading: &NewWeatherReading) -> Result<(), RepositoryError> {
        queries::add_reading(&self.txn, reading).await
    }

    async fn history(&self) -> Result<Vec<WeatherReading>, RepositoryError> {
        queries::history(&self.txn).await
    }

    async fn history_by_city(
        &self,
        city_name: &str,
    ) -> Result<Vec<WeatherReading>, RepositoryError> {
        queries::history_by_city(&self.txn, city_name).await
    }

    async fn history_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherReading>, RepositoryError> {
        queries::history_by_coordinates(&self.txn, latitude, longitude).await
    }
}

#[async_trait]
impl UserRepository for PostgresTransaction {
    async fn find_user(&self, name: &str) -> Result<Option<User>, RepositoryError> {
        queries::find_user(&self.txn, name).await
    }

    async fn add_user(
        &self,
        name: &str,
        password_hash: &HashedPassword,
    ) -> Result<User, RepositoryError> {
        queries::add_user(&self.txn, name, password_hash).await
    }
}

#[async_trait]
impl TransactionScope for PostgresTransaction {
    async fn commit(self) -> Result<(), RepositoryError> {
        self.txn
            .commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        debug!("transaction committed");

        Ok(())
    }

    async fn rollback(self) -> Result<(), RepositoryError> {
        self.txn
            .rollback()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        debug!("transaction rolled back");

        Ok(())
    }
}
