use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    repositories::{
        city_repository::CityRepository, user_repository::UserRepository,
        weather_reading_repository::WeatherReadingRepository,
    },
};

/// Opens a transaction scoped to one use-case invocation. The handle is
/// passed explicitly into repository calls; it is never ambient state.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Tx: TransactionScope + 'static;

    async fn begin(&self) -> Result<Self::Tx, RepositoryError>;
}

/// A live transaction exposing the repositories bound to it. Dropping a
/// scope without committing rolls the transaction back, so a use case that
/// unwinds with `?` leaves no net changes behind.
#[async_trait]
pub trait TransactionScope:
    CityRepository + WeatherReadingRepository + UserRepository + Send + Sync
{
    async fn commit(self) -> Result<(), RepositoryError>;

    async fn rollback(self) -> Result<(), RepositoryError>;
}
