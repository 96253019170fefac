use async_trait::async_trait;

use crate::domain::{error::RepositoryError, models::city::City};

#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Exact-name lookup.
    async fn find_city(&self, name: &str) -> Result<Option<City>, RepositoryError>;

    /// Inserts a city and returns it with its assigned id.
    async fn add_city(&self, name: &str, country: &str) -> Result<City, RepositoryError>;
}
