use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{HashedPassword, User},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, name: &str) -> Result<Option<User>, RepositoryError>;

    async fn add_user(
        &self,
        name: &str,
        password_hash: &HashedPassword,
    ) -> Result<User, RepositoryError>;
}
