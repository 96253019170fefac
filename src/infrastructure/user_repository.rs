use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    domain::{
        error::RepositoryError,
        models::user::{HashedPassword, User},
        repositories::user_repository::UserRepository,
    },
    infrastructure::queries,
};

/// Connection-bound user repository for the read paths that run outside a
/// transaction (registration pre-check, credential validation).
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_user(&self, name: &str) -> Result<Option<User>, RepositoryError> {
        queries::find_user(&self.db, name).await
    }

    async fn add_user(
        &self,
        name: &str,
        password_hash: &HashedPassword,
    ) -> Result<User, RepositoryError> {
        queries::add_user(&self.db, name, password_hash).await
    }
}
