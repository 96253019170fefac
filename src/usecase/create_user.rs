use tracing::{error, info, warn};

use crate::domain::{
    error::DomainError,
    repositories::{
        unit_of_work::{TransactionScope, UnitOfWork},
        user_repository::UserRepository,
    },
    services::password_service::PasswordHasher,
};

/// Registers a new user. A duplicate name is an ordinary `Ok(false)`
/// outcome, not an error; the pre-check lookup is not race-safe and the
/// store-level unique constraint is the final arbiter.
pub struct CreateUser<R: UserRepository, U: UnitOfWork, P: PasswordHasher> {
    users: R,
    unit_of_work: U,
    password_hasher: P,
}

impl<R: UserRepository, U: UnitOfWork, P: PasswordHasher> CreateUser<R, U, P> {
    pub fn new(users: R, unit_of_work: U, password_hasher: P) -> Self {
        Self {
            users,
            unit_of_work,
            password_hasher,
        }
    }

    pub async fn execute(&self, name: &str, password: &str) -> Result<bool, DomainError> {
        info!(user = name, "creating user");

        if self.users.find_user(name).await?.is_some() {
            warn!(user = name, "duplicate user name rejected");
            return Ok(false);
        }

        let password_hash = self.password_hasher.hash(password)?;

        let tx = self.unit_of_work.begin().await?;

        match tx.add_user(name, &password_hash).await {
            Ok(_) => {
                tx.commit().await?;
                info!(user = name, "user created");
                Ok(true)
            }
            Err(err) => {
                error!(user = name, %err, "user creation failed");
                tx.rollback().await?;
                Err(err.into())
            }
        }
    }
}
