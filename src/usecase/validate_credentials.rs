use tracing::{info, warn};

use crate::domain::{
    error::DomainError, repositories::user_repository::UserRepository,
    services::password_service::PasswordHasher,
};

/// Checks a name/password pair against the store. An unknown name and a
/// wrong password are both plain `Ok(false)` outcomes. Pure read, no
/// transaction.
pub struct ValidateCredentials<R: UserRepository, P: PasswordHasher> {
    users: R,
    password_hasher: P,
}

impl<R: UserRepository, P: PasswordHasher> ValidateCredentials<R, P> {
    pub fn new(users: R, password_hasher: P) -> Self {
        Self {
            users,
            password_hasher,
        }
    }

    pub async fn execute(&self, name: &str, password: &str) -> Result<bool, DomainError> {
        info!(user = name, "validating credentials");

        let Some(user) = self.users.find_user(name).await? else {
            warn!(user = name, "unknown user");
            return Ok(false);
        };

        let valid = self.password_hasher.verify(password, user.password_hash())?;

        if !valid {
            warn!(user = name, "password mismatch");
            return Ok(false);
        }

        info!(user = name, "credentials valid");

        Ok(true)
    }
}
