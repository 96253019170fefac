use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    services::token_service::{Token, TokenClaims, TokenService},
};

const TOKEN_VALIDITY_HOURS: i64 = 3;
const USER_ROLE: &str = "User";

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub key: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    role: String,
    iss: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
pub struct JwtTokenService {
    settings: JwtSettings,
}

impl JwtTokenService {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, username: &str) -> Result<Token, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_owned(),
            name: username.to_owned(),
            role: USER_ROLE.to_owned(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.settings.key.as_bytes()),
        )
        .map_err(|err| DomainError::Token(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, DomainError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.settings.issuer]);
        validation.set_audience(&[&self.settings.audience]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.key.as_bytes()),
            &validation,
        )
        .map_err(|err| DomainError::Token(err.to_string()))?;

        Ok(TokenClaims {
            username: data.claims.sub,
            role: data.claims.role,
        })
    }
}
