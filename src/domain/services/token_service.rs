use crate::domain::error::DomainError;

pub type Token = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub username: String,
    pub role: String,
}

/// Issues and validates the signed tokens handed out at login.
pub trait TokenService: Send + Sync {
    fn issue(&self, username: &str) -> Result<Token, DomainError>;

    fn verify(&self, token: &str) -> Result<TokenClaims, DomainError>;
}
