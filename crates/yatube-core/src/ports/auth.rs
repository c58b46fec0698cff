//! Author authentication: bearer tokens and stored password hashes.

use uuid::Uuid;

/// What an access token says about the author presenting it.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    /// `user`, plus `admin` for moderators allowed to edit groups.
    pub roles: Vec<String>,
    pub exp: i64,
}

/// Issues and checks the tokens handed out at registration and login.
pub trait TokenService: Send + Sync {
    fn generate_token(
        &self,
        user_id: Uuid,
        username: &str,
        roles: Vec<String>,
    ) -> Result<String, AuthError>;

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Seconds until a freshly issued token expires; zero if tokens are issued already expired.
    fn expiration_seconds(&self) -> u64;
}

/// Hashes account passwords on registration and checks them on login.
pub trait PasswordService: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// `Ok(false)` for a wrong password.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Unknown username or wrong password")]
    InvalidCredentials,

    #[error("Access token expired")]
    TokenExpired,

    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    #[error("Missing bearer token")]
    MissingAuth,

    #[error("Password hash error: {0}")]
    HashingError(String),
}
