//! Argon2 hashes stored in `users.password_hash`.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use yatube_core::ports::{AuthError, PasswordService};

/// Hashes author passwords at registration and checks them at login.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(format!("cannot hash password: {e}")))
    }

    /// A wrong password is `Ok(false)`; only an unparsable hash is an error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::HashingError(format!("stored hash is not a PHC string: {e}")))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("war-and-peace-1869").unwrap();

        assert!(service.verify("war-and-peace-1869", &hash).unwrap());
        assert!(!service.verify("anna-karenina", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let service = Argon2PasswordService::new();
        assert_ne!(service.hash("secret-pass").unwrap(), service.hash("secret-pass").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let service = Argon2PasswordService::new();
        assert!(matches!(
            service.verify("anything", "not-a-phc-string"),
            Err(AuthError::HashingError(_))
        ));
    }
}
