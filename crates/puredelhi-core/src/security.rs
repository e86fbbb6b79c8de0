use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::{DashboardError, Result};
use crate::types::User;

/// Identity attached to a request after token validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    name: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Argon2 password hashing in PHC string format.
pub struct PasswordManager {
    argon2: Argon2<'static>,
}

impl Default for PasswordManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordManager {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DashboardError::CryptographicFailure(e.to_string()))?;
        Ok(hash.to_string())
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DashboardError::CryptographicFailure(e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// HS256 JWT issue/validate for the auth endpoints.
pub struct JwtManager {
    config: AuthConfig,
}

impl JwtManager {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::hours(self.config.jwt_expiry_hours as i64);
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(self.config.jwt_secret.expose_secret().as_bytes());
        encode(&header, &claims, &key)
            .map_err(|e| DashboardError::TokenGeneration(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthContext> {
        use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

        let key = DecodingKey::from_secret(self.config.jwt_secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &key, &validation)
            .map_err(|_| DashboardError::InvalidCredentials)?;
        let claims = token_data.claims;

        Ok(AuthContext {
            user_id: Uuid::parse_str(&claims.sub)
                .map_err(|_| DashboardError::InvalidCredentials)?,
            email: claims.email,
            name: claims.name,
            role: claims.role,
            issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or_default(),
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_default(),
        })
    }
}

/// Structured security event logging.
#[derive(Debug, Clone)]
pub enum SecurityEvent {
    SignupSuccess { user_id: Uuid, email: String },
    SignupRejected { email: String, reason: String },
    LoginSuccess { user_id: Uuid, email: String },
    LoginFailure { email: String },
    TokenRejected { reason: String },
}

pub struct SecurityLogger;

impl SecurityLogger {
    pub fn log_event(event: SecurityEvent) {
        use tracing::{info, warn};

        match event {
            SecurityEvent::SignupSuccess { user_id, email } => {
                info!(user_id = %user_id, email = %email, "Signup success");
            }
            SecurityEvent::SignupRejected { email, reason } => {
                warn!(email = %email, reason = %reason, "Signup rejected");
            }
            SecurityEvent::LoginSuccess { user_id, email } => {
                info!(user_id = %user_id, email = %email, "Login success");
            }
            SecurityEvent::LoginFailure { email } => {
                warn!(email = %email, "Login failure");
            }
            SecurityEvent::TokenRejected { reason } => {
                warn!(reason = %reason, "Token rejected");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "citizen@delhi.in".into(),
            name: "Test Citizen".into(),
            password_hash: String::new(),
            role: "citizen".into(),
            created_at: Utc::now(),
        }
    }

    fn test_auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::from("unit-test-secret-which-is-long-enough-0001"),
            jwt_expiry_hours: 24,
        }
    }

    #[test]
    fn password_hash_round_trip() {
        let manager = PasswordManager::new();
        let hash = manager.hash_password("hunter2delhi").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(manager.verify_password("hunter2delhi", &hash).unwrap());
        assert!(!manager.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let manager = PasswordManager::new();
        let a = manager.hash_password("same-password").unwrap();
        let b = manager.hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn token_round_trip() {
        let user = test_user();
        let manager = JwtManager::new(test_auth_config());

        let token = manager.issue_token(&user).unwrap();
        let context = manager.validate_token(&token).unwrap();

        assert_eq!(context.user_id, user.id);
        assert_eq!(context.email, user.email);
        assert_eq!(context.role, "citizen");
        assert!(context.expires_at > context.issued_at);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let user = test_user();
        let manager = JwtManager::new(test_auth_config());
        let other = JwtManager::new(AuthConfig {
            jwt_secret: SecretString::from("a-completely-different-secret-string-0002"),
            jwt_expiry_hours: 24,
        });

        let token = other.issue_token(&user).unwrap();
        assert!(manager.validate_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let manager = JwtManager::new(test_auth_config());
        assert!(manager.validate_token("not.a.jwt").is_err());
    }
}
