//! Credential handling: password hashing and bearer tokens.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::main_lib::AppState;

pub const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
pub const UNAUTHORIZED: &str = "未授权访问";
pub const MIN_SECRET_BYTES: usize = 32;

const INSECURE_DEFAULT_SECRET: &[u8] = b"folioadvisor-insecure-default-secret-do-not-deploy";

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
}

impl AuthConfig {
    /// Builds the config from the raw `FA_JWT_SECRET` value. Without one the
    /// server still starts, signing with a built-in key anyone can read.
    pub fn from_secret(raw: Option<&str>) -> anyhow::Result<Self> {
        let jwt_secret = match raw {
            Some(raw) => decode_secret_key(raw)?,
            None => {
                tracing::warn!(
                    "FA_JWT_SECRET is not set; tokens are signed with an insecure default key"
                );
                INSECURE_DEFAULT_SECRET.to_vec()
            }
        };
        Ok(Self {
            jwt_secret,
            access_token_ttl: TOKEN_TTL,
        })
    }
}

/// Accepts a base64 encoded key or a raw string, either at least 32 bytes long.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    if let Ok(bytes) = BASE64.decode(trimmed) {
        if bytes.len() >= MIN_SECRET_BYTES {
            return Ok(bytes);
        }
    }
    if trimmed.len() >= MIN_SECRET_BYTES {
        return Ok(trimmed.as_bytes().to_vec());
    }
    anyhow::bail!("JWT secret must be at least {MIN_SECRET_BYTES} bytes (raw or base64 encoded)")
}

#[derive(Debug)]
pub enum AuthError {
    Hash(String),
    Sign(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Hash(msg) => write!(f, "Password hashing failed: {msg}"),
            AuthError::Sign(msg) => write!(f, "Failed to sign token: {msg}"),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id, as a decimal string.
    sub: String,
    username: String,
    iat: u64,
    exp: u64,
}

/// The identity a valid bearer token proves. Also the extractor for
/// authenticated routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

pub fn hash_password_blocking(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// False on mismatch and on a stored hash that cannot be parsed.
pub fn verify_password_blocking(password: &str, password_hash: &str) -> bool {
    let parsed = match PasswordHash::new(password_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password hash is unreadable: {}", e);
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password_blocking(&password))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
}

pub async fn verify_password(password: String, password_hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password_blocking(&password, &password_hash))
        .await
        .unwrap_or(false)
}

/// Hash checked against when the username is unknown, so a miss costs the
/// same Argon2 work as a wrong password.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password_blocking("folioadvisor-dummy-password").ok());

/// Burns one password verification and always reports a mismatch.
pub async fn verify_against_dummy(password: String) -> bool {
    tokio::task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            verify_password_blocking(&password, hash);
        }
        false
    })
    .await
    .unwrap_or(false)
}

pub struct CredentialManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl CredentialManager {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            token_ttl: config.access_token_ttl,
        }
    }

    pub fn issue_token(&self, user_id: i64, username: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Sign("system clock is before UNIX_EPOCH".into()))?;
        self.issue_token_at(user_id, username, now.as_secs())
    }

    /// Issues a token as if signed at `issued_at` (seconds since the epoch).
    pub fn issue_token_at(
        &self,
        user_id: i64,
        username: &str,
        issued_at: u64,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: issued_at,
            exp: issued_at + self.token_ttl.as_secs(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Sign(e.to_string()))
    }

    /// `None` for every kind of bad token; the cause is only logged.
    pub fn verify_token(&self, token: &str) -> Option<AuthUser> {
        let data = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("Token rejected: {:?}", e.kind());
                return None;
            }
        };
        let user_id = data.claims.sub.parse::<i64>().ok()?;
        Some(AuthUser {
            user_id,
            username: data.claims.username,
        })
    }

    /// Reads `Authorization: Bearer <token>` and verifies the token.
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<AuthUser> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            return None;
        }
        self.verify_token(token)
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        state
            .credentials
            .authenticate(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized(UNAUTHORIZED.to_string()))
    }
}
