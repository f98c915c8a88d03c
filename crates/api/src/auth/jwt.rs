//! JWT issuance and validation.
//!
//! Two kinds of HS256 token share one set of standard claims and differ by
//! subject:
//!
//! - **public** (`sub = "public-token"`): no user binding, handed out by
//!   `GET /public`.
//! - **access** (`sub = "access-token"`): issued at login, carries the user's
//!   id, username and date of birth. Only access tokens authenticate
//!   protected routes.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mygram_core::types::{DbId, Timestamp};
use mygram_db::models::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject of tokens issued by the public diagnostic endpoint.
pub const PUBLIC_TOKEN_SUBJECT: &str = "public-token";
/// Subject of tokens issued at login.
pub const ACCESS_TOKEN_SUBJECT: &str = "access-token";
/// Lifetime of every issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

const DEFAULT_ISSUER: &str = "mygram-api";
const DEFAULT_AUDIENCE: &str = "mygram";

/// Registered claims present on every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StandardClaims {
    /// Unique token identifier (UUID v4).
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Not-before time (UTC Unix timestamp).
    pub nbf: i64,
}

/// Claims embedded in an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    #[serde(flatten)]
    pub standard: StandardClaims,
    pub user_id: DbId,
    pub username: String,
    pub date_of_birth: Option<Timestamp>,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Value of the `iss` claim.
    pub issuer: String,
    /// Value of the `aud` claim.
    pub audience: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var        | Required | Default      |
    /// |----------------|----------|--------------|
    /// | `JWT_SECRET`   | **yes**  | --           |
    /// | `JWT_ISSUER`   | no       | `mygram-api` |
    /// | `JWT_AUDIENCE` | no       | `mygram`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into()),
        }
    }

    fn standard_claims(&self, subject: &str) -> StandardClaims {
        let now = Utc::now().timestamp();
        StandardClaims {
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: subject.to_string(),
            exp: now + TOKEN_TTL_SECS,
            iat: now,
            nbf: now,
        }
    }
}

/// Sign any claims payload with HS256.
pub fn issue<C: Serialize>(
    claims: &C,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(), // HS256
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Issue a token with no user binding.
pub fn issue_public_token(config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    issue(&config.standard_claims(PUBLIC_TOKEN_SUBJECT), config)
}

/// Issue an access token for `user`, valid for [`TOKEN_TTL_SECS`].
pub fn issue_access_token(
    user: &User,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AccessClaims {
        standard: config.standard_claims(ACCESS_TOKEN_SUBJECT),
        user_id: user.id,
        username: user.username.clone(),
        date_of_birth: user.date_of_birth,
    };
    issue(&claims, config)
}

/// Validate and decode an access token.
///
/// Checks the signature, `exp`, `nbf`, issuer, audience and that the subject
/// is [`ACCESS_TOKEN_SUBJECT`].
pub fn validate_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_audience(&[config.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
    validation.validate_nbf = true;
    validation.sub = Some(ACCESS_TOKEN_SUBJECT.to_string());

    let token_data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
