/// Authentication service: bcrypt password hashing and the JWT pair that
/// gates the playlist API.
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use watchplan_core::UserId;

/// Issuer claim stamped into every token; verification rejects anything else.
const TOKEN_ISSUER: &str = "watchplan";

pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

/// Claims carried by a watchplan token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User the token was issued for
    pub sub: UserId,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub kind: TokenKind,
}

/// What a token is good for. Access tokens open protected routes; refresh
/// tokens only mint new access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// The access/refresh pair handed out at login.
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in_secs: i64,
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64, refresh_expiration_days: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_ttl: Duration::hours(access_expiration_hours as i64),
            refresh_token_ttl: Duration::days(refresh_expiration_days as i64),
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Issue the token pair returned by a successful login.
    pub fn issue_token_pair(&self, user_id: &UserId) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access, self.access_token_ttl)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh, self.refresh_token_ttl)?,
            expires_in_secs: self.access_token_ttl.num_seconds(),
        })
    }

    /// Issue a fresh access token, as done on refresh.
    pub fn create_access_token(&self, user_id: &UserId) -> Result<String> {
        self.issue(user_id, TokenKind::Access, self.access_token_ttl)
    }

    /// Seconds until a newly issued access token expires.
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.num_seconds()
    }

    /// Verify an access token and return its user.
    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        self.verify_kind(token, TokenKind::Access)
    }

    /// Verify a refresh token and return its user.
    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        self.verify_kind(token, TokenKind::Refresh)
    }

    fn verify_kind(&self, token: &str, kind: TokenKind) -> Result<UserId> {
        let mut validation = Validation::default();
        validation.set_issuer(&[TOKEN_ISSUER]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;
        if claims.kind != kind {
            return Err(ServerError::Auth("Wrong token kind".to_string()));
        }
        Ok(claims.sub)
    }

    fn issue(&self, user_id: &UserId, kind: TokenKind, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
            kind,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(ServerError::from)
    }
}
