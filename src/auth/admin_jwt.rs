use crate::auth::config::AdminJwtConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, thiserror::Error)]
pub enum AdminJwtError {
    #[error("signing error: {0}")]
    Sign(String),
    #[error("verification error: {0}")]
    Verify(String),
}

#[derive(Serialize, Deserialize)]
struct AdminClaims {
    iss: String,
    aud: String,
    sub: String, // admin username
    iat: u64,
    exp: u64,
}

pub fn issue_admin_jwt(username: &str, cfg: &AdminJwtConfig) -> Result<String, AdminJwtError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AdminJwtError::Sign(e.to_string()))?
        .as_secs();
    let claims = AdminClaims {
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        sub: username.to_string(),
        iat: now,
        exp: now + cfg.expiry_secs,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|e| AdminJwtError::Sign(e.to_string()))
}

/// Returns the admin username carried in a valid token.
pub fn verify_admin_jwt(token: &str, cfg: &AdminJwtConfig) -> Result<String, AdminJwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[cfg.issuer.as_str()]);
    validation.set_audience(&[cfg.audience.as_str()]);
    let data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AdminJwtError::Verify(e.to_string()))?;
    if data.claims.sub.is_empty() {
        return Err(AdminJwtError::Verify("empty sub".to_string()));
    }
    Ok(data.claims.sub)
}
