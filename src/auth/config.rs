use dotenvy::var;

#[derive(Clone)]
pub struct AdminJwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_secs: u64,
}

impl AdminJwtConfig {
    pub fn from_env() -> Self {
        let secret = var("ADMIN_JWT_SECRET").expect("ADMIN_JWT_SECRET must be set");
        let issuer = var("ADMIN_JWT_ISSUER").unwrap_or_else(|_| "srk-house".to_string());
        let audience = var("ADMIN_JWT_AUDIENCE").unwrap_or_else(|_| "admin".to_string());
        // one working shift
        let expiry_secs = var("ADMIN_JWT_EXPIRY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(12 * 60 * 60);
        Self {
            secret,
            issuer,
            audience,
            expiry_secs,
        }
    }
}

/// Everything the admin login and the admin routes need.
#[derive(Clone)]
pub struct AdminAuthConfig {
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub jwt: AdminJwtConfig,
}

impl AdminAuthConfig {
    pub fn from_env() -> Self {
        let username = var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password_hash = var("ADMIN_PASSWORD_HASH").expect("ADMIN_PASSWORD_HASH must be set");
        Self {
            username,
            password_hash,
            jwt: AdminJwtConfig::from_env(),
        }
    }
}
