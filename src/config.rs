use crate::services::order_lifecycle::TransitionPolicy;
use crate::services::shop_clock::parse_tz_offset;
use chrono::FixedOffset;
use dotenvy::var;
use log::warn;

pub const DEFAULT_CAMPUS_LABEL: &str = "Chandigarh University";

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let database_url = var("DATABASE_URL").expect("DATABASE_URL must be set");
        Self {
            host,
            port,
            database_url,
        }
    }
}

#[derive(Clone)]
pub struct ShopConfig {
    pub tz: FixedOffset,
    pub transition_policy: TransitionPolicy,
    pub campus_label: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            tz: FixedOffset::east_opt(0).expect("fixed offset"),
            transition_policy: TransitionPolicy::Strict,
            campus_label: DEFAULT_CAMPUS_LABEL.to_string(),
        }
    }
}

impl ShopConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let raw_tz = var("SHOP_TZ_OFFSET").unwrap_or_else(|_| "+00:00".to_string());
        let tz = parse_tz_offset(&raw_tz).unwrap_or_else(|| {
            warn!("Invalid SHOP_TZ_OFFSET '{}', defaulting to +00:00", raw_tz);
            defaults.tz
        });

        let transition_policy = match var("ORDER_TRANSITION_POLICY") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}, defaulting to strict", e);
                TransitionPolicy::Strict
            }),
            Err(_) => defaults.transition_policy,
        };

        let campus_label = var("SHOP_CAMPUS_LABEL").unwrap_or(defaults.campus_label);

        Self {
            tz,
            transition_policy,
            campus_label,
        }
    }
}

#[derive(Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_key: String,
    pub bucket_name: String,
    pub public_url: String,
}

impl S3Config {
    pub fn from_env() -> Self {
        let endpoint = var("S3_ENDPOINT").expect("S3_ENDPOINT must be set");
        let region = var("S3_REGION").expect("S3_REGION must be set");
        let access_key_id = var("S3_ACCESS_KEY_ID").expect("S3_ACCESS_KEY_ID must be set");
        let secret_key = var("S3_SECRET_KEY").expect("S3_SECRET_KEY must be set");
        let bucket_name = var("S3_BUCKET_NAME").expect("S3_BUCKET_NAME must be set");
        // Path-style by default: <endpoint>/<bucket>/<key>
        let public_url = var("S3_PUBLIC_URL")
            .unwrap_or_else(|_| format!("{}/{}", endpoint.trim_end_matches('/'), bucket_name));
        Self {
            endpoint,
            region,
            access_key_id,
            secret_key,
            bucket_name,
            public_url,
        }
    }
}
