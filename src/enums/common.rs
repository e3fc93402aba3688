use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for endpoints that only report success or failure.
#[derive(Serialize, ToSchema)]
pub struct GeneralResponse {
    pub status: String,
    pub error: Option<String>,
}

impl GeneralResponse {
    pub fn ok() -> Self {
        GeneralResponse {
            status: "ok".to_string(),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        GeneralResponse {
            status: "error".to_string(),
            error: Some(message.into()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ShopStatus {
    pub is_open: bool,
}

#[derive(Serialize, ToSchema)]
pub struct ShopStatusResponse {
    pub status: String,
    pub data: ShopStatus,
    pub error: Option<String>,
}
