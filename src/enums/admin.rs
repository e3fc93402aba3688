use crate::models::catalog::NewDish;
use crate::models::orders::{Order, OrderStats, OrderStatus};
use crate::models::revenue::{RangeFilter, RevenueSummary};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub status: String,
    pub token: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct OrdersOverview {
    pub orders: Vec<Order>,
    pub stats: OrderStats,
}

#[derive(Serialize, ToSchema)]
pub struct AllOrdersResponse {
    pub status: String,
    pub data: Option<OrdersOverview>,
    pub error: Option<String>,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Deserialize, IntoParams)]
pub struct RevenueQuery {
    /// One of `last_7_days`, `last_6_months`, `last_1_year`, `custom`.
    pub range: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl RevenueQuery {
    pub fn to_filter(&self) -> Result<RangeFilter, String> {
        match self.range.as_deref().map(str::trim) {
            None | Some("") | Some("last_7_days") => Ok(RangeFilter::Last7Days),
            Some("last_6_months") => Ok(RangeFilter::Last6Months),
            Some("last_1_year") => Ok(RangeFilter::Last1Year),
            Some("custom") => Ok(RangeFilter::Custom {
                start: self.start,
                end: self.end,
            }),
            Some(other) => Err(format!("unknown range '{other}'")),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct RevenueResponse {
    pub status: String,
    pub data: Option<RevenueSummary>,
    pub error: Option<String>,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct SetShopRequest {
    pub is_open: bool,
}

/// Image sent inline as base64 next to the dish fields.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct ImagePayload {
    pub file_name: String,
    pub content_type: String,
    pub data_base64: String,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateDishRequest {
    #[serde(flatten)]
    pub dish: NewDish,
    pub image: Option<ImagePayload>,
}
