use crate::models::cart::CartItem;
use crate::models::catalog::DishView;
use crate::models::orders::{CustomerInfo, Order};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams)]
pub struct MenuQuery {
    /// Category tag to filter by; `All` or absent lists everything.
    pub category: Option<String>,
    /// Only dishes currently in stock.
    pub in_stock: Option<bool>,
}

#[derive(Deserialize, IntoParams)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct DishListResponse {
    pub status: String,
    pub data: Vec<DishView>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DishResponse {
    pub status: String,
    pub data: Option<DishView>,
    pub error: Option<String>,
}

/// The client-side cart together with the checkout form.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    pub customer: CustomerInfo,
}

#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    pub status: String,
    pub data: Option<Order>,
    pub error: Option<String>,
}
