use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::catalog::Dish;

/// A cart line. `price` is the dish price at the moment it was first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub quantity: u32,
}

impl From<&Dish> for CartItem {
    fn from(dish: &Dish) -> Self {
        CartItem {
            id: dish.id,
            name: dish.name.clone(),
            price: dish.price,
            image_url: dish.image_url.clone(),
            quantity: 1,
        }
    }
}
