use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    /// Ordered, never empty. The first tag doubles as the legacy single category.
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl Dish {
    /// Percentage off the original price, only when the dish is actually discounted.
    pub fn discount_percentage(&self) -> Option<u32> {
        discount_percentage(self.price, self.original_price)
    }

    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.iter().any(|c| c == tag)
    }
}

pub fn discount_percentage(price: f64, original_price: Option<f64>) -> Option<u32> {
    let original = original_price?;
    if original > price && original > 0.0 {
        Some((100.0 * (original - price) / original).round() as u32)
    } else {
        None
    }
}

/// Dish as returned to the storefront, with the derived discount attached.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DishView {
    #[serde(flatten)]
    pub dish: Dish,
    pub discount_percentage: Option<u32>,
}

impl From<Dish> for DishView {
    fn from(dish: Dish) -> Self {
        let discount_percentage = dish.discount_percentage();
        DishView {
            dish,
            discount_percentage,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DishFilter {
    pub category: Option<String>,
    pub in_stock_only: bool,
}

/// Fields accepted when creating a dish.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewDish {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DishPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub in_stock: Option<bool>,
}

impl Dish {
    pub fn apply(&mut self, patch: &DishPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = Some(original_price);
        }
        if let Some(categories) = &patch.categories {
            self.categories = categories.clone();
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = Some(image_url.clone());
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
    }
}

/// An image submitted alongside a new dish.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::db::schema::dishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DishRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: String,
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DishRow> for Dish {
    fn from(row: DishRow) -> Self {
        // Rows written before multi-category support only carry `category`.
        let categories = if row.categories.is_empty() {
            vec![row.category]
        } else {
            row.categories
        };
        Dish {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            original_price: row.original_price,
            categories,
            image_url: row.image_url,
            in_stock: row.in_stock,
            created_at: row.created_at,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::dishes)]
pub struct NewDishRow {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: String,
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub in_stock: bool,
}

impl NewDishRow {
    pub fn new(dish: &NewDish, image_url: String) -> Self {
        NewDishRow {
            name: dish.name.clone(),
            description: dish.description.clone(),
            price: dish.price,
            original_price: dish.original_price,
            category: dish.categories.first().cloned().unwrap_or_default(),
            categories: dish.categories.clone(),
            image_url: Some(image_url),
            in_stock: true,
        }
    }
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::db::schema::dishes)]
pub struct DishChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub category: Option<String>,
    pub categories: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub in_stock: Option<bool>,
}

impl From<&DishPatch> for DishChangeset {
    fn from(patch: &DishPatch) -> Self {
        DishChangeset {
            name: patch.name.clone(),
            description: patch.description.clone(),
            price: patch.price,
            original_price: patch.original_price,
            category: patch
                .categories
                .as_ref()
                .and_then(|tags| tags.first().cloned()),
            categories: patch.categories.clone(),
            image_url: patch.image_url.clone(),
            in_stock: patch.in_stock,
        }
    }
}

impl DishChangeset {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.original_price.is_none()
            && self.category.is_none()
            && self.categories.is_none()
            && self.image_url.is_none()
            && self.in_stock.is_none()
    }
}
