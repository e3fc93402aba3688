use std::sync::Arc;

use log::{info, warn};

use crate::models::catalog::{Dish, DishFilter, DishPatch, ImageUpload, NewDish, NewDishRow};
use crate::models::shop::ShopSettings;
use crate::services::errors::ShopError;
use crate::traits::{DishStore, ImageKey, ImageStore, ShopSettingsStore};

pub const ALL_CATEGORIES: &str = "All";
pub const FEATURED_LIMIT: usize = 6;

/// Menu management plus the open/closed switch of the shop.
#[derive(Clone)]
pub struct Catalog {
    dishes: Arc<dyn DishStore>,
    shop: Arc<dyn ShopSettingsStore>,
    images: Arc<dyn ImageStore>,
}

impl Catalog {
    pub fn new(
        dishes: Arc<dyn DishStore>,
        shop: Arc<dyn ShopSettingsStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            dishes,
            shop,
            images,
        }
    }

    pub fn list_dishes(&self, filter: &DishFilter) -> Result<Vec<Dish>, ShopError> {
        let category = filter
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

        Ok(self
            .dishes
            .list_dishes()?
            .into_iter()
            .filter(|dish| !filter.in_stock_only || dish.in_stock)
            .filter(|dish| category.map_or(true, |tag| dish.has_category(tag)))
            .collect())
    }

    pub fn featured_dishes(&self, limit: usize) -> Result<Vec<Dish>, ShopError> {
        let filter = DishFilter {
            category: None,
            in_stock_only: true,
        };
        let mut dishes = self.list_dishes(&filter)?;
        dishes.truncate(limit);
        Ok(dishes)
    }

    pub fn get_dish(&self, id: i32) -> Result<Dish, ShopError> {
        Ok(self.dishes.get_dish(id)?)
    }

    pub fn update_dish(&self, id: i32, patch: &DishPatch) -> Result<Dish, ShopError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(ShopError::missing("name"));
            }
        }
        if let Some(categories) = &patch.categories {
            if categories.iter().all(|c| c.trim().is_empty()) {
                return Err(ShopError::missing("categories"));
            }
        }
        if let Some(price) = patch.price {
            if !valid_price(price) {
                return Err(ShopError::missing("price"));
            }
        }
        let dish = self.dishes.update_dish(id, patch)?;
        info!("update_dish: dish {} ({}) updated", dish.id, dish.name);
        Ok(dish)
    }

    /// Flips the stock flag and returns the dish as stored afterwards.
    pub fn toggle_stock(&self, id: i32) -> Result<Dish, ShopError> {
        let current = self.dishes.get_dish(id)?;
        let patch = DishPatch {
            in_stock: Some(!current.in_stock),
            ..Default::default()
        };
        let dish = self.dishes.update_dish(id, &patch)?;
        info!(
            "toggle_stock: dish {} is now {}",
            dish.id,
            if dish.in_stock { "in stock" } else { "out of stock" }
        );
        Ok(dish)
    }

    pub fn delete_dish(&self, id: i32) -> Result<Dish, ShopError> {
        let dish = self.dishes.delete_dish(id)?;
        info!("delete_dish: dish {} ({}) deleted", dish.id, dish.name);
        Ok(dish)
    }

    /// Validates the form, uploads the image, then stores the dish in stock.
    /// Nothing is stored when the upload fails.
    pub async fn add_dish(
        &self,
        dish: NewDish,
        image: Option<ImageUpload>,
    ) -> Result<Dish, ShopError> {
        let dish = normalize_new_dish(dish)?;
        let image = image
            .filter(|img| !img.bytes.is_empty())
            .ok_or_else(|| ShopError::missing("image"))?;

        let key = image.image_key();
        let image_url = self
            .images
            .upload_image(&key, &image.content_type, image.bytes)
            .await
            .map_err(|e| {
                warn!("add_dish: upload of {} failed: {}", key, e);
                ShopError::from(e)
            })?;

        let stored = self.dishes.insert_dish(NewDishRow::new(&dish, image_url))?;
        info!("add_dish: dish {} ({}) added", stored.id, stored.name);
        Ok(stored)
    }

    /// Returns the settings row, creating it open when the table is empty.
    pub fn get_or_bootstrap(&self) -> Result<ShopSettings, ShopError> {
        match self.shop.get_shop_settings()? {
            Some(settings) => Ok(settings),
            None => {
                info!("get_or_bootstrap: no shop settings yet, creating open shop");
                Ok(self.shop.insert_shop_settings(true)?)
            }
        }
    }

    /// Reports the shop as open when the settings cannot be read.
    pub fn is_shop_open(&self) -> bool {
        match self.get_or_bootstrap() {
            Ok(settings) => settings.is_open,
            Err(e) => {
                warn!("is_shop_open: settings unavailable, assuming open: {}", e);
                true
            }
        }
    }

    pub fn set_shop_open(&self, is_open: bool) -> Result<ShopSettings, ShopError> {
        let current = self.get_or_bootstrap()?;
        let settings = self.shop.update_shop_settings(current.id, is_open)?;
        info!(
            "set_shop_open: shop is now {}",
            if settings.is_open { "open" } else { "closed" }
        );
        Ok(settings)
    }
}

pub(crate) fn valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

fn normalize_new_dish(dish: NewDish) -> Result<NewDish, ShopError> {
    let name = dish.name.trim().to_string();
    if name.is_empty() {
        return Err(ShopError::missing("name"));
    }
    let categories: Vec<String> = dish
        .categories
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if categories.is_empty() {
        return Err(ShopError::missing("categories"));
    }
    if !valid_price(dish.price) {
        return Err(ShopError::missing("price"));
    }
    let description = dish
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(NewDish {
        name,
        description,
        price: dish.price,
        original_price: dish.original_price.filter(|p| valid_price(*p)),
        categories,
    })
}
