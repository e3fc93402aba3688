use std::collections::HashMap;
use std::sync::Mutex;

use log::warn;

use crate::models::cart::CartItem;
use crate::models::catalog::Dish;
use crate::traits::CartStorage;

pub const CART_KEY: &str = "cart";

/// Cart persisted as a JSON list under [`CART_KEY`]. Every mutator writes the
/// new list back and returns it.
pub struct CartStore<S: CartStorage> {
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> Vec<CartItem> {
        match self.storage.load(CART_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("cart: discarding unreadable cart: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    pub fn add(&self, dish: &Dish) -> Vec<CartItem> {
        let mut cart = self.get();
        match cart.iter_mut().find(|item| item.id == dish.id) {
            Some(existing) => existing.quantity += 1,
            None => cart.push(CartItem::from(dish)),
        }
        self.save(cart)
    }

    /// Quantities of zero or below drop the line. Unknown ids leave the cart as is.
    pub fn set_quantity(&self, id: i32, quantity: i64) -> Vec<CartItem> {
        let mut cart = self.get();
        if !cart.iter().any(|item| item.id == id) {
            return cart;
        }
        if quantity <= 0 {
            cart.retain(|item| item.id != id);
        } else if let Some(item) = cart.iter_mut().find(|item| item.id == id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.save(cart)
    }

    pub fn remove(&self, id: i32) -> Vec<CartItem> {
        let mut cart = self.get();
        cart.retain(|item| item.id != id);
        self.save(cart)
    }

    pub fn clear(&self) -> Vec<CartItem> {
        self.storage.remove(CART_KEY);
        Vec::new()
    }

    fn save(&self, cart: Vec<CartItem>) -> Vec<CartItem> {
        match serde_json::to_string(&cart) {
            Ok(raw) => self.storage.save(CART_KEY, raw),
            Err(e) => warn!("cart: failed to serialize cart: {}", e),
        }
        cart
    }
}

pub fn total(cart: &[CartItem]) -> f64 {
    cart.iter()
        .map(|item| item.price * item.quantity as f64)
        .sum()
}

pub fn count(cart: &[CartItem]) -> u32 {
    cart.iter().map(|item| item.quantity).sum()
}

#[derive(Default)]
pub struct MemoryCartStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl CartStorage for MemoryCartStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

impl<T: CartStorage> CartStorage for &T {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: String) {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
