use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::ShopConfig;
use crate::models::cart::CartItem;
use crate::models::orders::{
    AddressDelivery, CustomerInfo, Delivery, DeliveryType, Order, OrderLine, OrderStats,
    OrderStatus, UniversityDelivery,
};
use crate::services::cart::{self, CartStore};
use crate::services::catalog::valid_price;
use crate::services::errors::ShopError;
use crate::services::notifications::StatusNotice;
use crate::services::shop_clock::ShopClock;
use crate::traits::{CartStorage, Notifier, OrderStore, ShopSettingsStore};

pub const ORDER_ID_PREFIX: &str = "SRK";

/// How status changes are checked before they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Only forward moves along the order state machine.
    #[default]
    Strict,
    /// Any status may follow any status (manual correction by staff).
    Unrestricted,
}

impl TransitionPolicy {
    pub fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
        match self {
            TransitionPolicy::Strict => from == to || from.successors().contains(&to),
            TransitionPolicy::Unrestricted => true,
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(TransitionPolicy::Strict),
            "unrestricted" | "open" => Ok(TransitionPolicy::Unrestricted),
            other => Err(format!("unknown transition policy '{other}'")),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionPolicy::Strict => f.write_str("strict"),
            TransitionPolicy::Unrestricted => f.write_str("unrestricted"),
        }
    }
}

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: Arc<dyn OrderStore>,
    shop: Arc<dyn ShopSettingsStore>,
    notifier: Arc<dyn Notifier>,
    clock: ShopClock,
    policy: TransitionPolicy,
    campus_label: String,
}

impl OrderLifecycle {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        shop: Arc<dyn ShopSettingsStore>,
        notifier: Arc<dyn Notifier>,
        clock: ShopClock,
        cfg: &ShopConfig,
    ) -> Self {
        Self {
            orders,
            shop,
            notifier,
            clock,
            policy: cfg.transition_policy,
            campus_label: cfg.campus_label.clone(),
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Checks out the persisted cart. The cart is cleared only once the order
    /// has been stored.
    pub fn create_order<S: CartStorage>(
        &self,
        cart: &CartStore<S>,
        info: &CustomerInfo,
    ) -> Result<Order, ShopError> {
        let items = cart.get();
        let order = self.place_order(&items, info)?;
        cart.clear();
        Ok(order)
    }

    /// Validates and stores an order for the given cart lines. Refused while
    /// the shop is closed.
    pub fn place_order(&self, items: &[CartItem], info: &CustomerInfo) -> Result<Order, ShopError> {
        if !self.shop_open() {
            info!("place_order: shop is closed, checkout refused");
            return Err(ShopError::ShopClosed);
        }
        if items.is_empty() {
            return Err(ShopError::missing("cart"));
        }
        if items.iter().any(|item| item.quantity == 0) {
            return Err(ShopError::missing("quantity"));
        }
        if items.iter().any(|item| !valid_price(item.price)) {
            return Err(ShopError::missing("price"));
        }
        let delivery = build_delivery(info, &self.campus_label)?;
        let phone = required(&info.phone, "phone")?;

        let order = Order {
            order_id: generate_order_id(&mut rand::rng()),
            items: items
                .iter()
                .map(|item| OrderLine {
                    name: item.name.clone(),
                    price: item.price,
                    quantity: item.quantity,
                })
                .collect(),
            customer_name: delivery.recipient().to_string(),
            customer_phone: phone,
            delivery,
            total: cart::total(items),
            status: OrderStatus::Pending,
            created_at: self.clock.now().with_timezone(&Utc),
        };

        self.orders.insert_order(&order)?;
        info!(
            "place_order: order {} placed for {} ({} lines, total {:.2})",
            order.order_id,
            order.customer_name,
            order.items.len(),
            order.total
        );
        Ok(order)
    }

    pub fn update_status(&self, order_id: &str, new_status: OrderStatus) -> Result<Order, ShopError> {
        let current = self.orders.get_order_by_order_id(order_id)?;
        if current.status == new_status {
            debug!(
                "update_status: order {} already {}, nothing to do",
                order_id, new_status
            );
            return Ok(current);
        }
        if !self.policy.allows(current.status, new_status) {
            warn!(
                "update_status: refusing {} -> {} for order {}",
                current.status, new_status, order_id
            );
            return Err(ShopError::InvalidTransition {
                from: current.status,
                to: new_status,
            });
        }

        let updated = self.orders.update_order_status(order_id, new_status)?;
        info!(
            "update_status: order {} {} -> {}",
            order_id, current.status, updated.status
        );
        self.notifier
            .notify(&updated, StatusNotice::for_status(updated.status));
        Ok(updated)
    }

    /// Looks an order up by the id the customer typed; case does not matter.
    pub fn track_order(&self, raw_order_id: &str) -> Result<Order, ShopError> {
        let order_id = raw_order_id.trim().to_uppercase();
        if order_id.is_empty() {
            return Err(ShopError::missing("order_id"));
        }
        self.orders.get_order_by_order_id(&order_id).map_err(|e| {
            debug!("track_order: lookup of {} failed: {}", order_id, e);
            ShopError::from(e)
        })
    }

    pub fn list_orders(&self) -> Result<Vec<Order>, ShopError> {
        Ok(self.orders.list_orders()?)
    }

    /// No settings row yet means open. Storage failures also count as open.
    fn shop_open(&self) -> bool {
        match self.shop.get_shop_settings() {
            Ok(settings) => settings.map_or(true, |s| s.is_open),
            Err(e) => {
                warn!("place_order: settings unavailable, assuming open: {}", e);
                true
            }
        }
    }
}

pub fn order_stats(orders: &[Order]) -> OrderStats {
    OrderStats {
        total: orders.len(),
        pending: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count(),
        delivered: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .count(),
    }
}

/// `SRK` followed by five digits. Collisions are not checked.
pub fn generate_order_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}", ORDER_ID_PREFIX, rng.random_range(10000..=99999u32))
}

/// Builds the delivery details, failing on the first missing field in form order.
pub fn build_delivery(info: &CustomerInfo, campus_label: &str) -> Result<Delivery, ShopError> {
    let delivery_type = info
        .delivery_type
        .ok_or_else(|| ShopError::missing("delivery_type"))?;
    required(&info.phone, "phone")?;

    match delivery_type {
        DeliveryType::University => Ok(Delivery::University(UniversityDelivery {
            gate: required(&info.gate, "gate")?,
            student_name: required(&info.student_name, "student_name")?,
            location: campus_label.to_string(),
        })),
        DeliveryType::Address => Ok(Delivery::Address(AddressDelivery {
            name: required(&info.name, "name")?,
            address1: required(&info.address1, "address1")?,
            address2: optional(&info.address2),
            city: required(&info.city, "city")?,
            state: required(&info.state, "state")?,
            pincode: required(&info.pincode, "pincode")?,
        })),
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, ShopError> {
    optional(value).ok_or_else(|| ShopError::missing(field))
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
