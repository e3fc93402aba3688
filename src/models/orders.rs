use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::db::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Pending,
    Cooking,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Rejected,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Cooking,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Cooking => "Cooking",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Rejected => "Rejected",
        }
    }

    /// Statuses an order may move to next when transitions are guarded.
    pub fn successors(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Cooking, OrderStatus::Rejected],
            OrderStatus::Cooking => &[OrderStatus::OutForDelivery],
            OrderStatus::OutForDelivery => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Rejected => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status '{s}'"))
    }
}

/// Frozen copy of a cart line at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    University,
    Address,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::University => "university",
            DeliveryType::Address => "address",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UniversityDelivery {
    pub gate: String,
    pub student_name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddressDelivery {
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "delivery_type", content = "delivery_details", rename_all = "snake_case")]
pub enum Delivery {
    University(UniversityDelivery),
    Address(AddressDelivery),
}

impl Delivery {
    pub fn delivery_type(&self) -> DeliveryType {
        match self {
            Delivery::University(_) => DeliveryType::University,
            Delivery::Address(_) => DeliveryType::Address,
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Delivery::University(u) => &u.student_name,
            Delivery::Address(a) => &a.name,
        }
    }
}

/// Checkout form as submitted. Every field is optional so that validation can
/// name the first one missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CustomerInfo {
    pub delivery_type: Option<DeliveryType>,
    pub phone: Option<String>,
    pub gate: Option<String>,
    pub student_name: Option<String>,
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub order_id: String,
    pub items: Vec<OrderLine>,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(flatten)]
    pub delivery: Delivery,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub delivered: usize,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub order_id: String,
    pub items: serde_json::Value,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_type: String,
    pub delivery_details: serde_json::Value,
    pub total: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrderRow {
    pub order_id: String,
    pub items: serde_json::Value,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_type: String,
    pub delivery_details: serde_json::Value,
    pub total: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Order> for NewOrderRow {
    type Error = RepositoryError;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        let corrupt = |e: serde_json::Error| RepositoryError::Corrupt(format!("{}: {e}", order.order_id));
        let delivery_details = match &order.delivery {
            Delivery::University(u) => serde_json::to_value(u),
            Delivery::Address(a) => serde_json::to_value(a),
        }
        .map_err(corrupt)?;

        Ok(NewOrderRow {
            order_id: order.order_id.clone(),
            items: serde_json::to_value(&order.items).map_err(corrupt)?,
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            delivery_type: order.delivery.delivery_type().as_str().to_string(),
            delivery_details,
            total: order.total,
            status: order.status.to_string(),
            created_at: order.created_at,
        })
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let order_id = row.order_id;
        let corrupt = |what: &str, e: String| RepositoryError::Corrupt(format!("{order_id} {what}: {e}"));

        let items: Vec<OrderLine> =
            serde_json::from_value(row.items).map_err(|e| corrupt("items", e.to_string()))?;
        let delivery = match row.delivery_type.as_str() {
            "university" => serde_json::from_value(row.delivery_details).map(Delivery::University),
            "address" => serde_json::from_value(row.delivery_details).map(Delivery::Address),
            other => return Err(corrupt("delivery_type", other.to_string())),
        }
        .map_err(|e| corrupt("delivery_details", e.to_string()))?;
        let status = row.status.parse().map_err(|e| corrupt("status", e))?;

        Ok(Order {
            order_id,
            items,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            delivery,
            total: row.total,
            status,
            created_at: row.created_at,
        })
    }
}
