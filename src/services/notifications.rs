use log::info;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::orders::{Order, OrderStatus};
use crate::traits::Notifier;

/// What kind of message a status change produces for the customer-facing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusNotice {
    Accepted,
    Rejected,
    Updated,
}

impl StatusNotice {
    pub fn for_status(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Cooking => StatusNotice::Accepted,
            OrderStatus::Rejected => StatusNotice::Rejected,
            _ => StatusNotice::Updated,
        }
    }

    pub fn message(&self, order: &Order) -> String {
        match self {
            StatusNotice::Accepted => format!("Order {} accepted and cooking", order.order_id),
            StatusNotice::Rejected => format!("Order {} was rejected", order.order_id),
            StatusNotice::Updated => {
                format!("Order {} is now {}", order.order_id, order.status)
            }
        }
    }
}

/// Writes notices to the application log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, order: &Order, notice: StatusNotice) {
        info!("notify({:?}): {}", notice, notice.message(order));
    }
}
