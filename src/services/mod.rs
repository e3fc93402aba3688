pub mod cart;
pub mod catalog;
pub mod errors;
pub mod notifications;
pub mod order_lifecycle;
pub mod revenue;
pub mod shop_clock;
