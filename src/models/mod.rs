pub mod cart;
pub mod catalog;
pub mod orders;
pub mod revenue;
pub mod shop;
