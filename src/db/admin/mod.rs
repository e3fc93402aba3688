pub mod asset_upload;
pub mod dishes;
pub mod revenue;
pub mod shop;
