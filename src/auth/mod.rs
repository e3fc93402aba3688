pub mod admin_jwt;
pub mod config;
pub mod extractors;
pub mod password;

pub use config::{AdminAuthConfig, AdminJwtConfig};
pub use extractors::AdminPrincipal;
