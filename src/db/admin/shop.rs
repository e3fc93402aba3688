use crate::db::errors::RepositoryError;
use crate::db::schema::shop_settings::dsl::*;
use crate::db::{DbConnection, DbPool};
use crate::models::shop::{NewShopSettings, ShopSettings};
use crate::traits::ShopSettingsStore;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error;
use log::error;

#[derive(Clone)]
pub struct ShopOperations {
    pool: DbPool,
}

impl ShopOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ShopSettingsStore for ShopOperations {
    fn get_shop_settings(&self) -> Result<Option<ShopSettings>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_shop_settings: failed to acquire DB connection: {}", e);
            e
        })?;

        shop_settings
            .order_by(id.asc())
            .select(ShopSettings::as_select())
            .first::<ShopSettings>(conn.connection())
            .optional()
            .map_err(|e| {
                error!("get_shop_settings: error fetching settings: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    fn insert_shop_settings(&self, open: bool) -> Result<ShopSettings, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("insert_shop_settings: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(shop_settings)
            .values(&NewShopSettings {
                is_open: open,
                updated_at: Utc::now(),
            })
            .returning(ShopSettings::as_returning())
            .get_result::<ShopSettings>(conn.connection())
            .map_err(|e| {
                error!("insert_shop_settings: error inserting settings: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    fn update_shop_settings(
        &self,
        settings_id: i32,
        open: bool,
    ) -> Result<ShopSettings, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("update_shop_settings: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::update(shop_settings.filter(id.eq(settings_id)))
            .set((is_open.eq(open), updated_at.eq(Utc::now())))
            .returning(ShopSettings::as_returning())
            .get_result::<ShopSettings>(conn.connection())
            .map_err(|e| {
                error!(
                    "update_shop_settings: error updating settings {}: {}",
                    settings_id, e
                );
                match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("shop_settings: {settings_id}"))
                    }
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }
}
