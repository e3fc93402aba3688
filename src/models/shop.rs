use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::shop_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShopSettings {
    pub id: i32,
    pub is_open: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::shop_settings)]
pub struct NewShopSettings {
    pub is_open: bool,
    pub updated_at: DateTime<Utc>,
}
