use crate::db::errors::RepositoryError;
use crate::db::schema::daily_revenues::dsl::*;
use crate::db::{DbConnection, DbPool};
use crate::models::revenue::{DailyRevenue, NewDailyRevenue};
use crate::traits::RevenueStore;
use diesel::prelude::*;
use log::error;

#[derive(Clone)]
pub struct RevenueOperations {
    pool: DbPool,
}

impl RevenueOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RevenueStore for RevenueOperations {
    fn list_daily_revenues(&self) -> Result<Vec<DailyRevenue>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_daily_revenues: failed to acquire DB connection: {}", e);
            e
        })?;

        daily_revenues
            .order_by(date.desc())
            .select(DailyRevenue::as_select())
            .load::<DailyRevenue>(conn.connection())
            .map_err(|e| {
                error!("list_daily_revenues: error fetching rows: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    fn insert_daily_revenue(
        &self,
        row: NewDailyRevenue,
    ) -> Result<Option<DailyRevenue>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("insert_daily_revenue: failed to acquire DB connection: {}", e);
            e
        })?;

        // The unique index on `date` turns a racing second insert into a no-op.
        diesel::insert_into(daily_revenues)
            .values(&row)
            .on_conflict(date)
            .do_nothing()
            .returning(DailyRevenue::as_returning())
            .get_result::<DailyRevenue>(conn.connection())
            .optional()
            .map_err(|e| {
                error!(
                    "insert_daily_revenue: error inserting row for {}: {}",
                    row.date, e
                );
                RepositoryError::DatabaseError(e)
            })
    }
}
