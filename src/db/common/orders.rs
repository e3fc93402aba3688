use crate::db::{DbConnection, DbPool, RepositoryError};
use crate::models::orders::{NewOrderRow, Order, OrderRow, OrderStatus};
use crate::traits::OrderStore;
use diesel::prelude::*;
use diesel::result::Error;
use log::{debug, error};

#[derive(Clone)]
pub struct OrderOperations {
    pool: DbPool,
}

impl OrderOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderStore for OrderOperations {
    fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("insert_order: failed to acquire DB connection: {}", e);
            e
        })?;

        let row = NewOrderRow::try_from(order)?;

        use crate::db::schema::orders::dsl::*;
        diesel::insert_into(orders)
            .values(&row)
            .execute(conn.connection())
            .map_err(|e| {
                error!(
                    "insert_order: error inserting order '{}': {}",
                    row.order_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        debug!("insert_order: stored order {}", row.order_id);
        Ok(())
    }

    fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_orders: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        let rows = orders
            .order_by(created_at.desc())
            .select(OrderRow::as_select())
            .load::<OrderRow>(conn.connection())
            .map_err(|e| {
                error!("list_orders: error fetching orders: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        rows.into_iter().map(Order::try_from).collect()
    }

    fn update_order_status(
        &self,
        search_order_id: &str,
        new_status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_order_status: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        let not_found_or_log = |e: Error| match e {
            Error::NotFound => RepositoryError::NotFound(format!("orders: {search_order_id}")),
            other => {
                error!(
                    "update_order_status: error updating order {}: {}",
                    search_order_id, other
                );
                RepositoryError::DatabaseError(other)
            }
        };

        // Only the newest row carrying the id is touched, same as the lookup.
        let row = conn
            .connection()
            .transaction::<OrderRow, Error, _>(|conn| {
                let newest = orders
                    .filter(order_id.eq(search_order_id))
                    .order_by(created_at.desc())
                    .select(id)
                    .first::<i32>(conn)?;

                diesel::update(orders.find(newest))
                    .set(status.eq(new_status.as_str()))
                    .returning(OrderRow::as_returning())
                    .get_result::<OrderRow>(conn)
            })
            .map_err(not_found_or_log)?;

        Order::try_from(row)
    }

    fn get_order_by_order_id(&self, search_order_id: &str) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_order_by_order_id: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        // Ids are not unique-checked at creation; the newest match wins.
        let row = orders
            .filter(order_id.eq(search_order_id))
            .order_by(created_at.desc())
            .select(OrderRow::as_select())
            .first::<OrderRow>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("orders: {search_order_id}")),
                other => {
                    error!(
                        "get_order_by_order_id: error fetching order {}: {}",
                        search_order_id, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })?;

        Order::try_from(row)
    }
}
