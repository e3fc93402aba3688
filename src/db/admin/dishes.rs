use crate::db::errors::RepositoryError;
use crate::db::schema::dishes::dsl::*;
use crate::db::{DbConnection, DbPool};
use crate::models::catalog::{Dish, DishChangeset, DishPatch, DishRow, NewDishRow};
use crate::traits::DishStore;
use diesel::prelude::*;
use diesel::result::Error;
use log::error;

#[derive(Clone)]
pub struct DishOperations {
    pool: DbPool,
}

impl DishOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DishStore for DishOperations {
    fn list_dishes(&self) -> Result<Vec<Dish>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_dishes: failed to acquire DB connection: {}", e);
            e
        })?;

        let rows = dishes
            .order_by((category.asc(), name.asc()))
            .select(DishRow::as_select())
            .load::<DishRow>(conn.connection())
            .map_err(|e| {
                error!("list_dishes: error fetching dishes: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows.into_iter().map(Dish::from).collect())
    }

    fn get_dish(&self, dish_id: i32) -> Result<Dish, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_dish: failed to acquire DB connection for id {}: {}",
                dish_id, e
            );
            e
        })?;

        dishes
            .filter(id.eq(dish_id))
            .select(DishRow::as_select())
            .first::<DishRow>(conn.connection())
            .map(Dish::from)
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("dishes: {dish_id}")),
                other => {
                    error!("get_dish: error fetching dish with id {}: {}", dish_id, other);
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    fn insert_dish(&self, dish: NewDishRow) -> Result<Dish, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("insert_dish: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(dishes)
            .values(&dish)
            .returning(DishRow::as_returning())
            .get_result::<DishRow>(conn.connection())
            .map(Dish::from)
            .map_err(|e| {
                error!("insert_dish: error inserting dish '{}': {}", dish.name, e);
                RepositoryError::DatabaseError(e)
            })
    }

    fn update_dish(&self, dish_id: i32, patch: &DishPatch) -> Result<Dish, RepositoryError> {
        let changes = DishChangeset::from(patch);
        if changes.is_empty() {
            return self.get_dish(dish_id);
        }

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_dish: failed to acquire DB connection for id {}: {}",
                dish_id, e
            );
            e
        })?;

        diesel::update(dishes.filter(id.eq(dish_id)))
            .set(&changes)
            .returning(DishRow::as_returning())
            .get_result::<DishRow>(conn.connection())
            .map(Dish::from)
            .map_err(|e| {
                error!("update_dish: error updating dish with id {}: {}", dish_id, e);
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("dishes: {dish_id}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    fn delete_dish(&self, dish_id: i32) -> Result<Dish, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "delete_dish: failed to acquire DB connection for id {}: {}",
                dish_id, e
            );
            e
        })?;

        diesel::delete(dishes.filter(id.eq(dish_id)))
            .returning(DishRow::as_returning())
            .get_result::<DishRow>(conn.connection())
            .map(Dish::from)
            .map_err(|e| {
                error!("delete_dish: error deleting dish with id {}: {}", dish_id, e);
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("dishes: {dish_id}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }
}
