use chrono::{DateTime, NaiveDate, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::daily_revenues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DailyRevenue {
    pub id: i32,
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::daily_revenues)]
pub struct NewDailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders_count: i32,
}

/// Live aggregate over Delivered orders for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct DayStats {
    pub revenue: f64,
    pub orders_count: i32,
}

/// One line of the revenue table: either a persisted day or the live today row.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RevenueEntry {
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders_count: i32,
    pub is_today: bool,
}

impl From<&DailyRevenue> for RevenueEntry {
    fn from(row: &DailyRevenue) -> Self {
        RevenueEntry {
            date: row.date,
            revenue: row.revenue,
            orders_count: row.orders_count,
            is_today: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeFilter {
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "last_6_months")]
    Last6Months,
    #[serde(rename = "last_1_year")]
    Last1Year,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Default for RangeFilter {
    fn default() -> Self {
        RangeFilter::Last7Days
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RevenueSummary {
    pub entries: Vec<RevenueEntry>,
    pub total_revenue: f64,
    pub total_orders: i32,
    pub average_order_value: f64,
}
