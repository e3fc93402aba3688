use std::sync::Arc;

use chrono::{DateTime, Days, FixedOffset, Months, NaiveDate};
use log::{debug, info};

use crate::models::orders::{Order, OrderStatus};
use crate::models::revenue::{
    DailyRevenue, DayStats, NewDailyRevenue, RangeFilter, RevenueEntry, RevenueSummary,
};
use crate::services::errors::ShopError;
use crate::services::shop_clock::{local_day_bounds, ShopClock};
use crate::traits::{OrderStore, RevenueStore};

/// Delivered orders created on `date` (local midnight to midnight).
pub fn day_stats(orders: &[Order], date: NaiveDate, tz: FixedOffset) -> DayStats {
    let (start, end) = local_day_bounds(date, tz);
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered)
        .filter(|o| o.created_at >= start && o.created_at < end)
        .fold(DayStats::default(), |acc, o| DayStats {
            revenue: acc.revenue + o.total,
            orders_count: acc.orders_count + 1,
        })
}

pub fn today_stats(orders: &[Order], now: DateTime<FixedOffset>) -> DayStats {
    day_stats(orders, now.date_naive(), *now.offset())
}

pub fn yesterday(now: DateTime<FixedOffset>) -> NaiveDate {
    let today = now.date_naive();
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

/// Persisted rows matching `filter`, newest first, behind the live today row.
pub fn filter_by_range(
    rows: &[DailyRevenue],
    filter: RangeFilter,
    today: DayStats,
    now: DateTime<FixedOffset>,
) -> Vec<RevenueEntry> {
    let today_date = now.date_naive();
    let (start, end) = match filter {
        RangeFilter::Last7Days => (now.checked_sub_days(Days::new(7)), None),
        RangeFilter::Last6Months => (now.checked_sub_months(Months::new(6)), None),
        RangeFilter::Last1Year => (now.checked_sub_months(Months::new(12)), None),
        RangeFilter::Custom { start, end } => {
            return assemble(rows, today, today_date, start, end);
        }
    };
    let start = start.map(|boundary| boundary.date_naive());
    assemble(rows, today, today_date, start, end)
}

fn assemble(
    rows: &[DailyRevenue],
    today: DayStats,
    today_date: NaiveDate,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<RevenueEntry> {
    let mut matched: Vec<RevenueEntry> = rows
        .iter()
        // today is always the live row, never a persisted one
        .filter(|row| row.date != today_date)
        .filter(|row| start.map_or(true, |s| row.date >= s))
        .filter(|row| end.map_or(true, |e| row.date <= e))
        .map(RevenueEntry::from)
        .collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));

    let mut entries = Vec::with_capacity(matched.len() + 1);
    entries.push(RevenueEntry {
        date: today_date,
        revenue: today.revenue,
        orders_count: today.orders_count,
        is_today: true,
    });
    entries.extend(matched);
    entries
}

pub fn total_revenue(entries: &[RevenueEntry]) -> f64 {
    entries.iter().map(|e| e.revenue).sum()
}

pub fn total_orders(entries: &[RevenueEntry]) -> i32 {
    entries.iter().map(|e| e.orders_count).sum()
}

pub fn average_order_value(entries: &[RevenueEntry]) -> f64 {
    let orders = total_orders(entries);
    if orders == 0 {
        0.0
    } else {
        total_revenue(entries) / orders as f64
    }
}

#[derive(Clone)]
pub struct RevenueAggregator {
    orders: Arc<dyn OrderStore>,
    revenues: Arc<dyn RevenueStore>,
    clock: ShopClock,
}

impl RevenueAggregator {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        revenues: Arc<dyn RevenueStore>,
        clock: ShopClock,
    ) -> Self {
        Self {
            orders,
            revenues,
            clock,
        }
    }

    pub fn today_stats(&self) -> Result<DayStats, ShopError> {
        let orders = self.orders.list_orders()?;
        Ok(today_stats(&orders, self.clock.now()))
    }

    /// Persists yesterday's totals unless a row for that date already exists.
    /// Returns the row written by this call, if any.
    pub fn ensure_yesterday_snapshot(
        &self,
        orders: &[Order],
    ) -> Result<Option<DailyRevenue>, ShopError> {
        let now = self.clock.now();
        let date = yesterday(now);

        let existing = self.revenues.list_daily_revenues()?;
        if existing.iter().any(|row| row.date == date) {
            debug!("ensure_yesterday_snapshot: {} already recorded", date);
            return Ok(None);
        }

        let stats = day_stats(orders, date, *now.offset());
        let inserted = self.revenues.insert_daily_revenue(NewDailyRevenue {
            date,
            revenue: stats.revenue,
            orders_count: stats.orders_count,
        })?;
        match &inserted {
            Some(row) => info!(
                "ensure_yesterday_snapshot: recorded {} ({} orders, revenue {:.2})",
                row.date, row.orders_count, row.revenue
            ),
            None => debug!(
                "ensure_yesterday_snapshot: {} recorded concurrently",
                date
            ),
        }
        Ok(inserted)
    }

    /// Everything the revenue dashboard shows for `filter`.
    pub fn revenue_summary(&self, filter: RangeFilter) -> Result<RevenueSummary, ShopError> {
        let orders = self.orders.list_orders()?;
        self.ensure_yesterday_snapshot(&orders)?;

        let now = self.clock.now();
        let rows = self.revenues.list_daily_revenues()?;
        let entries = filter_by_range(&rows, filter, today_stats(&orders, now), now);

        Ok(RevenueSummary {
            total_revenue: total_revenue(&entries),
            total_orders: total_orders(&entries),
            average_order_value: average_order_value(&entries),
            entries,
        })
    }
}
