//! Zero-filled monthly aggregates within one year.

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::{DataFrame, IntoLazy, col, len, lit};

use crate::frame::{ADULTS, AMOUNT, CHILDREN, EXTRA_GUESTS, NIGHTS, STAY_MONTH, TOTAL_GUESTS, YEAR, cell_f64, cell_i64};

/// One stay-month's metrics. Months with no bookings carry zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyMetrics {
    /// Calendar month, 1-12.
    pub month: u32,
    pub bookings: u32,
    pub revenue: i64,
    pub mean_amount: f64,
    pub nights: i64,
    pub guests: i64,
    pub mean_guests: f64,
}

/// Per-month revenue and volume for `year`.
///
/// Always returns exactly twelve entries, January through December, with
/// zeros where no bookings exist.
pub fn monthly_breakdown(df: &DataFrame, year: i32) -> Result<Vec<MonthlyMetrics>> {
    let grouped = df
        .clone()
        .lazy()
        .filter(col(YEAR).eq(lit(i64::from(year))))
        .group_by([col(STAY_MONTH)])
        .agg([
            len().alias("bookings"),
            col(AMOUNT).sum().alias("revenue"),
            col(AMOUNT).mean().alias("mean_amount"),
            col(NIGHTS).sum().alias("nights"),
            col(TOTAL_GUESTS).sum().alias("guests"),
            col(TOTAL_GUESTS).mean().alias("mean_guests"),
        ])
        .collect()?;

    let by_month: HashMap<i64, usize> = (0..grouped.height())
        .map(|idx| (cell_i64(&grouped, STAY_MONTH, idx), idx))
        .collect();

    let mut months = Vec::with_capacity(12);
    for month in 1..=12u32 {
        let metrics = match by_month.get(&i64::from(month)) {
            Some(&idx) => MonthlyMetrics {
                month,
                bookings: cell_i64(&grouped, "bookings", idx) as u32,
                revenue: cell_f64(&grouped, "revenue", idx) as i64,
                mean_amount: cell_f64(&grouped, "mean_amount", idx),
                nights: cell_i64(&grouped, "nights", idx),
                guests: cell_i64(&grouped, "guests", idx),
                mean_guests: cell_f64(&grouped, "mean_guests", idx),
            },
            None => MonthlyMetrics {
                month,
                bookings: 0,
                revenue: 0,
                mean_amount: 0.0,
                nights: 0,
                guests: 0,
                mean_guests: 0.0,
            },
        };
        months.push(metrics);
    }
    Ok(months)
}

/// One stay-month's guest composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyOccupancy {
    pub month: u32,
    pub adults: i64,
    pub children: i64,
    pub extra: i64,
}

/// Per-month adult/child/extra sums for `year`, zero-filled to twelve
/// entries.
pub fn monthly_occupancy(df: &DataFrame, year: i32) -> Result<Vec<MonthlyOccupancy>> {
    let grouped = df
        .clone()
        .lazy()
        .filter(col(YEAR).eq(lit(i64::from(year))))
        .group_by([col(STAY_MONTH)])
        .agg([
            col(ADULTS).sum().alias("adults"),
            col(CHILDREN).sum().alias("children"),
            col(EXTRA_GUESTS).sum().alias("extra"),
        ])
        .collect()?;

    let by_month: HashMap<i64, usize> = (0..grouped.height())
        .map(|idx| (cell_i64(&grouped, STAY_MONTH, idx), idx))
        .collect();

    let mut months = Vec::with_capacity(12);
    for month in 1..=12u32 {
        let occupancy = match by_month.get(&i64::from(month)) {
            Some(&idx) => MonthlyOccupancy {
                month,
                adults: cell_i64(&grouped, "adults", idx),
                children: cell_i64(&grouped, "children", idx),
                extra: cell_i64(&grouped, "extra", idx),
            },
            None => MonthlyOccupancy {
                month,
                adults: 0,
                children: 0,
                extra: 0,
            },
        };
        months.push(occupancy);
    }
    Ok(months)
}
