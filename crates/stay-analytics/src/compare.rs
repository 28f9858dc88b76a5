//! Cross-period comparisons and year KPI summaries.

use std::collections::BTreeMap;

use anyhow::Result;
use polars::prelude::{ChunkAgg, DataFrame, IntoLazy, col, len, lit};

use crate::frame::{AMOUNT, NIGHTS, STAY_MONTH, TOTAL_GUESTS, YEAR, cell_f64, cell_i64};
use crate::leadtime::average_lead_time;

/// Revenue and volume for one year, over the entire dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyRevenue {
    pub year: i32,
    pub revenue: i64,
    pub bookings: u32,
}

/// Revenue grouped by year across the whole dataset (not just a selected
/// year), oldest first.
pub fn yearly_revenue(df: &DataFrame) -> Result<Vec<YearlyRevenue>> {
    let grouped = df
        .clone()
        .lazy()
        .group_by([col(YEAR)])
        .agg([
            col(AMOUNT).sum().alias("revenue"),
            len().alias("bookings"),
        ])
        .collect()?;

    let mut by_year = BTreeMap::new();
    for idx in 0..grouped.height() {
        let year = cell_i64(&grouped, YEAR, idx) as i32;
        by_year.insert(
            year,
            YearlyRevenue {
                year,
                revenue: cell_f64(&grouped, "revenue", idx) as i64,
                bookings: cell_i64(&grouped, "bookings", idx) as u32,
            },
        );
    }
    Ok(by_year.into_values().collect())
}

/// Revenue and bookings of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSnapshot {
    pub year: i32,
    pub month: u32,
    pub revenue: i64,
    pub bookings: u32,
}

/// A calendar month against the immediately preceding month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOverMonth {
    pub current: MonthSnapshot,
    pub previous: MonthSnapshot,
    pub revenue_delta: i64,
    pub bookings_delta: i64,
}

fn month_snapshot(df: &DataFrame, year: i32, month: u32) -> Result<MonthSnapshot> {
    let scoped = df
        .clone()
        .lazy()
        .filter(
            col(YEAR)
                .eq(lit(i64::from(year)))
                .and(col(STAY_MONTH).eq(lit(i64::from(month)))),
        )
        .collect()?;
    Ok(MonthSnapshot {
        year,
        month,
        revenue: scoped.column(AMOUNT)?.f64()?.sum().unwrap_or(0.0) as i64,
        bookings: scoped.height() as u32,
    })
}

/// Metrics for `(year, month)` against the preceding month, rolling the
/// year over when the preceding month is December of the prior year.
pub fn month_over_month(df: &DataFrame, year: i32, month: u32) -> Result<MonthOverMonth> {
    let (prev_year, prev_month) = if month > 1 {
        (year, month - 1)
    } else {
        (year - 1, 12)
    };
    let current = month_snapshot(df, year, month)?;
    let previous = month_snapshot(df, prev_year, prev_month)?;
    let revenue_delta = current.revenue - previous.revenue;
    let bookings_delta = i64::from(current.bookings) - i64::from(previous.bookings);
    Ok(MonthOverMonth {
        current,
        previous,
        revenue_delta,
        bookings_delta,
    })
}

/// Headline KPIs for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub revenue: i64,
    pub bookings: u32,
    pub mean_amount: f64,
    pub total_nights: i64,
    pub mean_guests: f64,
    /// Mean booking lead time in days, when any row in the year has one.
    pub avg_lead_time: Option<f64>,
}

pub fn year_summary(df: &DataFrame, year: i32) -> Result<YearSummary> {
    let scoped = df
        .clone()
        .lazy()
        .filter(col(YEAR).eq(lit(i64::from(year))))
        .collect()?;

    Ok(YearSummary {
        year,
        revenue: scoped.column(AMOUNT)?.f64()?.sum().unwrap_or(0.0) as i64,
        bookings: scoped.height() as u32,
        mean_amount: scoped.column(AMOUNT)?.f64()?.mean().unwrap_or(0.0),
        total_nights: scoped.column(NIGHTS)?.i64()?.sum().unwrap_or(0),
        mean_guests: scoped.column(TOTAL_GUESTS)?.i64()?.mean().unwrap_or(0.0),
        avg_lead_time: average_lead_time(df, Some(year))?,
    })
}
