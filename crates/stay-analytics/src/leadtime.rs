//! Booking lead time.

use anyhow::Result;
use polars::prelude::{ChunkAgg, DataFrame, IntoLazy, col, lit};

use crate::frame::{LEAD_TIME_DAYS, YEAR};

/// Mean lead time in days over the rows in scope, or `None` when no row
/// qualifies.
///
/// A row qualifies when both its booking and stay dates parsed and the stay
/// does not precede the booking; other rows carry a null lead time in the
/// frame and never enter the mean.
pub fn average_lead_time(df: &DataFrame, year: Option<i32>) -> Result<Option<f64>> {
    let mut scoped = df.clone().lazy();
    if let Some(year) = year {
        scoped = scoped.filter(col(YEAR).eq(lit(i64::from(year))));
    }
    let collected = scoped.collect()?;
    Ok(collected.column(LEAD_TIME_DAYS)?.i64()?.mean())
}
