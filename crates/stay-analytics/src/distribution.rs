//! Guest-count distribution.

use std::collections::BTreeMap;

use anyhow::Result;
use polars::prelude::{DataFrame, IntoLazy, col, len, lit};

use crate::frame::{TOTAL_GUESTS, YEAR, cell_i64};

/// Number of bookings with a given party size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestBucket {
    pub guests: i64,
    pub bookings: u32,
}

/// How many bookings fall on each total-guest count within `year`, smallest
/// parties first. Only observed party sizes appear; the bucket counts sum
/// to the number of rows in scope.
pub fn guest_distribution(df: &DataFrame, year: i32) -> Result<Vec<GuestBucket>> {
    let grouped = df
        .clone()
        .lazy()
        .filter(col(YEAR).eq(lit(i64::from(year))))
        .group_by([col(TOTAL_GUESTS)])
        .agg([len().alias("bookings")])
        .collect()?;

    let mut buckets = BTreeMap::new();
    for idx in 0..grouped.height() {
        let guests = cell_i64(&grouped, TOTAL_GUESTS, idx);
        buckets.insert(
            guests,
            GuestBucket {
                guests,
                bookings: cell_i64(&grouped, "bookings", idx) as u32,
            },
        );
    }
    Ok(buckets.into_values().collect())
}
