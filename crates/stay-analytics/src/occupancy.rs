//! Adult/child share of guests within a year.

use anyhow::Result;
use polars::prelude::{ChunkAgg, DataFrame, IntoLazy, col, lit};

use crate::frame::{ADULTS, CHILDREN, YEAR};

/// Guest composition for a scope.
///
/// The percentage shares are over adults + children; when that total is
/// zero the shares are `None` ("no data"), not zero.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyShare {
    pub adults: i64,
    pub children: i64,
    pub adult_pct: Option<f64>,
    pub child_pct: Option<f64>,
}

pub fn occupancy_share(df: &DataFrame, year: i32) -> Result<OccupancyShare> {
    let scoped = df
        .clone()
        .lazy()
        .filter(col(YEAR).eq(lit(i64::from(year))))
        .collect()?;

    let adults = scoped.column(ADULTS)?.i64()?.sum().unwrap_or(0);
    let children = scoped.column(CHILDREN)?.i64()?.sum().unwrap_or(0);
    let people = adults + children;

    let share = |part: i64| {
        (people > 0).then(|| part as f64 / people as f64 * 100.0)
    };
    Ok(OccupancyShare {
        adults,
        children,
        adult_pct: share(adults),
        child_pct: share(children),
    })
}
