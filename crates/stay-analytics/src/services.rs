//! Service utilization within a year.

use anyhow::Result;
use polars::prelude::{DataFrame, IntoLazy, col, lit};

use stay_model::Service;

use crate::frame::{YEAR, service_column};

/// Utilization of one add-on service within the selected scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceUsage {
    pub service: Service,
    pub count: u32,
    /// Percentage of rows in scope, rounded to one decimal place.
    pub rate: f64,
}

/// Count and utilization rate for each of the five services in `year`.
///
/// Always returns five entries in stored order; with no rows in scope the
/// counts and rates are zero.
pub fn service_usage(df: &DataFrame, year: i32) -> Result<Vec<ServiceUsage>> {
    let scoped = df
        .clone()
        .lazy()
        .filter(col(YEAR).eq(lit(i64::from(year))))
        .collect()?;
    let total = scoped.height();

    let mut usage = Vec::with_capacity(Service::ALL.len());
    for service in Service::ALL {
        let count = scoped
            .column(service_column(service))?
            .bool()?
            .into_iter()
            .flatten()
            .filter(|checked| *checked)
            .count() as u32;
        let rate = if total == 0 {
            0.0
        } else {
            (f64::from(count) / total as f64 * 1000.0).round() / 10.0
        };
        usage.push(ServiceUsage {
            service,
            count,
            rate,
        });
    }
    Ok(usage)
}
