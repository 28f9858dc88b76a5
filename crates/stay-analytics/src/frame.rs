//! DataFrame construction from normalized reservations.

use anyhow::Result;
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};

use stay_model::{Reservation, Service};

pub const ROW: &str = "row";
pub const YEAR: &str = "year";
pub const NAME: &str = "name";
pub const BOOKING_MONTH: &str = "booking_month";
pub const STAY_MONTH: &str = "stay_month";
pub const NIGHTS: &str = "nights";
pub const TOTAL_GUESTS: &str = "total_guests";
pub const ADULTS: &str = "adults";
pub const CHILDREN: &str = "children";
pub const EXTRA_GUESTS: &str = "extra_guests";
pub const AMOUNT: &str = "amount";
pub const LEAD_TIME_DAYS: &str = "lead_time_days";

/// Frame column holding a service's flag.
pub fn service_column(service: Service) -> &'static str {
    match service {
        Service::Barbecue => "barbecue",
        Service::Bonfire => "bonfire",
        Service::BarbecueBonfire => "barbecue_bonfire",
        Service::Pool => "pool",
        Service::ReviewEvent => "review_event",
    }
}

/// Builds the analytics frame for a set of reservations.
///
/// The lead time is precomputed per row (whole days, inconsistent rows
/// already null) so the frame needs no temporal arithmetic.
pub fn build_frame(rows: &[Reservation]) -> Result<DataFrame> {
    let int = |f: fn(&Reservation) -> i64| -> Vec<i64> { rows.iter().map(f).collect() };
    let flag = |service: Service| -> Vec<bool> {
        rows.iter()
            .map(|reservation| reservation.services.get(service))
            .collect()
    };

    let mut columns = vec![
        Series::new(ROW.into(), int(|r| r.row.0 as i64)).into(),
        Series::new(YEAR.into(), int(|r| i64::from(r.year))).into(),
        Series::new(
            NAME.into(),
            rows.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(BOOKING_MONTH.into(), int(|r| i64::from(r.booking_month))).into(),
        Series::new(STAY_MONTH.into(), int(|r| i64::from(r.stay_month))).into(),
        Series::new(NIGHTS.into(), int(|r| r.nights)).into(),
        Series::new(TOTAL_GUESTS.into(), int(|r| r.total_guests)).into(),
        Series::new(ADULTS.into(), int(|r| r.adults)).into(),
        Series::new(CHILDREN.into(), int(|r| r.children)).into(),
        Series::new(EXTRA_GUESTS.into(), int(|r| r.extra_guests)).into(),
        Series::new(
            AMOUNT.into(),
            rows.iter().map(|r| r.amount as f64).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            LEAD_TIME_DAYS.into(),
            rows.iter()
                .map(Reservation::lead_time_days)
                .collect::<Vec<Option<i64>>>(),
        )
        .into(),
    ];
    for service in Service::ALL {
        columns.push(Series::new(service_column(service).into(), flag(service)).into());
    }

    Ok(DataFrame::new(columns)?)
}

pub(crate) fn any_to_i64(value: AnyValue) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(value) => Some(i64::from(value)),
        AnyValue::Int16(value) => Some(i64::from(value)),
        AnyValue::Int32(value) => Some(i64::from(value)),
        AnyValue::Int64(value) => Some(value),
        AnyValue::UInt8(value) => Some(i64::from(value)),
        AnyValue::UInt16(value) => Some(i64::from(value)),
        AnyValue::UInt32(value) => Some(i64::from(value)),
        AnyValue::UInt64(value) => Some(value as i64),
        AnyValue::Float32(value) => Some(value as i64),
        AnyValue::Float64(value) => Some(value as i64),
        _ => None,
    }
}

pub(crate) fn any_to_f64(value: AnyValue) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float32(value) => Some(f64::from(value)),
        AnyValue::Float64(value) => Some(value),
        AnyValue::Int8(value) => Some(f64::from(value)),
        AnyValue::Int16(value) => Some(f64::from(value)),
        AnyValue::Int32(value) => Some(f64::from(value)),
        AnyValue::Int64(value) => Some(value as f64),
        AnyValue::UInt8(value) => Some(f64::from(value)),
        AnyValue::UInt16(value) => Some(f64::from(value)),
        AnyValue::UInt32(value) => Some(f64::from(value)),
        AnyValue::UInt64(value) => Some(value as f64),
        _ => None,
    }
}

/// Integer cell of a collected frame, zero when null or missing.
pub(crate) fn cell_i64(df: &DataFrame, name: &str, idx: usize) -> i64 {
    df.column(name)
        .ok()
        .and_then(|column| column.get(idx).ok())
        .and_then(any_to_i64)
        .unwrap_or(0)
}

/// Float cell of a collected frame, zero when null or missing.
pub(crate) fn cell_f64(df: &DataFrame, name: &str, idx: usize) -> f64 {
    df.column(name)
        .ok()
        .and_then(|column| column.get(idx).ok())
        .and_then(any_to_f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_builds_an_empty_frame() {
        let df = build_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert!(df.column(AMOUNT).is_ok());
        assert!(df.column(LEAD_TIME_DAYS).is_ok());
    }

    #[test]
    fn one_column_per_service() {
        let df = build_frame(&[]).unwrap();
        for service in Service::ALL {
            assert!(df.column(service_column(service)).is_ok());
        }
    }
}
