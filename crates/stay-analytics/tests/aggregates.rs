//! Aggregation behavior over a synthetic dataset.

use chrono::NaiveDate;

use stay_analytics::{
    average_lead_time, build_frame, guest_distribution, month_over_month, monthly_breakdown,
    monthly_occupancy, occupancy_share, service_usage, year_summary, yearly_revenue,
};
use stay_model::{Reservation, Service};

fn booking(
    year: i32,
    stay_month: u32,
    amount: i64,
    nights: i64,
    total: i64,
    adults: i64,
    children: i64,
) -> Reservation {
    let mut reservation = Reservation {
        name: format!("guest-{year}-{stay_month}"),
        year,
        stay_date: NaiveDate::from_ymd_opt(year, stay_month, 10),
        nights,
        total_guests: total,
        adults,
        children,
        amount,
        ..Reservation::default()
    };
    reservation.sync_derived();
    reservation
}

#[test]
fn monthly_breakdown_always_has_twelve_entries() {
    let rows = vec![
        booking(2024, 3, 100_000, 1, 2, 2, 0),
        booking(2024, 3, 200_000, 2, 4, 2, 2),
        booking(2024, 8, 300_000, 1, 3, 2, 1),
        booking(2023, 3, 999_000, 1, 2, 2, 0),
    ];
    let df = build_frame(&rows).unwrap();
    let months = monthly_breakdown(&df, 2024).unwrap();

    assert_eq!(months.len(), 12);
    assert_eq!(months[2].month, 3);
    assert_eq!(months[2].bookings, 2);
    assert_eq!(months[2].revenue, 300_000);
    assert_eq!(months[2].mean_amount, 150_000.0);
    assert_eq!(months[2].nights, 3);
    assert_eq!(months[2].guests, 6);
    assert_eq!(months[7].revenue, 300_000);
    // every other month is present with zeros, not absent
    for metrics in &months {
        if metrics.month != 3 && metrics.month != 8 {
            assert_eq!(metrics.bookings, 0, "month {}", metrics.month);
            assert_eq!(metrics.revenue, 0, "month {}", metrics.month);
            assert_eq!(metrics.mean_amount, 0.0, "month {}", metrics.month);
        }
    }
}

#[test]
fn monthly_breakdown_of_an_empty_year_is_all_zeros() {
    let df = build_frame(&[]).unwrap();
    let months = monthly_breakdown(&df, 2024).unwrap();
    assert_eq!(months.len(), 12);
    assert!(months.iter().all(|metrics| metrics.revenue == 0));

    let occupancy = monthly_occupancy(&df, 2024).unwrap();
    assert_eq!(occupancy.len(), 12);
    assert!(occupancy.iter().all(|entry| entry.adults == 0));
}

#[test]
fn monthly_occupancy_sums_per_month() {
    let rows = vec![
        booking(2024, 7, 100_000, 1, 5, 2, 3),
        booking(2024, 7, 100_000, 1, 4, 3, 1),
    ];
    let df = build_frame(&rows).unwrap();
    let occupancy = monthly_occupancy(&df, 2024).unwrap();
    assert_eq!(occupancy[6].month, 7);
    assert_eq!(occupancy[6].adults, 5);
    assert_eq!(occupancy[6].children, 4);
    // extras derive from party size: (5-2) + (4-2)
    assert_eq!(occupancy[6].extra, 5);
}

#[test]
fn service_rate_is_count_over_scope_to_one_decimal() {
    let mut rows: Vec<Reservation> = (0..20)
        .map(|_| booking(2024, 5, 100_000, 1, 2, 2, 0))
        .collect();
    for reservation in rows.iter_mut().take(5) {
        reservation.services.pool = true;
    }
    rows[0].services.bonfire = true;

    let df = build_frame(&rows).unwrap();
    let usage = service_usage(&df, 2024).unwrap();

    assert_eq!(usage.len(), 5);
    let pool = usage
        .iter()
        .find(|entry| entry.service == Service::Pool)
        .unwrap();
    assert_eq!(pool.count, 5);
    assert_eq!(pool.rate, 25.0);
    let bonfire = usage
        .iter()
        .find(|entry| entry.service == Service::Bonfire)
        .unwrap();
    assert_eq!(bonfire.count, 1);
    assert_eq!(bonfire.rate, 5.0);
    let barbecue = usage
        .iter()
        .find(|entry| entry.service == Service::Barbecue)
        .unwrap();
    assert_eq!(barbecue.count, 0);
    assert_eq!(barbecue.rate, 0.0);
}

#[test]
fn occupancy_share_reports_no_data_when_empty() {
    let df = build_frame(&[]).unwrap();
    let share = occupancy_share(&df, 2024).unwrap();
    assert_eq!(share.adults, 0);
    assert_eq!(share.adult_pct, None);
    assert_eq!(share.child_pct, None);

    let rows = vec![booking(2024, 1, 0, 1, 4, 3, 1)];
    let df = build_frame(&rows).unwrap();
    let share = occupancy_share(&df, 2024).unwrap();
    assert_eq!(share.adult_pct, Some(75.0));
    assert_eq!(share.child_pct, Some(25.0));
}

#[test]
fn yearly_revenue_spans_the_whole_dataset() {
    let rows = vec![
        booking(2023, 6, 500_000, 1, 2, 2, 0),
        booking(2024, 6, 700_000, 1, 2, 2, 0),
        booking(2024, 7, 300_000, 1, 2, 2, 0),
    ];
    let df = build_frame(&rows).unwrap();
    let yearly = yearly_revenue(&df).unwrap();

    assert_eq!(yearly.len(), 2);
    assert_eq!(yearly[0].year, 2023);
    assert_eq!(yearly[0].revenue, 500_000);
    assert_eq!(yearly[1].year, 2024);
    assert_eq!(yearly[1].revenue, 1_000_000);
    assert_eq!(yearly[1].bookings, 2);
}

#[test]
fn month_over_month_rolls_the_year_over_in_january() {
    let rows = vec![
        booking(2023, 12, 400_000, 1, 2, 2, 0),
        booking(2024, 1, 250_000, 1, 2, 2, 0),
        booking(2024, 1, 100_000, 1, 2, 2, 0),
    ];
    let df = build_frame(&rows).unwrap();
    let comparison = month_over_month(&df, 2024, 1).unwrap();

    assert_eq!(comparison.current.revenue, 350_000);
    assert_eq!(comparison.current.bookings, 2);
    assert_eq!(comparison.previous.year, 2023);
    assert_eq!(comparison.previous.month, 12);
    assert_eq!(comparison.previous.revenue, 400_000);
    assert_eq!(comparison.revenue_delta, -50_000);
    assert_eq!(comparison.bookings_delta, 1);
}

#[test]
fn month_over_month_mid_year_uses_the_previous_month() {
    let rows = vec![
        booking(2024, 4, 100_000, 1, 2, 2, 0),
        booking(2024, 5, 300_000, 1, 2, 2, 0),
    ];
    let df = build_frame(&rows).unwrap();
    let comparison = month_over_month(&df, 2024, 5).unwrap();
    assert_eq!(comparison.previous.year, 2024);
    assert_eq!(comparison.previous.month, 4);
    assert_eq!(comparison.revenue_delta, 200_000);
}

#[test]
fn lead_time_averages_only_consistent_rows() {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
    let mut with_lead = booking(2024, 3, 100_000, 1, 2, 2, 0);
    with_lead.booking_date = date(2024, 2, 20);
    with_lead.stay_date = date(2024, 3, 2);
    with_lead.sync_derived();

    let mut longer = booking(2024, 4, 100_000, 1, 2, 2, 0);
    longer.booking_date = date(2024, 3, 1);
    longer.stay_date = date(2024, 4, 10);
    longer.sync_derived();

    // stay precedes booking: excluded, not clamped to zero
    let mut inverted = booking(2024, 5, 100_000, 1, 2, 2, 0);
    inverted.booking_date = date(2024, 6, 1);
    inverted.stay_date = date(2024, 5, 1);
    inverted.sync_derived();

    // missing booking date: excluded
    let no_booking = booking(2024, 6, 100_000, 1, 2, 2, 0);

    let df = build_frame(&[with_lead, longer, inverted, no_booking]).unwrap();
    // (11 + 40) / 2
    assert_eq!(average_lead_time(&df, Some(2024)).unwrap(), Some(25.5));
    assert_eq!(average_lead_time(&df, Some(2020)).unwrap(), None);
}

#[test]
fn lead_time_is_none_for_an_empty_dataset() {
    let df = build_frame(&[]).unwrap();
    assert_eq!(average_lead_time(&df, None).unwrap(), None);
}

#[test]
fn year_summary_aggregates_the_selected_year() {
    let rows = vec![
        booking(2024, 3, 100_000, 2, 4, 2, 2),
        booking(2024, 8, 300_000, 3, 2, 2, 0),
        booking(2023, 8, 999_000, 1, 2, 2, 0),
    ];
    let df = build_frame(&rows).unwrap();
    let summary = year_summary(&df, 2024).unwrap();

    assert_eq!(summary.revenue, 400_000);
    assert_eq!(summary.bookings, 2);
    assert_eq!(summary.mean_amount, 200_000.0);
    assert_eq!(summary.total_nights, 5);
    assert_eq!(summary.mean_guests, 3.0);
}

#[test]
fn guest_distribution_counts_cover_the_scope() {
    let rows = vec![
        booking(2024, 3, 0, 1, 2, 2, 0),
        booking(2024, 4, 0, 1, 2, 2, 0),
        booking(2024, 5, 0, 1, 6, 4, 2),
    ];
    let df = build_frame(&rows).unwrap();
    let buckets = guest_distribution(&df, 2024).unwrap();

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].guests, 2);
    assert_eq!(buckets[0].bookings, 2);
    assert_eq!(buckets[1].guests, 6);
    assert_eq!(buckets[1].bookings, 1);
    let total: u32 = buckets.iter().map(|bucket| bucket.bookings).sum();
    assert_eq!(total as usize, rows.len());
}
