//! Row normalization.
//!
//! Worksheet cells arrive as loosely formatted text: mixed date formats,
//! currency strings with symbols and separators, flag tokens, stray
//! placeholders like `"nan"` left by earlier tooling. Every parser here is
//! total: a field that cannot be parsed becomes zero or absent and the row
//! survives; only whole-row validity (year, name) is judged by the loader.

use chrono::NaiveDate;
use tracing::debug;

use stay_model::schema::Column;
use stay_model::{Reservation, RowRef, Services, is_checked_read};

/// Placeholder cell values that mean "no date here".
fn is_absent_marker(value: &str) -> bool {
    matches!(value, "" | "0" | "nan")
}

/// Parses a date cell.
///
/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`; a 2-digit leading year is promoted
/// into the 2000s (`24-03-05` → 2024-03-05). Placeholders and unparsable
/// values are absent, never an error.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if is_absent_marker(trimmed) {
        return None;
    }
    let dashed = trimmed.replace('/', "-");
    let parts: Vec<&str> = dashed.split('-').collect();
    let candidate = if parts.len() == 3 && parts[0].len() == 2 {
        format!("20{dashed}")
    } else {
        dashed
    };
    NaiveDate::parse_from_str(&candidate, "%Y-%m-%d").ok()
}

/// Parses a currency cell: thousands separators and the currency symbol are
/// stripped first, and anything unparsable is zero.
pub fn parse_amount(value: &str) -> i64 {
    let cleaned: String = value
        .chars()
        .filter(|ch| *ch != ',' && *ch != '₩')
        .collect();
    parse_int(&cleaned)
}

/// Parses an integer cell; tolerates float renderings ("2.0"), defaults to
/// zero.
pub fn parse_int(value: &str) -> i64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|number| number as i64))
        .unwrap_or(0)
}

/// Cell text for `column`, resolved by header name so column reordering in
/// the sheet cannot silently misalign fields.
fn field<'a>(headers: &'a [String], cells: &'a [String], column: Column) -> &'a str {
    headers
        .iter()
        .position(|header| header.trim() == column.header())
        .and_then(|index| cells.get(index))
        .map_or("", String::as_str)
}

fn parse_date_field(
    headers: &[String],
    cells: &[String],
    column: Column,
    row: RowRef,
) -> Option<NaiveDate> {
    let raw = field(headers, cells, column);
    let parsed = parse_date(raw);
    if parsed.is_none() && !is_absent_marker(raw.trim()) {
        debug!(%row, column = %column, value = raw, "unparsable date cell, treating as absent");
    }
    parsed
}

/// Normalizes one raw data row into a typed reservation.
///
/// Pure except for field-level parse logging. Derived fields (checkout,
/// extra guests, redundant month columns) are recomputed from their sources;
/// stored values for them are never trusted.
pub fn normalize_row(headers: &[String], cells: &[String], row: RowRef) -> Reservation {
    let services = Services {
        barbecue: is_checked_read(field(headers, cells, Column::Barbecue)),
        bonfire: is_checked_read(field(headers, cells, Column::Bonfire)),
        barbecue_bonfire: is_checked_read(field(headers, cells, Column::BarbecueBonfire)),
        pool: is_checked_read(field(headers, cells, Column::Pool)),
        review_event: is_checked_read(field(headers, cells, Column::ReviewEvent)),
    };
    let calendar_event_id = {
        let raw = field(headers, cells, Column::CalendarEventId).trim();
        (!raw.is_empty() && raw != "nan").then(|| raw.to_string())
    };

    let mut reservation = Reservation {
        row,
        no: parse_int(field(headers, cells, Column::No)),
        year: parse_int(field(headers, cells, Column::Year)) as i32,
        name: field(headers, cells, Column::Name).trim().to_string(),
        phone: field(headers, cells, Column::Phone).trim().to_string(),
        booking_month: parse_int(field(headers, cells, Column::BookingMonth)).max(0) as u32,
        booking_date: parse_date_field(headers, cells, Column::BookingDate, row),
        stay_month: parse_int(field(headers, cells, Column::StayMonth)).max(0) as u32,
        stay_date: parse_date_field(headers, cells, Column::StayDate, row),
        nights: parse_int(field(headers, cells, Column::Nights)),
        checkout_date: None,
        total_guests: parse_int(field(headers, cells, Column::TotalGuests)),
        adults: parse_int(field(headers, cells, Column::Adults)),
        children: parse_int(field(headers, cells, Column::Children)),
        extra_guests: 0,
        services,
        amount: parse_amount(field(headers, cells, Column::Amount)),
        notes: field(headers, cells, Column::Notes).to_string(),
        calendar_event_id,
    };
    reservation.sync_derived();
    reservation
}
