//! The reservation record and its derived-field invariants.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};

use crate::flags::flag_cell;
use crate::schema::{Column, FIRST_DATA_ROW};

/// 1-based row position of a record in the backing worksheet.
///
/// Row 1 is the header; the first data row is [`FIRST_DATA_ROW`]. The
/// reference is only stable until an earlier row is deleted, at which point
/// every later reference shifts down by one. Never cache one across a
/// delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowRef(pub usize);

impl RowRef {
    /// Reference for the data row at the given zero-based fetch position.
    pub fn from_fetch_index(index: usize) -> Self {
        RowRef(index + FIRST_DATA_ROW)
    }
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the five optional add-on services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Barbecue,
    Bonfire,
    BarbecueBonfire,
    Pool,
    ReviewEvent,
}

impl Service {
    /// Every service, in stored column order.
    pub const ALL: [Service; 5] = [
        Service::Barbecue,
        Service::Bonfire,
        Service::BarbecueBonfire,
        Service::Pool,
        Service::ReviewEvent,
    ];

    /// Display name (shorter than the stored header for two services).
    pub fn label(self) -> &'static str {
        match self {
            Service::Barbecue => "바비큐",
            Service::Bonfire => "불멍",
            Service::BarbecueBonfire => "바비큐+불멍",
            Service::Pool => "수영장",
            Service::ReviewEvent => "리뷰이벤트",
        }
    }

    /// The worksheet column holding this service's flag.
    pub fn column(self) -> Column {
        match self {
            Service::Barbecue => Column::Barbecue,
            Service::Bonfire => Column::Bonfire,
            Service::BarbecueBonfire => Column::BarbecueBonfire,
            Service::Pool => Column::Pool,
            Service::ReviewEvent => Column::ReviewEvent,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The five independent service flags of a reservation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Services {
    pub barbecue: bool,
    pub bonfire: bool,
    pub barbecue_bonfire: bool,
    pub pool: bool,
    pub review_event: bool,
}

impl Services {
    pub fn get(&self, service: Service) -> bool {
        match service {
            Service::Barbecue => self.barbecue,
            Service::Bonfire => self.bonfire,
            Service::BarbecueBonfire => self.barbecue_bonfire,
            Service::Pool => self.pool,
            Service::ReviewEvent => self.review_event,
        }
    }

    pub fn set(&mut self, service: Service, checked: bool) {
        match service {
            Service::Barbecue => self.barbecue = checked,
            Service::Bonfire => self.bonfire = checked,
            Service::BarbecueBonfire => self.barbecue_bonfire = checked,
            Service::Pool => self.pool = checked,
            Service::ReviewEvent => self.review_event = checked,
        }
    }

    /// Services that are checked, in stored order.
    pub fn active(&self) -> Vec<Service> {
        Service::ALL
            .into_iter()
            .filter(|service| self.get(*service))
            .collect()
    }
}

/// One booking, as normalized from a worksheet row.
///
/// `checkout_date`, `extra_guests`, and the redundant month columns are
/// derived; [`Reservation::sync_derived`] recomputes them and must be called
/// after any field edit and before any write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reservation {
    /// Position of the row backing this record.
    pub row: RowRef,
    /// Sheet-owned sequential identifier (column A). Read-only here.
    pub no: i64,
    /// Booking year; rows with a non-positive year are blanks.
    pub year: i32,
    pub name: String,
    pub phone: String,
    /// Month of `booking_date`, kept in sync when the date is present.
    pub booking_month: u32,
    pub booking_date: Option<NaiveDate>,
    /// Month of `stay_date`, kept in sync when the date is present.
    pub stay_month: u32,
    pub stay_date: Option<NaiveDate>,
    pub nights: i64,
    /// Always `stay_date + nights`; never edited independently.
    pub checkout_date: Option<NaiveDate>,
    pub total_guests: i64,
    pub adults: i64,
    pub children: i64,
    /// Always `max(0, total_guests - 2)`; never edited independently.
    pub extra_guests: i64,
    pub services: Services,
    /// Amount in whole won, non-negative.
    pub amount: i64,
    pub notes: String,
    /// Id of the mirrored calendar event, when one was created.
    pub calendar_event_id: Option<String>,
}

impl Reservation {
    /// Recomputes every derived field from its source fields.
    ///
    /// The year and month columns follow their dates when those are present;
    /// otherwise the stored values stand (old rows may carry a year with no
    /// parseable booking date).
    pub fn sync_derived(&mut self) {
        if let Some(date) = self.booking_date {
            self.year = date.year();
            self.booking_month = date.month();
        }
        if let Some(date) = self.stay_date {
            self.stay_month = date.month();
        }
        self.checkout_date = self
            .stay_date
            .map(|date| date + Duration::days(self.nights));
        self.extra_guests = (self.total_guests - 2).max(0);
    }

    /// Days between booking and stay, when both dates are present.
    ///
    /// Negative values (stay before booking) are data-entry inconsistencies
    /// and surface as `None` so they never enter an average.
    pub fn lead_time_days(&self) -> Option<i64> {
        let booking = self.booking_date?;
        let stay = self.stay_date?;
        let days = (stay - booking).num_days();
        (days >= 0).then_some(days)
    }

    /// Cell values in stored column order, excluding the identifier column.
    ///
    /// This is the append payload: columns B through V, ending with the
    /// calendar event id.
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells = self.to_update_cells();
        cells.push(self.calendar_event_id.clone().unwrap_or_default());
        cells
    }

    /// Cell values for an in-place update: columns B through U.
    ///
    /// Excludes both sheet-owned columns an update must not disturb: the
    /// identifier (A) and the calendar event id (V).
    pub fn to_update_cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.name.clone(),
            self.phone.clone(),
            self.booking_month.to_string(),
            format_date_cell(self.booking_date),
            self.stay_month.to_string(),
            format_date_cell(self.stay_date),
            self.nights.to_string(),
            format_date_cell(self.checkout_date),
            self.total_guests.to_string(),
            self.adults.to_string(),
            self.children.to_string(),
            self.extra_guests.to_string(),
            flag_cell(self.services.barbecue).to_string(),
            flag_cell(self.services.bonfire).to_string(),
            flag_cell(self.services.barbecue_bonfire).to_string(),
            flag_cell(self.services.pool).to_string(),
            flag_cell(self.services.review_event).to_string(),
            self.amount.to_string(),
            self.notes.clone(),
        ]
    }
}

fn format_date_cell(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sync_derived_recomputes_checkout_and_extras() {
        let mut reservation = Reservation {
            booking_date: Some(date(2024, 2, 20)),
            stay_date: Some(date(2024, 3, 5)),
            nights: 2,
            total_guests: 5,
            ..Reservation::default()
        };
        reservation.sync_derived();
        assert_eq!(reservation.year, 2024);
        assert_eq!(reservation.booking_month, 2);
        assert_eq!(reservation.stay_month, 3);
        assert_eq!(reservation.checkout_date, Some(date(2024, 3, 7)));
        assert_eq!(reservation.extra_guests, 3);
    }

    #[test]
    fn sync_derived_keeps_stored_year_without_booking_date() {
        let mut reservation = Reservation {
            year: 2023,
            booking_month: 7,
            stay_date: Some(date(2023, 8, 1)),
            nights: 1,
            ..Reservation::default()
        };
        reservation.sync_derived();
        assert_eq!(reservation.year, 2023);
        assert_eq!(reservation.booking_month, 7);
        assert_eq!(reservation.checkout_date, Some(date(2023, 8, 2)));
    }

    #[test]
    fn extra_guests_never_negative() {
        let mut reservation = Reservation {
            total_guests: 1,
            ..Reservation::default()
        };
        reservation.sync_derived();
        assert_eq!(reservation.extra_guests, 0);
    }

    #[test]
    fn lead_time_excludes_inconsistent_rows() {
        let consistent = Reservation {
            booking_date: Some(date(2024, 3, 1)),
            stay_date: Some(date(2024, 3, 11)),
            ..Reservation::default()
        };
        assert_eq!(consistent.lead_time_days(), Some(10));

        let inverted = Reservation {
            booking_date: Some(date(2024, 3, 11)),
            stay_date: Some(date(2024, 3, 1)),
            ..Reservation::default()
        };
        assert_eq!(inverted.lead_time_days(), None);

        let incomplete = Reservation {
            stay_date: Some(date(2024, 3, 1)),
            ..Reservation::default()
        };
        assert_eq!(incomplete.lead_time_days(), None);
    }

    #[test]
    fn update_cells_cover_columns_b_through_u() {
        let mut reservation = Reservation {
            name: "홍길동".to_string(),
            phone: "010-1234-5678".to_string(),
            booking_date: Some(date(2024, 2, 20)),
            stay_date: Some(date(2024, 3, 5)),
            nights: 1,
            total_guests: 2,
            adults: 2,
            amount: 150_000,
            ..Reservation::default()
        };
        reservation.services.pool = true;
        reservation.sync_derived();

        let cells = reservation.to_update_cells();
        // B..U is 20 columns; the append payload adds the calendar id (V).
        assert_eq!(cells.len(), 20);
        assert_eq!(cells[0], "2024");
        assert_eq!(cells[1], "홍길동");
        assert_eq!(cells[4], "2024-02-20");
        assert_eq!(cells[6], "2024-03-05");
        assert_eq!(cells[8], "2024-03-06");
        assert_eq!(cells[16], "O");
        assert_eq!(cells[17], "X");
        assert_eq!(cells[18], "150000");

        let full = reservation.to_cells();
        assert_eq!(full.len(), 21);
        assert_eq!(full[20], "");
    }

    #[test]
    fn row_ref_from_fetch_index_starts_at_two() {
        assert_eq!(RowRef::from_fetch_index(0), RowRef(2));
        assert_eq!(RowRef::from_fetch_index(9), RowRef(11));
    }
}
