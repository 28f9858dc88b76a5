//! Row mutation gateway.
//!
//! Three operations against the backing worksheet, addressed by external
//! row position. The identifier column (A) is sheet-owned: append assigns
//! the next sequential value, update never touches it.

use tracing::info;

use stay_model::schema::FIRST_DATA_ROW;
use stay_model::{Column, Reservation, RowRef};

use crate::error::{Result, SheetsError};
use crate::store::SheetStore;

/// Appends a new reservation row and returns its assigned identifier.
///
/// The identifier is the current data-row count plus one, matching how the
/// sheet has been numbered historically. Existing rows keep their positions.
pub fn append_reservation(store: &mut dyn SheetStore, reservation: &Reservation) -> Result<i64> {
    let rows = store.read_all()?;
    let data_rows = rows.len().saturating_sub(1);
    let next_no = data_rows as i64 + 1;

    let mut cells = Vec::with_capacity(Column::ORDER.len());
    cells.push(next_no.to_string());
    cells.extend(reservation.to_cells());
    store.append_row(&cells)?;
    info!(no = next_no, name = %reservation.name, "appended reservation row");
    Ok(next_no)
}

/// Replaces the fields of the row at `row`, leaving the identifier (A) and
/// calendar event id (V) columns untouched.
///
/// The written range starts at column B and its width is the update payload
/// length, so the range always covers exactly the editable field set.
pub fn update_reservation(
    store: &mut dyn SheetStore,
    row: RowRef,
    reservation: &Reservation,
) -> Result<()> {
    if row.0 < FIRST_DATA_ROW {
        return Err(SheetsError::NoSuchRow(row.0));
    }
    let cells = reservation.to_update_cells();
    store.update_cells(row, Column::Year.index() + 1, &cells)?;
    info!(%row, name = %reservation.name, "updated reservation row");
    Ok(())
}

/// Deletes the row at `row`. Every later row's position shifts down by one;
/// the caller must drop any references captured before the delete.
pub fn delete_reservation(store: &mut dyn SheetStore, row: RowRef) -> Result<()> {
    if row.0 < FIRST_DATA_ROW {
        return Err(SheetsError::NoSuchRow(row.0));
    }
    store.delete_row(row)?;
    info!(%row, "deleted reservation row");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::memory::MemorySheet;

    fn sample(name: &str) -> Reservation {
        let mut reservation = Reservation {
            name: name.to_string(),
            phone: "010-0000-0000".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2024, 2, 20),
            stay_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            nights: 1,
            total_guests: 2,
            adults: 2,
            amount: 150_000,
            ..Reservation::default()
        };
        reservation.sync_derived();
        reservation
    }

    #[test]
    fn append_assigns_sequential_identifiers() {
        let mut sheet = MemorySheet::new();
        assert_eq!(append_reservation(&mut sheet, &sample("첫째")).unwrap(), 1);
        assert_eq!(append_reservation(&mut sheet, &sample("둘째")).unwrap(), 2);
        let row = sheet.row(RowRef(3)).unwrap();
        assert_eq!(row[0], "2");
        assert_eq!(row[Column::Name.index()], "둘째");
        assert_eq!(row.len(), Column::ORDER.len());
    }

    #[test]
    fn update_preserves_identifier_and_calendar_columns() {
        let mut sheet = MemorySheet::new();
        let mut reservation = sample("홍길동");
        reservation.calendar_event_id = Some("evt-1".to_string());
        append_reservation(&mut sheet, &reservation).unwrap();

        let mut edited = sample("홍길동");
        edited.amount = 200_000;
        update_reservation(&mut sheet, RowRef(2), &edited).unwrap();

        let row = sheet.row(RowRef(2)).unwrap();
        assert_eq!(row[Column::No.index()], "1");
        assert_eq!(row[Column::Amount.index()], "200000");
        assert_eq!(row[Column::CalendarEventId.index()], "evt-1");
    }

    #[test]
    fn mutations_refuse_the_header_row() {
        let mut sheet = MemorySheet::new();
        let reservation = sample("홍길동");
        assert!(update_reservation(&mut sheet, RowRef(1), &reservation).is_err());
        assert!(delete_reservation(&mut sheet, RowRef(0)).is_err());
    }

    #[test]
    fn delete_shifts_later_positions() {
        let mut sheet = MemorySheet::new();
        append_reservation(&mut sheet, &sample("첫째")).unwrap();
        append_reservation(&mut sheet, &sample("둘째")).unwrap();
        append_reservation(&mut sheet, &sample("셋째")).unwrap();

        delete_reservation(&mut sheet, RowRef(3)).unwrap();

        assert_eq!(sheet.height(), 3);
        assert_eq!(sheet.row(RowRef(2)).unwrap()[Column::Name.index()], "첫째");
        assert_eq!(sheet.row(RowRef(3)).unwrap()[Column::Name.index()], "셋째");
    }
}
