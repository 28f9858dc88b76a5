//! Dataset loading.

use tracing::info;

use stay_model::{Reservation, RowRef};
use stay_sheets::{SheetStore, SheetsError};

use crate::normalize::normalize_row;

/// The working in-memory dataset: every retained reservation, in sheet
/// order, each carrying the worksheet row backing it.
///
/// Never cached across mutations: reload after any append, update, or
/// delete, because deletes shift the row references of later records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub rows: Vec<Reservation>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The reservation backed by the given worksheet row, if retained.
    pub fn by_row(&self, row: RowRef) -> Option<&Reservation> {
        self.rows.iter().find(|reservation| reservation.row == row)
    }

    /// Distinct years present, newest first.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|reservation| reservation.year).collect();
        years.sort_unstable();
        years.dedup();
        years.reverse();
        years
    }

    /// Rows matching the interactive filters: year, stay month, and a name
    /// substring.
    pub fn filter(
        &self,
        year: Option<i32>,
        stay_month: Option<u32>,
        name_contains: Option<&str>,
    ) -> Vec<&Reservation> {
        self.rows
            .iter()
            .filter(|reservation| year.is_none_or(|year| reservation.year == year))
            .filter(|reservation| stay_month.is_none_or(|month| reservation.stay_month == month))
            .filter(|reservation| {
                name_contains.is_none_or(|needle| reservation.name.contains(needle))
            })
            .collect()
    }

    /// The most recent `count` rows in reverse sheet order (newest first).
    pub fn recent(&self, count: usize) -> Vec<&Reservation> {
        self.rows.iter().rev().take(count).collect()
    }
}

/// Fetches every row from the store and normalizes it into the working
/// dataset.
///
/// The first fetched row is the header; each data row gets the 1-based
/// worksheet position it was fetched from. Rows with a non-positive year or
/// a blank name are blank/placeholder rows, not errors, and are dropped.
/// An unreachable store is an error; an empty store is an empty dataset.
pub fn load_dataset(store: &dyn SheetStore) -> Result<Dataset, SheetsError> {
    let mut raw = store.read_all()?.into_iter();
    let Some(headers) = raw.next() else {
        info!("worksheet is empty, starting with no reservations");
        return Ok(Dataset::default());
    };

    let mut rows = Vec::new();
    let mut blanks = 0usize;
    for (index, cells) in raw.enumerate() {
        let reservation = normalize_row(&headers, &cells, RowRef::from_fetch_index(index));
        if reservation.year <= 0 || reservation.name.is_empty() {
            blanks += 1;
            continue;
        }
        rows.push(reservation);
    }
    info!(retained = rows.len(), blanks, "loaded dataset");
    Ok(Dataset { rows })
}
