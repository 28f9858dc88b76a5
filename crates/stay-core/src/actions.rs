//! Paired store + calendar mutations.
//!
//! The worksheet is the primary store; the calendar mirror is best-effort.
//! When one side succeeds and the other fails, both outcomes are reported
//! separately and nothing is compensated: no rollback, no retry, no
//! reconciliation. The caller (and the user) see exactly what happened.

use tracing::warn;

use stay_calendar::{EventSink, reservation_event};
use stay_model::{Reservation, RowRef};
use stay_sheets::{SheetStore, SheetsError, append_reservation, delete_reservation, update_reservation};

/// What happened on the calendar side of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarSync {
    /// Event created; the id is also written to the reservation row.
    Created { event_id: String },
    /// Event deleted.
    Deleted,
    /// Nothing to do: no sink configured, or no event id to delete.
    Skipped { reason: String },
    /// The calendar call failed; the store mutation still stands.
    Failed { error: String },
}

impl CalendarSync {
    pub fn is_failure(&self) -> bool {
        matches!(self, CalendarSync::Failed { .. })
    }
}

/// Result of adding a reservation: the assigned identifier plus the
/// calendar side's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub no: i64,
    pub calendar: CalendarSync,
}

/// Result of removing a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub calendar: CalendarSync,
}

/// Adds a reservation: calendar event first (to capture its id in the new
/// row), then the row append.
///
/// A calendar failure downgrades to a partial outcome and the row is still
/// appended, with an empty event id. A store failure is an error; if the
/// event was already created it is left standing, consistent with the
/// no-reconciliation rule.
pub fn add_reservation(
    store: &mut dyn SheetStore,
    sink: Option<&dyn EventSink>,
    reservation: &mut Reservation,
) -> Result<AddOutcome, SheetsError> {
    reservation.sync_derived();

    let calendar = match sink {
        None => CalendarSync::Skipped {
            reason: "calendar sync disabled".to_string(),
        },
        Some(sink) => match reservation_event(reservation)
            .and_then(|event| sink.create_event(&event))
        {
            Ok(event_id) => {
                reservation.calendar_event_id = Some(event_id.clone());
                CalendarSync::Created { event_id }
            }
            Err(error) => {
                warn!(%error, name = %reservation.name, "calendar event creation failed");
                reservation.calendar_event_id = None;
                CalendarSync::Failed {
                    error: error.to_string(),
                }
            }
        },
    };

    let no = append_reservation(store, reservation)?;
    reservation.no = no;
    Ok(AddOutcome { no, calendar })
}

/// Saves edits to an existing reservation row.
///
/// Store-only: the mirrored calendar event is not re-synced on edit, and the
/// identifier and event-id columns are preserved.
pub fn save_reservation(
    store: &mut dyn SheetStore,
    row: RowRef,
    reservation: &mut Reservation,
) -> Result<(), SheetsError> {
    reservation.sync_derived();
    update_reservation(store, row, reservation)
}

/// Removes a reservation: calendar event first (when one is linked), then
/// the row.
///
/// A calendar failure downgrades to a partial outcome and the row is still
/// deleted. Later rows shift up by one; the caller must reload.
pub fn remove_reservation(
    store: &mut dyn SheetStore,
    sink: Option<&dyn EventSink>,
    reservation: &Reservation,
) -> Result<DeleteOutcome, SheetsError> {
    let calendar = match (sink, reservation.calendar_event_id.as_deref()) {
        (None, _) => CalendarSync::Skipped {
            reason: "calendar sync disabled".to_string(),
        },
        (Some(_), None) => CalendarSync::Skipped {
            reason: "no calendar event id".to_string(),
        },
        (Some(sink), Some(event_id)) => match sink.delete_event(event_id) {
            Ok(()) => CalendarSync::Deleted,
            Err(error) => {
                warn!(%error, %event_id, "calendar event deletion failed");
                CalendarSync::Failed {
                    error: error.to_string(),
                }
            }
        },
    };

    delete_reservation(store, reservation.row)?;
    Ok(DeleteOutcome { calendar })
}
