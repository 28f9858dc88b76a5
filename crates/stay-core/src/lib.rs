//! Normalization and dataset pipeline.
//!
//! Raw worksheet rows are loosely typed text; this crate turns them into
//! typed [`stay_model::Reservation`] records, loads the working dataset, and
//! orchestrates the paired store + calendar mutations.

pub mod actions;
pub mod dataset;
pub mod normalize;

pub use actions::{AddOutcome, CalendarSync, DeleteOutcome, add_reservation, remove_reservation, save_reservation};
pub use dataset::{Dataset, load_dataset};
pub use normalize::{normalize_row, parse_amount, parse_date, parse_int};
