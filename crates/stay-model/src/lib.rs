pub mod flags;
pub mod reservation;
pub mod schema;

pub use flags::{flag_cell, is_checked, is_checked_read};
pub use reservation::{Reservation, RowRef, Service, Services};
pub use schema::{Column, SCHEMA_VERSION};
