//! Spreadsheet store access.
//!
//! The worksheet is the system of record. This crate provides the
//! [`SheetStore`] seam, the hosted-API client implementing it, an in-memory
//! implementation for tests, and the row mutation gateway (append, update,
//! delete by row position).

pub mod client;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod store;

pub use client::SheetsClient;
pub use error::SheetsError;
pub use gateway::{append_reservation, delete_reservation, update_reservation};
pub use memory::MemorySheet;
pub use store::SheetStore;
