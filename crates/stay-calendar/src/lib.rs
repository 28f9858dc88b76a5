//! Calendar service access.
//!
//! Every reservation is mirrored as an all-day event on a shared calendar.
//! This crate composes the event content from a reservation and provides the
//! [`EventSink`] seam plus the hosted-API client implementing it.

pub mod client;
pub mod error;
pub mod event;

pub use client::CalendarClient;
pub use error::CalendarError;
pub use event::{EventContent, EventSink, reservation_event};
