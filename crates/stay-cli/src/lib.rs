//! Library components for the staydesk CLI.

pub mod config;
pub mod logging;
