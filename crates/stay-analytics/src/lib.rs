//! Analytics over the normalized reservation dataset.
//!
//! Every view re-derives from a freshly built frame; nothing is cached.
//! Grouped aggregates are zero-filled: a month with no bookings reports
//! zeros, never a missing key, so downstream tables and axes stay stable
//! regardless of data sparsity.

pub mod compare;
pub mod distribution;
pub mod frame;
pub mod leadtime;
pub mod monthly;
pub mod occupancy;
pub mod services;

pub use compare::{MonthOverMonth, MonthSnapshot, YearSummary, YearlyRevenue, month_over_month, year_summary, yearly_revenue};
pub use distribution::{GuestBucket, guest_distribution};
pub use frame::build_frame;
pub use leadtime::average_lead_time;
pub use monthly::{MonthlyMetrics, MonthlyOccupancy, monthly_breakdown, monthly_occupancy};
pub use occupancy::{OccupancyShare, occupancy_share};
pub use services::{ServiceUsage, service_usage};
