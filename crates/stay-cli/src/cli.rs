//! CLI argument definitions for staydesk.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "staydesk",
    version,
    about = "Reservation desk for a small vacation rental",
    long_about = "Manage pension reservations stored in a shared spreadsheet.\n\n\
                  Bookings are mirrored to a shared calendar; analytics views\n\
                  cover revenue, occupancy, services, and booking lead time."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: staydesk.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show this month's KPIs, deltas, and recent bookings.
    Dashboard(DashboardArgs),

    /// List reservations, optionally filtered.
    List(ListArgs),

    /// Revenue, services, occupancy, and lead-time analysis for one year.
    Revenue(RevenueArgs),

    /// Add a reservation and mirror it to the calendar.
    Add(AddArgs),

    /// Edit the reservation at a worksheet row.
    Edit(EditArgs),

    /// Delete the reservation at a worksheet row.
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct DashboardArgs {
    /// Year to report on (default: current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Month to report on, 1-12 (default: current month).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Number of recent bookings to show.
    #[arg(long, default_value_t = 10)]
    pub recent: usize,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only this year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Only this stay month, 1-12.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Only names containing this text.
    #[arg(long, value_name = "TEXT")]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct RevenueArgs {
    /// Year to analyze (default: the most recent year with data).
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Guest name.
    #[arg(long)]
    pub name: String,

    /// Guest phone number.
    #[arg(long)]
    pub phone: String,

    /// Booking date, YYYY-MM-DD (default: today).
    #[arg(long, value_name = "DATE")]
    pub booking_date: Option<NaiveDate>,

    /// Stay (check-in) date, YYYY-MM-DD (default: today).
    #[arg(long, value_name = "DATE")]
    pub stay_date: Option<NaiveDate>,

    /// Number of nights.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..=30))]
    pub nights: i64,

    /// Total guest count.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(i64).range(1..=50))]
    pub guests: i64,

    /// Adult count.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(i64).range(0..=50))]
    pub adults: i64,

    /// Child count.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=50))]
    pub children: i64,

    /// Barbecue service.
    #[arg(long)]
    pub barbecue: bool,

    /// Bonfire service.
    #[arg(long)]
    pub bonfire: bool,

    /// Barbecue + bonfire combo.
    #[arg(long = "barbecue-bonfire")]
    pub barbecue_bonfire: bool,

    /// Pool use.
    #[arg(long)]
    pub pool: bool,

    /// Review-event participation.
    #[arg(long = "review-event")]
    pub review_event: bool,

    /// Amount in won.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=99_999_999))]
    pub amount: i64,

    /// Free-text notes.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Skip the calendar mirror for this booking.
    #[arg(long = "no-calendar")]
    pub no_calendar: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Worksheet row of the reservation (as shown by `list`).
    #[arg(value_name = "ROW")]
    pub row: usize,

    /// New guest name.
    #[arg(long)]
    pub name: Option<String>,

    /// New phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// New booking date, YYYY-MM-DD.
    #[arg(long, value_name = "DATE")]
    pub booking_date: Option<NaiveDate>,

    /// New stay date, YYYY-MM-DD.
    #[arg(long, value_name = "DATE")]
    pub stay_date: Option<NaiveDate>,

    /// New number of nights.
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=30))]
    pub nights: Option<i64>,

    /// New total guest count.
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=50))]
    pub guests: Option<i64>,

    /// New adult count.
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=50))]
    pub adults: Option<i64>,

    /// New child count.
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=50))]
    pub children: Option<i64>,

    /// Barbecue service, as a sheet flag token (O/Y/예/true/1 or X).
    #[arg(long, value_name = "FLAG", value_parser = parse_flag_token)]
    pub barbecue: Option<bool>,

    /// Bonfire service flag token.
    #[arg(long, value_name = "FLAG", value_parser = parse_flag_token)]
    pub bonfire: Option<bool>,

    /// Barbecue + bonfire combo flag token.
    #[arg(long = "barbecue-bonfire", value_name = "FLAG", value_parser = parse_flag_token)]
    pub barbecue_bonfire: Option<bool>,

    /// Pool use flag token.
    #[arg(long, value_name = "FLAG", value_parser = parse_flag_token)]
    pub pool: Option<bool>,

    /// Review-event participation flag token.
    #[arg(long = "review-event", value_name = "FLAG", value_parser = parse_flag_token)]
    pub review_event: Option<bool>,

    /// New amount in won.
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=99_999_999))]
    pub amount: Option<i64>,

    /// New notes.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Worksheet row of the reservation (as shown by `list`).
    #[arg(value_name = "ROW")]
    pub row: usize,

    /// Keep the mirrored calendar event instead of deleting it.
    #[arg(long = "keep-event")]
    pub keep_event: bool,
}

/// Interprets a service-flag argument with the same (write-context) token
/// set the sheet uses: `O`, `Y`, `YES`, `예`, `TRUE`, `1` check the flag,
/// anything else (typically `X`) clears it.
fn parse_flag_token(value: &str) -> Result<bool, std::convert::Infallible> {
    Ok(stay_model::is_checked(value))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_parses_dates_and_flags() {
        let cli = Cli::try_parse_from([
            "staydesk",
            "add",
            "--name",
            "홍길동",
            "--phone",
            "010-1234-5678",
            "--stay-date",
            "2024-03-05",
            "--nights",
            "2",
            "--pool",
            "--amount",
            "150000",
        ])
        .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(
            args.stay_date,
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert!(args.pool);
        assert!(!args.barbecue);
        assert_eq!(args.amount, 150_000);
    }

    #[test]
    fn month_filter_is_range_checked() {
        assert!(Cli::try_parse_from(["staydesk", "list", "--month", "13"]).is_err());
        assert!(Cli::try_parse_from(["staydesk", "list", "--month", "12"]).is_ok());
    }

    #[test]
    fn edit_accepts_sheet_flag_tokens() {
        let cli = Cli::try_parse_from([
            "staydesk",
            "edit",
            "4",
            "--barbecue",
            "O",
            "--pool",
            "X",
            "--bonfire",
            "예",
        ])
        .unwrap();
        let Command::Edit(args) = cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(args.row, 4);
        assert_eq!(args.barbecue, Some(true));
        assert_eq!(args.pool, Some(false));
        assert_eq!(args.bonfire, Some(true));
        assert_eq!(args.amount, None);
    }
}
