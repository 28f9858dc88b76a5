//! Command implementations.
//!
//! Every command re-fetches and re-normalizes the full dataset before doing
//! anything; nothing is cached across invocations. The two hosted-service
//! clients are built once per run and passed by reference.

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local};
use tracing::{debug, info};

use stay_analytics::{
    average_lead_time, build_frame, guest_distribution, month_over_month, monthly_breakdown,
    monthly_occupancy, occupancy_share, service_usage, year_summary, yearly_revenue,
};
use stay_calendar::{CalendarClient, EventSink};
use stay_core::{CalendarSync, Dataset, add_reservation, load_dataset, remove_reservation, save_reservation};
use stay_model::{Reservation, RowRef, Services};
use stay_sheets::SheetsClient;

use stay_cli::config::Settings;

use crate::cli::{AddArgs, DashboardArgs, DeleteArgs, EditArgs, ListArgs, RevenueArgs};
use crate::summary;

/// The two hosted-service clients, constructed once per process.
pub struct Clients {
    pub store: SheetsClient,
    pub calendar: Option<CalendarClient>,
}

pub fn build_clients(settings: &Settings) -> Result<Clients> {
    let token = settings.token()?;
    let store = SheetsClient::new(
        token.clone(),
        settings.spreadsheet_id.clone(),
        settings.worksheet.clone(),
        settings.sheet_gid,
    );
    let calendar = settings
        .calendar_id
        .as_ref()
        .map(|calendar_id| CalendarClient::new(token, calendar_id.clone()));
    if calendar.is_none() {
        debug!("no calendar_id configured, calendar sync disabled");
    }
    Ok(Clients { store, calendar })
}

fn load(clients: &Clients) -> Result<Dataset> {
    load_dataset(&clients.store).context("load reservations from the spreadsheet")
}

pub fn run_dashboard(args: &DashboardArgs, settings: &Settings) -> Result<()> {
    let clients = build_clients(settings)?;
    let dataset = load(&clients)?;
    if dataset.is_empty() {
        println!("등록된 예약이 없습니다.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());

    let frame = build_frame(&dataset.rows)?;
    let summary_data = year_summary(&frame, year)?;
    let comparison = month_over_month(&frame, year, month)?;
    let share = occupancy_share(&frame, year)?;

    summary::print_dashboard(&summary_data, &comparison, &share);
    println!();
    println!("최근 예약 내역");
    summary::print_reservations(&dataset.recent(args.recent));
    Ok(())
}

pub fn run_list(args: &ListArgs, settings: &Settings) -> Result<()> {
    let clients = build_clients(settings)?;
    let dataset = load(&clients)?;

    let rows = dataset.filter(args.year, args.month, args.name.as_deref());
    summary::print_reservations(&rows);
    println!("총 {}건", rows.len());
    Ok(())
}

pub fn run_revenue(args: &RevenueArgs, settings: &Settings) -> Result<()> {
    let clients = build_clients(settings)?;
    let dataset = load(&clients)?;
    if dataset.is_empty() {
        println!("등록된 예약이 없습니다.");
        return Ok(());
    }

    let year = match args.year {
        Some(year) => year,
        // newest year with data
        None => dataset.years()[0],
    };

    let frame = build_frame(&dataset.rows)?;
    summary::print_monthly(year, &monthly_breakdown(&frame, year)?);
    println!();
    summary::print_monthly_occupancy(year, &monthly_occupancy(&frame, year)?);
    println!();
    summary::print_services(year, &service_usage(&frame, year)?);
    println!();
    summary::print_yearly(&yearly_revenue(&frame)?);
    println!();
    summary::print_distribution(year, &guest_distribution(&frame, year)?);
    println!();
    match average_lead_time(&frame, Some(year))? {
        Some(days) => println!("{year}년 평균 예약 리드타임: {days:.0}일 전"),
        None => println!("{year}년 평균 예약 리드타임: 데이터 없음"),
    }
    Ok(())
}

pub fn run_add(args: &AddArgs, settings: &Settings) -> Result<()> {
    if args.name.trim().is_empty() {
        bail!("guest name must not be blank");
    }
    if args.phone.trim().is_empty() {
        bail!("phone number must not be blank");
    }
    if args.adults + args.children > args.guests {
        bail!(
            "adults ({}) + children ({}) exceed the total guest count ({})",
            args.adults,
            args.children,
            args.guests
        );
    }

    let clients = build_clients(settings)?;
    let today = Local::now().date_naive();
    let mut reservation = Reservation {
        name: args.name.trim().to_string(),
        phone: args.phone.trim().to_string(),
        booking_date: Some(args.booking_date.unwrap_or(today)),
        stay_date: Some(args.stay_date.unwrap_or(today)),
        nights: args.nights,
        total_guests: args.guests,
        adults: args.adults,
        children: args.children,
        services: Services {
            barbecue: args.barbecue,
            bonfire: args.bonfire,
            barbecue_bonfire: args.barbecue_bonfire,
            pool: args.pool,
            review_event: args.review_event,
        },
        amount: args.amount,
        notes: args.notes.clone(),
        ..Reservation::default()
    };

    let Clients {
        mut store,
        calendar,
    } = clients;
    let sink = if args.no_calendar {
        None
    } else {
        calendar.as_ref().map(|client| client as &dyn EventSink)
    };
    let outcome = add_reservation(&mut store, sink, &mut reservation)?;

    println!("Added reservation #{} for {}.", outcome.no, reservation.name);
    report_calendar_sync(&outcome.calendar);
    Ok(())
}

pub fn run_edit(args: &EditArgs, settings: &Settings) -> Result<()> {
    let clients = build_clients(settings)?;
    let dataset = load(&clients)?;
    let row = RowRef(args.row);
    let Some(existing) = dataset.by_row(row) else {
        bail!("no reservation at worksheet row {row}");
    };

    let mut edited = existing.clone();
    if let Some(name) = &args.name {
        if name.trim().is_empty() {
            bail!("guest name must not be blank");
        }
        edited.name = name.trim().to_string();
    }
    if let Some(phone) = &args.phone {
        edited.phone = phone.trim().to_string();
    }
    if let Some(date) = args.booking_date {
        edited.booking_date = Some(date);
    }
    if let Some(date) = args.stay_date {
        edited.stay_date = Some(date);
    }
    if let Some(nights) = args.nights {
        edited.nights = nights;
    }
    if let Some(guests) = args.guests {
        edited.total_guests = guests;
    }
    if let Some(adults) = args.adults {
        edited.adults = adults;
    }
    if let Some(children) = args.children {
        edited.children = children;
    }
    if let Some(checked) = args.barbecue {
        edited.services.barbecue = checked;
    }
    if let Some(checked) = args.bonfire {
        edited.services.bonfire = checked;
    }
    if let Some(checked) = args.barbecue_bonfire {
        edited.services.barbecue_bonfire = checked;
    }
    if let Some(checked) = args.pool {
        edited.services.pool = checked;
    }
    if let Some(checked) = args.review_event {
        edited.services.review_event = checked;
    }
    if let Some(amount) = args.amount {
        edited.amount = amount;
    }
    if let Some(notes) = &args.notes {
        edited.notes = notes.clone();
    }

    let mut store = clients.store;
    save_reservation(&mut store, row, &mut edited)?;
    println!("Updated worksheet row {row} ({}).", edited.name);
    Ok(())
}

pub fn run_delete(args: &DeleteArgs, settings: &Settings) -> Result<()> {
    let clients = build_clients(settings)?;
    let dataset = load(&clients)?;
    let row = RowRef(args.row);
    let Some(existing) = dataset.by_row(row) else {
        bail!("no reservation at worksheet row {row}");
    };
    let victim = existing.clone();

    let Clients {
        mut store,
        calendar,
    } = clients;
    let sink = if args.keep_event {
        None
    } else {
        calendar.as_ref().map(|client| client as &dyn EventSink)
    };
    let outcome = remove_reservation(&mut store, sink, &victim)?;

    println!("Deleted worksheet row {row} ({}).", victim.name);
    info!("row references after {row} have shifted down by one");
    report_calendar_sync(&outcome.calendar);
    Ok(())
}

/// Prints the calendar half of a mutation outcome, keeping it visibly
/// separate from the store result.
fn report_calendar_sync(sync: &CalendarSync) {
    match sync {
        CalendarSync::Created { event_id } => {
            println!("Calendar event created ({event_id}).");
        }
        CalendarSync::Deleted => println!("Calendar event deleted."),
        CalendarSync::Skipped { reason } => debug!(%reason, "calendar sync skipped"),
        CalendarSync::Failed { error } => {
            eprintln!("warning: calendar sync failed: {error}");
            eprintln!("         the spreadsheet change itself went through");
        }
    }
}
