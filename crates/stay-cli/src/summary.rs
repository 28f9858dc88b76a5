//! Table rendering for the analytics views.
//!
//! Data tables use the worksheet's own (Korean) column names so the terminal
//! view lines up with the sheet people already know.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use stay_analytics::{
    GuestBucket, MonthOverMonth, MonthlyMetrics, MonthlyOccupancy, OccupancyShare, ServiceUsage,
    YearSummary, YearlyRevenue,
};
use stay_model::Reservation;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_kpi_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Formats a won amount with thousands separators: `₩1,234,567`.
pub fn format_won(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-₩{grouped}")
    } else {
        format!("₩{grouped}")
    }
}

/// Formats a delta with an explicit sign: `+₩50,000` / `-₩50,000`.
pub fn format_won_delta(delta: i64) -> String {
    if delta >= 0 {
        format!("+{}", format_won(delta))
    } else {
        format_won(delta)
    }
}

fn date_cell(date: Option<chrono::NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn services_cell(reservation: &Reservation) -> String {
    let active = reservation.services.active();
    if active.is_empty() {
        "-".to_string()
    } else {
        active
            .into_iter()
            .map(|service| service.label().to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Reservation list, one row per booking.
pub fn print_reservations(rows: &[&Reservation]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("행"),
        header_cell("No"),
        header_cell("연도"),
        header_cell("성함"),
        header_cell("전화번호"),
        header_cell("예약 일자"),
        header_cell("숙박 일자"),
        header_cell("퇴실 일자"),
        header_cell("박"),
        header_cell("인원"),
        header_cell("서비스"),
        header_cell("금액"),
        header_cell("비고"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 8, CellAlignment::Right);
    align_column(&mut table, 9, CellAlignment::Right);
    align_column(&mut table, 11, CellAlignment::Right);
    for reservation in rows {
        table.add_row(vec![
            Cell::new(reservation.row),
            Cell::new(reservation.no),
            Cell::new(reservation.year),
            Cell::new(&reservation.name),
            Cell::new(&reservation.phone),
            Cell::new(date_cell(reservation.booking_date)),
            Cell::new(date_cell(reservation.stay_date)),
            Cell::new(date_cell(reservation.checkout_date)),
            Cell::new(reservation.nights),
            Cell::new(reservation.total_guests),
            Cell::new(services_cell(reservation)),
            Cell::new(format_won(reservation.amount)),
            Cell::new(&reservation.notes),
        ]);
    }
    println!("{table}");
}

/// Dashboard KPI block: the selected month against the previous one, plus
/// year totals.
pub fn print_dashboard(
    summary: &YearSummary,
    comparison: &MonthOverMonth,
    share: &OccupancyShare,
) {
    println!(
        "{}년 {}월 현황",
        comparison.current.year, comparison.current.month
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("지표"),
        header_cell("값"),
        header_cell("전월 대비"),
    ]);
    apply_kpi_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![
        Cell::new("이번 달 매출"),
        Cell::new(format_won(comparison.current.revenue)),
        delta_cell(
            format_won_delta(comparison.revenue_delta),
            comparison.revenue_delta,
        ),
    ]);
    table.add_row(vec![
        Cell::new("이번 달 예약 수"),
        Cell::new(format!("{}건", comparison.current.bookings)),
        delta_cell(
            format!("{:+}건", comparison.bookings_delta),
            comparison.bookings_delta,
        ),
    ]);
    table.add_row(vec![
        Cell::new("올해 총 매출"),
        Cell::new(format_won(summary.revenue)),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("올해 총 예약 수"),
        Cell::new(format!("{}건", summary.bookings)),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("건당 평균 인원수"),
        Cell::new(format!("{:.1}명", summary.mean_guests)),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("건당 평균 금액"),
        Cell::new(format_won(summary.mean_amount.round() as i64)),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("어른/아이 비율"),
        Cell::new(match (share.adult_pct, share.child_pct) {
            (Some(adult), Some(child)) => format!("{adult:.0}% / {child:.0}%"),
            _ => "데이터 없음".to_string(),
        }),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("평균 예약 리드타임"),
        Cell::new(match summary.avg_lead_time {
            Some(days) => format!("{days:.0}일 전"),
            None => "데이터 없음".to_string(),
        }),
        Cell::new("-"),
    ]);
    println!("{table}");
}

fn delta_cell(text: String, delta: i64) -> Cell {
    if delta > 0 {
        Cell::new(text).fg(Color::Green)
    } else if delta < 0 {
        Cell::new(text).fg(Color::Red)
    } else {
        Cell::new(text)
    }
}

/// Twelve-row monthly detail table with a totals row.
pub fn print_monthly(year: i32, months: &[MonthlyMetrics]) {
    println!("{year}년 월별 상세 현황");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("월"),
        header_cell("예약수"),
        header_cell("총매출"),
        header_cell("평균금액"),
        header_cell("총숙박 일수"),
        header_cell("총인원"),
        header_cell("평균 인원"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_bookings = 0u32;
    let mut total_revenue = 0i64;
    let mut total_nights = 0i64;
    let mut total_guests = 0i64;
    for metrics in months {
        total_bookings += metrics.bookings;
        total_revenue += metrics.revenue;
        total_nights += metrics.nights;
        total_guests += metrics.guests;
        table.add_row(vec![
            Cell::new(format!("{}월", metrics.month)),
            Cell::new(metrics.bookings),
            Cell::new(format_won(metrics.revenue)),
            Cell::new(format_won(metrics.mean_amount.round() as i64)),
            Cell::new(format!("{}박", metrics.nights)),
            Cell::new(format!("{}명", metrics.guests)),
            Cell::new(format!("{:.1}명", metrics.mean_guests)),
        ]);
    }
    table.add_row(vec![
        Cell::new("합계").add_attribute(Attribute::Bold),
        Cell::new(total_bookings).add_attribute(Attribute::Bold),
        Cell::new(format_won(total_revenue)).add_attribute(Attribute::Bold),
        Cell::new("-"),
        Cell::new(format!("{total_nights}박")).add_attribute(Attribute::Bold),
        Cell::new(format!("{total_guests}명")).add_attribute(Attribute::Bold),
        Cell::new("-"),
    ]);
    println!("{table}");
}

/// Per-month adult/child/extra sums.
pub fn print_monthly_occupancy(year: i32, months: &[MonthlyOccupancy]) {
    println!("{year}년 월별 어른/아이/추가인원");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("월"),
        header_cell("어른"),
        header_cell("아이"),
        header_cell("추가인원"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for entry in months {
        table.add_row(vec![
            Cell::new(format!("{}월", entry.month)),
            Cell::new(entry.adults),
            Cell::new(entry.children),
            Cell::new(entry.extra),
        ]);
    }
    println!("{table}");
}

/// Service utilization counts and rates.
pub fn print_services(year: i32, usage: &[ServiceUsage]) {
    println!("{year}년 추가 서비스 이용률");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("서비스"),
        header_cell("이용 횟수"),
        header_cell("이용률"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in usage {
        table.add_row(vec![
            Cell::new(entry.service.label()),
            Cell::new(format!("{}건", entry.count)),
            Cell::new(format!("{:.1}%", entry.rate)),
        ]);
    }
    println!("{table}");
}

/// Year-over-year revenue comparison.
pub fn print_yearly(yearly: &[YearlyRevenue]) {
    println!("연도별 매출 비교");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("연도"),
        header_cell("매출"),
        header_cell("예약수"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in yearly {
        table.add_row(vec![
            Cell::new(entry.year),
            Cell::new(format_won(entry.revenue)),
            Cell::new(entry.bookings),
        ]);
    }
    println!("{table}");
}

/// Party-size distribution.
pub fn print_distribution(year: i32, buckets: &[GuestBucket]) {
    println!("{year}년 인원수 분포");
    let mut table = Table::new();
    table.set_header(vec![header_cell("인원수"), header_cell("예약 수")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for bucket in buckets {
        table.add_row(vec![
            Cell::new(format!("{}명", bucket.guests)),
            Cell::new(bucket.bookings),
        ]);
    }
    println!("{table}");
}
