//! Reservation-to-event composition.

use chrono::NaiveDate;

use stay_model::{Reservation, Service};

use crate::error::{CalendarError, Result};

/// Content of one all-day calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContent {
    pub summary: String,
    pub description: String,
    /// All-day date: the stay (check-in) date.
    pub date: NaiveDate,
}

/// Destination for reservation events.
///
/// Implemented by the hosted client; tests substitute recording or failing
/// fakes to exercise the partial-failure paths without a network.
pub trait EventSink {
    /// Creates an all-day event and returns its identifier.
    fn create_event(&self, event: &EventContent) -> Result<String>;

    /// Deletes the event with the given identifier.
    fn delete_event(&self, event_id: &str) -> Result<()>;
}

/// Icon shown before a service name in event descriptions.
fn service_icon(service: Service) -> &'static str {
    match service {
        Service::Barbecue => "🍖",
        Service::Bonfire => "🔥",
        Service::BarbecueBonfire => "🍖🔥",
        Service::Pool => "🏊",
        Service::ReviewEvent => "⭐",
    }
}

/// Composes the calendar event mirroring a reservation.
///
/// Fails only when the reservation has no stay date to schedule; everything
/// else degrades to omission (no services line, no notes line).
pub fn reservation_event(reservation: &Reservation) -> Result<EventContent> {
    let date = reservation.stay_date.ok_or(CalendarError::MissingStayDate)?;

    let summary = format!(
        "{} (성인 {}명 / 아이 {}명)",
        reservation.name, reservation.adults, reservation.children,
    );

    let mut description = format!(
        "📞 전화번호: {}\n👨‍👩‍👧 성인: {}명 / 아이: {}명",
        reservation.phone, reservation.adults, reservation.children,
    );

    let services: Vec<String> = reservation
        .services
        .active()
        .into_iter()
        .map(|service| format!("{} {}", service_icon(service), service.label()))
        .collect();
    if !services.is_empty() {
        description.push_str("\n\n");
        description.push_str(&services.join(" / "));
    }

    let notes = reservation.notes.trim();
    if !notes.is_empty() && notes != "nan" {
        description.push_str(&format!("\n\n📝 비고: {notes}"));
    }

    Ok(EventContent {
        summary,
        description,
        date,
    })
}

#[cfg(test)]
mod tests {
    use stay_model::Services;

    use super::*;

    fn reservation() -> Reservation {
        Reservation {
            name: "홍길동".to_string(),
            phone: "010-1234-5678".to_string(),
            adults: 2,
            children: 1,
            stay_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            ..Reservation::default()
        }
    }

    #[test]
    fn summary_names_the_party() {
        let event = reservation_event(&reservation()).unwrap();
        assert_eq!(event.summary, "홍길동 (성인 2명 / 아이 1명)");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn description_lists_active_services_and_notes() {
        let mut reservation = reservation();
        reservation.services = Services {
            barbecue: true,
            pool: true,
            ..Services::default()
        };
        reservation.notes = "늦은 체크인".to_string();
        let event = reservation_event(&reservation).unwrap();
        insta::assert_snapshot!(event.description, @r"
        📞 전화번호: 010-1234-5678
        👨‍👩‍👧 성인: 2명 / 아이: 1명

        🍖 바비큐 / 🏊 수영장

        📝 비고: 늦은 체크인
        ");
    }

    #[test]
    fn blank_or_nan_notes_are_omitted() {
        for notes in ["", "   ", "nan"] {
            let mut reservation = reservation();
            reservation.notes = notes.to_string();
            let event = reservation_event(&reservation).unwrap();
            assert!(!event.description.contains("📝"));
        }
    }

    #[test]
    fn no_services_means_no_service_line() {
        let event = reservation_event(&reservation()).unwrap();
        assert!(!event.description.contains('/') || event.description.contains("아이"));
        assert!(!event.description.contains("🍖"));
    }

    #[test]
    fn missing_stay_date_is_an_error() {
        let mut reservation = reservation();
        reservation.stay_date = None;
        assert!(matches!(
            reservation_event(&reservation),
            Err(CalendarError::MissingStayDate)
        ));
    }
}
