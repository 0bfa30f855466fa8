//! Confirmation synthesis.
//!
//! Pure helpers that turn a created reservation into the record shown to
//! the guest. Everything here is deterministic given a clock reading and
//! a reservation id, which keeps the reducer testable with a fixed clock.

use crate::types::{BookingConfirmation, BookingGuestInfo, Reservation, ReservationId};
use chrono::{DateTime, Duration, Utc};

/// Party size above which the venue must approve the booking by hand
pub const APPROVAL_GUEST_THRESHOLD: u32 = 8;

/// How long the venue is given to confirm a new booking
const CONFIRMATION_WINDOW_HOURS: i64 = 1;

/// Build the confirmation record for a freshly created reservation.
#[must_use]
pub fn build_confirmation(
    reservation: &Reservation,
    guest_info: &BookingGuestInfo,
    now: DateTime<Utc>,
) -> BookingConfirmation {
    BookingConfirmation {
        reservation_id: reservation.id.clone(),
        confirmation_number: confirmation_number(now, &reservation.id),
        estimated_confirmation_time: now + Duration::hours(CONFIRMATION_WINDOW_HOURS),
        requires_approval: requires_approval(guest_info),
    }
}

/// Human-readable confirmation number.
///
/// Always matches `RES-\d{6}-[A-Z0-9]{4}`: six digits derived from the
/// submission instant, then the last four characters of the reservation
/// id, uppercased. Non-alphanumeric id characters are replaced and short
/// ids are padded so the suffix is always four characters.
#[must_use]
pub fn confirmation_number(now: DateTime<Utc>, reservation_id: &ReservationId) -> String {
    let digits = now.timestamp_millis().rem_euclid(1_000_000);

    let alnum: Vec<char> = reservation_id
        .as_str()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let tail = &alnum[alnum.len().saturating_sub(4)..];
    let mut suffix: String = tail.iter().flat_map(|c| c.to_uppercase()).collect();
    while suffix.len() < 4 {
        suffix.insert(0, '0');
    }

    format!("RES-{digits:06}-{suffix}")
}

/// Whether the venue must manually approve this booking.
///
/// Large parties and any special request go through manual approval.
#[must_use]
pub fn requires_approval(guest_info: &BookingGuestInfo) -> bool {
    if guest_info.number_of_guests > APPROVAL_GUEST_THRESHOLD {
        return true;
    }
    guest_info
        .special_requests
        .as_deref()
        .is_some_and(|requests| !requests.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn guest(guests: u32, requests: Option<&str>) -> BookingGuestInfo {
        BookingGuestInfo {
            number_of_guests: guests,
            guest_name: "Ana".to_string(),
            guest_email: "ana@x.com".to_string(),
            guest_phone: None,
            special_requests: requests.map(ToString::to_string),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn confirmation_number_matches_expected_shape() {
        let number = confirmation_number(now(), &ReservationId::new("abc123def456"));

        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "RES");
        assert_eq!(parts[1].len(), 6);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2], "F456");
    }

    #[test]
    fn short_or_symbolic_ids_still_yield_four_char_suffix() {
        for id in ["a", "", "--!!", "x-y"] {
            let number = confirmation_number(now(), &ReservationId::new(id));
            let suffix = number.rsplit('-').next().unwrap();
            assert_eq!(suffix.len(), 4);
            assert!(suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn approval_is_required_above_eight_guests() {
        assert!(!requires_approval(&guest(8, None)));
        assert!(requires_approval(&guest(9, None)));
    }

    #[test]
    fn approval_is_required_for_special_requests() {
        assert!(requires_approval(&guest(2, Some("window table"))));
        assert!(!requires_approval(&guest(2, Some("   "))));
        assert!(!requires_approval(&guest(2, None)));
    }

    #[test]
    fn estimated_confirmation_time_is_one_hour_out() {
        let reservation = Reservation {
            id: ReservationId::new("abcd1234"),
            venue_id: crate::types::VenueId::new("v1"),
            service_id: crate::types::ServiceId::new("s1"),
            date: chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            time: chrono::NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            status: crate::types::ReservationStatus::Pending,
            created_at: now(),
        };

        let confirmation = build_confirmation(&reservation, &guest(2, None), now());
        assert_eq!(
            confirmation.estimated_confirmation_time,
            now() + Duration::hours(1)
        );
        assert!(!confirmation.requires_approval);
        assert_eq!(confirmation.reservation_id, reservation.id);
    }
}
