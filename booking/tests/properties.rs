//! Property coverage for the validators, the step-order gate, and the
//! confirmation number format.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use reservapp_booking::confirmation::confirmation_number;
use reservapp_booking::types::{BookingGuestInfo, BookingStep, ReservationId, ServiceId, VenueId};
use reservapp_booking::validate::{is_valid_email, validate_guest_info, MAX_GUESTS, MIN_GUESTS};
use reservapp_booking::{BookingFlowState, ValidationError};
use std::collections::HashSet;

fn guest_info(guests: u32, name: &str, email: &str) -> BookingGuestInfo {
    BookingGuestInfo {
        number_of_guests: guests,
        guest_name: name.to_string(),
        guest_email: email.to_string(),
        guest_phone: None,
        special_requests: None,
    }
}

#[test]
fn can_proceed_to_is_exhaustively_gated() {
    // Every pair (completed-set-as-prefix, target): reachable iff the
    // prefix covers everything strictly before the target.
    for prefix_len in 0..=BookingStep::REQUIRED.len() {
        let mut state = BookingFlowState::new(VenueId::new("v"), ServiceId::new("s"));
        for step in BookingStep::REQUIRED.iter().take(prefix_len) {
            state.completed_steps.insert(*step);
        }

        for target in BookingStep::ORDER {
            let expected = target.index() <= prefix_len;
            assert_eq!(
                state.can_proceed_to(target),
                expected,
                "prefix of {prefix_len} completed steps, target {target}"
            );
        }
    }
}

#[test]
fn gapped_completion_blocks_everything_after_the_gap() {
    // Non-prefix completed sets: any gap blocks all later steps.
    let all: Vec<BookingStep> = BookingStep::REQUIRED.to_vec();
    for mask in 0u8..16 {
        let completed: HashSet<BookingStep> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, s)| *s)
            .collect();

        let mut state = BookingFlowState::new(VenueId::new("v"), ServiceId::new("s"));
        state.completed_steps.clone_from(&completed);

        for target in BookingStep::ORDER {
            let expected = BookingStep::ORDER
                .iter()
                .take_while(|s| **s != target)
                .all(|s| completed.contains(s));
            assert_eq!(state.can_proceed_to(target), expected);
        }
    }
}

proptest! {
    #[test]
    fn guest_count_is_accepted_exactly_in_range(guests in 0u32..100) {
        let info = guest_info(guests, "Ana", "ana@example.com");
        let result = validate_guest_info(&info);
        if (MIN_GUESTS..=MAX_GUESTS).contains(&guests) {
            prop_assert_eq!(result, Ok(()));
        } else {
            prop_assert_eq!(result, Err(ValidationError::GuestCountOutOfRange(guests)));
        }
    }

    #[test]
    fn whitespace_only_names_are_always_rejected(name in "[ \\t]{0,10}") {
        let info = guest_info(2, &name, "ana@example.com");
        prop_assert_eq!(validate_guest_info(&info), Err(ValidationError::EmptyName));
    }

    #[test]
    fn well_formed_emails_are_accepted(
        local in "[a-z0-9][a-z0-9._+-]{0,20}",
        domain in "[a-z0-9][a-z0-9-]{0,10}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{local}@{domain}.{tld}");
        prop_assert!(is_valid_email(&email));
    }

    #[test]
    fn emails_without_an_at_sign_are_rejected(s in "[a-z0-9.]{3,30}") {
        prop_assert!(!is_valid_email(&s));
    }

    #[test]
    fn validators_never_panic_on_arbitrary_strings(
        name in ".*",
        email in ".*",
        guests in any::<u32>(),
    ) {
        let info = guest_info(guests, &name, &email);
        let _ = validate_guest_info(&info);
    }

    #[test]
    fn confirmation_number_always_matches_the_format(
        id in ".{0,40}",
        seconds in 0i64..4_102_444_800, // through 2100-01-01
    ) {
        let now = DateTime::<Utc>::from_timestamp(seconds, 0).unwrap();
        let number = confirmation_number(now, &ReservationId::new(id));

        let parts: Vec<&str> = number.split('-').collect();
        prop_assert_eq!(parts.len(), 3);
        prop_assert_eq!(parts[0], "RES");
        prop_assert_eq!(parts[1].len(), 6);
        prop_assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(parts[2].len(), 4);
        prop_assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
