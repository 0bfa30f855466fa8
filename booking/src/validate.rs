//! Pure step validators.
//!
//! One total function per step payload: any input yields `Ok(())` or a
//! tagged [`ValidationError`], never a panic and never a side effect.
//! These run synchronously inside the reducer before a step is stored.
//!
//! Date/time validation is deliberately split in two: the shape check
//! lives here, while the availability re-check is an async effect against
//! the live reservation repository. Availability can change between slot
//! display and slot claim, so it must never be decided by a pure function
//! over stale data.

use crate::error::ValidationError;
use crate::types::{
    BookingDateTime, BookingGuestInfo, BookingPaymentInfo, BookingServiceDetails,
};

/// Lowest accepted party size
pub const MIN_GUESTS: u32 = 1;

/// Highest accepted party size
pub const MAX_GUESTS: u32 = 20;

/// Validate the shape of a date/time payload.
///
/// Availability is NOT checked here; see the availability gate in the
/// flow reducer.
///
/// # Errors
///
/// - [`ValidationError::InvalidDuration`] when the duration is zero
/// - [`ValidationError::MissingTimezone`] when the timezone is blank
pub fn validate_date_time(payload: &BookingDateTime) -> Result<(), ValidationError> {
    if payload.duration_minutes == 0 {
        return Err(ValidationError::InvalidDuration(payload.duration_minutes));
    }

    if payload.timezone.trim().is_empty() {
        return Err(ValidationError::MissingTimezone);
    }

    Ok(())
}

/// Validate guest contact details and party size.
///
/// # Errors
///
/// - [`ValidationError::EmptyName`] when the name is blank after trimming
/// - [`ValidationError::InvalidEmail`] when the email fails the grammar
/// - [`ValidationError::GuestCountOutOfRange`] when the party size is
///   outside `1..=20`
pub fn validate_guest_info(payload: &BookingGuestInfo) -> Result<(), ValidationError> {
    if payload.guest_name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if !is_valid_email(&payload.guest_email) {
        return Err(ValidationError::InvalidEmail(payload.guest_email.clone()));
    }

    if !(MIN_GUESTS..=MAX_GUESTS).contains(&payload.number_of_guests) {
        return Err(ValidationError::GuestCountOutOfRange(
            payload.number_of_guests,
        ));
    }

    Ok(())
}

/// Validate the service selection and its pricing.
///
/// # Errors
///
/// - [`ValidationError::MissingServiceId`] when no service was selected
/// - [`ValidationError::InvalidPricing`] when the total price is zero
pub fn validate_service_details(
    payload: &BookingServiceDetails,
) -> Result<(), ValidationError> {
    if payload.service_id.is_none() {
        return Err(ValidationError::MissingServiceId);
    }

    if payload.total_price.is_zero() {
        return Err(ValidationError::InvalidPricing);
    }

    Ok(())
}

/// Validate payment amounts and method.
///
/// # Errors
///
/// - [`ValidationError::InvalidAmount`] when the final amount is zero
/// - [`ValidationError::MissingPaymentMethod`] when neither a payment
///   method nor a payment intent is present
/// - [`ValidationError::AmbiguousPaymentMethod`] when both are present
pub fn validate_payment_info(payload: &BookingPaymentInfo) -> Result<(), ValidationError> {
    if payload.final_amount.is_zero() {
        return Err(ValidationError::InvalidAmount);
    }

    match (&payload.payment_method_id, &payload.payment_intent_id) {
        (None, None) => Err(ValidationError::MissingPaymentMethod),
        (Some(_), Some(_)) => Err(ValidationError::AmbiguousPaymentMethod),
        _ => Ok(()),
    }
}

/// Validate email address format.
///
/// This performs basic RFC 5322 validation:
/// - Must contain exactly one `@`
/// - Must have non-empty local and domain parts
/// - Domain must contain at least one dot with non-empty labels
/// - Length must be between 3 and 255 characters
///
/// # Examples
///
/// ```
/// use reservapp_booking::validate::is_valid_email;
///
/// assert!(is_valid_email("ana@x.com"));
/// assert!(is_valid_email("user+tag@subdomain.example.com"));
/// assert!(!is_valid_email("invalid"));
/// assert!(!is_valid_email("@example.com"));
/// assert!(!is_valid_email("user@"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 || email.len() > 255 {
        return false;
    }

    // Must contain exactly one @
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    // Domain must contain at least one dot
    if !domain.contains('.') {
        return false;
    }

    let valid_local_chars =
        |c: char| c.is_alphanumeric() || c == '.' || c == '-' || c == '+' || c == '_';
    let valid_domain_chars = |c: char| c.is_alphanumeric() || c == '.' || c == '-';

    if !local.chars().all(valid_local_chars) {
        return false;
    }

    if !domain.chars().all(valid_domain_chars) {
        return false;
    }

    // Domain parts between dots must be non-empty
    domain.split('.').all(|part| !part.is_empty())
}
