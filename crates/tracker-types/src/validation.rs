//! Request normalization and validation for tracking lookups.
//!
//! Rules are checked in a fixed order so the first failing rule determines
//! the reported message: missing fields, then order number format, then
//! email format. The error display strings are the exact wire messages.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Literal prefix every order number must start with.
pub const ORDER_NUMBER_PREFIX: &str = "FE-";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Errors raised while validating a tracking request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
	/// One or both identifiers were absent or blank.
	#[error("Order number and email are required.")]
	MissingFields,
	/// The normalized order number does not carry the required prefix.
	#[error("Invalid order number format.")]
	InvalidOrderNumber,
	/// The normalized email fails the `local@domain.tld` pattern.
	#[error("Invalid email format.")]
	InvalidEmail,
}

/// Normalized pair of identifiers used to look an order up.
///
/// The pairing functions as a capability token: anyone who knows both
/// values can view and advance the order. That contract is deliberate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingKey {
	/// Order number, trimmed and upper-cased.
	pub order_number: String,
	/// Email, trimmed and lower-cased.
	pub email: String,
}

/// Validates raw tracking identifiers and returns the normalized key.
///
/// Blank strings count as missing, matching the frontend contract where an
/// empty form field must produce the missing-fields error.
pub fn validate_tracking_request(
	order_number: Option<&str>,
	email: Option<&str>,
) -> Result<TrackingKey, RequestValidationError> {
	let order_number = order_number.unwrap_or_default().trim();
	let email = email.unwrap_or_default().trim();

	if order_number.is_empty() || email.is_empty() {
		return Err(RequestValidationError::MissingFields);
	}

	let order_number = order_number.to_uppercase();
	let email = email.to_lowercase();

	if !order_number.starts_with(ORDER_NUMBER_PREFIX) {
		return Err(RequestValidationError::InvalidOrderNumber);
	}

	if !EMAIL_PATTERN.is_match(&email) {
		return Err(RequestValidationError::InvalidEmail);
	}

	Ok(TrackingKey {
		order_number,
		email,
	})
}
