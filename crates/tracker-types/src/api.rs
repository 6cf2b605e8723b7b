//! API types for the order tracking HTTP API.
//!
//! This module defines the request and response types for the tracking
//! endpoint, along with the error type that maps failures onto the exact
//! wire bodies the frontend expects.

use crate::{LineItem, StatusDefinition, StatusHistoryEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire message returned when no matching order exists.
pub const ORDER_NOT_FOUND_MESSAGE: &str =
	"Order not found. Double-check your email and order number.";

/// Wire message returned for any infrastructure failure.
pub const TRACKING_UNAVAILABLE_MESSAGE: &str = "Unable to fetch order status right now.";

/// Request body for `POST /api/orders/track`.
///
/// Both fields are required, but they are modeled as options so that an
/// absent field surfaces as the missing-fields error rather than a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackOrderRequest {
	#[serde(default)]
	pub order_number: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
}

/// Response body for a successful tracking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackOrderResponse {
	pub order_number: String,
	pub email: String,
	/// The last entry of `status_history`.
	pub current_status: StatusHistoryEntry,
	pub status_history: Vec<StatusHistoryEntry>,
	/// The full static flow, returned verbatim so clients can render a
	/// progress indicator.
	pub status_flow: Vec<StatusDefinition>,
	pub total: f64,
	pub items: Vec<LineItem>,
	pub estimated_delivery: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// API error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Human-readable description of the failure.
	pub error: String,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
	/// Client input error (400).
	BadRequest(String),
	/// No matching resource (404).
	NotFound(String),
	/// Infrastructure failure, reported generically (500).
	Internal(String),
}

impl ApiError {
	/// Builds the canonical not-found error.
	pub fn order_not_found() -> Self {
		ApiError::NotFound(ORDER_NOT_FOUND_MESSAGE.to_string())
	}

	/// Builds the canonical internal error. Internal detail is never
	/// exposed on the wire.
	pub fn tracking_unavailable() -> Self {
		ApiError::Internal(TRACKING_UNAVAILABLE_MESSAGE.to_string())
	}

	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::BadRequest(_) => 400,
			ApiError::NotFound(_) => 404,
			ApiError::Internal(_) => 500,
		}
	}

	/// Convert to the wire body for JSON serialization.
	pub fn to_body(&self) -> ErrorBody {
		let message = match self {
			ApiError::BadRequest(message)
			| ApiError::NotFound(message)
			| ApiError::Internal(message) => message,
		};
		ErrorBody {
			error: message.clone(),
		}
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApiError::BadRequest(message) => write!(f, "Bad Request: {}", message),
			ApiError::NotFound(message) => write!(f, "Not Found: {}", message),
			ApiError::Internal(message) => write!(f, "Internal Server Error: {}", message),
		}
	}
}

impl std::error::Error for ApiError {}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		(status, Json(self.to_body())).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_codes_match_error_classes() {
		assert_eq!(ApiError::BadRequest("x".into()).status_code(), 400);
		assert_eq!(ApiError::order_not_found().status_code(), 404);
		assert_eq!(ApiError::tracking_unavailable().status_code(), 500);
	}

	#[test]
	fn wire_body_is_single_error_field() {
		let body = ApiError::order_not_found().to_body();
		let json = serde_json::to_value(&body).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"error": "Order not found. Double-check your email and order number."
			})
		);
	}

	#[test]
	fn request_tolerates_missing_fields() {
		let request: TrackOrderRequest = serde_json::from_str("{}").unwrap();
		assert!(request.order_number.is_none());
		assert!(request.email.is_none());
	}
}
