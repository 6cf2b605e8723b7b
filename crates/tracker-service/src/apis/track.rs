//! Order tracking API implementation.
//!
//! This module implements the tracking endpoint, translating engine
//! failures into the exact wire errors the frontend expects. Validation
//! messages pass through verbatim; lookup failures never reveal which of
//! the two identifiers was wrong, and infrastructure failures are logged
//! but reported generically.

use tracing::{info, warn};
use tracker_core::{TrackError, TrackerEngine};
use tracker_types::{ApiError, TrackOrderRequest, TrackOrderResponse};

/// Processes a tracking request and maps failures onto API errors.
pub async fn track_order(
	engine: &TrackerEngine,
	request: &TrackOrderRequest,
) -> Result<TrackOrderResponse, ApiError> {
	match engine.track(request).await {
		Ok(response) => {
			info!(
				order_number = %response.order_number,
				status = %response.current_status.code,
				"order tracked"
			);
			Ok(response)
		},
		Err(e) => {
			warn!("Order tracking failed: {}", e);
			Err(map_error(e))
		},
	}
}

/// Maps an engine failure to its wire representation.
fn map_error(error: TrackError) -> ApiError {
	match error {
		TrackError::Validation(e) => ApiError::BadRequest(e.to_string()),
		TrackError::NotFound => ApiError::order_not_found(),
		TrackError::Storage(_) | TrackError::Internal(_) => ApiError::tracking_unavailable(),
	}
}
