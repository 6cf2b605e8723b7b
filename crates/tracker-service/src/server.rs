//! HTTP server for the order tracking API.
//!
//! This module provides a minimal HTTP server infrastructure for the
//! tracking endpoint.

use axum::{extract::State, response::Json, routing::post, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracker_config::ServerConfig;
use tracker_core::TrackerEngine;
use tracker_types::{ApiError, TrackOrderRequest, TrackOrderResponse};

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the tracker engine for processing requests.
	pub engine: Arc<TrackerEngine>,
}

/// Starts the HTTP server for the API.
///
/// This function creates and configures the HTTP server with routing,
/// middleware, and error handling for the tracking endpoint.
pub async fn start_server(
	server_config: ServerConfig,
	engine: Arc<TrackerEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app_state = AppState { engine };

	// Build the router with /api base path and the tracking endpoint
	let app = Router::new()
		.nest(
			"/api",
			Router::new().route("/orders/track", post(handle_track)),
		)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive()),
		)
		.with_state(app_state);

	let bind_address = format!("{}:{}", server_config.host, server_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Order tracking API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles POST /api/orders/track requests.
///
/// This endpoint retrieves the current status and full history of an order
/// identified by its order number and email, advancing the simulated
/// fulfillment state as a side effect.
async fn handle_track(
	State(state): State<AppState>,
	Json(request): Json<TrackOrderRequest>,
) -> Result<Json<TrackOrderResponse>, ApiError> {
	crate::apis::track::track_order(&state.engine, &request)
		.await
		.map(Json)
}
