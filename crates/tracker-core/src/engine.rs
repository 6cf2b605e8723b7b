//! The advancement engine and the tracking engine.
//!
//! The advancement engine decides, per tracking request, whether an order
//! moves to the next stage of the flow. The tracking engine wraps it with
//! validation, lookup, and persistence for one request.

use crate::flow::StatusFlow;
use crate::random::RandomSource;
use crate::time::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracker_storage::{OrderStore, StorageError};
use tracker_types::{
	validate_tracking_request, Order, RequestValidationError, StatusHistoryEntry,
	TrackOrderRequest, TrackOrderResponse,
};

/// Errors that can occur while processing a tracking request.
#[derive(Debug, Error)]
pub enum TrackError {
	/// The caller-supplied identifiers failed validation.
	#[error("{0}")]
	Validation(#[from] RequestValidationError),
	/// No order matches the normalized identifier pair.
	#[error("order not found")]
	NotFound,
	/// The persistence layer failed.
	#[error("storage error: {0}")]
	Storage(#[from] StorageError),
	/// An internal invariant was violated.
	#[error("internal error: {0}")]
	Internal(String),
}

/// Probability thresholds for the advancement decision.
///
/// New orders settle before progressing quickly, but once moving they tend
/// to keep moving. A simulation artifact, not a fulfillment rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvancementProbabilities {
	/// Chance to advance while still at the initial status.
	pub initial: f64,
	/// Chance to advance once the order has moved at least once before.
	pub moving: f64,
}

impl Default for AdvancementProbabilities {
	fn default() -> Self {
		Self {
			initial: 0.35,
			moving: 0.75,
		}
	}
}

/// Decides and applies status advancement for a single order.
///
/// Time and randomness are injected so tests can make the engine
/// deterministic; production wiring uses the system clock and the
/// thread-local RNG.
pub struct AdvancementEngine {
	flow: Arc<StatusFlow>,
	clock: Arc<dyn Clock>,
	random: Arc<dyn RandomSource>,
	probabilities: AdvancementProbabilities,
}

impl AdvancementEngine {
	/// Creates a new engine over the given flow, clock, and random source.
	pub fn new(
		flow: Arc<StatusFlow>,
		clock: Arc<dyn Clock>,
		random: Arc<dyn RandomSource>,
		probabilities: AdvancementProbabilities,
	) -> Self {
		Self {
			flow,
			clock,
			random,
			probabilities,
		}
	}

	/// The flow this engine advances orders through.
	pub fn flow(&self) -> &StatusFlow {
		&self.flow
	}

	/// Lazily initializes an order's history to the first flow stage.
	///
	/// Orders may be created at checkout without an initial status; every
	/// tracked order must present at least one history entry. Idempotent:
	/// a no-op when history is already non-empty. Returns whether the
	/// order was mutated.
	pub fn ensure_initial_status(&self, order: &mut Order) -> bool {
		if !order.status_history.is_empty() {
			return false;
		}

		let Some(first) = self.flow.get(0) else {
			return false;
		};

		let now = self.clock.now();
		order
			.status_history
			.push(StatusHistoryEntry::from_definition(first, now));
		order.status_index = 0;
		order.updated_at = now;
		true
	}

	/// Probabilistically advances an order to the next flow stage.
	///
	/// The terminal stage is absorbing: orders there never advance,
	/// regardless of random draws. Returns whether an advancement
	/// occurred, so the caller knows to re-persist the history.
	pub fn advance_status(&self, order: &mut Order) -> bool {
		if self.flow.is_empty() || order.status_index >= self.flow.terminal_index() {
			return false;
		}

		let threshold = if order.status_history.len() > 1 {
			self.probabilities.moving
		} else {
			self.probabilities.initial
		};

		if self.random.next_f64() >= threshold {
			return false;
		}

		let next_index = order.status_index + 1;
		let Some(next) = self.flow.get(next_index) else {
			return false;
		};

		let now = self.clock.now();
		order.status_index = next_index;
		order
			.status_history
			.push(StatusHistoryEntry::from_definition(next, now));
		order.updated_at = now;

		tracing::debug!(
			order_number = %order.order_number,
			status = %next.code,
			"order advanced to next status"
		);

		true
	}
}

/// Runs one tracking request end to end.
///
/// Control flow: validate identifiers, look the order up, ensure the
/// initial status, attempt advancement, persist if anything changed,
/// assemble the response.
pub struct TrackerEngine {
	store: OrderStore,
	advancement: AdvancementEngine,
}

impl TrackerEngine {
	/// Creates a new tracker over the given store and advancement engine.
	pub fn new(store: OrderStore, advancement: AdvancementEngine) -> Self {
		Self { store, advancement }
	}

	/// The order store, exposed for startup seeding.
	pub fn store(&self) -> &OrderStore {
		&self.store
	}

	/// Processes a tracking request.
	pub async fn track(&self, request: &TrackOrderRequest) -> Result<TrackOrderResponse, TrackError> {
		let key = validate_tracking_request(
			request.order_number.as_deref(),
			request.email.as_deref(),
		)?;

		let mut order = self
			.store
			.find_by_number_and_email(&key.order_number, &key.email)
			.await?
			.ok_or(TrackError::NotFound)?;

		let mut mutated = self.advancement.ensure_initial_status(&mut order);
		mutated |= self.advancement.advance_status(&mut order);

		if mutated {
			self.store.save(&order).await?;
		}

		let current_status = order
			.current_status()
			.cloned()
			.ok_or_else(|| TrackError::Internal("order has no status history".to_string()))?;

		Ok(TrackOrderResponse {
			order_number: order.order_number,
			email: order.email,
			current_status,
			status_history: order.status_history,
			status_flow: self.advancement.flow().stages().to_vec(),
			total: order.total,
			items: order.items,
			estimated_delivery: order.estimated_delivery,
			created_at: order.created_at,
			updated_at: order.updated_at,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::random::{FixedRandom, SequenceRandom};
	use crate::time::FixedClock;
	use chrono::{TimeZone, Utc};
	use tracker_storage::implementations::memory::MemoryStorage;

	fn fixed_now() -> chrono::DateTime<Utc> {
		Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap()
	}

	fn new_order() -> Order {
		let now = fixed_now();
		Order {
			order_number: "FE-100200".to_string(),
			email: "buyer@example.com".to_string(),
			items: vec![],
			total: 129.99,
			estimated_delivery: now + chrono::Duration::days(7),
			created_at: now,
			updated_at: now,
			status_index: 0,
			status_history: vec![],
		}
	}

	fn engine(random: Arc<dyn RandomSource>) -> AdvancementEngine {
		AdvancementEngine::new(
			Arc::new(StatusFlow::standard()),
			Arc::new(FixedClock(fixed_now())),
			random,
			AdvancementProbabilities::default(),
		)
	}

	fn assert_invariants(order: &Order, flow: &StatusFlow) {
		assert_eq!(order.status_index, order.status_history.len() - 1);
		for (i, entry) in order.status_history.iter().enumerate() {
			assert_eq!(entry.code, flow.get(i).unwrap().code);
		}
	}

	#[test]
	fn ensure_initial_status_is_idempotent() {
		let engine = engine(Arc::new(FixedRandom(0.99)));
		let mut order = new_order();

		assert!(engine.ensure_initial_status(&mut order));
		let after_first = order.clone();

		assert!(!engine.ensure_initial_status(&mut order));
		assert_eq!(order, after_first);
		assert_eq!(order.status_history.len(), 1);
		assert_eq!(order.status_history[0].code, "placed");
		assert_eq!(order.status_index, 0);
	}

	#[test]
	fn always_advancing_random_walks_the_flow_one_stage_per_call() {
		let engine = engine(Arc::new(FixedRandom(0.0)));
		let flow = StatusFlow::standard();
		let mut order = new_order();
		engine.ensure_initial_status(&mut order);

		for expected_index in 1..flow.len() {
			assert!(engine.advance_status(&mut order));
			assert_eq!(order.status_index, expected_index);
			assert_invariants(&order, &flow);
		}

		// Terminal stage is absorbing.
		for _ in 0..10 {
			assert!(!engine.advance_status(&mut order));
		}
		assert_eq!(order.status_index, flow.terminal_index());
		assert_eq!(order.status_history.len(), flow.len());
	}

	#[test]
	fn never_advancing_random_leaves_the_order_alone() {
		let engine = engine(Arc::new(FixedRandom(0.99)));
		let mut order = new_order();
		engine.ensure_initial_status(&mut order);
		let before = order.clone();

		for _ in 0..10 {
			assert!(!engine.advance_status(&mut order));
		}
		assert_eq!(order, before);
	}

	#[test]
	fn initial_orders_use_the_lower_threshold() {
		// One history entry: threshold is 0.35. A draw of 0.5 must not
		// advance, a draw of 0.3 must.
		let hesitant = engine(Arc::new(FixedRandom(0.5)));
		let mut order = new_order();
		hesitant.ensure_initial_status(&mut order);
		assert!(!hesitant.advance_status(&mut order));

		let eager = engine(Arc::new(FixedRandom(0.3)));
		assert!(eager.advance_status(&mut order));
		assert_eq!(order.status_index, 1);
	}

	#[test]
	fn moving_orders_use_the_higher_threshold() {
		// Draws: 0.3 advances past the initial stage, then 0.5 is below
		// the 0.75 moving threshold and advances again.
		let engine = engine(Arc::new(SequenceRandom::new([0.3, 0.5])));
		let mut order = new_order();
		engine.ensure_initial_status(&mut order);

		assert!(engine.advance_status(&mut order));
		assert!(engine.advance_status(&mut order));
		assert_eq!(order.status_index, 2);
		assert_invariants(&order, &StatusFlow::standard());
	}

	fn tracker(random: Arc<dyn RandomSource>) -> TrackerEngine {
		TrackerEngine::new(
			OrderStore::new(Box::new(MemoryStorage::new())),
			engine(random),
		)
	}

	fn request(order_number: &str, email: &str) -> TrackOrderRequest {
		TrackOrderRequest {
			order_number: Some(order_number.to_string()),
			email: Some(email.to_string()),
		}
	}

	#[tokio::test]
	async fn first_track_of_fresh_order_reports_initial_status() {
		let tracker = tracker(Arc::new(FixedRandom(0.99)));
		tracker.store().save(&new_order()).await.unwrap();

		let response = tracker
			.track(&request("FE-100200", "buyer@example.com"))
			.await
			.unwrap();

		assert_eq!(response.current_status.code, "placed");
		assert_eq!(response.status_history.len(), 1);
		assert_eq!(response.status_flow.len(), 5);
	}

	#[tokio::test]
	async fn repeated_tracking_without_advancement_is_stable() {
		let tracker = tracker(Arc::new(FixedRandom(0.99)));
		tracker.store().save(&new_order()).await.unwrap();
		let req = request("FE-100200", "buyer@example.com");

		let first = tracker.track(&req).await.unwrap();
		let second = tracker.track(&req).await.unwrap();

		assert_eq!(first.status_history, second.status_history);
	}

	#[tokio::test]
	async fn tracking_advances_one_stage_per_call_until_terminal() {
		let tracker = tracker(Arc::new(FixedRandom(0.0)));
		tracker.store().save(&new_order()).await.unwrap();
		let req = request("FE-100200", "buyer@example.com");

		// First call initializes and advances once.
		let response = tracker.track(&req).await.unwrap();
		assert_eq!(response.status_history.len(), 2);

		let mut last = response;
		for _ in 0..10 {
			last = tracker.track(&req).await.unwrap();
		}
		assert_eq!(last.current_status.code, "delivered");
		assert_eq!(last.status_history.len(), 5);
	}

	#[tokio::test]
	async fn lookup_normalizes_identifiers() {
		let tracker = tracker(Arc::new(FixedRandom(0.99)));
		tracker.store().save(&new_order()).await.unwrap();

		let response = tracker
			.track(&request(" fe-100200 ", " BUYER@example.com"))
			.await
			.unwrap();
		assert_eq!(response.order_number, "FE-100200");
	}

	#[tokio::test]
	async fn unknown_order_is_not_found() {
		let tracker = tracker(Arc::new(FixedRandom(0.99)));

		let result = tracker
			.track(&request("FE-999999", "buyer@example.com"))
			.await;
		assert!(matches!(result, Err(TrackError::NotFound)));
	}

	#[tokio::test]
	async fn wrong_email_is_not_found() {
		let tracker = tracker(Arc::new(FixedRandom(0.99)));
		tracker.store().save(&new_order()).await.unwrap();

		let result = tracker
			.track(&request("FE-100200", "stranger@example.com"))
			.await;
		assert!(matches!(result, Err(TrackError::NotFound)));
	}

	#[tokio::test]
	async fn validation_failures_surface_in_rule_order() {
		let tracker = tracker(Arc::new(FixedRandom(0.99)));

		let missing = tracker
			.track(&TrackOrderRequest {
				order_number: Some("".to_string()),
				email: Some("a@b.com".to_string()),
			})
			.await;
		assert!(matches!(
			missing,
			Err(TrackError::Validation(RequestValidationError::MissingFields))
		));

		let bad_prefix = tracker.track(&request("XX-1", "a@b.com")).await;
		assert!(matches!(
			bad_prefix,
			Err(TrackError::Validation(
				RequestValidationError::InvalidOrderNumber
			))
		));

		let bad_email = tracker.track(&request("FE-1", "not-an-email")).await;
		assert!(matches!(
			bad_email,
			Err(TrackError::Validation(RequestValidationError::InvalidEmail))
		));
	}

	#[tokio::test]
	async fn mutations_are_persisted() {
		let tracker = tracker(Arc::new(FixedRandom(0.0)));
		tracker.store().save(&new_order()).await.unwrap();
		let req = request("FE-100200", "buyer@example.com");

		tracker.track(&req).await.unwrap();

		let stored = tracker
			.store()
			.find_by_number_and_email("FE-100200", "buyer@example.com")
			.await
			.unwrap()
			.unwrap();
		assert_eq!(stored.status_history.len(), 2);
		assert_eq!(stored.status_index, 1);
	}
}
