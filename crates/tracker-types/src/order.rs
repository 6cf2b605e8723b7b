//! Order domain types for the tracking service.
//!
//! This module defines the order entity, its line items, and the status
//! flow building blocks used throughout the tracking lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stage in the fulfillment flow.
///
/// Definitions are static: the flow is an ordered sequence of these values,
/// constructed once at startup and never mutated. Ordering is significant,
/// it defines the only legal transition sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
	/// Short identifier, unique within the flow and stable across releases.
	pub code: String,
	/// Human-readable name shown to customers.
	pub label: String,
	/// Explanation of what the stage means.
	pub description: String,
}

/// A stage the order has entered, with the moment it entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
	pub code: String,
	pub label: String,
	pub description: String,
	/// When the order transitioned into this status.
	pub entered_at: DateTime<Utc>,
}

impl StatusHistoryEntry {
	/// Builds a history entry from a flow definition and an entry time.
	pub fn from_definition(definition: &StatusDefinition, entered_at: DateTime<Utc>) -> Self {
		Self {
			code: definition.code.clone(),
			label: definition.label.clone(),
			description: definition.description.clone(),
			entered_at,
		}
	}
}

/// A purchased line item on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
	/// Catalog identifier of the purchased product.
	pub product_id: String,
	/// Product name at the time of purchase.
	pub name: String,
	/// Unit price at the time of purchase.
	pub price: f64,
	/// Number of units purchased.
	pub quantity: u32,
}

/// A customer order as persisted by the storage layer.
///
/// Orders are created at checkout, which is outside this subsystem; the
/// tracker only ever reads and advances them. `status_history` is
/// append-only and is always an order-preserving prefix of the status flow.
/// Once history is non-empty, `status_index` equals `status_history.len() - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Caller-visible identifier, always starting with the shop prefix.
	pub order_number: String,
	/// Contact address used jointly with the order number as the lookup key.
	pub email: String,
	/// Purchased line items.
	#[serde(default)]
	pub items: Vec<LineItem>,
	/// Order total.
	pub total: f64,
	/// Estimated delivery date.
	pub estimated_delivery: DateTime<Utc>,
	/// Timestamp when this order was created.
	pub created_at: DateTime<Utc>,
	/// Timestamp when this order was last updated.
	pub updated_at: DateTime<Utc>,
	/// Current position in the status flow.
	#[serde(default)]
	pub status_index: usize,
	/// Append-only log of stages this order has entered.
	#[serde(default)]
	pub status_history: Vec<StatusHistoryEntry>,
}

impl Order {
	/// Returns the status the order is currently in, if any stage has been
	/// entered yet. Orders fresh from checkout may have an empty history
	/// until the tracker lazily initializes it.
	pub fn current_status(&self) -> Option<&StatusHistoryEntry> {
		self.status_history.last()
	}
}
