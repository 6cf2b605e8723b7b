//! Storage module for the order tracking service.
//!
//! This module provides abstractions for persistent storage of orders,
//! supporting different backend implementations such as in-memory or
//! file-based storage.

use async_trait::async_trait;
use thiserror::Error;
use tracker_types::{ConfigSchema, Order};

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

/// Namespace prefix under which orders are keyed.
pub const ORDER_NAMESPACE: &str = "orders";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested item is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// This trait must be implemented by any storage backend that wants to
/// hold tracked orders. It provides basic key-value operations; typed
/// access goes through [`OrderStore`].
#[async_trait]
pub trait StorageInterface: Send + Sync {
	/// Retrieves raw bytes for the given key.
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes under the given key, overwriting any prior value.
	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Deletes the value associated with the given key.
	async fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Checks if a key exists in storage.
	async fn exists(&self, key: &str) -> Result<bool, StorageError>;

	/// Returns the configuration schema for validation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;
}

/// Type alias for storage factory functions.
///
/// This is the function signature that all storage implementations must
/// provide to create instances of their storage interface.
pub type StorageFactory = fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>;

/// Get all registered storage implementations.
///
/// Returns a vector of (name, factory) tuples for all available storage
/// implementations, used by the service to select the configured backend.
pub fn get_all_implementations() -> Vec<(&'static str, StorageFactory)> {
	use implementations::{file, memory};

	vec![
		(file::NAME, file::create_storage as StorageFactory),
		(memory::NAME, memory::create_storage as StorageFactory),
	]
}

/// High-level order store that provides typed operations.
///
/// The OrderStore wraps a low-level storage backend and provides the two
/// operations the tracker needs: find one order by its normalized
/// order-number/email pair, and persist a mutated order.
pub struct OrderStore {
	/// The underlying storage backend implementation.
	backend: Box<dyn StorageInterface>,
}

impl OrderStore {
	/// Creates a new OrderStore with the specified backend.
	pub fn new(backend: Box<dyn StorageInterface>) -> Self {
		Self { backend }
	}

	fn key(order_number: &str) -> String {
		format!("{}:{}", ORDER_NAMESPACE, order_number)
	}

	/// Looks up the order matching both identifiers.
	///
	/// Orders are keyed by order number; the stored email is compared after
	/// retrieval. A wrong email yields `None` just like a missing order, so
	/// callers cannot tell which of the two fields was wrong.
	pub async fn find_by_number_and_email(
		&self,
		order_number: &str,
		email: &str,
	) -> Result<Option<Order>, StorageError> {
		let bytes = match self.backend.get_bytes(&Self::key(order_number)).await {
			Ok(bytes) => bytes,
			Err(StorageError::NotFound) => return Ok(None),
			Err(e) => return Err(e),
		};

		let order: Order = serde_json::from_slice(&bytes)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;

		if order.email != email {
			return Ok(None);
		}

		Ok(Some(order))
	}

	/// Persists an order, overwriting any prior version.
	///
	/// Plain last-write-wins: concurrent trackers of the same order can
	/// race on the read-modify-write, which matches the best-effort
	/// simulation semantics of the advancement engine.
	pub async fn save(&self, order: &Order) -> Result<(), StorageError> {
		let bytes = serde_json::to_vec(order)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend
			.set_bytes(&Self::key(&order.order_number), bytes)
			.await
	}

	/// Checks whether an order with the given number exists.
	pub async fn exists(&self, order_number: &str) -> Result<bool, StorageError> {
		self.backend.exists(&Self::key(order_number)).await
	}

	/// Removes an order from storage.
	pub async fn remove(&self, order_number: &str) -> Result<(), StorageError> {
		self.backend.delete(&Self::key(order_number)).await
	}
}
