//! Demo order seeding.
//!
//! Orders normally come from checkout, which lives outside this service.
//! To make the tracker usable out of the box, a small set of demo orders
//! is inserted at startup. Existing orders are never overwritten, so
//! advancement state survives restarts with a persistent backend.

use tracker_core::Clock;
use tracker_storage::{OrderStore, StorageError};
use tracker_types::{LineItem, Order};

/// Inserts the demo orders that are not already present.
///
/// Returns the number of orders inserted.
pub async fn seed_demo_orders(
	store: &OrderStore,
	clock: &dyn Clock,
) -> Result<usize, StorageError> {
	let mut inserted = 0;

	for order in demo_orders(clock.now()) {
		if store.exists(&order.order_number).await? {
			tracing::debug!(
				order_number = %order.order_number,
				"demo order already present, skipping"
			);
			continue;
		}
		store.save(&order).await?;
		inserted += 1;
	}

	Ok(inserted)
}

/// The fixed demo catalog. History is left empty so the tracker's
/// lazy-initialization path is exercised on the first lookup.
fn demo_orders(now: chrono::DateTime<chrono::Utc>) -> Vec<Order> {
	let item = |product_id: &str, name: &str, price: f64, quantity: u32| LineItem {
		product_id: product_id.to_string(),
		name: name.to_string(),
		price,
		quantity,
	};

	vec![
		Order {
			order_number: "FE-100200".to_string(),
			email: "buyer@example.com".to_string(),
			items: vec![
				item("sku-4411", "Aurora Wireless Headphones", 129.99, 1),
				item("sku-2087", "USB-C Fast Charger", 24.50, 2),
			],
			total: 178.99,
			estimated_delivery: now + chrono::Duration::days(7),
			created_at: now,
			updated_at: now,
			status_index: 0,
			status_history: vec![],
		},
		Order {
			order_number: "FE-204861".to_string(),
			email: "dana@example.com".to_string(),
			items: vec![item("sku-9034", "Nebula 4K Action Camera", 349.00, 1)],
			total: 349.00,
			estimated_delivery: now + chrono::Duration::days(5),
			created_at: now,
			updated_at: now,
			status_index: 0,
			status_history: vec![],
		},
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use tracker_core::SystemClock;
	use tracker_storage::implementations::memory::MemoryStorage;

	#[tokio::test]
	async fn seeds_into_empty_store() {
		let store = OrderStore::new(Box::new(MemoryStorage::new()));

		let inserted = seed_demo_orders(&store, &SystemClock).await.unwrap();

		assert_eq!(inserted, 2);
		assert!(store.exists("FE-100200").await.unwrap());
		assert!(store.exists("FE-204861").await.unwrap());
	}

	#[tokio::test]
	async fn reseeding_preserves_existing_orders() {
		let store = OrderStore::new(Box::new(MemoryStorage::new()));
		seed_demo_orders(&store, &SystemClock).await.unwrap();

		// Advance one order, then seed again.
		let mut order = store
			.find_by_number_and_email("FE-100200", "buyer@example.com")
			.await
			.unwrap()
			.unwrap();
		order.status_index = 0;
		order.status_history.push(tracker_types::StatusHistoryEntry {
			code: "placed".to_string(),
			label: "Order Placed".to_string(),
			description: "We have received your order and confirmed your payment.".to_string(),
			entered_at: chrono::Utc::now(),
		});
		store.save(&order).await.unwrap();

		let inserted = seed_demo_orders(&store, &SystemClock).await.unwrap();
		assert_eq!(inserted, 0);

		let reloaded = store
			.find_by_number_and_email("FE-100200", "buyer@example.com")
			.await
			.unwrap()
			.unwrap();
		assert_eq!(reloaded.status_history.len(), 1);
	}
}
