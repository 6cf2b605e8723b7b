//! The fixed, ordered catalog of fulfillment stages.
//!
//! Every order progresses through the same sequence, in order, with no
//! skipping or branching. The flow is constructed once at startup and
//! shared by reference into the engine and the HTTP layer.

use tracker_types::StatusDefinition;

/// Immutable, ordered sequence of status definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFlow {
	stages: Vec<StatusDefinition>,
}

impl StatusFlow {
	/// The standard fulfillment flow every order passes through.
	pub fn standard() -> Self {
		let stage = |code: &str, label: &str, description: &str| StatusDefinition {
			code: code.to_string(),
			label: label.to_string(),
			description: description.to_string(),
		};

		Self {
			stages: vec![
				stage(
					"placed",
					"Order Placed",
					"We have received your order and confirmed your payment.",
				),
				stage(
					"confirmed",
					"Order Confirmed",
					"Your order has been verified and handed to our fulfillment team.",
				),
				stage(
					"processing",
					"Processing",
					"Your items are being picked and packed at the warehouse.",
				),
				stage(
					"shipped",
					"Shipped",
					"Your package is on its way with our delivery partner.",
				),
				stage(
					"delivered",
					"Delivered",
					"Your package has arrived. Enjoy your new gear!",
				),
			],
		}
	}

	/// Number of stages in the flow.
	pub fn len(&self) -> usize {
		self.stages.len()
	}

	/// True when the flow has no stages. The standard flow never is, but
	/// the engine does not assume it.
	pub fn is_empty(&self) -> bool {
		self.stages.is_empty()
	}

	/// The stage at the given position, if any.
	pub fn get(&self, index: usize) -> Option<&StatusDefinition> {
		self.stages.get(index)
	}

	/// Position of the final, absorbing stage.
	pub fn terminal_index(&self) -> usize {
		self.stages.len().saturating_sub(1)
	}

	/// All stages in order.
	pub fn stages(&self) -> &[StatusDefinition] {
		&self.stages
	}
}

impl Default for StatusFlow {
	fn default() -> Self {
		Self::standard()
	}
}
