//! Random source abstraction for the advancement engine.
//!
//! Advancement decisions draw a uniform value in [0, 1). The source is
//! injected so tests can supply deterministic fakes instead of the
//! process-wide RNG.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Source of uniform random draws in [0, 1).
pub trait RandomSource: Send + Sync {
	/// Draws the next value.
	fn next_f64(&self) -> f64;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
	fn next_f64(&self) -> f64 {
		use rand::Rng;
		rand::thread_rng().gen::<f64>()
	}
}

/// Source that always returns the same value, for deterministic tests.
///
/// `FixedRandom(0.0)` advances whenever the engine is eligible to;
/// `FixedRandom(0.99)` never advances.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
	fn next_f64(&self) -> f64 {
		self.0
	}
}

/// Source that replays a fixed sequence of values, then repeats the last
/// one once exhausted.
pub struct SequenceRandom {
	values: Mutex<VecDeque<f64>>,
	last: Mutex<f64>,
}

impl SequenceRandom {
	/// Creates a source replaying `values` in order.
	pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
		Self {
			values: Mutex::new(values.into_iter().collect()),
			last: Mutex::new(1.0 - f64::EPSILON),
		}
	}
}

impl RandomSource for SequenceRandom {
	fn next_f64(&self) -> f64 {
		let mut values = self.values.lock().expect("sequence lock poisoned");
		match values.pop_front() {
			Some(value) => {
				*self.last.lock().expect("sequence lock poisoned") = value;
				value
			},
			None => *self.last.lock().expect("sequence lock poisoned"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn thread_rng_draws_are_in_unit_interval() {
		let source = ThreadRngSource;
		for _ in 0..100 {
			let value = source.next_f64();
			assert!((0.0..1.0).contains(&value));
		}
	}

	#[test]
	fn sequence_replays_then_repeats_last() {
		let source = SequenceRandom::new([0.1, 0.9]);
		assert_eq!(source.next_f64(), 0.1);
		assert_eq!(source.next_f64(), 0.9);
		assert_eq!(source.next_f64(), 0.9);
	}
}
