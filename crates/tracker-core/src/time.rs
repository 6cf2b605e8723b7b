//! Clock abstraction for the advancement engine.
//!
//! Status transitions are stamped with wall-clock time. The clock is
//! injected so tests can pin it to a fixed instant.

use chrono::{DateTime, Utc};

/// Source of "now" for status transitions.
pub trait Clock: Send + Sync {
	/// The current moment.
	fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> DateTime<Utc> {
		Utc::now()
	}
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
	fn now(&self) -> DateTime<Utc> {
		self.0
	}
}
