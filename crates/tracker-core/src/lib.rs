//! Core engine for the order tracking service.
//!
//! This crate owns the status flow table, the probabilistic advancement
//! engine, and the `TrackerEngine` that runs one tracking request end to
//! end: validate, look up, lazily initialize, advance, persist, assemble.

/// The tracking engine and advancement logic.
pub mod engine;
/// The fixed, ordered fulfillment flow.
pub mod flow;
/// Injectable random source abstraction.
pub mod random;
/// Injectable clock abstraction.
pub mod time;

pub use engine::{AdvancementEngine, AdvancementProbabilities, TrackError, TrackerEngine};
pub use flow::StatusFlow;
pub use random::{FixedRandom, RandomSource, SequenceRandom, ThreadRngSource};
pub use time::{Clock, FixedClock, SystemClock};
