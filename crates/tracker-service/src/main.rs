//! Main entry point for the order tracking service.
//!
//! This binary wires together the configured storage backend, the status
//! flow, and the advancement engine, optionally seeds demo orders, and
//! serves the tracking API over HTTP.

use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracker_config::Config;
use tracker_core::{
	AdvancementEngine, AdvancementProbabilities, StatusFlow, SystemClock, ThreadRngSource,
	TrackerEngine,
};
use tracker_storage::{OrderStore, StorageFactory};

mod apis;
mod seed;
mod server;

/// Command-line arguments for the tracking service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the tracking service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the tracker engine over the configured storage backend
/// 5. Serves the tracking API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started order tracker");

	// Load configuration
	let config = Config::from_file(&args.config).await?;
	tracing::info!(
		"Loaded configuration [storage: {}]",
		config.storage.primary
	);

	let engine = Arc::new(build_engine(&config)?);

	if config.tracker.seed_demo_orders {
		let inserted = seed::seed_demo_orders(engine.store(), &SystemClock).await?;
		if inserted > 0 {
			tracing::info!("Seeded {} demo order(s)", inserted);
		} else {
			tracing::info!("Demo seed skipped (existing orders retained)");
		}
	}

	server::start_server(config.server.clone(), engine).await?;

	tracing::info!("Stopped order tracker");
	Ok(())
}

/// Builds the tracker engine from configuration.
///
/// Selects the configured storage implementation from the registered
/// factories, validates its configuration against the backend's schema,
/// and assembles the advancement engine with the production clock and RNG.
fn build_engine(config: &Config) -> Result<TrackerEngine, Box<dyn std::error::Error>> {
	let factories: HashMap<&'static str, StorageFactory> =
		tracker_storage::get_all_implementations().into_iter().collect();

	let factory = factories
		.get(config.storage.primary.as_str())
		.ok_or_else(|| format!("Unknown storage implementation: {}", config.storage.primary))?;

	let backend_config = config
		.storage
		.implementations
		.get(&config.storage.primary)
		.cloned()
		.unwrap_or(toml::Value::Table(toml::map::Map::new()));

	let backend = factory(&backend_config)?;
	backend.config_schema().validate(&backend_config)?;

	let flow = Arc::new(StatusFlow::standard());
	let advancement = AdvancementEngine::new(
		flow,
		Arc::new(SystemClock),
		Arc::new(ThreadRngSource),
		AdvancementProbabilities {
			initial: config.tracker.advance_probability_initial,
			moving: config.tracker.advance_probability_moving,
		},
	);

	Ok(TrackerEngine::new(OrderStore::new(backend), advancement))
}
