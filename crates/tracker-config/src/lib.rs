//! Configuration module for the order tracking service.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required values are properly set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the tracking service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration for the HTTP server.
	#[serde(default)]
	pub server: ServerConfig,
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
	/// Configuration for the advancement engine and demo seeding.
	#[serde(default)]
	pub tracker: TrackerConfig,
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
	/// Host address to bind the server to.
	#[serde(default = "default_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_port")]
	pub port: u16,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: default_port(),
		}
	}
}

/// Returns the default server host.
///
/// This provides a default host address of 127.0.0.1 (localhost) for the
/// server when no explicit host is configured.
fn default_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default server port.
fn default_port() -> u16 {
	8000
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	#[serde(default)]
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the advancement engine and demo seeding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
	/// Chance to advance an order still at its initial status.
	#[serde(default = "default_initial_probability")]
	pub advance_probability_initial: f64,
	/// Chance to advance an order that has moved at least once before.
	#[serde(default = "default_moving_probability")]
	pub advance_probability_moving: f64,
	/// Whether to insert demo orders at startup when absent.
	#[serde(default = "default_seed_demo_orders")]
	pub seed_demo_orders: bool,
}

impl Default for TrackerConfig {
	fn default() -> Self {
		Self {
			advance_probability_initial: default_initial_probability(),
			advance_probability_moving: default_moving_probability(),
			seed_demo_orders: default_seed_demo_orders(),
		}
	}
}

/// Returns the default advancement probability for orders at their
/// initial status.
fn default_initial_probability() -> f64 {
	0.35
}

/// Returns the default advancement probability for orders that have
/// already advanced at least once.
fn default_moving_probability() -> f64 {
	0.75
}

/// Returns the default demo-seeding switch.
fn default_seed_demo_orders() -> bool {
	true
}

impl Config {
	/// Parses configuration from a TOML string and validates it.
	pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(raw)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from a TOML file.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let raw = tokio::fs::read_to_string(path).await?;
		Self::from_toml_str(&raw)
	}

	/// Validates cross-field constraints that serde cannot express.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.storage.primary.is_empty() {
			return Err(ConfigError::Validation(
				"storage.primary must not be empty".to_string(),
			));
		}

		for (name, probability) in [
			(
				"tracker.advance_probability_initial",
				self.tracker.advance_probability_initial,
			),
			(
				"tracker.advance_probability_moving",
				self.tracker.advance_probability_moving,
			),
		] {
			if !(0.0..=1.0).contains(&probability) {
				return Err(ConfigError::Validation(format!(
					"{} must be within [0.0, 1.0], got {}",
					name, probability
				)));
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn minimal_config_uses_defaults() {
		let config = Config::from_toml_str(
			r#"
			[storage]
			primary = "memory"
			"#,
		)
		.unwrap();

		assert_eq!(config.server.host, "127.0.0.1");
		assert_eq!(config.server.port, 8000);
		assert_eq!(config.tracker.advance_probability_initial, 0.35);
		assert_eq!(config.tracker.advance_probability_moving, 0.75);
		assert!(config.tracker.seed_demo_orders);
	}

	#[test]
	fn full_config_round_trips() {
		let config = Config::from_toml_str(
			r#"
			[server]
			host = "0.0.0.0"
			port = 8080

			[storage]
			primary = "file"

			[storage.implementations.file]
			storage_path = "/var/lib/tracker/orders"

			[tracker]
			advance_probability_initial = 0.5
			advance_probability_moving = 0.9
			seed_demo_orders = false
			"#,
		)
		.unwrap();

		assert_eq!(config.server.port, 8080);
		assert_eq!(config.storage.primary, "file");
		assert!(config.storage.implementations.contains_key("file"));
		assert_eq!(config.tracker.advance_probability_moving, 0.9);
		assert!(!config.tracker.seed_demo_orders);
	}

	#[test]
	fn missing_storage_section_is_a_parse_error() {
		let result = Config::from_toml_str("[server]\nport = 8000\n");
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn out_of_range_probability_is_rejected() {
		let result = Config::from_toml_str(
			r#"
			[storage]
			primary = "memory"

			[tracker]
			advance_probability_initial = 1.5
			"#,
		);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[tokio::test]
	async fn loads_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		tokio::fs::write(&path, "[storage]\nprimary = \"memory\"\n")
			.await
			.unwrap();

		let config = Config::from_file(&path).await.unwrap();
		assert_eq!(config.storage.primary, "memory");
	}
}
