//! Client settings.

use std::time::Duration;

use crate::components::force_graph::LayoutConfig;

const DEFAULT_API_BASE: &str = "/api/graph";

/// How long success and error status messages stay visible.
pub const STATUS_TIMEOUT: Duration = Duration::from_millis(3000);

/// Settings for one running client.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
	/// Path (or absolute URL) prefix of the graph backend.
	pub api_base: String,
	/// Lifetime of expiring status messages.
	pub status_timeout: Duration,
	/// Force simulation tuning.
	pub layout: LayoutConfig,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			api_base: option_env!("KG_API_BASE")
				.unwrap_or(DEFAULT_API_BASE)
				.to_string(),
			status_timeout: STATUS_TIMEOUT,
			layout: LayoutConfig::default(),
		}
	}
}

impl ClientConfig {
	/// Resolve `api_base` against a page origin such as `http://localhost:5000`.
	///
	/// Absolute bases are returned untouched.
	pub fn api_url(&self, origin: &str) -> String {
		if self.api_base.starts_with("http://") || self.api_base.starts_with("https://") {
			return self.api_base.trim_end_matches('/').to_string();
		}
		format!(
			"{}/{}",
			origin.trim_end_matches('/'),
			self.api_base.trim_matches('/')
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn relative_base_joins_origin() {
		let config = ClientConfig {
			api_base: "/api/graph/".into(),
			..ClientConfig::default()
		};
		assert_eq!(
			config.api_url("http://localhost:5000/"),
			"http://localhost:5000/api/graph"
		);
	}

	#[test]
	fn absolute_base_is_kept() {
		let config = ClientConfig {
			api_base: "https://kg.example.org/api/graph".into(),
			..ClientConfig::default()
		};
		assert_eq!(
			config.api_url("http://localhost:5000"),
			"https://kg.example.org/api/graph"
		);
	}

	#[test]
	fn defaults() {
		let config = ClientConfig::default();
		assert_eq!(config.status_timeout, Duration::from_secs(3));
		assert_eq!(config.layout.link_distance, 80.0);
		assert_eq!(config.layout.charge_strength, -300.0);
	}
}
