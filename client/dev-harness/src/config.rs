// Copyright (C) Moonbeam test tooling contributors.
// This file is part of Moonbeam.

// Moonbeam is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Moonbeam is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Moonbeam.  If not, see <http://www.gnu.org/licenses/>.

//! Harness configuration.

use std::time::Duration;

use moonbeam_runtime_constants::Network;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, LOG_TARGET};

/// Environment variable overriding [`HarnessConfig::node_rpc_url`].
pub const NODE_RPC_URL_ENV: &str = "DEV_NODE_RPC_URL";
/// Environment variable overriding [`HarnessConfig::timeout_ms`].
pub const TIMEOUT_MS_ENV: &str = "DEV_HARNESS_TIMEOUT_MS";

/// Where the dev node lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct HarnessConfig {
	/// Websocket endpoint of the dev node.
	pub node_rpc_url: String,
	/// Deadline of a single request, and the default deadline of waits.
	pub timeout_ms: u64,
	/// Interval between polls while waiting for blocks.
	pub poll_interval_ms: u64,
	/// Network whose constant tables apply to the node.
	pub network: Network,
}

impl Default for HarnessConfig {
	fn default() -> Self {
		HarnessConfig {
			node_rpc_url: "ws://127.0.0.1:9944".into(),
			timeout_ms: 60_000,
			poll_interval_ms: 100,
			network: Network::Moonbase,
		}
	}
}

impl HarnessConfig {
	/// Parses a configuration, filling absent fields with defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Defaults with the process environment applied.
	pub fn from_env() -> Result<Self> {
		Self::default().with_overrides(|key| std::env::var(key).ok())
	}

	/// Applies the `DEV_NODE_RPC_URL` and `DEV_HARNESS_TIMEOUT_MS` overrides found by `lookup`.
	pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
		if let Some(url) = lookup(NODE_RPC_URL_ENV) {
			log::debug!(target: LOG_TARGET, "node rpc url overridden to {url}");
			self.node_rpc_url = url;
		}
		if let Some(timeout) = lookup(TIMEOUT_MS_ENV) {
			self.timeout_ms = timeout
				.trim()
				.parse()
				.map_err(|_| Error::Config(format!("{TIMEOUT_MS_ENV}={timeout} is not a number")))?;
		}
		if self.timeout_ms == 0 {
			return Err(Error::Config("timeout must be positive".into()))
		}
		Ok(self)
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms.max(1))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;

	#[test]
	fn json_fills_defaults() {
		let json = r#"{"network": "moonriver", "timeoutMs": 500}"#;
		let config = HarnessConfig::from_json(json).unwrap();
		assert_eq!(config.network, Network::Moonriver);
		assert_eq!(config.timeout(), Duration::from_millis(500));
		assert_eq!(config.node_rpc_url, HarnessConfig::default().node_rpc_url);

		assert_matches!(HarnessConfig::from_json(r#"{"nodeUrl": "x"}"#), Err(Error::Json(_)));
	}

	#[test]
	fn environment_overrides() {
		let env = |key: &str| match key {
			NODE_RPC_URL_ENV => Some("ws://10.0.0.1:9944".to_string()),
			TIMEOUT_MS_ENV => Some(" 2500 ".to_string()),
			_ => None,
		};
		let config = HarnessConfig::default().with_overrides(env).unwrap();
		assert_eq!(config.node_rpc_url, "ws://10.0.0.1:9944");
		assert_eq!(config.timeout_ms, 2500);

		let bad = |key: &str| (key == TIMEOUT_MS_ENV).then(|| "soon".to_string());
		assert_matches!(HarnessConfig::default().with_overrides(bad), Err(Error::Config(_)));
		let zero = |key: &str| (key == TIMEOUT_MS_ENV).then(|| "0".to_string());
		assert_matches!(HarnessConfig::default().with_overrides(zero), Err(Error::Config(_)));
	}
}
