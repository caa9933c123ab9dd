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

//! Runtime constants of the Moonbeam networks, keyed by runtime spec version.
//!
//! Tests budget XCM execution and EVM gas from constants that changed over the runtime's
//! history. A [`ConstantStore`] is built once per network and queried with the spec version the
//! node reports; versions outside the curated tables are errors rather than guesses.
//! [`SpecVersionHistory`] maps spec versions to the block they were enacted at, for tests
//! replaying historical state.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

mod error;
mod history;


pub use error::{Error, Result};
pub use history::{SpecActivation, SpecVersionHistory};

/// Log target of this crate.
pub const LOG_TARGET: &str = "runtime::constants";

/// Weight charged per unit of gas, fixed across all runtimes.
pub const WEIGHT_PER_GAS: u64 = 25_000;

/// Newest spec version the built-in tables were curated against.
pub const NEWEST_KNOWN_SPEC_VERSION: u32 = 3400;

/// A Moonbeam network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	Moonbase,
	Moonriver,
	Moonbeam,
}

impl Network {
	pub const ALL: [Network; 3] = [Network::Moonbase, Network::Moonriver, Network::Moonbeam];

	pub fn name(self) -> &'static str {
		match self {
			Network::Moonbase => "moonbase",
			Network::Moonriver => "moonriver",
			Network::Moonbeam => "moonbeam",
		}
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Network {
	type Err = Error;

	/// Accepts network names as well as the `spec_name` of their runtimes.
	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_lowercase().as_str() {
			"moonbase" | "moonbase-alpha" => Ok(Network::Moonbase),
			"moonriver" => Ok(Network::Moonriver),
			"moonbeam" => Ok(Network::Moonbeam),
			_ => Err(Error::UnknownNetwork(s.to_owned())),
		}
	}
}

/// A constant whose value changes at some spec versions.
///
/// Each entry holds from its spec version until the next entry. Versions below the first
/// entry or above `newest_known` have no value.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConstant<T> {
	name: &'static str,
	values: BTreeMap<u32, T>,
	newest_known: u32,
}

impl<T: Clone> RuntimeConstant<T> {
	pub fn new(
		name: &'static str,
		entries: impl IntoIterator<Item = (u32, T)>,
		newest_known: u32,
	) -> Self {
		RuntimeConstant { name, values: entries.into_iter().collect(), newest_known }
	}

	/// A value that never changed.
	pub fn fixed(name: &'static str, value: T, newest_known: u32) -> Self {
		Self::new(name, [(0, value)], newest_known)
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn get(&self, spec_version: u32) -> Result<T> {
		let first = self.values.keys().next().copied();
		let value = (spec_version <= self.newest_known)
			.then(|| self.values.range(..=spec_version).next_back())
			.flatten();
		match value {
			Some((_, value)) => Ok(value.clone()),
			None => Err(Error::UnknownSpecVersion {
				constant: self.name,
				spec_version,
				first: first.unwrap_or(0),
				newest_known: self.newest_known,
			}),
		}
	}
}

/// Constants in effect at one spec version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeConstants {
	pub spec_version: u32,
	/// Gas accounted per byte of proof size.
	pub gas_per_pov_bytes: u64,
	/// Ref time weight of a single storage read.
	pub storage_read_cost: u64,
	pub weight_per_gas: u64,
	/// Ref time of a full block.
	pub block_weight_limit: u64,
	/// Gas limit of a block.
	pub gas_limit: u64,
	/// Gas limit of a single extrinsic.
	pub extrinsic_gas_limit: u64,
	pub min_base_fee: u128,
	pub max_base_fee: u128,
}

impl RuntimeConstants {
	/// Ref time weight of `gas`.
	pub fn gas_to_weight(&self, gas: u64) -> u64 {
		gas.saturating_mul(self.weight_per_gas)
	}

	/// Proof size budget matching `gas`.
	pub fn gas_to_proof_size(&self, gas: u64) -> u64 {
		gas / self.gas_per_pov_bytes.max(1)
	}
}

/// Constant tables of one network.
#[derive(Clone, Debug)]
pub struct ConstantStore {
	network: Network,
	gas_per_pov_bytes: RuntimeConstant<u64>,
	storage_read_cost: RuntimeConstant<u64>,
	block_weight_limit: RuntimeConstant<u64>,
	gas_limit: RuntimeConstant<u64>,
	extrinsic_gas_limit: RuntimeConstant<u64>,
	min_base_fee: RuntimeConstant<u128>,
	max_base_fee: RuntimeConstant<u128>,
}

impl ConstantStore {
	/// The built-in tables of `network`.
	pub fn for_network(network: Network) -> Self {
		let newest = NEWEST_KNOWN_SPEC_VERSION;
		let min_base_fee = match network {
			Network::Moonbase => vec![(0, 125_000_000), (3300, 31_250_000)],
			Network::Moonriver => vec![(0, 1_250_000_000), (3300, 312_500_000)],
			Network::Moonbeam => vec![(0, 125_000_000_000), (3300, 31_250_000_000)],
		};
		let max_base_fee = match network {
			Network::Moonbase | Network::Moonriver => 125_000_000_000_000,
			Network::Moonbeam => 12_500_000_000_000_000,
		};

		ConstantStore {
			network,
			gas_per_pov_bytes: RuntimeConstant::new(
				"GAS_PER_POV_BYTES",
				[(0, 4), (2900, 8), (3100, 16)],
				newest,
			),
			storage_read_cost: RuntimeConstant::fixed("STORAGE_READ_COST", 41_742_000, newest),
			block_weight_limit: RuntimeConstant::new(
				"BLOCK_WEIGHT_LIMIT",
				[(0, 500_000_000_000), (3000, 2_000_000_000_000)],
				newest,
			),
			gas_limit: RuntimeConstant::new(
				"GAS_LIMIT",
				[(0, 15_000_000), (3000, 60_000_000)],
				newest,
			),
			extrinsic_gas_limit: RuntimeConstant::new(
				"EXTRINSIC_GAS_LIMIT",
				[(0, 13_000_000), (3000, 52_000_000)],
				newest,
			),
			min_base_fee: RuntimeConstant::new("MIN_BASE_FEE", min_base_fee, newest),
			max_base_fee: RuntimeConstant::fixed("MAX_BASE_FEE", max_base_fee, newest),
		}
	}

	pub fn network(&self) -> Network {
		self.network
	}

	/// All constants in effect at `spec_version`.
	pub fn at(&self, spec_version: u32) -> Result<RuntimeConstants> {
		let constants = RuntimeConstants {
			spec_version,
			gas_per_pov_bytes: self.gas_per_pov_bytes.get(spec_version)?,
			storage_read_cost: self.storage_read_cost.get(spec_version)?,
			weight_per_gas: WEIGHT_PER_GAS,
			block_weight_limit: self.block_weight_limit.get(spec_version)?,
			gas_limit: self.gas_limit.get(spec_version)?,
			extrinsic_gas_limit: self.extrinsic_gas_limit.get(spec_version)?,
			min_base_fee: self.min_base_fee.get(spec_version)?,
			max_base_fee: self.max_base_fee.get(spec_version)?,
		};
		log::debug!(
			target: LOG_TARGET,
			"{} constants at {spec_version}: {constants:?}",
			self.network,
		);
		Ok(constants)
	}
}
