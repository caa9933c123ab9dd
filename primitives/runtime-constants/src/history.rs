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

//! Blocks at which each runtime spec version was enacted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Network, Result, LOG_TARGET};

/// A spec version and the first block it applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecActivation {
	pub spec_version: u32,
	pub first_block: u64,
}

/// Per network, spec versions in enactment order with their first block.
///
/// Immutable once built. Construct it once and pass it by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecVersionHistory {
	networks: BTreeMap<Network, Vec<SpecActivation>>,
}

impl SpecVersionHistory {
	/// Builds a history, checking every table increases in spec version and block.
	pub fn new(networks: impl IntoIterator<Item = (Network, Vec<SpecActivation>)>) -> Result<Self> {
		let networks: BTreeMap<_, _> = networks.into_iter().collect();
		for (network, activations) in &networks {
			for pair in activations.windows(2) {
				if pair[1].spec_version <= pair[0].spec_version ||
					pair[1].first_block <= pair[0].first_block
				{
					return Err(Error::UnsortedHistory {
						network: *network,
						spec_version: pair[1].spec_version,
					})
				}
			}
		}
		Ok(SpecVersionHistory { networks })
	}

	/// Parses a history from JSON of the form
	/// `{"moonbase": [{"specVersion": 2900, "firstBlock": 6000000}, ...], ...}`.
	pub fn from_json(json: &str) -> Result<Self> {
		let networks: BTreeMap<Network, Vec<SpecActivation>> = serde_json::from_str(json)?;
		log::debug!(
			target: LOG_TARGET,
			"loaded spec version history of {} networks",
			networks.len(),
		);
		Self::new(networks)
	}

	/// The curated history of the public networks.
	pub fn builtin() -> Self {
		let table = |entries: &[(u32, u64)]| {
			entries
				.iter()
				.map(|(spec_version, first_block)| SpecActivation {
					spec_version: *spec_version,
					first_block: *first_block,
				})
				.collect::<Vec<_>>()
		};
		SpecVersionHistory {
			networks: BTreeMap::from([
				(
					Network::Moonbase,
					table(&[
						(2500, 4_512_000),
						(2600, 5_000_000),
						(2700, 5_450_000),
						(2800, 5_900_000),
						(2900, 6_300_000),
						(3000, 6_800_000),
						(3100, 7_500_000),
						(3200, 8_300_000),
						(3300, 9_200_000),
						(3400, 10_100_000),
					]),
				),
				(
					Network::Moonriver,
					table(&[
						(2500, 5_300_000),
						(2600, 5_800_000),
						(2700, 6_200_000),
						(2800, 6_500_000),
						(2900, 7_000_000),
						(3000, 7_600_000),
						(3100, 8_300_000),
						(3200, 9_200_000),
						(3300, 10_100_000),
						(3400, 11_000_000),
					]),
				),
				(
					Network::Moonbeam,
					table(&[
						(2500, 4_200_000),
						(2600, 4_800_000),
						(2700, 5_200_000),
						(2800, 5_500_000),
						(2900, 6_000_000),
						(3000, 6_600_000),
						(3100, 7_300_000),
						(3200, 8_200_000),
						(3300, 9_000_000),
						(3400, 9_900_000),
					]),
				),
			]),
		}
	}

	pub fn activations(&self, network: Network) -> &[SpecActivation] {
		self.networks.get(&network).map(Vec::as_slice).unwrap_or(&[])
	}

	/// First block of `spec_version`. Only recorded versions have one.
	pub fn first_block(&self, network: Network, spec_version: u32) -> Result<u64> {
		self.activations(network)
			.iter()
			.find(|activation| activation.spec_version == spec_version)
			.map(|activation| activation.first_block)
			.ok_or(Error::UnrecordedSpecVersion { network, spec_version })
	}

	/// The spec version active at `block`.
	pub fn spec_version_at(&self, network: Network, block: u64) -> Result<u32> {
		let activations = self.activations(network);
		if activations.is_empty() {
			return Err(Error::NoHistory(network))
		}
		let enacted = activations.partition_point(|activation| activation.first_block <= block);
		enacted
			.checked_sub(1)
			.map(|index| activations[index].spec_version)
			.ok_or(Error::BlockBeforeHistory { network, block })
	}
}

impl Default for SpecVersionHistory {
	fn default() -> Self {
		Self::builtin()
	}
}
