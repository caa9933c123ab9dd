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

use thiserror::Error;

use crate::Network;

/// Errors raised by the constant tables.
#[derive(Error, Debug)]
pub enum Error {
	/// No table entry covers the requested spec version.
	#[error(
		"{constant} has no value for spec version {spec_version} \
		 (known from {first} to {newest_known})"
	)]
	UnknownSpecVersion { constant: &'static str, spec_version: u32, first: u32, newest_known: u32 },
	/// The spec version was never activated on the network.
	#[error("spec version {spec_version} has no recorded activation block on {network}")]
	UnrecordedSpecVersion { network: Network, spec_version: u32 },
	/// The block predates the oldest recorded spec version.
	#[error("block {block} predates the recorded {network} history")]
	BlockBeforeHistory { network: Network, block: u64 },
	/// A network has no history at all.
	#[error("no spec version history for {0}")]
	NoHistory(Network),
	/// A history table is not strictly increasing in both spec version and block.
	#[error("{network} history is not sorted at spec version {spec_version}")]
	UnsortedHistory { network: Network, spec_version: u32 },
	#[error("unknown network {0}")]
	UnknownNetwork(String),
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

/// Result type used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
