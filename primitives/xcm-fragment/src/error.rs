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

use crate::XcmVersion;

/// Errors raised while building or rendering an XCM fragment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// The instruction does not exist at the requested version.
	#[error("instruction {instruction} is not available in XCM {version}")]
	UnsupportedInstruction { instruction: String, version: XcmVersion },
	/// The junction cannot be expressed at the requested version.
	#[error("junction {junction} is not available in XCM {version}")]
	UnsupportedJunction { junction: &'static str, version: XcmVersion },
	/// The network id cannot be expressed at the requested version.
	#[error("network {network} is not available in XCM {version}")]
	UnsupportedNetwork { network: &'static str, version: XcmVersion },
	/// The wildcard asset selector cannot be expressed at the requested version.
	#[error("wildcard {wildcard} is not available in XCM {version}")]
	UnsupportedWildcard { wildcard: &'static str, version: XcmVersion },
	/// The non-fungible instance cannot be expressed at the requested version.
	#[error("asset instance {instance} is not available in XCM {version}")]
	UnsupportedAssetInstance { instance: &'static str, version: XcmVersion },
	/// A raw instruction was not pre-encoded for the requested version.
	#[error("raw instruction {name} has no encoding for XCM {version}")]
	RawInstructionVersion { name: String, version: XcmVersion },
	/// A location holds more junctions than the format allows.
	#[error("location with {0} junctions exceeds the limit of 8")]
	TooManyJunctions(usize),
	/// A `GeneralKey` declares more bytes than it carries.
	#[error("general key length {0} exceeds 32 bytes")]
	GeneralKeyTooLong(u8),
	/// A builder call referenced an asset index missing from the configuration.
	#[error(
		"{instruction} references configured asset #{index} but only {available} are configured"
	)]
	MissingAsset { instruction: &'static str, index: usize, available: usize },
	/// A version string or number could not be recognised.
	#[error("unknown XCM version {0}")]
	UnknownVersion(String),
}

/// Result type used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
