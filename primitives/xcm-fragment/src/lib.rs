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

//! Versioned XCM programs for Moonbeam dev node tests.
//!
//! [`XcmFragment`] accumulates instructions against a small configuration of assets,
//! beneficiary and weight limit, and renders them to XCM v2, v3 or v4 as a [`VersionedXcm`]
//! holding both the SCALE encoding and a JSON view. [`build_xcmp_message`] wraps a rendered
//! program as an inbound HRMP message, and the [`derivation`] module predicts the accounts the
//! node assigns to cross-chain origins.

mod asset;
pub mod derivation;
mod error;
mod fragment;
pub mod instruction;
mod location;
mod message;
pub mod messaging;
mod render;
mod version;
mod weight;


pub use asset::{Asset, AssetFilter, AssetInstance, Fungibility, WildAsset, WildFungibility};
pub use derivation::{
	descend_origin_from_address20, descend_origin_from_relay, location_to_account_key20,
	sovereign_account_of_parent, sovereign_account_of_sibling, DescendedOrigin,
	DEFAULT_SOURCE_PARA_ID, DEFAULT_TEST_ADDRESS,
};
pub use error::{Error, Result};
pub use fragment::{
	convert_xcm_fragment_to_version, XcmFragment, XcmFragmentConfig, DEFAULT_WEIGHT_LIMIT,
};
pub use instruction::{
	Instruction, MaybeErrorCode, OriginKind, QueryResponseInfo, RawInstruction, XcmError,
};
pub use location::{Junction, Location, NetworkId, MAX_JUNCTIONS};
pub use message::{build_xcmp_message, RawXcmMessage, XcmpMessageFormat, VERSIONED_XCM_TYPE_NAME};
pub use messaging::mock_hrmp_channel_existence;
pub use render::VersionedXcm;
pub use version::XcmVersion;
pub use weight::{Weight, WeightLimit};

/// Log target of this crate.
pub const LOG_TARGET: &str = "xcm::fragment";
