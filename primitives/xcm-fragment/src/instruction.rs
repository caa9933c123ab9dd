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

//! The version agnostic instruction set understood by the fragment builder.
//!
//! Variants mirror the XCM instructions the dev-node tests exercise. Instructions that only
//! exist from v3 onwards report so through [`Instruction::introduced_in`], which the renderer
//! consults before encoding anything.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{Asset, AssetFilter, Junction, Location, NetworkId, Weight, WeightLimit, XcmVersion};

/// Basically just the XCM (more general) version of `ParachainDispatchOrigin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OriginKind {
	Native,
	SovereignAccount,
	Superuser,
	Xcm,
}

impl OriginKind {
	pub fn index(self) -> u8 {
		match self {
			OriginKind::Native => 0,
			OriginKind::SovereignAccount => 1,
			OriginKind::Superuser => 2,
			OriginKind::Xcm => 3,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			OriginKind::Native => "Native",
			OriginKind::SovereignAccount => "SovereignAccount",
			OriginKind::Superuser => "Superuser",
			OriginKind::Xcm => "Xcm",
		}
	}
}

/// Error codes of the XCM executor, as carried by `ExpectError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XcmError {
	Overflow,
	Unimplemented,
	UntrustedReserveLocation,
	UntrustedTeleportLocation,
	LocationFull,
	LocationNotInvertible,
	BadOrigin,
	InvalidLocation,
	AssetNotFound,
	FailedToTransactAsset,
	NotWithdrawable,
	LocationCannotHold,
	ExceedsMaxMessageSize,
	DestinationUnsupported,
	Transport,
	Unroutable,
	UnknownClaim,
	FailedToDecode,
	MaxWeightInvalid,
	NotHoldingFees,
	TooExpensive,
	Trap(u64),
	ExpectationFalse,
	PalletNotFound,
	NameMismatch,
	VersionIncompatible,
	HoldingWouldOverflow,
	ExportError,
	ReanchorFailed,
	NoDeal,
	FeesNotMet,
	LockError,
	NoPermission,
	Unanchored,
	NotDepositable,
	UnhandledXcmVersion,
	WeightLimitReached(Weight),
	Barrier,
	WeightNotComputable,
	ExceedsStackLimit,
}

impl XcmError {
	/// Codec index of the variant.
	pub fn index(&self) -> u8 {
		use XcmError::*;
		match self {
			Overflow => 0,
			Unimplemented => 1,
			UntrustedReserveLocation => 2,
			UntrustedTeleportLocation => 3,
			LocationFull => 4,
			LocationNotInvertible => 5,
			BadOrigin => 6,
			InvalidLocation => 7,
			AssetNotFound => 8,
			FailedToTransactAsset => 9,
			NotWithdrawable => 10,
			LocationCannotHold => 11,
			ExceedsMaxMessageSize => 12,
			DestinationUnsupported => 13,
			Transport => 14,
			Unroutable => 15,
			UnknownClaim => 16,
			FailedToDecode => 17,
			MaxWeightInvalid => 18,
			NotHoldingFees => 19,
			TooExpensive => 20,
			Trap(_) => 21,
			ExpectationFalse => 22,
			PalletNotFound => 23,
			NameMismatch => 24,
			VersionIncompatible => 25,
			HoldingWouldOverflow => 26,
			ExportError => 27,
			ReanchorFailed => 28,
			NoDeal => 29,
			FeesNotMet => 30,
			LockError => 31,
			NoPermission => 32,
			Unanchored => 33,
			NotDepositable => 34,
			UnhandledXcmVersion => 35,
			WeightLimitReached(_) => 36,
			Barrier => 37,
			WeightNotComputable => 38,
			ExceedsStackLimit => 39,
		}
	}

	pub fn name(&self) -> &'static str {
		use XcmError::*;
		match self {
			Overflow => "Overflow",
			Unimplemented => "Unimplemented",
			UntrustedReserveLocation => "UntrustedReserveLocation",
			UntrustedTeleportLocation => "UntrustedTeleportLocation",
			LocationFull => "LocationFull",
			LocationNotInvertible => "LocationNotInvertible",
			BadOrigin => "BadOrigin",
			InvalidLocation => "InvalidLocation",
			AssetNotFound => "AssetNotFound",
			FailedToTransactAsset => "FailedToTransactAsset",
			NotWithdrawable => "NotWithdrawable",
			LocationCannotHold => "LocationCannotHold",
			ExceedsMaxMessageSize => "ExceedsMaxMessageSize",
			DestinationUnsupported => "DestinationUnsupported",
			Transport => "Transport",
			Unroutable => "Unroutable",
			UnknownClaim => "UnknownClaim",
			FailedToDecode => "FailedToDecode",
			MaxWeightInvalid => "MaxWeightInvalid",
			NotHoldingFees => "NotHoldingFees",
			TooExpensive => "TooExpensive",
			Trap(_) => "Trap",
			ExpectationFalse => "ExpectationFalse",
			PalletNotFound => "PalletNotFound",
			NameMismatch => "NameMismatch",
			VersionIncompatible => "VersionIncompatible",
			HoldingWouldOverflow => "HoldingWouldOverflow",
			ExportError => "ExportError",
			ReanchorFailed => "ReanchorFailed",
			NoDeal => "NoDeal",
			FeesNotMet => "FeesNotMet",
			LockError => "LockError",
			NoPermission => "NoPermission",
			Unanchored => "Unanchored",
			NotDepositable => "NotDepositable",
			UnhandledXcmVersion => "UnhandledXcmVersion",
			WeightLimitReached(_) => "WeightLimitReached",
			Barrier => "Barrier",
			WeightNotComputable => "WeightNotComputable",
			ExceedsStackLimit => "ExceedsStackLimit",
		}
	}
}

/// Outcome of the last `Transact`, as checked by `ExpectTransactStatus`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaybeErrorCode {
	Success,
	/// At most 128 bytes of dispatch error.
	Error(Vec<u8>),
	TruncatedError,
}

/// Where and how a query response should be reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResponseInfo {
	pub destination: Location,
	pub query_id: u64,
	pub max_weight: Weight,
}

impl QueryResponseInfo {
	/// Response budget used when none is given.
	pub const DEFAULT_MAX_WEIGHT: Weight = Weight::from_parts(1_000_000_000, 1_000_000_000);

	pub fn new(destination: Location, query_id: u64) -> Self {
		QueryResponseInfo { destination, query_id, max_weight: Self::DEFAULT_MAX_WEIGHT }
	}
}

/// An instruction the builder does not model, carried as pre-encoded payloads per version.
///
/// Each encoding is the full instruction, variant index included. Rendering the instruction
/// at a version it carries no encoding for is an error.
#[derive(Clone, Debug, PartialEq)]
pub struct RawInstruction {
	name: String,
	encodings: BTreeMap<XcmVersion, RawEncoding>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawEncoding {
	pub scale: Vec<u8>,
	pub json: Value,
}

impl RawInstruction {
	pub fn new(name: impl Into<String>) -> Self {
		RawInstruction { name: name.into(), encodings: BTreeMap::new() }
	}

	/// Adds the encoding used when rendering at `version`.
	///
	/// `scale` must start with the variant index of the instruction at that version.
	pub fn with_encoding(mut self, version: XcmVersion, scale: Vec<u8>, json: Value) -> Self {
		self.encodings.insert(version, RawEncoding { scale, json });
		self
	}

	/// Adds the same encoding for every version in `versions`.
	pub fn with_encoding_for(self, versions: &[XcmVersion], scale: Vec<u8>, json: Value) -> Self {
		versions
			.iter()
			.fold(self, |raw, version| raw.with_encoding(*version, scale.clone(), json.clone()))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn versions(&self) -> impl Iterator<Item = XcmVersion> + '_ {
		self.encodings.keys().copied()
	}

	pub(crate) fn encoding(&self, version: XcmVersion) -> Option<&RawEncoding> {
		self.encodings.get(&version)
	}
}

/// A single XCM instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
	WithdrawAsset(Vec<Asset>),
	ReserveAssetDeposited(Vec<Asset>),
	ReceiveTeleportedAsset(Vec<Asset>),
	Transact { origin_kind: OriginKind, require_weight_at_most: Weight, call: Vec<u8> },
	ClearOrigin,
	DescendOrigin(Vec<Junction>),
	/// `max_assets` is carried on the wire by v2 only. Later versions limit the deposit through
	/// the counted wildcards alone.
	DepositAsset { assets: AssetFilter, max_assets: u32, beneficiary: Location },
	ReportHolding { response_info: QueryResponseInfo, assets: AssetFilter },
	BuyExecution { fees: Asset, weight_limit: WeightLimit },
	RefundSurplus,
	SetErrorHandler(Vec<Instruction>),
	SetAppendix(Vec<Instruction>),
	ClearError,
	ClaimAsset { assets: Vec<Asset>, ticket: Location },
	Trap(u64),
	BurnAsset(Vec<Asset>),
	ExpectAsset(Vec<Asset>),
	ExpectOrigin(Option<Location>),
	ExpectError(Option<(u32, XcmError)>),
	ExpectTransactStatus(MaybeErrorCode),
	QueryPallet { module_name: Vec<u8>, response_info: QueryResponseInfo },
	ExpectPallet {
		index: u32,
		name: Vec<u8>,
		module_name: Vec<u8>,
		crate_major: u32,
		min_crate_minor: u32,
	},
	ReportTransactStatus(QueryResponseInfo),
	ClearTransactStatus,
	UniversalOrigin(Junction),
	ExportMessage { network: NetworkId, destination: Vec<Junction>, xcm: Vec<Instruction> },
	LockAsset { asset: Asset, unlocker: Location },
	UnlockAsset { asset: Asset, target: Location },
	NoteUnlockable { asset: Asset, owner: Location },
	RequestUnlock { asset: Asset, locker: Location },
	SetFeesMode { jit_withdraw: bool },
	SetTopic([u8; 32]),
	ClearTopic,
	AliasOrigin(Location),
	UnpaidExecution { weight_limit: WeightLimit, check_origin: Option<Location> },
	Raw(RawInstruction),
}

impl From<RawInstruction> for Instruction {
	fn from(raw: RawInstruction) -> Self {
		Instruction::Raw(raw)
	}
}

impl Instruction {
	/// Variant name as it appears on the wire and in JSON views.
	pub fn name(&self) -> &str {
		use Instruction::*;
		match self {
			WithdrawAsset(_) => "WithdrawAsset",
			ReserveAssetDeposited(_) => "ReserveAssetDeposited",
			ReceiveTeleportedAsset(_) => "ReceiveTeleportedAsset",
			Transact { .. } => "Transact",
			ClearOrigin => "ClearOrigin",
			DescendOrigin(_) => "DescendOrigin",
			DepositAsset { .. } => "DepositAsset",
			ReportHolding { .. } => "ReportHolding",
			BuyExecution { .. } => "BuyExecution",
			RefundSurplus => "RefundSurplus",
			SetErrorHandler(_) => "SetErrorHandler",
			SetAppendix(_) => "SetAppendix",
			ClearError => "ClearError",
			ClaimAsset { .. } => "ClaimAsset",
			Trap(_) => "Trap",
			BurnAsset(_) => "BurnAsset",
			ExpectAsset(_) => "ExpectAsset",
			ExpectOrigin(_) => "ExpectOrigin",
			ExpectError(_) => "ExpectError",
			ExpectTransactStatus(_) => "ExpectTransactStatus",
			QueryPallet { .. } => "QueryPallet",
			ExpectPallet { .. } => "ExpectPallet",
			ReportTransactStatus(_) => "ReportTransactStatus",
			ClearTransactStatus => "ClearTransactStatus",
			UniversalOrigin(_) => "UniversalOrigin",
			ExportMessage { .. } => "ExportMessage",
			LockAsset { .. } => "LockAsset",
			UnlockAsset { .. } => "UnlockAsset",
			NoteUnlockable { .. } => "NoteUnlockable",
			RequestUnlock { .. } => "RequestUnlock",
			SetFeesMode { .. } => "SetFeesMode",
			SetTopic(_) => "SetTopic",
			ClearTopic => "ClearTopic",
			AliasOrigin(_) => "AliasOrigin",
			UnpaidExecution { .. } => "UnpaidExecution",
			Raw(raw) => raw.name(),
		}
	}

	/// The first XCM version defining this instruction.
	///
	/// Raw instructions return `None`: their availability is whatever encodings they carry.
	pub fn introduced_in(&self) -> Option<XcmVersion> {
		use Instruction::*;
		match self {
			WithdrawAsset(_) |
			ReserveAssetDeposited(_) |
			ReceiveTeleportedAsset(_) |
			Transact { .. } |
			ClearOrigin |
			DescendOrigin(_) |
			DepositAsset { .. } |
			BuyExecution { .. } |
			RefundSurplus |
			SetErrorHandler(_) |
			SetAppendix(_) |
			ClearError |
			ClaimAsset { .. } |
			Trap(_) => Some(XcmVersion::V2),
			ReportHolding { .. } |
			BurnAsset(_) |
			ExpectAsset(_) |
			ExpectOrigin(_) |
			ExpectError(_) |
			ExpectTransactStatus(_) |
			QueryPallet { .. } |
			ExpectPallet { .. } |
			ReportTransactStatus(_) |
			ClearTransactStatus |
			UniversalOrigin(_) |
			ExportMessage { .. } |
			LockAsset { .. } |
			UnlockAsset { .. } |
			NoteUnlockable { .. } |
			RequestUnlock { .. } |
			SetFeesMode { .. } |
			SetTopic(_) |
			ClearTopic |
			AliasOrigin(_) |
			UnpaidExecution { .. } => Some(XcmVersion::V3),
			Raw(_) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn rejected_instructions_are_v3_only() {
		let alias = Instruction::AliasOrigin(Location::sibling(1000));
		assert_eq!(alias.introduced_in(), Some(XcmVersion::V3));
		assert_eq!(Instruction::ClearOrigin.introduced_in(), Some(XcmVersion::V2));
	}

	#[test]
	fn raw_instruction_tracks_its_versions() {
		let raw = RawInstruction::new("ClearError").with_encoding_for(
			&[XcmVersion::V3, XcmVersion::V4],
			vec![23],
			json!({ "ClearError": null }),
		);
		assert_eq!(raw.versions().collect::<Vec<_>>(), vec![XcmVersion::V3, XcmVersion::V4]);
		assert!(raw.encoding(XcmVersion::V2).is_none());
		assert_eq!(Instruction::Raw(raw).name(), "ClearError");
	}

	#[test]
	fn error_indices_follow_the_executor() {
		assert_eq!(XcmError::Unimplemented.index(), 1);
		assert_eq!(XcmError::Trap(5).index(), 21);
		assert_eq!(XcmError::Barrier.index(), 37);
		assert_eq!(XcmError::ExceedsStackLimit.index(), 39);
	}
}
