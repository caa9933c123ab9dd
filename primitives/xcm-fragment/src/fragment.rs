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

//! The [`XcmFragment`] builder.
//!
//! A fragment is configured once with the assets, weight limit, beneficiary and descend origin
//! a test works with, then grown one instruction per call. The configuration only supplies
//! data: every instruction in the rendered program was appended by an explicit call, in call
//! order.
//!
//! ```ignore
//! let message = XcmFragment::new(config)
//! 	.withdraw_asset()
//! 	.clear_origin()
//! 	.buy_execution(0)
//! 	.deposit_asset(1, None)
//! 	.as_v3()?;
//! ```

use crate::{
	instruction::{MaybeErrorCode, OriginKind, QueryResponseInfo, XcmError},
	Asset, AssetFilter, Error, Instruction, Junction, Location, NetworkId, Result,
	VersionedXcm, Weight, WeightLimit, WildAsset, XcmVersion, LOG_TARGET,
};

/// Weight limit used by `BuyExecution` and `UnpaidExecution` when the configuration has none.
///
/// Large enough for a withdraw, buy execution and deposit transfer on the dev runtime.
pub const DEFAULT_WEIGHT_LIMIT: WeightLimit =
	WeightLimit::Limited(Weight::from_parts(4_000_000_000, 110_000));

/// Data the fragment draws from when appending instructions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XcmFragmentConfig {
	/// Assets in the order they are withdrawn and referenced by index.
	pub assets: Vec<Asset>,
	pub weight_limit: Option<WeightLimit>,
	pub beneficiary: Option<Location>,
	/// Account the origin descends into.
	pub descend_origin: Option<[u8; 20]>,
}

impl XcmFragmentConfig {
	pub fn new(assets: Vec<Asset>) -> Self {
		XcmFragmentConfig { assets, ..Default::default() }
	}

	pub fn with_weight_limit(mut self, weight_limit: impl Into<WeightLimit>) -> Self {
		self.weight_limit = Some(weight_limit.into());
		self
	}

	/// Accepts a full location or a 20-byte account shorthand.
	pub fn with_beneficiary(mut self, beneficiary: impl Into<Location>) -> Self {
		self.beneficiary = Some(beneficiary.into());
		self
	}

	pub fn with_descend_origin(mut self, account: [u8; 20]) -> Self {
		self.descend_origin = Some(account);
		self
	}

	/// The configured weight limit, or [`DEFAULT_WEIGHT_LIMIT`].
	pub fn resolved_weight_limit(&self) -> WeightLimit {
		self.weight_limit.unwrap_or(DEFAULT_WEIGHT_LIMIT)
	}
}

/// An append-only XCM program under construction.
#[derive(Clone, Debug)]
pub struct XcmFragment {
	config: XcmFragmentConfig,
	instructions: Vec<Instruction>,
	/// First configuration error hit while appending, reported by every renderer.
	deferred_error: Option<Error>,
}

impl XcmFragment {
	pub fn new(config: XcmFragmentConfig) -> Self {
		XcmFragment { config, instructions: Vec::new(), deferred_error: None }
	}

	pub fn config(&self) -> &XcmFragmentConfig {
		&self.config
	}

	/// Instructions appended so far, in order.
	pub fn instructions(&self) -> &[Instruction] {
		&self.instructions
	}

	/// The error renderers will report, if a call referenced missing configuration.
	pub fn deferred_error(&self) -> Option<&Error> {
		self.deferred_error.as_ref()
	}

	fn push(mut self, instruction: Instruction) -> Self {
		log::trace!(target: LOG_TARGET, "appending {}", instruction.name());
		self.instructions.push(instruction);
		self
	}

	fn push_repeated(self, repeat: usize, instruction: Instruction) -> Self {
		(0..repeat).fold(self, |fragment, _| fragment.push(instruction.clone()))
	}

	fn defer(&mut self, error: Error) {
		log::warn!(target: LOG_TARGET, "{error}");
		if self.deferred_error.is_none() {
			self.deferred_error = Some(error);
		}
	}

	/// The configured asset at `index`. A missing one defers an error and skips the instruction.
	fn configured_asset(&mut self, instruction: &'static str, index: usize) -> Option<Asset> {
		let asset = self.config.assets.get(index).cloned();
		if asset.is_none() {
			let available = self.config.assets.len();
			self.defer(Error::MissingAsset { instruction, index, available });
		}
		asset
	}

	/// A child fragment sharing this configuration, used for nested programs.
	fn child(&self) -> Self {
		XcmFragment::new(self.config.clone())
	}

	fn adopt(mut self, child: XcmFragment) -> (Self, Vec<Instruction>) {
		if let Some(error) = child.deferred_error {
			if self.deferred_error.is_none() {
				self.deferred_error = Some(error);
			}
		}
		(self, child.instructions)
	}

	/// Appends `WithdrawAsset` with every configured asset.
	pub fn withdraw_asset(self) -> Self {
		let assets = self.config.assets.clone();
		self.push(Instruction::WithdrawAsset(assets))
	}

	/// Appends `ReserveAssetDeposited` with every configured asset.
	pub fn reserve_asset_deposited(self) -> Self {
		let assets = self.config.assets.clone();
		self.push(Instruction::ReserveAssetDeposited(assets))
	}

	pub fn clear_origin(self) -> Self {
		self.push(Instruction::ClearOrigin)
	}

	pub fn clear_origin_repeated(self, repeat: usize) -> Self {
		self.push_repeated(repeat, Instruction::ClearOrigin)
	}

	/// Appends `BuyExecution` paying with the configured asset at `fee_index`.
	pub fn buy_execution(self, fee_index: usize) -> Self {
		self.buy_execution_repeated(fee_index, 1)
	}

	pub fn buy_execution_repeated(mut self, fee_index: usize, repeat: usize) -> Self {
		let Some(fees) = self.configured_asset("BuyExecution", fee_index) else { return self };
		let weight_limit = self.config.resolved_weight_limit();
		self.push_repeated(repeat, Instruction::BuyExecution { fees, weight_limit })
	}

	fn beneficiary(&self) -> Option<Location> {
		if self.config.beneficiary.is_none() {
			log::warn!(
				target: LOG_TARGET,
				"building a DepositAsset instruction without a configured beneficiary, skipping",
			);
		}
		self.config.beneficiary.clone()
	}

	/// Appends `DepositAsset` of everything left in holding, up to `max_assets` assets.
	///
	/// `network` qualifies the beneficiary's account junction. The wildcard is the plain `All`
	/// at every version; only v2 carries `max_assets` on the wire.
	pub fn deposit_asset(self, max_assets: u32, network: Option<NetworkId>) -> Self {
		let Some(beneficiary) = self.beneficiary() else { return self };
		self.push(Instruction::DepositAsset {
			assets: WildAsset::All.into(),
			max_assets,
			beneficiary: beneficiary.with_account_network(network),
		})
	}

	/// Appends `DepositAsset` with the v3 `AllCounted` wildcard. Not expressible at v2.
	pub fn deposit_asset_v3(self, max_assets: u32, network: Option<NetworkId>) -> Self {
		let Some(beneficiary) = self.beneficiary() else { return self };
		self.push(Instruction::DepositAsset {
			assets: WildAsset::AllCounted(max_assets).into(),
			max_assets,
			beneficiary: beneficiary.with_account_network(network),
		})
	}

	/// Appends `DepositAsset` of exactly `amount` of the asset at `location` to `beneficiary`.
	pub fn deposit_asset_definite(
		self,
		location: Location,
		amount: u128,
		beneficiary: [u8; 20],
		network: Option<NetworkId>,
	) -> Self {
		self.push(Instruction::DepositAsset {
			assets: AssetFilter::Definite(vec![Asset::fungible(location, amount)]),
			max_assets: 1,
			beneficiary: Location::account_key20(beneficiary).with_account_network(network),
		})
	}

	/// Appends `DescendOrigin` into the configured account, qualified by `network`.
	pub fn descend_origin(self, network: Option<NetworkId>) -> Self {
		let descend_origin = self.config.descend_origin;
		match descend_origin {
			Some(key) => {
				let account = Junction::AccountKey20 { network, key };
				self.push(Instruction::DescendOrigin(vec![account]))
			},
			None => {
				log::warn!(
					target: LOG_TARGET,
					"building a DescendOrigin instruction without a configured descend_origin, \
					 skipping",
				);
				self
			},
		}
	}

	pub fn transact(
		self,
		origin_kind: OriginKind,
		require_weight_at_most: Weight,
		call: Vec<u8>,
	) -> Self {
		self.push(Instruction::Transact { origin_kind, require_weight_at_most, call })
	}

	pub fn refund_surplus(self) -> Self {
		self.push(Instruction::RefundSurplus)
	}

	pub fn refund_surplus_repeated(self, repeat: usize) -> Self {
		self.push_repeated(repeat, Instruction::RefundSurplus)
	}

	/// Appends `ClaimAsset` for the configured asset at `index`, as trapped by the local
	/// asset trap.
	pub fn claim_asset(mut self, index: usize) -> Self {
		let Some(asset) = self.configured_asset("ClaimAsset", index) else { return self };
		self.push(Instruction::ClaimAsset {
			assets: vec![asset],
			ticket: Location::new(0, vec![Junction::GeneralIndex(4)]),
		})
	}

	pub fn clear_error(self) -> Self {
		self.push(Instruction::ClearError)
	}

	pub fn trap(self, code: u64) -> Self {
		self.push(Instruction::Trap(code))
	}

	/// Appends `SetErrorHandler` with the instructions `build` appends to a fresh fragment.
	pub fn set_error_handler_with(self, build: impl FnOnce(XcmFragment) -> XcmFragment) -> Self {
		let child = build(self.child());
		let (fragment, handler) = self.adopt(child);
		fragment.push(Instruction::SetErrorHandler(handler))
	}

	/// Appends `SetAppendix` with the instructions `build` appends to a fresh fragment.
	pub fn set_appendix_with(self, build: impl FnOnce(XcmFragment) -> XcmFragment) -> Self {
		let child = build(self.child());
		let (fragment, appendix) = self.adopt(child);
		fragment.push(Instruction::SetAppendix(appendix))
	}

	/// Applies `f` to the fragment, keeping call chains unbroken around helpers.
	pub fn with(self, f: impl FnOnce(XcmFragment) -> XcmFragment) -> Self {
		f(self)
	}

	/// Appends any instruction, including raw pre-encoded ones.
	pub fn push_any(self, instruction: impl Into<Instruction>) -> Self {
		self.push(instruction.into())
	}

	/// Appends `BurnAsset` of every configured asset, each for `amount` if given.
	pub fn burn_asset(self, amount: Option<u128>) -> Self {
		let assets = self
			.config
			.assets
			.iter()
			.map(|asset| match amount {
				Some(amount) => Asset::fungible(asset.id.clone(), amount),
				None => asset.clone(),
			})
			.collect();
		self.push(Instruction::BurnAsset(assets))
	}

	/// Appends `ReportHolding` of everything in holding.
	pub fn report_holding(self, response_info: QueryResponseInfo) -> Self {
		self.push(Instruction::ReportHolding { response_info, assets: WildAsset::All.into() })
	}

	pub fn expect_asset(self) -> Self {
		let assets = self.config.assets.clone();
		self.push(Instruction::ExpectAsset(assets))
	}

	pub fn expect_origin(self, origin: Option<Location>) -> Self {
		self.push(Instruction::ExpectOrigin(origin))
	}

	pub fn expect_error(self, index: u32, error: XcmError) -> Self {
		self.push(Instruction::ExpectError(Some((index, error))))
	}

	pub fn expect_transact_status(self, status: MaybeErrorCode) -> Self {
		self.push(Instruction::ExpectTransactStatus(status))
	}

	pub fn query_pallet(self, module_name: &str, response_info: QueryResponseInfo) -> Self {
		let module_name = module_name.as_bytes().to_vec();
		self.push(Instruction::QueryPallet { module_name, response_info })
	}

	pub fn expect_pallet(
		self,
		index: u32,
		name: &str,
		module_name: &str,
		crate_major: u32,
		min_crate_minor: u32,
	) -> Self {
		self.push(Instruction::ExpectPallet {
			index,
			name: name.as_bytes().to_vec(),
			module_name: module_name.as_bytes().to_vec(),
			crate_major,
			min_crate_minor,
		})
	}

	pub fn report_transact_status(self, response_info: QueryResponseInfo) -> Self {
		self.push(Instruction::ReportTransactStatus(response_info))
	}

	pub fn clear_transact_status(self) -> Self {
		self.push(Instruction::ClearTransactStatus)
	}

	pub fn set_fees_mode(self, jit_withdraw: bool) -> Self {
		self.push(Instruction::SetFeesMode { jit_withdraw })
	}

	pub fn set_topic(self, topic: [u8; 32]) -> Self {
		self.push(Instruction::SetTopic(topic))
	}

	pub fn clear_topic(self) -> Self {
		self.push(Instruction::ClearTopic)
	}

	/// Appends `UnpaidExecution` with the configured weight limit.
	pub fn unpaid_execution(self, check_origin: Option<Location>) -> Self {
		let weight_limit = self.config.resolved_weight_limit();
		self.push(Instruction::UnpaidExecution { weight_limit, check_origin })
	}

	pub fn universal_origin(self, junction: Junction) -> Self {
		self.push(Instruction::UniversalOrigin(junction))
	}

	pub fn export_message(
		self,
		network: NetworkId,
		destination: Vec<Junction>,
		xcm: Vec<Instruction>,
	) -> Self {
		self.push(Instruction::ExportMessage { network, destination, xcm })
	}

	/// Appends an instruction built from the first configured asset and its own location.
	fn first_asset_instruction(
		mut self,
		instruction: &'static str,
		build: impl FnOnce(Asset, Location) -> Instruction,
	) -> Self {
		let Some(asset) = self.configured_asset(instruction, 0) else { return self };
		let location = asset.id.clone();
		self.push(build(asset, location))
	}

	pub fn lock_asset(self) -> Self {
		self.first_asset_instruction("LockAsset", |asset, unlocker| Instruction::LockAsset {
			asset,
			unlocker,
		})
	}

	pub fn unlock_asset(self) -> Self {
		self.first_asset_instruction("UnlockAsset", |asset, target| Instruction::UnlockAsset {
			asset,
			target,
		})
	}

	pub fn note_unlockable(self) -> Self {
		self.first_asset_instruction("NoteUnlockable", |asset, owner| Instruction::NoteUnlockable {
			asset,
			owner,
		})
	}

	pub fn request_unlock(self) -> Self {
		self.first_asset_instruction("RequestUnlock", |asset, locker| Instruction::RequestUnlock {
			asset,
			locker,
		})
	}

	pub fn alias_origin(self, origin: Location) -> Self {
		self.push(Instruction::AliasOrigin(origin))
	}

	/// Replaces the weight limit of the first top level `BuyExecution` with `weight`.
	pub fn override_weight(mut self, weight: Weight) -> Self {
		let limit = self.instructions.iter_mut().find_map(|instruction| match instruction {
			Instruction::BuyExecution { weight_limit, .. } => Some(weight_limit),
			_ => None,
		});
		match limit {
			Some(limit) => *limit = WeightLimit::Limited(weight),
			None => log::warn!(target: LOG_TARGET, "no BuyExecution to override the weight of"),
		}
		self
	}

	/// Renders the program at `version` without consuming or changing the fragment.
	pub fn render(&self, version: XcmVersion) -> Result<VersionedXcm> {
		if let Some(error) = &self.deferred_error {
			return Err(error.clone())
		}
		VersionedXcm::render(version, &self.instructions)
	}

	pub fn as_v2(&self) -> Result<VersionedXcm> {
		self.render(XcmVersion::V2)
	}

	pub fn as_v3(&self) -> Result<VersionedXcm> {
		self.render(XcmVersion::V3)
	}

	pub fn as_v4(&self) -> Result<VersionedXcm> {
		self.render(XcmVersion::V4)
	}
}

/// Renders an already built fragment at a version picked at run time.
pub fn convert_xcm_fragment_to_version(
	fragment: &XcmFragment,
	version: XcmVersion,
) -> Result<VersionedXcm> {
	fragment.render(version)
}
