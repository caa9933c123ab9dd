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

//! Rendering of instruction lists into versioned XCM.
//!
//! A single [`Renderer`] walks the instruction model once per requested version, writing the
//! SCALE encoding and building the polkadot-js style JSON view side by side. Everything that
//! differs between v2, v3 and v4 is decided here: codec indices, field names, weight shape,
//! junction network encoding and asset ids. Items the target version cannot express fail with
//! a named [`Error`]; nothing is dropped or substituted silently.

use codec::{Compact, Encode, Output};
use serde_json::{json, Map, Value};

use crate::{
	instruction::{MaybeErrorCode, QueryResponseInfo, RawInstruction, XcmError},
	Asset, AssetFilter, AssetInstance, Error, Fungibility, Instruction, Junction, Location,
	NetworkId, Result, Weight, WeightLimit, WildAsset, WildFungibility, XcmVersion,
	MAX_JUNCTIONS,
};

/// A program rendered for one XCM version.
///
/// The encoding carries the `VersionedXcm` tag and is what the dev node decodes from an
/// inbound queue. The JSON view is keyed by the version tag, e.g. `{"V3": [...]}`.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionedXcm {
	version: XcmVersion,
	instruction_count: usize,
	encoded: Vec<u8>,
	json: Value,
}

impl VersionedXcm {
	/// Renders `instructions` at `version`.
	pub fn render(version: XcmVersion, instructions: &[Instruction]) -> Result<Self> {
		let mut renderer = Renderer { version, out: vec![version.index()] };
		let program = renderer.xcm(instructions)?;
		log::trace!(
			target: crate::LOG_TARGET,
			"rendered {} instructions at {}: {} bytes",
			instructions.len(),
			version,
			renderer.out.len(),
		);

		Ok(VersionedXcm {
			version,
			instruction_count: instructions.len(),
			encoded: renderer.out,
			json: variant(version.tag(), program),
		})
	}

	pub fn version(&self) -> XcmVersion {
		self.version
	}

	/// Number of top level instructions.
	pub fn len(&self) -> usize {
		self.instruction_count
	}

	pub fn is_empty(&self) -> bool {
		self.instruction_count == 0
	}

	/// SCALE encoding, version tag included.
	pub fn as_bytes(&self) -> &[u8] {
		&self.encoded
	}

	/// SCALE encoding of the bare program, without the version tag.
	pub fn program_bytes(&self) -> &[u8] {
		&self.encoded[1..]
	}

	pub fn json(&self) -> &Value {
		&self.json
	}

	/// The JSON view of each top level instruction, in order.
	pub fn instructions_json(&self) -> &[Value] {
		self.json
			.get(self.version.tag())
			.and_then(Value::as_array)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	pub fn to_hex(&self) -> String {
		array_bytes::bytes2hex("0x", &self.encoded)
	}
}

impl Encode for VersionedXcm {
	fn size_hint(&self) -> usize {
		self.encoded.len()
	}

	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		dest.write(&self.encoded)
	}
}

/// Named fields of instruction payloads.
#[derive(Clone, Copy)]
enum Field {
	Assets,
	Asset,
	Beneficiary,
	Call,
	CheckOrigin,
	CrateMajor,
	Destination,
	Fees,
	Index,
	JitWithdraw,
	Locker,
	MaxAssets,
	MaxWeight,
	MinCrateMinor,
	ModuleName,
	Name,
	Network,
	OriginKind,
	Owner,
	QueryId,
	RequireWeightAtMost,
	ResponseInfo,
	Target,
	Ticket,
	Unlocker,
	WeightLimit,
	Xcm,
}

/// Name of `field` in the JSON view at `version`, `None` if the field does not exist there.
fn field_name(version: XcmVersion, field: Field) -> Option<&'static str> {
	let name = match (field, version) {
		(Field::OriginKind, XcmVersion::V2) => "originType",
		(Field::OriginKind, _) => "originKind",
		(Field::MaxAssets, XcmVersion::V2) => "maxAssets",
		(Field::MaxAssets, _) => return None,
		(Field::Assets, _) => "assets",
		(Field::Asset, _) => "asset",
		(Field::Beneficiary, _) => "beneficiary",
		(Field::Call, _) => "call",
		(Field::CheckOrigin, _) => "checkOrigin",
		(Field::CrateMajor, _) => "crateMajor",
		(Field::Destination, _) => "destination",
		(Field::Fees, _) => "fees",
		(Field::Index, _) => "index",
		(Field::JitWithdraw, _) => "jitWithdraw",
		(Field::Locker, _) => "locker",
		(Field::MaxWeight, _) => "maxWeight",
		(Field::MinCrateMinor, _) => "minCrateMinor",
		(Field::ModuleName, _) => "moduleName",
		(Field::Name, _) => "name",
		(Field::Network, _) => "network",
		(Field::Owner, _) => "owner",
		(Field::QueryId, _) => "queryId",
		(Field::RequireWeightAtMost, _) => "requireWeightAtMost",
		(Field::ResponseInfo, _) => "responseInfo",
		(Field::Target, _) => "target",
		(Field::Ticket, _) => "ticket",
		(Field::Unlocker, _) => "unlocker",
		(Field::WeightLimit, _) => "weightLimit",
		(Field::Xcm, _) => "xcm",
	};
	Some(name)
}

/// JSON object whose keys come from the per-version field table.
struct Fields {
	version: XcmVersion,
	map: Map<String, Value>,
}

impl Fields {
	fn with(mut self, field: Field, value: Value) -> Self {
		if let Some(name) = field_name(self.version, field) {
			self.map.insert(name.to_owned(), value);
		}
		self
	}

	fn build(self) -> Value {
		Value::Object(self.map)
	}
}

fn variant(name: &str, payload: Value) -> Value {
	let mut map = Map::new();
	map.insert(name.to_owned(), payload);
	Value::Object(map)
}

fn hex(bytes: &[u8]) -> Value {
	Value::String(array_bytes::bytes2hex("0x", bytes))
}

struct Renderer {
	version: XcmVersion,
	out: Vec<u8>,
}

impl Renderer {
	fn byte(&mut self, byte: u8) {
		self.out.push(byte);
	}

	fn put<T: Encode + ?Sized>(&mut self, value: &T) {
		value.encode_to(&mut self.out);
	}

	fn fields(&self) -> Fields {
		Fields { version: self.version, map: Map::new() }
	}

	fn is_v2(&self) -> bool {
		self.version == XcmVersion::V2
	}

	fn xcm(&mut self, instructions: &[Instruction]) -> Result<Value> {
		self.put(&Compact(instructions.len() as u32));
		instructions
			.iter()
			.map(|instruction| self.instruction(instruction))
			.collect::<Result<Vec<_>>>()
			.map(Value::Array)
	}

	fn instruction(&mut self, instruction: &Instruction) -> Result<Value> {
		use Instruction::*;

		if instruction.introduced_in().map_or(false, |introduced| introduced > self.version) {
			return Err(Error::UnsupportedInstruction {
				instruction: instruction.name().to_owned(),
				version: self.version,
			})
		}

		let payload = match instruction {
			WithdrawAsset(assets) => {
				self.byte(0);
				self.assets(assets)?
			},
			ReserveAssetDeposited(assets) => {
				self.byte(1);
				self.assets(assets)?
			},
			ReceiveTeleportedAsset(assets) => {
				self.byte(2);
				self.assets(assets)?
			},
			Transact { origin_kind, require_weight_at_most, call } => {
				self.byte(6);
				self.byte(origin_kind.index());
				let weight = self.weight(require_weight_at_most);
				self.put(call);
				self.fields()
					.with(Field::OriginKind, json!(origin_kind.name()))
					.with(Field::RequireWeightAtMost, weight)
					.with(Field::Call, json!({ "encoded": hex(call) }))
					.build()
			},
			ClearOrigin => {
				self.byte(10);
				Value::Null
			},
			DescendOrigin(junctions) => {
				self.byte(11);
				self.junctions(junctions)?
			},
			DepositAsset { assets, max_assets, beneficiary } => {
				self.byte(13);
				let assets = self.asset_filter(assets)?;
				if self.is_v2() {
					self.put(&Compact(*max_assets));
				}
				let beneficiary = self.location(beneficiary)?;
				self.fields()
					.with(Field::Assets, assets)
					.with(Field::MaxAssets, json!(max_assets))
					.with(Field::Beneficiary, beneficiary)
					.build()
			},
			ReportHolding { response_info, assets } => {
				self.byte(18);
				let response_info = self.query_response_info(response_info)?;
				let assets = self.asset_filter(assets)?;
				self.fields()
					.with(Field::ResponseInfo, response_info)
					.with(Field::Assets, assets)
					.build()
			},
			BuyExecution { fees, weight_limit } => {
				self.byte(19);
				let fees = self.asset(fees)?;
				let weight_limit = self.weight_limit(weight_limit);
				self.fields()
					.with(Field::Fees, fees)
					.with(Field::WeightLimit, weight_limit)
					.build()
			},
			RefundSurplus => {
				self.byte(20);
				Value::Null
			},
			SetErrorHandler(xcm) => {
				self.byte(21);
				self.xcm(xcm)?
			},
			SetAppendix(xcm) => {
				self.byte(22);
				self.xcm(xcm)?
			},
			ClearError => {
				self.byte(23);
				Value::Null
			},
			ClaimAsset { assets, ticket } => {
				self.byte(24);
				let assets = self.assets(assets)?;
				let ticket = self.location(ticket)?;
				self.fields().with(Field::Assets, assets).with(Field::Ticket, ticket).build()
			},
			Trap(code) => {
				self.byte(25);
				self.put(&Compact(*code));
				json!(code)
			},
			BurnAsset(assets) => {
				self.byte(28);
				self.assets(assets)?
			},
			ExpectAsset(assets) => {
				self.byte(29);
				self.assets(assets)?
			},
			ExpectOrigin(origin) => {
				self.byte(30);
				self.optional_location(origin.as_ref())?
			},
			ExpectError(error) => {
				self.byte(31);
				match error {
					None => {
						self.byte(0);
						Value::Null
					},
					Some((index, error)) => {
						self.byte(1);
						self.put(index);
						let error = self.xcm_error(error);
						json!([index, error])
					},
				}
			},
			ExpectTransactStatus(code) => {
				self.byte(32);
				self.maybe_error_code(code)
			},
			QueryPallet { module_name, response_info } => {
				self.byte(33);
				self.put(module_name);
				let response_info = self.query_response_info(response_info)?;
				self.fields()
					.with(Field::ModuleName, hex(module_name))
					.with(Field::ResponseInfo, response_info)
					.build()
			},
			ExpectPallet { index, name, module_name, crate_major, min_crate_minor } => {
				self.byte(34);
				self.put(&Compact(*index));
				self.put(name);
				self.put(module_name);
				self.put(&Compact(*crate_major));
				self.put(&Compact(*min_crate_minor));
				self.fields()
					.with(Field::Index, json!(index))
					.with(Field::Name, hex(name))
					.with(Field::ModuleName, hex(module_name))
					.with(Field::CrateMajor, json!(crate_major))
					.with(Field::MinCrateMinor, json!(min_crate_minor))
					.build()
			},
			ReportTransactStatus(response_info) => {
				self.byte(35);
				self.query_response_info(response_info)?
			},
			ClearTransactStatus => {
				self.byte(36);
				Value::Null
			},
			UniversalOrigin(junction) => {
				self.byte(37);
				self.junction(junction)?
			},
			ExportMessage { network, destination, xcm } => {
				self.byte(38);
				let network = self.network_id(network)?;
				let destination = self.junctions(destination)?;
				let xcm = self.xcm(xcm)?;
				self.fields()
					.with(Field::Network, network)
					.with(Field::Destination, destination)
					.with(Field::Xcm, xcm)
					.build()
			},
			LockAsset { asset, unlocker } => {
				self.byte(39);
				let asset = self.asset(asset)?;
				let unlocker = self.location(unlocker)?;
				self.fields().with(Field::Asset, asset).with(Field::Unlocker, unlocker).build()
			},
			UnlockAsset { asset, target } => {
				self.byte(40);
				let asset = self.asset(asset)?;
				let target = self.location(target)?;
				self.fields().with(Field::Asset, asset).with(Field::Target, target).build()
			},
			NoteUnlockable { asset, owner } => {
				self.byte(41);
				let asset = self.asset(asset)?;
				let owner = self.location(owner)?;
				self.fields().with(Field::Asset, asset).with(Field::Owner, owner).build()
			},
			RequestUnlock { asset, locker } => {
				self.byte(42);
				let asset = self.asset(asset)?;
				let locker = self.location(locker)?;
				self.fields().with(Field::Asset, asset).with(Field::Locker, locker).build()
			},
			SetFeesMode { jit_withdraw } => {
				self.byte(43);
				self.put(jit_withdraw);
				self.fields().with(Field::JitWithdraw, json!(jit_withdraw)).build()
			},
			SetTopic(topic) => {
				self.byte(44);
				self.put(topic);
				hex(topic)
			},
			ClearTopic => {
				self.byte(45);
				Value::Null
			},
			AliasOrigin(location) => {
				self.byte(46);
				self.location(location)?
			},
			UnpaidExecution { weight_limit, check_origin } => {
				self.byte(47);
				let weight_limit = self.weight_limit(weight_limit);
				let check_origin = self.optional_location(check_origin.as_ref())?;
				self.fields()
					.with(Field::WeightLimit, weight_limit)
					.with(Field::CheckOrigin, check_origin)
					.build()
			},
			Raw(raw) => return self.raw(raw),
		};

		Ok(variant(instruction.name(), payload))
	}

	/// Raw encodings already hold the complete instruction, variant included.
	fn raw(&mut self, raw: &RawInstruction) -> Result<Value> {
		let encoding = raw.encoding(self.version).ok_or_else(|| Error::RawInstructionVersion {
			name: raw.name().to_owned(),
			version: self.version,
		})?;
		self.out.extend_from_slice(&encoding.scale);
		Ok(encoding.json.clone())
	}

	fn location(&mut self, location: &Location) -> Result<Value> {
		self.byte(location.parents);
		let interior = self.junctions(&location.interior)?;
		Ok(json!({ "parents": location.parents, "interior": interior }))
	}

	fn optional_location(&mut self, location: Option<&Location>) -> Result<Value> {
		match location {
			None => {
				self.byte(0);
				Ok(Value::Null)
			},
			Some(location) => {
				self.byte(1);
				self.location(location)
			},
		}
	}

	fn junctions(&mut self, junctions: &[Junction]) -> Result<Value> {
		if junctions.len() > MAX_JUNCTIONS {
			return Err(Error::TooManyJunctions(junctions.len()))
		}
		self.byte(junctions.len() as u8);
		if junctions.is_empty() {
			return Ok(variant("Here", Value::Null))
		}

		let mut items = junctions
			.iter()
			.map(|junction| self.junction(junction))
			.collect::<Result<Vec<_>>>()?;
		// v4 junctions are arrays of any length, earlier versions use tuples.
		let payload = if self.version != XcmVersion::V4 && items.len() == 1 {
			items.swap_remove(0)
		} else {
			Value::Array(items)
		};
		Ok(variant(&format!("X{}", junctions.len()), payload))
	}

	fn junction(&mut self, junction: &Junction) -> Result<Value> {
		let payload = match junction {
			Junction::Parachain(id) => {
				self.byte(0);
				self.put(&Compact(*id));
				json!(id)
			},
			Junction::AccountId32 { network, id } => {
				self.byte(1);
				let network = self.junction_network(network.as_ref())?;
				self.put(id);
				json!({ "network": network, "id": hex(id) })
			},
			Junction::AccountIndex64 { network, index } => {
				self.byte(2);
				let network = self.junction_network(network.as_ref())?;
				self.put(&Compact(*index));
				json!({ "network": network, "index": index })
			},
			Junction::AccountKey20 { network, key } => {
				self.byte(3);
				let network = self.junction_network(network.as_ref())?;
				self.put(key);
				json!({ "network": network, "key": hex(key) })
			},
			Junction::PalletInstance(index) => {
				self.byte(4);
				self.byte(*index);
				json!(index)
			},
			Junction::GeneralIndex(index) => {
				self.byte(5);
				self.put(&Compact(*index));
				json!(index.to_string())
			},
			Junction::GeneralKey { length, data } => {
				if *length as usize > data.len() {
					return Err(Error::GeneralKeyTooLong(*length))
				}
				self.byte(6);
				let key = &data[..*length as usize];
				if self.is_v2() {
					self.put(key);
					hex(key)
				} else {
					self.byte(*length);
					self.put(data);
					json!({ "length": length, "data": hex(data) })
				}
			},
			Junction::OnlyChild => {
				self.byte(7);
				Value::Null
			},
			Junction::GlobalConsensus(network) => {
				if self.is_v2() {
					return Err(Error::UnsupportedJunction {
						junction: junction.name(),
						version: self.version,
					})
				}
				self.byte(9);
				self.network_id(network)?
			},
		};
		Ok(variant(junction.name(), payload))
	}

	/// The network slot of account junctions: mandatory at v2 (`Any` when unset), optional
	/// afterwards.
	fn junction_network(&mut self, network: Option<&NetworkId>) -> Result<Value> {
		match (network, self.is_v2()) {
			(None, true) => {
				self.byte(0);
				Ok(variant("Any", Value::Null))
			},
			(None, false) => {
				self.byte(0);
				Ok(Value::Null)
			},
			(Some(network), true) => self.network_id(network),
			(Some(network), false) => {
				self.byte(1);
				self.network_id(network)
			},
		}
	}

	fn network_id(&mut self, network: &NetworkId) -> Result<Value> {
		let version = self.version;
		let unsupported = || Error::UnsupportedNetwork { network: network.name(), version };
		let payload = match (network, self.version) {
			(NetworkId::Named(name), XcmVersion::V2) => {
				self.byte(1);
				self.put(name);
				hex(name)
			},
			(NetworkId::Polkadot, XcmVersion::V2) => {
				self.byte(2);
				Value::Null
			},
			(NetworkId::Kusama, XcmVersion::V2) => {
				self.byte(3);
				Value::Null
			},
			(_, XcmVersion::V2) | (NetworkId::Named(_), _) => return Err(unsupported()),
			(NetworkId::ByGenesis(genesis), _) => {
				self.byte(0);
				self.put(genesis);
				hex(genesis)
			},
			(NetworkId::ByFork { block_number, block_hash }, _) => {
				self.byte(1);
				self.put(block_number);
				self.put(block_hash);
				json!({ "blockNumber": block_number, "blockHash": hex(block_hash) })
			},
			(NetworkId::Polkadot, _) => {
				self.byte(2);
				Value::Null
			},
			(NetworkId::Kusama, _) => {
				self.byte(3);
				Value::Null
			},
			(NetworkId::Westend, _) => {
				self.byte(4);
				Value::Null
			},
			(NetworkId::Rococo, _) => {
				self.byte(5);
				Value::Null
			},
			(NetworkId::Wococo, _) => {
				self.byte(6);
				Value::Null
			},
			(NetworkId::Ethereum { chain_id }, _) => {
				self.byte(7);
				self.put(&Compact(*chain_id));
				json!({ "chainId": chain_id })
			},
			(NetworkId::BitcoinCore, _) => {
				self.byte(8);
				Value::Null
			},
			(NetworkId::BitcoinCash, _) => {
				self.byte(9);
				Value::Null
			},
			(NetworkId::PolkadotBulletin, _) => {
				self.byte(10);
				Value::Null
			},
		};
		Ok(variant(network.name(), payload))
	}

	fn assets(&mut self, assets: &[Asset]) -> Result<Value> {
		self.put(&Compact(assets.len() as u32));
		assets
			.iter()
			.map(|asset| self.asset(asset))
			.collect::<Result<Vec<_>>>()
			.map(Value::Array)
	}

	fn asset(&mut self, asset: &Asset) -> Result<Value> {
		let id = self.asset_id(&asset.id)?;
		let fun = self.fungibility(&asset.fun)?;
		Ok(json!({ "id": id, "fun": fun }))
	}

	/// v4 identifies assets by location alone; earlier versions wrap it as `Concrete`.
	fn asset_id(&mut self, id: &Location) -> Result<Value> {
		if self.version == XcmVersion::V4 {
			return self.location(id)
		}
		self.byte(0);
		let location = self.location(id)?;
		Ok(variant("Concrete", location))
	}

	fn fungibility(&mut self, fun: &Fungibility) -> Result<Value> {
		match fun {
			Fungibility::Fungible(amount) => {
				self.byte(0);
				self.put(&Compact(*amount));
				Ok(variant("Fungible", json!(amount.to_string())))
			},
			Fungibility::NonFungible(instance) => {
				self.byte(1);
				let instance = self.asset_instance(instance)?;
				Ok(variant("NonFungible", instance))
			},
		}
	}

	fn asset_instance(&mut self, instance: &AssetInstance) -> Result<Value> {
		let payload = match instance {
			AssetInstance::Undefined => {
				self.byte(0);
				Value::Null
			},
			AssetInstance::Index(index) => {
				self.byte(1);
				self.put(&Compact(*index));
				json!(index.to_string())
			},
			AssetInstance::Array4(data) => {
				self.byte(2);
				self.put(data);
				hex(data)
			},
			AssetInstance::Array8(data) => {
				self.byte(3);
				self.put(data);
				hex(data)
			},
			AssetInstance::Array16(data) => {
				self.byte(4);
				self.put(data);
				hex(data)
			},
			AssetInstance::Array32(data) => {
				self.byte(5);
				self.put(data);
				hex(data)
			},
			AssetInstance::Blob(data) if self.is_v2() => {
				self.byte(6);
				self.put(data);
				hex(data)
			},
			AssetInstance::Blob(_) =>
				return Err(Error::UnsupportedAssetInstance {
					instance: instance.name(),
					version: self.version,
				}),
		};
		Ok(variant(instance.name(), payload))
	}

	fn asset_filter(&mut self, filter: &AssetFilter) -> Result<Value> {
		match filter {
			AssetFilter::Definite(assets) => {
				self.byte(0);
				let assets = self.assets(assets)?;
				Ok(variant("Definite", assets))
			},
			AssetFilter::Wild(wild) => {
				self.byte(1);
				let wild = self.wild_asset(wild)?;
				Ok(variant("Wild", wild))
			},
		}
	}

	fn wild_asset(&mut self, wild: &WildAsset) -> Result<Value> {
		let payload = match wild {
			WildAsset::All => {
				self.byte(0);
				Value::Null
			},
			WildAsset::AllOf { id, fun } => {
				self.byte(1);
				let id = self.asset_id(id)?;
				let fun = self.wild_fungibility(*fun);
				json!({ "id": id, "fun": fun })
			},
			WildAsset::AllCounted(_) | WildAsset::AllOfCounted { .. } if self.is_v2() =>
				return Err(Error::UnsupportedWildcard {
					wildcard: wild.name(),
					version: self.version,
				}),
			WildAsset::AllCounted(count) => {
				self.byte(2);
				self.put(&Compact(*count));
				json!(count)
			},
			WildAsset::AllOfCounted { id, fun, count } => {
				self.byte(3);
				let id = self.asset_id(id)?;
				let fun = self.wild_fungibility(*fun);
				self.put(&Compact(*count));
				json!({ "id": id, "fun": fun, "count": count })
			},
		};
		Ok(variant(wild.name(), payload))
	}

	fn wild_fungibility(&mut self, fun: WildFungibility) -> Value {
		let (index, name) = match fun {
			WildFungibility::Fungible => (0, "Fungible"),
			WildFungibility::NonFungible => (1, "NonFungible"),
		};
		self.byte(index);
		variant(name, Value::Null)
	}

	/// v2 weights are a single compact `ref_time`.
	fn weight(&mut self, weight: &Weight) -> Value {
		self.put(&Compact(weight.ref_time));
		if self.is_v2() {
			return json!(weight.ref_time)
		}
		self.put(&Compact(weight.proof_size));
		json!({ "refTime": weight.ref_time, "proofSize": weight.proof_size })
	}

	fn weight_limit(&mut self, limit: &WeightLimit) -> Value {
		match limit {
			WeightLimit::Unlimited => {
				self.byte(0);
				variant("Unlimited", Value::Null)
			},
			WeightLimit::Limited(weight) => {
				self.byte(1);
				let weight = self.weight(weight);
				variant("Limited", weight)
			},
		}
	}

	fn query_response_info(&mut self, info: &QueryResponseInfo) -> Result<Value> {
		let destination = self.location(&info.destination)?;
		self.put(&Compact(info.query_id));
		let max_weight = self.weight(&info.max_weight);
		Ok(self
			.fields()
			.with(Field::Destination, destination)
			.with(Field::QueryId, json!(info.query_id))
			.with(Field::MaxWeight, max_weight)
			.build())
	}

	fn maybe_error_code(&mut self, code: &MaybeErrorCode) -> Value {
		match code {
			MaybeErrorCode::Success => {
				self.byte(0);
				variant("Success", Value::Null)
			},
			MaybeErrorCode::Error(bytes) => {
				self.byte(1);
				self.put(bytes);
				variant("Error", hex(bytes))
			},
			MaybeErrorCode::TruncatedError => {
				self.byte(2);
				variant("TruncatedError", Value::Null)
			},
		}
	}

	fn xcm_error(&mut self, error: &XcmError) -> Value {
		self.byte(error.index());
		let payload = match error {
			XcmError::Trap(code) => {
				self.put(code);
				json!(code)
			},
			XcmError::WeightLimitReached(weight) => self.weight(weight),
			_ => Value::Null,
		};
		variant(error.name(), payload)
	}
}
