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

//! JSON-RPC surface of a Moonbeam dev node.
//!
//! Each trait is generated as both a client, used by [`crate::DevHarness`], and a server, so tests
//! can stand up an in-process node speaking the same methods.

use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use primitive_types::{H160, H256, U256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Bytes travelling as a `0x` prefixed hex string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}
}

impl From<Vec<u8>> for Bytes {
	fn from(bytes: Vec<u8>) -> Self {
		Bytes(bytes)
	}
}

impl From<Bytes> for Vec<u8> {
	fn from(bytes: Bytes) -> Self {
		bytes.0
	}
}

impl Serialize for Bytes {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&array_bytes::bytes2hex("0x", &self.0))
	}
}

impl<'de> Deserialize<'de> for Bytes {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let hex = String::deserialize(deserializer)?;
		array_bytes::hex2bytes(&hex)
			.map(Bytes)
			.map_err(|e| de::Error::custom(format!("invalid hex {hex}: {e:?}")))
	}
}

/// Block numbers travelling as `0x` prefixed hex quantities.
mod hex_number {
	use serde::{de, Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(number: &u64, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&format!("0x{number:x}"))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
		let hex = String::deserialize(deserializer)?;
		let digits = hex.strip_prefix("0x").unwrap_or(&hex);
		u64::from_str_radix(digits, 16)
			.map_err(|e| de::Error::custom(format!("invalid block number {hex}: {e}")))
	}
}

/// Bookkeeping the node returns for an imported block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportedAux {
	pub header_only: bool,
	pub clear_justification_requests: bool,
	pub needs_justification: bool,
	pub bad_justification: bool,
	pub is_new_best: bool,
}

/// A block authored through `engine_createBlock`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBlock {
	pub hash: H256,
	pub aux: ImportedAux,
	/// Size of the storage proof the block produced. Absent on nodes not reporting it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub proof_size: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
	pub parent_hash: H256,
	#[serde(with = "hex_number")]
	pub number: u64,
	pub state_root: H256,
	pub extrinsics_root: H256,
	#[serde(default)]
	pub digest: serde_json::Value,
}

/// The parts of the runtime version the harness reads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeVersion {
	pub spec_name: String,
	pub impl_name: String,
	pub spec_version: u32,
	pub impl_version: u32,
	pub transaction_version: u32,
}

/// An Ethereum call, as taken by `eth_call` and `eth_estimateGas`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub from: Option<H160>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub to: Option<H160>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gas: Option<U256>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<U256>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Bytes>,
}

/// Dev node extensions: message injection and manual sealing.
#[rpc(client, server)]
pub trait DevRpc {
	/// Stage an inbound HRMP message from `sender` for the next authored block.
	#[method(name = "xcm_injectHrmpMessage")]
	fn inject_hrmp_message(&self, sender: u32, message: Vec<u8>) -> RpcResult<()>;

	/// Stage a downward message from the relay chain for the next authored block.
	#[method(name = "xcm_injectDownwardMessage")]
	fn inject_downward_message(&self, message: Vec<u8>) -> RpcResult<()>;

	/// Author a block on top of `parent_hash`, or the best block when absent.
	#[method(name = "engine_createBlock")]
	fn create_block(
		&self,
		create_empty: bool,
		finalize: bool,
		parent_hash: Option<H256>,
	) -> RpcResult<CreatedBlock>;

	#[method(name = "engine_finalizeBlock")]
	fn finalize_block(&self, hash: H256, justification: Option<Bytes>) -> RpcResult<bool>;

	/// Overwrite raw storage entries. `None` removes the entry.
	#[method(name = "dev_setStorage")]
	fn set_storage(&self, items: Vec<(Bytes, Option<Bytes>)>) -> RpcResult<()>;
}

#[rpc(client, server)]
pub trait AuthorApi {
	/// Submit an encoded extrinsic to the pool, returning its hash.
	#[method(name = "author_submitExtrinsic")]
	fn submit_extrinsic(&self, extrinsic: Bytes) -> RpcResult<H256>;
}

#[rpc(client, server)]
pub trait ChainApi {
	/// Header of `hash`, or of the best block.
	#[method(name = "chain_getHeader")]
	fn header(&self, hash: Option<H256>) -> RpcResult<Option<Header>>;

	/// Hash of the canonical block at `number`, or of the best block.
	#[method(name = "chain_getBlockHash")]
	fn block_hash(&self, number: Option<u64>) -> RpcResult<Option<H256>>;

	#[method(name = "chain_getFinalizedHead")]
	fn finalized_head(&self) -> RpcResult<H256>;
}

#[rpc(client, server)]
pub trait StateApi {
	#[method(name = "state_getRuntimeVersion")]
	fn runtime_version(&self, at: Option<H256>) -> RpcResult<RuntimeVersion>;

	#[method(name = "state_getStorage")]
	fn storage(&self, key: Bytes, at: Option<H256>) -> RpcResult<Option<Bytes>>;
}

/// The subset of the Ethereum API the harness needs.
#[rpc(client, server)]
pub trait EthApi {
	#[method(name = "eth_blockNumber")]
	fn block_number(&self) -> RpcResult<U256>;

	#[method(name = "eth_estimateGas")]
	fn estimate_gas(&self, request: CallRequest, block: Option<String>) -> RpcResult<U256>;

	#[method(name = "eth_call")]
	fn call(&self, request: CallRequest, block: Option<String>) -> RpcResult<Bytes>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn header_number_is_a_hex_quantity() {
		let header: Header = serde_json::from_value(json!({
			"parentHash": H256::repeat_byte(1),
			"number": "0x1a",
			"stateRoot": H256::zero(),
			"extrinsicsRoot": H256::zero(),
			"digest": { "logs": [] },
		}))
		.unwrap();
		assert_eq!(header.number, 26);
		assert_eq!(serde_json::to_value(&header).unwrap()["number"], json!("0x1a"));

		assert!(serde_json::from_value::<Header>(json!({ "number": "0xzz" })).is_err());
	}

	#[test]
	fn created_block_reports_proof_size() {
		let block: CreatedBlock = serde_json::from_value(json!({
			"hash": H256::repeat_byte(2),
			"aux": { "headerOnly": false, "isNewBest": true },
			"proof_size": 7_341,
		}))
		.unwrap();
		assert_eq!(block.proof_size, Some(7_341));
		assert!(block.aux.is_new_best);

		let block: CreatedBlock = serde_json::from_value(json!({
			"hash": H256::repeat_byte(2),
			"aux": {},
		}))
		.unwrap();
		assert_eq!(block.proof_size, None);
	}
}
