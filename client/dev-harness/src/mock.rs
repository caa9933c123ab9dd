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

//! An in-process dev node speaking the harness RPC methods.

use std::{
	collections::HashMap,
	sync::{Arc, Mutex, MutexGuard},
};

use alloy_core::sol_types::{SolCall, SolValue};
use jsonrpsee::{
	core::RpcResult,
	server::{Server, ServerHandle},
	types::{ErrorObject, ErrorObjectOwned},
	RpcModule,
};
use primitive_types::{H160, H256, U256};

use crate::{
	evm::{balanceOfCall, to_abi_u256, weightMessageCall, xcm_utils_precompile},
	rpc::{
		AuthorApiServer, Bytes, CallRequest, ChainApiServer, CreatedBlock, DevRpcServer,
		EthApiServer, Header, ImportedAux, RuntimeVersion, StateApiServer,
	},
};

pub const UNKNOWN_BLOCK: i32 = 4000;
pub const NOTHING_TO_SEAL: i32 = 4001;
pub const UNSUPPORTED_CALL: i32 = 4002;

/// Proof size of a block servicing nothing.
pub const BASE_PROOF_SIZE: u64 = 7_168;
/// Weight the XCM utils precompile reports per byte of a program.
pub const WEIGHT_PER_BYTE: u64 = 1_000_000;

#[derive(Clone, Debug)]
struct MockBlock {
	parent: H256,
	number: u64,
	extrinsics: Vec<Vec<u8>>,
}

/// A message the node serviced, in servicing order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Processed {
	pub block: H256,
	/// Sending parachain, `None` for downward messages.
	pub sender: Option<u32>,
	pub data: Vec<u8>,
}

struct Queued {
	ready_at: u64,
	sender: Option<u32>,
	data: Vec<u8>,
}

struct State {
	blocks: HashMap<H256, MockBlock>,
	genesis: H256,
	best: H256,
	finalized: H256,
	authored: u64,
	staged: Vec<(Option<u32>, Vec<u8>)>,
	pool: Vec<Vec<u8>>,
	storage: HashMap<Vec<u8>, Vec<u8>>,
	queue: Vec<Queued>,
	processed: Vec<Processed>,
	queue_delay: u64,
	spec_version: u32,
	balances: HashMap<(H160, H160), U256>,
	estimates: Vec<CallRequest>,
}

/// Mock dev node. Clones share state.
#[derive(Clone)]
pub struct MockNode(Arc<Mutex<State>>);

fn error(code: i32, message: impl Into<String>) -> ErrorObjectOwned {
	ErrorObject::owned(code, message.into(), None::<()>)
}

impl MockNode {
	pub fn new() -> Self {
		let genesis = H256::from_low_u64_be(0xb10c_0000);
		MockNode(Arc::new(Mutex::new(State {
			blocks: HashMap::from([(
				genesis,
				MockBlock { parent: H256::zero(), number: 0, extrinsics: Vec::new() },
			)]),
			genesis,
			best: genesis,
			finalized: genesis,
			authored: 0,
			staged: Vec::new(),
			pool: Vec::new(),
			storage: HashMap::new(),
			queue: Vec::new(),
			processed: Vec::new(),
			queue_delay: 0,
			spec_version: 3100,
			balances: HashMap::new(),
			estimates: Vec::new(),
		})))
	}

	/// Blocks between enqueuing a message and servicing it.
	pub fn with_queue_delay(self, delay: u64) -> Self {
		self.state().queue_delay = delay;
		self
	}

	pub fn with_spec_version(self, spec_version: u32) -> Self {
		self.state().spec_version = spec_version;
		self
	}

	pub fn with_balance(self, token: H160, account: H160, balance: U256) -> Self {
		self.state().balances.insert((token, account), balance);
		self
	}

	pub fn genesis(&self) -> H256 {
		self.state().genesis
	}

	pub fn processed(&self) -> Vec<Processed> {
		self.state().processed.clone()
	}

	pub fn estimates(&self) -> Vec<CallRequest> {
		self.state().estimates.clone()
	}

	/// Extrinsics included in `block`, in inclusion order.
	pub fn extrinsics(&self, block: H256) -> Vec<Vec<u8>> {
		self.state().blocks.get(&block).map(|block| block.extrinsics.clone()).unwrap_or_default()
	}

	fn state(&self) -> MutexGuard<'_, State> {
		self.0.lock().unwrap()
	}

	/// Serves the node on a local port, returning its websocket url.
	pub async fn spawn(&self) -> (String, ServerHandle) {
		let server = Server::builder().build("127.0.0.1:0").await.unwrap();
		let url = format!("ws://{}", server.local_addr().unwrap());

		let mut module = RpcModule::new(());
		module.merge(DevRpcServer::into_rpc(self.clone())).unwrap();
		module.merge(AuthorApiServer::into_rpc(self.clone())).unwrap();
		module.merge(ChainApiServer::into_rpc(self.clone())).unwrap();
		module.merge(StateApiServer::into_rpc(self.clone())).unwrap();
		module.merge(EthApiServer::into_rpc(self.clone())).unwrap();
		(url, server.start(module))
	}
}

impl State {
	fn header(&self, hash: H256) -> Option<Header> {
		self.blocks.get(&hash).map(|block| Header {
			parent_hash: block.parent,
			number: block.number,
			state_root: H256::zero(),
			extrinsics_root: H256::zero(),
			digest: serde_json::Value::Null,
		})
	}

	/// Authors a block on `parent`, returning its hash, number and proof size.
	fn author(&mut self, parent: H256) -> RpcResult<(H256, u64, u64)> {
		let number = self
			.blocks
			.get(&parent)
			.ok_or_else(|| error(UNKNOWN_BLOCK, format!("unknown parent {parent:?}")))?
			.number + 1;
		self.authored += 1;
		let hash = H256::from_low_u64_be(0xb10c_0000 + self.authored);
		let extrinsics = std::mem::take(&mut self.pool);
		let included: u64 = extrinsics.iter().map(|extrinsic| extrinsic.len() as u64).sum();
		let mut proof_size = BASE_PROOF_SIZE + included;
		self.blocks.insert(hash, MockBlock { parent, number, extrinsics });

		for (sender, data) in self.staged.drain(..) {
			self.queue.push(Queued { ready_at: number + self.queue_delay, sender, data });
		}
		let (ready, waiting): (Vec<Queued>, Vec<Queued>) =
			self.queue.drain(..).partition(|queued| queued.ready_at <= number);
		self.queue = waiting;
		proof_size += ready.iter().map(|queued| queued.data.len() as u64).sum::<u64>();
		self.processed.extend(ready.into_iter().map(|queued| Processed {
			block: hash,
			sender: queued.sender,
			data: queued.data,
		}));
		Ok((hash, number, proof_size))
	}
}

impl DevRpcServer for MockNode {
	fn inject_hrmp_message(&self, sender: u32, message: Vec<u8>) -> RpcResult<()> {
		self.state().staged.push((Some(sender), message));
		Ok(())
	}

	fn inject_downward_message(&self, message: Vec<u8>) -> RpcResult<()> {
		self.state().staged.push((None, message));
		Ok(())
	}

	fn create_block(
		&self,
		create_empty: bool,
		finalize: bool,
		parent_hash: Option<H256>,
	) -> RpcResult<CreatedBlock> {
		let mut state = self.state();
		if !create_empty && state.staged.is_empty() && state.pool.is_empty() {
			return Err(error(NOTHING_TO_SEAL, "nothing to seal"))
		}
		let parent = parent_hash.unwrap_or(state.best);
		let (hash, number, proof_size) = state.author(parent)?;

		let best_number = state.blocks[&state.best].number;
		let is_new_best = number > best_number;
		if is_new_best {
			state.best = hash;
		}
		if finalize {
			state.finalized = hash;
		}
		Ok(CreatedBlock {
			hash,
			aux: ImportedAux { is_new_best, ..Default::default() },
			proof_size: Some(proof_size),
		})
	}

	fn finalize_block(&self, hash: H256, _justification: Option<Bytes>) -> RpcResult<bool> {
		let mut state = self.state();
		if !state.blocks.contains_key(&hash) {
			return Err(error(UNKNOWN_BLOCK, format!("unknown block {hash:?}")))
		}
		state.finalized = hash;
		Ok(true)
	}

	fn set_storage(&self, items: Vec<(Bytes, Option<Bytes>)>) -> RpcResult<()> {
		let mut state = self.state();
		for (key, value) in items {
			match value {
				Some(value) => state.storage.insert(key.0, value.0),
				None => state.storage.remove(&key.0),
			};
		}
		Ok(())
	}
}

impl AuthorApiServer for MockNode {
	fn submit_extrinsic(&self, extrinsic: Bytes) -> RpcResult<H256> {
		let hash = H256(sp_crypto_hashing::blake2_256(extrinsic.as_slice()));
		self.state().pool.push(extrinsic.0);
		Ok(hash)
	}
}

impl ChainApiServer for MockNode {
	fn header(&self, hash: Option<H256>) -> RpcResult<Option<Header>> {
		let state = self.state();
		Ok(state.header(hash.unwrap_or(state.best)))
	}

	fn block_hash(&self, number: Option<u64>) -> RpcResult<Option<H256>> {
		let state = self.state();
		let Some(number) = number else { return Ok(Some(state.best)) };
		let mut cursor = state.best;
		while let Some(block) = state.blocks.get(&cursor) {
			if block.number == number {
				return Ok(Some(cursor))
			}
			cursor = block.parent;
		}
		Ok(None)
	}

	fn finalized_head(&self) -> RpcResult<H256> {
		Ok(self.state().finalized)
	}
}

impl StateApiServer for MockNode {
	fn runtime_version(&self, _at: Option<H256>) -> RpcResult<RuntimeVersion> {
		Ok(RuntimeVersion {
			spec_name: "moonbase".into(),
			impl_name: "moonbase".into(),
			spec_version: self.state().spec_version,
			impl_version: 0,
			transaction_version: 3,
		})
	}

	fn storage(&self, key: Bytes, _at: Option<H256>) -> RpcResult<Option<Bytes>> {
		Ok(self.state().storage.get(key.as_slice()).cloned().map(Bytes))
	}
}

impl EthApiServer for MockNode {
	fn block_number(&self) -> RpcResult<U256> {
		let state = self.state();
		Ok(U256::from(state.blocks[&state.best].number))
	}

	fn estimate_gas(&self, request: CallRequest, _block: Option<String>) -> RpcResult<U256> {
		let data_len = request.data.as_ref().map_or(0, |data| data.0.len());
		self.state().estimates.push(request);
		Ok(U256::from(21_000 + 16 * data_len))
	}

	fn call(&self, request: CallRequest, _block: Option<String>) -> RpcResult<Bytes> {
		let data = request.data.unwrap_or_default();
		if request.to == Some(xcm_utils_precompile()) {
			let call = weightMessageCall::abi_decode(data.as_slice())
				.map_err(|e| error(UNSUPPORTED_CALL, e.to_string()))?;
			let weight = WEIGHT_PER_BYTE * call.message.len() as u64;
			return Ok(Bytes(weight.abi_encode()))
		}
		let call = balanceOfCall::abi_decode(data.as_slice())
			.map_err(|e| error(UNSUPPORTED_CALL, e.to_string()))?;
		let token = request.to.unwrap_or_default();
		let account = H160(call.account.0 .0);
		let balance = self.state().balances.get(&(token, account)).copied().unwrap_or_default();
		Ok(Bytes(to_abi_u256(balance).abi_encode()))
	}
}
