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

//! Message injection and block sequencing against a dev node.

use std::time::Duration;

use codec::Encode;
use jsonrpsee::{
	core::client::ClientT,
	ws_client::{WsClient, WsClientBuilder},
};
use moonbeam_runtime_constants::{ConstantStore, RuntimeConstants};
use moonbeam_xcm_fragment::{
	build_xcmp_message, mock_hrmp_channel_existence, RawXcmMessage, VersionedXcm, Weight,
	XcmFragment,
};
use primitive_types::{H160, H256, U256};

use crate::{
	evm::{self, BatchMode, SubCall},
	rpc::{
		AuthorApiClient, Bytes, CallRequest, ChainApiClient, CreatedBlock, DevRpcClient,
		EthApiClient, Header, StateApiClient,
	},
	Error, HarnessConfig, Result, LOG_TARGET,
};

/// How to author a block.
///
/// Blocks are finalized unless [`BlockOptions::unfinalized`] asks otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockOptions {
	/// Block to build on. The best block when `None`.
	pub parent: Option<H256>,
	pub finalize: bool,
	/// Author the block even with nothing to include.
	pub create_empty: bool,
	/// Encoded extrinsics submitted, in order, right before authoring.
	pub extrinsics: Vec<Vec<u8>>,
}

impl Default for BlockOptions {
	fn default() -> Self {
		BlockOptions { parent: None, finalize: true, create_empty: true, extrinsics: Vec::new() }
	}
}

impl BlockOptions {
	pub fn on(parent: H256) -> Self {
		BlockOptions { parent: Some(parent), ..Default::default() }
	}

	/// Leaves the block unfinalized, for finality tracking and reorg scenarios.
	pub fn unfinalized(mut self) -> Self {
		self.finalize = false;
		self
	}

	pub fn with_extrinsic(mut self, extrinsic: Vec<u8>) -> Self {
		self.extrinsics.push(extrinsic);
		self
	}
}

/// A connection to a dev node with manual sealing.
///
/// Every call is awaited before the next one is issued, so messages injected from one source
/// chain reach the node in the order they were injected. Nothing is retried: rejections surface
/// as [`Error::Rpc`] and expired waits as [`Error::Timeout`].
pub struct DevHarness<C = WsClient> {
	client: C,
	config: HarnessConfig,
}

impl DevHarness<WsClient> {
	/// Connects to `config.node_rpc_url` over websocket.
	pub async fn connect(config: HarnessConfig) -> Result<Self> {
		log::debug!(target: LOG_TARGET, "connecting to {}", config.node_rpc_url);
		let client = WsClientBuilder::default()
			.request_timeout(config.timeout())
			.build(&config.node_rpc_url)
			.await?;
		Ok(Self::with_client(client, config))
	}
}

impl<C: ClientT + Send + Sync> DevHarness<C> {
	pub fn with_client(client: C, config: HarnessConfig) -> Self {
		DevHarness { client, config }
	}

	pub fn config(&self) -> &HarnessConfig {
		&self.config
	}

	pub fn client(&self) -> &C {
		&self.client
	}

	/// Stages an HRMP message from `para_id` for the next block.
	///
	/// `None` stages an empty payload.
	pub async fn inject_hrmp_message(
		&self,
		para_id: u32,
		message: Option<&RawXcmMessage>,
	) -> Result<()> {
		let payload = message.map(build_xcmp_message).unwrap_or_default();
		self.inject_encoded_hrmp_message(para_id, payload).await
	}

	/// Stages an HRMP message and authors the block that processes it.
	pub async fn inject_hrmp_message_and_seal(
		&self,
		para_id: u32,
		message: Option<&RawXcmMessage>,
	) -> Result<CreatedBlock> {
		self.inject_hrmp_message(para_id, message).await?;
		self.create_block(BlockOptions::default()).await
	}

	/// Stages hand-encoded bytes as an HRMP message from `para_id`.
	///
	/// The bytes go out as given, malformed or not. Two blocks are authored, one enqueuing the
	/// message and one servicing the queue; the second is returned.
	pub async fn inject_encoded_hrmp_message_and_seal(
		&self,
		para_id: u32,
		encoded: Vec<u8>,
	) -> Result<CreatedBlock> {
		self.inject_encoded_hrmp_message(para_id, encoded).await?;
		let enqueued = self.create_block(BlockOptions::default()).await?;
		log::trace!(target: LOG_TARGET, "message from {para_id} enqueued in {:?}", enqueued.hash);
		self.create_block(BlockOptions::on(enqueued.hash)).await
	}

	/// Stages `payload` verbatim as an HRMP message from `para_id`.
	pub async fn inject_encoded_hrmp_message(&self, para_id: u32, payload: Vec<u8>) -> Result<()> {
		log::debug!(
			target: LOG_TARGET,
			"injecting {} byte hrmp message from {para_id}",
			payload.len(),
		);
		DevRpcClient::inject_hrmp_message(&self.client, para_id, payload).await?;
		Ok(())
	}

	/// Stages a downward message for the next block. `None` stages an empty payload.
	pub async fn inject_downward_message(&self, message: Option<&VersionedXcm>) -> Result<()> {
		let payload = message.map(|xcm| xcm.encode()).unwrap_or_default();
		log::debug!(target: LOG_TARGET, "injecting {} byte downward message", payload.len());
		DevRpcClient::inject_downward_message(&self.client, payload).await?;
		Ok(())
	}

	/// Submits the extrinsics of `options` and authors a block including them along with the
	/// staged messages.
	pub async fn create_block(&self, options: BlockOptions) -> Result<CreatedBlock> {
		let BlockOptions { parent, finalize, create_empty, extrinsics } = options;
		for extrinsic in extrinsics {
			let hash = self.submit_extrinsic(extrinsic).await?;
			log::trace!(target: LOG_TARGET, "submitted extrinsic {hash:?}");
		}
		let block = DevRpcClient::create_block(&self.client, create_empty, finalize, parent).await?;
		log::debug!(
			target: LOG_TARGET,
			"authored {:?} on {parent:?}, finalized: {finalize}, proof size: {:?}",
			block.hash,
			block.proof_size,
		);
		Ok(block)
	}

	/// Submits an encoded extrinsic to the pool of the node.
	pub async fn submit_extrinsic(&self, extrinsic: Vec<u8>) -> Result<H256> {
		Ok(AuthorApiClient::submit_extrinsic(&self.client, extrinsic.into()).await?)
	}

	/// Authors `length` unfinalized blocks in a row on top of `parent`, for reorg scenarios.
	pub async fn create_fork(&self, parent: H256, length: usize) -> Result<Vec<CreatedBlock>> {
		let mut blocks = Vec::with_capacity(length);
		let mut tip = parent;
		for _ in 0..length {
			let block = self.create_block(BlockOptions::on(tip).unfinalized()).await?;
			tip = block.hash;
			blocks.push(block);
		}
		Ok(blocks)
	}

	pub async fn finalize_block(&self, hash: H256) -> Result<bool> {
		Ok(DevRpcClient::finalize_block(&self.client, hash, None).await?)
	}

	pub async fn header(&self, hash: Option<H256>) -> Result<Header> {
		ChainApiClient::header(&self.client, hash).await?.ok_or(Error::MissingHeader(hash))
	}

	pub async fn best_header(&self) -> Result<Header> {
		self.header(None).await
	}

	pub async fn finalized_head(&self) -> Result<H256> {
		Ok(ChainApiClient::finalized_head(&self.client).await?)
	}

	/// Waits until the best block is `count` blocks past the current one.
	pub async fn wait_for_blocks(&self, count: u64, timeout: Duration) -> Result<Header> {
		let target = self.best_header().await?.number + count;
		tokio::time::timeout(timeout, self.poll_until(target)).await.map_err(|_| Error::Timeout {
			waiting_for: format!("block #{target}"),
			timeout,
		})?
	}

	async fn poll_until(&self, target: u64) -> Result<Header> {
		loop {
			let best = self.best_header().await?;
			if best.number >= target {
				return Ok(best)
			}
			tokio::time::sleep(self.config.poll_interval()).await;
		}
	}

	/// Overwrites raw storage through the debug set-storage extension. `None` removes an entry.
	pub async fn set_storage(&self, items: Vec<(Vec<u8>, Option<Vec<u8>>)>) -> Result<()> {
		log::debug!(target: LOG_TARGET, "setting {} storage entries", items.len());
		let items = items
			.into_iter()
			.map(|(key, value)| (Bytes::from(key), value.map(Bytes::from)))
			.collect();
		DevRpcClient::set_storage(&self.client, items).await?;
		Ok(())
	}

	/// Raw storage value under `key` at the best block.
	pub async fn storage(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
		let value = StateApiClient::storage(&self.client, key.to_vec().into(), None).await?;
		Ok(value.map(Into::into))
	}

	/// Makes the node believe an open HRMP channel with `para` exists in both directions.
	///
	/// The validation data inherent rewrites the messaging state in every block, so this has to
	/// be applied before each block sending XCMP to `para`.
	pub async fn mock_hrmp_channel_existence(
		&self,
		para: u32,
		max_capacity: u32,
		max_total_size: u32,
		max_message_size: u32,
	) -> Result<()> {
		let (key, value) =
			mock_hrmp_channel_existence(para, max_capacity, max_total_size, max_message_size);
		self.set_storage(vec![(key, Some(value))]).await
	}

	pub async fn runtime_spec_version(&self) -> Result<u32> {
		Ok(StateApiClient::runtime_version(&self.client, None).await?.spec_version)
	}

	/// Constants of `store` in effect at the node's runtime.
	pub async fn runtime_constants(&self, store: &ConstantStore) -> Result<RuntimeConstants> {
		let spec_version = self.runtime_spec_version().await?;
		Ok(store.at(spec_version)?)
	}

	pub async fn eth_block_number(&self) -> Result<U256> {
		Ok(EthApiClient::block_number(&self.client).await?)
	}

	/// Gas the node estimates for `calls` run through the batch precompile from `from`.
	pub async fn estimate_batch_gas(
		&self,
		from: H160,
		mode: BatchMode,
		calls: &[SubCall],
	) -> Result<u64> {
		let request = CallRequest {
			from: Some(from),
			to: Some(evm::batch_precompile()),
			data: Some(evm::batch_call_data(mode, calls).into()),
			..Default::default()
		};
		let gas = EthApiClient::estimate_gas(&self.client, request, None).await?;
		if gas > U256::from(u64::MAX) {
			return Err(Error::GasOverflow(gas))
		}
		Ok(gas.as_u64())
	}

	/// Weight the node's executor assigns to `message`, as reported by the XCM utils precompile.
	pub async fn weight_message(&self, message: &VersionedXcm) -> Result<u64> {
		let request = CallRequest {
			to: Some(evm::xcm_utils_precompile()),
			data: Some(evm::weight_message_call_data(message.as_bytes()).into()),
			..Default::default()
		};
		let output = EthApiClient::call(&self.client, request, Some("latest".into())).await?;
		evm::decode_weight(output.as_slice())
	}

	/// Replaces the weight limit of the first `BuyExecution` of `fragment` with the weight the
	/// node measures for it.
	///
	/// The program is measured at v2, whose weights have no proof size.
	pub async fn override_weight(&self, fragment: XcmFragment) -> Result<XcmFragment> {
		let weight = self.weight_message(&fragment.as_v2()?).await?;
		Ok(fragment.override_weight(Weight::from_parts(weight, 0)))
	}

	/// ERC-20 balance of `account` in `token` at the best block.
	pub async fn erc20_balance_of(&self, token: H160, account: H160) -> Result<U256> {
		let request = CallRequest {
			to: Some(token),
			data: Some(evm::balance_of_call_data(account).into()),
			..Default::default()
		};
		let output = EthApiClient::call(&self.client, request, Some("latest".into())).await?;
		evm::decode_balance(output.as_slice())
	}
}
