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

use std::time::Duration;

use assert_matches::assert_matches;
use hex_literal::hex;
use jsonrpsee::{core::ClientError, server::ServerHandle};
use moonbeam_runtime_constants::{ConstantStore, Network};
use codec::Decode;
use moonbeam_xcm_fragment::{
	build_xcmp_message, messaging::MessagingStateSnapshot, Asset, Instruction, Location,
	RawXcmMessage, Weight, WeightLimit, XcmFragment, XcmFragmentConfig,
};
use primitive_types::{H160, H256, U256};

use crate::{
	evm,
	mock::{
		MockNode, Processed, BASE_PROOF_SIZE, NOTHING_TO_SEAL, UNKNOWN_BLOCK, WEIGHT_PER_BYTE,
	},
	BatchMode, BlockOptions, DevHarness, Error, HarnessConfig, SubCall,
};

const SOURCE_PARA: u32 = 1;

async fn harness(node: &MockNode) -> (DevHarness, ServerHandle) {
	let _ = env_logger::try_init();
	let (url, handle) = node.spawn().await;
	let config = HarnessConfig {
		node_rpc_url: url,
		timeout_ms: 5_000,
		poll_interval_ms: 5,
		network: Network::Moonbase,
	};
	(DevHarness::connect(config).await.unwrap(), handle)
}

fn transfer(amount: u128) -> RawXcmMessage {
	let config = XcmFragmentConfig::new(vec![Asset::fungible(Location::pallet_instance(3), amount)])
		.with_beneficiary([2u8; 20]);
	let program = XcmFragment::new(config)
		.reserve_asset_deposited()
		.clear_origin()
		.buy_execution(0)
		.deposit_asset_v3(1, None)
		.as_v3()
		.unwrap();
	RawXcmMessage::new(program)
}

#[tokio::test]
async fn injected_message_is_processed_in_the_sealed_block() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;
	let message = transfer(1_000);

	let block = harness.inject_hrmp_message_and_seal(SOURCE_PARA, Some(&message)).await.unwrap();
	assert!(block.aux.is_new_best);
	let data = build_xcmp_message(&message);
	assert_eq!(block.proof_size, Some(BASE_PROOF_SIZE + data.len() as u64));
	assert_eq!(
		node.processed(),
		vec![Processed { block: block.hash, sender: Some(SOURCE_PARA), data }],
	);
	assert_eq!(harness.best_header().await.unwrap().number, 1);
}

#[tokio::test]
async fn sealed_blocks_are_finalized_unless_asked_otherwise() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;

	let sealed = harness.inject_hrmp_message_and_seal(SOURCE_PARA, None).await.unwrap();
	assert_eq!(harness.finalized_head().await.unwrap(), sealed.hash);

	let two_step =
		harness.inject_encoded_hrmp_message_and_seal(SOURCE_PARA, vec![0x00]).await.unwrap();
	assert_eq!(harness.finalized_head().await.unwrap(), two_step.hash);

	let pending = harness.create_block(BlockOptions::default().unfinalized()).await.unwrap();
	assert_eq!(harness.best_header().await.unwrap().parent_hash, two_step.hash);
	assert_eq!(harness.finalized_head().await.unwrap(), two_step.hash);
	assert!(harness.finalize_block(pending.hash).await.unwrap());
	assert_eq!(harness.finalized_head().await.unwrap(), pending.hash);
}

#[tokio::test]
async fn identical_injections_stay_separate_and_ordered() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;
	let first = transfer(1);
	let second = transfer(2);

	harness.inject_hrmp_message(SOURCE_PARA, Some(&first)).await.unwrap();
	harness.inject_hrmp_message(SOURCE_PARA, Some(&first)).await.unwrap();
	harness.inject_hrmp_message(SOURCE_PARA, Some(&second)).await.unwrap();
	harness.inject_hrmp_message(SOURCE_PARA, None).await.unwrap();
	let block = harness.create_block(BlockOptions::default()).await.unwrap();

	let data: Vec<Vec<u8>> = node.processed().into_iter().map(|processed| processed.data).collect();
	let (first, second) = (build_xcmp_message(&first), build_xcmp_message(&second));
	assert_eq!(data, vec![first.clone(), first, second, vec![]]);
	assert!(node.processed().iter().all(|processed| processed.block == block.hash));
}

#[tokio::test]
async fn hand_encoded_general_keys_go_out_verbatim() {
	let recipient = H160::repeat_byte(0x02);
	let token = H160::repeat_byte(0x70);
	// DescendOrigin(X1(GeneralKey)): a key claiming 32 bytes but carrying 10, then one claiming
	// 33 bytes.
	let undersized = hex!("0003040b010620 00112233445566778899").to_vec();
	let oversized = hex!(
		"0003040b010621ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
	)
	.to_vec();

	for malformed in [undersized, oversized] {
		let node = MockNode::new().with_queue_delay(1);
		let (harness, _server) = harness(&node).await;

		let block = harness
			.inject_encoded_hrmp_message_and_seal(SOURCE_PARA, malformed.clone())
			.await
			.unwrap();
		let header = harness.header(Some(block.hash)).await.unwrap();
		assert_eq!(header.number, 2);
		assert_eq!(harness.header(Some(header.parent_hash)).await.unwrap().number, 1);
		assert!(block.proof_size.unwrap() >= 7_000);

		assert_eq!(
			node.processed(),
			vec![Processed { block: block.hash, sender: Some(SOURCE_PARA), data: malformed }],
		);
		assert_eq!(harness.erc20_balance_of(token, recipient).await.unwrap(), U256::zero());
	}
}

#[tokio::test]
async fn downward_messages_carry_the_versioned_program() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;
	let program = transfer(5).payload;

	harness.inject_downward_message(Some(&program)).await.unwrap();
	harness.inject_downward_message(None).await.unwrap();
	harness.create_block(BlockOptions::default()).await.unwrap();

	let processed = node.processed();
	assert_eq!(processed.len(), 2);
	assert_eq!(processed[0].sender, None);
	assert_eq!(processed[0].data, program.as_bytes());
	assert!(processed[1].data.is_empty());
}

#[tokio::test]
async fn node_rejections_propagate() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;

	let unknown = H256::repeat_byte(0xaa);
	assert_matches!(
		harness.create_block(BlockOptions::on(unknown)).await,
		Err(Error::Rpc(ClientError::Call(e))) if e.code() == UNKNOWN_BLOCK
	);
	assert_matches!(
		harness.finalize_block(unknown).await,
		Err(Error::Rpc(ClientError::Call(e))) if e.code() == UNKNOWN_BLOCK
	);
	assert_matches!(harness.header(Some(unknown)).await, Err(Error::MissingHeader(Some(_))));
}

#[tokio::test]
async fn forks_and_finality() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;

	let main = harness.create_fork(node.genesis(), 2).await.unwrap();
	let fork = harness.create_fork(node.genesis(), 3).await.unwrap();
	assert_eq!(fork.len(), 3);
	assert!(main.iter().all(|block| block.aux.is_new_best));
	assert!(!fork[0].aux.is_new_best && !fork[1].aux.is_new_best && fork[2].aux.is_new_best);

	let best = harness.best_header().await.unwrap();
	assert_eq!(best.number, 3);
	assert_eq!(best.parent_hash, fork[1].hash);
	assert!(harness.create_fork(main[1].hash, 0).await.unwrap().is_empty());

	assert_eq!(harness.finalized_head().await.unwrap(), node.genesis());
	assert!(harness.finalize_block(fork[2].hash).await.unwrap());
	assert_eq!(harness.finalized_head().await.unwrap(), fork[2].hash);

	let sealed = harness.create_block(BlockOptions::default()).await.unwrap();
	assert_eq!(harness.finalized_head().await.unwrap(), sealed.hash);
	assert_eq!(harness.eth_block_number().await.unwrap(), U256::from(4u64));
}

#[tokio::test]
async fn waiting_times_out_distinctly() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;

	assert_matches!(
		harness.wait_for_blocks(1, Duration::from_millis(50)).await,
		Err(Error::Timeout { timeout, .. }) if timeout == Duration::from_millis(50)
	);
	assert_eq!(harness.wait_for_blocks(0, Duration::from_millis(50)).await.unwrap().number, 0);
}

#[tokio::test]
async fn waiting_sees_blocks_authored_meanwhile() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;
	let (author, _author_server) = self::harness(&node).await;
	let genesis = node.genesis();

	let sealing = tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(20)).await;
		author.create_fork(genesis, 2).await.map(|blocks| blocks.len())
	});
	let header = harness.wait_for_blocks(2, Duration::from_secs(5)).await.unwrap();
	assert_eq!(header.number, 2);
	assert_eq!(sealing.await.unwrap().unwrap(), 2);
}

#[tokio::test]
async fn constants_follow_the_runtime() {
	let node = MockNode::new().with_spec_version(3000);
	let (harness, _server) = harness(&node).await;
	let store = ConstantStore::for_network(harness.config().network);

	assert_eq!(harness.runtime_spec_version().await.unwrap(), 3000);
	let constants = harness.runtime_constants(&store).await.unwrap();
	assert_eq!(constants.gas_per_pov_bytes, 8);

	let ahead = MockNode::new().with_spec_version(9999);
	let (harness, _server) = self::harness(&ahead).await;
	assert_matches!(harness.runtime_constants(&store).await, Err(Error::Constants(_)));
}

#[tokio::test]
async fn batch_gas_and_erc20_balances() {
	let token = H160::repeat_byte(0x70);
	let holder = H160::repeat_byte(0x01);
	let node = MockNode::new().with_balance(token, holder, U256::from(123_456u64));
	let (harness, _server) = harness(&node).await;

	let calls = vec![
		SubCall { to: token, call_data: evm::balance_of_call_data(holder), ..Default::default() },
		SubCall { to: holder, value: U256::from(10u64), ..Default::default() },
	];
	let gas =
		harness.estimate_batch_gas(holder, BatchMode::SomeUntilFailure, &calls).await.unwrap();
	let data = evm::batch_call_data(BatchMode::SomeUntilFailure, &calls);
	assert_eq!(gas, 21_000 + 16 * data.len() as u64);

	let estimate = &node.estimates()[0];
	assert_eq!(estimate.to, Some(evm::batch_precompile()));
	assert_eq!(estimate.from, Some(holder));
	assert_eq!(estimate.data.as_ref().map(|data| data.as_slice()), Some(&data[..]));

	assert_eq!(harness.erc20_balance_of(token, holder).await.unwrap(), U256::from(123_456u64));
	assert_eq!(harness.erc20_balance_of(token, token).await.unwrap(), U256::zero());
}

#[tokio::test]
async fn blocks_include_submitted_extrinsics() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;

	assert_matches!(
		harness.create_block(BlockOptions { create_empty: false, ..Default::default() }).await,
		Err(Error::Rpc(ClientError::Call(e))) if e.code() == NOTHING_TO_SEAL
	);

	let options = BlockOptions { create_empty: false, ..Default::default() }
		.with_extrinsic(vec![0x04, 0x01])
		.with_extrinsic(vec![0x04, 0x02]);
	let block = harness.create_block(options).await.unwrap();
	assert_eq!(node.extrinsics(block.hash), vec![vec![0x04, 0x01], vec![0x04, 0x02]]);
	assert_eq!(block.proof_size, Some(BASE_PROOF_SIZE + 4));

	let next = harness.create_block(BlockOptions::default()).await.unwrap();
	assert!(node.extrinsics(next.hash).is_empty());
}

#[tokio::test]
async fn hrmp_channel_is_mocked_through_storage() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;
	let (key, _) = moonbeam_xcm_fragment::mock_hrmp_channel_existence(2000, 0, 0, 0);
	assert_eq!(harness.storage(&key).await.unwrap(), None);

	harness.mock_hrmp_channel_existence(2000, 1000, 102_400, 102_400).await.unwrap();
	let value = harness.storage(&key).await.unwrap().unwrap();
	let state = MessagingStateSnapshot::decode(&mut &value[..]).unwrap();
	assert_eq!(state.egress_channels.len(), 1);
	assert_eq!(state.egress_channels[0].0, 2000);
	assert_eq!(state.egress_channels[0].1.max_message_size, 102_400);

	harness.set_storage(vec![(key.clone(), None)]).await.unwrap();
	assert_eq!(harness.storage(&key).await.unwrap(), None);
}

#[tokio::test]
async fn measured_weight_feeds_buy_execution() {
	let node = MockNode::new();
	let (harness, _server) = harness(&node).await;
	let config = XcmFragmentConfig::new(vec![Asset::fungible(Location::pallet_instance(3), 1_000)])
		.with_beneficiary([2u8; 20]);
	let fragment = XcmFragment::new(config)
		.withdraw_asset()
		.clear_origin()
		.buy_execution(0)
		.deposit_asset(1, None);

	let program = fragment.as_v2().unwrap();
	let weight = harness.weight_message(&program).await.unwrap();
	assert_eq!(weight, WEIGHT_PER_BYTE * program.as_bytes().len() as u64);

	let measured = harness.override_weight(fragment).await.unwrap();
	assert_matches!(
		&measured.instructions()[2],
		Instruction::BuyExecution { weight_limit: WeightLimit::Limited(limit), .. }
			if *limit == Weight::from_parts(weight, 0)
	);
}
