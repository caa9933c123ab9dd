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

//! ABI payloads for the batch and XCM utils precompiles and ERC-20 tokens.

use alloy_core::{
	primitives::{Address, Bytes as AbiBytes, U256 as AbiU256},
	sol,
	sol_types::{SolCall, SolValue},
};
use primitive_types::{H160, U256};

use crate::Result;

/// Address of the batch precompile on every Moonbeam network.
pub fn batch_precompile() -> H160 {
	H160::from_low_u64_be(0x808)
}

/// Address of the XCM utils precompile on every Moonbeam network.
pub fn xcm_utils_precompile() -> H160 {
	H160::from_low_u64_be(0x80c)
}

sol! {
	function batchSome(
		address[] to,
		uint256[] value,
		bytes[] callData,
		uint64[] gasLimit
	) external;
	function batchSomeUntilFailure(
		address[] to,
		uint256[] value,
		bytes[] callData,
		uint64[] gasLimit
	) external;
	function batchAll(
		address[] to,
		uint256[] value,
		bytes[] callData,
		uint64[] gasLimit
	) external;

	function balanceOf(address account) external view returns (uint256);

	function weightMessage(bytes message) external view returns (uint64 weight);
}

/// How the batch precompile treats a failing sub-call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchMode {
	/// Revert everything.
	All,
	/// Skip the failed call and carry on.
	Some,
	/// Keep what succeeded so far and stop.
	SomeUntilFailure,
}

/// One call of a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubCall {
	pub to: H160,
	pub value: U256,
	pub call_data: Vec<u8>,
	/// Zero forwards all remaining gas.
	pub gas_limit: u64,
}

pub(crate) fn to_abi_u256(value: U256) -> AbiU256 {
	AbiU256::from_limbs(value.0)
}

pub(crate) fn from_abi_u256(value: AbiU256) -> U256 {
	U256(value.into_limbs())
}

/// Calldata of a batch precompile call running `calls` in `mode`.
///
/// Every mode encodes the same arguments; only the selector differs.
pub fn batch_call_data(mode: BatchMode, calls: &[SubCall]) -> Vec<u8> {
	let to: Vec<Address> = calls.iter().map(|call| Address::from(call.to.0)).collect();
	let value: Vec<AbiU256> = calls.iter().map(|call| to_abi_u256(call.value)).collect();
	let call_data: Vec<AbiBytes> =
		calls.iter().map(|call| AbiBytes::from(call.call_data.clone())).collect();
	let gas_limit: Vec<u64> = calls.iter().map(|call| call.gas_limit).collect();

	match mode {
		BatchMode::All =>
			batchAllCall { to, value, callData: call_data, gasLimit: gas_limit }.abi_encode(),
		BatchMode::Some =>
			batchSomeCall { to, value, callData: call_data, gasLimit: gas_limit }.abi_encode(),
		BatchMode::SomeUntilFailure => batchSomeUntilFailureCall {
			to,
			value,
			callData: call_data,
			gasLimit: gas_limit,
		}
		.abi_encode(),
	}
}

/// Calldata of an ERC-20 `balanceOf(account)`.
pub fn balance_of_call_data(account: H160) -> Vec<u8> {
	balanceOfCall { account: Address::from(account.0) }.abi_encode()
}

/// Decodes the `uint256` returned by `balanceOf`.
pub fn decode_balance(output: &[u8]) -> Result<U256> {
	Ok(from_abi_u256(AbiU256::abi_decode(output)?))
}

/// Calldata asking the XCM utils precompile for the weight of an encoded versioned program.
pub fn weight_message_call_data(message: &[u8]) -> Vec<u8> {
	weightMessageCall { message: AbiBytes::copy_from_slice(message) }.abi_encode()
}

/// Decodes the `uint64` returned by `weightMessage`.
pub fn decode_weight(output: &[u8]) -> Result<u64> {
	Ok(u64::abi_decode(output)?)
}
