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

use primitive_types::H256;
use thiserror::Error;

/// Errors raised while driving a dev node.
#[derive(Error, Debug)]
pub enum Error {
	/// The transport failed or the node rejected the request. Carried unchanged.
	#[error("rpc error: {0}")]
	Rpc(#[from] jsonrpsee::core::ClientError),
	/// A wait ran past its deadline.
	#[error("timed out after {timeout:?} waiting for {waiting_for}")]
	Timeout { waiting_for: String, timeout: Duration },
	#[error("node has no header for {0:?}")]
	MissingHeader(Option<H256>),
	#[error(transparent)]
	Fragment(#[from] moonbeam_xcm_fragment::Error),
	#[error(transparent)]
	Constants(#[from] moonbeam_runtime_constants::Error),
	#[error("abi decoding failed: {0}")]
	Abi(#[from] alloy_core::sol_types::Error),
	/// `eth_estimateGas` returned more than fits a gas limit.
	#[error("gas estimate {0} overflows u64")]
	GasOverflow(primitive_types::U256),
	#[error("invalid configuration: {0}")]
	Config(String),
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

/// Result type used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
