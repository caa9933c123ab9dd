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

//! Test harness for Moonbeam dev nodes.
//!
//! [`DevHarness`] injects HRMP and downward XCM messages built with `moonbeam-xcm-fragment`,
//! authors and finalizes blocks through manual sealing, and reads back what tests need to
//! assert on: headers, the runtime version and the constants in force, and EVM state reached
//! through the batch precompile and ERC-20 contracts.

mod config;
mod error;
pub mod evm;
mod harness;
pub mod rpc;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub use config::{HarnessConfig, NODE_RPC_URL_ENV, TIMEOUT_MS_ENV};
pub use error::{Error, Result};
pub use evm::{BatchMode, SubCall};
pub use harness::{BlockOptions, DevHarness};
pub use rpc::{CreatedBlock, Header, RuntimeVersion};

/// Log target of this crate.
pub const LOG_TARGET: &str = "xcm::dev-harness";
