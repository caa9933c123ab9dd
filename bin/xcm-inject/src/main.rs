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

//! Injects a transfer XCM program, or hand-encoded bytes, into a Moonbeam dev node.

use anyhow::Context;
use clap::Parser;
use moonbeam_dev_harness::{BlockOptions, DevHarness, HarnessConfig};
use moonbeam_xcm_fragment::{
	build_xcmp_message, Asset, Location, RawXcmMessage, XcmFragment, XcmFragmentConfig, XcmVersion,
	DEFAULT_SOURCE_PARA_ID, DEFAULT_TEST_ADDRESS,
};

const LOG_TARGET: &str = "xcm-inject";

#[derive(Parser, Debug)]
#[command(name = "moonbeam-xcm-inject")]
#[command(about = "Inject an XCM transfer into a Moonbeam dev node", long_about = None)]
struct Cli {
	/// Websocket endpoint of the node. Falls back to DEV_NODE_RPC_URL, then ws://127.0.0.1:9944
	#[arg(long)]
	node_rpc_url: Option<String>,

	/// Parachain the message claims to come from
	#[arg(long, default_value_t = DEFAULT_SOURCE_PARA_ID)]
	para_id: u32,

	/// XCM version to render the program at (v2, v3 or v4)
	#[arg(long, default_value = "v3")]
	xcm_version: XcmVersion,

	/// Pallet instance of the transferred asset on the receiving chain
	#[arg(long, default_value_t = 3)]
	pallet_instance: u8,

	/// Amount withdrawn, spent on fees and deposited
	#[arg(long, default_value_t = 1_000_000_000_000_000_000)]
	amount: u128,

	/// 20 byte account credited with the deposit
	#[arg(long, value_parser = parse_address)]
	beneficiary: Option<[u8; 20]>,

	/// Hex encoded message sent as is instead of the transfer
	#[arg(
		long,
		value_parser = parse_hex,
		conflicts_with_all = ["xcm_version", "amount", "beneficiary"],
	)]
	encoded: Option<Encoded>,

	/// Author the block(s) processing the message
	#[arg(long)]
	seal: bool,

	/// Print the message bytes instead of injecting them
	#[arg(long, conflicts_with = "seal")]
	dry_run: bool,
}

fn parse_address(s: &str) -> Result<[u8; 20], String> {
	array_bytes::hex2array(s).map_err(|e| format!("not a 20 byte hex address: {e:?}"))
}

/// Message bytes given on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Encoded(Vec<u8>);

fn parse_hex(s: &str) -> Result<Encoded, String> {
	array_bytes::hex2bytes(s).map(Encoded).map_err(|e| format!("invalid hex: {e:?}"))
}

impl Cli {
	/// The transfer program: withdraw, clear origin, buy execution, deposit.
	fn transfer(&self) -> anyhow::Result<RawXcmMessage> {
		let asset = Asset::fungible(Location::pallet_instance(self.pallet_instance), self.amount);
		let config = XcmFragmentConfig::new(vec![asset])
			.with_beneficiary(self.beneficiary.unwrap_or(DEFAULT_TEST_ADDRESS));
		let program = XcmFragment::new(config)
			.withdraw_asset()
			.clear_origin()
			.buy_execution(0)
			.deposit_asset(1, None)
			.render(self.xcm_version)
			.with_context(|| format!("rendering the transfer at {}", self.xcm_version))?;
		Ok(RawXcmMessage::new(program))
	}

	fn message_bytes(&self) -> anyhow::Result<Vec<u8>> {
		match &self.encoded {
			Some(Encoded(bytes)) => Ok(bytes.clone()),
			None => Ok(build_xcmp_message(&self.transfer()?)),
		}
	}

	fn harness_config(&self) -> anyhow::Result<HarnessConfig> {
		let mut config = HarnessConfig::from_env()?;
		if let Some(url) = &self.node_rpc_url {
			config.node_rpc_url = url.clone();
		}
		Ok(config)
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let _ = env_logger::try_init_from_env(
		env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
	);
	let cli = Cli::parse();
	let bytes = cli.message_bytes()?;

	if cli.dry_run {
		println!("{}", array_bytes::bytes2hex("0x", &bytes));
		return Ok(())
	}

	let config = cli.harness_config()?;
	let harness = DevHarness::connect(config.clone())
		.await
		.with_context(|| format!("connecting to {}", config.node_rpc_url))?;

	if !cli.seal {
		harness.inject_encoded_hrmp_message(cli.para_id, bytes).await?;
		log::info!(target: LOG_TARGET, "message from {} staged for the next block", cli.para_id);
		return Ok(())
	}

	let block = if cli.encoded.is_some() {
		harness.inject_encoded_hrmp_message_and_seal(cli.para_id, bytes).await?
	} else {
		harness.inject_encoded_hrmp_message(cli.para_id, bytes).await?;
		harness.create_block(BlockOptions::default()).await?
	};
	let header = harness.header(Some(block.hash)).await?;
	log::info!(
		target: LOG_TARGET,
		"message from {} sealed in #{} ({:?})",
		cli.para_id,
		header.number,
		block.hash,
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_is_consistent() {
		Cli::command().debug_assert();
	}

	#[test]
	fn dry_run_renders_the_transfer() {
		let cli = Cli::parse_from([
			"moonbeam-xcm-inject",
			"--xcm-version",
			"v2",
			"--amount",
			"10000000000",
			"--beneficiary",
			"0x0202020202020202020202020202020202020202",
			"--dry-run",
		]);
		assert_eq!(cli.para_id, DEFAULT_SOURCE_PARA_ID);
		assert_eq!(
			array_bytes::bytes2hex("", cli.message_bytes().unwrap()),
			"00021000040000010403000700e40b54020a130000010403000700e40b5402010300286bee\
			 0d010004000103000202020202020202020202020202020202020202",
		);
	}

	#[test]
	fn encoded_bytes_pass_through() {
		let cli = Cli::parse_from(["moonbeam-xcm-inject", "--encoded", "0x000304", "--seal"]);
		assert_eq!(cli.message_bytes().unwrap(), vec![0x00, 0x03, 0x04]);

		let both = ["moonbeam-xcm-inject", "--encoded", "0x00", "--amount", "1"];
		assert!(Cli::try_parse_from(both).is_err());
		assert!(Cli::try_parse_from(["moonbeam-xcm-inject", "--seal", "--dry-run"]).is_err());
		assert!(Cli::try_parse_from(["moonbeam-xcm-inject", "--beneficiary", "0x01"]).is_err());
		assert!(Cli::try_parse_from(["moonbeam-xcm-inject", "--xcm-version", "v9"]).is_err());
	}
}
