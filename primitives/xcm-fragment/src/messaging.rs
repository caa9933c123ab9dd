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

//! Storage override making the dev node believe an HRMP channel with a sibling exists.
//!
//! The parachain system pallet only routes outbound XCMP to siblings listed in its relevant
//! messaging state. The dev node has no relay chain, so tests overwrite that value through a
//! debug set-storage call. The validation data inherent resets it, hence the override has to be
//! applied in every block that relies on it.

use codec::{Decode, Encode};
use sp_crypto_hashing::twox_128;

/// Remaining capacity of the relay dispatch queue for this parachain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub struct RelayDispatchQueueRemainingCapacity {
	pub remaining_count: u32,
	pub remaining_size: u32,
}

/// A shortened HRMP channel description, as seen from one side.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct AbridgedHrmpChannel {
	pub max_capacity: u32,
	pub max_total_size: u32,
	pub max_message_size: u32,
	pub msg_count: u32,
	pub total_size: u32,
	pub mqc_head: Option<[u8; 32]>,
}

impl AbridgedHrmpChannel {
	/// An empty channel with the given limits.
	pub fn empty(max_capacity: u32, max_total_size: u32, max_message_size: u32) -> Self {
		AbridgedHrmpChannel {
			max_capacity,
			max_total_size,
			max_message_size,
			msg_count: 0,
			total_size: 0,
			mqc_head: None,
		}
	}
}

/// Snapshot of the relay chain messaging state relevant to this parachain.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct MessagingStateSnapshot {
	pub dmq_mqc_head: [u8; 32],
	pub relay_dispatch_queue_remaining_capacity: RelayDispatchQueueRemainingCapacity,
	/// Sorted by sender para id.
	pub ingress_channels: Vec<(u32, AbridgedHrmpChannel)>,
	/// Sorted by recipient para id.
	pub egress_channels: Vec<(u32, AbridgedHrmpChannel)>,
}

/// Storage key of `ParachainSystem::RelevantMessagingState`.
pub fn relevant_messaging_state_key() -> Vec<u8> {
	[twox_128(b"ParachainSystem"), twox_128(b"RelevantMessagingState")].concat()
}

/// Key and value to store for an open, empty channel with `para` in both directions.
pub fn mock_hrmp_channel_existence(
	para: u32,
	max_capacity: u32,
	max_total_size: u32,
	max_message_size: u32,
) -> (Vec<u8>, Vec<u8>) {
	let channel = AbridgedHrmpChannel::empty(max_capacity, max_total_size, max_message_size);
	let state = MessagingStateSnapshot {
		dmq_mqc_head: [0u8; 32],
		relay_dispatch_queue_remaining_capacity: Default::default(),
		ingress_channels: vec![(para, channel.clone())],
		egress_channels: vec![(para, channel)],
	};
	(relevant_messaging_state_key(), state.encode())
}

#[cfg(test)]
mod tests {
	use super::*;
	use hex_literal::hex;

	#[test]
	fn storage_key_is_pallet_and_item_prefix() {
		assert_eq!(
			relevant_messaging_state_key(),
			hex!("45323df7cc47150b3930e2666b0aa313 2a47b0ddcc4fcdffe6c6b0b119e45c28").to_vec(),
		);
	}

	#[test]
	fn snapshot_lists_channel_both_ways() {
		let (_, value) = mock_hrmp_channel_existence(2000, 1000, 102_400, 102_400);
		let state = MessagingStateSnapshot::decode(&mut &value[..]).unwrap();
		assert_eq!(state.ingress_channels, state.egress_channels);
		assert_eq!(state.ingress_channels.len(), 1);
		let (para, channel) = &state.ingress_channels[0];
		assert_eq!(*para, 2000);
		assert_eq!(channel.max_capacity, 1000);
		assert_eq!(channel.mqc_head, None);
		// head, capacity, one ingress entry of 4 + 5 * 4 + 1 bytes, same for egress
		assert_eq!(value.len(), 32 + 8 + 2 * (1 + 25));
	}
}
