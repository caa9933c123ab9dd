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

//! Relative locations in the consensus topology.
//!
//! A [`Location`] is a number of hops up toward a common ancestor (`parents`) followed by the
//! junctions leading down from it (`interior`). An empty interior means "Here". The model is
//! version agnostic; the differences between XCM v2, v3 and v4 are handled by the renderer.

/// Maximum number of junctions any XCM version can carry in one location.
pub const MAX_JUNCTIONS: usize = 8;

/// A global identifier of a consensus system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkId {
	/// Network specified by the first 32 bytes of its genesis block.
	ByGenesis([u8; 32]),
	/// Network defined by the first 32 bytes of the hash and number of some block it contains.
	ByFork { block_number: u64, block_hash: [u8; 32] },
	Polkadot,
	Kusama,
	Westend,
	Rococo,
	Wococo,
	/// An Ethereum network specified by its chain id.
	Ethereum { chain_id: u64 },
	BitcoinCore,
	BitcoinCash,
	PolkadotBulletin,
	/// A named network. Only XCM v2 knows about it.
	Named(Vec<u8>),
}

impl NetworkId {
	/// Variant name, used in JSON views and error messages.
	pub fn name(&self) -> &'static str {
		match self {
			NetworkId::ByGenesis(_) => "ByGenesis",
			NetworkId::ByFork { .. } => "ByFork",
			NetworkId::Polkadot => "Polkadot",
			NetworkId::Kusama => "Kusama",
			NetworkId::Westend => "Westend",
			NetworkId::Rococo => "Rococo",
			NetworkId::Wococo => "Wococo",
			NetworkId::Ethereum { .. } => "Ethereum",
			NetworkId::BitcoinCore => "BitcoinCore",
			NetworkId::BitcoinCash => "BitcoinCash",
			NetworkId::PolkadotBulletin => "PolkadotBulletin",
			NetworkId::Named(_) => "Named",
		}
	}
}

/// A single item in a path to describe the relative location of a consensus system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Junction {
	/// An indexed parachain belonging to and operated by the context.
	Parachain(u32),
	/// A 32-byte identifier for an account of a specific network.
	AccountId32 { network: Option<NetworkId>, id: [u8; 32] },
	/// An 8-byte index for an account of a specific network.
	AccountIndex64 { network: Option<NetworkId>, index: u64 },
	/// A 20-byte identifier for an account of a specific network, the native form on Moonbeam.
	AccountKey20 { network: Option<NetworkId>, key: [u8; 20] },
	/// An instanced, indexed pallet that forms a constituent part of the context.
	PalletInstance(u8),
	/// A non-descript index within the context location.
	GeneralIndex(u128),
	/// A nondescript datum acting as a key within the context location.
	///
	/// Only the first `length` bytes of `data` are meaningful.
	GeneralKey { length: u8, data: [u8; 32] },
	/// The unambiguous child.
	OnlyChild,
	/// A global network capable of externalizing its own consensus.
	GlobalConsensus(NetworkId),
}

impl Junction {
	/// Variant name, used in JSON views and error messages.
	pub fn name(&self) -> &'static str {
		match self {
			Junction::Parachain(_) => "Parachain",
			Junction::AccountId32 { .. } => "AccountId32",
			Junction::AccountIndex64 { .. } => "AccountIndex64",
			Junction::AccountKey20 { .. } => "AccountKey20",
			Junction::PalletInstance(_) => "PalletInstance",
			Junction::GeneralIndex(_) => "GeneralIndex",
			Junction::GeneralKey { .. } => "GeneralKey",
			Junction::OnlyChild => "OnlyChild",
			Junction::GlobalConsensus(_) => "GlobalConsensus",
		}
	}

	/// An `AccountKey20` junction without network.
	pub fn account_key20(key: [u8; 20]) -> Self {
		Junction::AccountKey20 { network: None, key }
	}

	/// A `GeneralKey` junction from a slice of at most 32 bytes, zero-padded.
	pub fn general_key(bytes: &[u8]) -> Option<Self> {
		if bytes.len() > 32 {
			return None
		}
		let mut data = [0u8; 32];
		data[..bytes.len()].copy_from_slice(bytes);
		Some(Junction::GeneralKey { length: bytes.len() as u8, data })
	}
}

/// A relative path between state-bearing consensus systems.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Location {
	pub parents: u8,
	pub interior: Vec<Junction>,
}

impl Location {
	pub fn new(parents: u8, interior: impl Into<Vec<Junction>>) -> Self {
		Location { parents, interior: interior.into() }
	}

	/// The location of the local consensus system.
	pub fn here() -> Self {
		Location::default()
	}

	/// The relay chain, seen from a parachain.
	pub fn parent() -> Self {
		Location::new(1, vec![])
	}

	/// A sibling parachain, seen from a parachain.
	pub fn sibling(para_id: u32) -> Self {
		Location::new(1, vec![Junction::Parachain(para_id)])
	}

	/// A local 20-byte account.
	pub fn account_key20(key: [u8; 20]) -> Self {
		Location::new(0, vec![Junction::account_key20(key)])
	}

	/// A local pallet, typically the balances pallet used as the native asset id.
	pub fn pallet_instance(index: u8) -> Self {
		Location::new(0, vec![Junction::PalletInstance(index)])
	}

	/// Whether this is the `Here` location.
	pub fn is_here(&self) -> bool {
		self.parents == 0 && self.interior.is_empty()
	}

	/// Returns a copy with `junction` appended to the interior.
	pub fn pushed_with(mut self, junction: Junction) -> Self {
		self.interior.push(junction);
		self
	}

	pub fn first_interior(&self) -> Option<&Junction> {
		self.interior.first()
	}

	/// Splits off the first interior junction, returning the remaining location and the
	/// junction (if any).
	pub fn split_first_interior(mut self) -> (Location, Option<Junction>) {
		if self.interior.is_empty() {
			return (self, None)
		}
		let first = self.interior.remove(0);
		(self, Some(first))
	}

	/// Returns a copy whose account junctions are qualified by `network`.
	pub fn with_account_network(mut self, network: Option<NetworkId>) -> Self {
		for junction in &mut self.interior {
			match junction {
				Junction::AccountId32 { network: slot, .. } |
				Junction::AccountIndex64 { network: slot, .. } |
				Junction::AccountKey20 { network: slot, .. } => *slot = network.clone(),
				_ => {},
			}
		}
		self
	}

	/// Number of junctions in the interior.
	pub fn len(&self) -> usize {
		self.interior.len()
	}
}

impl From<[u8; 20]> for Location {
	fn from(key: [u8; 20]) -> Self {
		Location::account_key20(key)
	}
}

impl From<Junction> for Location {
	fn from(junction: Junction) -> Self {
		Location::new(0, vec![junction])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn split_first_interior_keeps_parents() {
		let location =
			Location::new(1, vec![Junction::Parachain(1000), Junction::PalletInstance(3)]);
		let (rest, first) = location.split_first_interior();
		assert_eq!(first, Some(Junction::Parachain(1000)));
		assert_eq!(rest, Location::new(1, vec![Junction::PalletInstance(3)]));

		let (rest, first) = Location::parent().split_first_interior();
		assert_eq!(first, None);
		assert_eq!(rest, Location::parent());
	}

	#[test]
	fn general_key_pads_and_bounds() {
		let key = Junction::general_key(b"xcDOT").unwrap();
		match key {
			Junction::GeneralKey { length, data } => {
				assert_eq!(length, 5);
				assert_eq!(&data[..5], b"xcDOT");
				assert!(data[5..].iter().all(|b| *b == 0));
			},
			_ => unreachable!(),
		}
		assert!(Junction::general_key(&[1u8; 33]).is_none());
	}

	#[test]
	fn account_network_only_touches_account_junctions() {
		let account = Junction::account_key20([7u8; 20]);
		let location = Location::new(1, vec![Junction::Parachain(1000), account.clone()])
			.with_account_network(Some(NetworkId::Kusama));
		assert_eq!(location.interior[0], Junction::Parachain(1000));
		assert_eq!(
			location.interior[1],
			Junction::AccountKey20 { network: Some(NetworkId::Kusama), key: [7u8; 20] },
		);
		assert_eq!(
			location.with_account_network(None),
			Location::new(1, vec![Junction::Parachain(1000), account]),
		);
	}

	#[test]
	fn address_shorthand_is_a_local_account_key() {
		let location: Location = [7u8; 20].into();
		assert_eq!(location.parents, 0);
		assert_eq!(
			location.interior,
			vec![Junction::AccountKey20 { network: None, key: [7u8; 20] }],
		);
	}
}
