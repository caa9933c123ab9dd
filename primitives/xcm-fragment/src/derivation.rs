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

//! Accounts the node assigns to cross-chain origins.
//!
//! The node converts an XCM origin location into a 20-byte account by trying, in order: the
//! parent preset, sibling sovereign accounts, local `AccountKey20` aliases and finally a
//! blake2-256 hash of the location description. The description is built by composable
//! [`DescribeLocation`] implementations, so tests predict exactly the account the node will
//! credit or debit.

use core::marker::PhantomData;

use codec::{Compact, Encode};
use sp_crypto_hashing::blake2_256;

use crate::{Junction, Location};

/// Address used by the test suites when no explicit sender is given.
pub const DEFAULT_TEST_ADDRESS: [u8; 20] = [1u8; 20];

/// Para id of the sibling the test suites inject from by default.
pub const DEFAULT_SOURCE_PARA_ID: u32 = 1;

/// Means of describing a location as a byte string, `None` if it is not understood.
pub trait DescribeLocation {
	fn describe_location(location: &Location) -> Option<Vec<u8>>;
}

macro_rules! impl_describe_for_tuples {
	($($describer:ident),+) => {
		impl<$($describer: DescribeLocation),+> DescribeLocation for ($($describer,)+) {
			fn describe_location(location: &Location) -> Option<Vec<u8>> {
				$(
					if let Some(description) = $describer::describe_location(location) {
						return Some(description)
					}
				)+
				None
			}
		}
	};
}

impl_describe_for_tuples!(A, B);
impl_describe_for_tuples!(A, B, C);
impl_describe_for_tuples!(A, B, C, D);

/// The location itself: an empty description.
pub struct DescribeTerminus;
impl DescribeLocation for DescribeTerminus {
	fn describe_location(location: &Location) -> Option<Vec<u8>> {
		location.is_here().then(Vec::new)
	}
}

pub struct DescribePalletTerminal;
impl DescribeLocation for DescribePalletTerminal {
	fn describe_location(location: &Location) -> Option<Vec<u8>> {
		match (location.parents, location.interior.as_slice()) {
			(0, [Junction::PalletInstance(index)]) =>
				Some((b"Pallet", Compact::<u32>::from(*index as u32)).encode()),
			_ => None,
		}
	}
}

pub struct DescribeAccountId32Terminal;
impl DescribeLocation for DescribeAccountId32Terminal {
	fn describe_location(location: &Location) -> Option<Vec<u8>> {
		match (location.parents, location.interior.as_slice()) {
			(0, [Junction::AccountId32 { id, .. }]) => Some((b"AccountId32", id).encode()),
			_ => None,
		}
	}
}

pub struct DescribeAccountKey20Terminal;
impl DescribeLocation for DescribeAccountKey20Terminal {
	fn describe_location(location: &Location) -> Option<Vec<u8>> {
		match (location.parents, location.interior.as_slice()) {
			(0, [Junction::AccountKey20 { key, .. }]) => Some((b"AccountKey20", key).encode()),
			_ => None,
		}
	}
}

pub type DescribeAllTerminal = (
	DescribeTerminus,
	DescribePalletTerminal,
	DescribeAccountId32Terminal,
	DescribeAccountKey20Terminal,
);

/// Prefixes the description of the remaining interior with the chain it lives on: a child
/// parachain, a sibling parachain or the parent.
pub struct DescribeFamily<DescribeInterior>(PhantomData<DescribeInterior>);
impl<Suffix: DescribeLocation> DescribeLocation for DescribeFamily<Suffix> {
	fn describe_location(location: &Location) -> Option<Vec<u8>> {
		match (location.parents, location.first_interior()) {
			(0, Some(Junction::Parachain(index))) => {
				let index = *index;
				let tail = location.clone().split_first_interior().0;
				let interior = Suffix::describe_location(&tail)?;
				Some((b"ChildChain", Compact::<u32>::from(index), interior).encode())
			},
			(1, Some(Junction::Parachain(index))) => {
				let index = *index;
				let tail = Location::new(0, location.clone().split_first_interior().0.interior);
				let interior = Suffix::describe_location(&tail)?;
				Some((b"SiblingChain", Compact::<u32>::from(index), interior).encode())
			},
			(1, _) => {
				let tail = Location::new(0, location.interior.clone());
				let interior = Suffix::describe_location(&tail)?;
				Some((b"ParentChain", interior).encode())
			},
			_ => None,
		}
	}
}

/// Hashes a location description into an account; 20-byte accounts keep the first 20 bytes.
pub struct HashedDescription<Describe>(PhantomData<Describe>);
impl<Describe: DescribeLocation> HashedDescription<Describe> {
	pub fn convert(location: &Location) -> Option<[u8; 20]> {
		let description = Describe::describe_location(location)?;
		let hash = blake2_256(&description);
		let mut account = [0u8; 20];
		account.copy_from_slice(&hash[..20]);
		Some(account)
	}
}

/// The accounts involved when a sibling descends into one of its 20-byte accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DescendedOrigin {
	/// The account on the sibling chain.
	pub origin_address: [u8; 20],
	/// The account the origin resolves to locally.
	pub descend_origin_address: [u8; 20],
}

/// The local account of `address` on sibling `para_id`, as reached through `DescendOrigin`.
///
/// `address` defaults to [`DEFAULT_TEST_ADDRESS`].
pub fn descend_origin_from_address20(address: Option<[u8; 20]>, para_id: u32) -> DescendedOrigin {
	let origin_address = address.unwrap_or(DEFAULT_TEST_ADDRESS);
	let location = Location::sibling(para_id).pushed_with(Junction::account_key20(origin_address));
	DescendedOrigin {
		origin_address,
		descend_origin_address: hashed_family_account(&location),
	}
}

/// The local account of `address` descended from the relay chain.
pub fn descend_origin_from_relay(address: Option<[u8; 20]>) -> DescendedOrigin {
	let origin_address = address.unwrap_or(DEFAULT_TEST_ADDRESS);
	let location = Location::parent().pushed_with(Junction::account_key20(origin_address));
	DescendedOrigin {
		origin_address,
		descend_origin_address: hashed_family_account(&location),
	}
}

fn hashed_family_account(location: &Location) -> [u8; 20] {
	// Family locations ending in an account key always have a description.
	HashedDescription::<DescribeFamily<DescribeAllTerminal>>::convert(location).unwrap_or_default()
}

/// Sovereign account of sibling parachain `para_id`.
pub fn sovereign_account_of_sibling(para_id: u32) -> [u8; 20] {
	let mut account = [0u8; 20];
	account[..4].copy_from_slice(b"sibl");
	account[4..8].copy_from_slice(&para_id.to_le_bytes());
	account
}

/// Sovereign account of the relay chain.
pub fn sovereign_account_of_parent() -> [u8; 20] {
	let mut account = [0u8; 20];
	account[..6].copy_from_slice(b"Parent");
	account
}

/// The account the node's origin converter resolves `location` to, if any.
pub fn location_to_account_key20(location: &Location) -> Option<[u8; 20]> {
	match (location.parents, location.interior.as_slice()) {
		(1, []) => Some(sovereign_account_of_parent()),
		(1, [Junction::Parachain(para_id)]) => Some(sovereign_account_of_sibling(*para_id)),
		(0, [Junction::AccountKey20 { network: None, key }]) => Some(*key),
		_ => HashedDescription::<DescribeFamily<DescribeAllTerminal>>::convert(location),
	}
}
