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

//! Asset descriptions carried by XCM instructions.
//!
//! - [`Asset`]: a single asset, some amount of a fungible or an instance of a non-fungible.
//! - [`WildAsset`]: a wildcard matching assets in the holding register.
//! - [`AssetFilter`]: either an explicit list of assets or a wildcard.
//!
//! Lists of assets are kept in the order they were given; the renderer never sorts or merges
//! them.

use crate::Location;

/// A general identifier for an instance of a non-fungible asset class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetInstance {
	/// Used if the non-fungible asset class has only one instance.
	Undefined,
	Index(u128),
	Array4([u8; 4]),
	Array8([u8; 8]),
	Array16([u8; 16]),
	Array32([u8; 32]),
	/// An arbitrary piece of data. Only XCM v2 knows about it.
	Blob(Vec<u8>),
}

impl AssetInstance {
	pub fn name(&self) -> &'static str {
		match self {
			AssetInstance::Undefined => "Undefined",
			AssetInstance::Index(_) => "Index",
			AssetInstance::Array4(_) => "Array4",
			AssetInstance::Array8(_) => "Array8",
			AssetInstance::Array16(_) => "Array16",
			AssetInstance::Array32(_) => "Array32",
			AssetInstance::Blob(_) => "Blob",
		}
	}
}

/// Classification of an asset as being fungible or non-fungible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fungibility {
	Fungible(u128),
	NonFungible(AssetInstance),
}

/// Classification of a wildcard asset selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WildFungibility {
	Fungible,
	NonFungible,
}

/// An asset identified by its location together with an amount or instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
	pub id: Location,
	pub fun: Fungibility,
}

impl Asset {
	pub fn fungible(id: Location, amount: u128) -> Self {
		Asset { id, fun: Fungibility::Fungible(amount) }
	}

	/// The fungible amount, if this is a fungible asset.
	pub fn amount(&self) -> Option<u128> {
		match self.fun {
			Fungibility::Fungible(amount) => Some(amount),
			Fungibility::NonFungible(_) => None,
		}
	}
}

/// A wildcard representing a set of assets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WildAsset {
	/// All assets in the holding register.
	All,
	/// All assets in holding of a given class.
	AllOf { id: Location, fun: WildFungibility },
	/// All assets in holding, up to `u32` individual assets. Introduced in v3.
	AllCounted(u32),
	/// All assets of a given class, up to `count` individual assets. Introduced in v3.
	AllOfCounted { id: Location, fun: WildFungibility, count: u32 },
}

impl WildAsset {
	pub fn name(&self) -> &'static str {
		match self {
			WildAsset::All => "All",
			WildAsset::AllOf { .. } => "AllOf",
			WildAsset::AllCounted(_) => "AllCounted",
			WildAsset::AllOfCounted { .. } => "AllOfCounted",
		}
	}
}

/// Either a definite list of assets or a wildcard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetFilter {
	Definite(Vec<Asset>),
	Wild(WildAsset),
}

impl From<WildAsset> for AssetFilter {
	fn from(wild: WildAsset) -> Self {
		AssetFilter::Wild(wild)
	}
}

impl From<Vec<Asset>> for AssetFilter {
	fn from(assets: Vec<Asset>) -> Self {
		AssetFilter::Definite(assets)
	}
}
