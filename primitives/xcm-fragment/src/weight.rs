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

//! Two dimensional weights as budgeted by `BuyExecution`, `Transact` and `UnpaidExecution`.

/// Computational time and proof size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Weight {
	pub ref_time: u64,
	pub proof_size: u64,
}

impl Weight {
	pub const fn from_parts(ref_time: u64, proof_size: u64) -> Self {
		Weight { ref_time, proof_size }
	}
}

/// An optional weight limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightLimit {
	/// No weight limit imposed.
	Unlimited,
	/// Weight limit imposed of the inner value.
	Limited(Weight),
}

impl From<Weight> for WeightLimit {
	fn from(weight: Weight) -> Self {
		WeightLimit::Limited(weight)
	}
}

impl From<Option<Weight>> for WeightLimit {
	fn from(weight: Option<Weight>) -> Self {
		weight.map_or(WeightLimit::Unlimited, WeightLimit::Limited)
	}
}
