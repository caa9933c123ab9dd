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

//! XCM protocol versions a fragment can be rendered to.

use core::{fmt, str::FromStr};

use crate::Error;

/// A wire version of the XCM format.
///
/// Only the versions the dev node still accepts on its inbound queues are modelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XcmVersion {
	V2,
	V3,
	V4,
}

impl XcmVersion {
	/// All supported versions, oldest first.
	pub const ALL: [XcmVersion; 3] = [XcmVersion::V2, XcmVersion::V3, XcmVersion::V4];

	/// The variant index of this version inside `VersionedXcm`.
	pub fn index(self) -> u8 {
		match self {
			XcmVersion::V2 => 2,
			XcmVersion::V3 => 3,
			XcmVersion::V4 => 4,
		}
	}

	/// The name used as the outer key of the JSON view, e.g. `V3`.
	pub fn tag(self) -> &'static str {
		match self {
			XcmVersion::V2 => "V2",
			XcmVersion::V3 => "V3",
			XcmVersion::V4 => "V4",
		}
	}
}

impl fmt::Display for XcmVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.tag())
	}
}

impl TryFrom<u32> for XcmVersion {
	type Error = Error;

	fn try_from(value: u32) -> Result<Self, Error> {
		match value {
			2 => Ok(XcmVersion::V2),
			3 => Ok(XcmVersion::V3),
			4 => Ok(XcmVersion::V4),
			other => Err(Error::UnknownVersion(other.to_string())),
		}
	}
}

impl FromStr for XcmVersion {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Error> {
		let digits = s.trim_start_matches(['v', 'V']);
		digits
			.parse::<u32>()
			.map_err(|_| Error::UnknownVersion(s.to_string()))
			.and_then(XcmVersion::try_from)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_prefixed_and_bare_versions() {
		assert_eq!("v3".parse::<XcmVersion>().unwrap(), XcmVersion::V3);
		assert_eq!("V4".parse::<XcmVersion>().unwrap(), XcmVersion::V4);
		assert_eq!("2".parse::<XcmVersion>().unwrap(), XcmVersion::V2);
		assert!("v5".parse::<XcmVersion>().is_err());
		assert!("latest".parse::<XcmVersion>().is_err());
	}

	#[test]
	fn versions_are_ordered() {
		assert!(XcmVersion::V2 < XcmVersion::V3);
		assert_eq!(XcmVersion::ALL.iter().map(|v| v.index()).collect::<Vec<_>>(), vec![2, 3, 4]);
	}
}
