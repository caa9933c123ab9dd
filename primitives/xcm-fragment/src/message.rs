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

//! XCMP wire envelope wrapping a rendered program as an inbound HRMP message.

use codec::{Decode, Encode};

use crate::VersionedXcm;

/// Type name the node's type registry uses for the payload.
pub const VERSIONED_XCM_TYPE_NAME: &str = "XcmVersionedXcm";

/// The format of an XCMP message blob, as prefixed to the channel payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub enum XcmpMessageFormat {
	/// Encoded `VersionedXcm` messages, all concatenated.
	#[default]
	ConcatenatedVersionedXcm,
	/// Encoded `Vec<u8>` messages, all concatenated.
	ConcatenatedEncodedBlob,
	/// One or more channel control signals.
	Signals,
}

/// A rendered program ready to be handed to the injection harness.
#[derive(Clone, Debug, PartialEq)]
pub struct RawXcmMessage {
	pub type_name: &'static str,
	pub payload: VersionedXcm,
	pub format: XcmpMessageFormat,
}

impl RawXcmMessage {
	/// A `ConcatenatedVersionedXcm` message carrying `payload`.
	pub fn new(payload: VersionedXcm) -> Self {
		RawXcmMessage {
			type_name: VERSIONED_XCM_TYPE_NAME,
			payload,
			format: XcmpMessageFormat::default(),
		}
	}

	pub fn with_format(mut self, format: XcmpMessageFormat) -> Self {
		self.format = format;
		self
	}
}

impl From<VersionedXcm> for RawXcmMessage {
	fn from(payload: VersionedXcm) -> Self {
		RawXcmMessage::new(payload)
	}
}

/// Bytes of an inbound XCMP message: the format byte followed by the payload encoding.
pub fn build_xcmp_message(message: &RawXcmMessage) -> Vec<u8> {
	let mut bytes = message.format.encode();
	message.payload.encode_to(&mut bytes);
	bytes
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Instruction, XcmVersion};

	#[test]
	fn format_byte_prefixes_payload() {
		let payload = VersionedXcm::render(XcmVersion::V3, &[Instruction::ClearOrigin]).unwrap();
		let message = RawXcmMessage::new(payload.clone());
		assert_eq!(message.type_name, "XcmVersionedXcm");
		assert_eq!(build_xcmp_message(&message), vec![0, 3, 4, 10]);

		let blob = message.with_format(XcmpMessageFormat::ConcatenatedEncodedBlob);
		assert_eq!(build_xcmp_message(&blob)[0], 1);
		assert_eq!(XcmpMessageFormat::Signals.encode(), vec![2]);
		assert_eq!(&build_xcmp_message(&blob)[1..], payload.as_bytes());
	}
}
