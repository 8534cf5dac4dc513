/*!
SFP header implementation.
*/

use crate::{
    constants::HEADER_SIZE,
    error::{Result, protocol_err},
};
use byteorder::{BigEndian, ByteOrder};

/// SFP chunk header (8 bytes)
///
/// The header is the trailing 8 bytes of every chunk:
/// - Offset (4 bytes, big-endian): Byte position of the chunk's payload
///   within the transfer
/// - Total Size (4 bytes, big-endian): Total size of the transfer,
///   repeated on every chunk
///
/// There is no version field; the format is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SfpHeader {
    /// Byte offset of the payload within the transfer
    pub offset: u32,
    /// Total size of the transfer in bytes
    pub total_size: u32,
}

impl SfpHeader {
    /// Create a new SFP header
    pub fn new(offset: u32, total_size: u32) -> Self {
        Self { offset, total_size }
    }

    /// Convert the header to bytes (8 bytes)
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        BigEndian::write_u32(&mut bytes[0..4], self.offset);
        BigEndian::write_u32(&mut bytes[4..8], self.total_size);
        bytes
    }

    /// Parse a header from bytes
    ///
    /// Fails only if the input is shorter than 8 bytes; range checks on
    /// the decoded fields are the receiver's responsibility.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return protocol_err("Header too short");
        }

        let offset = BigEndian::read_u32(&bytes[0..4]);
        let total_size = BigEndian::read_u32(&bytes[4..8]);

        Ok(Self { offset, total_size })
    }
}
