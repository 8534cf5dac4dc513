/*!
Chunk buffers for the SFP protocol.

A chunk is one transport-level message: a fixed-capacity byte buffer
holding `[payload][header]`, a length field covering the bytes in use,
and a fragment flag marking it as SFP traffic.
*/

use crate::{
    constants::HEADER_SIZE,
    error::{Result, invalid_argument_err, protocol_err},
    header::SfpHeader,
};

/// A fixed-capacity chunk buffer
#[derive(Debug)]
pub struct Chunk {
    /// Backing storage, allocated once at the buffer's capacity
    data: Box<[u8]>,
    /// Number of bytes currently in use
    length: u16,
    /// Whether this chunk carries SFP fragment traffic
    fragment: bool,
}

impl Chunk {
    /// Allocate a chunk buffer with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            length: 0,
            fragment: false,
        }
    }

    /// Total capacity of the backing buffer
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of bytes currently in use
    pub fn len(&self) -> usize {
        self.length as usize
    }

    /// Whether the chunk holds no bytes
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The bytes currently in use
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.length as usize]
    }

    /// The full writable buffer region, independent of the length field
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Set the number of bytes in use
    pub fn set_len(&mut self, len: u16) -> Result<()> {
        if len as usize > self.capacity() {
            return invalid_argument_err(format!(
                "Length {} exceeds chunk capacity {}",
                len,
                self.capacity()
            ));
        }
        self.length = len;
        Ok(())
    }

    /// Whether this chunk is marked as an SFP fragment
    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    /// Mark or unmark this chunk as an SFP fragment
    pub fn set_fragment(&mut self, fragment: bool) {
        self.fragment = fragment;
    }

    /// Append the SFP header after the payload bytes
    pub fn push_header(&mut self, header: &SfpHeader) -> Result<()> {
        let start = self.length as usize;
        if start + HEADER_SIZE > self.capacity() {
            return protocol_err(format!(
                "No room for header: {} bytes used of {}",
                start,
                self.capacity()
            ));
        }
        self.data[start..start + HEADER_SIZE].copy_from_slice(&header.to_bytes());
        self.length += HEADER_SIZE as u16;
        Ok(())
    }

    /// Strip and decode the trailing SFP header
    ///
    /// After a successful call the chunk's length covers the payload only.
    /// Fails if the chunk is not marked as a fragment, is too short to hold
    /// a header, or declares an offset past its total size.
    pub fn take_header(&mut self) -> Result<SfpHeader> {
        if !self.fragment {
            return protocol_err("Chunk is not marked as a fragment");
        }
        if (self.length as usize) < HEADER_SIZE {
            return protocol_err(format!("Chunk too short for header: {} bytes", self.length));
        }

        let start = self.length as usize - HEADER_SIZE;
        let header = SfpHeader::from_bytes(&self.data[start..self.length as usize])?;
        self.length -= HEADER_SIZE as u16;

        if header.offset > header.total_size {
            return protocol_err(format!(
                "Header offset {} exceeds total size {}",
                header.offset, header.total_size
            ));
        }

        Ok(header)
    }

    /// Clear the chunk for reuse
    pub fn reset(&mut self) {
        self.length = 0;
        self.fragment = false;
    }
}
