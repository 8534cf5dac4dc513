/*!
Data source and sink interfaces for the SFP protocol.

The sender pulls transfer bytes from a [`DataSource`] and the receiver
pushes them into a [`DataSink`]. The core never touches the underlying
storage itself; callers supply whatever backs the transfer (a memory
buffer, a file, a flash region) behind these traits.

Both traits report the byte count actually moved. Returning fewer bytes
than requested aborts the transfer; there is no retry.
*/

use std::io::{Read, Write};

/// Pull-style byte source for an outgoing transfer
pub trait DataSource {
    /// Fill `dest` with transfer bytes starting at `offset`
    ///
    /// Returns the number of bytes actually read. Anything short of
    /// `dest.len()` terminates the send.
    fn read(&mut self, dest: &mut [u8], offset: u32) -> usize;
}

/// Push-style byte sink for an incoming transfer
pub trait DataSink {
    /// Accept `src`, positioned at `offset` within a transfer of
    /// `total_size` bytes
    ///
    /// Returns the number of bytes actually written. Anything short of
    /// `src.len()` terminates the receive.
    fn write(&mut self, src: &[u8], offset: u32, total_size: u32) -> usize;
}

/// Memory-backed source reading from a byte slice
pub struct SliceSource<'a> {
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Create a source over the given bytes
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl DataSource for SliceSource<'_> {
    fn read(&mut self, dest: &mut [u8], offset: u32) -> usize {
        let Some(remaining) = self.data.len().checked_sub(offset as usize) else {
            return 0;
        };
        let n = dest.len().min(remaining);
        dest[..n].copy_from_slice(&self.data[offset as usize..offset as usize + n]);
        n
    }
}

/// Memory-backed sink collecting into a `Vec<u8>`
#[derive(Default)]
pub struct VecSink {
    buf: Vec<u8>,
}

impl VecSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes received so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the sink, returning the received bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl DataSink for VecSink {
    fn write(&mut self, src: &[u8], offset: u32, total_size: u32) -> usize {
        // Chunks arrive in order, so anything but an append is refused.
        if offset as usize != self.buf.len() {
            return 0;
        }
        if self.buf.is_empty() {
            self.buf.reserve(total_size as usize);
        }
        self.buf.extend_from_slice(src);
        src.len()
    }
}

/// Stream-backed source pulling sequentially from a reader
pub struct ReaderSource<R: Read> {
    reader: R,
    position: u32,
}

impl<R: Read> ReaderSource<R> {
    /// Create a source over the given reader
    pub fn new(reader: R) -> Self {
        Self { reader, position: 0 }
    }
}

impl<R: Read> DataSource for ReaderSource<R> {
    fn read(&mut self, dest: &mut [u8], offset: u32) -> usize {
        // A plain reader cannot seek; only the sender's sequential access
        // pattern is supported.
        if offset != self.position {
            return 0;
        }
        let mut filled = 0;
        while filled < dest.len() {
            match self.reader.read(&mut dest[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(_) => break,
            }
        }
        self.position += filled as u32;
        filled
    }
}

/// Stream-backed sink pushing sequentially into a writer
pub struct WriterSink<W: Write> {
    writer: W,
    position: u32,
}

impl<W: Write> WriterSink<W> {
    /// Create a sink over the given writer
    pub fn new(writer: W) -> Self {
        Self { writer, position: 0 }
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DataSink for WriterSink<W> {
    fn write(&mut self, src: &[u8], offset: u32, _total_size: u32) -> usize {
        if offset != self.position {
            return 0;
        }
        if self.writer.write_all(src).is_err() {
            return 0;
        }
        self.position += src.len() as u32;
        src.len()
    }
}
