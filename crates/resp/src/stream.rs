//! Buffered decoding for byte streams that arrive in pieces.

use bytes::Buf;
use bytes::BytesMut;

use crate::decoder::Decoded;
use crate::decoder::decode_with;
use crate::options::DecodeOptions;

/// Owns the unconsumed tail of a stream and applies the resume contract of
/// [`decode`](crate::decode): after each call the bytes before the resume
/// offset are dropped and everything after it is kept for the next call.
#[derive(Debug, Default)]
pub struct StreamDecoder {
	buf: BytesMut,
	options: DecodeOptions,
}

impl StreamDecoder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_options(options: DecodeOptions) -> Self {
		Self {
			buf: BytesMut::new(),
			options,
		}
	}

	/// Append bytes received from the transport.
	pub fn extend_from_slice(&mut self, data: &[u8]) {
		self.buf.extend_from_slice(data);
	}

	/// Direct access to the buffer, e.g. for `read_buf` on a socket.
	pub fn buffer_mut(&mut self) -> &mut BytesMut {
		&mut self.buf
	}

	/// Number of bytes waiting to be decoded.
	pub fn buffered(&self) -> usize {
		self.buf.len()
	}

	/// Decode every complete message buffered so far.
	///
	/// `resume_offset` of the result is the number of bytes dropped from the
	/// front of the buffer. After a retryable error the incomplete message
	/// stays buffered; after malformed data the buffer is emptied.
	pub fn decode(&mut self) -> Decoded {
		let decoded = decode_with(&self.buf, &self.options);
		self.buf.advance(decoded.resume_offset);
		decoded
	}
}
