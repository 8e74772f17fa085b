//! Decoder hardening limits.

/// Limits applied while decoding untrusted input.
///
/// Values over a limit are reported as [`DecodeError::LimitExceeded`], which
/// is treated as malformed data.
///
/// [`DecodeError::LimitExceeded`]: crate::DecodeError::LimitExceeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
	/// Largest accepted bulk string length in bytes
	pub max_bulk_len: usize,
	/// Largest accepted array element count
	pub max_array_len: usize,
	/// Deepest accepted array nesting; a top-level array is depth 1
	pub max_depth: usize,
}

impl DecodeOptions {
	pub fn with_max_bulk_len(mut self, max_bulk_len: usize) -> Self {
		self.max_bulk_len = max_bulk_len;
		self
	}

	pub fn with_max_array_len(mut self, max_array_len: usize) -> Self {
		self.max_array_len = max_array_len;
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			// Same ceiling as Redis' proto-max-bulk-len
			max_bulk_len: 512 * 1024 * 1024,
			max_array_len: i32::MAX as usize,
			max_depth: 1024,
		}
	}
}
