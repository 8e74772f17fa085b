//! Error types for RESP decoding and encoding.

use thiserror::Error;

/// How a decode failure affects the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
	/// The input stops part-way through a message. Append more bytes at the
	/// resume offset and decode again.
	IncompleteInput,
	/// The input breaks the protocol. Nothing after the last completed
	/// message in this buffer can be trusted.
	MalformedData,
}

/// Errors that can occur during RESP decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
	/// No CRLF terminator in the remaining input
	#[error("CRLF not found")]
	NotTerminated,

	/// A bulk payload has been announced but not fully received
	#[error("Insufficient data: need {needed} bytes, have {available}")]
	InsufficientData { needed: usize, available: usize },

	/// A header line carries nothing after its type marker
	#[error("Empty token after type marker")]
	EmptyToken,

	/// The two bytes after a bulk payload are not CRLF
	#[error("Missing CRLF after bulk payload")]
	MalformedTerminator,

	/// Invalid integer value
	#[error("Invalid integer: {0}")]
	InvalidInteger(String),

	/// Invalid bulk length or array count
	#[error("Invalid length: {0}")]
	InvalidLength(String),

	/// Invalid type marker encountered
	#[error("Invalid type marker: {0:?}")]
	InvalidTypeMarker(char),

	/// A declared size or the nesting depth is over the configured limit
	#[error("{what} {value} exceeds limit {limit}")]
	LimitExceeded {
		what: &'static str,
		value: u64,
		limit: u64,
	},
}

impl DecodeError {
	pub fn class(&self) -> ErrorClass {
		match self {
			DecodeError::NotTerminated | DecodeError::InsufficientData { .. } => {
				ErrorClass::IncompleteInput
			}
			_ => ErrorClass::MalformedData,
		}
	}

	/// Whether appending more input can make this error go away.
	pub fn is_retryable(&self) -> bool {
		self.class() == ErrorClass::IncompleteInput
	}
}

/// Errors that can occur during RESP encoding.
///
/// Bytes flushed to a sink before the error are not retracted: when encoding
/// a composite value the array header may already be on the sink with some or
/// none of its children following it.
#[derive(Error, Debug)]
pub enum EncodeError {
	/// The value has no RESP representation
	#[error("Unsupported type: {0}")]
	UnsupportedType(String),

	/// The value cannot be written without breaking the framing
	#[error("Invalid value: {0}")]
	InvalidValue(String),

	/// Writing to the sink failed
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// Another writer panicked while holding the sink lock
	#[error("Sink lock poisoned")]
	SinkPoisoned,
}
