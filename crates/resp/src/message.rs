//! Decoded RESP message tree.

use bytes::Bytes;

/// Wire kind of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	Simple,
	Error,
	Integer,
	Bulk,
	Array,
}

impl Kind {
	/// Type marker byte that starts a message of this kind on the wire.
	pub fn marker(self) -> u8 {
		match self {
			Kind::Simple => crate::utils::SIMPLE_STRING,
			Kind::Error => crate::utils::ERROR,
			Kind::Integer => crate::utils::INTEGER,
			Kind::Bulk => crate::utils::BULK_STRING,
			Kind::Array => crate::utils::ARRAY,
		}
	}
}

/// A single RESP message.
///
/// `Bulk(None)` and `Array(None)` are the null bulk string and the null
/// array, which are distinct from an empty payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
	/// Simple string: `+OK\r\n`
	Simple(Bytes),

	/// Error: `-ERR message\r\n`
	Error(Bytes),

	/// Integer: `:1000\r\n`
	Integer(i64),

	/// Bulk string: `$6\r\nfoobar\r\n`, or `$-1\r\n` for null
	Bulk(Option<Bytes>),

	/// Array: `*2\r\n:1\r\n:2\r\n`, or `*-1\r\n` for null
	Array(Option<Vec<Message>>),
}

impl Message {
	pub fn kind(&self) -> Kind {
		match self {
			Message::Simple(_) => Kind::Simple,
			Message::Error(_) => Kind::Error,
			Message::Integer(_) => Kind::Integer,
			Message::Bulk(_) => Kind::Bulk,
			Message::Array(_) => Kind::Array,
		}
	}

	/// Check if the message is a null bulk string or a null array
	pub fn is_nil(&self) -> bool {
		matches!(self, Message::Bulk(None) | Message::Array(None))
	}

	/// Check if the message is an error reply
	pub fn is_error(&self) -> bool {
		matches!(self, Message::Error(_))
	}

	/// Try to view the text or bytes payload as UTF-8
	pub fn as_str(&self) -> Option<&str> {
		self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
	}

	/// Try to view the text or bytes payload
	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			Message::Simple(b) | Message::Error(b) | Message::Bulk(Some(b)) => Some(b),
			_ => None,
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Message::Integer(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&[Message]> {
		match self {
			Message::Array(Some(items)) => Some(items),
			_ => None,
		}
	}

	/// Try to consume and convert to the child messages
	pub fn into_array(self) -> Option<Vec<Message>> {
		match self {
			Message::Array(Some(items)) => Some(items),
			_ => None,
		}
	}

	// Convenience constructors

	pub fn simple(s: impl Into<Bytes>) -> Self {
		Message::Simple(s.into())
	}

	pub fn error(e: impl Into<Bytes>) -> Self {
		Message::Error(e.into())
	}

	pub fn integer(i: i64) -> Self {
		Message::Integer(i)
	}

	pub fn bulk(b: impl Into<Bytes>) -> Self {
		Message::Bulk(Some(b.into()))
	}

	pub fn array(items: impl IntoIterator<Item = Message>) -> Self {
		Message::Array(Some(items.into_iter().collect()))
	}

	pub fn nil_bulk() -> Self {
		Message::Bulk(None)
	}

	pub fn nil_array() -> Self {
		Message::Array(None)
	}
}
