//! Values accepted by the encoder.

use bytes::Bytes;

use crate::error::EncodeError;
use crate::message::Message;

/// Every shape the encoder knows how to write.
///
/// Conversions from plain Rust types pick the wire kind: byte containers
/// become bulk strings, `String`/`&str` become simple strings, integers become
/// integers and `None` becomes the null bulk string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// Bulk string
	Bytes(Bytes),
	/// Simple string
	Text(String),
	/// Error reply
	Error(String),
	Integer(i64),
	/// Array of bulk strings
	BytesArray(Vec<Bytes>),
	/// Array of simple strings
	TextArray(Vec<String>),
	/// Array of integers
	IntegerArray(Vec<i64>),
	/// Array whose elements are encoded one by one
	Mixed(Vec<Value>),
	/// A decoded message tree, written back by kind
	Message(Message),
	/// Null bulk string: `$-1\r\n`
	Nil,
	/// Null array: `*-1\r\n`
	NilArray,
}

impl Value {
	/// Create an error reply from anything printable, e.g. an error value
	pub fn error(e: impl std::fmt::Display) -> Self {
		Value::Error(e.to_string())
	}
}

impl From<Bytes> for Value {
	fn from(b: Bytes) -> Self {
		Value::Bytes(b)
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Value::Bytes(Bytes::from(v))
	}
}

impl From<&[u8]> for Value {
	fn from(b: &[u8]) -> Self {
		Value::Bytes(Bytes::copy_from_slice(b))
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::Text(s)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::Text(s.to_string())
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Value::Integer(i)
	}
}

impl From<i32> for Value {
	fn from(i: i32) -> Self {
		Value::Integer(i as i64)
	}
}

impl From<Vec<Bytes>> for Value {
	fn from(v: Vec<Bytes>) -> Self {
		Value::BytesArray(v)
	}
}

impl From<Vec<String>> for Value {
	fn from(v: Vec<String>) -> Self {
		Value::TextArray(v)
	}
}

impl From<Vec<i64>> for Value {
	fn from(v: Vec<i64>) -> Self {
		Value::IntegerArray(v)
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::Mixed(v)
	}
}

impl From<Message> for Value {
	fn from(m: Message) -> Self {
		Value::Message(m)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(o: Option<T>) -> Self {
		match o {
			Some(v) => v.into(),
			None => Value::Nil,
		}
	}
}

/// Dynamically shaped input is checked here, before any bytes are written.
impl TryFrom<serde_json::Value> for Value {
	type Error = EncodeError;

	fn try_from(json: serde_json::Value) -> Result<Self, EncodeError> {
		use serde_json::Value as Json;

		match json {
			Json::Null => Ok(Value::Nil),
			Json::String(s) => Ok(Value::Text(s)),
			Json::Number(n) => n
				.as_i64()
				.map(Value::Integer)
				.ok_or_else(|| EncodeError::UnsupportedType(format!("number {}", n))),
			Json::Array(items) => items
				.into_iter()
				.map(Value::try_from)
				.collect::<Result<Vec<_>, _>>()
				.map(Value::Mixed),
			Json::Bool(b) => Err(EncodeError::UnsupportedType(format!("boolean {}", b))),
			Json::Object(_) => Err(EncodeError::UnsupportedType("object".to_string())),
		}
	}
}
