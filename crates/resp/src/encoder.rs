//! RESP encoder.
//!
//! [`marshal`] renders a value into memory. [`Encoder`] writes values to a
//! shared sink, one part at a time, under a mutex.

use std::io::Write;
use std::sync::Mutex;

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;
use log::trace;
use memchr::memmem;

use crate::error::EncodeError;
use crate::message::Message;
use crate::utils::*;
use crate::value::Value;

/// Trait for encoding RESP values.
pub trait RespEncoder {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError>;

	fn encode(&self) -> Result<Bytes, EncodeError> {
		let mut buf = BytesMut::new();
		self.encode_to(&mut buf)?;
		Ok(buf.freeze())
	}
}

impl RespEncoder for Message {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
		match self {
			Message::Simple(s) => encode_simple_string(buf, s)?,
			Message::Error(e) => encode_error(buf, e)?,
			Message::Integer(i) => encode_integer(buf, *i),
			Message::Bulk(Some(b)) => encode_bulk_string(buf, b),
			Message::Bulk(None) => buf.put_slice(NULL_BULK),
			Message::Array(Some(items)) => {
				encode_length(buf, ARRAY, items.len());
				for item in items {
					item.encode_to(buf)?;
				}
			}
			Message::Array(None) => buf.put_slice(NULL_ARRAY),
		}
		Ok(())
	}
}

impl RespEncoder for Value {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
		match self {
			Value::Bytes(b) => encode_bulk_string(buf, b),
			Value::Text(s) => encode_simple_string(buf, s.as_bytes())?,
			Value::Error(e) => encode_error(buf, e.as_bytes())?,
			Value::Integer(i) => encode_integer(buf, *i),
			Value::BytesArray(items) => {
				encode_length(buf, ARRAY, items.len());
				for b in items {
					encode_bulk_string(buf, b);
				}
			}
			Value::TextArray(items) => {
				encode_length(buf, ARRAY, items.len());
				for s in items {
					encode_simple_string(buf, s.as_bytes())?;
				}
			}
			Value::IntegerArray(items) => {
				encode_length(buf, ARRAY, items.len());
				for i in items {
					encode_integer(buf, *i);
				}
			}
			Value::Mixed(items) => {
				encode_length(buf, ARRAY, items.len());
				for item in items {
					item.encode_to(buf)?;
				}
			}
			Value::Message(m) => m.encode_to(buf)?,
			Value::Nil => buf.put_slice(NULL_BULK),
			Value::NilArray => buf.put_slice(NULL_ARRAY),
		}
		Ok(())
	}
}

/// Returns the RESP encoding of `value`.
pub fn marshal(value: &Value) -> Result<Bytes, EncodeError> {
	value.encode()
}

/// Writes encoded values to a sink shared between callers.
///
/// Every part of a value (a scalar, a homogeneous array, or the header of a
/// mixed array or message array) is written while holding the sink lock, so
/// no single part is ever torn. [`Encoder::encode`] releases the lock between
/// parts: output of a concurrent caller may land between an array header and
/// its elements. Callers that need a composite value to be contiguous must use
/// [`Encoder::encode_atomic`].
///
/// If encoding fails part-way, parts already written stay on the sink. An
/// array header can be visible with fewer elements than it announces.
pub struct Encoder<W> {
	sink: Mutex<W>,
}

impl<W: Write> Encoder<W> {
	pub fn new(sink: W) -> Self {
		Self {
			sink: Mutex::new(sink),
		}
	}

	/// Encode `value`, taking the sink lock once per part.
	pub fn encode(&self, value: &Value) -> Result<(), EncodeError> {
		let mut flush = |part: &[u8]| -> Result<(), EncodeError> {
			let mut sink = self.sink.lock().map_err(|_| EncodeError::SinkPoisoned)?;
			trace!("flushing {} bytes", part.len());
			sink.write_all(part)?;
			Ok(())
		};
		write_parts(value, &mut flush)
	}

	/// Encode `value` while holding the sink lock for the whole value.
	pub fn encode_atomic(&self, value: &Value) -> Result<(), EncodeError> {
		let mut sink = self.sink.lock().map_err(|_| EncodeError::SinkPoisoned)?;
		let mut flush = |part: &[u8]| -> Result<(), EncodeError> {
			trace!("flushing {} bytes", part.len());
			sink.write_all(part)?;
			Ok(())
		};
		write_parts(value, &mut flush)
	}

	/// Flush the underlying sink.
	pub fn flush(&self) -> Result<(), EncodeError> {
		let mut sink = self.sink.lock().map_err(|_| EncodeError::SinkPoisoned)?;
		sink.flush()?;
		Ok(())
	}

	pub fn into_inner(self) -> Result<W, EncodeError> {
		self.sink.into_inner().map_err(|_| EncodeError::SinkPoisoned)
	}
}

/// Render `value` and hand each finished part to `flush`.
///
/// Mixed arrays and message arrays are split into their header and the parts
/// of each element; everything else is a single part.
fn write_parts<F>(value: &Value, flush: &mut F) -> Result<(), EncodeError>
where
	F: FnMut(&[u8]) -> Result<(), EncodeError>,
{
	match value {
		Value::Mixed(items) => {
			flush(&header(items.len())[..])?;
			for item in items {
				write_parts(item, flush)?;
			}
			Ok(())
		}
		Value::Message(m) => write_message_parts(m, flush),
		_ => flush(&value.encode()?[..]),
	}
}

fn write_message_parts<F>(msg: &Message, flush: &mut F) -> Result<(), EncodeError>
where
	F: FnMut(&[u8]) -> Result<(), EncodeError>,
{
	match msg {
		Message::Array(Some(items)) => {
			flush(&header(items.len())[..])?;
			for item in items {
				write_message_parts(item, flush)?;
			}
			Ok(())
		}
		_ => flush(&msg.encode()?[..]),
	}
}

fn header(len: usize) -> BytesMut {
	let mut buf = BytesMut::new();
	encode_length(&mut buf, ARRAY, len);
	buf
}

/// Simple strings and errors must fit on one non-empty line.
#[inline]
fn check_line(what: &str, s: &[u8]) -> Result<(), EncodeError> {
	if s.is_empty() {
		return Err(EncodeError::InvalidValue(format!("empty {}", what)));
	}
	if memmem::find(s, CRLF).is_some() {
		return Err(EncodeError::InvalidValue(format!("{} contains CRLF", what)));
	}
	Ok(())
}

#[inline]
fn encode_simple_string(buf: &mut BytesMut, s: &[u8]) -> Result<(), EncodeError> {
	check_line("simple string", s)?;
	buf.put_u8(SIMPLE_STRING);
	buf.put_slice(s);
	buf.put_slice(CRLF);
	Ok(())
}

#[inline]
fn encode_error(buf: &mut BytesMut, e: &[u8]) -> Result<(), EncodeError> {
	check_line("error", e)?;
	buf.put_u8(ERROR);
	buf.put_slice(e);
	buf.put_slice(CRLF);
	Ok(())
}

#[inline]
fn encode_integer(buf: &mut BytesMut, i: i64) {
	buf.put_u8(INTEGER);
	buf.put_slice(i.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn encode_length(buf: &mut BytesMut, marker: u8, length: usize) {
	buf.put_u8(marker);
	buf.put_slice(length.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn encode_bulk_string(buf: &mut BytesMut, s: &[u8]) {
	encode_length(buf, BULK_STRING, s.len());
	buf.put_slice(s);
	buf.put_slice(CRLF);
}
