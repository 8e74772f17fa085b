//! Resumable RESP decoder over a single buffer.
//!
//! [`decode`] turns as many complete top-level messages as the buffer holds
//! into [`Message`] trees and reports where the next call should resume:
//!
//! - on success, and on a retryable error ([`ErrorClass::IncompleteInput`]),
//!   the resume offset is the start of the first message that has not been
//!   returned, so the caller keeps `buf[resume_offset..]`, appends more input
//!   and decodes again;
//! - on malformed data ([`ErrorClass::MalformedData`]) the resume offset is
//!   the end of the buffer and the remaining bytes are dropped as a unit.
//!
//! [`ErrorClass::IncompleteInput`]: crate::ErrorClass::IncompleteInput
//! [`ErrorClass::MalformedData`]: crate::ErrorClass::MalformedData

use bytes::Bytes;
use log::debug;
use log::trace;
use log::warn;

use crate::error::DecodeError;
use crate::message::Message;
use crate::options::DecodeOptions;
use crate::scanner::scan_fixed;
use crate::scanner::scan_line;
use crate::utils::*;

/// Smallest encoded size of an array element (`:0\r\n`), used to bound the
/// up-front allocation for a declared array count.
const MIN_ELEMENT_LEN: usize = 4;

/// Result of one [`decode`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
	/// Completed top-level messages, in arrival order.
	pub messages: Vec<Message>,
	/// Offset in the input where the next call should start.
	pub resume_offset: usize,
	/// The error that stopped decoding, if any.
	pub error: Option<DecodeError>,
}

impl Decoded {
	/// True when the whole buffer was consumed without error.
	pub fn is_complete(&self) -> bool {
		self.error.is_none()
	}
}

/// Decode every complete top-level message in `buf` with default limits.
pub fn decode(buf: &[u8]) -> Decoded {
	decode_with(buf, &DecodeOptions::default())
}

/// Decode every complete top-level message in `buf`.
pub fn decode_with(buf: &[u8], options: &DecodeOptions) -> Decoded {
	Decoder::new(buf, options).run()
}

struct Decoder<'a> {
	src: &'a [u8],
	pos: usize,
	messages: Vec<Message>,
	resume: usize,
	options: &'a DecodeOptions,
}

/// An array whose header has been read but whose children are still pending.
#[derive(Debug)]
struct ArrayFrame {
	expected: usize,
	elements: Vec<Message>,
}

enum Token {
	Value(Message),
	ArrayStart(usize),
}

impl<'a> Decoder<'a> {
	fn new(src: &'a [u8], options: &'a DecodeOptions) -> Self {
		Self {
			src,
			pos: 0,
			messages: Vec::new(),
			resume: 0,
			options,
		}
	}

	fn run(mut self) -> Decoded {
		while self.resume < self.src.len() {
			self.pos = self.resume;
			match self.next_message() {
				Ok(msg) => {
					trace!(
						"decoded {:?} message at offset {} ({} bytes)",
						msg.kind(),
						self.resume,
						self.pos - self.resume
					);
					self.messages.push(msg);
					self.resume = self.pos;
				}
				Err(e) => return self.finish(Some(e)),
			}
		}
		self.finish(None)
	}

	fn finish(mut self, error: Option<DecodeError>) -> Decoded {
		if let Some(e) = &error {
			if e.is_retryable() {
				debug!("incomplete message at offset {}: {}", self.resume, e);
			} else {
				warn!(
					"discarding {} bytes of malformed input at offset {}: {}",
					self.src.len() - self.resume,
					self.resume,
					e
				);
				self.resume = self.src.len();
			}
		}
		Decoded {
			messages: self.messages,
			resume_offset: self.resume,
			error,
		}
	}

	/// Decode one complete top-level message starting at the cursor.
	///
	/// Nested arrays are tracked on an explicit frame stack; a failure at any
	/// depth drops every pending frame with it.
	fn next_message(&mut self) -> Result<Message, DecodeError> {
		let mut frames: Vec<ArrayFrame> = Vec::new();

		loop {
			let mut value = match self.next_token(frames.len() + 1)? {
				Token::Value(value) => value,
				Token::ArrayStart(expected) => {
					let capacity = expected.min(self.remaining() / MIN_ELEMENT_LEN);
					frames.push(ArrayFrame {
						expected,
						elements: Vec::with_capacity(capacity),
					});
					continue;
				}
			};

			loop {
				match frames.last_mut() {
					None => return Ok(value),
					Some(frame) => {
						frame.elements.push(value);
						if frame.elements.len() < frame.expected {
							break;
						}
					}
				}
				// innermost array is full
				let elements = frames.pop().map(|f| f.elements).unwrap_or_default();
				value = Message::Array(Some(elements));
			}
		}
	}

	/// Read one header and, for bulk strings, its payload.
	///
	/// `depth` is the nesting level an array starting here would have.
	fn next_token(&mut self, depth: usize) -> Result<Token, DecodeError> {
		let src = self.src;
		let (marker, line) = scan_line(&src[self.pos..])?;
		let header_len = 1 + line.len() + CRLF.len();

		match marker {
			SIMPLE_STRING => {
				self.pos += header_len;
				Ok(Token::Value(Message::Simple(Bytes::copy_from_slice(line))))
			}
			ERROR => {
				self.pos += header_len;
				Ok(Token::Value(Message::Error(Bytes::copy_from_slice(line))))
			}
			INTEGER => {
				self.pos += header_len;
				let num = parse_integer(line)?;
				Ok(Token::Value(Message::Integer(num)))
			}
			BULK_STRING => {
				let length = parse_length(line)?;
				self.pos += header_len;

				// Null bulk string
				if length < 0 {
					return Ok(Token::Value(Message::Bulk(None)));
				}

				let length = check_limit("bulk length", length, self.options.max_bulk_len)?;
				let data = scan_fixed(&src[self.pos..], length)?;
				self.pos += length + CRLF.len();
				Ok(Token::Value(Message::Bulk(Some(Bytes::copy_from_slice(data)))))
			}
			ARRAY => {
				let length = parse_length(line)?;
				self.pos += header_len;

				// Null array
				if length < 0 {
					return Ok(Token::Value(Message::Array(None)));
				}

				let length = check_limit("array length", length, self.options.max_array_len)?;
				check_limit("array depth", depth as i64, self.options.max_depth)?;
				if length == 0 {
					return Ok(Token::Value(Message::Array(Some(Vec::new()))));
				}
				Ok(Token::ArrayStart(length))
			}
			_ => Err(DecodeError::InvalidTypeMarker(marker as char)),
		}
	}

	fn remaining(&self) -> usize {
		self.src.len() - self.pos
	}
}

#[inline]
fn check_limit(what: &'static str, value: i64, limit: usize) -> Result<usize, DecodeError> {
	let value = value as u64;
	if value > limit as u64 {
		return Err(DecodeError::LimitExceeded {
			what,
			value,
			limit: limit as u64,
		});
	}
	Ok(value as usize)
}
