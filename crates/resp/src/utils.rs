//! Utility functions and constants for RESP protocol.

use crate::error::DecodeError;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// Type markers
pub const SIMPLE_STRING: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK_STRING: u8 = b'$';
pub const ARRAY: u8 = b'*';

/// Canonical null tokens
pub const NULL_BULK: &[u8] = b"$-1\r\n";
pub const NULL_ARRAY: &[u8] = b"*-1\r\n";

/// Parse an integer from a byte slice
#[inline]
pub fn parse_integer(buf: &[u8]) -> Result<i64, DecodeError> {
	parse_decimal(buf).ok_or_else(|| DecodeError::InvalidInteger(lossy(buf)))
}

/// Parse a bulk length or array count from a byte slice
#[inline]
pub fn parse_length(buf: &[u8]) -> Result<i64, DecodeError> {
	parse_decimal(buf).ok_or_else(|| DecodeError::InvalidLength(lossy(buf)))
}

#[inline]
fn parse_decimal(buf: &[u8]) -> Option<i64> {
	std::str::from_utf8(buf).ok()?.parse::<i64>().ok()
}

fn lossy(buf: &[u8]) -> String {
	String::from_utf8_lossy(buf).into_owned()
}
