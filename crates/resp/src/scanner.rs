//! Token location inside a raw buffer.
//!
//! Both scans borrow from the input and never copy.

use memchr::memmem;

use crate::error::DecodeError;
use crate::utils::CRLF;

/// Locate a header line: a one-byte type marker followed by content and CRLF.
///
/// Returns the marker and the content between the marker and the CR. A bare
/// LF does not terminate a line.
#[inline]
pub fn scan_line(buf: &[u8]) -> Result<(u8, &[u8]), DecodeError> {
	match memmem::find(buf, CRLF) {
		None => Err(DecodeError::NotTerminated),
		Some(0) | Some(1) => Err(DecodeError::EmptyToken),
		Some(pos) => Ok((buf[0], &buf[1..pos])),
	}
}

/// Locate an `n`-byte payload that must be followed by CRLF.
#[inline]
pub fn scan_fixed(buf: &[u8], n: usize) -> Result<&[u8], DecodeError> {
	let needed = n
		.checked_add(CRLF.len())
		.ok_or_else(|| DecodeError::InvalidLength(n.to_string()))?;
	if buf.len() < needed {
		return Err(DecodeError::InsufficientData {
			needed,
			available: buf.len(),
		});
	}
	if &buf[n..needed] != CRLF {
		return Err(DecodeError::MalformedTerminator);
	}
	Ok(&buf[..n])
}
