//! # resp-codec - incremental RESP codec
//!
//! Converts between raw RESP2 byte streams and typed [`Message`] trees.
//!
//! ## Features
//!
//! - **Resumable decoding**: [`decode`] returns every complete message in a
//!   buffer together with the offset to resume from once more bytes arrive
//! - **Explicit error classes**: incomplete input is retryable, malformed
//!   input discards the rest of the buffer
//! - **Closed encoder input**: [`Value`] lists every encodable shape
//! - **Shared sinks**: [`Encoder`] serialises writes from concurrent callers
//!
//! ## Example
//!
//! ```rust
//! use resp_codec::{Message, Value};
//!
//! let decoded = resp_codec::decode(b"+OK\r\n:42\r\n$5\r\nhel");
//! assert_eq!(decoded.messages, vec![Message::simple("OK"), Message::integer(42)]);
//! assert_eq!(decoded.resume_offset, 10);
//! assert!(decoded.error.unwrap().is_retryable());
//!
//! let encoded = resp_codec::marshal(&Value::from(vec![1i64, 2])).unwrap();
//! assert_eq!(&encoded[..], b"*2\r\n:1\r\n:2\r\n");
//! ```

mod decoder;
mod encoder;
mod error;
mod message;
mod options;
mod scanner;
mod stream;
mod utils;
mod value;

pub use decoder::Decoded;
pub use decoder::decode;
pub use decoder::decode_with;
pub use encoder::Encoder;
pub use encoder::RespEncoder;
pub use encoder::marshal;
pub use error::DecodeError;
pub use error::EncodeError;
pub use error::ErrorClass;
pub use message::Kind;
pub use message::Message;
pub use options::DecodeOptions;
pub use scanner::scan_fixed;
pub use scanner::scan_line;
pub use stream::StreamDecoder;
pub use value::Value;
