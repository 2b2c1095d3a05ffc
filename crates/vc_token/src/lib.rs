//! An in-memory token stream for self-describing, object-delimited data.
//!
//! ## Menu
//!
//! - [`TokenBuffer`]: a flat token list with an arena for all strings.
//!   Containers record the index of their closing token, so skipping a
//!   value of any size is O(1).
//! - [`TokenReader`]: a cursor over a buffer. Peek the next [`TokenKind`],
//!   read names and scalars, skip values, copy raw values, and save and
//!   restore positions with [`Checkpoint`].
//! - [`TokenWriter`]: builds a buffer, rejecting writes that would produce
//!   an unbalanced structure.
//! - `serde_core` bridge: [`TokenBuffer`] implements `Deserialize` (record
//!   any self-describing input) and `Serialize` (replay into any output).
//!
//! # Examples
//!
//! ```
//! use vc_token::{TokenKind, TokenWriter};
//!
//! let mut writer = TokenWriter::new();
//! writer.begin_object().unwrap();
//! writer.write_name("id").unwrap();
//! writer.write_u64(7).unwrap();
//! writer.end_object().unwrap();
//! let buffer = writer.finish().unwrap();
//!
//! let mut reader = buffer.reader();
//! let start = reader.checkpoint();
//! reader.begin_object().unwrap();
//! assert_eq!(reader.read_name().unwrap(), Some("id"));
//! assert_eq!(reader.peek_kind(), Some(TokenKind::Number));
//!
//! reader.restore(start);
//! reader.skip_value().unwrap();
//! assert!(reader.is_finished());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod buffer;
mod error;
mod kind;
mod reader;
mod serde;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use buffer::TokenBuffer;
pub use error::TokenError;
pub use kind::TokenKind;
pub use reader::{Checkpoint, TokenReader};
pub use writer::TokenWriter;
