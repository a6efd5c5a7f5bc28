//! Encode and decode Open Sound Control (OSC) packets.
//!
//! # Overview
//!
//! OSC packs typed arguments into a compact binary form: big-endian
//! integers and floats, NUL-terminated strings and raw blobs, each padded
//! to a multiple of 4 bytes. This crate provides bounds-checked cursors
//! that read and write those primitives over a caller-owned buffer:
//!
//! - [WriteCursor] serializes values left to right and fails with
//!   [Error::Overflow] (carrying the byte deficit) when the buffer is full.
//! - [ReadCursor] deserializes them in the same order and fails with
//!   [Error::Underrun] when the buffer runs out.
//!
//! A failed call never moves the cursor. Message and bundle framing is
//! assembled by the caller from these primitives; the packet size is the
//! write cursor's [WriteCursor::consumed] count, and [ReadCursor::at_end]
//! confirms that a received packet had no trailing bytes.
//!
//! # Example
//!
//! ```
//! use osc_codec::{ReadCursor, WriteCursor};
//!
//! let mut buf = [0u8; 64];
//! let mut writer = WriteCursor::new(&mut buf);
//! writer.put_string("/n_set").unwrap();
//! writer.put_string(",isf").unwrap();
//! writer.put_int32(1).unwrap();
//! writer.put_string("wobble").unwrap();
//! writer.put_float32(0.5).unwrap();
//! let size = writer.consumed();
//! assert_eq!(size, 32);
//!
//! let mut reader = ReadCursor::new(&buf[..size]);
//! assert_eq!(reader.get_str().unwrap(), "/n_set");
//! assert_eq!(reader.get_str().unwrap(), ",isf");
//! assert_eq!(reader.get_int32().unwrap(), 1);
//! assert_eq!(reader.get_str().unwrap(), "wobble");
//! assert_eq!(reader.get_float32().unwrap(), 0.5);
//! assert!(reader.at_end());
//! ```
//!
//! # Sub-cursors
//!
//! [WriteCursor::sub] and [ReadCursor::sub] carve a nested region (such as
//! a bundle element) out of the parent's remaining bytes. A child keeps its
//! own position; the parent does not see the child's progress and must be
//! advanced explicitly with `skip(child.consumed())`.

pub mod codec;
pub mod config;
pub mod cursor;
pub mod endian;
pub mod error;
pub mod read;
pub mod write;

// Re-export main types and traits
pub use codec::{Decode, DecodeExt, Encode, EncodeSize, Read, ReadExt, Write};
pub use config::{BlobCfg, LenCfg};
pub use cursor::Cursor;
pub use error::Error;
pub use read::ReadCursor;
pub use write::WriteCursor;
