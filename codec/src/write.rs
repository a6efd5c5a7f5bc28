//! Bounds-checked encoding into a borrowed buffer.

use crate::{
    endian::{to_network32, to_network64, Convert, Endian},
    Cursor, Error,
};
use std::ffi::CStr;
use tracing::trace;

/// Writes OSC primitives left to right into a mutable buffer.
///
/// Every `put_*` call checks that enough room remains before touching the
/// buffer. On failure it returns [Error::Overflow] with the number of
/// missing bytes and leaves the position where it was.
#[derive(Debug)]
pub struct WriteCursor<'a> {
    buf: &'a mut [u8],
    cursor: Cursor,
}

impl<'a> WriteCursor<'a> {
    /// Creates a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        let cursor = Cursor::new(buf.len());
        Self { buf, cursor }
    }

    /// Creates a cursor over the next `size` bytes of this one.
    ///
    /// The child shares the buffer but tracks its own position: writes
    /// through it do not advance `self`. Reconcile with
    /// `self.skip(child.consumed())` once the child is dropped.
    pub fn sub(&mut self, size: usize) -> Result<WriteCursor<'_>, Error> {
        let cursor = Cursor::sub(&self.cursor, size)?;
        Ok(WriteCursor {
            buf: &mut *self.buf,
            cursor,
        })
    }

    /// Creates a cursor over everything this one has left.
    pub fn rest(&mut self) -> WriteCursor<'_> {
        let cursor = Cursor::rest(&self.cursor);
        WriteCursor {
            buf: &mut *self.buf,
            cursor,
        }
    }

    /// Returns the position tracker.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Moves the position back to the start of the extent.
    pub fn reset(&mut self) {
        self.cursor.reset();
    }

    /// See [Cursor::set_pos].
    pub fn set_pos(&mut self, pos: usize) {
        self.cursor.set_pos(pos);
    }

    /// Current absolute offset into the buffer.
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// Total size of the extent.
    pub fn capacity(&self) -> usize {
        self.cursor.capacity()
    }

    /// Whether the extent is full.
    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Number of bytes written or skipped so far.
    pub fn consumed(&self) -> usize {
        self.cursor.consumed()
    }

    /// Number of bytes that still fit.
    pub fn consumable(&self) -> usize {
        self.cursor.consumable()
    }

    /// Bytes written so far within this cursor's extent.
    pub fn written(&self) -> &[u8] {
        &self.buf[self.cursor.begin()..self.cursor.pos()]
    }

    /// Returns an error unless `n` more bytes fit.
    pub fn check_writable(&self, n: usize) -> Result<(), Error> {
        let consumable = self.cursor.consumable();
        if consumable < n {
            trace!(required = n, consumable, "write overflow");
            return Err(Error::Overflow(n - consumable));
        }
        Ok(())
    }

    /// Advances `n` bytes without writing, reserving them for later.
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.check_writable(n)?;
        self.cursor.advance(n);
        Ok(())
    }

    /// Writes exactly `n` zero bytes.
    pub fn zero(&mut self, n: usize) -> Result<(), Error> {
        self.check_writable(n)?;
        let pos = self.cursor.pos();
        self.buf[pos..pos + n].fill(0);
        self.cursor.advance(n);
        Ok(())
    }

    /// Writes one byte.
    pub fn put_char(&mut self, c: u8) -> Result<(), Error> {
        self.put_array([c])
    }

    /// Writes a 32-bit integer in big-endian order.
    pub fn put_int32(&mut self, x: i32) -> Result<(), Error> {
        self.put_array(x.convert(Endian::NETWORK).to_ne_bytes())
    }

    /// Writes a 64-bit integer in big-endian order.
    pub fn put_uint64(&mut self, x: u64) -> Result<(), Error> {
        self.put_array(to_network64(x).to_ne_bytes())
    }

    /// Writes the IEEE-754 bit pattern of `f`, so NaN payloads and `-0.0`
    /// survive unchanged.
    pub fn put_float32(&mut self, f: f32) -> Result<(), Error> {
        self.put_array(to_network32(f.to_bits()).to_ne_bytes())
    }

    /// Writes `data` followed by zero padding up to a multiple of 4 bytes.
    pub fn put_data(&mut self, data: &[u8]) -> Result<(), Error> {
        self.put_padded(data, 0)
    }

    /// Writes `s` as a NUL-terminated string padded to a multiple of 4 bytes.
    ///
    /// Strings containing a NUL byte are rejected with [Error::Parse]
    /// since a reader would stop at the first one.
    pub fn put_string(&mut self, s: &str) -> Result<(), Error> {
        if s.as_bytes().contains(&0) {
            return Err(Error::Parse("string contains NUL"));
        }
        self.put_padded(s.as_bytes(), 1)
    }

    /// Writes `s` with its terminator, padded to a multiple of 4 bytes.
    pub fn put_cstr(&mut self, s: &CStr) -> Result<(), Error> {
        self.put_data(s.to_bytes_with_nul())
    }

    /// Overwrites the 4 bytes at absolute offset `at` with `x`.
    ///
    /// Used to fill in a size prefix reserved with [Self::skip] once the
    /// body behind it is known. The position does not move.
    ///
    /// # Panics
    ///
    /// Panics unless `[at, at + 4)` lies within what has been consumed.
    pub fn put_int32_at(&mut self, at: usize, x: i32) {
        assert!(
            at >= self.cursor.begin() && at + 4 <= self.cursor.pos(),
            "patch at {at} outside consumed region"
        );
        self.buf[at..at + 4].copy_from_slice(&x.convert(Endian::NETWORK).to_ne_bytes());
    }

    fn put_array<const N: usize>(&mut self, bytes: [u8; N]) -> Result<(), Error> {
        self.check_writable(N)?;
        let pos = self.cursor.pos();
        self.buf[pos..pos + N].copy_from_slice(&bytes);
        self.cursor.advance(N);
        Ok(())
    }

    /// Writes `data`, then `extra` zero bytes, then padding.
    fn put_padded(&mut self, data: &[u8], extra: usize) -> Result<(), Error> {
        let size = data.len() + extra;
        let n = Cursor::align(size);
        self.check_writable(n)?;
        let pos = self.cursor.pos();
        self.buf[pos..pos + data.len()].copy_from_slice(data);
        self.buf[pos + data.len()..pos + n].fill(0);
        self.cursor.advance(n);
        Ok(())
    }
}
