//! Bounds-checked decoding from a borrowed buffer.

use crate::{
    endian::{from_network32, from_network64, Convert, Endian},
    Cursor, Error,
};
use std::ffi::CStr;
use tracing::trace;

/// Smallest encoded string: one byte of content or padding, rounded up.
const MIN_STRING_LEN: usize = 4;

/// Reads OSC primitives left to right from a buffer.
///
/// Every `get_*` call checks that enough bytes remain before reading. On
/// failure it returns [Error::Underrun] and leaves the position where it
/// was. Returned strings and blobs borrow from the underlying buffer.
#[derive(Clone, Copy, Debug)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    cursor: Cursor,
}

impl<'a> ReadCursor<'a> {
    /// Creates a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            cursor: Cursor::new(buf.len()),
        }
    }

    /// Creates a cursor over the next `size` bytes of this one.
    ///
    /// The child is independent: reading through it does not advance `self`.
    pub fn sub(&self, size: usize) -> Result<ReadCursor<'a>, Error> {
        Ok(Self {
            buf: self.buf,
            cursor: Cursor::sub(&self.cursor, size)?,
        })
    }

    /// Creates a cursor over everything this one has left.
    pub fn rest(&self) -> ReadCursor<'a> {
        Self {
            buf: self.buf,
            cursor: Cursor::rest(&self.cursor),
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

    /// Whether every byte of the extent has been read.
    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Number of bytes read so far.
    pub fn consumed(&self) -> usize {
        self.cursor.consumed()
    }

    /// Number of bytes left to read.
    pub fn consumable(&self) -> usize {
        self.cursor.consumable()
    }

    /// Bytes not yet consumed within this cursor's extent.
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.cursor.pos()..self.cursor.end()]
    }

    /// Returns an error unless `n` more bytes can be read.
    pub fn check_readable(&self, n: usize) -> Result<(), Error> {
        let consumable = self.cursor.consumable();
        if consumable < n {
            trace!(required = n, consumable, "read underrun");
            return Err(Error::Underrun);
        }
        Ok(())
    }

    /// Advances past `n` bytes without decoding them.
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.check_readable(n)?;
        self.cursor.advance(n);
        Ok(())
    }

    /// Reads one byte without advancing.
    pub fn peek_char(&self) -> Result<u8, Error> {
        let [c] = self.peek_array::<1>()?;
        Ok(c)
    }

    /// Reads one byte.
    pub fn get_char(&mut self) -> Result<u8, Error> {
        let [c] = self.get_array::<1>()?;
        Ok(c)
    }

    /// Reads a big-endian 32-bit integer without advancing.
    pub fn peek_int32(&self) -> Result<i32, Error> {
        let bytes = self.peek_array::<4>()?;
        Ok(i32::from_ne_bytes(bytes).convert(Endian::NETWORK))
    }

    /// Reads a big-endian 32-bit integer.
    pub fn get_int32(&mut self) -> Result<i32, Error> {
        let bytes = self.get_array::<4>()?;
        Ok(i32::from_ne_bytes(bytes).convert(Endian::NETWORK))
    }

    /// Reads a big-endian 64-bit integer without advancing.
    pub fn peek_uint64(&self) -> Result<u64, Error> {
        let bytes = self.peek_array::<8>()?;
        Ok(from_network64(u64::from_ne_bytes(bytes)))
    }

    /// Reads a big-endian 64-bit integer.
    pub fn get_uint64(&mut self) -> Result<u64, Error> {
        let bytes = self.get_array::<8>()?;
        Ok(from_network64(u64::from_ne_bytes(bytes)))
    }

    /// Reads an IEEE-754 bit pattern, so NaN payloads and `-0.0` survive
    /// unchanged.
    pub fn get_float32(&mut self) -> Result<f32, Error> {
        let bytes = self.get_array::<4>()?;
        Ok(f32::from_bits(from_network32(u32::from_ne_bytes(bytes))))
    }

    /// Reads a NUL-terminated, 4-byte padded string.
    ///
    /// The terminator is searched for only at offsets `3, 7, 11, ...` from
    /// the current position. A conforming writer always places a NUL at
    /// the last byte of the padded region, so this finds the end of the
    /// string without scanning every byte. Input from a non-conforming
    /// writer (a NUL that is not followed by padding to a 4-byte boundary)
    /// is read past, or rejected with [Error::Underrun] if no NUL falls on
    /// a checked offset before the end.
    ///
    /// The returned string stops at the first NUL in the region.
    pub fn get_string(&mut self) -> Result<&'a CStr, Error> {
        self.check_readable(MIN_STRING_LEN)?;

        let start = self.cursor.pos();
        let end = self.cursor.end();
        let mut nul = start + MIN_STRING_LEN - 1;
        loop {
            if nul >= end {
                trace!(start, end, "unterminated string");
                return Err(Error::Underrun);
            }
            if self.buf[nul] == 0 {
                break;
            }
            nul += 4;
        }

        let s = CStr::from_bytes_until_nul(&self.buf[start..=nul])
            .map_err(|_| Error::Parse("unterminated string"))?;
        self.cursor.advance(nul - start + 1);
        Ok(s)
    }

    /// Reads a string with [Self::get_string] and checks that it is UTF-8.
    ///
    /// Returns [Error::Parse] without advancing if it is not.
    pub fn get_str(&mut self) -> Result<&'a str, Error> {
        let mut ahead = *self;
        let s = ahead
            .get_string()?
            .to_str()
            .map_err(|_| Error::Parse("string is not UTF-8"))?;
        *self = ahead;
        Ok(s)
    }

    /// Reads a blob of `size` bytes and skips its padding.
    ///
    /// The size is not on the wire next to the data; it must come from the
    /// caller (typically a preceding int32).
    pub fn get_data(&mut self, size: usize) -> Result<&'a [u8], Error> {
        // Checking `size` first keeps the alignment below from overflowing
        self.check_readable(size)?;
        self.check_readable(Cursor::align(size))?;
        let pos = self.cursor.pos();
        let data = &self.buf[pos..pos + size];
        self.cursor.advance(Cursor::align(size));
        Ok(data)
    }

    fn peek_array<const N: usize>(&self) -> Result<[u8; N], Error> {
        self.check_readable(N)?;
        let pos = self.cursor.pos();
        let mut dst = [0u8; N];
        dst.copy_from_slice(&self.buf[pos..pos + N]);
        Ok(dst)
    }

    fn get_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let dst = self.peek_array::<N>()?;
        self.cursor.advance(N);
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_int32() {
        let buf = [0x01, 0x02, 0x03, 0x04, 0xff, 0xff, 0xff, 0xfe];
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.peek_int32().unwrap(), 0x01020304);
        assert_eq!(reader.consumed(), 0);
        assert_eq!(reader.get_int32().unwrap(), 0x01020304);
        assert_eq!(reader.get_int32().unwrap(), -2);
        assert!(reader.at_end());
        assert_eq!(reader.get_int32(), Err(Error::Underrun));
        assert_eq!(reader.peek_int32(), Err(Error::Underrun));
    }

    #[test]
    fn test_get_uint64() {
        let buf = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.peek_uint64().unwrap(), 0x0102030405060708);
        assert_eq!(reader.get_uint64().unwrap(), 0x0102030405060708);
        assert_eq!(reader.consumed(), 8);

        let mut reader = ReadCursor::new(&buf[..7]);
        assert_eq!(reader.get_uint64(), Err(Error::Underrun));
        assert_eq!(reader.consumed(), 0);
    }

    #[test]
    fn test_get_float32() {
        let buf = [0x3f, 0x80, 0x00, 0x00, 0x7f, 0xc0, 0x00, 0x01];
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.get_float32().unwrap(), 1.0);
        assert_eq!(reader.get_float32().unwrap().to_bits(), 0x7fc00001);
        assert_eq!(reader.get_float32(), Err(Error::Underrun));

        let mut reader = ReadCursor::new(&buf[..3]);
        assert_eq!(reader.get_float32(), Err(Error::Underrun));
        assert_eq!(reader.consumed(), 0);
    }

    #[test]
    fn test_get_char() {
        let buf = *b"ifs";
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.peek_char().unwrap(), b'i');
        assert_eq!(reader.get_char().unwrap(), b'i');
        assert_eq!(reader.get_char().unwrap(), b'f');
        assert_eq!(reader.consumed(), 2);
        assert_eq!(reader.get_char().unwrap(), b's');
        assert_eq!(reader.peek_char(), Err(Error::Underrun));
    }

    #[test]
    fn test_get_string() {
        let buf = *b"hello\0\0\0abc\0";
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.get_string().unwrap().to_bytes(), b"hello");
        assert_eq!(reader.consumed(), 8);
        assert_eq!(reader.get_str().unwrap(), "abc");
        assert!(reader.at_end());
    }

    #[test]
    fn test_get_string_empty() {
        let buf = [0u8; 4];
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.get_str().unwrap(), "");
        assert_eq!(reader.consumed(), 4);
    }

    #[test]
    fn test_get_string_unterminated() {
        let buf = *b"abcdefgh";
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.get_string(), Err(Error::Underrun));
        assert_eq!(reader.consumed(), 0);

        // Fewer than 4 bytes can never hold a string
        let mut reader = ReadCursor::new(&buf[..3]);
        assert_eq!(reader.get_string(), Err(Error::Underrun));
    }

    #[test]
    fn test_get_string_unaligned_nul() {
        // The NUL at offset 1 is not on a checked offset, so the scan runs
        // on to the end of the buffer.
        let buf = *b"a\0bcdefg";
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.get_string(), Err(Error::Underrun));

        // With a NUL on a checked offset the string ends at the first NUL.
        let buf = *b"a\0bcdef\0";
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.get_string().unwrap().to_bytes(), b"a");
        assert_eq!(reader.consumed(), 8);
    }

    #[test]
    fn test_get_str_invalid_utf8() {
        let buf = [0xff, 0xfe, 0x00, 0x00];
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.get_str(), Err(Error::Parse("string is not UTF-8")));
        assert_eq!(reader.consumed(), 0);
        assert_eq!(reader.get_string().unwrap().to_bytes(), &[0xff, 0xfe]);
    }

    #[test]
    fn test_get_data() {
        let buf = [1, 2, 3, 4, 5, 0, 0, 0, 9];
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.get_data(5).unwrap(), &[1, 2, 3, 4, 5]);
        assert_eq!(reader.consumed(), 8);
        assert_eq!(reader.get_data(0).unwrap(), &[] as &[u8]);
        assert_eq!(reader.consumed(), 8);

        // Content fits but padding does not
        assert_eq!(reader.get_data(1), Err(Error::Underrun));
        assert_eq!(reader.get_data(usize::MAX), Err(Error::Underrun));
        assert_eq!(reader.consumed(), 8);
    }

    #[test]
    fn test_skip() {
        let buf = [0u8; 6];
        let mut reader = ReadCursor::new(&buf);
        reader.skip(4).unwrap();
        assert_eq!(reader.skip(3), Err(Error::Underrun));
        assert_eq!(reader.consumed(), 4);
        reader.skip(2).unwrap();
        assert!(reader.at_end());
    }

    #[test]
    fn test_sub() {
        let buf = [0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3];
        let mut reader = ReadCursor::new(&buf);
        assert_eq!(reader.get_int32().unwrap(), 1);

        let mut child = reader.sub(4).unwrap();
        assert_eq!(child.get_int32().unwrap(), 2);
        assert!(child.at_end());
        assert_eq!(child.get_int32(), Err(Error::Underrun));

        // The parent did not move
        assert_eq!(reader.consumed(), 4);
        reader.skip(child.consumed()).unwrap();
        assert_eq!(reader.get_int32().unwrap(), 3);

        assert_eq!(reader.sub(1).unwrap_err(), Error::Underrun);
    }

    #[test]
    fn test_sub_bounds_string_scan() {
        // The terminator lies outside the sub-cursor's extent
        let buf = *b"abcdefg\0";
        let reader = ReadCursor::new(&buf);
        let mut child = reader.sub(4).unwrap();
        assert_eq!(child.get_string(), Err(Error::Underrun));
        assert_eq!(reader.rest().get_string().unwrap().to_bytes(), b"abcdefg");
    }

    #[test]
    fn test_remaining_and_reset() {
        let buf = [0, 0, 0, 7, 8, 9];
        let mut reader = ReadCursor::new(&buf);
        reader.get_int32().unwrap();
        assert_eq!(reader.remaining(), &[8, 9]);
        reader.reset();
        assert_eq!(reader.remaining().len(), 6);
        reader.set_pos(5);
        assert_eq!(reader.get_char().unwrap(), 9);
    }
}
