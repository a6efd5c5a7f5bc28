//! Core codec traits and implementations for OSC argument types.
//!
//! These forward to the cursor primitives so that generic code can encode
//! or decode any argument type the same way. Each type maps to exactly
//! one primitive.

use crate::{BlobCfg, Cursor, Error, LenCfg, ReadCursor, WriteCursor};
use bytes::BytesMut;
use std::ffi::CStr;

/// Trait for types that can be written to a [WriteCursor].
pub trait Write {
    /// Encodes this value at the cursor's position.
    ///
    /// Returns [Error::Overflow] if it does not fit.
    fn write(&self, cursor: &mut WriteCursor<'_>) -> Result<(), Error>;
}

/// Trait for types whose encoded size is known before writing.
pub trait EncodeSize {
    /// Returns the number of bytes [Write::write] consumes, padding included.
    fn encode_size(&self) -> usize;
}

/// Trait for types that can be encoded.
pub trait Encode: Write + EncodeSize {
    /// Encodes into `buf` and returns the number of bytes written.
    fn encode_into(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut cursor = WriteCursor::new(buf);
        self.write(&mut cursor)?;
        Ok(cursor.consumed())
    }

    /// Encodes into a newly allocated buffer of exactly [EncodeSize::encode_size] bytes.
    ///
    /// Errors from `write` (such as a string containing NUL) are returned.
    /// Panics if `write` does not fill the buffer exactly.
    fn encode(&self) -> Result<BytesMut, Error> {
        let len = self.encode_size();
        let mut buffer = BytesMut::zeroed(len);
        let mut cursor = WriteCursor::new(&mut buffer[..]);
        self.write(&mut cursor)?;
        assert!(cursor.at_end(), "write() did not write expected bytes");
        Ok(buffer)
    }
}

impl<T: Write + EncodeSize> Encode for T {}

/// Trait for types that can be read from a [ReadCursor].
///
/// Decoded values may borrow from the buffer for `'a`.
pub trait Read<'a>: Sized {
    /// Configuration for reading, such as a length limit.
    type Cfg;

    /// Decodes a value at the cursor's position.
    fn read_cfg(cursor: &mut ReadCursor<'a>, cfg: &Self::Cfg) -> Result<Self, Error>;
}

/// Extension trait for reading with the default configuration.
pub trait ReadExt<'a>: Read<'a> {
    fn read(cursor: &mut ReadCursor<'a>) -> Result<Self, Error>;
}

impl<'a, T> ReadExt<'a> for T
where
    T: Read<'a>,
    T::Cfg: Default,
{
    fn read(cursor: &mut ReadCursor<'a>) -> Result<Self, Error> {
        T::read_cfg(cursor, &T::Cfg::default())
    }
}

/// Trait for types that can be decoded from a whole buffer.
pub trait Decode<'a>: Read<'a> {
    /// Decodes a value from `buf`, which must be consumed entirely.
    fn decode_cfg(buf: &'a [u8], cfg: &Self::Cfg) -> Result<Self, Error> {
        let mut cursor = ReadCursor::new(buf);
        let value = Self::read_cfg(&mut cursor, cfg)?;
        if !cursor.at_end() {
            return Err(Error::ExtraData(cursor.consumable()));
        }
        Ok(value)
    }
}

impl<'a, T: Read<'a>> Decode<'a> for T {}

/// Extension trait for decoding with the default configuration.
pub trait DecodeExt<'a>: Decode<'a> {
    fn decode(buf: &'a [u8]) -> Result<Self, Error>;
}

impl<'a, T> DecodeExt<'a> for T
where
    T: Decode<'a>,
    T::Cfg: Default,
{
    fn decode(buf: &'a [u8]) -> Result<Self, Error> {
        T::decode_cfg(buf, &T::Cfg::default())
    }
}

macro_rules! impl_scalar {
    ($type:ty, $size:expr, $put:ident, $get:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, cursor: &mut WriteCursor<'_>) -> Result<(), Error> {
                cursor.$put(*self)
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                $size
            }
        }

        impl<'a> Read<'a> for $type {
            type Cfg = ();

            #[inline]
            fn read_cfg(cursor: &mut ReadCursor<'a>, _: &()) -> Result<Self, Error> {
                cursor.$get()
            }
        }
    };
}

impl_scalar!(u8, 1, put_char, get_char);
impl_scalar!(i32, 4, put_int32, get_int32);
impl_scalar!(u64, 8, put_uint64, get_uint64);
impl_scalar!(f32, 4, put_float32, get_float32);

impl Write for &str {
    fn write(&self, cursor: &mut WriteCursor<'_>) -> Result<(), Error> {
        cursor.put_string(self)
    }
}

impl EncodeSize for &str {
    fn encode_size(&self) -> usize {
        Cursor::align(self.len() + 1)
    }
}

impl<'a> Read<'a> for &'a str {
    type Cfg = LenCfg;

    fn read_cfg(cursor: &mut ReadCursor<'a>, cfg: &LenCfg) -> Result<Self, Error> {
        let mut ahead = *cursor;
        let s = ahead.get_str()?;
        if !cfg.contains(s.len()) {
            return Err(Error::Parse("string length out of range"));
        }
        *cursor = ahead;
        Ok(s)
    }
}

impl Write for &CStr {
    fn write(&self, cursor: &mut WriteCursor<'_>) -> Result<(), Error> {
        cursor.put_cstr(self)
    }
}

impl EncodeSize for &CStr {
    fn encode_size(&self) -> usize {
        Cursor::align(self.to_bytes_with_nul().len())
    }
}

impl<'a> Read<'a> for &'a CStr {
    type Cfg = LenCfg;

    fn read_cfg(cursor: &mut ReadCursor<'a>, cfg: &LenCfg) -> Result<Self, Error> {
        let mut ahead = *cursor;
        let s = ahead.get_string()?;
        if !cfg.contains(s.to_bytes().len()) {
            return Err(Error::Parse("string length out of range"));
        }
        *cursor = ahead;
        Ok(s)
    }
}

impl Write for &[u8] {
    fn write(&self, cursor: &mut WriteCursor<'_>) -> Result<(), Error> {
        cursor.put_data(self)
    }
}

impl EncodeSize for &[u8] {
    fn encode_size(&self) -> usize {
        Cursor::align(self.len())
    }
}

impl<'a> Read<'a> for &'a [u8] {
    type Cfg = BlobCfg;

    fn read_cfg(cursor: &mut ReadCursor<'a>, cfg: &BlobCfg) -> Result<Self, Error> {
        cursor.get_data(cfg.0)
    }
}
