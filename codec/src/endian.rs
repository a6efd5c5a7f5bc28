//! Byte-order conversion between host and network representation.
//!
//! OSC mandates big-endian ("network") byte order for every multi-byte
//! value on the wire. The conversions here are total and symmetric:
//! converting a value twice yields the original value. On a big-endian
//! host they are the identity.

/// The layout of a multi-byte value in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    /// Byte order of the compilation target.
    #[cfg(target_endian = "big")]
    pub const HOST: Endian = Endian::Big;

    /// Byte order of the compilation target.
    #[cfg(target_endian = "little")]
    pub const HOST: Endian = Endian::Little;

    /// Byte order used on the wire.
    pub const NETWORK: Endian = Endian::Big;
}

/// Values whose byte order can be converted between host and a target order.
pub trait Convert: Copy {
    /// Reverses the byte order of the value.
    fn swap(self) -> Self;

    /// Converts between host order and `order`.
    ///
    /// The same call converts in both directions.
    #[inline]
    fn convert(self, order: Endian) -> Self {
        if order == Endian::HOST {
            self
        } else {
            self.swap()
        }
    }
}

macro_rules! impl_convert {
    ($type:ty) => {
        impl Convert for $type {
            #[inline]
            fn swap(self) -> Self {
                self.swap_bytes()
            }
        }
    };
}

impl_convert!(u32);
impl_convert!(i32);
impl_convert!(u64);
impl_convert!(i64);

/// Converts a 32-bit value between host order and `order`.
#[inline]
pub fn convert32(x: u32, order: Endian) -> u32 {
    x.convert(order)
}

/// Converts a 64-bit value between host order and `order`.
#[inline]
pub fn convert64(x: u64, order: Endian) -> u64 {
    x.convert(order)
}

/// Converts a host 32-bit value to network order.
#[inline]
pub fn to_network32(x: u32) -> u32 {
    convert32(x, Endian::NETWORK)
}

/// Converts a network-order 32-bit value to host order.
#[inline]
pub fn from_network32(x: u32) -> u32 {
    convert32(x, Endian::NETWORK)
}

/// Converts a host 64-bit value to network order.
#[inline]
pub fn to_network64(x: u64) -> u64 {
    convert64(x, Endian::NETWORK)
}

/// Converts a network-order 64-bit value to host order.
#[inline]
pub fn from_network64(x: u64) -> u64 {
    convert64(x, Endian::NETWORK)
}
