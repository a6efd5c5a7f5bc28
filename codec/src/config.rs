//! Types for use as [crate::Read::Cfg].

use core::ops::{Bound, RangeBounds};

/// Limits the accepted length of a decoded string, in bytes, excluding
/// the terminator.
///
/// Decoding untrusted packets with a bound rejects oversized strings
/// before the caller ever sees them.
///
/// # Examples
///
/// ```
/// use osc_codec::LenCfg;
///
/// let cfg = LenCfg::from(1..=64);
/// assert!(cfg.contains(32));
/// assert!(!cfg.contains(0));
/// assert!(LenCfg::default().contains(usize::MAX));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LenCfg {
    start: Bound<usize>,
    end: Bound<usize>,
}

impl LenCfg {
    /// Creates a limit from any range of lengths.
    pub fn new(r: impl RangeBounds<usize>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Returns true if `len` is accepted.
    pub fn contains(&self, len: usize) -> bool {
        let above_start = match self.start {
            Bound::Included(s) => len >= s,
            Bound::Excluded(s) => len > s,
            Bound::Unbounded => true,
        };
        let below_end = match self.end {
            Bound::Included(e) => len <= e,
            Bound::Excluded(e) => len < e,
            Bound::Unbounded => true,
        };
        above_start && below_end
    }
}

impl Default for LenCfg {
    fn default() -> Self {
        Self::new(..)
    }
}

macro_rules! impl_from_range {
    ($range:ty) => {
        impl From<$range> for LenCfg {
            fn from(r: $range) -> Self {
                Self::new(r)
            }
        }
    };
}

impl_from_range!(core::ops::Range<usize>);
impl_from_range!(core::ops::RangeInclusive<usize>);
impl_from_range!(core::ops::RangeFrom<usize>);
impl_from_range!(core::ops::RangeTo<usize>);
impl_from_range!(core::ops::RangeToInclusive<usize>);
impl_from_range!(core::ops::RangeFull);

/// Size of a blob, which OSC carries out-of-band (usually as a preceding
/// int32) rather than next to the data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct BlobCfg(pub usize);
