//! Position tracking over a fixed buffer extent.
//!
//! A [Cursor] knows nothing about the bytes it walks over. It holds the
//! extent `[begin, end)` as offsets into a borrowed buffer, plus a
//! position `pos` with `begin <= pos <= end`. [crate::WriteCursor] and
//! [crate::ReadCursor] pair a [Cursor] with the buffer itself.

use crate::Error;
use tracing::trace;

/// An extent `[begin, end)` and a position within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    begin: usize,
    end: usize,
    pos: usize,
}

impl Cursor {
    /// Creates a cursor spanning a buffer of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            begin: 0,
            end: size,
            pos: 0,
        }
    }

    /// Creates a cursor over the `size` bytes following `parent`'s position.
    ///
    /// Returns [Error::Underrun] if the region would extend past `parent`'s end.
    pub fn sub(parent: &Cursor, size: usize) -> Result<Self, Error> {
        if size > parent.consumable() {
            trace!(
                size,
                consumable = parent.consumable(),
                "sub-cursor exceeds parent"
            );
            return Err(Error::Underrun);
        }
        Ok(Self {
            begin: parent.pos,
            end: parent.pos + size,
            pos: parent.pos,
        })
    }

    /// Creates a cursor over everything `parent` has left to consume.
    pub fn rest(parent: &Cursor) -> Self {
        Self {
            begin: parent.pos,
            end: parent.end,
            pos: parent.pos,
        }
    }

    /// Moves the position back to the start of the extent.
    pub fn reset(&mut self) {
        self.pos = self.begin;
    }

    /// Offset of the start of the extent.
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Offset one past the end of the extent.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Current offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the position to the absolute offset `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not inside `[begin, end)`.
    pub fn set_pos(&mut self, pos: usize) {
        assert!(
            pos >= self.begin && pos < self.end,
            "position {pos} outside [{}, {})",
            self.begin,
            self.end
        );
        self.pos = pos;
    }

    /// Moves the position forward by `n` bytes.
    ///
    /// Callers must have checked that `n <= consumable()`.
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.consumable());
        self.pos += n;
    }

    /// Total size of the extent.
    pub fn capacity(&self) -> usize {
        self.end - self.begin
    }

    /// Whether the whole extent has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos == self.end
    }

    /// Number of bytes between `begin` and the position.
    pub fn consumed(&self) -> usize {
        self.pos - self.begin
    }

    /// Number of bytes between the position and `end`.
    pub fn consumable(&self) -> usize {
        self.end - self.pos
    }

    /// Whether `n` is a multiple of 4.
    #[inline]
    pub const fn is_aligned(n: usize) -> bool {
        n & 3 == 0
    }

    /// Rounds `n` up to the next multiple of 4.
    #[inline]
    pub const fn align(n: usize) -> usize {
        (n + 3) & !3
    }

    /// Number of bytes needed to pad `n` to the next multiple of 4.
    #[inline]
    pub const fn padding(n: usize) -> usize {
        Self::align(n) - n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let cursor = Cursor::new(16);
        assert_eq!(cursor.begin(), 0);
        assert_eq!(cursor.end(), 16);
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.capacity(), 16);
        assert_eq!(cursor.consumed(), 0);
        assert_eq!(cursor.consumable(), 16);
        assert!(!cursor.at_end());

        assert!(Cursor::new(0).at_end());
    }

    #[test]
    fn test_advance_and_reset() {
        let mut cursor = Cursor::new(8);
        cursor.advance(3);
        assert_eq!(cursor.consumed(), 3);
        assert_eq!(cursor.consumable(), 5);
        cursor.advance(5);
        assert!(cursor.at_end());
        cursor.reset();
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.consumable(), 8);
    }

    #[test]
    fn test_align() {
        for n in 0..64usize {
            let aligned = Cursor::align(n);
            assert_eq!(aligned % 4, 0);
            assert!(aligned >= n);
            assert_eq!(aligned - n, Cursor::padding(n));
            assert!(Cursor::padding(n) < 4);
            assert_eq!(Cursor::is_aligned(n), n % 4 == 0);
        }
        assert_eq!(Cursor::align(0), 0);
        assert_eq!(Cursor::align(1), 4);
        assert_eq!(Cursor::align(4), 4);
        assert_eq!(Cursor::align(5), 8);
        assert_eq!(Cursor::padding(6), 2);
    }

    #[test]
    fn test_sub() {
        let mut parent = Cursor::new(16);
        parent.advance(4);

        let mut child = Cursor::sub(&parent, 8).unwrap();
        assert_eq!(child.begin(), 4);
        assert_eq!(child.end(), 12);
        assert_eq!(child.consumed(), 0);
        assert_eq!(child.capacity(), 8);

        // Advancing the child leaves the parent untouched
        child.advance(8);
        assert!(child.at_end());
        assert_eq!(parent.pos(), 4);

        // Exactly the remaining extent is allowed
        assert!(Cursor::sub(&parent, 12).is_ok());
        assert_eq!(Cursor::sub(&parent, 13), Err(Error::Underrun));
        assert_eq!(Cursor::sub(&parent, usize::MAX), Err(Error::Underrun));
    }

    #[test]
    fn test_rest() {
        let mut parent = Cursor::new(10);
        parent.advance(6);
        let child = Cursor::rest(&parent);
        assert_eq!(child.begin(), 6);
        assert_eq!(child.end(), 10);
        assert_eq!(child.consumable(), 4);
    }

    #[test]
    fn test_set_pos() {
        let mut parent = Cursor::new(16);
        parent.advance(4);
        let mut child = Cursor::sub(&parent, 8).unwrap();
        child.set_pos(10);
        assert_eq!(child.consumed(), 6);
        child.set_pos(4);
        assert_eq!(child.consumed(), 0);
    }

    #[test]
    #[should_panic(expected = "position 12 outside [4, 12)")]
    fn test_set_pos_out_of_range() {
        let mut parent = Cursor::new(16);
        parent.advance(4);
        let mut child = Cursor::sub(&parent, 8).unwrap();
        child.set_pos(12);
    }
}
