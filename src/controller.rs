//! Full/empty decision algebra.
//!
//! Each domain decides using only its own position and a relayed, possibly
//! stale, copy of the other domain's position. A stale copy can only lag, so
//! `full` may be reported while space has already been freed and `empty` may
//! be reported while an element has already landed, never the reverse.
//!
//! The binary form is used where positions cross domains as whole words
//! (atomics). The reflected form is the same test expressed on Gray codes,
//! used where positions cross bit by bit.

use crate::gray::ReflectedCode;
use crate::position::Position;

/// The writer is exactly one lap ahead of the (relayed) reader.
#[inline]
pub const fn is_full<const N: usize>(write: Position<N>, read_sync: Position<N>) -> bool {
    write.raw() == read_sync.opposite().raw()
}

/// The reader has caught up with the (relayed) writer.
#[inline]
pub const fn is_empty<const N: usize>(read: Position<N>, write_sync: Position<N>) -> bool {
    read.raw() == write_sync.raw()
}

/// [`is_full`] on reflected codes: equal except for the top two bits.
#[inline]
pub const fn is_full_code<const N: usize>(write: ReflectedCode, read_sync: ReflectedCode) -> bool {
    write.bits() == read_sync.flip(Position::<N>::WRAP_MASK).bits()
}

/// [`is_empty`] on reflected codes.
#[inline]
pub const fn is_empty_code(read: ReflectedCode, write_sync: ReflectedCode) -> bool {
    read.bits() == write_sync.bits()
}

/// Elements between `read` and `write` (0..=N when the invariant holds).
#[inline]
pub const fn occupancy<const N: usize>(write: Position<N>, read: Position<N>) -> usize {
    write.distance(read)
}

/// Free slots between `write` and `read`, saturating at zero when a transient
/// (e.g. an uncoordinated reset) breaks the occupancy invariant.
#[inline]
pub const fn vacancy<const N: usize>(write: Position<N>, read: Position<N>) -> usize {
    N.saturating_sub(occupancy(write, read))
}
