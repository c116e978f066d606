//! Wrap-bit position counters.
//!
//! A position for a FIFO of capacity `N` carries one bit more than addressing
//! needs: it counts modulo `2N`. The low bits address a slot, the extra bit
//! records which lap the counter is on, so "caught up" (same lap) and "one
//! full lap ahead" compare differently even though both address the same slot.

use crate::gray::ReflectedCode;

/// Position counter modulo `2N`. `N` must be a power of two.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position<const N: usize> {
    raw: usize,
}

impl<const N: usize> Position<N> {
    pub(crate) const VALID: () = assert!(
        N.is_power_of_two() && N <= usize::MAX / 2 + 1,
        "capacity must be a power of two no larger than half the address space"
    );

    /// Mask over the `k + 1` counter bits.
    pub const MASK: usize = N.wrapping_mul(2).wrapping_sub(1);

    /// The two most significant counter bits. Flipping them in a reflected
    /// code maps a position onto the code of the position one lap ahead.
    pub const WRAP_MASK: usize = N | (N >> 1);

    pub const ZERO: Self = Self { raw: 0 };

    /// Build a position from a raw counter value, reduced modulo `2N`.
    #[inline]
    pub const fn new(raw: usize) -> Self {
        let () = Self::VALID;
        Self {
            raw: raw & Self::MASK,
        }
    }

    #[inline]
    pub const fn raw(self) -> usize {
        self.raw
    }

    /// Slot address (counter modulo `N`).
    #[inline]
    pub const fn index(self) -> usize {
        self.raw & (N - 1)
    }

    /// The extra wrap bit.
    #[inline]
    pub const fn lap(self) -> bool {
        self.raw & N != 0
    }

    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.raw.wrapping_add(1))
    }

    /// Same slot, other lap.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self { raw: self.raw ^ N }
    }

    /// How far `self` is ahead of `older`, modulo `2N`.
    #[inline]
    pub const fn distance(self, older: Self) -> usize {
        self.raw.wrapping_sub(older.raw) & Self::MASK
    }

    #[inline]
    pub const fn to_code(self) -> ReflectedCode {
        ReflectedCode::encode(self.raw)
    }

    #[inline]
    pub const fn from_code(code: ReflectedCode) -> Self {
        Self::new(code.decode())
    }
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn wraps_modulo_twice_capacity() {
        let mut p = Position::<4>::ZERO;
        for _ in 0..8 {
            p = p.next();
        }
        assert_eq!(p, Position::ZERO);
        assert_eq!(Position::<4>::new(13).raw(), 5);
    }

    #[test]
    fn index_ignores_lap() {
        let a = Position::<4>::new(1);
        let b = Position::<4>::new(5);
        assert_eq!(a.index(), b.index());
        assert!(!a.lap());
        assert!(b.lap());
        assert_eq!(a.opposite(), b);
    }

    #[test]
    fn distance_covers_zero_through_capacity() {
        let r = Position::<4>::new(6);
        for d in 0..=4 {
            let w = Position::<4>::new(6 + d);
            assert_eq!(w.distance(r), d);
        }
    }

    #[test]
    fn masks_for_small_capacities() {
        assert_eq!(Position::<1>::MASK, 0b1);
        assert_eq!(Position::<1>::WRAP_MASK, 0b1);
        assert_eq!(Position::<2>::WRAP_MASK, 0b11);
        assert_eq!(Position::<8>::MASK, 0b1111);
        assert_eq!(Position::<8>::WRAP_MASK, 0b1100);
    }

    #[test]
    fn code_round_trips_through_counter_width() {
        for raw in 0..16 {
            let p = Position::<8>::new(raw);
            assert_eq!(Position::from_code(p.to_code()), p);
        }
    }

    #[test]
    fn flipping_top_bits_of_code_is_one_lap_ahead() {
        for raw in 0..16 {
            let p = Position::<8>::new(raw);
            assert_eq!(
                p.to_code().flip(Position::<8>::WRAP_MASK),
                p.opposite().to_code()
            );
        }
    }
}
