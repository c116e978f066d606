//! Reflected-binary (Gray) code.
//!
//! Codes for consecutive integers differ in exactly one bit, so a sampler that
//! catches an update mid-flight sees either the old or the new code, never a
//! mix of the two. Codes are only a wire format between domains; addressing and
//! arithmetic always use the plain binary value.

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReflectedCode(usize);

impl ReflectedCode {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn encode(value: usize) -> Self {
        Self(value ^ (value >> 1))
    }

    /// Inverse of [`encode`](Self::encode): prefix XOR over all bits.
    #[inline]
    pub const fn decode(self) -> usize {
        let mut value = self.0;
        let mut shift = 1;
        while shift < usize::BITS {
            value ^= value >> shift;
            shift <<= 1;
        }
        value
    }

    #[inline]
    pub const fn bits(self) -> usize {
        self.0
    }

    /// Invert the bits selected by `mask`.
    #[inline]
    #[must_use]
    pub const fn flip(self, mask: usize) -> Self {
        Self(self.0 ^ mask)
    }

    /// Number of bit positions in which the two codes differ.
    #[inline]
    pub const fn hamming(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}
