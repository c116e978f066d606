//! Construction errors.
//!
//! Run-time capacity violations (push while full, pop while empty) are not
//! errors: they are reported through the `bool`/`Option` returned by the
//! operation and leave the FIFO untouched.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// More initial elements were supplied than the FIFO can hold.
    PreloadOverflow { len: usize, capacity: usize },
}

pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PreloadOverflow { len, capacity } => write!(
                f,
                "cannot pre-load {len} elements into a FIFO of capacity {capacity}"
            ),
        }
    }
}

impl core::error::Error for Error {}
