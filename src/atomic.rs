//! Atomic backend selection.
//!
//! Targets without native atomic loads/stores of `usize` can enable one of the
//! `portable-atomic*` features.

#[cfg(not(feature = "portable-atomic"))]
pub(crate) use core::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "portable-atomic")]
pub(crate) use portable_atomic::{AtomicUsize, Ordering};
