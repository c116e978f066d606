//! Relays carrying a position from the domain that owns it to the domain that
//! only observes it.
//!
//! [`SyncChain`] is the stepped model: a source-owned head register followed by
//! `S` stages clocked by the destination. [`AtomicRelay`] is the threaded form:
//! one word written with `Release` by its owner and read with `Acquire` by the
//! observer, so everything the owner wrote before publishing (slot contents)
//! is visible once the published position is.

use crossbeam_utils::CachePadded;

use crate::atomic::{AtomicUsize, Ordering};
use crate::gray::ReflectedCode;
use crate::position::Position;

/// `S`-stage synchronizer for reflected codes.
///
/// `S == 0` is a same-domain passthrough: `sample()` returns the head.
#[derive(Clone, Debug)]
pub struct SyncChain<const S: usize> {
    head: ReflectedCode,
    stages: [ReflectedCode; S],
}

impl<const S: usize> SyncChain<S> {
    pub const fn new() -> Self {
        Self::preloaded(ReflectedCode::ZERO)
    }

    /// Chain whose every register already holds `code`.
    pub const fn preloaded(code: ReflectedCode) -> Self {
        Self {
            head: code,
            stages: [code; S],
        }
    }

    /// Source domain: drive the head register.
    #[inline]
    pub fn push(&mut self, code: ReflectedCode) {
        self.head = code;
    }

    /// Destination domain: advance every stage by one.
    #[inline]
    pub fn clock(&mut self) {
        if S > 0 {
            self.stages.rotate_right(1);
        }
        if let Some(first) = self.stages.first_mut() {
            *first = self.head;
        }
    }

    /// Destination domain: the value currently visible at the tail.
    #[inline]
    pub fn sample(&self) -> ReflectedCode {
        match self.stages.last() {
            Some(tail) => *tail,
            None => self.head,
        }
    }

    /// The code most recently pushed by the source.
    #[inline]
    pub fn head(&self) -> ReflectedCode {
        self.head
    }

    /// Source-domain reset.
    pub fn reset_source(&mut self) {
        self.head = ReflectedCode::ZERO;
    }

    /// Destination-domain reset.
    pub fn reset_destination(&mut self) {
        self.stages = [ReflectedCode::ZERO; S];
    }
}

impl<const S: usize> Default for SyncChain<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-writer, single-reader position word.
pub(crate) struct AtomicRelay {
    word: CachePadded<AtomicUsize>,
}

impl AtomicRelay {
    pub(crate) fn new(raw: usize) -> Self {
        Self {
            word: CachePadded::new(AtomicUsize::new(raw)),
        }
    }

    /// Owner side: make `pos` and every write before it visible.
    #[inline]
    pub(crate) fn publish<const N: usize>(&self, pos: Position<N>) {
        self.word.store(pos.raw(), Ordering::Release);
    }

    /// Observer side.
    #[inline]
    pub(crate) fn sample<const N: usize>(&self) -> Position<N> {
        Position::new(self.word.load(Ordering::Acquire))
    }

    /// Owner side, re-reading its own word.
    #[inline]
    pub(crate) fn own<const N: usize>(&self) -> Position<N> {
        Position::new(self.word.load(Ordering::Relaxed))
    }

    pub(crate) fn set<const N: usize>(&mut self, pos: Position<N>) {
        *self.word.get_mut() = pos.raw();
    }
}
