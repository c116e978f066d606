//! Lock-free SPSC FIFO for two independently paced contexts.
//!
//! # Overview
//! - Single producer, single consumer, obtained together from [`Fifo::split`].
//! - Capacity `N` is a power of two; all `N` slots are usable.
//! - Each side owns one position counter and only ever reads the other side's
//!   counter through a relay: the producer publishes its write position, the
//!   consumer publishes its read position.
//! - Nothing blocks. A push into a full FIFO returns `false`, a pop from an
//!   empty FIFO returns `None`, and neither changes any state.
//!
//! # Memory ordering
//! The producer writes the slot, then publishes the new write position with
//! `Release`. The consumer loads it with `Acquire` before reading the slot, and
//! publishes its advanced read position with `Release` only after the read, so
//! the producer never reuses a slot that is still being read.
//!
//! # Staleness
//! Each handle keeps its last sample of the other side's position and only
//! reloads it when that sample says full (producer) or empty (consumer). A
//! stale sample can only under-report space or data, so the status predicates
//! stay conservative.

use crate::controller;
use crate::error::{Error, Result};
use crate::fmt::{debug, trace};
use crate::position::Position;
use crate::relay::AtomicRelay;
use crate::storage::Storage;

pub struct Fifo<T: Copy, const N: usize> {
    write_pos: AtomicRelay,
    read_pos: AtomicRelay,
    storage: Storage<T, N>,
}

unsafe impl<T: Copy + Send, const N: usize> Sync for Fifo<T, N> {}

impl<T: Copy + Default, const N: usize> Fifo<T, N> {
    pub fn new() -> Self {
        let () = Position::<N>::VALID;
        Self {
            write_pos: AtomicRelay::new(0),
            read_pos: AtomicRelay::new(0),
            storage: Storage::new(),
        }
    }

    /// Start with `items` already queued, oldest first. Intended for tests and
    /// deterministic bring-up; [`reset`](Self::reset) always returns to empty.
    pub fn with_contents(items: &[T]) -> Result<Self> {
        if items.len() > N {
            debug!("pre-load of {} rejected, capacity {}", items.len(), N);
            return Err(Error::PreloadOverflow {
                len: items.len(),
                capacity: N,
            });
        }
        let mut fifo = Self::new();
        for (addr, item) in items.iter().enumerate() {
            fifo.storage.set(addr, *item);
        }
        fifo.write_pos.set(Position::<N>::new(items.len()));
        Ok(fifo)
    }
}

impl<T: Copy + Default, const N: usize> Default for Fifo<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> Fifo<T, N> {
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Coordinated reset of both sides. Queued elements are discarded; slot
    /// contents are left as they are.
    pub fn reset(&mut self) {
        self.write_pos.set(Position::<N>::ZERO);
        self.read_pos.set(Position::<N>::ZERO);
        debug!("fifo reset, capacity {}", N);
    }

    /// Hand out the producer and consumer handles.
    ///
    /// Holding the exclusive borrow guarantees there is at most one of each.
    pub fn split(&mut self) -> (Producer<'_, T, N>, Consumer<'_, T, N>) {
        let fifo: &Self = self;
        let write = fifo.write_pos.own();
        let read = fifo.read_pos.own();
        (
            Producer {
                fifo,
                write,
                read_sync: read,
            },
            Consumer {
                fifo,
                read,
                write_sync: write,
            },
        )
    }
}

/// Write side of a [`Fifo`].
pub struct Producer<'a, T: Copy, const N: usize> {
    fifo: &'a Fifo<T, N>,
    write: Position<N>,
    read_sync: Position<N>,
}

impl<'a, T: Copy, const N: usize> Producer<'a, T, N> {
    /// Append `value`. Returns `false`, leaving everything untouched, if the
    /// FIFO is full.
    pub fn push(&mut self, value: T) -> bool {
        if controller::is_full(self.write, self.read_sync) {
            self.read_sync = self.fifo.read_pos.sample();
            if controller::is_full(self.write, self.read_sync) {
                trace!("push rejected, full at {}", self.write.raw());
                return false;
            }
        }

        // SAFETY: not full means the slot at `write` lies outside every
        // position the consumer may still read, and the consumer's read of
        // its previous occupant happened before it published `read_sync`.
        unsafe { self.fifo.storage.write(self.write.index(), value) };

        self.write = self.write.next();
        self.fifo.write_pos.publish(self.write);
        true
    }

    /// Full as seen from this side right now.
    #[inline]
    pub fn is_full(&self) -> bool {
        controller::is_full(self.write, self.fifo.read_pos.sample())
    }

    /// Free slots, never more than are actually free.
    #[inline]
    pub fn free(&self) -> usize {
        controller::vacancy(self.write, self.fifo.read_pos.sample())
    }

    #[inline]
    pub fn position(&self) -> Position<N> {
        self.write
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

/// Read side of a [`Fifo`].
pub struct Consumer<'a, T: Copy, const N: usize> {
    fifo: &'a Fifo<T, N>,
    read: Position<N>,
    write_sync: Position<N>,
}

impl<'a, T: Copy, const N: usize> Consumer<'a, T, N> {
    /// Remove and return the oldest element, or `None` if the FIFO is empty.
    pub fn pop(&mut self) -> Option<T> {
        let value = self.peek()?;
        self.read = self.read.next();
        self.fifo.read_pos.publish(self.read);
        Some(value)
    }

    /// The oldest element without removing it (first-word fall-through).
    pub fn peek(&mut self) -> Option<T> {
        if controller::is_empty(self.read, self.write_sync) {
            self.write_sync = self.fifo.write_pos.sample();
            if controller::is_empty(self.read, self.write_sync) {
                trace!("read rejected, empty at {}", self.read.raw());
                return None;
            }
        }

        // SAFETY: not empty means the producer finished writing this slot
        // before publishing `write_sync`, and will not touch it again until
        // we publish a read position past it.
        Some(unsafe { self.fifo.storage.read(self.read.index()) })
    }

    /// Empty as seen from this side right now.
    #[inline]
    pub fn is_empty(&self) -> bool {
        controller::is_empty(self.read, self.fifo.write_pos.sample())
    }

    /// Queued elements, never more than are actually queued.
    #[inline]
    pub fn available(&self) -> usize {
        controller::occupancy(self.fifo.write_pos.sample(), self.read)
    }

    #[inline]
    pub fn position(&self) -> Position<N> {
        self.read
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::Fifo;
    use crate::error::Error;
    use crate::position::Position;
    use std::collections::VecDeque;
    use std::vec::Vec;

    #[test]
    fn fills_rejects_and_drains_in_order() {
        let mut fifo = Fifo::<u32, 4>::new();
        let (mut tx, mut rx) = fifo.split();

        for v in [10, 20, 30, 40] {
            assert!(!tx.is_full());
            assert!(tx.push(v));
        }
        assert!(tx.is_full());
        assert!(!tx.push(50));
        assert_eq!(tx.position(), Position::new(4));

        let mut seen = Vec::new();
        for _ in 0..4 {
            assert!(!rx.is_empty());
            seen.push(rx.pop().unwrap());
        }
        assert_eq!(seen, [10, 20, 30, 40]);
        assert!(rx.is_empty());
        assert_eq!(rx.pop(), None);
    }

    #[test]
    fn rejected_operations_change_nothing() {
        let mut fifo = Fifo::<u8, 2>::new();
        let (mut tx, mut rx) = fifo.split();

        for _ in 0..3 {
            assert_eq!(rx.pop(), None);
        }
        assert_eq!(rx.position(), Position::ZERO);

        assert!(tx.push(1));
        assert!(tx.push(2));
        for v in 3..10 {
            assert!(!tx.push(v));
        }
        assert_eq!(tx.position(), Position::new(2));
        assert_eq!(rx.pop(), Some(1));
        assert_eq!(rx.pop(), Some(2));
        assert_eq!(rx.pop(), None);
    }

    #[test]
    fn peek_exposes_head_without_consuming() {
        let mut fifo = Fifo::<u16, 4>::new();
        let (mut tx, mut rx) = fifo.split();

        assert_eq!(rx.peek(), None);
        tx.push(7);
        tx.push(8);
        assert_eq!(rx.peek(), Some(7));
        assert_eq!(rx.peek(), Some(7));
        assert_eq!(rx.available(), 2);
        assert_eq!(rx.pop(), Some(7));
        assert_eq!(rx.peek(), Some(8));
    }

    #[test]
    fn producer_sees_space_after_consumer_pops() {
        let mut fifo = Fifo::<u32, 4>::new();
        let (mut tx, mut rx) = fifo.split();

        for v in 0..4 {
            tx.push(v);
        }
        assert_eq!(tx.free(), 0);
        assert_eq!(rx.pop(), Some(0));
        assert_eq!(tx.free(), 1);
        assert!(tx.push(4));
        assert!(!tx.push(5));

        let drained: Vec<u32> = core::iter::from_fn(|| rx.pop()).collect();
        assert_eq!(drained, [1, 2, 3, 4]);
    }

    #[test]
    fn random_interleaving_preserves_order() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let mut fifo = Fifo::<u64, 8>::new();
        let (mut tx, mut rx) = fifo.split();
        let mut model = VecDeque::new();
        let mut next = 0u64;

        for _ in 0..10_000 {
            if rng.bool() {
                let accepted = tx.push(next);
                assert_eq!(accepted, model.len() < 8);
                if accepted {
                    model.push_back(next);
                    next += 1;
                }
            } else {
                assert_eq!(rx.pop(), model.pop_front());
            }
            assert!(!(tx.is_full() && rx.is_empty()));
            assert_eq!(rx.available(), model.len());
        }
    }

    #[test]
    fn preloaded_contents_pop_first() {
        let mut fifo = Fifo::<u8, 4>::with_contents(&[1, 2, 3]).unwrap();
        let (mut tx, mut rx) = fifo.split();

        assert!(tx.push(4));
        assert!(tx.is_full());
        let drained: Vec<u8> = core::iter::from_fn(|| rx.pop()).collect();
        assert_eq!(drained, [1, 2, 3, 4]);
    }

    #[test]
    fn preload_of_full_capacity_starts_full() {
        let mut fifo = Fifo::<u8, 2>::with_contents(&[5, 6]).unwrap();
        let (tx, rx) = fifo.split();
        assert!(tx.is_full());
        assert!(!rx.is_empty());
    }

    #[test]
    fn preload_overflow_is_an_error() {
        let err = Fifo::<u8, 2>::with_contents(&[1, 2, 3]).err();
        assert_eq!(
            err,
            Some(Error::PreloadOverflow {
                len: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn reset_returns_to_empty_not_to_preload() {
        let mut fifo = Fifo::<u8, 4>::with_contents(&[1, 2]).unwrap();
        {
            let (mut tx, _) = fifo.split();
            tx.push(3);
        }
        fifo.reset();

        let (mut tx, mut rx) = fifo.split();
        assert!(rx.is_empty());
        assert_eq!(rx.pop(), None);
        assert!(tx.push(9));
        assert_eq!(rx.pop(), Some(9));
    }

    #[test]
    fn handles_resume_from_published_positions() {
        let mut fifo = Fifo::<u32, 4>::new();
        {
            let (mut tx, mut rx) = fifo.split();
            for v in 0..3 {
                tx.push(v);
            }
            rx.pop();
        }

        let (tx, mut rx) = fifo.split();
        assert_eq!(tx.position(), Position::new(3));
        assert_eq!(rx.position(), Position::new(1));
        assert_eq!(rx.pop(), Some(1));
    }

    #[test]
    fn wraps_many_laps() {
        let mut fifo = Fifo::<u32, 1>::new();
        let (mut tx, mut rx) = fifo.split();
        for v in 0..100 {
            assert!(tx.push(v));
            assert!(tx.is_full());
            assert!(!tx.push(v + 1000));
            assert_eq!(rx.pop(), Some(v));
            assert!(rx.is_empty());
        }
    }
}
