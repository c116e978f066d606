//! Step-accurate model of the dual-clock FIFO.
//!
//! Each domain advances only when its own `*_tick` is called. Positions cross
//! between domains as reflected codes through [`SyncChain`]s, `W2R` stages from
//! the write domain to the read domain and `R2W` stages back. A domain decides
//! full/empty from its own position and whatever its synchronizer currently
//! shows, so it never sees the other domain's live counter.
//!
//! Per tick, in order:
//! 1. evaluate the status from the current registers,
//! 2. perform the requested operation if the status allows it,
//! 3. drive the new local code into the outgoing chain,
//! 4. clock the incoming chain.
//!
//! Full is raised on the very push that fills the FIFO and is cleared only
//! once a newer read position has crossed `R2W` stages. Empty behaves the same
//! way in the other direction.

use crate::controller;
use crate::error::{Error, Result};
use crate::fmt::{debug, trace};
use crate::position::Position;
use crate::relay::SyncChain;
use crate::storage::Storage;

pub struct ClockedFifo<T: Copy, const N: usize, const W2R: usize = 2, const R2W: usize = 2> {
    storage: Storage<T, N>,
    write: Position<N>,
    read: Position<N>,
    /// Write position, write domain -> read domain.
    w2r: SyncChain<W2R>,
    /// Read position, read domain -> write domain.
    r2w: SyncChain<R2W>,
}

impl<T: Copy + Default, const N: usize, const W2R: usize, const R2W: usize>
    ClockedFifo<T, N, W2R, R2W>
{
    pub fn new() -> Self {
        let () = Position::<N>::VALID;
        Self {
            storage: Storage::new(),
            write: Position::ZERO,
            read: Position::ZERO,
            w2r: SyncChain::new(),
            r2w: SyncChain::new(),
        }
    }

    /// Start with `items` queued and every synchronizer stage already agreeing
    /// on the pre-loaded write position.
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
        fifo.write = Position::new(items.len());
        fifo.w2r = SyncChain::preloaded(fifo.write.to_code());
        Ok(fifo)
    }
}

impl<T: Copy + Default, const N: usize, const W2R: usize, const R2W: usize> Default
    for ClockedFifo<T, N, W2R, R2W>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize, const W2R: usize, const R2W: usize> ClockedFifo<T, N, W2R, R2W> {
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// One write-domain step. `Some(value)` requests a push; the return value
    /// says whether it was accepted.
    pub fn write_tick(&mut self, data: Option<T>) -> bool {
        let full = self.is_full();
        let accepted = match data {
            Some(value) if !full => {
                self.storage.set(self.write.index(), value);
                self.write = self.write.next();
                true
            }
            Some(_) => {
                trace!("write rejected, full at {}", self.write.raw());
                false
            }
            None => false,
        };
        self.w2r.push(self.write.to_code());
        self.r2w.clock();
        accepted
    }

    /// One read-domain step. With `pop` set, returns the element that was
    /// removed, or `None` if the FIFO looked empty.
    pub fn read_tick(&mut self, pop: bool) -> Option<T> {
        let empty = self.is_empty();
        let value = if pop && !empty {
            let value = self.storage.get(self.read.index());
            self.read = self.read.next();
            Some(value)
        } else {
            if pop {
                trace!("read rejected, empty at {}", self.read.raw());
            }
            None
        };
        self.r2w.push(self.read.to_code());
        self.w2r.clock();
        value
    }

    /// Write-domain status.
    #[inline]
    pub fn is_full(&self) -> bool {
        controller::is_full_code::<N>(self.write.to_code(), self.r2w.sample())
    }

    /// Read-domain status.
    #[inline]
    pub fn is_empty(&self) -> bool {
        controller::is_empty_code(self.read.to_code(), self.w2r.sample())
    }

    /// The element the next accepted read will return, visible as soon as the
    /// read domain stops reporting empty.
    pub fn front(&self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        Some(self.storage.get(self.read.index()))
    }

    /// Occupancy as the write domain sees it (never less than the truth).
    pub fn write_level(&self) -> usize {
        controller::occupancy(self.write, Position::from_code(self.r2w.sample()))
    }

    /// Occupancy as the read domain sees it (never more than the truth).
    pub fn read_level(&self) -> usize {
        controller::occupancy(Position::from_code(self.w2r.sample()), self.read)
    }

    #[inline]
    pub fn write_position(&self) -> Position<N> {
        self.write
    }

    #[inline]
    pub fn read_position(&self) -> Position<N> {
        self.read
    }

    /// Synchronizer depths, write-to-read then read-to-write.
    #[inline]
    pub const fn relay_stages(&self) -> (usize, usize) {
        (W2R, R2W)
    }

    /// Reset the write domain only. Until the read domain is reset as well
    /// the two sides disagree; the read side may report stale data.
    pub fn reset_write(&mut self) {
        self.write = Position::ZERO;
        self.w2r.reset_source();
        self.r2w.reset_destination();
        debug!("write domain reset");
    }

    /// Reset the read domain only. See [`reset_write`](Self::reset_write).
    pub fn reset_read(&mut self) {
        self.read = Position::ZERO;
        self.r2w.reset_source();
        self.w2r.reset_destination();
        debug!("read domain reset");
    }

    /// Reset both domains together: empty, never the pre-loaded state.
    pub fn reset(&mut self) {
        self.reset_write();
        self.reset_read();
    }
}
