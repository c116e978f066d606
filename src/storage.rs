//! Flat slot array shared by the two domains.
//!
//! Addresses are always taken modulo `N`; out-of-range addresses alias onto
//! existing slots rather than being rejected. Storage itself does not know who
//! may touch which slot: the owning FIFO's full/empty protocol guarantees a
//! slot is never read while it is being written.

use core::cell::UnsafeCell;

fn cell_array<T: Copy, const N: usize>(init: T) -> [UnsafeCell<T>; N] {
    core::array::from_fn(|_| UnsafeCell::new(init))
}

pub struct Storage<T: Copy, const N: usize> {
    slots: [UnsafeCell<T>; N],
}

impl<T: Copy + Default, const N: usize> Storage<T, N> {
    pub fn new() -> Self {
        Self::filled(T::default())
    }
}

impl<T: Copy + Default, const N: usize> Default for Storage<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> Storage<T, N> {
    pub fn filled(value: T) -> Self {
        assert!(N > 0);
        Self {
            slots: cell_array::<T, N>(value),
        }
    }

    #[inline(always)]
    const fn slot(addr: usize) -> usize {
        addr % N
    }

    /// Store `value` at `addr mod N`.
    ///
    /// # Safety
    /// No other access to the same slot may happen concurrently.
    #[inline]
    pub unsafe fn write(&self, addr: usize, value: T) {
        unsafe { *self.slots[Self::slot(addr)].get() = value };
    }

    /// Read the value at `addr mod N`.
    ///
    /// # Safety
    /// No write to the same slot may happen concurrently.
    #[inline]
    pub unsafe fn read(&self, addr: usize) -> T {
        unsafe { *self.slots[Self::slot(addr)].get() }
    }

    /// Exclusive-access store.
    #[inline]
    pub fn set(&mut self, addr: usize, value: T) {
        *self.slots[Self::slot(addr)].get_mut() = value;
    }

    /// Read for single-owner users. Wrappers that share the array across
    /// threads must go through [`read`](Self::read) instead.
    #[inline]
    pub fn get(&self, addr: usize) -> T {
        // SAFETY: `Storage` is not `Sync`, so no other thread holds a
        // reference, and callers of `write` guarantee it never overlaps
        // another access to the same slot.
        unsafe { *self.slots[Self::slot(addr)].get() }
    }
}
