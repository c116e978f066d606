//! Dual-domain FIFO primitives for no-std embedded targets.
//!
//! # Highlights
//! - Lock-free SPSC FIFO between two independently paced contexts (threads,
//!   interrupt handlers, cores).
//! - Power-of-two capacity, all slots usable: positions carry one extra wrap
//!   bit so full and empty are told apart without a separate counter.
//! - No allocation, no dynamic dispatch, no read-modify-write atomics.
//! - A step-accurate dual-clock model ([`ClockedFifo`]) with reflected-code
//!   synchronizers for checking latency and reset behaviour.
//!
//! # Quick start
//! ```
//! use ph_async_fifo::Fifo;
//!
//! let mut fifo = Fifo::<u32, 4>::new();
//! let (mut producer, mut consumer) = fifo.split();
//!
//! assert!(producer.push(42));
//! assert_eq!(consumer.peek(), Some(42));
//! assert_eq!(consumer.pop(), Some(42));
//! assert_eq!(consumer.pop(), None);
//! ```
//!
//! # No-std
//! The crate is `#![no_std]`. Tests require `std`.
//!
//! # Safety and concurrency
//! [`Fifo::split`] borrows the FIFO exclusively, so at most one producer and one
//! consumer exist at a time. Each side writes only its own position and reads
//! the other's through an acquire load; slots are protected by the full/empty
//! protocol, not by a lock.
//!
//! # Semantics
//! - `push` returns `false` and changes nothing when the FIFO is full.
//! - `pop`/`peek` return `None` and change nothing when the FIFO is empty.
//! - Each side's status may lag the other side's progress, but only towards
//!   "full" for the producer and "empty" for the consumer.
//!
//! # Features
//! - `portable-atomic*`: use `portable-atomic` for the position words.
//! - `defmt`: trace rejected operations, resets and pre-loads.
#![no_std]

mod atomic;
mod fmt;

pub mod clocked;
pub mod controller;
pub mod error;
pub mod fifo;
pub mod gray;
pub mod position;
pub mod relay;
pub mod storage;

pub use clocked::ClockedFifo;
pub use error::{Error, Result};
pub use fifo::{Consumer, Fifo, Producer};
pub use gray::ReflectedCode;
pub use position::Position;
pub use relay::SyncChain;
pub use storage::Storage;

#[cfg(test)]
extern crate std;
