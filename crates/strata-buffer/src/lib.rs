// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Byte buffers with three storage strategies behind one capability trait.
//!
//! # Buffer Kinds
//!
//! ## ConstraintBuffer ([`BufferKind::Fixed`])
//!
//! - Single allocation, exclusively owned
//! - Length fixed at initialization; updates must fit
//! - Append/insert refused; concatenation allocates a new buffer
//!
//! ## DynamicBuffer ([`BufferKind::Growable`])
//!
//! - Resizable, exclusively owned
//! - Append, insert, and updates past the end extend the length
//! - Concatenation grows the receiver in place
//!
//! ## StreamingBuffer ([`BufferKind::SharedCursor`])
//!
//! - Fixed length, storage reference-counted across clones
//! - Updates through one clone are visible through all of them
//! - Implements [`Streaming`] (tell/read/seek/EOF/close) over a per-clone cursor
//!
//! Every kind keeps one zero byte past the logical end, reachable through
//! [`Buffer::open_raw`].
//!
//! # Errors
//!
//! All fallible operations return [`BufferError`]. Only
//! [`BufferError::OutOfRange`] (indexed access past the end) is
//! [`Severity::Hard`]; everything else is a soft refusal that leaves the
//! buffer untouched.
//!
//! # Example
//!
//! ```rust
//! use strata_buffer::{Buffer, BufferError, BufferKind, SeekMode, create_from};
//!
//! fn example() -> Result<(), BufferError> {
//!     let fixed = create_from(BufferKind::Fixed, b"abcdef");
//!
//!     // Fixed buffers never grow.
//!     assert!(fixed.borrow_mut().append(b"gh").is_err());
//!     assert!(fixed.borrow_mut().update(4, b"xyz").is_err());
//!     fixed.borrow_mut().update(4, b"xy")?;
//!     assert_eq!(fixed.borrow().to_vec(), b"abcdxy");
//!
//!     // Shared-cursor buffers stream.
//!     let source = create_from(BufferKind::SharedCursor, b"0123456789");
//!     let mut dst = strata_buffer::ConstraintBuffer::filled(4, 0);
//!     let mut source = source.borrow_mut();
//!     let stream = source.as_streaming().ok_or(BufferError::Released)?;
//!
//!     stream.seek(-4, SeekMode::End)?;
//!     assert_eq!(stream.read(&mut dst, 8), 4);
//!     assert!(stream.is_eof());
//!     assert_eq!(dst.as_slice(), b"6789");
//!
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Threading
//!
//! The crate is single-threaded. [`StreamingBuffer`] and [`BufferRef`] are
//! built on `Rc`/`RefCell` and are therefore neither `Send` nor `Sync`.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod constraint_buffer;
mod dynamic_buffer;
mod error;
mod factory;
mod kind;
mod storage;
mod streaming;
mod streaming_buffer;
mod traits;

pub use constraint_buffer::ConstraintBuffer;
pub use dynamic_buffer::DynamicBuffer;
pub use error::{BufferError, Severity};
pub use factory::{
    BufferRef, concat, concat_byte, create_boxed_filled, create_boxed_from, create_filled,
    create_from,
};
pub use kind::{BufferKind, ParseKindError};
pub use storage::{ExclusiveStore, SharedStore};
pub use streaming::{SeekMode, Streaming};
pub use streaming_buffer::StreamingBuffer;
pub use traits::{Buffer, Concatenated};
