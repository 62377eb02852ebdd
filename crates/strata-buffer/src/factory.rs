// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Construction by kind, and concatenation over shared handles.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::constraint_buffer::ConstraintBuffer;
use crate::dynamic_buffer::DynamicBuffer;
use crate::error::BufferError;
use crate::kind::BufferKind;
use crate::streaming_buffer::StreamingBuffer;
use crate::traits::{Buffer, Concatenated};

/// Shared-ownership handle to a buffer of any kind.
pub type BufferRef = Rc<RefCell<dyn Buffer>>;

fn into_ref<B: Buffer + 'static>(buffer: B) -> BufferRef {
    Rc::new(RefCell::new(buffer))
}

/// Creates a buffer of `kind` with `len` bytes set to `fill`.
pub fn create_filled(kind: BufferKind, len: usize, fill: u8) -> BufferRef {
    match kind {
        BufferKind::Fixed => into_ref(ConstraintBuffer::filled(len, fill)),
        BufferKind::Growable => into_ref(DynamicBuffer::filled(len, fill)),
        BufferKind::SharedCursor => into_ref(StreamingBuffer::filled(len, fill)),
    }
}

/// Creates a buffer of `kind` holding a copy of `src`.
pub fn create_from(kind: BufferKind, src: &[u8]) -> BufferRef {
    match kind {
        BufferKind::Fixed => into_ref(ConstraintBuffer::from_slice(src)),
        BufferKind::Growable => into_ref(DynamicBuffer::from_slice(src)),
        BufferKind::SharedCursor => into_ref(StreamingBuffer::from_slice(src)),
    }
}

/// Like [`create_filled`], for callers that want exclusive ownership.
pub fn create_boxed_filled(kind: BufferKind, len: usize, fill: u8) -> Box<dyn Buffer> {
    match kind {
        BufferKind::Fixed => Box::new(ConstraintBuffer::filled(len, fill)),
        BufferKind::Growable => Box::new(DynamicBuffer::filled(len, fill)),
        BufferKind::SharedCursor => Box::new(StreamingBuffer::filled(len, fill)),
    }
}

/// Like [`create_from`], for callers that want exclusive ownership.
pub fn create_boxed_from(kind: BufferKind, src: &[u8]) -> Box<dyn Buffer> {
    match kind {
        BufferKind::Fixed => Box::new(ConstraintBuffer::from_slice(src)),
        BufferKind::Growable => Box::new(DynamicBuffer::from_slice(src)),
        BufferKind::SharedCursor => Box::new(StreamingBuffer::from_slice(src)),
    }
}

/// Concatenates `rhs` after `lhs`.
///
/// Returns `lhs` itself when it grew in place (growable kind), otherwise a
/// new handle. `lhs` and `rhs` may be the same handle.
pub fn concat(lhs: &BufferRef, rhs: &BufferRef) -> Result<BufferRef, BufferError> {
    let mut tail = Vec::new();
    rhs.try_borrow()
        .map_err(|_| BufferError::StorageBusy)?
        .open(&mut |bytes| {
            tail.extend_from_slice(bytes);
            Ok(())
        })?;

    concat_bytes(lhs, &tail)
}

/// Concatenates a single byte after `lhs`. See [`concat`].
pub fn concat_byte(lhs: &BufferRef, byte: u8) -> Result<BufferRef, BufferError> {
    concat_bytes(lhs, &[byte])
}

fn concat_bytes(lhs: &BufferRef, tail: &[u8]) -> Result<BufferRef, BufferError> {
    let outcome = lhs
        .try_borrow_mut()
        .map_err(|_| BufferError::StorageBusy)?
        .concat(tail)?;

    Ok(match outcome {
        Concatenated::InPlace => Rc::clone(lhs),
        Concatenated::Allocated(joined) => joined,
    })
}
