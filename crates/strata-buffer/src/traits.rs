// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::error::BufferError;
use crate::factory::{self, BufferRef};
use crate::kind::BufferKind;
use crate::streaming::Streaming;

/// Outcome of a concatenation.
#[derive(Debug)]
pub enum Concatenated {
    /// The receiver grew in place.
    InPlace,
    /// A new buffer holds the receiver's bytes followed by the operand's.
    /// Both inputs are unchanged.
    Allocated(BufferRef),
}

/// Capability contract shared by every buffer kind.
///
/// Operations that a kind cannot perform return a soft [`BufferError`] and
/// leave the buffer untouched. Only indexed access past the end
/// ([`BufferError::OutOfRange`]) is a hard error.
pub trait Buffer: core::fmt::Debug {
    /// Returns the storage strategy of this buffer.
    fn kind(&self) -> BufferKind;

    /// Releases any held storage, then allocates `len` bytes set to `fill`.
    fn init_filled(&mut self, len: usize, fill: u8);

    /// Releases any held storage, then allocates a copy of `src`.
    fn init_from(&mut self, src: &[u8]);

    /// Drops the storage and resets the length to 0. Idempotent.
    fn release(&mut self);

    /// Writes `src` at `offset`.
    ///
    /// Fixed-extent kinds refuse writes that do not fit. The growable kind
    /// extends itself to `offset + src.len()` instead.
    fn update(&mut self, offset: usize, src: &[u8]) -> Result<(), BufferError>;

    /// Copies up to `len` bytes (all when `None`) into the start of `dst`,
    /// clamped to `dst.len()`. Does nothing when this buffer is empty.
    ///
    /// The destination's refusal, if any, is ignored.
    fn copy_to(&self, dst: &mut dyn Buffer, len: Option<usize>) {
        if self.is_empty() {
            return;
        }

        let count = clamp(len, self.len()).min(dst.len());
        let _ = self.open(&mut |bytes| dst.update(0, &bytes[..count]));
    }

    /// Appends one byte. Growable kind only.
    fn append_byte(&mut self, byte: u8) -> Result<(), BufferError> {
        self.append(&[byte])
    }

    /// Appends `src`. Growable kind only.
    fn append(&mut self, src: &[u8]) -> Result<(), BufferError>;

    /// Inserts `src` before `index`. Growable kind only.
    fn insert(&mut self, index: usize, src: &[u8]) -> Result<(), BufferError>;

    /// Zero-fills up to `len` bytes (all when `None`) from the start.
    /// Neither the length nor the storage changes.
    fn clear(&mut self, len: Option<usize>) {
        let _ = self.open_mut(&mut |bytes| {
            let count = clamp(len, bytes.len());
            bytes[..count].zeroize();
            Ok(())
        });
    }

    /// Returns the logical length in bytes.
    fn len(&self) -> usize;

    /// Returns true if the buffer has zero length.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the buffer value plus the bytes its storage occupies.
    fn memory_footprint(&self) -> usize;

    /// Opens the logical bytes for read-only access.
    fn open(
        &self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError>;

    /// Opens the logical bytes for mutable access.
    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError>;

    /// Opens the storage including the trailing zero terminator.
    ///
    /// A released buffer yields an empty slice.
    fn open_raw(
        &self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError>;

    /// Copies the logical bytes out.
    fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        let _ = self.open(&mut |bytes| {
            out.extend_from_slice(bytes);
            Ok(())
        });

        out
    }

    /// Reads the byte at `index`.
    fn get(&self, index: usize) -> Result<u8, BufferError> {
        let mut value = 0;
        self.open(&mut |bytes| {
            value = *bytes.get(index).ok_or(BufferError::OutOfRange {
                index,
                len: bytes.len(),
            })?;
            Ok(())
        })?;

        Ok(value)
    }

    /// Overwrites the byte at `index`.
    fn set(&mut self, index: usize, value: u8) -> Result<(), BufferError> {
        self.open_mut(&mut |bytes| {
            let len = bytes.len();
            let slot = bytes
                .get_mut(index)
                .ok_or(BufferError::OutOfRange { index, len })?;
            *slot = value;
            Ok(())
        })
    }

    /// Creates a buffer of `kind` holding up to `len` bytes (all when `None`)
    /// copied from this one. An empty source yields an empty buffer.
    fn duplicate(&self, kind: BufferKind, len: Option<usize>) -> BufferRef {
        let mut copy = None;
        let _ = self.open(&mut |bytes| {
            let count = clamp(len, bytes.len());
            copy = Some(factory::create_from(kind, &bytes[..count]));
            Ok(())
        });

        copy.unwrap_or_else(|| factory::create_filled(kind, 0, 0))
    }

    /// Returns the streaming view if this kind has one.
    fn as_streaming(&mut self) -> Option<&mut dyn Streaming> {
        None
    }

    /// Concatenates `tail` after this buffer's bytes.
    ///
    /// The growable kind grows in place. Fixed-extent kinds allocate a new
    /// buffer of their own kind and leave `self` unchanged.
    fn concat(&mut self, tail: &[u8]) -> Result<Concatenated, BufferError>;

    /// Concatenates a single byte. See [`Buffer::concat`].
    fn concat_byte(&mut self, byte: u8) -> Result<Concatenated, BufferError> {
        self.concat(&[byte])
    }
}

/// Resolves an optional length against the available `max`.
#[inline]
pub(crate) fn clamp(len: Option<usize>, max: usize) -> usize {
    len.map_or(max, |len| len.min(max))
}

/// Builds the refusal returned by kinds without a resizable store.
pub(crate) fn unsupported(kind: BufferKind, op: &'static str) -> BufferError {
    tracing::debug!(%kind, op, "refused operation on fixed-extent buffer");
    BufferError::UnsupportedOperation { kind, op }
}
