// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! DynamicBuffer - resizable storage.
//!
//! The only kind that grows: append, insert, and updates past the end all
//! extend the logical length. Concatenation happens in place.

use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::error::BufferError;
use crate::kind::BufferKind;
use crate::traits::{Buffer, Concatenated, clamp};

/// Growable buffer with exclusively owned storage.
///
/// `Clone` copies the bytes. [`DynamicBuffer::take`] moves them out and
/// leaves `self` released.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct DynamicBuffer {
    // Empty when released, otherwise `len + 1` bytes ending in a zero.
    bytes: Vec<u8>,
}

impl DynamicBuffer {
    /// Creates a released buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut bytes = Vec::with_capacity(capacity + 1);
        bytes.push(0);

        Self { bytes }
    }

    /// Creates a buffer of `len` bytes set to `fill`.
    pub fn filled(len: usize, fill: u8) -> Self {
        let mut buffer = Self::new();
        buffer.fill(len, fill);
        buffer
    }

    /// Creates a buffer holding a copy of `src`.
    pub fn from_slice(src: &[u8]) -> Self {
        let mut buffer = Self::new();
        buffer.copy_from(src);
        buffer
    }

    /// Logical bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Logical bytes, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.bytes[..len]
    }

    /// Number of bytes the storage can hold without reallocating,
    /// terminator included.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Moves the storage out, leaving `self` released.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    fn fill(&mut self, len: usize, fill: u8) {
        self.bytes = alloc::vec![fill; len + 1];
        self.bytes[len] = 0;
    }

    fn copy_from(&mut self, src: &[u8]) {
        let mut bytes = Vec::with_capacity(src.len() + 1);
        bytes.extend_from_slice(src);
        bytes.push(0);
        self.bytes = bytes;
    }

    /// Grows the logical length to `len`, zero-filling the new bytes.
    fn grow_to(&mut self, len: usize) {
        if len > self.len() || self.bytes.is_empty() {
            self.bytes.resize(len + 1, 0);
        }
    }
}

impl core::fmt::Debug for DynamicBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynamicBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl Buffer for DynamicBuffer {
    fn kind(&self) -> BufferKind {
        BufferKind::Growable
    }

    fn init_filled(&mut self, len: usize, fill: u8) {
        self.release();
        self.fill(len, fill);
        tracing::trace!(len, "initialized growable buffer");
    }

    fn init_from(&mut self, src: &[u8]) {
        self.release();
        self.copy_from(src);
        tracing::trace!(len = src.len(), "initialized growable buffer");
    }

    fn release(&mut self) {
        if !self.bytes.is_empty() {
            tracing::trace!(len = self.len(), "released growable buffer");
        }

        self.bytes = Vec::new();
    }

    fn update(&mut self, offset: usize, src: &[u8]) -> Result<(), BufferError> {
        let end = offset
            .checked_add(src.len())
            .ok_or(BufferError::OutOfBoundsWrite {
                offset,
                size: src.len(),
                len: self.len(),
            })?;

        if end > self.len() {
            tracing::trace!(from = self.len(), to = end, "update extends growable buffer");
        }

        self.grow_to(end);
        self.bytes[offset..end].copy_from_slice(src);

        Ok(())
    }

    fn append_byte(&mut self, byte: u8) -> Result<(), BufferError> {
        let len = self.len();
        self.bytes.truncate(len);
        self.bytes.push(byte);
        self.bytes.push(0);

        Ok(())
    }

    fn append(&mut self, src: &[u8]) -> Result<(), BufferError> {
        let len = self.len();
        self.bytes.truncate(len);
        self.bytes.extend_from_slice(src);
        self.bytes.push(0);

        Ok(())
    }

    fn insert(&mut self, index: usize, src: &[u8]) -> Result<(), BufferError> {
        let len = self.len();
        if index > len {
            tracing::debug!(index, len, "rejected insert past the end");
            return Err(BufferError::OutOfBoundsWrite {
                offset: index,
                size: src.len(),
                len,
            });
        }

        self.grow_to(len);
        self.bytes.splice(index..index, src.iter().copied());

        Ok(())
    }

    fn clear(&mut self, len: Option<usize>) {
        let bytes = self.as_mut_slice();
        let count = clamp(len, bytes.len());
        bytes[..count].zeroize();
    }

    fn len(&self) -> usize {
        self.bytes.len().saturating_sub(1)
    }

    fn memory_footprint(&self) -> usize {
        core::mem::size_of::<Self>() + self.bytes.capacity()
    }

    fn open(
        &self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        f(self.as_slice())
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        f(self.as_mut_slice())
    }

    fn open_raw(
        &self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        f(&self.bytes)
    }

    fn get(&self, index: usize) -> Result<u8, BufferError> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(BufferError::OutOfRange {
                index,
                len: self.len(),
            })
    }

    fn concat(&mut self, tail: &[u8]) -> Result<Concatenated, BufferError> {
        self.append(tail)?;

        Ok(Concatenated::InPlace)
    }
}
