// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ConstraintBuffer - single allocation, update-only.
//!
//! The extent is fixed at initialization. Writes that do not fit are refused,
//! append and insert are refused, concatenation allocates a new buffer.

use alloc::rc::Rc;
use core::cell::RefCell;

use zeroize::Zeroize;

use crate::error::BufferError;
use crate::kind::BufferKind;
use crate::storage::ExclusiveStore;
use crate::traits::{Buffer, Concatenated, clamp, unsupported};

/// Fixed-extent buffer with exclusively owned storage.
///
/// `Clone` copies the bytes. [`ConstraintBuffer::take`] moves them out and
/// leaves `self` released.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct ConstraintBuffer {
    store: Option<ExclusiveStore>,
}

impl ConstraintBuffer {
    /// Creates a released buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer of `len` bytes set to `fill`.
    pub fn filled(len: usize, fill: u8) -> Self {
        Self {
            store: Some(ExclusiveStore::filled(len, fill)),
        }
    }

    /// Creates a buffer holding a copy of `src`.
    pub fn from_slice(src: &[u8]) -> Self {
        Self {
            store: Some(ExclusiveStore::from_slice(src)),
        }
    }

    /// Returns true if the buffer holds no storage.
    pub fn is_released(&self) -> bool {
        self.store.is_none()
    }

    /// Logical bytes.
    pub fn as_slice(&self) -> &[u8] {
        self.store.as_ref().map_or(&[], ExclusiveStore::as_slice)
    }

    /// Logical bytes, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self.store.as_mut() {
            Some(store) => store.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Moves the storage out, leaving `self` released.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }
}

impl core::fmt::Debug for ConstraintBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConstraintBuffer")
            .field("len", &self.len())
            .field("released", &self.is_released())
            .finish_non_exhaustive()
    }
}

impl Buffer for ConstraintBuffer {
    fn kind(&self) -> BufferKind {
        BufferKind::Fixed
    }

    fn init_filled(&mut self, len: usize, fill: u8) {
        self.release();
        self.store = Some(ExclusiveStore::filled(len, fill));
        tracing::trace!(len, "initialized fixed buffer");
    }

    fn init_from(&mut self, src: &[u8]) {
        self.release();
        self.store = Some(ExclusiveStore::from_slice(src));
        tracing::trace!(len = src.len(), "initialized fixed buffer");
    }

    fn release(&mut self) {
        if let Some(store) = self.store.take() {
            tracing::trace!(len = store.len(), "released fixed buffer");
        }
    }

    fn update(&mut self, offset: usize, src: &[u8]) -> Result<(), BufferError> {
        let store = self.store.as_mut().ok_or(BufferError::Released)?;

        store.write(offset, src).inspect_err(|err| {
            tracing::debug!(%err, "rejected update on fixed buffer");
        })
    }

    fn append(&mut self, _src: &[u8]) -> Result<(), BufferError> {
        Err(unsupported(self.kind(), "append"))
    }

    fn insert(&mut self, _index: usize, _src: &[u8]) -> Result<(), BufferError> {
        Err(unsupported(self.kind(), "insert"))
    }

    fn clear(&mut self, len: Option<usize>) {
        let bytes = self.as_mut_slice();
        let count = clamp(len, bytes.len());
        bytes[..count].zeroize();
    }

    fn len(&self) -> usize {
        self.store.as_ref().map_or(0, ExclusiveStore::len)
    }

    fn memory_footprint(&self) -> usize {
        core::mem::size_of::<Self>() + self.store.as_ref().map_or(0, ExclusiveStore::allocated)
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
        f(self
            .store
            .as_ref()
            .map_or(&[], ExclusiveStore::as_bytes_with_nul))
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
        let joined = Self {
            store: Some(ExclusiveStore::concat(self.as_slice(), tail)),
        };

        Ok(Concatenated::Allocated(Rc::new(RefCell::new(joined))))
    }
}
