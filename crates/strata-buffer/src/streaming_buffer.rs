// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! StreamingBuffer - shared fixed-extent storage with a read cursor.
//!
//! Copies alias the same bytes: an update through one copy is visible
//! through all of them. Each copy keeps its own cursor. Releasing a copy
//! only drops that copy's reference.
//!
//! # Aliasing
//!
//! The storage sits behind [`SharedStore`], which is `!Send` and `!Sync`, so
//! aliases can never be mutated from two threads. Within one thread a
//! reentrant access (touching an alias from inside another alias's
//! `open`/`open_mut` closure) fails with [`BufferError::StorageBusy`].

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use zeroize::Zeroize;

use crate::error::BufferError;
use crate::kind::BufferKind;
use crate::storage::{ExclusiveStore, SharedStore};
use crate::streaming::{SeekMode, Streaming, seek_target};
use crate::traits::{Buffer, Concatenated, clamp, unsupported};

/// Fixed-extent buffer over reference-counted storage, with a cursor.
///
/// `Clone` shares the bytes and copies the cursor.
/// [`StreamingBuffer::take`] moves the reference out, leaving `self`
/// released with its cursor at 0.
#[derive(Clone, Default)]
pub struct StreamingBuffer {
    store: Option<SharedStore>,
    position: usize,
}

impl StreamingBuffer {
    /// Creates a released buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer of `len` bytes set to `fill`.
    pub fn filled(len: usize, fill: u8) -> Self {
        Self::with_store(ExclusiveStore::filled(len, fill))
    }

    /// Creates a buffer holding a copy of `src`.
    pub fn from_slice(src: &[u8]) -> Self {
        Self::with_store(ExclusiveStore::from_slice(src))
    }

    fn with_store(store: ExclusiveStore) -> Self {
        Self {
            store: Some(SharedStore::new(store)),
            position: 0,
        }
    }

    /// Returns true if the buffer holds no storage.
    pub fn is_released(&self) -> bool {
        self.store.is_none()
    }

    /// Number of buffers sharing this buffer's storage, itself included.
    /// 0 when released.
    pub fn holders(&self) -> usize {
        self.store.as_ref().map_or(0, SharedStore::holders)
    }

    /// Returns true if both buffers alias the same storage.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        match (&self.store, &other.store) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Moves the reference out, leaving `self` released.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    fn remaining(&self) -> usize {
        self.len() - self.position
    }
}

impl core::fmt::Debug for StreamingBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StreamingBuffer")
            .field("len", &self.len())
            .field("position", &self.position)
            .field("holders", &self.holders())
            .finish_non_exhaustive()
    }
}

impl Buffer for StreamingBuffer {
    fn kind(&self) -> BufferKind {
        BufferKind::SharedCursor
    }

    fn init_filled(&mut self, len: usize, fill: u8) {
        self.release();
        *self = Self::filled(len, fill);
        tracing::trace!(len, "initialized shared-cursor buffer");
    }

    fn init_from(&mut self, src: &[u8]) {
        self.release();
        *self = Self::from_slice(src);
        tracing::trace!(len = src.len(), "initialized shared-cursor buffer");
    }

    fn release(&mut self) {
        if let Some(store) = self.store.take() {
            tracing::trace!(
                len = store.len(),
                holders_left = store.holders() - 1,
                "released shared-cursor buffer"
            );
        }

        self.position = 0;
    }

    fn update(&mut self, offset: usize, src: &[u8]) -> Result<(), BufferError> {
        let store = self.store.as_ref().ok_or(BufferError::Released)?;

        store
            .with_mut(|store| store.write(offset, src))
            .and_then(|written| written)
            .inspect_err(|err| {
                tracing::debug!(%err, "rejected update on shared-cursor buffer");
            })
    }

    fn copy_to(&self, dst: &mut dyn Buffer, len: Option<usize>) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if store.is_empty() {
            return;
        }

        // Snapshot first: `dst` may alias this storage.
        let count = clamp(len, store.len()).min(dst.len());
        let Ok(chunk) = store.with(|store| store.as_slice()[..count].to_vec()) else {
            return;
        };

        let _ = dst.update(0, &chunk);
    }

    fn append(&mut self, _src: &[u8]) -> Result<(), BufferError> {
        Err(unsupported(self.kind(), "append"))
    }

    fn insert(&mut self, _index: usize, _src: &[u8]) -> Result<(), BufferError> {
        Err(unsupported(self.kind(), "insert"))
    }

    fn clear(&mut self, len: Option<usize>) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        let cleared = store.with_mut(|store| {
            let bytes = store.as_mut_slice();
            let count = clamp(len, bytes.len());
            bytes[..count].zeroize();
        });

        if let Err(err) = cleared {
            tracing::debug!(%err, "skipped clear on shared-cursor buffer");
        }
    }

    fn len(&self) -> usize {
        self.store.as_ref().map_or(0, SharedStore::len)
    }

    fn memory_footprint(&self) -> usize {
        core::mem::size_of::<Self>() + self.store.as_ref().map_or(0, SharedStore::allocated)
    }

    fn open(
        &self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        match self.store.as_ref() {
            Some(store) => store
                .with(|store| f(store.as_slice()))
                .and_then(|opened| opened),
            None => f(&[]),
        }
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        match self.store.as_ref() {
            Some(store) => store
                .with_mut(|store| f(store.as_mut_slice()))
                .and_then(|opened| opened),
            None => f(&mut []),
        }
    }

    fn open_raw(
        &self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        match self.store.as_ref() {
            Some(store) => store
                .with(|store| f(store.as_bytes_with_nul()))
                .and_then(|opened| opened),
            None => f(&[]),
        }
    }

    fn as_streaming(&mut self) -> Option<&mut dyn Streaming> {
        Some(self)
    }

    fn concat(&mut self, tail: &[u8]) -> Result<Concatenated, BufferError> {
        let joined = match self.store.as_ref() {
            Some(store) => store.with(|store| ExclusiveStore::concat(store.as_slice(), tail))?,
            None => ExclusiveStore::from_slice(tail),
        };

        Ok(Concatenated::Allocated(Rc::new(RefCell::new(
            Self::with_store(joined),
        ))))
    }
}

impl Streaming for StreamingBuffer {
    fn tell(&self) -> usize {
        self.position
    }

    fn read(&mut self, dst: &mut dyn Buffer, len: usize) -> usize {
        if self.is_eof() {
            return 0;
        }

        let count = len.min(dst.len()).min(self.remaining());
        if count == 0 {
            return 0;
        }

        let Some(store) = self.store.as_ref() else {
            return 0;
        };

        // Snapshot first: `dst` may alias this storage.
        let start = self.position;
        let snapshot = store.with(|store| store.as_slice()[start..start + count].to_vec());
        let chunk: Vec<u8> = match snapshot {
            Ok(chunk) => chunk,
            Err(err) => {
                tracing::debug!(%err, "read skipped");
                return 0;
            }
        };

        if let Err(err) = dst.update(0, &chunk) {
            tracing::debug!(%err, "destination refused read");
            return 0;
        }

        self.position += count;
        tracing::trace!(count, position = self.position, "read from shared-cursor buffer");

        count
    }

    fn seek(&mut self, offset: i64, mode: SeekMode) -> Result<usize, BufferError> {
        let target = seek_target(self.position, self.len(), offset, mode).inspect_err(|err| {
            tracing::debug!(%err, position = self.position, "rejected seek");
        })?;

        self.position = target;

        Ok(target)
    }

    fn is_eof(&self) -> bool {
        self.position == self.len()
    }

    fn close(&mut self) {
        self.release();
    }
}
