// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Backing stores.
//!
//! Two ownership models live here and they are kept as distinct types:
//!
//! - [`ExclusiveStore`]: one owner. Cloning copies every byte.
//! - [`SharedStore`]: reference-counted. Cloning hands out another alias to
//!   the same bytes; the bytes are freed when the last alias goes away.
//!
//! Both keep one zero byte past the logical end so the storage can be read
//! as a NUL-terminated string when it holds text.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::error::BufferError;

/// Exclusively owned, fixed-size byte storage with a trailing terminator.
#[derive(Clone, Eq, PartialEq)]
pub struct ExclusiveStore {
    // Always `len + 1` bytes, the last one zero.
    bytes: Box<[u8]>,
}

impl ExclusiveStore {
    /// Allocates `len` bytes set to `fill`.
    pub fn filled(len: usize, fill: u8) -> Self {
        let mut bytes = alloc::vec![fill; len + 1];
        bytes[len] = 0;

        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }

    /// Allocates a copy of `src`.
    pub fn from_slice(src: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(src.len() + 1);
        bytes.extend_from_slice(src);
        bytes.push(0);

        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }

    /// Allocates `head` followed by `tail`.
    pub fn concat(head: &[u8], tail: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(head.len() + tail.len() + 1);
        bytes.extend_from_slice(head);
        bytes.extend_from_slice(tail);
        bytes.push(0);

        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }

    /// Logical length (terminator excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    /// Returns true if the logical length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated size in bytes, terminator included.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.bytes.len()
    }

    /// Logical bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Logical bytes, mutable. The terminator is not reachable from here.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.bytes[..len]
    }

    /// Logical bytes followed by the terminator.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    /// Copies `src` to `offset`. Fails without writing if it does not fit.
    pub fn write(&mut self, offset: usize, src: &[u8]) -> Result<(), BufferError> {
        let len = self.len();
        let end = offset
            .checked_add(src.len())
            .filter(|end| *end <= len)
            .ok_or(BufferError::OutOfBoundsWrite {
                offset,
                size: src.len(),
                len,
            })?;

        self.bytes[offset..end].copy_from_slice(src);

        Ok(())
    }
}

/// Reference-counted byte storage shared between aliases.
///
/// The logical length is fixed when the store is created. Accesses go through
/// a [`RefCell`]; a reentrant mutable access fails with
/// [`BufferError::StorageBusy`] instead of panicking.
///
/// This type is `!Send` and `!Sync`.
#[derive(Clone)]
pub struct SharedStore {
    inner: Rc<RefCell<ExclusiveStore>>,
    len: usize,
}

impl SharedStore {
    /// Wraps `store` as the first alias.
    pub fn new(store: ExclusiveStore) -> Self {
        let len = store.len();

        Self {
            inner: Rc::new(RefCell::new(store)),
            len,
        }
    }

    /// Logical length of the shared bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the logical length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size in bytes, terminator included.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.len + 1
    }

    /// Number of live aliases of this store.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Returns true if both handles alias the same bytes.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Runs `f` with shared access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&ExclusiveStore) -> R) -> Result<R, BufferError> {
        let store = self
            .inner
            .try_borrow()
            .map_err(|_| BufferError::StorageBusy)?;

        Ok(f(&store))
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_mut<R>(
        &self,
        f: impl FnOnce(&mut ExclusiveStore) -> R,
    ) -> Result<R, BufferError> {
        let mut store = self
            .inner
            .try_borrow_mut()
            .map_err(|_| BufferError::StorageBusy)?;

        Ok(f(&mut store))
    }
}

impl core::fmt::Debug for ExclusiveStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExclusiveStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedStore")
            .field("len", &self.len)
            .field("holders", &self.holders())
            .finish_non_exhaustive()
    }
}
