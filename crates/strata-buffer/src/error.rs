// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for strata-buffer.
use thiserror::Error;

use crate::kind::BufferKind;
use crate::streaming::SeekMode;

/// How a [`BufferError`] is meant to be handled by the caller.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Severity {
    /// Programming error at the call site (indexed access past the end).
    Hard,
    /// Expected, recoverable refusal. The buffer is left untouched.
    Soft,
}

/// Errors that can occur when working with buffers.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum BufferError {
    /// Indexed access at or past the logical length.
    #[error("index {index} out of range for buffer of length {len}")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Logical length at the time of the access.
        len: usize,
    },

    /// Append or insert on a buffer whose extent is fixed at construction.
    #[error("{op} is not supported by {kind} buffers")]
    UnsupportedOperation {
        /// Kind of the refusing buffer.
        kind: BufferKind,
        /// Name of the refused operation.
        op: &'static str,
    },

    /// Write whose target range does not fit the buffer.
    #[error("write of {size} bytes at offset {offset} exceeds buffer length {len}")]
    OutOfBoundsWrite {
        /// Start of the write.
        offset: usize,
        /// Number of bytes to write.
        size: usize,
        /// Logical length at the time of the write.
        len: usize,
    },

    /// Seek target outside `[0, len]`.
    #[error("seek by {offset} from {mode:?} lands outside [0, {len}]")]
    SeekOutOfBounds {
        /// Requested offset.
        offset: i64,
        /// Origin the offset is relative to.
        mode: SeekMode,
        /// Logical length of the stream.
        len: usize,
    },

    /// The buffer holds no storage.
    #[error("buffer storage is released")]
    Released,

    /// Shared storage is already borrowed by another alias.
    #[error("shared storage is already borrowed")]
    StorageBusy,

    /// Unknown buffer kind tag.
    #[error("unknown buffer kind tag {0}")]
    UnknownKind(u8),
}

impl BufferError {
    /// Returns the severity of this error.
    ///
    /// Only [`BufferError::OutOfRange`] is hard.
    pub fn severity(&self) -> Severity {
        match self {
            Self::OutOfRange { .. } => Severity::Hard,
            _ => Severity::Soft,
        }
    }

    /// Returns true for errors the caller must not ignore.
    pub fn is_hard(&self) -> bool {
        self.severity() == Severity::Hard
    }

    /// Returns true for recoverable refusals.
    pub fn is_soft(&self) -> bool {
        self.severity() == Severity::Soft
    }
}
