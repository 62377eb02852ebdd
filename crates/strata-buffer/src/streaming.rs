// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Sequential access over a buffer.

use crate::error::BufferError;
use crate::traits::Buffer;

/// Origin of a [`Streaming::seek`] offset.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum SeekMode {
    /// From position 0.
    #[default]
    Set,
    /// From the current position.
    Current,
    /// From the end. Offsets are expected to be zero or negative.
    End,
}

/// Cursor over a buffer's bytes.
///
/// The position always stays within `[0, len]`. EOF holds exactly when the
/// position equals the length.
pub trait Streaming {
    /// Returns the current position.
    fn tell(&self) -> usize;

    /// Copies up to `len` bytes from the position into the start of `dst`.
    ///
    /// The count is further limited by `dst.len()` and by the remaining
    /// bytes. Returns the number of bytes actually copied and advances the
    /// position by that amount. At EOF returns 0 and does not touch `dst`.
    fn read(&mut self, dst: &mut dyn Buffer, len: usize) -> usize;

    /// Moves the position and returns it.
    ///
    /// A target outside `[0, len]` fails with
    /// [`BufferError::SeekOutOfBounds`] and leaves the position unchanged.
    fn seek(&mut self, offset: i64, mode: SeekMode) -> Result<usize, BufferError>;

    /// Returns true when the position equals the length.
    fn is_eof(&self) -> bool;

    /// Releases the underlying buffer.
    fn close(&mut self);
}

/// Resolves a seek request to an absolute position within `[0, len]`.
pub(crate) fn seek_target(
    position: usize,
    len: usize,
    offset: i64,
    mode: SeekMode,
) -> Result<usize, BufferError> {
    let base = match mode {
        SeekMode::Set => 0,
        SeekMode::Current => position,
        SeekMode::End => len,
    };

    let target = base as i128 + i128::from(offset);

    if (0..=len as i128).contains(&target) {
        Ok(target as usize)
    } else {
        Err(BufferError::SeekOutOfBounds { offset, mode, len })
    }
}
