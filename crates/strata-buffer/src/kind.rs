// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Buffer kind selector.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::error::BufferError;

/// Storage strategy of a buffer.
///
/// The discriminants are stable and may be stored or exchanged as `u8`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum BufferKind {
    /// Single allocation, update-only ([`ConstraintBuffer`](crate::ConstraintBuffer)).
    Fixed = 0,
    /// Resizable, supports append/insert ([`DynamicBuffer`](crate::DynamicBuffer)).
    Growable = 1,
    /// Fixed extent, shared across copies, with a read cursor
    /// ([`StreamingBuffer`](crate::StreamingBuffer)).
    SharedCursor = 2,
}

impl BufferKind {
    /// All kinds, in tag order.
    pub const ALL: [BufferKind; 3] = [Self::Fixed, Self::Growable, Self::SharedCursor];

    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Growable => "growable",
            Self::SharedCursor => "shared-cursor",
        }
    }

    /// Returns true if buffers of this kind accept append and insert.
    pub fn supports_growth(&self) -> bool {
        matches!(self, Self::Growable)
    }

    /// Returns true if buffers of this kind expose a [`Streaming`](crate::Streaming) view.
    pub fn supports_streaming(&self) -> bool {
        matches!(self, Self::SharedCursor)
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BufferKind> for u8 {
    fn from(kind: BufferKind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for BufferKind {
    type Error = BufferError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Fixed),
            1 => Ok(Self::Growable),
            2 => Ok(Self::SharedCursor),
            other => Err(BufferError::UnknownKind(other)),
        }
    }
}

/// Returned when a configuration string names no buffer kind.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("unknown buffer kind name")]
pub struct ParseKindError;

impl FromStr for BufferKind {
    type Err = ParseKindError;

    /// Accepts the canonical names and the legacy aliases
    /// `constraint`, `dynamic` and `streaming`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let names: [(&str, BufferKind); 6] = [
            ("fixed", Self::Fixed),
            ("constraint", Self::Fixed),
            ("growable", Self::Growable),
            ("dynamic", Self::Growable),
            ("shared-cursor", Self::SharedCursor),
            ("streaming", Self::SharedCursor),
        ];

        names
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, kind)| *kind)
            .ok_or(ParseKindError)
    }
}
