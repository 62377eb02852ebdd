// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Helpers for tests and benchmarks. Enabled by the `test-utils` feature.

use alloc::vec::Vec;

use crate::traits::Buffer;

/// Fills `bytes` with a repeating, non-zero pattern derived from `seed`.
pub fn fill_bytes_with_pattern(bytes: &mut [u8], seed: u8) {
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = (seed.wrapping_add(i as u8) % 251).wrapping_add(1);
    }
}

/// Returns `len` bytes of the pattern produced by [`fill_bytes_with_pattern`].
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    let mut bytes = alloc::vec![0u8; len];
    fill_bytes_with_pattern(&mut bytes, seed);
    bytes
}

/// Returns true if the buffer's storage is `len + 1` bytes ending in a zero,
/// or if the buffer is released and holds nothing.
pub fn is_terminated(buffer: &dyn Buffer) -> bool {
    let len = buffer.len();
    let mut terminated = false;

    let _ = buffer.open_raw(&mut |raw| {
        terminated = match raw.last() {
            Some(last) => raw.len() == len + 1 && *last == 0,
            None => len == 0,
        };
        Ok(())
    });

    terminated
}
