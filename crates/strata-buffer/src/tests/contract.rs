// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Behaviour every kind must share, checked through `dyn Buffer`.

use crate::error::BufferError;
use crate::factory::{create_boxed_filled, create_boxed_from};
use crate::kind::BufferKind;
use crate::test_utils::{is_terminated, pattern};
use crate::traits::Buffer;

// =============================================================================
// init / data
// =============================================================================

#[test]
fn test_create_from_round_trips_for_every_kind() {
    let data = pattern(64, 9);

    for kind in BufferKind::ALL {
        let buffer = create_boxed_from(kind, &data);

        assert_eq!(buffer.kind(), kind);
        assert_eq!(buffer.len(), 64);
        assert_eq!(buffer.to_vec(), data);
        assert!(is_terminated(buffer.as_ref()), "{kind} not terminated");
    }
}

#[test]
fn test_create_filled_for_every_kind() {
    for kind in BufferKind::ALL {
        let buffer = create_boxed_filled(kind, 5, b'7');

        assert_eq!(buffer.to_vec(), b"77777", "{kind}");
    }
}

#[test]
fn test_zero_length_buffers_for_every_kind() {
    for kind in BufferKind::ALL {
        let buffer = create_boxed_from(kind, b"");

        assert!(buffer.is_empty(), "{kind}");
        assert!(is_terminated(buffer.as_ref()), "{kind}");
    }
}

#[test]
fn test_reinit_switches_between_fill_and_copy() {
    for kind in BufferKind::ALL {
        let mut buffer = create_boxed_from(kind, b"abc");

        buffer.init_filled(2, b'-');
        assert_eq!(buffer.to_vec(), b"--", "{kind}");

        buffer.init_from(b"xyz!");
        assert_eq!(buffer.to_vec(), b"xyz!", "{kind}");
    }
}

// =============================================================================
// append / insert capability
// =============================================================================

#[test]
fn test_only_growable_accepts_append_and_insert() {
    for kind in BufferKind::ALL {
        let mut buffer = create_boxed_from(kind, b"abc");

        let appended = buffer.append(b"de");
        let appended_byte = buffer.append_byte(b'f');
        let inserted = buffer.insert(0, b"_");

        if kind.supports_growth() {
            assert!(appended.is_ok() && appended_byte.is_ok() && inserted.is_ok());
            assert_eq!(buffer.to_vec(), b"_abcdef");
        } else {
            for result in [appended, appended_byte, inserted] {
                let err = result.expect_err("Expected refusal");
                assert!(err.is_soft());
                assert!(matches!(err, BufferError::UnsupportedOperation { .. }));
            }
            assert_eq!(buffer.to_vec(), b"abc");
            assert_eq!(buffer.len(), 3);
        }
    }
}

// =============================================================================
// update past the end
// =============================================================================

#[test]
fn test_update_past_end_per_kind() {
    for kind in BufferKind::ALL {
        let mut buffer = create_boxed_from(kind, b"abcd");

        let result = buffer.update(3, b"XYZ");

        if kind.supports_growth() {
            assert!(result.is_ok());
            assert_eq!(buffer.len(), 6);
            assert_eq!(buffer.to_vec(), b"abcXYZ");
        } else {
            assert!(matches!(result, Err(BufferError::OutOfBoundsWrite { .. })));
            assert_eq!(buffer.len(), 4);
            assert_eq!(buffer.to_vec(), b"abcd");
        }
    }
}

// =============================================================================
// copy_to()
// =============================================================================

#[test]
fn test_copy_to_across_every_pair_of_kinds() {
    for src_kind in BufferKind::ALL {
        for dst_kind in BufferKind::ALL {
            let src = create_boxed_from(src_kind, b"abcdef");
            let mut dst = create_boxed_filled(dst_kind, 4, b'.');

            src.copy_to(dst.as_mut(), Some(3));

            assert_eq!(dst.to_vec(), b"abc.", "{src_kind} -> {dst_kind}");
        }
    }
}

#[test]
fn test_copy_to_from_empty_source_is_noop() {
    for kind in BufferKind::ALL {
        let src = create_boxed_from(kind, b"");
        let mut dst = create_boxed_filled(BufferKind::Fixed, 2, b'.');

        src.copy_to(dst.as_mut(), None);

        assert_eq!(dst.to_vec(), b"..");
    }
}

// =============================================================================
// release()
// =============================================================================

#[test]
fn test_release_resets_length_for_every_kind() {
    for kind in BufferKind::ALL {
        let mut buffer = create_boxed_filled(kind, 16, 1);

        buffer.release();
        buffer.release();

        assert_eq!(buffer.len(), 0, "{kind}");
        assert!(buffer.to_vec().is_empty());
        assert_eq!(buffer.get(0), Err(BufferError::OutOfRange { index: 0, len: 0 }));
    }
}

// =============================================================================
// duplicate()
// =============================================================================

#[test]
fn test_duplicate_into_every_kind() {
    for src_kind in BufferKind::ALL {
        for dst_kind in BufferKind::ALL {
            let src = create_boxed_from(src_kind, b"abcdef");

            let whole = src.duplicate(dst_kind, None);
            let prefix = src.duplicate(dst_kind, Some(2));
            let clamped = src.duplicate(dst_kind, Some(100));

            assert_eq!(whole.borrow().kind(), dst_kind);
            assert_eq!(whole.borrow().to_vec(), b"abcdef");
            assert_eq!(prefix.borrow().to_vec(), b"ab");
            assert_eq!(clamped.borrow().len(), 6);
        }
    }
}

#[test]
fn test_duplicate_of_empty_is_empty() {
    for kind in BufferKind::ALL {
        let mut src = create_boxed_from(BufferKind::Fixed, b"abc");
        src.release();

        let copy = src.duplicate(kind, Some(10));

        assert_eq!(copy.borrow().kind(), kind);
        assert!(copy.borrow().is_empty());
    }
}

#[test]
fn test_duplicate_is_detached_from_source() {
    let mut src = create_boxed_from(BufferKind::SharedCursor, b"abc");
    let copy = src.duplicate(BufferKind::SharedCursor, None);

    src.update(0, b"X").expect("Failed to update(..)");

    assert_eq!(copy.borrow().to_vec(), b"abc");
}

// =============================================================================
// as_streaming()
// =============================================================================

#[test]
fn test_only_shared_cursor_streams() {
    for kind in BufferKind::ALL {
        let mut buffer = create_boxed_filled(kind, 3, 0);

        assert_eq!(
            buffer.as_streaming().is_some(),
            kind.supports_streaming(),
            "{kind}"
        );
    }
}
