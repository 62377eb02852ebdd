// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;

use proptest::prelude::*;

use crate::constraint_buffer::ConstraintBuffer;
use crate::factory::create_boxed_from;
use crate::kind::BufferKind;
use crate::streaming::{SeekMode, Streaming};
use crate::streaming_buffer::StreamingBuffer;
use crate::test_utils::pattern;
use crate::traits::Buffer;

fn any_kind() -> impl Strategy<Value = BufferKind> {
    prop::sample::select(BufferKind::ALL.to_vec())
}

fn any_mode() -> impl Strategy<Value = SeekMode> {
    prop::sample::select(vec![SeekMode::Set, SeekMode::Current, SeekMode::End])
}

proptest! {
    #[test]
    fn update_respects_kind_bounds(
        kind in any_kind(),
        len in 0..64usize,
        offset in 0..80usize,
        size in 0..32usize,
    ) {
        let original = pattern(len, 3);
        let src = pattern(size, 7);
        let mut buffer = create_boxed_from(kind, &original);

        let result = buffer.update(offset, &src);
        let fits = offset + size <= len;

        if fits {
            prop_assert!(result.is_ok());
            prop_assert_eq!(buffer.len(), len);
            prop_assert_eq!(&buffer.to_vec()[offset..offset + size], &src[..]);
        } else if kind.supports_growth() {
            prop_assert!(result.is_ok());
            prop_assert_eq!(buffer.len(), offset + size);
            prop_assert_eq!(&buffer.to_vec()[offset..], &src[..]);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(buffer.to_vec(), original);
        }
    }

    #[test]
    fn append_changes_length_only_when_growable(
        kind in any_kind(),
        len in 0..32usize,
        extra in 0..32usize,
    ) {
        let mut buffer = create_boxed_from(kind, &pattern(len, 1));

        let result = buffer.append(&pattern(extra, 2));

        if kind.supports_growth() {
            prop_assert!(result.is_ok());
            prop_assert_eq!(buffer.len(), len + extra);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(buffer.len(), len);
        }
    }

    #[test]
    fn seek_lands_in_bounds_or_leaves_cursor(
        len in 0..64usize,
        start in 0..64usize,
        offset in -100..100i64,
        mode in any_mode(),
    ) {
        let mut stream = StreamingBuffer::filled(len, 1);
        let start = start.min(len);
        stream
            .seek(start as i64, SeekMode::Set)
            .expect("Failed to seek(..)");

        match stream.seek(offset, mode) {
            Ok(position) => {
                prop_assert!(position <= len);
                prop_assert_eq!(stream.tell(), position);
            }
            Err(err) => {
                prop_assert!(err.is_soft());
                prop_assert_eq!(stream.tell(), start);
            }
        }
    }

    #[test]
    fn read_advances_by_its_return_value(
        data in prop::collection::vec(any::<u8>(), 0..64),
        start in 0..64usize,
        want in 0..80usize,
        room in 0..80usize,
    ) {
        let mut stream = StreamingBuffer::from_slice(&data);
        let start = start.min(data.len());
        stream
            .seek(start as i64, SeekMode::Set)
            .expect("Failed to seek(..)");
        let mut dst = ConstraintBuffer::filled(room, 0);

        let count = stream.read(&mut dst, want);

        prop_assert_eq!(count, want.min(room).min(data.len() - start));
        prop_assert_eq!(stream.tell(), start + count);
        prop_assert_eq!(&dst.as_slice()[..count], &data[start..start + count]);
        prop_assert_eq!(stream.is_eof(), stream.tell() == data.len());
    }

    #[test]
    fn duplicate_copies_the_clamped_prefix(
        src_kind in any_kind(),
        dst_kind in any_kind(),
        len in 0..48usize,
        take in prop::option::of(0..64usize),
    ) {
        let data: Vec<u8> = pattern(len, 5);
        let src = create_boxed_from(src_kind, &data);

        let copy = src.duplicate(dst_kind, take);
        let expected = take.map_or(len, |take| take.min(len));

        prop_assert_eq!(copy.borrow().kind(), dst_kind);
        prop_assert_eq!(copy.borrow().to_vec(), data[..expected].to_vec());
    }
}
