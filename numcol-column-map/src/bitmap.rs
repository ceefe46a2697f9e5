#![forbid(unsafe_code)]

use arrow::buffer::{BooleanBuffer, Buffer, NullBuffer};
use arrow::util::bit_util;

/// Bit-packed presence tracking for one chunk: `1 = present`, `0 = null`.
///
/// Bits are stored LSB-first within each byte, the same layout Arrow uses for
/// its validity buffers, so a bitmap can be handed to Arrow without repacking.
///
/// Indexing past [`ValidityBitmap::len`] is a programming error and panics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidityBitmap {
    bits: Vec<u8>,
    len: usize,
    null_count: usize,
}

impl ValidityBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bit_util::ceil(bits, 8)),
            len: 0,
            null_count: 0,
        }
    }

    pub fn all_valid(len: usize) -> Self {
        let mut bits = vec![0xFFu8; bit_util::ceil(len, 8)];
        let rem = len % 8;
        if rem != 0
            && let Some(last) = bits.last_mut()
        {
            *last = (1u8 << rem) - 1;
        }
        Self {
            bits,
            len,
            null_count: 0,
        }
    }

    pub fn all_null(len: usize) -> Self {
        Self {
            bits: vec![0u8; bit_util::ceil(len, 8)],
            len,
            null_count: len,
        }
    }

    /// Build a bitmap of `len` bits where bit `i` is `f(i)`.
    pub fn from_fn(len: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut out = Self::with_capacity(len);
        for i in 0..len {
            out.push(f(i));
        }
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    #[inline]
    pub fn is_valid(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "validity index {index} >= {}", self.len);
        bit_util::get_bit(&self.bits, index)
    }

    /// Mark slot `index` present.
    #[inline]
    pub fn set_valid(&mut self, index: usize) {
        assert!(index < self.len, "validity index {index} >= {}", self.len);
        if !bit_util::get_bit(&self.bits, index) {
            bit_util::set_bit(&mut self.bits, index);
            self.null_count -= 1;
        }
    }

    /// Mark slot `index` null.
    #[inline]
    pub fn clear_valid(&mut self, index: usize) {
        assert!(index < self.len, "validity index {index} >= {}", self.len);
        if bit_util::get_bit(&self.bits, index) {
            bit_util::unset_bit(&mut self.bits, index);
            self.null_count += 1;
        }
    }

    #[inline]
    pub fn set(&mut self, index: usize, valid: bool) {
        if valid {
            self.set_valid(index);
        } else {
            self.clear_valid(index);
        }
    }

    pub fn push(&mut self, valid: bool) {
        if self.len % 8 == 0 {
            self.bits.push(0);
        }
        if valid {
            bit_util::set_bit(&mut self.bits, self.len);
        } else {
            self.null_count += 1;
        }
        self.len += 1;
    }

    /// Intersect with `other` in place (a slot stays present only if present in both).
    pub fn and_inplace(&mut self, other: &ValidityBitmap) {
        debug_assert_eq!(self.len, other.len, "ValidityBitmap length mismatch");
        for (dst, src) in self.bits.iter_mut().zip(other.bits.iter()) {
            *dst &= *src;
        }
        let ones: usize = self.bits.iter().map(|b| b.count_ones() as usize).sum();
        self.null_count = self.len - ones;
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| bit_util::get_bit(&self.bits, i))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Arrow view of this bitmap, or `None` when every slot is present.
    pub fn to_null_buffer(&self) -> Option<NullBuffer> {
        if self.null_count == 0 {
            return None;
        }
        let buffer = Buffer::from_vec(self.bits.clone());
        Some(NullBuffer::new(BooleanBuffer::new(buffer, 0, self.len)))
    }

    pub fn from_null_buffer(nulls: Option<&NullBuffer>, len: usize) -> Self {
        match nulls {
            Some(nulls) => Self::from_fn(len, |i| nulls.is_valid(i)),
            None => Self::all_valid(len),
        }
    }
}
