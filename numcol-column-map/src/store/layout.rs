use std::ops::Range;

use numcol_result::{Error, Result};

/// Geometry of a chunked column: total length and per-chunk capacity.
///
/// Every chunk except possibly the last holds exactly `chunk_capacity`
/// elements, so row-to-chunk translation is pure arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLayout {
    len: i64,
    chunk_capacity: usize,
}

impl ChunkLayout {
    pub fn new(len: i64, chunk_capacity: usize) -> Self {
        debug_assert!(chunk_capacity > 0);
        Self {
            len,
            chunk_capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> i64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    pub fn num_chunks(&self) -> usize {
        (self.len as usize).div_ceil(self.chunk_capacity)
    }

    /// Translate a logical row into `(chunk index, offset within chunk)`.
    #[inline]
    pub fn locate(&self, row: i64) -> Result<(usize, usize)> {
        if row < 0 || row >= self.len {
            return Err(Error::RowOutOfRange { row, len: self.len });
        }
        let cap = self.chunk_capacity as i64;
        let chunk = row / cap;
        Ok((chunk as usize, (row - chunk * cap) as usize))
    }

    /// Logical rows covered by chunk `index`.
    pub fn chunk_range(&self, index: usize) -> Range<i64> {
        let cap = self.chunk_capacity as i64;
        let start = (index as i64).saturating_mul(cap).min(self.len);
        let end = start.saturating_add(cap).min(self.len);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_uses_fixed_capacity() {
        let layout = ChunkLayout::new(5, 3);
        assert_eq!(layout.num_chunks(), 2);
        assert_eq!(layout.locate(0).unwrap(), (0, 0));
        assert_eq!(layout.locate(2).unwrap(), (0, 2));
        assert_eq!(layout.locate(3).unwrap(), (1, 0));
        assert_eq!(layout.locate(4).unwrap(), (1, 1));
        assert_eq!(layout.chunk_range(1), 3..5);
    }

    #[test]
    fn locate_rejects_out_of_range() {
        let layout = ChunkLayout::new(5, 3);
        assert!(matches!(
            layout.locate(5),
            Err(Error::RowOutOfRange { row: 5, len: 5 })
        ));
        assert!(matches!(
            layout.locate(-1),
            Err(Error::RowOutOfRange { row: -1, .. })
        ));
        assert!(ChunkLayout::new(0, 8).locate(0).is_err());
    }
}
