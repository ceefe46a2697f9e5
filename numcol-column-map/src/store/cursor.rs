use numcol_result::Result;

use super::layout::ChunkLayout;

/// Cached chunk window for walking an arbitrary row sequence.
///
/// Row-subset kernels are usually fed sequential or chunk-local rows, so the
/// cursor keeps the `[min_range, max_range)` window of the last chunk it
/// resolved and only re-derives the chunk index when a row falls outside it.
#[derive(Debug, Clone)]
pub struct RowCursor {
    layout: ChunkLayout,
    chunk_index: usize,
    min_range: i64,
    max_range: i64,
    relocations: usize,
}

impl RowCursor {
    pub fn new(layout: ChunkLayout) -> Self {
        Self {
            layout,
            chunk_index: 0,
            min_range: 0,
            max_range: 0,
            relocations: 0,
        }
    }

    /// Resolve `row` to `(chunk index, offset)`, re-locating only on a window miss.
    #[inline]
    pub fn seek(&mut self, row: i64) -> Result<(usize, usize)> {
        if row < self.min_range || row >= self.max_range {
            let (chunk, _) = self.layout.locate(row)?;
            let window = self.layout.chunk_range(chunk);
            self.chunk_index = chunk;
            self.min_range = window.start;
            self.max_range = window.end;
            self.relocations += 1;
            tracing::trace!(row, chunk, "row cursor relocated");
        }
        Ok((self.chunk_index, (row - self.min_range) as usize))
    }

    #[inline]
    pub fn chunk_index(&self) -> usize {
        self.chunk_index
    }

    /// Number of times the window had to be re-derived.
    #[inline]
    pub fn relocations(&self) -> usize {
        self.relocations
    }
}
