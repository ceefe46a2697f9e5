use std::sync::Arc;

use numcol_result::{Error, Result};
use numcol_types::Element;

use super::chunk::Chunk;
use super::config::ColumnStoreConfig;
use super::layout::ChunkLayout;

/// Ownership state of one chunk slot in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSharing {
    /// Only this store references the chunk; it may be mutated in place.
    Exclusive,
    /// Other stores (clones or views) also reference the chunk.
    Shared { holders: usize },
}

/// One logical column stored as an ordered list of [`Chunk`]s.
///
/// Cloning a store is copy-free: the clone shares every chunk. All mutation
/// funnels through [`ChunkedColumnStore::get_mutable_chunk`], which copies a
/// shared chunk before handing out `&mut` access, so writes through one store
/// are never observable through another.
#[derive(Debug, Clone)]
pub struct ChunkedColumnStore<T: Element> {
    chunks: Vec<Arc<Chunk<T>>>,
    len: i64,
    chunk_capacity: usize,
}

impl<T: Element> Default for ChunkedColumnStore<T> {
    fn default() -> Self {
        Self {
            chunks: Vec::new(),
            len: 0,
            chunk_capacity: super::constants::max_chunk_capacity::<T>(),
        }
    }
}

impl<T: Element> ChunkedColumnStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ColumnStoreConfig) -> Result<Self> {
        Ok(Self {
            chunks: Vec::new(),
            len: 0,
            chunk_capacity: config.chunk_capacity::<T>()?,
        })
    }

    /// A pre-sized column of `len` null slots.
    pub fn with_nulls(len: i64, config: ColumnStoreConfig) -> Result<Self> {
        if len < 0 {
            return Err(Error::InvalidArgumentError(format!(
                "column length must be non-negative, got {len}"
            )));
        }
        let mut store = Self::with_config(config)?;
        let cap = store.chunk_capacity;
        let mut remaining = len as usize;
        while remaining > 0 {
            let take = remaining.min(cap);
            store.chunks.push(Arc::new(Chunk::with_nulls(cap, take)));
            remaining -= take;
        }
        store.len = len;
        tracing::trace!(
            len,
            chunks = store.chunks.len(),
            chunk_capacity = cap,
            "allocated all-null column"
        );
        Ok(store)
    }

    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut store = Self::new();
        store.extend_values(values);
        store
    }

    pub fn from_options<I: IntoIterator<Item = Option<T>>>(values: I) -> Self {
        let mut store = Self::new();
        store.extend(values);
        store
    }

    /// Assemble a store from pre-built chunks.
    ///
    /// Every chunk but the last must be filled to `chunk_capacity`.
    pub fn from_chunks(chunks: Vec<Chunk<T>>, chunk_capacity: usize) -> Result<Self> {
        let mut len: i64 = 0;
        let count = chunks.len();
        for (idx, chunk) in chunks.iter().enumerate() {
            if chunk.capacity() != chunk_capacity {
                return Err(Error::Internal(format!(
                    "chunk {idx} has capacity {}, expected {chunk_capacity}",
                    chunk.capacity()
                )));
            }
            let is_last = idx + 1 == count;
            if (!is_last && chunk.len() != chunk_capacity) || (is_last && chunk.is_empty()) {
                return Err(Error::Internal(format!(
                    "chunk {idx} of {count} has length {}; only the last chunk may be partially filled",
                    chunk.len()
                )));
            }
            len += chunk.len() as i64;
        }
        Ok(Self {
            chunks: chunks.into_iter().map(Arc::new).collect(),
            len,
            chunk_capacity,
        })
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

    #[inline]
    pub fn layout(&self) -> ChunkLayout {
        ChunkLayout::new(self.len, self.chunk_capacity)
    }

    pub fn null_count(&self) -> i64 {
        self.chunks.iter().map(|c| c.null_count() as i64).sum()
    }

    #[inline]
    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn chunk(&self, index: usize) -> Option<&Chunk<T>> {
        self.chunks.get(index).map(Arc::as_ref)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk<T>> + '_ {
        self.chunks.iter().map(Arc::as_ref)
    }

    pub fn chunk_sharing(&self, index: usize) -> Option<ChunkSharing> {
        self.chunks.get(index).map(|c| match Arc::strong_count(c) {
            1 => ChunkSharing::Exclusive,
            holders => ChunkSharing::Shared { holders },
        })
    }

    pub fn is_chunk_shared(&self, index: usize) -> bool {
        matches!(self.chunk_sharing(index), Some(ChunkSharing::Shared { .. }))
    }

    /// `LocateRow`: translate a logical row into `(chunk index, offset)`.
    #[inline]
    pub fn locate_row(&self, row: i64) -> Result<(usize, usize)> {
        self.layout().locate(row)
    }

    /// Returns a chunk that is safe to mutate in place.
    ///
    /// This is the single copy-on-write choke point: an exclusively owned chunk
    /// is returned directly; a shared chunk is copied (values and validity) and
    /// the copy replaces this store's reference. Appends to the tail chunk go
    /// through the same path.
    pub fn get_mutable_chunk(&mut self, index: usize) -> Result<&mut Chunk<T>> {
        let count = self.chunks.len();
        let slot = self.chunks.get_mut(index).ok_or_else(|| {
            Error::Internal(format!("chunk index {index} out of range ({count} chunks)"))
        })?;
        Ok(make_exclusive(slot, index))
    }

    /// `GetValue`: the element at `row`, or `None` if it is null.
    pub fn get(&self, row: i64) -> Result<Option<T>> {
        let (chunk, offset) = self.locate_row(row)?;
        Ok(self.chunks[chunk].get(offset))
    }

    /// `SetValue`: overwrite `row` with a value or null.
    pub fn set(&mut self, row: i64, value: Option<T>) -> Result<()> {
        let (chunk, offset) = self.locate_row(row)?;
        self.get_mutable_chunk(chunk)?.set(offset, value);
        Ok(())
    }

    /// Append one element, opening a new chunk when the tail chunk is full.
    pub fn push(&mut self, value: Option<T>) {
        let tail_has_room = self.chunks.last().is_some_and(|c| !c.is_full());
        let last = self.chunks.len().wrapping_sub(1);
        if tail_has_room && let Some(slot) = self.chunks.get_mut(last) {
            make_exclusive(slot, last).push(value);
        } else {
            tracing::trace!(
                chunk = self.chunks.len(),
                chunk_capacity = self.chunk_capacity,
                "opening new chunk"
            );
            let mut chunk = Chunk::new(self.chunk_capacity);
            chunk.push(value);
            self.chunks.push(Arc::new(chunk));
        }
        self.len += 1;
    }

    pub fn extend_values<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for v in values {
            self.push(Some(v));
        }
    }

    /// Replace every null slot with `value`.
    pub fn fill_nulls(&mut self, value: T) -> Result<()> {
        for idx in 0..self.chunks.len() {
            if self.chunks[idx].null_count() == 0 {
                continue;
            }
            let chunk = self.get_mutable_chunk(idx)?;
            for offset in 0..chunk.len() {
                if !chunk.is_valid(offset) {
                    chunk.set(offset, Some(value));
                }
            }
        }
        Ok(())
    }

    /// Elements in logical row order.
    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        self.chunks.iter().flat_map(|c| c.iter())
    }

    pub fn to_vec(&self) -> Vec<Option<T>> {
        self.iter().collect()
    }
}

fn make_exclusive<T: Element>(slot: &mut Arc<Chunk<T>>, index: usize) -> &mut Chunk<T> {
    if Arc::get_mut(slot).is_none() {
        tracing::trace!(
            chunk = index,
            holders = Arc::strong_count(slot),
            len = slot.len(),
            "copy-on-write: materializing shared chunk"
        );
    }
    Arc::make_mut(slot)
}

impl<T: Element> Extend<Option<T>> for ChunkedColumnStore<T> {
    fn extend<I: IntoIterator<Item = Option<T>>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

impl<T: Element> FromIterator<Option<T>> for ChunkedColumnStore<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        Self::from_options(iter)
    }
}

impl<T: Element> PartialEq for ChunkedColumnStore<T> {
    /// Logical equality: same length and the same element (or null) at every row.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(cap: usize) -> ColumnStoreConfig {
        ColumnStoreConfig::with_max_chunk_capacity(cap)
    }

    #[test]
    fn push_fills_tail_before_opening_chunk() {
        let mut store = ChunkedColumnStore::<i32>::with_config(small(3)).unwrap();
        store.extend_values([1, 2, 3, 4, 5]);
        assert_eq!(store.len(), 5);
        assert_eq!(store.num_chunks(), 2);
        assert_eq!(store.chunk(0).unwrap().len(), 3);
        assert_eq!(store.chunk(1).unwrap().len(), 2);
        assert_eq!(store.get(3).unwrap(), Some(4));
    }

    #[test]
    fn with_nulls_presizes_all_null() {
        let store = ChunkedColumnStore::<f64>::with_nulls(7, small(3)).unwrap();
        assert_eq!(store.num_chunks(), 3);
        assert_eq!(store.null_count(), 7);
        assert!(store.iter().all(|v| v.is_none()));
        assert!(ChunkedColumnStore::<f64>::with_nulls(-1, small(3)).is_err());
    }

    #[test]
    fn from_chunks_enforces_full_prefix() {
        let mut a = Chunk::<u8>::new(2);
        a.push(Some(1));
        let mut b = Chunk::<u8>::new(2);
        b.push(Some(2));
        assert!(ChunkedColumnStore::from_chunks(vec![a.clone(), b.clone()], 2).is_err());
        a.push(Some(9));
        let store = ChunkedColumnStore::from_chunks(vec![a, b], 2).unwrap();
        assert_eq!(store.to_vec(), vec![Some(1), Some(9), Some(2)]);
    }

    #[test]
    fn fill_nulls_only_touches_null_slots() {
        let mut store = ChunkedColumnStore::<i16>::with_config(small(2)).unwrap();
        store.extend([Some(1), None, Some(3), None, Some(5)]);
        store.fill_nulls(0).unwrap();
        assert_eq!(store.null_count(), 0);
        assert_eq!(
            store.to_vec(),
            vec![Some(1), Some(0), Some(3), Some(0), Some(5)]
        );
    }
}
