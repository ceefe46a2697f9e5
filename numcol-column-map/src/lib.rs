//! Chunked, validity-tracked storage for fixed-width columns.
//!
//! A [`ChunkedColumnStore`] is one logical column split into bounded
//! [`Chunk`]s so its length can exceed what a single 32-bit addressed buffer
//! holds. Each chunk carries a [`ValidityBitmap`] marking null slots. Chunks are
//! reference counted; cloning a store shares them, and every write passes
//! through the copy-on-write gate [`ChunkedColumnStore::get_mutable_chunk`].

pub mod bitmap;
pub mod store;

pub use bitmap::ValidityBitmap;
pub use numcol_result::{Error, Result};
pub use store::{
    ArrowElement, Chunk, ChunkLayout, ChunkSharing, ChunkedColumnStore, ColumnStoreConfig,
    MAX_CHUNK_BYTES, RowCursor, max_chunk_capacity,
};
