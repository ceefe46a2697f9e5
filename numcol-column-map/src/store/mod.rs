//! Chunked column storage.

pub mod arrow_interop;
pub mod chunk;
pub mod config;
pub mod constants;
pub mod core;
pub mod cursor;
pub mod layout;

pub use arrow_interop::ArrowElement;
pub use chunk::Chunk;
pub use config::ColumnStoreConfig;
pub use constants::{MAX_CHUNK_BYTES, max_chunk_capacity};
pub use self::core::{ChunkSharing, ChunkedColumnStore};
pub use cursor::RowCursor;
pub use layout::ChunkLayout;
