//! numcol: chunked numeric columns with null tracking and typed kernels.
//!
//! This crate is the entrypoint for the workspace. It re-exports the column
//! façade, the storage layer and the operator vocabulary from the underlying
//! `numcol-*` crates.
//!
//! # Quick Start
//!
//! ```rust
//! use numcol::{ColumnStoreConfig, PrimitiveColumn};
//!
//! let config = ColumnStoreConfig::with_max_chunk_capacity(3);
//! let mut col = PrimitiveColumn::from_values([1i32, 2, 3, 4, 5], config).unwrap();
//! assert_eq!(col.sum().unwrap(), 15);
//! assert_eq!(col.max().unwrap(), Some(5));
//!
//! col.cumulative_sum().unwrap();
//! assert_eq!(col.get(4).unwrap(), Some(15));
//! ```
//!
//! # Architecture
//!
//! - **Errors** (`numcol-result`): the workspace-wide `Error` enum.
//! - **Element types** (`numcol-types`): the `Element` trait, capability
//!   flags, `Timestamp`, and operator enums.
//! - **Storage** (`numcol-column-map`): validity bitmaps, chunks, and the
//!   copy-on-write `ChunkedColumnStore`.
//! - **Compute** (`numcol-compute`): the strategy registry and the
//!   elementwise, reduction, and cumulative kernels.

pub use numcol_compute::{PrimitiveColumn, ScalarSide, Strategy, StrategyRegistry};

pub mod storage {
    //! Chunked storage primitives.

    pub use numcol_column_map::{
        ArrowElement, Chunk, ChunkLayout, ChunkSharing, ChunkedColumnStore, MAX_CHUNK_BYTES,
        RowCursor, ValidityBitmap, max_chunk_capacity,
    };
}

pub use numcol_column_map::ColumnStoreConfig;

pub use numcol_types::{
    BinaryOp, Capabilities, CompareOp, CumulativeOp, Element, ReduceOp, ShiftOp, Timestamp,
    UnaryOp,
};

pub use numcol_result::{Error, Result};
