use std::sync::Once;

use numcol_column_map::{ChunkedColumnStore, ColumnStoreConfig};
use numcol_types::Element;

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
///
/// Honours `RUST_LOG`; defaults to `warn` so copy-on-write and cursor traces
/// stay quiet unless asked for.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

/// Build a store with `chunk_capacity` elements per chunk from optional values.
pub fn chunked<T: Element>(
    chunk_capacity: usize,
    values: impl IntoIterator<Item = Option<T>>,
) -> ChunkedColumnStore<T> {
    let config = ColumnStoreConfig::with_max_chunk_capacity(chunk_capacity);
    let mut store = ChunkedColumnStore::with_config(config)
        .unwrap_or_else(|e| panic!("invalid test chunk capacity {chunk_capacity}: {e}"));
    store.extend(values);
    store
}

/// Like [`chunked`] for columns without nulls.
pub fn chunked_values<T: Element>(
    chunk_capacity: usize,
    values: impl IntoIterator<Item = T>,
) -> ChunkedColumnStore<T> {
    chunked(chunk_capacity, values.into_iter().map(Some))
}

#[cfg(feature = "auto-init")]
mod auto {
    // Runs at binary init time so individual tests need not call the initializer.
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}
