use numcol_result::{Error, Result};

use super::constants::max_chunk_capacity;

/// Run-time configuration for a [`ChunkedColumnStore`](super::ChunkedColumnStore).
///
/// The default derives chunk capacity from [`max_chunk_capacity`]. Tests and
/// callers that want many small chunks can lower it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnStoreConfig {
    /// Elements per chunk. `None` means the process-wide maximum for `T`.
    pub max_chunk_capacity: Option<usize>,
}

impl ColumnStoreConfig {
    pub fn with_max_chunk_capacity(capacity: usize) -> Self {
        Self {
            max_chunk_capacity: Some(capacity),
        }
    }

    /// Effective chunk capacity for element type `T`.
    pub fn chunk_capacity<T>(&self) -> Result<usize> {
        let limit = max_chunk_capacity::<T>();
        match self.max_chunk_capacity {
            None => Ok(limit),
            Some(0) => Err(Error::InvalidArgumentError(
                "chunk capacity must be at least 1".into(),
            )),
            Some(cap) if cap > limit => Err(Error::InvalidArgumentError(format!(
                "chunk capacity {cap} exceeds the maximum of {limit} elements"
            ))),
            Some(cap) => Ok(cap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_scales_with_element_width() {
        let cfg = ColumnStoreConfig::default();
        assert_eq!(cfg.chunk_capacity::<u8>().unwrap(), i32::MAX as usize);
        assert_eq!(cfg.chunk_capacity::<i64>().unwrap(), i32::MAX as usize / 8);
    }

    #[test]
    fn rejects_zero_and_oversized() {
        assert!(ColumnStoreConfig::with_max_chunk_capacity(0)
            .chunk_capacity::<i32>()
            .is_err());
        assert!(ColumnStoreConfig::with_max_chunk_capacity(usize::MAX)
            .chunk_capacity::<i32>()
            .is_err());
        assert_eq!(
            ColumnStoreConfig::with_max_chunk_capacity(3)
                .chunk_capacity::<i32>()
                .unwrap(),
            3
        );
    }
}
