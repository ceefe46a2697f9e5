use crate::error::Error;

/// Result type alias used throughout numcol.
pub type Result<T> = std::result::Result<T, Error>;
