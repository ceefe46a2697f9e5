use std::fmt;

use arrow::datatypes::DataType;
use thiserror::Error;

/// Unified error type for every numcol operation.
///
/// All failures are synchronous and local to the call that raised them. An
/// operation either returns its complete output or fails as a whole; no variant
/// carries partial results.
///
/// # Error Handling Strategy
///
/// Errors propagate upward with `?`. Callers that front the core with a
/// user-facing column API typically match on [`Error::UnsupportedOperation`]
/// to attach column/type context before surfacing the failure.
#[derive(Error, Debug)]
pub enum Error {
    /// The element type's strategy does not implement the requested capability.
    ///
    /// Raised before any element is visited, for example when requesting
    /// `Sum` over a boolean column or `Add` over a timestamp column.
    #[error("unsupported operation `{op}` for element type {data_type}")]
    UnsupportedOperation { op: String, data_type: DataType },

    /// Integer checked arithmetic wrapped around.
    ///
    /// Floating-point element types never raise this; they follow IEEE 754
    /// semantics and may produce infinities or NaN instead.
    #[error("arithmetic overflow in `{op}` for element type {data_type}")]
    ArithmeticOverflow { op: String, data_type: DataType },

    /// Integer division or remainder with a zero divisor.
    #[error("division by zero for element type {data_type}")]
    DivideByZero { data_type: DataType },

    /// A logical row index outside `[0, len)`.
    #[error("row index {row} out of range for column of length {len}")]
    RowOutOfRange { row: i64, len: i64 },

    /// Two operands of a vector-vector operation have different lengths.
    #[error("length mismatch: left has {left} rows, right has {right} rows")]
    LengthMismatch { left: i64, right: i64 },

    /// The element type was never registered with the strategy registry.
    ///
    /// This is a configuration error: it indicates a downstream element type
    /// that implements `Element` but skipped `StrategyRegistry::register`.
    #[error("no strategy registered for element type `{0}`")]
    UnregisteredType(String),

    /// Invalid user input or API parameter.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Arrow library error while converting chunks to or from Arrow arrays.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Internal error indicating a bug or unexpected state.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create an unsupported-operation error for `op` on `data_type`.
    #[inline]
    pub fn unsupported<O: fmt::Display>(op: O, data_type: DataType) -> Self {
        Error::UnsupportedOperation {
            op: op.to_string(),
            data_type,
        }
    }

    /// Create an arithmetic-overflow error for `op` on `data_type`.
    #[inline]
    pub fn overflow<O: fmt::Display>(op: O, data_type: DataType) -> Self {
        Error::ArithmeticOverflow {
            op: op.to_string(),
            data_type,
        }
    }

    /// Returns `true` for errors raised by checked arithmetic.
    ///
    /// ```
    /// use arrow::datatypes::DataType;
    /// use numcol_result::Error;
    ///
    /// assert!(Error::overflow("+", DataType::Int32).is_arithmetic());
    /// assert!(Error::DivideByZero { data_type: DataType::Int64 }.is_arithmetic());
    /// assert!(!Error::unsupported("sum", DataType::Boolean).is_arithmetic());
    /// ```
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Error::ArithmeticOverflow { .. } | Error::DivideByZero { .. }
        )
    }
}
