//! Error types and result definitions for the numcol compute core.
//!
//! Every crate in the workspace returns [`Result<T>`] with the single [`Error`]
//! enum defined here, so errors cross crate boundaries with `?` and no
//! conversion glue.
//!
//! # Error Categories
//!
//! - **Capability errors** ([`Error::UnsupportedOperation`]): the element type
//!   cannot perform the requested operation.
//! - **Arithmetic errors** ([`Error::ArithmeticOverflow`], [`Error::DivideByZero`]):
//!   checked integer math failed at a specific element.
//! - **Addressing errors** ([`Error::RowOutOfRange`], [`Error::LengthMismatch`]).
//! - **Configuration errors** ([`Error::UnregisteredType`],
//!   [`Error::InvalidArgumentError`]).
//! - **Interop errors** ([`Error::Arrow`]).
//! - **Internal errors** ([`Error::Internal`]): bugs or violated invariants.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
