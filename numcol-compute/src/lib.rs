//! Compute kernels for numcol columns.
//!
//! Each element type owns a [`Strategy`], resolved once through the
//! [`StrategyRegistry`] and cached by the column that uses it. The strategy
//! gates every request on the element type's capabilities and then runs one of
//! three kernel families:
//!
//! - elementwise arithmetic, bitwise, shift, unary and comparison operators
//!   (column-column and column-scalar);
//! - reductions over whole columns or arbitrary row sequences;
//! - cumulative scans that rewrite a column in place.
//!
//! Kernels are generic over [`Element`](numcol_types::Element), so the per-element
//! work is monomorphized and free of dynamic dispatch.

pub mod column;
mod cumulative;
pub mod elementwise;
mod reduce;
pub mod registry;
pub mod strategy;

pub use column::PrimitiveColumn;
pub use elementwise::ScalarSide;
pub use registry::StrategyRegistry;
pub use strategy::Strategy;
