//! Element types for numcol columns.
//!
//! A column stores one fixed-width element type `T: Element`. The type decides
//! which operation families ([`Capabilities`]) are available and supplies the
//! checked per-element arithmetic the kernels fold with.

pub mod capabilities;
pub mod element;
pub mod ops;
pub mod timestamp;

pub use capabilities::Capabilities;
pub use element::{Element, unimplemented_operations};
pub use ops::{BinaryOp, CompareOp, CumulativeOp, ReduceOp, ShiftOp, UnaryOp};
pub use timestamp::Timestamp;

/// Invokes `$macro` once per built-in element type.
///
/// The callback receives the native Rust type, e.g. `$macro!(i32)`. Used to
/// register strategies and to stamp out per-type tests without repeating the
/// type list.
#[macro_export]
macro_rules! numcol_for_each_element {
    ($macro:ident) => {
        $macro!(i8);
        $macro!(i16);
        $macro!(i32);
        $macro!(i64);
        $macro!(u8);
        $macro!(u16);
        $macro!(u32);
        $macro!(u64);
        $macro!(f32);
        $macro!(f64);
        $macro!(bool);
        $macro!($crate::Timestamp);
    };
}
