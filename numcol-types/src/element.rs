//! The per-element numeric contract.
//!
//! Every fixed-width element type a column can hold implements [`Element`].
//! The trait's default method bodies report [`Error::UnsupportedOperation`]; a
//! type overrides exactly the operations its [`Capabilities`] advertise. Kernels
//! are generic over `T: Element`, so each operation is monomorphized per element
//! type and the inner loops contain no dynamic dispatch.

use std::fmt;

use arrow::datatypes::DataType;
use numcol_result::{Error, Result};

use crate::{BinaryOp, Capabilities, ShiftOp, UnaryOp};

pub trait Element:
    Copy + Default + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static
{
    /// Arrow logical type that describes this element.
    const DATA_TYPE: DataType;

    /// Operation families this element type supports.
    ///
    /// Every method of an advertised family must be overridden: strategies
    /// gate on these flags alone and never fall back at the element level.
    /// [`unimplemented_operations`] lists the ones still on a default body.
    const CAPABILITIES: Capabilities;

    /// Additive identity (also the seed for row-subset reductions).
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    fn add_checked(self, _rhs: Self) -> Result<Self> {
        Err(Error::unsupported(BinaryOp::Add, Self::DATA_TYPE))
    }

    fn sub_checked(self, _rhs: Self) -> Result<Self> {
        Err(Error::unsupported(BinaryOp::Subtract, Self::DATA_TYPE))
    }

    fn mul_checked(self, _rhs: Self) -> Result<Self> {
        Err(Error::unsupported(BinaryOp::Multiply, Self::DATA_TYPE))
    }

    fn div_checked(self, _rhs: Self) -> Result<Self> {
        Err(Error::unsupported(BinaryOp::Divide, Self::DATA_TYPE))
    }

    fn rem_checked(self, _rhs: Self) -> Result<Self> {
        Err(Error::unsupported(BinaryOp::Modulo, Self::DATA_TYPE))
    }

    fn bit_and(self, _rhs: Self) -> Result<Self> {
        Err(Error::unsupported(BinaryOp::And, Self::DATA_TYPE))
    }

    fn bit_or(self, _rhs: Self) -> Result<Self> {
        Err(Error::unsupported(BinaryOp::Or, Self::DATA_TYPE))
    }

    fn bit_xor(self, _rhs: Self) -> Result<Self> {
        Err(Error::unsupported(BinaryOp::Xor, Self::DATA_TYPE))
    }

    /// Shift left by `amount` bits.
    ///
    /// Amounts outside `[0, bit width)` are rejected with
    /// [`Error::InvalidArgumentError`] for every integer type. Bits shifted past
    /// the top are discarded, matching the native `<<` operator.
    fn shl_checked(self, _amount: i32) -> Result<Self> {
        Err(Error::unsupported(ShiftOp::Left, Self::DATA_TYPE))
    }

    /// Shift right by `amount` bits (arithmetic for signed types).
    ///
    /// Same range rule as [`Element::shl_checked`].
    fn shr_checked(self, _amount: i32) -> Result<Self> {
        Err(Error::unsupported(ShiftOp::Right, Self::DATA_TYPE))
    }

    fn abs_checked(self) -> Result<Self> {
        Err(Error::unsupported(UnaryOp::Abs, Self::DATA_TYPE))
    }

    fn neg_checked(self) -> Result<Self> {
        Err(Error::unsupported(UnaryOp::Negate, Self::DATA_TYPE))
    }

    fn not(self) -> Result<Self> {
        Err(Error::unsupported(UnaryOp::Not, Self::DATA_TYPE))
    }

    fn round(self) -> Result<Self> {
        Err(Error::unsupported(UnaryOp::Round, Self::DATA_TYPE))
    }

    /// Larger of the two values; `self` wins ties and unordered pairs.
    #[inline]
    fn max_of(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    /// Smaller of the two values; `self` wins ties and unordered pairs.
    #[inline]
    fn min_of(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    /// Truth value used by `All`/`Any`.
    #[inline]
    fn is_truthy(self) -> bool {
        self != Self::ZERO
    }
}

/// Operators advertised by `T::CAPABILITIES` whose method still reports
/// [`Error::UnsupportedOperation`]. Empty for a consistent element type.
///
/// Each method is called once on `T::ONE`; only the unsupported error counts,
/// so an overflow on those operands is not a gap.
pub fn unimplemented_operations<T: Element>() -> Vec<String> {
    let one = T::ONE;
    let checks = [
        (Capabilities::ARITHMETIC, one.add_checked(one)),
        (Capabilities::ARITHMETIC, one.sub_checked(one)),
        (Capabilities::ARITHMETIC, one.mul_checked(one)),
        (Capabilities::ARITHMETIC, one.div_checked(one)),
        (Capabilities::ARITHMETIC, one.rem_checked(one)),
        (Capabilities::ARITHMETIC, one.abs_checked()),
        (Capabilities::BITWISE, one.bit_and(one)),
        (Capabilities::BITWISE, one.bit_or(one)),
        (Capabilities::BITWISE, one.bit_xor(one)),
        (Capabilities::BITWISE, one.not()),
        (Capabilities::SHIFT, one.shl_checked(0)),
        (Capabilities::SHIFT, one.shr_checked(0)),
        (Capabilities::NEGATE, one.neg_checked()),
        (Capabilities::ROUNDING, one.round()),
    ];
    checks
        .into_iter()
        .filter(|(family, _)| T::CAPABILITIES.contains(*family))
        .filter_map(|(_, outcome)| match outcome {
            Err(Error::UnsupportedOperation { op, .. }) => Some(op),
            _ => None,
        })
        .collect()
}

#[inline]
fn shift_amount<T: Element>(amount: i32, bits: u32) -> Result<u32> {
    if amount < 0 || amount as u32 >= bits {
        return Err(Error::InvalidArgumentError(format!(
            "shift amount {amount} out of range [0, {bits}) for element type {}",
            T::DATA_TYPE
        )));
    }
    Ok(amount as u32)
}

macro_rules! impl_integer_common {
    ($native:ty) => {
        #[inline]
        fn add_checked(self, rhs: Self) -> Result<Self> {
            self.checked_add(rhs)
                .ok_or_else(|| Error::overflow(BinaryOp::Add, Self::DATA_TYPE))
        }

        #[inline]
        fn sub_checked(self, rhs: Self) -> Result<Self> {
            self.checked_sub(rhs)
                .ok_or_else(|| Error::overflow(BinaryOp::Subtract, Self::DATA_TYPE))
        }

        #[inline]
        fn mul_checked(self, rhs: Self) -> Result<Self> {
            self.checked_mul(rhs)
                .ok_or_else(|| Error::overflow(BinaryOp::Multiply, Self::DATA_TYPE))
        }

        #[inline]
        fn div_checked(self, rhs: Self) -> Result<Self> {
            if rhs == 0 {
                return Err(Error::DivideByZero {
                    data_type: Self::DATA_TYPE,
                });
            }
            // MIN / -1 is the only remaining failure.
            self.checked_div(rhs)
                .ok_or_else(|| Error::overflow(BinaryOp::Divide, Self::DATA_TYPE))
        }

        #[inline]
        fn rem_checked(self, rhs: Self) -> Result<Self> {
            if rhs == 0 {
                return Err(Error::DivideByZero {
                    data_type: Self::DATA_TYPE,
                });
            }
            self.checked_rem(rhs)
                .ok_or_else(|| Error::overflow(BinaryOp::Modulo, Self::DATA_TYPE))
        }

        #[inline]
        fn bit_and(self, rhs: Self) -> Result<Self> {
            Ok(self & rhs)
        }

        #[inline]
        fn bit_or(self, rhs: Self) -> Result<Self> {
            Ok(self | rhs)
        }

        #[inline]
        fn bit_xor(self, rhs: Self) -> Result<Self> {
            Ok(self ^ rhs)
        }

        #[inline]
        fn shl_checked(self, amount: i32) -> Result<Self> {
            Ok(self << shift_amount::<Self>(amount, <$native>::BITS)?)
        }

        #[inline]
        fn shr_checked(self, amount: i32) -> Result<Self> {
            Ok(self >> shift_amount::<Self>(amount, <$native>::BITS)?)
        }

        #[inline]
        fn not(self) -> Result<Self> {
            Ok(!self)
        }
    };
}

macro_rules! impl_signed_element {
    ($($native:ty => $dtype:ident),+ $(,)?) => {
        $(
            impl Element for $native {
                const DATA_TYPE: DataType = DataType::$dtype;
                const CAPABILITIES: Capabilities = Capabilities::SIGNED_INTEGER;
                const ZERO: Self = 0;
                const ONE: Self = 1;

                impl_integer_common!($native);

                #[inline]
                fn abs_checked(self) -> Result<Self> {
                    self.checked_abs()
                        .ok_or_else(|| Error::overflow(UnaryOp::Abs, Self::DATA_TYPE))
                }

                #[inline]
                fn neg_checked(self) -> Result<Self> {
                    self.checked_neg()
                        .ok_or_else(|| Error::overflow(UnaryOp::Negate, Self::DATA_TYPE))
                }
            }
        )+
    };
}

macro_rules! impl_unsigned_element {
    ($($native:ty => $dtype:ident),+ $(,)?) => {
        $(
            impl Element for $native {
                const DATA_TYPE: DataType = DataType::$dtype;
                const CAPABILITIES: Capabilities = Capabilities::UNSIGNED_INTEGER;
                const ZERO: Self = 0;
                const ONE: Self = 1;

                impl_integer_common!($native);

                #[inline]
                fn abs_checked(self) -> Result<Self> {
                    Ok(self)
                }
            }
        )+
    };
}

macro_rules! impl_float_element {
    ($($native:ty => $dtype:ident),+ $(,)?) => {
        $(
            impl Element for $native {
                const DATA_TYPE: DataType = DataType::$dtype;
                const CAPABILITIES: Capabilities = Capabilities::FLOAT;
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                #[inline]
                fn add_checked(self, rhs: Self) -> Result<Self> {
                    Ok(self + rhs)
                }

                #[inline]
                fn sub_checked(self, rhs: Self) -> Result<Self> {
                    Ok(self - rhs)
                }

                #[inline]
                fn mul_checked(self, rhs: Self) -> Result<Self> {
                    Ok(self * rhs)
                }

                #[inline]
                fn div_checked(self, rhs: Self) -> Result<Self> {
                    Ok(self / rhs)
                }

                #[inline]
                fn rem_checked(self, rhs: Self) -> Result<Self> {
                    Ok(self % rhs)
                }

                #[inline]
                fn abs_checked(self) -> Result<Self> {
                    Ok(self.abs())
                }

                #[inline]
                fn neg_checked(self) -> Result<Self> {
                    Ok(-self)
                }

                #[inline]
                fn round(self) -> Result<Self> {
                    Ok(<$native>::round(self))
                }
            }
        )+
    };
}

impl_signed_element!(i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64);
impl_unsigned_element!(u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64);
impl_float_element!(f32 => Float32, f64 => Float64);

impl Element for bool {
    const DATA_TYPE: DataType = DataType::Boolean;
    const CAPABILITIES: Capabilities = Capabilities::BOOLEAN;
    const ZERO: Self = false;
    const ONE: Self = true;

    #[inline]
    fn bit_and(self, rhs: Self) -> Result<Self> {
        Ok(self & rhs)
    }

    #[inline]
    fn bit_or(self, rhs: Self) -> Result<Self> {
        Ok(self | rhs)
    }

    #[inline]
    fn bit_xor(self, rhs: Self) -> Result<Self> {
        Ok(self ^ rhs)
    }

    #[inline]
    fn not(self) -> Result<Self> {
        Ok(!self)
    }

    #[inline]
    fn is_truthy(self) -> bool {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_overflow_is_reported() {
        let err = i32::MAX.add_checked(1).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow { .. }));
        assert!(u8::MIN.sub_checked(1).is_err());
        assert!(i64::MIN.div_checked(-1).is_err());
        assert!(i8::MIN.abs_checked().is_err());
        assert_eq!(7u16.abs_checked().unwrap(), 7);
    }

    #[test]
    fn integer_division_by_zero() {
        assert!(matches!(
            10i32.div_checked(0),
            Err(Error::DivideByZero { .. })
        ));
        assert!(matches!(
            10u64.rem_checked(0),
            Err(Error::DivideByZero { .. })
        ));
    }

    #[test]
    fn float_arithmetic_never_errors() {
        assert_eq!(1.0f64.div_checked(0.0).unwrap(), f64::INFINITY);
        assert!(0.0f32.div_checked(0.0).unwrap().is_nan());
        assert_eq!(f64::MAX.add_checked(f64::MAX).unwrap(), f64::INFINITY);
        assert_eq!(Element::round(2.5f64).unwrap(), 3.0);
    }

    #[test]
    fn shift_range_is_uniform_across_widths() {
        assert_eq!(1u8.shl_checked(7).unwrap(), 128);
        assert!(1u8.shl_checked(8).is_err());
        assert_eq!(1i64.shl_checked(63).unwrap(), i64::MIN);
        assert!(1i64.shl_checked(64).is_err());
        assert!(1i32.shr_checked(-1).is_err());
        assert_eq!((-8i16).shr_checked(1).unwrap(), -4);
        // Bits shifted past the top are discarded.
        assert_eq!(0x81u8.shl_checked(1).unwrap(), 0x02);
    }

    #[test]
    fn builtins_implement_every_advertised_operation() {
        assert!(unimplemented_operations::<i8>().is_empty());
        assert!(unimplemented_operations::<i64>().is_empty());
        assert!(unimplemented_operations::<u32>().is_empty());
        assert!(unimplemented_operations::<f32>().is_empty());
        assert!(unimplemented_operations::<f64>().is_empty());
        assert!(unimplemented_operations::<bool>().is_empty());
        assert!(unimplemented_operations::<crate::Timestamp>().is_empty());
    }

    #[test]
    fn advertised_but_missing_operations_are_listed() {
        #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
        struct Counter(u32);

        impl Element for Counter {
            const DATA_TYPE: DataType = DataType::UInt32;
            const CAPABILITIES: Capabilities = Capabilities::ARITHMETIC;
            const ZERO: Self = Counter(0);
            const ONE: Self = Counter(1);

            fn add_checked(self, rhs: Self) -> Result<Self> {
                Ok(Counter(self.0 + rhs.0))
            }
        }

        assert_eq!(
            unimplemented_operations::<Counter>(),
            vec!["-", "*", "/", "%", "abs"]
        );
    }

    #[test]
    fn bool_rejects_arithmetic() {
        assert!(matches!(
            true.add_checked(true),
            Err(Error::UnsupportedOperation { .. })
        ));
        assert!(true.bit_and(false).is_ok_and(|v| !v));
        assert!(true.is_truthy());
        assert!(!false.is_truthy());
    }
}
