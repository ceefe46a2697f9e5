//! Elementwise kernels: arithmetic, bitwise, shift, comparison and unary ops.
//!
//! Every kernel writes into a caller-provided working store through
//! [`ChunkedColumnStore::get_mutable_chunk`], so shared chunks are copied
//! before they are touched. The `Strategy` layer wraps these with capability
//! checks and the clone-then-commit step that makes in-place calls atomic.

use numcol_column_map::{Chunk, ChunkedColumnStore, ValidityBitmap};
use numcol_result::{Error, Result};
use numcol_types::{BinaryOp, CompareOp, Element, ShiftOp, UnaryOp};

/// Which side of a vector-scalar operation the scalar sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarSide {
    /// `scalar op column`
    Left,
    /// `column op scalar`
    Right,
}

/// Vector-vector operands must have the same length and the same chunk
/// geometry so chunk `i` of one lines up with chunk `i` of the other.
pub(crate) fn check_aligned<L: Element, R: Element>(
    lhs: &ChunkedColumnStore<L>,
    rhs: &ChunkedColumnStore<R>,
) -> Result<()> {
    if lhs.len() != rhs.len() {
        return Err(Error::LengthMismatch {
            left: lhs.len(),
            right: rhs.len(),
        });
    }
    if lhs.chunk_capacity() != rhs.chunk_capacity() {
        return Err(Error::InvalidArgumentError(format!(
            "operands use different chunk capacities ({} vs {})",
            lhs.chunk_capacity(),
            rhs.chunk_capacity()
        )));
    }
    Ok(())
}

/// `work[i] = f(work[i], rhs[i])` where both sides are valid.
///
/// The result validity is the AND of both inputs. Slots that end up null are
/// reset to `T::default()` and `f` is never called for them, so a null divisor
/// never reaches `div_checked`.
fn zip_in_place<T, F>(
    work: &mut ChunkedColumnStore<T>,
    rhs: &ChunkedColumnStore<T>,
    f: F,
) -> Result<()>
where
    T: Element,
    F: Fn(T, T) -> Result<T>,
{
    check_aligned(work, rhs)?;
    for idx in 0..work.num_chunks() {
        let other = rhs
            .chunk(idx)
            .ok_or_else(|| Error::Internal(format!("right operand is missing chunk {idx}")))?;
        let chunk = work.get_mutable_chunk(idx)?;
        let (values, validity) = chunk.parts_mut();
        validity.and_inplace(other.validity());
        for (i, (slot, r)) in values.iter_mut().zip(other.values()).enumerate() {
            *slot = if validity.is_valid(i) {
                f(*slot, *r)?
            } else {
                T::default()
            };
        }
    }
    Ok(())
}

/// Apply `f` to every valid slot. Validity is unchanged.
fn map_in_place<T, F>(work: &mut ChunkedColumnStore<T>, f: F) -> Result<()>
where
    T: Element,
    F: Fn(T) -> Result<T>,
{
    for idx in 0..work.num_chunks() {
        if work
            .chunk(idx)
            .is_some_and(|c| c.null_count() == c.len())
        {
            continue;
        }
        let (values, validity) = work.get_mutable_chunk(idx)?.parts_mut();
        for (i, slot) in values.iter_mut().enumerate() {
            if validity.is_valid(i) {
                *slot = f(*slot)?;
            }
        }
    }
    Ok(())
}

fn scalar_in_place<T, F>(
    work: &mut ChunkedColumnStore<T>,
    scalar: T,
    side: ScalarSide,
    f: F,
) -> Result<()>
where
    T: Element,
    F: Fn(T, T) -> Result<T>,
{
    match side {
        ScalarSide::Right => map_in_place(work, |v| f(v, scalar)),
        ScalarSide::Left => map_in_place(work, |v| f(scalar, v)),
    }
}

pub(crate) fn binary_in_place<T: Element>(
    work: &mut ChunkedColumnStore<T>,
    rhs: &ChunkedColumnStore<T>,
    op: BinaryOp,
) -> Result<()> {
    match op {
        BinaryOp::Add => zip_in_place(work, rhs, T::add_checked),
        BinaryOp::Subtract => zip_in_place(work, rhs, T::sub_checked),
        BinaryOp::Multiply => zip_in_place(work, rhs, T::mul_checked),
        BinaryOp::Divide => zip_in_place(work, rhs, T::div_checked),
        BinaryOp::Modulo => zip_in_place(work, rhs, T::rem_checked),
        BinaryOp::And => zip_in_place(work, rhs, T::bit_and),
        BinaryOp::Or => zip_in_place(work, rhs, T::bit_or),
        BinaryOp::Xor => zip_in_place(work, rhs, T::bit_xor),
    }
}

pub(crate) fn binary_scalar_in_place<T: Element>(
    work: &mut ChunkedColumnStore<T>,
    scalar: T,
    side: ScalarSide,
    op: BinaryOp,
) -> Result<()> {
    // A zero integer divisor fails up front, even when every slot is null.
    if side == ScalarSide::Right && matches!(op, BinaryOp::Divide | BinaryOp::Modulo) {
        T::ONE.div_checked(scalar)?;
    }
    match op {
        BinaryOp::Add => scalar_in_place(work, scalar, side, T::add_checked),
        BinaryOp::Subtract => scalar_in_place(work, scalar, side, T::sub_checked),
        BinaryOp::Multiply => scalar_in_place(work, scalar, side, T::mul_checked),
        BinaryOp::Divide => scalar_in_place(work, scalar, side, T::div_checked),
        BinaryOp::Modulo => scalar_in_place(work, scalar, side, T::rem_checked),
        BinaryOp::And => scalar_in_place(work, scalar, side, T::bit_and),
        BinaryOp::Or => scalar_in_place(work, scalar, side, T::bit_or),
        BinaryOp::Xor => scalar_in_place(work, scalar, side, T::bit_xor),
    }
}

pub(crate) fn shift_in_place<T: Element>(
    work: &mut ChunkedColumnStore<T>,
    op: ShiftOp,
    amount: i32,
) -> Result<()> {
    // Validate the count once so empty and all-null columns reject it too.
    match op {
        ShiftOp::Left => {
            T::ZERO.shl_checked(amount)?;
            map_in_place(work, |v| v.shl_checked(amount))
        }
        ShiftOp::Right => {
            T::ZERO.shr_checked(amount)?;
            map_in_place(work, |v| v.shr_checked(amount))
        }
    }
}

pub(crate) fn unary_in_place<T: Element>(
    work: &mut ChunkedColumnStore<T>,
    op: UnaryOp,
) -> Result<()> {
    match op {
        UnaryOp::Abs => map_in_place(work, T::abs_checked),
        UnaryOp::Negate => map_in_place(work, T::neg_checked),
        UnaryOp::Not => map_in_place(work, T::not),
        UnaryOp::Round => map_in_place(work, T::round),
    }
}

/// Build a boolean store chunk by chunk, mirroring `lhs`'s chunk geometry.
fn compare_chunks<T, F>(
    lhs: &ChunkedColumnStore<T>,
    mut chunk_fn: F,
) -> Result<ChunkedColumnStore<bool>>
where
    T: Element,
    F: FnMut(usize, &Chunk<T>) -> Result<(Vec<bool>, ValidityBitmap)>,
{
    let cap = lhs.chunk_capacity();
    let mut chunks = Vec::with_capacity(lhs.num_chunks());
    for (idx, chunk) in lhs.chunks().enumerate() {
        let (values, validity) = chunk_fn(idx, chunk)?;
        chunks.push(Chunk::from_parts(values, validity, cap)?);
    }
    ChunkedColumnStore::from_chunks(chunks, cap)
}

fn compare_zip<T, F>(
    lhs: &ChunkedColumnStore<T>,
    rhs: &ChunkedColumnStore<T>,
    cmp: F,
) -> Result<ChunkedColumnStore<bool>>
where
    T: Element,
    F: Fn(&T, &T) -> bool,
{
    check_aligned(lhs, rhs)?;
    compare_chunks(lhs, |idx, left| {
        let right = rhs
            .chunk(idx)
            .ok_or_else(|| Error::Internal(format!("right operand is missing chunk {idx}")))?;
        let mut validity = left.validity().clone();
        validity.and_inplace(right.validity());
        let values = left
            .values()
            .iter()
            .zip(right.values())
            .enumerate()
            .map(|(i, (l, r))| validity.is_valid(i) && cmp(l, r))
            .collect();
        Ok((values, validity))
    })
}

fn compare_map<T, F>(lhs: &ChunkedColumnStore<T>, cmp: F) -> Result<ChunkedColumnStore<bool>>
where
    T: Element,
    F: Fn(&T) -> bool,
{
    compare_chunks(lhs, |_, chunk| {
        let validity = chunk.validity().clone();
        let values = chunk
            .values()
            .iter()
            .enumerate()
            .map(|(i, v)| validity.is_valid(i) && cmp(v))
            .collect();
        Ok((values, validity))
    })
}

pub(crate) fn compare<T: Element>(
    lhs: &ChunkedColumnStore<T>,
    rhs: &ChunkedColumnStore<T>,
    op: CompareOp,
) -> Result<ChunkedColumnStore<bool>> {
    match op {
        CompareOp::Eq => compare_zip(lhs, rhs, |l, r| l == r),
        CompareOp::NotEq => compare_zip(lhs, rhs, |l, r| l != r),
        CompareOp::Lt => compare_zip(lhs, rhs, |l, r| l < r),
        CompareOp::LtEq => compare_zip(lhs, rhs, |l, r| l <= r),
        CompareOp::Gt => compare_zip(lhs, rhs, |l, r| l > r),
        CompareOp::GtEq => compare_zip(lhs, rhs, |l, r| l >= r),
    }
}

pub(crate) fn compare_scalar<T: Element>(
    column: &ChunkedColumnStore<T>,
    scalar: T,
    side: ScalarSide,
    op: CompareOp,
) -> Result<ChunkedColumnStore<bool>> {
    // Normalize to `column op scalar`.
    let op = match side {
        ScalarSide::Right => op,
        ScalarSide::Left => op.flip(),
    };
    match op {
        CompareOp::Eq => compare_map(column, |v| *v == scalar),
        CompareOp::NotEq => compare_map(column, |v| *v != scalar),
        CompareOp::Lt => compare_map(column, |v| *v < scalar),
        CompareOp::LtEq => compare_map(column, |v| *v <= scalar),
        CompareOp::Gt => compare_map(column, |v| *v > scalar),
        CompareOp::GtEq => compare_map(column, |v| *v >= scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numcol_test_utils::chunked as store;

    #[test]
    fn null_divisor_clears_validity_without_dividing() {
        let mut work = store(2, [Some(10), Some(9), Some(8)]);
        let divisor = store(2, [Some(2), None, None]);
        binary_in_place(&mut work, &divisor, BinaryOp::Divide).unwrap();
        assert_eq!(work.to_vec(), vec![Some(5), None, None]);
        assert_eq!(work.chunk(0).unwrap().raw(1), 0);
    }

    #[test]
    fn scalar_side_controls_operand_order() {
        let mut right = store(4, [Some(10i64), Some(20)]);
        binary_scalar_in_place(&mut right, 3, ScalarSide::Right, BinaryOp::Subtract).unwrap();
        assert_eq!(right.to_vec(), vec![Some(7), Some(17)]);

        let mut left = store(4, [Some(10i64), Some(20)]);
        binary_scalar_in_place(&mut left, 3, ScalarSide::Left, BinaryOp::Subtract).unwrap();
        assert_eq!(left.to_vec(), vec![Some(-7), Some(-17)]);
    }

    #[test]
    fn zero_scalar_divisor_fails_before_work() {
        let mut all_null = store::<i32>(4, [None, None]);
        let err = binary_scalar_in_place(&mut all_null, 0, ScalarSide::Right, BinaryOp::Modulo)
            .unwrap_err();
        assert!(matches!(err, Error::DivideByZero { .. }));
    }

    #[test]
    fn shift_rejects_bad_count_on_empty_column() {
        let mut empty = store::<u16>(4, []);
        assert!(shift_in_place(&mut empty, ShiftOp::Left, 16).is_err());
        let mut s = store(4, [Some(1u16), None]);
        shift_in_place(&mut s, ShiftOp::Left, 3).unwrap();
        assert_eq!(s.to_vec(), vec![Some(8), None]);
    }

    #[test]
    fn compare_propagates_nulls_and_flips_scalar_side() {
        let lhs = store(2, [Some(1.5f64), None, Some(3.0)]);
        let rhs = store(2, [Some(1.0f64), Some(2.0), Some(3.0)]);
        let gt = compare(&lhs, &rhs, CompareOp::Gt).unwrap();
        assert_eq!(gt.to_vec(), vec![Some(true), None, Some(false)]);
        assert_eq!(gt.num_chunks(), 2);

        // 2.0 < v  <=>  v > 2.0
        let lt = compare_scalar(&lhs, 2.0, ScalarSide::Left, CompareOp::Lt).unwrap();
        assert_eq!(lt.to_vec(), vec![Some(false), None, Some(true)]);
    }

    #[test]
    fn misaligned_operands_are_rejected() {
        let mut a = store(2, [Some(1), Some(2)]);
        let short = store(2, [Some(1)]);
        assert!(matches!(
            binary_in_place(&mut a, &short, BinaryOp::Add),
            Err(Error::LengthMismatch { left: 2, right: 1 })
        ));
        let wide = store(4, [Some(1), Some(2)]);
        assert!(binary_in_place(&mut a, &wide, BinaryOp::Add).is_err());
    }
}
