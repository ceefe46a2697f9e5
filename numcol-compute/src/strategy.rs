use std::fmt;
use std::marker::PhantomData;

use arrow::datatypes::DataType;
use numcol_column_map::ChunkedColumnStore;
use numcol_result::{Error, Result};
use numcol_types::{
    BinaryOp, Capabilities, CompareOp, CumulativeOp, Element, ReduceOp, ShiftOp, UnaryOp,
};

use crate::elementwise::{self, ScalarSide};
use crate::{cumulative, reduce};

/// The operation table for one element type.
///
/// Strategies are stateless and resolved through
/// [`StrategyRegistry`](crate::StrategyRegistry). Each entry point checks the
/// element type's [`Capabilities`] before touching any data, so an
/// unsupported request fails with [`Error::UnsupportedOperation`] and no
/// partial work.
///
/// In-place entry points (`*_assign`, `cumulative*`) run against a
/// copy-on-write working copy of the column and only replace the caller's
/// store once the whole operation succeeded.
pub struct Strategy<T: Element> {
    data_type: DataType,
    capabilities: Capabilities,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element> fmt::Debug for Strategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("data_type", &self.data_type)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl<T: Element> Strategy<T> {
    pub(crate) fn new() -> Self {
        Self {
            data_type: T::DATA_TYPE,
            capabilities: T::CAPABILITIES,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[inline]
    pub fn supports(&self, required: Capabilities) -> bool {
        self.capabilities.contains(required)
    }

    /// Fail with [`Error::UnsupportedOperation`] unless `required` is supported.
    pub fn ensure<O: fmt::Display>(&self, required: Capabilities, op: O) -> Result<()> {
        if self.supports(required) {
            Ok(())
        } else {
            Err(Error::unsupported(op, self.data_type.clone()))
        }
    }

    fn traced<R>(&self, op: impl fmt::Display, result: Result<R>) -> Result<R> {
        if let Err(err) = &result
            && err.is_arithmetic()
        {
            tracing::debug!(%op, data_type = %self.data_type, error = %err, "kernel failed");
        }
        result
    }

    /// Run `kernel` on a copy-on-write clone of `column` and commit on success.
    fn commit<F>(&self, column: &mut ChunkedColumnStore<T>, kernel: F) -> Result<()>
    where
        F: FnOnce(&mut ChunkedColumnStore<T>) -> Result<()>,
    {
        let mut work = column.clone();
        kernel(&mut work)?;
        *column = work;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Elementwise
    // ------------------------------------------------------------------

    /// `lhs op rhs` for two columns of equal length.
    pub fn binary(
        &self,
        lhs: &ChunkedColumnStore<T>,
        rhs: &ChunkedColumnStore<T>,
        op: BinaryOp,
    ) -> Result<ChunkedColumnStore<T>> {
        self.ensure(op.capability(), op)?;
        let mut out = lhs.clone();
        let result = elementwise::binary_in_place(&mut out, rhs, op);
        self.traced(op, result)?;
        Ok(out)
    }

    /// In-place `lhs op= rhs`.
    pub fn binary_assign(
        &self,
        lhs: &mut ChunkedColumnStore<T>,
        rhs: &ChunkedColumnStore<T>,
        op: BinaryOp,
    ) -> Result<()> {
        self.ensure(op.capability(), op)?;
        let result = self.commit(lhs, |work| elementwise::binary_in_place(work, rhs, op));
        self.traced(op, result)
    }

    /// `column op scalar` or `scalar op column`, depending on `side`.
    pub fn binary_scalar(
        &self,
        column: &ChunkedColumnStore<T>,
        scalar: T,
        side: ScalarSide,
        op: BinaryOp,
    ) -> Result<ChunkedColumnStore<T>> {
        self.ensure(op.capability(), op)?;
        let mut out = column.clone();
        let result = elementwise::binary_scalar_in_place(&mut out, scalar, side, op);
        self.traced(op, result)?;
        Ok(out)
    }

    pub fn binary_scalar_assign(
        &self,
        column: &mut ChunkedColumnStore<T>,
        scalar: T,
        side: ScalarSide,
        op: BinaryOp,
    ) -> Result<()> {
        self.ensure(op.capability(), op)?;
        let result = self.commit(column, |work| {
            elementwise::binary_scalar_in_place(work, scalar, side, op)
        });
        self.traced(op, result)
    }

    /// Shift every valid element by `amount` bits.
    ///
    /// `amount` must lie in `[0, bit width)` of the element type; anything else
    /// is an [`Error::InvalidArgumentError`].
    pub fn shift(
        &self,
        column: &ChunkedColumnStore<T>,
        op: ShiftOp,
        amount: i32,
    ) -> Result<ChunkedColumnStore<T>> {
        self.ensure(Capabilities::SHIFT, op)?;
        let mut out = column.clone();
        elementwise::shift_in_place(&mut out, op, amount)?;
        Ok(out)
    }

    pub fn shift_assign(
        &self,
        column: &mut ChunkedColumnStore<T>,
        op: ShiftOp,
        amount: i32,
    ) -> Result<()> {
        self.ensure(Capabilities::SHIFT, op)?;
        self.commit(column, |work| elementwise::shift_in_place(work, op, amount))
    }

    pub fn unary(
        &self,
        column: &ChunkedColumnStore<T>,
        op: UnaryOp,
    ) -> Result<ChunkedColumnStore<T>> {
        self.ensure(op.capability(), op)?;
        let mut out = column.clone();
        let result = elementwise::unary_in_place(&mut out, op);
        self.traced(op, result)?;
        Ok(out)
    }

    pub fn unary_assign(&self, column: &mut ChunkedColumnStore<T>, op: UnaryOp) -> Result<()> {
        self.ensure(op.capability(), op)?;
        let result = self.commit(column, |work| elementwise::unary_in_place(work, op));
        self.traced(op, result)
    }

    /// Elementwise comparison. A null on either side yields a null result.
    pub fn compare(
        &self,
        lhs: &ChunkedColumnStore<T>,
        rhs: &ChunkedColumnStore<T>,
        op: CompareOp,
    ) -> Result<ChunkedColumnStore<bool>> {
        self.ensure(op.capability(), op)?;
        elementwise::compare(lhs, rhs, op)
    }

    pub fn compare_scalar(
        &self,
        column: &ChunkedColumnStore<T>,
        scalar: T,
        side: ScalarSide,
        op: CompareOp,
    ) -> Result<ChunkedColumnStore<bool>> {
        self.ensure(op.capability(), op)?;
        elementwise::compare_scalar(column, scalar, side, op)
    }

    // ------------------------------------------------------------------
    // Reductions
    // ------------------------------------------------------------------

    /// Full-column `Sum`, `Product`, `Min` or `Max` over valid elements.
    ///
    /// `Sum` and `Product` return their identity for an empty or all-null
    /// column. `Min` and `Max` are seeded from the first valid element and
    /// return `None` when there is none. `All`/`Any` produce a boolean and go
    /// through [`Strategy::all`] / [`Strategy::any`].
    pub fn reduce(&self, column: &ChunkedColumnStore<T>, op: ReduceOp) -> Result<Option<T>> {
        self.ensure(op.capability(), op)?;
        let result = match op {
            ReduceOp::Sum => reduce::sum(column).map(Some),
            ReduceOp::Product => reduce::product(column).map(Some),
            ReduceOp::Min => Ok(reduce::min(column)),
            ReduceOp::Max => Ok(reduce::max(column)),
            ReduceOp::All | ReduceOp::Any => return Err(logical_via_reduce(op)),
        };
        self.traced(op, result)
    }

    /// Reduce the values at `rows`, in the given order, skipping nulls.
    ///
    /// Rows may be unsorted and may repeat. The accumulator starts at
    /// `T::ZERO` for every operation, so an empty selection returns zero.
    pub fn reduce_rows<I>(
        &self,
        column: &ChunkedColumnStore<T>,
        rows: I,
        op: ReduceOp,
    ) -> Result<T>
    where
        I: IntoIterator<Item = i64>,
    {
        self.ensure(op.capability(), op)?;
        let result = match op {
            ReduceOp::Sum => reduce::fold_rows(column, rows, T::add_checked),
            ReduceOp::Product => reduce::fold_rows(column, rows, T::mul_checked),
            ReduceOp::Min => reduce::fold_rows(column, rows, |a: T, b| Ok(a.min_of(b))),
            ReduceOp::Max => reduce::fold_rows(column, rows, |a: T, b| Ok(a.max_of(b))),
            ReduceOp::All | ReduceOp::Any => return Err(logical_via_reduce(op)),
        };
        self.traced(op, result)
    }

    /// `true` unless some valid element is false. Short-circuits.
    pub fn all(&self, column: &ChunkedColumnStore<T>) -> Result<bool> {
        self.ensure(Capabilities::LOGICAL, ReduceOp::All)?;
        Ok(reduce::all(column))
    }

    /// `true` as soon as some valid element is true.
    pub fn any(&self, column: &ChunkedColumnStore<T>) -> Result<bool> {
        self.ensure(Capabilities::LOGICAL, ReduceOp::Any)?;
        Ok(reduce::any(column))
    }

    pub fn all_rows<I>(&self, column: &ChunkedColumnStore<T>, rows: I) -> Result<bool>
    where
        I: IntoIterator<Item = i64>,
    {
        self.ensure(Capabilities::LOGICAL, ReduceOp::All)?;
        reduce::all_rows(column, rows)
    }

    pub fn any_rows<I>(&self, column: &ChunkedColumnStore<T>, rows: I) -> Result<bool>
    where
        I: IntoIterator<Item = i64>,
    {
        self.ensure(Capabilities::LOGICAL, ReduceOp::Any)?;
        reduce::any_rows(column, rows)
    }

    // ------------------------------------------------------------------
    // Cumulative scans
    // ------------------------------------------------------------------

    /// Rewrite `column` with its running `op`.
    ///
    /// `Sum` and `Product` skip null slots. `Max` and `Min` are seeded from
    /// the stored value of row 0 and fold every slot, nulls included, leaving
    /// validity untouched.
    pub fn cumulative(&self, column: &mut ChunkedColumnStore<T>, op: CumulativeOp) -> Result<()> {
        self.ensure(op.capability(), op)?;
        let result = self.commit(column, |work| cumulative::scan_in_place(work, op));
        self.traced(op, result)
    }

    /// Running `op` restricted to `rows`.
    ///
    /// The first selected row seeds the accumulator with its current stored
    /// value and is left as is; each later valid row is folded in and
    /// overwritten with the running result. Nulls are skipped.
    pub fn cumulative_rows<I>(
        &self,
        column: &mut ChunkedColumnStore<T>,
        rows: I,
        op: CumulativeOp,
    ) -> Result<()>
    where
        I: IntoIterator<Item = i64>,
    {
        self.ensure(op.capability(), op)?;
        let result = self.commit(column, |work| {
            cumulative::scan_rows_in_place(work, rows, op)
        });
        self.traced(op, result)
    }
}

fn logical_via_reduce(op: ReduceOp) -> Error {
    Error::InvalidArgumentError(format!(
        "`{op}` yields a boolean; call Strategy::{op} instead of reduce"
    ))
}
