use arrow::array::{Array, ArrayRef};
use numcol_column_map::{ArrowElement, ChunkedColumnStore, ColumnStoreConfig};
use numcol_result::Result;
use numcol_types::{BinaryOp, CompareOp, CumulativeOp, Element, ReduceOp, ShiftOp, UnaryOp};

use crate::elementwise::ScalarSide;
use crate::registry::StrategyRegistry;
use crate::strategy::Strategy;

/// A typed column bound to its element strategy.
///
/// The strategy is resolved once, at construction; every operation afterwards
/// dispatches through the cached reference. Cloning is copy-free and shares
/// chunks with the original until either side writes.
#[derive(Debug, Clone)]
pub struct PrimitiveColumn<T: Element> {
    store: ChunkedColumnStore<T>,
    strategy: &'static Strategy<T>,
}

impl<T: Element> PrimitiveColumn<T> {
    pub fn new() -> Result<Self> {
        Self::from_store(ChunkedColumnStore::new())
    }

    pub fn with_config(config: ColumnStoreConfig) -> Result<Self> {
        Self::from_store(ChunkedColumnStore::with_config(config)?)
    }

    /// A column of `len` null slots.
    pub fn with_nulls(len: i64, config: ColumnStoreConfig) -> Result<Self> {
        Self::from_store(ChunkedColumnStore::with_nulls(len, config)?)
    }

    pub fn from_values<I: IntoIterator<Item = T>>(
        values: I,
        config: ColumnStoreConfig,
    ) -> Result<Self> {
        let mut store = ChunkedColumnStore::with_config(config)?;
        store.extend_values(values);
        Self::from_store(store)
    }

    pub fn from_options<I: IntoIterator<Item = Option<T>>>(
        values: I,
        config: ColumnStoreConfig,
    ) -> Result<Self> {
        let mut store = ChunkedColumnStore::with_config(config)?;
        store.extend(values);
        Self::from_store(store)
    }

    pub fn from_store(store: ChunkedColumnStore<T>) -> Result<Self> {
        Ok(Self {
            store,
            strategy: StrategyRegistry::resolve::<T>()?,
        })
    }

    #[inline]
    pub fn len(&self) -> i64 {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[inline]
    pub fn null_count(&self) -> i64 {
        self.store.null_count()
    }

    #[inline]
    pub fn store(&self) -> &ChunkedColumnStore<T> {
        &self.store
    }

    pub fn into_store(self) -> ChunkedColumnStore<T> {
        self.store
    }

    #[inline]
    pub fn strategy(&self) -> &'static Strategy<T> {
        self.strategy
    }

    pub fn get(&self, row: i64) -> Result<Option<T>> {
        self.store.get(row)
    }

    pub fn set(&mut self, row: i64, value: Option<T>) -> Result<()> {
        self.store.set(row, value)
    }

    pub fn push(&mut self, value: Option<T>) {
        self.store.push(value);
    }

    pub fn fill_nulls(&mut self, value: T) -> Result<()> {
        self.store.fill_nulls(value)
    }

    pub fn to_vec(&self) -> Vec<Option<T>> {
        self.store.to_vec()
    }

    fn wrap(&self, store: ChunkedColumnStore<T>) -> Self {
        Self {
            store,
            strategy: self.strategy,
        }
    }

    pub fn binary(&self, rhs: &Self, op: BinaryOp) -> Result<Self> {
        let out = self.strategy.binary(&self.store, &rhs.store, op)?;
        Ok(self.wrap(out))
    }

    pub fn binary_assign(&mut self, rhs: &Self, op: BinaryOp) -> Result<()> {
        self.strategy.binary_assign(&mut self.store, &rhs.store, op)
    }

    /// `self op scalar`.
    pub fn binary_scalar(&self, scalar: T, op: BinaryOp) -> Result<Self> {
        let out = self
            .strategy
            .binary_scalar(&self.store, scalar, ScalarSide::Right, op)?;
        Ok(self.wrap(out))
    }

    /// `scalar op self`.
    pub fn scalar_binary(&self, scalar: T, op: BinaryOp) -> Result<Self> {
        let out = self
            .strategy
            .binary_scalar(&self.store, scalar, ScalarSide::Left, op)?;
        Ok(self.wrap(out))
    }

    pub fn binary_scalar_assign(&mut self, scalar: T, op: BinaryOp) -> Result<()> {
        self.strategy
            .binary_scalar_assign(&mut self.store, scalar, ScalarSide::Right, op)
    }

    pub fn add(&self, rhs: &Self) -> Result<Self> {
        self.binary(rhs, BinaryOp::Add)
    }

    pub fn subtract(&self, rhs: &Self) -> Result<Self> {
        self.binary(rhs, BinaryOp::Subtract)
    }

    pub fn multiply(&self, rhs: &Self) -> Result<Self> {
        self.binary(rhs, BinaryOp::Multiply)
    }

    pub fn divide(&self, rhs: &Self) -> Result<Self> {
        self.binary(rhs, BinaryOp::Divide)
    }

    pub fn shift(&self, op: ShiftOp, amount: i32) -> Result<Self> {
        let out = self.strategy.shift(&self.store, op, amount)?;
        Ok(self.wrap(out))
    }

    pub fn shift_assign(&mut self, op: ShiftOp, amount: i32) -> Result<()> {
        self.strategy.shift_assign(&mut self.store, op, amount)
    }

    pub fn unary(&self, op: UnaryOp) -> Result<Self> {
        let out = self.strategy.unary(&self.store, op)?;
        Ok(self.wrap(out))
    }

    pub fn unary_assign(&mut self, op: UnaryOp) -> Result<()> {
        self.strategy.unary_assign(&mut self.store, op)
    }

    pub fn compare(&self, rhs: &Self, op: CompareOp) -> Result<PrimitiveColumn<bool>> {
        PrimitiveColumn::from_store(self.strategy.compare(&self.store, &rhs.store, op)?)
    }

    /// `self op scalar`.
    pub fn compare_scalar(&self, scalar: T, op: CompareOp) -> Result<PrimitiveColumn<bool>> {
        PrimitiveColumn::from_store(self.strategy.compare_scalar(
            &self.store,
            scalar,
            ScalarSide::Right,
            op,
        )?)
    }

    pub fn reduce(&self, op: ReduceOp) -> Result<Option<T>> {
        self.strategy.reduce(&self.store, op)
    }

    pub fn reduce_rows<I: IntoIterator<Item = i64>>(&self, rows: I, op: ReduceOp) -> Result<T> {
        self.strategy.reduce_rows(&self.store, rows, op)
    }

    /// Sum of valid elements; zero for an empty or all-null column.
    pub fn sum(&self) -> Result<T> {
        Ok(self.reduce(ReduceOp::Sum)?.unwrap_or(T::ZERO))
    }

    pub fn product(&self) -> Result<T> {
        Ok(self.reduce(ReduceOp::Product)?.unwrap_or(T::ONE))
    }

    pub fn min(&self) -> Result<Option<T>> {
        self.reduce(ReduceOp::Min)
    }

    pub fn max(&self) -> Result<Option<T>> {
        self.reduce(ReduceOp::Max)
    }

    pub fn all(&self) -> Result<bool> {
        self.strategy.all(&self.store)
    }

    pub fn any(&self) -> Result<bool> {
        self.strategy.any(&self.store)
    }

    pub fn all_rows<I: IntoIterator<Item = i64>>(&self, rows: I) -> Result<bool> {
        self.strategy.all_rows(&self.store, rows)
    }

    pub fn any_rows<I: IntoIterator<Item = i64>>(&self, rows: I) -> Result<bool> {
        self.strategy.any_rows(&self.store, rows)
    }

    pub fn cumulative(&mut self, op: CumulativeOp) -> Result<()> {
        self.strategy.cumulative(&mut self.store, op)
    }

    pub fn cumulative_rows<I: IntoIterator<Item = i64>>(
        &mut self,
        rows: I,
        op: CumulativeOp,
    ) -> Result<()> {
        self.strategy.cumulative_rows(&mut self.store, rows, op)
    }

    pub fn cumulative_sum(&mut self) -> Result<()> {
        self.cumulative(CumulativeOp::Sum)
    }

    pub fn cumulative_max(&mut self) -> Result<()> {
        self.cumulative(CumulativeOp::Max)
    }
}

impl<T: ArrowElement> PrimitiveColumn<T> {
    pub fn to_arrow_chunks(&self) -> Result<Vec<ArrayRef>> {
        self.store.to_arrow_chunks()
    }

    pub fn from_arrow(array: &dyn Array, config: ColumnStoreConfig) -> Result<Self> {
        Self::from_store(ChunkedColumnStore::from_arrow(array, config)?)
    }
}

impl<T: Element> PartialEq for PrimitiveColumn<T> {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}
