//! Reduction kernels over whole columns and over row subsets.
//!
//! Full-column folds walk chunks in order and skip null slots. Row-subset
//! folds resolve each row through a [`RowCursor`], which re-derives the chunk
//! only when a row leaves the cached window.

use numcol_column_map::{ChunkedColumnStore, RowCursor};
use numcol_result::{Error, Result};
use numcol_types::Element;

/// Fold every valid element into `seed` with `f`.
pub(crate) fn fold_valid<T, F>(store: &ChunkedColumnStore<T>, seed: T, f: F) -> Result<T>
where
    T: Element,
    F: Fn(T, T) -> Result<T>,
{
    let mut acc = seed;
    for chunk in store.chunks() {
        if chunk.null_count() == 0 {
            for v in chunk.values() {
                acc = f(acc, *v)?;
            }
        } else {
            for v in chunk.iter().flatten() {
                acc = f(acc, v)?;
            }
        }
    }
    Ok(acc)
}

pub(crate) fn sum<T: Element>(store: &ChunkedColumnStore<T>) -> Result<T> {
    fold_valid(store, T::ZERO, T::add_checked)
}

pub(crate) fn product<T: Element>(store: &ChunkedColumnStore<T>) -> Result<T> {
    fold_valid(store, T::ONE, T::mul_checked)
}

/// Extremum over valid elements, seeded from the first valid one.
fn extremum<T, F>(store: &ChunkedColumnStore<T>, pick: F) -> Option<T>
where
    T: Element,
    F: Fn(T, T) -> T,
{
    let mut values = store.iter().flatten();
    let first = values.next()?;
    Some(values.fold(first, pick))
}

pub(crate) fn min<T: Element>(store: &ChunkedColumnStore<T>) -> Option<T> {
    extremum(store, T::min_of)
}

pub(crate) fn max<T: Element>(store: &ChunkedColumnStore<T>) -> Option<T> {
    extremum(store, T::max_of)
}

/// `true` unless some valid element is falsy.
pub(crate) fn all<T: Element>(store: &ChunkedColumnStore<T>) -> bool {
    store.iter().flatten().all(T::is_truthy)
}

/// `true` once some valid element is truthy.
pub(crate) fn any<T: Element>(store: &ChunkedColumnStore<T>) -> bool {
    store.iter().flatten().any(T::is_truthy)
}

/// Visit the value at each row of `rows`, skipping nulls.
///
/// `visit` returns `Ok(false)` to stop early. The number of cursor
/// re-locations is returned for tracing.
pub(crate) fn for_each_row<T, I, F>(
    store: &ChunkedColumnStore<T>,
    rows: I,
    mut visit: F,
) -> Result<usize>
where
    T: Element,
    I: IntoIterator<Item = i64>,
    F: FnMut(T) -> Result<bool>,
{
    let mut cursor = RowCursor::new(store.layout());
    for row in rows {
        let (ci, offset) = cursor.seek(row)?;
        let chunk = store
            .chunk(ci)
            .ok_or_else(|| Error::Internal(format!("row {row} resolved to missing chunk {ci}")))?;
        if let Some(v) = chunk.get(offset)
            && !visit(v)?
        {
            break;
        }
    }
    Ok(cursor.relocations())
}

/// Fold the selected rows into `T::ZERO` with `f`.
///
/// Every operation seeds at zero, including `Product`, `Min` and `Max`; an
/// empty selection returns zero.
pub(crate) fn fold_rows<T, I, F>(store: &ChunkedColumnStore<T>, rows: I, f: F) -> Result<T>
where
    T: Element,
    I: IntoIterator<Item = i64>,
    F: Fn(T, T) -> Result<T>,
{
    let mut acc = T::ZERO;
    let relocations = for_each_row(store, rows, |v| {
        acc = f(acc, v)?;
        Ok(true)
    })?;
    tracing::trace!(relocations, "row-subset reduction finished");
    Ok(acc)
}

pub(crate) fn all_rows<T, I>(store: &ChunkedColumnStore<T>, rows: I) -> Result<bool>
where
    T: Element,
    I: IntoIterator<Item = i64>,
{
    let mut result = true;
    for_each_row(store, rows, |v| {
        result = v.is_truthy();
        Ok(result)
    })?;
    Ok(result)
}

pub(crate) fn any_rows<T, I>(store: &ChunkedColumnStore<T>, rows: I) -> Result<bool>
where
    T: Element,
    I: IntoIterator<Item = i64>,
{
    let mut result = false;
    for_each_row(store, rows, |v| {
        result = v.is_truthy();
        Ok(!result)
    })?;
    Ok(result)
}
