//! Running (prefix) scans that rewrite a column in place.
//!
//! The null handling differs by operation and by scope:
//!
//! | scan | seed | null slots |
//! |---|---|---|
//! | full `Sum` / `Product` | identity (`0` / `1`) | skipped, left null |
//! | full `Max` / `Min` | raw value of row 0 | folded by their stored value and overwritten; validity unchanged |
//! | row-subset, all ops | current raw value of the first selected row | skipped |
//!
//! For a row subset the first selected row only seeds the accumulator and is
//! not rewritten.

use numcol_column_map::{ChunkedColumnStore, RowCursor};
use numcol_result::{Error, Result};
use numcol_types::{CumulativeOp, Element};

/// Full-column `Sum`/`Product`: overwrite each valid slot with the running total.
fn running_total<T, F>(work: &mut ChunkedColumnStore<T>, seed: T, f: F) -> Result<()>
where
    T: Element,
    F: Fn(T, T) -> Result<T>,
{
    let mut acc = seed;
    for idx in 0..work.num_chunks() {
        let (values, validity) = work.get_mutable_chunk(idx)?.parts_mut();
        for (i, slot) in values.iter_mut().enumerate() {
            if validity.is_valid(i) {
                acc = f(acc, *slot)?;
                *slot = acc;
            }
        }
    }
    Ok(())
}

/// Full-column `Max`/`Min`: every slot, null or not, takes the running extremum.
fn running_extremum<T, F>(work: &mut ChunkedColumnStore<T>, pick: F) -> Result<()>
where
    T: Element,
    F: Fn(T, T) -> T,
{
    let Some(mut acc) = work.chunk(0).map(|c| c.raw(0)) else {
        return Ok(());
    };
    for idx in 0..work.num_chunks() {
        let (values, _) = work.get_mutable_chunk(idx)?.parts_mut();
        for slot in values.iter_mut() {
            acc = pick(acc, *slot);
            *slot = acc;
        }
    }
    Ok(())
}

pub(crate) fn scan_in_place<T: Element>(
    work: &mut ChunkedColumnStore<T>,
    op: CumulativeOp,
) -> Result<()> {
    match op {
        CumulativeOp::Sum => running_total(work, T::ZERO, T::add_checked),
        CumulativeOp::Product => running_total(work, T::ONE, T::mul_checked),
        CumulativeOp::Max => running_extremum(work, T::max_of),
        CumulativeOp::Min => running_extremum(work, T::min_of),
    }
}

fn scan_rows<T, I, F>(work: &mut ChunkedColumnStore<T>, rows: I, f: F) -> Result<()>
where
    T: Element,
    I: IntoIterator<Item = i64>,
    F: Fn(T, T) -> Result<T>,
{
    let mut cursor = RowCursor::new(work.layout());
    let mut rows = rows.into_iter();
    let Some(first) = rows.next() else {
        return Ok(());
    };
    let (ci, offset) = cursor.seek(first)?;
    let mut acc = work
        .chunk(ci)
        .map(|c| c.raw(offset))
        .ok_or_else(|| Error::Internal(format!("row {first} resolved to missing chunk {ci}")))?;
    for row in rows {
        let (ci, offset) = cursor.seek(row)?;
        let value = work
            .chunk(ci)
            .ok_or_else(|| Error::Internal(format!("row {row} resolved to missing chunk {ci}")))?
            .get(offset);
        // Null rows are skipped without materializing their chunk.
        if let Some(value) = value {
            acc = f(acc, value)?;
            work.get_mutable_chunk(ci)?.set_raw(offset, acc);
        }
    }
    tracing::trace!(
        relocations = cursor.relocations(),
        "row-subset cumulative scan finished"
    );
    Ok(())
}

pub(crate) fn scan_rows_in_place<T, I>(
    work: &mut ChunkedColumnStore<T>,
    rows: I,
    op: CumulativeOp,
) -> Result<()>
where
    T: Element,
    I: IntoIterator<Item = i64>,
{
    match op {
        CumulativeOp::Sum => scan_rows(work, rows, T::add_checked),
        CumulativeOp::Product => scan_rows(work, rows, T::mul_checked),
        CumulativeOp::Max => scan_rows(work, rows, |a: T, b| Ok(a.max_of(b))),
        CumulativeOp::Min => scan_rows(work, rows, |a: T, b| Ok(a.min_of(b))),
    }
}
