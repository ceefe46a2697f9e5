//! Conversion between chunks and Arrow arrays.
//!
//! Each chunk maps to one Arrow array of the same length; the validity bitmap
//! becomes the array's null buffer without repacking.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, PrimitiveArray};
use arrow::buffer::{BooleanBuffer, ScalarBuffer};
use arrow::datatypes::{
    Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type,
    TimestampMillisecondType, UInt8Type, UInt16Type, UInt32Type, UInt64Type,
};
use numcol_result::{Error, Result};
use numcol_types::{Element, Timestamp};

use super::chunk::Chunk;
use super::config::ColumnStoreConfig;
use super::core::ChunkedColumnStore;
use crate::bitmap::ValidityBitmap;

/// Element types with an Arrow array representation.
pub trait ArrowElement: Element {
    fn to_array(values: &[Self], validity: &ValidityBitmap) -> Result<ArrayRef>;

    /// Decode `array` into values plus validity. Null slots are normalized to
    /// `Self::default()`.
    fn from_array(array: &dyn Array) -> Result<(Vec<Self>, ValidityBitmap)>;
}

fn type_mismatch<T: Element>(array: &dyn Array) -> Error {
    Error::InvalidArgumentError(format!(
        "expected Arrow array of type {}, got {}",
        T::DATA_TYPE,
        array.data_type()
    ))
}

macro_rules! impl_arrow_primitive {
    ($($native:ty => $arrow:ty),+ $(,)?) => {
        $(
            impl ArrowElement for $native {
                fn to_array(values: &[Self], validity: &ValidityBitmap) -> Result<ArrayRef> {
                    let array = PrimitiveArray::<$arrow>::try_new(
                        ScalarBuffer::from(values.to_vec()),
                        validity.to_null_buffer(),
                    )?;
                    Ok(Arc::new(array))
                }

                fn from_array(array: &dyn Array) -> Result<(Vec<Self>, ValidityBitmap)> {
                    let typed = array
                        .as_any()
                        .downcast_ref::<PrimitiveArray<$arrow>>()
                        .ok_or_else(|| type_mismatch::<Self>(array))?;
                    let validity = ValidityBitmap::from_null_buffer(typed.nulls(), typed.len());
                    let values = typed
                        .values()
                        .iter()
                        .enumerate()
                        .map(|(i, v)| if validity.is_valid(i) { *v } else { Self::default() })
                        .collect();
                    Ok((values, validity))
                }
            }
        )+
    };
}

impl_arrow_primitive!(
    i8 => Int8Type,
    i16 => Int16Type,
    i32 => Int32Type,
    i64 => Int64Type,
    u8 => UInt8Type,
    u16 => UInt16Type,
    u32 => UInt32Type,
    u64 => UInt64Type,
    f32 => Float32Type,
    f64 => Float64Type,
);

impl ArrowElement for bool {
    fn to_array(values: &[Self], validity: &ValidityBitmap) -> Result<ArrayRef> {
        let array = BooleanArray::new(BooleanBuffer::from(values), validity.to_null_buffer());
        Ok(Arc::new(array))
    }

    fn from_array(array: &dyn Array) -> Result<(Vec<Self>, ValidityBitmap)> {
        let typed = array
            .as_any()
            .downcast_ref::<BooleanArray>()
            .ok_or_else(|| type_mismatch::<Self>(array))?;
        let validity = ValidityBitmap::from_null_buffer(typed.nulls(), typed.len());
        let values = (0..typed.len())
            .map(|i| validity.is_valid(i) && typed.value(i))
            .collect();
        Ok((values, validity))
    }
}

impl ArrowElement for Timestamp {
    fn to_array(values: &[Self], validity: &ValidityBitmap) -> Result<ArrayRef> {
        let millis: Vec<i64> = values.iter().map(|t| t.as_millis()).collect();
        let array = PrimitiveArray::<TimestampMillisecondType>::try_new(
            ScalarBuffer::from(millis),
            validity.to_null_buffer(),
        )?;
        Ok(Arc::new(array))
    }

    fn from_array(array: &dyn Array) -> Result<(Vec<Self>, ValidityBitmap)> {
        let typed = array
            .as_any()
            .downcast_ref::<PrimitiveArray<TimestampMillisecondType>>()
            .ok_or_else(|| type_mismatch::<Self>(array))?;
        let validity = ValidityBitmap::from_null_buffer(typed.nulls(), typed.len());
        let values = typed
            .values()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if validity.is_valid(i) {
                    Timestamp::from_millis(*v)
                } else {
                    Timestamp::EPOCH
                }
            })
            .collect();
        Ok((values, validity))
    }
}

impl<T: ArrowElement> ChunkedColumnStore<T> {
    /// One Arrow array per chunk, in logical order.
    pub fn to_arrow_chunks(&self) -> Result<Vec<ArrayRef>> {
        self.chunks()
            .map(|chunk| T::to_array(chunk.values(), chunk.validity()))
            .collect()
    }

    /// Build a store from an Arrow array, splitting it at the configured capacity.
    pub fn from_arrow(array: &dyn Array, config: ColumnStoreConfig) -> Result<Self> {
        let cap = config.chunk_capacity::<T>()?;
        let (values, validity) = T::from_array(array)?;
        let mut chunks = Vec::with_capacity(values.len().div_ceil(cap));
        for (idx, slice) in values.chunks(cap).enumerate() {
            let start = idx * cap;
            let bits = ValidityBitmap::from_fn(slice.len(), |i| validity.is_valid(start + i));
            chunks.push(Chunk::from_parts(slice.to_vec(), bits, cap)?);
        }
        tracing::trace!(
            len = values.len(),
            chunks = chunks.len(),
            data_type = %T::DATA_TYPE,
            "imported Arrow array"
        );
        ChunkedColumnStore::from_chunks(chunks, cap)
    }
}
