use numcol_result::{Error, Result};
use numcol_types::Element;

use crate::bitmap::ValidityBitmap;

/// One bounded-capacity, contiguous block of a column plus its validity bitmap.
///
/// `values.len() == validity.len() == len()` always holds. Null slots store
/// `T::default()` when written through [`Chunk::set`] or [`Chunk::push`];
/// kernels never read them as data except where a contract says so.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk<T: Element> {
    values: Vec<T>,
    validity: ValidityBitmap,
    capacity: usize,
}

impl<T: Element> Chunk<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::new(),
            validity: ValidityBitmap::new(),
            capacity,
        }
    }

    /// A chunk of `len` null slots.
    pub fn with_nulls(capacity: usize, len: usize) -> Self {
        debug_assert!(len <= capacity);
        Self {
            values: vec![T::default(); len],
            validity: ValidityBitmap::all_null(len),
            capacity,
        }
    }

    pub fn from_parts(values: Vec<T>, validity: ValidityBitmap, capacity: usize) -> Result<Self> {
        if values.len() != validity.len() {
            return Err(Error::Internal(format!(
                "chunk has {} values but {} validity bits",
                values.len(),
                validity.len()
            )));
        }
        if values.len() > capacity {
            return Err(Error::InvalidArgumentError(format!(
                "chunk of {} values exceeds capacity {capacity}",
                values.len()
            )));
        }
        Ok(Self {
            values,
            validity,
            capacity,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.values.len() >= self.capacity
    }

    #[inline]
    pub fn null_count(&self) -> usize {
        self.validity.null_count()
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn validity(&self) -> &ValidityBitmap {
        &self.validity
    }

    #[inline]
    pub fn is_valid(&self, offset: usize) -> bool {
        self.validity.is_valid(offset)
    }

    /// Mutable values and validity at once, for kernels that rewrite both.
    #[inline]
    pub fn parts_mut(&mut self) -> (&mut [T], &mut ValidityBitmap) {
        (&mut self.values, &mut self.validity)
    }

    #[inline]
    pub fn get(&self, offset: usize) -> Option<T> {
        if self.validity.is_valid(offset) {
            Some(self.values[offset])
        } else {
            None
        }
    }

    /// Raw slot value, ignoring validity.
    #[inline]
    pub fn raw(&self, offset: usize) -> T {
        self.values[offset]
    }

    pub fn set(&mut self, offset: usize, value: Option<T>) {
        match value {
            Some(v) => {
                self.values[offset] = v;
                self.validity.set_valid(offset);
            }
            None => {
                self.values[offset] = T::default();
                self.validity.clear_valid(offset);
            }
        }
    }

    /// Overwrite the slot value, leaving validity untouched.
    #[inline]
    pub fn set_raw(&mut self, offset: usize, value: T) {
        self.values[offset] = value;
    }

    pub fn push(&mut self, value: Option<T>) {
        debug_assert!(!self.is_full(), "push into a full chunk");
        self.values.push(value.unwrap_or_default());
        self.validity.push(value.is_some());
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        self.values
            .iter()
            .zip(self.validity.iter())
            .map(|(v, valid)| valid.then_some(*v))
    }
}
