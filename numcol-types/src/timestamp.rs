use std::fmt;

use arrow::datatypes::{DataType, TimeUnit};

use crate::{Capabilities, Element};

/// Milliseconds since the Unix epoch, without a time zone.
///
/// Timestamps compare and order like the underlying `i64` but expose no
/// arithmetic: adding two instants has no meaning, so every arithmetic entry
/// point reports an unsupported operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    #[inline]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl Element for Timestamp {
    const DATA_TYPE: DataType = DataType::Timestamp(TimeUnit::Millisecond, None);
    const CAPABILITIES: Capabilities = Capabilities::TEMPORAL;
    const ZERO: Self = Timestamp::EPOCH;
    const ONE: Self = Timestamp(1);
}
