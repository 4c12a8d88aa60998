#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ExtendedTime, Instant, temporal_index::Direction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Error {
    #[error("Interval bounds '{start}'..'{end}' are invalid (start must not exceed end)")]
    InvalidBounds {
        start: ExtendedTime,
        end: ExtendedTime,
    },

    #[error("Operation not supported for unbounded time ranges")]
    UnboundedRange,

    #[error("Unit '{unit}' is not a valid time unit (valid: Y, M, W, D, h, m, s, ms, us, ns, ps, fs, as)")]
    InvalidUnit { unit: String },

    #[error("Unit '{unit}' is finer than the nanosecond resolution of an instant")]
    UnsupportedResolution { unit: String },

    #[error("No entry {direction} '{at}'")]
    OutOfRange { direction: Direction, at: Instant },

    #[error("'{input}' is not recognized as a timestamp or an infinity marker")]
    TypeMismatch { input: String },

    #[error("Timestamp arithmetic overflowed the representable range")]
    TimestampOverflow,
}
