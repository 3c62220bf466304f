//! Since values: flag-tagged relative/absolute timelocks.
//!
//! Bit 63 selects relative (1) or absolute (0); bits 61..=62 select the
//! metric (block number, epoch with fraction, timestamp); bits 56..=60 are
//! reserved and must be zero; bits 0..=55 carry the value. Ordering comes
//! from `ckb_std::since::Since`, which only orders values whose relative
//! flag and metric agree. The checks here reject the encodings it would
//! silently reinterpret.

use core::cmp::Ordering;

pub use ckb_std::since::{EpochNumberWithFraction, Since};

use crate::constants::{
    SINCE_METRIC_EPOCH, SINCE_METRIC_MASK, SINCE_METRIC_TIMESTAMP, SINCE_VALUE_MASK,
};

// Timestamps are scaled to milliseconds before ckb-std orders them.
const TIMESTAMP_VALUE_MAX: u64 = u64::MAX / 1000;

/// A zero length reads as a whole epoch and then requires index 0.
fn epoch_is_well_formed(value: u64) -> bool {
    let index =
        (value >> EpochNumberWithFraction::INDEX_OFFSET) & EpochNumberWithFraction::INDEX_MASK;
    let length =
        (value >> EpochNumberWithFraction::LENGTH_OFFSET) & EpochNumberWithFraction::LENGTH_MASK;
    if length == 0 {
        index == 0
    } else {
        index < length
    }
}

/// Reserved bits, metric `11`, a malformed epoch fraction and a timestamp
/// too large to scale all make a since value unusable.
pub fn since_is_valid(since: Since) -> bool {
    if !since.flags_is_valid() {
        return false;
    }
    let value = since.as_u64() & SINCE_VALUE_MASK;
    match since.as_u64() & SINCE_METRIC_MASK {
        SINCE_METRIC_EPOCH => epoch_is_well_formed(value),
        SINCE_METRIC_TIMESTAMP => value <= TIMESTAMP_VALUE_MAX,
        _ => true,
    }
}

/// `None` when either side is invalid or the categories differ: a relative
/// block count and an absolute timestamp have no common scale.
pub fn compare_since(a: Since, b: Since) -> Option<Ordering> {
    if !since_is_valid(a) || !since_is_valid(b) {
        return None;
    }
    a.partial_cmp(&b)
}

/// `input >= required`, refusing to order values of different categories.
pub fn since_satisfies(input: Since, required: Since) -> bool {
    matches!(
        compare_since(input, required),
        Some(Ordering::Greater | Ordering::Equal)
    )
}
