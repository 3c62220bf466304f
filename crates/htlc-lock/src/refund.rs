use crate::constants::{GROUP_INPUT_INDEX, REFUND_SENDER_INPUT_INDEX};
use crate::error::{ErrorCode, HtlcError};
use crate::hash::truncate_identifier;
use crate::host::{Source, TxContext};
use crate::htlc::HtlcId;
use crate::observer::{Event, Observer};
use crate::since::{since_satisfies, Since};

pub fn verify_refund(
    ctx: &dyn TxContext,
    observer: &mut dyn Observer,
    id: &HtlcId,
) -> Result<(), HtlcError> {
    // A failed read is fatal; it is never defaulted to zero.
    let input_since = ctx.load_input_since(GROUP_INPUT_INDEX, Source::GroupInput)?;
    let satisfied = since_satisfies(Since::new(input_since), Since::new(id.since));
    observer.on_event(&Event::SinceCompared {
        required: id.since,
        input: input_since,
        satisfied,
    });
    if !satisfied {
        return Err(HtlcError::new(
            ErrorCode::TimelockNotSatisfied,
            "refund since not satisfied",
        ));
    }

    let lock_hash = ctx.load_cell_lock_hash(REFUND_SENDER_INPUT_INDEX, Source::Input)?;
    let sender = truncate_identifier(&lock_hash);
    observer.on_event(&Event::LockHashCompared {
        source: Source::Input,
        index: REFUND_SENDER_INPUT_INDEX,
        expected: id.from,
        actual: sender,
    });
    if sender != id.from {
        return Err(HtlcError::new(
            ErrorCode::SenderMismatch,
            "refund sender lock hash mismatch",
        ));
    }

    Ok(())
}
