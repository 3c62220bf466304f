use crate::constants::FUND_RECEIVER_OUTPUT_INDEX;
use crate::error::{ErrorCode, HtlcError};
use crate::hash::{truncate_identifier, Hasher};
use crate::host::{Source, TxContext};
use crate::htlc::{parse_unlock_proof, HtlcId};
use crate::observer::{Event, Observer};

pub fn verify_fund(
    ctx: &dyn TxContext,
    hasher: &dyn Hasher,
    observer: &mut dyn Observer,
    id: &HtlcId,
    witness_lock: &[u8],
) -> Result<(), HtlcError> {
    let proof = parse_unlock_proof(witness_lock)?;

    let digest = hasher.short_hash(&proof.preimage);
    observer.on_event(&Event::PreimageHashed {
        expected: id.hash,
        actual: digest,
    });
    if digest != id.hash {
        return Err(HtlcError::new(
            ErrorCode::PreimageMismatch,
            "fund preimage hash mismatch",
        ));
    }

    let lock_hash = ctx.load_cell_lock_hash(FUND_RECEIVER_OUTPUT_INDEX, Source::Output)?;
    let receiver = truncate_identifier(&lock_hash);
    observer.on_event(&Event::LockHashCompared {
        source: Source::Output,
        index: FUND_RECEIVER_OUTPUT_INDEX,
        expected: id.to,
        actual: receiver,
    });
    if receiver != id.to {
        return Err(HtlcError::new(
            ErrorCode::ReceiverMismatch,
            "fund receiver lock hash mismatch",
        ));
    }

    Ok(())
}
