use crate::constants::{
    HTLC_ID_FIELD_COUNT, IDENTIFIER_WIDTH, PREIMAGE_BYTES, SINCE_BYTES, UNLOCK_PROOF_FIELD_COUNT,
};
use crate::error::HtlcError;
use crate::table::{encode_table, fixed_field, parse_table};

/// Parameters of one HTLC cell, carried in its lock script args.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HtlcId {
    pub from: [u8; IDENTIFIER_WIDTH],
    pub to: [u8; IDENTIFIER_WIDTH],
    pub hash: [u8; IDENTIFIER_WIDTH],
    pub since: u64,
}

/// Witness lock payload of the fund path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnlockProof {
    pub preimage: [u8; PREIMAGE_BYTES],
}

pub fn parse_htlc_id(args: &[u8]) -> Result<HtlcId, HtlcError> {
    let [from, to, hash, since] = parse_table::<HTLC_ID_FIELD_COUNT>(args)?;
    let from = fixed_field::<IDENTIFIER_WIDTH>(from, "HTLCId.from length mismatch")?;
    let to = fixed_field::<IDENTIFIER_WIDTH>(to, "HTLCId.to length mismatch")?;
    let hash = fixed_field::<IDENTIFIER_WIDTH>(hash, "HTLCId.hash length mismatch")?;
    let since = fixed_field::<SINCE_BYTES>(since, "HTLCId.since length mismatch")?;

    Ok(HtlcId {
        from,
        to,
        hash,
        since: u64::from_le_bytes(since),
    })
}

pub fn htlc_id_bytes(id: &HtlcId) -> Vec<u8> {
    let since = id.since.to_le_bytes();
    encode_table(&[&id.from[..], &id.to[..], &id.hash[..], &since[..]])
}

pub fn parse_unlock_proof(witness_lock: &[u8]) -> Result<UnlockProof, HtlcError> {
    let [preimage] = parse_table::<UNLOCK_PROOF_FIELD_COUNT>(witness_lock)?;
    let preimage =
        fixed_field::<PREIMAGE_BYTES>(preimage, "UnlockProof.preimage length mismatch")?;
    Ok(UnlockProof { preimage })
}

pub fn unlock_proof_bytes(proof: &UnlockProof) -> Vec<u8> {
    encode_table(&[&proof.preimage[..]])
}

impl HtlcId {
    pub fn to_bytes(&self) -> Vec<u8> {
        htlc_id_bytes(self)
    }
}

impl UnlockProof {
    pub fn to_bytes(&self) -> Vec<u8> {
        unlock_proof_bytes(self)
    }
}
