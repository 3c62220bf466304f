//! Chain records the lock reads through the host: the molecule `Script` and
//! `WitnessArgs` bindings shipped with ckb-std, plus the few constructors
//! and lookups the verifiers and the mock host need.

use ckb_std::ckb_types::{packed, prelude::*};

pub use ckb_std::ckb_types::core::ScriptHashType;
pub use ckb_std::ckb_types::packed::{Script, WitnessArgs};

use crate::constants::DIGEST_BYTES;
use crate::error::HtlcError;

pub fn hash_type_from_u8(b: u8) -> Result<ScriptHashType, HtlcError> {
    match b {
        0 => Ok(ScriptHashType::Data),
        1 => Ok(ScriptHashType::Type),
        2 => Ok(ScriptHashType::Data1),
        4 => Ok(ScriptHashType::Data2),
        _ => Err(HtlcError::decode("Script.hash_type invalid")),
    }
}

pub fn new_script(
    code_hash: [u8; DIGEST_BYTES],
    hash_type: ScriptHashType,
    args: &[u8],
) -> Script {
    Script::new_builder()
        .code_hash(code_hash.pack())
        .hash_type(hash_type.into())
        .args(args.pack())
        .build()
}

/// Digest of the serialized script; the chain identifies locks by it.
pub fn lock_hash(script: &Script) -> [u8; DIGEST_BYTES] {
    script.calc_script_hash().unpack()
}

pub fn witness_with_lock(lock: &[u8]) -> WitnessArgs {
    WitnessArgs::new_builder().lock(packed::BytesOpt::new_builder().set(Some(lock.pack())).build()).build()
}

/// `lock` field of a serialized `WitnessArgs`; `None` when the field is
/// absent.
pub fn witness_lock(witness: &[u8]) -> Result<Option<Vec<u8>>, HtlcError> {
    packed::WitnessArgsReader::verify(witness, false)
        .map_err(|_| HtlcError::decode("WitnessArgs malformed"))?;
    let args = packed::WitnessArgsReader::new_unchecked(witness);
    Ok(args.lock().to_opt().map(|lock| lock.raw_data().to_vec()))
}
