pub mod constants;
pub mod error;
mod fund;
pub mod hash;
pub mod host;
pub mod htlc;
pub mod mock;
pub mod observer;
pub mod path;
mod refund;
pub mod script;
pub mod since;
mod spend_verify;
mod table;

pub use ckb_std::ckb_types;
pub use error::{ErrorCode, HtlcError};
pub use fund::verify_fund;
pub use hash::{short_hash, truncate_identifier, CkbHasher, Hasher};
pub use host::{Source, TxContext};
pub use htlc::{
    htlc_id_bytes, parse_htlc_id, parse_unlock_proof, unlock_proof_bytes, HtlcId, UnlockProof,
};
pub use mock::{MockInput, MockTransaction};
pub use observer::{Event, NoopObserver, Observer};
pub use path::{load_witness_lock, select_path, PathKind, SpendPath, WitnessLoadOutcome};
pub use refund::verify_refund;
pub use script::{
    hash_type_from_u8, lock_hash, new_script, witness_lock, witness_with_lock, Script,
    ScriptHashType, WitnessArgs,
};
pub use since::{compare_since, since_is_valid, since_satisfies, EpochNumberWithFraction, Since};
pub use spend_verify::{
    program_entry, program_entry_with, status_code, verify_htlc_spend, ArgsLayout, VerifyConfig,
};
pub use table::{encode_table, parse_table};

#[cfg(test)]
mod tests;
