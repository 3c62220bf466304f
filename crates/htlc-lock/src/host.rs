//! Read-only accessors into the transaction under verification.
//!
//! The lock never sees the transaction directly; the host answers these
//! queries against an immutable, fully assembled transaction.

use crate::constants::DIGEST_BYTES;
use crate::error::HtlcError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Input,
    Output,
    /// Inputs locked by the script currently executing.
    GroupInput,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Input => "input",
            Source::Output => "output",
            Source::GroupInput => "group_input",
        }
    }
}

/// Failures are `HtlcError`s; an on-chain adapter converts the syscall
/// `SysError` with `?`.
pub trait TxContext {
    /// Args of the executing lock script, before any layout prefix is removed.
    fn load_script_args(&self) -> Result<Vec<u8>, HtlcError>;

    /// Raw witness bytes (a serialized `WitnessArgs`) for one input.
    fn load_witness(&self, index: usize, source: Source) -> Result<Vec<u8>, HtlcError>;

    fn load_input_since(&self, index: usize, source: Source) -> Result<u64, HtlcError>;

    fn load_cell_lock_hash(
        &self,
        index: usize,
        source: Source,
    ) -> Result<[u8; DIGEST_BYTES], HtlcError>;
}
