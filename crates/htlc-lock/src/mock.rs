//! In-memory transaction answering the host accessors, for tests, benches
//! and the CLI. Failures are raised as the syscall `SysError`s a chain host
//! would return.

use ckb_std::error::SysError;

use crate::constants::DIGEST_BYTES;
use crate::error::HtlcError;
use crate::host::{Source, TxContext};
use crate::script::{lock_hash, Script};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockInput {
    pub lock: Script,
    pub since: u64,
}

/// `witnesses[i]` belongs to input `i`. Inputs whose lock equals `script`
/// form the group the script runs for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockTransaction {
    pub script: Script,
    pub inputs: Vec<MockInput>,
    pub outputs: Vec<Script>,
    pub witnesses: Vec<Vec<u8>>,
}

impl MockTransaction {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            inputs: Vec::new(),
            outputs: Vec::new(),
            witnesses: Vec::new(),
        }
    }

    pub fn input(mut self, lock: Script, since: u64) -> Self {
        self.inputs.push(MockInput { lock, since });
        self
    }

    pub fn output(mut self, lock: Script) -> Self {
        self.outputs.push(lock);
        self
    }

    pub fn witness(mut self, witness: Vec<u8>) -> Self {
        self.witnesses.push(witness);
        self
    }

    fn group_input(&self, index: usize) -> Result<usize, SysError> {
        self.inputs
            .iter()
            .enumerate()
            .filter(|(_, input)| input.lock == self.script)
            .map(|(i, _)| i)
            .nth(index)
            .ok_or(SysError::IndexOutOfBound)
    }

    fn input_at(&self, index: usize, source: Source) -> Result<&MockInput, SysError> {
        let abs = match source {
            Source::Input => index,
            Source::GroupInput => self.group_input(index)?,
            // Outputs carry no input fields.
            Source::Output => return Err(SysError::ItemMissing),
        };
        self.inputs.get(abs).ok_or(SysError::IndexOutOfBound)
    }
}

impl TxContext for MockTransaction {
    fn load_script_args(&self) -> Result<Vec<u8>, HtlcError> {
        Ok(self.script.args().raw_data().to_vec())
    }

    fn load_witness(&self, index: usize, source: Source) -> Result<Vec<u8>, HtlcError> {
        let abs = match source {
            Source::Input | Source::Output => index,
            Source::GroupInput => self.group_input(index)?,
        };
        Ok(self
            .witnesses
            .get(abs)
            .cloned()
            .ok_or(SysError::IndexOutOfBound)?)
    }

    fn load_input_since(&self, index: usize, source: Source) -> Result<u64, HtlcError> {
        Ok(self.input_at(index, source)?.since)
    }

    fn load_cell_lock_hash(
        &self,
        index: usize,
        source: Source,
    ) -> Result<[u8; DIGEST_BYTES], HtlcError> {
        let lock = match source {
            Source::Output => self.outputs.get(index).ok_or(SysError::IndexOutOfBound)?,
            Source::Input | Source::GroupInput => &self.input_at(index, source)?.lock,
        };
        Ok(lock_hash(lock))
    }
}
