use crate::constants::GROUP_INPUT_INDEX;
use crate::host::{Source, TxContext};
use crate::script::witness_lock;

/// Result of reading the witness lock of the input under validation.
///
/// `Absent` covers a host load failure, an undecodable `WitnessArgs`, a
/// missing `lock` field and an empty one. All of them select the refund
/// path; an unreadable witness is never an error on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WitnessLoadOutcome {
    Present(Vec<u8>),
    Absent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    Refund,
    Fund,
}

impl PathKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PathKind::Refund => "refund",
            PathKind::Fund => "fund",
        }
    }
}

/// Terminal state of path selection; fund carries the witness lock to be
/// decoded as an `UnlockProof`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpendPath {
    Refund,
    Fund { witness_lock: Vec<u8> },
}

impl SpendPath {
    pub fn kind(&self) -> PathKind {
        match self {
            SpendPath::Refund => PathKind::Refund,
            SpendPath::Fund { .. } => PathKind::Fund,
        }
    }
}

pub fn load_witness_lock(ctx: &dyn TxContext) -> WitnessLoadOutcome {
    let Ok(witness) = ctx.load_witness(GROUP_INPUT_INDEX, Source::GroupInput) else {
        return WitnessLoadOutcome::Absent;
    };
    match witness_lock(&witness) {
        Ok(Some(lock)) if !lock.is_empty() => WitnessLoadOutcome::Present(lock),
        _ => WitnessLoadOutcome::Absent,
    }
}

pub fn select_path(outcome: WitnessLoadOutcome) -> SpendPath {
    match outcome {
        WitnessLoadOutcome::Present(witness_lock) => SpendPath::Fund { witness_lock },
        WitnessLoadOutcome::Absent => SpendPath::Refund,
    }
}
