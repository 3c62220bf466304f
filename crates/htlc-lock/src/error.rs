use core::fmt;

use ckb_std::error::SysError;

use crate::constants::{
    STATUS_ENCODING, STATUS_INDEX_OUT_OF_BOUND, STATUS_ITEM_MISSING, STATUS_LENGTH_NOT_ENOUGH,
    STATUS_PREIMAGE_MISMATCH, STATUS_RECEIVER_MISMATCH, STATUS_SENDER_MISMATCH,
    STATUS_TIMELOCK_NOT_SATISFIED,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    IndexOutOfBound,
    ItemMissing,
    LengthNotEnough,
    Encoding,

    PreimageMismatch,
    ReceiverMismatch,
    TimelockNotSatisfied,
    SenderMismatch,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::IndexOutOfBound => "HTLC_ERR_INDEX_OUT_OF_BOUND",
            ErrorCode::ItemMissing => "HTLC_ERR_ITEM_MISSING",
            ErrorCode::LengthNotEnough => "HTLC_ERR_LENGTH_NOT_ENOUGH",
            ErrorCode::Encoding => "HTLC_ERR_ENCODING",

            ErrorCode::PreimageMismatch => "HTLC_ERR_PREIMAGE_MISMATCH",
            ErrorCode::ReceiverMismatch => "HTLC_ERR_RECEIVER_MISMATCH",
            ErrorCode::TimelockNotSatisfied => "HTLC_ERR_TIMELOCK_NOT_SATISFIED",
            ErrorCode::SenderMismatch => "HTLC_ERR_SENDER_MISMATCH",
        }
    }

    /// Exit code handed back to the host.
    pub fn status(self) -> i8 {
        match self {
            ErrorCode::IndexOutOfBound => STATUS_INDEX_OUT_OF_BOUND,
            ErrorCode::ItemMissing => STATUS_ITEM_MISSING,
            ErrorCode::LengthNotEnough => STATUS_LENGTH_NOT_ENOUGH,
            ErrorCode::Encoding => STATUS_ENCODING,

            ErrorCode::PreimageMismatch => STATUS_PREIMAGE_MISMATCH,
            ErrorCode::ReceiverMismatch => STATUS_RECEIVER_MISMATCH,
            ErrorCode::TimelockNotSatisfied => STATUS_TIMELOCK_NOT_SATISFIED,
            ErrorCode::SenderMismatch => STATUS_SENDER_MISMATCH,
        }
    }

    /// Decode and host-query failures abort verification; the remaining
    /// codes are ordinary rejections of a well-formed spend.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            ErrorCode::IndexOutOfBound
                | ErrorCode::ItemMissing
                | ErrorCode::LengthNotEnough
                | ErrorCode::Encoding
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtlcError {
    pub code: ErrorCode,
    pub msg: &'static str,
}

impl HtlcError {
    pub fn new(code: ErrorCode, msg: &'static str) -> Self {
        Self { code, msg }
    }

    pub fn decode(msg: &'static str) -> Self {
        Self::new(ErrorCode::Encoding, msg)
    }

    pub fn status(&self) -> i8 {
        self.code.status()
    }
}

impl fmt::Display for HtlcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.msg.is_empty() {
            write!(f, "{}", self.code.as_str())
        } else {
            write!(f, "{}: {}", self.code.as_str(), self.msg)
        }
    }
}

impl std::error::Error for HtlcError {}

/// Syscall failures map onto the fatal codes. Errors outside the load
/// syscalls' ABI have no dedicated code and report as a missing item.
impl From<SysError> for HtlcError {
    fn from(err: SysError) -> Self {
        match err {
            SysError::IndexOutOfBound => Self::new(ErrorCode::IndexOutOfBound, "index out of bound"),
            SysError::ItemMissing => Self::new(ErrorCode::ItemMissing, "item missing"),
            SysError::LengthNotEnough(_) => {
                Self::new(ErrorCode::LengthNotEnough, "buffer length not enough")
            }
            SysError::Encoding => Self::decode("host data encoding"),
            _ => Self::new(ErrorCode::ItemMissing, "unexpected host error"),
        }
    }
}
