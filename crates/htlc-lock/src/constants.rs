/// Width of every identifier compared by the lock: `from`, `to` and `hash`
/// are the first 20 bytes of a 32-byte digest.
pub const IDENTIFIER_WIDTH: usize = 20;
pub const DIGEST_BYTES: usize = 32;
pub const PREIMAGE_BYTES: usize = 32;
pub const SINCE_BYTES: usize = 8;

pub const TABLE_HEADER_BYTES: usize = 4;
pub const TABLE_OFFSET_BYTES: usize = 4;

pub const HTLC_ID_FIELD_COUNT: usize = 4;
pub const UNLOCK_PROOF_FIELD_COUNT: usize = 1;

// header(4) + 4 offsets(16) + from(20) + to(20) + hash(20) + since(8)
pub const HTLC_ID_BYTES: usize = 88;
// header(4) + 1 offset(4) + preimage(32)
pub const UNLOCK_PROOF_BYTES: usize = 40;

/// ckb-js-vm args prefix: flags(2) + code_hash(32) + hash_type(1).
pub const JS_VM_ARGS_PREFIX_BYTES: usize = 35;

pub const STATUS_SUCCESS: i8 = 0;
pub const STATUS_INDEX_OUT_OF_BOUND: i8 = 1;
pub const STATUS_ITEM_MISSING: i8 = 2;
pub const STATUS_LENGTH_NOT_ENOUGH: i8 = 3;
pub const STATUS_ENCODING: i8 = 4;
pub const STATUS_PREIMAGE_MISMATCH: i8 = 100;
pub const STATUS_RECEIVER_MISMATCH: i8 = 101;
pub const STATUS_TIMELOCK_NOT_SATISFIED: i8 = 110;
pub const STATUS_SENDER_MISMATCH: i8 = 111;

/// Input under validation, relative to the script group.
pub const GROUP_INPUT_INDEX: usize = 0;
/// Sender-owned input accompanying a refund, absolute input index.
pub const REFUND_SENDER_INPUT_INDEX: usize = 1;
/// Receiver output of a fund, absolute output index.
pub const FUND_RECEIVER_OUTPUT_INDEX: usize = 0;

/// Since metric bits; ckb-std keeps its own masks private.
pub const SINCE_METRIC_MASK: u64 = 0x6000_0000_0000_0000;
pub const SINCE_METRIC_EPOCH: u64 = 0x2000_0000_0000_0000;
pub const SINCE_METRIC_TIMESTAMP: u64 = 0x4000_0000_0000_0000;
pub const SINCE_VALUE_MASK: u64 = 0x00ff_ffff_ffff_ffff;
