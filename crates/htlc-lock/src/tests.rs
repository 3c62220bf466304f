use core::cmp::Ordering;

use ckb_std::ckb_types::{packed, prelude::*};
use ckb_std::error::SysError;

use crate::constants::*;
use crate::error::{ErrorCode, HtlcError};
use crate::hash::{short_hash, truncate_identifier, CkbHasher, Hasher};
use crate::host::{Source, TxContext};
use crate::mock::MockTransaction;
use crate::observer::{Event, Observer};
use crate::path::{load_witness_lock, select_path, PathKind, SpendPath, WitnessLoadOutcome};
use crate::script::{
    hash_type_from_u8, lock_hash, new_script, witness_lock, witness_with_lock, Script,
    ScriptHashType, WitnessArgs,
};
use crate::since::{compare_since, since_is_valid, since_satisfies, EpochNumberWithFraction, Since};
use crate::table::{encode_table, parse_table};
use crate::{
    htlc_id_bytes, parse_htlc_id, parse_unlock_proof, unlock_proof_bytes, verify_htlc_spend,
    ArgsLayout, HtlcId, UnlockProof, VerifyConfig,
};

const ID_HEX: &str = "5800000014000000280000003c00000050000000\
1234567890123456789012345678901234567890\
1234567890123456789012345678901234567890\
1234567890123456789012345678901234567890\
d202964900000000";
const PROOF_HEX: &str =
    "28000000080000001234567890123456789012345678901234567890123456789012345678901234";
const PREIMAGE_HEX: &str = "1234567890123456789012345678901234567890123456789012345678901234";
const PREIMAGE_SHORT_HASH_HEX: &str = "711a1f01ff6b8712af57df1acac90e3c093dbeeb";

fn arr<const N: usize>(h: &str) -> [u8; N] {
    let v = hex::decode(h).expect("hex");
    let mut out = [0u8; N];
    out.copy_from_slice(&v);
    out
}

fn vector_id() -> HtlcId {
    let ident = arr::<20>("1234567890123456789012345678901234567890");
    HtlcId {
        from: ident,
        to: ident,
        hash: ident,
        since: 1_234_567_890,
    }
}

fn lock(tag: u8) -> Script {
    new_script([tag; 32], ScriptHashType::Type, &[tag])
}

#[derive(Default)]
struct Recorder {
    paths: Vec<PathKind>,
    since: Vec<(u64, u64, bool)>,
    lock_hashes: Vec<(Source, usize)>,
}

impl Observer for Recorder {
    fn on_event(&mut self, event: &Event<'_>) {
        match event {
            Event::PathSelected(kind) => self.paths.push(*kind),
            Event::SinceCompared {
                required,
                input,
                satisfied,
            } => self.since.push((*required, *input, *satisfied)),
            Event::LockHashCompared { source, index, .. } => {
                self.lock_hashes.push((*source, *index))
            }
            Event::ArgsDecoded(_) | Event::PreimageHashed { .. } => {}
        }
    }
}

#[test]
fn htlc_id_reference_vector() {
    let id = vector_id();
    let enc = htlc_id_bytes(&id);
    assert_eq!(hex::encode(&enc), ID_HEX);
    assert_eq!(enc.len(), HTLC_ID_BYTES);
    assert_eq!(parse_htlc_id(&enc).expect("decode"), id);
    assert_eq!(id.to_bytes(), enc);
}

#[test]
fn unlock_proof_reference_vector() {
    let proof = UnlockProof {
        preimage: arr::<32>(PREIMAGE_HEX),
    };
    let enc = unlock_proof_bytes(&proof);
    assert_eq!(hex::encode(&enc), PROOF_HEX);
    assert_eq!(enc.len(), UNLOCK_PROOF_BYTES);
    assert_eq!(parse_unlock_proof(&enc).expect("decode"), proof);
}

#[test]
fn short_hash_reference_vector() {
    let preimage = arr::<32>(PREIMAGE_HEX);
    assert_eq!(hex::encode(short_hash(&preimage)), PREIMAGE_SHORT_HASH_HEX);
    let full = CkbHasher.digest(&preimage);
    assert_eq!(truncate_identifier(&full), short_hash(&preimage));
}

#[test]
fn parse_htlc_id_truncated_header() {
    let err = parse_htlc_id(&[0x58, 0x00, 0x00]).unwrap_err();
    assert_eq!(err.code, ErrorCode::Encoding);
}

#[test]
fn parse_htlc_id_total_size_mismatch() {
    let mut b = hex::decode(ID_HEX).unwrap();
    b.push(0x00);
    let err = parse_htlc_id(&b).unwrap_err();
    assert_eq!(err.msg, "table total_size mismatch");
}

#[test]
fn parse_htlc_id_field_count_mismatch() {
    let b = hex::decode(PROOF_HEX).unwrap();
    let err = parse_htlc_id(&b).unwrap_err();
    assert_eq!(err.code, ErrorCode::Encoding);
    assert_eq!(err.msg, "table field count mismatch");
}

#[test]
fn parse_htlc_id_offset_out_of_bounds() {
    let mut b = hex::decode(ID_HEX).unwrap();
    // Last offset (0x50) moved past total_size (0x58).
    b[16..20].copy_from_slice(&0x60u32.to_le_bytes());
    let err = parse_htlc_id(&b).unwrap_err();
    assert_eq!(err.msg, "table offset out of bounds");
}

#[test]
fn parse_htlc_id_offsets_not_monotonic() {
    let mut b = hex::decode(ID_HEX).unwrap();
    b[12..16].copy_from_slice(&0x50u32.to_le_bytes());
    b[16..20].copy_from_slice(&0x3cu32.to_le_bytes());
    let err = parse_htlc_id(&b).unwrap_err();
    assert_eq!(err.msg, "table offsets not monotonic");
}

#[test]
fn parse_htlc_id_rejects_wrong_field_width() {
    let short_from = [0x11u8; 19];
    let b = encode_table(&[&short_from[..], &[0u8; 20][..], &[0u8; 21][..], &[0u8; 8][..]]);
    let err = parse_htlc_id(&b).unwrap_err();
    assert_eq!(err.msg, "HTLCId.from length mismatch");

    let b = encode_table(&[&[0u8; 20][..], &[0u8; 20][..], &[0u8; 20][..], &[0u8; 4][..]]);
    let err = parse_htlc_id(&b).unwrap_err();
    assert_eq!(err.msg, "HTLCId.since length mismatch");
}

#[test]
fn parse_unlock_proof_rejects_short_preimage() {
    let b = encode_table(&[&[0xaau8; 31][..]]);
    let err = parse_unlock_proof(&b).unwrap_err();
    assert_eq!(err.code, ErrorCode::Encoding);
    assert_eq!(err.msg, "UnlockProof.preimage length mismatch");
}

#[test]
fn parse_table_empty_and_header_only() {
    let fields = parse_table::<0>(&[4, 0, 0, 0]).expect("empty table");
    assert!(fields.is_empty());
    assert!(parse_table::<1>(&[4, 0, 0, 0]).is_err());
}

#[test]
fn witness_lock_reads_only_the_lock_field() {
    let w = witness_with_lock(&[1, 2, 3]);
    // header(4) + 3 offsets(12) + lock fixvec(4 + 3); absent fields are empty.
    assert_eq!(w.as_slice().len(), 23);
    assert_eq!(witness_lock(w.as_slice()).expect("decode"), Some(vec![1, 2, 3]));

    let empty = WitnessArgs::default();
    assert_eq!(
        empty.as_slice(),
        &[16, 0, 0, 0, 16, 0, 0, 0, 16, 0, 0, 0, 16, 0, 0, 0][..]
    );
    assert_eq!(witness_lock(empty.as_slice()).expect("decode"), None);

    let typed_only = WitnessArgs::new_builder()
        .input_type(packed::BytesOpt::new_builder().set(Some([7u8; 4][..].pack())).build())
        .build();
    assert_eq!(witness_lock(typed_only.as_slice()).expect("decode"), None);
}

#[test]
fn witness_lock_rejects_malformed_args() {
    let err = witness_lock(&[0xff; 3]).unwrap_err();
    assert_eq!(err.code, ErrorCode::Encoding);

    let mut b = witness_with_lock(&[1, 2, 3]).as_slice().to_vec();
    b.push(0);
    assert!(witness_lock(&b).is_err());
}

#[test]
fn script_layout_and_lock_hash() {
    let s = lock(7);
    let b = s.as_slice();
    // header(4) + 3 offsets(12) + code_hash(32) + hash_type(1) + args fixvec(4 + 1)
    assert_eq!(b.len(), 54);
    assert_eq!(b[48], 1);
    assert!(packed::ScriptReader::verify(b, false).is_ok());
    assert_eq!(lock_hash(&s), CkbHasher.digest(b));
    assert_ne!(lock_hash(&s), lock_hash(&lock(8)));
}

#[test]
fn hash_type_byte_values() {
    assert_eq!(hash_type_from_u8(0).unwrap(), ScriptHashType::Data);
    assert_eq!(hash_type_from_u8(1).unwrap(), ScriptHashType::Type);
    assert_eq!(hash_type_from_u8(2).unwrap(), ScriptHashType::Data1);
    assert_eq!(hash_type_from_u8(4).unwrap(), ScriptHashType::Data2);
    assert_eq!(hash_type_from_u8(3).unwrap_err().msg, "Script.hash_type invalid");
    assert!(hash_type_from_u8(5).is_err());
}

#[test]
fn since_block_number_ordering() {
    let required = Since::from_block_number(100, true).unwrap();
    assert!(since_satisfies(Since::from_block_number(100, true).unwrap(), required));
    assert!(since_satisfies(Since::from_block_number(101, true).unwrap(), required));
    assert!(!since_satisfies(Since::from_block_number(99, true).unwrap(), required));
}

#[test]
fn since_timestamp_ordering() {
    let required = Since::from_timestamp(1_700_000_000, true).unwrap();
    assert!(since_satisfies(Since::from_timestamp(1_700_000_000, true).unwrap(), required));
    assert!(!since_satisfies(Since::from_timestamp(1_699_999_999, true).unwrap(), required));
}

#[test]
fn since_rejects_cross_category_comparison() {
    let abs_block = Since::from_block_number(10, true).unwrap();
    let rel_block = Since::from_block_number(10, false).unwrap();
    let abs_time = Since::from_timestamp(10, true).unwrap();
    assert_eq!(compare_since(abs_block, rel_block), None);
    assert_eq!(compare_since(abs_block, abs_time), None);
    assert!(!since_satisfies(rel_block, abs_block));
    assert!(!since_satisfies(Since::from_timestamp(u32::MAX as u64, true).unwrap(), abs_block));
}

#[test]
fn since_rejects_reserved_bits_and_unknown_metric() {
    let reserved = Since::new(0x0100_0000_0000_0005);
    assert!(!since_is_valid(reserved));
    assert_eq!(compare_since(reserved, reserved), None);

    let bad_metric = Since::new(SINCE_METRIC_MASK | 5);
    assert!(!since_is_valid(bad_metric));
    assert_eq!(compare_since(bad_metric, bad_metric), None);
}

#[test]
fn since_epoch_fraction_ordering() {
    let e = |number, index, length| {
        Since::from_epoch(
            EpochNumberWithFraction::new_unchecked(number, index, length),
            false,
        )
    };
    assert_eq!(compare_since(e(10, 1, 2), e(10, 2, 4)), Some(Ordering::Equal));
    assert_eq!(compare_since(e(10, 1, 2), e(10, 1, 3)), Some(Ordering::Greater));
    assert_eq!(compare_since(e(9, 99, 100), e(10, 0, 1)), Some(Ordering::Less));
    // Zero length is a whole epoch.
    assert_eq!(compare_since(e(5, 0, 0), e(5, 0, 1)), Some(Ordering::Equal));
    assert_eq!(compare_since(e(5, 0, 0), e(5, 1, 2)), Some(Ordering::Less));
    assert!(e(5, 0, 0).is_relative());

    assert!(EpochNumberWithFraction::create(1, 3, 2).is_none());
    assert!(!since_is_valid(e(1, 3, 2)));
    assert!(!since_is_valid(e(1, 1, 0)));
    assert_eq!(compare_since(e(1, 3, 2), e(1, 0, 1)), None);
}

#[test]
fn since_rejects_value_overflow() {
    assert!(Since::from_block_number(SINCE_VALUE_MASK + 1, true).is_none());
    assert_eq!(
        Since::from_block_number(SINCE_VALUE_MASK, true)
            .unwrap()
            .as_u64(),
        SINCE_VALUE_MASK
    );

    // Would overflow once scaled to milliseconds.
    let huge = Since::from_timestamp(SINCE_VALUE_MASK, true).unwrap();
    assert!(!since_is_valid(huge));
    assert_eq!(compare_since(huge, huge), None);
    assert!(since_is_valid(Since::from_timestamp(u64::MAX / 1000, true).unwrap()));
}

#[test]
fn sys_error_maps_to_fatal_codes() {
    let cases = [
        (SysError::IndexOutOfBound, ErrorCode::IndexOutOfBound, 1),
        (SysError::ItemMissing, ErrorCode::ItemMissing, 2),
        (SysError::LengthNotEnough(64), ErrorCode::LengthNotEnough, 3),
        (SysError::Encoding, ErrorCode::Encoding, 4),
        (SysError::Unknown(42), ErrorCode::ItemMissing, 2),
    ];
    for (sys, code, status) in cases {
        let err = HtlcError::from(sys);
        assert_eq!(err.code, code, "{sys:?}");
        assert_eq!(err.status(), status, "{sys:?}");
        assert!(err.code.is_fatal());
    }
}

#[test]
fn mock_host_reports_sys_errors() {
    let htlc = lock(1);
    let tx = MockTransaction::new(htlc.clone()).input(htlc, 7);
    assert_eq!(tx.load_input_since(0, Source::GroupInput).unwrap(), 7);
    assert_eq!(
        tx.load_input_since(0, Source::Output).unwrap_err().code,
        ErrorCode::ItemMissing
    );
    assert_eq!(
        tx.load_input_since(1, Source::Input).unwrap_err().code,
        ErrorCode::IndexOutOfBound
    );
    assert_eq!(
        tx.load_cell_lock_hash(0, Source::Output).unwrap_err().code,
        ErrorCode::IndexOutOfBound
    );
    assert_eq!(tx.load_script_args().unwrap(), vec![1]);
}

#[test]
fn witness_lock_outcomes() {
    let htlc = lock(1);
    let base = MockTransaction::new(htlc.clone()).input(htlc, 0);

    // No witness at all.
    assert_eq!(load_witness_lock(&base), WitnessLoadOutcome::Absent);

    // Undecodable WitnessArgs.
    let garbage = base.clone().witness(vec![0xff; 3]);
    assert_eq!(load_witness_lock(&garbage), WitnessLoadOutcome::Absent);

    // Lock field missing.
    let no_lock = base.clone().witness(WitnessArgs::default().as_slice().to_vec());
    assert_eq!(load_witness_lock(&no_lock), WitnessLoadOutcome::Absent);

    // Lock field present but empty.
    let empty_lock = base.clone().witness(witness_with_lock(&[]).as_slice().to_vec());
    assert_eq!(load_witness_lock(&empty_lock), WitnessLoadOutcome::Absent);

    let present = base.witness(witness_with_lock(&[9, 9]).as_slice().to_vec());
    assert_eq!(
        load_witness_lock(&present),
        WitnessLoadOutcome::Present(vec![9, 9])
    );
}

#[test]
fn select_path_is_decided_by_outcome() {
    assert_eq!(select_path(WitnessLoadOutcome::Absent), SpendPath::Refund);
    let fund = select_path(WitnessLoadOutcome::Present(vec![1]));
    assert_eq!(fund.kind(), PathKind::Fund);
    assert_eq!(
        fund,
        SpendPath::Fund {
            witness_lock: vec![1]
        }
    );
}

#[test]
fn args_layout_strips_js_vm_prefix() {
    let id = htlc_id_bytes(&vector_id());
    let mut args = vec![0u8; JS_VM_ARGS_PREFIX_BYTES];
    args.extend_from_slice(&id);
    assert_eq!(ArgsLayout::JsVm.strip(&args).unwrap(), &id[..]);
    assert_eq!(ArgsLayout::Raw.strip(&id).unwrap(), &id[..]);

    let err = ArgsLayout::JsVm.strip(&[0u8; 34]).unwrap_err();
    assert_eq!(err.code, ErrorCode::Encoding);
}

#[test]
fn refund_reports_since_then_sender_check() {
    let sender = lock(2);
    let id = HtlcId {
        from: truncate_identifier(&lock_hash(&sender)),
        to: [0u8; 20],
        hash: [0u8; 20],
        since: 50,
    };
    let htlc = new_script([1u8; 32], ScriptHashType::Type, &htlc_id_bytes(&id));
    let tx = MockTransaction::new(htlc.clone())
        .input(htlc, 60)
        .input(sender, 0);

    let mut rec = Recorder::default();
    let kind = verify_htlc_spend(&tx, &CkbHasher, &mut rec, &VerifyConfig::default())
        .expect("refund ok");
    assert_eq!(kind, PathKind::Refund);
    assert_eq!(rec.paths, vec![PathKind::Refund]);
    assert_eq!(rec.since, vec![(50, 60, true)]);
    assert_eq!(rec.lock_hashes, vec![(Source::Input, REFUND_SENDER_INPUT_INDEX)]);
}

#[test]
fn refund_stops_before_sender_check_when_timelock_fails() {
    let id = HtlcId {
        from: [0u8; 20],
        to: [0u8; 20],
        hash: [0u8; 20],
        since: 50,
    };
    let htlc = new_script([1u8; 32], ScriptHashType::Type, &htlc_id_bytes(&id));
    // No sender input: a lock-hash query would fail with IndexOutOfBound.
    let tx = MockTransaction::new(htlc.clone()).input(htlc, 49);

    let mut rec = Recorder::default();
    let err =
        verify_htlc_spend(&tx, &CkbHasher, &mut rec, &VerifyConfig::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::TimelockNotSatisfied);
    assert!(rec.lock_hashes.is_empty());
}

#[test]
fn refund_sender_query_failure_is_fatal() {
    let id = HtlcId {
        from: [0u8; 20],
        to: [0u8; 20],
        hash: [0u8; 20],
        since: 0,
    };
    let htlc = new_script([1u8; 32], ScriptHashType::Type, &htlc_id_bytes(&id));
    let tx = MockTransaction::new(htlc.clone()).input(htlc, 0);

    let err = verify_htlc_spend(&tx, &CkbHasher, &mut Recorder::default(), &VerifyConfig::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::IndexOutOfBound);
    assert!(err.code.is_fatal());
}
