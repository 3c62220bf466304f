#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(proof) = htlc_lock::parse_unlock_proof(data) else {
        return;
    };
    if htlc_lock::unlock_proof_bytes(&proof) != data {
        panic!("parse_unlock_proof accepted non-canonical bytes: {data:02x?}");
    }
});
