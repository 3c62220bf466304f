#![no_main]

use libfuzzer_sys::fuzz_target;

// Arbitrary script args: no panic, deterministic, and accepted inputs
// re-encode to the same bytes.
fuzz_target!(|data: &[u8]| {
    let r1 = htlc_lock::parse_htlc_id(data);
    let r2 = htlc_lock::parse_htlc_id(data);

    match (&r1, &r2) {
        (Ok(a), Ok(b)) => {
            if a != b {
                panic!("parse_htlc_id non-deterministic");
            }
            if htlc_lock::htlc_id_bytes(a) != data {
                panic!("parse_htlc_id accepted non-canonical bytes: {data:02x?}");
            }
        }
        (Err(_), Err(_)) => {}
        _ => panic!("parse_htlc_id non-deterministic error/ok mismatch"),
    }
});
