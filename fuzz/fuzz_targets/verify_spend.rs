#![no_main]

use htlc_lock::{new_script, program_entry, MockTransaction, ScriptHashType, VerifyConfig};
use libfuzzer_sys::fuzz_target;

// Splits the input into script args and a witness and runs the whole spend
// against a fixed transaction shape. Only checks that no input panics and
// the status is stable across runs.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let split = (data[0] as usize).min(data.len() - 1);
    let (args, witness) = data[1..].split_at(split);

    let htlc = new_script([0xaa; 32], ScriptHashType::Type, args);
    let other = new_script([0x11; 32], ScriptHashType::Data1, &[]);
    let tx = MockTransaction::new(htlc.clone())
        .input(htlc, 0)
        .input(other.clone(), 0)
        .output(other)
        .witness(witness.to_vec());

    let config = VerifyConfig::default();
    let s1 = program_entry(&tx, &config);
    let s2 = program_entry(&tx, &config);
    if s1 != s2 {
        panic!("verify non-deterministic: {s1} vs {s2}");
    }
});
