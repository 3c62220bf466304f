use htlc_lock::{
    hash_type_from_u8, htlc_id_bytes, lock_hash, new_script, parse_htlc_id, parse_unlock_proof,
    short_hash, unlock_proof_bytes, verify_htlc_spend, ArgsLayout, CkbHasher, ErrorCode, Event,
    HtlcId, MockTransaction, NoopObserver, Observer, Script, UnlockProof, VerifyConfig,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct Request {
    op: String,

    #[serde(default)]
    from: String,

    #[serde(default)]
    to: String,

    #[serde(default)]
    hash: String,

    #[serde(default)]
    since: u64,

    #[serde(default)]
    data_hex: String,

    #[serde(default)]
    preimage_hex: String,

    #[serde(default)]
    script: Option<ScriptJson>,

    #[serde(default)]
    tx: Option<TxJson>,

    #[serde(default)]
    args_layout: String,

    #[serde(default)]
    trace: bool,
}

#[derive(Deserialize)]
struct ScriptJson {
    code_hash: String,
    hash_type: u8,

    #[serde(default)]
    args: String,
}

#[derive(Deserialize)]
struct InputJson {
    lock: ScriptJson,

    #[serde(default)]
    since: u64,
}

#[derive(Deserialize)]
struct TxJson {
    script: ScriptJson,

    #[serde(default)]
    inputs: Vec<InputJson>,

    #[serde(default)]
    outputs: Vec<ScriptJson>,

    #[serde(default)]
    witnesses: Vec<String>,
}

#[derive(Default, Serialize)]
struct Response {
    ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    err: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    encoded: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    preimage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<i8>,
}

fn err_code(code: ErrorCode) -> String {
    code.as_str().to_string()
}

fn fail(err: impl Into<String>) -> Response {
    Response {
        ok: false,
        err: Some(err.into()),
        ..Response::default()
    }
}

fn decode_hex(h: &str, what: &str) -> Result<Vec<u8>, Response> {
    hex::decode(h.strip_prefix("0x").unwrap_or(h)).map_err(|_| fail(format!("bad {what}")))
}

fn decode_array<const N: usize>(h: &str, what: &str) -> Result<[u8; N], Response> {
    let b = decode_hex(h, what)?;
    if b.len() != N {
        return Err(fail(format!("bad {what}")));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&b);
    Ok(out)
}

fn to_script(s: &ScriptJson) -> Result<Script, Response> {
    let hash_type = hash_type_from_u8(s.hash_type).map_err(|e| fail(err_code(e.code)))?;
    Ok(new_script(
        decode_array(&s.code_hash, "code_hash")?,
        hash_type,
        &decode_hex(&s.args, "args")?,
    ))
}

fn to_mock_tx(tx: &TxJson) -> Result<MockTransaction, Response> {
    let mut mock = MockTransaction::new(to_script(&tx.script)?);
    for input in &tx.inputs {
        mock = mock.input(to_script(&input.lock)?, input.since);
    }
    for output in &tx.outputs {
        mock = mock.output(to_script(output)?);
    }
    for w in &tx.witnesses {
        mock = mock.witness(decode_hex(w, "witness")?);
    }
    Ok(mock)
}

fn parse_args_layout(s: &str) -> Result<ArgsLayout, Response> {
    match s {
        "" | "raw" => Ok(ArgsLayout::Raw),
        "js_vm" => Ok(ArgsLayout::JsVm),
        _ => Err(fail("bad args_layout")),
    }
}

/// Writes verification checkpoints to stderr, one line per event.
struct StderrObserver;

impl Observer for StderrObserver {
    fn on_event(&mut self, event: &Event<'_>) {
        match event {
            Event::ArgsDecoded(id) => eprintln!(
                "args: from={} to={} hash={} since={}",
                hex::encode(id.from),
                hex::encode(id.to),
                hex::encode(id.hash),
                id.since
            ),
            Event::PathSelected(kind) => eprintln!("path: {}", kind.as_str()),
            Event::SinceCompared {
                required,
                input,
                satisfied,
            } => eprintln!("since: required={required} input={input} satisfied={satisfied}"),
            Event::PreimageHashed { expected, actual } => eprintln!(
                "preimage: expected={} actual={}",
                hex::encode(expected),
                hex::encode(actual)
            ),
            Event::LockHashCompared {
                source,
                index,
                expected,
                actual,
            } => eprintln!(
                "lock_hash[{}:{index}]: expected={} actual={}",
                source.as_str(),
                hex::encode(expected),
                hex::encode(actual)
            ),
        }
    }
}

fn handle(req: Request) -> Result<Response, Response> {
    match req.op.as_str() {
        "encode_htlc_id" => {
            let id = HtlcId {
                from: decode_array(&req.from, "from")?,
                to: decode_array(&req.to, "to")?,
                hash: decode_array(&req.hash, "hash")?,
                since: req.since,
            };
            Ok(Response {
                ok: true,
                encoded: Some(hex::encode(htlc_id_bytes(&id))),
                ..Response::default()
            })
        }
        "decode_htlc_id" => {
            let b = decode_hex(&req.data_hex, "data_hex")?;
            let id = parse_htlc_id(&b).map_err(|e| fail(err_code(e.code)))?;
            Ok(Response {
                ok: true,
                from: Some(hex::encode(id.from)),
                to: Some(hex::encode(id.to)),
                hash: Some(hex::encode(id.hash)),
                since: Some(id.since),
                ..Response::default()
            })
        }
        "encode_unlock_proof" => {
            let proof = UnlockProof {
                preimage: decode_array(&req.preimage_hex, "preimage_hex")?,
            };
            Ok(Response {
                ok: true,
                encoded: Some(hex::encode(unlock_proof_bytes(&proof))),
                ..Response::default()
            })
        }
        "decode_unlock_proof" => {
            let b = decode_hex(&req.data_hex, "data_hex")?;
            let proof = parse_unlock_proof(&b).map_err(|e| fail(err_code(e.code)))?;
            Ok(Response {
                ok: true,
                preimage: Some(hex::encode(proof.preimage)),
                ..Response::default()
            })
        }
        "short_hash" => {
            let b = decode_hex(&req.data_hex, "data_hex")?;
            Ok(Response {
                ok: true,
                digest: Some(hex::encode(short_hash(&b))),
                ..Response::default()
            })
        }
        "lock_hash" => {
            let Some(s) = req.script.as_ref() else {
                return Err(fail("missing script"));
            };
            let script = to_script(s)?;
            Ok(Response {
                ok: true,
                digest: Some(hex::encode(lock_hash(&script))),
                ..Response::default()
            })
        }
        "verify" => {
            let Some(tx) = req.tx.as_ref() else {
                return Err(fail("missing tx"));
            };
            let mock = to_mock_tx(tx)?;
            let config = VerifyConfig {
                args_layout: parse_args_layout(&req.args_layout)?,
            };
            let result = if req.trace {
                verify_htlc_spend(&mock, &CkbHasher, &mut StderrObserver, &config)
            } else {
                verify_htlc_spend(&mock, &CkbHasher, &mut NoopObserver, &config)
            };
            match result {
                Ok(kind) => Ok(Response {
                    ok: true,
                    path: Some(kind.as_str().to_string()),
                    status: Some(0),
                    ..Response::default()
                }),
                Err(e) => Ok(Response {
                    ok: false,
                    err: Some(err_code(e.code)),
                    status: Some(e.status()),
                    ..Response::default()
                }),
            }
        }
        _ => Err(fail("unknown op")),
    }
}

fn main() {
    let resp = match serde_json::from_reader::<_, Request>(std::io::stdin()) {
        Ok(req) => handle(req).unwrap_or_else(|resp| resp),
        Err(e) => fail(format!("bad request: {e}")),
    };
    let _ = serde_json::to_writer(std::io::stdout(), &resp);
}
