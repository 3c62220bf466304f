use crate::constants::{JS_VM_ARGS_PREFIX_BYTES, STATUS_SUCCESS};
use crate::error::HtlcError;
use crate::fund::verify_fund;
use crate::hash::{CkbHasher, Hasher};
use crate::host::TxContext;
use crate::htlc::parse_htlc_id;
use crate::observer::{Event, NoopObserver, Observer};
use crate::path::{load_witness_lock, select_path, PathKind, SpendPath};
use crate::refund::verify_refund;

/// How the HTLCId sits inside the executing script's args.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArgsLayout {
    /// Args are the HTLCId table itself.
    #[default]
    Raw,
    /// Script runs under ckb-js-vm: args start with flags(2), the contract
    /// code_hash(32) and its hash_type(1).
    JsVm,
}

impl ArgsLayout {
    pub fn prefix_len(self) -> usize {
        match self {
            ArgsLayout::Raw => 0,
            ArgsLayout::JsVm => JS_VM_ARGS_PREFIX_BYTES,
        }
    }

    pub fn strip(self, args: &[u8]) -> Result<&[u8], HtlcError> {
        let n = self.prefix_len();
        if args.len() < n {
            return Err(HtlcError::decode("script args shorter than layout prefix"));
        }
        Ok(&args[n..])
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerifyConfig {
    pub args_layout: ArgsLayout,
}

/// Decodes the HTLCId, picks the spend path and runs its checks.
/// Returns the path that succeeded.
pub fn verify_htlc_spend(
    ctx: &dyn TxContext,
    hasher: &dyn Hasher,
    observer: &mut dyn Observer,
    config: &VerifyConfig,
) -> Result<PathKind, HtlcError> {
    let raw_args = ctx.load_script_args()?;
    let id = parse_htlc_id(config.args_layout.strip(&raw_args)?)?;
    observer.on_event(&Event::ArgsDecoded(&id));

    let path = select_path(load_witness_lock(ctx));
    let kind = path.kind();
    observer.on_event(&Event::PathSelected(kind));

    match path {
        SpendPath::Refund => verify_refund(ctx, observer, &id)?,
        SpendPath::Fund { witness_lock } => {
            verify_fund(ctx, hasher, observer, &id, &witness_lock)?
        }
    }
    Ok(kind)
}

pub fn status_code<T>(result: &Result<T, HtlcError>) -> i8 {
    match result {
        Ok(_) => STATUS_SUCCESS,
        Err(e) => e.status(),
    }
}

/// Script entry: verification with the chain hash and no diagnostics,
/// reduced to the exit status handed back to the host.
pub fn program_entry(ctx: &dyn TxContext, config: &VerifyConfig) -> i8 {
    program_entry_with(ctx, &CkbHasher, &mut NoopObserver, config)
}

pub fn program_entry_with(
    ctx: &dyn TxContext,
    hasher: &dyn Hasher,
    observer: &mut dyn Observer,
    config: &VerifyConfig,
) -> i8 {
    status_code(&verify_htlc_spend(ctx, hasher, observer, config))
}
