use crate::constants::IDENTIFIER_WIDTH;
use crate::host::Source;
use crate::htlc::HtlcId;
use crate::path::PathKind;

/// Checkpoints reported while a spend is verified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event<'a> {
    ArgsDecoded(&'a HtlcId),
    PathSelected(PathKind),
    SinceCompared {
        required: u64,
        input: u64,
        satisfied: bool,
    },
    PreimageHashed {
        expected: [u8; IDENTIFIER_WIDTH],
        actual: [u8; IDENTIFIER_WIDTH],
    },
    LockHashCompared {
        source: Source,
        index: usize,
        expected: [u8; IDENTIFIER_WIDTH],
        actual: [u8; IDENTIFIER_WIDTH],
    },
}

/// Diagnostic sink passed into verification. Observers see events but
/// cannot influence the outcome.
pub trait Observer {
    fn on_event(&mut self, event: &Event<'_>);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_event(&mut self, _event: &Event<'_>) {}
}
