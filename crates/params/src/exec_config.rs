use serde::{Deserialize, Serialize};

/// Knobs handed through to the execution engine untouched.
///
/// None of these may change consensus results.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecConfig {
    /// Enables engine-side instruction tracing.
    pub debug: bool,

    /// Records hash preimages produced during execution.
    pub record_preimages: bool,
}
