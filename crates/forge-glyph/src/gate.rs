//! Upstream version gate

/// Outcome of comparing the upstream version with the recorded one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Recorded version equals upstream; nothing to do
    Unchanged { version: String },
    /// Versions differ (or nothing recorded yet)
    Changed {
        previous: Option<String>,
        current: String,
    },
    /// Gate bypassed by configuration or `--force`
    Forced { current: String },
}

impl GateDecision {
    /// Whether the run should regenerate the artifacts
    pub fn should_generate(&self) -> bool {
        !matches!(self, GateDecision::Unchanged { .. })
    }
}

/// Compare versions by plain string equality.
///
/// No semver interpretation: `1.0` and `1.0.0` are different versions.
pub fn check(current: &str, recorded: Option<&str>, enabled: bool) -> GateDecision {
    if !enabled {
        return GateDecision::Forced {
            current: current.to_string(),
        };
    }
    match recorded {
        Some(recorded) if recorded == current => GateDecision::Unchanged {
            version: current.to_string(),
        },
        previous => GateDecision::Changed {
            previous: previous.map(str::to_string),
            current: current.to_string(),
        },
    }
}
