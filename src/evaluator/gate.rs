use serde::{Deserialize, Serialize};

/// CI gate verdict. Ordered so escalation is a `max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateStatus {
    #[default]
    Pass,
    Warn,
    Fail,
}

impl GateStatus {
    /// Raise the status to at least `to`. Never downgrades.
    pub fn escalate(&mut self, to: GateStatus) {
        *self = (*self).max(to);
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Pass => "PASS",
            GateStatus::Warn => "WARN",
            GateStatus::Fail => "FAIL",
        }
    }

    /// Process exit code. WARN only fails the run in strict mode.
    pub fn exit_code(&self, strict: bool) -> u8 {
        match self {
            GateStatus::Fail => 1,
            GateStatus::Warn if strict => 1,
            GateStatus::Warn | GateStatus::Pass => 0,
        }
    }
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
