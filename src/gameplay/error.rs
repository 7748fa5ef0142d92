/// Rejection taxonomy for the public action surface.
///
/// The first three variants are rejected to the sender only: no state was
/// mutated and nothing is broadcast. `FatalInconsistency` must never be
/// reachable through valid input; when detected the game is terminated and
/// flagged rather than allowed to continue in an undefined state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Wrong turn, wrong phase, malformed card selection, unknown target.
    InvalidAction(String),
    /// Structurally fine but against the rules, e.g. a five-cat claim with
    /// an empty discard pile or a favor at an empty-handed target.
    RuleViolation(String),
    /// Lost a race: a counter after its window closed, a duplicate
    /// reconnect. Idempotent, no visible side effect beyond the notice.
    RaceRejected(String),
    /// Internal invariant violation.
    FatalInconsistency(String),
}

impl ActionError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidAction(reason.into())
    }
    pub fn rule(reason: impl Into<String>) -> Self {
        Self::RuleViolation(reason.into())
    }
    pub fn race(reason: impl Into<String>) -> Self {
        Self::RaceRejected(reason.into())
    }
    pub fn fatal(reason: impl Into<String>) -> Self {
        Self::FatalInconsistency(reason.into())
    }
    /// True when the game must be torn down rather than continued.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FatalInconsistency(_))
    }
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAction(s) => write!(f, "invalid action: {}", s),
            Self::RuleViolation(s) => write!(f, "rule violation: {}", s),
            Self::RaceRejected(s) => write!(f, "rejected: {}", s),
            Self::FatalInconsistency(s) => write!(f, "fatal inconsistency: {}", s),
        }
    }
}

impl std::error::Error for ActionError {}
