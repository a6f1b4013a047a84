use std::fmt;

/// Function name the host engine knows this aggregate by.
pub const FUNCTION_NAME: &str = "MOMENT";

/// Entry points of the moment function as the host engine sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Single-shot evaluation over a whole bag
    Exec,
    Initial,
    Intermediate,
    Final,
    /// Incremental evaluation over a stream of bags
    Accumulate,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Exec,
        Phase::Initial,
        Phase::Intermediate,
        Phase::Final,
        Phase::Accumulate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Exec => "Exec",
            Phase::Initial => "Initial",
            Phase::Intermediate => "Intermediate",
            Phase::Final => "Final",
            Phase::Accumulate => "Accumulate",
        }
    }

    /// Name the engine resolves this phase by, e.g. `MOMENT.Initial`.
    /// Single-shot and accumulate both live on the bare function name.
    pub fn entry_name(&self) -> String {
        match self {
            Phase::Exec | Phase::Accumulate => FUNCTION_NAME.to_string(),
            other => format!("{}.{}", FUNCTION_NAME, other.as_str()),
        }
    }

    /// Whether the phase belongs to the algebraic split.
    pub fn is_algebraic(&self) -> bool {
        matches!(self, Phase::Initial | Phase::Intermediate | Phase::Final)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
