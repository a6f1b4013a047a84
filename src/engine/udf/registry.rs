use std::collections::HashMap;

use ahash::RandomState as AHashRandomState;
use tracing::debug;

use crate::engine::errors::MomentError;
use crate::engine::udf::datum::{Datum, Tuple};
use crate::engine::udf::function::MomentFunction;
use crate::engine::udf::phase::Phase;

/// Stateless entry point the engine can call by name.
pub type PhaseFn = fn(&Tuple) -> Result<Datum, MomentError>;

#[derive(Clone, Copy)]
pub struct RegisteredPhase {
    pub phase: Phase,
    pub func: PhaseFn,
}

impl std::fmt::Debug for RegisteredPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredPhase")
            .field("phase", &self.phase)
            .finish()
    }
}

/// Name lookup the host engine uses to wire phases into its plan.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    entries: HashMap<String, RegisteredPhase, AHashRandomState>,
}

fn exec_entry(input: &Tuple) -> Result<Datum, MomentError> {
    MomentFunction::exec(input).map(Datum::from)
}

fn initial_entry(input: &Tuple) -> Result<Datum, MomentError> {
    MomentFunction::initial(input).map(Datum::Tuple)
}

fn intermediate_entry(input: &Tuple) -> Result<Datum, MomentError> {
    MomentFunction::intermediate(input).map(Datum::Tuple)
}

fn final_entry(input: &Tuple) -> Result<Datum, MomentError> {
    MomentFunction::final_value(input).map(Datum::from)
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every moment entry point: the bare name, one name per
    /// declared signature, and the three algebraic phases.
    pub fn with_moment() -> Self {
        let mut registry = Self::new();
        registry.register(Phase::Exec.entry_name(), Phase::Exec, exec_entry);
        for sig in MomentFunction::arg_to_func_mapping() {
            registry.register(sig.implementation, Phase::Exec, exec_entry);
        }
        registry.register(MomentFunction::initial_name(), Phase::Initial, initial_entry);
        registry.register(
            MomentFunction::intermediate_name(),
            Phase::Intermediate,
            intermediate_entry,
        );
        registry.register(MomentFunction::final_name(), Phase::Final, final_entry);
        registry
    }

    /// Registers `func` under `name`, returning the entry it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        phase: Phase,
        func: PhaseFn,
    ) -> Option<RegisteredPhase> {
        let name = name.into();
        debug!(target: "moment_agg::registry", name = %name, phase = %phase, "Registering entry point");
        self.entries.insert(name, RegisteredPhase { phase, func })
    }

    pub fn resolve(&self, name: &str) -> Option<&RegisteredPhase> {
        self.entries.get(name)
    }

    /// Resolves `name` and runs it on `input`. Unknown names are structural
    /// errors: the engine wired a plan this function cannot serve.
    pub fn invoke(&self, name: &str, input: &Tuple) -> Result<Datum, MomentError> {
        let entry = self.resolve(name).ok_or_else(|| {
            MomentError::structural(Phase::Exec, format!("no entry point named {}", name))
        })?;
        (entry.func)(input)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
