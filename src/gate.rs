//! Prerequisite gates evaluated before running the entry script.
//!
//! A [`GateSequence`] is an ordered list of predicate-guarded steps. Steps
//! run left to right; disabled steps are skipped without being invoked, and
//! the first step returning a non-zero exit code stops the sequence.

use std::io::Write;

use crate::Result;

/// One prerequisite step.
pub struct Gate<'a> {
    /// Short identifier (`type-check`, `doc`)
    pub name: &'static str,
    /// Whether the step runs at all
    pub enabled: bool,
    /// CLI flag that disables this gate, shown when it fails
    pub bypass_flag: &'static str,
    start_message: String,
    pass_message: String,
    fail_message: String,
    invoke: Box<dyn FnOnce() -> Result<i32> + 'a>,
}

impl<'a> Gate<'a> {
    pub fn new(
        name: &'static str,
        enabled: bool,
        bypass_flag: &'static str,
        invoke: impl FnOnce() -> Result<i32> + 'a,
    ) -> Self {
        Self {
            name,
            enabled,
            bypass_flag,
            start_message: format!("Running {}...", name),
            pass_message: format!("{} passed.", name),
            fail_message: format!("{} failed, fix before running.", name),
            invoke: Box::new(invoke),
        }
    }

    /// Override the progress lines printed around the step.
    pub fn with_messages(
        mut self,
        start: impl Into<String>,
        pass: impl Into<String>,
        fail: impl Into<String>,
    ) -> Self {
        self.start_message = start.into();
        self.pass_message = pass.into();
        self.fail_message = fail.into();
        self
    }
}

/// Result of evaluating a [`GateSequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Every enabled gate exited 0 (or none were enabled)
    Passed,
    /// A gate exited non-zero; later gates were not run
    Failed { gate: &'static str, code: i32 },
}

impl GateOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, GateOutcome::Passed)
    }
}

/// Ordered, short-circuiting list of gates.
#[derive(Default)]
pub struct GateSequence<'a> {
    gates: Vec<Gate<'a>>,
}

impl<'a> GateSequence<'a> {
    pub fn new() -> Self {
        Self { gates: Vec::new() }
    }

    pub fn gate(mut self, gate: Gate<'a>) -> Self {
        self.gates.push(gate);
        self
    }

    /// Names of the gates that will be invoked, in order.
    pub fn enabled(&self) -> Vec<&'static str> {
        self.gates
            .iter()
            .filter(|g| g.enabled)
            .map(|g| g.name)
            .collect()
    }

    /// Evaluate gates in order, writing progress lines to `out`.
    pub fn run(self, out: &mut dyn Write) -> Result<GateOutcome> {
        for gate in self.gates {
            if !gate.enabled {
                tracing::debug!(gate = gate.name, "gate disabled");
                continue;
            }

            writeln!(out, "{}", gate.start_message)?;
            out.flush()?;

            let code = (gate.invoke)()?;
            tracing::debug!(gate = gate.name, code, "gate finished");

            if code != 0 {
                writeln!(out, "{}", gate.fail_message)?;
                writeln!(out, "Use {} to bypass.", gate.bypass_flag)?;
                return Ok(GateOutcome::Failed {
                    gate: gate.name,
                    code,
                });
            }
            writeln!(out, "{}", gate.pass_message)?;
        }
        Ok(GateOutcome::Passed)
    }
}
