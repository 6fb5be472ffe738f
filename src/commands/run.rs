//! `sully run`: type-check gate, doc gate, then the entry script.
//!
//! Gate decisions are made up front in [`RunPlan::new`] from a fully
//! resolved configuration plus the CLI bypass flags; [`execute`] then walks
//! the plan. The script's exit code is returned untouched.

use std::io::Write;
use std::path::Path;

use crate::config::{CheckMode, ConfigOverrides, ResolvedConfig, resolve_config};
use crate::gate::{Gate, GateOutcome, GateSequence};
use crate::uv::{ToolRunner, UvCommand};
use crate::{Error, Result};

/// CLI bypass flags for `sully run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// `--no-check`
    pub skip_check: bool,
    /// `--no-doc`
    pub skip_doc: bool,
}

/// What `sully run` will do, decided before anything is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    /// pyright level, or `None` when the type-check gate is off
    pub type_check: Option<CheckMode>,
    /// pdoc output directory, or `None` when the doc gate is off
    pub doc_output: Option<String>,
    /// Entry script
    pub script: String,
}

impl RunPlan {
    /// Decide which gates run.
    ///
    /// Fails with [`Error::NoMainScript`] when no entry script is configured,
    /// before any gate is considered.
    pub fn new(config: &ResolvedConfig, options: RunOptions) -> Result<Self> {
        let script = config.main().ok_or(Error::NoMainScript)?.to_string();

        let mode = config.check_mode();
        let type_check =
            (!options.skip_check && config.check_before_run() && !mode.is_off()).then_some(mode);

        let doc_output = (!options.skip_doc && config.doc_before_run())
            .then(|| config.doc_output().to_string());

        Ok(Self {
            type_check,
            doc_output,
            script,
        })
    }
}

/// Run the plan's gates and, if they all pass, the entry script.
///
/// Returns the exit code of the failing gate, or of the script.
pub fn execute(plan: &RunPlan, runner: &dyn ToolRunner, out: &mut dyn Write) -> Result<i32> {
    let gates = GateSequence::new()
        .gate(
            Gate::new("type-check", plan.type_check.is_some(), "--no-check", || {
                plan.type_check
                    .map_or(Ok(0), |mode| runner.run(&UvCommand::pyright(mode)))
            })
            .with_messages(
                "Running type check...",
                "Type check passed.",
                "Type errors found, fix before running.",
            ),
        )
        .gate(
            Gate::new("doc", plan.doc_output.is_some(), "--no-doc", || {
                plan.doc_output
                    .as_deref()
                    .map_or(Ok(0), |output| runner.run(&UvCommand::pdoc(output)))
            })
            .with_messages(
                "Generating docs...",
                "Docs generated.",
                "Doc generation failed, fix before running.",
            ),
        );

    tracing::debug!(gates = ?gates.enabled(), "gate sequence");
    if let GateOutcome::Failed { gate, code } = gates.run(out)? {
        tracing::info!(gate, code, "gate failed, entry script not run");
        return Ok(code);
    }

    writeln!(out, "Running {}...", plan.script)?;
    out.flush()?;
    runner.run(&UvCommand::run_script(&plan.script))
}

/// Resolve configuration from `start` and run the gated pipeline.
pub fn run(
    start: &Path,
    options: RunOptions,
    runner: &dyn ToolRunner,
    out: &mut dyn Write,
) -> Result<i32> {
    let config = resolve_config(start, &ConfigOverrides::default())?;
    let plan = RunPlan::new(&config, options)?;
    tracing::debug!(?plan, "run plan");
    execute(&plan, runner, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeRunner, TestProject};

    const SKIP_NONE: RunOptions = RunOptions {
        skip_check: false,
        skip_doc: false,
    };

    fn run_project(pyproject: &str, options: RunOptions, runner: &FakeRunner) -> (Result<i32>, String) {
        let project = TestProject::with_pyproject(pyproject);
        let mut out = Vec::new();
        let result = run(project.path(), options, runner, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn plan_for(pyproject: &str, options: RunOptions) -> RunPlan {
        let project = TestProject::with_pyproject(pyproject);
        let config = resolve_config(project.path(), &ConfigOverrides::default()).unwrap();
        RunPlan::new(&config, options).unwrap()
    }

    // ==================== Plan Tests ====================

    #[test]
    fn test_plan_defaults_enable_both_gates() {
        let plan = plan_for("[tool.sully]\nmain = \"app.py\"\n", SKIP_NONE);
        assert_eq!(plan.type_check, Some(CheckMode::Strict));
        assert_eq!(plan.doc_output.as_deref(), Some("docs"));
        assert_eq!(plan.script, "app.py");
    }

    #[test]
    fn test_plan_mode_off_disables_check_regardless_of_flag() {
        for before_run in ["true", "false"] {
            let plan = plan_for(
                &format!(
                    "[tool.sully]\nmain = \"app.py\"\n[tool.sully.check]\nmode = \"off\"\ncheck-before-run = {}\n",
                    before_run
                ),
                SKIP_NONE,
            );
            assert_eq!(plan.type_check, None);
        }
    }

    #[test]
    fn test_plan_check_before_run_false_disables_check_for_every_mode() {
        for mode in ["off", "basic", "strict"] {
            let plan = plan_for(
                &format!(
                    "[tool.sully]\nmain = \"app.py\"\n[tool.sully.check]\nmode = \"{}\"\ncheck-before-run = false\n",
                    mode
                ),
                SKIP_NONE,
            );
            assert_eq!(plan.type_check, None, "mode {mode}");
        }
    }

    #[test]
    fn test_plan_no_check_flag_overrides_strict() {
        let plan = plan_for(
            "[tool.sully]\nmain = \"app.py\"\n[tool.sully.check]\nmode = \"strict\"\ncheck-before-run = true\n",
            RunOptions {
                skip_check: true,
                skip_doc: false,
            },
        );
        assert_eq!(plan.type_check, None);
        assert!(plan.doc_output.is_some());
    }

    #[test]
    fn test_plan_no_doc_flag_overrides_config() {
        let plan = plan_for(
            "[tool.sully]\nmain = \"app.py\"\n[tool.sully.doc]\ndoc-before-run = true\n",
            RunOptions {
                skip_check: false,
                skip_doc: true,
            },
        );
        assert_eq!(plan.doc_output, None);
        assert_eq!(plan.type_check, Some(CheckMode::Strict));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let pyproject = "[tool.sully]\nmain = \"app.py\"\n[tool.sully.check]\nmode = \"basic\"\n[tool.sully.doc]\noutput = \"site\"\n";
        let project = TestProject::with_pyproject(pyproject);
        let first = RunPlan::new(
            &resolve_config(project.path(), &ConfigOverrides::default()).unwrap(),
            SKIP_NONE,
        )
        .unwrap();
        let second = RunPlan::new(
            &resolve_config(project.path(), &ConfigOverrides::default()).unwrap(),
            SKIP_NONE,
        )
        .unwrap();
        assert_eq!(first, second);
    }

    // ==================== Execution Tests ====================

    #[test]
    fn test_no_main_fails_before_any_gate() {
        let runner = FakeRunner::new();
        let (result, out) = run_project("[tool.sully.check]\nmode = \"strict\"\n", SKIP_NONE, &runner);

        assert!(matches!(result, Err(Error::NoMainScript)));
        assert!(runner.calls().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_scenario_no_gates_runs_script() {
        let runner = FakeRunner::new().exiting("python", 4);
        let (result, out) = run_project(
            "[tool.sully]\nmain = \"app.py\"\n[tool.sully.check]\nmode = \"off\"\n[tool.sully.doc]\ndoc-before-run = false\n",
            SKIP_NONE,
            &runner,
        );

        assert_eq!(result.unwrap(), 4);
        assert_eq!(runner.tools(), ["python"]);
        assert_eq!(runner.calls()[0], UvCommand::run_script("app.py"));
        assert_eq!(out, "Running app.py...\n");
    }

    #[test]
    fn test_scenario_type_check_failure_blocks_everything() {
        let runner = FakeRunner::new().exiting("pyright", 1);
        let (result, out) = run_project(
            "[tool.sully]\nmain = \"app.py\"\n[tool.sully.check]\nmode = \"strict\"\ncheck-before-run = true\n",
            SKIP_NONE,
            &runner,
        );

        assert_eq!(result.unwrap(), 1);
        assert_eq!(runner.tools(), ["pyright"]);
        assert!(out.contains("Type errors found, fix before running."));
        assert!(out.contains("Use --no-check to bypass."));
        assert!(!out.contains("Running app.py"));
    }

    #[test]
    fn test_type_check_failure_code_propagates() {
        let runner = FakeRunner::new().exiting("pyright", 42);
        let (result, _) = run_project("[tool.sully]\nmain = \"app.py\"\n", SKIP_NONE, &runner);
        assert_eq!(result.unwrap(), 42);
        assert!(!runner.invoked("pdoc"));
        assert!(!runner.invoked("python"));
    }

    #[test]
    fn test_doc_failure_blocks_script() {
        let runner = FakeRunner::new().exiting("pdoc", 3);
        let (result, out) = run_project(
            "[tool.sully]\nmain = \"app.py\"\n[tool.sully.check]\nmode = \"off\"\n",
            SKIP_NONE,
            &runner,
        );

        assert_eq!(result.unwrap(), 3);
        assert_eq!(runner.tools(), ["pdoc"]);
        assert!(out.contains("Doc generation failed, fix before running."));
        assert!(out.contains("Use --no-doc to bypass."));
    }

    #[test]
    fn test_scenario_no_doc_flag_skips_pdoc() {
        let runner = FakeRunner::new();
        let (result, _) = run_project(
            "[tool.sully]\nmain = \"app.py\"\n[tool.sully.doc]\ndoc-before-run = true\n",
            RunOptions {
                skip_check: false,
                skip_doc: true,
            },
            &runner,
        );

        assert_eq!(result.unwrap(), 0);
        assert_eq!(runner.tools(), ["pyright", "python"]);
    }

    #[test]
    fn test_gates_run_in_order_with_configured_arguments() {
        let runner = FakeRunner::new();
        let (result, out) = run_project(
            "[tool.sully]\nmain = \"src/app/main.py\"\n[tool.sully.check]\nmode = \"basic\"\n[tool.sully.doc]\noutput = \"site\"\n",
            SKIP_NONE,
            &runner,
        );

        assert_eq!(result.unwrap(), 0);
        assert_eq!(
            runner.calls(),
            [
                UvCommand::pyright(CheckMode::Basic),
                UvCommand::pdoc("site"),
                UvCommand::run_script("src/app/main.py"),
            ]
        );
        let check_pos = out.find("Type check passed.").unwrap();
        let doc_pos = out.find("Docs generated.").unwrap();
        let run_pos = out.find("Running src/app/main.py...").unwrap();
        assert!(check_pos < doc_pos && doc_pos < run_pos);
    }

    #[test]
    fn test_both_flags_run_script_only() {
        let runner = FakeRunner::new();
        let (result, _) = run_project(
            "[tool.sully]\nmain = \"app.py\"\n",
            RunOptions {
                skip_check: true,
                skip_doc: true,
            },
            &runner,
        );
        assert_eq!(result.unwrap(), 0);
        assert_eq!(runner.tools(), ["python"]);
    }

    #[test]
    fn test_missing_pyproject_is_config_error() {
        let runner = FakeRunner::new();
        let project = TestProject::empty();
        let mut out = Vec::new();
        // Only meaningful when no ancestor of the temp dir has a pyproject.toml.
        if crate::config::find_pyproject(project.path()).is_err() {
            let result = run(project.path(), SKIP_NONE, &runner, &mut out);
            assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
            assert!(runner.calls().is_empty());
        }
    }
}
