//! Sully CLI - production-ready Python, from the first line.

use std::io::Write;
use std::path::Path;
use std::process;

use clap::Parser;
use sully::cli::{Cli, Commands};
use sully::commands::{self, Output};
use sully::config::ConfigOverrides;
use sully::logging;
use sully::uv::{LazyUvRunner, ToolRunner};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    logging::init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(sully::Error::from)
        .and_then(|cwd| {
            let runner = LazyUvRunner::new();
            run_command(cli.command, &cwd, &runner, json)
        });

    match result {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if json {
                let err = serde_json::json!({
                    "error": e.to_string(),
                    "hint": e.hint(),
                });
                eprintln!("{}", err);
            } else {
                eprintln!("Error: {}", e);
                if let Some(hint) = e.hint() {
                    eprintln!("{}", hint);
                }
            }
            process::exit(e.exit_code());
        }
    }
}

/// Dispatch a parsed command. Returns the process exit code.
fn run_command(
    command: Commands,
    cwd: &Path,
    runner: &dyn ToolRunner,
    json: bool,
) -> Result<i32, sully::Error> {
    let mut stdout = std::io::stdout();

    match command {
        Commands::Init { name, python } => {
            let options = commands::InitOptions::new(name).with_python(python);
            output(&commands::init(cwd, &options, runner)?, json);
            Ok(0)
        }

        Commands::Add {
            packages,
            dev,
            group,
        } => {
            output(&commands::add(runner, packages, dev, group)?, json);
            Ok(0)
        }

        Commands::Remove { packages } => {
            output(&commands::remove(runner, packages)?, json);
            Ok(0)
        }

        Commands::Sync => {
            output(&commands::sync(runner)?, json);
            Ok(0)
        }

        Commands::Check { mode } => {
            let mut overrides = ConfigOverrides::new();
            if let Some(mode) = mode {
                overrides = overrides.with_check_mode(mode);
            }
            commands::check(cwd, &overrides, runner, &mut stdout)
        }

        Commands::Run { no_check, no_doc } => {
            let options = commands::RunOptions {
                skip_check: no_check,
                skip_doc: no_doc,
            };
            commands::run(cwd, options, runner, &mut stdout)
        }

        Commands::Test { generate, extra } => {
            if generate {
                output(&commands::generate_stubs(cwd)?, json);
                Ok(0)
            } else {
                stdout.flush()?;
                commands::pytest(runner, &extra)
            }
        }

        Commands::Doc { output: dir } => {
            let mut overrides = ConfigOverrides::new();
            if let Some(dir) = dir {
                overrides = overrides.with_doc_output(dir);
            }
            commands::doc(cwd, &overrides, runner, &mut stdout)?;
            Ok(0)
        }

        Commands::Config => {
            output(&commands::show_config(cwd)?, json);
            Ok(0)
        }
    }
}

/// Output result in the appropriate format.
fn output<T: Output>(result: &T, json: bool) {
    if json {
        println!("{}", result.to_json());
    } else {
        println!("{}", result.to_human());
    }
}
