use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::prompt::{Collected, InterruptFlag, Prompter, TerminalPrompter, collect};
use crate::scaffold::{ScaffoldContext, ScaffoldReport, apply};
use crate::template::resolve_template_dir;

#[derive(Debug, Parser)]
#[command(
    name = "create-electron-vite-app",
    version,
    about = "Scaffold a new Electron + Vite project from the bundled template"
)]
pub struct Cli {
    /// Use this template directory instead of the bundled one
    #[arg(long, value_name = "DIR")]
    template: Option<PathBuf>,
    /// Log scaffolding details to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Parses arguments, runs the scaffolder and returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = install_interrupt_handler().and_then(|interrupted| {
        let base_dir = std::env::current_dir().context("resolving current directory")?;
        let mut prompter = TerminalPrompter::new(interrupted);
        execute(cli.template.as_deref(), &base_dir, &mut prompter)
    });

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Keeps ^C from killing the process mid-prompt so it can end as an abort.
fn install_interrupt_handler() -> anyhow::Result<InterruptFlag> {
    let interrupted = InterruptFlag::default();
    let handler_flag = interrupted.clone();
    ctrlc::set_handler(move || handler_flag.raise()).context("installing Ctrl-C handler")?;
    Ok(interrupted)
}

/// Resolves the template, asks the questions and scaffolds into `base_dir`.
/// Returns the exit code for the outcome; fatal failures are errors.
pub fn execute(
    template: Option<&Path>,
    base_dir: &Path,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<i32> {
    let template_dir = resolve_template_dir(template)?;

    let answers = match collect(prompter, base_dir) {
        Collected::Answers(answers) => answers,
        Collected::Aborted(reason) => {
            prompter.restore();
            tracing::debug!(?reason, "scaffolding aborted");
            println!();
            println!(" 💀 Aborted!");
            println!();
            return Ok(reason.exit_code());
        }
    };

    tracing::debug!(answers = %serde_json::to_string(&answers)?, "collected answers");

    let ctx = ScaffoldContext {
        base_dir: base_dir.to_path_buf(),
        template_dir,
    };
    let report = apply(&answers, &ctx)
        .with_context(|| format!("creating project '{}'", answers.project_name))?;
    tracing::debug!(
        path = %report.project_path.display(),
        manifest = ?report.manifest,
        "project created"
    );

    print_next_steps(&report);
    Ok(0)
}

fn print_next_steps(report: &ScaffoldReport) {
    println!();
    println!("🎉 Created your project, now start with:");
    println!();
    println!(" cd {}", report.dir_name);
    println!(" npm install");
    println!(" npm run dev");
    println!();
}
