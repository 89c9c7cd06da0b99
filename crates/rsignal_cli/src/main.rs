//! rsignal: rewrite `$signal` / `$memo` markers into reactive runtime calls.
//!
//! Usage:
//!   rsignal [options] <file...>
//!
//! Rewritten modules are written to the output directory under their path
//! relative to the current directory, or to stdout with `--stdout`.

use clap::Parser as ClapParser;
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report, Severity};
use rsignal_compiler::{MacroCompiler, ModuleError, SourceModule};
use rsignal_diagnostics::{Diagnostic, DiagnosticCategory};
use rsignal_options::{parse_config_file, RsignalOptions};
use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::{Component, Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing::{debug, info};

const DEFAULT_CONFIG_FILE: &str = "rsignal.json";

#[derive(ClapParser, Debug)]
#[command(name = "rsignal", version, about = "rsignal - compile-time reactive variable macros")]
struct Cli {
    /// JavaScript modules to rewrite.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Path to rsignal.json. Defaults to ./rsignal.json when present.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Directory rewritten modules are written to.
    #[arg(short = 'o', long = "out-dir")]
    out_dir: Option<String>,

    /// Module the reactive constructors are imported from.
    #[arg(long = "runtime-module")]
    runtime_module: Option<String>,

    /// Print rewritten modules to stdout instead of writing files.
    #[arg(long)]
    stdout: bool,

    /// Enable debug logging.
    #[arg(short = 'v', long)]
    verbose: bool,
}

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    process::exit(run(&cli));
}

fn init_tracing(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        print_error(&format!("failed to install logger: {}", e));
    }
}

fn run(cli: &Cli) -> i32 {
    let start = Instant::now();

    let options = match load_options(cli) {
        Ok(options) => options,
        Err(message) => {
            print_error(&message);
            return 1;
        }
    };

    let mut modules = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match std::fs::read_to_string(path) {
            Ok(text) => modules.push(SourceModule::new(path.display().to_string(), text)),
            Err(e) => {
                print_error(&format!("cannot read {}: {}", path.display(), e));
                return 1;
            }
        }
    }

    let targets = if cli.stdout {
        Vec::new()
    } else {
        let cwd = match std::env::current_dir() {
            Ok(cwd) => cwd,
            Err(e) => {
                print_error(&format!("cannot resolve the current directory: {}", e));
                return 1;
            }
        };
        match output_paths(Path::new(options.out_dir()), &cli.files, &cwd) {
            Ok(targets) => targets,
            Err(message) => {
                print_error(&message);
                return 1;
            }
        }
    };

    let compiler = MacroCompiler::new(options);
    let results = compiler.transform_all(&modules);

    let mut failed = 0usize;
    let mut rewritten = 0usize;
    for (index, (module, result)) in modules.iter().zip(results).enumerate() {
        match result {
            Ok(output) => {
                if output.changed {
                    rewritten += 1;
                }
                if cli.stdout {
                    print!("{}", output.code);
                    continue;
                }
                let target = &targets[index];
                debug!(file = %output.file_name, target = %target.display(), "writing module");
                if let Err(e) = write_output(target, &output.code) {
                    print_error(&format!("cannot write {}: {}", target.display(), e));
                    return 1;
                }
            }
            Err(error) => {
                failed += 1;
                report_module_error(&error, &module.text);
            }
        }
    }

    let elapsed = start.elapsed();
    let color = std::io::stderr().is_terminal();
    if failed > 0 {
        let plural = if failed == 1 { "" } else { "s" };
        if color {
            eprintln!("\n{}Found errors in {} module{}.{}", RED, failed, plural, RESET);
        } else {
            eprintln!("\nFound errors in {} module{}.", failed, plural);
        }
        return 2;
    }

    info!(modules = modules.len(), rewritten, "done");
    if color {
        eprintln!(
            "{}Rewrote {} of {} module(s){} {}in {:.2}s.{}",
            GREEN,
            rewritten,
            modules.len(),
            RESET,
            GRAY,
            elapsed.as_secs_f64(),
            RESET
        );
    }
    0
}

/// File options first, then command-line flags on top.
fn load_options(cli: &Cli) -> Result<RsignalOptions, String> {
    let file_options = match &cli.config {
        Some(path) => parse_config_file(path).map_err(|e| e.to_string())?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            parse_config_file(Path::new(DEFAULT_CONFIG_FILE)).map_err(|e| e.to_string())?
        }
        None => RsignalOptions::default(),
    };
    Ok(file_options.merge(RsignalOptions {
        runtime_module: cli.runtime_module.clone(),
        out_dir: cli.out_dir.clone(),
        ..RsignalOptions::default()
    }))
}

/// Where `input` is written: its path relative to `cwd` under `out_dir`.
/// Inputs outside `cwd` keep only their file name.
fn output_path(out_dir: &Path, input: &Path, cwd: &Path) -> PathBuf {
    let absolute = if input.is_absolute() {
        input.to_path_buf()
    } else {
        cwd.join(input)
    };
    let relative: PathBuf = match absolute.strip_prefix(cwd) {
        Ok(relative) => relative
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect(),
        Err(_) => input.file_name().map(PathBuf::from).unwrap_or_default(),
    };
    out_dir.join(relative)
}

/// One target per input, or an error naming two inputs that map to the
/// same target.
fn output_paths(out_dir: &Path, inputs: &[PathBuf], cwd: &Path) -> Result<Vec<PathBuf>, String> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::with_capacity(inputs.len());
    let mut targets = Vec::with_capacity(inputs.len());
    for input in inputs {
        let target = output_path(out_dir, input, cwd);
        if let Some(previous) = seen.insert(target.clone(), input) {
            return Err(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                target.display()
            ));
        }
        targets.push(target);
    }
    Ok(targets)
}

fn write_output(target: &Path, code: &str) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(target, code)
}

fn report_module_error(error: &ModuleError, source: &str) {
    for diagnostic in error.diagnostics() {
        let report = Report::new(to_miette(&diagnostic))
            .with_source_code(NamedSource::new(error.file(), source.to_string()));
        eprintln!("{:?}", report);
    }
}

fn to_miette(diagnostic: &Diagnostic) -> MietteDiagnostic {
    let severity = match diagnostic.category {
        DiagnosticCategory::Error => Severity::Error,
        DiagnosticCategory::Warning => Severity::Warning,
        DiagnosticCategory::Message => Severity::Advice,
    };
    let mut report = MietteDiagnostic::new(diagnostic.message_text.clone())
        .with_code(format!("RS{}", diagnostic.code))
        .with_severity(severity);
    if let Some(span) = diagnostic.span {
        report = report.with_label(LabeledSpan::at(
            (span.start as usize, span.length as usize),
            "here",
        ));
    }
    report
}

fn print_error(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_keeps_relative_directories() {
        let cwd = Path::new("/work");
        assert_eq!(
            output_path(Path::new("dist"), Path::new("src/a/index.js"), cwd),
            PathBuf::from("dist/src/a/index.js")
        );
        assert_eq!(
            output_path(Path::new("dist"), Path::new("./src/b/index.js"), cwd),
            PathBuf::from("dist/src/b/index.js")
        );
        assert_eq!(
            output_path(Path::new("dist"), Path::new("/work/src/c.js"), cwd),
            PathBuf::from("dist/src/c.js")
        );
        assert_eq!(
            output_path(Path::new("dist"), Path::new("/elsewhere/lib/d.js"), cwd),
            PathBuf::from("dist/d.js")
        );
    }

    #[test]
    fn test_same_file_name_in_different_directories() {
        let inputs = vec![PathBuf::from("src/a/index.js"), PathBuf::from("src/b/index.js")];
        let targets = output_paths(Path::new("dist"), &inputs, Path::new("/work")).unwrap();
        assert_ne!(targets[0], targets[1]);
    }

    #[test]
    fn test_colliding_targets_are_an_error() {
        let inputs = vec![PathBuf::from("/x/index.js"), PathBuf::from("/y/index.js")];
        let error = output_paths(Path::new("dist"), &inputs, Path::new("/work")).unwrap_err();
        assert!(error.contains("/x/index.js"));
        assert!(error.contains("/y/index.js"));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "rsignal",
            "--runtime-module",
            "my-runtime",
            "--out-dir",
            "build",
            "a.js",
        ]);
        let options = load_options(&cli).unwrap();
        assert_eq!(options.runtime_module(), "my-runtime");
        assert_eq!(options.out_dir(), "build");
        assert_eq!(cli.files, vec![PathBuf::from("a.js")]);
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let cli = Cli::parse_from(["rsignal", "--config", "/nonexistent/rsignal.json", "a.js"]);
        assert!(load_options(&cli).unwrap_err().contains("/nonexistent/rsignal.json"));
    }

    #[test]
    fn test_module_error_lowers_to_labeled_report() {
        let compiler = MacroCompiler::new(RsignalOptions::default());
        let error = compiler.transform("bad.js", "const z = $signal(0);").unwrap_err();
        let diagnostic = &error.diagnostics()[0];
        let report = to_miette(diagnostic);
        assert_eq!(report.code.as_deref(), Some("RS9001"));
        assert_eq!(report.severity, Some(Severity::Error));
        let labels = report.labels.unwrap_or_default();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 0);
    }
}
