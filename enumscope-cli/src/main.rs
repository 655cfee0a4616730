//! enumscope CLI - reports enums reachable from web-API request parameters.
//!
//! Reads a symbol dump (one `*.symbols.json` file, or a directory of them),
//! audits every C# project in it and prints the findings as a text tree or
//! JSON. Exits with 1 when any enum is exposed, so the tool can gate CI.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use enumscope_core::{
    init_structured_logging, load_config, load_config_file, load_solution, log_error, log_warn,
    print_json, print_plain, AuditConfig, EnumAudit,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Finds enum types reachable from web-API request parameters")]
pub struct Cli {
    /// Symbol dump file, or a directory searched for *.symbols.json
    #[arg(default_value = ".")]
    path: String,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Configuration file (defaults to enumscope.toml next to the dump)
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Depth budget per request parameter
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    max_depth: Option<i32>,

    /// Only analyze projects in this language
    #[arg(long, value_name = "LANG")]
    language: Option<String>,

    /// Suppress progress lines on stderr
    #[arg(long)]
    quiet: bool,
}

/// Directory where enumscope.toml is looked up for `input`.
fn config_root(input: &Path) -> PathBuf {
    if input.is_dir() {
        return input.to_path_buf();
    }
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// An explicit `--config` must load; the implicit one falls back to defaults.
fn resolve_config(cli: &Cli, input: &Path) -> Result<AuditConfig> {
    if let Some(file) = &cli.config {
        return load_config_file(Path::new(file))
            .with_context(|| format!("Failed to load config: {}", file));
    }

    match load_config(&config_root(input)) {
        Ok(Some(cfg)) => Ok(cfg),
        Ok(None) => Ok(AuditConfig::default()),
        Err(e) => {
            eprintln!("[WARN] config load failed: {:#}", e);
            log_warn(&format!("config load failed: {:#}", e));
            Ok(AuditConfig::default())
        }
    }
}

/// Command-line flags win over file settings.
fn apply_overrides(mut config: AuditConfig, cli: &Cli) -> AuditConfig {
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(language) = &cli.language {
        config.target_language = language.clone();
    }
    config
}

fn run(cli: &Cli) -> Result<bool> {
    let input = Path::new(&cli.path);
    let config = apply_overrides(resolve_config(cli, input)?, cli);

    let solution = load_solution(input)
        .with_context(|| format!("Failed to load symbol dump from: {}", cli.path))?;

    let quiet = cli.quiet;
    let report = EnumAudit::builder()
        .solution(&solution)
        .config(config)
        .progress(move |line| {
            if !quiet {
                eprintln!("{}", line);
            }
        })
        .build()?
        .run()
        .context("Enum audit failed")?;

    if cli.json {
        print_json(&report);
    } else {
        print_plain(&report);
    }

    Ok(!report.is_empty())
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] enumscope internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 101.");
    }));

    // JSON to stderr, respects RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(has_findings) => std::process::exit(if has_findings { 1 } else { 0 }),
        Err(e) => {
            log_error(&format!("{:#}", e));
            Err(e)
        }
    }
}
