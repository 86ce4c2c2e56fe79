//! # crashsym - Main Entry Point
//!
//! Reads one crash report, symbolicates it with `atos`/`atosl`, and writes
//! the result as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use crashsym::cli::Args;
use crashsym::domain::SymbolicateError;
use crashsym::preflight::run_preflight_checks;
use crashsym::report::CrashReport;
use crashsym::symbolication::{AtosResolver, Symbolicator};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_DATAERR: i32 = 65;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SymbolicateError>() {
        Some(SymbolicateError::MalformedInput(_)) => EXIT_DATAERR,
        _ => EXIT_ERROR,
    }
}

fn read_input(args: &Args) -> Result<String> {
    let mut text = String::new();
    if args.report.as_os_str() == "-" {
        io::stdin().read_to_string(&mut text).context("Failed to read report from stdin")?;
    } else {
        text = std::fs::read_to_string(&args.report)
            .with_context(|| format!("Failed to read {}", args.report.display()))?;
    }
    Ok(text)
}

fn write_output(args: &Args, report: &CrashReport) -> Result<()> {
    let pretty = !args.compact;
    match args.output {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            report.write_json(&mut writer, pretty).context("Failed to write report")?;
            writeln!(writer)?;
            writer.flush()?;
        }
        None => {
            let mut writer = BufWriter::new(io::stdout().lock());
            report.write_json(&mut writer, pretty).context("Failed to write report")?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn run() -> Result<()> {
    let args = Args::parse();

    let options = args.options();
    let resolver_config = args.resolver_config();

    run_preflight_checks(
        &args.report,
        &args.dsym,
        &resolver_config.program(),
        &options.base_path,
        args.quiet,
    )?;

    let text = read_input(&args)?;
    let report = CrashReport::from_json_at(&text, &args.pointer)?;
    info!(
        "Loaded report with {} thread(s), {} frame(s)",
        report.crash.threads.len(),
        report.frames().count()
    );

    let symbolicator = Symbolicator::new(AtosResolver::new(resolver_config), options);
    let symbolicated = symbolicator.symbolicate(&report, &args.dsym).await?;

    write_output(&args, &symbolicated)?;

    if !args.quiet {
        let total = symbolicated.frames().count();
        let named = symbolicated.frames().filter(|f| f.symbol_name.is_some()).count();
        eprintln!("resolved {named}/{total} frames");
        if let Some(ref path) = args.output {
            eprintln!("saved: {}", path.display());
        }
    }

    Ok(())
}
