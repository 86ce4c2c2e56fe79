//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{FailurePolicy, ResolverConfig, ResolverTool, SymbolicateOptions};

#[derive(Parser)]
#[command(
    name = "crashsym",
    version,
    about = "Symbolicate KSCrash-style JSON crash reports",
    after_help = "\
EXAMPLES:
    crashsym --dsym MyApp.app.dSYM crash.json              Print symbolicated report
    crashsym --dsym MyApp.app.dSYM -o out.json crash.json  Write it to a file
    crashsym --dsym MyApp.app.dSYM --pointer /stack -      Report nested under \"stack\" on stdin
    crashsym --dsym MyApp.app.dSYM --strict crash.json     Fail if any image cannot be resolved"
)]
pub struct Args {
    /// Crash report JSON file ("-" reads stdin)
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Debug symbols of the crashed app
    #[arg(short, long, value_name = "PATH")]
    pub dsym: PathBuf,

    /// Root of the per-OS-build system symbol folders
    /// [default: ~/Library/Developer/Xcode/iOS DeviceSupport]
    #[arg(long, value_name = "DIR")]
    pub base_path: Option<PathBuf>,

    /// Abort on the first image that cannot be resolved
    #[arg(long)]
    pub strict: bool,

    /// Resolver argument convention [default: atos on macOS, atosl elsewhere]
    #[arg(long, value_enum)]
    pub tool: Option<ResolverTool>,

    /// Resolver executable to run instead of the tool's name
    #[arg(long, value_name = "PATH")]
    pub resolver: Option<PathBuf>,

    /// Seconds to wait for one resolver run (0 = unlimited)
    #[arg(long, default_value = "60")]
    pub timeout: u64,

    /// JSON pointer selecting the report inside the input document
    #[arg(long, default_value = "")]
    pub pointer: String,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Per-call symbolication options
    #[must_use]
    pub fn options(&self) -> SymbolicateOptions {
        let options = SymbolicateOptions::default().with_policy(FailurePolicy::from_strict(self.strict));
        match self.base_path {
            Some(ref base) => options.with_base_path(base),
            None => options,
        }
    }

    /// Subprocess resolver settings
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            tool: self.tool.unwrap_or_else(ResolverTool::native),
            program: self.resolver.clone(),
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
        }
    }
}
