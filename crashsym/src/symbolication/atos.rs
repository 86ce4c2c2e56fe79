//! Subprocess resolver driving `atos` (macOS) or `atosl` (elsewhere)
//!
//! Invocation, for one candidate symbol file:
//!
//! ```text
//! atos  -o <path> -arch  <arch> -l <load hex> "<hex> <hex> ..."
//! atosl -o <path> --arch <arch> -l <load hex> "<hex> <hex> ..."
//! ```
//!
//! The tool prints one name per line in the order the addresses were given.
//! No shell is involved, so the path goes out unescaped even when it holds
//! spaces or parentheses.

use log::debug;
use std::ffi::OsString;
use std::process::Stdio;
use tokio::process::Command;

use super::resolver::{ResolveRequest, SymbolResolver};
use crate::config::ResolverConfig;
use crate::domain::{Result, SymbolicateError};

/// Runs the configured tool once per request
#[derive(Debug, Clone, Default)]
pub struct AtosResolver {
    config: ResolverConfig,
}

impl AtosResolver {
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Arguments for `request`, in the order the tool expects them
    #[must_use]
    pub fn arguments(&self, request: &ResolveRequest<'_>) -> Vec<OsString> {
        let tool = self.config.tool;
        vec![
            OsString::from("-o"),
            request.symbol_file.as_os_str().to_owned(),
            OsString::from(tool.arch_flag()),
            OsString::from(request.arch),
            OsString::from("-l"),
            OsString::from(request.load_address.to_hex()),
            OsString::from(request.joined_addresses()),
        ]
    }

    /// Command line for log and error messages
    fn describe(&self, args: &[OsString]) -> String {
        let mut parts = vec![self.config.program().to_string_lossy().into_owned()];
        parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

impl SymbolResolver for AtosResolver {
    async fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Vec<String>> {
        let program = self.config.program();
        let args = self.arguments(request);
        let command = self.describe(&args);
        debug!("Running {command}");

        let child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SymbolicateError::Spawn {
                program: program.to_string_lossy().into_owned(),
                source,
            })?;

        let output = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| SymbolicateError::Timeout { command: command.clone(), timeout })?,
            None => child.wait_with_output().await,
        }
        .map_err(|source| SymbolicateError::Spawn {
            program: program.to_string_lossy().into_owned(),
            source,
        })?;

        if !output.status.success() {
            return Err(SymbolicateError::SubprocessFailure {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let names = parse_output(&stdout);
        if names.is_empty() {
            return Err(SymbolicateError::EmptyResolution { command });
        }
        Ok(names)
    }
}

/// Split resolver output into one name per line
///
/// `\r\n` and `\n` endings are both accepted. Only trailing line breaks of the
/// whole output are dropped: line `i` always belongs to address `i`, so a
/// blank leading line is kept as an empty name.
#[must_use]
pub fn parse_output(stdout: &str) -> Vec<String> {
    let trimmed = stdout.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() {
        return Vec::new();
    }
    trimmed.replace("\r\n", "\n").split('\n').map(|line| line.trim_end().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverTool;
    use crate::domain::Address;
    use std::path::Path;

    fn request<'a>(path: &'a Path, addresses: &'a [Address]) -> ResolveRequest<'a> {
        ResolveRequest { symbol_file: path, arch: "armv7s", load_address: Address(0x1000), addresses }
    }

    #[test]
    fn test_atosl_arguments() {
        let resolver = AtosResolver::new(ResolverConfig {
            tool: ResolverTool::Atosl,
            program: None,
            timeout: None,
        });
        let addresses = [Address(4328), Address(4400)];
        let path = Path::new("/ds/9.2.1 (13D15)/Symbols/usr/lib/libz.dylib");

        let args = resolver.arguments(&request(path, &addresses));
        assert_eq!(
            args,
            [
                "-o",
                "/ds/9.2.1 (13D15)/Symbols/usr/lib/libz.dylib",
                "--arch",
                "armv7s",
                "-l",
                "1000",
                "10E8 1130",
            ]
        );
    }

    #[test]
    fn test_atos_arguments_keep_path_verbatim() {
        let resolver = AtosResolver::new(ResolverConfig {
            tool: ResolverTool::Atos,
            program: None,
            timeout: None,
        });
        let addresses = [Address(4328)];
        let path = Path::new("/ds/iOS DeviceSupport/9.2.1 (13D15)/UIKit");

        let args = resolver.arguments(&request(path, &addresses));
        assert_eq!(args[1], path.as_os_str().to_owned());
        assert_eq!(args[2], "-arch");
        assert_eq!(
            resolver.describe(&args),
            "atos -o /ds/iOS DeviceSupport/9.2.1 (13D15)/UIKit -arch armv7s -l 1000 10E8"
        );
    }

    #[test]
    fn test_parse_output_line_endings() {
        assert_eq!(parse_output("main\r\n-[AppDelegate foo]\r\n"), ["main", "-[AppDelegate foo]"]);
        assert_eq!(parse_output("a\nb\n"), ["a", "b"]);
        assert!(parse_output("").is_empty());
        assert!(parse_output("\n\n").is_empty());
    }

    #[test]
    fn test_parse_output_keeps_blank_lines_in_place() {
        assert_eq!(parse_output("\nsecond\n"), ["", "second"]);
        assert_eq!(parse_output("first\n\nthird\n"), ["first", "", "third"]);
        assert_eq!(parse_output("\r\nsecond\r\n"), ["", "second"]);
    }
}
