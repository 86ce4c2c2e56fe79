//! Shared fixtures for integration tests

#![allow(dead_code)]

use crashsym::domain::{Result, SymbolicateError};
use crashsym::report::CrashReport;
use crashsym::symbolication::{ResolveRequest, SymbolResolver};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded resolver invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub symbol_file: PathBuf,
    pub arch: String,
    pub load_address: String,
    pub addresses: Vec<String>,
}

/// In-memory resolver: answers per symbol file, records every call
///
/// Symbol files without a scripted answer fail like a non-zero exit.
#[derive(Default)]
pub struct ScriptedResolver {
    answers: HashMap<PathBuf, Vec<String>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, symbol_file: impl AsRef<Path>, names: &[&str]) -> Self {
        self.answers.insert(
            symbol_file.as_ref().to_path_buf(),
            names.iter().map(ToString::to_string).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl SymbolResolver for ScriptedResolver {
    async fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(Call {
            symbol_file: request.symbol_file.to_path_buf(),
            arch: request.arch.to_string(),
            load_address: request.load_address.to_hex(),
            addresses: request.addresses.iter().map(|a| a.to_hex()).collect(),
        });

        match self.answers.get(request.symbol_file) {
            Some(names) if names.is_empty() => {
                Err(SymbolicateError::EmptyResolution { command: request.to_string() })
            }
            Some(names) => Ok(names.clone()),
            None => Err(SymbolicateError::Spawn {
                program: "scripted".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such symbol file"),
            }),
        }
    }
}

pub const DSYM: &str = "/builds/MyApp.app.dSYM";
pub const BASE: &str = "/ds";

/// Device-support root for the sample OS build
pub fn version_root() -> PathBuf {
    Path::new(BASE).join("9.2.1 (13D15)").join("Symbols")
}

/// Report for `MyApp` on iOS 9.2.1 (13D15) with the given threads
pub fn report(threads: serde_json::Value) -> CrashReport {
    serde_json::from_value(serde_json::json!({
        "system": {
            "process_name": "MyApp",
            "cpu_arch": "armv7",
            "os_version": "13D15",
            "system_version": "9.2.1"
        },
        "crash": { "threads": threads }
    }))
    .unwrap()
}
