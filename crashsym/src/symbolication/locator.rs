//! Where to look for an image's debug symbols
//!
//! The app's own image resolves against the dSYM handed in by the caller.
//! System images resolve against Xcode's device-support cache, which keeps
//! one folder per OS build:
//!
//! ```text
//! <base>/9.2.1 (13D15)/Symbols/usr/lib/system/libsystem_kernel.dylib
//! <base>/9.2.1 (13D15)/Symbols/System/Library/Frameworks/UIKit.framework/UIKit
//! ```

use std::path::{Path, PathBuf};

use crate::domain::{CpuArch, Result, SymbolicateError};
use crate::report::CrashReport;

const DYLIB_SUFFIX: &str = ".dylib";

/// Report metadata the locator and resolver need, validated once per call
#[derive(Debug, Clone)]
pub struct ResolverMeta {
    pub dsym_path: PathBuf,
    pub process_name: String,
    pub cpu_arch: CpuArch,
    pub os_version: String,
    pub system_version: String,
}

impl ResolverMeta {
    /// Collect metadata from the report's `system` section
    ///
    /// # Errors
    /// Returns [`SymbolicateError::MalformedInput`] naming the first missing field
    pub fn from_report(report: &CrashReport, dsym_path: impl Into<PathBuf>) -> Result<Self> {
        let system = &report.system;
        Ok(Self {
            dsym_path: dsym_path.into(),
            process_name: required(system.process_name.as_ref(), "process_name")?,
            cpu_arch: CpuArch(required(system.cpu_arch.as_ref(), "cpu_arch")?),
            os_version: required(system.os_version.as_ref(), "os_version")?,
            system_version: required(system.system_version.as_ref(), "system_version")?,
        })
    }

    /// Device-support folder name for this OS build, e.g. `9.2.1 (13D15)`
    #[must_use]
    pub fn version_tag(&self) -> String {
        format!("{} ({})", self.system_version, self.os_version)
    }
}

fn required(value: Option<&String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.clone()),
        _ => Err(SymbolicateError::MalformedInput(format!("missing system.{field}"))),
    }
}

/// Produces candidate symbol files for images, most specific first
#[derive(Debug, Clone)]
pub struct DebugFileLocator<'a> {
    base_path: &'a Path,
    meta: &'a ResolverMeta,
}

impl<'a> DebugFileLocator<'a> {
    #[must_use]
    pub fn new(base_path: &'a Path, meta: &'a ResolverMeta) -> Self {
        Self { base_path, meta }
    }

    /// Candidate symbol files for `object_name`, in the order to try them
    ///
    /// Never empty for a non-empty name.
    #[must_use]
    pub fn candidates(&self, object_name: &str) -> Vec<PathBuf> {
        if object_name == self.meta.process_name {
            return vec![self.meta.dsym_path.clone()];
        }

        let symbols = self.base_path.join(self.meta.version_tag()).join("Symbols");

        if object_name.ends_with(DYLIB_SUFFIX) {
            vec![
                symbols.join("usr/lib/system").join(object_name),
                symbols.join("usr/lib").join(object_name),
            ]
        } else {
            let bundle = format!("{object_name}.framework");
            vec![
                symbols.join("System/Library/Frameworks").join(&bundle).join(object_name),
                symbols.join("System/Library/PrivateFrameworks").join(&bundle).join(object_name),
            ]
        }
    }
}
