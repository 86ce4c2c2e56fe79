//! Configuration values passed into a symbolication call
//!
//! Nothing here is global: every call receives its own [`SymbolicateOptions`]
//! and the resolver owns its own [`ResolverConfig`], so independent calls
//! never see each other's settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Xcode's device-support cache, relative to the home directory
pub const DEVICE_SUPPORT_DIR: &str = "Library/Developer/Xcode/iOS DeviceSupport";

/// Default bound on a single resolver invocation
pub const DEFAULT_RESOLVER_TIMEOUT: Duration = Duration::from_secs(60);

/// What to do when the resolver cannot produce names for an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Leave the image's frames unresolved and keep going
    #[default]
    Lenient,
    /// Abort the whole call on the first failed attempt
    Strict,
}

impl FailurePolicy {
    #[must_use]
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }

    #[must_use]
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

/// Options for one symbolication call
#[derive(Debug, Clone)]
pub struct SymbolicateOptions {
    /// Root holding one `<system_version> (<os_version>)` folder per OS build
    pub base_path: PathBuf,
    pub policy: FailurePolicy,
}

impl Default for SymbolicateOptions {
    fn default() -> Self {
        Self { base_path: default_base_path(), policy: FailurePolicy::default() }
    }
}

impl SymbolicateOptions {
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl AsRef<Path>) -> Self {
        self.base_path = expand_home(base_path.as_ref());
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Argument conventions of the supported resolver tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResolverTool {
    /// Apple's `atos`
    Atos,
    /// `atosl`, the portable reimplementation used off macOS
    Atosl,
}

impl ResolverTool {
    /// The tool matching the platform we are running on
    #[must_use]
    pub fn native() -> Self {
        if cfg!(target_os = "macos") {
            Self::Atos
        } else {
            Self::Atosl
        }
    }

    /// Executable name looked up on `PATH`
    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            Self::Atos => "atos",
            Self::Atosl => "atosl",
        }
    }

    #[must_use]
    pub fn arch_flag(self) -> &'static str {
        match self {
            Self::Atos => "-arch",
            Self::Atosl => "--arch",
        }
    }
}

impl Default for ResolverTool {
    fn default() -> Self {
        Self::native()
    }
}

/// Settings for the subprocess resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub tool: ResolverTool,
    /// Executable to run instead of the tool's default name
    pub program: Option<PathBuf>,
    /// `None` waits for the resolver indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { tool: ResolverTool::native(), program: None, timeout: Some(DEFAULT_RESOLVER_TIMEOUT) }
    }
}

impl ResolverConfig {
    /// Executable that will be spawned
    #[must_use]
    pub fn program(&self) -> PathBuf {
        self.program.clone().unwrap_or_else(|| PathBuf::from(self.tool.program()))
    }
}

/// `~/Library/Developer/Xcode/iOS DeviceSupport`, expanded
#[must_use]
pub fn default_base_path() -> PathBuf {
    expand_home(&Path::new("~").join(DEVICE_SUPPORT_DIR))
}

/// Replace a leading `~` with the home directory
///
/// Paths are handed to the resolver without a shell, so nobody else will
/// expand it. Left as is when the home directory is unknown.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_lenient() {
        assert_eq!(SymbolicateOptions::default().policy, FailurePolicy::Lenient);
        assert!(FailurePolicy::from_strict(true).is_strict());
        assert!(!FailurePolicy::from_strict(false).is_strict());
    }

    #[test]
    fn test_default_base_path_ends_in_device_support() {
        let base = default_base_path();
        assert!(base.ends_with(DEVICE_SUPPORT_DIR));
        if dirs::home_dir().is_some() {
            assert!(!base.starts_with("~"));
        }
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        assert_eq!(expand_home(Path::new("/opt/symbols")), PathBuf::from("/opt/symbols"));
        assert_eq!(expand_home(Path::new("rel/~x")), PathBuf::from("rel/~x"));
    }

    #[test]
    fn test_tool_conventions() {
        assert_eq!(ResolverTool::Atos.program(), "atos");
        assert_eq!(ResolverTool::Atos.arch_flag(), "-arch");
        assert_eq!(ResolverTool::Atosl.program(), "atosl");
        assert_eq!(ResolverTool::Atosl.arch_flag(), "--arch");
    }

    #[test]
    fn test_program_override() {
        let config = ResolverConfig {
            tool: ResolverTool::Atosl,
            program: Some(PathBuf::from("/usr/local/bin/atosl")),
            timeout: None,
        };
        assert_eq!(config.program(), PathBuf::from("/usr/local/bin/atosl"));
        assert_eq!(
            ResolverConfig { program: None, ..config }.program(),
            PathBuf::from("atosl")
        );
    }
}
