//! Resolve one image's addresses, falling back across candidate symbol files

use log::{debug, warn};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use super::grouping::ImageGroup;
use crate::config::FailurePolicy;
use crate::domain::{Address, CpuArch, Result, SymbolicateError};

/// One question for the resolver: names for `addresses` in `symbol_file`
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    pub symbol_file: &'a Path,
    /// Architecture as passed to the tool (already mapped, see [`CpuArch::resolver_arch`])
    pub arch: &'a str,
    pub load_address: Address,
    pub addresses: &'a [Address],
}

impl ResolveRequest<'_> {
    /// Addresses as the tool receives them: canonical hex, space separated
    #[must_use]
    pub fn joined_addresses(&self) -> String {
        self.addresses.iter().copied().map(Address::to_hex).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for ResolveRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] @ {}: {}",
            self.symbol_file.display(),
            self.arch,
            self.load_address,
            self.joined_addresses()
        )
    }
}

/// Something that turns addresses into symbol names
///
/// Implementations return one line per submitted address, in submission
/// order. A failed attempt is reported with one of the errors for which
/// [`SymbolicateError::is_candidate_failure`] holds.
pub trait SymbolResolver {
    fn resolve(
        &self,
        request: &ResolveRequest<'_>,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Resolve every address of `group`, trying `candidates` in order
///
/// Stops at the first candidate that yields output. Under the lenient policy
/// failed candidates are skipped and, if none works, the group comes back
/// with its original names. Under the strict policy the first failure is
/// returned.
///
/// # Errors
/// - [`SymbolicateError::MalformedInput`] if the group has no `object_addr`
/// - any candidate failure, when `policy` is strict
/// - [`SymbolicateError::ExhaustedCandidates`], when `policy` is strict
pub async fn resolve_image<R: SymbolResolver>(
    resolver: &R,
    group: &ImageGroup,
    candidates: &[PathBuf],
    arch: &CpuArch,
    policy: FailurePolicy,
) -> Result<ImageGroup> {
    let load_address = group.object_addr.ok_or_else(|| {
        SymbolicateError::MalformedInput(format!(
            "frames of image {} carry no object_addr",
            group.object_name
        ))
    })?;
    let addresses: Vec<Address> = group.addresses().collect();

    for candidate in candidates {
        let request = ResolveRequest {
            symbol_file: candidate,
            arch: arch.resolver_arch(),
            load_address,
            addresses: &addresses,
        };
        debug!("Resolving {} address(es) of {} via {request}", addresses.len(), group.object_name);

        let outcome = match resolver.resolve(&request).await {
            Ok(names) if names.is_empty() => {
                Err(SymbolicateError::EmptyResolution { command: request.to_string() })
            }
            other => other,
        };

        match outcome {
            Ok(names) => return Ok(apply_names(group, names)),
            Err(err) if err.is_candidate_failure() && !policy.is_strict() => {
                warn!("{}: {err}", group.object_name);
            }
            Err(err) => return Err(err),
        }
    }

    let exhausted = SymbolicateError::ExhaustedCandidates {
        image: group.object_name.clone(),
        tried: candidates.to_vec(),
    };
    if policy.is_strict() {
        return Err(exhausted);
    }
    warn!("{exhausted}, leaving frames unresolved");
    Ok(group.clone())
}

/// Pair output line `i` with submitted address `i`
///
/// Addresses beyond the last line, and empty lines, keep the name they
/// already had.
fn apply_names(group: &ImageGroup, names: Vec<String>) -> ImageGroup {
    if names.len() != group.symbols.len() {
        warn!(
            "{}: resolver returned {} line(s) for {} address(es)",
            group.object_name,
            names.len(),
            group.symbols.len()
        );
    }

    let mut resolved = group.clone();
    for (name, slot) in names.into_iter().zip(resolved.symbols.values_mut()) {
        if !name.is_empty() {
            *slot = Some(name);
        }
    }
    resolved
}
