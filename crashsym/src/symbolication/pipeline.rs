//! Run the resolver over every image of a report and merge the results

use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

use super::grouping::{group_by_image, ImageGroup};
use super::locator::{DebugFileLocator, ResolverMeta};
use super::merge::merge_names;
use super::resolver::{resolve_image, SymbolResolver};
use crate::config::SymbolicateOptions;
use crate::domain::{Address, Result};
use crate::report::CrashReport;

/// Resolved names for one call, keyed by instruction address
///
/// Addresses are not unique across images; when two images carry the same
/// address the image processed later wins, even when it left the address
/// unnamed. Frames whose address has no entry keep their own name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: HashMap<Address, String>,
}

impl NameTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every address of `group`, replacing earlier entries
    ///
    /// An unnamed address clears what an earlier image stored for it.
    pub fn absorb(&mut self, group: ImageGroup) {
        for (addr, name) in group.symbols {
            match name {
                Some(name) => self.names.insert(addr, name),
                None => self.names.remove(&addr),
            };
        }
    }

    pub fn insert(&mut self, addr: Address, name: impl Into<String>) {
        self.names.insert(addr, name.into());
    }

    #[must_use]
    pub fn get(&self, addr: Address) -> Option<&str> {
        self.names.get(&addr).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Symbolicates crash reports with a given resolver
///
/// Images are resolved one after another, and each image's candidates one
/// after another, so at most one resolver process runs per call.
#[derive(Debug, Clone)]
pub struct Symbolicator<R> {
    resolver: R,
    options: SymbolicateOptions,
}

impl<R: SymbolResolver> Symbolicator<R> {
    #[must_use]
    pub fn new(resolver: R, options: SymbolicateOptions) -> Self {
        Self { resolver, options }
    }

    #[must_use]
    pub fn options(&self) -> &SymbolicateOptions {
        &self.options
    }

    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Build the name table for `report`
    ///
    /// # Errors
    /// - [`SymbolicateError::MalformedInput`](crate::domain::SymbolicateError::MalformedInput)
    ///   if required metadata is missing
    /// - the first resolution failure, when the policy is strict
    pub async fn resolve_names(&self, report: &CrashReport, dsym_path: &Path) -> Result<NameTable> {
        let meta = ResolverMeta::from_report(report, dsym_path)?;
        let locator = DebugFileLocator::new(&self.options.base_path, &meta);
        let groups = group_by_image(report);
        debug!("Found {} image(s) in report", groups.len());

        let mut names = NameTable::new();
        for group in groups.values() {
            if group.object_name.is_empty() {
                debug!("Skipping {} frame address(es) without an image", group.symbols.len());
                continue;
            }

            let candidates = locator.candidates(&group.object_name);
            let resolved =
                resolve_image(&self.resolver, group, &candidates, &meta.cpu_arch, self.options.policy)
                    .await?;
            names.absorb(resolved);
        }

        Ok(names)
    }

    /// Symbolicate `report`, returning a copy with resolved names filled in
    ///
    /// `dsym_path` holds the symbols of the crashed app itself.
    ///
    /// # Errors
    /// See [`Symbolicator::resolve_names`]. No report is returned on error.
    pub async fn symbolicate(&self, report: &CrashReport, dsym_path: &Path) -> Result<CrashReport> {
        let names = self.resolve_names(report, dsym_path).await?;
        let symbolicated = merge_names(report, &names);

        let total = symbolicated.frames().count();
        let named = symbolicated.frames().filter(|f| f.symbol_name.is_some()).count();
        info!("Symbolicated report: {named}/{total} frame(s) named");

        Ok(symbolicated)
    }
}
