//! # Crash Report Symbolication
//!
//! This module turns the raw instruction addresses of a crash report into
//! function names. It does not read debug information itself: an external
//! tool (`atos` on macOS, `atosl` elsewhere) is asked about each binary image
//! and its answers are merged back into the report.
//!
//! ## Flow
//!
//! ```text
//! CrashReport
//!   │
//!   ├─ grouping   one ImageGroup per object_name, first-seen order
//!   │
//!   ├─ locator    candidate symbol files per image
//!   │               app image     → the dSYM passed by the caller
//!   │               *.dylib       → Symbols/usr/lib/system, Symbols/usr/lib
//!   │               framework     → Frameworks, PrivateFrameworks
//!   │
//!   ├─ resolver   try candidates in order until one answers
//!   │               (atos: one subprocess per attempt)
//!   │
//!   ├─ pipeline   images in order, names into one NameTable
//!   │
//!   └─ merge      copy of the report with names filled in
//! ```
//!
//! ## Failure Policy
//!
//! A resolver attempt fails when the tool exits non-zero, prints nothing,
//! cannot be launched, or runs past its timeout.
//!
//! - **Lenient** (default): the next candidate is tried; if none works the
//!   image's frames keep whatever names they had.
//! - **Strict**: the first failure aborts the call and no report is returned.
//!
//! Missing report metadata is always an error.
//!
//! ## Positional Output
//!
//! Resolver output is matched to addresses by line number: line `i` names
//! the `i`-th submitted address. Images are therefore resolved strictly one
//! at a time, never interleaving two invocations.

pub mod atos;
pub mod grouping;
pub mod locator;
pub mod merge;
pub mod pipeline;
pub mod resolver;

pub use atos::AtosResolver;
pub use grouping::{group_by_image, ImageGroup, ImageGroups};
pub use locator::{DebugFileLocator, ResolverMeta};
pub use merge::merge_names;
pub use pipeline::{NameTable, Symbolicator};
pub use resolver::{resolve_image, ResolveRequest, SymbolResolver};
