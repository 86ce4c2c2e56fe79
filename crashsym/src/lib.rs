//! # crashsym - Crash Report Symbolicator
//!
//! crashsym resolves the raw addresses in a mobile crash report into
//! function names. Reports arrive already parsed (KSCrash-style JSON); the
//! debug symbols live in the app's dSYM and in Xcode's device-support cache;
//! the actual address lookup is done by `atos` (or `atosl` off macOS),
//! invoked once per binary image.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ crash.json   │──▶│   Grouping   │──▶│   Locator    │──▶│   Resolver   │
//! │ (decimal     │   │ (per image)  │   │ (candidate   │   │ (atos/atosl  │
//! │  addresses)  │   │              │   │  files)      │   │  subprocess) │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                                                 │
//!        ┌──────────────┐   ┌──────────────┐                      │
//!        │ output.json  │◀──│    Merge     │◀── NameTable ◀───────┘
//!        │ (hex + names)│   │              │
//!        └──────────────┘   └──────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`symbolication`]: the engine (grouping, candidate lookup, resolver
//!   fallback, pipeline, merge)
//! - [`report`]: crash report data model
//! - [`config`]: base path, failure policy and resolver settings
//! - [`domain`]: `Address` newtype and error types
//! - [`cli`]: command-line argument parsing
//! - [`preflight`]: environment checks with actionable messages
//!
//! ## Typical Usage
//!
//! ```bash
//! crashsym --dsym MyApp.app.dSYM crash.json > symbolicated.json
//! RUST_LOG=debug crashsym --dsym MyApp.app.dSYM --strict crash.json
//! ```
//!
//! ```rust,ignore
//! let symbolicator = Symbolicator::new(AtosResolver::default(), SymbolicateOptions::default());
//! let report = CrashReport::from_json(&text)?;
//! let symbolicated = symbolicator.symbolicate(&report, Path::new("MyApp.app.dSYM")).await?;
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod preflight;
pub mod report;
pub mod symbolication;
