//! Crash report data model
//!
//! Reports arrive as KSCrash-style JSON. Only the fields the symbolicator
//! reads are typed; everything else at every level is carried through
//! untouched in an `extra` map so the output is the input plus resolved
//! names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;

use crate::domain::{Address, Result, SymbolicateError};

/// Root of a crash report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashReport {
    pub system: SystemInfo,
    pub crash: Crash,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Device and process metadata recorded alongside the crash
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Crash {
    #[serde(default)]
    pub threads: Vec<Thread>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<Backtrace>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backtrace {
    #[serde(default)]
    pub contents: Vec<Frame>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub instruction_addr: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_addr: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_addr: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Frame {
    /// Name of the owning image, empty when the report did not record one
    #[must_use]
    pub fn image_name(&self) -> &str {
        self.object_name.as_deref().unwrap_or("")
    }
}

impl Thread {
    /// Frames of this thread in recorded order
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        self.backtrace.as_ref().map_or(&[][..], |bt| bt.contents.as_slice())
    }
}

impl CrashReport {
    /// All frames across all threads, threads in order, frames in order
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.crash.threads.iter().flat_map(Thread::frames)
    }

    /// Parse a report from JSON text
    ///
    /// # Errors
    /// Returns [`SymbolicateError::MalformedInput`] if the text is not JSON or
    /// does not have the crash report shape
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a report out of a larger JSON document
    ///
    /// `pointer` is a JSON pointer (RFC 6901) such as `/stack`; an empty
    /// pointer selects the whole document.
    ///
    /// # Errors
    /// Returns [`SymbolicateError::MalformedInput`] if the document is not
    /// JSON, the pointer selects nothing, or the selected value is not a
    /// crash report
    pub fn from_json_at(text: &str, pointer: &str) -> Result<Self> {
        if pointer.is_empty() {
            return Self::from_json(text);
        }

        let mut document: Value = serde_json::from_str(text)?;
        let selected = document.pointer_mut(pointer).ok_or_else(|| {
            SymbolicateError::MalformedInput(format!("nothing found at JSON pointer {pointer}"))
        })?;

        Ok(serde_json::from_value(selected.take())?)
    }

    /// Serialize the report as JSON
    ///
    /// # Errors
    /// Returns an error if writing fails
    pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> serde_json::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        }
    }
}
