//! Write resolved names back into a copy of the report

use super::pipeline::NameTable;
use crate::report::{CrashReport, Frame};

/// Copy `report`, naming every frame whose address is in `names`
///
/// Thread and frame order and counts are preserved. Frames without an image
/// name, and frames whose address was not resolved, keep their existing
/// `symbol_name`. Address fields are written in canonical hex form when the
/// report is serialized.
#[must_use]
pub fn merge_names(report: &CrashReport, names: &NameTable) -> CrashReport {
    let mut merged = report.clone();

    let frames = merged
        .crash
        .threads
        .iter_mut()
        .filter_map(|thread| thread.backtrace.as_mut())
        .flat_map(|backtrace| backtrace.contents.iter_mut());

    for frame in frames {
        apply_name(frame, names);
    }

    merged
}

fn apply_name(frame: &mut Frame, names: &NameTable) {
    if frame.image_name().is_empty() {
        return;
    }
    if let Some(name) = names.get(frame.instruction_addr) {
        frame.symbol_name = Some(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;
    use serde_json::json;

    fn report() -> CrashReport {
        serde_json::from_value(json!({
            "system": { "process_name": "MyApp" },
            "crash": { "threads": [
                { "index": 0, "backtrace": { "contents": [
                    { "instruction_addr": 4328, "object_addr": 4096, "symbol_addr": 4300, "object_name": "MyApp" },
                    { "instruction_addr": 9, "object_addr": 0, "object_name": "", "symbol_name": "kept" },
                    { "instruction_addr": 77, "object_addr": 64, "object_name": "UIKit", "symbol_name": "old" }
                ]}},
                { "index": 1, "backtrace": { "contents": [
                    { "instruction_addr": 4328, "object_addr": 4096, "object_name": "MyApp" }
                ]}}
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_merge_fills_names_and_preserves_structure() {
        let mut names = NameTable::new();
        names.insert(Address(4328), "main");
        names.insert(Address(9), "not-for-imageless-frames");

        let merged = merge_names(&report(), &names);

        assert_eq!(merged.crash.threads.len(), 2);
        let first = merged.crash.threads[0].frames();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].symbol_name.as_deref(), Some("main"));
        assert_eq!(first[1].symbol_name.as_deref(), Some("kept"));
        assert_eq!(first[2].symbol_name.as_deref(), Some("old"));
        assert_eq!(merged.crash.threads[1].frames()[0].symbol_name.as_deref(), Some("main"));
    }

    #[test]
    fn test_merge_output_has_hex_addresses() {
        let merged = merge_names(&report(), &NameTable::new());
        let out = serde_json::to_value(&merged).unwrap();
        let frame = &out["crash"]["threads"][0]["backtrace"]["contents"][0];
        assert_eq!(frame["instruction_addr"], "10E8");
        assert_eq!(frame["object_addr"], "1000");
        assert_eq!(frame["symbol_addr"], "10CC");
    }

    #[test]
    fn test_merge_is_idempotent_on_hex_report() {
        let once = serde_json::to_string(&merge_names(&report(), &NameTable::new())).unwrap();
        let reparsed = CrashReport::from_json(&once).unwrap();
        let twice = serde_json::to_string(&merge_names(&reparsed, &NameTable::new())).unwrap();
        assert_eq!(once, twice);
    }
}
