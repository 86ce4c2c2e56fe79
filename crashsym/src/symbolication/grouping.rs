//! Partition backtrace frames by owning image

use indexmap::IndexMap;

use crate::domain::Address;
use crate::report::{CrashReport, Frame};

/// Every address seen for one image, across all threads
///
/// `object_addr` and `symbol_addr` come from the first frame seen for the
/// image. `symbols` keeps addresses in first-seen order; the name recorded
/// for an address is the one from the last frame carrying it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGroup {
    pub object_name: String,
    pub object_addr: Option<Address>,
    pub symbol_addr: Option<Address>,
    pub symbols: IndexMap<Address, Option<String>>,
}

impl ImageGroup {
    fn seeded_from(frame: &Frame) -> Self {
        Self {
            object_name: frame.image_name().to_string(),
            object_addr: frame.object_addr,
            symbol_addr: frame.symbol_addr,
            symbols: IndexMap::new(),
        }
    }

    /// Addresses in submission order
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        self.symbols.keys().copied()
    }
}

/// Image groups keyed by `object_name`, in first-seen order
pub type ImageGroups = IndexMap<String, ImageGroup>;

/// Group all frames of `report` by image
///
/// Threads are walked in order, then frames in order. Frames without an
/// image name form a group under the empty name.
#[must_use]
pub fn group_by_image(report: &CrashReport) -> ImageGroups {
    let mut images = ImageGroups::new();

    for frame in report.frames() {
        let group = images
            .entry(frame.image_name().to_string())
            .or_insert_with(|| ImageGroup::seeded_from(frame));
        group.symbols.insert(frame.instruction_addr, frame.symbol_name.clone());
    }

    images
}
