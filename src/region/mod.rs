//! Region module
//!
//! Region data model, upstream page-number detections, and the conflict
//! detector that gates canonical page resolution.

// Submodules
mod conflict;
mod types;

// Re-export public API
pub use conflict::ConflictDetector;
pub use types::{
    BoundingBox, ConflictingRegion, PageNumberConflict, Region, RegionDerivedPageNumber,
    RegionType,
};
