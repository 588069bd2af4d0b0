//! Job index: offline building and versioned persistence.
//!
//! - [`IndexBuilder`] - batch job: load + clean corpus, encode, persist
//! - [`JobIndex`] - the augmented corpus consumed by the online path
//! - [`IndexManifest`] - version/compatibility metadata

mod builder;
mod manifest;
mod store;

pub use builder::IndexBuilder;
pub use manifest::{IndexManifest, CURRENT_SCHEMA_VERSION};
pub use store::JobIndex;
