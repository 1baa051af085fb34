//! Feature Layout - artifact compatibility contract
//!
//! The emitted feature-name list is the contract between the fitted
//! preprocessor and the fitted classifier. The artifact stores a CRC32 hash
//! of that list; a mismatch at load time means the two halves of the bundle
//! (or the bundle and this code) were built against different layouts.

use crc32fast::Hasher;

/// Current artifact schema version.
/// MUST be incremented when the artifact format changes.
pub const ARTIFACT_SCHEMA_VERSION: u8 = 1;

/// Compute the CRC32 hash of a feature layout.
///
/// The schema version participates in the hash so a format bump always
/// invalidates older artifacts.
pub fn layout_hash(feature_names: &[String]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[ARTIFACT_SCHEMA_VERSION]);
    for name in feature_names {
        hasher.update(name.as_bytes());
    }
    hasher.finalize()
}
