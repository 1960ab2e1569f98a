//! Stable identifier generation for project-file objects.
//!
//! Xcode identifies every object in a project file by a 96-bit "global ID"
//! (24 uppercase hex characters). IDs must be unique within a project file
//! and stable across regenerations, otherwise the IDE sees spurious churn
//! when diffing a regenerated project against its open copy.

use std::collections::HashSet;
use std::sync::Mutex;

use sha2::{Digest, Sha256};

/// Derive a stable 32-bit seed from a string.
///
/// Uses the first four bytes of the SHA256 digest rather than the std
/// hasher, which is not guaranteed stable across compiler versions. The
/// same name must map to the same seed in every run.
pub fn seed32(s: &str) -> u32 {
    let digest = Sha256::digest(s.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Allocates collision-free object IDs for one generation pass.
///
/// An ID is laid out as three 32-bit fields: a hash of the object's type
/// tag (e.g. `PBXLegacyTarget`), the caller-supplied seed (typically a
/// name hash), and a collision counter. For a fixed (tag, seed) pair the
/// first allocation always yields counter zero, so IDs are a pure function
/// of (tag, name) as long as the inputs themselves are collision-free.
///
/// The generator is internally synchronized; adapter invocations may run
/// on worker threads sharing one instance. It is passed explicitly to call
/// sites rather than living in a global.
#[derive(Debug, Default)]
pub struct GidGenerator {
    used: Mutex<HashSet<String>>,
}

impl GidGenerator {
    /// Create a generator with no reserved IDs.
    pub fn new() -> Self {
        GidGenerator::default()
    }

    /// Generate an ID for an object of the given type tag.
    ///
    /// Never returns an ID handed out earlier by this generator. A
    /// repeated (tag, seed) pair resolves to the next free counter slot;
    /// returning a duplicate would corrupt the IDE's object graph.
    pub fn generate(&self, type_tag: &str, seed: u32) -> String {
        let tag = seed32(type_tag);
        let mut used = self.used.lock().unwrap();

        for counter in 0u32..=u32::MAX {
            let gid = format!("{:08X}{:08X}{:08X}", tag, seed, counter);
            if used.insert(gid.clone()) {
                return gid;
            }
        }

        // 2^32 collisions on one (tag, seed) pair cannot happen with
        // hash-derived seeds; treat it as an internal invariant violation.
        panic!("id space exhausted for type tag `{type_tag}`");
    }
}
