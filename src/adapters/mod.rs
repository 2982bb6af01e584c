//! Adapters - Implementations of the persistence ports.
//!
//! - `memory` - in-process stores for tests and demos
//! - `filesystem` - JSON/JSONL files with atomic writes

pub mod filesystem;
pub mod memory;

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the given content, used by log exports.
pub(crate) fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
