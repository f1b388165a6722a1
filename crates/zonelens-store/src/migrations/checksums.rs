//! Migration checksums
//!
//! A checksum is the hex SHA-256 of the migration body with line endings
//! normalised to `\n`, so a CRLF checkout of the same file still matches.

use sha2::{Digest, Sha256};

pub fn compute_checksum(sql: &str) -> String {
    let mut hasher = Sha256::new();
    for (i, line) in sql.split('\n').enumerate() {
        if i > 0 {
            hasher.update(b"\n");
        }
        hasher.update(line.strip_suffix('\r').unwrap_or(line).as_bytes());
    }
    hex::encode(hasher.finalize())
}
