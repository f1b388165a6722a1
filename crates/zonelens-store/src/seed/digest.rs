//! Seed digest canonicalization
//!
//! A digest identifies a seed by content: records are ordered by id,
//! scenarios by name, and wall-clock text is normalised before hashing.

use crate::errors::Result;
use crate::seed::format_v0::SeedV0;
use serde::Serialize;
use sha2::{Digest, Sha256};
use zonelens_core::errors::ZoneLensError;
use zonelens_core::model::WallClockValue;
use zonelens_core::verifier::ScenarioEntry;

#[derive(Serialize)]
struct CanonicalSeed<'a> {
    schema_version: u32,
    records: Vec<CanonicalRecord<'a>>,
    scenarios: Vec<&'a ScenarioEntry>,
}

#[derive(Serialize)]
struct CanonicalRecord<'a> {
    id: i64,
    wall_clock: String,
    url: Option<&'a str>,
}

/// SHA256 hex digest of the canonical seed
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let mut records = seed
        .records
        .iter()
        .map(|r| {
            Ok(CanonicalRecord {
                id: r.id,
                wall_clock: WallClockValue::parse(&r.wall_clock)?.to_string(),
                url: r.url.as_deref(),
            })
        })
        .collect::<zonelens_core::Result<Vec<_>>>()?;
    records.sort_by_key(|r| r.id);

    let mut scenarios: Vec<&ScenarioEntry> = seed.scenarios.iter().collect();
    scenarios.sort_by(|a, b| a.name.cmp(&b.name));

    let canonical = CanonicalSeed {
        schema_version: seed.schema_version,
        records,
        scenarios,
    };
    let json = serde_json::to_string(&canonical).map_err(ZoneLensError::from)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::parser::parse_seed_str;

    #[test]
    fn test_digest_ignores_record_order_and_t_separator() {
        let a = parse_seed_str(
            r#"
schema_version: 0
records:
  - { id: 1, wall_clock: "2020-01-01 13:00:00" }
  - { id: 2, wall_clock: "2020-06-01 14:00:00" }
"#,
        )
        .unwrap();
        let b = parse_seed_str(
            r#"
schema_version: 0
records:
  - { id: 2, wall_clock: "2020-06-01T14:00:00" }
  - { id: 1, wall_clock: "2020-01-01 13:00:00" }
"#,
        )
        .unwrap();

        assert_eq!(compute_seed_digest(&a).unwrap(), compute_seed_digest(&b).unwrap());
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = parse_seed_str("schema_version: 0\nrecords:\n  - { id: 1, wall_clock: \"2020-01-01 13:00:00\" }\n").unwrap();
        let b = parse_seed_str("schema_version: 0\nrecords:\n  - { id: 1, wall_clock: \"2020-01-01 13:00:01\" }\n").unwrap();

        assert_ne!(compute_seed_digest(&a).unwrap(), compute_seed_digest(&b).unwrap());
    }
}
