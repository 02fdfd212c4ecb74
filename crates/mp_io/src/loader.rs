//! crates/mp_io/src/loader.rs
//! Typed loading of the two engine inputs: per-region sub-unit counts and
//! per-region configuration.
//!
//! Strict shapes (`deny_unknown_fields`), local files only, and domain
//! checks at the boundary: a file that loads is a file the engine can run.
//! Counts arrive pre-aggregated from upstream ingestion (feature counting
//! over survey exports is not this crate's business).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use mp_core::errors::ConfigError;
use mp_core::rounding::Ratio;
use mp_core::tokens::{RegionId, SubUnitName};
use mp_core::variables::{
    DuplicatePolicy, RegionConfig, DEFAULT_CAPACITY_PER_UNIT,
};

use crate::{IoError, IoResult};

/* ---------------- Wire shapes ---------------- */

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CountsFile {
    regions: Vec<CountsRegionWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CountsRegionWire {
    region_id: RegionId,
    sub_units: Vec<SubUnitWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SubUnitWire {
    name: SubUnitName,
    homepass: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    regions: BTreeMap<RegionId, RegionConfigWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionConfigWire {
    total_quota: u32,
    #[serde(default)]
    capacity_per_unit: Option<u32>,
    /// Decimal literal, e.g. `0.3`. Kept as a JSON number on the wire and
    /// converted via its decimal text so the ratio is exact.
    #[serde(default)]
    obtainable_ratio: Option<serde_json::Number>,
    #[serde(default)]
    duplicate_policy: Option<DuplicatePolicy>,
}

/* ---------------- Loaded, typed views ---------------- */

/// One region's raw counts, input order preserved (duplicates are resolved
/// later by the configured policy, not here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCounts {
    pub region_id: RegionId,
    pub sub_units: Vec<(SubUnitName, u64)>,
}

/// All regions from one counts file, file order preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountsInput {
    pub regions: Vec<RegionCounts>,
}

/// Per-region configuration set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSet {
    regions: BTreeMap<RegionId, RegionConfig>,
}

impl ConfigSet {
    pub fn new(regions: BTreeMap<RegionId, RegionConfig>) -> Self {
        ConfigSet { regions }
    }

    /// Missing configuration is a configuration error, not a silent default.
    pub fn get(&self, region_id: &RegionId) -> Result<&RegionConfig, ConfigError> {
        self.regions
            .get(region_id)
            .ok_or_else(|| ConfigError::MissingRegion(region_id.as_str().to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &RegionConfig)> {
        self.regions.iter()
    }
}

/* ---------------- Entry points ---------------- */

/// Load and type-check a counts file.
pub fn load_counts_file(path: &Path) -> IoResult<CountsInput> {
    let bytes = std::fs::read(path)?;
    let wire: CountsFile = serde_json::from_slice(&bytes)?;

    let mut seen = BTreeMap::<RegionId, ()>::new();
    let mut regions = Vec::with_capacity(wire.regions.len());
    for r in wire.regions {
        if seen.insert(r.region_id.clone(), ()).is_some() {
            return Err(IoError::Invalid(format!(
                "region {} appears twice in counts file",
                r.region_id
            )));
        }
        let sub_units = r.sub_units.into_iter().map(|s| (s.name, s.homepass)).collect();
        regions.push(RegionCounts { region_id: r.region_id, sub_units });
    }
    Ok(CountsInput { regions })
}

/// Load and type-check a config file, applying defaults and domain checks.
pub fn load_config_file(path: &Path) -> IoResult<ConfigSet> {
    let bytes = std::fs::read(path)?;
    let wire: ConfigFile = serde_json::from_slice(&bytes)?;

    let mut regions = BTreeMap::new();
    for (region_id, w) in wire.regions {
        let cfg = config_from_wire(&region_id, w)?;
        regions.insert(region_id, cfg);
    }
    Ok(ConfigSet::new(regions))
}

fn config_from_wire(region_id: &RegionId, w: RegionConfigWire) -> IoResult<RegionConfig> {
    let obtainable_ratio = match w.obtainable_ratio {
        // `Number::to_string` reproduces the decimal literal, so "0.3"
        // becomes exactly 3/10 here, never the nearest double.
        Some(n) => Ratio::from_decimal_str(&n.to_string()).map_err(|e| {
            IoError::Invalid(format!("region {region_id}: obtainable_ratio: {e}"))
        })?,
        None => mp_core::variables::DEFAULT_OBTAINABLE_RATIO,
    };

    let cfg = RegionConfig {
        total_quota: w.total_quota,
        capacity_per_unit: w.capacity_per_unit.unwrap_or(DEFAULT_CAPACITY_PER_UNIT),
        obtainable_ratio,
        duplicate_policy: w.duplicate_policy.unwrap_or_default(),
    };
    cfg.validate()
        .map_err(|e| IoError::Invalid(format!("region {region_id}: {e}")))?;
    Ok(cfg)
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;
    use std::io::Write;

    fn write_tmp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn counts_round_trip_preserves_order() {
        let f = write_tmp(
            r#"{"regions":[{"region_id":"sukun","sub_units":[
                {"name":"Gadang","homepass":210},
                {"name":"Bandungrejosari","homepass":75}]}]}"#,
        );
        let input = load_counts_file(f.path()).unwrap();
        assert_eq!(input.regions.len(), 1);
        let r = &input.regions[0];
        assert_eq!(r.region_id.as_str(), "sukun");
        assert_eq!(r.sub_units[0].0.as_str(), "Gadang");
        assert_eq!(r.sub_units[0].1, 210);
        assert_eq!(r.sub_units[1].0.as_str(), "Bandungrejosari");
    }

    #[test]
    fn negative_homepass_is_a_load_error() {
        let f = write_tmp(
            r#"{"regions":[{"region_id":"sukun","sub_units":[{"name":"Gadang","homepass":-1}]}]}"#,
        );
        assert!(matches!(load_counts_file(f.path()), Err(IoError::Json { .. })));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let f = write_tmp(
            r#"{"regions":[{"region_id":"sukun","sub_units":[],"extra":true}]}"#,
        );
        assert!(load_counts_file(f.path()).is_err());
    }

    #[test]
    fn duplicate_region_in_counts_rejected() {
        let f = write_tmp(
            r#"{"regions":[
                {"region_id":"sukun","sub_units":[]},
                {"region_id":"sukun","sub_units":[]}]}"#,
        );
        assert!(matches!(load_counts_file(f.path()), Err(IoError::Invalid(_))));
    }

    #[test]
    fn config_defaults_and_exact_ratio() {
        let f = write_tmp(
            r#"{"regions":{
                "lowokwaru":{"total_quota":329},
                "klojen":{"total_quota":40,"capacity_per_unit":8,
                          "obtainable_ratio":0.35,"duplicate_policy":"merge_sum"}}}"#,
        );
        let set = load_config_file(f.path()).unwrap();

        let low = set.get(&"lowokwaru".parse().unwrap()).unwrap();
        assert_eq!(low.total_quota, 329);
        assert_eq!(low.capacity_per_unit, 16);
        assert_eq!(low.obtainable_ratio, Ratio { num: 3, den: 10 });
        assert_eq!(low.duplicate_policy, DuplicatePolicy::Reject);

        let klo = set.get(&"klojen".parse().unwrap()).unwrap();
        assert_eq!(klo.obtainable_ratio, Ratio { num: 7, den: 20 });
        assert_eq!(klo.duplicate_policy, DuplicatePolicy::MergeSum);
    }

    #[test]
    fn missing_region_config_is_an_error() {
        let f = write_tmp(r#"{"regions":{"sukun":{"total_quota":5}}}"#);
        let set = load_config_file(f.path()).unwrap();
        let err = set.get(&"blimbing".parse().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRegion(_)));
    }

    #[test]
    fn out_of_range_config_fails_at_load() {
        let f = write_tmp(
            r#"{"regions":{"sukun":{"total_quota":5,"obtainable_ratio":1.2}}}"#,
        );
        assert!(matches!(load_config_file(f.path()), Err(IoError::Invalid(_))));

        let f = write_tmp(
            r#"{"regions":{"sukun":{"total_quota":5,"capacity_per_unit":0}}}"#,
        );
        assert!(matches!(load_config_file(f.path()), Err(IoError::Invalid(_))));
    }

    #[test]
    fn region_counts_serialize_stably() {
        let rc = RegionCounts {
            region_id: "sukun".parse().unwrap(),
            sub_units: vec![("Gadang".parse().unwrap(), 210)],
        };
        assert_json_eq!(
            serde_json::to_value(&rc).unwrap(),
            json!({"region_id": "sukun", "sub_units": [["Gadang", 210]]})
        );
    }
}
