//! Per-type and per-unit data model (§3).

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The four text fragments that fully determine the emitted code for one
/// reflected type. Equality is plain structural equality over the four
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationGenerator {
    #[serde(rename = "Templates")]
    pub templates_header: String,
    #[serde(rename = "FullTypeName")]
    pub full_type_name: String,
    #[serde(rename = "SerializeFieldsSource")]
    pub serialize_fields_body: String,
    #[serde(rename = "DeserializeFieldsSource")]
    pub deserialize_fields_body: String,
}

/// The per-unit or aggregated set of reflected types.
///
/// `generators` uses a `BTreeMap` rather than a hash map so that every
/// consumer (emission, the dynamic-dispatch table, on-disk cache) iterates
/// in ascending key order for free, satisfying the determinism requirement
/// in §4.7/§4.5 without a separate sort step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationGeneratorSet {
    #[serde(rename = "Generators")]
    pub generators: BTreeMap<String, ImplementationGenerator>,
    #[serde(rename = "NonTemplateTypes")]
    pub non_template_types: BTreeSet<String>,
}

impl ImplementationGeneratorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly-extracted generator, honoring "first wins within a
    /// unit" (§4.3.1): a `full_type_name` already present is left alone.
    pub fn insert(&mut self, generator: ImplementationGenerator, non_template: bool) {
        let key = generator.full_type_name.clone();
        if self.generators.contains_key(&key) {
            return;
        }
        if non_template {
            self.non_template_types.insert(key.clone());
        }
        self.generators.insert(key, generator);
    }
}

/// The result of walking a single translation unit: its extracted
/// generators plus any parse-anomaly errors accumulated along the way
/// (§3, §7 — these never escape the per-unit boundary).
#[derive(Debug, Clone)]
pub struct UnitResult {
    pub path: PathBuf,
    pub generators: ImplementationGeneratorSet,
    pub errors: Vec<String>,
}
