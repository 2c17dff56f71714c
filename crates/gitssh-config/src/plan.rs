//! Build/launch/cache flags exchanged through the build plan.
//!
//! Detection requires the dependency with a set of [`PlanFlags`]. The build
//! phase gets back every plan entry that was merged for this buildpack and
//! folds the ones for its dependency with [`merged_flags`].

use libcnb::data::buildpack_plan::Entry;
use serde::{Deserialize, Serialize};

/// Build/launch/cache flags carried in plan metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanFlags {
    #[serde(default)]
    pub build: bool,
    #[serde(default)]
    pub launch: bool,
    #[serde(default)]
    pub cache: bool,
}

impl PlanFlags {
    /// Flags set on either side.
    pub fn union(self, other: Self) -> Self {
        Self {
            build: self.build || other.build,
            launch: self.launch || other.launch,
            cache: self.cache || other.cache,
        }
    }

    /// Read the boolean flags out of a free-form metadata table. Missing or
    /// non-boolean values count as `false`.
    pub fn from_metadata(metadata: &toml::Table) -> Self {
        let flag = |key: &str| {
            metadata
                .get(key)
                .and_then(toml::Value::as_bool)
                .unwrap_or(false)
        };
        Self {
            build: flag("build"),
            launch: flag("launch"),
            cache: flag("cache"),
        }
    }
}

/// Shallow-merge every entry named `name`: a flag is set if any entry sets it.
///
/// Returns `None` when no entry has that name.
pub fn merged_flags(entries: &[Entry], name: &str) -> Option<PlanFlags> {
    entries
        .iter()
        .filter(|e| e.name == name)
        .map(|e| PlanFlags::from_metadata(&e.metadata))
        .reduce(PlanFlags::union)
}
