use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartError, ChartResult};

const UNKNOWN_LABEL: &str = "unknown";

/// Region series key: a catalog id, or the sentinel for records without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKey {
    Id(i64),
    Unknown,
}

impl RegionKey {
    #[must_use]
    pub fn from_region_id(region_id: Option<i64>) -> Self {
        region_id.map_or(Self::Unknown, Self::Id)
    }

    #[must_use]
    pub fn id(self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(id),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl From<i64> for RegionKey {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Unknown => f.write_str(UNKNOWN_LABEL),
        }
    }
}

impl FromStr for RegionKey {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNKNOWN_LABEL {
            return Ok(Self::Unknown);
        }
        s.parse::<i64>()
            .map(Self::Id)
            .map_err(|_| ChartError::InvalidConfig(format!("invalid region key `{s}`")))
    }
}

impl Serialize for RegionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RegionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One catalog row as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub id: i64,
    pub name: String,
}

/// Fixed, externally supplied table of known regions, in display order.
///
/// The catalog never contains [`RegionKey::Unknown`]; it is configuration,
/// not something derived from loaded data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RegionEntry>", into = "Vec<RegionEntry>")]
pub struct RegionCatalog {
    regions: IndexMap<i64, String>,
}

impl RegionCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_region(mut self, id: i64, name: impl Into<String>) -> Self {
        self.insert(id, name);
        self
    }

    pub fn insert(&mut self, id: i64, name: impl Into<String>) {
        self.regions.insert(id, name.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: RegionKey) -> bool {
        key.id().is_some_and(|id| self.regions.contains_key(&id))
    }

    #[must_use]
    pub fn name(&self, key: RegionKey) -> Option<&str> {
        key.id()
            .and_then(|id| self.regions.get(&id))
            .map(String::as_str)
    }

    /// Catalog keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.regions.keys().copied().map(RegionKey::Id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionKey, &str)> + '_ {
        self.regions
            .iter()
            .map(|(id, name)| (RegionKey::Id(*id), name.as_str()))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse region catalog: {e}")))
    }
}

impl From<Vec<RegionEntry>> for RegionCatalog {
    fn from(entries: Vec<RegionEntry>) -> Self {
        Self {
            regions: entries
                .into_iter()
                .map(|entry| (entry.id, entry.name))
                .collect(),
        }
    }
}

impl From<RegionCatalog> for Vec<RegionEntry> {
    fn from(catalog: RegionCatalog) -> Self {
        catalog
            .regions
            .into_iter()
            .map(|(id, name)| RegionEntry { id, name })
            .collect()
    }
}

impl<N: Into<String>> FromIterator<(i64, N)> for RegionCatalog {
    fn from_iter<T: IntoIterator<Item = (i64, N)>>(iter: T) -> Self {
        Self {
            regions: iter
                .into_iter()
                .map(|(id, name)| (id, name.into()))
                .collect(),
        }
    }
}
