use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize, Serializer};
use tracing::trace;

use crate::core::{RegionCatalog, RegionKey};

/// Member of a region selection: a region, or the "everything" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionMember {
    All,
    Region(RegionKey),
}

impl fmt::Display for SelectionMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Region(region) => region.fmt(f),
        }
    }
}

impl Serialize for SelectionMember {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Observable state of a region selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Full,
    Partial,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    ToggleAll,
    ToggleRegion(RegionKey),
}

/// Tri-state region filter over a fixed catalog.
///
/// Invariant: [`SelectionMember::All`] is a member exactly when the region
/// members equal the catalog. `toggle_all` and `toggle_region` are the only
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSelection {
    catalog: IndexSet<RegionKey>,
    members: IndexSet<SelectionMember>,
}

impl RegionSelection {
    /// Starts fully selected.
    #[must_use]
    pub fn new(catalog: &RegionCatalog) -> Self {
        let mut selection = Self {
            catalog: catalog.keys().collect(),
            members: IndexSet::new(),
        };
        selection.select_everything();
        selection
    }

    fn select_everything(&mut self) {
        self.members = self
            .catalog
            .iter()
            .copied()
            .map(SelectionMember::Region)
            .chain(std::iter::once(SelectionMember::All))
            .collect();
    }

    pub fn toggle_all(&mut self) {
        if self.members.contains(&SelectionMember::All) {
            self.members.clear();
        } else {
            self.select_everything();
        }
        trace!(mode = ?self.mode(), "toggle all regions");
    }

    pub fn toggle_region(&mut self, region: RegionKey) {
        let member = SelectionMember::Region(region);
        if !self.members.shift_remove(&member) {
            self.members.insert(member);
        }
        self.sync_all_marker();
        trace!(%region, mode = ?self.mode(), "toggle region");
    }

    fn sync_all_marker(&mut self) {
        let region_count = self.region_members().count();
        let covers_catalog = region_count == self.catalog.len()
            && self
                .region_members()
                .all(|region| self.catalog.contains(&region));
        if covers_catalog {
            self.members.insert(SelectionMember::All);
        } else {
            self.members.shift_remove(&SelectionMember::All);
        }
    }

    /// Pure form of the transitions, for callers that keep snapshots.
    #[must_use]
    pub fn apply(mut self, event: SelectionEvent) -> Self {
        match event {
            SelectionEvent::ToggleAll => self.toggle_all(),
            SelectionEvent::ToggleRegion(region) => self.toggle_region(region),
        }
        self
    }

    #[must_use]
    pub fn is_visible(&self, region: RegionKey) -> bool {
        self.members.contains(&SelectionMember::All)
            || self.members.contains(&SelectionMember::Region(region))
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        if self.members.contains(&SelectionMember::All) {
            SelectionMode::Full
        } else if self.region_members().next().is_none() {
            SelectionMode::Empty
        } else {
            SelectionMode::Partial
        }
    }

    #[must_use]
    pub fn contains(&self, member: SelectionMember) -> bool {
        self.members.contains(&member)
    }

    pub fn members(&self) -> impl Iterator<Item = SelectionMember> + '_ {
        self.members.iter().copied()
    }

    /// Explicitly selected regions, without the "all" marker.
    pub fn region_members(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.members.iter().filter_map(|member| match member {
            SelectionMember::Region(region) => Some(*region),
            SelectionMember::All => None,
        })
    }

    pub fn catalog(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.catalog.iter().copied()
    }
}

impl Serialize for RegionSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.members.iter())
    }
}
