use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::core::{Aggregation, DateKey, RegionKey};
use crate::error::ChartResult;
use crate::interaction::{RegionSelection, ViewportController};

use super::ChartConfig;

/// Data availability as the UI should present it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    /// Loaded successfully, nothing to chart.
    Empty,
    /// Last fetch failed. Previously loaded data, if any, is still served.
    Failed { message: String },
}

/// Identifies one fetch so that only the latest completion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(pub(super) u64);

/// Composition root: owns the cached aggregation and the session state, and is
/// the only place where any of it changes.
///
/// Selection and viewport changes only re-slice the cached aggregation; the
/// aggregator runs again only when new data is loaded.
#[derive(Debug, Clone)]
pub struct IssueChart {
    pub(super) config: ChartConfig,
    pub(super) offset: FixedOffset,
    pub(super) status: LoadStatus,
    pub(super) aggregation: Aggregation,
    pub(super) selection: RegionSelection,
    pub(super) viewport: ViewportController,
    pub(super) selected_date: Option<DateKey>,
    pub(super) fetch_generation: u64,
    pub(super) pending_fetch: Option<u64>,
}

impl IssueChart {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let offset = config.utc_offset()?;
        let selection = RegionSelection::new(&config.regions);
        let viewport = ViewportController::new(config.viewport_behavior);

        Ok(Self {
            config,
            offset,
            status: LoadStatus::Idle,
            aggregation: Aggregation::default(),
            selection,
            viewport,
            selected_date: None,
            fetch_generation: 0,
            pending_fetch: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    #[must_use]
    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.aggregation.is_empty()
    }

    /// Legend label: catalog name, the unknown label, or the raw id.
    #[must_use]
    pub fn region_label(&self, region: RegionKey) -> String {
        match region {
            RegionKey::Unknown => self.config.unknown_region_label.clone(),
            RegionKey::Id(_) => self
                .config
                .regions
                .name(region)
                .map_or_else(|| region.to_string(), str::to_owned),
        }
    }
}
