use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::core::RegionCatalog;
use crate::error::{ChartError, ChartResult};
use crate::interaction::ViewportBehavior;

/// Chart bootstrap configuration.
///
/// Serializable so host applications can ship the region table and tuning as
/// a JSON file instead of hard-coding them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Known regions, in legend order.
    pub regions: RegionCatalog,
    #[serde(default)]
    pub viewport_behavior: ViewportBehavior,
    /// Legend label for issues without a region.
    #[serde(default = "default_unknown_region_label")]
    pub unknown_region_label: String,
    /// Offset used to turn issue timestamps into calendar dates.
    #[serde(default)]
    pub utc_offset_seconds: i32,
}

impl ChartConfig {
    #[must_use]
    pub fn new(regions: RegionCatalog) -> Self {
        Self {
            regions,
            viewport_behavior: ViewportBehavior::default(),
            unknown_region_label: default_unknown_region_label(),
            utc_offset_seconds: 0,
        }
    }

    #[must_use]
    pub fn with_viewport_behavior(mut self, behavior: ViewportBehavior) -> Self {
        self.viewport_behavior = behavior;
        self
    }

    #[must_use]
    pub fn with_unknown_region_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_region_label = label.into();
        self
    }

    #[must_use]
    pub fn with_utc_offset_seconds(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.viewport_behavior.validate()?;
        self.utc_offset()?;
        Ok(self)
    }

    pub fn utc_offset(&self) -> ChartResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds).ok_or_else(|| {
            ChartError::InvalidConfig(format!(
                "utc offset out of range: {} seconds",
                self.utc_offset_seconds
            ))
        })
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_unknown_region_label() -> String {
    "unknown".to_owned()
}
