use tracing::{debug, warn};

use crate::core::{DayBatch, aggregate};
use crate::error::ChartResult;
use crate::source::IssueSource;

use super::{FetchTicket, IssueChart, LoadStatus};

impl IssueChart {
    /// Marks a fetch as in flight and returns its ticket.
    ///
    /// Starting another fetch supersedes this one: its completion is ignored.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        self.pending_fetch = Some(self.fetch_generation);
        self.status = LoadStatus::Loading;
        debug!(generation = self.fetch_generation, "fetch started");
        FetchTicket(self.fetch_generation)
    }

    /// Applies a fetch result. Returns `false` if `ticket` is stale.
    ///
    /// On failure the status becomes [`LoadStatus::Failed`] and the previously
    /// aggregated data stays in place.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: ChartResult<Vec<DayBatch>>,
    ) -> bool {
        if self.pending_fetch != Some(ticket.0) {
            warn!(
                generation = ticket.0,
                pending = ?self.pending_fetch,
                "discarding stale fetch result"
            );
            return false;
        }
        self.pending_fetch = None;

        match result {
            Ok(batches) => self.load_batches(&batches),
            Err(err) => {
                warn!(
                    error = %err,
                    retained_points = self.aggregation.len(),
                    "fetch failed"
                );
                self.status = LoadStatus::Failed {
                    message: err.to_string(),
                };
            }
        }
        true
    }

    /// Fetches from `source` and applies the result in one step.
    pub fn refresh_from<S: IssueSource + ?Sized>(&mut self, source: &S) -> &LoadStatus {
        let ticket = self.begin_fetch();
        let result = source.fetch();
        self.complete_fetch(ticket, result);
        &self.status
    }

    /// Replaces the cached dataset and re-runs aggregation.
    pub fn load_batches(&mut self, batches: &[DayBatch]) {
        self.aggregation = aggregate(batches);
        self.status = if self.aggregation.is_empty() {
            LoadStatus::Empty
        } else {
            LoadStatus::Ready
        };

        if let Some(date) = &self.selected_date {
            if self.aggregation.position_of(date).is_none() {
                self.selected_date = None;
            }
        }

        debug!(
            batch_count = batches.len(),
            point_count = self.aggregation.len(),
            skipped_count = self.aggregation.skipped().len(),
            status = ?self.status,
            "loaded day batches"
        );
    }
}
