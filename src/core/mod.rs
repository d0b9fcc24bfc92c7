pub mod aggregator;
pub mod date_key;
pub mod issue;
pub mod region;
pub mod series;

pub use aggregator::{Aggregation, SkippedBatch, aggregate};
pub use date_key::DateKey;
pub use issue::{
    CommentMonitor, DayBatch, Executor, IssueComment, IssueDetail, IssueObject, IssueRecord, Titled,
};
pub use region::{RegionCatalog, RegionEntry, RegionKey};
pub use series::{DrillIndex, SeriesPoint};
