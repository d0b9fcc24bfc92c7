use serde_json::Value;
use tracing::{debug, warn};

use crate::core::DayBatch;
use crate::error::{ChartError, ChartResult};

/// Decodes a day-batch payload.
///
/// The payload must be a JSON array. Elements that do not decode as a
/// [`DayBatch`] are dropped with a warning; date validation is left to the
/// aggregator.
pub fn decode_day_batches(input: &str) -> ChartResult<Vec<DayBatch>> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| ChartError::Transport(format!("failed to parse day batch payload: {e}")))?;
    decode_day_batches_value(value)
}

pub fn decode_day_batches_value(value: Value) -> ChartResult<Vec<DayBatch>> {
    let Value::Array(elements) = value else {
        return Err(ChartError::Transport(
            "day batch payload must be a JSON array".to_owned(),
        ));
    };

    let element_count = elements.len();
    let mut batches = Vec::with_capacity(element_count);
    for (position, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<DayBatch>(element) {
            Ok(batch) => batches.push(batch),
            Err(err) => {
                warn!(position, error = %err, "dropping undecodable day batch");
            }
        }
    }
    debug!(
        element_count,
        decoded_count = batches.len(),
        "decoded day batch payload"
    );
    Ok(batches)
}
