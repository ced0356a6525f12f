// Fintrace - core/distribution.rs
//
// Alert-type distribution over a parsed event sequence.
//
// Downstream report renderers tabulate "which typologies dominate this
// file"; computing the buckets here keeps that arithmetic deterministic and
// testable instead of re-derived ad hoc at the presentation layer.

use crate::core::model::{Event, EventKind};
use serde::{Deserialize, Serialize};

/// Aggregate figures for one alert type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertTypeBucket {
    /// The `details.alert_type` value shared by the bucket's events.
    pub alert_type: String,

    /// Number of alert events of this type.
    pub count: usize,

    /// Share of all alert events, in percent.
    pub percent: f64,

    /// Amount of the first alert of this type, as a representative
    /// per-alert figure.
    pub sample_amount: u64,

    /// Sum of amounts across all alerts of this type.
    pub total_amount: u64,
}

/// Group alert events by type, ordered by descending count (first-seen
/// order breaks ties). Unknown events are excluded; an event sequence with
/// no alerts yields an empty distribution.
pub fn alert_type_distribution(events: &[Event]) -> Vec<AlertTypeBucket> {
    let mut buckets: Vec<AlertTypeBucket> = Vec::new();
    let mut total_alerts = 0usize;

    for event in events {
        let details = match &event.kind {
            EventKind::Alert(details) => details,
            EventKind::Unknown(_) => continue,
        };
        total_alerts += 1;

        match buckets
            .iter_mut()
            .find(|b| b.alert_type == details.alert_type)
        {
            Some(bucket) => {
                bucket.count += 1;
                bucket.total_amount += details.amount;
            }
            None => buckets.push(AlertTypeBucket {
                alert_type: details.alert_type.clone(),
                count: 1,
                percent: 0.0,
                sample_amount: details.amount,
                total_amount: details.amount,
            }),
        }
    }

    for bucket in &mut buckets {
        bucket.percent = (bucket.count as f64 / total_alerts as f64) * 100.0;
    }

    // Stable sort: equal counts keep first-seen order.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}
