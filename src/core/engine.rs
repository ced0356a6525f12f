// Fintrace - core/engine.rs
//
// The normalisation engine: detection, parser dispatch, aggregation, and
// serialisation of the output document.
//
// The engine is pure and total over its input: it takes one in-memory text
// blob and always returns a well-formed report. Bad lines become UNKNOWN
// events, undetectable formats become a per-line fallback, and nothing in
// here performs I/O. Callers own decoding, timeouts, and persistence.

use crate::core::model::{
    DetectedFormat, Event, EventKind, ForensicReport, SummaryReport, UnknownDetails,
};
use crate::core::{amlsim, detect, kaggle};
use crate::util::constants;
use crate::util::error::SerializeError;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for one engine invocation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Non-empty lines sampled from the start of the input when probing for
    /// the tabular grammar.
    pub detection_sample_lines: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            detection_sample_lines: constants::DETECTION_SAMPLE_LINES,
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Normalise a raw audit log into a chronologically ordered forensic report.
pub fn extract_causal_chain(raw_logs: &str) -> ForensicReport {
    extract_causal_chain_with_config(raw_logs, &EngineConfig::default())
}

/// As [`extract_causal_chain`], with explicit configuration.
pub fn extract_causal_chain_with_config(raw_logs: &str, config: &EngineConfig) -> ForensicReport {
    let trimmed = raw_logs.trim();
    let lines: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.lines().collect()
    };

    let total_lines = lines.iter().filter(|line| !line.trim().is_empty()).count();
    let detected_format = detect::detect_format(&lines, config.detection_sample_lines);

    let mut events = match detected_format {
        DetectedFormat::Kaggle => kaggle::parse_lines(&lines),
        DetectedFormat::Amlsim => amlsim::parse_lines(&lines),
        DetectedFormat::Unknown => fallback_events(&lines),
    };

    // Chronological order, dateless events last. The sort is stable, so
    // events sharing a timestamp keep the order their parser produced them
    // in.
    events.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));

    let summary = summarize(&events, total_lines, detected_format);

    tracing::info!(
        format = %detected_format,
        events = events.len(),
        alerts = summary.total_alerts,
        amount_at_risk = summary.total_amount_at_risk,
        "Causal chain extracted"
    );

    ForensicReport {
        causal_chain: events,
        summary,
    }
}

/// Serialise a report as the indented JSON document downstream collaborators
/// consume.
pub fn to_json(report: &ForensicReport) -> Result<String, SerializeError> {
    serde_json::to_string_pretty(report).map_err(|source| SerializeError::Json { source })
}

// =============================================================================
// Aggregation
// =============================================================================

/// One UNKNOWN event per non-empty line, used when neither grammar applies.
fn fallback_events(lines: &[&str]) -> Vec<Event> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Event {
            timestamp: constants::TIMESTAMP_UNKNOWN.to_string(),
            kind: EventKind::Unknown(UnknownDetails {
                error: "Unsupported log format".to_string(),
            }),
            raw_log: line.trim_end().to_string(),
        })
        .collect()
}

/// Compute the summary tallies over the ordered event sequence.
fn summarize(events: &[Event], total_lines: usize, format: DetectedFormat) -> SummaryReport {
    let mut total_alerts = 0usize;
    let mut total_amount_at_risk = 0u64;

    // Exhaustive on purpose: a new event variant must be accounted for here
    // before the crate compiles again.
    for event in events {
        match &event.kind {
            EventKind::Alert(details) => {
                total_alerts += 1;
                total_amount_at_risk += details.amount;
            }
            EventKind::Unknown(_) => {}
        }
    }

    SummaryReport {
        total_alerts,
        total_amount_at_risk,
        total_lines,
        unmatched_lines: total_lines - total_alerts,
        detected_format: format,
    }
}
