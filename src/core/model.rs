// Fintrace - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no CLI,
// no parsing logic.
//
// These types are the shared vocabulary across detection, parsing,
// aggregation, and export — and, serialised, the sole contract consumed by
// downstream narrative/report collaborators.

use crate::util::constants;
use serde::{Deserialize, Serialize};

// =============================================================================
// Event (normalised output of parsing)
// =============================================================================

/// A single normalised event on the forensic timeline.
///
/// Every non-empty input line (tabular format) or detected laundering block
/// (block format) yields exactly one event; nothing is silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// `YYYY-MM-DD HH:MM:SS`, or `"N/A"` when the source carried no usable
    /// date (such events sort to the end of the timeline).
    pub timestamp: String,

    /// Alert or unknown, with the matching `details` payload.
    /// Serialises as the adjacent `event_type` / `details` field pair.
    #[serde(flatten)]
    pub kind: EventKind,

    /// The original line, preserved verbatim for audit traceability — or a
    /// synthetic description for block-derived events, which have no single
    /// source line.
    pub raw_log: String,
}

impl Event {
    /// True for parsed or synthesised financial-crime alerts.
    pub fn is_alert(&self) -> bool {
        matches!(self.kind, EventKind::Alert(_))
    }

    /// The monetary amount for alert events, `None` otherwise.
    pub fn amount(&self) -> Option<u64> {
        match &self.kind {
            EventKind::Alert(details) => Some(details.amount),
            EventKind::Unknown(_) => None,
        }
    }

    /// Timeline ordering key. Events without a timestamp compare as the
    /// maximal sentinel so they sort last; the stored field is untouched.
    pub fn sort_key(&self) -> &str {
        if self.timestamp == constants::TIMESTAMP_UNKNOWN {
            constants::TIMESTAMP_SORT_LAST
        } else {
            &self.timestamp
        }
    }
}

// =============================================================================
// Event kind
// =============================================================================

/// Tagged event payload.
///
/// Modelled as a closed sum rather than an open map so the aggregator can
/// match exhaustively — adding a variant is a compile error at every
/// consumer instead of a silently miscounted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", content = "details")]
pub enum EventKind {
    /// A detected financial-crime indicator, logged directly or synthesised
    /// from a transaction block.
    #[serde(rename = "FINANCIAL_CRIME_ALERT")]
    Alert(AlertDetails),

    /// A line no grammar could account for.
    #[serde(rename = "UNKNOWN")]
    Unknown(UnknownDetails),
}

/// Structured payload of an alert event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDetails {
    /// Alert date, `YYYY-MM-DD`.
    pub date: String,

    /// Case identifier: `FC` + 6 digits for logged alerts, or a synthetic
    /// `SYN`-prefixed id for block-derived alerts.
    pub case_id: String,

    /// Free-text alert classification (e.g. "Structuring", "FAN-OUT").
    pub alert_type: String,

    /// Monetary exposure in whole currency units. Fractional block totals
    /// are truncated, not rounded; downstream aggregation assumes integers.
    pub amount: u64,

    /// Number of transactions in the source block. Present only on
    /// block-derived alerts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_count: Option<usize>,

    /// `"<start> to <end>"` date span of the source block. Present only on
    /// block-derived alerts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// Payload of an unrecognised line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownDetails {
    /// Why the line produced no alert (mismatch reason, with the 1-based
    /// line number where one applies).
    pub error: String,
}

// =============================================================================
// Detected format
// =============================================================================

/// Which input grammar the detector selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectedFormat {
    /// Flat tabular alert lines (Kaggle-style fraud alert export).
    #[serde(rename = "KAGGLE")]
    Kaggle,

    /// Delimited transaction blocks (AMLSim-style simulation trace).
    #[serde(rename = "AMLSIM")]
    Amlsim,

    /// Neither grammar matched.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl DetectedFormat {
    /// Wire/display label, identical to the serialised form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kaggle => "KAGGLE",
            Self::Amlsim => "AMLSIM",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Summary report
// =============================================================================

/// Read-only aggregate over the event sequence, rebuilt per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Count of alert events.
    pub total_alerts: usize,

    /// Integer sum of alert amounts.
    pub total_amount_at_risk: u64,

    /// Count of non-empty input lines processed.
    pub total_lines: usize,

    /// `total_lines - total_alerts`.
    pub unmatched_lines: usize,

    /// The grammar the detector selected.
    pub detected_format: DetectedFormat,
}

// =============================================================================
// Forensic report (top-level output document)
// =============================================================================

/// The complete structured output: the chronologically ordered event
/// sequence plus its summary. This document — and nothing else — is what
/// downstream collaborators parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicReport {
    /// Events ordered ascending by timestamp, dateless events last, parser
    /// order preserved among ties.
    pub causal_chain: Vec<Event>,

    /// Aggregate statistics over `causal_chain`.
    pub summary: SummaryReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert_event() -> Event {
        Event {
            timestamp: "2024-01-05 00:00:00".to_string(),
            kind: EventKind::Alert(AlertDetails {
                date: "2024-01-05".to_string(),
                case_id: "FC000123".to_string(),
                alert_type: "Structuring".to_string(),
                amount: 10_000,
                transaction_count: None,
                period: None,
            }),
            raw_log: "1 | 2024-01-05 | ...".to_string(),
        }
    }

    #[test]
    fn test_event_serialises_with_exact_field_presence() {
        let json = serde_json::to_value(alert_event()).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 4, "timestamp, event_type, details, raw_log");
        assert_eq!(obj["event_type"], "FINANCIAL_CRIME_ALERT");
        assert_eq!(obj["details"]["case_id"], "FC000123");
        assert_eq!(obj["details"]["amount"], 10_000);
        // Line-derived alerts must not carry block-only keys.
        assert!(!obj["details"]
            .as_object()
            .unwrap()
            .contains_key("transaction_count"));
        assert!(!obj["details"].as_object().unwrap().contains_key("period"));
    }

    #[test]
    fn test_unknown_event_serialises_error_detail() {
        let event = Event {
            timestamp: "N/A".to_string(),
            kind: EventKind::Unknown(UnknownDetails {
                error: "Unmatched line 3".to_string(),
            }),
            raw_log: "garbage".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "UNKNOWN");
        assert_eq!(json["details"]["error"], "Unmatched line 3");
        assert_eq!(json["timestamp"], "N/A");
    }

    #[test]
    fn test_event_round_trips_through_serde() {
        let event = alert_event();
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_sort_key_substitutes_sentinel_without_mutating() {
        let mut event = alert_event();
        event.timestamp = "N/A".to_string();
        assert_eq!(event.sort_key(), "9999-99-99");
        assert_eq!(event.timestamp, "N/A");

        let dated = alert_event();
        assert_eq!(dated.sort_key(), "2024-01-05 00:00:00");
    }

    #[test]
    fn test_detected_format_labels() {
        assert_eq!(DetectedFormat::Kaggle.label(), "KAGGLE");
        assert_eq!(DetectedFormat::Amlsim.label(), "AMLSIM");
        assert_eq!(DetectedFormat::Unknown.label(), "UNKNOWN");
        assert_eq!(
            serde_json::to_value(DetectedFormat::Amlsim).unwrap(),
            "AMLSIM"
        );
    }
}
