// Fintrace - core/kaggle.rs
//
// Parser for the flat tabular-alert format (Kaggle-style fraud alert
// export). Single forward pass, no cross-line state: every non-empty line
// maps independently to exactly one event.

use crate::core::grammar;
use crate::core::model::{AlertDetails, Event, EventKind, UnknownDetails};
use crate::util::constants;

/// Parse tabular-alert lines into events.
///
/// Line numbers are 1-based over the full input, so a reported unmatched
/// line can be located in the original file even when blank lines precede
/// it. Blank lines occupy a number but yield no event.
pub fn parse_lines(lines: &[&str]) -> Vec<Event> {
    let mut events = Vec::new();

    for (idx, raw_line) in lines.iter().enumerate() {
        let line_number = idx + 1;
        if raw_line.trim().is_empty() {
            continue;
        }

        match grammar::alert_line().captures(raw_line) {
            Some(caps) => match parse_amount(&caps["amount"]) {
                Some(amount) => events.push(alert_event(
                    raw_line,
                    &caps["date"],
                    &caps["case_id"],
                    &caps["alert_type"],
                    amount,
                )),
                // The amount group matched but did not convert (e.g. a
                // separator-only token). Recover locally: the line is
                // reported, never propagated as a failure.
                None => events.push(unmatched_event(raw_line, line_number)),
            },
            None => events.push(unmatched_event(raw_line, line_number)),
        }
    }

    tracing::debug!(
        events = events.len(),
        alerts = events.iter().filter(|e| e.is_alert()).count(),
        "Tabular parse complete"
    );

    events
}

/// Strip thousands separators and convert to whole currency units.
fn parse_amount(raw: &str) -> Option<u64> {
    raw.replace(',', "").parse().ok()
}

fn alert_event(raw_line: &str, date: &str, case_id: &str, alert_type: &str, amount: u64) -> Event {
    Event {
        timestamp: format!("{date}{}", constants::MIDNIGHT_SUFFIX),
        kind: EventKind::Alert(AlertDetails {
            date: date.to_string(),
            case_id: case_id.to_string(),
            alert_type: alert_type.trim().to_string(),
            amount,
            transaction_count: None,
            period: None,
        }),
        raw_log: raw_line.trim_end().to_string(),
    }
}

fn unmatched_event(raw_line: &str, line_number: usize) -> Event {
    Event {
        timestamp: constants::TIMESTAMP_UNKNOWN.to_string(),
        kind: EventKind::Unknown(UnknownDetails {
            error: format!("Unmatched line {line_number}"),
        }),
        raw_log: raw_line.trim_end().to_string(),
    }
}
