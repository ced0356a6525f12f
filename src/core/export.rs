// Fintrace - core/export.rs
//
// CSV and JSON export of a forensic report.
// Core layer: writes to any Write trait object; the caller owns file
// creation and paths (paths appear here only in error context).

use crate::core::model::{Event, EventKind, ForensicReport};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export the alert timeline to CSV.
///
/// One row per alert event, in chain order: date, case id, alert type,
/// amount. Unknown events carry no tabular fields and are omitted.
/// Returns the number of rows written.
pub fn export_csv<W: Write>(
    events: &[Event],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["date", "case_id", "alert_type", "amount"])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for event in events {
        let details = match &event.kind {
            EventKind::Alert(details) => details,
            EventKind::Unknown(_) => continue,
        };

        csv_writer
            .write_record([
                details.date.as_str(),
                details.case_id.as_str(),
                details.alert_type.as_str(),
                &details.amount.to_string(),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export the full report as indented JSON.
pub fn export_json<W: Write>(
    report: &ForensicReport,
    writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine;
    use std::path::PathBuf;

    const ALERT: &str = "1 | 2024-01-05 | Case ID FC000123 | Structuring detected involving cross-border entities, automated alert triggered. | Amount: $10,000";

    #[test]
    fn test_csv_export_writes_one_row_per_alert() {
        let report = engine::extract_causal_chain(&format!("{ALERT}\nnot an alert"));

        let mut buf = Vec::new();
        let count = export_csv(
            &report.causal_chain,
            &mut buf,
            &PathBuf::from("out.csv"),
        )
        .unwrap();
        assert_eq!(count, 1, "the unknown event is omitted");

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("date,case_id,alert_type,amount"));
        assert_eq!(
            lines.next(),
            Some("2024-01-05,FC000123,Structuring,10000")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_json_export_round_trips() {
        let report = engine::extract_causal_chain(ALERT);

        let mut buf = Vec::new();
        export_json(&report, &mut buf, &PathBuf::from("out.json")).unwrap();

        let back: ForensicReport =
            serde_json::from_slice(&buf).expect("export parses back into a report");
        assert_eq!(back, report);
    }

    #[test]
    fn test_empty_chain_exports_header_only() {
        let mut buf = Vec::new();
        let count = export_csv(&[], &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(
            String::from_utf8(buf).unwrap().trim(),
            "date,case_id,alert_type,amount"
        );
    }
}
