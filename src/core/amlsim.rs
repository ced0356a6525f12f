// Fintrace - core/amlsim.rs
//
// Parser for the transaction-block format (AMLSim-style simulation trace).
//
// A single forward scan drives a two-state accumulator: idle until a begin
// marker opens a block, in-block until an end marker (or a new begin marker,
// or end of input) flushes it. Blocks never nest — a begin marker while a
// block is open summarises the previous block first, which is the tolerant
// recovery path for traces whose end markers went missing.

use crate::core::grammar;
use crate::core::model::{AlertDetails, Event, EventKind};
use crate::util::constants;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// One extracted transaction. Amounts stay fractional until the block
/// total is truncated at flush time.
#[derive(Debug, Clone)]
struct Transaction {
    /// Normalised to `YYYY-MM-DD`.
    date: String,
    amount: f64,
}

/// The in-block accumulator: the open block's typology plus the
/// transactions collected so far.
#[derive(Debug)]
struct BlockAccumulator {
    /// Uppercased, hyphens folded to underscores.
    typology: String,
    transactions: Vec<Transaction>,
}

impl BlockAccumulator {
    fn open(raw_typology: &str) -> Self {
        Self {
            typology: raw_typology.to_uppercase().replace('-', "_"),
            transactions: Vec::new(),
        }
    }

    /// Collect a transaction if the line parses as one.
    ///
    /// Non-matching lines and failed date/amount conversions are skipped
    /// silently: inside a block they are incidental structure (headers,
    /// balances, corrupted rows), not top-level alert lines, so they are
    /// not reported as unknowns.
    fn collect(&mut self, line: &str) {
        let Some(caps) = grammar::transaction_line().captures(line) else {
            return;
        };
        let Some(date) = normalize_date(&caps["date"]) else {
            return;
        };
        let Ok(amount) = caps["amount"].parse::<f64>() else {
            return;
        };
        self.transactions.push(Transaction { date, amount });
    }

    /// Flush the block into its summary alert. Empty blocks produce nothing.
    fn summarize(self) -> Option<Event> {
        if self.transactions.is_empty() {
            return None;
        }

        // Fractional amounts are summed first and the total truncated to
        // whole units; downstream aggregation assumes integer amounts.
        let total_amount: f64 = self.transactions.iter().map(|tx| tx.amount).sum();

        // Dates are already YYYY-MM-DD, so lexicographic order is
        // chronological order.
        let dates: BTreeSet<&str> = self
            .transactions
            .iter()
            .map(|tx| tx.date.as_str())
            .collect();
        let start_date = *dates.first().expect("non-empty block has dates");
        let end_date = *dates.last().expect("non-empty block has dates");

        let count = self.transactions.len();
        let case_id = synthetic_case_id(&self.typology, count);

        tracing::debug!(
            typology = %self.typology,
            transactions = count,
            total = total_amount,
            "Block flushed"
        );

        Some(Event {
            timestamp: format!("{start_date}{}", constants::MIDNIGHT_SUFFIX),
            kind: EventKind::Alert(AlertDetails {
                date: start_date.to_string(),
                case_id,
                alert_type: self.typology.replace('_', "-"),
                amount: total_amount as u64,
                transaction_count: Some(count),
                period: Some(format!("{start_date} to {end_date}")),
            }),
            // Block-derived alerts have no single source line; the raw_log
            // is a synthetic description of the block.
            raw_log: format!(
                "Synthetic alert from {} block ({count} transactions)",
                self.typology
            ),
        })
    }
}

/// Parse a transaction-block trace into one summary event per non-empty
/// block.
pub fn parse_lines(lines: &[&str]) -> Vec<Event> {
    let mut events = Vec::new();
    let mut open_block: Option<BlockAccumulator> = None;

    for raw_line in lines {
        let line = raw_line.trim();

        if let Some(caps) = grammar::block_begin().captures(line) {
            // A new begin marker while a block is open flushes the previous
            // block first; blocks never nest.
            if let Some(event) = open_block.take().and_then(BlockAccumulator::summarize) {
                events.push(event);
            }
            open_block = Some(BlockAccumulator::open(&caps["typology"]));
            continue;
        }

        if grammar::block_end().is_match(line) {
            // An end marker with no open block is ignored.
            if let Some(event) = open_block.take().and_then(BlockAccumulator::summarize) {
                events.push(event);
            }
            continue;
        }

        if let Some(block) = open_block.as_mut() {
            block.collect(line);
        }
        // Lines outside any block are structural noise for this format.
    }

    // End of input with an open block flushes it; no dangling state.
    if let Some(event) = open_block.take().and_then(BlockAccumulator::summarize) {
        events.push(event);
    }

    tracing::debug!(blocks = events.len(), "Block parse complete");
    events
}

/// `YYYY/MM/DD` → `YYYY-MM-DD`, rejecting impossible calendar dates.
fn normalize_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw, "%Y/%m/%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Deterministic, human-scannable synthetic case id: prefix, the leading
/// characters of the typology, and the zero-padded transaction count. No
/// global uniqueness tracking is needed or attempted.
fn synthetic_case_id(typology: &str, count: usize) -> String {
    let initials: String = typology
        .chars()
        .take(constants::SYNTHETIC_CASE_TYPOLOGY_CHARS)
        .collect();
    format!(
        "{}{initials}{count:0width$}",
        constants::SYNTHETIC_CASE_PREFIX,
        width = constants::SYNTHETIC_CASE_COUNT_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, amount: &str) -> String {
        format!("{date} 10:32,acct-77,acct-13,9,transfer,{amount},USD")
    }

    fn alert_details(event: &Event) -> &AlertDetails {
        match &event.kind {
            EventKind::Alert(d) => d,
            other => panic!("expected alert, got {other:?}"),
        }
    }

    #[test]
    fn test_block_summarises_into_single_alert() {
        let lines = [
            "BEGIN LAUNDERING ATTEMPT - FAN-OUT".to_string(),
            tx("2022/09/01", "100.0"),
            tx("2022/09/03", "250.0"),
            "END LAUNDERING ATTEMPT".to_string(),
        ];
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let events = parse_lines(&refs);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.timestamp, "2022-09-01 00:00:00");
        assert_eq!(
            event.raw_log,
            "Synthetic alert from FAN_OUT block (2 transactions)"
        );

        let d = alert_details(event);
        assert_eq!(d.date, "2022-09-01");
        assert_eq!(d.case_id, "SYNFA0002");
        assert_eq!(d.alert_type, "FAN-OUT");
        assert_eq!(d.amount, 350);
        assert_eq!(d.transaction_count, Some(2));
        assert_eq!(d.period.as_deref(), Some("2022-09-01 to 2022-09-03"));
    }

    #[test]
    fn test_fractional_total_is_truncated_not_rounded() {
        let lines = [
            "BEGIN LAUNDERING ATTEMPT - CYCLE".to_string(),
            tx("2022/09/01", "100.4"),
            tx("2022/09/01", "100.5"),
            "END LAUNDERING ATTEMPT".to_string(),
        ];
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let events = parse_lines(&refs);
        // 200.9 truncates to 200.
        assert_eq!(alert_details(&events[0]).amount, 200);
    }

    #[test]
    fn test_unterminated_block_flushes_at_end_of_input() {
        let lines = [
            "BEGIN LAUNDERING ATTEMPT - GATHER-SCATTER".to_string(),
            tx("2022/10/10", "42.0"),
        ];
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let events = parse_lines(&refs);
        assert_eq!(events.len(), 1);
        assert_eq!(alert_details(&events[0]).case_id, "SYNGA0001");
    }

    #[test]
    fn test_new_begin_marker_flushes_open_block() {
        let lines = [
            "BEGIN LAUNDERING ATTEMPT - FAN-OUT".to_string(),
            tx("2022/09/01", "100.0"),
            "BEGIN LAUNDERING ATTEMPT - CYCLE".to_string(),
            tx("2022/09/05", "50.0"),
            "END LAUNDERING ATTEMPT".to_string(),
        ];
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let events = parse_lines(&refs);

        assert_eq!(events.len(), 2);
        assert_eq!(alert_details(&events[0]).alert_type, "FAN-OUT");
        assert_eq!(alert_details(&events[1]).alert_type, "CYCLE");
    }

    #[test]
    fn test_empty_block_produces_no_event() {
        let lines = [
            "BEGIN LAUNDERING ATTEMPT - FAN-IN",
            "no transactions here",
            "END LAUNDERING ATTEMPT",
        ];
        assert!(parse_lines(&lines).is_empty());
    }

    #[test]
    fn test_malformed_transaction_lines_are_silently_skipped() {
        let lines = [
            "BEGIN LAUNDERING ATTEMPT - CYCLE".to_string(),
            tx("2022/09/01", "100.0"),
            "2022/09/02 balance check".to_string(), // wrong shape
            tx("2022/13/40", "10.0"),               // impossible date
            "END LAUNDERING ATTEMPT".to_string(),
        ];
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let events = parse_lines(&refs);

        assert_eq!(events.len(), 1);
        let d = alert_details(&events[0]);
        assert_eq!(d.transaction_count, Some(1));
        assert_eq!(d.amount, 100);
    }

    #[test]
    fn test_lines_outside_blocks_are_ignored() {
        let lines = [
            tx("2022/09/01", "999.0"), // before any block
            "BEGIN LAUNDERING ATTEMPT - FAN-OUT".to_string(),
            tx("2022/09/02", "10.0"),
            "END LAUNDERING ATTEMPT".to_string(),
            tx("2022/09/03", "999.0"), // after the block closed
        ];
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let events = parse_lines(&refs);
        assert_eq!(events.len(), 1);
        assert_eq!(alert_details(&events[0]).amount, 10);
    }

    #[test]
    fn test_stray_end_marker_is_ignored() {
        let lines = [
            "END LAUNDERING ATTEMPT".to_string(),
            "BEGIN LAUNDERING ATTEMPT - CYCLE".to_string(),
            tx("2022/09/01", "5.0"),
            "END LAUNDERING ATTEMPT".to_string(),
        ];
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        assert_eq!(parse_lines(&refs).len(), 1);
    }

    #[test]
    fn test_period_collapses_for_single_date_block() {
        let lines = [
            "BEGIN LAUNDERING ATTEMPT - CYCLE".to_string(),
            tx("2022/09/01", "10.0"),
            tx("2022/09/01", "20.0"),
            "END LAUNDERING ATTEMPT".to_string(),
        ];
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let events = parse_lines(&refs);
        let d = alert_details(&events[0]);
        assert_eq!(d.period.as_deref(), Some("2022-09-01 to 2022-09-01"));
        assert_eq!(d.case_id, "SYNCY0002");
    }
}
