// Fintrace - core/grammar.rs
//
// The two input grammars, as compiled regular expressions.
//
// Patterns are process-wide immutable state, compiled once on first use and
// shared by detection and parsing so the two can never disagree about what
// constitutes a matching line. All matching is case-insensitive; real audit
// exports are inconsistent about casing.

use regex::Regex;
use std::sync::OnceLock;

/// Compile a pattern without panicking at runtime. The patterns below are
/// exercised by the unit tests in this module, so a mistake shows up as a
/// failing test rather than a production panic.
fn re(pat: &str) -> Regex {
    Regex::new(pat).expect("grammar: invalid regex")
}

/// Tabular alert line: ordinal, date, `FC`-prefixed case id, free-text alert
/// type, the fixed cross-border detection phrase, dollar amount with
/// thousands separators.
///
/// Example:
/// `1 | 2024-01-05 | Case ID FC000123 | Structuring detected involving
///  cross-border entities, automated alert triggered. | Amount: $10,000`
pub fn alert_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        re(r"(?i)^\s*\d+\s*\|\s*(?P<date>\d{4}-\d{2}-\d{2})\s*\|\s*Case\s*ID\s+(?P<case_id>FC\d{6})\s*\|\s*(?P<alert_type>.*?)\s+detected\s+involving\s+cross-border\s+entities,\s*automated\s+alert\s+triggered\.\s*\|\s*Amount:\s*\$(?P<amount>[\d,]+)")
    })
}

/// Block begin marker: `BEGIN LAUNDERING ATTEMPT - <TYPOLOGY>`, hyphens
/// permitted inside the typology token (e.g. `FAN-OUT`).
pub fn block_begin() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| re(r"(?i)^BEGIN LAUNDERING ATTEMPT - (?P<typology>\w+(?:-\w+)*)"))
}

/// Block end marker: `END LAUNDERING ATTEMPT`.
pub fn block_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| re(r"(?i)^END LAUNDERING ATTEMPT"))
}

/// Transaction line inside a block: `YYYY/MM/DD HH:MM` followed by
/// comma-separated fields whose fifth field is the numeric amount. Only the
/// date and amount are extracted; the remaining fields are structural.
pub fn transaction_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        re(r"(?i)^(?P<date>\d{4}/\d{2}/\d{2})\s+\d{2}:\d{2},.*?,\d+,\w+,(?P<amount>[\d.]+),\w+")
    })
}
