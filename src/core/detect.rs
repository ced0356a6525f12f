// Fintrace - core/detect.rs
//
// Dual-format auto-detection.
//
// The tabular grammar is probed against a bounded prefix of the input: its
// alert lines are dense and repeat from the first line, so a 50-line sample
// is reliable and keeps detection O(1) in the file size. Block markers carry
// no such guarantee — a trace may open with thousands of untagged
// transaction lines — so the block probe scans the whole input.

use crate::core::grammar;
use crate::core::model::DetectedFormat;

/// Decide which grammar applies to the input.
///
/// Precedence is tabular first: a file that somehow contains both alert
/// lines and block markers is parsed line-by-line, which reports the marker
/// lines as unknowns instead of silently absorbing the alert lines into a
/// block accumulator.
///
/// `sample_limit` bounds the number of non-empty lines probed for the
/// tabular grammar.
pub fn detect_format(lines: &[&str], sample_limit: usize) -> DetectedFormat {
    let has_tabular = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .take(sample_limit)
        .any(|line| grammar::alert_line().is_match(line));

    let format = if has_tabular {
        DetectedFormat::Kaggle
    } else if lines
        .iter()
        .any(|line| grammar::block_begin().is_match(line.trim()))
    {
        DetectedFormat::Amlsim
    } else {
        DetectedFormat::Unknown
    };

    tracing::debug!(format = %format, lines = lines.len(), "Format detection complete");
    format
}
