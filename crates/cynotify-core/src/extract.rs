//! Run-output extraction.
//!
//! Turns the captured stdout of a test run into a [`RunSummary`].

use crate::error::NotifyError;
use crate::summary::{Category, RunSummary};
use crate::Result;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Marker printed by the runner when zero spec files matched.
const NO_SPECS_MARKER: &str = "no spec files were found";

/// Parse a captured run-output file.
pub fn parse_run_file(path: &Path) -> Result<RunSummary> {
    let text = std::fs::read_to_string(path)?;
    parse_run_output(&text)
}

/// Parse the full text of a run's captured output.
///
/// Returns [`NotifyError::DurationMissing`] when tests ran but the
/// summary line carries no elapsed-time token; that output is malformed
/// and there is no sensible fallback value.
pub fn parse_run_output(text: &str) -> Result<RunSummary> {
    if text.contains(NO_SPECS_MARKER) {
        debug!("run selected no spec files");
        return Ok(RunSummary::no_tests());
    }

    let mut counts = BTreeMap::new();
    for category in Category::ALL {
        counts.insert(category, sum_category(text, category));
    }

    let duration = extract_duration(text).ok_or(NotifyError::DurationMissing)?;
    debug!("parsed counts {:?}, duration {}", counts, duration);

    Ok(RunSummary::new(counts, duration))
}

/// Sum every `<marker>: <n>` occurrence in the text.
///
/// The runner prints one count block per spec section; a run reporting in
/// several sections is totalled across all of them, not last-wins.
fn sum_category(text: &str, category: Category) -> u64 {
    let re = Regex::new(&format!(r"{}:\s+(\d+)", category.marker())).expect("valid count pattern");
    re.captures_iter(text)
        .filter_map(|caps| caps[1].parse::<u64>().ok())
        .sum()
}

/// Pull the elapsed-time token off the run's summary line.
///
/// The summary line opens with either the all-passed sentinel or an
/// `N of M failed` sentinel and carries the elapsed time as `MM:SS` or
/// `<n>ms`. The first match wins.
fn extract_duration(text: &str) -> Option<String> {
    let re = Regex::new(r"(?:All specs passed!|\d+ of \d+ failed[^\n]*?)\s+(\d+:\d+|\d+ms)")
        .expect("valid duration pattern");
    re.captures(text).map(|caps| caps[1].to_string())
}
