//! Run summary data model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome classes reported by the test runner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Total,
    Passing,
    Failing,
    Pending,
    Skipped,
}

impl Category {
    /// All categories, in the order the runner reports them.
    pub const ALL: [Category; 5] = [
        Category::Total,
        Category::Passing,
        Category::Failing,
        Category::Pending,
        Category::Skipped,
    ];

    /// Token that precedes this category's count in the runner output.
    ///
    /// The runner prints the grand total as `Tests:`.
    pub fn marker(&self) -> &'static str {
        match self {
            Category::Total => "Tests",
            Category::Passing => "Passing",
            Category::Failing => "Failing",
            Category::Pending => "Pending",
            Category::Skipped => "Skipped",
        }
    }
}

/// Structured tally of test outcomes parsed from one run's captured output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// True when the run selected zero spec files.
    pub no_tests_found: bool,

    /// Per-category totals, summed across every count block in the output.
    pub counts: BTreeMap<Category, u64>,

    /// Elapsed time as printed by the runner. `Some` iff tests actually ran.
    pub duration: Option<String>,
}

impl RunSummary {
    /// Summary for a run that selected no spec files.
    pub fn no_tests() -> Self {
        Self {
            no_tests_found: true,
            counts: BTreeMap::new(),
            duration: None,
        }
    }

    /// Summary for a run that executed tests.
    pub fn new(counts: BTreeMap<Category, u64>, duration: String) -> Self {
        Self {
            no_tests_found: false,
            counts,
            duration: Some(duration),
        }
    }

    /// Count for a category, zero when the category never appeared.
    pub fn count(&self, category: Category) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }
}
