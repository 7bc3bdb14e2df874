//! Notification rendering.
//!
//! Turns a [`RunSummary`] into the Slack message body plus the routing
//! decision that goes with it.

use crate::config::Config;
use crate::summary::{Category, RunSummary};

/// Banner that opens every notification.
const BANNER: &str = "---------- *TEST RESULTS* ----------\n";

/// Categories in render order. `Total` is aggregated but never shown.
const RENDER_ORDER: [Category; 4] = [
    Category::Passing,
    Category::Failing,
    Category::Pending,
    Category::Skipped,
];

/// A rendered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Slack-formatted message body.
    pub text: String,

    /// True when the run warrants mentioning the responsible group and
    /// posting to the failures channel.
    pub alert: bool,
}

fn category_line(category: Category, count: u64) -> String {
    match category {
        Category::Passing => format!(":large_green_circle: *{} PASSED*\n", count),
        Category::Failing => format!(":red_circle: *{} FAILED*\n", count),
        Category::Pending => format!(":heavy_minus_sign: *{} PENDING*\n", count),
        Category::Skipped => format!(":double_vertical_bar: *{} SKIPPED*\n", count),
        Category::Total => String::new(),
    }
}

/// Render a run summary into a Slack message.
///
/// Pure function: identical inputs produce byte-identical output.
pub fn render(summary: &RunSummary, config: &Config) -> Notification {
    let mut text = String::from(BANNER);
    let mut alert = false;

    if summary.no_tests_found {
        text.push_str(":interrobang: No tests were selected. Was that intended?\n");
        alert = true;
    } else {
        for category in RENDER_ORDER {
            let count = summary.count(category);
            text.push_str(&category_line(category, count));
            if category == Category::Failing && count > 0 {
                alert = true;
            }
        }
    }

    if alert {
        text.push_str(&format!(
            "\n* :x: FAILURE - There were test failures or no tests!* :x: <!subteam^{}>\n",
            config.group_id
        ));
    } else {
        text.push_str(
            "\n* :white_check_mark: SUCCESS - No unexpected failures/errors!* :white_check_mark:\n",
        );
    }

    if let Some(duration) = &summary.duration {
        text.push_str(&format!("\nTests elapsed time: *{}*.\n", duration));
    }

    text.push_str(&format!(
        "<{}|Run URL (ID: {})>",
        config.run_url(),
        config.run_id
    ));

    Notification { text, alert }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn summary_with(passing: u64, failing: u64) -> RunSummary {
        let mut counts = BTreeMap::new();
        counts.insert(Category::Total, passing + failing);
        counts.insert(Category::Passing, passing);
        counts.insert(Category::Failing, failing);
        counts.insert(Category::Pending, 0);
        counts.insert(Category::Skipped, 0);
        RunSummary::new(counts, "01:23".to_string())
    }

    #[test]
    fn test_success_message() {
        let config = Config::new("42", "ci-results", "ci-failures").with_group("S012345");
        let notification = render(&summary_with(4, 0), &config);

        assert!(!notification.alert);
        assert!(notification.text.starts_with(BANNER));
        assert!(notification.text.contains(":large_green_circle: *4 PASSED*"));
        assert!(notification.text.contains("SUCCESS - No unexpected failures/errors!"));
        assert!(!notification.text.contains("<!subteam^"));
        assert!(notification.text.contains("Tests elapsed time: *01:23*."));
        assert!(notification
            .text
            .contains("<https://github.com/your-project/actions/runs/42|Run URL (ID: 42)>"));
    }

    #[test]
    fn test_failures_set_alert_and_mention_group() {
        let config = Config::new("42", "ci-results", "ci-failures").with_group("S012345");
        let notification = render(&summary_with(2, 2), &config);

        assert!(notification.alert);
        assert!(notification.text.contains(":red_circle: *2 FAILED*"));
        assert!(notification.text.contains("FAILURE - There were test failures or no tests!"));
        assert!(notification.text.contains("<!subteam^S012345>"));
    }

    #[test]
    fn test_no_tests_found_warns_and_omits_elapsed_time() {
        let config = Config::new("42", "ci-results", "ci-failures");
        let notification = render(&RunSummary::no_tests(), &config);

        assert!(notification.alert);
        assert!(notification
            .text
            .contains(":interrobang: No tests were selected. Was that intended?"));
        assert!(!notification.text.contains("Tests elapsed time"));
        assert!(!notification.text.contains("PASSED"));
    }

    #[test]
    fn test_total_is_never_rendered() {
        let config = Config::new("42", "ci-results", "ci-failures");
        let notification = render(&summary_with(4, 0), &config);
        assert!(!notification.text.contains("Tests:"));
        assert!(!notification.text.contains("TOTAL"));
    }

    #[test]
    fn test_categories_render_in_priority_order() {
        let config = Config::new("42", "ci-results", "ci-failures");
        let text = render(&summary_with(3, 1), &config).text;

        let passed = text.find("PASSED*").expect("passed line");
        let failed = text.find("FAILED*").expect("failed line");
        let pending = text.find("PENDING*").expect("pending line");
        let skipped = text.find("SKIPPED*").expect("skipped line");
        assert!(passed < failed && failed < pending && pending < skipped);
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = Config::new("42", "ci-results", "ci-failures").with_group("S012345");
        let summary = summary_with(3, 1);
        assert_eq!(render(&summary, &config), render(&summary, &config));
    }
}
