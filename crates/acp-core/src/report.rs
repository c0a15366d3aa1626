//! # Run Report
//!
//! Two append-only lists, errors and warnings, accumulated across every rule
//! of one run. The [`Outcome`] is derived, never stored:
//!
//! | errors | warnings | outcome |
//! |--------|----------|---------|
//! | 0 | 0 | [`Outcome::Pass`] |
//! | 0 | ≥1 | [`Outcome::PassWithWarnings`] |
//! | ≥1 | any | [`Outcome::Fail`] |

use serde::Serialize;

use crate::finding::{Finding, Severity};

/// Process-level result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No findings at all.
    Pass,
    /// Only advisory findings.
    PassWithWarnings,
    /// At least one error.
    Fail,
}

impl Outcome {
    /// Process exit code: `1` on failure, `0` otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Pass | Self::PassWithWarnings => 0,
            Self::Fail => 1,
        }
    }
}

/// Accumulated findings of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
    /// Severity of each finding in recording order, for [`Report::findings`].
    #[serde(skip)]
    sequence: Vec<Severity>,
}

impl Report {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding to the list matching its severity.
    pub fn record(&mut self, finding: Finding) {
        self.sequence.push(finding.severity);
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
    }

    /// Errors in the order they were recorded.
    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    /// Warnings in the order they were recorded.
    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// Every finding, errors and warnings interleaved, in the order they
    /// were recorded.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> + '_ {
        let mut errors = self.errors.iter();
        let mut warnings = self.warnings.iter();
        self.sequence.iter().filter_map(move |severity| match severity {
            Severity::Error => errors.next(),
            Severity::Warning => warnings.next(),
        })
    }

    /// Number of errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Derive the run outcome. Errors dominate; warnings never block.
    pub fn outcome(&self) -> Outcome {
        if !self.errors.is_empty() {
            Outcome::Fail
        } else if !self.warnings.is_empty() {
            Outcome::PassWithWarnings
        } else {
            Outcome::Pass
        }
    }

    /// Shorthand for `self.outcome().exit_code()`.
    pub fn exit_code(&self) -> u8 {
        self.outcome().exit_code()
    }
}

impl Extend<Finding> for Report {
    fn extend<I: IntoIterator<Item = Finding>>(&mut self, iter: I) {
        for finding in iter {
            self.record(finding);
        }
    }
}

impl FromIterator<Finding> for Report {
    fn from_iter<I: IntoIterator<Item = Finding>>(iter: I) -> Self {
        let mut report = Self::new();
        report.extend(iter);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{FindingContext, RuleId};
    use proptest::prelude::*;

    fn error(msg: &str) -> Finding {
        Finding::error(RuleId::AmountType, msg, FindingContext::default())
    }

    fn warning(msg: &str) -> Finding {
        Finding::warning(RuleId::OpenApiSyntax, msg, FindingContext::default())
    }

    #[test]
    fn empty_report_passes() {
        let report = Report::new();
        assert_eq!(report.outcome(), Outcome::Pass);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn warnings_only_pass_with_warnings() {
        let report: Report = vec![warning("a"), warning("b")].into_iter().collect();
        assert_eq!(report.outcome(), Outcome::PassWithWarnings);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.warning_count(), 2);
    }

    #[test]
    fn any_error_fails() {
        let report: Report = vec![warning("a"), error("b")].into_iter().collect();
        assert_eq!(report.outcome(), Outcome::Fail);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn record_preserves_order_per_severity() {
        let mut report = Report::new();
        report.record(error("first"));
        report.record(warning("w"));
        report.record(error("second"));
        let messages: Vec<&str> = report.errors().iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
        assert_eq!(report.warnings()[0].message, "w");
    }

    #[test]
    fn findings_interleave_in_recording_order() {
        let report: Report = vec![warning("w1"), error("e1"), warning("w2"), error("e2")]
            .into_iter()
            .collect();
        let messages: Vec<&str> = report.findings().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, ["w1", "e1", "w2", "e2"]);
    }

    #[test]
    fn outcome_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Outcome::PassWithWarnings).unwrap(),
            "\"pass_with_warnings\""
        );
    }

    proptest! {
        /// Exit code is 1 iff at least one error was recorded.
        #[test]
        fn exit_code_iff_errors(severities in prop::collection::vec(any::<bool>(), 0..32)) {
            let report: Report = severities
                .iter()
                .map(|is_error| if *is_error { error("e") } else { warning("w") })
                .collect();
            let has_error = severities.iter().any(|e| *e);
            prop_assert_eq!(report.exit_code() == 1, has_error);
            prop_assert_eq!(report.error_count() + report.warning_count(), severities.len());
        }
    }
}
