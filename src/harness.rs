//! A named-test registry with recorded assertions and a printable summary.
//!
//! The harness is a consumer-side collaborator: it runs registered callables,
//! records per-assertion pass/fail instead of panicking, and reports counts
//! plus a human-readable summary.
//!
//! # Example
//!
//! ```
//! use splitline::harness::Harness;
//!
//! let mut harness = Harness::new();
//! harness.register("arithmetic", |check| {
//!     check.assert_eq(2 + 2, 4, "addition should work");
//!     check.assert_less(1, 2, "one is less than two");
//! });
//! let report = harness.run_all();
//! assert_eq!(report.passed(), report.executed());
//! println!("{}", report.summary());
//! ```

use std::fmt;

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Per-case assertion recorder handed to each registered callable.
///
/// Failed assertions are recorded with their message; execution continues so
/// one case can report several failures.
#[derive(Debug, Default)]
pub struct Check {
    assertions: usize,
    failures: Vec<String>,
}

impl Check {
    fn record(&mut self, passed: bool, message: &str) {
        self.assertions += 1;
        if !passed {
            self.failures.push(message.to_owned());
        }
    }

    /// Assert that `condition` holds.
    pub fn assert_true(&mut self, condition: bool, message: &str) {
        self.record(condition, message);
    }

    /// Assert that `condition` does not hold.
    pub fn assert_false(&mut self, condition: bool, message: &str) {
        self.record(!condition, message);
    }

    /// Assert that two values are equal.
    pub fn assert_eq<T: PartialEq>(&mut self, lhs: T, rhs: T, message: &str) {
        self.record(lhs == rhs, message);
    }

    /// Assert strict less-than.
    pub fn assert_less<T: PartialOrd>(&mut self, lhs: T, rhs: T, message: &str) {
        self.record(lhs < rhs, message);
    }

    /// Assert less-than-or-equal.
    pub fn assert_leq<T: PartialOrd>(&mut self, lhs: T, rhs: T, message: &str) {
        self.record(lhs <= rhs, message);
    }

    /// Assert strict greater-than.
    pub fn assert_greater<T: PartialOrd>(&mut self, lhs: T, rhs: T, message: &str) {
        self.record(lhs > rhs, message);
    }

    /// Assert greater-than-or-equal.
    pub fn assert_geq<T: PartialOrd>(&mut self, lhs: T, rhs: T, message: &str) {
        self.record(lhs >= rhs, message);
    }

    /// True iff no assertion has failed so far.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

type TestFn = Box<dyn FnMut(&mut Check)>;

/// A registry of named test cases.
pub struct Harness {
    cases: Vec<(String, TestFn)>,
}

impl Harness {
    /// An empty registry.
    pub fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Register a named case. Cases run in registration order.
    pub fn register<F>(&mut self, name: &str, case: F)
    where
        F: FnMut(&mut Check) + 'static,
    {
        self.cases.push((name.to_owned(), Box::new(case)));
    }

    /// The number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True iff no cases are registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Run every registered case, capturing pass/fail per assertion.
    pub fn run_all(&mut self) -> HarnessReport {
        let mut outcomes = Vec::with_capacity(self.cases.len());
        for (name, case) in &mut self.cases {
            let mut check = Check::default();
            case(&mut check);
            outcomes.push(CaseOutcome {
                name: name.clone(),
                passed: check.passed(),
                assertions: check.assertions,
                failures: check.failures,
            });
        }
        HarnessReport { outcomes }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Harness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.cases.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("Harness").field("cases", &names).finish()
    }
}

/// The outcome of one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// The name the case was registered under.
    pub name: String,
    /// True iff every assertion in the case held.
    pub passed: bool,
    /// How many assertions the case made.
    pub assertions: usize,
    /// Messages of the assertions that failed, in execution order.
    pub failures: Vec<String>,
}

/// The outcomes of one full harness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessReport {
    /// Per-case outcomes in execution order.
    pub outcomes: Vec<CaseOutcome>,
}

impl HarnessReport {
    /// The number of cases executed.
    pub fn executed(&self) -> usize {
        self.outcomes.len()
    }

    /// The number of cases whose assertions all held.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Human-readable summary with ANSI colors.
    pub fn summary(&self) -> String {
        let mut output = String::new();
        let sep = "\u{2500}".repeat(62);

        output.push_str("splitline harness\n");
        output.push_str(&sep);
        output.push('\n');

        for outcome in &self.outcomes {
            let marker = if outcome.passed {
                "\u{2713}".green().bold()
            } else {
                "\u{2717}".red().bold()
            };
            output.push_str(&format!(
                "  {} {} ({} assertions)\n",
                marker, outcome.name, outcome.assertions
            ));
            for failure in &outcome.failures {
                output.push_str(&format!("      {}\n", failure.red()));
            }
        }

        output.push_str(&sep);
        output.push('\n');
        output.push_str(&format!(
            "Passed {} out of {} tests.\n",
            self.passed(),
            self.executed()
        ));
        output
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (should not happen for
    /// `HarnessReport`).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (should not happen for
    /// `HarnessReport`).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for HarnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
