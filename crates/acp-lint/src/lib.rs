#![deny(missing_docs)]

//! # acp-lint — Consistency Engine
//!
//! Checks a multi-version ACP spec corpus for cross-artifact consistency and
//! authoring policy, and checks pull-request descriptions against the
//! repository templates.
//!
//! ## Configuration (`config`, `resolver`)
//!
//! [`LintConfig`] carries the known versions, the unreleased head, the
//! prohibited-definition table, the monetary field names and the example
//! [`RouteTable`]. The route table is data: a new family or example naming
//! scheme is a new row, not new code.
//!
//! ## Rules (`rules`)
//!
//! Each [`Rule`] is a pure function from a [`CorpusSnapshot`] and the
//! configuration to a list of findings:
//!
//! | Rule | Scope | Severity |
//! |------|-------|----------|
//! | JSON Schema syntax | every version | error / warning when absent |
//! | OpenAPI syntax | every version | error / warning when absent |
//! | Prohibited definitions | every version | error |
//! | Amount typing | every version, both artifact kinds | error |
//! | Field descriptions | unreleased | error |
//! | Model examples | unreleased | error |
//! | OpenAPI descriptions | unreleased | error |
//! | OpenAPI examples | unreleased | error |
//! | Example conformance | every version | error |
//! | Required consistency | every version | warning |
//!
//! ## Engine (`engine`)
//!
//! [`Linter`] folds rule output into a [`Report`](acp_core::Report);
//! [`lint_corpus`] adds configuration validation and corpus loading.
//!
//! ## PR Descriptions (`pr`)
//!
//! [`check_pull_request`] detects the template a description follows and
//! lists every problem with its title, headings and section content.
//!
//! [`CorpusSnapshot`]: acp_schema::CorpusSnapshot

pub mod config;
pub mod engine;
pub mod pr;
pub mod resolver;
pub mod rules;

pub use config::{ConfigError, LintConfig, DEFAULT_AMOUNT_FIELDS, DEFAULT_VERSIONS};
pub use engine::{lint_corpus, Linter};
pub use pr::{check_pull_request, PrCheck, PrProblem, PrTemplate, MIN_TITLE_LENGTH};
pub use resolver::{Pattern, Route, RouteTable};
pub use rules::Rule;
