//! # Example Resolver
//!
//! Maps a named example to the definition it must conform to. The mapping
//! is declared data: an ordered [`RouteTable`] of (family, name pattern,
//! definition) rows evaluated first-match-wins. New families and example
//! naming schemes are added by configuration, not code.
//!
//! An example no route matches is illustrative prose, not a fixture, and is
//! skipped without a finding.
//!
//! ```yaml
//! routes:
//!   - family: delegate_payment
//!     pattern: { prefix: delegate_payment_error_ }
//!     definition: Error
//! ```

use acp_core::SpecFamily;
use serde::{Deserialize, Serialize};

/// How an example name is matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// The name equals this string exactly.
    Equals(String),
    /// The name starts with this string.
    Prefix(String),
    /// The name contains every `all` substring and none of the `none`
    /// substrings.
    Contains {
        /// Substrings that must all occur.
        #[serde(default)]
        all: Vec<String>,
        /// Substrings that must not occur.
        #[serde(default)]
        none: Vec<String>,
    },
}

impl Pattern {
    /// `contains` pattern helper.
    pub fn contains(all: &[&str], none: &[&str]) -> Self {
        Self::Contains {
            all: all.iter().map(|s| (*s).to_string()).collect(),
            none: none.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Whether `name` matches.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Equals(expected) => name == expected,
            Self::Prefix(prefix) => name.starts_with(prefix.as_str()),
            Self::Contains { all, none } => {
                all.iter().all(|s| name.contains(s.as_str()))
                    && !none.iter().any(|s| name.contains(s.as_str()))
            }
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Family whose example set the row applies to.
    pub family: SpecFamily,
    /// Example-name pattern, written as a one-key map such as
    /// `{ prefix: order_ }`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub pattern: Pattern,
    /// Target definition in the family's `$defs`.
    pub definition: String,
}

impl Route {
    /// A route row.
    pub fn new(family: SpecFamily, pattern: Pattern, definition: impl Into<String>) -> Self {
        Self {
            family,
            pattern,
            definition: definition.into(),
        }
    }
}

/// Ordered route rows, first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// A table from rows, in evaluation order.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The rows for the checkout and delegated-payment families.
    pub fn builtin() -> Self {
        let mut routes = Vec::new();
        if let Ok(checkout) = SpecFamily::new("agentic_checkout") {
            routes.extend([
                Route::new(
                    checkout.clone(),
                    Pattern::Equals("complete_checkout_session_response".into()),
                    "CheckoutSessionWithOrder",
                ),
                Route::new(
                    checkout.clone(),
                    Pattern::contains(&["checkout_session"], &["request"]),
                    "CheckoutSession",
                ),
                Route::new(
                    checkout.clone(),
                    Pattern::contains(&["create", "request"], &[]),
                    "CheckoutSessionCreateRequest",
                ),
                Route::new(
                    checkout,
                    Pattern::contains(&["complete", "request"], &[]),
                    "CheckoutSessionCompleteRequest",
                ),
            ]);
        }
        if let Ok(delegate) = SpecFamily::new("delegate_payment") {
            routes.extend([
                Route::new(
                    delegate.clone(),
                    Pattern::Equals("delegate_payment_request".into()),
                    "DelegatePaymentRequest",
                ),
                Route::new(
                    delegate.clone(),
                    Pattern::Equals("delegate_payment_success_response".into()),
                    "DelegatePaymentResponse",
                ),
                Route::new(delegate, Pattern::Prefix("delegate_payment_error_".into()), "Error"),
            ]);
        }
        Self { routes }
    }

    /// Rows in evaluation order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The definition `example` in `family` must conform to, if any row
    /// matches.
    pub fn resolve(&self, family: &SpecFamily, example: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|route| &route.family == family && route.pattern.matches(example))
            .map(|route| route.definition.as_str())
    }
}
