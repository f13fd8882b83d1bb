//! Error types for routebench.
//!
//! Every failure the harness can hit before a benchmark starts timing is a
//! [`HarnessError`]. None of them are recoverable: a benchmark that would run
//! against a misconfigured router must not run at all.

use thiserror::Error;

/// Result type alias using [`HarnessError`].
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors raised while preparing routers for measurement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// A route or single registration used a method outside the supported verbs.
    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod {
        /// The rejected method string.
        method: String,
    },

    /// A path template could not be parsed or expressed in a target syntax.
    #[error("invalid path template `{template}`: {reason}")]
    InvalidTemplate {
        /// The offending template.
        template: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A rewritten template does not carry the placeholders of its source.
    #[error(
        "template translation mismatch for `{template}`: rendered `{rendered}` \
         has {found} placeholder(s), expected {expected}"
    )]
    TemplateMismatch {
        /// The source template.
        template: String,
        /// The rewritten template.
        rendered: String,
        /// Placeholders in the source.
        expected: usize,
        /// Placeholders recovered from the rewrite.
        found: usize,
    },

    /// A router was asked to build from a table with no routes.
    #[error("route table `{table}` is empty")]
    EmptyRouteTable {
        /// Name of the table.
        table: String,
    },

    /// The router library refused a route.
    #[error("{adapter} rejected route `{path}`: {reason}")]
    Registration {
        /// Adapter name.
        adapter: String,
        /// Native-syntax path handed to the library.
        path: String,
        /// Error reported by the library.
        reason: String,
    },

    /// A configured adapter name is not known.
    #[error("unknown router adapter: {name}")]
    UnknownAdapter {
        /// The requested name.
        name: String,
    },

    /// A handler behavior name is not known.
    #[error("unknown handler behavior `{name}`: expected 'noop', 'echo_uri' or 'echo_param'")]
    UnknownBehavior {
        /// The requested name.
        name: String,
    },

    /// The benchmark selection pattern is not a valid regular expression.
    #[error("invalid benchmark selection `{pattern}`: {reason}")]
    InvalidSelection {
        /// The pattern as supplied.
        pattern: String,
        /// Regex compile error.
        reason: String,
    },

    /// Heap statistics could not be read.
    #[error("heap statistics unavailable: {0}")]
    HeapStats(String),
}

impl HarnessError {
    /// Create a new unsupported method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create a new invalid template error.
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Create a new registration error.
    pub fn registration(
        adapter: impl Into<String>,
        path: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Registration {
            adapter: adapter.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new empty route table error.
    pub fn empty_table(table: impl Into<String>) -> Self {
        Self::EmptyRouteTable {
            table: table.into(),
        }
    }

    /// Create a new invalid selection error.
    pub fn invalid_selection(pattern: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidSelection {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }
}
