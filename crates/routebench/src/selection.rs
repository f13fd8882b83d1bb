//! Benchmark selection.
//!
//! One pattern selects both criterion benchmarks and memory probes. It comes
//! from `harness.selection` when configured, otherwise from the filter
//! argument criterion itself receives (`cargo bench -- <filter>`), so probes
//! follow whatever the operator asked criterion to run.

use regex::Regex;
use routebench_core::{HarnessError, HarnessResult};

// Criterion flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &[
    "-b",
    "-c",
    "-s",
    "--baseline",
    "--baseline-lenient",
    "--color",
    "--confidence-level",
    "--format",
    "--load-baseline",
    "--measurement-time",
    "--noise-threshold",
    "--nresamples",
    "--output-format",
    "--plotting-backend",
    "--profile-time",
    "--sample-size",
    "--save-baseline",
    "--significance-level",
    "--warm-up-time",
];

/// Compiled selection pattern over benchmark ids.
///
/// An absent or empty pattern selects everything.
///
/// # Example
///
/// ```rust
/// use routebench::BenchSelection;
///
/// let selection = BenchSelection::new("^github").unwrap();
/// assert!(selection.matches("github_all/matchit"));
/// assert!(!selection.matches("param/matchit"));
///
/// assert!(BenchSelection::new("").unwrap().matches("anything"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BenchSelection {
    pattern: Option<Regex>,
}

impl BenchSelection {
    /// Selects every benchmark.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Compiles `pattern`. An empty pattern selects everything.
    pub fn new(pattern: &str) -> HarnessResult<Self> {
        if pattern.is_empty() {
            return Ok(Self::all());
        }
        let regex =
            Regex::new(pattern).map_err(|e| HarnessError::invalid_selection(pattern, e))?;
        Ok(Self {
            pattern: Some(regex),
        })
    }

    /// Exact-match selection, as criterion's `--exact` flag does.
    pub fn exact(id: &str) -> HarnessResult<Self> {
        Self::new(&format!("^{}$", regex::escape(id)))
    }

    /// Derives the selection from criterion's command line.
    ///
    /// The filter is the first positional argument. Values of flags that take
    /// one are skipped, and `--exact` anchors the filter.
    pub fn from_args<I, S>(args: I) -> HarnessResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let mut filter: Option<String> = None;
        let mut exact = false;

        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            if arg == "--exact" {
                exact = true;
            } else if VALUE_FLAGS.contains(&arg) {
                args.next();
            } else if arg.starts_with('-') {
                // --bench, --list, --quick and `--flag=value` forms.
            } else if filter.is_none() {
                filter = Some(arg.to_string());
            }
        }

        match filter {
            Some(filter) if exact => Self::exact(&filter),
            Some(filter) => Self::new(&filter),
            None => Ok(Self::all()),
        }
    }

    /// Configured pattern wins; otherwise the process arguments decide.
    pub fn resolve<I, S>(configured: Option<&str>, args: I) -> HarnessResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match configured {
            Some(pattern) => Self::new(pattern),
            None => Self::from_args(args),
        }
    }

    /// The pattern source, if any.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        self.pattern.as_ref().map_or(true, |re| re.is_match(id))
    }

    /// Logs a warning when the pattern selects none of `ids`.
    ///
    /// Returns whether at least one id matched.
    pub fn warn_if_unmatched<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let Some(pattern) = self.pattern() else {
            return true;
        };

        let mut known = 0usize;
        for id in ids {
            if self.matches(id) {
                return true;
            }
            known += 1;
        }

        tracing::warn!(
            selection = pattern,
            known_benchmarks = known,
            "selection matches no benchmark; nothing will be measured"
        );
        false
    }
}
