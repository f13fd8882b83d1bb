//! One-time harness initialization.
//!
//! Everything a benchmark binary needs before its first router is built:
//! loaded configuration, the installed logging subscriber, the resolved
//! selection, and the adapter set carrying the configured handler behavior.

use std::path::PathBuf;
use std::sync::OnceLock;

use routebench_adapters as adapters;
use routebench_config::{ConfigLoader, HarnessConfig};
use routebench_core::tables::{Api, PARAM_CASES};
use routebench_core::{HandlerBehavior, RouterAdapter};

use crate::alloc::DefaultSampler;
use crate::driver::Driver;
use crate::error::{BenchError, BenchResult};
use crate::probe::MemoryProbe;
use crate::selection::BenchSelection;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "ROUTEBENCH_CONFIG";

/// Configuration file read when [`CONFIG_PATH_VAR`] is unset, if present.
pub const DEFAULT_CONFIG_FILE: &str = "routebench.toml";

/// Prefix of `ROUTEBENCH__SECTION__KEY` overrides.
pub const ENV_PREFIX: &str = "ROUTEBENCH";

static GLOBAL: OnceLock<Harness> = OnceLock::new();

/// Initialized harness state.
pub struct Harness {
    config: HarnessConfig,
    selection: BenchSelection,
    adapters: Vec<Box<dyn RouterAdapter>>,
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("config", &self.config)
            .field("selection", &self.selection.pattern())
            .field("adapters", &self.adapter_names())
            .finish()
    }
}

impl Harness {
    /// Builds harness state without touching process-global state.
    ///
    /// `args` are criterion's arguments, without the program name.
    pub fn new<I, S>(config: HarnessConfig, args: I) -> BenchResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selection = BenchSelection::resolve(config.harness.selection.as_deref(), args)?;
        let adapters = adapters::select(&config.harness.adapters, config.harness.handler)?;

        Ok(Self {
            config,
            selection,
            adapters,
        })
    }

    /// Builds harness state, installs the logging subscriber, and warns if
    /// the selection matches nothing.
    pub fn initialize<I, S>(config: HarnessConfig, args: I) -> BenchResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        routebench_telemetry::init_logging(&config.logging.to_log_config())?;

        let harness = Self::new(config, args)?;
        let ids = harness.benchmark_ids();
        harness.selection.warn_if_unmatched(ids.iter().map(String::as_str));

        tracing::info!(
            handler = %harness.behavior(),
            adapters = ?harness.adapter_names(),
            selection = harness.selection.pattern().unwrap_or(""),
            probe = harness.config.probe.enabled,
            "harness initialized"
        );
        Ok(harness)
    }

    /// Loads configuration from the file, `.env` and the environment, then
    /// initializes from the process arguments.
    pub fn from_env() -> BenchResult<Self> {
        let loader = ConfigLoader::new().with_dotenv()?;
        let loader = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => loader.with_file(PathBuf::from(path))?,
            None => loader.with_optional_file(DEFAULT_CONFIG_FILE)?,
        };
        let config = loader.with_env_prefix(ENV_PREFIX).load()?;

        Self::initialize(config, std::env::args().skip(1))
    }

    /// Process-wide harness, initialized from the environment on first use.
    ///
    /// Exits the process if initialization fails.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::from_env().unwrap_or_else(|err| fatal(&err)))
    }

    /// Loaded configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Resolved benchmark selection.
    pub fn selection(&self) -> &BenchSelection {
        &self.selection
    }

    /// Adapters to measure, in report order.
    pub fn adapters(&self) -> &[Box<dyn RouterAdapter>] {
        &self.adapters
    }

    /// Names of the adapters to measure.
    pub fn adapter_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|adapter| adapter.name()).collect()
    }

    /// Handler behavior attached to table builds.
    pub fn behavior(&self) -> HandlerBehavior {
        self.config.harness.handler
    }

    /// Benchmark driver bound to this harness.
    pub fn driver(&self) -> Driver<'_> {
        Driver::new(&self.selection, &self.config.driver)
    }

    /// Memory probe bound to this harness.
    pub fn probe(&self) -> MemoryProbe<'_, DefaultSampler> {
        MemoryProbe::new(&self.selection, &self.config.probe, DefaultSampler::default())
    }

    /// Every benchmark id the bench binary can register for these adapters.
    pub fn benchmark_ids(&self) -> Vec<String> {
        let cases = PARAM_CASES
            .iter()
            .map(|case| case.name.to_string())
            .chain(Api::ALL.iter().map(|api| table_case(*api)))
            .chain(
                Api::ALL
                    .iter()
                    .flat_map(|api| api.samples().iter().map(|sample| sample.name.to_string())),
            )
            .collect::<Vec<_>>();

        cases
            .iter()
            .flat_map(|case| {
                self.adapters
                    .iter()
                    .map(move |adapter| format!("{case}/{}", adapter.name()))
            })
            .collect()
    }
}

/// Case name of the full-table benchmark and memory probe for `api`.
pub fn table_case(api: Api) -> String {
    format!("{}_all", api.name())
}

/// Logs `err` and exits with status 2.
pub fn fatal(err: &BenchError) -> ! {
    tracing::error!(error = %err, "routebench cannot run");
    eprintln!("routebench: {err}");
    std::process::exit(2)
}

#[cfg(test)]
mod tests {
    use routebench_core::HarnessError;

    use super::*;

    const NO_ARGS: [&str; 0] = [];

    #[test]
    fn test_new_defaults() {
        let harness = Harness::new(HarnessConfig::default(), NO_ARGS).unwrap();
        assert_eq!(harness.adapter_names(), adapters::ADAPTER_NAMES.to_vec());
        assert_eq!(harness.behavior(), HandlerBehavior::Noop);
        assert!(harness.selection().pattern().is_none());
    }

    #[test]
    fn test_behavior_threaded_into_adapters() {
        let mut config = HarnessConfig::default();
        config.harness.handler = HandlerBehavior::EchoUri;
        let harness = Harness::new(config, NO_ARGS).unwrap();

        assert!(harness
            .adapters()
            .iter()
            .all(|adapter| adapter.behavior() == HandlerBehavior::EchoUri));
    }

    #[test]
    fn test_adapter_filter() {
        let mut config = HarnessConfig::default();
        config.harness.adapters = vec!["path-tree".to_string()];
        let harness = Harness::new(config, NO_ARGS).unwrap();
        assert_eq!(harness.adapter_names(), vec!["path-tree"]);
    }

    #[test]
    fn test_unknown_adapter() {
        let mut config = HarnessConfig::default();
        config.harness.adapters = vec!["gorilla".to_string()];
        let err = Harness::new(config, NO_ARGS).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Harness(HarnessError::UnknownAdapter { ref name }) if name == "gorilla"
        ));
    }

    #[test]
    fn test_selection_from_args() {
        let harness = Harness::new(HarnessConfig::default(), ["--bench", "^parse"]).unwrap();
        assert_eq!(harness.selection().pattern(), Some("^parse"));
    }

    #[test]
    fn test_invalid_selection_from_args() {
        let err = Harness::new(HarnessConfig::default(), ["--bench", "parse("]).unwrap_err();
        assert!(matches!(err, BenchError::Harness(HarnessError::InvalidSelection { .. })));
    }

    #[test]
    fn test_benchmark_ids() {
        let mut config = HarnessConfig::default();
        config.harness.adapters = vec!["matchit".to_string()];
        let harness = Harness::new(config, NO_ARGS).unwrap();
        let ids = harness.benchmark_ids();

        assert!(ids.contains(&"param/matchit".to_string()));
        assert!(ids.contains(&"param_write/matchit".to_string()));
        assert!(ids.contains(&"github_all/matchit".to_string()));
        assert!(ids.contains(&"gplus_2params/matchit".to_string()));
        assert!(ids.iter().all(|id| id.ends_with("/matchit")));
    }

    #[test]
    fn test_table_case() {
        assert_eq!(table_case(Api::Static), "static_all");
        assert_eq!(table_case(Api::GitHub), "github_all");
    }
}
