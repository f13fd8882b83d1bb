//! routebench entry point.
//!
//! The measurements run under criterion, not from this binary.

fn main() {
    eprintln!(
        r"routebench {} - comparative HTTP router benchmarks

This binary does not run benchmarks. Use:

    cargo bench -p routebench --bench routers [-- <FILTER>]

FILTER is a regex over benchmark ids such as `param5/matchit` or
`github_all/path-tree`. It also selects which memory probes run.

ENVIRONMENT VARIABLES:
    ROUTEBENCH_CONFIG                     Configuration file (default: routebench.toml)
    ROUTEBENCH__HARNESS__HANDLER          noop | echo_uri | echo_param
    ROUTEBENCH__HARNESS__ADAPTERS         Comma-separated adapter names
    ROUTEBENCH__PROBE__ENABLED            Enable memory probes (true/false)
    ROUTEBENCH__LOGGING__LEVEL            Log filter (e.g. info, routebench=debug)",
        routebench::VERSION
    );
    std::process::exit(1);
}
