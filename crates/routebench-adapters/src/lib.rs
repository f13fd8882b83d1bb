//! Router adapters for routebench.
//!
//! One module per wrapped library. Each adapter translates `:name` route
//! templates into the library's own syntax, keeps one library router per
//! verb, and maps lookup results onto [`HandlerBehavior::respond`].
//!
//! | Adapter | Crate | Syntax |
//! |---------|-------|--------|
//! | `matchit` | [`matchit`] | `{name}` |
//! | `path-tree` | [`path_tree`] | `:name` |
//! | `route-recognizer` | [`route_recognizer`] | `:name` |
//! | `routefinder` | [`routefinder`] | `:name` |
//!
//! # Example
//!
//! ```rust
//! use routebench_adapters::all;
//! use routebench_core::{tables, HandlerBehavior, RecordingTransport, SyntheticRequest};
//!
//! let table = tables::github_api().unwrap();
//! for adapter in all(HandlerBehavior::EchoUri) {
//!     let router = adapter.build(&table).unwrap();
//!     let mut sink = RecordingTransport::new();
//!     let outcome = router.serve(&SyntheticRequest::get("/user/repos"), &mut sink);
//!     assert!(outcome.is_matched(), "{}", adapter.name());
//!     assert_eq!(sink.body_str(), "/user/repos");
//! }
//! ```

mod matchit_router;
mod path_tree_router;
mod recognizer_router;
mod routefinder_router;

pub use matchit_router::MatchitAdapter;
pub use path_tree_router::PathTreeAdapter;
pub use recognizer_router::RouteRecognizerAdapter;
pub use routefinder_router::RoutefinderAdapter;

use std::collections::HashSet;

use routebench_core::{
    DispatchableHandler, HandlerBehavior, HarnessError, HarnessResult, Route, RouterAdapter, Verb,
};

/// Names of every adapter, in report order.
pub const ADAPTER_NAMES: [&str; 4] = [
    MatchitAdapter::NAME,
    PathTreeAdapter::NAME,
    RouteRecognizerAdapter::NAME,
    RoutefinderAdapter::NAME,
];

/// Returns every adapter, configured with `behavior` for table builds.
pub fn all(behavior: HandlerBehavior) -> Vec<Box<dyn RouterAdapter>> {
    vec![
        Box::new(MatchitAdapter::new(behavior)),
        Box::new(PathTreeAdapter::new(behavior)),
        Box::new(RouteRecognizerAdapter::new(behavior)),
        Box::new(RoutefinderAdapter::new(behavior)),
    ]
}

/// Returns the adapter with the given name.
pub fn by_name(name: &str, behavior: HandlerBehavior) -> HarnessResult<Box<dyn RouterAdapter>> {
    match name {
        MatchitAdapter::NAME => Ok(Box::new(MatchitAdapter::new(behavior))),
        PathTreeAdapter::NAME => Ok(Box::new(PathTreeAdapter::new(behavior))),
        RouteRecognizerAdapter::NAME => Ok(Box::new(RouteRecognizerAdapter::new(behavior))),
        RoutefinderAdapter::NAME => Ok(Box::new(RoutefinderAdapter::new(behavior))),
        _ => Err(HarnessError::UnknownAdapter {
            name: name.to_string(),
        }),
    }
}

/// Returns the named adapters, or every adapter when `names` is empty.
pub fn select<S: AsRef<str>>(
    names: &[S],
    behavior: HandlerBehavior,
) -> HarnessResult<Vec<Box<dyn RouterAdapter>>> {
    if names.is_empty() {
        return Ok(all(behavior));
    }
    names
        .iter()
        .map(|name| by_name(name.as_ref(), behavior))
        .collect()
}

/// A library router wrapped for dispatch.
trait NativeRouter: DispatchableHandler + Default + 'static {
    /// Registers one native-syntax path.
    fn insert(&mut self, verb: Verb, path: &str, behavior: HandlerBehavior) -> HarnessResult<()>;
}

/// Translates and registers `routes` into a fresh `R`.
///
/// A repeated verb and template fails with [`HarnessError::Registration`]
/// for every adapter, whether or not the library itself would notice.
fn load<'r, R: NativeRouter>(
    adapter: &dyn RouterAdapter,
    routes: impl IntoIterator<Item = &'r Route>,
    behavior: HandlerBehavior,
) -> HarnessResult<Box<dyn DispatchableHandler>> {
    let mut router = R::default();
    let mut seen: HashSet<(Verb, &str)> = HashSet::new();
    for route in routes {
        let path = adapter.translate(route)?;
        if !seen.insert((route.verb(), route.path())) {
            return Err(HarnessError::registration(
                adapter.name(),
                path,
                format!("duplicate {} route", route.verb()),
            ));
        }
        router.insert(route.verb(), &path, behavior)?;
    }
    let registered = seen.len();
    tracing::debug!(
        adapter = adapter.name(),
        routes = registered,
        behavior = %behavior,
        "router loaded"
    );
    Ok(Box::new(router))
}

#[cfg(test)]
mod tests {
    use super::*;
    use routebench_core::RouteTable;

    #[test]
    fn test_all_names_match_registry() {
        let names: Vec<_> = all(HandlerBehavior::Noop)
            .iter()
            .map(|adapter| adapter.name())
            .collect();
        assert_eq!(names, ADAPTER_NAMES.to_vec());
    }

    #[test]
    fn test_by_name() {
        for name in ADAPTER_NAMES {
            let adapter = by_name(name, HandlerBehavior::EchoUri).unwrap();
            assert_eq!(adapter.name(), name);
            assert_eq!(adapter.behavior(), HandlerBehavior::EchoUri);
        }
    }

    #[test]
    fn test_by_name_unknown() {
        let err = by_name("httprouter", HandlerBehavior::Noop).err().unwrap();
        assert!(matches!(err, HarnessError::UnknownAdapter { .. }));
    }

    #[test]
    fn test_select_empty_is_all() {
        let none: [&str; 0] = [];
        assert_eq!(select(&none, HandlerBehavior::Noop).unwrap().len(), ADAPTER_NAMES.len());
    }

    #[test]
    fn test_duplicate_route_rejected_by_every_adapter() {
        let table = RouteTable::from_pairs(
            "dup",
            &[("GET", "/users/:id"), ("POST", "/users/:id"), ("GET", "/users/:id")],
        )
        .unwrap();
        for adapter in all(HandlerBehavior::Noop) {
            let err = adapter.build(&table).err().unwrap();
            assert!(
                matches!(&err, HarnessError::Registration { adapter: name, .. } if name == adapter.name()),
                "{}: {err}",
                adapter.name()
            );
        }
    }

    #[test]
    fn test_select_subset() {
        let adapters = select(&["routefinder", "matchit"], HandlerBehavior::Noop).unwrap();
        let names: Vec<_> = adapters.iter().map(|adapter| adapter.name()).collect();
        assert_eq!(names, vec!["routefinder", "matchit"]);
        assert!(select(&["matchit", "nope"], HandlerBehavior::Noop).is_err());
    }
}
