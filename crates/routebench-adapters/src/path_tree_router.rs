//! [`path_tree`] adapter.

use http::Method;
use path_tree::PathTree;
use routebench_core::{
    single_route, DispatchOutcome, DispatchableHandler, HandlerBehavior, HarnessResult,
    MethodTable, PlaceholderSyntax, ResponseSink, RouteTable, RouterAdapter, SyntheticRequest,
    Verb, ECHO_PARAM,
};

use crate::{load, NativeRouter};

/// Adapter for the `path-tree` crate.
#[derive(Debug, Clone, Copy)]
pub struct PathTreeAdapter {
    behavior: HandlerBehavior,
}

impl PathTreeAdapter {
    /// Adapter name.
    pub const NAME: &'static str = "path-tree";

    /// Creates the adapter. Table builds attach `behavior` to every route.
    #[must_use]
    pub fn new(behavior: HandlerBehavior) -> Self {
        Self { behavior }
    }
}

impl RouterAdapter for PathTreeAdapter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn syntax(&self) -> PlaceholderSyntax {
        PlaceholderSyntax::Colon
    }

    fn behavior(&self) -> HandlerBehavior {
        self.behavior
    }

    fn build(&self, table: &RouteTable) -> HarnessResult<Box<dyn DispatchableHandler>> {
        load::<PathTreeRouter>(self, table, self.behavior)
    }

    fn build_single(
        &self,
        method: &Method,
        template: &str,
        behavior: HandlerBehavior,
    ) -> HarnessResult<Box<dyn DispatchableHandler>> {
        let route = single_route(method, template)?;
        load::<PathTreeRouter>(self, [&route], behavior)
    }
}

#[derive(Default)]
struct PathTreeRouter {
    routes: MethodTable<PathTree<HandlerBehavior>>,
}

impl NativeRouter for PathTreeRouter {
    fn insert(&mut self, verb: Verb, path: &str, behavior: HandlerBehavior) -> HarnessResult<()> {
        // path-tree never reports a conflict; duplicates are caught in `load`.
        let _ = self
            .routes
            .get_or_insert_with(verb, PathTree::new)
            .insert(path, behavior);
        Ok(())
    }
}

impl DispatchableHandler for PathTreeRouter {
    fn serve(&self, request: &SyntheticRequest, sink: &mut dyn ResponseSink) -> DispatchOutcome {
        let Some(tree) = self.routes.get(request.method()) else {
            return DispatchOutcome::not_found(sink);
        };

        match tree.find(request.path()) {
            Some((behavior, path)) => {
                behavior.respond(request, sink, || {
                    path.params()
                        .into_iter()
                        .find(|(name, _)| *name == ECHO_PARAM)
                        .map(|(_, value)| value)
                });
                DispatchOutcome::Matched
            }
            None => DispatchOutcome::not_found(sink),
        }
    }
}
