//! [`matchit`] adapter.
//!
//! matchit spells placeholders `{name}` and has no notion of methods, so the
//! adapter keeps one `matchit::Router` per verb.

use http::Method;
use routebench_core::{
    single_route, DispatchOutcome, DispatchableHandler, HandlerBehavior, HarnessError,
    HarnessResult, MethodTable, PlaceholderSyntax, ResponseSink, RouteTable, RouterAdapter,
    SyntheticRequest, Verb, ECHO_PARAM,
};

use crate::{load, NativeRouter};

/// Adapter for the `matchit` crate.
#[derive(Debug, Clone, Copy)]
pub struct MatchitAdapter {
    behavior: HandlerBehavior,
}

impl MatchitAdapter {
    /// Adapter name.
    pub const NAME: &'static str = "matchit";

    /// Creates the adapter. Table builds attach `behavior` to every route.
    #[must_use]
    pub fn new(behavior: HandlerBehavior) -> Self {
        Self { behavior }
    }
}

impl RouterAdapter for MatchitAdapter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn syntax(&self) -> PlaceholderSyntax {
        PlaceholderSyntax::Brace
    }

    fn behavior(&self) -> HandlerBehavior {
        self.behavior
    }

    fn build(&self, table: &RouteTable) -> HarnessResult<Box<dyn DispatchableHandler>> {
        load::<MatchitRouter>(self, table, self.behavior)
    }

    fn build_single(
        &self,
        method: &Method,
        template: &str,
        behavior: HandlerBehavior,
    ) -> HarnessResult<Box<dyn DispatchableHandler>> {
        let route = single_route(method, template)?;
        load::<MatchitRouter>(self, [&route], behavior)
    }
}

#[derive(Default)]
struct MatchitRouter {
    routes: MethodTable<matchit::Router<HandlerBehavior>>,
}

impl NativeRouter for MatchitRouter {
    fn insert(&mut self, verb: Verb, path: &str, behavior: HandlerBehavior) -> HarnessResult<()> {
        self.routes
            .get_or_insert_with(verb, matchit::Router::new)
            .insert(path, behavior)
            .map_err(|e| HarnessError::registration(MatchitAdapter::NAME, path, e))
    }
}

impl DispatchableHandler for MatchitRouter {
    fn serve(&self, request: &SyntheticRequest, sink: &mut dyn ResponseSink) -> DispatchOutcome {
        let Some(router) = self.routes.get(request.method()) else {
            return DispatchOutcome::not_found(sink);
        };

        match router.at(request.path()) {
            Ok(matched) => {
                matched
                    .value
                    .respond(request, sink, || matched.params.get(ECHO_PARAM));
                DispatchOutcome::Matched
            }
            Err(_) => DispatchOutcome::not_found(sink),
        }
    }
}
