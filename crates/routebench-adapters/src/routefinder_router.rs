//! [`routefinder`] adapter.
//!
//! `routefinder` builds its captures on demand, so the adapter only asks for
//! them when the matched behavior reads parameters.

use http::Method;
use routebench_core::{
    single_route, DispatchOutcome, DispatchableHandler, HandlerBehavior, HarnessError,
    HarnessResult, MethodTable, PlaceholderSyntax, ResponseSink, RouteTable, RouterAdapter,
    SyntheticRequest, Verb, ECHO_PARAM,
};
use routefinder::Router;

use crate::{load, NativeRouter};

/// Adapter for the `routefinder` crate.
#[derive(Debug, Clone, Copy)]
pub struct RoutefinderAdapter {
    behavior: HandlerBehavior,
}

impl RoutefinderAdapter {
    /// Adapter name.
    pub const NAME: &'static str = "routefinder";

    /// Creates the adapter. Table builds attach `behavior` to every route.
    #[must_use]
    pub fn new(behavior: HandlerBehavior) -> Self {
        Self { behavior }
    }
}

impl RouterAdapter for RoutefinderAdapter {
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
        load::<RoutefinderRouter>(self, table, self.behavior)
    }

    fn build_single(
        &self,
        method: &Method,
        template: &str,
        behavior: HandlerBehavior,
    ) -> HarnessResult<Box<dyn DispatchableHandler>> {
        let route = single_route(method, template)?;
        load::<RoutefinderRouter>(self, [&route], behavior)
    }
}

#[derive(Default)]
struct RoutefinderRouter {
    routes: MethodTable<Router<HandlerBehavior>>,
}

impl NativeRouter for RoutefinderRouter {
    fn insert(&mut self, verb: Verb, path: &str, behavior: HandlerBehavior) -> HarnessResult<()> {
        self.routes
            .get_or_insert_with(verb, Router::new)
            .add(path, behavior)
            .map_err(|e| HarnessError::registration(RoutefinderAdapter::NAME, path, e))
    }
}

impl DispatchableHandler for RoutefinderRouter {
    fn serve(&self, request: &SyntheticRequest, sink: &mut dyn ResponseSink) -> DispatchOutcome {
        let Some(router) = self.routes.get(request.method()) else {
            return DispatchOutcome::not_found(sink);
        };

        let Some(matched) = router.best_match(request.path()) else {
            return DispatchOutcome::not_found(sink);
        };

        let behavior = *matched.handler();
        if behavior.needs_params() {
            let captures = matched.captures();
            behavior.respond(request, sink, || captures.get(ECHO_PARAM));
        } else {
            behavior.respond(request, sink, || None);
        }
        DispatchOutcome::Matched
    }
}
