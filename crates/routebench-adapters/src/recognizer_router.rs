//! [`route_recognizer`] adapter.

use http::Method;
use route_recognizer::Router;
use routebench_core::{
    single_route, DispatchOutcome, DispatchableHandler, HandlerBehavior, HarnessResult,
    MethodTable, PlaceholderSyntax, ResponseSink, RouteTable, RouterAdapter, SyntheticRequest,
    Verb, ECHO_PARAM,
};

use crate::{load, NativeRouter};

/// Adapter for the `route-recognizer` crate.
#[derive(Debug, Clone, Copy)]
pub struct RouteRecognizerAdapter {
    behavior: HandlerBehavior,
}

impl RouteRecognizerAdapter {
    /// Adapter name.
    pub const NAME: &'static str = "route-recognizer";

    /// Creates the adapter. Table builds attach `behavior` to every route.
    #[must_use]
    pub fn new(behavior: HandlerBehavior) -> Self {
        Self { behavior }
    }
}

impl RouterAdapter for RouteRecognizerAdapter {
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
        load::<RecognizerRouter>(self, table, self.behavior)
    }

    fn build_single(
        &self,
        method: &Method,
        template: &str,
        behavior: HandlerBehavior,
    ) -> HarnessResult<Box<dyn DispatchableHandler>> {
        let route = single_route(method, template)?;
        load::<RecognizerRouter>(self, [&route], behavior)
    }
}

#[derive(Default)]
struct RecognizerRouter {
    routes: MethodTable<Router<HandlerBehavior>>,
}

impl NativeRouter for RecognizerRouter {
    fn insert(&mut self, verb: Verb, path: &str, behavior: HandlerBehavior) -> HarnessResult<()> {
        self.routes
            .get_or_insert_with(verb, Router::new)
            .add(path, behavior);
        Ok(())
    }
}

impl DispatchableHandler for RecognizerRouter {
    fn serve(&self, request: &SyntheticRequest, sink: &mut dyn ResponseSink) -> DispatchOutcome {
        let Some(router) = self.routes.get(request.method()) else {
            return DispatchOutcome::not_found(sink);
        };

        match router.recognize(request.path()) {
            Ok(matched) => {
                matched
                    .handler()
                    .respond(request, sink, || matched.params().find(ECHO_PARAM));
                DispatchOutcome::Matched
            }
            Err(_) => DispatchOutcome::not_found(sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routebench_core::RecordingTransport;

    #[test]
    fn test_static_beats_param() {
        let adapter = RouteRecognizerAdapter::new(HandlerBehavior::EchoParam);
        let table = RouteTable::from_pairs(
            "users",
            &[("GET", "/user/:name"), ("GET", "/user/keys")],
        )
        .unwrap();
        let router = adapter.build(&table).unwrap();

        let mut sink = RecordingTransport::new();
        assert!(router
            .serve(&SyntheticRequest::get("/user/keys"), &mut sink)
            .is_matched());
        assert_eq!(sink.writes(), 0);

        assert!(router
            .serve(&SyntheticRequest::get("/user/gordon"), &mut sink)
            .is_matched());
        assert_eq!(sink.body_str(), "gordon");
    }

    #[test]
    fn test_trailing_slash_is_distinct() {
        let adapter = RouteRecognizerAdapter::new(HandlerBehavior::EchoUri);
        let table = RouteTable::from_pairs("articles", &[("GET", "/articles/")]).unwrap();
        let router = adapter.build(&table).unwrap();

        let mut sink = RecordingTransport::new();
        assert!(router
            .serve(&SyntheticRequest::get("/articles/"), &mut sink)
            .is_matched());
        assert_eq!(sink.body_str(), "/articles/");
    }
}
