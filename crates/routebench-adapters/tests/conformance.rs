//! Behavior every adapter must share.

use http::Method;
use proptest::prelude::*;
use routebench_adapters::{all, ADAPTER_NAMES};
use routebench_core::tables::{self, Api, PARAM_CASES, PARAM_WRITE};
use routebench_core::{
    DispatchOutcome, HandlerBehavior, HarnessError, RecordingTransport, RouteTable,
    SyntheticRequest, Verb,
};

#[test]
fn every_verb_dispatches_exactly_once() {
    for adapter in all(HandlerBehavior::Noop) {
        for verb in Verb::ALL {
            let router = adapter
                .build_single(&verb.as_method(), "/user/:name", HandlerBehavior::EchoUri)
                .unwrap();

            let mut sink = RecordingTransport::new();
            let request = SyntheticRequest::new(verb.as_method(), "/user/gordon");
            let outcome = router.serve(&request, &mut sink);

            assert_eq!(outcome, DispatchOutcome::Matched, "{} {verb}", adapter.name());
            assert_eq!(sink.writes(), 1, "{} {verb}", adapter.name());
            assert_eq!(sink.body_str(), "/user/gordon");

            for other in Verb::ALL.into_iter().filter(|other| *other != verb) {
                let mut sink = RecordingTransport::new();
                let request = SyntheticRequest::new(other.as_method(), "/user/gordon");
                assert_eq!(
                    router.serve(&request, &mut sink),
                    DispatchOutcome::NotFound,
                    "{} registered {verb}, requested {other}",
                    adapter.name()
                );
                assert_eq!(sink.writes(), 0);
            }
        }
    }
}

#[test]
fn unsupported_method_is_rejected_at_build() {
    for adapter in all(HandlerBehavior::Noop) {
        let err = adapter
            .build_single(&Method::OPTIONS, "/user/:name", HandlerBehavior::Noop)
            .err()
            .unwrap();
        assert_eq!(err, HarnessError::unsupported_method("OPTIONS"), "{}", adapter.name());
    }
}

#[test]
fn unsupported_method_at_dispatch_is_not_found() {
    for adapter in all(HandlerBehavior::EchoUri) {
        let router = adapter.build(&tables::github_api().unwrap()).unwrap();
        let mut sink = RecordingTransport::new();
        let request = SyntheticRequest::new(Method::HEAD, "/user/repos");
        assert_eq!(router.serve(&request, &mut sink), DispatchOutcome::NotFound);
        assert_eq!(sink.writes(), 0);
    }
}

#[test]
fn write_handler_echoes_param() {
    for adapter in all(HandlerBehavior::Noop) {
        let router = adapter
            .build_single(&Method::GET, PARAM_WRITE.template, PARAM_WRITE.behavior)
            .unwrap();
        let mut sink = RecordingTransport::new();
        router.serve(&SyntheticRequest::get(PARAM_WRITE.request), &mut sink);
        assert_eq!(sink.body_str(), "gordon", "{}", adapter.name());
    }
}

#[test]
fn write_handler_without_name_param_writes_nothing() {
    for adapter in all(HandlerBehavior::Noop) {
        let router = adapter
            .build_single(&Method::GET, "/user/:id", HandlerBehavior::EchoParam)
            .unwrap();
        let mut sink = RecordingTransport::new();
        let outcome = router.serve(&SyntheticRequest::get("/user/gordon"), &mut sink);
        assert!(outcome.is_matched());
        assert!(sink.body().is_empty(), "{}", adapter.name());
    }
}

#[test]
fn test_handler_echoes_request_uri_with_query() {
    for adapter in all(HandlerBehavior::Noop) {
        let router = adapter
            .build_single(&Method::GET, "/user/:name", HandlerBehavior::EchoUri)
            .unwrap();
        let mut sink = RecordingTransport::new();
        router.serve(&SyntheticRequest::get("/user/gordon?x=1"), &mut sink);
        assert_eq!(sink.body_str(), "/user/gordon?x=1", "{}", adapter.name());
    }
}

#[test]
fn table_builds_use_constructor_behavior() {
    let table = tables::gplus_api().unwrap();
    for (noop, echo) in all(HandlerBehavior::Noop)
        .into_iter()
        .zip(all(HandlerBehavior::EchoUri))
    {
        let request = SyntheticRequest::get("/people");

        let mut sink = RecordingTransport::new();
        noop.build(&table).unwrap().serve(&request, &mut sink);
        assert_eq!(sink.writes(), 0, "{}", noop.name());

        let mut sink = RecordingTransport::new();
        echo.build(&table).unwrap().serve(&request, &mut sink);
        assert_eq!(sink.body_str(), "/people", "{}", echo.name());
    }
}

#[test]
fn param_cases_match_their_requests() {
    for adapter in all(HandlerBehavior::Noop) {
        for case in PARAM_CASES {
            let router = adapter
                .build_single(&Method::GET, case.template, HandlerBehavior::EchoUri)
                .unwrap();
            let mut sink = RecordingTransport::new();
            let outcome = router.serve(&SyntheticRequest::get(case.request), &mut sink);
            assert!(outcome.is_matched(), "{} {}", adapter.name(), case.name);
            assert_eq!(sink.body_str(), case.request);
        }
    }
}

#[test]
fn unregistered_paths_are_not_found() {
    let misses = [
        "/user/gordon/extra",
        "/nonexistent",
        "/repos/owner",
        "/1/classes/go/123/extra",
    ];
    let table = RouteTable::from_pairs("single", &[("GET", "/user/:name")]).unwrap();
    for adapter in all(HandlerBehavior::EchoUri) {
        let router = adapter.build(&table).unwrap();
        for path in misses {
            let mut sink = RecordingTransport::new();
            let outcome = router.serve(&SyntheticRequest::get(path), &mut sink);
            assert_eq!(outcome, DispatchOutcome::NotFound, "{} {path}", adapter.name());
            assert_eq!(sink.writes(), 0);
        }
    }
}

#[test]
fn wildcard_characters_in_literals_are_rejected() {
    let templates = ["/files/a*b", "/files/a+", "/files/v1?"];
    for adapter in all(HandlerBehavior::EchoUri) {
        for template in templates {
            let table = RouteTable::from_pairs("wild", &[("GET", template)]).unwrap();
            let err = adapter.build(&table).err().unwrap();
            assert!(
                matches!(err, HarnessError::InvalidTemplate { .. }),
                "{} {template}: {err}",
                adapter.name()
            );
        }
    }
}

#[test]
fn literal_neighbors_are_not_found() {
    let table = RouteTable::from_pairs(
        "files",
        &[("GET", "/files/ab"), ("GET", "/files/a/:name")],
    )
    .unwrap();
    let misses = ["/files/aXYZb", "/files/aaa", "/files/abb", "/files/a"];
    for adapter in all(HandlerBehavior::EchoUri) {
        let router = adapter.build(&table).unwrap();
        for path in misses {
            let mut sink = RecordingTransport::new();
            let outcome = router.serve(&SyntheticRequest::get(path), &mut sink);
            assert_eq!(outcome, DispatchOutcome::NotFound, "{} {path}", adapter.name());
            assert_eq!(sink.writes(), 0);
        }
    }
}

#[test]
fn duplicate_routes_fail_the_same_way() {
    let table = RouteTable::from_pairs(
        "dup",
        &[("PUT", "/gists/:id/star"), ("PUT", "/gists/:id/star")],
    )
    .unwrap();
    for adapter in all(HandlerBehavior::Noop) {
        let err = adapter.build(&table).err().unwrap();
        assert!(matches!(err, HarnessError::Registration { .. }), "{}", adapter.name());
    }
}

#[test]
fn full_table_replay_hits_every_route_in_order() {
    for api in Api::ALL {
        let table = api.table().unwrap();
        let expected: String = table.iter().map(|route| route.path()).collect();

        for adapter in all(HandlerBehavior::EchoUri) {
            let router = adapter.build(&table).unwrap();
            let mut sink = RecordingTransport::new();
            let mut request = SyntheticRequest::get("/");

            for route in &table {
                request.retarget_route(route);
                let outcome = router.serve(&request, &mut sink);
                assert!(
                    outcome.is_matched(),
                    "{} missed {route} in {}",
                    adapter.name(),
                    api.name()
                );
            }

            assert_eq!(sink.writes(), table.len(), "{} {}", adapter.name(), api.name());
            assert_eq!(sink.body_str(), expected, "{} {}", adapter.name(), api.name());
        }
    }
}

#[test]
fn sample_requests_match_their_tables() {
    for api in Api::ALL {
        let table = api.table().unwrap();
        for adapter in all(HandlerBehavior::EchoUri) {
            let router = adapter.build(&table).unwrap();
            for sample in api.samples() {
                let mut sink = RecordingTransport::new();
                let request = SyntheticRequest::new(sample.verb.as_method(), sample.target);
                assert!(
                    router.serve(&request, &mut sink).is_matched(),
                    "{} {}",
                    adapter.name(),
                    sample.name
                );
                assert_eq!(sink.body_str(), sample.target);
            }
        }
    }
}

#[test]
fn independent_builds_dispatch_identically() {
    let table = tables::parse_api().unwrap();
    let probes = [
        (Method::GET, "/1/classes/go/123456789"),
        (Method::POST, "/1/users"),
        (Method::DELETE, "/1/roles/admin"),
        (Method::GET, "/1/nothing"),
        (Method::PATCH, "/1/users"),
    ];

    for name in ADAPTER_NAMES {
        let first = routebench_adapters::by_name(name, HandlerBehavior::EchoUri).unwrap();
        let second = routebench_adapters::by_name(name, HandlerBehavior::EchoUri).unwrap();
        let a = first.build(&table).unwrap();
        let b = second.build(&table).unwrap();

        for (method, target) in &probes {
            let request = SyntheticRequest::new(method.clone(), target);
            let mut left = RecordingTransport::new();
            let mut right = RecordingTransport::new();
            assert_eq!(a.serve(&request, &mut left), b.serve(&request, &mut right));
            assert_eq!(left.body(), right.body(), "{name} {method} {target}");
            assert_eq!(left.status(), right.status());
        }
    }
}

proptest! {
    #[test]
    fn unknown_prefixes_never_match(tail in "[a-z0-9]{1,12}(/[a-z0-9]{1,8}){0,3}") {
        let table = tables::github_api().unwrap();
        let target = format!("/zz{tail}");
        for adapter in all(HandlerBehavior::EchoUri) {
            let router = adapter.build(&table).unwrap();
            let mut sink = RecordingTransport::new();
            let outcome = router.serve(&SyntheticRequest::get(&target), &mut sink);
            prop_assert_eq!(outcome, DispatchOutcome::NotFound);
            prop_assert_eq!(sink.writes(), 0);
        }
    }
}
