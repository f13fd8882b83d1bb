//! Fixed route tables.
//!
//! Four real-world API surfaces plus a handful of single-route
//! parameter cases. The API tables are replayed in full by the table
//! benchmarks, and each carries a few representative requests for
//! single-request benchmarks against the full table.

mod github;
mod gplus;
mod parse;
mod static_api;

use crate::error::HarnessResult;
use crate::handler::HandlerBehavior;
use crate::method::Verb;
use crate::route::RouteTable;

/// A single-route benchmark case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamCase {
    /// Benchmark name.
    pub name: &'static str,
    /// `:name` template registered on its own.
    pub template: &'static str,
    /// Request-target sent on every iteration.
    pub request: &'static str,
    /// Behavior of the single registered route.
    pub behavior: HandlerBehavior,
}

/// One placeholder.
pub const PARAM: ParamCase = ParamCase {
    name: "param",
    template: "/user/:name",
    request: "/user/gordon",
    behavior: HandlerBehavior::Noop,
};

/// Five placeholders.
pub const PARAM_5: ParamCase = ParamCase {
    name: "param5",
    template: "/:a/:b/:c/:d/:e",
    request: "/test/test/test/test/test",
    behavior: HandlerBehavior::Noop,
};

/// Twenty placeholders.
pub const PARAM_20: ParamCase = ParamCase {
    name: "param20",
    template: "/:a/:b/:c/:d/:e/:f/:g/:h/:i/:j/:k/:l/:m/:n/:o/:p/:q/:r/:s/:t",
    request: "/a/b/c/d/e/f/g/h/i/j/k/l/m/n/o/p/q/r/s/t",
    behavior: HandlerBehavior::Noop,
};

/// One placeholder whose value is written to the response.
pub const PARAM_WRITE: ParamCase = ParamCase {
    name: "param_write",
    template: "/user/:name",
    request: "/user/gordon",
    behavior: HandlerBehavior::EchoParam,
};

/// Every single-route case, in report order.
pub const PARAM_CASES: [ParamCase; 4] = [PARAM, PARAM_5, PARAM_20, PARAM_WRITE];

/// A representative request against a full API table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    /// Benchmark name.
    pub name: &'static str,
    /// Request verb.
    pub verb: Verb,
    /// Request-target.
    pub target: &'static str,
}

const fn sample(name: &'static str, target: &'static str) -> SampleRequest {
    SampleRequest {
        name,
        verb: Verb::Get,
        target,
    }
}

/// The real-world API surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    /// The golang.org static file tree. No placeholders.
    Static,
    /// GitHub REST API v3.
    GitHub,
    /// Google+ API.
    GPlus,
    /// Parse REST API.
    Parse,
}

impl Api {
    /// Every API, in report order.
    pub const ALL: [Api; 4] = [Api::Static, Api::GitHub, Api::GPlus, Api::Parse];

    /// Table name, used as the benchmark group prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::GitHub => "github",
            Self::GPlus => "gplus",
            Self::Parse => "parse",
        }
    }

    /// Raw `(method, path)` pairs.
    #[must_use]
    pub const fn pairs(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Static => static_api::ROUTES,
            Self::GitHub => github::ROUTES,
            Self::GPlus => gplus::ROUTES,
            Self::Parse => parse::ROUTES,
        }
    }

    /// Builds the route table.
    pub fn table(self) -> HarnessResult<RouteTable> {
        RouteTable::from_pairs(self.name(), self.pairs())
    }

    /// Representative single requests against this table.
    #[must_use]
    pub const fn samples(self) -> &'static [SampleRequest] {
        match self {
            Self::Static => &[],
            Self::GitHub => GITHUB_SAMPLES,
            Self::GPlus => GPLUS_SAMPLES,
            Self::Parse => PARSE_SAMPLES,
        }
    }
}

const GITHUB_SAMPLES: &[SampleRequest] = &[
    sample("github_static", "/user/repos"),
    sample("github_param", "/repos/julienschmidt/httprouter/stargazers"),
];

const GPLUS_SAMPLES: &[SampleRequest] = &[
    sample("gplus_static", "/people"),
    sample("gplus_param", "/people/118051310819094153327"),
    sample(
        "gplus_2params",
        "/people/118051310819094153327/activities/123456789",
    ),
];

const PARSE_SAMPLES: &[SampleRequest] = &[
    sample("parse_static", "/1/users"),
    sample("parse_param", "/1/classes/go"),
    sample("parse_2params", "/1/classes/go/123456789"),
];

/// The golang.org static file table.
pub fn static_api() -> HarnessResult<RouteTable> {
    Api::Static.table()
}

/// The GitHub API table.
pub fn github_api() -> HarnessResult<RouteTable> {
    Api::GitHub.table()
}

/// The Google+ API table.
pub fn gplus_api() -> HarnessResult<RouteTable> {
    Api::GPlus.table()
}

/// The Parse API table.
pub fn parse_api() -> HarnessResult<RouteTable> {
    Api::Parse.table()
}
