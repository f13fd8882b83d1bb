//! Handler behaviors and the dispatch contract.

use std::fmt;
use std::str::FromStr;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::request::SyntheticRequest;
use crate::transport::ResponseSink;

/// Name of the path parameter written by [`HandlerBehavior::EchoParam`].
pub const ECHO_PARAM: &str = "name";

/// What a matched route does with the request.
///
/// All variants are stateless and do constant work apart from the bytes
/// they write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerBehavior {
    /// Does nothing. Isolates routing cost.
    #[default]
    Noop,
    /// Writes the request-target exactly as supplied, query included.
    #[serde(alias = "test")]
    EchoUri,
    /// Writes the value of the `name` path parameter.
    #[serde(alias = "write")]
    EchoParam,
}

impl HandlerBehavior {
    /// Produces the response for a matched request.
    ///
    /// `param` is only called for [`HandlerBehavior::EchoParam`] and should
    /// look up [`ECHO_PARAM`] in the router's captures. A route without that
    /// parameter writes nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use routebench_core::{HandlerBehavior, RecordingTransport, SyntheticRequest};
    ///
    /// let request = SyntheticRequest::get("/user/gordon?x=1");
    /// let mut sink = RecordingTransport::new();
    ///
    /// HandlerBehavior::EchoUri.respond(&request, &mut sink, || None);
    /// assert_eq!(sink.body_str(), "/user/gordon?x=1");
    /// ```
    #[inline]
    pub fn respond<'p>(
        self,
        request: &SyntheticRequest,
        sink: &mut dyn ResponseSink,
        param: impl FnOnce() -> Option<&'p str>,
    ) {
        match self {
            Self::Noop => {}
            Self::EchoUri => {
                sink.write_str(request.request_uri());
            }
            Self::EchoParam => {
                if let Some(value) = param() {
                    sink.write_str(value);
                }
            }
        }
    }

    /// Returns `true` if [`respond`](Self::respond) reads path parameters.
    ///
    /// Routers whose capture lookup is not free can skip building captures
    /// for the other behaviors.
    #[must_use]
    pub const fn needs_params(self) -> bool {
        matches!(self, Self::EchoParam)
    }

    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::EchoUri => "echo_uri",
            Self::EchoParam => "echo_param",
        }
    }
}

impl fmt::Display for HandlerBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandlerBehavior {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "noop" => Ok(Self::Noop),
            "echo_uri" | "test" => Ok(Self::EchoUri),
            "echo_param" | "write" => Ok(Self::EchoParam),
            _ => Err(HarnessError::UnknownBehavior {
                name: s.to_string(),
            }),
        }
    }
}

/// Result of a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A route matched and its handler ran once.
    Matched,
    /// No route matched method and path. No handler ran.
    NotFound,
}

impl DispatchOutcome {
    /// Writes a 404 status and returns [`DispatchOutcome::NotFound`].
    #[inline]
    pub fn not_found(sink: &mut dyn ResponseSink) -> Self {
        sink.write_status(StatusCode::NOT_FOUND);
        Self::NotFound
    }

    /// Returns `true` for [`DispatchOutcome::Matched`].
    #[must_use]
    pub fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

/// A built router ready to take requests.
///
/// `serve` completes synchronously and never panics on unmatched input.
pub trait DispatchableHandler {
    /// Routes one request and runs the matched handler, if any.
    fn serve(&self, request: &SyntheticRequest, sink: &mut dyn ResponseSink) -> DispatchOutcome;
}
