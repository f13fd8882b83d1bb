//! Core types for routebench.
//!
//! routebench measures third-party HTTP routers against each other by
//! loading the same route tables into each of them and replaying synthetic
//! requests. This crate holds everything the routers are measured *with*:
//!
//! - **Route tables**: fixed real-world API surfaces ([`tables`])
//! - **Templates**: `:name` path templates and placeholder rewriting ([`PathTemplate`])
//! - **Requests**: reusable in-process requests ([`SyntheticRequest`])
//! - **Transport**: zero-cost and recording response sinks ([`MockTransport`])
//! - **Handlers**: the no-op, echo-URI and echo-param behaviors ([`HandlerBehavior`])
//! - **Adapters**: the contract every wrapped router satisfies ([`RouterAdapter`])
//!
//! # Example
//!
//! ```rust
//! use routebench_core::{tables, PlaceholderSyntax, SyntheticRequest};
//!
//! let table = tables::github_api().unwrap();
//! let first = &table.routes()[1];
//! assert_eq!(first.path(), "/authorizations/:id");
//! assert_eq!(
//!     first.template().render(PlaceholderSyntax::Brace).unwrap(),
//!     "/authorizations/{id}"
//! );
//!
//! let mut request = SyntheticRequest::get("/");
//! request.retarget_route(first);
//! assert_eq!(request.path(), "/authorizations/:id");
//! ```

mod adapter;
mod error;
mod handler;
mod method;
mod request;
mod route;
mod template;
mod transport;

pub mod tables;

pub use adapter::{single_route, RouterAdapter};
pub use error::{HarnessError, HarnessResult};
pub use handler::{DispatchOutcome, DispatchableHandler, HandlerBehavior, ECHO_PARAM};
pub use method::{MethodTable, Verb};
pub use request::SyntheticRequest;
pub use route::{Route, RouteTable};
pub use template::{PathTemplate, PlaceholderSyntax, Segment};
pub use transport::{MockTransport, RecordingTransport, ResponseSink};
