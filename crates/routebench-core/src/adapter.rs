//! The router adapter contract.
//!
//! Every router under measurement is wrapped in a [`RouterAdapter`]. The
//! adapter owns three things and nothing else: translating `:name`
//! templates into the library's placeholder syntax, registering one route per
//! table entry with the handler behavior it was constructed with, and turning
//! the library's lookup result into a [`DispatchableHandler`] call.

use http::Method;

use crate::error::HarnessResult;
use crate::handler::{DispatchableHandler, HandlerBehavior};
use crate::method::Verb;
use crate::route::{Route, RouteTable};
use crate::template::{PathTemplate, PlaceholderSyntax};

/// Uniform construction interface over a third-party router.
///
/// Implementations are configured once, at construction, with the
/// [`HandlerBehavior`] every route built by [`RouterAdapter::build`] uses.
/// They hold no router state, so they are shareable across threads even
/// though the routers they build are not.
pub trait RouterAdapter: Send + Sync {
    /// Short, stable identifier used in benchmark ids.
    fn name(&self) -> &'static str;

    /// Placeholder syntax of the wrapped library.
    fn syntax(&self) -> PlaceholderSyntax;

    /// Behavior attached to every route of a table build.
    fn behavior(&self) -> HandlerBehavior;

    /// Registers every route of `table` and returns the built router.
    ///
    /// Fails if any template cannot be translated or the library rejects a
    /// route.
    fn build(&self, table: &RouteTable) -> HarnessResult<Box<dyn DispatchableHandler>>;

    /// Registers one `:name` template under `method` with an explicit behavior.
    ///
    /// Fails with `UnsupportedMethod` for methods outside the five verbs.
    fn build_single(
        &self,
        method: &Method,
        template: &str,
        behavior: HandlerBehavior,
    ) -> HarnessResult<Box<dyn DispatchableHandler>>;

    /// Renders a route's template in this adapter's syntax.
    fn translate(&self, route: &Route) -> HarnessResult<String> {
        route.template().render(self.syntax())
    }
}

/// Validates the inputs of [`RouterAdapter::build_single`].
///
/// # Example
///
/// ```rust
/// use routebench_core::{single_route, Verb};
/// use http::Method;
///
/// let route = single_route(&Method::GET, "/user/:name").unwrap();
/// assert_eq!(route.verb(), Verb::Get);
///
/// assert!(single_route(&Method::OPTIONS, "/user/:name").is_err());
/// ```
pub fn single_route(method: &Method, template: &str) -> HarnessResult<Route> {
    let verb = Verb::try_from(method)?;
    let template = PathTemplate::parse(template)?;
    Ok(Route::from_parts(verb, template))
}
