//! Synthetic requests.
//!
//! A [`SyntheticRequest`] is built once per benchmark and mutated in place on
//! every iteration. Retargeting and query resets reuse the same buffer, so a
//! warmed-up request never allocates.

use http::Method;

use crate::route::Route;

/// An in-process request: a method plus a request-target.
///
/// The request-target is the path optionally followed by `?query`, kept
/// exactly as supplied.
///
/// # Example
///
/// ```rust
/// use routebench_core::SyntheticRequest;
/// use http::Method;
///
/// let mut request = SyntheticRequest::new(Method::GET, "/user/gordon?x=1");
/// assert_eq!(request.path(), "/user/gordon");
/// assert_eq!(request.query(), "x=1");
///
/// request.reset_query("");
/// assert_eq!(request.request_uri(), "/user/gordon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticRequest {
    method: Method,
    target: String,
    path_end: usize,
}

impl SyntheticRequest {
    /// Creates a request for `target`, splitting off the query at the first `?`.
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let path_end = target.find('?').unwrap_or(target.len());
        Self {
            method,
            target: target.to_string(),
            path_end,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(target: &str) -> Self {
        Self::new(Method::GET, target)
    }

    /// Returns the method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.target[..self.path_end]
    }

    /// Returns the raw query, without the `?`. Empty when there is none.
    #[must_use]
    pub fn query(&self) -> &str {
        self.target.get(self.path_end + 1..).unwrap_or("")
    }

    /// Returns the request-target as supplied.
    #[must_use]
    pub fn request_uri(&self) -> &str {
        &self.target
    }

    /// Replaces the query in place. An empty query drops the `?`.
    pub fn reset_query(&mut self, query: &str) {
        self.target.truncate(self.path_end);
        if !query.is_empty() {
            self.target.push('?');
            self.target.push_str(query);
        }
    }

    /// Points the request at another method and path, dropping any query.
    pub fn retarget(&mut self, method: Method, path: &str) {
        self.method = method;
        self.target.clear();
        self.target.push_str(path);
        self.path_end = self.target.len();
    }

    /// Points the request at a route's own template text.
    ///
    /// Placeholders are sent literally, so `/users/:user` is requested as
    /// the path `/users/:user`, which every placeholder matches.
    pub fn retarget_route(&mut self, route: &Route) {
        self.retarget(route.verb().as_method(), route.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_query() {
        let request = SyntheticRequest::get("/search?q=router&page=2");
        assert_eq!(request.path(), "/search");
        assert_eq!(request.query(), "q=router&page=2");
        assert_eq!(request.request_uri(), "/search?q=router&page=2");
    }

    #[test]
    fn test_no_query() {
        let request = SyntheticRequest::get("/user/gordon");
        assert_eq!(request.path(), "/user/gordon");
        assert_eq!(request.query(), "");
    }

    #[test]
    fn test_empty_query_after_marker() {
        let request = SyntheticRequest::get("/user/gordon?");
        assert_eq!(request.path(), "/user/gordon");
        assert_eq!(request.query(), "");
        assert_eq!(request.request_uri(), "/user/gordon?");
    }

    #[test]
    fn test_reset_query() {
        let mut request = SyntheticRequest::get("/user/gordon?x=1");
        request.reset_query("y=2");
        assert_eq!(request.request_uri(), "/user/gordon?y=2");
        request.reset_query("x=1");
        assert_eq!(request.request_uri(), "/user/gordon?x=1");
    }

    #[test]
    fn test_retarget_route() {
        let mut request = SyntheticRequest::get("/?x=1");
        let route = Route::new("DELETE", "/gists/:id/star").unwrap();
        request.retarget_route(&route);

        assert_eq!(request.method(), &Method::DELETE);
        assert_eq!(request.path(), "/gists/:id/star");
        assert_eq!(request.query(), "");
    }

    #[test]
    fn test_retarget_reuses_buffer() {
        let mut request = SyntheticRequest::get("/a/long/enough/initial/path");
        let capacity = request.target.capacity();
        request.retarget(Method::POST, "/short");
        assert_eq!(request.target.capacity(), capacity);
    }
}
