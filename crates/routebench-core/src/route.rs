//! Routes and route tables.

use std::fmt;

use crate::error::{HarnessError, HarnessResult};
use crate::method::Verb;
use crate::template::PathTemplate;

/// A single `(verb, template)` registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    verb: Verb,
    template: PathTemplate,
}

impl Route {
    /// Creates a route from a method name and a `:name` template.
    ///
    /// # Example
    ///
    /// ```rust
    /// use routebench_core::{Route, Verb};
    ///
    /// let route = Route::new("GET", "/user/:name").unwrap();
    /// assert_eq!(route.verb(), Verb::Get);
    /// assert_eq!(route.path(), "/user/:name");
    ///
    /// assert!(Route::new("OPTIONS", "/user/:name").is_err());
    /// ```
    pub fn new(method: &str, path: &str) -> HarnessResult<Self> {
        Ok(Self {
            verb: method.parse()?,
            template: PathTemplate::parse(path)?,
        })
    }

    /// Creates a route from an already-parsed template.
    #[must_use]
    pub fn from_parts(verb: Verb, template: PathTemplate) -> Self {
        Self { verb, template }
    }

    /// Returns the verb.
    #[must_use]
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Returns the template as written.
    #[must_use]
    pub fn path(&self) -> &str {
        self.template.as_str()
    }

    /// Returns the parsed template.
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.template)
    }
}

/// An ordered list of routes under a name.
///
/// Order is significant: full-table benchmarks replay routes top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    name: String,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates a table. Fails if `routes` is empty.
    pub fn new(name: impl Into<String>, routes: Vec<Route>) -> HarnessResult<Self> {
        let name = name.into();
        if routes.is_empty() {
            return Err(HarnessError::empty_table(name));
        }
        Ok(Self { name, routes })
    }

    /// Creates a table from `(method, path)` pairs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use routebench_core::RouteTable;
    ///
    /// let table = RouteTable::from_pairs("users", &[
    ///     ("GET", "/users"),
    ///     ("GET", "/users/:id"),
    ///     ("DELETE", "/users/:id"),
    /// ]).unwrap();
    ///
    /// assert_eq!(table.len(), 3);
    /// assert_eq!(table.routes()[2].path(), "/users/:id");
    /// ```
    pub fn from_pairs(name: impl Into<String>, pairs: &[(&str, &str)]) -> HarnessResult<Self> {
        let routes = pairs
            .iter()
            .map(|(method, path)| Route::new(method, path))
            .collect::<HarnessResult<Vec<_>>>()?;
        Self::new(name, routes)
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the routes in insertion order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns an iterator over the routes.
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always `false` for a constructed table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the number of routes with at least one placeholder.
    #[must_use]
    pub fn dynamic_count(&self) -> usize {
        self.routes
            .iter()
            .filter(|route| route.template().param_count() > 0)
            .count()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_new() {
        let route = Route::new("PUT", "/user/following/:user").unwrap();
        assert_eq!(route.verb(), Verb::Put);
        assert_eq!(route.template().param_count(), 1);
        assert_eq!(route.to_string(), "PUT /user/following/:user");
    }

    #[test]
    fn test_route_new_rejects_method() {
        let err = Route::new("HEAD", "/").unwrap_err();
        assert!(matches!(err, HarnessError::UnsupportedMethod { .. }));
    }

    #[test]
    fn test_table_rejects_empty() {
        let err = RouteTable::new("nothing", Vec::new()).unwrap_err();
        assert_eq!(err, HarnessError::empty_table("nothing"));
        assert!(RouteTable::from_pairs("nothing", &[]).is_err());
    }

    #[test]
    fn test_table_preserves_order() {
        let table = RouteTable::from_pairs(
            "mixed",
            &[("POST", "/b"), ("GET", "/a"), ("GET", "/c/:id")],
        )
        .unwrap();
        let paths: Vec<_> = table.iter().map(Route::path).collect();
        assert_eq!(paths, vec!["/b", "/a", "/c/:id"]);
        assert_eq!(table.dynamic_count(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_table_propagates_bad_route() {
        let err = RouteTable::from_pairs("bad", &[("GET", "/ok"), ("GET", "/x/:")]).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidTemplate { .. }));
    }
}
