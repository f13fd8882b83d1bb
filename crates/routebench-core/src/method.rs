//! HTTP verbs understood by the harness.
//!
//! Route tables only ever use five verbs. [`MethodTable`] keeps one router
//! per verb for libraries that have no method dimension of their own.

use std::fmt;
use std::str::FromStr;

use http::Method;

use crate::error::{HarnessError, HarnessResult};

/// One of the five verbs a route may be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Verb {
    /// Every supported verb, in slot order.
    pub const ALL: [Verb; 5] = [Verb::Get, Verb::Post, Verb::Put, Verb::Patch, Verb::Delete];

    /// Returns the `http` crate method for this verb.
    #[must_use]
    pub fn as_method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Patch => Method::PATCH,
            Self::Delete => Method::DELETE,
        }
    }

    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Maps a request method onto a verb, if it is one of the five.
    #[must_use]
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::POST => Some(Self::Post),
            Method::PUT => Some(Self::Put),
            Method::PATCH => Some(Self::Patch),
            Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = HarnessError;

    /// Method names are matched exactly; `get` is not `GET`.
    fn from_str(s: &str) -> HarnessResult<Self> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(HarnessError::unsupported_method(other)),
        }
    }
}

impl TryFrom<&Method> for Verb {
    type Error = HarnessError;

    fn try_from(method: &Method) -> HarnessResult<Self> {
        Self::from_method(method).ok_or_else(|| HarnessError::unsupported_method(method.as_str()))
    }
}

/// One optional value per verb.
///
/// # Example
///
/// ```rust
/// use routebench_core::{MethodTable, Verb};
/// use http::Method;
///
/// let mut table: MethodTable<Vec<&str>> = MethodTable::new();
/// table.entry(Verb::Get).push("/users");
///
/// assert_eq!(table.get(&Method::GET).map(Vec::len), Some(1));
/// assert!(table.get(&Method::POST).is_none());
/// assert!(table.get(&Method::OPTIONS).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct MethodTable<R> {
    slots: [Option<R>; 5],
}

impl<R> Default for MethodTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MethodTable<R> {
    /// Creates a table with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [None, None, None, None, None],
        }
    }

    /// Returns the value for a request method, or `None` for empty slots and
    /// methods outside the five verbs.
    #[must_use]
    pub fn get(&self, method: &Method) -> Option<&R> {
        Verb::from_method(method).and_then(|verb| self.slots[verb.slot()].as_ref())
    }

    /// Returns the value for a verb.
    #[must_use]
    pub fn get_verb(&self, verb: Verb) -> Option<&R> {
        self.slots[verb.slot()].as_ref()
    }

    /// Returns the verbs that hold a value.
    pub fn verbs(&self) -> impl Iterator<Item = Verb> + '_ {
        Verb::ALL
            .into_iter()
            .filter(|verb| self.slots[verb.slot()].is_some())
    }

    /// Returns the value for a verb, creating it with `init` on first use.
    pub fn get_or_insert_with(&mut self, verb: Verb, init: impl FnOnce() -> R) -> &mut R {
        self.slots[verb.slot()].get_or_insert_with(init)
    }
}

impl<R: Default> MethodTable<R> {
    /// Returns the value for a verb, creating it on first use.
    pub fn entry(&mut self, verb: Verb) -> &mut R {
        self.get_or_insert_with(verb, R::default)
    }
}
