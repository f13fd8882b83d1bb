//! Path template parsing and placeholder rewriting.
//!
//! Route tables are written with `:name` placeholders. Routers disagree on how
//! a placeholder is spelled, so every adapter renders the template into its
//! library's syntax. Rendering is verified by parsing the output back in the
//! target syntax: a rewrite that loses, adds or moves a placeholder is an
//! error rather than a silently different route.
//!
//! Templates split on `/` and keep empty segments, so `/`, `/articles/` and
//! `/articles` are three distinct templates.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{HarnessError, HarnessResult};

/// Segments stored inline before spilling to the heap.
const INLINE_SEGMENTS: usize = 8;

/// Characters that some routers read as wildcards or modifiers inside a
/// segment. Literal segments may not contain them in any syntax.
const WILDCARD_CHARS: [char; 3] = ['*', '+', '?'];

/// Placeholder spelling used by a router library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderSyntax {
    /// `:name`, used by the route tables and most trie routers.
    Colon,
    /// `{name}`, used by matchit-style routers.
    Brace,
}

/// One `/`-separated piece of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text matched byte for byte. May be empty.
    Literal(String),
    /// A named placeholder spanning the whole segment.
    Param(String),
}

/// A parsed path template.
///
/// # Example
///
/// ```rust
/// use routebench_core::{PathTemplate, PlaceholderSyntax};
///
/// let template = PathTemplate::parse("/repos/:owner/:repo/issues").unwrap();
/// assert_eq!(template.params().collect::<Vec<_>>(), vec!["owner", "repo"]);
/// assert_eq!(
///     template.render(PlaceholderSyntax::Brace).unwrap(),
///     "/repos/{owner}/{repo}/issues"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    segments: SmallVec<[Segment; INLINE_SEGMENTS]>,
}

impl PathTemplate {
    /// Parses a template written with `:name` placeholders.
    pub fn parse(template: &str) -> HarnessResult<Self> {
        Self::parse_with(template, PlaceholderSyntax::Colon)
    }

    /// Parses a template written in the given syntax.
    pub fn parse_with(template: &str, syntax: PlaceholderSyntax) -> HarnessResult<Self> {
        let rest = template
            .strip_prefix('/')
            .ok_or_else(|| HarnessError::invalid_template(template, "must start with '/'"))?;

        let segments = rest
            .split('/')
            .map(|piece| parse_segment(template, piece, syntax))
            .collect::<HarnessResult<_>>()?;

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    /// Returns the template as it was written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns placeholder names in path order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns the number of placeholders.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params().count()
    }

    /// Returns `true` if the template has a placeholder with this name.
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.params().any(|param| param == name)
    }

    /// Renders the template in a target syntax.
    ///
    /// Fails with [`HarnessError::InvalidTemplate`] when a segment cannot be
    /// spelled in the target syntax, and with
    /// [`HarnessError::TemplateMismatch`] when the rendered form does not
    /// parse back to the same segments.
    pub fn render(&self, syntax: PlaceholderSyntax) -> HarnessResult<String> {
        let mut rendered = String::with_capacity(self.source.len() + self.segments.len());

        for segment in &self.segments {
            rendered.push('/');
            match segment {
                Segment::Literal(text) => {
                    if !literal_expressible(text, syntax) {
                        return Err(HarnessError::invalid_template(
                            &self.source,
                            format!("literal segment `{text}` cannot be expressed in {syntax} syntax"),
                        ));
                    }
                    rendered.push_str(text);
                }
                Segment::Param(name) => match syntax {
                    PlaceholderSyntax::Colon => {
                        rendered.push(':');
                        rendered.push_str(name);
                    }
                    PlaceholderSyntax::Brace => {
                        rendered.push('{');
                        rendered.push_str(name);
                        rendered.push('}');
                    }
                },
            }
        }

        let recovered = Self::parse_with(&rendered, syntax)?;
        if recovered.segments != self.segments {
            return Err(HarnessError::TemplateMismatch {
                template: self.source.clone(),
                rendered,
                expected: self.param_count(),
                found: recovered.param_count(),
            });
        }

        Ok(rendered)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Display for PlaceholderSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colon => f.write_str("colon"),
            Self::Brace => f.write_str("brace"),
        }
    }
}

fn parse_segment(template: &str, piece: &str, syntax: PlaceholderSyntax) -> HarnessResult<Segment> {
    if piece.starts_with('*') {
        return Err(HarnessError::invalid_template(
            template,
            "catch-all segments are not supported",
        ));
    }

    match syntax {
        PlaceholderSyntax::Colon => {
            if let Some(name) = piece.strip_prefix(':') {
                if name.is_empty() {
                    return Err(HarnessError::invalid_template(template, "empty placeholder name"));
                }
                if name.contains(':') {
                    return Err(HarnessError::invalid_template(
                        template,
                        format!("placeholder `{piece}` must span a whole segment"),
                    ));
                }
                Ok(Segment::Param(name.to_string()))
            } else if piece.contains(':') {
                Err(HarnessError::invalid_template(
                    template,
                    format!("placeholder in `{piece}` must span a whole segment"),
                ))
            } else {
                Ok(Segment::Literal(piece.to_string()))
            }
        }
        PlaceholderSyntax::Brace => {
            if let Some(name) = piece.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                if name.is_empty() {
                    return Err(HarnessError::invalid_template(template, "empty placeholder name"));
                }
                if name.contains(['{', '}']) {
                    return Err(HarnessError::invalid_template(
                        template,
                        format!("nested braces in `{piece}`"),
                    ));
                }
                Ok(Segment::Param(name.to_string()))
            } else if piece.contains(['{', '}']) {
                Err(HarnessError::invalid_template(
                    template,
                    format!("placeholder in `{piece}` must span a whole segment"),
                ))
            } else {
                Ok(Segment::Literal(piece.to_string()))
            }
        }
    }
}

fn literal_expressible(text: &str, syntax: PlaceholderSyntax) -> bool {
    if text.contains(WILDCARD_CHARS) {
        return false;
    }
    match syntax {
        PlaceholderSyntax::Colon => !text.contains(':'),
        PlaceholderSyntax::Brace => !text.contains(['{', '}']),
    }
}
