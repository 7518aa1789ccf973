//! Path pattern compiler and matcher.
//!
//! A pattern is split on `/`; empty segments (leading, trailing or doubled
//! slashes) are skipped. Every remaining segment is one of:
//!
//! | Segment            | Kind    | Matches                                   |
//! |--------------------|---------|-------------------------------------------|
//! | `users`            | literal | exactly `users`                           |
//! | `:id`              | named   | one or more non-slash characters          |
//! | `{id}`             | named   | one or more non-slash characters          |
//! | `{id:[0-9]+}`      | named   | the constraint, within a single segment   |
//!
//! The segments are concatenated into one anchored regular expression
//! (`^/users/(?P<p0>[^/]+)$`), so a request path must match in full; a
//! pattern never matches a longer path by prefix.
//!
//! Patterns without named segments compile to no expression at all and match
//! only by exact string equality.

use regex::{Regex, RegexBuilder};
use smallvec::SmallVec;
use std::sync::Arc;

use super::params::{ParamVec, Params};
use crate::error::RouterError;

/// Character class used by a named segment without an inline constraint.
pub const DEFAULT_PARAM_CLASS: &str = "[^/]+";

/// Default upper bound for a compiled matcher, in bytes.
pub const DEFAULT_SIZE_LIMIT: usize = 1 << 20; // 1 MiB

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Named {
        name: &'a str,
        constraint: Option<&'a str>,
    },
}

fn parse_segment<'a>(pattern: &str, segment: &'a str) -> Result<Segment<'a>, RouterError> {
    if let Some(rest) = segment.strip_prefix('{') {
        let inner = rest
            .strip_suffix('}')
            .ok_or_else(|| RouterError::UnclosedBrace {
                pattern: pattern.to_string(),
                segment: segment.to_string(),
            })?;
        let (name, constraint) = match inner.split_once(':') {
            Some((name, c)) if !c.is_empty() => (name, Some(c)),
            Some((name, _)) => (name, None),
            None => (inner, None),
        };
        // `{a}.{b}` is a mixed segment, not a parameter named `a}.{b`
        if name.contains(['{', '}']) {
            return Ok(Segment::Literal(segment));
        }
        if name.is_empty() {
            return Err(RouterError::EmptyParamName {
                pattern: pattern.to_string(),
                segment: segment.to_string(),
            });
        }
        return Ok(Segment::Named { name, constraint });
    }

    if let Some(name) = segment.strip_prefix(':') {
        if name.is_empty() {
            return Err(RouterError::EmptyParamName {
                pattern: pattern.to_string(),
                segment: segment.to_string(),
            });
        }
        return Ok(Segment::Named {
            name,
            constraint: None,
        });
    }

    Ok(Segment::Literal(segment))
}

fn map_regex_error(pattern: &str, param: &str, size_limit: usize, err: regex::Error) -> RouterError {
    match err {
        regex::Error::CompiledTooBig(_) => RouterError::PatternTooLarge {
            pattern: pattern.to_string(),
            limit: size_limit,
        },
        other => RouterError::InvalidConstraint {
            pattern: pattern.to_string(),
            param: param.to_string(),
            reason: other.to_string(),
        },
    }
}

/// A compiled route pattern.
///
/// Compilation is pure: the same source string always yields an equivalent
/// matcher, and matching never mutates the pattern. A `PathPattern` is cheap
/// to share behind an `Arc` across threads.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: Arc<str>,
    /// Anchored expression; `None` when the pattern has no named segments
    regex: Option<Regex>,
    /// Parameter names, in declaration order
    param_names: Vec<Arc<str>>,
    /// Capture group index of each parameter, parallel to `param_names`
    group_indices: SmallVec<[usize; 8]>,
}

impl PathPattern {
    /// Compile a pattern with the default size limit
    ///
    /// # Errors
    ///
    /// Returns a [`RouterError`] if a segment is malformed or a constraint is
    /// not a valid regular expression.
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        Self::parse_with_limit(pattern, DEFAULT_SIZE_LIMIT)
    }

    /// Compile a pattern, bounding the compiled expression to `size_limit` bytes
    ///
    /// # Errors
    ///
    /// See [`PathPattern::parse`]; additionally returns
    /// [`RouterError::PatternTooLarge`] when the limit is exceeded.
    pub fn parse_with_limit(pattern: &str, size_limit: usize) -> Result<Self, RouterError> {
        let mut expr = String::with_capacity(pattern.len() + 16);
        expr.push('^');
        let mut param_names: Vec<Arc<str>> = Vec::new();

        for segment in pattern.split('/').filter(|s| !s.is_empty()) {
            match parse_segment(pattern, segment)? {
                Segment::Literal(literal) => {
                    expr.push('/');
                    expr.push_str(&regex::escape(literal));
                }
                Segment::Named { name, constraint } => {
                    let class = match constraint {
                        Some(c) => {
                            // Checked on its own so the error names the parameter
                            RegexBuilder::new(c)
                                .size_limit(size_limit)
                                .build()
                                .map_err(|e| map_regex_error(pattern, name, size_limit, e))?;
                            c
                        }
                        None => DEFAULT_PARAM_CLASS,
                    };
                    expr.push_str("/(?P<p");
                    expr.push_str(&param_names.len().to_string());
                    expr.push_str(">(?:");
                    expr.push_str(class);
                    expr.push_str("))");
                    param_names.push(Arc::from(name));
                }
            }
        }
        expr.push('$');

        if param_names.is_empty() {
            return Ok(Self {
                source: Arc::from(pattern),
                regex: None,
                param_names,
                group_indices: SmallVec::new(),
            });
        }

        let regex = RegexBuilder::new(&expr)
            .size_limit(size_limit)
            .build()
            .map_err(|e| {
                let last = param_names.last().map(|n| n.as_ref()).unwrap_or_default();
                map_regex_error(pattern, last, size_limit, e)
            })?;

        let group_indices = (0..param_names.len())
            .map(|i| {
                let group = format!("p{i}");
                regex
                    .capture_names()
                    .position(|n| n == Some(group.as_str()))
                    .unwrap_or(i + 1)
            })
            .collect();

        Ok(Self {
            source: Arc::from(pattern),
            regex: Some(regex),
            param_names,
            group_indices,
        })
    }

    /// The pattern string this matcher was compiled from
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Declared parameter names, in order
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// Whether the pattern declares any named segment
    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.param_names.is_empty()
    }

    /// The anchored expression used for parameter-aware matching, if any
    #[must_use]
    pub fn regex_str(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    /// Match a request path against this pattern.
    ///
    /// An exact byte-for-byte match succeeds immediately with empty
    /// parameters. Otherwise the compiled expression must cover the whole
    /// path; each named segment then yields one entry, in declaration order.
    ///
    /// Every captured value must be a single non-empty segment, even when an
    /// inline constraint such as `.*` would accept more. Literal segments
    /// hold no `/`, so a match whose captures hold none either has exactly
    /// one capture per path segment.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Params> {
        if self.source.as_ref() == path {
            return Some(Params::new());
        }

        let regex = self.regex.as_ref()?;
        let captures = regex.captures(path)?;
        if captures.get(0)?.as_str().len() != path.len() {
            return None;
        }

        let mut values = ParamVec::new();
        for (name, &idx) in self.param_names.iter().zip(self.group_indices.iter()) {
            let value = captures.get(idx)?.as_str();
            // A constraint may not widen a parameter past its own segment
            if value.is_empty() || value.contains('/') {
                return None;
            }
            values.push((Arc::clone(name), value.to_string()));
        }
        Some(Params::from_vec(values))
    }

    /// Convenience wrapper returning only whether `path` matches
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.match_path(path).is_some()
    }
}

/// Match `path` against `pattern` without retaining the compiled matcher.
///
/// The exact-equality fast path skips compilation entirely; any other case
/// compiles the pattern for this one call.
///
/// # Errors
///
/// Returns a [`RouterError`] when `pattern` is malformed.
pub fn match_path(pattern: &str, path: &str) -> Result<Option<Params>, RouterError> {
    if pattern == path {
        return Ok(Some(Params::new()));
    }
    Ok(PathPattern::parse(pattern)?.match_path(path))
}
