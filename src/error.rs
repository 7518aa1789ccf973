use std::fmt;

/// Route configuration error
///
/// Returned by [`Router::register`](crate::router::Router::register) and the
/// pattern compiler when a route cannot be turned into a matcher. These are
/// configuration defects: they surface at registration time, never while a
/// request is being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A named segment declared no name (`:` or `{}` or `{:[0-9]+}`)
    EmptyParamName {
        /// The full pattern being compiled
        pattern: String,
        /// The offending segment
        segment: String,
    },
    /// A segment opened with `{` but never closed with `}`
    UnclosedBrace {
        /// The full pattern being compiled
        pattern: String,
        /// The offending segment
        segment: String,
    },
    /// The inline constraint of `{name:constraint}` is not a valid regular expression
    InvalidConstraint {
        /// The full pattern being compiled
        pattern: String,
        /// Parameter whose constraint failed
        param: String,
        /// Compiler message from `regex`
        reason: String,
    },
    /// The compiled matcher exceeds the configured regex size limit
    PatternTooLarge {
        /// The full pattern being compiled
        pattern: String,
        /// Limit in bytes that was exceeded
        limit: usize,
    },
    /// The method string could not be parsed as an HTTP method
    InvalidMethod {
        /// The rejected method string
        method: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::EmptyParamName { pattern, segment } => {
                write!(
                    f,
                    "route pattern '{}': segment '{}' declares a parameter without a name",
                    pattern, segment
                )
            }
            RouterError::UnclosedBrace { pattern, segment } => {
                write!(
                    f,
                    "route pattern '{}': segment '{}' opens '{{' without a closing '}}'",
                    pattern, segment
                )
            }
            RouterError::InvalidConstraint {
                pattern,
                param,
                reason,
            } => {
                write!(
                    f,
                    "route pattern '{}': constraint for parameter '{}' is not a valid regex: {}",
                    pattern, param, reason
                )
            }
            RouterError::PatternTooLarge { pattern, limit } => {
                write!(
                    f,
                    "route pattern '{}': compiled matcher exceeds size limit of {} bytes",
                    pattern, limit
                )
            }
            RouterError::InvalidMethod { method } => {
                write!(f, "invalid HTTP method '{}'", method)
            }
        }
    }
}

impl std::error::Error for RouterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_pattern_and_segment() {
        let err = RouterError::UnclosedBrace {
            pattern: "/users/{id".to_string(),
            segment: "{id".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/users/{id"));
        assert!(msg.contains("without a closing '}'"));
    }

    #[test]
    fn test_display_invalid_method() {
        let err = RouterError::InvalidMethod {
            method: "GE T".to_string(),
        };
        assert_eq!(err.to_string(), "invalid HTTP method 'GE T'");
    }
}
