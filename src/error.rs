//! Error types for handler registration and route table finalization.

use std::fmt;

/// Registration error
///
/// Returned by [`crate::action::register_from_handler`] and its wrappers.
/// Both variants are raised before any endpoint is created, so a failed
/// registration leaves the route table untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A required argument was absent
    ///
    /// Raised when the route builder or the handler is missing, e.g. a
    /// handler name that does not resolve in a [`crate::handler::HandlerRegistry`].
    InvalidArgument {
        /// Name of the missing argument (`endpoints`, `action`, ...)
        argument: String,
    },
    /// The handler declares no usable route pattern
    ///
    /// Either no route attribute is present at all, or every declared
    /// attribute has an absent pattern.
    Configuration {
        /// Name of the offending handler
        handler: String,
        /// Human readable reason
        message: String,
    },
}

impl RegistrationError {
    pub(crate) fn invalid_argument(argument: impl Into<String>) -> Self {
        RegistrationError::InvalidArgument {
            argument: argument.into(),
        }
    }

    pub(crate) fn missing_pattern(handler: impl Into<String>) -> Self {
        RegistrationError::Configuration {
            handler: handler.into(),
            message: "Action must have a pattern. Is it missing a route attribute?".to_string(),
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::InvalidArgument { argument } => {
                write!(f, "Invalid argument: '{}' must be provided", argument)
            }
            RegistrationError::Configuration { handler, message } => {
                write!(f, "Configuration error for handler '{}': {}", handler, message)
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

/// Route table finalization error
///
/// Returned by [`crate::router::RouteTable::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    /// Two or more endpoints carry the same explicit route name
    ///
    /// Only raised when `RouterConfig::reject_duplicate_names` is enabled.
    DuplicateRouteName {
        /// The duplicated name
        name: String,
        /// Patterns of every endpoint carrying the name
        patterns: Vec<String>,
    },
}

impl fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTableError::DuplicateRouteName { name, patterns } => {
                write!(
                    f,
                    "Route table error: the route name '{}' is used by multiple endpoints ({}). \
                    Route names must be unique.",
                    name,
                    patterns.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for RouteTableError {}
