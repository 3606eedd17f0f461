//! Error handling types
//!
//! Errors are `Clone` because a single in-flight symbol load fans its outcome
//! out to every caller that joined it.

use crate::value_objects::DeclSite;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Shared, cloneable source error from a host collaborator
pub type SharedSource = Arc<dyn std::error::Error + Send + Sync>;

/// Main error type for Resumable Core
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// No registered base configuration matches a path and no default can be derived
    #[error("No configuration found for '{path}'. Known configurations: [{}]", .known.join(", "))]
    ConfigurationNotFound {
        /// The normalized path that was looked up
        path: String,
        /// Base URIs of every registered configuration
        known: Vec<String>,
    },

    /// Invalid or incomplete configuration
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// A loaded module does not export the requested symbol
    #[error("Module '{path}' has no export named '{symbol}'. Available exports: [{}]", .exports.join(", "))]
    MissingExport {
        /// Module path that was loaded
        path: String,
        /// Export name that was requested
        symbol: String,
        /// Export names the module actually provides
        exports: Vec<String>,
    },

    /// Explicit receiver does not satisfy the declared receiver type
    #[error("Wrong receiver type: expected '{expected}', got '{actual}'")]
    WrongReceiverType {
        /// Declared receiver type name
        expected: String,
        /// Runtime type name of the receiver that was passed
        actual: String,
    },

    /// A key value contains characters that are not attribute-safe
    #[error("Invalid key value '{value}' for property '{property}' of '{type_name}': only [a-z0-9_-] allowed")]
    Validation {
        /// Type whose key was being encoded
        type_name: String,
        /// Property holding the offending value
        property: String,
        /// Value after kebab-casing
        value: String,
    },

    /// Key text is not of the form `name:values`
    #[error("Malformed key '{key}': {message}")]
    MalformedKey {
        /// The offending key
        key: String,
        /// What is wrong with it
        message: String,
    },

    /// Key belongs to a different type
    #[error("Key '{key}' does not belong to '{expected}' (found '{actual}')")]
    NameMismatch {
        /// The offending key
        key: String,
        /// Kebab-cased type name that was expected
        expected: String,
        /// Name segment found in the key
        actual: String,
    },

    /// Key carries more values than the type declares
    #[error("Key '{key}' has {actual} values but '{type_name}' declares {expected}")]
    TooManyParts {
        /// The offending key
        key: String,
        /// Type whose key was being decoded
        type_name: String,
        /// Number of declared key properties
        expected: usize,
        /// Number of values found
        actual: usize,
    },

    /// Symbolic reference or base URI cannot be parsed or resolved
    #[error("Invalid reference '{reference}': {message}")]
    InvalidReference {
        /// The offending reference
        reference: String,
        /// Why it could not be resolved
        message: String,
    },

    /// Host module loader failed (network, parse, missing module)
    #[error("Failed to load module '{path}': {message}")]
    Load {
        /// Module path handed to the loader
        path: String,
        /// Loader failure description
        message: String,
        /// Optional source error
        #[source]
        source: Option<SharedSource>,
    },

    /// Service or component could not be produced
    #[error("Service '{key}' unavailable: {message}")]
    Service {
        /// Key or type name that was requested
        key: String,
        /// Why it is unavailable
        message: String,
    },

    /// Failure of an injected function, annotated with its declaration site
    #[error("{source}\nDECLARED {site}")]
    Declared {
        /// Where the injected function was constructed
        site: DeclSite,
        /// The failure being decorated
        source: Box<Error>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<SharedSource>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Configuration and registry error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration-not-found error
    pub fn configuration_not_found<S: Into<String>>(path: S, known: Vec<String>) -> Self {
        Self::ConfigurationNotFound {
            path: path.into(),
            known,
        }
    }

    /// Create an invalid reference error
    pub fn invalid_reference<R: Into<String>, M: Into<String>>(reference: R, message: M) -> Self {
        Self::InvalidReference {
            reference: reference.into(),
            message: message.into(),
        }
    }
}

// Symbol loading error creation methods
impl Error {
    /// Create a load error
    pub fn load<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a load error with source
    pub fn load_with_source<P, M, E>(path: P, message: M, source: E) -> Self
    where
        P: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Load {
            path: path.into(),
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Create a missing export error
    pub fn missing_export<P: Into<String>, S: Into<String>>(
        path: P,
        symbol: S,
        exports: Vec<String>,
    ) -> Self {
        Self::MissingExport {
            path: path.into(),
            symbol: symbol.into(),
            exports,
        }
    }
}

// Key codec error creation methods
impl Error {
    /// Create a key validation error
    pub fn validation<T, P, V>(type_name: T, property: P, value: V) -> Self
    where
        T: Into<String>,
        P: Into<String>,
        V: Into<String>,
    {
        Self::Validation {
            type_name: type_name.into(),
            property: property.into(),
            value: value.into(),
        }
    }

    /// Create a malformed key error
    pub fn malformed_key<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::MalformedKey {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a name mismatch error
    pub fn name_mismatch<K, E, A>(key: K, expected: E, actual: A) -> Self
    where
        K: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Self::NameMismatch {
            key: key.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a too-many-parts error
    pub fn too_many_parts<K: Into<String>, T: Into<String>>(
        key: K,
        type_name: T,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::TooManyParts {
            key: key.into(),
            type_name: type_name.into(),
            expected,
            actual,
        }
    }
}

// Injection error creation methods
impl Error {
    /// Create a wrong receiver type error
    pub fn wrong_receiver_type<E: Into<String>, A: Into<String>>(expected: E, actual: A) -> Self {
        Self::WrongReceiverType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a service error
    pub fn service<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::Service {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Annotate with a declaration site; no-op when none was captured
    pub fn declared(self, site: Option<&DeclSite>) -> Self {
        match site {
            Some(site) => Self::Declared {
                site: *site,
                source: Box::new(self),
            },
            None => self,
        }
    }

    /// Declaration site of the outermost decoration, if any
    pub fn decl_site(&self) -> Option<&DeclSite> {
        match self {
            Self::Declared { site, .. } => Some(site),
            _ => None,
        }
    }

    /// The undecorated error underneath any declaration-site annotations
    pub fn root(&self) -> &Error {
        match self {
            Self::Declared { source, .. } => source.root(),
            other => other,
        }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::io_with_source(source.to_string(), source)
    }
}
