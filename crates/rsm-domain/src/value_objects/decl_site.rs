//! Declaration-site markers

use serde::Serialize;
use std::fmt;
use std::panic::Location;

/// Source location where an injected function was constructed
///
/// Captured with `#[track_caller]`, so constructors that take a `DeclSite`
/// implicitly record the caller's file, line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DeclSite {
    /// Source file path as reported by the compiler
    pub file: &'static str,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl DeclSite {
    /// Capture the location of the (tracked) caller
    #[track_caller]
    pub fn capture() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for DeclSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for DeclSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
