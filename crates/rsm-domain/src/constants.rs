//! Domain constants
//!
//! Text conventions shared between the core and the surrounding framework.
//! Infrastructure-only constants live in `rsm_infrastructure::constants`.

// ============================================================================
// SYMBOL REFERENCE CONSTANTS
// ============================================================================

/// Export name used when a reference has an empty fragment
pub const DEFAULT_EXPORT_NAME: &str = "default";

/// Separates the export name from its encoded params inside a fragment
pub const SYMBOL_PARAM_SEPARATOR: char = '?';

/// Extension every module path is rewritten to before loading
pub const LOADABLE_EXTENSION: &str = "js";

/// Source-only extensions that never reach the loader as-is
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "jsx", "mts", "cts"];

/// Scheme used when a bare absolute path is given as a base URI
pub const FILE_SCHEME_PREFIX: &str = "file://";

// ============================================================================
// KEY CONSTANTS
// ============================================================================

/// Separator between the type name and the values of a service/component key
pub const KEY_SEPARATOR: char = ':';

/// Namespace prefixed to attribute names derived from keys
pub const KEY_ATTRIBUTE_NAMESPACE: &str = "::";

// ============================================================================
// INJECTION CONSTANTS
// ============================================================================

/// Attribute marking an element as an injection boundary
pub const BOUNDARY_ATTRIBUTE: &str = "::injector";
