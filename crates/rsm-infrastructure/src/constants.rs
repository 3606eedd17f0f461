//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `rsm_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "rsm.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "rsm";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "RSM";

/// Separator between nested keys in environment variables (`RSM_LOGGING__LEVEL`)
pub const CONFIG_ENV_NESTING: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "RSM_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "rsm";
