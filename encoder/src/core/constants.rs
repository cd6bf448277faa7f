// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "flatmetrics";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "flatmetrics.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "FLATMETRICS_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "FLATMETRICS_LOG";

/// Environment variable for the encoding mode
pub const ENV_MODE: &str = "FLATMETRICS_MODE";

/// Environment variable for the input format
pub const ENV_FORMAT: &str = "FLATMETRICS_FORMAT";

// =============================================================================
// I/O
// =============================================================================

/// Path value meaning stdin (input) or stdout (output)
pub const STDIO_PATH: &str = "-";

// =============================================================================
// Encoding
// =============================================================================

/// Host segment used when a resource carries no host identifier
pub const UNKNOWN_HOST: &str = "unknown-host";
