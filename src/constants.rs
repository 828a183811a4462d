//! Common constants used throughout sourcegen.

/// Supported project descriptor file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["sourcegen.json", "sourcegen.yml", "sourcegen.yaml"];

/// Namespace used when no module extension declares one
pub const DEFAULT_NAMESPACE: &str = "dev.sourcegen.app";

/// Build directory used when the descriptor does not set one
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Tool directory name under `generated/` and `intermediates/`
pub const TOOL_DIR: &str = "sourcegen";

/// Value reported when the commit hash cannot be read
pub const UNKNOWN_GIT_HASH: &str = "N/A";

/// File the host writes its source-set registrations to
pub const SOURCE_SETS_FILE: &str = "source-sets.json";
