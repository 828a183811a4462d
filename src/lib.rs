//! sourcegen generates per-variant sources for Android modules.
//! For every build variant it emits Kotlin sources and Android resources
//! (build-profile constants, per-app language resources, a language enum)
//! into variant-specific directories that the build registers as source roots.

/// Code-generation units and the contract they implement
pub mod blueprint;

/// Command-line interface module for the sourcegen application
pub mod cli;

/// Project descriptor loading and validation
/// Supports JSON and YAML formats (sourcegen.json, sourcegen.yml, sourcegen.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Blueprint lifecycle driver
pub mod driver;

/// Error types and handling for the sourcegen application
pub mod error;

/// Commit hash lookup
pub mod git;

/// Build host extension points
pub mod host;

/// Locale identifiers
pub mod locale;

/// Logger setup
pub mod logger;

/// Module extensions and namespace resolution
pub mod module;

/// Output directory layout
pub mod paths;

/// Template rendering
pub mod renderer;

/// Build variant computation and filtering
pub mod variant;

/// Filesystem output
pub mod writer;
