//! Project descriptor handling for sourcegen.
//! This module loads the per-module descriptor (`sourcegen.json`, `sourcegen.yml`
//! or `sourcegen.yaml`), parses it and validates it before any generator runs.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use globset::Glob;
use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;

use crate::constants::{CONFIG_FILES, DEFAULT_BUILD_DIR};
use crate::error::{Error, Result};
use crate::locale::LocaleId;
use crate::module::ModuleExtension;

/// Per build type options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildTypeOptions {
    /// Defaults to `true` for the `debug` build type and `false` otherwise
    #[serde(default)]
    pub debuggable: Option<bool>,
    #[serde(default)]
    pub application_id_suffix: Option<String>,
    #[serde(default)]
    pub version_name_suffix: Option<String>,
}

/// A declared build type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildType {
    pub name: String,
    pub options: BuildTypeOptions,
}

impl BuildType {
    pub fn new<S: Into<String>>(name: S, options: BuildTypeOptions) -> Self {
        Self { name: name.into(), options }
    }

    pub fn is_debuggable(&self) -> bool {
        self.options.debuggable.unwrap_or(self.name == "debug")
    }
}

/// Per product flavor options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductFlavor {
    #[serde(default)]
    pub dimension: Option<String>,
    #[serde(default)]
    pub application_id_suffix: Option<String>,
    #[serde(default)]
    pub version_name_suffix: Option<String>,
    #[serde(default)]
    pub version_code: Option<u32>,
}

/// Feature flags, one per generator unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildFeatures {
    #[serde(default)]
    pub build_profile: bool,
    #[serde(default)]
    pub xml_resources: bool,
    #[serde(default)]
    pub languages_schema: bool,
}

/// Locales the application ships resources for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LanguagesSchemaOptions {
    /// Locale of the unqualified resources
    pub default_locale: LocaleId,
    #[serde(default)]
    pub supported_locales: Vec<LocaleId>,
}

impl LanguagesSchemaOptions {
    pub fn new(default_locale: LocaleId) -> Self {
        Self { default_locale, supported_locales: Vec::new() }
    }

    pub fn supported(mut self, locale: LocaleId) -> Self {
        self.supported_locales.push(locale);
        self
    }

    /// Default locale followed by the supported locales.
    ///
    /// A supported locale equal to the default one is skipped, since both
    /// would resolve to the unqualified resources.
    pub fn effective_locales(&self) -> Vec<LocaleId> {
        let mut locales = vec![self.default_locale.clone()];
        for locale in &self.supported_locales {
            if locales.contains(locale) {
                warn!("Locale '{locale}' is listed more than once, skipping duplicate");
                continue;
            }
            locales.push(locale.clone());
        }
        locales
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VariantFilterConfig {
    /// Glob patterns matched against variant names
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BUILD_DIR)
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { build_dir: default_build_dir() }
    }
}

/// Raw descriptor layout, before defaults are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    module: Option<ModuleExtension>,
    #[serde(default)]
    build_types: IndexMap<String, BuildTypeOptions>,
    #[serde(default)]
    flavor_dimensions: Vec<String>,
    #[serde(default)]
    product_flavors: IndexMap<String, ProductFlavor>,
    #[serde(default)]
    features: BuildFeatures,
    #[serde(default)]
    languages_schema: Option<LanguagesSchemaOptions>,
    #[serde(default)]
    variants: VariantFilterConfig,
    #[serde(default)]
    output: OutputConfig,
}

/// A validated project descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub module: Option<ModuleExtension>,
    pub build_types: Vec<BuildType>,
    pub flavor_dimensions: Vec<String>,
    pub product_flavors: IndexMap<String, ProductFlavor>,
    pub features: BuildFeatures,
    pub languages_schema: Option<LanguagesSchemaOptions>,
    pub variants: VariantFilterConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Checks the descriptor for values the generators cannot work with.
    ///
    /// # Errors
    /// * `Error::ValidationError` naming the first offending value
    pub fn validate(&self) -> Result<()> {
        for build_type in &self.build_types {
            check_identifier("build type", &build_type.name)?;
        }
        for dimension in &self.flavor_dimensions {
            check_identifier("flavor dimension", dimension)?;
        }
        for (name, flavor) in &self.product_flavors {
            check_identifier("product flavor", name)?;
            if self.flavor_dimensions.is_empty() {
                continue;
            }
            match &flavor.dimension {
                None => {
                    return Err(Error::ValidationError(format!(
                        "product flavor '{name}' must declare one of the flavor dimensions"
                    )));
                }
                Some(dimension) if !self.flavor_dimensions.contains(dimension) => {
                    return Err(Error::ValidationError(format!(
                        "product flavor '{name}' uses undeclared dimension '{dimension}'"
                    )));
                }
                Some(_) => {}
            }
        }

        let needs_languages = self.features.xml_resources || self.features.languages_schema;
        if needs_languages && self.languages_schema.is_none() {
            return Err(Error::ValidationError(
                "xmlResources and languagesSchema require a languagesSchema block".into(),
            ));
        }

        for pattern in &self.variants.exclude {
            Glob::new(pattern).map_err(|e| {
                Error::ValidationError(format!("invalid variant exclude pattern '{pattern}': {e}"))
            })?;
        }

        Ok(())
    }
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][A-Za-z0-9]*$").expect("identifier pattern is valid"))
}

fn check_identifier(what: &str, name: &str) -> Result<()> {
    if identifier_pattern().is_match(name) {
        Ok(())
    } else {
        Err(Error::ValidationError(format!(
            "{what} name '{name}' must be a lowerCamel identifier"
        )))
    }
}

fn default_build_types() -> Vec<BuildType> {
    vec![
        BuildType::new("debug", BuildTypeOptions::default()),
        BuildType::new("release", BuildTypeOptions::default()),
    ]
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let build_types = if raw.build_types.is_empty() {
            default_build_types()
        } else {
            raw.build_types
                .into_iter()
                .map(|(name, options)| BuildType::new(name, options))
                .collect()
        };

        Self {
            module: raw.module,
            build_types,
            flavor_dimensions: raw.flavor_dimensions,
            product_flavors: raw.product_flavors,
            features: raw.features,
            languages_schema: raw.languages_schema,
            variants: raw.variants,
            output: raw.output,
        }
    }
}

/// Populates a [`Config`] through setter calls; [`ConfigBuilder::build`]
/// validates the result.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    raw: RawConfig,
}

impl ConfigBuilder {
    pub fn module(mut self, module: ModuleExtension) -> Self {
        self.raw.module = Some(module);
        self
    }

    pub fn build_type<S: Into<String>>(mut self, name: S, options: BuildTypeOptions) -> Self {
        self.raw.build_types.insert(name.into(), options);
        self
    }

    pub fn flavor_dimension<S: Into<String>>(mut self, dimension: S) -> Self {
        self.raw.flavor_dimensions.push(dimension.into());
        self
    }

    pub fn product_flavor<S: Into<String>>(mut self, name: S, flavor: ProductFlavor) -> Self {
        self.raw.product_flavors.insert(name.into(), flavor);
        self
    }

    pub fn features(mut self, features: BuildFeatures) -> Self {
        self.raw.features = features;
        self
    }

    pub fn languages_schema(mut self, options: LanguagesSchemaOptions) -> Self {
        self.raw.languages_schema = Some(options);
        self
    }

    pub fn exclude_variant<S: Into<String>>(mut self, pattern: S) -> Self {
        self.raw.variants.exclude.push(pattern.into());
        self
    }

    pub fn build_dir<P: Into<PathBuf>>(mut self, build_dir: P) -> Self {
        self.raw.output.build_dir = build_dir.into();
        self
    }

    /// # Errors
    /// * `Error::ValidationError` if the populated values are inconsistent
    pub fn build(self) -> Result<Config> {
        let config = Config::from(self.raw);
        config.validate()?;
        Ok(config)
    }
}

/// Finds the descriptor in `project_dir`, trying each of `config_files` in order.
///
/// # Returns
/// * `Result<PathBuf>` - Path of the first descriptor that exists
///
/// # Errors
/// * `Error::ConfigError` if none of the files exist
pub fn find_config<P: AsRef<Path>>(project_dir: P, config_files: &[&str]) -> Result<PathBuf> {
    for file in config_files {
        let config_path = project_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(config_path);
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found (tried: {})",
        config_files.join(", ")
    )))
}

/// Parses descriptor content, trying JSON first and YAML second, then validates it.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
/// * `Error::ValidationError` if the parsed values are inconsistent
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?,
    };

    let config = Config::from(raw);
    config.validate()?;
    Ok(config)
}

/// Loads the descriptor from `config_path`, or discovers it in `project_dir`.
pub fn get_config<P: AsRef<Path>>(project_dir: P, config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config(project_dir, &CONFIG_FILES)?,
    };
    let content = std::fs::read_to_string(&path)?;
    parse_config(&content)
}
