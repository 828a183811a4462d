//! The build host the generators plug into.
//!
//! [`Host`] is the surface a driver needs from a build system: the module
//! extension, declared build types, the variants to emit for and a place to
//! register generated source roots. [`ProjectHost`] serves it from a parsed
//! project descriptor.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use crate::config::{BuildType, Config};
use crate::error::Result;
use crate::module::ModuleExtension;
use crate::paths::OutputDirectorySet;
use crate::variant::{compute_variants, Variant, VariantFilter};

/// Extension points a build system exposes to generators.
pub trait Host {
    /// Directory of the module being built.
    fn project_dir(&self) -> &Path;

    /// Module extension, if the module declares a recognised type.
    fn module(&self) -> Option<&ModuleExtension>;

    fn build_types(&self) -> &[BuildType];

    /// Variants to emit for, in the order the host reports them.
    fn variants(&self) -> Result<Vec<Variant>>;

    /// Adds `dirs` to the source set named `source_set`, a build type or a variant.
    fn register_source_dirs(&mut self, source_set: &str, dirs: &OutputDirectorySet);
}

/// Source roots registered for one build type or variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceSet {
    pub kotlin: Vec<PathBuf>,
    pub java: Vec<PathBuf>,
    pub res: Vec<PathBuf>,
    pub resources: Vec<PathBuf>,
}

fn push_unique(dirs: &mut Vec<PathBuf>, dir: &Path) {
    if !dirs.iter().any(|d| d == dir) {
        dirs.push(dir.to_path_buf());
    }
}

impl SourceSet {
    fn add(&mut self, dirs: &OutputDirectorySet) {
        push_unique(&mut self.kotlin, &dirs.kotlin);
        push_unique(&mut self.java, &dirs.java);
        push_unique(&mut self.res, &dirs.res);
        push_unique(&mut self.resources, &dirs.resources);
    }
}

/// A [`Host`] backed by a project descriptor.
#[derive(Debug)]
pub struct ProjectHost {
    project_dir: PathBuf,
    config: Config,
    selected: Vec<String>,
    source_sets: IndexMap<String, SourceSet>,
}

impl ProjectHost {
    pub fn new<P: Into<PathBuf>>(project_dir: P, config: Config) -> Self {
        Self {
            project_dir: project_dir.into(),
            config,
            selected: Vec::new(),
            source_sets: IndexMap::new(),
        }
    }

    /// Restricts reported variants to the given names. An empty list reports all.
    pub fn select_variants(mut self, names: Vec<String>) -> Self {
        let declared = compute_variants(&self.config);
        for name in &names {
            if !declared.iter().any(|variant| &variant.name == name) {
                warn!("Selected variant '{name}' matches no declared variant");
            }
        }
        self.selected = names;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build directory, resolved against the project directory.
    pub fn build_dir(&self) -> PathBuf {
        self.project_dir.join(&self.config.output.build_dir)
    }

    pub fn source_sets(&self) -> &IndexMap<String, SourceSet> {
        &self.source_sets
    }

    /// Writes the registered source sets as pretty JSON to `path`.
    pub fn write_source_sets(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.source_sets)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl Host for ProjectHost {
    fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn module(&self) -> Option<&ModuleExtension> {
        self.config.module.as_ref()
    }

    fn build_types(&self) -> &[BuildType] {
        &self.config.build_types
    }

    fn variants(&self) -> Result<Vec<Variant>> {
        let filter = VariantFilter::new(&self.config.variants.exclude)?;
        Ok(compute_variants(&self.config)
            .into_iter()
            .filter(|variant| filter.is_enabled(variant))
            .filter(|variant| self.selected.is_empty() || self.selected.contains(&variant.name))
            .collect())
    }

    fn register_source_dirs(&mut self, source_set: &str, dirs: &OutputDirectorySet) {
        debug!("Registering {} in source set {}", dirs.kotlin.display(), source_set);
        self.source_sets.entry(source_set.to_string()).or_default().add(dirs);
    }
}
