//! Blueprints: independent code-generation units.
//!
//! A blueprint is configured once per build, after the module configuration
//! is final, then asked to emit files once for every variant. The
//! [`Driver`](crate::driver::Driver) owns that sequence; blueprints only
//! decide whether they run and what they write.

use std::path::{Path, PathBuf};

use cruet::Inflector;

use crate::config::Config;
use crate::error::Result;
use crate::host::Host;
use crate::module::Coordinates;
use crate::paths::OutputDirectorySet;
use crate::renderer::TemplateRenderer;
use crate::variant::Variant;
use crate::writer::CodeWriter;

pub mod build_profile;
pub mod languages_schema;
pub mod xml_resources;

pub use build_profile::BuildProfile;
pub use languages_schema::LanguagesSchema;
pub use xml_resources::XmlResources;

/// One code-generation responsibility.
pub trait Blueprint {
    /// Type name used as the log tag, e.g. `BuildProfile`.
    fn tag(&self) -> &'static str;

    /// Directory name of this blueprint's outputs, derived from [`tag`](Self::tag).
    fn name(&self) -> String {
        self.tag().to_camel_case()
    }

    /// Whether this blueprint runs at all. Read once, during configuration.
    fn is_enabled(&self) -> bool;

    /// Segment appended to the namespace to form the package name.
    fn package_name_suffix(&self) -> Option<&str> {
        None
    }

    /// Called once, after namespace resolution, when the blueprint is enabled.
    fn configure(&mut self, _host: &dyn Host, _coordinates: &Coordinates) -> Result<()> {
        Ok(())
    }

    /// Writes this blueprint's files for one variant.
    fn on_variant(&self, ctx: &VariantContext<'_>, emitter: &Emitter<'_>) -> Result<()>;
}

/// What a blueprint knows about the variant it emits for.
#[derive(Debug)]
pub struct VariantContext<'a> {
    pub variant: &'a Variant,
    pub coordinates: &'a Coordinates,
    pub dirs: &'a OutputDirectorySet,
}

/// Renders templates and writes the results for a blueprint.
pub struct Emitter<'a> {
    pub writer: &'a CodeWriter,
    pub renderer: &'a dyn TemplateRenderer,
}

impl Emitter<'_> {
    /// Renders `template` and writes it as `<file_name>.kt` under `package_name`.
    pub fn kotlin_file(
        &self,
        root: &Path,
        package_name: &str,
        file_name: &str,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<PathBuf> {
        let content = self.renderer.render(template, context)?;
        self.writer.write_kotlin(root, package_name, file_name, &content)
    }

    /// Renders `template` and writes it at `relative_path` under `root`.
    pub fn resource_file(
        &self,
        root: &Path,
        relative_path: &str,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<PathBuf> {
        let content = self.renderer.render(template, context)?;
        self.writer.write_resource(root, relative_path, &content)
    }
}

/// The blueprints shipped with sourcegen, configured from `config`.
pub fn default_blueprints(config: &Config) -> Vec<Box<dyn Blueprint>> {
    vec![
        Box::new(BuildProfile::new(config.features.build_profile)),
        Box::new(XmlResources::new(
            config.features.xml_resources,
            config.languages_schema.clone(),
        )),
        Box::new(LanguagesSchema::new(
            config.features.languages_schema,
            config.languages_schema.clone(),
        )),
    ]
}
