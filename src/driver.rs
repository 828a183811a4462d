//! Drives blueprints through their lifecycle.
//!
//! ```text
//! Created --finalize_dsl--> Configured --on_variant--> Emitting(v) --finish--> EmittedAll
//!                      \--> Skipped (disabled; never emits)
//! ```
//!
//! Transitions are triggered by the host: `finalize_dsl` once after the
//! module configuration is final, `on_variant` for every reported variant in
//! the host's order, then `finish`. A failure while emitting one variant
//! leaves files written for earlier variants in place.

use std::fmt;

use log::{debug, info};
use serde::Serialize;

use crate::blueprint::{default_blueprints, Blueprint, Emitter, VariantContext};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::host::Host;
use crate::module::Coordinates;
use crate::paths::OutputDirectorySet;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::variant::Variant;
use crate::writer::CodeWriter;

/// Lifecycle state of one blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Configured,
    Skipped,
    Emitting(String),
    EmittedAll,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Created => f.write_str("created"),
            Lifecycle::Configured => f.write_str("configured"),
            Lifecycle::Skipped => f.write_str("skipped"),
            Lifecycle::Emitting(variant) => write!(f, "emitting({variant})"),
            Lifecycle::EmittedAll => f.write_str("emitted"),
        }
    }
}

/// Output directories a blueprint was emitted into for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Emission {
    pub blueprint: String,
    pub variant: String,
    pub dirs: OutputDirectorySet,
}

struct Unit {
    blueprint: Box<dyn Blueprint>,
    state: Lifecycle,
    coordinates: Option<Coordinates>,
}

/// Owns the blueprints of one build and the state machine around them.
pub struct Driver {
    writer: CodeWriter,
    renderer: Box<dyn TemplateRenderer>,
    units: Vec<Unit>,
}

impl Driver {
    pub fn new(writer: CodeWriter) -> Self {
        Self { writer, renderer: Box::new(MiniJinjaRenderer::new()), units: Vec::new() }
    }

    /// A driver holding the default blueprints configured from `config`.
    pub fn from_config(config: &Config, writer: CodeWriter) -> Self {
        let mut driver = Self::new(writer);
        for blueprint in default_blueprints(config) {
            driver.register(blueprint);
        }
        driver
    }

    pub fn with_renderer(mut self, renderer: Box<dyn TemplateRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn register(&mut self, blueprint: Box<dyn Blueprint>) -> &mut Self {
        self.units.push(Unit { blueprint, state: Lifecycle::Created, coordinates: None });
        self
    }

    pub fn writer(&self) -> &CodeWriter {
        &self.writer
    }

    /// Current state of every blueprint, keyed by name.
    pub fn states(&self) -> Vec<(String, Lifecycle)> {
        self.units.iter().map(|unit| (unit.blueprint.name(), unit.state.clone())).collect()
    }

    pub fn coordinates(&self, name: &str) -> Option<&Coordinates> {
        self.units
            .iter()
            .find(|unit| unit.blueprint.name() == name)
            .and_then(|unit| unit.coordinates.as_ref())
    }

    /// Resolves enablement and coordinates of every blueprint, and registers
    /// their directories with every build type and every reported variant
    /// of `host`.
    ///
    /// # Errors
    /// * `Error::LifecycleError` if called more than once
    pub fn finalize_dsl(&mut self, host: &mut dyn Host) -> Result<()> {
        let build_types: Vec<String> = host.build_types().iter().map(|b| b.name.clone()).collect();
        let variants: Vec<String> = host.variants()?.into_iter().map(|v| v.name).collect();

        for unit in &mut self.units {
            let tag = unit.blueprint.tag();
            if unit.state != Lifecycle::Created {
                return Err(Error::LifecycleError(format!("{tag} is already {}", unit.state)));
            }

            let enabled = unit.blueprint.is_enabled();
            debug!(
                "[{tag}] module={} enabled={enabled}",
                host.module().map(|m| m.kind()).unwrap_or("none")
            );

            let coordinates =
                Coordinates::resolve(host.module(), unit.blueprint.package_name_suffix());
            let name = unit.blueprint.name();
            for source_set in build_types.iter().chain(&variants) {
                host.register_source_dirs(source_set, &self.writer.output_dirs(&name, source_set));
            }

            if enabled {
                unit.blueprint.configure(&*host, &coordinates)?;
                unit.state = Lifecycle::Configured;
            } else {
                debug!("[{tag}] disabled, skipping");
                unit.state = Lifecycle::Skipped;
            }
            unit.coordinates = Some(coordinates);
        }
        Ok(())
    }

    /// Emits every enabled blueprint for `variant`.
    ///
    /// # Errors
    /// * `Error::LifecycleError` if [`finalize_dsl`](Self::finalize_dsl) has not run
    /// * `Error::EmissionError` wrapping the first blueprint failure
    pub fn on_variant(&mut self, variant: &Variant) -> Result<Vec<Emission>> {
        let mut emissions = Vec::new();
        for unit in &mut self.units {
            let tag = unit.blueprint.tag();
            match &unit.state {
                Lifecycle::Skipped => continue,
                Lifecycle::Configured | Lifecycle::Emitting(_) => {}
                state => {
                    return Err(Error::LifecycleError(format!(
                        "{tag} cannot emit for {} while {state}",
                        variant.name
                    )))
                }
            }
            let coordinates = unit.coordinates.as_ref().ok_or_else(|| {
                Error::LifecycleError(format!("{tag} has no resolved coordinates"))
            })?;

            let name = unit.blueprint.name();
            unit.state = Lifecycle::Emitting(variant.name.clone());
            let dirs = self.writer.output_dirs(&name, &variant.name);
            debug!("[{tag}] emitting {} into {}", variant.name, self.writer.source_output_dir().display());

            let ctx = VariantContext { variant, coordinates, dirs: &dirs };
            let emitter = Emitter { writer: &self.writer, renderer: &*self.renderer };
            self.writer
                .prepare(&dirs)
                .and_then(|()| unit.blueprint.on_variant(&ctx, &emitter))
                .map_err(|source| Error::EmissionError {
                    blueprint: name.clone(),
                    variant: variant.name.clone(),
                    source: Box::new(source),
                })?;

            emissions.push(Emission { blueprint: name, variant: variant.name.clone(), dirs });
        }
        Ok(emissions)
    }

    /// Marks every blueprint that emitted, or was ready to, as done.
    pub fn finish(&mut self) {
        for unit in &mut self.units {
            if matches!(unit.state, Lifecycle::Configured | Lifecycle::Emitting(_)) {
                unit.state = Lifecycle::EmittedAll;
            }
        }
    }

    /// Runs the whole lifecycle against `host`.
    pub fn run(&mut self, host: &mut dyn Host) -> Result<Vec<Emission>> {
        self.finalize_dsl(host)?;

        let mut emissions = Vec::new();
        for variant in host.variants()? {
            emissions.extend(self.on_variant(&variant)?);
        }
        self.finish();

        info!("Generated {} variant output(s)", emissions.len());
        Ok(emissions)
    }
}
