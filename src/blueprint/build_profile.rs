//! Build-profile constants: variant, build type, version and commit of a build.

use log::debug;
use serde_json::json;

use crate::blueprint::{Blueprint, Emitter, VariantContext};
use crate::constants::UNKNOWN_GIT_HASH;
use crate::error::Result;
use crate::git::git_hash;
use crate::host::Host;
use crate::module::Coordinates;

const TEMPLATE: &str = include_str!("../../templates/BuildProfile.kt.j2");

/// Emits `BuildProfile.kt` into the `build` sub-package.
#[derive(Debug)]
pub struct BuildProfile {
    enabled: bool,
    git_hash: String,
}

impl BuildProfile {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, git_hash: UNKNOWN_GIT_HASH.to_string() }
    }
}

impl Blueprint for BuildProfile {
    fn tag(&self) -> &'static str {
        "BuildProfile"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn package_name_suffix(&self) -> Option<&str> {
        Some("build")
    }

    fn configure(&mut self, host: &dyn Host, _coordinates: &Coordinates) -> Result<()> {
        self.git_hash = git_hash(host.project_dir()).to_string();
        debug!("[{}] Commit hash: {}", self.tag(), self.git_hash);
        Ok(())
    }

    fn on_variant(&self, ctx: &VariantContext<'_>, emitter: &Emitter<'_>) -> Result<()> {
        let context = json!({
            "package_name": ctx.coordinates.package_name,
            "variant": ctx.variant,
            "git_hash": self.git_hash,
        });
        emitter.kotlin_file(
            &ctx.dirs.kotlin,
            &ctx.coordinates.package_name,
            "BuildProfile",
            TEMPLATE,
            &context,
        )?;
        Ok(())
    }
}
