//! Kotlin enumeration of the supported languages.

use serde_json::json;

use crate::blueprint::{Blueprint, Emitter, VariantContext};
use crate::config::LanguagesSchemaOptions;
use crate::error::{Error, Result};
use crate::host::Host;
use crate::locale::LocaleId;
use crate::module::Coordinates;

const TEMPLATE: &str = include_str!("../../templates/AppLanguage.kt.j2");

/// Emits `AppLanguage.kt` into the `locale` sub-package.
#[derive(Debug)]
pub struct LanguagesSchema {
    enabled: bool,
    options: Option<LanguagesSchemaOptions>,
    locales: Vec<LocaleId>,
}

impl LanguagesSchema {
    pub fn new(enabled: bool, options: Option<LanguagesSchemaOptions>) -> Self {
        Self { enabled, options, locales: Vec::new() }
    }
}

impl Blueprint for LanguagesSchema {
    fn tag(&self) -> &'static str {
        "LanguagesSchema"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn package_name_suffix(&self) -> Option<&str> {
        Some("locale")
    }

    fn configure(&mut self, _host: &dyn Host, _coordinates: &Coordinates) -> Result<()> {
        let options = self.options.as_ref().ok_or_else(|| {
            Error::ConfigError("languagesSchema needs a languagesSchema block".to_string())
        })?;
        self.locales = options.effective_locales();
        Ok(())
    }

    fn on_variant(&self, ctx: &VariantContext<'_>, emitter: &Emitter<'_>) -> Result<()> {
        let Some(options) = &self.options else {
            return Err(Error::LifecycleError(format!("{} emitted before configure", self.tag())));
        };

        let locales: Vec<_> = self
            .locales
            .iter()
            .map(|locale| {
                json!({
                    "constant": locale.constant_name(),
                    "tag": locale.tag(),
                    "language": locale.language(),
                    "region": locale.region(),
                })
            })
            .collect();
        let context = json!({
            "package_name": ctx.coordinates.package_name,
            "locales": locales,
            "default_constant": options.default_locale.constant_name(),
        });

        emitter.kotlin_file(
            &ctx.dirs.kotlin,
            &ctx.coordinates.package_name,
            "AppLanguage",
            TEMPLATE,
            &context,
        )?;
        Ok(())
    }
}
