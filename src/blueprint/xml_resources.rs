//! Per-app language resources.

use serde_json::json;

use crate::blueprint::{Blueprint, Emitter, VariantContext};
use crate::config::LanguagesSchemaOptions;
use crate::error::{Error, Result};
use crate::host::Host;
use crate::locale::LocaleId;
use crate::module::Coordinates;

const LOCALES_CONFIG_TEMPLATE: &str = include_str!("../../templates/locales_config.xml.j2");
const RESOURCES_PROPERTIES_TEMPLATE: &str = include_str!("../../templates/resources.properties.j2");

/// Emits `res/xml/locales_config.xml` and `res/resources.properties`.
#[derive(Debug)]
pub struct XmlResources {
    enabled: bool,
    options: Option<LanguagesSchemaOptions>,
    locales: Vec<LocaleId>,
}

impl XmlResources {
    pub fn new(enabled: bool, options: Option<LanguagesSchemaOptions>) -> Self {
        Self { enabled, options, locales: Vec::new() }
    }
}

impl Blueprint for XmlResources {
    fn tag(&self) -> &'static str {
        "XmlResources"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn configure(&mut self, _host: &dyn Host, _coordinates: &Coordinates) -> Result<()> {
        let options = self.options.as_ref().ok_or_else(|| {
            Error::ConfigError("xmlResources needs a languagesSchema block".to_string())
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
            .map(|locale| json!({ "tag": locale.tag() }))
            .collect();
        let context = json!({
            "locales": locales,
            "default_locale": options.default_locale.tag(),
        });

        emitter.resource_file(
            &ctx.dirs.res,
            "xml/locales_config.xml",
            LOCALES_CONFIG_TEMPLATE,
            &context,
        )?;
        emitter.resource_file(
            &ctx.dirs.res,
            "resources.properties",
            RESOURCES_PROPERTIES_TEMPLATE,
            &context,
        )?;
        Ok(())
    }
}
