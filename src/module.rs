//! Module extensions and namespace resolution.
//!
//! A module is either an application, a library or a dynamic feature. Each
//! kind may declare a namespace; applications can also fall back to their
//! application id. Generated packages are rooted at the resolved namespace.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_NAMESPACE;

/// The module type a descriptor declares, with the fields each kind exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ModuleExtension {
    #[serde(rename_all = "camelCase")]
    Application {
        #[serde(default)]
        namespace: Option<String>,
        #[serde(default)]
        application_id: Option<String>,
        #[serde(default)]
        version_name: Option<String>,
        #[serde(default)]
        version_code: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    Library {
        #[serde(default)]
        namespace: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    DynamicFeature {
        #[serde(default)]
        namespace: Option<String>,
    },
}

impl ModuleExtension {
    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Application { .. } => "application",
            Self::Library { .. } => "library",
            Self::DynamicFeature { .. } => "dynamic-feature",
        }
    }

    /// Declared namespace; applications fall back to their application id.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Application { namespace, application_id, .. } => {
                namespace.as_deref().or(application_id.as_deref())
            }
            Self::Library { namespace } | Self::DynamicFeature { namespace } => {
                namespace.as_deref()
            }
        }
    }

    pub fn application_id(&self) -> Option<&str> {
        match self {
            Self::Application { application_id, .. } => application_id.as_deref(),
            _ => None,
        }
    }

    pub fn version_name(&self) -> Option<&str> {
        match self {
            Self::Application { version_name, .. } => version_name.as_deref(),
            _ => None,
        }
    }

    pub fn version_code(&self) -> Option<u32> {
        match self {
            Self::Application { version_code, .. } => *version_code,
            _ => None,
        }
    }
}

/// Namespace and package a blueprint generates into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub namespace: String,
    pub package_name: String,
}

impl Coordinates {
    /// Resolves the namespace of `module` and appends `suffix` to form the
    /// package name.
    ///
    /// A missing module or a module without any namespace resolves to
    /// [`DEFAULT_NAMESPACE`] instead of failing.
    pub fn resolve(module: Option<&ModuleExtension>, suffix: Option<&str>) -> Self {
        let namespace = match module {
            Some(module) => match module.namespace() {
                Some(namespace) => namespace.to_string(),
                None => {
                    debug!(
                        "{} module declares no namespace, using {}",
                        module.kind(),
                        DEFAULT_NAMESPACE
                    );
                    DEFAULT_NAMESPACE.to_string()
                }
            },
            None => {
                warn!("No module extension found, using namespace {DEFAULT_NAMESPACE}");
                DEFAULT_NAMESPACE.to_string()
            }
        };

        let package_name = match suffix {
            Some(suffix) => format!("{namespace}.{suffix}"),
            None => namespace.clone(),
        };

        Self { namespace, package_name }
    }
}
