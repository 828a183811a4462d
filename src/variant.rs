//! Build variants: one flavor per dimension combined with a build type.

use cruet::Inflector;
use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::config::{BuildType, Config, ProductFlavor};
use crate::error::{Error, Result};

/// One build variant and the values resolved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub name: String,
    pub build_type: String,
    /// Combined flavor name, empty when no flavors are declared
    pub flavor_name: String,
    pub flavors: Vec<String>,
    pub debuggable: bool,
    pub application_id: Option<String>,
    pub version_name: Option<String>,
    pub version_code: Option<u32>,
}

/// Joins name parts the way variant names are formed: the first part as is,
/// every following part with an upper-cased first letter.
fn join_camel<'a, I: IntoIterator<Item = &'a str>>(parts: I) -> String {
    let mut joined = String::new();
    for part in parts {
        if joined.is_empty() {
            joined.push_str(part);
        } else {
            joined.push_str(&part.to_pascal_case());
        }
    }
    joined
}

/// Groups flavors by dimension, in declared dimension order.
fn flavors_by_dimension(config: &Config) -> Vec<Vec<(&str, &ProductFlavor)>> {
    let mut groups: IndexMap<&str, Vec<(&str, &ProductFlavor)>> = IndexMap::new();
    for dimension in &config.flavor_dimensions {
        groups.insert(dimension.as_str(), Vec::new());
    }
    for (name, flavor) in &config.product_flavors {
        let dimension = flavor.dimension.as_deref().unwrap_or("");
        groups.entry(dimension).or_default().push((name.as_str(), flavor));
    }
    groups.into_values().filter(|group| !group.is_empty()).collect()
}

/// Cartesian product of the flavor groups, preserving group order.
fn flavor_combinations<'a>(
    groups: &[Vec<(&'a str, &'a ProductFlavor)>],
) -> Vec<Vec<(&'a str, &'a ProductFlavor)>> {
    let mut combinations = vec![Vec::new()];
    for group in groups {
        let mut next = Vec::with_capacity(combinations.len() * group.len());
        for combination in &combinations {
            for flavor in group {
                let mut extended = combination.clone();
                extended.push(*flavor);
                next.push(extended);
            }
        }
        combinations = next;
    }
    combinations
}

fn append_suffixes<'a, I: IntoIterator<Item = Option<&'a str>>>(
    base: Option<&str>,
    suffixes: I,
) -> Option<String> {
    let mut value = base?.to_string();
    for suffix in suffixes.into_iter().flatten() {
        value.push_str(suffix);
    }
    Some(value)
}

fn resolve_variant(config: &Config, flavors: &[(&str, &ProductFlavor)], build_type: &BuildType) -> Variant {
    let flavor_name = join_camel(flavors.iter().map(|(name, _)| *name));
    let name = join_camel(
        flavors.iter().map(|(name, _)| *name).chain(std::iter::once(build_type.name.as_str())),
    );

    let module = config.module.as_ref();
    let application_id = append_suffixes(
        module.and_then(|m| m.application_id()),
        flavors
            .iter()
            .map(|(_, f)| f.application_id_suffix.as_deref())
            .chain(std::iter::once(build_type.options.application_id_suffix.as_deref())),
    );
    let version_name = append_suffixes(
        module.and_then(|m| m.version_name()),
        flavors
            .iter()
            .map(|(_, f)| f.version_name_suffix.as_deref())
            .chain(std::iter::once(build_type.options.version_name_suffix.as_deref())),
    );
    let version_code = flavors
        .iter()
        .rev()
        .find_map(|(_, f)| f.version_code)
        .or(module.and_then(|m| m.version_code()));

    Variant {
        name,
        build_type: build_type.name.clone(),
        flavor_name,
        flavors: flavors.iter().map(|(name, _)| name.to_string()).collect(),
        debuggable: build_type.is_debuggable(),
        application_id,
        version_name,
        version_code,
    }
}

/// Every variant the descriptor declares, flavors first then build types.
pub fn compute_variants(config: &Config) -> Vec<Variant> {
    let groups = flavors_by_dimension(config);
    let combinations = flavor_combinations(&groups);

    let mut variants = Vec::with_capacity(combinations.len() * config.build_types.len());
    for combination in &combinations {
        for build_type in &config.build_types {
            variants.push(resolve_variant(config, combination, build_type));
        }
    }
    variants
}

/// Excludes variants whose names match any of the configured glob patterns.
#[derive(Debug)]
pub struct VariantFilter {
    excluded: GlobSet,
}

impl VariantFilter {
    /// # Errors
    /// * `Error::ValidationError` if a pattern does not compile
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder.add(Glob::new(pattern).map_err(|e| {
                Error::ValidationError(format!("invalid variant exclude pattern '{pattern}': {e}"))
            })?);
        }
        let excluded = builder
            .build()
            .map_err(|e| Error::ValidationError(format!("variant filter failed to build: {e}")))?;
        Ok(Self { excluded })
    }

    pub fn is_enabled(&self, variant: &Variant) -> bool {
        if self.excluded.is_match(&variant.name) {
            debug!("Variant {} is excluded", variant.name);
            false
        } else {
            true
        }
    }
}
