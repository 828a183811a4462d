//! Per-variant output directory layout.
//!
//! Every generator writes into `<root>/<generator>/<variant>/<kind>`. The
//! functions here only compute paths; creating directories is left to the
//! [`CodeWriter`](crate::writer::CodeWriter).

use std::path::{Path, PathBuf};

use serde::Serialize;

/// The four kinds of generated source roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryKind {
    /// Kotlin sources
    Kotlin,
    /// Java sources
    Java,
    /// Android XML resources (`res`)
    Resources,
    /// Raw Java resources (`resources`)
    RawResources,
}

impl DirectoryKind {
    pub const ALL: [DirectoryKind; 4] =
        [Self::Kotlin, Self::Java, Self::Resources, Self::RawResources];

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Kotlin => "kotlin",
            Self::Java => "java",
            Self::Resources => "res",
            Self::RawResources => "resources",
        }
    }
}

/// Computes the directory of `kind` for `generator` and `variant` under `root`.
pub fn resolve_directory<P: AsRef<Path>>(
    root: P,
    kind: DirectoryKind,
    generator: &str,
    variant: &str,
) -> PathBuf {
    root.as_ref().join(generator).join(variant).join(kind.dir_name())
}

/// The four directories one generator owns for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDirectorySet {
    pub kotlin: PathBuf,
    pub java: PathBuf,
    pub res: PathBuf,
    pub resources: PathBuf,
}

impl OutputDirectorySet {
    pub fn resolve<P: AsRef<Path>>(root: P, generator: &str, variant: &str) -> Self {
        let root = root.as_ref();
        Self {
            kotlin: resolve_directory(root, DirectoryKind::Kotlin, generator, variant),
            java: resolve_directory(root, DirectoryKind::Java, generator, variant),
            res: resolve_directory(root, DirectoryKind::Resources, generator, variant),
            resources: resolve_directory(root, DirectoryKind::RawResources, generator, variant),
        }
    }

    pub fn get(&self, kind: DirectoryKind) -> &Path {
        match kind {
            DirectoryKind::Kotlin => &self.kotlin,
            DirectoryKind::Java => &self.java,
            DirectoryKind::Resources => &self.res,
            DirectoryKind::RawResources => &self.resources,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        DirectoryKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}
