//! Embedded CRD definitions, keyed by operator version and resource kind
//!
//! Two layouts are embedded at build time: one file per resource per version
//! under `crds/split/<version>/<Kind>.yaml`, and one multi-document file per
//! version under `crds/bundled/<version>.yaml`. Both answer lookups the same
//! way.

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;

use crate::error::{Error, Result};

const CRD_KIND: &str = "CustomResourceDefinition";

/// Lookup of CRD definitions by resource kind and operator version
pub trait CrdProvider: Send + Sync {
    /// Get the definition of `name` shipped with operator `version`
    ///
    /// An unknown version, or a known version without that resource, is a
    /// [`Error::NotFound`].
    fn get_resource(&self, name: &str, version: &str) -> Result<CustomResourceDefinition>;
}

/// One embedded single-resource CRD file
#[derive(Clone, Copy, Debug)]
pub struct SplitCrd {
    pub version: &'static str,
    pub kind: &'static str,
    pub content: &'static str,
}

/// One embedded multi-document CRD file
#[derive(Clone, Copy, Debug)]
pub struct BundledCrds {
    pub version: &'static str,
    pub content: &'static str,
}

const EMBEDDED_SPLIT: &[SplitCrd] = &[
    SplitCrd {
        version: "2.10.0",
        kind: "Group",
        content: include_str!("../../crds/split/2.10.0/Group.yaml"),
    },
    SplitCrd {
        version: "2.10.0",
        kind: "Cluster",
        content: include_str!("../../crds/split/2.10.0/Cluster.yaml"),
    },
    SplitCrd {
        version: "2.11.0",
        kind: "Group",
        content: include_str!("../../crds/split/2.11.0/Group.yaml"),
    },
    SplitCrd {
        version: "2.11.0",
        kind: "Cluster",
        content: include_str!("../../crds/split/2.11.0/Cluster.yaml"),
    },
];

const EMBEDDED_BUNDLED: &[BundledCrds] = &[
    BundledCrds {
        version: "2.10.0",
        content: include_str!("../../crds/bundled/2.10.0.yaml"),
    },
    BundledCrds {
        version: "2.11.0",
        content: include_str!("../../crds/bundled/2.11.0.yaml"),
    },
];

/// Provider over one file per resource per version
#[derive(Clone, Debug)]
pub struct SplitCrdProvider {
    files: &'static [SplitCrd],
}

impl SplitCrdProvider {
    /// Provider over the given files
    pub fn new(files: &'static [SplitCrd]) -> Self {
        Self { files }
    }

    /// Operator versions with at least one embedded file
    pub fn versions(&self) -> Vec<&'static str> {
        let mut versions: Vec<_> = self.files.iter().map(|f| f.version).collect();
        versions.dedup();
        versions
    }
}

impl Default for SplitCrdProvider {
    fn default() -> Self {
        Self::new(EMBEDDED_SPLIT)
    }
}

impl CrdProvider for SplitCrdProvider {
    fn get_resource(&self, name: &str, version: &str) -> Result<CustomResourceDefinition> {
        let mut in_version = self.files.iter().filter(|f| f.version == version).peekable();
        if in_version.peek().is_none() {
            return Err(Error::not_found(format!("no CRDs for operator version {}", version)));
        }
        let file = in_version
            .find(|f| f.kind == name)
            .ok_or_else(|| Error::not_found(format!("CRD {} in operator version {}", name, version)))?;
        Ok(serde_yaml::from_str(file.content)?)
    }
}

/// Provider over one multi-document file per version
#[derive(Clone, Debug)]
pub struct BundledCrdProvider {
    bundles: &'static [BundledCrds],
}

impl BundledCrdProvider {
    /// Provider over the given bundles
    pub fn new(bundles: &'static [BundledCrds]) -> Self {
        Self { bundles }
    }
}

impl Default for BundledCrdProvider {
    fn default() -> Self {
        Self::new(EMBEDDED_BUNDLED)
    }
}

impl CrdProvider for BundledCrdProvider {
    fn get_resource(&self, name: &str, version: &str) -> Result<CustomResourceDefinition> {
        let bundle = self
            .bundles
            .iter()
            .find(|b| b.version == version)
            .ok_or_else(|| Error::not_found(format!("no CRDs for operator version {}", version)))?;

        for document in split_documents(bundle.content) {
            let value: serde_yaml::Value = serde_yaml::from_str(document)?;
            if value.get("kind").and_then(|k| k.as_str()) != Some(CRD_KIND) {
                continue;
            }
            let crd: CustomResourceDefinition = serde_yaml::from_value(value)?;
            if crd.spec.names.kind == name {
                return Ok(crd);
            }
        }

        Err(Error::not_found(format!("CRD {} in operator version {}", name, version)))
    }
}

/// Split a YAML stream on `---` boundaries, dropping documents without content
fn split_documents(content: &str) -> impl Iterator<Item = &str> {
    content
        .split("\n---")
        .map(|doc| doc.strip_prefix("---").unwrap_or(doc))
        .filter(|doc| {
            doc.lines()
                .map(str::trim)
                .any(|line| !line.is_empty() && !line.starts_with('#'))
        })
}
