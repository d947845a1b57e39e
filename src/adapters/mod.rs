//! Adapters converting Atlas resources into Atlas Kubernetes Operator manifests
//!
//! Every converter is a pure function of a [`ConvertContext`] and one fetched
//! Atlas object. The only non-determinism is the disambiguation suffix of
//! collision-prone names, which comes from the context's [`SuffixSource`].

mod data_federation;
mod database_user;
mod deployment;
mod integration;
mod ip_access_list;
mod network;
mod project;
mod reference;
mod secrets;

pub use data_federation::*;
pub use database_user::*;
pub use deployment::*;
pub use integration::*;
pub use ip_access_list::*;
pub use network::*;
pub use project::*;
pub use reference::*;
pub use secrets::*;

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::crd::ProjectDualReference;
use crate::naming::{normalize, normalize_parts, NameDictionary, SuffixSource};

/// Label carrying the operator version the manifests target
pub const VERSION_LABEL: &str = "mongodb.com/atlas-resource-version";

/// Label marking a secret as Atlas credentials
pub const TYPE_LABEL: &str = "atlas.mongodb.com/type";

/// Value of [`TYPE_LABEL`] on credential secrets
pub const CREDENTIALS_TYPE: &str = "credentials";

/// Label carrying the Atlas project id on secrets
pub const PROJECT_ID_LABEL: &str = "atlas.mongodb.com/project-id";

/// Label carrying the project name on secrets
pub const PROJECT_NAME_LABEL: &str = "atlas.mongodb.com/project-name";

/// Immutable per-run inputs shared by all converters of one project
pub struct ConvertContext<'a> {
    /// Target namespace
    pub namespace: String,
    /// Atlas project id
    pub project_id: String,
    /// Atlas project name, as shown in Atlas
    pub project_name: String,
    /// Operator version written to [`VERSION_LABEL`]
    pub operator_version: String,
    /// Link resources to the project by external id instead of in-cluster reference
    pub independent: bool,
    /// Embed secret material instead of placeholders
    pub include_secrets: bool,
    /// Character substitutions for names
    pub dictionary: &'a NameDictionary,
    /// Source of disambiguation suffixes
    pub suffixes: &'a dyn SuffixSource,
}

impl std::fmt::Debug for ConvertContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertContext")
            .field("namespace", &self.namespace)
            .field("project_id", &self.project_id)
            .field("project_name", &self.project_name)
            .field("operator_version", &self.operator_version)
            .field("independent", &self.independent)
            .field("include_secrets", &self.include_secrets)
            .finish_non_exhaustive()
    }
}

impl ConvertContext<'_> {
    /// Kubernetes name of the AtlasProject
    pub fn project_resource_name(&self) -> String {
        normalize(&self.project_name, self.dictionary)
    }

    /// Name of the project's connection secret
    pub fn credentials_secret_name(&self) -> String {
        normalize_parts(&[&self.project_name, "credentials"], self.dictionary)
    }

    /// Normalize name parts prefixed with the project name
    pub fn project_scoped_name(&self, parts: &[&str]) -> String {
        let mut all = Vec::with_capacity(parts.len() + 1);
        all.push(self.project_name.as_str());
        all.extend_from_slice(parts);
        normalize_parts(&all, self.dictionary)
    }

    /// Project linkage for the current reference mode
    pub fn project_reference(&self) -> ProjectDualReference {
        build_reference(
            self.independent,
            &self.project_id,
            &self.project_resource_name(),
            &self.namespace,
            &self.credentials_secret_name(),
        )
    }

    /// Labels carried by every produced object
    pub fn version_labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(VERSION_LABEL.to_string(), self.operator_version.clone())])
    }

    /// Object metadata for a namespaced manifest
    pub fn object_meta(&self, name: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(self.namespace.clone()),
            labels: Some(self.version_labels()),
            ..Default::default()
        }
    }
}

/// Render an optional boolean as the `enabled`/`disabled` enum some schemas use
pub fn enabled_or_disabled(value: Option<bool>) -> Option<String> {
    value.map(|v| if v { "enabled" } else { "disabled" }.to_string())
}
