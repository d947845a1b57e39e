//! Types shared by several Atlas Kubernetes Operator resources

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to an object in the same namespace
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct LocalObjectReference {
    /// Object name
    pub name: String,
}

/// Reference to an object, optionally in another namespace
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ResourceRefNamespaced {
    /// Object name
    pub name: String,

    /// Object namespace; defaults to the referring object's namespace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Reference to a project that is not managed in-cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ExternalProjectReference {
    /// Atlas project id
    pub id: String,
}

/// How a resource is linked to its parent project
///
/// Exactly one linkage is ever set: either an in-cluster `projectRef`, or an
/// external project id together with the credentials secret used to reach it.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum ProjectDualReference {
    /// Independent mode
    External {
        #[serde(rename = "externalProjectRef")]
        external_project_ref: ExternalProjectReference,
        #[serde(rename = "connectionSecret")]
        connection_secret: LocalObjectReference,
    },
    /// Dependent mode
    Project {
        #[serde(rename = "projectRef")]
        project_ref: ResourceRefNamespaced,
    },
}

impl ProjectDualReference {
    /// The in-cluster project reference, if this is dependent mode
    pub fn project_ref(&self) -> Option<&ResourceRefNamespaced> {
        match self {
            ProjectDualReference::Project { project_ref } => Some(project_ref),
            ProjectDualReference::External { .. } => None,
        }
    }

    /// The external project id, if this is independent mode
    pub fn external_project_id(&self) -> Option<&str> {
        match self {
            ProjectDualReference::External {
                external_project_ref,
                ..
            } => Some(&external_project_ref.id),
            ProjectDualReference::Project { .. } => None,
        }
    }

    /// The connection secret, set exactly when the external reference is
    pub fn connection_secret(&self) -> Option<&LocalObjectReference> {
        match self {
            ProjectDualReference::External {
                connection_secret, ..
            } => Some(connection_secret),
            ProjectDualReference::Project { .. } => None,
        }
    }
}

/// Key/value pair used for tags and labels
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct TagSpec {
    pub key: String,
    pub value: String,
}

/// Status of an exported resource
///
/// Status is owned by the operator once the manifest is applied, so the
/// exporter always writes it empty.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct CommonStatus {}
