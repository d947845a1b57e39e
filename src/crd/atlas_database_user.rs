//! AtlasDatabaseUser Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{CommonStatus, LocalObjectReference, ProjectDualReference, TagSpec};

/// AtlasDatabaseUser resource specification
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "atlas.mongodb.com",
    version = "v1",
    kind = "AtlasDatabaseUser",
    plural = "atlasdatabaseusers",
    singular = "atlasdatabaseuser",
    shortname = "adu",
    namespaced,
    status = "CommonStatus",
    printcolumn = r#"{"name": "Username", "type": "string", "jsonPath": ".spec.username"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AtlasDatabaseUserSpec {
    /// Parent project linkage
    #[serde(flatten)]
    pub project: ProjectDualReference,

    /// User name
    pub username: String,

    /// Authentication database
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Granted roles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleSpec>,

    /// Clusters and data lakes the user can access
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<ScopeSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<TagSpec>,

    /// Secret holding the password (SCRAM users only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_secret_ref: Option<LocalObjectReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x509_type: Option<String>,

    #[serde(rename = "awsIamType", skip_serializing_if = "Option::is_none")]
    pub aws_iam_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oidc_auth_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// RFC 3339 expiry date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_after_date: Option<String>,
}

fn default_database_name() -> String {
    "admin".to_string()
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleSpec {
    pub role_name: String,
    pub database_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ScopeSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}
