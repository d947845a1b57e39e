//! AtlasIPAccessList Custom Resource Definition

use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{CommonStatus, ProjectDualReference};

/// AtlasIPAccessList resource specification
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "atlas.mongodb.com",
    version = "v1",
    kind = "AtlasIPAccessList",
    plural = "atlasipaccesslists",
    singular = "atlasipaccesslist",
    shortname = "aip",
    namespaced,
    status = "CommonStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct AtlasIPAccessListSpec {
    /// Parent project linkage
    #[serde(flatten)]
    pub project: ProjectDualReference,

    /// Access list entries
    pub entries: Vec<IPAccessEntry>,
}

/// One access list entry; exactly one of the address fields is set
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IPAccessEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_security_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_after_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
