//! AtlasProject Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{CommonStatus, LocalObjectReference, TagSpec};

/// AtlasProject resource specification
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "atlas.mongodb.com",
    version = "v1",
    kind = "AtlasProject",
    plural = "atlasprojects",
    singular = "atlasproject",
    shortname = "ap",
    namespaced,
    status = "CommonStatus",
    printcolumn = r#"{"name": "Atlas Name", "type": "string", "jsonPath": ".spec.name"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AtlasProjectSpec {
    /// Project name in Atlas
    pub name: String,

    /// Credentials secret used to reach the project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_secret_ref: Option<LocalObjectReference>,

    /// Region usage restrictions (e.g. GOV_REGIONS_ONLY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_usage_restrictions: Option<String>,

    /// Create the default Atlas alert configurations
    #[serde(default = "default_true")]
    pub with_default_alerts_settings: bool,

    /// Project feature settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProjectSettings>,

    /// Project tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagSpec>,
}

fn default_true() -> bool {
    true
}

/// Project feature settings
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_collect_database_specifics_statistics_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_data_explorer_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_extended_storage_sizes_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_performance_advisor_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_realtime_performance_panel_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_schema_advisor_enabled: Option<bool>,
}
