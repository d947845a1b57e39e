//! AtlasDeployment Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{CommonStatus, ProjectDualReference, TagSpec};

/// AtlasDeployment resource specification
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "atlas.mongodb.com",
    version = "v1",
    kind = "AtlasDeployment",
    plural = "atlasdeployments",
    singular = "atlasdeployment",
    shortname = "ad",
    namespaced,
    status = "CommonStatus",
    printcolumn = r#"{"name": "Atlas Name", "type": "string", "jsonPath": ".spec.deploymentSpec.name"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AtlasDeploymentSpec {
    /// Parent project linkage
    #[serde(flatten)]
    pub project: ProjectDualReference,

    /// Advanced (dedicated) deployment configuration
    pub deployment_spec: AdvancedDeploymentSpec,
}

/// Dedicated cluster configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedDeploymentSpec {
    /// Cluster name in Atlas
    pub name: String,

    /// REPLICASET, SHARDED or GEOSHARDED
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,

    #[serde(rename = "mongoDBMajorVersion", skip_serializing_if = "Option::is_none")]
    pub mongo_db_major_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pit_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_protection_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_release_system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_cert_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_at_rest_provider: Option<String>,

    #[serde(rename = "diskSizeGB", skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i64>,

    /// Zones of the cluster
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replication_specs: Vec<AdvancedReplicationSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<TagSpec>,
}

/// One zone
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedReplicationSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub region_configs: Vec<AdvancedRegionConfig>,
}

/// One region of a zone
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedRegionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backing_provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electable_specs: Option<Specs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_specs: Option<Specs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_specs: Option<Specs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<AdvancedAutoScalingSpec>,
}

/// Node hardware
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Specs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<i32>,
    #[serde(rename = "diskIOPS", skip_serializing_if = "Option::is_none")]
    pub disk_iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs_volume_type: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedAutoScalingSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<ComputeSpec>,
    #[serde(rename = "diskGB", skip_serializing_if = "Option::is_none")]
    pub disk_gb: Option<DiskGB>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComputeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_down_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_instance_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_instance_size: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct DiskGB {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}
