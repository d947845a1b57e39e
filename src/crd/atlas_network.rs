//! AtlasNetworkContainer and AtlasNetworkPeering Custom Resource Definitions
//!
//! Both kinds carry one configuration block per cloud provider; only the
//! block matching `provider` is ever populated.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{CommonStatus, ProjectDualReference};

/// AtlasNetworkContainer resource specification
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "atlas.mongodb.com",
    version = "v1",
    kind = "AtlasNetworkContainer",
    plural = "atlasnetworkcontainers",
    singular = "atlasnetworkcontainer",
    shortname = "anc",
    namespaced,
    status = "CommonStatus",
    printcolumn = r#"{"name": "Provider", "type": "string", "jsonPath": ".spec.provider"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AtlasNetworkContainerSpec {
    /// Parent project linkage
    #[serde(flatten)]
    pub project: ProjectDualReference,

    /// AWS, AZURE or GCP
    pub provider: String,

    /// Atlas id of an existing container
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Atlas side CIDR block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_configuration: Option<AwsContainerConfiguration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_configuration: Option<AzureContainerConfiguration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcp_configuration: Option<GcpContainerConfiguration>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AwsContainerConfiguration {
    /// Atlas region, e.g. US_EAST_1
    pub region_name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzureContainerConfiguration {
    /// Atlas region, e.g. US_EAST_2
    pub region: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GcpContainerConfiguration {
    /// Regions the global container is restricted to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
}

/// AtlasNetworkPeering resource specification
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "atlas.mongodb.com",
    version = "v1",
    kind = "AtlasNetworkPeering",
    plural = "atlasnetworkpeerings",
    singular = "atlasnetworkpeering",
    shortname = "anp",
    namespaced,
    status = "CommonStatus",
    printcolumn = r#"{"name": "Provider", "type": "string", "jsonPath": ".spec.provider"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AtlasNetworkPeeringSpec {
    /// Parent project linkage
    #[serde(flatten)]
    pub project: ProjectDualReference,

    /// Container the peering attaches to
    pub container_ref: ContainerDualReference,

    /// AWS, AZURE or GCP
    pub provider: String,

    /// Atlas id of an existing peering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_configuration: Option<AwsNetworkPeeringConfiguration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_configuration: Option<AzureNetworkPeeringConfiguration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcp_configuration: Option<GcpNetworkPeeringConfiguration>,
}

/// Container referenced by name (exported in the same run) or by Atlas id
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ContainerDualReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AwsNetworkPeeringConfiguration {
    pub accepter_region_name: String,
    pub aws_account_id: String,
    pub route_table_cidr_block: String,
    pub vpc_id: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzureNetworkPeeringConfiguration {
    pub azure_directory_id: String,
    pub azure_subscription_id: String,
    pub resource_group_name: String,
    #[serde(rename = "vNetName")]
    pub vnet_name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GcpNetworkPeeringConfiguration {
    pub gcp_project_id: String,
    pub network_name: String,
}
