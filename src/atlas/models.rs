//! Atlas Admin API v2 resource shapes
//!
//! Only the fields the exporters read are modelled. Every struct tolerates
//! missing fields so that older and newer API revisions both decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Atlas project (called "group" by the API)
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub org_id: String,
    pub cluster_count: Option<i64>,
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_usage_restrictions: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_default_alerts_settings: Option<bool>,
}

/// Key/value tag attached to projects and clusters
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

/// Project level feature toggles
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupSettings {
    pub is_collect_database_specifics_statistics_enabled: Option<bool>,
    pub is_data_explorer_enabled: Option<bool>,
    pub is_extended_storage_sizes_enabled: Option<bool>,
    pub is_performance_advisor_enabled: Option<bool>,
    pub is_realtime_performance_panel_enabled: Option<bool>,
    pub is_schema_advisor_enabled: Option<bool>,
}

/// One IP access list entry
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkPermissionEntry {
    pub group_id: Option<String>,
    pub cidr_block: Option<String>,
    pub ip_address: Option<String>,
    pub aws_security_group: Option<String>,
    pub comment: Option<String>,
    pub delete_after_date: Option<DateTime<Utc>>,
}

/// Dedicated cluster as returned by the advanced clusters endpoint
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedClusterDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub name: String,
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
    pub disk_size_gb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replication_specs: Vec<ReplicationSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<ResourceTag>,
}

/// Zone of a cluster topology
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicationSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub region_configs: Vec<RegionConfig>,
}

/// Hardware and placement for one region of a zone
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backing_provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electable_specs: Option<HardwareSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_specs: Option<HardwareSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_specs: Option<HardwareSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<AutoScaling>,
}

/// Node hardware
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HardwareSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<i32>,
    #[serde(rename = "diskIOPS", skip_serializing_if = "Option::is_none")]
    pub disk_iops: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs_volume_type: Option<String>,
}

/// Compute and storage auto scaling
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoScaling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<ComputeAutoScaling>,
    #[serde(rename = "diskGB", skip_serializing_if = "Option::is_none")]
    pub disk_gb: Option<DiskAutoScaling>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputeAutoScaling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_down_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_instance_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_instance_size: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskAutoScaling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Database user
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudDatabaseUser {
    pub username: String,
    pub database_name: String,
    pub group_id: Option<String>,
    pub roles: Vec<DatabaseUserRole>,
    pub scopes: Vec<UserScope>,
    pub labels: Vec<ResourceTag>,
    #[serde(rename = "awsIAMType")]
    pub aws_iam_type: Option<String>,
    pub ldap_auth_type: Option<String>,
    pub oidc_auth_type: Option<String>,
    pub x509_type: Option<String>,
    pub description: Option<String>,
    pub delete_after_date: Option<DateTime<Utc>>,
}

impl CloudDatabaseUser {
    /// Whether the user authenticates with a password (SCRAM)
    pub fn uses_password(&self) -> bool {
        fn none_or_default(v: &Option<String>) -> bool {
            matches!(v.as_deref(), None | Some("") | Some("NONE"))
        }
        none_or_default(&self.aws_iam_type)
            && none_or_default(&self.ldap_auth_type)
            && none_or_default(&self.oidc_auth_type)
            && none_or_default(&self.x509_type)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseUserRole {
    pub role_name: String,
    pub database_name: String,
    pub collection_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UserScope {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

/// Network peering container
///
/// The API returns one flattened shape for all providers; which fields are
/// set depends on `provider_name`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudProviderContainer {
    pub id: Option<String>,
    pub provider_name: Option<String>,
    pub atlas_cidr_block: Option<String>,
    pub provisioned: Option<bool>,
    // AWS
    pub region_name: Option<String>,
    pub vpc_id: Option<String>,
    // Azure
    pub region: Option<String>,
    pub azure_subscription_id: Option<String>,
    pub vnet_name: Option<String>,
    // GCP
    pub regions: Vec<String>,
    pub gcp_project_id: Option<String>,
    pub network_name: Option<String>,
}

/// Network peering connection, flattened across providers like containers
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseNetworkPeeringConnectionSettings {
    pub id: Option<String>,
    pub container_id: String,
    pub provider_name: Option<String>,
    pub status_name: Option<String>,
    // AWS
    pub accepter_region_name: Option<String>,
    pub aws_account_id: Option<String>,
    pub route_table_cidr_block: Option<String>,
    pub vpc_id: Option<String>,
    pub connection_id: Option<String>,
    // Azure
    pub azure_directory_id: Option<String>,
    pub azure_subscription_id: Option<String>,
    pub resource_group_name: Option<String>,
    pub vnet_name: Option<String>,
    // GCP
    pub gcp_project_id: Option<String>,
    pub network_name: Option<String>,
}

/// Third party integration, flattened across integration types
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThirdPartyIntegration {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_: String,
    pub api_key: Option<String>,
    pub region: Option<String>,
    pub send_collection_latency_metrics: Option<bool>,
    pub send_database_metrics: Option<bool>,
    pub account_id: Option<String>,
    pub license_key: Option<String>,
    pub read_token: Option<String>,
    pub write_token: Option<String>,
    pub service_key: Option<String>,
    pub api_token: Option<String>,
    pub channel_name: Option<String>,
    pub team_name: Option<String>,
    pub routing_key: Option<String>,
    pub url: Option<String>,
    pub secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub enabled: Option<bool>,
    pub service_discovery: Option<String>,
    pub microsoft_teams_webhook_url: Option<String>,
}

/// Data federation (data lake tenant)
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLakeTenant {
    pub name: String,
    pub group_id: Option<String>,
    pub state: Option<String>,
    pub cloud_provider_config: Option<DataLakeCloudProviderConfig>,
    pub data_process_region: Option<DataLakeDataProcessRegion>,
    pub storage: Option<DataLakeStorage>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataLakeCloudProviderConfig {
    pub aws: Option<DataLakeAwsConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLakeAwsConfig {
    pub role_id: Option<String>,
    pub test_s3_bucket: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLakeDataProcessRegion {
    pub cloud_provider: Option<String>,
    pub region: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataLakeStorage {
    pub databases: Vec<DataLakeDatabase>,
    pub stores: Vec<DataLakeStore>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLakeDatabase {
    pub name: String,
    pub max_wildcard_collections: Option<i32>,
    pub collections: Vec<DataLakeCollection>,
    pub views: Vec<DataLakeView>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLakeCollection {
    pub name: String,
    pub data_sources: Vec<DataLakeDataSource>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLakeDataSource {
    pub store_name: Option<String>,
    pub allow_insecure: Option<bool>,
    pub collection: Option<String>,
    pub collection_regex: Option<String>,
    pub database: Option<String>,
    pub database_regex: Option<String>,
    pub default_format: Option<String>,
    pub path: Option<String>,
    pub provenance_field_name: Option<String>,
    pub urls: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataLakeView {
    pub name: String,
    pub source: Option<String>,
    pub pipeline: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLakeStore {
    pub name: String,
    pub provider: String,
    pub additional_storage_classes: Vec<String>,
    pub bucket: Option<String>,
    pub delimiter: Option<String>,
    pub include_tags: Option<bool>,
    pub prefix: Option<String>,
    pub public: Option<bool>,
    pub region: Option<String>,
}
