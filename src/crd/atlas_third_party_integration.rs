//! AtlasThirdPartyIntegration Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{CommonStatus, LocalObjectReference, ProjectDualReference};

/// AtlasThirdPartyIntegration resource specification
///
/// `type` selects which of the per-integration blocks is populated.
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "atlas.mongodb.com",
    version = "v1",
    kind = "AtlasThirdPartyIntegration",
    plural = "atlasthirdpartyintegrations",
    singular = "atlasthirdpartyintegration",
    shortname = "atpi",
    namespaced,
    status = "CommonStatus",
    printcolumn = r#"{"name": "Type", "type": "string", "jsonPath": ".spec.type"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AtlasThirdPartyIntegrationSpec {
    /// Parent project linkage
    #[serde(flatten)]
    pub project: ProjectDualReference,

    /// Integration type, e.g. DATADOG
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datadog: Option<DatadogIntegration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub microsoft_teams: Option<MicrosoftTeamsIntegration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_relic: Option<NewRelicIntegration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ops_genie: Option<OpsGenieIntegration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pager_duty: Option<PagerDutyIntegration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prometheus: Option<PrometheusIntegration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack: Option<SlackIntegration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub victor_ops: Option<VictorOpsIntegration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<WebhookIntegration>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatadogIntegration {
    pub api_key_secret_ref: LocalObjectReference,
    pub region: String,
    /// "enabled" or "disabled"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_collection_latency_metrics: Option<String>,
    /// "enabled" or "disabled"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_database_metrics: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MicrosoftTeamsIntegration {
    pub url_secret_ref: LocalObjectReference,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRelicIntegration {
    pub credentials_secret_ref: LocalObjectReference,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpsGenieIntegration {
    pub api_key_secret_ref: LocalObjectReference,
    pub region: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagerDutyIntegration {
    pub service_key_secret_ref: LocalObjectReference,
    pub region: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusIntegration {
    /// "enabled" or "disabled"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<String>,
    pub prometheus_credentials_secret_ref: LocalObjectReference,
    pub service_discovery: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlackIntegration {
    pub api_token_secret_ref: LocalObjectReference,
    pub channel_name: String,
    pub team_name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VictorOpsIntegration {
    pub routing_key: String,
    pub api_key_secret_ref: LocalObjectReference,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookIntegration {
    pub url_secret_ref: LocalObjectReference,
}
