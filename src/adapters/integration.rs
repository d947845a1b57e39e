//! Third party integration converter
//!
//! [`IntegrationType`] is the single list of supported integration types.
//! Each type owns its secret layout and fills exactly one block of the
//! AtlasThirdPartyIntegration spec.

use k8s_openapi::api::core::v1::Secret;

use crate::atlas::models::ThirdPartyIntegration;
use crate::crd::{
    AtlasThirdPartyIntegration, AtlasThirdPartyIntegrationSpec, CommonStatus, DatadogIntegration,
    LocalObjectReference, MicrosoftTeamsIntegration, NewRelicIntegration, OpsGenieIntegration,
    PagerDutyIntegration, PrometheusIntegration, SlackIntegration, VictorOpsIntegration,
    WebhookIntegration,
};

use super::secrets::resource_secret;
use super::{enabled_or_disabled, ConvertContext};

/// Supported integration types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntegrationType {
    Datadog,
    MicrosoftTeams,
    NewRelic,
    OpsGenie,
    PagerDuty,
    Prometheus,
    Slack,
    VictorOps,
    Webhook,
}

impl IntegrationType {
    /// Every supported type
    pub const ALL: [IntegrationType; 9] = [
        IntegrationType::Datadog,
        IntegrationType::MicrosoftTeams,
        IntegrationType::NewRelic,
        IntegrationType::OpsGenie,
        IntegrationType::PagerDuty,
        IntegrationType::Prometheus,
        IntegrationType::Slack,
        IntegrationType::VictorOps,
        IntegrationType::Webhook,
    ];

    /// Atlas type tag
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationType::Datadog => "DATADOG",
            IntegrationType::MicrosoftTeams => "MICROSOFT_TEAMS",
            IntegrationType::NewRelic => "NEW_RELIC",
            IntegrationType::OpsGenie => "OPS_GENIE",
            IntegrationType::PagerDuty => "PAGER_DUTY",
            IntegrationType::Prometheus => "PROMETHEUS",
            IntegrationType::Slack => "SLACK",
            IntegrationType::VictorOps => "VICTOR_OPS",
            IntegrationType::Webhook => "WEBHOOK",
        }
    }

    /// Parse an Atlas type tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// Keys of the integration's secret
    pub fn secret_keys(&self) -> &'static [&'static str] {
        match self {
            IntegrationType::Datadog => &["apiKey"],
            IntegrationType::MicrosoftTeams => &["webhookURL"],
            IntegrationType::NewRelic => &["accountId", "licenseKey", "readToken", "writeToken"],
            IntegrationType::OpsGenie => &["apiKey"],
            IntegrationType::PagerDuty => &["serviceKey"],
            IntegrationType::Prometheus => &["username", "password"],
            IntegrationType::Slack => &["apiToken"],
            IntegrationType::VictorOps => &["apiKey"],
            IntegrationType::Webhook => &["url", "secret"],
        }
    }

    /// Type tag in lower case with `-` separators, e.g. `new-relic`
    pub fn dashed(&self) -> String {
        self.as_str().to_lowercase().replace('_', "-")
    }

    /// Secret values of a source integration, in [`secret_keys`](Self::secret_keys) order
    fn secret_values<'a>(&self, source: &'a ThirdPartyIntegration) -> Vec<Option<&'a str>> {
        match self {
            IntegrationType::Datadog | IntegrationType::OpsGenie | IntegrationType::VictorOps => {
                vec![source.api_key.as_deref()]
            }
            IntegrationType::MicrosoftTeams => vec![source.microsoft_teams_webhook_url.as_deref()],
            IntegrationType::NewRelic => vec![
                source.account_id.as_deref(),
                source.license_key.as_deref(),
                source.read_token.as_deref(),
                source.write_token.as_deref(),
            ],
            IntegrationType::PagerDuty => vec![source.service_key.as_deref()],
            IntegrationType::Prometheus => {
                vec![source.username.as_deref(), source.password.as_deref()]
            }
            IntegrationType::Slack => vec![source.api_token.as_deref()],
            IntegrationType::Webhook => vec![source.url.as_deref(), source.secret.as_deref()],
        }
    }
}

/// Convert a third party integration and its secret
///
/// Returns `None` for integration types this exporter does not know.
pub fn convert_integration(
    ctx: &ConvertContext<'_>,
    source: &ThirdPartyIntegration,
) -> Option<(AtlasThirdPartyIntegration, Secret)> {
    let integration_type = IntegrationType::from_tag(&source.type_)?;
    let dashed = integration_type.dashed();
    let name = ctx.project_scoped_name(&[&dashed, "integration"]);
    let secret_name = ctx.project_scoped_name(&[&dashed, "integration", "secret"]);

    let fields: Vec<(&str, Option<&str>)> = integration_type
        .secret_keys()
        .iter()
        .copied()
        .zip(integration_type.secret_values(source))
        .collect();
    let secret = resource_secret(ctx, &secret_name, &fields);

    let mut spec = AtlasThirdPartyIntegrationSpec {
        project: ctx.project_reference(),
        type_: integration_type.as_str().to_string(),
        datadog: None,
        microsoft_teams: None,
        new_relic: None,
        ops_genie: None,
        pager_duty: None,
        prometheus: None,
        slack: None,
        victor_ops: None,
        webhook: None,
    };
    let secret_ref = LocalObjectReference { name: secret_name };
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    match integration_type {
        IntegrationType::Datadog => {
            spec.datadog = Some(DatadogIntegration {
                api_key_secret_ref: secret_ref,
                region: text(&source.region),
                send_collection_latency_metrics: enabled_or_disabled(source.send_collection_latency_metrics),
                send_database_metrics: enabled_or_disabled(source.send_database_metrics),
            });
        }
        IntegrationType::MicrosoftTeams => {
            spec.microsoft_teams = Some(MicrosoftTeamsIntegration {
                url_secret_ref: secret_ref,
            });
        }
        IntegrationType::NewRelic => {
            spec.new_relic = Some(NewRelicIntegration {
                credentials_secret_ref: secret_ref,
            });
        }
        IntegrationType::OpsGenie => {
            spec.ops_genie = Some(OpsGenieIntegration {
                api_key_secret_ref: secret_ref,
                region: text(&source.region),
            });
        }
        IntegrationType::PagerDuty => {
            spec.pager_duty = Some(PagerDutyIntegration {
                service_key_secret_ref: secret_ref,
                region: text(&source.region),
            });
        }
        IntegrationType::Prometheus => {
            spec.prometheus = Some(PrometheusIntegration {
                enabled: enabled_or_disabled(source.enabled),
                prometheus_credentials_secret_ref: secret_ref,
                service_discovery: text(&source.service_discovery),
            });
        }
        IntegrationType::Slack => {
            spec.slack = Some(SlackIntegration {
                api_token_secret_ref: secret_ref,
                channel_name: text(&source.channel_name),
                team_name: text(&source.team_name),
            });
        }
        IntegrationType::VictorOps => {
            spec.victor_ops = Some(VictorOpsIntegration {
                routing_key: text(&source.routing_key),
                api_key_secret_ref: secret_ref,
            });
        }
        IntegrationType::Webhook => {
            spec.webhook = Some(WebhookIntegration {
                url_secret_ref: secret_ref,
            });
        }
    }

    let mut manifest = AtlasThirdPartyIntegration::new(&name, spec);
    manifest.metadata = ctx.object_meta(&name);
    manifest.status = Some(CommonStatus::default());
    Some((manifest, secret))
}
