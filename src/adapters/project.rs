//! Project converter

use k8s_openapi::api::core::v1::Secret;

use crate::atlas::models::{Group, GroupSettings};
use crate::crd::{AtlasProject, AtlasProjectSpec, CommonStatus, LocalObjectReference, ProjectSettings, TagSpec};

use super::secrets::{project_credentials_secret, ApiCredentials};
use super::ConvertContext;

/// Convert a project and its settings into an AtlasProject plus its connection secret
pub fn convert_project(
    ctx: &ConvertContext<'_>,
    group: &Group,
    settings: Option<&GroupSettings>,
    credentials: Option<&ApiCredentials>,
) -> (AtlasProject, Secret) {
    let name = ctx.project_resource_name();
    let secret = project_credentials_secret(ctx, credentials);

    let spec = AtlasProjectSpec {
        name: group.name.clone(),
        connection_secret_ref: Some(LocalObjectReference {
            name: ctx.credentials_secret_name(),
        }),
        region_usage_restrictions: group
            .region_usage_restrictions
            .clone()
            .filter(|r| !r.is_empty() && r != "NONE"),
        with_default_alerts_settings: group.with_default_alerts_settings.unwrap_or(true),
        settings: settings.map(convert_settings),
        tags: group
            .tags
            .iter()
            .map(|t| TagSpec {
                key: t.key.clone(),
                value: t.value.clone(),
            })
            .collect(),
    };

    let mut project = AtlasProject::new(&name, spec);
    project.metadata = ctx.object_meta(&name);
    project.status = Some(CommonStatus::default());

    (project, secret)
}

fn convert_settings(settings: &GroupSettings) -> ProjectSettings {
    ProjectSettings {
        is_collect_database_specifics_statistics_enabled: settings
            .is_collect_database_specifics_statistics_enabled,
        is_data_explorer_enabled: settings.is_data_explorer_enabled,
        is_extended_storage_sizes_enabled: settings.is_extended_storage_sizes_enabled,
        is_performance_advisor_enabled: settings.is_performance_advisor_enabled,
        is_realtime_performance_panel_enabled: settings.is_realtime_performance_panel_enabled,
        is_schema_advisor_enabled: settings.is_schema_advisor_enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::atlas::models::ResourceTag;

    fn group() -> Group {
        Group {
            id: "6500000000000000000000aa".to_string(),
            name: "My Project".to_string(),
            org_id: "org-1".to_string(),
            region_usage_restrictions: Some("NONE".to_string()),
            tags: vec![ResourceTag {
                key: "env".to_string(),
                value: "prod".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn converts_project_with_connection_secret() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);
        let settings = GroupSettings {
            is_data_explorer_enabled: Some(false),
            ..Default::default()
        };

        let (project, secret) = convert_project(&ctx, &group(), Some(&settings), None);

        assert_eq!(project.metadata.name.as_deref(), Some("my-project"));
        assert_eq!(project.metadata.namespace.as_deref(), Some("atlas"));
        assert_eq!(project.spec.name, "My Project");
        assert_eq!(
            project.spec.connection_secret_ref.as_ref().map(|r| r.name.as_str()),
            Some("my-project-credentials")
        );
        assert_eq!(project.spec.region_usage_restrictions, None);
        assert!(project.spec.with_default_alerts_settings);
        assert_eq!(
            project.spec.settings.as_ref().and_then(|s| s.is_data_explorer_enabled),
            Some(false)
        );
        assert_eq!(project.spec.tags.len(), 1);
        assert_eq!(project.status, Some(CommonStatus::default()));
        assert_eq!(secret.metadata.name.as_deref(), Some("my-project-credentials"));
    }

    #[test]
    fn project_conversion_is_deterministic() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, true);
        let a = serde_yaml::to_string(&convert_project(&ctx, &group(), None, None).0).unwrap();
        let b = serde_yaml::to_string(&convert_project(&ctx, &group(), None, None).0).unwrap();
        assert_eq!(a, b);
    }
}
