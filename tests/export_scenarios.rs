//! End-to-end export scenarios against an in-memory Atlas
//!
//! These tests drive the full pipeline: fetch through a fake client,
//! convert, thread references, apply the namespace and serialize.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use atlas_k8s_exporter::atlas::models::{
    AdvancedClusterDescription, BaseNetworkPeeringConnectionSettings, CloudDatabaseUser,
    CloudProviderContainer, DataLakeTenant, Group, GroupSettings, NetworkPermissionEntry,
    ThirdPartyIntegration,
};
use atlas_k8s_exporter::atlas::{AtlasClient, CloudProvider, Page, PageRequest};
use atlas_k8s_exporter::config::{ExportConfig, SchemaDrivenConfig};
use atlas_k8s_exporter::export::{ExportKind, ExportState, Exporter, ManifestObject};
use atlas_k8s_exporter::naming::FixedSuffix;
use atlas_k8s_exporter::translate::BundledCrdProvider;
use atlas_k8s_exporter::{Error, Result};

const PROJECT_ID: &str = "6500000000000000000000aa";

// ============================================================================
// Fake Atlas
// ============================================================================

#[derive(Default)]
struct FakeAtlas {
    clusters: Vec<AdvancedClusterDescription>,
    access_list: Vec<NetworkPermissionEntry>,
    users: Vec<CloudDatabaseUser>,
    containers: Vec<CloudProviderContainer>,
    peerings: Vec<BaseNetworkPeeringConnectionSettings>,
    integrations: Vec<ThirdPartyIntegration>,
    federations: Vec<DataLakeTenant>,
    fail_integrations: bool,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl FakeAtlas {
    fn record(&self, call: &'static str) {
        *self.calls.lock().unwrap().entry(call).or_default() += 1;
    }

    fn calls(&self, call: &'static str) -> usize {
        self.calls.lock().unwrap().get(call).copied().unwrap_or(0)
    }
}

fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let size = page.items_per_page as usize;
    let start = (page.page_num as usize - 1) * size;
    let results = items.iter().skip(start).take(size).cloned().collect();
    Page::with_total(results, items.len() as u64)
}

fn for_provider<T: Clone>(
    items: &[T],
    provider: CloudProvider,
    tag: impl Fn(&T) -> Option<&str>,
) -> Vec<T> {
    items
        .iter()
        .filter(|i| tag(i) == Some(provider.as_str()))
        .cloned()
        .collect()
}

#[async_trait]
impl AtlasClient for FakeAtlas {
    async fn get_project(&self, project_id: &str) -> Result<Group> {
        self.record("project");
        if project_id != PROJECT_ID {
            return Err(Error::Api {
                status: 404,
                body: "GROUP_NOT_FOUND".to_string(),
            });
        }
        Ok(Group {
            id: PROJECT_ID.to_string(),
            name: "My Project".to_string(),
            org_id: "org-1".to_string(),
            ..Default::default()
        })
    }

    async fn get_project_settings(&self, _project_id: &str) -> Result<GroupSettings> {
        Ok(GroupSettings {
            is_data_explorer_enabled: Some(true),
            ..Default::default()
        })
    }

    async fn list_ip_access_list(
        &self,
        _project_id: &str,
        page: PageRequest,
    ) -> Result<Page<NetworkPermissionEntry>> {
        Ok(page_of(&self.access_list, page))
    }

    async fn list_clusters(
        &self,
        _project_id: &str,
        page: PageRequest,
    ) -> Result<Page<AdvancedClusterDescription>> {
        self.record("clusters");
        Ok(page_of(&self.clusters, page))
    }

    async fn list_database_users(
        &self,
        _project_id: &str,
        page: PageRequest,
    ) -> Result<Page<CloudDatabaseUser>> {
        Ok(page_of(&self.users, page))
    }

    async fn list_containers(
        &self,
        _project_id: &str,
        provider: CloudProvider,
        page: PageRequest,
    ) -> Result<Page<CloudProviderContainer>> {
        let items = for_provider(&self.containers, provider, |c| c.provider_name.as_deref());
        Ok(page_of(&items, page))
    }

    async fn list_peering_connections(
        &self,
        _project_id: &str,
        provider: CloudProvider,
        page: PageRequest,
    ) -> Result<Page<BaseNetworkPeeringConnectionSettings>> {
        let items = for_provider(&self.peerings, provider, |p| p.provider_name.as_deref());
        Ok(page_of(&items, page))
    }

    async fn list_integrations(
        &self,
        _project_id: &str,
        page: PageRequest,
    ) -> Result<Page<ThirdPartyIntegration>> {
        if self.fail_integrations {
            return Err(Error::Api {
                status: 500,
                body: "UNEXPECTED_ERROR".to_string(),
            });
        }
        Ok(page_of(&self.integrations, page))
    }

    async fn list_data_federations(&self, _project_id: &str) -> Result<Vec<DataLakeTenant>> {
        Ok(self.federations.clone())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn slack_only() -> FakeAtlas {
    FakeAtlas {
        integrations: vec![ThirdPartyIntegration {
            type_: "SLACK".to_string(),
            api_token: Some("xoxb-redacted".to_string()),
            channel_name: Some("alerts".to_string()),
            team_name: Some("ops".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn config(independent: bool) -> ExportConfig {
    let mut config = ExportConfig::for_project(PROJECT_ID);
    config.namespace = "atlas".to_string();
    config.independent_resources = independent;
    config
}

fn integration(objects: &[ManifestObject]) -> &atlas_k8s_exporter::crd::AtlasThirdPartyIntegration {
    objects
        .iter()
        .find_map(|o| match o {
            ManifestObject::ThirdPartyIntegration(i) => Some(i),
            _ => None,
        })
        .expect("integration exported")
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn independent_export_links_by_project_id() {
    let atlas = slack_only();
    let config = config(true);
    let mut exporter = Exporter::new(&atlas, &config).with_suffix_source(FixedSuffix("abc123".to_string()));

    let set = exporter.export().await.unwrap();
    let objects: Vec<ManifestObject> = set.clone().into_iter().collect();

    assert_eq!(
        set.kinds(),
        vec!["AtlasProject", "Secret", "AtlasThirdPartyIntegration", "Secret"]
    );
    assert_eq!(objects[1].name(), "my-project-credentials");

    let integration = integration(&objects);
    assert_eq!(integration.spec.project.external_project_id(), Some(PROJECT_ID));
    assert_eq!(
        integration.spec.project.connection_secret().map(|s| s.name.as_str()),
        Some("my-project-credentials")
    );
    assert!(integration.spec.project.project_ref().is_none());
    assert_eq!(objects[3].name(), "my-project-slack-integration-secret");
    assert!(set.iter().all(|o| o.meta().namespace.as_deref() == Some("atlas")));
}

#[tokio::test]
async fn dependent_export_links_by_project_reference() {
    let atlas = slack_only();
    let config = config(false);
    let mut exporter = Exporter::new(&atlas, &config);

    let set = exporter.export().await.unwrap();
    let objects: Vec<ManifestObject> = set.clone().into_iter().collect();

    assert_eq!(
        set.kinds(),
        vec!["AtlasProject", "Secret", "AtlasThirdPartyIntegration", "Secret"]
    );
    let integration = integration(&objects);
    let project_ref = integration.spec.project.project_ref().unwrap();
    assert_eq!(project_ref.name, "my-project");
    assert_eq!(project_ref.namespace.as_deref(), Some("atlas"));
    assert!(integration.spec.project.external_project_id().is_none());
    assert!(integration.spec.project.connection_secret().is_none());
}

#[tokio::test]
async fn stream_is_delimited_and_statuses_are_empty() {
    let atlas = slack_only();
    let config = config(true);
    let mut exporter = Exporter::new(&atlas, &config);

    let stream = exporter.export_yaml().await.unwrap();

    assert_eq!(exporter.state(), ExportState::Done);
    assert!(stream.starts_with("---\n"));
    assert!(stream.ends_with("---\n"));
    assert_eq!(stream.matches("---\n").count(), 5);
    assert_eq!(stream.matches("status: {}").count(), 2);
    assert!(stream.contains("mongodb.com/atlas-resource-version"));
    assert!(stream.contains("atlas.mongodb.com/type: credentials"));
}

#[tokio::test]
async fn peerings_reference_containers_exported_in_the_same_run() {
    let atlas = FakeAtlas {
        containers: vec![CloudProviderContainer {
            id: Some("container-aws".to_string()),
            provider_name: Some("AWS".to_string()),
            region_name: Some("US_EAST_1".to_string()),
            atlas_cidr_block: Some("10.8.0.0/21".to_string()),
            ..Default::default()
        }],
        peerings: vec![
            BaseNetworkPeeringConnectionSettings {
                id: Some("peer-aws".to_string()),
                container_id: "container-aws".to_string(),
                provider_name: Some("AWS".to_string()),
                accepter_region_name: Some("us-east-1".to_string()),
                vpc_id: Some("vpc-1".to_string()),
                ..Default::default()
            },
            BaseNetworkPeeringConnectionSettings {
                id: Some("peer-gcp".to_string()),
                container_id: "container-gcp".to_string(),
                provider_name: Some("GCP".to_string()),
                gcp_project_id: Some("gcp-proj".to_string()),
                network_name: Some("default".to_string()),
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let mut config = config(false);
    config.kinds = vec![ExportKind::NetworkContainer, ExportKind::NetworkPeering];
    let mut exporter = Exporter::new(&atlas, &config).with_suffix_source(FixedSuffix("abc123".to_string()));

    let objects: Vec<ManifestObject> = exporter.export().await.unwrap().into_iter().collect();

    let peerings: Vec<_> = objects
        .iter()
        .filter_map(|o| match o {
            ManifestObject::NetworkPeering(p) => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(peerings.len(), 2);
    assert_eq!(
        peerings[0].spec.container_ref.name.as_deref(),
        Some("my-project-container-aws-useast1")
    );
    assert_eq!(
        peerings[0].metadata.name.as_deref(),
        Some("my-project-peering-aws-useast1-abc123")
    );
    assert!(peerings[0].spec.aws_configuration.is_some());
    assert_eq!(peerings[1].spec.container_ref.id.as_deref(), Some("container-gcp"));
    assert!(peerings[1].spec.gcp_configuration.is_some());
    assert!(peerings[1].spec.aws_configuration.is_none());
}

#[tokio::test]
async fn users_with_colliding_names_get_distinct_manifests_and_secrets() {
    let user = |username: &str| CloudDatabaseUser {
        username: username.to_string(),
        database_name: "admin".to_string(),
        ..Default::default()
    };
    let atlas = FakeAtlas {
        users: vec![user("app_user"), user("app-user"), user("用户"), user("пользователь")],
        ..Default::default()
    };
    let mut config = config(true);
    config.kinds = vec![ExportKind::Project, ExportKind::DatabaseUser];
    let mut exporter = Exporter::new(&atlas, &config);

    let set = exporter.export().await.unwrap();

    let mut seen = std::collections::HashSet::new();
    for object in set.iter() {
        assert!(!object.name().is_empty());
        assert!(
            seen.insert((object.kind(), object.name().to_string())),
            "duplicate {} {}",
            object.kind(),
            object.name()
        );
    }
    let users: Vec<&str> = set
        .iter()
        .filter(|o| o.kind() == "AtlasDatabaseUser")
        .map(ManifestObject::name)
        .collect();
    assert_eq!(users.len(), 4);
    assert_eq!(users[0], "my-project-app-user");
    assert!(!users.contains(&"my-project"));
}

#[tokio::test]
async fn failed_listing_produces_no_output() {
    let atlas = FakeAtlas {
        fail_integrations: true,
        ..slack_only()
    };
    let config = config(true);
    let mut exporter = Exporter::new(&atlas, &config);

    let err = exporter.export_yaml().await.unwrap_err();

    assert_eq!(exporter.state(), ExportState::Failed);
    assert!(matches!(err, Error::Upstream { .. }));
    assert!(err.to_string().contains("third party integration"));
}

#[tokio::test]
async fn unknown_project_fails_before_any_listing() {
    let atlas = slack_only();
    let config = ExportConfig::for_project("6500000000000000000000ff");
    let mut exporter = Exporter::new(&atlas, &config);

    let err = exporter.export().await.unwrap_err();

    assert!(matches!(err, Error::Upstream { .. }));
    assert_eq!(atlas.calls("clusters"), 0);
}

#[tokio::test]
async fn generated_clusters_reference_generated_group() {
    let atlas = FakeAtlas {
        clusters: vec![AdvancedClusterDescription {
            id: Some("cluster-1".to_string()),
            name: "Cluster0".to_string(),
            cluster_type: Some("REPLICASET".to_string()),
            state_name: Some("IDLE".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let mut config = config(false);
    config.kinds = vec![];
    config.schema_driven = Some(SchemaDrivenConfig::default());
    let mut exporter = Exporter::new(&atlas, &config).with_crd_provider(BundledCrdProvider::default());

    let objects: Vec<ManifestObject> = exporter.export().await.unwrap().into_iter().collect();

    assert_eq!(objects.iter().map(ManifestObject::kind).collect::<Vec<_>>(), vec!["Group", "Cluster"]);
    let ManifestObject::Generated(cluster) = &objects[1] else {
        panic!("expected a generated cluster");
    };
    let versioned = &cluster.data["spec"]["v20250312"];
    assert_eq!(versioned["groupRef"]["name"], "my-project");
    assert_eq!(versioned["entry"]["name"], "Cluster0");
    assert!(versioned["entry"].get("stateName").is_none());
    assert_eq!(cluster.metadata.name.as_deref(), Some("my-project-cluster0"));
    assert_eq!(cluster.metadata.namespace.as_deref(), Some("atlas"));
    assert_eq!(atlas.calls("project"), 1);
}

#[tokio::test]
async fn unknown_crd_version_fails_the_run() {
    let atlas = FakeAtlas::default();
    let mut config = config(false);
    config.kinds = vec![];
    config.schema_driven = Some(SchemaDrivenConfig {
        crd_version: "1.0.0".to_string(),
        ..Default::default()
    });
    let mut exporter = Exporter::new(&atlas, &config);

    let err = exporter.export().await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(exporter.state(), ExportState::Failed);
}
