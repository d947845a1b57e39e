//! Export orchestration for one project
//!
//! Kinds are processed strictly in [`ExportKind::ALL`] order followed by the
//! generated kinds, because later kinds reference names produced by earlier
//! ones. Any fetch or conversion failure ends the run without output.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::adapters::{
    convert_container, convert_data_federation, convert_database_user, convert_deployment,
    convert_integration, convert_ip_access_list, convert_peering, convert_project, ContainerIndex,
    ConvertContext,
};
use crate::atlas::{
    fetch_clusters, fetch_containers, fetch_data_federations, fetch_database_users,
    fetch_integrations, fetch_ip_access_list, fetch_peering_connections, AtlasClient,
};
use crate::atlas::models::Group;
use crate::config::{ExportConfig, SchemaDrivenConfig};
use crate::error::{Error, Result};
use crate::naming::{NameClaims, NameDictionary, RandomSuffix, SuffixSource};
use crate::translate::{
    export_clusters, export_groups, CrdProvider, SchemaRegistry, SplitCrdProvider,
    TranslatedObject, Translator,
};

use super::object::ExportedSet;

const SECRET_KIND: &str = "Secret";

/// Curated kinds, in processing order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportKind {
    Project,
    IpAccessList,
    Deployment,
    DatabaseUser,
    NetworkContainer,
    NetworkPeering,
    ThirdPartyIntegration,
    DataFederation,
}

impl ExportKind {
    pub const ALL: [ExportKind; 8] = [
        ExportKind::Project,
        ExportKind::IpAccessList,
        ExportKind::Deployment,
        ExportKind::DatabaseUser,
        ExportKind::NetworkContainer,
        ExportKind::NetworkPeering,
        ExportKind::ThirdPartyIntegration,
        ExportKind::DataFederation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Project => "project",
            ExportKind::IpAccessList => "ipAccessList",
            ExportKind::Deployment => "deployment",
            ExportKind::DatabaseUser => "databaseUser",
            ExportKind::NetworkContainer => "networkContainer",
            ExportKind::NetworkPeering => "networkPeering",
            ExportKind::ThirdPartyIntegration => "thirdPartyIntegration",
            ExportKind::DataFederation => "dataFederation",
        }
    }
}

/// Kinds translated from generated CRDs, in processing order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GeneratedKind {
    Group,
    Cluster,
}

impl GeneratedKind {
    pub const ALL: [GeneratedKind; 2] = [GeneratedKind::Group, GeneratedKind::Cluster];

    /// CRD kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratedKind::Group => "Group",
            GeneratedKind::Cluster => "Cluster",
        }
    }
}

/// Kind a phase of the run is working on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseKind {
    Curated(ExportKind),
    Generated(GeneratedKind),
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseKind::Curated(kind) => f.write_str(kind.as_str()),
            PhaseKind::Generated(kind) => f.write_str(kind.as_str()),
        }
    }
}

/// Progress of an export run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Fetching(PhaseKind),
    Converting(PhaseKind),
    Serializing,
    Done,
    Failed,
}

/// Runs the export of one project
pub struct Exporter<'a, C: AtlasClient + ?Sized> {
    client: &'a C,
    config: &'a ExportConfig,
    dictionary: NameDictionary,
    suffixes: Box<dyn SuffixSource>,
    crds: Box<dyn CrdProvider>,
    registry: SchemaRegistry,
    state: ExportState,
}

impl<'a, C: AtlasClient + ?Sized> Exporter<'a, C> {
    pub fn new(client: &'a C, config: &'a ExportConfig) -> Self {
        Self {
            client,
            config,
            dictionary: NameDictionary::default(),
            suffixes: Box::new(RandomSuffix),
            crds: Box::new(SplitCrdProvider::default()),
            registry: SchemaRegistry::default(),
            state: ExportState::Idle,
        }
    }

    /// Replace the source of name disambiguation suffixes
    pub fn with_suffix_source(mut self, suffixes: impl SuffixSource + 'static) -> Self {
        self.suffixes = Box::new(suffixes);
        self
    }

    /// Replace the embedded CRD lookup
    pub fn with_crd_provider(mut self, crds: impl CrdProvider + 'static) -> Self {
        self.crds = Box::new(crds);
        self
    }

    /// Replace the name substitution dictionary
    pub fn with_dictionary(mut self, dictionary: NameDictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Fetch and convert every configured kind
    pub async fn export(&mut self) -> Result<ExportedSet> {
        match self.run().await {
            Ok(set) => Ok(set),
            Err(e) => {
                warn!(project_id = %self.config.project_id, state = ?self.state, error = %e, "Export failed");
                self.state = ExportState::Failed;
                Err(e)
            }
        }
    }

    /// Export and encode as a multi-document YAML stream
    pub async fn export_yaml(&mut self) -> Result<String> {
        let set = self.export().await?;
        self.state = ExportState::Serializing;
        match set.to_yaml_stream() {
            Ok(stream) => {
                self.state = ExportState::Done;
                info!(objects = set.len(), "Export complete");
                Ok(stream)
            }
            Err(e) => {
                self.state = ExportState::Failed;
                Err(e)
            }
        }
    }

    async fn run(&mut self) -> Result<ExportedSet> {
        let Exporter {
            client,
            config,
            dictionary,
            suffixes,
            crds,
            registry,
            state,
        } = self;
        let client: &C = *client;
        let config: &ExportConfig = *config;
        let project_id = config.project_id.as_str();
        let page_size = config.page_size;
        info!(project_id = %project_id, independent = config.independent_resources, "Starting export");

        state.fetching(PhaseKind::Curated(ExportKind::Project));
        let group = client
            .get_project(project_id)
            .await
            .map_err(|e| Error::upstream("project", None, e))?;
        let settings = client
            .get_project_settings(project_id)
            .await
            .map_err(|e| Error::upstream("project settings", None, e))?;

        let ctx = ConvertContext {
            namespace: config.namespace.clone(),
            project_id: project_id.to_string(),
            project_name: group.name.clone(),
            operator_version: config.operator_version.clone(),
            independent: config.independent_resources,
            include_secrets: config.include_secrets,
            dictionary: &*dictionary,
            suffixes: &**suffixes,
        };
        let mut set = ExportedSet::default();
        let mut names = NameClaims::default();
        // every independent-mode reference points at this secret
        names.reserve(SECRET_KIND, &ctx.credentials_secret_name());

        if config.exports(ExportKind::Project) {
            state.converting(PhaseKind::Curated(ExportKind::Project), 1);
            let (project, secret) =
                convert_project(&ctx, &group, Some(&settings), config.credentials.as_ref());
            set.push(project);
            set.push(secret);
        }

        if config.exports(ExportKind::IpAccessList) {
            state.fetching(PhaseKind::Curated(ExportKind::IpAccessList));
            let entries = fetch_ip_access_list(client, project_id, page_size).await?;
            state.converting(PhaseKind::Curated(ExportKind::IpAccessList), entries.len());
            set.extend(convert_ip_access_list(&ctx, &entries));
        }

        if config.exports(ExportKind::Deployment) {
            state.fetching(PhaseKind::Curated(ExportKind::Deployment));
            let clusters = fetch_clusters(client, project_id, page_size).await?;
            state.converting(PhaseKind::Curated(ExportKind::Deployment), clusters.len());
            set.extend(clusters.iter().map(|c| convert_deployment(&ctx, c)));
        }

        if config.exports(ExportKind::DatabaseUser) {
            state.fetching(PhaseKind::Curated(ExportKind::DatabaseUser));
            let users = fetch_database_users(client, project_id, page_size).await?;
            state.converting(PhaseKind::Curated(ExportKind::DatabaseUser), users.len());
            for user in &users {
                let (db_user, secret) = convert_database_user(&ctx, user, &mut names);
                set.push(db_user);
                set.extend(secret);
            }
        }

        let mut containers = Vec::new();
        if config.exports(ExportKind::NetworkContainer) {
            state.fetching(PhaseKind::Curated(ExportKind::NetworkContainer));
            let fetched = fetch_containers(client, project_id, page_size).await?;
            state.converting(PhaseKind::Curated(ExportKind::NetworkContainer), fetched.len());
            containers = fetched.iter().map(|c| convert_container(&ctx, c)).collect();
        }
        let container_index = ContainerIndex::from_containers(&containers);
        set.extend(containers);

        if config.exports(ExportKind::NetworkPeering) {
            state.fetching(PhaseKind::Curated(ExportKind::NetworkPeering));
            let peerings = fetch_peering_connections(client, project_id, page_size).await?;
            state.converting(PhaseKind::Curated(ExportKind::NetworkPeering), peerings.len());
            set.extend(
                peerings
                    .iter()
                    .map(|p| convert_peering(&ctx, p, &container_index)),
            );
        }

        if config.exports(ExportKind::ThirdPartyIntegration) {
            state.fetching(PhaseKind::Curated(ExportKind::ThirdPartyIntegration));
            let integrations = fetch_integrations(client, project_id, page_size).await?;
            state.converting(
                PhaseKind::Curated(ExportKind::ThirdPartyIntegration),
                integrations.len(),
            );
            for integration in &integrations {
                match convert_integration(&ctx, integration) {
                    Some((manifest, secret)) => {
                        set.push(manifest);
                        set.push(secret);
                    }
                    None => {
                        warn!(integration_type = %integration.type_, "Skipping unsupported integration type");
                    }
                }
            }
        }

        if config.exports(ExportKind::DataFederation) {
            state.fetching(PhaseKind::Curated(ExportKind::DataFederation));
            let federations = fetch_data_federations(client, project_id).await?;
            state.converting(PhaseKind::Curated(ExportKind::DataFederation), federations.len());
            set.extend(federations.iter().map(|f| convert_data_federation(&ctx, f)));
        }

        if let Some(schema_driven) = &config.schema_driven {
            let generated = GeneratedRun {
                client,
                crds: crds.as_ref(),
                registry,
                project_ids: vec![project_id.to_string()],
                known_groups: std::slice::from_ref(&group),
                page_size,
            };
            let translated = generated.run(&ctx, schema_driven, state).await?;
            set.extend(translated.into_iter().map(|t| t.object));
        }

        set.apply_namespace(&config.namespace);
        info!(project_id = %project_id, objects = set.len(), "Converted project");
        Ok(set)
    }
}

impl ExportState {
    fn fetching(&mut self, kind: PhaseKind) {
        *self = ExportState::Fetching(kind);
        debug!(kind = %kind, "Fetching");
    }

    fn converting(&mut self, kind: PhaseKind, count: usize) {
        *self = ExportState::Converting(kind);
        info!(kind = %kind, count, "Converting");
    }
}

/// Schema-driven part of a run
struct GeneratedRun<'a, C: AtlasClient + ?Sized> {
    client: &'a C,
    crds: &'a dyn CrdProvider,
    registry: &'a SchemaRegistry,
    project_ids: Vec<String>,
    known_groups: &'a [Group],
    page_size: u32,
}

impl<C: AtlasClient + ?Sized> GeneratedRun<'_, C> {
    async fn run(
        &self,
        ctx: &ConvertContext<'_>,
        schema_driven: &SchemaDrivenConfig,
        state: &mut ExportState,
    ) -> Result<Vec<TranslatedObject>> {
        let tag = schema_driven.api_version_tag.as_str();
        let mut groups = Vec::new();
        let mut clusters = Vec::new();

        if schema_driven.kinds.contains(&GeneratedKind::Group) {
            let phase = PhaseKind::Generated(GeneratedKind::Group);
            state.fetching(phase);
            let translator = self.translator(GeneratedKind::Group, schema_driven)?;
            groups = export_groups(
                self.client,
                ctx,
                &translator,
                &self.project_ids,
                self.known_groups,
            )
            .await?;
            state.converting(phase, groups.len());
        }

        if schema_driven.kinds.contains(&GeneratedKind::Cluster) {
            let phase = PhaseKind::Generated(GeneratedKind::Cluster);
            state.fetching(phase);
            let translator = self.translator(GeneratedKind::Cluster, schema_driven)?;
            clusters = export_clusters(
                self.client,
                ctx,
                &translator,
                &self.project_ids,
                &groups,
                self.page_size,
            )
            .await?;
            state.converting(phase, clusters.len());
        }

        debug!(tag, groups = groups.len(), clusters = clusters.len(), "Translated generated kinds");
        groups.extend(clusters);
        Ok(groups)
    }

    fn translator(&self, kind: GeneratedKind, schema_driven: &SchemaDrivenConfig) -> Result<Translator<'_>> {
        let crd = self
            .crds
            .get_resource(kind.as_str(), &schema_driven.crd_version)?;
        Translator::new(self.registry, Some(&crd), &schema_driven.api_version_tag)
    }
}
