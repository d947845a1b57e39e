//! Control plane client seam

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

use super::models::{
    AdvancedClusterDescription, BaseNetworkPeeringConnectionSettings, CloudDatabaseUser,
    CloudProviderContainer, DataLakeTenant, Group, GroupSettings, NetworkPermissionEntry,
    ThirdPartyIntegration,
};
use super::CloudProvider;

/// Largest page the Atlas API will serve
pub const MAX_PAGE_SIZE: u32 = 500;

/// One page request (1-based page number)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page_num: u32,
    pub items_per_page: u32,
}

impl PageRequest {
    /// First page of the given size, clamped to `1..=MAX_PAGE_SIZE`
    pub fn first(items_per_page: u32) -> Self {
        Self {
            page_num: 1,
            items_per_page: items_per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The page after this one
    pub fn next(self) -> Self {
        Self {
            page_num: self.page_num + 1,
            ..self
        }
    }
}

/// One page of results
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    /// Page without a reported total
    pub fn new(results: Vec<T>) -> Self {
        Self {
            results,
            total_count: None,
        }
    }

    /// Page that reports the total number of items across all pages
    pub fn with_total(results: Vec<T>, total_count: u64) -> Self {
        Self {
            results,
            total_count: Some(total_count),
        }
    }
}

/// Read access to the Atlas control plane
///
/// One list method per resource kind; list methods return a single page.
#[async_trait]
pub trait AtlasClient: Send + Sync {
    /// Get a project by id
    async fn get_project(&self, project_id: &str) -> Result<Group>;

    /// Get the feature settings of a project
    async fn get_project_settings(&self, project_id: &str) -> Result<GroupSettings>;

    /// List IP access list entries
    async fn list_ip_access_list(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> Result<Page<NetworkPermissionEntry>>;

    /// List dedicated clusters
    async fn list_clusters(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> Result<Page<AdvancedClusterDescription>>;

    /// List database users
    async fn list_database_users(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> Result<Page<CloudDatabaseUser>>;

    /// List network containers of one provider
    async fn list_containers(
        &self,
        project_id: &str,
        provider: CloudProvider,
        page: PageRequest,
    ) -> Result<Page<CloudProviderContainer>>;

    /// List network peering connections of one provider
    async fn list_peering_connections(
        &self,
        project_id: &str,
        provider: CloudProvider,
        page: PageRequest,
    ) -> Result<Page<BaseNetworkPeeringConnectionSettings>>;

    /// List third party integrations
    async fn list_integrations(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> Result<Page<ThirdPartyIntegration>>;

    /// List data federations; the API does not paginate this endpoint
    async fn list_data_federations(&self, project_id: &str) -> Result<Vec<DataLakeTenant>>;
}
