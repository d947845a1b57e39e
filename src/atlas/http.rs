//! Atlas Admin API v2 client over reqwest
//!
//! Authenticates with a service account access token sent as a bearer token.
//! Every method performs exactly one request; pagination lives in the fetchers.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

use super::client::{AtlasClient, Page, PageRequest};
use super::models::{
    AdvancedClusterDescription, BaseNetworkPeeringConnectionSettings, CloudDatabaseUser,
    CloudProviderContainer, DataLakeTenant, Group, GroupSettings, NetworkPermissionEntry,
    ThirdPartyIntegration,
};
use super::CloudProvider;

/// Default Atlas Admin API base URL
pub const DEFAULT_BASE_URL: &str = "https://cloud.mongodb.com/api/atlas/v2";

/// Versioned media type pinned by this client
const ACCEPT_HEADER: &str = "application/vnd.atlas.2024-08-05+json";

/// HTTP implementation of [`AtlasClient`]
#[derive(Clone, Debug)]
pub struct HttpAtlasClient {
    http_client: Client,
    base_url: String,
    access_token: String,
}

impl HttpAtlasClient {
    /// Create a client for the given base URL and access token
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("atlas-k8s-exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Atlas API request");
        self.http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
    }

    fn get_page(&self, path: &str, page: PageRequest) -> RequestBuilder {
        self.get(path).query(&[
            ("pageNum", page.page_num.to_string()),
            ("itemsPerPage", page.items_per_page.to_string()),
            ("includeCount", "true".to_string()),
        ])
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AtlasClient for HttpAtlasClient {
    async fn get_project(&self, project_id: &str) -> Result<Group> {
        Self::send(self.get(&format!("/groups/{}", project_id))).await
    }

    async fn get_project_settings(&self, project_id: &str) -> Result<GroupSettings> {
        Self::send(self.get(&format!("/groups/{}/settings", project_id))).await
    }

    async fn list_ip_access_list(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> Result<Page<NetworkPermissionEntry>> {
        Self::send(self.get_page(&format!("/groups/{}/accessList", project_id), page)).await
    }

    async fn list_clusters(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> Result<Page<AdvancedClusterDescription>> {
        Self::send(self.get_page(&format!("/groups/{}/clusters", project_id), page)).await
    }

    async fn list_database_users(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> Result<Page<CloudDatabaseUser>> {
        Self::send(self.get_page(&format!("/groups/{}/databaseUsers", project_id), page)).await
    }

    async fn list_containers(
        &self,
        project_id: &str,
        provider: CloudProvider,
        page: PageRequest,
    ) -> Result<Page<CloudProviderContainer>> {
        let request = self
            .get_page(&format!("/groups/{}/containers", project_id), page)
            .query(&[("providerName", provider.as_str())]);
        Self::send(request).await
    }

    async fn list_peering_connections(
        &self,
        project_id: &str,
        provider: CloudProvider,
        page: PageRequest,
    ) -> Result<Page<BaseNetworkPeeringConnectionSettings>> {
        let request = self
            .get_page(&format!("/groups/{}/peers", project_id), page)
            .query(&[("providerName", provider.as_str())]);
        Self::send(request).await
    }

    async fn list_integrations(
        &self,
        project_id: &str,
        page: PageRequest,
    ) -> Result<Page<ThirdPartyIntegration>> {
        Self::send(self.get_page(&format!("/groups/{}/integrations", project_id), page)).await
    }

    async fn list_data_federations(&self, project_id: &str) -> Result<Vec<DataLakeTenant>> {
        Self::send(self.get(&format!("/groups/{}/dataFederation", project_id))).await
    }
}
