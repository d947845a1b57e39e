//! Paginating fetchers
//!
//! Each fetcher drains every page of one listing and returns the flattened
//! results. A failing page aborts the listing and discards what was already
//! collected; the error is wrapped with the kind (and provider) being listed.

use std::future::Future;

use tracing::debug;

use crate::error::{Error, Result};

use super::client::{AtlasClient, Page, PageRequest};
use super::models::{
    AdvancedClusterDescription, BaseNetworkPeeringConnectionSettings, CloudDatabaseUser,
    CloudProviderContainer, DataLakeTenant, NetworkPermissionEntry, ThirdPartyIntegration,
};
use super::CloudProvider;

/// Request pages until a short page arrives or the reported total is reached
pub async fn paginate<T, F, Fut>(
    kind: &str,
    provider: Option<CloudProvider>,
    page_size: u32,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut request = PageRequest::first(page_size);
    let mut items = Vec::new();

    loop {
        let page = fetch_page(request)
            .await
            .map_err(|e| Error::upstream(kind, provider, e))?;

        let received = page.results.len();
        items.extend(page.results);
        debug!(
            kind,
            provider = ?provider,
            page = request.page_num,
            received,
            total = items.len(),
            "Fetched page"
        );

        if received < request.items_per_page as usize {
            break;
        }
        if let Some(total) = page.total_count {
            if items.len() as u64 >= total {
                break;
            }
        }
        request = request.next();
    }

    Ok(items)
}

/// Run one paginated listing per cloud provider and concatenate the results
pub async fn paginate_per_provider<T, F, Fut>(
    kind: &str,
    page_size: u32,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    F: FnMut(CloudProvider, PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    for provider in CloudProvider::ALL {
        let page_items =
            paginate(kind, Some(provider), page_size, |page| fetch_page(provider, page)).await?;
        items.extend(page_items);
    }
    Ok(items)
}

/// List all IP access list entries of a project
pub async fn fetch_ip_access_list<C: AtlasClient + ?Sized>(
    client: &C,
    project_id: &str,
    page_size: u32,
) -> Result<Vec<NetworkPermissionEntry>> {
    paginate("ip access list", None, page_size, |page| {
        client.list_ip_access_list(project_id, page)
    })
    .await
}

/// List all dedicated clusters of a project
pub async fn fetch_clusters<C: AtlasClient + ?Sized>(
    client: &C,
    project_id: &str,
    page_size: u32,
) -> Result<Vec<AdvancedClusterDescription>> {
    paginate("deployment", None, page_size, |page| {
        client.list_clusters(project_id, page)
    })
    .await
}

/// List all database users of a project
pub async fn fetch_database_users<C: AtlasClient + ?Sized>(
    client: &C,
    project_id: &str,
    page_size: u32,
) -> Result<Vec<CloudDatabaseUser>> {
    paginate("database user", None, page_size, |page| {
        client.list_database_users(project_id, page)
    })
    .await
}

/// List network containers of a project across all providers
pub async fn fetch_containers<C: AtlasClient + ?Sized>(
    client: &C,
    project_id: &str,
    page_size: u32,
) -> Result<Vec<CloudProviderContainer>> {
    paginate_per_provider("network container", page_size, |provider, page| {
        client.list_containers(project_id, provider, page)
    })
    .await
}

/// List network peering connections of a project across all providers
pub async fn fetch_peering_connections<C: AtlasClient + ?Sized>(
    client: &C,
    project_id: &str,
    page_size: u32,
) -> Result<Vec<BaseNetworkPeeringConnectionSettings>> {
    paginate_per_provider("network peering", page_size, |provider, page| {
        client.list_peering_connections(project_id, provider, page)
    })
    .await
}

/// List all third party integrations of a project
pub async fn fetch_integrations<C: AtlasClient + ?Sized>(
    client: &C,
    project_id: &str,
    page_size: u32,
) -> Result<Vec<ThirdPartyIntegration>> {
    paginate("third party integration", None, page_size, |page| {
        client.list_integrations(project_id, page)
    })
    .await
}

/// List all data federations of a project
pub async fn fetch_data_federations<C: AtlasClient + ?Sized>(
    client: &C,
    project_id: &str,
) -> Result<Vec<DataLakeTenant>> {
    client
        .list_data_federations(project_id)
        .await
        .map_err(|e| Error::upstream("data federation", None, e))
}
