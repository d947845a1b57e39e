//! Network container and peering converters
//!
//! Atlas returns one flattened shape per kind; the provider tag decides which
//! provider block of the manifest is filled. Unknown providers leave every
//! block empty.

use std::collections::HashMap;

use crate::atlas::models::{BaseNetworkPeeringConnectionSettings, CloudProviderContainer};
use crate::atlas::CloudProvider;
use crate::crd::{
    AtlasNetworkContainer, AtlasNetworkContainerSpec, AtlasNetworkPeering, AtlasNetworkPeeringSpec,
    AwsContainerConfiguration, AwsNetworkPeeringConfiguration, AzureContainerConfiguration,
    AzureNetworkPeeringConfiguration, CommonStatus, ContainerDualReference,
    GcpContainerConfiguration, GcpNetworkPeeringConfiguration,
};
use crate::naming::{region_token, unique_name};

use super::ConvertContext;

/// Convert a network container
pub fn convert_container(ctx: &ConvertContext<'_>, container: &CloudProviderContainer) -> AtlasNetworkContainer {
    let provider_tag = container.provider_name.clone().unwrap_or_default();
    let provider = CloudProvider::from_tag(&provider_tag);

    let region = match provider {
        Some(CloudProvider::Aws) => container.region_name.clone(),
        Some(CloudProvider::Azure) => container.region.clone(),
        Some(CloudProvider::Gcp) | None => None,
    };
    let region = region.map(|r| region_token(&r)).unwrap_or_default();
    let name = ctx.project_scoped_name(&["container", &provider_tag.to_lowercase(), &region]);

    let mut spec = AtlasNetworkContainerSpec {
        project: ctx.project_reference(),
        provider: provider_tag,
        id: container.id.clone(),
        cidr_block: container.atlas_cidr_block.clone(),
        aws_configuration: None,
        azure_configuration: None,
        gcp_configuration: None,
    };

    match provider {
        Some(CloudProvider::Aws) => {
            spec.aws_configuration = Some(AwsContainerConfiguration {
                region_name: container.region_name.clone().unwrap_or_default(),
            });
        }
        Some(CloudProvider::Azure) => {
            spec.azure_configuration = Some(AzureContainerConfiguration {
                region: container.region.clone().unwrap_or_default(),
            });
        }
        Some(CloudProvider::Gcp) => {
            spec.gcp_configuration = Some(GcpContainerConfiguration {
                regions: container.regions.clone(),
            });
        }
        None => {}
    }

    let mut manifest = AtlasNetworkContainer::new(&name, spec);
    manifest.metadata = ctx.object_meta(&name);
    manifest.status = Some(CommonStatus::default());
    manifest
}

/// Manifest names of the containers exported so far, keyed by Atlas container id
#[derive(Clone, Debug, Default)]
pub struct ContainerIndex {
    names: HashMap<String, String>,
}

impl ContainerIndex {
    /// Index the given exported containers
    pub fn from_containers<'a>(containers: impl IntoIterator<Item = &'a AtlasNetworkContainer>) -> Self {
        let names = containers
            .into_iter()
            .filter_map(|c| Some((c.spec.id.clone()?, c.metadata.name.clone()?)))
            .collect();
        Self { names }
    }

    /// Manifest name of the container with this Atlas id
    pub fn name_of(&self, container_id: &str) -> Option<&str> {
        self.names.get(container_id).map(String::as_str)
    }
}

/// Convert a network peering connection
///
/// Several peerings can target the same provider and region, so the name
/// carries a disambiguation suffix. The container is referenced by manifest
/// name when it was exported in this run, otherwise by Atlas id.
pub fn convert_peering(
    ctx: &ConvertContext<'_>,
    peering: &BaseNetworkPeeringConnectionSettings,
    containers: &ContainerIndex,
) -> AtlasNetworkPeering {
    let provider_tag = peering.provider_name.clone().unwrap_or_default();
    let provider = CloudProvider::from_tag(&provider_tag);

    let region = match provider {
        Some(CloudProvider::Aws) => peering.accepter_region_name.as_deref().map(region_token),
        _ => None,
    }
    .unwrap_or_default();
    let name = unique_name(
        &[&ctx.project_name, "peering", &provider_tag.to_lowercase(), &region],
        ctx.dictionary,
        ctx.suffixes,
    );

    let container_ref = match containers.name_of(&peering.container_id) {
        Some(container_name) => ContainerDualReference {
            name: Some(container_name.to_string()),
            id: None,
        },
        None => ContainerDualReference {
            name: None,
            id: Some(peering.container_id.clone()),
        },
    };

    let mut spec = AtlasNetworkPeeringSpec {
        project: ctx.project_reference(),
        container_ref,
        provider: provider_tag,
        id: peering.id.clone(),
        aws_configuration: None,
        azure_configuration: None,
        gcp_configuration: None,
    };

    match provider {
        Some(CloudProvider::Aws) => {
            spec.aws_configuration = Some(AwsNetworkPeeringConfiguration {
                accepter_region_name: peering.accepter_region_name.clone().unwrap_or_default(),
                aws_account_id: peering.aws_account_id.clone().unwrap_or_default(),
                route_table_cidr_block: peering.route_table_cidr_block.clone().unwrap_or_default(),
                vpc_id: peering.vpc_id.clone().unwrap_or_default(),
            });
        }
        Some(CloudProvider::Azure) => {
            spec.azure_configuration = Some(AzureNetworkPeeringConfiguration {
                azure_directory_id: peering.azure_directory_id.clone().unwrap_or_default(),
                azure_subscription_id: peering.azure_subscription_id.clone().unwrap_or_default(),
                resource_group_name: peering.resource_group_name.clone().unwrap_or_default(),
                vnet_name: peering.vnet_name.clone().unwrap_or_default(),
            });
        }
        Some(CloudProvider::Gcp) => {
            spec.gcp_configuration = Some(GcpNetworkPeeringConfiguration {
                gcp_project_id: peering.gcp_project_id.clone().unwrap_or_default(),
                network_name: peering.network_name.clone().unwrap_or_default(),
            });
        }
        None => {}
    }

    let mut manifest = AtlasNetworkPeering::new(&name, spec);
    manifest.metadata = ctx.object_meta(&name);
    manifest.status = Some(CommonStatus::default());
    manifest
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn container(provider: &str) -> CloudProviderContainer {
        CloudProviderContainer {
            id: Some(format!("{}-container-id", provider.to_lowercase())),
            provider_name: Some(provider.to_string()),
            atlas_cidr_block: Some("10.8.0.0/21".to_string()),
            region_name: Some("US_EAST_1".to_string()),
            region: Some("EUROPE_NORTH".to_string()),
            regions: vec!["WESTERN_EUROPE".to_string()],
            ..Default::default()
        }
    }

    fn peering(provider: &str) -> BaseNetworkPeeringConnectionSettings {
        BaseNetworkPeeringConnectionSettings {
            id: Some("peer-1".to_string()),
            container_id: "aws-container-id".to_string(),
            provider_name: Some(provider.to_string()),
            accepter_region_name: Some("us-east-1".to_string()),
            aws_account_id: Some("123456789012".to_string()),
            route_table_cidr_block: Some("172.16.0.0/16".to_string()),
            vpc_id: Some("vpc-1".to_string()),
            azure_directory_id: Some("dir".to_string()),
            azure_subscription_id: Some("sub".to_string()),
            resource_group_name: Some("rg".to_string()),
            vnet_name: Some("vnet".to_string()),
            gcp_project_id: Some("gcp-proj".to_string()),
            network_name: Some("default".to_string()),
            ..Default::default()
        }
    }

    fn populated(aws: bool, azure: bool, gcp: bool) -> [bool; 3] {
        [aws, azure, gcp]
    }

    #[test]
    fn container_populates_only_its_provider_block() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);

        for (provider, expected) in [
            ("AWS", [true, false, false]),
            ("AZURE", [false, true, false]),
            ("GCP", [false, false, true]),
            ("TENANT", [false, false, false]),
        ] {
            let spec = convert_container(&ctx, &container(provider)).spec;
            let got = populated(
                spec.aws_configuration.is_some(),
                spec.azure_configuration.is_some(),
                spec.gcp_configuration.is_some(),
            );
            assert_eq!(got, expected, "provider {}", provider);
        }
    }

    #[test]
    fn container_names_embed_compact_region() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);

        let aws = convert_container(&ctx, &container("AWS"));
        assert_eq!(aws.metadata.name.as_deref(), Some("my-project-container-aws-useast1"));
        let azure = convert_container(&ctx, &container("AZURE"));
        assert_eq!(azure.metadata.name.as_deref(), Some("my-project-container-azure-europenorth"));
        let gcp = convert_container(&ctx, &container("GCP"));
        assert_eq!(gcp.metadata.name.as_deref(), Some("my-project-container-gcp"));
    }

    #[test]
    fn peering_populates_only_its_provider_block() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, true);
        let index = ContainerIndex::default();

        for (provider, expected) in [
            ("AWS", [true, false, false]),
            ("AZURE", [false, true, false]),
            ("GCP", [false, false, true]),
            ("UNKNOWN", [false, false, false]),
        ] {
            let spec = convert_peering(&ctx, &peering(provider), &index).spec;
            let got = populated(
                spec.aws_configuration.is_some(),
                spec.azure_configuration.is_some(),
                spec.gcp_configuration.is_some(),
            );
            assert_eq!(got, expected, "provider {}", provider);
        }
    }

    #[test]
    fn peering_name_carries_region_and_suffix() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);

        let manifest = convert_peering(&ctx, &peering("AWS"), &ContainerIndex::default());
        assert_eq!(
            manifest.metadata.name.as_deref(),
            Some("my-project-peering-aws-useast1-x1y2z3")
        );
    }

    #[test]
    fn peering_references_exported_container_by_name() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);
        let exported = vec![convert_container(&ctx, &container("AWS"))];
        let index = ContainerIndex::from_containers(&exported);

        let manifest = convert_peering(&ctx, &peering("AWS"), &index);
        assert_eq!(
            manifest.spec.container_ref.name.as_deref(),
            Some("my-project-container-aws-useast1")
        );
        assert_eq!(manifest.spec.container_ref.id, None);

        let unknown = convert_peering(&ctx, &peering("AWS"), &ContainerIndex::default());
        assert_eq!(unknown.spec.container_ref.id.as_deref(), Some("aws-container-id"));
    }
}
