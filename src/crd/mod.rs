//! Atlas Kubernetes Operator resources produced by the curated converters

mod atlas_data_federation;
mod atlas_database_user;
mod atlas_deployment;
mod atlas_ip_access_list;
mod atlas_network;
mod atlas_project;
mod atlas_third_party_integration;
mod common;

pub use atlas_data_federation::*;
pub use atlas_database_user::*;
pub use atlas_deployment::*;
pub use atlas_ip_access_list::*;
pub use atlas_network::*;
pub use atlas_project::*;
pub use atlas_third_party_integration::*;
pub use common::*;

use kube::CustomResourceExt;

use crate::error::Result;

/// Generate CRD YAML manifests for every curated kind
pub fn generate_crds() -> Result<Vec<String>> {
    Ok(vec![
        serde_yaml::to_string(&AtlasProject::crd())?,
        serde_yaml::to_string(&AtlasIPAccessList::crd())?,
        serde_yaml::to_string(&AtlasDeployment::crd())?,
        serde_yaml::to_string(&AtlasDatabaseUser::crd())?,
        serde_yaml::to_string(&AtlasNetworkContainer::crd())?,
        serde_yaml::to_string(&AtlasNetworkPeering::crd())?,
        serde_yaml::to_string(&AtlasThirdPartyIntegration::crd())?,
        serde_yaml::to_string(&AtlasDataFederation::crd())?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_one_crd_per_curated_kind() {
        let crds = generate_crds().unwrap();
        assert_eq!(crds.len(), 8);
        assert!(crds[0].contains("atlasprojects.atlas.mongodb.com"));
        assert!(crds[6].contains("kind: AtlasThirdPartyIntegration"));
    }
}
