//! Project linkage resolution

use crate::crd::{
    ExternalProjectReference, LocalObjectReference, ProjectDualReference, ResourceRefNamespaced,
};

/// Build the project linkage for one resource
///
/// Dependent mode references the AtlasProject in `namespace`; independent
/// mode references the Atlas project id and the already-named credentials
/// secret.
pub fn build_reference(
    independent: bool,
    project_id: &str,
    project_name: &str,
    namespace: &str,
    credentials_secret_name: &str,
) -> ProjectDualReference {
    if independent {
        ProjectDualReference::External {
            external_project_ref: ExternalProjectReference {
                id: project_id.to_string(),
            },
            connection_secret: LocalObjectReference {
                name: credentials_secret_name.to_string(),
            },
        }
    } else {
        ProjectDualReference::Project {
            project_ref: ResourceRefNamespaced {
                name: project_name.to_string(),
                namespace: Some(namespace.to_string()),
            },
        }
    }
}
