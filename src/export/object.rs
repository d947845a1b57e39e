//! Produced manifests and their serialization

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::DynamicObject;
use kube::Resource;

use crate::crd::{
    AtlasDataFederation, AtlasDatabaseUser, AtlasDeployment, AtlasIPAccessList,
    AtlasNetworkContainer, AtlasNetworkPeering, AtlasProject, AtlasThirdPartyIntegration,
};
use crate::error::Result;

/// Document boundary of the output stream
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// One produced manifest
#[derive(Clone, Debug)]
pub enum ManifestObject {
    Project(AtlasProject),
    IpAccessList(AtlasIPAccessList),
    Deployment(AtlasDeployment),
    DatabaseUser(AtlasDatabaseUser),
    NetworkContainer(AtlasNetworkContainer),
    NetworkPeering(AtlasNetworkPeering),
    ThirdPartyIntegration(AtlasThirdPartyIntegration),
    DataFederation(AtlasDataFederation),
    Secret(Secret),
    Generated(DynamicObject),
}

impl ManifestObject {
    /// Kubernetes kind
    pub fn kind(&self) -> String {
        match self {
            ManifestObject::Project(_) => AtlasProject::kind(&()).into_owned(),
            ManifestObject::IpAccessList(_) => AtlasIPAccessList::kind(&()).into_owned(),
            ManifestObject::Deployment(_) => AtlasDeployment::kind(&()).into_owned(),
            ManifestObject::DatabaseUser(_) => AtlasDatabaseUser::kind(&()).into_owned(),
            ManifestObject::NetworkContainer(_) => AtlasNetworkContainer::kind(&()).into_owned(),
            ManifestObject::NetworkPeering(_) => AtlasNetworkPeering::kind(&()).into_owned(),
            ManifestObject::ThirdPartyIntegration(_) => {
                AtlasThirdPartyIntegration::kind(&()).into_owned()
            }
            ManifestObject::DataFederation(_) => AtlasDataFederation::kind(&()).into_owned(),
            ManifestObject::Secret(_) => Secret::kind(&()).into_owned(),
            ManifestObject::Generated(object) => object
                .types
                .as_ref()
                .map(|t| t.kind.clone())
                .unwrap_or_default(),
        }
    }

    /// Object metadata
    pub fn meta(&self) -> &ObjectMeta {
        match self {
            ManifestObject::Project(o) => o.meta(),
            ManifestObject::IpAccessList(o) => o.meta(),
            ManifestObject::Deployment(o) => o.meta(),
            ManifestObject::DatabaseUser(o) => o.meta(),
            ManifestObject::NetworkContainer(o) => o.meta(),
            ManifestObject::NetworkPeering(o) => o.meta(),
            ManifestObject::ThirdPartyIntegration(o) => o.meta(),
            ManifestObject::DataFederation(o) => o.meta(),
            ManifestObject::Secret(o) => o.meta(),
            ManifestObject::Generated(o) => o.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        match self {
            ManifestObject::Project(o) => o.meta_mut(),
            ManifestObject::IpAccessList(o) => o.meta_mut(),
            ManifestObject::Deployment(o) => o.meta_mut(),
            ManifestObject::DatabaseUser(o) => o.meta_mut(),
            ManifestObject::NetworkContainer(o) => o.meta_mut(),
            ManifestObject::NetworkPeering(o) => o.meta_mut(),
            ManifestObject::ThirdPartyIntegration(o) => o.meta_mut(),
            ManifestObject::DataFederation(o) => o.meta_mut(),
            ManifestObject::Secret(o) => o.meta_mut(),
            ManifestObject::Generated(o) => o.meta_mut(),
        }
    }

    /// Object name
    pub fn name(&self) -> &str {
        self.meta().name.as_deref().unwrap_or_default()
    }

    /// Set the namespace
    pub fn set_namespace(&mut self, namespace: &str) {
        self.meta_mut().namespace = Some(namespace.to_string());
    }

    /// Encode as a single YAML document
    pub fn to_yaml(&self) -> Result<String> {
        let yaml = match self {
            ManifestObject::Project(o) => serde_yaml::to_string(o)?,
            ManifestObject::IpAccessList(o) => serde_yaml::to_string(o)?,
            ManifestObject::Deployment(o) => serde_yaml::to_string(o)?,
            ManifestObject::DatabaseUser(o) => serde_yaml::to_string(o)?,
            ManifestObject::NetworkContainer(o) => serde_yaml::to_string(o)?,
            ManifestObject::NetworkPeering(o) => serde_yaml::to_string(o)?,
            ManifestObject::ThirdPartyIntegration(o) => serde_yaml::to_string(o)?,
            ManifestObject::DataFederation(o) => serde_yaml::to_string(o)?,
            ManifestObject::Secret(o) => serde_yaml::to_string(o)?,
            ManifestObject::Generated(o) => serde_yaml::to_string(o)?,
        };
        Ok(yaml)
    }
}

macro_rules! impl_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ManifestObject {
                fn from(object: $ty) -> Self {
                    ManifestObject::$variant(object)
                }
            }
        )*
    };
}

impl_from! {
    Project => AtlasProject,
    IpAccessList => AtlasIPAccessList,
    Deployment => AtlasDeployment,
    DatabaseUser => AtlasDatabaseUser,
    NetworkContainer => AtlasNetworkContainer,
    NetworkPeering => AtlasNetworkPeering,
    ThirdPartyIntegration => AtlasThirdPartyIntegration,
    DataFederation => AtlasDataFederation,
    Secret => Secret,
    Generated => DynamicObject,
}

/// Every object of one run, in processing order
#[derive(Clone, Debug, Default)]
pub struct ExportedSet {
    objects: Vec<ManifestObject>,
}

impl ExportedSet {
    pub fn push(&mut self, object: impl Into<ManifestObject>) {
        self.objects.push(object.into());
    }

    pub fn extend<I, T>(&mut self, objects: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<ManifestObject>,
    {
        self.objects.extend(objects.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManifestObject> {
        self.objects.iter()
    }

    /// Kinds in order, e.g. for asserting output layout
    pub fn kinds(&self) -> Vec<String> {
        self.objects.iter().map(ManifestObject::kind).collect()
    }

    /// Set the namespace of every object
    pub fn apply_namespace(&mut self, namespace: &str) {
        for object in &mut self.objects {
            object.set_namespace(namespace);
        }
    }

    /// Encode as a multi-document YAML stream
    ///
    /// Every document is preceded by a separator and the stream ends with one.
    pub fn to_yaml_stream(&self) -> Result<String> {
        let mut stream = String::new();
        for object in &self.objects {
            stream.push_str(DOCUMENT_SEPARATOR);
            stream.push_str(&object.to_yaml()?);
        }
        stream.push_str(DOCUMENT_SEPARATOR);
        Ok(stream)
    }
}

impl IntoIterator for ExportedSet {
    type Item = ManifestObject;
    type IntoIter = std::vec::IntoIter<ManifestObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{build_secret, convert_integration};
    use crate::adapters::test_support::*;
    use crate::atlas::models::ThirdPartyIntegration;

    #[test]
    fn stream_separates_and_terminates_documents() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, true);
        let source = ThirdPartyIntegration {
            type_: "SLACK".to_string(),
            ..Default::default()
        };
        let (integration, secret) = convert_integration(&ctx, &source).unwrap();

        let mut set = ExportedSet::default();
        set.push(integration);
        set.push(secret);
        let stream = set.to_yaml_stream().unwrap();

        assert!(stream.starts_with("---\n"));
        assert!(stream.ends_with("---\n"));
        assert_eq!(stream.matches("---\n").count(), 3);
        assert!(stream.contains("kind: AtlasThirdPartyIntegration"));
        assert!(stream.contains("apiVersion: atlas.mongodb.com/v1"));
        assert!(stream.contains("status: {}"));
        assert!(stream.contains("kind: Secret"));
    }

    #[test]
    fn namespace_is_applied_to_every_object() {
        let mut set = ExportedSet::default();
        set.push(build_secret("a", "old", Vec::<(String, Vec<u8>)>::new(), Default::default()));
        set.push(build_secret("b", "old", Vec::<(String, Vec<u8>)>::new(), Default::default()));

        set.apply_namespace("atlas");

        assert!(set.iter().all(|o| o.meta().namespace.as_deref() == Some("atlas")));
        assert_eq!(set.kinds(), vec!["Secret", "Secret"]);
        assert_eq!(set.iter().map(|o| o.name()).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn empty_set_is_a_single_separator() {
        assert_eq!(ExportedSet::default().to_yaml_stream().unwrap(), "---\n");
    }
}
