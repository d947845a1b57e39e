//! Schema-driven translation between Atlas API objects and generated manifests
//!
//! A generated CRD nests the Atlas API payload under `spec.<tag>`, where the
//! tag pins the Atlas API version (e.g. `v20250312`). Below the tag, `entry`
//! holds the request body and every other property is a path parameter such
//! as `groupId`, or the in-cluster reference replacing one (`groupRef`).

use std::collections::{BTreeMap, HashMap};

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::core::{ApiResource, DynamicObject};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::adapters::ConvertContext;
use crate::error::{Error, Result};

const ENTRY: &str = "entry";
const CONNECTION_SECRET_REF: &str = "connectionSecretRef";
const PRESERVE_UNKNOWN: &str = "x-kubernetes-preserve-unknown-fields";

/// A path parameter that can be expressed as a reference to another kind
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceMapping {
    /// Path parameter carrying the Atlas id, e.g. `groupId`
    pub id_field: String,
    /// Property carrying the in-cluster reference, e.g. `groupRef`
    pub ref_field: String,
    /// Kind the reference points at, e.g. `Group`
    pub target_kind: String,
}

/// Reference mappings known to the translator
#[derive(Clone, Debug)]
pub struct SchemaRegistry {
    mappings: Vec<ReferenceMapping>,
}

impl SchemaRegistry {
    pub fn new(mappings: Vec<ReferenceMapping>) -> Self {
        Self { mappings }
    }

    /// Mapping whose id field is `field`
    pub fn by_id_field(&self, field: &str) -> Option<&ReferenceMapping> {
        self.mappings.iter().find(|m| m.id_field == field)
    }

    /// Mapping whose reference field is `field`
    pub fn by_ref_field(&self, field: &str) -> Option<&ReferenceMapping> {
        self.mappings.iter().find(|m| m.ref_field == field)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new(vec![ReferenceMapping {
            id_field: "groupId".to_string(),
            ref_field: "groupRef".to_string(),
            target_kind: "Group".to_string(),
        }])
    }
}

/// Names of already translated objects, by kind and Atlas id
#[derive(Clone, Debug, Default)]
pub struct ReferenceIndex {
    names: HashMap<(String, String), String>,
    ids: HashMap<(String, String), String>,
}

impl ReferenceIndex {
    pub fn insert(&mut self, kind: &str, id: &str, name: &str) {
        self.names
            .insert((kind.to_string(), id.to_string()), name.to_string());
        self.ids
            .insert((kind.to_string(), name.to_string()), id.to_string());
    }

    /// Manifest name of the `kind` object with this Atlas id
    pub fn name_of(&self, kind: &str, id: &str) -> Option<&str> {
        self.names
            .get(&(kind.to_string(), id.to_string()))
            .map(String::as_str)
    }

    /// Atlas id of the `kind` object with this manifest name
    pub fn id_of(&self, kind: &str, name: &str) -> Option<&str> {
        self.ids
            .get(&(kind.to_string(), name.to_string()))
            .map(String::as_str)
    }
}

/// Atlas side of a translated manifest
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceObject {
    /// Request body, pruned to the schema
    pub entry: Value,
    /// Path parameters such as `groupId`
    pub path_params: BTreeMap<String, String>,
}

/// Bidirectional mapper for one generated kind and API version tag
#[derive(Clone, Debug)]
pub struct Translator<'r> {
    registry: &'r SchemaRegistry,
    resource: ApiResource,
    tag: String,
    spec_schema: Value,
    tag_schema: Value,
}

impl<'r> Translator<'r> {
    /// Prepare a translator for `crd` and the API version `tag`
    ///
    /// Only the first version the CRD declares is used.
    pub fn new(
        registry: &'r SchemaRegistry,
        crd: Option<&CustomResourceDefinition>,
        tag: &str,
    ) -> Result<Self> {
        let crd = crd.ok_or_else(|| Error::translation_setup("CRD is nil"))?;
        let crd_name = crd.metadata.name.clone().unwrap_or_default();
        let version = crd.spec.versions.first().ok_or_else(|| {
            Error::translation_setup(format!(
                "failed to extract CRD version: {} declares no versions",
                crd_name
            ))
        })?;

        let schema = version
            .schema
            .as_ref()
            .and_then(|s| s.open_api_v3_schema.as_ref())
            .ok_or_else(|| {
                Error::translation_setup(format!(
                    "{} version {} has no openAPIV3Schema",
                    crd_name, version.name
                ))
            })?;
        let schema = serde_json::to_value(schema)?;
        let spec_schema = schema
            .pointer("/properties/spec")
            .cloned()
            .ok_or_else(|| {
                Error::translation_setup(format!("{} version {} has no spec", crd_name, version.name))
            })?;
        let tag_schema = spec_schema
            .pointer(&format!("/properties/{}", tag))
            .cloned()
            .ok_or_else(|| {
                Error::translation_setup(format!(
                    "{} version {} has no spec property {}",
                    crd_name, version.name, tag
                ))
            })?;

        let group = crd.spec.group.clone();
        let resource = ApiResource {
            api_version: format!("{}/{}", group, version.name),
            group,
            version: version.name.clone(),
            kind: crd.spec.names.kind.clone(),
            plural: crd.spec.names.plural.clone(),
        };
        debug!(crd = %crd_name, version = %resource.version, tag, "Prepared translator");

        Ok(Self {
            registry,
            resource,
            tag: tag.to_string(),
            spec_schema,
            tag_schema,
        })
    }

    /// Kind produced by this translator
    pub fn kind(&self) -> &str {
        &self.resource.kind
    }

    /// `group/version` of produced manifests
    pub fn api_version(&self) -> &str {
        &self.resource.api_version
    }

    /// Translate an Atlas object into a manifest named `name`
    ///
    /// Path parameters are written beside `entry` when the schema declares
    /// them. In dependent mode a parameter with a reference mapping becomes
    /// a reference to the already translated target when `refs` knows it.
    pub fn to_manifest(
        &self,
        ctx: &ConvertContext<'_>,
        name: &str,
        source: &Value,
        path_params: &[(&str, &str)],
        refs: &ReferenceIndex,
    ) -> Result<DynamicObject> {
        let mut versioned = Map::new();

        if let Some(entry_schema) = self.tag_property(ENTRY) {
            if let Some(entry) = prune(source, entry_schema) {
                versioned.insert(ENTRY.to_string(), entry);
            }
        }

        for (param, value) in path_params {
            let reference = self
                .registry
                .by_id_field(param)
                .filter(|m| !ctx.independent && self.tag_property(&m.ref_field).is_some())
                .and_then(|m| refs.name_of(&m.target_kind, value).map(|target| (m, target)));

            match reference {
                Some((mapping, target)) => {
                    versioned.insert(mapping.ref_field.clone(), json!({ "name": target }));
                }
                None if self.tag_property(param).is_some() => {
                    versioned.insert(param.to_string(), json!(value));
                }
                None => {}
            }
        }

        let mut spec = Map::new();
        spec.insert(self.tag.clone(), Value::Object(versioned));
        if ctx.independent && self.spec_property(CONNECTION_SECRET_REF).is_some() {
            spec.insert(
                CONNECTION_SECRET_REF.to_string(),
                json!({ "name": ctx.credentials_secret_name() }),
            );
        }

        let mut object = DynamicObject::new(name, &self.resource).within(&ctx.namespace);
        object.metadata.labels = Some(ctx.version_labels());
        object.data = json!({ "spec": spec, "status": {} });
        Ok(object)
    }

    /// Rebuild the Atlas object of a manifest produced by [`to_manifest`](Self::to_manifest)
    ///
    /// References are resolved back to Atlas ids through `refs`.
    pub fn from_manifest(&self, manifest: &DynamicObject, refs: &ReferenceIndex) -> Result<SourceObject> {
        let name = manifest.metadata.name.clone().unwrap_or_default();
        let versioned = manifest
            .data
            .get("spec")
            .and_then(|s| s.get(&self.tag))
            .and_then(Value::as_object)
            .ok_or_else(|| Error::translation(format!("{} has no spec.{}", name, self.tag)))?;

        let mut source = SourceObject {
            entry: json!({}),
            path_params: BTreeMap::new(),
        };

        for (key, value) in versioned {
            if key == ENTRY {
                source.entry = value.clone();
            } else if let Some(mapping) = self.registry.by_ref_field(key) {
                let target = value.get("name").and_then(Value::as_str).unwrap_or_default();
                let id = refs.id_of(&mapping.target_kind, target).ok_or_else(|| {
                    Error::translation(format!(
                        "{} references unknown {} {}",
                        name, mapping.target_kind, target
                    ))
                })?;
                source.path_params.insert(mapping.id_field.clone(), id.to_string());
            } else if let Some(text) = value.as_str() {
                source.path_params.insert(key.clone(), text.to_string());
            }
        }

        Ok(source)
    }

    fn tag_property(&self, name: &str) -> Option<&Value> {
        self.tag_schema.get("properties").and_then(|p| p.get(name))
    }

    fn spec_property(&self, name: &str) -> Option<&Value> {
        self.spec_schema.get("properties").and_then(|p| p.get(name))
    }
}

/// Keep only what `schema` declares; nulls are dropped
fn prune(value: &Value, schema: &Value) -> Option<Value> {
    if value.is_null() {
        return None;
    }
    if schema.get(PRESERVE_UNKNOWN).and_then(Value::as_bool) == Some(true) {
        return Some(value.clone());
    }

    match (value, schema.get("type").and_then(Value::as_str)) {
        (Value::Object(fields), Some("object")) | (Value::Object(fields), None) => {
            let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
                // Free-form map
                return schema.get("additionalProperties").map(|_| value.clone());
            };
            let pruned: Map<String, Value> = properties
                .iter()
                .filter_map(|(key, property)| {
                    let field = fields.get(key)?;
                    Some((key.clone(), prune(field, property)?))
                })
                .collect();
            Some(Value::Object(pruned))
        }
        (Value::Array(items), Some("array")) => {
            let item_schema = schema.get("items")?;
            Some(Value::Array(
                items.iter().filter_map(|i| prune(i, item_schema)).collect(),
            ))
        }
        (Value::Object(_), _) | (Value::Array(_), _) => None,
        (scalar, _) => Some(scalar.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_support::*;
    use crate::translate::{CrdProvider, SplitCrdProvider};

    const TAG: &str = "v20250312";

    fn crd(kind: &str, version: &str) -> CustomResourceDefinition {
        SplitCrdProvider::default().get_resource(kind, version).unwrap()
    }

    fn cluster_source() -> Value {
        json!({
            "name": "Cluster0",
            "clusterType": "REPLICASET",
            "stateName": "IDLE",
            "connectionStrings": { "standard": "mongodb://..." },
            "replicationSpecs": [{
                "zoneName": "Zone 1",
                "id": "rs-1",
                "regionConfigs": [{
                    "providerName": "AWS",
                    "regionName": "US_EAST_1",
                    "priority": 7,
                    "electableSpecs": { "instanceSize": "M10", "nodeCount": 3 }
                }]
            }],
            "tags": []
        })
    }

    #[test]
    fn missing_crd_is_reported() {
        let registry = SchemaRegistry::default();
        let err = Translator::new(&registry, None, TAG).unwrap_err();
        assert!(matches!(err, Error::TranslationSetup(_)));
        assert!(err.to_string().contains("CRD is nil"));
    }

    #[test]
    fn crd_without_versions_is_reported() {
        let registry = SchemaRegistry::default();
        let mut empty = crd("Group", "2.10.0");
        empty.spec.versions.clear();
        let err = Translator::new(&registry, Some(&empty), TAG).unwrap_err();
        assert!(err.to_string().contains("failed to extract CRD version"));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let registry = SchemaRegistry::default();
        let err = Translator::new(&registry, Some(&crd("Group", "2.10.0")), "v19990101").unwrap_err();
        assert!(matches!(err, Error::TranslationSetup(_)));
        assert!(err.to_string().contains("v19990101"));
    }

    #[test]
    fn first_declared_version_wins() {
        let registry = SchemaRegistry::default();
        let group = crd("Group", "2.11.0");
        assert_eq!(group.spec.versions.len(), 2);

        let translator = Translator::new(&registry, Some(&group), TAG).unwrap();
        assert_eq!(translator.api_version(), "atlas.generated.mongodb.com/v1");
        // v2 only declares the newer tag
        assert!(Translator::new(&registry, Some(&group), "v20250810").is_err());
    }

    #[test]
    fn entry_is_pruned_to_schema() {
        let registry = SchemaRegistry::default();
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);
        let translator = Translator::new(&registry, Some(&crd("Cluster", "2.10.0")), TAG).unwrap();

        let object = translator
            .to_manifest(&ctx, "my-project-cluster0", &cluster_source(), &[], &ReferenceIndex::default())
            .unwrap();

        let entry = &object.data["spec"][TAG]["entry"];
        assert_eq!(entry["name"], "Cluster0");
        assert!(entry.get("stateName").is_none());
        assert!(entry.get("connectionStrings").is_none());
        assert!(entry["replicationSpecs"][0].get("id").is_none());
        assert_eq!(
            entry["replicationSpecs"][0]["regionConfigs"][0]["electableSpecs"]["nodeCount"],
            3
        );
        assert_eq!(object.data["status"], json!({}));
        assert_eq!(object.metadata.namespace.as_deref(), Some("atlas"));
        assert_eq!(object.types.as_ref().map(|t| t.kind.as_str()), Some("Cluster"));
    }

    #[test]
    fn dependent_mode_references_exported_group() {
        let registry = SchemaRegistry::default();
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);
        let translator = Translator::new(&registry, Some(&crd("Cluster", "2.10.0")), TAG).unwrap();
        let mut refs = ReferenceIndex::default();
        refs.insert("Group", &ctx.project_id, "my-project");

        let object = translator
            .to_manifest(
                &ctx,
                "my-project-cluster0",
                &cluster_source(),
                &[("groupId", ctx.project_id.as_str())],
                &refs,
            )
            .unwrap();

        let versioned = &object.data["spec"][TAG];
        assert_eq!(versioned["groupRef"]["name"], "my-project");
        assert!(versioned.get("groupId").is_none());
        assert!(object.data["spec"].get("connectionSecretRef").is_none());

        let source = translator.from_manifest(&object, &refs).unwrap();
        assert_eq!(source.path_params["groupId"], ctx.project_id);
        assert_eq!(source.entry["name"], "Cluster0");
    }

    #[test]
    fn independent_mode_keeps_id_and_adds_connection_secret() {
        let registry = SchemaRegistry::default();
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, true);
        let translator = Translator::new(&registry, Some(&crd("Cluster", "2.10.0")), TAG).unwrap();
        let mut refs = ReferenceIndex::default();
        refs.insert("Group", &ctx.project_id, "my-project");

        let object = translator
            .to_manifest(
                &ctx,
                "my-project-cluster0",
                &cluster_source(),
                &[("groupId", ctx.project_id.as_str())],
                &refs,
            )
            .unwrap();

        let spec = &object.data["spec"];
        assert_eq!(spec[TAG]["groupId"], "6500000000000000000000aa");
        assert!(spec[TAG].get("groupRef").is_none());
        assert_eq!(spec["connectionSecretRef"]["name"], "my-project-credentials");
    }

    #[test]
    fn unresolvable_reference_fails_reverse_translation() {
        let registry = SchemaRegistry::default();
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);
        let translator = Translator::new(&registry, Some(&crd("Cluster", "2.10.0")), TAG).unwrap();
        let mut refs = ReferenceIndex::default();
        refs.insert("Group", &ctx.project_id, "my-project");
        let object = translator
            .to_manifest(&ctx, "c", &cluster_source(), &[("groupId", ctx.project_id.as_str())], &refs)
            .unwrap();

        let err = translator
            .from_manifest(&object, &ReferenceIndex::default())
            .unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
    }
}
