//! Exporters for kinds translated from generated CRDs
//!
//! The unit of work is a set of project ids. Exporters whose kind references
//! another generated kind take that kind's output from earlier in the run.

use kube::core::DynamicObject;
use tracing::debug;

use crate::adapters::ConvertContext;
use crate::atlas::models::Group;
use crate::atlas::{fetch_clusters, AtlasClient};
use crate::error::{Error, Result};
use crate::naming::{normalize, normalize_parts};

use super::translator::{ReferenceIndex, Translator};

/// A translated manifest and the Atlas id it was produced from
#[derive(Clone, Debug)]
pub struct TranslatedObject {
    pub id: String,
    pub object: DynamicObject,
}

impl TranslatedObject {
    /// Kind of the manifest
    pub fn kind(&self) -> &str {
        self.object
            .types
            .as_ref()
            .map(|t| t.kind.as_str())
            .unwrap_or_default()
    }
}

impl ReferenceIndex {
    /// Index previously translated objects by kind and id
    pub fn from_translated<'a>(objects: impl IntoIterator<Item = &'a TranslatedObject>) -> Self {
        let mut index = ReferenceIndex::default();
        for translated in objects {
            if let Some(name) = translated.object.metadata.name.as_deref() {
                index.insert(translated.kind(), &translated.id, name);
            }
        }
        index
    }
}

/// Translate each project into a `Group`
///
/// Projects already fetched earlier in the run are passed in `known` and
/// are not requested again.
pub async fn export_groups<C: AtlasClient + ?Sized>(
    client: &C,
    ctx: &ConvertContext<'_>,
    translator: &Translator<'_>,
    project_ids: &[String],
    known: &[Group],
) -> Result<Vec<TranslatedObject>> {
    let mut exported = Vec::with_capacity(project_ids.len());
    for project_id in project_ids {
        let group = match known.iter().find(|g| &g.id == project_id) {
            Some(group) => group.clone(),
            None => client
                .get_project(project_id)
                .await
                .map_err(|e| Error::upstream("group", None, e))?,
        };
        let name = normalize(&group.name, ctx.dictionary);
        let source = serde_json::to_value(&group)?;
        let object = translator.to_manifest(ctx, &name, &source, &[], &ReferenceIndex::default())?;
        debug!(project_id = %project_id, name = %name, "Translated group");
        exported.push(TranslatedObject {
            id: project_id.clone(),
            object,
        });
    }
    Ok(exported)
}

/// Translate the clusters of each project into `Cluster`s
///
/// `groups` is the output of [`export_groups`] for the same run; clusters of
/// a project found there reference its `Group` instead of repeating the id.
pub async fn export_clusters<C: AtlasClient + ?Sized>(
    client: &C,
    ctx: &ConvertContext<'_>,
    translator: &Translator<'_>,
    project_ids: &[String],
    groups: &[TranslatedObject],
    page_size: u32,
) -> Result<Vec<TranslatedObject>> {
    let refs = ReferenceIndex::from_translated(groups);
    let mut exported = Vec::new();

    for project_id in project_ids {
        let prefix = refs
            .name_of("Group", project_id)
            .map(str::to_string)
            .unwrap_or_else(|| normalize(project_id, ctx.dictionary));

        for cluster in fetch_clusters(client, project_id, page_size).await? {
            let name = normalize_parts(&[&prefix, &cluster.name], ctx.dictionary);
            let source = serde_json::to_value(&cluster)?;
            let object = translator.to_manifest(
                ctx,
                &name,
                &source,
                &[("groupId", project_id.as_str())],
                &refs,
            )?;
            exported.push(TranslatedObject {
                id: cluster.id.clone().unwrap_or_else(|| cluster.name.clone()),
                object,
            });
        }
        debug!(project_id = %project_id, count = exported.len(), "Translated clusters");
    }
    Ok(exported)
}
