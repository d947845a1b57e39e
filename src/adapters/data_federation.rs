//! Data federation converter

use crate::atlas::models::{
    DataLakeCollection, DataLakeDataSource, DataLakeDatabase, DataLakeStorage, DataLakeStore,
    DataLakeTenant,
};
use crate::crd::{
    AtlasDataFederation, AtlasDataFederationSpec, AwsProviderConfig, CloudProviderConfig,
    Collection, CommonStatus, DataProcessRegion, DataSource, Database, Storage, Store, View,
};

use super::ConvertContext;

/// Convert a federated database instance
pub fn convert_data_federation(ctx: &ConvertContext<'_>, tenant: &DataLakeTenant) -> AtlasDataFederation {
    let name = ctx.project_scoped_name(&[&tenant.name]);

    let spec = AtlasDataFederationSpec {
        project: ctx.project_reference(),
        name: tenant.name.clone(),
        cloud_provider_config: tenant
            .cloud_provider_config
            .as_ref()
            .and_then(|c| c.aws.as_ref())
            .map(|aws| CloudProviderConfig {
                aws: Some(AwsProviderConfig {
                    role_id: aws.role_id.clone(),
                    test_s3_bucket: aws.test_s3_bucket.clone(),
                }),
            }),
        data_process_region: tenant.data_process_region.as_ref().map(|r| DataProcessRegion {
            cloud_provider: r.cloud_provider.clone(),
            region: r.region.clone(),
        }),
        storage: tenant.storage.as_ref().map(convert_storage),
    };

    let mut federation = AtlasDataFederation::new(&name, spec);
    federation.metadata = ctx.object_meta(&name);
    federation.status = Some(CommonStatus::default());
    federation
}

fn convert_storage(storage: &DataLakeStorage) -> Storage {
    Storage {
        databases: storage.databases.iter().map(convert_database).collect(),
        stores: storage.stores.iter().map(convert_store).collect(),
    }
}

fn convert_database(db: &DataLakeDatabase) -> Database {
    Database {
        name: db.name.clone(),
        max_wildcard_collections: db.max_wildcard_collections,
        collections: db.collections.iter().map(convert_collection).collect(),
        views: db
            .views
            .iter()
            .map(|v| View {
                name: v.name.clone(),
                source: v.source.clone(),
                pipeline: v.pipeline.clone(),
            })
            .collect(),
    }
}

fn convert_collection(collection: &DataLakeCollection) -> Collection {
    Collection {
        name: collection.name.clone(),
        data_sources: collection.data_sources.iter().map(convert_data_source).collect(),
    }
}

fn convert_data_source(source: &DataLakeDataSource) -> DataSource {
    DataSource {
        store_name: source.store_name.clone(),
        allow_insecure: source.allow_insecure,
        collection: source.collection.clone(),
        collection_regex: source.collection_regex.clone(),
        database: source.database.clone(),
        database_regex: source.database_regex.clone(),
        default_format: source.default_format.clone(),
        path: source.path.clone(),
        provenance_field_name: source.provenance_field_name.clone(),
        urls: source.urls.clone(),
    }
}

fn convert_store(store: &DataLakeStore) -> Store {
    Store {
        name: store.name.clone(),
        provider: store.provider.clone(),
        additional_storage_classes: store.additional_storage_classes.clone(),
        bucket: store.bucket.clone(),
        delimiter: store.delimiter.clone(),
        include_tags: store.include_tags,
        prefix: store.prefix.clone(),
        public: store.public,
        region: store.region.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::atlas::models::{DataLakeAwsConfig, DataLakeCloudProviderConfig};

    fn tenant() -> DataLakeTenant {
        DataLakeTenant {
            name: "Federated DB".to_string(),
            cloud_provider_config: Some(DataLakeCloudProviderConfig {
                aws: Some(DataLakeAwsConfig {
                    role_id: Some("role-1".to_string()),
                    test_s3_bucket: Some("bucket-a".to_string()),
                }),
            }),
            storage: Some(DataLakeStorage {
                databases: vec![DataLakeDatabase {
                    name: "sales".to_string(),
                    collections: vec![DataLakeCollection {
                        name: "orders".to_string(),
                        data_sources: vec![DataLakeDataSource {
                            store_name: Some("s3-store".to_string()),
                            path: Some("/orders/{*}".to_string()),
                            ..Default::default()
                        }],
                    }],
                    ..Default::default()
                }],
                stores: vec![DataLakeStore {
                    name: "s3-store".to_string(),
                    provider: "s3".to_string(),
                    bucket: Some("bucket-a".to_string()),
                    region: Some("us-east-1".to_string()),
                    ..Default::default()
                }],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn converts_storage_tree() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);

        let federation = convert_data_federation(&ctx, &tenant());

        assert_eq!(federation.metadata.name.as_deref(), Some("my-project-federated-db"));
        assert_eq!(federation.spec.name, "Federated DB");
        let storage = federation.spec.storage.unwrap();
        assert_eq!(storage.stores[0].bucket.as_deref(), Some("bucket-a"));
        assert_eq!(
            storage.databases[0].collections[0].data_sources[0].store_name.as_deref(),
            Some("s3-store")
        );
        assert_eq!(
            federation
                .spec
                .cloud_provider_config
                .and_then(|c| c.aws)
                .and_then(|a| a.role_id)
                .as_deref(),
            Some("role-1")
        );
    }

    #[test]
    fn independent_mode_links_by_project_id() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, true);

        let federation = convert_data_federation(&ctx, &tenant());
        assert_eq!(
            federation.spec.project.external_project_id(),
            Some("6500000000000000000000aa")
        );
        assert_eq!(
            federation.spec.project.connection_secret().map(|s| s.name.as_str()),
            Some("my-project-credentials")
        );
    }
}
