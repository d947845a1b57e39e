//! Secret construction for exported manifests

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use serde::{Deserialize, Serialize};

use super::{ConvertContext, CREDENTIALS_TYPE, PROJECT_ID_LABEL, PROJECT_NAME_LABEL, TYPE_LABEL};

/// Keys of the project connection secret
pub const CREDENTIALS_KEYS: [&str; 3] = ["orgId", "publicApiKey", "privateApiKey"];

/// Programmatic API key the operator uses to reach a project
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiCredentials {
    pub org_id: String,
    pub public_api_key: String,
    pub private_api_key: String,
}

/// Build an Opaque secret from raw key/value data
pub fn build_secret<K, V, I>(
    name: &str,
    namespace: &str,
    data: I,
    labels: BTreeMap<String, String>,
) -> Secret
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    let data = data
        .into_iter()
        .map(|(k, v)| (k.into(), ByteString(v.into())))
        .collect::<BTreeMap<_, _>>();

    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(labels),
            ..Default::default()
        },
        data: Some(data),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}

/// Build a secret with the given keys and empty values
///
/// Used when secret material is not exported but the secret must still exist
/// for references to resolve.
pub fn placeholder_secret(
    name: &str,
    namespace: &str,
    keys: &[&str],
    labels: BTreeMap<String, String>,
) -> Secret {
    build_secret(name, namespace, keys.iter().map(|k| (*k, Vec::<u8>::new())), labels)
}

/// Labels for credential secrets: version, credentials type, project id and name
pub fn credentials_labels(ctx: &ConvertContext<'_>) -> BTreeMap<String, String> {
    let mut labels = ctx.version_labels();
    labels.insert(TYPE_LABEL.to_string(), CREDENTIALS_TYPE.to_string());
    labels.insert(PROJECT_ID_LABEL.to_string(), ctx.project_id.clone());
    labels.insert(PROJECT_NAME_LABEL.to_string(), ctx.project_resource_name());
    labels
}

/// Connection secret of the project
///
/// Populated only when secrets are included and credentials were supplied.
pub fn project_credentials_secret(
    ctx: &ConvertContext<'_>,
    credentials: Option<&ApiCredentials>,
) -> Secret {
    let name = ctx.credentials_secret_name();
    match credentials.filter(|_| ctx.include_secrets) {
        Some(creds) => build_secret(
            &name,
            &ctx.namespace,
            [
                (CREDENTIALS_KEYS[0], creds.org_id.clone()),
                (CREDENTIALS_KEYS[1], creds.public_api_key.clone()),
                (CREDENTIALS_KEYS[2], creds.private_api_key.clone()),
            ],
            credentials_labels(ctx),
        ),
        None => placeholder_secret(&name, &ctx.namespace, &CREDENTIALS_KEYS, credentials_labels(ctx)),
    }
}

/// Secret holding the material of one resource, keyed by field name
///
/// Values are written only when secrets are included; otherwise every key is
/// kept with an empty value.
pub fn resource_secret(ctx: &ConvertContext<'_>, name: &str, fields: &[(&str, Option<&str>)]) -> Secret {
    let data = fields.iter().map(|(key, value)| {
        let value = if ctx.include_secrets {
            value.unwrap_or_default().as_bytes().to_vec()
        } else {
            Vec::new()
        };
        (*key, value)
    });
    build_secret(name, &ctx.namespace, data, credentials_labels(ctx))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn keys(secret: &Secret) -> Vec<&str> {
        secret
            .data
            .as_ref()
            .map(|d| d.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn placeholder_has_known_keys_and_empty_values() {
        let secret = placeholder_secret("s", "ns", &["a", "b"], BTreeMap::new());
        assert_eq!(keys(&secret), vec!["a", "b"]);
        assert!(secret.data.unwrap().values().all(|v| v.0.is_empty()));
        assert_eq!(secret.type_.as_deref(), Some("Opaque"));
    }

    #[test]
    fn credentials_secret_is_placeholder_without_include_secrets() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, true);
        let creds = ApiCredentials {
            org_id: "org".to_string(),
            public_api_key: "pub".to_string(),
            private_api_key: "priv".to_string(),
        };

        let secret = project_credentials_secret(&ctx, Some(&creds));
        assert_eq!(secret.metadata.name.as_deref(), Some("my-project-credentials"));
        assert!(secret.data.unwrap().values().all(|v| v.0.is_empty()));
    }

    #[test]
    fn credentials_secret_is_populated_with_include_secrets() {
        let dict = dictionary();
        let suffixes = suffix();
        let mut ctx = context(&dict, &suffixes, true);
        ctx.include_secrets = true;
        let creds = ApiCredentials {
            org_id: "org".to_string(),
            public_api_key: "pub".to_string(),
            private_api_key: "priv".to_string(),
        };

        let secret = project_credentials_secret(&ctx, Some(&creds));
        let data = secret.data.unwrap();
        assert_eq!(data["orgId"].0, b"org");
        assert_eq!(data["publicApiKey"].0, b"pub");
        assert_eq!(data["privateApiKey"].0, b"priv");
    }

    #[test]
    fn credential_secrets_carry_traceability_labels() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);
        let secret = resource_secret(&ctx, "x", &[("apiKey", Some("k"))]);
        let labels = secret.metadata.labels.unwrap();
        assert_eq!(labels[TYPE_LABEL], "credentials");
        assert_eq!(labels[PROJECT_ID_LABEL], "6500000000000000000000aa");
        assert_eq!(labels[PROJECT_NAME_LABEL], "my-project");
        assert_eq!(labels[super::super::VERSION_LABEL], "2.10.0");
    }
}
