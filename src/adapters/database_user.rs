//! Database user converter

use k8s_openapi::api::core::v1::Secret;
use kube::Resource;

use crate::atlas::models::CloudDatabaseUser;
use crate::crd::{
    AtlasDatabaseUser, AtlasDatabaseUserSpec, CommonStatus, LocalObjectReference, RoleSpec,
    ScopeSpec, TagSpec,
};
use crate::naming::{normalize_parts, NameClaims};

use super::secrets::resource_secret;
use super::ConvertContext;

/// Key of the password in a database user secret
pub const PASSWORD_KEY: &str = "password";

/// Convert a database user; password users also get a password secret
///
/// Atlas never returns passwords, so the secret is always a placeholder.
/// Names are claimed from `names`, so users whose names normalize alike
/// still get distinct manifests and secrets.
pub fn convert_database_user(
    ctx: &ConvertContext<'_>,
    user: &CloudDatabaseUser,
    names: &mut NameClaims,
) -> (AtlasDatabaseUser, Option<Secret>) {
    let identity = format!("{}/{}", user.database_name, user.username);
    let name = names.claim(
        &AtlasDatabaseUser::kind(&()),
        ctx.project_scoped_name(&[&user.username]),
        &identity,
        ctx.dictionary,
    );

    let secret = user.uses_password().then(|| {
        let secret_name = names.claim(
            &Secret::kind(&()),
            normalize_parts(&[&name, "password"], ctx.dictionary),
            &identity,
            ctx.dictionary,
        );
        resource_secret(ctx, &secret_name, &[(PASSWORD_KEY, None)])
    });

    let spec = AtlasDatabaseUserSpec {
        project: ctx.project_reference(),
        username: user.username.clone(),
        database_name: user.database_name.clone(),
        roles: user
            .roles
            .iter()
            .map(|r| RoleSpec {
                role_name: r.role_name.clone(),
                database_name: r.database_name.clone(),
                collection_name: r.collection_name.clone().filter(|c| !c.is_empty()),
            })
            .collect(),
        scopes: user
            .scopes
            .iter()
            .map(|s| ScopeSpec {
                name: s.name.clone(),
                type_: s.type_.clone(),
            })
            .collect(),
        labels: user
            .labels
            .iter()
            .map(|l| TagSpec {
                key: l.key.clone(),
                value: l.value.clone(),
            })
            .collect(),
        password_secret_ref: secret.as_ref().and_then(|s| {
            s.metadata
                .name
                .clone()
                .map(|name| LocalObjectReference { name })
        }),
        x509_type: auth_type(&user.x509_type),
        aws_iam_type: auth_type(&user.aws_iam_type),
        oidc_auth_type: auth_type(&user.oidc_auth_type),
        description: user.description.clone().filter(|d| !d.is_empty()),
        delete_after_date: user.delete_after_date.map(|d| d.to_rfc3339()),
    };

    let mut db_user = AtlasDatabaseUser::new(&name, spec);
    db_user.metadata = ctx.object_meta(&name);
    db_user.status = Some(CommonStatus::default());

    (db_user, secret)
}

fn auth_type(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty() && v != "NONE")
}
