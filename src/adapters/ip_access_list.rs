//! IP access list converter

use crate::atlas::models::NetworkPermissionEntry;
use crate::crd::{AtlasIPAccessList, AtlasIPAccessListSpec, CommonStatus, IPAccessEntry};

use super::ConvertContext;

/// Convert all access list entries of a project into one AtlasIPAccessList
///
/// Returns `None` when the project has no entries.
pub fn convert_ip_access_list(
    ctx: &ConvertContext<'_>,
    entries: &[NetworkPermissionEntry],
) -> Option<AtlasIPAccessList> {
    if entries.is_empty() {
        return None;
    }

    let name = ctx.project_scoped_name(&["ip-access-list"]);
    let spec = AtlasIPAccessListSpec {
        project: ctx.project_reference(),
        entries: entries.iter().map(convert_entry).collect(),
    };

    let mut list = AtlasIPAccessList::new(&name, spec);
    list.metadata = ctx.object_meta(&name);
    list.status = Some(CommonStatus::default());
    Some(list)
}

fn convert_entry(entry: &NetworkPermissionEntry) -> IPAccessEntry {
    // Atlas echoes single addresses both as ipAddress and as a /32 cidrBlock
    let cidr_block = match (&entry.ip_address, &entry.cidr_block) {
        (Some(_), _) => None,
        (None, cidr) => cidr.clone(),
    };
    IPAccessEntry {
        cidr_block,
        ip_address: entry.ip_address.clone(),
        aws_security_group: entry.aws_security_group.clone(),
        delete_after_date: entry.delete_after_date,
        comment: entry.comment.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn empty_access_list_produces_nothing() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, false);
        assert!(convert_ip_access_list(&ctx, &[]).is_none());
    }

    #[test]
    fn single_addresses_drop_the_echoed_cidr() {
        let dict = dictionary();
        let suffixes = suffix();
        let ctx = context(&dict, &suffixes, true);
        let entries = vec![
            NetworkPermissionEntry {
                ip_address: Some("10.0.0.1".to_string()),
                cidr_block: Some("10.0.0.1/32".to_string()),
                ..Default::default()
            },
            NetworkPermissionEntry {
                cidr_block: Some("192.168.0.0/16".to_string()),
                comment: Some("office".to_string()),
                ..Default::default()
            },
        ];

        let list = convert_ip_access_list(&ctx, &entries).unwrap();
        assert_eq!(list.metadata.name.as_deref(), Some("my-project-ip-access-list"));
        assert_eq!(list.spec.entries[0].cidr_block, None);
        assert_eq!(list.spec.entries[0].ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(list.spec.entries[1].cidr_block.as_deref(), Some("192.168.0.0/16"));
        assert_eq!(list.spec.project.external_project_id(), Some("6500000000000000000000aa"));
    }
}
