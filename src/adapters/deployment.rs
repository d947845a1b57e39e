//! Deployment (dedicated cluster) converter

use crate::atlas::models::{AdvancedClusterDescription, AutoScaling, HardwareSpec, RegionConfig, ReplicationSpec, ResourceTag};
use crate::crd::{
    AdvancedAutoScalingSpec, AdvancedDeploymentSpec, AdvancedRegionConfig, AdvancedReplicationSpec,
    AtlasDeployment, AtlasDeploymentSpec, CommonStatus, ComputeSpec, DiskGB, Specs, TagSpec,
};

use super::ConvertContext;

/// Convert a dedicated cluster into an AtlasDeployment
pub fn convert_deployment(ctx: &ConvertContext<'_>, cluster: &AdvancedClusterDescription) -> AtlasDeployment {
    let name = ctx.project_scoped_name(&[&cluster.name]);

    let deployment_spec = AdvancedDeploymentSpec {
        name: cluster.name.clone(),
        cluster_type: cluster.cluster_type.clone(),
        mongo_db_major_version: cluster.mongo_db_major_version.clone(),
        backup_enabled: cluster.backup_enabled,
        paused: cluster.paused,
        pit_enabled: cluster.pit_enabled,
        termination_protection_enabled: cluster.termination_protection_enabled,
        version_release_system: cluster.version_release_system.clone(),
        root_cert_type: cluster.root_cert_type.clone(),
        encryption_at_rest_provider: cluster.encryption_at_rest_provider.clone(),
        disk_size_gb: cluster.disk_size_gb.map(|gb| gb.round() as i64),
        replication_specs: cluster.replication_specs.iter().map(convert_replication_spec).collect(),
        tags: convert_tags(&cluster.tags),
        labels: convert_tags(&cluster.labels),
    };

    let spec = AtlasDeploymentSpec {
        project: ctx.project_reference(),
        deployment_spec,
    };

    let mut deployment = AtlasDeployment::new(&name, spec);
    deployment.metadata = ctx.object_meta(&name);
    deployment.status = Some(CommonStatus::default());
    deployment
}

fn convert_tags(tags: &[ResourceTag]) -> Vec<TagSpec> {
    tags.iter()
        .map(|t| TagSpec {
            key: t.key.clone(),
            value: t.value.clone(),
        })
        .collect()
}

fn convert_replication_spec(spec: &ReplicationSpec) -> AdvancedReplicationSpec {
    AdvancedReplicationSpec {
        zone_name: spec.zone_name.clone(),
        region_configs: spec.region_configs.iter().map(convert_region_config).collect(),
    }
}

fn convert_region_config(config: &RegionConfig) -> AdvancedRegionConfig {
    AdvancedRegionConfig {
        provider_name: config.provider_name.clone(),
        backing_provider_name: config.backing_provider_name.clone(),
        region_name: config.region_name.clone(),
        priority: config.priority,
        electable_specs: config.electable_specs.as_ref().map(convert_hardware),
        read_only_specs: config
            .read_only_specs
            .as_ref()
            .filter(|s| s.node_count.unwrap_or(0) > 0)
            .map(convert_hardware),
        analytics_specs: config
            .analytics_specs
            .as_ref()
            .filter(|s| s.node_count.unwrap_or(0) > 0)
            .map(convert_hardware),
        auto_scaling: config.auto_scaling.as_ref().map(convert_auto_scaling),
    }
}

fn convert_hardware(spec: &HardwareSpec) -> Specs {
    Specs {
        instance_size: spec.instance_size.clone(),
        node_count: spec.node_count,
        disk_iops: spec.disk_iops,
        ebs_volume_type: spec.ebs_volume_type.clone(),
    }
}

fn convert_auto_scaling(auto_scaling: &AutoScaling) -> AdvancedAutoScalingSpec {
    AdvancedAutoScalingSpec {
        compute: auto_scaling.compute.as_ref().map(|c| ComputeSpec {
            enabled: c.enabled,
            scale_down_enabled: c.scale_down_enabled,
            min_instance_size: c.min_instance_size.clone(),
            max_instance_size: c.max_instance_size.clone(),
        }),
        disk_gb: auto_scaling.disk_gb.as_ref().map(|d| DiskGB { enabled: d.enabled }),
    }
}
