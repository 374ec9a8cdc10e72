//! Launch command
//!
//! Runs one instance from an AMI, then copies the image's tags onto it with
//! a fresh Name tag. Instance type, availability zone, and the base security
//! group come from the config file when not given on the command line.

use anyhow::Result;
use camino::Utf8Path;
use tracing::debug;

use ec2it_aws::api::{Ec2Api, RunInstanceRequest};
use ec2it_aws::resolver;
use ec2it_core::types::merge_tags;
use ec2it_core::{Ec2itConfig, Error};

use crate::cli::LaunchArgs;
use crate::output;

pub async fn run(args: LaunchArgs, api: &dyn Ec2Api, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = Ec2itConfig::load(config_path)?;

    let instance_type = args
        .instance_type
        .or_else(|| config.instance.default_instance_type.clone())
        .ok_or_else(|| Error::missing_default("instance type"))?;
    let availability_zone = args
        .availability_zone
        .or_else(|| config.vpc.default_availability_zone.clone());
    let security_groups = merged_security_groups(
        config.instance.default_security_group.as_deref(),
        &args.security_groups,
    );

    let image = resolver::fetch_one_image(api, Some(&args.ami_id), None).await?;

    let request = RunInstanceRequest {
        image_id: image.id.clone(),
        instance_type,
        availability_zone,
        security_group_ids: security_groups,
        dry_run: args.dry_run,
    };
    debug!(?request, "launching instance");

    let instance_id = api.run_instance(&request).await?;
    output::success(&format!("Launched instance {instance_id}"));

    let tags = merge_tags(&args.name, &image.tags);
    api.create_tags(&[instance_id], &tags).await?;
    output::info("Added tags:");
    for tag in &tags {
        output::kv(&tag.key, &tag.value);
    }

    Ok(())
}

/// The configured default security group, when present, followed by every
/// user-supplied one
fn merged_security_groups(default: Option<&str>, extra: &[String]) -> Vec<String> {
    let mut groups: Vec<String> = default.map(str::to_string).into_iter().collect();
    groups.extend(extra.iter().cloned());
    groups
}
