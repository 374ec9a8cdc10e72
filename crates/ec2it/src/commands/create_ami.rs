//! Create-AMI command
//!
//! Creates an image from an instance without rebooting it, names it after
//! the instance plus a timestamp, copies the instance's tags onto the image,
//! and once the backing EBS snapshot shows up tags that identically.

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::debug;

use ec2it_aws::api::{CreateImageRequest, Ec2Api};
use ec2it_aws::resolver;
use ec2it_aws::snapshot::{wait_for_snapshot, SNAPSHOT_WAIT_POLICY};
use ec2it_core::types::{merge_tags, BlockDevice};
use ec2it_core::Error;

use crate::cli::TargetArgs;
use crate::output;

pub async fn run(args: TargetArgs, api: &dyn Ec2Api) -> Result<()> {
    let instance =
        resolver::fetch_one_instance(api, args.instance_id.as_deref(), args.name.as_deref())
            .await?;
    let instance_name = instance
        .name()
        .ok_or_else(|| Error::UnnamedInstance {
            id: instance.id.clone(),
        })?
        .to_string();

    let now = Local::now();
    let request = CreateImageRequest {
        instance_id: instance.id.clone(),
        name: image_name_for(&instance_name, &now),
        description: image_description_for(&instance_name, &now),
        no_reboot: true,
        block_device_mappings: ephemeral_mappings(),
        dry_run: args.dry_run,
    };
    debug!(instance_id = %request.instance_id, name = %request.name, "creating AMI");

    let image_id = api.create_image(&request).await?;
    output::success(&format!("Created AMI {} ({})", image_id, request.name));

    let tags = merge_tags(&request.name, &instance.tags);
    api.create_tags(&[image_id.clone()], &tags).await?;
    output::info("Added tags for AMI");

    let spinner = output::spinner("Waiting for snapshot to become available...");
    let waited = wait_for_snapshot(api, &image_id, &SNAPSHOT_WAIT_POLICY).await;
    spinner.finish_and_clear();
    let snapshot_id = waited?;

    api.create_tags(&[snapshot_id.clone()], &tags).await?;
    output::success(&format!("Added tags for snapshot {snapshot_id}"));

    Ok(())
}

/// Image name convention: `<instance-name>.<YYYYMMDD_HHMM>`
fn image_name_for(instance_name: &str, now: &DateTime<Local>) -> String {
    format!("{}.{}", instance_name, now.format("%Y%m%d_%H%M"))
}

fn image_description_for(instance_name: &str, now: &DateTime<Local>) -> String {
    format!(
        "Created from {} at {}",
        instance_name,
        now.format("%Y-%m-%d %H:%M:%S %z")
    )
}

/// The four ephemeral mappings every created image carries
fn ephemeral_mappings() -> Vec<BlockDevice> {
    ["/dev/sdm", "/dev/sdn", "/dev/sdo", "/dev/sdp"]
        .iter()
        .enumerate()
        .map(|(index, device)| BlockDevice {
            device_name: device.to_string(),
            virtual_name: Some(format!("ephemeral{index}")),
            snapshot_id: None,
        })
        .collect()
}
