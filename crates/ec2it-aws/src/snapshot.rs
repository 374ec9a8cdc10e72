//! Wait for an AMI's backing EBS snapshot to appear
//!
//! Freshly created images report their block device mappings without a
//! snapshot id for a while. The wait polls the image description under a
//! fixed-delay retry policy; describe failures are retried the same way a
//! missing snapshot is, and the final attempt's error is what the caller
//! sees when the budget runs out.

use tracing::info;

use ec2it_core::retry::{retry_with_policy, RetryPolicy};
use ec2it_core::types::ResourceKind;
use ec2it_core::{Error, Result};

use crate::api::Ec2Api;

/// Production wait policy: the initial attempt plus ten retries, 30 seconds apart
pub const SNAPSHOT_WAIT_POLICY: RetryPolicy = RetryPolicy::fixed(11, 30_000);

/// Poll `image_id` until a snapshot id appears in its EBS block device
/// mappings, returning that snapshot id
pub async fn wait_for_snapshot(
    api: &dyn Ec2Api,
    image_id: &str,
    policy: &RetryPolicy,
) -> Result<String> {
    let snapshot_id = retry_with_policy("snapshot-wait", policy, || async move {
        let image = api
            .describe_image(image_id)
            .await?
            .ok_or_else(|| Error::not_found(ResourceKind::Image, image_id))?;

        image
            .snapshot_id()
            .map(str::to_string)
            .ok_or_else(|| Error::snapshot_missing(image_id))
    })
    .await
    .map_err(|err| err.into_source())?;

    info!(image_id, snapshot_id = %snapshot_id, "snapshot available");
    Ok(snapshot_id)
}
