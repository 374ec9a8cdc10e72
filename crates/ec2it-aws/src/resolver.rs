//! Name- and tag-based resource resolution
//!
//! Two conventions drive every lookup: listings filter on Role/Group tag
//! equality, and single-resource selection goes either by id or by a Name
//! tag that must match exactly one resource.

use ec2it_core::types::{Image, Instance, ResourceKind};
use ec2it_core::{Error, Result};

use crate::api::Ec2Api;

fn matches_filters(
    resource_role: Option<&str>,
    resource_group: Option<&str>,
    role: Option<&str>,
    group: Option<&str>,
) -> bool {
    role.map_or(true, |r| resource_role == Some(r))
        && group.map_or(true, |g| resource_group == Some(g))
}

/// All instances, optionally filtered by Role/Group tag equality
pub async fn fetch_instances(
    api: &dyn Ec2Api,
    role: Option<&str>,
    group: Option<&str>,
) -> Result<Vec<Instance>> {
    let mut instances = api.describe_instances().await?;
    instances.retain(|i| matches_filters(i.role(), i.group(), role, group));
    Ok(instances)
}

/// All images, optionally filtered by Role/Group tag equality
pub async fn fetch_images(
    api: &dyn Ec2Api,
    role: Option<&str>,
    group: Option<&str>,
) -> Result<Vec<Image>> {
    let mut images = api.describe_images().await?;
    images.retain(|i| matches_filters(i.role(), i.group(), role, group));
    Ok(images)
}

/// Exactly one instance, by id or by unique Name tag
///
/// An id takes precedence when both are given. Zero matches, multiple name
/// matches, and a missing selector are all errors.
pub async fn fetch_one_instance(
    api: &dyn Ec2Api,
    id: Option<&str>,
    name: Option<&str>,
) -> Result<Instance> {
    match (id, name) {
        (Some(id), _) => api
            .describe_instance(id)
            .await?
            .ok_or_else(|| Error::not_found(ResourceKind::Instance, id)),
        (None, Some(name)) => {
            let all = api.describe_instances().await?;
            let mut matches: Vec<Instance> =
                all.into_iter().filter(|i| i.name() == Some(name)).collect();
            match matches.len() {
                0 => Err(Error::not_found(ResourceKind::Instance, name)),
                1 => Ok(matches.remove(0)),
                count => Err(Error::ambiguous_name(ResourceKind::Instance, name, count)),
            }
        }
        (None, None) => Err(Error::missing_selector(ResourceKind::Instance)),
    }
}

/// Exactly one image, by id or by unique Name tag
pub async fn fetch_one_image(
    api: &dyn Ec2Api,
    id: Option<&str>,
    name: Option<&str>,
) -> Result<Image> {
    match (id, name) {
        (Some(id), _) => api
            .describe_image(id)
            .await?
            .ok_or_else(|| Error::not_found(ResourceKind::Image, id)),
        (None, Some(name)) => {
            let all = api.describe_images().await?;
            let mut matches: Vec<Image> =
                all.into_iter().filter(|i| i.name() == Some(name)).collect();
            match matches.len() {
                0 => Err(Error::not_found(ResourceKind::Image, name)),
                1 => Ok(matches.remove(0)),
                count => Err(Error::ambiguous_name(ResourceKind::Image, name, count)),
            }
        }
        (None, None) => Err(Error::missing_selector(ResourceKind::Image)),
    }
}
