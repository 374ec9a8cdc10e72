//! Domain types for EC2 instances, images, and their tags

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag key holding the user-visible resource name
pub const NAME_TAG: &str = "Name";

/// Tag key classifying a resource by role (e.g. web, db)
pub const ROLE_TAG: &str = "Role";

/// Tag key classifying a resource by group (e.g. prod, staging)
pub const GROUP_TAG: &str = "Group";

/// Kind of resource being resolved, for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Instance,
    Image,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Instance => write!(f, "instance"),
            ResourceKind::Image => write!(f, "image"),
        }
    }
}

/// A key/value resource tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Look up the value of `key` in a tag slice
pub fn tag_value<'a>(tags: &'a [Tag], key: &str) -> Option<&'a str> {
    tags.iter()
        .find(|t| t.key == key)
        .map(|t| t.value.as_str())
}

/// Build the tag set for a resource derived from another: a fresh Name tag
/// plus every non-Name tag copied from the source.
pub fn merge_tags(name: &str, source: &[Tag]) -> Vec<Tag> {
    let mut tags = vec![Tag::new(NAME_TAG, name)];
    tags.extend(source.iter().filter(|t| t.key != NAME_TAG).cloned());
    tags
}

/// An EBS or ephemeral block device attached to an instance or image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDevice {
    /// Device name, e.g. /dev/sda1
    pub device_name: String,
    /// Virtual device name for ephemeral mappings, e.g. ephemeral0
    pub virtual_name: Option<String>,
    /// Backing EBS snapshot id, once the provider has associated one
    pub snapshot_id: Option<String>,
}

/// An EC2 instance as returned by the provider
#[derive(Debug, Clone, Default)]
pub struct Instance {
    pub id: String,
    pub status: String,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub tags: Vec<Tag>,
    pub block_devices: Vec<BlockDevice>,
}

impl Instance {
    /// The Name tag value, if the instance carries one
    pub fn name(&self) -> Option<&str> {
        tag_value(&self.tags, NAME_TAG)
    }

    pub fn role(&self) -> Option<&str> {
        tag_value(&self.tags, ROLE_TAG)
    }

    pub fn group(&self) -> Option<&str> {
        tag_value(&self.tags, GROUP_TAG)
    }
}

/// An AMI as returned by the provider
#[derive(Debug, Clone, Default)]
pub struct Image {
    pub id: String,
    /// The AMI name field, distinct from the Name tag
    pub image_name: String,
    pub status: String,
    pub creation_date: Option<String>,
    pub tags: Vec<Tag>,
    pub block_devices: Vec<BlockDevice>,
}

impl Image {
    /// The Name tag value, if the image carries one
    pub fn name(&self) -> Option<&str> {
        tag_value(&self.tags, NAME_TAG)
    }

    /// The Name tag, falling back to the AMI name field
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(&self.image_name)
    }

    pub fn role(&self) -> Option<&str> {
        tag_value(&self.tags, ROLE_TAG)
    }

    pub fn group(&self) -> Option<&str> {
        tag_value(&self.tags, GROUP_TAG)
    }

    /// The first EBS snapshot id among the image's block device mappings
    pub fn snapshot_id(&self) -> Option<&str> {
        self.block_devices
            .iter()
            .find_map(|b| b.snapshot_id.as_deref())
    }
}
