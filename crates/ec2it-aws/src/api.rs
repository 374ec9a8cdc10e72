//! EC2 API trait definitions
//!
//! One async method per EC2 call the tool issues. Command handlers and the
//! resolver are written against this trait; the production implementation is
//! [`crate::client::AwsEc2`] and tests use [`crate::mock::MockEc2`].

use async_trait::async_trait;

use ec2it_core::types::{BlockDevice, Image, Instance, Tag};
use ec2it_core::Result;

/// Parameters for launching one instance from an AMI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInstanceRequest {
    pub image_id: String,
    pub instance_type: String,
    pub availability_zone: Option<String>,
    pub security_group_ids: Vec<String>,
    pub dry_run: bool,
}

/// Parameters for creating an AMI from an instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateImageRequest {
    pub instance_id: String,
    pub name: String,
    pub description: String,
    pub no_reboot: bool,
    pub block_device_mappings: Vec<BlockDevice>,
    pub dry_run: bool,
}

/// The EC2 operations ec2it performs
#[async_trait]
pub trait Ec2Api: Send + Sync {
    /// All instances visible to the caller
    async fn describe_instances(&self) -> Result<Vec<Instance>>;

    /// A single instance by id, or None when the response is empty
    async fn describe_instance(&self, id: &str) -> Result<Option<Instance>>;

    async fn start_instances(&self, id: &str, dry_run: bool) -> Result<()>;

    async fn stop_instances(&self, id: &str, dry_run: bool) -> Result<()>;

    async fn terminate_instances(&self, id: &str, dry_run: bool) -> Result<()>;

    /// Launch exactly one instance, returning its id
    async fn run_instance(&self, request: &RunInstanceRequest) -> Result<String>;

    /// All images owned by the caller
    async fn describe_images(&self) -> Result<Vec<Image>>;

    /// A single image by id, or None when the response is empty
    async fn describe_image(&self, id: &str) -> Result<Option<Image>>;

    /// Create an AMI from an instance, returning the new image id
    async fn create_image(&self, request: &CreateImageRequest) -> Result<String>;

    /// Apply tags to the given resources
    async fn create_tags(&self, resource_ids: &[String], tags: &[Tag]) -> Result<()>;
}
