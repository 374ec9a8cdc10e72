//! `aws-sdk-ec2` implementation of the [`Ec2Api`] trait

use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types as ec2;
use aws_sdk_ec2::Client;
use tracing::debug;

use ec2it_core::types::{BlockDevice, Image, Instance, Tag};
use ec2it_core::{Error, Result};

use crate::api::{CreateImageRequest, Ec2Api, RunInstanceRequest};

/// The real EC2 client, constructed once per invocation and shared by
/// reference across command handlers
pub struct AwsEc2 {
    client: Client,
}

impl AwsEc2 {
    /// Build a client from the ambient AWS credential and region chain
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&config),
        }
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Map any SDK error into the core API error, preserving the full message
fn api_error<E>(err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::api(DisplayErrorContext(err).to_string())
}

fn convert_tags(tags: &[ec2::Tag]) -> Vec<Tag> {
    tags.iter()
        .filter_map(|t| match (t.key(), t.value()) {
            (Some(key), Some(value)) => Some(Tag::new(key, value)),
            _ => None,
        })
        .collect()
}

fn convert_instance(instance: &ec2::Instance) -> Instance {
    Instance {
        id: instance.instance_id().unwrap_or_default().to_string(),
        status: instance
            .state()
            .and_then(|s| s.name())
            .map(|n| n.as_str().to_string())
            .unwrap_or_default(),
        private_ip: instance.private_ip_address().map(str::to_string),
        public_ip: instance.public_ip_address().map(str::to_string),
        tags: convert_tags(instance.tags()),
        block_devices: instance
            .block_device_mappings()
            .iter()
            .map(|m| BlockDevice {
                device_name: m.device_name().unwrap_or_default().to_string(),
                virtual_name: None,
                snapshot_id: None,
            })
            .collect(),
    }
}

fn convert_image(image: &ec2::Image) -> Image {
    Image {
        id: image.image_id().unwrap_or_default().to_string(),
        image_name: image.name().unwrap_or_default().to_string(),
        status: image
            .state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        creation_date: image.creation_date().map(str::to_string),
        tags: convert_tags(image.tags()),
        block_devices: image
            .block_device_mappings()
            .iter()
            .map(|m| BlockDevice {
                device_name: m.device_name().unwrap_or_default().to_string(),
                virtual_name: m.virtual_name().map(str::to_string),
                snapshot_id: m.ebs().and_then(|e| e.snapshot_id()).map(str::to_string),
            })
            .collect(),
    }
}

#[async_trait]
impl Ec2Api for AwsEc2 {
    async fn describe_instances(&self) -> Result<Vec<Instance>> {
        let resp = self
            .client
            .describe_instances()
            .send()
            .await
            .map_err(api_error)?;

        Ok(resp
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .map(convert_instance)
            .collect())
    }

    async fn describe_instance(&self, id: &str) -> Result<Option<Instance>> {
        let resp = self
            .client
            .describe_instances()
            .instance_ids(id)
            .send()
            .await
            .map_err(api_error)?;

        Ok(resp
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .next()
            .map(convert_instance))
    }

    async fn start_instances(&self, id: &str, dry_run: bool) -> Result<()> {
        self.client
            .start_instances()
            .instance_ids(id)
            .dry_run(dry_run)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn stop_instances(&self, id: &str, dry_run: bool) -> Result<()> {
        self.client
            .stop_instances()
            .instance_ids(id)
            .dry_run(dry_run)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn terminate_instances(&self, id: &str, dry_run: bool) -> Result<()> {
        self.client
            .terminate_instances()
            .instance_ids(id)
            .dry_run(dry_run)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn run_instance(&self, request: &RunInstanceRequest) -> Result<String> {
        debug!(image_id = %request.image_id, instance_type = %request.instance_type, "running instance");

        let mut call = self
            .client
            .run_instances()
            .image_id(&request.image_id)
            .instance_type(ec2::InstanceType::from(request.instance_type.as_str()))
            .min_count(1)
            .max_count(1)
            .dry_run(request.dry_run);

        for group in &request.security_group_ids {
            call = call.security_group_ids(group);
        }
        if let Some(zone) = &request.availability_zone {
            call = call.placement(ec2::Placement::builder().availability_zone(zone).build());
        }

        let resp = call.send().await.map_err(api_error)?;
        resp.instances()
            .first()
            .and_then(|i| i.instance_id())
            .map(str::to_string)
            .ok_or_else(|| Error::api("run_instances returned no instance"))
    }

    async fn describe_images(&self) -> Result<Vec<Image>> {
        let resp = self
            .client
            .describe_images()
            .owners("self")
            .send()
            .await
            .map_err(api_error)?;

        Ok(resp.images().iter().map(convert_image).collect())
    }

    async fn describe_image(&self, id: &str) -> Result<Option<Image>> {
        let resp = self
            .client
            .describe_images()
            .image_ids(id)
            .send()
            .await
            .map_err(api_error)?;

        Ok(resp.images().first().map(convert_image))
    }

    async fn create_image(&self, request: &CreateImageRequest) -> Result<String> {
        debug!(instance_id = %request.instance_id, name = %request.name, "creating image");

        let mut call = self
            .client
            .create_image()
            .instance_id(&request.instance_id)
            .name(&request.name)
            .description(&request.description)
            .no_reboot(request.no_reboot)
            .dry_run(request.dry_run);

        for mapping in &request.block_device_mappings {
            call = call.block_device_mappings(
                ec2::BlockDeviceMapping::builder()
                    .device_name(&mapping.device_name)
                    .set_virtual_name(mapping.virtual_name.clone())
                    .build(),
            );
        }

        let resp = call.send().await.map_err(api_error)?;
        resp.image_id()
            .map(str::to_string)
            .ok_or_else(|| Error::api("create_image returned no image id"))
    }

    async fn create_tags(&self, resource_ids: &[String], tags: &[Tag]) -> Result<()> {
        let mut call = self.client.create_tags();
        for id in resource_ids {
            call = call.resources(id);
        }
        for tag in tags {
            call = call.tags(ec2::Tag::builder().key(&tag.key).value(&tag.value).build());
        }
        call.send().await.map_err(api_error)?;
        Ok(())
    }
}
