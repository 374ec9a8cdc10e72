//! Recording in-memory implementation of the EC2 API
//!
//! Kept always-compiled alongside the real client so that both this crate's
//! integration tests and the CLI's command tests can drive handlers without
//! touching the network. Mutating calls are recorded for assertions;
//! `describe_image` can be scripted to fail or to report no snapshot for a
//! number of leading calls, which is how the snapshot wait is exercised.

use std::sync::Mutex;

use async_trait::async_trait;

use ec2it_core::types::{BlockDevice, Image, Instance, Tag};
use ec2it_core::{Error, Result};

use crate::api::{CreateImageRequest, Ec2Api, RunInstanceRequest};

/// Instance id returned by `run_instance`
pub const LAUNCHED_INSTANCE_ID: &str = "i-0feedfacecafe0001";

/// Image id returned by `create_image`
pub const CREATED_IMAGE_ID: &str = "ami-0feedfacecafe0001";

/// Snapshot id the created image eventually reports
pub const CREATED_SNAPSHOT_ID: &str = "snap-0feedfacecafe0001";

#[derive(Default)]
struct MockState {
    instances: Vec<Instance>,
    images: Vec<Image>,
    lifecycle_calls: Vec<(&'static str, String, bool)>,
    run_requests: Vec<RunInstanceRequest>,
    create_image_requests: Vec<CreateImageRequest>,
    created_tags: Vec<(Vec<String>, Vec<Tag>)>,
    describe_image_calls: u32,
    hide_snapshot_calls: u32,
    fail_describe_image_calls: u32,
}

/// In-memory `Ec2Api` that records every mutating call
#[derive(Default)]
pub struct MockEc2 {
    state: Mutex<MockState>,
}

impl MockEc2 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instances(instances: Vec<Instance>) -> Self {
        let mock = Self::default();
        mock.state.lock().unwrap().instances = instances;
        mock
    }

    pub fn with_images(images: Vec<Image>) -> Self {
        let mock = Self::default();
        mock.state.lock().unwrap().images = images;
        mock
    }

    pub fn add_instance(&self, instance: Instance) {
        self.state.lock().unwrap().instances.push(instance);
    }

    pub fn add_image(&self, image: Image) {
        self.state.lock().unwrap().images.push(image);
    }

    /// Make the first `calls` describe_image calls report no snapshot ids
    pub fn hide_snapshots_for(&self, calls: u32) {
        self.state.lock().unwrap().hide_snapshot_calls = calls;
    }

    /// Make the first `calls` describe_image calls fail with an API error
    pub fn fail_describe_image_for(&self, calls: u32) {
        self.state.lock().unwrap().fail_describe_image_calls = calls;
    }

    /// Recorded (operation, instance id, dry_run) triples
    pub fn lifecycle_calls(&self) -> Vec<(&'static str, String, bool)> {
        self.state.lock().unwrap().lifecycle_calls.clone()
    }

    pub fn run_requests(&self) -> Vec<RunInstanceRequest> {
        self.state.lock().unwrap().run_requests.clone()
    }

    pub fn create_image_requests(&self) -> Vec<CreateImageRequest> {
        self.state.lock().unwrap().create_image_requests.clone()
    }

    /// Recorded (resource ids, tags) pairs from `create_tags`
    pub fn created_tags(&self) -> Vec<(Vec<String>, Vec<Tag>)> {
        self.state.lock().unwrap().created_tags.clone()
    }

    pub fn describe_image_calls(&self) -> u32 {
        self.state.lock().unwrap().describe_image_calls
    }
}

fn without_snapshots(mut image: Image) -> Image {
    for device in &mut image.block_devices {
        device.snapshot_id = None;
    }
    image
}

#[async_trait]
impl Ec2Api for MockEc2 {
    async fn describe_instances(&self) -> Result<Vec<Instance>> {
        Ok(self.state.lock().unwrap().instances.clone())
    }

    async fn describe_instance(&self, id: &str) -> Result<Option<Instance>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .instances
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn start_instances(&self, id: &str, dry_run: bool) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .lifecycle_calls
            .push(("start", id.to_string(), dry_run));
        Ok(())
    }

    async fn stop_instances(&self, id: &str, dry_run: bool) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .lifecycle_calls
            .push(("stop", id.to_string(), dry_run));
        Ok(())
    }

    async fn terminate_instances(&self, id: &str, dry_run: bool) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .lifecycle_calls
            .push(("terminate", id.to_string(), dry_run));
        Ok(())
    }

    async fn run_instance(&self, request: &RunInstanceRequest) -> Result<String> {
        self.state.lock().unwrap().run_requests.push(request.clone());
        Ok(LAUNCHED_INSTANCE_ID.to_string())
    }

    async fn describe_images(&self) -> Result<Vec<Image>> {
        Ok(self.state.lock().unwrap().images.clone())
    }

    async fn describe_image(&self, id: &str) -> Result<Option<Image>> {
        let mut state = self.state.lock().unwrap();
        state.describe_image_calls += 1;

        if state.fail_describe_image_calls > 0 {
            state.fail_describe_image_calls -= 1;
            return Err(Error::api("mock describe_images failure"));
        }

        let hidden = state.describe_image_calls <= state.hide_snapshot_calls;
        Ok(state
            .images
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .map(|image| if hidden { without_snapshots(image) } else { image }))
    }

    async fn create_image(&self, request: &CreateImageRequest) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.create_image_requests.push(request.clone());
        state.images.push(Image {
            id: CREATED_IMAGE_ID.to_string(),
            image_name: request.name.clone(),
            status: "pending".to_string(),
            creation_date: None,
            tags: Vec::new(),
            block_devices: vec![BlockDevice {
                device_name: "/dev/sda1".to_string(),
                virtual_name: None,
                snapshot_id: Some(CREATED_SNAPSHOT_ID.to_string()),
            }],
        });
        Ok(CREATED_IMAGE_ID.to_string())
    }

    async fn create_tags(&self, resource_ids: &[String], tags: &[Tag]) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .created_tags
            .push((resource_ids.to_vec(), tags.to_vec()));
        Ok(())
    }
}
