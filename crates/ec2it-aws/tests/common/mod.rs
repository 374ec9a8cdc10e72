//! Shared fixtures for ec2it-aws integration tests

use ec2it_core::types::{BlockDevice, Image, Instance, Tag};

#[allow(dead_code)]
pub fn tagged_instance(id: &str, name: &str, role: &str, group: &str) -> Instance {
    Instance {
        id: id.to_string(),
        status: "running".to_string(),
        private_ip: Some("10.0.0.10".to_string()),
        public_ip: Some("203.0.113.10".to_string()),
        tags: vec![
            Tag::new("Name", name),
            Tag::new("Role", role),
            Tag::new("Group", group),
        ],
        block_devices: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn bare_instance(id: &str) -> Instance {
    Instance {
        id: id.to_string(),
        status: "stopped".to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn tagged_image(id: &str, name: &str, role: &str, group: &str) -> Image {
    Image {
        id: id.to_string(),
        image_name: format!("{name}.20240101_0000"),
        status: "available".to_string(),
        creation_date: Some("2024-01-01T00:00:00.000Z".to_string()),
        tags: vec![
            Tag::new("Name", name),
            Tag::new("Role", role),
            Tag::new("Group", group),
        ],
        block_devices: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn image_with_snapshot(id: &str, snapshot_id: &str) -> Image {
    Image {
        id: id.to_string(),
        image_name: "backup.20240101_0000".to_string(),
        status: "pending".to_string(),
        creation_date: None,
        tags: Vec::new(),
        block_devices: vec![
            BlockDevice {
                device_name: "/dev/sdm".to_string(),
                virtual_name: Some("ephemeral0".to_string()),
                snapshot_id: None,
            },
            BlockDevice {
                device_name: "/dev/sda1".to_string(),
                virtual_name: None,
                snapshot_id: Some(snapshot_id.to_string()),
            },
        ],
    }
}
