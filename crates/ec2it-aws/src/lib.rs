//! # ec2it-aws
//!
//! The EC2 API boundary for the ec2it CLI: the `Ec2Api` trait covering the
//! calls the tool issues, the `aws-sdk-ec2`-backed client, name/tag-based
//! resource resolution, and the snapshot-wait helper.

pub mod api;
pub mod client;
pub mod mock;
pub mod resolver;
pub mod snapshot;

pub use api::{CreateImageRequest, Ec2Api, RunInstanceRequest};
pub use client::AwsEc2;
