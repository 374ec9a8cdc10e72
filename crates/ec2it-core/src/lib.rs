//! # ec2it-core
//!
//! Core library for the ec2it CLI providing:
//! - Configuration file parsing (ec2it.toml)
//! - Domain types for EC2 instances, images, and tags
//! - Bounded retry execution for polling operations

pub mod config;
pub mod error;
pub mod retry;
pub mod types;

pub use config::Ec2itConfig;
pub use error::{Error, Result};
