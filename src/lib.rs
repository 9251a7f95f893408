#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod render;
pub mod waiter;

pub use builder::{BridgeArtifacts, BridgeContext, ManifestBridge, write_output};
pub use config::{BridgeConfig, RetryPolicy};
pub use error::ManifestError;
pub use models::{AssetEntry, BuildSystem, ManifestDescriptor};
pub use normalize::{ManifestShape, classify, normalize};
pub use render::{OutputFormat, render};
pub use waiter::{wait_for_manifest, wait_for_manifest_with};
