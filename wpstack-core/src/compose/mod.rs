//! Generated docker-compose topology for WordPress sites.

mod render;
mod types;

pub use render::ComposeRenderer;
pub use types::{ComposeFile, NetworkDefinition, Service, VolumeDefinition};
